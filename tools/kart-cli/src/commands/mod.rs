//! CLI command implementations.

pub mod add;
pub mod remove;
pub mod set;
pub mod show;

use std::sync::Arc;

use anyhow::Result;
use clap::Args;
use kart_commerce::{CartError, CartStore, ProductId};

use crate::context::Context;
use crate::output::ConsoleNotifier;

/// A cart failure whose message the notifier already printed.
#[derive(Debug, thiserror::Error)]
#[error(transparent)]
pub struct Reported(pub CartError);

/// Arguments for the add command.
#[derive(Args)]
pub struct AddArgs {
    /// Product ID.
    pub product_id: ProductId,
}

/// Arguments for the set command.
#[derive(Args)]
pub struct SetArgs {
    /// Product ID.
    pub product_id: ProductId,

    /// New amount; zero or less is ignored.
    #[arg(allow_negative_numbers = true)]
    pub amount: i64,
}

/// Arguments for the remove command.
#[derive(Args)]
pub struct RemoveArgs {
    /// Product ID.
    pub product_id: ProductId,
}

/// Open the store with terminal notifications.
fn open_store(ctx: &Context) -> Result<CartStore> {
    ctx.open_store(Arc::new(ConsoleNotifier::new(ctx.output.clone())))
}

/// Print the cart after a successful change, or surface the failure.
fn finish(ctx: &Context, store: &CartStore, result: Result<(), CartError>, done: &str) -> Result<()> {
    result.map_err(Reported)?;
    ctx.output.success(done);
    ctx.output.cart(&store.cart());
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use super::*;
    use crate::config::CliConfig;
    use crate::output::Output;

    const FIXTURE: &str = r#"{
        "products": [
            {"id": 1, "title": "Runner", "price": 179.9, "image": "runner.jpg"},
            {"id": 2, "title": "Trail", "price": 139.9, "image": "trail.jpg"}
        ],
        "stock": [
            {"id": 1, "amount": 3},
            {"id": 2, "amount": 0}
        ]
    }"#;

    fn context(dir: &Path) -> Context {
        std::fs::write(dir.join("db.json"), FIXTURE).unwrap();
        let mut config = CliConfig::default();
        config.inventory.fixture = Some("db.json".to_string());
        Context {
            config,
            output: Output::new(false, true),
            cwd: dir.to_path_buf(),
        }
    }

    #[tokio::test]
    async fn test_commands_share_persisted_cart() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = context(dir.path());
        let id = ProductId::new(1);

        add::run(AddArgs { product_id: id }, &ctx).await.unwrap();
        add::run(AddArgs { product_id: id }, &ctx).await.unwrap();
        set::run(SetArgs { product_id: id, amount: 3 }, &ctx).await.unwrap();

        let cart = open_store(&ctx).unwrap().cart();
        assert_eq!(cart.amount_of(id), Some(3));

        remove::run(RemoveArgs { product_id: id }, &ctx).await.unwrap();
        assert!(open_store(&ctx).unwrap().cart().is_empty());
    }

    #[tokio::test]
    async fn test_cart_failure_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = context(dir.path());

        let err = add::run(AddArgs { product_id: ProductId::new(2) }, &ctx)
            .await
            .unwrap_err();
        let reported = err.downcast_ref::<Reported>().unwrap();
        assert!(matches!(reported.0, CartError::OutOfStock { .. }));

        let err = remove::run(RemoveArgs { product_id: ProductId::new(1) }, &ctx)
            .await
            .unwrap_err();
        assert!(err.downcast_ref::<Reported>().is_some());
    }

    #[tokio::test]
    async fn test_missing_fixture_is_a_wiring_error() {
        let dir = tempfile::tempdir().unwrap();
        let mut ctx = context(dir.path());
        ctx.config.inventory.fixture = Some("missing.json".to_string());

        let err = show::run(&ctx).await.unwrap_err();
        assert!(err.downcast_ref::<Reported>().is_none());
    }
}
