//! Add command.

use anyhow::Result;

use super::AddArgs;
use crate::context::Context;

/// Run the add command.
pub async fn run(args: AddArgs, ctx: &Context) -> Result<()> {
    let store = super::open_store(ctx)?;
    let result = store.add_product(args.product_id).await;
    super::finish(
        ctx,
        &store,
        result,
        &format!("Added product {}", args.product_id),
    )
}
