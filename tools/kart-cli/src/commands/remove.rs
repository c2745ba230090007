//! Remove command.

use anyhow::Result;

use super::RemoveArgs;
use crate::context::Context;

/// Run the remove command.
pub async fn run(args: RemoveArgs, ctx: &Context) -> Result<()> {
    let store = super::open_store(ctx)?;
    let result = store.remove_product(args.product_id);
    super::finish(
        ctx,
        &store,
        result,
        &format!("Removed product {}", args.product_id),
    )
}
