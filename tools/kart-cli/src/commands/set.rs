//! Set-amount command.

use anyhow::Result;

use super::SetArgs;
use crate::context::Context;

/// Run the set command.
pub async fn run(args: SetArgs, ctx: &Context) -> Result<()> {
    let store = super::open_store(ctx)?;
    if args.amount <= 0 {
        ctx.output.warn(&format!(
            "Ignoring amount {}; use `kart remove {}` to drop the product",
            args.amount, args.product_id
        ));
        ctx.output.cart(&store.cart());
        return Ok(());
    }
    let result = store
        .update_product_amount(args.product_id, args.amount)
        .await;
    super::finish(
        ctx,
        &store,
        result,
        &format!("Product {} amount is now {}", args.product_id, args.amount),
    )
}
