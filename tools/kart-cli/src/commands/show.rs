//! Show command.

use anyhow::Result;

use crate::context::Context;

/// Run the show command.
pub async fn run(ctx: &Context) -> Result<()> {
    let store = super::open_store(ctx)?;
    ctx.output
        .debug(&format!("Reading cart from key {}", store.storage_key()));
    ctx.output.cart(&store.cart());
    Ok(())
}
