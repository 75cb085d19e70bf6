//! Configuration commands

use anyhow::Result;

use crate::commands::CommandContext;

/// Print the effective configuration
pub fn show(ctx: &CommandContext) -> Result<()> {
    println!("{}", ctx.render(&ctx.config)?);
    Ok(())
}
