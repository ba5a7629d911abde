//! Remove command - soft delete a resource

use console::style;

use crate::context::Context;
use crate::error::Result;

pub fn run(ctx: &mut Context, uuid: &str) -> Result<()> {
    let record = ctx.resource(uuid)?;
    ctx.hub.remove(&mut ctx.catalog, &record)?;

    println!(
        "{} {} (files kept at {})",
        style("Removed").yellow().bold(),
        style(&record.name).cyan(),
        record.location.display()
    );
    Ok(())
}
