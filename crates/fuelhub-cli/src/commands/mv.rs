//! Move command - transfer a resource to another owner

use console::style;

use crate::context::Context;
use crate::error::Result;

pub fn run(ctx: &mut Context, uuid: &str, owner: &str) -> Result<()> {
    let mut record = ctx.resource(uuid)?;
    let from = record.owner.clone();
    ctx.hub.move_resource(&mut ctx.catalog, &mut record, owner)?;

    println!(
        "{} {} from {} to {}",
        style("Moved").green().bold(),
        style(&record.name).cyan(),
        from,
        record.owner
    );
    println!("  {} {}", style("Location").dim(), record.location.display());
    Ok(())
}
