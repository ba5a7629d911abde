//! Clone command - copy a resource with its history to another owner

use console::style;

use crate::context::Context;
use crate::error::Result;

pub fn run(ctx: &mut Context, uuid: &str, owner: &str, name: Option<&str>) -> Result<()> {
    let source = ctx.resource(uuid)?;
    let name = name.unwrap_or(&source.name).to_string();

    let clone = ctx
        .hub
        .clone_resource(&mut ctx.catalog, &source, owner, &name)?;

    println!(
        "{} {} {} from {}",
        style("Cloned").green().bold(),
        clone.kind,
        style(&clone.name).cyan(),
        source.uuid
    );
    println!("  {} {}", style("UUID").dim(), clone.uuid);
    println!("  {} {}", style("Location").dim(), clone.location.display());
    Ok(())
}
