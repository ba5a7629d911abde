//! Create command - register a new resource from a folder

use console::style;
use fuelhub_core::ResourceKind;
use std::path::Path;

use crate::context::Context;
use crate::error::Result;
use crate::util::format_size;

pub fn run(
    ctx: &mut Context,
    source: &Path,
    name: &str,
    owner: &str,
    kind: ResourceKind,
) -> Result<()> {
    let record = ctx
        .hub
        .create_resource(&mut ctx.catalog, name, owner, kind, source)?;

    println!(
        "{} {} {}",
        style("Created").green().bold(),
        kind,
        style(&record.name).cyan()
    );
    println!("  {} {}", style("UUID").dim(), record.uuid);
    println!("  {} {}", style("Location").dim(), record.location.display());
    println!("  {} 1", style("Version").dim());
    println!("  {} {}", style("Size").dim(), format_size(record.filesize));
    Ok(())
}
