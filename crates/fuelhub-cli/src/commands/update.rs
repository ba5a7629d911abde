//! Update command - replace every file of a resource as a new version

use console::style;
use std::path::Path;

use crate::context::Context;
use crate::error::Result;
use crate::util::format_size;

pub fn run(ctx: &mut Context, uuid: &str, folder: &Path, committer: Option<&str>) -> Result<()> {
    let record = ctx.resource(uuid)?;
    let snapshot =
        ctx.hub
            .replace_content(&mut ctx.catalog, &record, record.kind, folder, committer)?;

    println!(
        "{} {} to version {}",
        style("Updated").green().bold(),
        style(&record.name).cyan(),
        snapshot.version
    );
    println!("  {} {}", style("Zip").dim(), snapshot.path.display());
    println!("  {} {}", style("Size").dim(), format_size(snapshot.size));
    Ok(())
}
