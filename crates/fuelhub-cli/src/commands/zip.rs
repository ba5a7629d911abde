//! Zip command - produce (or reuse) the snapshot of a version

use console::style;

use crate::context::Context;
use crate::error::Result;
use crate::util::format_size;

pub fn run(ctx: &Context, uuid: &str, version: &str) -> Result<()> {
    let record = ctx.resource(uuid)?;
    let snapshot = ctx.hub.get_zip(&record, record.kind, version)?;
    let digest = snapshot.sha256()?;

    println!("{} {}", style("Path").bold(), snapshot.path.display());
    println!("{} {}", style("Version").bold(), snapshot.version);
    println!(
        "{} {} ({} bytes)",
        style("Size").bold(),
        format_size(snapshot.size),
        snapshot.size
    );
    println!("{} sha256:{}", style("Digest").bold(), digest);
    Ok(())
}
