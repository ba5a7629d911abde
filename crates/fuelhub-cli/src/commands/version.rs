//! Version command - resolve a client version against a resource's history

use crate::context::Context;
use crate::error::Result;

pub fn run(ctx: &Context, uuid: &str, version: &str) -> Result<()> {
    let record = ctx.resource(uuid)?;
    let resolved = ctx.hub.resolve_version(&record, version)?;
    let latest = ctx.hub.latest_version(&record)?;

    println!("version  {}", resolved.version);
    println!("latest   {}", latest);
    println!("revision {}", resolved.revision);
    Ok(())
}
