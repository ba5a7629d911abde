//! Cat command - write one file of a resource to stdout

use std::io::Write;

use crate::context::Context;
use crate::error::Result;

pub fn run(ctx: &Context, uuid: &str, path: &str, version: &str) -> Result<()> {
    let record = ctx.resource(uuid)?;
    let (content, _) = ctx.hub.get_file(&record, path, version)?;

    let mut stdout = std::io::stdout().lock();
    stdout.write_all(&content)?;
    stdout.flush()?;
    Ok(())
}
