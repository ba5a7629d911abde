//! Thumbnails command - list thumbnail images of a resource

use crate::context::Context;
use crate::error::Result;

pub fn run(ctx: &Context, uuid: &str) -> Result<()> {
    let record = ctx.resource(uuid)?;
    for thumbnail in ctx.hub.thumbnails(&record)? {
        println!("{}", record.location.join(thumbnail).display());
    }
    Ok(())
}
