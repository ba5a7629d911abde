//! Tree command - show the files of a resource at a version

use crate::context::Context;
use crate::display::render_tree;
use crate::error::Result;

pub fn run(ctx: &Context, uuid: &str, version: &str, output_json: bool) -> Result<()> {
    let record = ctx.resource(uuid)?;
    let tree = ctx.hub.file_tree(&record, version)?;

    if output_json {
        println!("{}", serde_json::to_string_pretty(&tree)?);
    } else {
        print!("{}", render_tree(&tree));
    }
    Ok(())
}
