//! List command - list live resources

use console::style;

use crate::context::Context;
use crate::error::Result;
use crate::util::{format_size, short_id};

pub fn run(ctx: &Context, owner: Option<&str>, output_json: bool) -> Result<()> {
    let records = ctx.catalog.list(owner)?;

    if output_json {
        println!("{}", serde_json::to_string_pretty(&records)?);
        return Ok(());
    }

    if records.is_empty() {
        match owner {
            Some(owner) => println!("No resources found for {}", owner),
            None => println!("No resources found"),
        }
        return Ok(());
    }

    println!(
        "{:<10} {:<24} {:<16} {:<8} {:<12} {:<20}",
        style("UUID").bold(),
        style("NAME").bold(),
        style("OWNER").bold(),
        style("KIND").bold(),
        style("SIZE").bold(),
        style("CREATED").bold()
    );

    for record in records {
        println!(
            "{:<10} {:<24} {:<16} {:<8} {:<12} {:<20}",
            short_id(&record.uuid, 8),
            record.name,
            record.owner,
            record.kind.to_string(),
            format_size(record.filesize),
            record.created_at.format("%Y-%m-%d %H:%M:%S")
        );
    }
    Ok(())
}
