use std::path::PathBuf;

use colored::Colorize;

use crate::cli::report::booking_table;
use crate::cli::Context;
use crate::error::{HostbookError, Result};
use crate::importer::import_file;

pub fn run(ctx: &Context, file: &str, dry_run: bool) -> Result<()> {
    let file_path = PathBuf::from(file);
    let labels = ctx.labels();
    let mut master = ctx.open_master()?;

    let result = match import_file(&mut master, &file_path, dry_run) {
        Ok(result) => result,
        Err(HostbookError::MissingColumns(missing)) => {
            return Err(HostbookError::Other(labels.missing_cols(&missing)));
        }
        Err(e) => return Err(e),
    };

    println!("{}", labels.duplicates.bold());
    if result.duplicates.is_empty() {
        println!("{}", labels.no_duplicates.green());
    } else {
        println!("{}", booking_table(&result.duplicates, labels, &ctx.currency));
    }
    println!();

    if !result.repeats.is_empty() {
        println!("{}", labels.repeats.bold());
        println!("{}", booking_table(&result.repeats, labels, &ctx.currency));
        println!();
    }

    if result.added.is_empty() {
        println!("{}", labels.no_new);
        return Ok(());
    }

    println!("{}", labels.new_bookings.bold());
    println!("{}", booking_table(&result.added, labels, &ctx.currency));
    if dry_run {
        println!("{}", labels.dry_run_count(result.added.len()).yellow());
    } else {
        println!("{}", labels.added_count(result.added.len()).green());
    }
    Ok(())
}
