use crate::cli::Context;
use crate::error::Result;
use crate::fmt::{format_bytes, money};
use crate::reports::total_revenue;

pub fn run(ctx: &Context) -> Result<()> {
    let path = &ctx.master_path;

    println!("Language:   {}", ctx.language.display_name());
    println!("Currency:   {}", ctx.currency);
    println!("Master:     {}", path.display());

    if !path.exists() {
        println!();
        println!("No master table yet. Run `hostbook import <FILE>` to create one.");
        return Ok(());
    }

    let size = std::fs::metadata(path)?.len();
    println!("Size:       {}", format_bytes(size));

    let master = ctx.open_master()?;
    let bookings = master.bookings();
    let arrivals = bookings.iter().filter_map(|b| b.arrival_date);
    let first = arrivals.clone().min();
    let last = arrivals.max();

    println!();
    println!("Bookings:   {}", master.len());
    println!("Codes:      {}", master.codes().len());
    if let (Some(first), Some(last)) = (first, last) {
        println!("Arrivals:   {first} to {last}");
    }
    println!(
        "Revenue:    {}",
        money(total_revenue(bookings), &ctx.currency)
    );
    Ok(())
}
