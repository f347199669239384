//! Example: summarize the filter facets of a line-item CSV.
//!
//! Usage:
//!   cargo run --example facets -- <file_path> [min_present]

use std::env;
use std::path::Path;
use std::process;

use ledgerline::{LineItemTable, RowReader};

fn main() -> ledgerline::Result<()> {
    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        eprintln!("Usage: cargo run --example facets -- <file_path> [min_present]");
        process::exit(1);
    }

    let path = Path::new(&args[1]);
    let min_present: usize = args.get(2).and_then(|s| s.parse().ok()).unwrap_or(50);

    if !path.exists() {
        eprintln!("Error: file not found: {}", path.display());
        process::exit(1);
    }

    let reader = RowReader::new();
    let (rows, source) = reader.read_path(path)?;
    let table = LineItemTable::build_default(&rows)?;

    println!("## Source");
    println!("  File: {} ({} bytes)", source.file, source.size_bytes);
    println!("  Hash: {}", source.hash);
    println!("  Rows: {}  Columns: {}", source.row_count, source.column_count);
    println!();

    println!("## Facets");
    println!("  Banks: {:?}", table.facets().banks);
    println!("  Categories: {:?}", table.facets().categories);
    println!("  Sub-categories: {:?}", table.facets().sub_categories);
    println!();

    println!("## Period availability (threshold {min_present})");
    for (key, availability) in table.period_availability() {
        let mark = if availability.clears(min_present) { "+" } else { " " };
        println!(
            "  {mark} {:10} {:>5}/{:<5} ({:.1}%)",
            key.label(),
            availability.present,
            availability.total,
            availability.coverage() * 100.0
        );
    }
    println!();

    println!("## Line items");
    for (row, depth) in table.hierarchy().walk() {
        if let Some(item) = table.item(row) {
            println!("  {}{} [{}]", "  ".repeat(depth), item.name, item.category);
        }
    }

    Ok(())
}
