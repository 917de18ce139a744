//! Offline generator pipeline, phase 1: enumerate every unique, undecided position reachable
//! within a given depth and write one move-sequence per line.
//!
//! Usage: `explore <max_depth> <output_path>`

use connect_four_ai::generator::explore;
use std::env;
use std::error::Error;
use std::fs::File;
use std::io::BufWriter;

fn main() -> Result<(), Box<dyn Error>> {
    let mut args = env::args().skip(1);
    let max_depth: usize = match args.next() {
        Some(value) => value.parse()?,
        None => {
            eprintln!("Usage: explore <max_depth> <output_path>");
            return Err("missing max_depth".into());
        }
    };
    let output_path = args.next().ok_or("missing output_path")?;

    let mut writer = BufWriter::new(File::create(&output_path)?);
    let emitted = explore(max_depth, &mut writer)?;
    println!("Wrote {emitted} sequences to {output_path}");
    Ok(())
}
