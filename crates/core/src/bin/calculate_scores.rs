//! Offline generator pipeline, phase 2: solve every sequence from phase 1's output and append
//! "<sequence> <score>" lines to a text score book.
//!
//! Usage: `calculate_scores <input_path> <output_path>`
//!
//! Resumable: re-running against the same output path skips whatever lines are already there.

use connect_four_ai::generator::calculate_scores;
use std::env;
use std::error::Error;
use std::path::Path;

fn main() -> Result<(), Box<dyn Error>> {
    let mut args = env::args().skip(1);
    let input_path = args.next().ok_or("Usage: calculate_scores <input_path> <output_path>")?;
    let output_path = args.next().ok_or("missing output_path")?;

    let written = calculate_scores(Path::new(&input_path), Path::new(&output_path))?;
    println!("Scored {written} sequence(s) into {output_path}");
    Ok(())
}
