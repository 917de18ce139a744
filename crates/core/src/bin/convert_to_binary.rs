//! Offline generator pipeline, phase 3: convert a text score book into the binary `.book`
//! format the solver loads at startup.
//!
//! Usage: `convert_to_binary <input_path> <output_path>`

use connect_four_ai::generator::convert_to_binary;
use std::env;
use std::error::Error;
use std::path::Path;

fn main() -> Result<(), Box<dyn Error>> {
    let mut args = env::args().skip(1);
    let input_path = args.next().ok_or("Usage: convert_to_binary <input_path> <output_path>")?;
    let output_path = args.next().ok_or("missing output_path")?;

    let entries = convert_to_binary(Path::new(&input_path), Path::new(&output_path))?;
    println!("Wrote {entries} entries to {output_path}");
    Ok(())
}
