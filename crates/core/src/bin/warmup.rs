//! Offline generator pipeline, phase 4: build a secondary warm-up book from positions the
//! CLI's `--train` mode flagged as slow during self-play.
//!
//! Usage: `warmup <hard_positions_path> <output_book_path>`

use connect_four_ai::generator::warmup;
use connect_four_ai::Solver;
use std::env;
use std::error::Error;
use std::path::Path;

fn main() -> Result<(), Box<dyn Error>> {
    let mut args = env::args().skip(1);
    let hard_positions_path = args.next().ok_or("Usage: warmup <hard_positions_path> <output_book_path>")?;
    let output_path = args.next().ok_or("missing output_book_path")?;

    let mut solver = Solver::new();
    let book = warmup(Path::new(&hard_positions_path), &mut solver)?;
    book.save(Path::new(&output_path))?;
    println!("Wrote {} entries to {output_path}", book.len());
    Ok(())
}
