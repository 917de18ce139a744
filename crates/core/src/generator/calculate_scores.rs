//! Resumable, rayon-parallel batch scoring of explored move sequences.

use super::GeneratorError;
use crate::{Position, Solver};
use indicatif::{ParallelProgressIterator, ProgressBar, ProgressStyle};
use rayon::prelude::*;
use std::cell::RefCell;
use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::Path;
use std::sync::Mutex;
use std::time::{Duration, Instant};
use tracing::{debug, info};

// Each rayon worker thread gets its own solver (and so its own transposition table), since
// positions are scored independently of one another; this is batch throughput parallelism
// over disjoint search trees, not parallelism inside a single search.
thread_local! {
    static THREAD_SOLVER: RefCell<Solver> = RefCell::new(Solver::new());
}

const FLUSH_INTERVAL: Duration = Duration::from_secs(5);

/// Reads explored move sequences from `input`, solves each one, and appends
/// `"<sequence> <score>"` lines to `output`.
///
/// Resumable: on start, counts the lines already present in `output` and skips that many
/// lines of `input`, so a killed run only loses whatever hadn't been flushed yet. The writer
/// is flushed on a periodic wall-clock schedule rather than after every line.
pub fn calculate_scores(input: &Path, output: &Path) -> Result<usize, GeneratorError> {
    let already_done = if output.exists() {
        BufReader::new(File::open(output)?).lines().count()
    } else {
        0
    };

    let sequences: Vec<String> = BufReader::new(File::open(input)?)
        .lines()
        .collect::<std::io::Result<_>>()?;

    let remaining = &sequences[already_done.min(sequences.len())..];
    info!(
        total = sequences.len(),
        already_done,
        remaining = remaining.len(),
        "resuming score calculation"
    );

    let writer = Mutex::new(OpenOptions::new().create(true).append(true).open(output)?);
    let last_flush = Mutex::new(Instant::now());
    let progress_style = ProgressStyle::with_template(
        "{spinner:.green} [{elapsed_precise}] [{wide_bar:.cyan/blue}] {human_pos}/{human_len} ({eta})",
    )
    .unwrap()
    .progress_chars("#>-");
    let progress_bar = ProgressBar::new(remaining.len() as u64).with_style(progress_style);

    remaining.par_iter().progress_with(progress_bar).try_for_each(|sequence| -> Result<(), GeneratorError> {
        let position = Position::from_moves(sequence)?;
        let score = THREAD_SOLVER.with(|solver| solver.borrow_mut().solve(&position));
        debug!(sequence, score, "solved position");

        let mut guard = writer.lock().unwrap();
        writeln!(guard, "{sequence} {score}")?;

        let mut last = last_flush.lock().unwrap();
        if last.elapsed() > FLUSH_INTERVAL {
            guard.flush()?;
            *last = Instant::now();
        }

        Ok(())
    })?;

    writer.lock().unwrap().flush()?;
    Ok(remaining.len())
}
