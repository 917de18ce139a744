//! The argument surface for the `connect-four-ai` binary, split into a library target so its
//! parsing rules (in particular, that exactly one mode flag must be given) can be exercised
//! directly in integration tests without spawning the binary.

use clap::{ArgGroup, Parser};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "connect-four-ai",
    version,
    about = "A perfect-play Connect Four engine: search, interactive play, self-play training, and an HTTP move endpoint."
)]
#[command(group(
    ArgGroup::new("mode")
        .required(true)
        .args(["find", "cfind", "play", "botgame", "train", "test", "web"])
))]
pub struct Cli {
    /// Reads one move sequence per line from stdin and prints its score and best move.
    #[arg(short = 'f', long)]
    pub find: bool,

    /// Like `--find`, but each line's moves are played on top of the previous line's position
    /// rather than starting over from an empty board each time.
    #[arg(short = 'c', long)]
    pub cfind: bool,

    /// Plays an interactive game against the engine over the terminal.
    #[arg(short = 'p', long)]
    pub play: bool,

    /// Watches the engine play both sides of a game (or several, see `--games`) against itself.
    #[arg(short = 'b', long)]
    pub botgame: bool,

    /// Repeatedly self-plays games, logging the move sequence leading to any position whose
    /// search takes longer than `--threshold` seconds to `--output`, for later use with the
    /// warm-up book builder.
    #[arg(long, visible_alias = "tr")]
    pub train: bool,

    /// Runs every "<sequence> <score>" line of the given file through the solver and reports
    /// how many match.
    #[arg(short = 't', long, value_name = "FILE")]
    pub test: Option<PathBuf>,

    /// Serves the JSON move endpoint over HTTP until killed.
    #[arg(short = 'w', long)]
    pub web: bool,

    /// Binary opening book to load before searching, in any mode.
    #[arg(long, value_name = "FILE")]
    pub book: Option<PathBuf>,

    /// Binary warm-up book to layer on top of `--book` (or load standalone), taking precedence
    /// on key collision.
    #[arg(long, value_name = "FILE")]
    pub warmup: Option<PathBuf>,

    /// Port `--web` binds to. Falls back to the `PORT` environment variable, then 8112.
    #[arg(long)]
    pub port: Option<u16>,

    /// Number of games to self-play in `--botgame`/`--train` mode.
    #[arg(long, default_value_t = 1)]
    pub games: usize,

    /// Search-time threshold, in seconds, above which `--train` logs a position as slow.
    #[arg(long, default_value_t = 2.0)]
    pub threshold: f64,

    /// File `--train` appends slow positions' move sequences to.
    #[arg(long, default_value = "hard_positions.txt", value_name = "FILE")]
    pub output: PathBuf,
}
