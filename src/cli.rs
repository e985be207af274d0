use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::game::Mode;

#[derive(Parser, Debug)]
#[command(name = "sum-rise", about = "Pick numbered blocks that add up to the target before the stack reaches the top")]
pub struct Cli {
    /// Skip the menu and start a round in this mode
    #[arg(long, value_enum)]
    pub mode: Option<ModeArg>,

    /// Seed for block values and targets (random when omitted)
    #[arg(long)]
    pub seed: Option<u64>,

    /// Where the best score is kept (defaults to $SUM_RISE_BEST_FILE or ~/.sum-rise-best.json)
    #[arg(long)]
    pub best_file: Option<PathBuf>,

    /// Write tracing output to this file; filtered by RUST_LOG
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ModeArg {
    Classic,
    Timed,
}

impl From<ModeArg> for Mode {
    fn from(value: ModeArg) -> Self {
        match value {
            ModeArg::Classic => Mode::Classic,
            ModeArg::Timed => Mode::Timed,
        }
    }
}
