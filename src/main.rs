use anyhow::Result;
use clap::Parser;

use sum_rise::app;
use sum_rise::cli::Cli;

fn main() -> Result<()> {
    let cli = Cli::parse();
    app::init_logging(cli.log_file.as_deref())?;
    app::run(cli)
}
