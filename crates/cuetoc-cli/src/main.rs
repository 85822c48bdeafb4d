use crate::breakpoints::print_breakpoints;
use crate::commands::{Cli, Commands};
use crate::convert::convert_files;
use crate::cueprint::print_info;
use anyhow::Result;
use clap::Parser;
use indicatif::MultiProgress;
use indicatif_log_bridge::LogWrapper;

mod breakpoints;
mod commands;
mod convert;
mod cueprint;
mod input;

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();
    let logger = env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .build();

    let level = logger.filter();
    let pb = MultiProgress::new();

    LogWrapper::new(pb.clone(), logger).try_init()?;
    log::set_max_level(level);

    let cli = Cli::parse();

    match cli.command {
        Commands::Convert(cmd) => convert_files(pb.clone(), cmd).await?,
        Commands::Breakpoints(cmd) => print_breakpoints(cmd).await?,
        Commands::Print(cmd) => print_info(cmd).await?,
    }

    Ok(())
}
