//! Main entry point for the codol-rs CLI

mod cli;
mod commands;
mod utils;

use clap::Parser;

use crate::cli::Cli;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    if cli.verbose > 0 {
        log::set_max_level(match cli.verbose {
            1 => log::LevelFilter::Info,
            2 => log::LevelFilter::Debug,
            _ => log::LevelFilter::Trace,
        });
    } else if cli.quiet {
        log::set_max_level(log::LevelFilter::Error);
    }

    let result = match &cli.archive {
        Some(path) => commands::extract::run(path, cli.format),
        None => commands::shell::run(),
    };

    if let Err(err) = result {
        log::error!("{err:#}");
        std::process::exit(-1);
    }
}
