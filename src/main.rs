mod app;
mod cli;
mod config;
mod consts;
mod error;
mod fetch;
mod record;
mod report;
mod utils;

use clap::Parser;

use cli::Cli;
use config::Config;

fn main() {
    let cli = Cli::parse();

    let config = if cli.quiet {
        Config::load_quiet()
    } else {
        Config::load()
    };
    let cli = cli.with_config(&config);

    app::run(&cli);
}
