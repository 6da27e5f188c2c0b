mod app;
mod chart;
mod cli;
mod config;
mod consts;
mod error;
mod message;
mod notifier;
mod slack;
mod state;
mod utils;

use chrono::Utc;
use clap::Parser;

use app::RunSettings;
use cli::Cli;
use config::Config;
use utils::set_debug;

fn main() {
    let cli = Cli::parse();
    let config = if cli.quiet {
        Config::load_quiet()
    } else {
        Config::load()
    };
    let cli = cli.with_config(&config);
    set_debug(cli.debug);

    let result = RunSettings::resolve(cli, Utc::now()).and_then(|settings| app::run(&settings));
    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
