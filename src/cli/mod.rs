mod handlers;
pub mod parse;

use clap::Parser;
use env_logger::Env;
use log::LevelFilter;
pub use parse::Cli;

use crate::core::error::DatabarError;

pub fn run() -> Result<(), DatabarError> {
    let cli = parse::Cli::parse();

    let mut logger = env_logger::Builder::from_env(Env::default().default_filter_or("warn"));
    if cli.debug {
        logger.filter_level(LevelFilter::Debug);
    }
    let _ = logger.try_init();

    match cli.cmd {
        parse::Command::Html(a) => handlers::html(&a),
        parse::Command::Show(a) => handlers::show(&a),
        parse::Command::Colors => {
            handlers::colors();
            Ok(())
        }
        parse::Command::Examples => {
            handlers::examples();
            Ok(())
        }
    }
}
