use std::process::ExitCode;

use clap::Parser;

use crate::cli::App;

mod cli;
mod logging;
mod ui;

fn main() -> ExitCode {
    let app = App::parse();

    if let Err(e) = logging::init_logging(app.global.log_level()) {
        eprintln!("{e:#}");
        return ExitCode::FAILURE;
    }

    match app.run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{e:#}");
            ExitCode::FAILURE
        }
    }
}
