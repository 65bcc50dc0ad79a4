//! sg - command-line entry point for scrollgate

use std::process::ExitCode;

use scrollgate::cli;
use scrollgate::ui::output;

fn main() -> ExitCode {
    match cli::run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            output::error(format!("{:#}", e));
            ExitCode::FAILURE
        }
    }
}
