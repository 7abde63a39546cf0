//! GBFR Data Converter
//!
//! Interactive entry point: loads settings, checks the external tools,
//! asks for a directory and converts every `.msg` and `.bxm` file in it.

use std::process::ExitCode;

use clap::Parser;

mod cli;
mod logging;
mod output;
mod prompt;

use cli::Args;

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();

    let code = match cli::run(&args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            cli::report_error(&e, &args);
            ExitCode::FAILURE
        }
    };

    if !args.no_pause {
        prompt::wait_for_keypress();
    }

    code
}
