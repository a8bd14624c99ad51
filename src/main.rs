//! tokenforge - Command-line tool for building design tokens

use std::process::ExitCode;

use tokenforge::cli;

fn main() -> ExitCode {
    cli::run()
}
