mod app;
mod cli;
mod presenter;

use common::error::Error;
use std::process;

fn main() {
    let exit_code = match run() {
        Ok(code) => code,
        Err(e) => {
            if e.is_usage() {
                print_usage();
            }
            eprintln!("story: {}", e);
            e.exit_code()
        }
    };
    process::exit(exit_code);
}

pub fn run() -> Result<i32, Error> {
    let outcome = cli::parse_args()?;
    let config = match outcome {
        cli::ParseOutcome::Config(c) => c,
        cli::ParseOutcome::GenerateCompletion(shell) => {
            cli::print_completion(shell);
            return Ok(0);
        }
    };
    if config.help {
        cli::print_help();
        return Ok(0);
    }
    app::run(config)
}

fn print_usage() {
    eprintln!("Usage: story [options] <theme...>");
}
