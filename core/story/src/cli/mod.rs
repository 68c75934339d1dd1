mod args;

pub use args::{parse_args, print_completion, print_help, Config, ParseOutcome};
