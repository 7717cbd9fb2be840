mod cli;

use crate::cli::Cli;

fn main() {
    // Parse CLI, initialize logging, dispatch.
    if let Err(err) = Cli::run_from_args() {
        eprintln!("fsup error: {:#}", err);
        std::process::exit(1);
    }
}
