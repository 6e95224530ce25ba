use std::process;

fn main() {
    process::exit(prisoners::cli::run_from_process_args());
}
