use std::process;

use clap::Parser;

use floraparse::cli::Args;

fn main() {
    let args = Args::parse();
    match floraparse::run(args) {
        Ok(code) => process::exit(code),
        Err(e) => {
            eprintln!("error: {e:#}");
            process::exit(3);
        }
    }
}
