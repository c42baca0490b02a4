use std::io;
use std::process;

use protobench::Config;

/// Runs every case with the default settings; the binary takes no arguments.
///
/// `RUST_LOG` is the only environment variable read, and only to filter diagnostics on
/// standard error. It never changes what is measured or printed on standard output.
fn main() {
    env_logger::init();

    let config = Config::new();
    if let Err(error) = protobench::run(&config, io::stdout().lock()) {
        eprintln!("error: {}", error);
        process::exit(1);
    }
}
