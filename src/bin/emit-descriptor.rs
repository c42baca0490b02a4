//! Writes the descriptor set embedded at build time to `person.desc` in the working directory.

use std::fs;
use std::process;

use log::info;
use protobench::config::DESC_FILE_PATH;
use protobench::PERSON_DESCRIPTOR_SET;

fn main() {
    env_logger::init();

    if let Err(error) = fs::write(DESC_FILE_PATH, PERSON_DESCRIPTOR_SET) {
        eprintln!("error: failed to write {}: {}", DESC_FILE_PATH, error);
        process::exit(1);
    }
    info!("wrote {} bytes to {}", PERSON_DESCRIPTOR_SET.len(), DESC_FILE_PATH);
}
