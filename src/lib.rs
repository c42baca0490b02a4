//! Measures what the dynamic Protobuf path costs next to the static one.
//!
//! The static path uses types generated by `prost-build` from `proto/person.proto`. The dynamic
//! path composes the same `Person` through a message descriptor recovered at runtime from a
//! serialized `FileDescriptorSet` (see [`descriptor`]). For both paths the harness times a
//! build-then-binary-encode loop and a build-then-JSON-round-trip loop.

use std::io::Write;

use log::info;

pub mod config;
pub mod descriptor;
pub mod driver;
pub mod error;
pub mod json;
pub mod report;
pub mod sample;

pub use crate::config::Config;
pub use crate::descriptor::{load_message_descriptor, Loader};
pub use crate::error::{BuildError, Error, ErrorKind, LoadError};
pub use crate::report::{Case, Report, Timing};

/// Bindings generated from `proto/person.proto`.
pub mod example {
    include!(concat!(env!("OUT_DIR"), "/example.rs"));
}

/// The `FileDescriptorSet` for `person.proto`, as produced at build time.
pub const PERSON_DESCRIPTOR_SET: &[u8] = include_bytes!(concat!(env!("OUT_DIR"), "/person.desc"));

/// Loads the descriptor named by `config`, runs every case and writes the report to `out`.
///
/// Loading errors are returned before any case starts.
pub fn run<W>(config: &Config, out: W) -> Result<Report, Error>
where
    W: Write,
{
    let descriptor = load_message_descriptor(
        config.get_descriptor_path(),
        config.get_proto_file(),
        config.get_message_name(),
    )?;
    info!("loaded message descriptor {}", descriptor.full_name());

    let report = driver::run(config, &descriptor)?;
    report.write_to(out)?;
    Ok(report)
}

#[cfg(test)]
pub(crate) fn person_descriptor() -> prost_reflect::MessageDescriptor {
    Loader::decode(PERSON_DESCRIPTOR_SET)
        .unwrap()
        .message(config::PROTO_FILE_NAME, config::MESSAGE_NAME)
        .unwrap()
}
