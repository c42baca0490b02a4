use std::env;
use std::fs;
use std::path::PathBuf;

use anyhow::Context;
use prost::Message;

/// Reads `null` as the field's default value.
const NULLABLE: &str = r#"#[serde(deserialize_with = "crate::json::null_as_default")]"#;

/// Fields which get canonical proto3 JSON attributes, as `(path, attributes)`.
///
/// Every field skips its default value on output and reads `null` as that default. Enum and
/// integer fields are routed through the helpers in `src/json.rs`, which also accept quoted
/// numbers.
static JSON_FIELDS: &[(&str, &str)] = &[
    (".example.Person.name", NULLABLE),
    (
        ".example.Person.id",
        r#"#[serde(with = "crate::json::int32")]"#,
    ),
    (".example.Person.email", NULLABLE),
    (".example.Person.phones", NULLABLE),
    (".example.Person.address", NULLABLE),
    (
        ".example.Person.last_updated",
        r#"#[serde(alias = "last_updated", with = "crate::json::int64")]"#,
    ),
    (".example.Person.PhoneNumber.number", NULLABLE),
    (
        ".example.Person.PhoneNumber.type",
        r#"#[serde(with = "crate::json::phone_type")]"#,
    ),
    (".example.Person.Address.street", NULLABLE),
    (".example.Person.Address.city", NULLABLE),
    (".example.Person.Address.country", NULLABLE),
    (
        ".example.Person.Address.postal_code",
        r#"#[serde(alias = "postal_code", deserialize_with = "crate::json::null_as_default")]"#,
    ),
];

fn main() -> anyhow::Result<()> {
    println!("cargo:rerun-if-changed=proto/person.proto");

    let out_dir = PathBuf::from(env::var("OUT_DIR").context("OUT_DIR is not set")?);

    // protox is a pure Rust protobuf compiler, so no `protoc` is needed on the build host.
    let fds = protox::compile(["proto/person.proto"], ["proto"]).context("compiling person.proto")?;

    // The same set is both the runtime input of the dynamic path and the input of the code
    // generator, which keeps the two schema artifacts in lock-step.
    let desc_path = out_dir.join("person.desc");
    fs::write(&desc_path, fds.encode_to_vec())
        .with_context(|| format!("writing {}", desc_path.display()))?;

    let mut config = prost_build::Config::new();
    config.message_attribute(
        ".example.Person",
        "#[derive(serde::Serialize, serde::Deserialize)]\n\
         #[serde(rename_all = \"camelCase\", default, deny_unknown_fields)]",
    );
    for (path, attributes) in JSON_FIELDS {
        config.field_attribute(
            path,
            format!(
                "#[serde(skip_serializing_if = \"crate::json::is_default\")]{}",
                attributes
            ),
        );
    }
    config
        .compile_fds(fds)
        .context("generating Rust bindings for person.proto")?;

    Ok(())
}
