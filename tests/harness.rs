mod common;

use std::process::Command;

use prost_types::FileDescriptorSet;

use protobench::{Case, Config, Error, ErrorKind};

use common::{file, person_set, write_set};

#[test]
fn happy_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_set(dir.path(), &person_set());

    let mut config = Config::new();
    config.iterations(10).descriptor_path(path);

    let mut out = Vec::new();
    let report = protobench::run(&config, &mut out).unwrap();
    assert_eq!(report.iterations(), 10);
    assert_eq!(report.timings().len(), Case::ALL.len());

    let out = String::from_utf8(out).unwrap();
    let lines: Vec<&str> = out.lines().collect();
    assert_eq!(lines.len(), 5);
    assert_eq!(
        lines[0],
        "Running 10 iterations of each type of Protobuf operation"
    );

    let labels = [
        "Normal Protobuf serialization",
        "Dynamic Protobuf serialization",
        "Normal Protobuf deserialization",
        "Dynamic Protobuf deserialization",
    ];
    for (line, label) in lines[1..].iter().zip(labels) {
        let millis = line
            .strip_prefix(label)
            .and_then(|rest| rest.strip_prefix(" time: "))
            .and_then(|rest| rest.strip_suffix(" ms"))
            .unwrap_or_else(|| panic!("malformed line: {:?}", line));
        millis.parse::<u64>().unwrap();
    }
}

#[test]
fn load_errors_happen_before_any_output() {
    let dir = tempfile::tempdir().unwrap();
    let set = FileDescriptorSet {
        file: vec![file("other.proto", &[], vec![])],
    };
    let path = write_set(dir.path(), &set);

    let mut config = Config::new();
    config.descriptor_path(path);

    let mut out = Vec::new();
    match protobench::run(&config, &mut out) {
        Err(Error::Load(error)) => assert_eq!(error.kind(), ErrorKind::SchemaMissing),
        other => panic!("unexpected result: {:?}", other),
    }
    assert!(out.is_empty());
}

/// Runs the harness binary in `dir` and returns its exit status and standard error.
fn run_binary(dir: &std::path::Path) -> (std::process::ExitStatus, String) {
    let output = Command::new(env!("CARGO_BIN_EXE_protobench"))
        .current_dir(dir)
        .env_remove("RUST_LOG")
        .output()
        .unwrap();
    assert!(output.stdout.is_empty());
    (output.status, String::from_utf8(output.stderr).unwrap())
}

#[test]
fn binary_reports_missing_target() {
    let dir = tempfile::tempdir().unwrap();
    let set = FileDescriptorSet {
        file: vec![file("other.proto", &[], vec![])],
    };
    write_set(dir.path(), &set);

    let (status, stderr) = run_binary(dir.path());
    assert!(!status.success());
    assert_eq!(stderr.lines().count(), 1);
    assert!(stderr.contains("SchemaMissing"), "stderr: {}", stderr);
    assert!(stderr.contains("person.proto"), "stderr: {}", stderr);
}

#[test]
fn binary_reports_broken_dependency() {
    let dir = tempfile::tempdir().unwrap();
    let mut set = person_set();
    set.file[0].dependency.push("common.proto".to_owned());
    write_set(dir.path(), &set);

    let (status, stderr) = run_binary(dir.path());
    assert!(!status.success());
    assert!(stderr.contains("DependencyMissing"), "stderr: {}", stderr);
    assert!(stderr.contains("common.proto"), "stderr: {}", stderr);
}

#[test]
fn binary_reports_missing_descriptor_file() {
    let dir = tempfile::tempdir().unwrap();

    let (status, stderr) = run_binary(dir.path());
    assert!(!status.success());
    assert!(stderr.contains("IOFailure"), "stderr: {}", stderr);
    assert!(stderr.contains("person.desc"), "stderr: {}", stderr);
}

// Runs the default million iterations of every case, which takes minutes in a debug build.
// Run with `cargo test --release -- --ignored`.
#[test]
#[ignore]
fn binary_full_run_succeeds() {
    let dir = tempfile::tempdir().unwrap();
    write_set(dir.path(), &person_set());

    let output = Command::new(env!("CARGO_BIN_EXE_protobench"))
        .current_dir(dir.path())
        .env_remove("RUST_LOG")
        .output()
        .unwrap();
    assert!(output.status.success());
    assert!(output.stderr.is_empty());

    let stdout = String::from_utf8(output.stdout).unwrap();
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines.len(), 5);
    assert_eq!(
        lines[0],
        "Running 1000000 iterations of each type of Protobuf operation"
    );
    for (line, case) in lines[1..].iter().zip(Case::ALL) {
        assert!(line.starts_with(case.label()), "line: {}", line);
        assert!(line.ends_with(" ms"), "line: {}", line);
    }
}
