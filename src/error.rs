//! Descriptor loading and benchmark errors.

use std::error::Error as StdError;
use std::fmt;
use std::io;
use std::path::PathBuf;

use prost::DecodeError;
use prost_reflect::{DescriptorError, SetFieldError};

/// The category of a [`LoadError`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The descriptor set file is missing or unreadable.
    IoFailure,
    /// The bytes do not decode as a `FileDescriptorSet`.
    SetMalformed,
    /// The target proto file is not part of the set.
    SchemaMissing,
    /// A declared dependency is not part of the set.
    DependencyMissing,
    /// The schema library rejected an assembled file, or the dependency graph has a cycle.
    SchemaInvalid,
    /// The requested top-level message does not exist in the resolved file.
    MessageMissing,
}

impl ErrorKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorKind::IoFailure => "IOFailure",
            ErrorKind::SetMalformed => "SetMalformed",
            ErrorKind::SchemaMissing => "SchemaMissing",
            ErrorKind::DependencyMissing => "DependencyMissing",
            ErrorKind::SchemaInvalid => "SchemaInvalid",
            ErrorKind::MessageMissing => "MessageMissing",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A failure to turn a serialized descriptor set into a message descriptor.
///
/// Every variant names the artifact at fault: the descriptor file, a proto file name, or a
/// message name.
#[derive(Debug)]
pub enum LoadError {
    Io {
        path: PathBuf,
        source: io::Error,
    },
    SetMalformed {
        path: PathBuf,
        source: DecodeError,
    },
    SchemaMissing {
        file: String,
    },
    DependencyMissing {
        file: String,
        dependency: String,
    },
    SchemaInvalid {
        file: String,
        reason: Invalid,
    },
    MessageMissing {
        file: String,
        message: String,
    },
}

/// Why a file was rejected as [`ErrorKind::SchemaInvalid`].
#[derive(Debug)]
pub enum Invalid {
    /// The file transitively depends on itself through the listed chain of file names.
    Cycle(Vec<String>),
    /// The descriptor pool refused the file.
    Rejected(DescriptorError),
}

impl LoadError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            LoadError::Io { .. } => ErrorKind::IoFailure,
            LoadError::SetMalformed { .. } => ErrorKind::SetMalformed,
            LoadError::SchemaMissing { .. } => ErrorKind::SchemaMissing,
            LoadError::DependencyMissing { .. } => ErrorKind::DependencyMissing,
            LoadError::SchemaInvalid { .. } => ErrorKind::SchemaInvalid,
            LoadError::MessageMissing { .. } => ErrorKind::MessageMissing,
        }
    }
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadError::Io { path, source } => {
                write!(f, "failed to read {}: {}", path.display(), source)
            }
            LoadError::SetMalformed { path, source } => write!(
                f,
                "{} is not a valid FileDescriptorSet: {}",
                path.display(),
                source
            ),
            LoadError::SchemaMissing { file } => {
                write!(f, "proto file not found in descriptor set: {}", file)
            }
            LoadError::DependencyMissing { file, dependency } => write!(
                f,
                "dependency not found in descriptor set: {} (imported by {})",
                dependency, file
            ),
            LoadError::SchemaInvalid {
                file,
                reason: Invalid::Cycle(chain),
            } => write!(
                f,
                "dependency cycle at {}: {}",
                file,
                chain.join(" -> ")
            ),
            LoadError::SchemaInvalid {
                file,
                reason: Invalid::Rejected(error),
            } => write!(f, "invalid schema in {}: {}", file, error),
            LoadError::MessageMissing { file, message } => {
                write!(f, "message type {} not found in {}", message, file)
            }
        }
    }
}

impl StdError for LoadError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            LoadError::Io { source, .. } => Some(source),
            LoadError::SetMalformed { source, .. } => Some(source),
            LoadError::SchemaInvalid {
                reason: Invalid::Rejected(error),
                ..
            } => Some(error),
            _ => None,
        }
    }
}

/// Any failure of a benchmark run.
#[derive(Debug)]
pub enum Error {
    /// The descriptor could not be loaded.
    Load(LoadError),
    /// A dynamic message could not be assembled against the loaded descriptor.
    Build(BuildError),
    /// The schema-aware JSON codec failed.
    Json(serde_json::Error),
    /// The report could not be written.
    Io(io::Error),
}

/// A mismatch between the loaded descriptor and the shape the dynamic builder expects.
#[derive(Debug)]
pub enum BuildError {
    FieldMissing { message: String, field: String },
    NestedTypeMissing { message: String, nested: String },
    NotAnEnum { field: String },
    EnumValueMissing { field: String, value: String },
    NotRepeated { field: String },
    InvalidValue(SetFieldError),
}

impl fmt::Display for BuildError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BuildError::FieldMissing { message, field } => {
                write!(f, "message {} has no field named {}", message, field)
            }
            BuildError::NestedTypeMissing { message, nested } => {
                write!(f, "message {} has no nested type named {}", message, nested)
            }
            BuildError::NotAnEnum { field } => write!(f, "field {} is not an enum", field),
            BuildError::EnumValueMissing { field, value } => {
                write!(f, "enum of field {} has no value named {}", field, value)
            }
            BuildError::NotRepeated { field } => write!(f, "field {} is not repeated", field),
            BuildError::InvalidValue(error) => error.fmt(f),
        }
    }
}

impl StdError for BuildError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            BuildError::InvalidValue(error) => Some(error),
            _ => None,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Load(error) => write!(f, "{}: {}", error.kind(), error),
            Error::Build(error) => write!(f, "failed to build dynamic message: {}", error),
            Error::Json(error) => write!(f, "JSON round-trip failed: {}", error),
            Error::Io(error) => write!(f, "failed to write report: {}", error),
        }
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            Error::Load(error) => Some(error),
            Error::Build(error) => Some(error),
            Error::Json(error) => Some(error),
            Error::Io(error) => Some(error),
        }
    }
}

impl From<LoadError> for Error {
    fn from(error: LoadError) -> Error {
        Error::Load(error)
    }
}

impl From<BuildError> for Error {
    fn from(error: BuildError) -> Error {
        Error::Build(error)
    }
}

impl From<SetFieldError> for BuildError {
    fn from(error: SetFieldError) -> BuildError {
        BuildError::InvalidValue(error)
    }
}

impl From<serde_json::Error> for Error {
    fn from(error: serde_json::Error) -> Error {
        Error::Json(error)
    }
}

impl From<io::Error> for Error {
    fn from(error: io::Error) -> Error {
        Error::Io(error)
    }
}
