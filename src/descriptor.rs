//! Reconstructs a linked schema graph from a serialized `FileDescriptorSet`.
//!
//! The set is a flat, unordered bag of `FileDescriptorProto`s which refer to each other by their
//! embedded file names. [`Loader`] indexes the bag by name and resolves a requested file
//! depth-first: every dependency is added to the descriptor pool before the file importing it,
//! so a file is only ever assembled against dependencies that are already resolved.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use log::{debug, trace, warn};
use prost::{DecodeError, Message};
use prost_reflect::{DescriptorPool, FileDescriptor, MessageDescriptor};
use prost_types::{FileDescriptorProto, FileDescriptorSet};

use crate::error::{Invalid, LoadError};

/// Reads the descriptor set at `path` and returns the top-level message `message` declared in
/// the file whose embedded name is `file`.
pub fn load_message_descriptor<P>(
    path: P,
    file: &str,
    message: &str,
) -> Result<MessageDescriptor, LoadError>
where
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let bytes = fs::read(path).map_err(|source| LoadError::Io {
        path: path.to_owned(),
        source,
    })?;
    debug!("read {} bytes from {}", bytes.len(), path.display());

    let mut loader = Loader::decode(&bytes).map_err(|source| LoadError::SetMalformed {
        path: path.to_owned(),
        source,
    })?;
    loader.message(file, message)
}

/// Resolves files of a single descriptor set.
///
/// Resolved files are memoized by name for the lifetime of the loader, so a file shared by
/// several importers (a diamond) is built once.
#[derive(Debug)]
pub struct Loader {
    index: HashMap<String, FileDescriptorProto>,
    pool: DescriptorPool,
    /// Files whose dependencies are currently being resolved, outermost first.
    in_progress: Vec<String>,
}

impl Loader {
    /// Indexes every file of `set` by its embedded name.
    pub fn new(set: FileDescriptorSet) -> Loader {
        let mut index = HashMap::with_capacity(set.file.len());
        for file in set.file {
            let name = file.name().to_owned();
            if index.insert(name.clone(), file).is_some() {
                warn!("descriptor set contains {} more than once; using the last entry", name);
            }
        }
        Loader {
            index,
            pool: DescriptorPool::new(),
            in_progress: Vec::new(),
        }
    }

    /// Decodes an encoded `FileDescriptorSet`.
    pub fn decode(bytes: &[u8]) -> Result<Loader, DecodeError> {
        FileDescriptorSet::decode(bytes).map(Loader::new)
    }

    /// Returns `true` if the set holds a file with the given embedded name.
    pub fn contains(&self, file: &str) -> bool {
        self.index.contains_key(file)
    }

    /// The pool of files resolved so far.
    pub fn pool(&self) -> &DescriptorPool {
        &self.pool
    }

    /// Resolves `file` and, transitively, everything it imports.
    pub fn resolve_file(&mut self, file: &str) -> Result<FileDescriptor, LoadError> {
        if !self.contains(file) {
            return Err(LoadError::SchemaMissing {
                file: file.to_owned(),
            });
        }
        self.resolve(file)
    }

    /// Resolves `file` and selects its top-level message named `message`.
    pub fn message(&mut self, file: &str, message: &str) -> Result<MessageDescriptor, LoadError> {
        let resolved = self.resolve_file(file)?;
        let descriptor = resolved.messages().find(|m| m.name() == message);
        descriptor.ok_or_else(|| LoadError::MessageMissing {
            file: file.to_owned(),
            message: message.to_owned(),
        })
    }

    fn resolve(&mut self, name: &str) -> Result<FileDescriptor, LoadError> {
        if let Some(resolved) = self.pool.get_file_by_name(name) {
            trace!("already resolved: {}", name);
            return Ok(resolved);
        }

        if let Some(start) = self.in_progress.iter().position(|file| file == name) {
            let mut chain = self.in_progress[start..].to_vec();
            chain.push(name.to_owned());
            return Err(LoadError::SchemaInvalid {
                file: name.to_owned(),
                reason: Invalid::Cycle(chain),
            });
        }

        let proto = match self.index.get(name) {
            Some(proto) => proto.clone(),
            None => {
                return Err(LoadError::SchemaMissing {
                    file: name.to_owned(),
                })
            }
        };

        self.in_progress.push(name.to_owned());
        let dependencies = self.resolve_dependencies(name, &proto.dependency);
        self.in_progress.pop();
        let dependencies = dependencies?;

        debug!(
            "file: {:?}, dependencies: {:?}",
            name,
            dependencies.iter().map(FileDescriptor::name).collect::<Vec<_>>()
        );

        self.pool
            .add_file_descriptor_proto(proto)
            .map_err(|error| LoadError::SchemaInvalid {
                file: name.to_owned(),
                reason: Invalid::Rejected(error),
            })?;

        self.pool
            .get_file_by_name(name)
            .ok_or_else(|| LoadError::SchemaMissing {
                file: name.to_owned(),
            })
    }

    /// Resolves the dependencies of `name`, in declaration order.
    fn resolve_dependencies(
        &mut self,
        name: &str,
        dependencies: &[String],
    ) -> Result<Vec<FileDescriptor>, LoadError> {
        let mut resolved = Vec::with_capacity(dependencies.len());
        for dependency in dependencies {
            if !self.contains(dependency) {
                return Err(LoadError::DependencyMissing {
                    file: name.to_owned(),
                    dependency: dependency.clone(),
                });
            }
            trace!("  {} imports {}", name, dependency);
            resolved.push(self.resolve(dependency)?);
        }
        Ok(resolved)
    }
}
