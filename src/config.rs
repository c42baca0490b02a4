use std::path::{Path, PathBuf};

/// Iterations of each benchmark case.
pub const ITERATIONS: usize = 1_000_000;

/// Serialized `FileDescriptorSet` read at startup, relative to the working directory.
pub const DESC_FILE_PATH: &str = "person.desc";

/// Embedded name of the proto file holding the message under test.
pub const PROTO_FILE_NAME: &str = "person.proto";

/// Simple name of the top-level message under test.
pub const MESSAGE_NAME: &str = "Person";

/// Settings for a benchmark run.
///
/// The defaults are the fixed harness parameters; tests and benches shrink the iteration count
/// or point at other descriptor sets.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    iterations: usize,
    descriptor_path: PathBuf,
    proto_file: String,
    message_name: String,
}

impl Config {
    /// Creates a new configuration with the harness defaults.
    pub fn new() -> Config {
        Config {
            iterations: ITERATIONS,
            descriptor_path: PathBuf::from(DESC_FILE_PATH),
            proto_file: PROTO_FILE_NAME.to_owned(),
            message_name: MESSAGE_NAME.to_owned(),
        }
    }

    /// Sets the number of iterations of every benchmark case.
    pub fn iterations(&mut self, iterations: usize) -> &mut Self {
        self.iterations = iterations;
        self
    }

    /// Sets the path of the serialized descriptor set.
    pub fn descriptor_path<P>(&mut self, path: P) -> &mut Self
    where
        P: Into<PathBuf>,
    {
        self.descriptor_path = path.into();
        self
    }

    /// Sets the embedded file name of the proto declaring the message under test.
    pub fn proto_file<S>(&mut self, name: S) -> &mut Self
    where
        S: Into<String>,
    {
        self.proto_file = name.into();
        self
    }

    /// Sets the simple name of the message under test.
    pub fn message_name<S>(&mut self, name: S) -> &mut Self
    where
        S: Into<String>,
    {
        self.message_name = name.into();
        self
    }

    pub fn get_iterations(&self) -> usize {
        self.iterations
    }

    pub fn get_descriptor_path(&self) -> &Path {
        &self.descriptor_path
    }

    pub fn get_proto_file(&self) -> &str {
        &self.proto_file
    }

    pub fn get_message_name(&self) -> &str {
        &self.message_name
    }
}

impl Default for Config {
    fn default() -> Config {
        Config::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = Config::new();
        assert_eq!(config.get_iterations(), 1_000_000);
        assert_eq!(config.get_descriptor_path(), Path::new("person.desc"));
        assert_eq!(config.get_proto_file(), "person.proto");
        assert_eq!(config.get_message_name(), "Person");
    }

    #[test]
    fn builder_chains() {
        let mut config = Config::default();
        config
            .iterations(10)
            .descriptor_path("/tmp/other.desc")
            .message_name("Other");
        assert_eq!(config.get_iterations(), 10);
        assert_eq!(config.get_descriptor_path(), Path::new("/tmp/other.desc"));
        assert_eq!(config.get_message_name(), "Other");
        assert_eq!(config.get_proto_file(), PROTO_FILE_NAME);
    }
}
