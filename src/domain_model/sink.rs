use std::path::{Path, PathBuf};

/// Where a backend sends its output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SinkOptions {
    /// Directory holding `<name>.log`.
    pub directory: PathBuf,
    pub console: bool,
    pub ansi: bool,
    /// Start each `init` with an empty log file instead of appending.
    pub truncate: bool,
}

impl SinkOptions {
    pub fn in_directory(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
            ..Self::default()
        }
    }

    pub fn file_only(directory: impl Into<PathBuf>) -> Self {
        Self {
            console: false,
            ..Self::in_directory(directory)
        }
    }

    pub fn log_file(&self, name: &str) -> PathBuf {
        self.directory.join(format!("{name}.log"))
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }
}

impl Default for SinkOptions {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("."),
            console: true,
            ansi: true,
            truncate: true,
        }
    }
}
