//! Where `include` gets its text from.
//!
//! The interpreter never touches the filesystem itself. A harness that wants
//! includes to work hands it a [`SourceLoader`]; the default refuses every
//! request, which keeps in-memory runs hermetic.

use std::collections::BTreeMap;
use std::io;

/// Resolve an include path to the text of that source.
pub trait SourceLoader {
    fn load(&self, path: &str) -> io::Result<String>;
}

/// Refuses every include.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoIncludes;

impl SourceLoader for NoIncludes {
    fn load(&self, path: &str) -> io::Result<String> {
        Err(io::Error::new(
            io::ErrorKind::PermissionDenied,
            format!("includes are disabled (requested {path})"),
        ))
    }
}

/// Reads includes from the local filesystem, relative to the working
/// directory.
#[derive(Debug, Default, Clone, Copy)]
pub struct FsLoader;

impl SourceLoader for FsLoader {
    fn load(&self, path: &str) -> io::Result<String> {
        std::fs::read_to_string(path)
    }
}

/// A fixed set of named in-memory sources.
#[derive(Debug, Default, Clone)]
pub struct MemoryLoader {
    files: BTreeMap<String, String>,
}

impl MemoryLoader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, path: impl Into<String>, text: impl Into<String>) -> Self {
        self.files.insert(path.into(), text.into());
        self
    }
}

impl SourceLoader for MemoryLoader {
    fn load(&self, path: &str) -> io::Result<String> {
        self.files
            .get(path)
            .cloned()
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "No such file or directory"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_loader_finds_registered_files() {
        let loader = MemoryLoader::new().with("a.aspic", "box;\n");
        assert_eq!(loader.load("a.aspic").unwrap(), "box;\n");
        assert_eq!(loader.load("b.aspic").unwrap_err().kind(), io::ErrorKind::NotFound);
    }

    #[test]
    fn no_includes_refuses() {
        assert!(NoIncludes.load("anything").is_err());
    }
}
