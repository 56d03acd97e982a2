//! In-memory resource provider for testing and embedding.

use std::collections::HashMap;
use std::io::{Cursor, Read};

use encoding_rs::{Encoding, WINDOWS_1252};

use crate::error::{CodesError, Result};
use crate::resource::ResourceProvider;

/// Serves resources from in-memory bytes.
///
/// Useful for tests and for applications that bundle their reference
/// tables instead of reading a configuration directory.
#[derive(Debug, Clone)]
pub struct MemoryProvider {
    resources: HashMap<String, Vec<u8>>,
    encoding: &'static Encoding,
}

impl MemoryProvider {
    /// Create an empty provider.
    pub fn new() -> Self {
        MemoryProvider {
            resources: HashMap::new(),
            encoding: WINDOWS_1252,
        }
    }

    /// Set the encoding resources are decoded with.
    pub fn with_encoding(mut self, encoding: &'static Encoding) -> Self {
        self.encoding = encoding;
        self
    }

    /// Register a named resource, replacing any previous bytes.
    pub fn insert<S, B>(&mut self, name: S, bytes: B)
    where
        S: Into<String>,
        B: Into<Vec<u8>>,
    {
        self.resources.insert(name.into(), bytes.into());
    }

    /// Number of registered resources.
    pub fn len(&self) -> usize {
        self.resources.len()
    }

    /// Whether no resources are registered.
    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }
}

impl Default for MemoryProvider {
    fn default() -> Self {
        MemoryProvider::new()
    }
}

impl ResourceProvider for MemoryProvider {
    fn open(&self, name: &str) -> Result<Box<dyn Read>> {
        let bytes = self
            .resources
            .get(name)
            .ok_or_else(|| CodesError::resource(format!("no resource named '{name}'")))?;
        Ok(Box::new(Cursor::new(bytes.clone())))
    }

    fn encoding(&self) -> &'static Encoding {
        self.encoding
    }
}
