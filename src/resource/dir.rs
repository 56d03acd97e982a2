//! Directory-backed resource provider with configuration discovery.

use std::env;
use std::fs::{self, File};
use std::io::Read;
use std::path::{Path, PathBuf};

use encoding_rs::{Encoding, WINDOWS_1252};

use crate::error::{CodesError, Result};
use crate::resource::{ResourceProvider, TRANSLATE_CODES};

/// Environment variable naming the configuration directory.
pub const CONFIG_ENV: &str = "NODC_CONFIG";

/// Pointer file in the working directory naming the configuration directory.
pub const POINTER_FILE: &str = "config_directory.txt";

/// Directory names probed under the user's home directory, in order.
const HOME_DIR_NAMES: [&str; 4] = [
    "NODC_CONFIG",
    ".NODC_CONFIG",
    "nodc_config",
    ".nodc_config",
];

/// Resources known to be distributed in the configuration directory.
const RESOURCE_NAMES: [&str; 1] = [TRANSLATE_CODES];

/// Serves resources from a configuration directory on disk.
#[derive(Debug, Clone)]
pub struct DirProvider {
    dir: PathBuf,
    encoding: &'static Encoding,
}

impl DirProvider {
    /// Create a provider for an explicit configuration directory.
    pub fn new<P: Into<PathBuf>>(dir: P) -> Self {
        DirProvider {
            dir: dir.into(),
            encoding: WINDOWS_1252,
        }
    }

    /// Set the encoding resources are decoded with.
    pub fn with_encoding(mut self, encoding: &'static Encoding) -> Self {
        self.encoding = encoding;
        self
    }

    /// Create a provider by discovering the configuration directory.
    ///
    /// Probes, in order: a [`POINTER_FILE`] in the working directory naming
    /// the directory, the [`CONFIG_ENV`] environment variable, and the
    /// well-known directory names under the user's home directory.
    pub fn discover() -> Result<Self> {
        let dir = discover_config_dir().ok_or_else(|| {
            CodesError::resource(format!(
                "config directory not found: {CONFIG_ENV} is not set and no \
                 config directory exists under the home directory"
            ))
        })?;
        Ok(DirProvider::new(dir))
    }

    /// The configuration directory this provider reads from.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Full path of a known resource, verified to exist.
    fn resource_path(&self, name: &str) -> Result<PathBuf> {
        if !RESOURCE_NAMES.contains(&name) {
            return Err(CodesError::resource(format!(
                "no config file with name '{name}' exists"
            )));
        }
        let path = self.dir.join(name);
        if !path.is_file() {
            return Err(CodesError::resource(format!(
                "could not find config file {}",
                path.display()
            )));
        }
        Ok(path)
    }
}

impl ResourceProvider for DirProvider {
    fn open(&self, name: &str) -> Result<Box<dyn Read>> {
        let path = self.resource_path(name)?;
        Ok(Box::new(File::open(path)?))
    }

    fn encoding(&self) -> &'static Encoding {
        self.encoding
    }
}

/// Locate the configuration directory, trying each source in order.
pub fn discover_config_dir() -> Option<PathBuf> {
    if let Ok(contents) = fs::read_to_string(POINTER_FILE) {
        if let Some(dir) = pointer_target(&contents) {
            if dir.is_dir() {
                tracing::debug!("config directory from {}: {}", POINTER_FILE, dir.display());
                return Some(dir);
            }
        }
    }

    if let Some(dir) = env::var_os(CONFIG_ENV).map(PathBuf::from) {
        if dir.is_dir() {
            tracing::debug!("config directory from ${}: {}", CONFIG_ENV, dir.display());
            return Some(dir);
        }
    }

    if let Some(home) = env::home_dir() {
        if let Some(dir) = home_candidate(&home) {
            tracing::debug!("config directory under home: {}", dir.display());
            return Some(dir);
        }
    }

    None
}

/// The directory named by pointer-file contents, if any.
///
/// Only the first line counts; a blank line means no directory.
fn pointer_target(contents: &str) -> Option<PathBuf> {
    let line = contents.lines().next()?.trim();
    if line.is_empty() {
        None
    } else {
        Some(PathBuf::from(line))
    }
}

/// First well-known configuration directory that exists under `home`.
fn home_candidate(home: &Path) -> Option<PathBuf> {
    HOME_DIR_NAMES
        .iter()
        .map(|name| home.join(name))
        .find(|dir| dir.is_dir())
}
