//! Resource access layer for reference tables.
//!
//! The reference data ships as plain text files. This module exposes a
//! pluggable provider facade so the table loader never cares where the
//! bytes come from: a configuration directory on disk for deployments, or
//! in-memory bytes for tests and embedding.
//!
//! # Providers
//!
//! ## DirProvider
//! - Reads resources from a configuration directory
//! - Can discover the directory from a pointer file, an environment
//!   variable, or well-known home-directory locations
//!
//! ## MemoryProvider
//! - Serves resources from in-memory bytes
//! - Fast and hermetic, intended for tests
//!
//! # Example
//!
//! ```
//! use nodc_codes::resource::{MemoryProvider, ResourceProvider, TRANSLATE_CODES};
//!
//! # fn main() -> nodc_codes::error::Result<()> {
//! let mut provider = MemoryProvider::new();
//! provider.insert(
//!     TRANSLATE_CODES,
//!     "field\tpublic_value\tsynonyms\nLABO\tSMHI\tSmhi",
//! );
//! let table = provider.load_table(TRANSLATE_CODES)?;
//! assert_eq!(table.resolve("LABO", "smhi"), Some("SMHI"));
//! # Ok(())
//! # }
//! ```

use std::io::Read;

use encoding_rs::{Encoding, WINDOWS_1252};

use crate::error::Result;
use crate::table::SynonymTable;

pub mod dir;
pub mod memory;

pub use dir::DirProvider;
pub use memory::MemoryProvider;

/// Name of the synonym reference table resource.
pub const TRANSLATE_CODES: &str = "translate_codes.txt";

/// A source of named reference-table resources.
///
/// Implementations only supply raw bytes and the encoding they are stored
/// in; parsing stays with [`SynonymTable`].
pub trait ResourceProvider: Send + Sync + std::fmt::Debug {
    /// Open the named resource for reading.
    ///
    /// Returns a resource error when no resource with that name exists.
    fn open(&self, name: &str) -> Result<Box<dyn Read>>;

    /// The character encoding resources are stored in.
    ///
    /// The distributed reference tables are windows-1252, so that is the
    /// default.
    fn encoding(&self) -> &'static Encoding {
        WINDOWS_1252
    }

    /// Open, decode, and parse the named resource as a synonym table.
    fn load_table(&self, name: &str) -> Result<SynonymTable> {
        SynonymTable::from_reader_with_encoding(self.open(name)?, self.encoding())
    }
}
