//! # nodc-codes
//!
//! Synonym resolution and translation for Swedish marine-data code lists.
//!
//! ## Features
//!
//! - Case- and whitespace-insensitive code lookups
//! - Translation between code columns (short names, Swedish and English names)
//! - Pluggable resource providers with configuration-directory discovery
//! - Atomic reload of the reference table in long-running applications
//!
//! ## Example
//!
//! ```
//! use nodc_codes::SynonymTable;
//!
//! let table = SynonymTable::from_text(
//!     "field\tpublic_value\tsynonyms\tshort_name\n\
//!      LABO\tSMHI\tSmhi<or>SMHI lab\tSMHI",
//! )
//! .unwrap();
//!
//! assert_eq!(table.resolve("LABO", "Smhi Lab"), Some("SMHI"));
//! ```

pub mod cli;
pub mod error;
pub mod handle;
pub mod resource;
pub mod table;

pub use error::{CodesError, Result};
pub use handle::TableHandle;
pub use resource::{DirProvider, MemoryProvider, ResourceProvider, TRANSLATE_CODES};
pub use table::{SynonymTable, TableRow};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
