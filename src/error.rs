//! Error types for the nodc-codes library.
//!
//! Construction-time failures (unreadable resources, malformed reference
//! tables) are the only hard errors; they surface as [`CodesError`] and no
//! partially-built table ever escapes. Query-time misses are deliberately
//! not represented here: an unmatched synonym or unknown field is a routine
//! outcome in this domain and comes back as `None` or an empty listing.
//!
//! # Examples
//!
//! ```
//! use nodc_codes::error::{CodesError, Result};
//!
//! fn check_header(header: &[String]) -> Result<()> {
//!     if header.is_empty() {
//!         return Err(CodesError::parse("empty resource: no header row"));
//!     }
//!     Ok(())
//! }
//!
//! assert!(check_header(&[]).is_err());
//! ```

use std::io;

use thiserror::Error;

/// The error type for table construction and resource access.
#[derive(Error, Debug)]
pub enum CodesError {
    /// I/O failure while reading a backing resource.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The backing resource could not be located or decoded.
    #[error("Resource error: {0}")]
    Resource(String),

    /// Malformed header or data row that prevents index construction.
    #[error("Parse error: {0}")]
    Parse(String),
}

/// Result type alias for operations that may fail with [`CodesError`].
pub type Result<T> = std::result::Result<T, CodesError>;

impl CodesError {
    /// Create a new resource error.
    pub fn resource<S: Into<String>>(msg: S) -> Self {
        CodesError::Resource(msg.into())
    }

    /// Create a new parse error.
    pub fn parse<S: Into<String>>(msg: S) -> Self {
        CodesError::Parse(msg.into())
    }
}
