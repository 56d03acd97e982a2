//! Shared handle over a reloadable synonym table.
//!
//! [`SynonymTable`] itself is immutable. Long-running applications that
//! want to pick up an updated reference file without restarting hold a
//! [`TableHandle`] instead: readers grab a cheap snapshot, and a reload
//! builds the replacement table aside before swapping it in.

use std::sync::Arc;

use parking_lot::RwLock;

use crate::error::Result;
use crate::resource::{ResourceProvider, TRANSLATE_CODES};
use crate::table::SynonymTable;

/// Field holding delivery data types.
pub const DELIVERY_DATATYPE: &str = "delivery_datatype";
/// Field holding monitoring projects.
pub const PROJECT: &str = "project";
/// Field holding laboratories.
pub const LABO: &str = "LABO";
/// Column the convenience listings usually translate to.
pub const SHORT_NAME: &str = "short_name";

/// Cloneable handle to the current synonym table.
///
/// All clones share one table. [`get`](Self::get) returns an `Arc`
/// snapshot that stays valid across reloads, so a caller in the middle of
/// a batch keeps reading the table it started with.
#[derive(Debug, Clone)]
pub struct TableHandle {
    inner: Arc<RwLock<Arc<SynonymTable>>>,
}

impl TableHandle {
    /// Wrap an already-built table.
    pub fn new(table: SynonymTable) -> Self {
        TableHandle {
            inner: Arc::new(RwLock::new(Arc::new(table))),
        }
    }

    /// Build the reference table through `provider` and wrap it.
    pub fn load<P>(provider: &P) -> Result<Self>
    where
        P: ResourceProvider + ?Sized,
    {
        Ok(TableHandle::new(provider.load_table(TRANSLATE_CODES)?))
    }

    /// Snapshot of the current table.
    pub fn get(&self) -> Arc<SynonymTable> {
        self.inner.read().clone()
    }

    /// Rebuild the reference table through `provider` and swap it in.
    ///
    /// The replacement is built before the swap; when building fails the
    /// handle keeps serving the previous table.
    pub fn reload<P>(&self, provider: &P) -> Result<()>
    where
        P: ResourceProvider + ?Sized,
    {
        let table = Arc::new(provider.load_table(TRANSLATE_CODES)?);
        *self.inner.write() = table;
        Ok(())
    }

    /// All delivery data types, translated to `translate_to`.
    ///
    /// `translate_to` is usually [`SHORT_NAME`].
    pub fn data_type_list(&self, translate_to: &str) -> Vec<String> {
        self.get().translated_values(DELIVERY_DATATYPE, translate_to)
    }

    /// All monitoring projects, translated to `translate_to`.
    pub fn project_list(&self, translate_to: &str) -> Vec<String> {
        self.get().translated_values(PROJECT, translate_to)
    }

    /// All laboratories, translated to `translate_to`.
    pub fn labo_list(&self, translate_to: &str) -> Vec<String> {
        self.get().translated_values(LABO, translate_to)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::resource::MemoryProvider;

    fn provider(rows: &str) -> MemoryProvider {
        let mut provider = MemoryProvider::new();
        provider.insert(
            TRANSLATE_CODES,
            format!("field\tpublic_value\tsynonyms\tshort_name\n{rows}"),
        );
        provider
    }

    #[test]
    fn test_load_and_get() {
        let provider = provider("LABO\tSMHI\tSmhi\tSMHI");
        let handle = TableHandle::load(&provider).unwrap();

        assert_eq!(handle.get().resolve("LABO", "smhi"), Some("SMHI"));
    }

    #[test]
    fn test_reload_swaps_table() {
        let handle = TableHandle::load(&provider("LABO\tSMHI\tSmhi\tSMHI")).unwrap();
        let snapshot = handle.get();

        handle
            .reload(&provider("LABO\tUMSC\tUmu\tUMSC"))
            .unwrap();

        assert_eq!(handle.get().resolve("LABO", "smhi"), None);
        assert_eq!(handle.get().resolve("LABO", "umu"), Some("UMSC"));
        // A snapshot taken before the reload is unaffected.
        assert_eq!(snapshot.resolve("LABO", "smhi"), Some("SMHI"));
    }

    #[test]
    fn test_failed_reload_keeps_table() {
        let handle = TableHandle::load(&provider("LABO\tSMHI\tSmhi\tSMHI")).unwrap();

        let mut broken = MemoryProvider::new();
        broken.insert(TRANSLATE_CODES, "field\tpublic_value\nLABO\tSMHI");
        assert!(handle.reload(&broken).is_err());

        assert_eq!(handle.get().resolve("LABO", "smhi"), Some("SMHI"));
    }

    #[test]
    fn test_clones_share_one_table() {
        let handle = TableHandle::load(&provider("LABO\tSMHI\tSmhi\tSMHI")).unwrap();
        let clone = handle.clone();

        clone
            .reload(&provider("LABO\tUMSC\tUmu\tUMSC"))
            .unwrap();

        assert_eq!(handle.get().resolve("LABO", "umu"), Some("UMSC"));
    }

    #[test]
    fn test_convenience_lists() {
        let handle = TableHandle::load(&provider(
            "LABO\tSMHI\tSmhi\tSMHI\n\
             LABO\tUMSC\tUmu\tUMSC\n\
             project\tNAT\tNational\tNAT\n\
             delivery_datatype\tPHYSCHEM\tPhysical and chemical\tPhysChem",
        ))
        .unwrap();

        assert_eq!(handle.labo_list(SHORT_NAME), ["SMHI", "UMSC"]);
        assert_eq!(handle.project_list(SHORT_NAME), ["NAT"]);
        assert_eq!(handle.data_type_list(SHORT_NAME), ["PhysChem"]);
    }
}
