//! Contract persistence seam

use super::{ChainId, ContractRecord};

/// Key-value persistence for registered contracts, keyed by chain + address.
///
/// Abstracts over the storage backend so the ingest flow can hand records to
/// any store implementation.
pub trait ContractStore {
    /// Save (or overwrite) a record.
    fn save(&self, record: &ContractRecord) -> anyhow::Result<()>;

    /// Look up a record by chain and address.
    fn get(&self, chain: ChainId, address: &str) -> anyhow::Result<Option<ContractRecord>>;

    /// Remove a record. Removing an absent record is not an error.
    fn remove(&self, chain: ChainId, address: &str) -> anyhow::Result<()>;

    /// All records, optionally filtered to one chain.
    fn list(&self, chain: Option<ChainId>) -> anyhow::Result<Vec<ContractRecord>>;
}
