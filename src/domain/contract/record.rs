//! Contract registration records

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::abi::AbiEntry;

/// EVM chain id (1 = mainnet, 8453 = Base, ...). Always threaded as an
/// explicit parameter, never read from ambient state.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct ChainId(pub u64);

impl fmt::Display for ChainId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The unit handed to the persistence collaborator, keyed downstream by
/// `(chain, address)`. Built transiently during an ingestion pass; the core
/// keeps no reference after returning it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContractRecord {
    pub chain: ChainId,
    /// 0x-prefixed hex address
    pub address: String,
    pub name: String,
    pub abi: Vec<AbiEntry>,
}
