//! abiscope: register smart-contract metadata and shape decoded on-chain
//! values for display.
//!
//! Two independent cores, both synchronous and side-effect free:
//!
//! - the ABI value interpreter ([`display::render`]), which maps a decoded
//!   value and its parameter descriptor onto a display tree;
//! - the contract batch ingestor ([`ingest::ingest_batch`]), which turns
//!   uploaded ABI files plus an address mapping into validated registration
//!   records.
//!
//! File acquisition, chain reads, and presentation belong to the caller.

pub mod config;
pub mod decode;
pub mod display;
pub mod domain;
pub mod ingest;
pub mod store;
