//! ABI domain model
//!
//! Parameter trees, classified type tags, lenient function/event entries,
//! and decoded values: the vocabulary the interpreter and the ingest flow
//! share.

mod entry;
mod param;
mod value;

pub use entry::AbiEntry;
pub use param::{AbiParam, TypeTag};
pub use value::DecodedValue;
