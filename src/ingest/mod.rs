//! Contract batch ingestion
//!
//! Uploaded `{name, content}` pairs plus an address-mapping document in;
//! validated contract records and per-file outcomes out. File acquisition is
//! the upload layer's problem; everything here is synchronous and CPU-only.

mod batch;
mod extract;
mod mapping;

pub use batch::{
    ingest_batch, register_single, FileOutcome, FileUpload, IngestReport, RegisterError,
};
pub use extract::{extract_abi, file_identifier, ExtractionError};
pub use mapping::{AddressLookup, AddressMapping, MappingParseError};
