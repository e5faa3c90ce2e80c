//! Batch contract registration
//!
//! Orchestrates per-file ABI extraction against an address-mapping document
//! and assembles the validated contract records. Per-file failures are
//! collected and never abort the batch; only a malformed mapping document
//! does.

use thiserror::Error;
use tracing::{debug, info, warn};

use crate::domain::contract::{address, ChainId, ContractRecord};

use super::extract::{extract_abi, file_identifier, ExtractionError};
use super::mapping::{AddressLookup, AddressMapping, MappingParseError};

/// An uploaded file, already materialized to text by the upload layer.
#[derive(Debug, Clone)]
pub struct FileUpload {
    pub name: String,
    pub content: String,
}

impl FileUpload {
    pub fn new(name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            content: content.into(),
        }
    }
}

/// Per-file outcome of a batch ingestion pass. Every input file lands in
/// exactly one of these; nothing is silently dropped.
#[derive(Debug, Clone, PartialEq)]
pub enum FileOutcome {
    /// Extracted and matched to an address; a record was emitted
    Registered { identifier: String, address: String },
    /// ABI extraction failed; the rest of the batch is unaffected
    ExtractionFailed {
        file: String,
        error: ExtractionError,
    },
    /// Extracted, but the mapping has no usable entry
    AddressUnmatched { identifier: String, reason: String },
}

/// Result of one ingestion pass: records in upload order plus one outcome
/// per input file.
#[derive(Debug, Default)]
pub struct IngestReport {
    pub records: Vec<ContractRecord>,
    pub outcomes: Vec<FileOutcome>,
}

impl IngestReport {
    pub fn registered(&self) -> usize {
        self.records.len()
    }

    pub fn extraction_errors(&self) -> impl Iterator<Item = (&str, &ExtractionError)> {
        self.outcomes.iter().filter_map(|outcome| match outcome {
            FileOutcome::ExtractionFailed { file, error } => Some((file.as_str(), error)),
            _ => None,
        })
    }

    pub fn unmatched(&self) -> impl Iterator<Item = &str> {
        self.outcomes.iter().filter_map(|outcome| match outcome {
            FileOutcome::AddressUnmatched { identifier, .. } => Some(identifier.as_str()),
            _ => None,
        })
    }
}

/// Ingest a batch of uploaded ABI files against an address-mapping document.
///
/// Records are emitted in upload order. The chain id is an explicit caller
/// decision, not ambient state.
pub fn ingest_batch(
    chain: ChainId,
    files: &[FileUpload],
    mapping_text: &str,
) -> Result<IngestReport, MappingParseError> {
    let mapping = AddressMapping::parse(mapping_text)?;
    let mut report = IngestReport::default();

    for file in files {
        let entries = match extract_abi(&file.content) {
            Ok(entries) => entries,
            Err(error) => {
                warn!(file = %file.name, %error, "ABI extraction failed");
                report.outcomes.push(FileOutcome::ExtractionFailed {
                    file: file.name.clone(),
                    error,
                });
                continue;
            }
        };

        let identifier = file_identifier(&file.name);
        match mapping.address_for(&identifier) {
            AddressLookup::Found(addr) => {
                debug!(%identifier, address = %addr, "registering contract");
                report.records.push(ContractRecord {
                    chain,
                    address: addr.clone(),
                    name: identifier.clone(),
                    abi: entries,
                });
                report.outcomes.push(FileOutcome::Registered {
                    identifier,
                    address: addr,
                });
            }
            AddressLookup::Missing => {
                report.outcomes.push(FileOutcome::AddressUnmatched {
                    identifier,
                    reason: "no mapping entry".to_string(),
                });
            }
            AddressLookup::Malformed(value) => {
                report.outcomes.push(FileOutcome::AddressUnmatched {
                    identifier,
                    reason: format!("malformed address {value}"),
                });
            }
        }
    }

    info!(
        registered = report.registered(),
        files = files.len(),
        "batch ingest complete"
    );
    Ok(report)
}

/// Single-contract registration failure.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RegisterError {
    #[error("contract name is empty")]
    EmptyName,

    #[error("malformed address: {0}")]
    MalformedAddress(String),

    #[error(transparent)]
    Abi(#[from] ExtractionError),
}

/// Register one contract from pasted ABI text (the non-batch path). Accepts
/// the same content shapes batch extraction does.
pub fn register_single(
    chain: ChainId,
    name: &str,
    addr: &str,
    abi_text: &str,
) -> Result<ContractRecord, RegisterError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(RegisterError::EmptyName);
    }
    if !address::is_well_formed(addr) {
        return Err(RegisterError::MalformedAddress(addr.to_string()));
    }
    let abi = extract_abi(abi_text)?;

    Ok(ContractRecord {
        chain,
        address: addr.to_string(),
        name: name.to_string(),
        abi,
    })
}
