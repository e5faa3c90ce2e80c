use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use walkdir::WalkDir;

use abiscope::config::{self, Config};
use abiscope::display::{render_param, DisplayNode};
use abiscope::domain::abi::{AbiParam, DecodedValue};
use abiscope::domain::contract::{address, ChainId, ContractStore};
use abiscope::ingest::{self, FileOutcome, FileUpload};
use abiscope::store::SqliteContractStore;

#[derive(Debug, Parser)]
#[command(
    name = "abiscope",
    version,
    about = "Register contract ABIs and shape decoded values for display"
)]
struct Args {
    /// Chain id (falls back to config default_chain, then mainnet)
    #[arg(long, global = true)]
    chain: Option<u64>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Batch-register contracts from ABI files plus an address mapping
    Ingest {
        /// ABI files (.ts, .js, .json)
        files: Vec<PathBuf>,

        /// Directory to scan for ABI files, in addition to explicit paths
        #[arg(long)]
        dir: Option<PathBuf>,

        /// Path to the JSON address-mapping document
        #[arg(long)]
        mapping: PathBuf,
    },

    /// Register a single contract from one ABI file
    Add {
        /// Contract name
        #[arg(long)]
        name: String,

        /// Contract address (0x-prefixed)
        #[arg(long)]
        address: String,

        /// Path to the ABI file
        abi: PathBuf,
    },

    /// List registered contracts
    List,

    /// Render a decoded JSON value against a parameter definition
    Render {
        /// Path to the parameter definition JSON
        #[arg(long)]
        param: PathBuf,

        /// Path to the decoded value JSON
        #[arg(long)]
        value: PathBuf,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    let config = config::load();
    let chain = ChainId(args.chain.or(config.default_chain).unwrap_or(1));

    match args.command {
        Command::Ingest {
            files,
            dir,
            mapping,
        } => cmd_ingest(&config, chain, files, dir, &mapping),
        Command::Add { name, address, abi } => cmd_add(&config, chain, &name, &address, &abi),
        Command::List => cmd_list(&config, args.chain.map(ChainId)),
        Command::Render { param, value } => cmd_render(&param, &value),
    }
}

fn cmd_ingest(
    config: &Config,
    chain: ChainId,
    files: Vec<PathBuf>,
    dir: Option<PathBuf>,
    mapping_path: &Path,
) -> Result<()> {
    let mut uploads = Vec::new();
    for path in &files {
        uploads.push(read_upload(path)?);
    }
    if let Some(dir) = dir {
        collect_dir_uploads(&dir, &mut uploads)?;
    }
    if uploads.is_empty() {
        bail!("no ABI files given");
    }

    let mapping_text = fs::read_to_string(mapping_path)
        .with_context(|| format!("read {}", mapping_path.display()))?;

    let report = ingest::ingest_batch(chain, &uploads, &mapping_text)?;

    let store = open_store(config)?;
    for record in &report.records {
        store.save(record)?;
    }

    for outcome in &report.outcomes {
        match outcome {
            FileOutcome::Registered {
                identifier,
                address: addr,
            } => println!("registered  {identifier} @ {}", address::short(addr)),
            FileOutcome::ExtractionFailed { file, error } => {
                println!("failed      {file}: {error}")
            }
            FileOutcome::AddressUnmatched { identifier, reason } => {
                println!("skipped     {identifier}: {reason}")
            }
        }
    }
    println!(
        "{} of {} files registered on chain {chain}",
        report.registered(),
        uploads.len()
    );
    Ok(())
}

fn cmd_add(config: &Config, chain: ChainId, name: &str, addr: &str, abi_path: &Path) -> Result<()> {
    let abi_text =
        fs::read_to_string(abi_path).with_context(|| format!("read {}", abi_path.display()))?;

    let record = ingest::register_single(chain, name, addr, &abi_text)?;
    let store = open_store(config)?;
    store.save(&record)?;

    println!(
        "registered {} @ {} on chain {chain}",
        record.name,
        address::short(&record.address)
    );
    Ok(())
}

fn cmd_list(config: &Config, chain: Option<ChainId>) -> Result<()> {
    let store = open_store(config)?;
    let records = store.list(chain)?;
    if records.is_empty() {
        println!("no contracts registered");
        return Ok(());
    }

    for record in records {
        let display_addr =
            address::to_checksum(&record.address).unwrap_or_else(|| record.address.clone());
        println!(
            "{:>8}  {}  {} ({} entries)",
            record.chain.to_string(),
            display_addr,
            record.name,
            record.abi.len()
        );
    }
    Ok(())
}

fn cmd_render(param_path: &Path, value_path: &Path) -> Result<()> {
    let param_text = fs::read_to_string(param_path)
        .with_context(|| format!("read {}", param_path.display()))?;
    let param: AbiParam =
        serde_json::from_str(&param_text).context("parse parameter definition")?;

    let value_text = fs::read_to_string(value_path)
        .with_context(|| format!("read {}", value_path.display()))?;
    let value: DecodedValue = serde_json::from_str::<serde_json::Value>(&value_text)
        .context("parse decoded value")?
        .into();

    print_node(&render_param(&param, &value), 0);
    Ok(())
}

fn open_store(config: &Config) -> Result<SqliteContractStore> {
    let Some(path) = config::contracts_db_path(config) else {
        bail!("cannot resolve a data directory for the contract store");
    };
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).with_context(|| format!("create {}", parent.display()))?;
    }
    SqliteContractStore::open(&path)
}

fn read_upload(path: &Path) -> Result<FileUpload> {
    let content =
        fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    Ok(FileUpload::new(name, content))
}

fn collect_dir_uploads(root: &Path, uploads: &mut Vec<FileUpload>) -> Result<()> {
    for entry in WalkDir::new(root)
        .follow_links(false)
        .into_iter()
        .filter_entry(|e| !is_ignored_dir(e.path()))
    {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }
        let path = entry.path();
        let Some(ext) = path.extension().and_then(|s| s.to_str()) else {
            continue;
        };
        if !matches!(ext, "ts" | "js" | "json") {
            continue;
        }
        uploads.push(read_upload(path)?);
    }
    Ok(())
}

fn is_ignored_dir(path: &Path) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .map(|name| {
            matches!(
                name,
                ".git" | "target" | "node_modules" | ".next" | "dist" | "build"
            )
        })
        .unwrap_or(false)
}

/// Print a display tree as indented text. A stand-in for the inspector UI
/// this core would normally feed.
fn print_node(node: &DisplayNode, indent: usize) {
    let pad = "  ".repeat(indent);
    match node {
        DisplayNode::Boolean { value } => println!("{pad}{value}"),
        DisplayNode::Address { value } => println!(
            "{pad}{}",
            address::to_checksum(value).unwrap_or_else(|| value.clone())
        ),
        DisplayNode::ScalarText { value, .. } => println!("{pad}{value}"),
        DisplayNode::LabeledTree { fields } => {
            for field in fields {
                println!("{pad}{}:", field.name);
                print_node(&field.node, indent + 1);
            }
        }
        DisplayNode::RawTree { value } => println!("{pad}{value}"),
        DisplayNode::ListTree { items } => {
            for (index, item) in items.iter().enumerate() {
                println!("{pad}[{index}] {}:", item.ty);
                print_node(&item.node, indent + 1);
            }
        }
    }
}
