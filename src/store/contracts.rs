//! Persistent store for registered contracts

use anyhow::{Context, Result};
use rusqlite::{params, Connection};
use std::path::Path;

use crate::domain::contract::{address, ChainId, ContractRecord, ContractStore};

/// SQLite-backed contract store, keyed by `(chain_id, address)`.
#[derive(Debug)]
pub struct SqliteContractStore {
    conn: Connection,
}

impl SqliteContractStore {
    /// Open or create the store database.
    pub fn open(path: &Path) -> Result<Self> {
        let conn =
            Connection::open(path).with_context(|| format!("open db {}", path.display()))?;
        let store = Self { conn };
        store.init()?;
        Ok(store)
    }

    /// In-memory store for tests and ephemeral runs.
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().context("open in-memory db")?;
        let store = Self { conn };
        store.init()?;
        Ok(store)
    }

    fn init(&self) -> Result<()> {
        self.conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS contracts (
                chain_id    INTEGER NOT NULL,
                address     TEXT NOT NULL,
                name        TEXT NOT NULL,
                abi_json    TEXT NOT NULL,
                created_at  INTEGER DEFAULT (strftime('%s', 'now')),
                PRIMARY KEY (chain_id, address)
            );",
        )?;
        Ok(())
    }
}

impl ContractStore for SqliteContractStore {
    fn save(&self, record: &ContractRecord) -> Result<()> {
        let abi_json = serde_json::to_string(&record.abi).context("serialize abi")?;
        self.conn.execute(
            "INSERT INTO contracts(chain_id, address, name, abi_json) VALUES (?1, ?2, ?3, ?4)
             ON CONFLICT(chain_id, address) DO UPDATE SET
                name=excluded.name,
                abi_json=excluded.abi_json",
            params![
                record.chain.0 as i64,
                address::normalize(&record.address),
                record.name,
                abi_json
            ],
        )?;
        Ok(())
    }

    fn get(&self, chain: ChainId, addr: &str) -> Result<Option<ContractRecord>> {
        let mut stmt = self.conn.prepare(
            "SELECT chain_id, address, name, abi_json FROM contracts
             WHERE chain_id = ?1 AND address = ?2",
        )?;

        let mut rows = stmt.query(params![chain.0 as i64, address::normalize(addr)])?;
        if let Some(row) = rows.next()? {
            Ok(Some(row_to_record(row)?))
        } else {
            Ok(None)
        }
    }

    fn remove(&self, chain: ChainId, addr: &str) -> Result<()> {
        self.conn.execute(
            "DELETE FROM contracts WHERE chain_id = ?1 AND address = ?2",
            params![chain.0 as i64, address::normalize(addr)],
        )?;
        Ok(())
    }

    fn list(&self, chain: Option<ChainId>) -> Result<Vec<ContractRecord>> {
        let mut records = Vec::new();
        match chain {
            Some(chain) => {
                let mut stmt = self.conn.prepare(
                    "SELECT chain_id, address, name, abi_json FROM contracts
                     WHERE chain_id = ?1 ORDER BY address",
                )?;
                let mut rows = stmt.query(params![chain.0 as i64])?;
                while let Some(row) = rows.next()? {
                    records.push(row_to_record(row)?);
                }
            }
            None => {
                let mut stmt = self.conn.prepare(
                    "SELECT chain_id, address, name, abi_json FROM contracts
                     ORDER BY chain_id, address",
                )?;
                let mut rows = stmt.query([])?;
                while let Some(row) = rows.next()? {
                    records.push(row_to_record(row)?);
                }
            }
        }
        Ok(records)
    }
}

fn row_to_record(row: &rusqlite::Row<'_>) -> Result<ContractRecord> {
    let chain_id: i64 = row.get(0)?;
    let addr: String = row.get(1)?;
    let name: String = row.get(2)?;
    let abi_json: String = row.get(3)?;
    let abi = serde_json::from_str(&abi_json).context("parse stored abi")?;
    Ok(ContractRecord {
        chain: ChainId(chain_id as u64),
        address: addr,
        name,
        abi,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::abi::AbiEntry;

    fn sample_record() -> ContractRecord {
        let abi: Vec<AbiEntry> = serde_json::from_str(
            r#"[{ "type": "function", "name": "helper", "inputs": [], "outputs": [] }]"#,
        )
        .unwrap();
        ContractRecord {
            chain: ChainId(1),
            address: "0x74C3Ce17250bC522d2BFBFC3d19E1234D7df7205".to_string(),
            name: "TokenHelper".to_string(),
            abi,
        }
    }

    #[test]
    fn test_save_get_roundtrip() {
        let store = SqliteContractStore::open_in_memory().unwrap();
        let record = sample_record();
        store.save(&record).unwrap();

        // Lookup is case-insensitive on the address.
        let found = store
            .get(ChainId(1), "0x74c3ce17250bc522d2bfbfc3d19e1234d7df7205")
            .unwrap()
            .unwrap();
        assert_eq!(found.name, "TokenHelper");
        assert_eq!(found.abi, record.abi);

        assert!(store
            .get(ChainId(2), &record.address)
            .unwrap()
            .is_none());
    }

    #[test]
    fn test_save_overwrites_same_key() {
        let store = SqliteContractStore::open_in_memory().unwrap();
        let mut record = sample_record();
        store.save(&record).unwrap();

        record.name = "TokenHelperV2".to_string();
        store.save(&record).unwrap();

        let all = store.list(Some(ChainId(1))).unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].name, "TokenHelperV2");
    }

    #[test]
    fn test_list_filters_by_chain() {
        let store = SqliteContractStore::open_in_memory().unwrap();
        let record = sample_record();
        store.save(&record).unwrap();

        let mut other = sample_record();
        other.chain = ChainId(8453);
        store.save(&other).unwrap();

        assert_eq!(store.list(None).unwrap().len(), 2);
        assert_eq!(store.list(Some(ChainId(8453))).unwrap().len(), 1);
    }

    #[test]
    fn test_remove() {
        let store = SqliteContractStore::open_in_memory().unwrap();
        let record = sample_record();
        store.save(&record).unwrap();
        store.remove(ChainId(1), &record.address).unwrap();
        assert!(store.get(ChainId(1), &record.address).unwrap().is_none());

        // Removing again is not an error.
        store.remove(ChainId(1), &record.address).unwrap();
    }
}
