use crate::adapters::memory::{CatalogSnapshot, ProposalSnapshot};
use crate::utils::error::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

const STATE_FILE: &str = "exchange_state.json";

/// Everything the CLI persists between runs.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExchangeState {
    pub catalog: CatalogSnapshot,
    pub proposals: ProposalSnapshot,
}

/// JSON state file under a base directory.
#[derive(Debug, Clone)]
pub struct LocalStateStorage {
    base_path: String,
}

impl LocalStateStorage {
    pub fn new(base_path: String) -> Self {
        Self { base_path }
    }

    /// Loads the persisted state; a missing file means a fresh, empty exchange.
    pub fn load(&self) -> Result<ExchangeState> {
        let full_path = Path::new(&self.base_path).join(STATE_FILE);
        if !full_path.exists() {
            tracing::debug!("no state file at {}, starting empty", full_path.display());
            return Ok(ExchangeState::default());
        }
        let data = fs::read(&full_path)?;
        let state = serde_json::from_slice(&data)?;
        Ok(state)
    }

    pub fn save(&self, state: &ExchangeState) -> Result<()> {
        let full_path = Path::new(&self.base_path).join(STATE_FILE);
        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent)?;
        }
        let data = serde_json::to_vec_pretty(state)?;
        fs::write(&full_path, data)?;
        tracing::debug!("state saved to {}", full_path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_state_file_loads_empty() {
        let dir = TempDir::new().unwrap();
        let storage = LocalStateStorage::new(dir.path().to_str().unwrap().to_string());

        let state = storage.load().unwrap();
        assert!(state.catalog.ads.is_empty());
        assert!(state.proposals.proposals.is_empty());
    }

    #[test]
    fn test_save_creates_directories_and_round_trips() {
        let dir = TempDir::new().unwrap();
        let nested = dir.path().join("deep").join("data");
        let storage = LocalStateStorage::new(nested.to_str().unwrap().to_string());

        let mut state = ExchangeState::default();
        state.catalog.next_id = 5;
        state.proposals.next_id = 3;
        storage.save(&state).unwrap();

        let loaded = storage.load().unwrap();
        assert_eq!(loaded.catalog.next_id, 5);
        assert_eq!(loaded.proposals.next_id, 3);
    }
}
