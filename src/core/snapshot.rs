use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use bevy_utils::tracing::warn;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::simulation::state::GameState;

pub const SNAPSHOT_VERSION: u32 = 1;

/// Flat save of one game: the seed it started from and the whole state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default = "default_snapshot_version")]
    pub version: u32,
    pub seed: u64,
    pub state: GameState,
}

fn default_snapshot_version() -> u32 {
    1
}

#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("snapshot json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("snapshot file {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("unsupported snapshot version {0}")]
    UnsupportedVersion(u32),
}

impl Snapshot {
    pub fn new(seed: u64, state: GameState) -> Self {
        Self {
            version: SNAPSHOT_VERSION,
            seed,
            state,
        }
    }
}

pub fn serialize_state(snapshot: &Snapshot) -> Result<String, SnapshotError> {
    Ok(serde_json::to_string_pretty(snapshot)?)
}

/// Parse a snapshot. The occurrence cache is rebuilt from the history when
/// the two disagree.
pub fn deserialize_state(data: &str) -> Result<Snapshot, SnapshotError> {
    let mut snapshot: Snapshot = serde_json::from_str(data)?;
    if snapshot.version > SNAPSHOT_VERSION {
        return Err(SnapshotError::UnsupportedVersion(snapshot.version));
    }

    let counted = count_history(&snapshot.state);
    if counted != snapshot.state.event_occurrences {
        warn!(
            target: "ppl::snapshot",
            history = snapshot.state.event_history.len(),
            "occurrence counts disagree with history; rebuilding"
        );
        snapshot.state.event_occurrences = counted;
    }
    Ok(snapshot)
}

fn count_history(state: &GameState) -> BTreeMap<String, u32> {
    let mut counts = BTreeMap::new();
    for entry in &state.event_history {
        *counts.entry(entry.event_id.clone()).or_insert(0) += 1;
    }
    counts
}

pub fn save_snapshot_to_path<P: AsRef<Path>>(snapshot: &Snapshot, path: P) -> Result<(), SnapshotError> {
    let path = path.as_ref();
    let json = serialize_state(snapshot)?;
    fs::write(path, json).map_err(|source| SnapshotError::Io {
        path: path.to_path_buf(),
        source,
    })
}

pub fn load_snapshot_from_path<P: AsRef<Path>>(path: P) -> Result<Snapshot, SnapshotError> {
    let path = path.as_ref();
    let data = fs::read_to_string(path).map_err(|source| SnapshotError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    deserialize_state(&data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulation::chains::start_chain;
    use serde_json::json;

    #[test]
    fn snapshot_keeps_chains_and_history() {
        let mut state = GameState::default();
        state.day = 14;
        state.record_event("cfi_late", 1, false);
        start_chain(
            &mut state,
            "ppl_coin",
            json!({ "coins": 4000 }).as_object().cloned().unwrap_or_default(),
        );
        let snapshot = Snapshot::new(99, state);
        let restored = deserialize_state(&serialize_state(&snapshot).unwrap()).unwrap();
        assert_eq!(restored, snapshot);
    }

    #[test]
    fn missing_version_defaults_to_one() {
        let state = serde_json::to_value(GameState::default()).unwrap();
        let raw = json!({ "seed": 3, "state": state }).to_string();
        assert_eq!(deserialize_state(&raw).unwrap().version, 1);
    }

    #[test]
    fn future_versions_are_rejected() {
        let state = serde_json::to_value(GameState::default()).unwrap();
        let raw = json!({ "version": 9, "seed": 3, "state": state }).to_string();
        assert!(matches!(
            deserialize_state(&raw),
            Err(SnapshotError::UnsupportedVersion(9))
        ));
    }

    #[test]
    fn stale_occurrence_cache_is_rebuilt() {
        let mut state = GameState::default();
        state.record_event("bird_strike", 0, true);
        state.event_occurrences.insert("bird_strike".into(), 5);
        let raw = serialize_state(&Snapshot::new(1, state)).unwrap();
        let restored = deserialize_state(&raw).unwrap();
        assert_eq!(restored.state.occurrences("bird_strike"), 1);
    }
}
