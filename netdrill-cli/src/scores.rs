use crate::quiz::{Difficulty, Mode};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;
use thiserror::Error;
use tracing::{debug, info, warn};
use uuid::Uuid;

pub type StoreResult<T> = Result<T, StoreError>;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Failed to access score file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to encode scores: {0}")]
    Json(#[from] serde_json::Error),
}

/// One finished run on a high-score board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreEntry {
    pub id: Uuid,
    pub player: String,
    pub score: u32,
    pub recorded_at: DateTime<Utc>,
}

impl ScoreEntry {
    pub fn new(player: impl Into<String>, score: u32) -> Self {
        Self {
            id: Uuid::new_v4(),
            player: player.into(),
            score,
            recorded_at: Utc::now(),
        }
    }
}

/// Identifies one board: `next-hop/speedrun/expert`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ScoreKey {
    pub drill: String,
    pub mode: Mode,
    pub difficulty: Difficulty,
}

impl ScoreKey {
    pub fn new(drill: impl Into<String>, mode: Mode, difficulty: Difficulty) -> Self {
        Self {
            drill: drill.into(),
            mode,
            difficulty,
        }
    }
}

impl fmt::Display for ScoreKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}", self.drill, self.mode, self.difficulty)
    }
}

/// Where boards live. Keys are the `Display` form of [`ScoreKey`].
pub trait ScoreStore {
    fn load(&self, key: &str) -> StoreResult<Vec<ScoreEntry>>;
    fn save(&self, key: &str, entries: &[ScoreEntry]) -> StoreResult<()>;
    fn keys(&self) -> StoreResult<Vec<String>>;
    fn remove(&self, key: &str) -> StoreResult<()>;
}

type Boards = BTreeMap<String, Vec<ScoreEntry>>;

/// All boards in one pretty-printed JSON object.
pub struct JsonScoreStore {
    path: PathBuf,
}

impl JsonScoreStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn read_boards(&self) -> StoreResult<Boards> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Boards::new()),
            Err(e) => return Err(e.into()),
        };

        match serde_json::from_str::<Boards>(&raw) {
            Ok(boards) => {
                debug!(path = %self.path.display(), boards = boards.len(), "loaded score file");
                Ok(boards)
            }
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "score file is unreadable, starting fresh");
                Ok(Boards::new())
            }
        }
    }

    fn write_boards(&self, boards: &Boards) -> StoreResult<()> {
        let json = serde_json::to_string_pretty(boards)?;
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, json)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

impl ScoreStore for JsonScoreStore {
    fn load(&self, key: &str) -> StoreResult<Vec<ScoreEntry>> {
        Ok(self.read_boards()?.remove(key).unwrap_or_default())
    }

    fn save(&self, key: &str, entries: &[ScoreEntry]) -> StoreResult<()> {
        let mut boards = self.read_boards()?;
        boards.insert(key.to_string(), entries.to_vec());
        self.write_boards(&boards)
    }

    fn keys(&self) -> StoreResult<Vec<String>> {
        Ok(self.read_boards()?.into_keys().collect())
    }

    fn remove(&self, key: &str) -> StoreResult<()> {
        let mut boards = self.read_boards()?;
        if boards.remove(key).is_some() {
            self.write_boards(&boards)?;
        }
        Ok(())
    }
}

/// Keeps boards in memory for the lifetime of the value.
#[derive(Default)]
pub struct MemoryScoreStore {
    boards: RefCell<Boards>,
}

impl MemoryScoreStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ScoreStore for MemoryScoreStore {
    fn load(&self, key: &str) -> StoreResult<Vec<ScoreEntry>> {
        Ok(self.boards.borrow().get(key).cloned().unwrap_or_default())
    }

    fn save(&self, key: &str, entries: &[ScoreEntry]) -> StoreResult<()> {
        self.boards.borrow_mut().insert(key.to_string(), entries.to_vec());
        Ok(())
    }

    fn keys(&self) -> StoreResult<Vec<String>> {
        Ok(self.boards.borrow().keys().cloned().collect())
    }

    fn remove(&self, key: &str) -> StoreResult<()> {
        self.boards.borrow_mut().remove(key);
        Ok(())
    }
}

/// Top-N boards on top of any [`ScoreStore`].
pub struct ScoreBoard<S> {
    store: S,
    top_n: usize,
}

impl<S: ScoreStore> ScoreBoard<S> {
    pub fn new(store: S, top_n: usize) -> Self {
        Self { store, top_n }
    }

    /// Add a run and trim the board. Returns the 1-based rank, or `None` if
    /// the run didn't make the cut.
    pub fn record(&self, key: &ScoreKey, player: &str, score: u32) -> StoreResult<Option<usize>> {
        let key = key.to_string();
        let entry = ScoreEntry::new(player, score);
        let id = entry.id;

        let mut entries = self.store.load(&key)?;
        entries.push(entry);
        entries.sort_by(|a, b| b.score.cmp(&a.score));
        entries.truncate(self.top_n);
        self.store.save(&key, &entries)?;

        let rank = entries.iter().position(|e| e.id == id).map(|i| i + 1);
        info!(board = %key, player, score, ?rank, "recorded run");
        Ok(rank)
    }

    pub fn top(&self, key: &ScoreKey) -> StoreResult<Vec<ScoreEntry>> {
        self.store.load(&key.to_string())
    }

    /// Every board, optionally only those of one drill, sorted by key.
    pub fn boards(&self, drill: Option<&str>) -> StoreResult<Vec<(String, Vec<ScoreEntry>)>> {
        let mut boards = Vec::new();
        for key in self.store.keys()? {
            if drill.map_or(true, |d| key_drill(&key) == d) {
                let entries = self.store.load(&key)?;
                boards.push((key, entries));
            }
        }
        Ok(boards)
    }

    /// Drop every board of `drill`. Returns how many were removed.
    pub fn reset_drill(&self, drill: &str) -> StoreResult<usize> {
        let mut removed = 0;
        for key in self.store.keys()? {
            if key_drill(&key) == drill {
                self.store.remove(&key)?;
                removed += 1;
            }
        }
        Ok(removed)
    }
}

fn key_drill(key: &str) -> &str {
    key.split('/').next().unwrap_or(key)
}

// ─── Tests ───────────────────────────────────────────────────────────
