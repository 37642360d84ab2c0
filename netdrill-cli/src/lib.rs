//! # netdrill-cli
//!
//! Terminal quiz games for IPv4 subnetting and route selection, built on
//! `netdrill-core`.

pub mod commands;
pub mod config;
pub mod drills;
pub mod error;
pub mod quiz;
pub mod scores;
pub mod session;

pub use commands::{run, Command, USAGE};
pub use config::{Config, ConfigError};
pub use drills::{Drill, DRILLS};
pub use error::{DrillError, DrillResult};
pub use quiz::{Difficulty, Mode, Question};
pub use scores::{JsonScoreStore, MemoryScoreStore, ScoreBoard, ScoreEntry, ScoreKey, ScoreStore};
pub use session::{Session, SessionOptions, SessionSummary};
