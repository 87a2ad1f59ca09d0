pub mod config;
pub mod core;
pub mod data;
pub mod persistence;
pub mod rng;
pub mod rules;
pub mod simulation;

pub use crate::config::EngineConfig;
pub use crate::core::{EngineContext, Session, SessionError, Snapshot};
pub use crate::rng::{RandomSource, ScriptedRandom, SeededRandom};
