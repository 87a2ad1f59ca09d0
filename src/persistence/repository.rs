use crate::core::snapshot::Snapshot;
use crate::persistence::sqlite::EndedGame;

/// Storage for finished games and the optional continue slot.
pub trait GameRepository {
    /// Archive a finished game. Returns the archive row id.
    fn archive_ended(&mut self, snapshot: &Snapshot) -> Result<i64, Box<dyn std::error::Error>>;
    fn save_continue(&mut self, snapshot: &Snapshot) -> Result<(), Box<dyn std::error::Error>>;
    fn load_continue(&self) -> Result<Option<Snapshot>, Box<dyn std::error::Error>>;
    fn clear_continue(&mut self) -> Result<(), Box<dyn std::error::Error>>;
    fn last_ended(&self) -> Result<Option<EndedGame>, Box<dyn std::error::Error>>;
    /// Every archived game, oldest first.
    fn ended_games(&self) -> Result<Vec<EndedGame>, Box<dyn std::error::Error>>;
}
