pub mod repository;
pub mod sqlite;

pub use repository::GameRepository;
pub use sqlite::{EndedGame, SaveDb, SaveDbError};
