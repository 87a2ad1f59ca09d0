use std::path::Path;

use bevy_utils::tracing::info;
use rusqlite::{params, Connection, OptionalExtension};
use thiserror::Error;

use crate::core::snapshot::{deserialize_state, serialize_state, Snapshot, SnapshotError};
use crate::persistence::repository::GameRepository;
use crate::simulation::endgame::EndingKind;

const SAVE_SCHEMA_VERSION: i64 = 1;
const SAVE_VERSION: i64 = 1;

const SAVE_DB_SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS save_meta (
  id INTEGER PRIMARY KEY CHECK (id = 1),
  schema_version INTEGER NOT NULL,
  save_version INTEGER NOT NULL
);

CREATE TABLE IF NOT EXISTS ended_games (
  game_id INTEGER PRIMARY KEY AUTOINCREMENT,
  seed INTEGER NOT NULL,
  ending TEXT NOT NULL,
  day INTEGER NOT NULL,
  flight_hours REAL NOT NULL,
  money REAL NOT NULL,
  snapshot TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS continue_slot (
  id INTEGER PRIMARY KEY CHECK (id = 1),
  seed INTEGER NOT NULL,
  day INTEGER NOT NULL,
  snapshot TEXT NOT NULL
);
"#;

#[derive(Debug, Error)]
pub enum SaveDbError {
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error(transparent)]
    Snapshot(#[from] SnapshotError),
    #[error("{0}")]
    InvalidData(String),
}

/// Summary row of an archived game.
#[derive(Debug, Clone, PartialEq)]
pub struct EndedGame {
    pub game_id: i64,
    pub seed: u64,
    pub ending: EndingKind,
    pub day: u32,
    pub flight_hours: f64,
    pub money: f64,
    pub snapshot: Snapshot,
}

pub struct SaveDb {
    conn: Connection,
}

impl SaveDb {
    pub fn open(path: impl AsRef<Path>) -> Result<Self, SaveDbError> {
        let conn = Connection::open(path)?;
        Self::init(conn)
    }

    pub fn open_in_memory() -> Result<Self, SaveDbError> {
        Self::init(Connection::open_in_memory()?)
    }

    fn init(conn: Connection) -> Result<Self, SaveDbError> {
        let mut db = Self { conn };
        db.conn.execute_batch(SAVE_DB_SCHEMA)?;
        db.ensure_save_meta()?;
        Ok(db)
    }

    fn ensure_save_meta(&mut self) -> Result<(), SaveDbError> {
        let meta = self
            .conn
            .query_row(
                "SELECT schema_version, save_version FROM save_meta WHERE id = 1",
                [],
                |row| Ok((row.get::<_, i64>(0)?, row.get::<_, i64>(1)?)),
            )
            .optional()?;

        match meta {
            Some((schema_version, save_version)) => {
                if schema_version != SAVE_SCHEMA_VERSION || save_version != SAVE_VERSION {
                    return Err(SaveDbError::InvalidData(format!(
                        "save_meta version mismatch (schema {}, save {}, expected {}, {})",
                        schema_version, save_version, SAVE_SCHEMA_VERSION, SAVE_VERSION
                    )));
                }
            }
            None => {
                self.conn.execute(
                    "INSERT INTO save_meta (id, schema_version, save_version) VALUES (1, ?1, ?2)",
                    params![SAVE_SCHEMA_VERSION, SAVE_VERSION],
                )?;
            }
        }
        Ok(())
    }

    /// Archive a finished game and clear the continue slot in one transaction.
    pub fn archive_ended(&mut self, snapshot: &Snapshot) -> Result<i64, SaveDbError> {
        let state = &snapshot.state;
        let ending = match (state.game_ended, state.ending_type) {
            (true, Some(ending)) => ending,
            _ => {
                return Err(SaveDbError::InvalidData(
                    "only finished games can be archived".to_string(),
                ))
            }
        };
        let json = serialize_state(snapshot)?;

        let tx = self.conn.transaction()?;
        tx.execute(
            "INSERT INTO ended_games (seed, ending, day, flight_hours, money, snapshot) VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                snapshot.seed as i64,
                ending.as_str(),
                state.day as i64,
                state.stats.flight_hours,
                state.stats.money,
                json,
            ],
        )?;
        let game_id = tx.last_insert_rowid();
        tx.execute("DELETE FROM continue_slot", [])?;
        tx.commit()?;

        info!(target: "ppl::persistence", game_id, ending = %ending, day = state.day, "game archived");
        Ok(game_id)
    }

    pub fn save_continue(&mut self, snapshot: &Snapshot) -> Result<(), SaveDbError> {
        let json = serialize_state(snapshot)?;
        let tx = self.conn.transaction()?;
        tx.execute("DELETE FROM continue_slot", [])?;
        tx.execute(
            "INSERT INTO continue_slot (id, seed, day, snapshot) VALUES (1, ?1, ?2, ?3)",
            params![snapshot.seed as i64, snapshot.state.day as i64, json],
        )?;
        tx.commit()?;
        Ok(())
    }

    pub fn load_continue(&self) -> Result<Option<Snapshot>, SaveDbError> {
        let json = self
            .conn
            .query_row("SELECT snapshot FROM continue_slot WHERE id = 1", [], |row| {
                row.get::<_, String>(0)
            })
            .optional()?;
        match json {
            Some(json) => Ok(Some(deserialize_state(&json)?)),
            None => Ok(None),
        }
    }

    pub fn clear_continue(&mut self) -> Result<(), SaveDbError> {
        self.conn.execute("DELETE FROM continue_slot", [])?;
        Ok(())
    }

    pub fn last_ended(&self) -> Result<Option<EndedGame>, SaveDbError> {
        let row = self
            .conn
            .query_row(
                "SELECT game_id, seed, ending, day, flight_hours, money, snapshot FROM ended_games ORDER BY game_id DESC LIMIT 1",
                [],
                read_row,
            )
            .optional()?;
        row.map(ended_from_row).transpose()
    }

    pub fn ended_games(&self) -> Result<Vec<EndedGame>, SaveDbError> {
        let mut stmt = self.conn.prepare(
            "SELECT game_id, seed, ending, day, flight_hours, money, snapshot FROM ended_games ORDER BY game_id",
        )?;
        let rows = stmt.query_map([], read_row)?;
        let mut games = Vec::new();
        for row in rows {
            games.push(ended_from_row(row?)?);
        }
        Ok(games)
    }
}

type EndedRow = (i64, i64, String, i64, f64, f64, String);

fn read_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<EndedRow> {
    Ok((
        row.get(0)?,
        row.get(1)?,
        row.get(2)?,
        row.get(3)?,
        row.get(4)?,
        row.get(5)?,
        row.get(6)?,
    ))
}

fn ended_from_row(row: EndedRow) -> Result<EndedGame, SaveDbError> {
    let (game_id, seed, ending, day, flight_hours, money, json) = row;
    Ok(EndedGame {
        game_id,
        seed: seed as u64,
        ending: ending
            .parse::<EndingKind>()
            .map_err(|value| SaveDbError::InvalidData(format!("unknown ending {}", value)))?,
        day: day as u32,
        flight_hours,
        money,
        snapshot: deserialize_state(&json)?,
    })
}

impl GameRepository for SaveDb {
    fn archive_ended(&mut self, snapshot: &Snapshot) -> Result<i64, Box<dyn std::error::Error>> {
        Ok(SaveDb::archive_ended(self, snapshot)?)
    }

    fn save_continue(&mut self, snapshot: &Snapshot) -> Result<(), Box<dyn std::error::Error>> {
        Ok(SaveDb::save_continue(self, snapshot)?)
    }

    fn load_continue(&self) -> Result<Option<Snapshot>, Box<dyn std::error::Error>> {
        Ok(SaveDb::load_continue(self)?)
    }

    fn clear_continue(&mut self) -> Result<(), Box<dyn std::error::Error>> {
        Ok(SaveDb::clear_continue(self)?)
    }

    fn last_ended(&self) -> Result<Option<EndedGame>, Box<dyn std::error::Error>> {
        Ok(SaveDb::last_ended(self)?)
    }

    fn ended_games(&self) -> Result<Vec<EndedGame>, Box<dyn std::error::Error>> {
        Ok(SaveDb::ended_games(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulation::endgame::end_game;
    use crate::simulation::state::GameState;

    fn finished(seed: u64, ending: EndingKind, day: u32) -> Snapshot {
        let mut state = GameState::default();
        state.day = day;
        state.stats.flight_hours = 12.5;
        state.stats.money = 300.0;
        end_game(&mut state, ending);
        Snapshot::new(seed, state)
    }

    #[test]
    fn archives_in_insertion_order() {
        let mut db = SaveDb::open_in_memory().unwrap();
        db.archive_ended(&finished(1, EndingKind::Bankrupt, 30)).unwrap();
        db.archive_ended(&finished(2, EndingKind::Timeout, 101)).unwrap();

        let games = db.ended_games().unwrap();
        assert_eq!(games.len(), 2);
        assert_eq!(games[0].ending, EndingKind::Bankrupt);
        let last = db.last_ended().unwrap().unwrap();
        assert_eq!(last.seed, 2);
        assert_eq!(last.day, 101);
        assert_eq!(last.snapshot.state.ending_type, Some(EndingKind::Timeout));
    }

    #[test]
    fn unfinished_games_are_not_archived() {
        let mut db = SaveDb::open_in_memory().unwrap();
        let err = db
            .archive_ended(&Snapshot::new(1, GameState::default()))
            .unwrap_err();
        assert!(matches!(err, SaveDbError::InvalidData(_)));
        assert!(db.last_ended().unwrap().is_none());
    }

    #[test]
    fn continue_slot_holds_one_game() {
        let mut db = SaveDb::open_in_memory().unwrap();
        assert!(db.load_continue().unwrap().is_none());
        let mut state = GameState::default();
        state.day = 4;
        db.save_continue(&Snapshot::new(5, state.clone())).unwrap();
        state.day = 5;
        db.save_continue(&Snapshot::new(5, state)).unwrap();
        assert_eq!(db.load_continue().unwrap().unwrap().state.day, 5);

        db.archive_ended(&finished(5, EndingKind::Burnout, 6)).unwrap();
        assert!(db.load_continue().unwrap().is_none());
    }

    #[test]
    fn reopening_keeps_the_archive() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("saves.db");
        {
            let mut db = SaveDb::open(&path).unwrap();
            db.archive_ended(&finished(8, EndingKind::Success, 77)).unwrap();
        }
        let db = SaveDb::open(&path).unwrap();
        assert_eq!(db.ended_games().unwrap().len(), 1);
    }

    #[test]
    fn unknown_ending_in_the_archive_is_invalid_data() {
        let mut db = SaveDb::open_in_memory().unwrap();
        db.archive_ended(&finished(3, EndingKind::Bankrupt, 12)).unwrap();
        db.conn
            .execute("UPDATE ended_games SET ending = ?1", params!["crashed"])
            .unwrap();
        let err = db.last_ended().unwrap_err();
        assert!(matches!(err, SaveDbError::InvalidData(ref message) if message.contains("crashed")));
    }
}
