pub mod context;
pub mod ecs;
pub mod session;
pub mod snapshot;

pub use context::EngineContext;
pub use ecs::{create_schedule, create_world, DaySet};
pub use session::{ChoiceReport, DayTurn, Session, SessionError, TurnReport};
pub use snapshot::{deserialize_state, serialize_state, Snapshot, SnapshotError};
