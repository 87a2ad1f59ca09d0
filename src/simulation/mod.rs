pub mod actions;
pub mod chains;
pub mod costs;
pub mod eligibility;
pub mod endgame;
pub mod milestones;
pub mod resolver;
pub mod selector;
pub mod state;
pub mod time;
pub mod weather;

pub use actions::{perform_action, Action, ActionAvailability, ActionError, ActionResult};
pub use chains::ChainError;
pub use eligibility::eligible_events;
pub use endgame::{check_ending, evaluate_ending, EndingKind};
pub use resolver::{resolve_choice, resolve_event, Resolution, ResolveError};
pub use selector::{pick_daily_event, select_weighted};
pub use state::{GameState, Milestone, Stat, Stats, TrainingPhase};
pub use time::{advance_day, apply_daily_drain, DayReport};
pub use weather::WeatherKind;
