use std::fmt;
use std::str::FromStr;

use bevy_utils::tracing::info;
use serde::{Deserialize, Serialize};

use crate::config::EngineConfig;
use crate::simulation::state::GameState;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EndingKind {
    Success,
    Bankrupt,
    Burnout,
    Exhausted,
    SafetyViolation,
    Timeout,
}

impl EndingKind {
    pub const ALL: [EndingKind; 6] = [
        EndingKind::Success,
        EndingKind::Bankrupt,
        EndingKind::Burnout,
        EndingKind::Exhausted,
        EndingKind::SafetyViolation,
        EndingKind::Timeout,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            EndingKind::Success => "success",
            EndingKind::Bankrupt => "bankrupt",
            EndingKind::Burnout => "burnout",
            EndingKind::Exhausted => "exhausted",
            EndingKind::SafetyViolation => "safety_violation",
            EndingKind::Timeout => "timeout",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            EndingKind::Success => "Private Pilot Certificate",
            EndingKind::Bankrupt => "Financial Ruin",
            EndingKind::Burnout => "Complete Exhaustion",
            EndingKind::Exhausted => "Fatigue-Related Incident",
            EndingKind::SafetyViolation => "Certificate Action",
            EndingKind::Timeout => "Out of Time",
        }
    }

    pub fn subtitle(self) -> &'static str {
        match self {
            EndingKind::Success => "Dreams take flight.",
            EndingKind::Bankrupt => "Empty pockets, fuller dreams.",
            EndingKind::Burnout => "Dreams too heavy to carry.",
            EndingKind::Exhausted => "When exhaustion takes control.",
            EndingKind::SafetyViolation => "The FAA would like a word.",
            EndingKind::Timeout => "The training window closed.",
        }
    }

    pub fn is_success(self) -> bool {
        matches!(self, EndingKind::Success)
    }
}

impl fmt::Display for EndingKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EndingKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EndingKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| s.to_string())
    }
}

/// Terminal check in fixed precedence: success first, then bankrupt,
/// burnout, exhausted, safety violation, timeout.
pub fn evaluate_ending(state: &GameState, config: &EngineConfig) -> Option<EndingKind> {
    if evaluate_success(state, config) {
        return Some(EndingKind::Success);
    }
    if state.stats.money <= config.endings.bankrupt_money {
        return Some(EndingKind::Bankrupt);
    }
    if state.stats.morale <= 0.0 {
        return Some(EndingKind::Burnout);
    }
    if state.stats.fatigue >= config.endings.exhausted_fatigue {
        return Some(EndingKind::Exhausted);
    }
    if state.milestones.first_solo && state.stats.safety <= 0.0 {
        return Some(EndingKind::SafetyViolation);
    }
    if state.day > config.max_days {
        return Some(EndingKind::Timeout);
    }
    None
}

fn evaluate_success(state: &GameState, config: &EngineConfig) -> bool {
    let thresholds = &config.endings;
    state.stats.flight_hours >= thresholds.success_flight_hours
        && state.stats.knowledge >= thresholds.success_knowledge
        && state.stats.safety >= thresholds.success_safety
}

/// Mark the game over. The first ending recorded wins.
pub fn end_game(state: &mut GameState, kind: EndingKind) {
    if state.game_ended {
        return;
    }
    state.game_ended = true;
    state.ending_type = Some(kind);
    info!(target: "ppl::endgame", ending = %kind, day = state.day, "game ended");
}

/// Evaluate and apply. Returns the ending in force, whether new or earlier.
pub fn check_ending(state: &mut GameState, config: &EngineConfig) -> Option<EndingKind> {
    if state.game_ended {
        return state.ending_type;
    }
    let kind = evaluate_ending(state, config)?;
    end_game(state, kind);
    Some(kind)
}
