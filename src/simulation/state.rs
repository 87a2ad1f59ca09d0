use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use bevy_ecs::prelude::*;
use bevy_utils::tracing::{debug, warn};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::config::EngineConfig;
use crate::rng::RandomSource;
use crate::simulation::actions::Action;
use crate::simulation::endgame::EndingKind;

/// Stat deltas keyed by stat name. Keys are strings so that content may
/// reference stats this build does not know about.
pub type StatDeltas = BTreeMap<String, f64>;

/// Free-form payload attached to chains, decisions and decision flags.
pub type ChainPayload = serde_json::Map<String, Value>;

pub const REPUTATION_FACTIONS: [&str; 5] = ["cfi", "atc", "fbo", "peers", "safety"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Stat {
    Morale,
    Knowledge,
    Safety,
    Fatigue,
    Money,
    FlightHours,
    XcHours,
    NightHours,
}

impl Stat {
    pub const ALL: [Stat; 8] = [
        Stat::Morale,
        Stat::Knowledge,
        Stat::Safety,
        Stat::Fatigue,
        Stat::Money,
        Stat::FlightHours,
        Stat::XcHours,
        Stat::NightHours,
    ];

    /// Percentage-like stats are clamped to `[0, 100]`; the rest only to `>= 0`.
    pub fn is_percentage(self) -> bool {
        matches!(
            self,
            Stat::Morale | Stat::Knowledge | Stat::Safety | Stat::Fatigue
        )
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Stat::Morale => "morale",
            Stat::Knowledge => "knowledge",
            Stat::Safety => "safety",
            Stat::Fatigue => "fatigue",
            Stat::Money => "money",
            Stat::FlightHours => "flight_hours",
            Stat::XcHours => "xc_hours",
            Stat::NightHours => "night_hours",
        }
    }
}

impl fmt::Display for Stat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownStat(pub String);

impl FromStr for Stat {
    type Err = UnknownStat;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "morale" => Ok(Stat::Morale),
            "knowledge" => Ok(Stat::Knowledge),
            "safety" => Ok(Stat::Safety),
            "fatigue" => Ok(Stat::Fatigue),
            "money" => Ok(Stat::Money),
            "flight_hours" | "flightHours" => Ok(Stat::FlightHours),
            "xc_hours" | "xcHours" => Ok(Stat::XcHours),
            "night_hours" | "nightHours" => Ok(Stat::NightHours),
            _ => Err(UnknownStat(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Stats {
    pub morale: f64,
    pub knowledge: f64,
    pub safety: f64,
    pub fatigue: f64,
    pub money: f64,
    pub flight_hours: f64,
    #[serde(default)]
    pub xc_hours: f64,
    #[serde(default)]
    pub night_hours: f64,
}

impl Stats {
    pub fn get(&self, stat: Stat) -> f64 {
        match stat {
            Stat::Morale => self.morale,
            Stat::Knowledge => self.knowledge,
            Stat::Safety => self.safety,
            Stat::Fatigue => self.fatigue,
            Stat::Money => self.money,
            Stat::FlightHours => self.flight_hours,
            Stat::XcHours => self.xc_hours,
            Stat::NightHours => self.night_hours,
        }
    }

    fn slot(&mut self, stat: Stat) -> &mut f64 {
        match stat {
            Stat::Morale => &mut self.morale,
            Stat::Knowledge => &mut self.knowledge,
            Stat::Safety => &mut self.safety,
            Stat::Fatigue => &mut self.fatigue,
            Stat::Money => &mut self.money,
            Stat::FlightHours => &mut self.flight_hours,
            Stat::XcHours => &mut self.xc_hours,
            Stat::NightHours => &mut self.night_hours,
        }
    }

    /// Apply a delta with the stat's clamp and return the change that stuck.
    pub fn apply(&mut self, stat: Stat, delta: f64) -> f64 {
        let slot = self.slot(stat);
        let before = *slot;
        let raw = before + delta;
        *slot = if stat.is_percentage() {
            raw.clamp(0.0, 100.0)
        } else {
            raw.max(0.0)
        };
        *slot - before
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Milestone {
    GroundSchool,
    PreSoloWrittenPassed,
    SoloEndorsement,
    FirstSolo,
    CrossCountry,
    CheckrideEndorsement,
    CheckridePassed,
}

impl Milestone {
    pub fn as_str(self) -> &'static str {
        match self {
            Milestone::GroundSchool => "ground_school",
            Milestone::PreSoloWrittenPassed => "pre_solo_written_passed",
            Milestone::SoloEndorsement => "solo_endorsement",
            Milestone::FirstSolo => "first_solo",
            Milestone::CrossCountry => "cross_country",
            Milestone::CheckrideEndorsement => "checkride_endorsement",
            Milestone::CheckridePassed => "checkride_passed",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Milestone::GroundSchool => "Ground School Complete!",
            Milestone::PreSoloWrittenPassed => "Pre-Solo Written Passed!",
            Milestone::SoloEndorsement => "Solo Endorsement!",
            Milestone::FirstSolo => "FIRST SOLO!",
            Milestone::CrossCountry => "Cross-Country Phase!",
            Milestone::CheckrideEndorsement => "Checkride Endorsement!",
            Milestone::CheckridePassed => "Private Pilot Checkride Passed!",
        }
    }
}

impl FromStr for Milestone {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ground_school" => Ok(Milestone::GroundSchool),
            "pre_solo_written_passed" => Ok(Milestone::PreSoloWrittenPassed),
            "solo_endorsement" => Ok(Milestone::SoloEndorsement),
            "first_solo" => Ok(Milestone::FirstSolo),
            "cross_country" => Ok(Milestone::CrossCountry),
            "checkride_endorsement" => Ok(Milestone::CheckrideEndorsement),
            "checkride_passed" => Ok(Milestone::CheckridePassed),
            _ => Err(s.to_string()),
        }
    }
}

/// One-way latches marking curriculum progress.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Milestones {
    pub ground_school: bool,
    pub pre_solo_written_passed: bool,
    pub solo_endorsement: bool,
    pub first_solo: bool,
    pub cross_country: bool,
    pub checkride_endorsement: bool,
    pub checkride_passed: bool,
}

impl Milestones {
    pub fn is_set(&self, milestone: Milestone) -> bool {
        match milestone {
            Milestone::GroundSchool => self.ground_school,
            Milestone::PreSoloWrittenPassed => self.pre_solo_written_passed,
            Milestone::SoloEndorsement => self.solo_endorsement,
            Milestone::FirstSolo => self.first_solo,
            Milestone::CrossCountry => self.cross_country,
            Milestone::CheckrideEndorsement => self.checkride_endorsement,
            Milestone::CheckridePassed => self.checkride_passed,
        }
    }

    /// Set the latch. Returns true only when it was previously unset.
    pub fn latch(&mut self, milestone: Milestone) -> bool {
        let slot = match milestone {
            Milestone::GroundSchool => &mut self.ground_school,
            Milestone::PreSoloWrittenPassed => &mut self.pre_solo_written_passed,
            Milestone::SoloEndorsement => &mut self.solo_endorsement,
            Milestone::FirstSolo => &mut self.first_solo,
            Milestone::CrossCountry => &mut self.cross_country,
            Milestone::CheckrideEndorsement => &mut self.checkride_endorsement,
            Milestone::CheckridePassed => &mut self.checkride_passed,
        };
        let newly_set = !*slot;
        *slot = true;
        newly_set
    }
}

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum TrainingPhase {
    #[default]
    GroundSchool,
    PreSolo,
    SoloTraining,
    CrossCountry,
    CheckridePrep,
}

impl TrainingPhase {
    pub fn as_str(self) -> &'static str {
        match self {
            TrainingPhase::GroundSchool => "ground_school",
            TrainingPhase::PreSolo => "pre_solo",
            TrainingPhase::SoloTraining => "solo_training",
            TrainingPhase::CrossCountry => "cross_country",
            TrainingPhase::CheckridePrep => "checkride_prep",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            TrainingPhase::GroundSchool => "Ground School",
            TrainingPhase::PreSolo => "Pre-Solo",
            TrainingPhase::SoloTraining => "Solo Training",
            TrainingPhase::CrossCountry => "Cross-Country",
            TrainingPhase::CheckridePrep => "Checkride Prep",
        }
    }
}

impl FromStr for TrainingPhase {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ground_school" => Ok(TrainingPhase::GroundSchool),
            "pre_solo" => Ok(TrainingPhase::PreSolo),
            "solo_training" => Ok(TrainingPhase::SoloTraining),
            "cross_country" => Ok(TrainingPhase::CrossCountry),
            "checkride_prep" => Ok(TrainingPhase::CheckridePrep),
            _ => Err(s.to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub event_id: String,
    pub day: u32,
    pub choice_index: usize,
    #[serde(default)]
    pub memorable: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DecisionRecord {
    pub day: u32,
    #[serde(default)]
    pub data: ChainPayload,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActiveChain {
    pub start_day: u32,
    pub phase: String,
    #[serde(default)]
    pub payload: ChainPayload,
}

impl ActiveChain {
    pub fn age(&self, day: u32) -> u32 {
        day.saturating_sub(self.start_day)
    }
}

/// The single mutable aggregate for one game session.
#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    pub day: u32,
    #[serde(default)]
    pub phase: TrainingPhase,
    pub stats: Stats,
    #[serde(default)]
    pub milestones: Milestones,
    #[serde(default)]
    pub reputation: BTreeMap<String, i64>,
    /// Append-only audit log; source of truth for frequency and recency.
    #[serde(default)]
    pub event_history: Vec<HistoryEntry>,
    /// Per-id count cache, kept in lockstep with `event_history`.
    #[serde(default)]
    pub event_occurrences: BTreeMap<String, u32>,
    #[serde(default)]
    pub decision_history: BTreeMap<String, DecisionRecord>,
    /// Persistent effects recorded by options that start no chain.
    #[serde(default)]
    pub decision_flags: ChainPayload,
    #[serde(default)]
    pub active_chains: BTreeMap<String, ActiveChain>,
    #[serde(default)]
    pub last_action: Option<Action>,
    #[serde(default)]
    pub last_event_day: u32,
    #[serde(default)]
    pub last_drain_day: u32,
    #[serde(default)]
    pub game_ended: bool,
    #[serde(default)]
    pub ending_type: Option<EndingKind>,
}

impl Default for GameState {
    fn default() -> Self {
        Self::with_stats(Stats::default())
    }
}

impl GameState {
    pub fn with_stats(stats: Stats) -> Self {
        Self {
            day: 1,
            phase: TrainingPhase::GroundSchool,
            stats,
            milestones: Milestones::default(),
            reputation: REPUTATION_FACTIONS
                .iter()
                .map(|faction| (faction.to_string(), 0))
                .collect(),
            event_history: Vec::new(),
            event_occurrences: BTreeMap::new(),
            decision_history: BTreeMap::new(),
            decision_flags: ChainPayload::new(),
            active_chains: BTreeMap::new(),
            last_action: None,
            last_event_day: 0,
            last_drain_day: 0,
            game_ended: false,
            ending_type: None,
        }
    }

    /// Fresh game with randomized starting morale, money and fatigue.
    pub fn new_game(config: &EngineConfig, rng: &mut dyn RandomSource) -> Self {
        let initial = &config.initial;
        let stats = Stats {
            morale: rng.range_inclusive(initial.morale.0, initial.morale.1) as f64,
            money: rng.range_inclusive(initial.money.0, initial.money.1) as f64,
            fatigue: rng.range_inclusive(initial.fatigue.0, initial.fatigue.1) as f64,
            ..Stats::default()
        };
        Self::with_stats(stats)
    }

    /// Apply one named delta. Unknown names are ignored and non-finite
    /// deltas are skipped; both return `None`.
    pub fn apply_stat_delta(&mut self, key: &str, delta: f64) -> Option<(Stat, f64)> {
        let stat = match key.parse::<Stat>() {
            Ok(stat) => stat,
            Err(_) => {
                debug!(target: "ppl::state", stat = key, "ignoring unknown stat key");
                return None;
            }
        };
        if !delta.is_finite() {
            warn!(target: "ppl::state", stat = key, delta, "skipping malformed stat delta");
            return None;
        }
        Some((stat, self.stats.apply(stat, delta)))
    }

    /// Apply a whole delta map and return what actually changed.
    pub fn apply_stat_deltas(&mut self, deltas: &StatDeltas) -> StatDeltas {
        let mut applied = StatDeltas::new();
        for (key, delta) in deltas {
            if let Some((stat, actual)) = self.apply_stat_delta(key, *delta) {
                *applied.entry(stat.as_str().to_string()).or_insert(0.0) += actual;
            }
        }
        applied
    }

    /// Reputation is unbounded; factions outside the tracked set are ignored.
    pub fn apply_reputation(&mut self, deltas: &BTreeMap<String, i64>) -> BTreeMap<String, i64> {
        let mut applied = BTreeMap::new();
        for (faction, delta) in deltas {
            match self.reputation.get_mut(faction) {
                Some(value) => {
                    *value += delta;
                    applied.insert(faction.clone(), *delta);
                }
                None => {
                    debug!(target: "ppl::state", faction = %faction, "ignoring unknown reputation faction");
                }
            }
        }
        applied
    }

    pub fn occurrences(&self, event_id: &str) -> u32 {
        self.event_occurrences.get(event_id).copied().unwrap_or(0)
    }

    /// Day of the most recent firing of `event_id`, if any.
    pub fn last_fired(&self, event_id: &str) -> Option<u32> {
        self.event_history
            .iter()
            .rev()
            .find(|entry| entry.event_id == event_id)
            .map(|entry| entry.day)
    }

    /// Append to the history and bump the occurrence cache together.
    pub fn record_event(&mut self, event_id: &str, choice_index: usize, memorable: bool) {
        self.event_history.push(HistoryEntry {
            event_id: event_id.to_string(),
            day: self.day,
            choice_index,
            memorable,
        });
        *self
            .event_occurrences
            .entry(event_id.to_string())
            .or_insert(0) += 1;
        self.last_event_day = self.day;
    }

    pub fn is_chain_active(&self, chain_id: &str) -> bool {
        self.active_chains.contains_key(chain_id)
    }

    /// Truthy decision flag, or a recorded decision under that key.
    pub fn has_decision(&self, key: &str) -> bool {
        if self.decision_history.contains_key(key) {
            return true;
        }
        match self.decision_flags.get(key) {
            Some(Value::Bool(flag)) => *flag,
            Some(Value::Null) | None => false,
            Some(Value::Number(n)) => n.as_f64().map(|v| v != 0.0).unwrap_or(false),
            Some(Value::String(s)) => !s.is_empty(),
            Some(_) => true,
        }
    }

    pub fn days_since_decision(&self, key: &str) -> Option<u32> {
        self.decision_history
            .get(key)
            .map(|record| self.day.saturating_sub(record.day))
    }

    pub fn reputation_of(&self, faction: &str) -> i64 {
        self.reputation.get(faction).copied().unwrap_or(0)
    }
}
