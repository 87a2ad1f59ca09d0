//! The always-available daily actions. These are distinct from catalog
//! events: they change stats directly and never touch the event history.

use std::fmt;
use std::str::FromStr;

use bevy_utils::tracing::{debug, info};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::EngineConfig;
use crate::data::interventions::{DUAL_INTERVENTIONS, SOLO_INTERVENTIONS};
use crate::rng::{rounded_normal, RandomSource};
use crate::simulation::costs::{self, FlightQuote};
use crate::simulation::endgame::{check_ending, end_game, EndingKind};
use crate::simulation::milestones::check_milestones;
use crate::simulation::state::{GameState, Milestone, StatDeltas, TrainingPhase};
use crate::simulation::weather::WeatherKind;

pub const FUEL_PRICE_FLAG: &str = "fuel_price_increased";
pub const EXTRA_DRIVING_FLAG: &str = "extra_driving";

const DUAL_INTERVENTION_FATIGUE: f64 = 80.0;
const SOLO_INTERVENTION_FATIGUE: f64 = 80.0;
const SOLO_INCIDENT_FATIGUE: f64 = 95.0;
const TIRED_FATIGUE: f64 = 60.0;
const XC_MIN_HOURS: f64 = 15.0;
const NIGHT_MIN_HOURS: f64 = 20.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    Study,
    Fly,
    FlyDual,
    FlySolo,
    FlyXcDual,
    FlyNightDual,
    Simulator,
    Rest,
}

impl Action {
    pub const ALL: [Action; 8] = [
        Action::Study,
        Action::Fly,
        Action::FlyDual,
        Action::FlySolo,
        Action::FlyXcDual,
        Action::FlyNightDual,
        Action::Simulator,
        Action::Rest,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Action::Study => "study",
            Action::Fly => "fly",
            Action::FlyDual => "fly_dual",
            Action::FlySolo => "fly_solo",
            Action::FlyXcDual => "fly_xc_dual",
            Action::FlyNightDual => "fly_night_dual",
            Action::Simulator => "simulator",
            Action::Rest => "rest",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Action::Study => "Study",
            Action::Fly => "Fly",
            Action::FlyDual => "Fly with CFI",
            Action::FlySolo => "Fly Solo",
            Action::FlyXcDual => "XC with CFI",
            Action::FlyNightDual => "Night with CFI",
            Action::Simulator => "Simulator",
            Action::Rest => "Rest",
        }
    }

    pub fn is_flight(self) -> bool {
        matches!(
            self,
            Action::Fly
                | Action::FlyDual
                | Action::FlySolo
                | Action::FlyXcDual
                | Action::FlyNightDual
        )
    }

    pub fn is_solo(self) -> bool {
        matches!(self, Action::FlySolo)
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Action {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Action::ALL
            .into_iter()
            .find(|action| action.as_str() == s)
            .ok_or_else(|| s.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ActionError {
    #[error("the game is over")]
    GameEnded,
    #[error("{action} costs ${cost:.0} but only ${available:.0} is left")]
    InsufficientFunds {
        action: Action,
        cost: f64,
        available: f64,
    },
    #[error("{action} is unavailable: {reason}")]
    Unavailable { action: Action, reason: String },
}

/// What one action did. An intervention means the flight was replaced by
/// the named catalog event, which the caller must present next.
#[derive(Debug, Clone, PartialEq)]
pub struct ActionResult {
    pub action: Action,
    pub message: String,
    pub deltas: StatDeltas,
    pub quote: Option<FlightQuote>,
    pub intervention: Option<String>,
    pub milestones: Vec<Milestone>,
    pub ending: Option<EndingKind>,
}

impl ActionResult {
    fn new(action: Action, message: String) -> Self {
        Self {
            action,
            message,
            deltas: StatDeltas::new(),
            quote: None,
            intervention: None,
            milestones: Vec::new(),
            ending: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ActionAvailability {
    pub action: Action,
    pub available: bool,
    pub reason: Option<String>,
    pub warning: Option<&'static str>,
}

/// Actions offered today, with the reason any of them is blocked.
pub fn available_actions(state: &GameState, config: &EngineConfig) -> Vec<ActionAvailability> {
    let offered: &[Action] = if state.milestones.first_solo {
        &[
            Action::Study,
            Action::FlyDual,
            Action::FlySolo,
            Action::FlyXcDual,
            Action::FlyNightDual,
            Action::Simulator,
            Action::Rest,
        ]
    } else {
        &[Action::Study, Action::Fly, Action::Simulator, Action::Rest]
    };

    offered
        .iter()
        .map(|&action| {
            let blocked = check_available(state, action, config).err();
            ActionAvailability {
                action,
                available: blocked.is_none(),
                reason: blocked.map(|err| err.to_string()),
                warning: fatigue_warning(state, action),
            }
        })
        .collect()
}

fn fatigue_warning(state: &GameState, action: Action) -> Option<&'static str> {
    let fatigue = state.stats.fatigue;
    match action {
        Action::FlySolo if fatigue > 90.0 => Some("Too fatigued for solo flight, extremely dangerous!"),
        Action::FlySolo if fatigue >= 70.0 || state.stats.safety < 70.0 => {
            Some("High risk conditions for solo flight")
        }
        _ if action.is_flight() && fatigue > DUAL_INTERVENTION_FATIGUE => {
            Some("Too fatigued, your CFI won't let you fly")
        }
        _ => None,
    }
}

fn unavailable(action: Action, reason: &str) -> ActionError {
    ActionError::Unavailable {
        action,
        reason: reason.to_string(),
    }
}

/// Hard preconditions that do not depend on a price quote.
fn check_available(state: &GameState, action: Action, config: &EngineConfig) -> Result<(), ActionError> {
    if state.game_ended {
        return Err(ActionError::GameEnded);
    }
    let weather = WeatherKind::for_day(state.day);
    if action.is_flight() && !weather.is_flyable() {
        return Err(unavailable(action, weather.name()));
    }
    let past_first_solo = state.phase >= TrainingPhase::SoloTraining;
    match action {
        Action::FlySolo if !state.milestones.first_solo => {
            Err(unavailable(action, "no solo endorsement yet"))
        }
        Action::FlyXcDual if state.stats.flight_hours < XC_MIN_HOURS || !past_first_solo => {
            Err(unavailable(action, "needs 15 hours and solo training"))
        }
        Action::FlyNightDual if state.stats.flight_hours < NIGHT_MIN_HOURS || !past_first_solo => {
            Err(unavailable(action, "needs 20 hours and solo training"))
        }
        Action::Simulator if weather.is_flyable() => {
            Err(unavailable(action, "the weather is flyable, go fly"))
        }
        Action::Study => require_funds(state, action, config.actions.study_cost),
        Action::Simulator => require_funds(state, action, config.actions.simulator_cost),
        _ => Ok(()),
    }
}

fn require_funds(state: &GameState, action: Action, cost: f64) -> Result<(), ActionError> {
    if state.stats.money < cost {
        return Err(ActionError::InsufficientFunds {
            action,
            cost,
            available: state.stats.money,
        });
    }
    Ok(())
}

/// Perform one action. Errors leave the state untouched; on success the
/// milestone and ending checks have already run.
pub fn perform_action(
    state: &mut GameState,
    action: Action,
    config: &EngineConfig,
    rng: &mut dyn RandomSource,
) -> Result<ActionResult, ActionError> {
    check_available(state, action, config)?;

    let mut result = match action {
        Action::Study => study(state, config, rng),
        Action::Simulator => simulator(state, config),
        Action::Rest => rest(state, config, rng),
        _ => fly(state, action, rng)?,
    };

    if result.ending.is_none() {
        result.milestones = check_milestones(state);
        result.ending = check_ending(state, config);
    }
    debug!(
        target: "ppl::actions",
        action = %action,
        day = state.day,
        intervention = ?result.intervention,
        "action performed"
    );
    Ok(result)
}

fn apply(state: &mut GameState, result: &mut ActionResult, deltas: StatDeltas) {
    result.deltas = state.apply_stat_deltas(&deltas);
}

fn study(state: &mut GameState, config: &EngineConfig, rng: &mut dyn RandomSource) -> ActionResult {
    state.last_action = Some(Action::Study);
    let cost = config.actions.study_cost;
    let z = rng.next_f64() * 2.0 - 1.0;
    let gain = (5.0 + z).round().clamp(3.0, 7.0);

    let mut deltas = StatDeltas::from([
        ("knowledge".to_string(), gain),
        ("money".to_string(), -cost),
        ("morale".to_string(), -2.0),
        ("fatigue".to_string(), 4.0),
    ]);

    let message = if state.stats.knowledge > 75.0 && rng.chance(config.actions.tutoring_chance) {
        deltas.insert("money".into(), 50.0 - cost);
        deltas.insert("morale".into(), 3.0);
        format!("You studied hard (+{gain} knowledge) and earned $50 tutoring another student!")
    } else {
        const TOPICS: [&str; 5] = [
            "regulations",
            "weather",
            "navigation",
            "aerodynamics",
            "weight & balance",
        ];
        let topic = TOPICS[rng.index(TOPICS.len())];
        format!("You studied {topic} using online materials. Knowledge +{gain}.")
    };

    let mut result = ActionResult::new(Action::Study, message);
    apply(state, &mut result, deltas);
    result
}

fn simulator(state: &mut GameState, config: &EngineConfig) -> ActionResult {
    state.last_action = Some(Action::Simulator);
    let deltas = StatDeltas::from([
        ("knowledge".to_string(), 10.0),
        ("safety".to_string(), 5.0),
        ("money".to_string(), -config.actions.simulator_cost),
        ("fatigue".to_string(), 8.0),
    ]);
    let mut result = ActionResult::new(
        Action::Simulator,
        "Good simulator session. Procedures are becoming second nature.".to_string(),
    );
    apply(state, &mut result, deltas);
    result
}

fn rest(state: &mut GameState, config: &EngineConfig, rng: &mut dyn RandomSource) -> ActionResult {
    state.last_action = Some(Action::Rest);
    let recovery = rounded_normal(rng, 18.0, 4.0, 10.0, 26.0);
    let morale = rng.range_inclusive(5, 12) as f64;
    let mut deltas = StatDeltas::from([
        ("morale".to_string(), morale),
        ("fatigue".to_string(), -recovery),
        ("safety".to_string(), 3.0),
    ]);

    let message = if rng.chance(config.actions.part_time_chance) {
        deltas.insert("money".into(), 120.0);
        deltas.insert("fatigue".into(), (-recovery * 0.7).floor());
        "You pick up a part-time shift at the FBO. Made money but less rest.".to_string()
    } else if recovery >= 14.0 {
        format!("Excellent rest! You feel completely refreshed. (Fatigue -{recovery})")
    } else {
        format!("Good rest. You feel better. (Fatigue -{recovery})")
    };

    let mut result = ActionResult::new(Action::Rest, message);
    apply(state, &mut result, deltas);
    result
}

fn quote_for(state: &GameState, action: Action, rng: &mut dyn RandomSource) -> FlightQuote {
    match action {
        Action::FlySolo => costs::solo_flight(rng),
        Action::FlyXcDual => costs::cross_country_dual(rng),
        Action::FlyNightDual => costs::night_dual(rng),
        _ => costs::dual_lesson(state.phase, rng),
    }
}

fn fly(
    state: &mut GameState,
    action: Action,
    rng: &mut dyn RandomSource,
) -> Result<ActionResult, ActionError> {
    let quote = quote_for(state, action, rng);
    let fuel_surcharge = state.has_decision(FUEL_PRICE_FLAG);
    let cost = quote.charged(fuel_surcharge);
    require_funds(state, action, cost)?;

    state.last_action = Some(action);
    let fatigue = state.stats.fatigue;

    if action.is_solo() {
        if fatigue >= SOLO_INCIDENT_FATIGUE {
            end_game(state, EndingKind::Exhausted);
            let mut result = ActionResult::new(
                action,
                "Exhaustion catches up with you on final. The incident report writes itself.".to_string(),
            );
            result.ending = Some(EndingKind::Exhausted);
            return Ok(result);
        }
        if fatigue >= SOLO_INTERVENTION_FATIGUE {
            return Ok(intervention(action, &SOLO_INTERVENTIONS, rng));
        }
    } else if fatigue >= DUAL_INTERVENTION_FATIGUE {
        return Ok(intervention(action, &DUAL_INTERVENTIONS, rng));
    }

    let tired = fatigue >= TIRED_FATIGUE;
    let mut safety: f64 = 8.0;
    let mut sloppy = false;
    if tired && fatigue < DUAL_INTERVENTION_FATIGUE {
        safety = 3.0;
        if rng.chance(0.3) {
            safety = -5.0;
            sloppy = true;
        }
    }

    let solo = action.is_solo();
    let knowledge = rng.range_inclusive(1, if solo { 2 } else { 3 }) as f64;
    let (safety, morale) = if solo {
        ((safety - 2.0).max(3.0), if tired { 10.0 } else { 20.0 })
    } else {
        (safety, if tired { 8.0 } else { 15.0 })
    };
    let fatigue_gain = if state.has_decision(EXTRA_DRIVING_FLAG) {
        23.0
    } else {
        15.0
    };

    let mut deltas = StatDeltas::from([
        ("flight_hours".to_string(), quote.hobbs),
        ("knowledge".to_string(), knowledge),
        ("safety".to_string(), safety),
        ("morale".to_string(), morale),
        ("money".to_string(), -cost),
        ("fatigue".to_string(), fatigue_gain),
    ]);
    match action {
        Action::FlyXcDual => {
            deltas.insert("xc_hours".into(), quote.hobbs);
        }
        Action::FlyNightDual => {
            deltas.insert("night_hours".into(), quote.hobbs);
        }
        _ => {}
    }

    let mut message = if solo {
        format!("Great solo flight! You logged {:.1} PIC hours. Aircraft rental ${cost:.0}.", quote.hobbs)
    } else {
        format!(
            "Great {}-hour lesson! You logged {:.1} flight hours. Total ${cost:.0} (aircraft ${:.0}, instructor ${:.0}).",
            quote.lesson_hours.max(quote.hobbs).round(),
            quote.hobbs,
            quote.aircraft,
            quote.cfi
        )
    };
    if sloppy {
        message.push_str(" You made some sloppy mistakes due to fatigue.");
    }
    if fuel_surcharge {
        message.push_str(" Includes the fuel surcharge.");
    }

    let mut result = ActionResult::new(action, message);
    result.quote = Some(quote);
    apply(state, &mut result, deltas);
    Ok(result)
}

fn intervention(action: Action, pool: &[&str], rng: &mut dyn RandomSource) -> ActionResult {
    let event_id = pool[rng.index(pool.len())];
    info!(target: "ppl::actions", action = %action, event = event_id, "fatigue intervention");
    let mut result = ActionResult::new(
        action,
        "You're too tired to fly safely, and it shows.".to_string(),
    );
    result.intervention = Some(event_id.to_string());
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::ScriptedRandom;
    use crate::simulation::state::Stats;

    fn student(fatigue: f64) -> GameState {
        GameState::with_stats(Stats {
            morale: 75.0,
            money: 18_000.0,
            fatigue,
            ..Stats::default()
        })
    }

    #[test]
    fn study_matches_worked_example() {
        let mut state = student(10.0);
        let mut rng = ScriptedRandom::new(vec![0.5, 0.0]);
        let result = perform_action(&mut state, Action::Study, &EngineConfig::default(), &mut rng).unwrap();
        assert_eq!(state.stats.knowledge, 5.0);
        assert_eq!(state.stats.money, 17_970.0);
        assert_eq!(state.stats.fatigue, 14.0);
        assert_eq!(state.stats.morale, 73.0);
        assert!(state.event_history.is_empty());
        assert_eq!(state.last_action, Some(Action::Study));
        assert_eq!(result.deltas.get("knowledge"), Some(&5.0));
    }

    #[test]
    fn study_without_funds_changes_nothing() {
        let mut state = student(10.0);
        state.stats.money = 20.0;
        let before = state.clone();
        let err = perform_action(
            &mut state,
            Action::Study,
            &EngineConfig::default(),
            &mut ScriptedRandom::constant(0.5),
        )
        .unwrap_err();
        assert!(matches!(err, ActionError::InsufficientFunds { .. }));
        assert_eq!(state, before);
    }

    #[test]
    fn flights_need_flyable_weather() {
        let mut state = student(10.0);
        state.day = 5;
        let err = perform_action(
            &mut state,
            Action::Fly,
            &EngineConfig::default(),
            &mut ScriptedRandom::constant(0.5),
        )
        .unwrap_err();
        assert!(matches!(err, ActionError::Unavailable { .. }));
    }

    #[test]
    fn dual_lesson_logs_hobbs_time() {
        let mut state = student(10.0);
        // Draws alternate so every Box-Muller sample lands on its mean.
        let mut rng = ScriptedRandom::new(vec![0.5, 0.25]);
        let result = perform_action(&mut state, Action::Fly, &EngineConfig::default(), &mut rng).unwrap();
        let quote = result.quote.unwrap();
        assert_eq!(state.stats.flight_hours, 1.2);
        assert_eq!(state.stats.money, 18_000.0 - quote.total);
        assert_eq!(state.stats.safety, 8.0);
        assert_eq!(state.stats.fatigue, 25.0);
        assert_eq!(state.last_action, Some(Action::Fly));
    }

    #[test]
    fn decision_flags_change_flight_costs_and_fatigue() {
        let mut state = student(10.0);
        state
            .decision_flags
            .insert(FUEL_PRICE_FLAG.into(), serde_json::Value::Bool(true));
        state
            .decision_flags
            .insert(EXTRA_DRIVING_FLAG.into(), serde_json::Value::Bool(true));
        let mut rng = ScriptedRandom::new(vec![0.5, 0.25]);
        let result = perform_action(&mut state, Action::Fly, &EngineConfig::default(), &mut rng).unwrap();
        let quote = result.quote.unwrap();
        assert_eq!(state.stats.money, 18_000.0 - quote.charged(true));
        assert_eq!(state.stats.fatigue, 33.0);
    }

    #[test]
    fn tired_dual_flight_becomes_intervention() {
        let mut state = student(85.0);
        let money = state.stats.money;
        let result = perform_action(
            &mut state,
            Action::Fly,
            &EngineConfig::default(),
            &mut ScriptedRandom::constant(0.5),
        )
        .unwrap();
        let event = result.intervention.unwrap();
        assert!(DUAL_INTERVENTIONS.contains(&event.as_str()));
        assert_eq!(state.stats.money, money);
        assert_eq!(state.stats.flight_hours, 0.0);
    }

    #[test]
    fn exhausted_solo_ends_the_game() {
        let mut state = student(96.0);
        state.milestones.first_solo = true;
        state.phase = TrainingPhase::SoloTraining;
        let result = perform_action(
            &mut state,
            Action::FlySolo,
            &EngineConfig::default(),
            &mut ScriptedRandom::constant(0.5),
        )
        .unwrap();
        assert_eq!(result.ending, Some(EndingKind::Exhausted));
        assert!(state.game_ended);
    }

    #[test]
    fn tired_solo_keeps_a_safety_floor() {
        let mut state = student(70.0);
        state.stats.safety = 50.0;
        state.milestones.first_solo = true;
        state.phase = TrainingPhase::SoloTraining;
        // Four quote draws, a 0.5 that misses the sloppy roll, then knowledge.
        let mut rng = ScriptedRandom::new(vec![0.5, 0.25]);
        let result = perform_action(&mut state, Action::FlySolo, &EngineConfig::default(), &mut rng).unwrap();
        assert_eq!(result.deltas.get("safety"), Some(&3.0));
        assert_eq!(state.stats.safety, 53.0);
        assert_eq!(state.stats.morale, 85.0);
        assert_eq!(state.stats.fatigue, 85.0);
        assert_eq!(state.stats.knowledge, 1.0);
        assert_eq!(state.stats.flight_hours, 1.2);
    }

    #[test]
    fn solo_requires_endorsement() {
        let mut state = student(10.0);
        let err = perform_action(
            &mut state,
            Action::FlySolo,
            &EngineConfig::default(),
            &mut ScriptedRandom::constant(0.5),
        )
        .unwrap_err();
        assert!(matches!(err, ActionError::Unavailable { .. }));
    }

    #[test]
    fn simulator_only_on_grounded_days() {
        let mut state = student(10.0);
        let config = EngineConfig::default();
        assert!(perform_action(&mut state, Action::Simulator, &config, &mut ScriptedRandom::constant(0.5)).is_err());
        state.day = 7;
        perform_action(&mut state, Action::Simulator, &config, &mut ScriptedRandom::constant(0.5)).unwrap();
        assert_eq!(state.stats.knowledge, 10.0);
        assert_eq!(state.stats.money, 17_925.0);
    }

    #[test]
    fn rest_recovers_fatigue() {
        let mut state = student(50.0);
        // 0.5/0.25 gives an 18 point recovery; 0.99 skips the shift roll.
        let mut rng = ScriptedRandom::new(vec![0.5, 0.25, 0.5, 0.99]);
        perform_action(&mut state, Action::Rest, &EngineConfig::default(), &mut rng).unwrap();
        assert_eq!(state.stats.fatigue, 32.0);
        assert_eq!(state.stats.safety, 3.0);
    }

    #[test]
    fn offered_actions_follow_progress() {
        let mut state = student(10.0);
        let config = EngineConfig::default();
        let offered: Vec<Action> = available_actions(&state, &config)
            .into_iter()
            .map(|entry| entry.action)
            .collect();
        assert!(offered.contains(&Action::Fly));
        assert!(!offered.contains(&Action::FlySolo));

        state.milestones.first_solo = true;
        let solo = available_actions(&state, &config)
            .into_iter()
            .find(|entry| entry.action == Action::FlySolo)
            .unwrap();
        assert!(solo.available);
    }
}
