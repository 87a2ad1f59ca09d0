//! Choice resolution. A resolution is applied to a working copy of the state
//! and committed in one assignment, so a fault part way through leaves the
//! caller's state untouched.

use std::collections::BTreeMap;

use bevy_utils::tracing::{debug, error, info, warn};
use thiserror::Error;

use crate::core::context::EngineContext;
use crate::data::catalog::{EventDefinition, EventOption, Impact};
use crate::rng::RandomSource;
use crate::simulation::chains::{advance_chain, end_chain, start_chain};
use crate::simulation::eligibility::is_eligible;
use crate::simulation::endgame::{check_ending, end_game, EndingKind};
use crate::simulation::milestones::check_milestones;
use crate::simulation::state::{GameState, Milestone, StatDeltas};

pub const NEUTRAL_OUTCOME: &str = "Nothing happens.";

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ResolveError {
    #[error("event {event_id} has {available} options, index {index} is out of range")]
    InvalidChoiceIndex {
        event_id: String,
        index: usize,
        available: usize,
    },
    #[error("no event {0} is available")]
    UnknownEvent(String),
    #[error("event {0} cannot fire right now")]
    NotEligible(String),
    #[error("the game has already ended")]
    GameEnded,
    #[error("resolution fault: {0}")]
    Fault(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Resolution {
    pub event_id: String,
    pub choice_index: usize,
    pub outcome: String,
    /// Stat changes that actually stuck after clamping.
    pub stat_deltas: StatDeltas,
    pub reputation_deltas: BTreeMap<String, i64>,
    pub milestones: Vec<Milestone>,
    pub ending: Option<EndingKind>,
    /// Set when an internal fault rolled the turn back.
    pub faulted: bool,
}

impl Resolution {
    fn neutral(event_id: &str, choice_index: usize) -> Self {
        Self {
            event_id: event_id.to_string(),
            choice_index,
            outcome: NEUTRAL_OUTCOME.to_string(),
            stat_deltas: StatDeltas::new(),
            reputation_deltas: BTreeMap::new(),
            milestones: Vec::new(),
            ending: None,
            faulted: true,
        }
    }
}

/// Resolve a choice on the event with `event_id`, looked up in the catalog or
/// among the follow-ups the active chains currently generate. The event must
/// pass the same eligibility rules the daily draw applies.
pub fn resolve_choice(
    ctx: &EngineContext,
    state: &mut GameState,
    event_id: &str,
    choice_index: usize,
    rng: &mut dyn RandomSource,
) -> Result<Resolution, ResolveError> {
    if state.game_ended {
        return Err(ResolveError::GameEnded);
    }
    let event = ctx
        .find_event(state, event_id)
        .ok_or_else(|| ResolveError::UnknownEvent(event_id.to_string()))?
        .into_owned();
    if !is_eligible(&event, state, &ctx.config) {
        debug!(target: "ppl::resolver", event = %event.id, day = state.day, "event not eligible");
        return Err(ResolveError::NotEligible(event.id));
    }
    resolve_event(ctx, state, &event, choice_index, rng)
}

/// Resolve a choice on an event the caller already holds.
pub fn resolve_event(
    ctx: &EngineContext,
    state: &mut GameState,
    event: &EventDefinition,
    choice_index: usize,
    rng: &mut dyn RandomSource,
) -> Result<Resolution, ResolveError> {
    if state.game_ended {
        return Err(ResolveError::GameEnded);
    }
    let option = event
        .options
        .get(choice_index)
        .ok_or_else(|| ResolveError::InvalidChoiceIndex {
            event_id: event.id.clone(),
            index: choice_index,
            available: event.options.len(),
        })?;

    let mut working = state.clone();
    match apply_option(ctx, &mut working, event, option, choice_index, rng) {
        Ok(resolution) => {
            *state = working;
            Ok(resolution)
        }
        Err(ResolveError::Fault(reason)) => {
            error!(
                target: "ppl::resolver",
                event = %event.id,
                choice = choice_index,
                reason = %reason,
                "resolution rolled back"
            );
            Ok(Resolution::neutral(&event.id, choice_index))
        }
        Err(err) => Err(err),
    }
}

fn apply_option(
    ctx: &EngineContext,
    working: &mut GameState,
    event: &EventDefinition,
    option: &EventOption,
    choice_index: usize,
    rng: &mut dyn RandomSource,
) -> Result<Resolution, ResolveError> {
    let deltas = resolve_impact(event, option, working, rng);
    let stat_deltas = working.apply_stat_deltas(&deltas);
    let reputation_deltas = working.apply_reputation(&option.reputation);

    let outcome = option.outcome.render(working);

    apply_chain_effects(ctx, working, event, option)?;

    if let Some(kind) = option.trigger_ending {
        if kind.is_success() {
            working.milestones.latch(Milestone::CheckridePassed);
        }
        end_game(working, kind);
        info!(target: "ppl::resolver", event = %event.id, ending = %kind, "ending triggered by choice");
        return Ok(Resolution {
            event_id: event.id.clone(),
            choice_index,
            outcome,
            stat_deltas,
            reputation_deltas,
            milestones: Vec::new(),
            ending: Some(kind),
            faulted: false,
        });
    }

    working.record_event(&event.id, choice_index, event.memorable);
    let milestones = check_milestones(working);
    let ending = check_ending(working, &ctx.config);
    debug!(
        target: "ppl::resolver",
        event = %event.id,
        choice = choice_index,
        day = working.day,
        "choice resolved"
    );

    Ok(Resolution {
        event_id: event.id.clone(),
        choice_index,
        outcome,
        stat_deltas,
        reputation_deltas,
        milestones,
        ending,
        faulted: false,
    })
}

/// A computed impact that fails contributes nothing; the rest of the option
/// still applies.
fn resolve_impact(
    event: &EventDefinition,
    option: &EventOption,
    state: &GameState,
    rng: &mut dyn RandomSource,
) -> StatDeltas {
    match &option.impact {
        Impact::Static(deltas) => deltas.clone(),
        Impact::Computed(compute) => match compute(state, rng) {
            Ok(deltas) => deltas,
            Err(err) => {
                warn!(
                    target: "ppl::resolver",
                    event = %event.id,
                    error = %err,
                    "malformed impact skipped"
                );
                StatDeltas::new()
            }
        },
    }
}

fn apply_chain_effects(
    ctx: &EngineContext,
    working: &mut GameState,
    event: &EventDefinition,
    option: &EventOption,
) -> Result<(), ResolveError> {
    let data = option.chain_data.clone().unwrap_or_default();

    if let Some(chain_id) = &option.chain_start {
        start_chain(working, chain_id, data);
    } else if !data.is_empty() {
        // Data stays with the linked chain while it runs; otherwise it
        // becomes a lasting decision flag.
        match event.chain_link.as_deref() {
            Some(chain_id) if !option.end_chain && working.is_chain_active(chain_id) => {
                if let Some(active) = working.active_chains.get_mut(chain_id) {
                    active.payload.extend(data);
                }
            }
            _ => working.decision_flags.extend(data),
        }
    }

    if let Some(phase) = &option.next_phase {
        let chain_id = event.chain_link.as_deref().ok_or_else(|| {
            ResolveError::Fault(format!("{} moves to phase {phase} without a chain", event.id))
        })?;
        advance_chain(working, &ctx.chains, chain_id, phase)
            .map_err(|err| ResolveError::Fault(err.to_string()))?;
    }

    if option.end_chain {
        match event.chain_link.as_deref() {
            Some(chain_id) => {
                end_chain(working, chain_id);
            }
            None => {
                debug!(target: "ppl::resolver", event = %event.id, "end_chain without a linked chain");
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::catalog::{EventCategory, ImpactError};
    use crate::rng::ScriptedRandom;
    use crate::simulation::actions::Action;
    use crate::simulation::state::Stats;
    use serde_json::json;

    fn ctx() -> EngineContext {
        EngineContext::builtin().unwrap()
    }

    fn player() -> GameState {
        let mut state = GameState::with_stats(Stats {
            morale: 75.0,
            money: 18_000.0,
            fatigue: 10.0,
            ..Stats::default()
        });
        state.day = 12;
        state
    }

    fn rng() -> ScriptedRandom {
        ScriptedRandom::constant(0.5)
    }

    #[test]
    fn invalid_index_is_rejected_without_change() {
        let ctx = ctx();
        let mut state = player();
        let before = state.clone();
        let err = resolve_choice(&ctx, &mut state, "ppl_coin_intro", 7, &mut rng()).unwrap_err();
        assert_eq!(
            err,
            ResolveError::InvalidChoiceIndex {
                event_id: "ppl_coin_intro".into(),
                index: 7,
                available: 3,
            }
        );
        assert_eq!(state, before);
    }

    #[test]
    fn unknown_and_ended_are_rejected() {
        let ctx = ctx();
        let mut state = player();
        assert_eq!(
            resolve_choice(&ctx, &mut state, "no_such_event", 0, &mut rng()).unwrap_err(),
            ResolveError::UnknownEvent("no_such_event".into())
        );
        end_game(&mut state, EndingKind::Burnout);
        assert_eq!(
            resolve_choice(&ctx, &mut state, "ppl_coin_intro", 0, &mut rng()).unwrap_err(),
            ResolveError::GameEnded
        );
    }

    #[test]
    fn ppl_coin_lifecycle() {
        let ctx = ctx();
        let mut state = player();

        let invest = resolve_choice(&ctx, &mut state, "ppl_coin_intro", 0, &mut rng()).unwrap();
        assert_eq!(invest.stat_deltas.get("money"), Some(&-2000.0));
        assert_eq!(state.active_chains["ppl_coin"].phase, "initial");
        assert_eq!(state.active_chains["ppl_coin"].payload["coins"], json!(4000));
        assert_eq!(state.decision_history["ppl_coin"].day, 12);

        state.day = 17;
        resolve_choice(&ctx, &mut state, "ppl_coin_rise", 0, &mut rng()).unwrap();
        assert_eq!(state.active_chains["ppl_coin"].phase, "crash");

        state.day = 22;
        let crash = resolve_choice(&ctx, &mut state, "ppl_coin_crash", 0, &mut rng()).unwrap();
        assert!(crash.outcome.starts_with("4000 coins"));
        assert!(!state.is_chain_active("ppl_coin"));
        assert!(ctx.find_event(&state, "ppl_coin_crash").is_none());
    }

    #[test]
    fn sell_half_keeps_the_chain_running() {
        let ctx = ctx();
        let mut state = player();
        resolve_choice(&ctx, &mut state, "ppl_coin_intro", 0, &mut rng()).unwrap();
        state.day = 17;
        resolve_choice(&ctx, &mut state, "ppl_coin_rise", 1, &mut rng()).unwrap();
        let chain = &state.active_chains["ppl_coin"];
        assert_eq!(chain.phase, "crash");
        assert_eq!(chain.payload["coins"], json!(2000));
    }

    #[test]
    fn history_and_occurrences_move_together() {
        let ctx = ctx();
        let mut state = player();
        for day in [12, 20, 30] {
            state.day = day;
            resolve_choice(&ctx, &mut state, "ppl_coin_intro", 1, &mut rng()).unwrap();
        }
        assert_eq!(state.event_history.len(), 3);
        assert_eq!(state.occurrences("ppl_coin_intro"), 3);
        assert_eq!(state.last_event_day, 30);
    }

    #[test]
    fn triggered_ending_skips_history() {
        let ctx = ctx();
        let mut state = player();
        let event = EventDefinition::new("dpe_signs", EventCategory::Custom, "Signed off.")
            .options(vec![EventOption::new("Celebrate", &[("morale", 10.0)], "Pilot!")
                .trigger_ending(EndingKind::Success)]);
        let resolution = resolve_event(&ctx, &mut state, &event, 0, &mut rng()).unwrap();
        assert_eq!(resolution.ending, Some(EndingKind::Success));
        assert!(state.game_ended);
        assert!(state.milestones.checkride_passed);
        assert_eq!(state.stats.morale, 85.0);
        assert!(state.event_history.is_empty());
        assert_eq!(state.occurrences("dpe_signs"), 0);
    }

    #[test]
    fn illegal_transition_rolls_back() {
        let ctx = ctx();
        let mut state = player();
        start_chain(&mut state, "ppl_coin", Default::default());
        advance_chain(&mut state, &ctx.chains, "ppl_coin", "crash").unwrap();
        let before = state.clone();

        let event = EventDefinition::new("coin_rebound", EventCategory::Custom, "Rebound?")
            .chain_link("ppl_coin")
            .options(vec![EventOption::new("Buy", &[("money", -500.0)], "Bought.")
                .next_phase("initial")]);
        let resolution = resolve_event(&ctx, &mut state, &event, 0, &mut rng()).unwrap();
        assert!(resolution.faulted);
        assert_eq!(resolution.outcome, NEUTRAL_OUTCOME);
        assert_eq!(state, before);
    }

    #[test]
    fn failing_impact_contributes_nothing() {
        fn broken(_: &GameState, _: &mut dyn RandomSource) -> Result<StatDeltas, ImpactError> {
            Err(ImpactError("no fuel quote".into()))
        }
        let ctx = ctx();
        let mut state = player();
        let event = EventDefinition::new("fuel_quote", EventCategory::Custom, "Fuel?")
            .options(vec![EventOption::computed("Ask", broken, "Shrug.").reputation(&[("fbo", 1)])]);
        let resolution = resolve_event(&ctx, &mut state, &event, 0, &mut rng()).unwrap();
        assert!(resolution.stat_deltas.is_empty());
        assert_eq!(state.reputation_of("fbo"), 1);
        assert_eq!(state.occurrences("fuel_quote"), 1);
    }

    #[test]
    fn chain_data_without_a_chain_becomes_a_flag() {
        let ctx = ctx();
        let mut state = player();
        let event = EventDefinition::new("fuel_hike", EventCategory::Financial, "Fuel is up.")
            .options(vec![EventOption::new("Grumble", &[], "Noted.")
                .chain_data(json!({ "fuel_price_increased": true }))]);
        resolve_event(&ctx, &mut state, &event, 0, &mut rng()).unwrap();
        assert!(state.has_decision("fuel_price_increased"));
    }

    #[test]
    fn once_event_resolves_a_single_time() {
        let ctx = ctx();
        let mut state = player();
        state.day = 1;
        let before = state.clone();
        assert_eq!(
            resolve_choice(&ctx, &mut state, "plane_raffle_win", 0, &mut rng()).unwrap_err(),
            ResolveError::NotEligible("plane_raffle_win".into())
        );
        assert_eq!(state, before);

        state.day = 31;
        let won = resolve_choice(&ctx, &mut state, "plane_raffle_win", 0, &mut rng()).unwrap();
        assert_eq!(won.stat_deltas.get("flight_hours"), Some(&10.0));

        state.day = 40;
        let after_win = state.clone();
        for _ in 0..2 {
            assert_eq!(
                resolve_choice(&ctx, &mut state, "plane_raffle_win", 0, &mut rng()).unwrap_err(),
                ResolveError::NotEligible("plane_raffle_win".into())
            );
        }
        assert_eq!(state, after_win);
        assert_eq!(state.occurrences("plane_raffle_win"), 1);
        assert_eq!(state.stats.flight_hours, 10.0);
    }

    #[test]
    fn cooling_down_event_is_rejected() {
        let ctx = ctx();
        let mut state = player();
        state.day = 3;
        state.last_action = Some(Action::Fly);
        resolve_choice(&ctx, &mut state, "cfi_late", 0, &mut rng()).unwrap();

        state.day = 5;
        let before = state.clone();
        assert_eq!(
            resolve_choice(&ctx, &mut state, "cfi_late", 0, &mut rng()).unwrap_err(),
            ResolveError::NotEligible("cfi_late".into())
        );
        assert_eq!(state, before);

        state.day = 8;
        resolve_choice(&ctx, &mut state, "cfi_late", 1, &mut rng()).unwrap();
        assert_eq!(state.occurrences("cfi_late"), 2);
    }

    #[test]
    fn false_condition_or_intervention_is_rejected() {
        let ctx = ctx();
        let mut state = player();
        let before = state.clone();
        // cfi_late needs a flight yesterday.
        assert_eq!(
            resolve_choice(&ctx, &mut state, "cfi_late", 0, &mut rng()).unwrap_err(),
            ResolveError::NotEligible("cfi_late".into())
        );
        assert_eq!(
            resolve_choice(&ctx, &mut state, "cfi_imsafe_intervention", 0, &mut rng()).unwrap_err(),
            ResolveError::NotEligible("cfi_imsafe_intervention".into())
        );
        assert_eq!(state, before);
    }
}
