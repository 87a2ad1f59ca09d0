//! Chain engine: the lifecycle of in-flight storylines inside `GameState`.

use bevy_utils::tracing::{debug, info};
use thiserror::Error;

use crate::config::EngineConfig;
use crate::data::catalog::EventDefinition;
use crate::data::chains::{ChainRegistry, INITIAL_PHASE};
use crate::simulation::eligibility::passes_recency;
use crate::simulation::state::{ActiveChain, ChainPayload, DecisionRecord, GameState};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChainError {
    #[error("chain {0} is not active")]
    Inactive(String),
    #[error("chain {chain} cannot move from {from} to {to}")]
    IllegalTransition {
        chain: String,
        from: String,
        to: String,
    },
}

/// Start a chain in its initial phase and record the decision. Starting a
/// chain that is already running merges the new data into its payload and
/// keeps its original start day.
pub fn start_chain(state: &mut GameState, chain_id: &str, data: ChainPayload) {
    let day = state.day;
    if let Some(active) = state.active_chains.get_mut(chain_id) {
        active.payload.extend(data.clone());
        if let Some(record) = state.decision_history.get_mut(chain_id) {
            record.data.extend(data);
        }
        debug!(target: "ppl::chains", chain = chain_id, "chain already active, payload merged");
        return;
    }

    state.active_chains.insert(
        chain_id.to_string(),
        ActiveChain {
            start_day: day,
            phase: INITIAL_PHASE.to_string(),
            payload: data.clone(),
        },
    );
    state
        .decision_history
        .insert(chain_id.to_string(), DecisionRecord { day, data });
    info!(target: "ppl::chains", chain = chain_id, day, "chain started");
}

/// Move an active chain to `phase`, if the registry allows it.
pub fn advance_chain(
    state: &mut GameState,
    registry: &ChainRegistry,
    chain_id: &str,
    phase: &str,
) -> Result<(), ChainError> {
    let active = state
        .active_chains
        .get_mut(chain_id)
        .ok_or_else(|| ChainError::Inactive(chain_id.to_string()))?;
    if active.phase == phase {
        return Ok(());
    }
    if !registry.can_transition(chain_id, &active.phase, phase) {
        return Err(ChainError::IllegalTransition {
            chain: chain_id.to_string(),
            from: active.phase.clone(),
            to: phase.to_string(),
        });
    }
    info!(target: "ppl::chains", chain = chain_id, from = %active.phase, to = phase, "chain advanced");
    active.phase = phase.to_string();
    Ok(())
}

pub fn end_chain(state: &mut GameState, chain_id: &str) -> Option<ActiveChain> {
    let removed = state.active_chains.remove(chain_id);
    if removed.is_some() {
        info!(target: "ppl::chains", chain = chain_id, day = state.day, "chain ended");
    }
    removed
}

/// Follow-ups the dispatch table wants to raise today, in chain-id order.
/// Unscheduled follow-ups still respect the recency cooldown.
pub fn due_consequences(
    state: &GameState,
    registry: &ChainRegistry,
    config: &EngineConfig,
) -> Vec<EventDefinition> {
    state
        .active_chains
        .iter()
        .filter_map(|(chain_id, active)| registry.consequence(chain_id, state, active))
        .filter(|event| passes_recency(event, state, config))
        .collect()
}

/// Drop chains older than the configured age. Returns the evicted ids.
pub fn evict_stale_chains(state: &mut GameState, max_age_days: u32) -> Vec<String> {
    let day = state.day;
    let stale: Vec<String> = state
        .active_chains
        .iter()
        .filter(|(_, chain)| chain.age(day) > max_age_days)
        .map(|(id, _)| id.clone())
        .collect();
    for chain_id in &stale {
        state.active_chains.remove(chain_id);
        info!(target: "ppl::chains", chain = %chain_id, day, "stale chain evicted");
    }
    stale
}
