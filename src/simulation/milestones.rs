use bevy_utils::tracing::info;

use crate::simulation::chains::start_chain;
use crate::simulation::state::{ChainPayload, GameState, Milestone, TrainingPhase};

const GROUND_SCHOOL_KNOWLEDGE: f64 = 60.0;
const WRITTEN_HOURS: f64 = 15.0;
const WRITTEN_KNOWLEDGE: f64 = 50.0;
const SOLO_HOURS: f64 = 18.0;
const SOLO_SAFETY: f64 = 85.0;
const CROSS_COUNTRY_HOURS: f64 = 25.0;
const CHECKRIDE_PREP_HOURS: f64 = 40.0;

pub const CHECKRIDE_CHAIN: &str = "checkride_prep";

/// Latch whatever the current stats have earned and move the training phase
/// forward. At most one of the early curriculum steps is taken per call,
/// the way a lesson debrief covers one thing at a time.
pub fn check_milestones(state: &mut GameState) -> Vec<Milestone> {
    let mut reached = Vec::new();
    let stats = state.stats.clone();

    if !state.milestones.ground_school && stats.knowledge >= GROUND_SCHOOL_KNOWLEDGE {
        latch(state, Milestone::GroundSchool, &mut reached);
        promote(state, TrainingPhase::PreSolo);
    } else if !state.milestones.pre_solo_written_passed
        && stats.flight_hours >= WRITTEN_HOURS
        && stats.knowledge >= WRITTEN_KNOWLEDGE
    {
        latch(state, Milestone::PreSoloWrittenPassed, &mut reached);
    } else if !state.milestones.solo_endorsement
        && state.milestones.pre_solo_written_passed
        && stats.flight_hours >= SOLO_HOURS
        && stats.safety >= SOLO_SAFETY
    {
        latch(state, Milestone::SoloEndorsement, &mut reached);
        latch(state, Milestone::FirstSolo, &mut reached);
        promote(state, TrainingPhase::SoloTraining);
        state.apply_stat_delta("morale", 30.0);
        state.apply_stat_delta("flight_hours", 0.5);
    }

    if state.phase == TrainingPhase::SoloTraining
        && state.stats.flight_hours >= CROSS_COUNTRY_HOURS
    {
        promote(state, TrainingPhase::CrossCountry);
        latch(state, Milestone::CrossCountry, &mut reached);
    }

    if state.phase == TrainingPhase::CrossCountry
        && state.stats.flight_hours >= CHECKRIDE_PREP_HOURS
    {
        promote(state, TrainingPhase::CheckridePrep);
        latch(state, Milestone::CheckrideEndorsement, &mut reached);
    }

    if state.phase == TrainingPhase::CheckridePrep && !state.is_chain_active(CHECKRIDE_CHAIN) {
        start_chain(state, CHECKRIDE_CHAIN, ChainPayload::new());
    }

    reached
}

fn latch(state: &mut GameState, milestone: Milestone, reached: &mut Vec<Milestone>) {
    if state.milestones.latch(milestone) {
        info!(target: "ppl::milestones", milestone = milestone.as_str(), day = state.day, "milestone reached");
        reached.push(milestone);
    }
}

/// Phases only move forward.
fn promote(state: &mut GameState, phase: TrainingPhase) {
    if phase > state.phase {
        state.phase = phase;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ground_school_moves_to_pre_solo() {
        let mut state = GameState::default();
        state.stats.knowledge = 62.0;
        assert_eq!(check_milestones(&mut state), vec![Milestone::GroundSchool]);
        assert_eq!(state.phase, TrainingPhase::PreSolo);
        assert!(check_milestones(&mut state).is_empty());
    }

    #[test]
    fn first_solo_needs_the_written_first() {
        let mut state = GameState::default();
        state.milestones.ground_school = true;
        state.phase = TrainingPhase::PreSolo;
        state.stats.knowledge = 55.0;
        state.stats.flight_hours = 19.0;
        state.stats.safety = 90.0;
        state.stats.morale = 50.0;

        assert_eq!(check_milestones(&mut state), vec![Milestone::PreSoloWrittenPassed]);
        let solo = check_milestones(&mut state);
        assert_eq!(solo, vec![Milestone::SoloEndorsement, Milestone::FirstSolo]);
        assert_eq!(state.phase, TrainingPhase::SoloTraining);
        assert_eq!(state.stats.morale, 80.0);
        assert_eq!(state.stats.flight_hours, 19.5);
    }

    #[test]
    fn checkride_prep_starts_its_chain() {
        let mut state = GameState::default();
        state.phase = TrainingPhase::CrossCountry;
        state.milestones.ground_school = true;
        state.milestones.pre_solo_written_passed = true;
        state.milestones.solo_endorsement = true;
        state.stats.flight_hours = 41.0;
        let reached = check_milestones(&mut state);
        assert_eq!(reached, vec![Milestone::CheckrideEndorsement]);
        assert_eq!(state.phase, TrainingPhase::CheckridePrep);
        assert!(state.is_chain_active(CHECKRIDE_CHAIN));
    }

    #[test]
    fn phase_never_regresses() {
        let mut state = GameState::default();
        state.phase = TrainingPhase::CrossCountry;
        state.stats.knowledge = 70.0;
        check_milestones(&mut state);
        assert!(state.milestones.ground_school);
        assert_eq!(state.phase, TrainingPhase::CrossCountry);
    }
}
