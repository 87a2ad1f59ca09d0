use bevy_ecs::prelude::*;
use bevy_utils::tracing::debug;

use crate::config::EngineConfig;
use crate::core::context::EngineContext;
use crate::simulation::chains::evict_stale_chains;
use crate::simulation::endgame::{check_ending, EndingKind};
use crate::simulation::milestones::check_milestones;
use crate::simulation::state::{GameState, Milestone};
use crate::simulation::weather::WeatherKind;

/// What one day advance changed.
#[derive(Debug, Clone, PartialEq)]
pub struct DayReport {
    pub day: u32,
    pub weather: WeatherKind,
    pub drained: bool,
    pub evicted_chains: Vec<String>,
    pub milestones: Vec<Milestone>,
    pub ending: Option<EndingKind>,
}

impl DayReport {
    pub fn new(day: u32) -> Self {
        Self {
            day,
            weather: WeatherKind::for_day(day),
            drained: false,
            evicted_chains: Vec::new(),
            milestones: Vec::new(),
            ending: None,
        }
    }

    pub fn ending_reached(&self) -> bool {
        self.ending.is_some()
    }
}

/// Report of the day being advanced by the schedule. `None` when the run
/// was skipped because the game had already ended.
#[derive(Resource, Debug, Default)]
pub struct DayLog {
    pub current: Option<DayReport>,
}

/// Passive decay, at most once per day. Returns whether stats moved.
pub fn apply_daily_drain(state: &mut GameState, config: &EngineConfig) -> bool {
    if state.day <= state.last_drain_day {
        return false;
    }
    state.last_drain_day = state.day;
    if state.day <= 1 {
        return false;
    }

    let drain = &config.drain;
    state.apply_stat_delta("knowledge", -drain.knowledge);
    state.apply_stat_delta("morale", -drain.morale);
    state.apply_stat_delta("safety", -drain.safety);
    state.apply_stat_delta("fatigue", drain.fatigue);
    debug!(target: "ppl::time", day = state.day, "daily drain applied");
    true
}

/// Move to the next day: clock, drain, milestones, chain eviction, ending.
/// A finished game does not advance.
pub fn advance_day(state: &mut GameState, ctx: &EngineContext) -> DayReport {
    if state.game_ended {
        let mut report = DayReport::new(state.day);
        report.ending = state.ending_type;
        return report;
    }
    state.day += 1;
    let mut report = DayReport::new(state.day);
    report.drained = apply_daily_drain(state, &ctx.config);
    report.milestones = check_milestones(state);
    report.evicted_chains = evict_stale_chains(state, ctx.config.chain_max_age_days);
    report.ending = check_ending(state, &ctx.config);
    report
}

/// System: advances the clock one day.
pub fn advance_clock_system(mut state: ResMut<GameState>, mut log: ResMut<DayLog>) {
    if state.game_ended {
        log.current = None;
        return;
    }
    state.day += 1;
    log.current = Some(DayReport::new(state.day));
}

pub fn daily_drain_system(
    mut state: ResMut<GameState>,
    ctx: Res<EngineContext>,
    mut log: ResMut<DayLog>,
) {
    let Some(report) = log.current.as_mut() else {
        return;
    };
    report.drained = apply_daily_drain(&mut state, &ctx.config);
}

pub fn milestone_system(mut state: ResMut<GameState>, mut log: ResMut<DayLog>) {
    let Some(report) = log.current.as_mut() else {
        return;
    };
    report.milestones = check_milestones(&mut state);
}

pub fn chain_eviction_system(
    mut state: ResMut<GameState>,
    ctx: Res<EngineContext>,
    mut log: ResMut<DayLog>,
) {
    let Some(report) = log.current.as_mut() else {
        return;
    };
    report.evicted_chains = evict_stale_chains(&mut state, ctx.config.chain_max_age_days);
}

pub fn ending_system(mut state: ResMut<GameState>, ctx: Res<EngineContext>, mut log: ResMut<DayLog>) {
    let Some(report) = log.current.as_mut() else {
        return;
    };
    report.ending = check_ending(&mut state, &ctx.config);
}
