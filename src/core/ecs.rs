use bevy_ecs::prelude::*;
use bevy_ecs::schedule::SystemSet;

use crate::core::context::EngineContext;
use crate::simulation::state::GameState;
use crate::simulation::time::{
    advance_clock_system, chain_eviction_system, daily_drain_system, ending_system,
    milestone_system, DayLog,
};

/// Canonical ordering of one day advance.
#[derive(SystemSet, Debug, Hash, PartialEq, Eq, Clone)]
pub enum DaySet {
    Clock,
    Drain,
    Progress,
    Chains,
    Endings,
}

/// Build the ECS world holding the game state and the engine context.
pub fn create_world(ctx: EngineContext, state: GameState) -> World {
    let mut world = World::new();
    world.insert_resource(ctx);
    world.insert_resource(state);
    world.insert_resource(DayLog::default());
    world
}

/// Build the day-advance schedule in the canonical order.
pub fn create_schedule() -> Schedule {
    let mut schedule = Schedule::default();

    schedule.configure_sets(
        (
            DaySet::Clock,
            DaySet::Drain,
            DaySet::Progress,
            DaySet::Chains,
            DaySet::Endings,
        )
            .chain(),
    );

    schedule.add_systems((
        advance_clock_system.in_set(DaySet::Clock),
        daily_drain_system.in_set(DaySet::Drain),
        milestone_system.in_set(DaySet::Progress),
        chain_eviction_system.in_set(DaySet::Chains),
        ending_system.in_set(DaySet::Endings),
    ));

    schedule
}
