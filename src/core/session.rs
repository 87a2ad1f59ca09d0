//! One game session: the ECS world holding the state and the engine context,
//! the day-advance schedule, the random source and the event waiting for a
//! choice.

use std::path::Path;

use bevy_ecs::prelude::*;
use bevy_utils::tracing::{info, warn};
use thiserror::Error;

use crate::core::context::EngineContext;
use crate::core::ecs::{create_schedule, create_world};
use crate::core::snapshot::{load_snapshot_from_path, save_snapshot_to_path, Snapshot, SnapshotError};
use crate::data::catalog::{EventDefinition, EventSummary};
use crate::persistence::repository::GameRepository;
use crate::persistence::sqlite::EndedGame;
use crate::rng::{RandomSource, SeededRandom};
use crate::simulation::actions::{available_actions, perform_action, Action, ActionAvailability, ActionError, ActionResult};
use crate::simulation::chains::due_consequences;
use crate::simulation::eligibility::eligible_events;
use crate::simulation::resolver::{resolve_choice, resolve_event, Resolution, ResolveError};
use crate::simulation::selector::pick_daily_event;
use crate::simulation::state::GameState;
use crate::simulation::time::{DayLog, DayReport};
use crate::simulation::weather::WeatherKind;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Action(#[from] ActionError),
    #[error(transparent)]
    Resolve(#[from] ResolveError),
    #[error("event {0} is waiting for a choice")]
    EventPending(String),
    #[error("no event is waiting for a choice")]
    NoPendingEvent,
    #[error("the game has already ended")]
    GameEnded,
    #[error(transparent)]
    Snapshot(#[from] SnapshotError),
    #[error("save repository: {0}")]
    Repository(String),
}

/// Result of a player action and whatever the day brought after it.
#[derive(Debug, Clone)]
pub struct TurnReport {
    pub action: ActionResult,
    /// Set when the action was completed and the day moved on.
    pub day: Option<DayReport>,
    /// The event now waiting for a choice, if any.
    pub event: Option<EventSummary>,
}

#[derive(Debug, Clone)]
pub struct ChoiceReport {
    pub resolution: Resolution,
    pub day: Option<DayReport>,
    pub event: Option<EventSummary>,
}

#[derive(Debug, Clone)]
pub struct DayTurn {
    pub day: DayReport,
    pub event: Option<EventSummary>,
}

#[derive(Debug, Clone)]
struct PendingEvent {
    event: EventDefinition,
    /// Raised by an action; the day moves on once it is resolved.
    intervention: bool,
}

pub struct Session {
    world: World,
    schedule: Schedule,
    rng: Box<dyn RandomSource>,
    seed: u64,
    pending: Option<PendingEvent>,
    repository: Option<Box<dyn GameRepository>>,
    archived: bool,
}

impl Session {
    /// Start a fresh game with a seeded random stream.
    pub fn new(ctx: EngineContext, seed: u64) -> Self {
        Self::with_random(ctx, seed, Box::new(SeededRandom::new(seed)))
    }

    /// Start a fresh game drawing from the given source.
    pub fn with_random(ctx: EngineContext, seed: u64, mut rng: Box<dyn RandomSource>) -> Self {
        let state = GameState::new_game(&ctx.config, rng.as_mut());
        info!(
            target: "ppl::session",
            seed,
            money = state.stats.money,
            morale = state.stats.morale,
            "new game"
        );
        Self::from_parts(ctx, state, seed, rng)
    }

    /// Continue from a snapshot. The random stream restarts from a seed
    /// derived from the save.
    pub fn from_snapshot(ctx: EngineContext, snapshot: Snapshot) -> Self {
        let rng = Box::new(SeededRandom::new(resume_seed(&snapshot)));
        Self::from_parts(ctx, snapshot.state, snapshot.seed, rng)
    }

    /// Continue the game in the repository's continue slot, if there is one.
    pub fn resume(
        ctx: EngineContext,
        repository: Box<dyn GameRepository>,
    ) -> Result<Option<Self>, SessionError> {
        let snapshot = repository
            .load_continue()
            .map_err(|err| SessionError::Repository(err.to_string()))?;
        Ok(snapshot.map(|snapshot| Self::from_snapshot(ctx, snapshot).with_repository(repository)))
    }

    fn from_parts(ctx: EngineContext, state: GameState, seed: u64, rng: Box<dyn RandomSource>) -> Self {
        let archived = state.game_ended;
        Self {
            world: create_world(ctx, state),
            schedule: create_schedule(),
            rng,
            seed,
            pending: None,
            repository: None,
            archived,
        }
    }

    pub fn with_repository(mut self, repository: Box<dyn GameRepository>) -> Self {
        self.repository = Some(repository);
        self
    }

    pub fn state(&self) -> &GameState {
        self.world.resource::<GameState>()
    }

    pub fn context(&self) -> &EngineContext {
        self.world.resource::<EngineContext>()
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn weather(&self) -> WeatherKind {
        WeatherKind::for_day(self.state().day)
    }

    pub fn available_actions(&self) -> Vec<ActionAvailability> {
        available_actions(self.state(), &self.context().config)
    }

    pub fn pending_event(&self) -> Option<EventSummary> {
        self.pending.as_ref().map(|pending| pending.event.summary())
    }

    /// Events that could be raised today: due chain follow-ups first, then
    /// the eligible catalog events.
    pub fn list_eligible_events(&self) -> Vec<EventSummary> {
        let ctx = self.context();
        let state = self.state();
        let mut events: Vec<EventSummary> = due_consequences(state, &ctx.chains, &ctx.config)
            .iter()
            .map(EventDefinition::summary)
            .collect();
        events.extend(
            eligible_events(&ctx.catalog, state, &ctx.config)
                .into_iter()
                .map(EventDefinition::summary),
        );
        events
    }

    /// Perform a daily action. A completed action ends the day; an action
    /// replaced by an intervention leaves that event waiting instead.
    pub fn perform(&mut self, action: Action) -> Result<TurnReport, SessionError> {
        if let Some(pending) = &self.pending {
            return Err(SessionError::EventPending(pending.event.id.clone()));
        }

        let rng = self.rng.as_mut();
        let result = self.world.resource_scope(|world, mut state: Mut<GameState>| {
            let ctx = world.resource::<EngineContext>();
            perform_action(&mut state, action, &ctx.config, rng)
        })?;

        let mut report = TurnReport {
            action: result,
            day: None,
            event: None,
        };

        let intervention = report
            .action
            .intervention
            .clone()
            .and_then(|event_id| match self.context().catalog.get(&event_id) {
                Some(event) => Some(event.clone()),
                None => {
                    warn!(target: "ppl::session", event = %event_id, "intervention event missing from catalog");
                    None
                }
            });

        if let Some(event) = intervention {
            report.event = Some(event.summary());
            self.pending = Some(PendingEvent {
                event,
                intervention: true,
            });
        } else if !self.state().game_ended {
            let turn = self.advance_and_draw();
            report.day = Some(turn.day);
            report.event = turn.event;
        }

        self.after_turn();
        Ok(report)
    }

    /// Resolve the waiting event. An invalid index leaves it waiting.
    pub fn choose(&mut self, choice_index: usize) -> Result<ChoiceReport, SessionError> {
        let pending = self.pending.clone().ok_or(SessionError::NoPendingEvent)?;

        let rng = self.rng.as_mut();
        let resolution = self.world.resource_scope(|world, mut state: Mut<GameState>| {
            let ctx = world.resource::<EngineContext>();
            resolve_event(ctx, &mut state, &pending.event, choice_index, rng)
        })?;
        self.pending = None;

        let mut report = ChoiceReport {
            resolution,
            day: None,
            event: None,
        };
        if pending.intervention && !self.state().game_ended {
            let turn = self.advance_and_draw();
            report.day = Some(turn.day);
            report.event = turn.event;
        }

        self.after_turn();
        Ok(report)
    }

    /// Resolve a choice on any available event by id. The waiting event is
    /// resolved as if chosen; anything else must be eligible today.
    pub fn resolve(&mut self, event_id: &str, choice_index: usize) -> Result<Resolution, SessionError> {
        if self
            .pending
            .as_ref()
            .is_some_and(|pending| pending.event.id == event_id)
        {
            return self.choose(choice_index).map(|report| report.resolution);
        }

        let rng = self.rng.as_mut();
        let resolution = self.world.resource_scope(|world, mut state: Mut<GameState>| {
            let ctx = world.resource::<EngineContext>();
            resolve_choice(ctx, &mut state, event_id, choice_index, rng)
        })?;
        self.after_turn();
        Ok(resolution)
    }

    /// Skip to the next day without acting.
    pub fn next_day(&mut self) -> Result<DayTurn, SessionError> {
        if let Some(pending) = &self.pending {
            return Err(SessionError::EventPending(pending.event.id.clone()));
        }
        if self.state().game_ended {
            return Err(SessionError::GameEnded);
        }
        let turn = self.advance_and_draw();
        self.after_turn();
        Ok(turn)
    }

    /// Draw today's event if none is waiting. Returns the waiting event.
    pub fn draw_event(&mut self) -> Option<EventSummary> {
        if self.pending.is_none() {
            let ctx = self.world.resource::<EngineContext>();
            let state = self.world.resource::<GameState>();
            self.pending = pick_daily_event(ctx, state, self.rng.as_mut()).map(|event| PendingEvent {
                event: event.into_owned(),
                intervention: false,
            });
        }
        self.pending_event()
    }

    fn advance_and_draw(&mut self) -> DayTurn {
        self.schedule.run(&mut self.world);
        let day = match self.world.resource_mut::<DayLog>().current.take() {
            Some(report) => report,
            None => DayReport::new(self.state().day),
        };
        let event = if self.state().game_ended {
            None
        } else {
            self.draw_event()
        };
        DayTurn { day, event }
    }

    fn after_turn(&mut self) {
        let snapshot = self.snapshot();
        let ended = snapshot.state.game_ended;
        let persist_every_turn = self.context().config.persist_every_turn;
        let Some(repository) = self.repository.as_mut() else {
            return;
        };

        if ended && !self.archived {
            match repository.archive_ended(&snapshot) {
                Ok(game_id) => {
                    self.archived = true;
                    info!(target: "ppl::session", game_id, "finished game archived");
                }
                Err(err) => warn!(target: "ppl::session", error = %err, "failed to archive game"),
            }
        } else if !ended && persist_every_turn {
            if let Err(err) = repository.save_continue(&snapshot) {
                warn!(target: "ppl::session", error = %err, "failed to write continue slot");
            }
        }
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot::new(self.seed, self.state().clone())
    }

    pub fn save_to_path(&self, path: impl AsRef<Path>) -> Result<(), SnapshotError> {
        save_snapshot_to_path(&self.snapshot(), path)
    }

    pub fn load_from_path(&mut self, path: impl AsRef<Path>) -> Result<(), SnapshotError> {
        let snapshot = load_snapshot_from_path(path)?;
        self.restore(snapshot);
        Ok(())
    }

    /// Replace the running game. Any waiting event is dropped.
    pub fn restore(&mut self, snapshot: Snapshot) {
        self.rng = Box::new(SeededRandom::new(resume_seed(&snapshot)));
        self.seed = snapshot.seed;
        self.archived = snapshot.state.game_ended;
        self.pending = None;
        *self.world.resource_mut::<GameState>() = snapshot.state;
        info!(target: "ppl::session", seed = self.seed, day = self.state().day, "game restored");
    }

    pub fn last_ended_game(&self) -> Result<Option<EndedGame>, SessionError> {
        match &self.repository {
            Some(repository) => repository
                .last_ended()
                .map_err(|err| SessionError::Repository(err.to_string())),
            None => Ok(None),
        }
    }
}

fn resume_seed(snapshot: &Snapshot) -> u64 {
    snapshot.seed.wrapping_add(u64::from(snapshot.state.day))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EngineConfig;
    use crate::data::catalog::EventCatalog;
    use crate::data::chains::ChainRegistry;
    use crate::rng::ScriptedRandom;
    use crate::simulation::state::Stats;

    fn session_with(state: GameState, draws: Vec<f64>) -> Session {
        let ctx = EngineContext::builtin().unwrap();
        let mut session = Session::from_snapshot(ctx, Snapshot::new(7, state));
        session.rng = Box::new(ScriptedRandom::new(draws));
        session
    }

    fn student() -> GameState {
        GameState::with_stats(Stats {
            morale: 75.0,
            money: 18_000.0,
            fatigue: 10.0,
            ..Stats::default()
        })
    }

    #[test]
    fn new_game_rolls_initial_stats() {
        let session = Session::new(EngineContext::builtin().unwrap(), 11);
        let stats = &session.state().stats;
        assert!((70.0..=80.0).contains(&stats.morale));
        assert!((17_000.0..=20_000.0).contains(&stats.money));
        assert!((5.0..=15.0).contains(&stats.fatigue));
        assert_eq!(session.state().day, 1);
    }

    #[test]
    fn action_ends_the_day() {
        // 0.5 draws: study gain 5, topic pick, then a failed 0.99 event roll.
        let mut session = session_with(student(), vec![0.5, 0.5, 0.99]);
        let report = session.perform(Action::Study).unwrap();
        assert_eq!(report.day.as_ref().map(|day| day.day), Some(2));
        assert!(report.event.is_none());
        assert_eq!(session.state().stats.knowledge, 5.0 - 0.3);
        assert!(session.state().event_history.is_empty());
    }

    #[test]
    fn intervention_waits_for_a_choice() {
        let mut state = student();
        state.stats.fatigue = 85.0;
        let mut session = session_with(state, vec![0.0]);
        let report = session.perform(Action::Fly).unwrap();
        let event = report.event.unwrap();
        assert_eq!(event.id, "cfi_imsafe_intervention");
        assert!(report.day.is_none());
        assert!(matches!(
            session.perform(Action::Rest),
            Err(SessionError::EventPending(_))
        ));

        let err = session.choose(99).unwrap_err();
        assert!(matches!(
            err,
            SessionError::Resolve(ResolveError::InvalidChoiceIndex { .. })
        ));
        assert!(session.pending_event().is_some());

        let choice = session.choose(0).unwrap();
        assert_eq!(choice.day.map(|day| day.day), Some(2));
        assert_eq!(session.state().occurrences("cfi_imsafe_intervention"), 1);
    }

    #[test]
    fn missing_intervention_still_ends_the_day() {
        let chains = ChainRegistry::builtin().unwrap();
        let catalog = EventCatalog::from_events(Vec::new(), &chains).unwrap();
        let ctx = EngineContext::new(EngineConfig::default(), catalog, chains);
        let mut state = student();
        state.stats.fatigue = 85.0;
        let mut session = Session::from_snapshot(ctx, Snapshot::new(7, state));
        session.rng = Box::new(ScriptedRandom::new(vec![0.0]));

        let report = session.perform(Action::Fly).unwrap();
        assert_eq!(report.action.intervention.as_deref(), Some("cfi_imsafe_intervention"));
        assert_eq!(report.day.map(|day| day.day), Some(2));
        assert!(session.pending_event().is_none());
        assert_eq!(session.state().day, 2);
    }

    #[test]
    fn resolving_the_waiting_intervention_by_id() {
        let mut state = student();
        state.stats.fatigue = 85.0;
        let mut session = session_with(state, vec![0.0]);
        session.perform(Action::Fly).unwrap();

        let resolution = session.resolve("cfi_imsafe_intervention", 0).unwrap();
        assert_eq!(resolution.event_id, "cfi_imsafe_intervention");
        assert_eq!(session.state().day, 2);
        assert_eq!(session.state().occurrences("cfi_imsafe_intervention"), 1);

        assert!(matches!(
            session.resolve("cfi_imsafe_intervention", 0),
            Err(SessionError::Resolve(ResolveError::NotEligible(_)))
        ));
        assert_eq!(session.state().occurrences("cfi_imsafe_intervention"), 1);
    }

    #[test]
    fn choose_without_event_is_rejected() {
        let mut session = session_with(student(), vec![0.5]);
        assert!(matches!(session.choose(0), Err(SessionError::NoPendingEvent)));
    }

    #[test]
    fn restore_replaces_the_game() {
        let mut session = session_with(student(), vec![0.5]);
        let mut other = student();
        other.day = 30;
        session.restore(Snapshot::new(42, other));
        assert_eq!(session.state().day, 30);
        assert_eq!(session.seed(), 42);
    }
}
