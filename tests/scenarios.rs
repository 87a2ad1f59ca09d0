use std::collections::BTreeMap;
use std::io::Write;

use ppl_trainer::config::EngineConfig;
use ppl_trainer::core::{EngineContext, Session, SessionError, Snapshot};
use ppl_trainer::data::catalog::{EventCatalog, EventCategory, EventDefinition, EventOption, Frequency};
use ppl_trainer::data::chains::ChainRegistry;
use ppl_trainer::rng::{ScriptedRandom, SeededRandom};
use ppl_trainer::simulation::eligibility::eligible_events;
use ppl_trainer::simulation::endgame::{evaluate_ending, EndingKind};
use ppl_trainer::simulation::resolver::{resolve_event, ResolveError};
use ppl_trainer::simulation::selector::pick_daily_event;
use ppl_trainer::simulation::state::{GameState, Stats};
use ppl_trainer::simulation::time::{advance_day, apply_daily_drain};
use ppl_trainer::simulation::{perform_action, Action};

fn play_turn(session: &mut Session, turn: usize) {
    if let Some(event) = session.pending_event() {
        session
            .choose(turn % event.options.len())
            .expect("choice index is in range");
        return;
    }
    let offered: Vec<Action> = session
        .available_actions()
        .into_iter()
        .filter(|offer| offer.available)
        .map(|offer| offer.action)
        .collect();
    let action = offered[turn % offered.len()];
    if session.perform(action).is_err() {
        session.perform(Action::Rest).expect("resting is always possible");
    }
}

fn assert_invariants(session: &Session) {
    let state = session.state();
    let stats = &state.stats;
    for value in [stats.morale, stats.knowledge, stats.safety, stats.fatigue] {
        assert!((0.0..=100.0).contains(&value), "percentage stat out of range: {value}");
    }
    for value in [stats.money, stats.flight_hours, stats.xc_hours, stats.night_hours] {
        assert!(value >= 0.0, "stat below zero: {value}");
    }

    let mut counted: BTreeMap<String, u32> = BTreeMap::new();
    for entry in &state.event_history {
        *counted.entry(entry.event_id.clone()).or_insert(0) += 1;
    }
    assert_eq!(counted, state.event_occurrences);

    for event in session.context().catalog.iter() {
        let fired = state.occurrences(&event.id);
        match event.frequency {
            Frequency::Once => assert!(fired <= 1, "{} fired {fired} times", event.id),
            Frequency::Rare => assert!(
                fired <= event.max_occurrences.unwrap_or(1),
                "{} fired {fired} times",
                event.id
            ),
            Frequency::Repeatable => {}
        }
    }
}

#[test]
fn full_games_keep_every_invariant() {
    for seed in [1_u64, 7, 42, 2024, 31337] {
        let mut session = Session::new(EngineContext::builtin().unwrap(), seed);
        let mut turn = 0;
        while !session.state().game_ended {
            play_turn(&mut session, turn);
            assert_invariants(&session);
            turn += 1;
            assert!(turn < 5_000, "seed {seed} never finished");
        }
        assert!(session.state().ending_type.is_some());
        assert!(session.state().day <= 101);
    }
}

fn lone_event_context(event: EventDefinition) -> EngineContext {
    let chains = ChainRegistry::builtin().unwrap();
    let catalog = EventCatalog::from_events(vec![event], &chains).unwrap();
    let config = EngineConfig {
        event_chance: 1.0,
        ..EngineConfig::default()
    };
    EngineContext::new(config, catalog, chains)
}

fn sturdy_student() -> GameState {
    GameState::with_stats(Stats {
        morale: 90.0,
        knowledge: 10.0,
        safety: 50.0,
        fatigue: 10.0,
        money: 20_000.0,
        ..Stats::default()
    })
}

/// Advance `days` days, resolving the first option of whatever fires.
/// Returns the days the event fired on.
fn run_days(ctx: &EngineContext, state: &mut GameState, days: u32) -> Vec<u32> {
    let mut rng = SeededRandom::new(5);
    let mut fired = Vec::new();
    for _ in 0..days {
        advance_day(state, ctx);
        let picked = pick_daily_event(ctx, state, &mut rng).map(|event| event.into_owned());
        if let Some(event) = picked {
            resolve_event(ctx, state, &event, 0, &mut rng).unwrap();
            fired.push(state.day);
        }
    }
    fired
}

fn harmless(id: &str) -> EventDefinition {
    EventDefinition::new(id, EventCategory::Custom, "The ramp is quiet.")
        .when(&["day >= 1"])
        .options(vec![EventOption::new("Wave", &[], "You wave at the fuel truck.")])
}

#[test]
fn rare_events_respect_their_cap() {
    let ctx = lone_event_context(harmless("ramp_check").rare(3));
    let mut state = sturdy_student();
    let fired = run_days(&ctx, &mut state, 30);
    assert_eq!(fired.len(), 3);
    assert_eq!(state.occurrences("ramp_check"), 3);
}

#[test]
fn once_events_fire_once() {
    let ctx = lone_event_context(harmless("first_logbook").once());
    let mut state = sturdy_student();
    let fired = run_days(&ctx, &mut state, 40);
    assert_eq!(fired, vec![2]);
}

#[test]
fn repeatable_events_wait_out_the_cooldown() {
    let ctx = lone_event_context(harmless("tower_chatter"));
    let mut state = sturdy_student();
    let fired = run_days(&ctx, &mut state, 30);
    assert_eq!(fired.first(), Some(&2));
    for pair in fired.windows(2) {
        assert_eq!(pair[1] - pair[0], 5, "fired on {:?}", fired);
    }
}

#[test]
fn success_outranks_bankruptcy() {
    let state = GameState::with_stats(Stats {
        flight_hours: 40.0,
        knowledge: 85.0,
        safety: 80.0,
        money: 100.0,
        morale: 60.0,
        ..Stats::default()
    });
    assert_eq!(
        evaluate_ending(&state, &EngineConfig::default()),
        Some(EndingKind::Success)
    );
}

#[test]
fn studying_from_a_fresh_start() {
    let mut state = GameState::with_stats(Stats {
        morale: 75.0,
        knowledge: 0.0,
        safety: 0.0,
        money: 18_000.0,
        flight_hours: 0.0,
        fatigue: 10.0,
        ..Stats::default()
    });
    let mut rng = ScriptedRandom::constant(0.5);
    let result = perform_action(&mut state, Action::Study, &EngineConfig::default(), &mut rng).unwrap();
    assert_eq!(result.deltas.get("knowledge"), Some(&5.0));
    assert_eq!(state.stats.knowledge, 5.0);
    assert_eq!(state.stats.money, 17_970.0);
    assert_eq!(state.stats.fatigue, 14.0);
    assert!(state.event_history.is_empty());
}

#[test]
fn drain_applies_once_per_day() {
    let config = EngineConfig::default();
    let mut state = sturdy_student();
    state.day = 9;
    apply_daily_drain(&mut state, &config);
    let drained = state.stats.clone();
    apply_daily_drain(&mut state, &config);
    assert_eq!(state.stats, drained);
    assert_eq!(state.last_drain_day, 9);
}

#[test]
fn sold_out_coin_never_comes_back() {
    let ctx = EngineContext::builtin().unwrap();
    let mut state = sturdy_student();
    state.day = 11;
    let mut session = Session::from_snapshot(ctx, Snapshot::new(3, state));
    session.resolve("ppl_coin_intro", 0).unwrap();
    assert!(session.state().is_chain_active("ppl_coin"));

    let mut state = session.state().clone();
    state.day += 5;
    session.restore(Snapshot::new(3, state));
    let sold = session.resolve("ppl_coin_rise", 2).unwrap();
    assert_eq!(sold.stat_deltas.get("money"), Some(&10_000.0));
    assert!(!session.state().is_chain_active("ppl_coin"));

    let mut state = session.state().clone();
    state.day += 10;
    session.restore(Snapshot::new(3, state));
    assert!(matches!(
        session.resolve("ppl_coin_crash", 0),
        Err(SessionError::Resolve(ResolveError::UnknownEvent(_)))
    ));
    assert!(session
        .list_eligible_events()
        .iter()
        .all(|event| !event.id.starts_with("ppl_coin")));
}

#[test]
fn out_of_range_choice_changes_nothing() {
    let ctx = EngineContext::builtin().unwrap();
    let mut state = sturdy_student();
    state.day = 3;
    state.last_action = Some(Action::Fly);
    let mut session = Session::from_snapshot(ctx, Snapshot::new(3, state));
    let before = session.state().clone();
    let err = session.resolve("cfi_late", 42).unwrap_err();
    assert!(matches!(
        err,
        SessionError::Resolve(ResolveError::InvalidChoiceIndex { index: 42, .. })
    ));
    assert_eq!(session.state(), &before);
}

#[test]
fn raffle_cannot_be_won_twice_by_id() {
    let ctx = EngineContext::builtin().unwrap();
    let mut session = Session::from_snapshot(ctx, Snapshot::new(3, sturdy_student()));
    assert!(matches!(
        session.resolve("plane_raffle_win", 0),
        Err(SessionError::Resolve(ResolveError::NotEligible(_)))
    ));

    let mut state = session.state().clone();
    state.day = 31;
    session.restore(Snapshot::new(3, state));
    session.resolve("plane_raffle_win", 0).unwrap();
    for _ in 0..2 {
        assert!(matches!(
            session.resolve("plane_raffle_win", 0),
            Err(SessionError::Resolve(ResolveError::NotEligible(_)))
        ));
    }
    assert_eq!(session.state().occurrences("plane_raffle_win"), 1);
    assert_eq!(session.state().stats.flight_hours, 10.0);
}

#[test]
fn malformed_conditions_in_extra_content_are_skipped() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(
        file,
        r#"{{
            "schema_version": 1,
            "events": [
                {{ "id": "charisma_check", "text": "Smile at the DPE.", "conditions": ["stats.charisma > 5"],
                   "options": [{{ "text": "Smile", "outcome": "Nothing." }}] }},
                {{ "id": "hangar_cat", "text": "A cat adopts the hangar.", "probability": 0.2,
                   "options": [{{ "text": "Pet it", "impact": {{ "morale": 5 }}, "outcome": "Purr." }}] }}
            ]
        }}"#
    )
    .unwrap();

    let mut ctx = EngineContext::builtin().unwrap();
    assert_eq!(ctx.merge_catalog_file(file.path()).unwrap(), 2);
    let mut state = sturdy_student();
    state.day = 5;
    let eligible = eligible_events(&ctx.catalog, &state, &ctx.config);
    assert!(eligible.iter().any(|event| event.id == "hangar_cat"));
    assert!(eligible.iter().all(|event| event.id != "charisma_check"));
}

#[test]
fn colliding_extra_content_is_rejected() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(
        file,
        r#"{{ "events": [ {{ "id": "cfi_late", "text": "Again?", "options": [{{ "text": "Sigh", "outcome": "Sigh." }}] }} ] }}"#
    )
    .unwrap();
    let mut ctx = EngineContext::builtin().unwrap();
    let before = ctx.catalog.len();
    assert!(ctx.merge_catalog_file(file.path()).is_err());
    assert_eq!(ctx.catalog.len(), before);
}
