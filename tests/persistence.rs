use ppl_trainer::config::EngineConfig;
use ppl_trainer::core::{EngineContext, Session};
use ppl_trainer::persistence::SaveDb;
use ppl_trainer::simulation::Action;

fn play_until_ended(session: &mut Session, mut check: impl FnMut(&Session)) {
    let mut turn = 0;
    while !session.state().game_ended {
        if let Some(event) = session.pending_event() {
            session.choose(turn % event.options.len()).unwrap();
        } else if session.perform(Action::Study).is_err() {
            session.perform(Action::Rest).unwrap();
        }
        check(&*session);
        turn += 1;
        assert!(turn < 5_000);
    }
}

#[test]
fn finished_games_land_in_the_archive() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("saves.db");
    let config = EngineConfig {
        persist_every_turn: true,
        ..EngineConfig::default()
    };
    let ctx = EngineContext::with_config(config).unwrap();
    let mut session = Session::new(ctx, 77).with_repository(Box::new(SaveDb::open(&path).unwrap()));

    let mut checked_slot = false;
    play_until_ended(&mut session, |session| {
        if checked_slot || session.state().game_ended {
            return;
        }
        let reader = SaveDb::open(&path).unwrap();
        let slot = reader.load_continue().unwrap().expect("continue slot written");
        assert_eq!(&slot.state, session.state());
        assert_eq!(slot.seed, 77);
        checked_slot = true;
    });
    assert!(checked_slot);

    let last = session.last_ended_game().unwrap().expect("game archived");
    assert_eq!(Some(last.ending), session.state().ending_type);
    assert_eq!(last.day, session.state().day);
    assert_eq!(last.seed, 77);
    assert_eq!(&last.snapshot.state, session.state());

    let reopened = SaveDb::open(&path).unwrap();
    assert!(reopened.load_continue().unwrap().is_none());
    assert_eq!(reopened.ended_games().unwrap().len(), 1);
}

#[test]
fn resume_picks_up_the_continue_slot() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("saves.db");
    let config = EngineConfig {
        persist_every_turn: true,
        ..EngineConfig::default()
    };

    let mut first = Session::new(EngineContext::with_config(config.clone()).unwrap(), 12)
        .with_repository(Box::new(SaveDb::open(&path).unwrap()));
    first.perform(Action::Rest).unwrap();
    let saved = first.state().clone();
    drop(first);

    let repository = Box::new(SaveDb::open(&path).unwrap());
    let resumed = Session::resume(EngineContext::with_config(config).unwrap(), repository)
        .unwrap()
        .expect("a game to continue");
    assert_eq!(resumed.state(), &saved);
    assert_eq!(resumed.seed(), 12);
    // A restored session never carries a pending event.
    assert!(resumed.pending_event().is_none());
}

#[test]
fn empty_repository_has_nothing_to_resume() {
    let repository = Box::new(SaveDb::open_in_memory().unwrap());
    assert!(repository.last_ended().unwrap().is_none());
    let resumed = Session::resume(EngineContext::builtin().unwrap(), repository).unwrap();
    assert!(resumed.is_none());
}

#[test]
fn snapshot_files_restore_the_same_game() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("day.json");

    let mut session = Session::new(EngineContext::builtin().unwrap(), 9);
    for _ in 0..6 {
        if let Some(event) = session.pending_event() {
            session.choose(event.options.len() - 1).unwrap();
        } else {
            session.perform(Action::Rest).unwrap();
        }
    }
    session.save_to_path(&path).unwrap();

    let mut other = Session::new(EngineContext::builtin().unwrap(), 1);
    other.load_from_path(&path).unwrap();
    assert_eq!(other.state(), session.state());
    assert_eq!(other.seed(), 9);
    assert!(other.pending_event().is_none());
}

#[test]
fn corrupt_snapshot_files_are_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.json");
    std::fs::write(&path, "{ not json").unwrap();

    let mut session = Session::new(EngineContext::builtin().unwrap(), 4);
    let before = session.state().clone();
    assert!(session.load_from_path(&path).is_err());
    assert_eq!(session.state(), &before);
}
