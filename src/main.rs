use std::env;
use std::io::{self, Write};
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use tracing_subscriber::EnvFilter;

use ppl_trainer::config::EngineConfig;
use ppl_trainer::core::{ChoiceReport, EngineContext, Session, TurnReport};
use ppl_trainer::data::catalog::EventSummary;
use ppl_trainer::persistence::{GameRepository, SaveDb};
use ppl_trainer::simulation::time::DayReport;
use ppl_trainer::simulation::Action;

#[derive(Debug, Default)]
struct CliArgs {
    config: Option<PathBuf>,
    db: Option<PathBuf>,
    seed: Option<u64>,
    catalog: Option<PathBuf>,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    let args = parse_args(env::args().collect());

    let config = match &args.config {
        Some(path) => match EngineConfig::from_file(path) {
            Ok(config) => config,
            Err(err) => {
                eprintln!("Failed to load config: {}", err);
                std::process::exit(1);
            }
        },
        None => EngineConfig::builtin(),
    };

    let mut ctx = match EngineContext::with_config(config) {
        Ok(ctx) => ctx,
        Err(err) => {
            eprintln!("Failed to build event catalog: {}", err);
            std::process::exit(1);
        }
    };
    if let Some(path) = &args.catalog {
        if let Err(err) = ctx.merge_catalog_file(path) {
            eprintln!("Failed to load extra events: {}", err);
            std::process::exit(1);
        }
    }

    let seed = args.seed.unwrap_or_else(clock_seed);
    let mut session = match &args.db {
        Some(path) => {
            let db = match SaveDb::open(path) {
                Ok(db) => db,
                Err(err) => {
                    eprintln!("Failed to open save DB: {}", err);
                    std::process::exit(1);
                }
            };
            print_last_ended(&db);
            let session = match db.load_continue() {
                Ok(Some(snapshot)) => {
                    println!("Continuing saved game from day {}.", snapshot.state.day);
                    Session::from_snapshot(ctx, snapshot)
                }
                Ok(None) => Session::new(ctx, seed),
                Err(err) => {
                    eprintln!("Continue slot unreadable, starting fresh: {}", err);
                    Session::new(ctx, seed)
                }
            };
            session.with_repository(Box::new(db))
        }
        None => Session::new(ctx, seed),
    };

    println!("PPL Trainer: earn your private pilot certificate in {} days.", session.context().config.max_days);
    println!("Seed {}. Type `help` for commands.", session.seed());
    print_status(&session);

    loop {
        print!("> ");
        if io::stdout().flush().is_err() {
            break;
        }

        let mut input = String::new();
        match io::stdin().read_line(&mut input) {
            Ok(0) | Err(_) => break,
            Ok(_) => {}
        }
        let trimmed = input.trim();
        if trimmed.is_empty() {
            continue;
        }

        let mut parts = trimmed.split_whitespace();
        let cmd = parts.next().unwrap_or("").to_lowercase();

        match cmd.as_str() {
            "quit" | "exit" => break,
            "help" => {
                println!("Commands: status | actions | do <action> | event | eligible | choose <n> | next | save <path> | load <path> | history | chains | quit");
            }
            "status" => print_status(&session),
            "actions" => {
                for offer in session.available_actions() {
                    let mark = if offer.available { "+" } else { "-" };
                    print!("  {} {:<15} {}", mark, offer.action.as_str(), offer.action.label());
                    if let Some(reason) = &offer.reason {
                        print!(" ({})", reason);
                    }
                    if let Some(warning) = offer.warning {
                        print!(" [{}]", warning);
                    }
                    println!();
                }
            }
            "do" => {
                let Some(raw) = parts.next() else {
                    println!("Usage: do <action>");
                    continue;
                };
                match raw.parse::<Action>() {
                    Ok(action) => match session.perform(action) {
                        Ok(report) => print_turn(&report),
                        Err(err) => println!("{}", err),
                    },
                    Err(_) => println!("Unknown action: {}", raw),
                }
            }
            "event" => match session.draw_event() {
                Some(event) => print_event(&event),
                None => println!("Nothing unusual today."),
            },
            "eligible" => {
                for event in session.list_eligible_events() {
                    println!("  {} [{:?}]", event.id, event.category);
                }
            }
            "choose" => {
                let Some(raw) = parts.next() else {
                    println!("Usage: choose <n>");
                    continue;
                };
                match raw.parse::<usize>() {
                    Ok(n) if n >= 1 => match session.choose(n - 1) {
                        Ok(report) => print_choice(&report),
                        Err(err) => println!("{}", err),
                    },
                    _ => println!("Invalid choice: {}", raw),
                }
            }
            "next" => match session.next_day() {
                Ok(turn) => {
                    print_day(&turn.day);
                    if let Some(event) = &turn.event {
                        print_event(event);
                    }
                }
                Err(err) => println!("{}", err),
            },
            "save" => match parts.next() {
                Some(path) => match session.save_to_path(path) {
                    Ok(()) => println!("Saved to {}", path),
                    Err(err) => println!("Save failed: {}", err),
                },
                None => println!("Usage: save <path>"),
            },
            "load" => match parts.next() {
                Some(path) => match session.load_from_path(path) {
                    Ok(()) => print_status(&session),
                    Err(err) => println!("Load failed: {}", err),
                },
                None => println!("Usage: load <path>"),
            },
            "history" => {
                let history = &session.state().event_history;
                if history.is_empty() {
                    println!("No events yet.");
                }
                for entry in history {
                    let star = if entry.memorable { "*" } else { " " };
                    println!("  {}day {:>3}: {} (choice {})", star, entry.day, entry.event_id, entry.choice_index + 1);
                }
            }
            "chains" => {
                let state = session.state();
                if state.active_chains.is_empty() {
                    println!("No active storylines.");
                }
                for (id, chain) in &state.active_chains {
                    println!(
                        "  {} phase={} age={}d payload={}",
                        id,
                        chain.phase,
                        chain.age(state.day),
                        serde_json::Value::Object(chain.payload.clone())
                    );
                }
            }
            _ => println!("Unknown command. Type `help`."),
        }

        if session.state().game_ended {
            print_ending(&session);
            break;
        }
    }
}

fn parse_args(args: Vec<String>) -> CliArgs {
    let mut iter = args.iter().skip(1);
    let mut parsed = CliArgs::default();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--config" => {
                if let Some(value) = iter.next() {
                    parsed.config = Some(PathBuf::from(value));
                }
            }
            "--db" => {
                if let Some(value) = iter.next() {
                    parsed.db = Some(PathBuf::from(value));
                }
            }
            "--catalog" => {
                if let Some(value) = iter.next() {
                    parsed.catalog = Some(PathBuf::from(value));
                }
            }
            "--seed" => {
                if let Some(value) = iter.next() {
                    match value.parse::<u64>() {
                        Ok(seed) => parsed.seed = Some(seed),
                        Err(_) => eprintln!("Ignoring invalid seed: {}", value),
                    }
                }
            }
            _ => {}
        }
    }
    parsed
}

fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_nanos() as u64)
        .unwrap_or(0)
}

fn print_last_ended(db: &SaveDb) {
    match GameRepository::last_ended(db) {
        Ok(Some(game)) => println!(
            "Last game: {} on day {} with {:.1} flight hours.",
            game.ending.title(),
            game.day,
            game.flight_hours
        ),
        Ok(None) => {}
        Err(err) => println!("Archive unavailable: {}", err),
    }
}

fn print_status(session: &Session) {
    let state = session.state();
    let stats = &state.stats;
    println!(
        "Day {} | {} | Phase: {}",
        state.day,
        session.weather().name(),
        state.phase.label()
    );
    println!(
        "  Money ${:.0} | Hours {:.1} (XC {:.1}, night {:.1})",
        stats.money, stats.flight_hours, stats.xc_hours, stats.night_hours
    );
    println!(
        "  Morale {:.0} | Knowledge {:.0} | Safety {:.0} | Fatigue {:.0}",
        stats.morale, stats.knowledge, stats.safety, stats.fatigue
    );
    let reputation: Vec<String> = state
        .reputation
        .iter()
        .map(|(faction, value)| format!("{}={}", faction, value))
        .collect();
    println!("  Reputation: {}", reputation.join(" "));
    if let Some(event) = session.pending_event() {
        print_event(&event);
    }
}

fn print_deltas<'a>(deltas: impl IntoIterator<Item = (&'a String, &'a f64)>) {
    let parts: Vec<String> = deltas
        .into_iter()
        .filter(|(_, delta)| delta.abs() > f64::EPSILON)
        .map(|(stat, delta)| format!("{} {:+.1}", stat, delta))
        .collect();
    if !parts.is_empty() {
        println!("  ({})", parts.join(", "));
    }
}

fn print_turn(report: &TurnReport) {
    println!("{}", report.action.message);
    print_deltas(&report.action.deltas);
    for milestone in &report.action.milestones {
        println!("  ** {} **", milestone.title());
    }
    if let Some(day) = &report.day {
        print_day(day);
    }
    if let Some(event) = &report.event {
        print_event(event);
    }
}

fn print_choice(report: &ChoiceReport) {
    println!("{}", report.resolution.outcome);
    print_deltas(&report.resolution.stat_deltas);
    for milestone in &report.resolution.milestones {
        println!("  ** {} **", milestone.title());
    }
    if let Some(day) = &report.day {
        print_day(day);
    }
    if let Some(event) = &report.event {
        print_event(event);
    }
}

fn print_day(day: &DayReport) {
    println!("--- Day {} ({}) ---", day.day, day.weather.name());
    for milestone in &day.milestones {
        println!("  ** {} **", milestone.title());
    }
    for chain in &day.evicted_chains {
        println!("  The {} storyline fades away.", chain);
    }
}

fn print_event(event: &EventSummary) {
    let star = if event.memorable { " *" } else { "" };
    println!("EVENT{}: {}", star, event.text);
    for (idx, option) in event.options.iter().enumerate() {
        println!("  {}. {}", idx + 1, option);
    }
}

fn print_ending(session: &Session) {
    let state = session.state();
    if let Some(ending) = state.ending_type {
        println!("=== {} ===", ending.title());
        println!("{}", ending.subtitle());
        println!(
            "Day {} | {:.1} flight hours | ${:.0} left",
            state.day, state.stats.flight_hours, state.stats.money
        );
    }
}
