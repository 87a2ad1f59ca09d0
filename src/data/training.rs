use crate::data::catalog::{deltas, EventCategory, EventDefinition, EventOption, ImpactError};
use crate::rng::{rounded_normal, RandomSource};
use crate::simulation::state::{GameState, StatDeltas};

const CATEGORY: EventCategory = EventCategory::Training;

pub fn events() -> Vec<EventDefinition> {
    vec![
        EventDefinition::new(
            "plane_maintenance",
            CATEGORY,
            "Your usual training plane is down for its 100-hour inspection. The only alternative is a more expensive model.",
        )
        .weight(0.2)
        .when(&["last_action == fly", "stats.flight_hours > 3"])
        .options(vec![
            EventOption::computed(
                "Fly the expensive one",
                glass_cockpit_lesson,
                "The G1000 equipped plane is amazing! Advanced avionics at an advanced price.",
            ),
            EventOption::new(
                "Ground school instead",
                &[("knowledge", 8.0), ("morale", -3.0)],
                "Productive study session, though you really wanted to fly.",
            ),
            EventOption::new(
                "Wait for your plane",
                &[("morale", -5.0)],
                "Frustrating delay, but you save money.",
            ),
        ]),
        EventDefinition::new(
            "crosswind_challenge",
            CATEGORY,
            "Winds are 15 knots at 40 degrees off the runway. Your CFI asks, 'Want to try it?'",
        )
        .weight(0.15)
        .when(&["last_action == fly", "stats.flight_hours > 5"])
        .options(vec![
            EventOption::new(
                "Let's do this!",
                &[("knowledge", 10.0), ("safety", 8.0), ("morale", 15.0)],
                "Challenging but you nail it! Major confidence boost.",
            ),
            EventOption::new(
                "Watch you demo first",
                &[("knowledge", 12.0), ("safety", 10.0)],
                "Smart choice. You learn the technique before trying it yourself.",
            ),
            EventOption::new(
                "Too windy for me",
                &[("safety", 15.0), ("morale", -5.0)],
                "Good ADM. Your CFI respects your conservative decision.",
            )
            .reputation(&[("cfi", 1)]),
        ]),
        EventDefinition::new(
            "radio_failure",
            CATEGORY,
            "During pattern work, your radio dies completely. Tower can't hear you.",
        )
        .weight(0.1)
        .when(&["last_action == fly", "stats.flight_hours > 8"])
        .options(vec![
            EventOption::new(
                "Squawk 7600",
                &[("knowledge", 20.0), ("safety", 15.0)],
                "Perfect! Tower sees your transponder code and clears traffic. You watch for light gun signals and land safely.",
            )
            .reputation(&[("atc", 1)]),
            EventOption::new(
                "Continue pattern normally",
                &[("safety", -10.0), ("knowledge", 5.0)],
                "Bad idea! Other aircraft can't hear your position calls. Tower frantically tries light signals.",
            ),
            EventOption::new(
                "Leave pattern immediately",
                &[("safety", -5.0), ("morale", -8.0), ("knowledge", 8.0)],
                "You turn out without proper communication. Should have squawked 7600 first!",
            ),
        ]),
        EventDefinition::new(
            "simulated_engine_failure",
            CATEGORY,
            "Without warning, your CFI pulls the power to idle. 'Engine failure, what do you do?'",
        )
        .weight(0.12)
        .when(&["stats.flight_hours > 8", "last_action == fly"])
        .options(vec![
            EventOption::new(
                "ABC checklist",
                &[("safety", 15.0), ("knowledge", 10.0)],
                "Airspeed, Best field, Checklist. Perfect execution of emergency procedure!",
            )
            .reputation(&[("cfi", 1)]),
            EventOption::new(
                "Find airport",
                &[("safety", -5.0), ("knowledge", 5.0)],
                "You try to glide to an airport 10 miles away. 'We'd never make it,' CFI explains.",
            ),
            EventOption::new(
                "Freeze up",
                &[("safety", -10.0), ("morale", -10.0)],
                "CFI takes control. 'We need to practice emergencies more.'",
            ),
        ]),
        EventDefinition::new(
            "lost_procedures_test",
            CATEGORY,
            "Your CFI covers the GPS and instruments. 'You're lost. Show me how you'd find yourself.'",
        )
        .weight(0.1)
        .when(&["stats.flight_hours > 12"])
        .options(vec![
            EventOption::new(
                "VOR triangulation",
                &[("knowledge", 15.0), ("safety", 10.0)],
                "You tune two VORs and triangulate perfectly. Old school navigation works!",
            ),
            EventOption::new(
                "Pilotage",
                &[("knowledge", 12.0), ("safety", 8.0)],
                "You identify landmarks and roads. Good visual navigation skills!",
            ),
            EventOption::new(
                "Admit confusion",
                &[("safety", 15.0), ("knowledge", 8.0)],
                "CFI appreciates honesty. You learn proper lost procedures together.",
            ),
        ]),
        EventDefinition::new(
            "night_flight_opportunity",
            CATEGORY,
            "Your CFI offers: 'Want to do some night flying? It's beautiful but different.'",
        )
        .weight(0.08)
        .rare(2)
        .when(&["stats.flight_hours > 25", "!chain.night_flying"])
        .options(vec![
            EventOption::new(
                "Absolutely!",
                &[("money", -300.0), ("knowledge", 20.0), ("morale", 15.0), ("night_hours", 1.0)],
                "City lights like stars below! You learn night illusions and procedures.",
            )
            .chain_start("night_flying"),
            EventOption::new(
                "Not ready",
                &[("safety", 10.0)],
                "Good ADM. You'll try when you're more confident.",
            ),
            EventOption::new(
                "Just pattern work",
                &[("money", -150.0), ("knowledge", 10.0)],
                "You stay in the pattern for night currency. Good compromise.",
            ),
        ]),
        EventDefinition::new(
            "spin_training_offer",
            CATEGORY,
            "An aerobatic instructor offers spin training. 'Every pilot should experience spins safely.'",
        )
        .weight(0.04)
        .rare(2)
        .when(&["stats.flight_hours > 20"])
        .options(vec![
            EventOption::new(
                "Sign me up!",
                &[("money", -400.0), ("knowledge", 25.0), ("safety", 20.0)],
                "Terrifying but educational! You'll never accidentally spin now.",
            )
            .reputation(&[("safety", 2)]),
            EventOption::new(
                "Maybe later",
                &[("morale", -2.0)],
                "You'll stick to stall recovery for now.",
            ),
            EventOption::new(
                "Watch from ground",
                &[("knowledge", 5.0)],
                "You watch another student's lesson. Looks intense!",
            ),
        ]),
        EventDefinition::new(
            "new_regulations",
            CATEGORY,
            "The FAA just announced changes to BasicMed requirements, potentially affecting your future flying.",
        )
        .weight(0.08)
        .when(&["stats.knowledge > 25"])
        .options(vec![
            EventOption::new(
                "Research the changes",
                &[("knowledge", 10.0)],
                "You understand the new rules. Knowledge of regs will help on your written test.",
            ),
            EventOption::new(
                "Ask CFI to explain",
                &[("knowledge", 8.0), ("morale", 3.0)],
                "Your instructor gives a practical breakdown of what it means for you.",
            ),
        ]),
        EventDefinition::new(
            "celebrity_cfi",
            CATEGORY,
            "Your regular CFI is sick. The substitute? An aerobatic champion with a famous last name.",
        )
        .weight(0.003)
        .once()
        .memorable()
        .when(&["stats.flight_hours > 10"])
        .options(vec![
            EventOption::new(
                "Request aerobatic lesson",
                &[("knowledge", 30.0), ("fatigue", 20.0), ("morale", 40.0)],
                "Mind-blowing experience! Loops, rolls, and wisdom from a master.",
            )
            .reputation(&[("cfi", 2)]),
            EventOption::new(
                "Stick to syllabus",
                &[("knowledge", 20.0), ("safety", 15.0)],
                "Even basic maneuvers are art with this instructor. Precision flying at its best.",
            ),
            EventOption::new(
                "Ask for autograph",
                &[("morale", 25.0)],
                "They sign your logbook with a sketch of an airplane. This is going on the wall!",
            )
            .reputation(&[("peers", 1)]),
        ]),
        EventDefinition::new(
            "written_test_anxiety",
            CATEGORY,
            "The knowledge test is next week. You keep dreaming about airspace classes.",
        )
        .weight(0.12)
        .once()
        .when(&["stats.knowledge >= 45", "!milestone.pre_solo_written_passed"])
        .options(vec![
            EventOption::new(
                "Cram every night",
                &[("knowledge", 12.0), ("fatigue", 12.0)],
                "Flashcards at breakfast, practice tests at lunch. It sticks, mostly.",
            ),
            EventOption::new(
                "Steady review",
                &[("knowledge", 8.0), ("morale", 5.0)],
                "An hour a day and a full night's sleep. You walk in calm.",
            ),
            EventOption::new(
                "Wing it",
                &[("morale", 5.0), ("knowledge", -3.0)],
                "Confidence is high. Preparation is not.",
            ),
        ]),
    ]
}

/// Premium-rate dual lesson in the glass-cockpit trainer.
fn glass_cockpit_lesson(
    _state: &GameState,
    rng: &mut dyn RandomSource,
) -> Result<StatDeltas, ImpactError> {
    let aircraft_rate = rounded_normal(rng, 235.0, 15.0, 200.0, 280.0);
    let cfi_rate = rounded_normal(rng, 85.0, 12.0, 60.0, 110.0);
    let hobbs = rng.normal(1.2, 0.3).clamp(0.7, 1.8);
    if !hobbs.is_finite() {
        return Err(ImpactError(format!("hobbs time {hobbs} is not finite")));
    }
    let hobbs = (hobbs * 10.0).round() / 10.0;
    let cost = (aircraft_rate * hobbs).round() + cfi_rate * 2.0;
    Ok(deltas(&[
        ("money", -cost),
        ("knowledge", 8.0),
        ("flight_hours", hobbs),
        ("fatigue", 8.0),
    ]))
}
