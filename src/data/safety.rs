use serde_json::json;

use crate::data::catalog::{EventCategory, EventDefinition, EventOption};
use crate::simulation::endgame::EndingKind;

const CATEGORY: EventCategory = EventCategory::Safety;

pub fn events() -> Vec<EventDefinition> {
    vec![
        EventDefinition::new(
            "near_miss",
            CATEGORY,
            "Traffic suddenly appears at your altitude, same direction. Tower didn't call it out.",
        )
        .weight(0.08)
        .when(&["stats.flight_hours > 10", "last_action == fly"])
        .options(vec![
            EventOption::new(
                "Immediate evasive action",
                &[("safety", 15.0), ("morale", -8.0), ("knowledge", 10.0)],
                "Quick thinking! You realize the importance of always scanning for traffic.",
            )
            .reputation(&[("safety", 2)]),
            EventOption::new(
                "Report to Tower",
                &[("safety", 12.0), ("knowledge", 8.0)],
                "Tower apologizes and vectors the traffic. You learn about pilot advocacy.",
            )
            .reputation(&[("atc", 1)]),
        ]),
        EventDefinition::new(
            "weather_deteriorating",
            CATEGORY,
            "Clouds are dropping fast during your cross-country. Visibility decreasing.",
        )
        .weight(0.12)
        .when(&["stats.flight_hours > 20"])
        .options(vec![
            EventOption::new(
                "Immediate 180",
                &[("safety", 20.0), ("knowledge", 10.0), ("morale", -3.0)],
                "Perfect decision! You escape deteriorating conditions safely.",
            )
            .chain_start("weather_diversion_good")
            .chain_data(json!({ "decision": "diverted" })),
            EventOption::new(
                "Descend and continue",
                &[("safety", -15.0), ("morale", -10.0), ("knowledge", 5.0)],
                "Bad choice. Your CFI takes control. Scary lesson in weather respect.",
            )
            .reputation(&[("cfi", -1)]),
            EventOption::new(
                "Land immediately",
                &[("safety", 18.0), ("knowledge", 12.0), ("money", -100.0)],
                "You divert to nearest airport. Expensive Uber home, but safe!",
            ),
        ]),
        EventDefinition::new(
            "local_accident",
            CATEGORY,
            "A plane crashed at a nearby airport after attempting to land with a tailwind. Both occupants survived.",
        )
        .weight(0.1)
        .when(&["stats.flight_hours > 5", "stats.safety > 40"])
        .options(vec![
            EventOption::new(
                "Review wind decisions",
                &[("knowledge", 10.0), ("safety", 15.0), ("morale", -5.0)],
                "Sobering reminder about the importance of wind awareness and go-around decisions.",
            ),
            EventOption::new(
                "Avoid the news",
                &[("morale", 2.0), ("safety", -3.0)],
                "You try not to think about it, but ignoring safety lessons isn't wise.",
            ),
        ]),
        EventDefinition::new(
            "airventure_bounce",
            CATEGORY,
            "Video from Oshkosh shows a Bonanza bouncing three times before the left wing strikes the ground. The pilot was fine but shaken.",
        )
        .weight(0.1)
        .when(&["stats.flight_hours > 3"])
        .options(vec![
            EventOption::new(
                "Study landing technique",
                &[("knowledge", 8.0), ("safety", 10.0)],
                "You learn about porpoising and the go-around decision. Valuable lesson.",
            ),
            EventOption::new(
                "That's why we train",
                &[("safety", 5.0), ("morale", 3.0)],
                "You appreciate the importance of solid fundamentals.",
            ),
        ]),
        EventDefinition::new(
            "health_scare",
            CATEGORY,
            "You've been having dizzy spells. The doctor wants tests that could affect your medical.",
        )
        .weight(0.08)
        .when(&["stats.fatigue > 50"])
        .options(vec![
            EventOption::new(
                "Get checked immediately",
                &[("money", -300.0), ("safety", 15.0), ("morale", -10.0)],
                "Just dehydration and fatigue. Relief! But a reminder to take care of yourself.",
            ),
            EventOption::new(
                "Wait and see",
                &[("safety", -20.0), ("morale", -15.0)],
                "Probably nothing, but the worry affects your flying confidence.",
            ),
        ]),
        EventDefinition::new(
            "bird_strike",
            CATEGORY,
            "THUMP! A large bird hits your windscreen at 500 feet. Visibility compromised, feathers everywhere.",
        )
        .weight(0.015)
        .memorable()
        .when(&["last_action == fly", "stats.flight_hours > 5"])
        .options(vec![
            EventOption::new(
                "Immediate landing",
                &[("safety", 25.0), ("money", -400.0)],
                "Textbook emergency response. You declare and land safely. Expensive windscreen repair.",
            )
            .reputation(&[("cfi", 2), ("safety", 2)]),
            EventOption::new(
                "Continue pattern",
                &[("safety", -30.0), ("morale", -20.0)],
                "CFI takes controls immediately. 'What were you thinking?!' Bad decision.",
            )
            .reputation(&[("cfi", -2), ("safety", -2)]),
            EventOption::new(
                "Request priority",
                &[("safety", 20.0), ("knowledge", 15.0)],
                "ATC clears all traffic. Perfect emergency handling under pressure.",
            )
            .reputation(&[("atc", 1), ("safety", 2)]),
        ]),
        EventDefinition::new(
            "engine_failure_real",
            CATEGORY,
            "The engine coughs, sputters, and goes silent. This isn't a drill. 2,500 feet AGL.",
        )
        .weight(0.01)
        .memorable()
        .when(&["stats.flight_hours > 15", "last_action == fly"])
        .options(vec![
            EventOption::new(
                "Best glide immediately",
                &[("safety", 30.0), ("knowledge", 25.0)],
                "Perfect emergency procedure. You pick a field and execute flawlessly. CFI is impressed.",
            )
            .reputation(&[("cfi", 3), ("safety", 3)]),
            EventOption::new(
                "Troubleshoot first",
                &[("safety", 15.0), ("knowledge", 20.0)],
                "Mixture, mags, fuel... It restarts! Still land immediately but engine is running.",
            )
            .reputation(&[("cfi", 2)]),
            EventOption::new(
                "Panic",
                &[("safety", -20.0), ("morale", -30.0)],
                "CFI saves the day while you freeze up. You'll need remedial emergency training.",
            )
            .reputation(&[("cfi", -2)]),
        ]),
        EventDefinition::new(
            "wake_turbulence_encounter",
            CATEGORY,
            "Following a 737 too closely, you hit their wake. The plane rolls 60 degrees!",
        )
        .weight(0.02)
        .when(&["stats.flight_hours > 10", "last_action == fly"])
        .options(vec![
            EventOption::new(
                "Full opposite controls",
                &[("safety", 25.0), ("knowledge", 20.0)],
                "You recover from the upset. Heart pounding but successful!",
            )
            .reputation(&[("cfi", 2), ("safety", 2)]),
            EventOption::new(
                "Ride it out",
                &[("safety", -15.0), ("morale", -10.0)],
                "Bad choice! CFI takes control and recovers. Lucky escape.",
            ),
            EventOption::new(
                "Should've waited",
                &[("knowledge", 20.0), ("safety", 15.0)],
                "You reflect on wake turbulence separation. Valuable learning moment.",
            ),
        ]),
        EventDefinition::new(
            "overtaking_aircraft_above",
            CATEGORY,
            "On solo XC departure, someone overtakes you FROM ABOVE! Traffic alerts going crazy. They won't respond.",
        )
        .weight(0.07)
        .when(&["milestone.first_solo", "stats.flight_hours > 25", "!chain.faa_report"])
        .options(vec![
            EventOption::new(
                "Descend immediately",
                &[("safety", 20.0), ("morale", -10.0)],
                "Safe separation achieved. You report the dangerous pilot to FAA.",
            )
            .chain_start("faa_report"),
            EventOption::new(
                "Scold on frequency",
                &[("morale", 15.0)],
                "'Aircraft overtaking, you nearly hit a STUDENT SOLO!' Other pilots join in scolding.",
            )
            .reputation(&[("atc", 1), ("peers", 2)]),
            EventOption::new(
                "Document everything",
                &[("safety", 15.0), ("knowledge", 15.0)],
                "You file a NASA ASRS report. CFI proud of your professionalism.",
            )
            .reputation(&[("cfi", 1), ("safety", 2)]),
        ]),
        EventDefinition::new(
            "straight_in_controversy",
            CATEGORY,
            "Approaching non-towered airport on solo XC. Long final looks clear. Straight-in or pattern?",
        )
        .weight(0.1)
        .when(&["milestone.first_solo", "stats.flight_hours > 25"])
        .options(vec![
            EventOption::new(
                "Straight-in approach",
                &[("money", -20.0), ("morale", -15.0)],
                "Airport manager on CTAF: 'WHO'S DOING A STRAIGHT-IN?!' Pattern etiquette learned the hard way.",
            )
            .reputation(&[("peers", -2)])
            .chain_start("straight_in_scolding"),
            EventOption::new(
                "Full pattern entry",
                &[("money", -30.0), ("safety", 15.0), ("morale", 10.0)],
                "Extra fuel but proper procedure. Local pilots: 'Good job, student pilot!'",
            )
            .reputation(&[("peers", 2), ("safety", 1)]),
            EventOption::new(
                "Ask on CTAF",
                &[("knowledge", 15.0), ("safety", 20.0)],
                "'Traffic permitting, request straight-in.' Locals appreciate you asking. Smart!",
            )
            .reputation(&[("peers", 1)]),
        ]),
        EventDefinition::new(
            "student_pilot_magic_words",
            CATEGORY,
            "Busy pattern at uncontrolled field. You're getting squeezed out by faster traffic.",
        )
        .weight(0.12)
        .when(&["milestone.first_solo", "!milestone.checkride_passed"])
        .options(vec![
            EventOption::new(
                "Announce 'Student pilot'",
                &[("safety", 20.0), ("morale", 15.0)],
                "Magic words! Everyone gives you space. 'Student pilot, you're number 1, we'll extend.'",
            )
            .reputation(&[("peers", 2)]),
            EventOption::new(
                "Act experienced",
                &[("safety", -15.0), ("morale", -10.0)],
                "You try to keep up. Nearly get run over by a Bonanza. Should've spoken up!",
            )
            .reputation(&[("safety", -1)]),
            EventOption::new(
                "Leave pattern",
                &[("safety", 15.0), ("money", -40.0)],
                "You exit and re-enter when clear. Safe but expensive extra fuel.",
            ),
        ]),
        EventDefinition::new(
            "runway_closure_surprise",
            CATEGORY,
            "You arrive at destination to find runway NOTAM'd closed for seal coating. No one checked NOTAMs.",
        )
        .weight(0.08)
        .when(&["stats.flight_hours > 20", "milestone.first_solo"])
        .options(vec![
            EventOption::new(
                "Divert safely",
                &[("safety", 25.0), ("money", -100.0), ("knowledge", 15.0)],
                "Expensive lesson about ALWAYS checking NOTAMs. CFI impressed with handling.",
            )
            .reputation(&[("cfi", 1), ("safety", 2)]),
            EventOption::new(
                "Land on taxiway",
                &[("safety", -40.0), ("money", -5000.0), ("morale", -50.0)],
                "TERRIBLE IDEA! FAA violation. Certificate action. Career-ending decision!",
            )
            .reputation(&[("safety", -5), ("cfi", -5)])
            .trigger_ending(EndingKind::SafetyViolation),
            EventOption::new(
                "Return home",
                &[("safety", 20.0), ("money", -150.0), ("morale", -15.0)],
                "Expensive round trip to nowhere. You'll never forget NOTAMs again.",
            ),
        ]),
    ]
}
