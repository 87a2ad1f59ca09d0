use serde_json::json;

use crate::data::catalog::{EventCategory, EventDefinition, EventOption};

const CATEGORY: EventCategory = EventCategory::Equipment;

pub fn events() -> Vec<EventDefinition> {
    vec![
        EventDefinition::new(
            "attitude_indicator_failure",
            CATEGORY,
            "The attitude indicator starts tumbling during flight. You're in partial panel.",
        )
        .weight(0.05)
        .rare(2)
        .when(&["stats.flight_hours > 15", "last_action == fly"])
        .options(vec![
            EventOption::new(
                "Use turn coordinator",
                &[("knowledge", 20.0), ("safety", 15.0)],
                "You fly partial panel successfully. Great instrument scan!",
            ),
            EventOption::new(
                "Visual flight only",
                &[("safety", 10.0)],
                "You maintain visual references. Works in good weather.",
            ),
            EventOption::new(
                "Get confused",
                &[("safety", -10.0), ("morale", -5.0)],
                "Spatial disorientation starts. CFI helps you recover.",
            ),
        ]),
        EventDefinition::new(
            "comm_radio_static",
            CATEGORY,
            "Your radio starts crackling with static. Communication is getting difficult.",
        )
        .weight(0.08)
        .rare(3)
        .when(&["last_action == fly"])
        .options(vec![
            EventOption::new(
                "Troubleshoot systematically",
                &[("knowledge", 10.0), ("safety", 10.0)],
                "You check connections, squelch, and frequency. Problem identified!",
            )
            .chain_start("radio_issues")
            .chain_data(json!({ "handled_well": true })),
            EventOption::new(
                "Switch radios",
                &[("safety", 5.0)],
                "Com 2 works fine. Good resource management.",
            ),
            EventOption::new(
                "Continue with static",
                &[("safety", -5.0), ("fatigue", 5.0)],
                "You struggle through it. ATC is getting annoyed with repeat requests.",
            )
            .chain_start("radio_issues")
            .chain_data(json!({ "handled_well": false })),
        ]),
        EventDefinition::new(
            "gps_database_expired",
            CATEGORY,
            "The GPS shows 'Database Expired' warning. Your CFI asks, 'Can we still use it?'",
        )
        .weight(0.1)
        .when(&["stats.flight_hours > 10"])
        .options(vec![
            EventOption::new(
                "VFR only",
                &[("knowledge", 15.0), ("safety", 10.0)],
                "Correct! Expired database is ok for VFR situational awareness only.",
            ),
            EventOption::new(
                "Not at all",
                &[("knowledge", 8.0)],
                "Too conservative. CFI explains proper usage rules.",
            ),
            EventOption::new(
                "Who cares?",
                &[("safety", -10.0), ("knowledge", 5.0)],
                "Wrong attitude! CFI explains the legal implications.",
            ),
        ]),
        EventDefinition::new(
            "warbird_taxi_blast",
            CATEGORY,
            "P-51 Mustang taxis up behind you. That's a LOT of prop wash about to hit!",
        )
        .weight(0.04)
        .memorable()
        .when(&["stats.flight_hours > 15", "!chain.warbird_tour"])
        .options(vec![
            EventOption::new(
                "Request immediate",
                &[("safety", 20.0), ("knowledge", 15.0)],
                "Tower: 'Cleared immediate taxi, that Mustang packs a punch!' Smart call.",
            )
            .reputation(&[("atc", 1)]),
            EventOption::new(
                "Brace for wash",
                &[("safety", -10.0), ("morale", 10.0)],
                "Your Cessna rocks violently! But you got a wave from a P-51 pilot!",
            ),
            EventOption::new(
                "Shut down engine",
                &[("safety", 15.0), ("money", -30.0)],
                "You wait safely. The Mustang pilot apologizes and offers a tour later!",
            )
            .chain_start("warbird_tour"),
        ]),
        EventDefinition::new(
            "fuel_cap_missing",
            CATEGORY,
            "Walking around after landing, you notice the left fuel cap is gone. Blue streaks run down the wing.",
        )
        .weight(0.06)
        .rare(1)
        .when(&["stats.flight_hours > 6"])
        .options(vec![
            EventOption::new(
                "Report it and squawk the plane",
                &[("safety", 12.0), ("knowledge", 5.0)],
                "Maintenance finds the cap in the grass by the fuel pit. The preflight checklist gets a new line.",
            )
            .reputation(&[("fbo", 1)]),
            EventOption::new(
                "Borrow a cap from the hangar",
                &[("money", -25.0), ("safety", -3.0)],
                "It fits. Mostly. You decide not to think about the siphoning.",
            ),
        ]),
    ]
}
