use crate::data::catalog::{EventCategory, EventDefinition, EventOption};

const CATEGORY: EventCategory = EventCategory::Weather;

pub fn events() -> Vec<EventDefinition> {
    vec![
        EventDefinition::new(
            "perfect_flying_day",
            CATEGORY,
            "Severe clear! Calm winds, unlimited visibility, and smooth air. These days are rare!",
        )
        .weight(0.15)
        .when(&["last_action == fly", "weather == clear"])
        .options(vec![
            EventOption::new(
                "Extra flight time",
                &[("money", -150.0), ("morale", 20.0), ("flight_hours", 0.5)],
                "You extend the lesson. Perfect conditions for practice!",
            ),
            EventOption::new(
                "Normal lesson",
                &[("morale", 10.0)],
                "Great productive lesson in ideal conditions.",
            ),
            EventOption::new(
                "Practice everything",
                &[("knowledge", 15.0), ("safety", 10.0)],
                "You nail every maneuver in these perfect conditions!",
            ),
        ]),
        EventDefinition::new(
            "surprise_fog_bank",
            CATEGORY,
            "A fog bank rolls in from nowhere during your flight. Visibility dropping fast.",
        )
        .weight(0.1)
        .when(&["last_action == fly", "stats.flight_hours > 10"])
        .options(vec![
            EventOption::new(
                "Immediate return",
                &[("safety", 20.0)],
                "Smart decision. You land just before field goes IFR.",
            )
            .reputation(&[("safety", 2)]),
            EventOption::new(
                "Climb above",
                &[("knowledge", 10.0), ("safety", -5.0)],
                "You escape on top but now what? CFI talks you through it.",
            ),
            EventOption::new(
                "Scud run",
                &[("safety", -25.0), ("morale", -15.0)],
                "Terrible idea! CFI takes control immediately. Serious debrief coming.",
            )
            .reputation(&[("cfi", -2), ("safety", -2)]),
        ]),
        EventDefinition::new(
            "density_altitude_surprise",
            CATEGORY,
            "It's 95°F on the ramp. 'Today we learn about density altitude,' your CFI says ominously.",
        )
        .weight(0.1)
        .when(&["day > 60", "last_action == fly"])
        .options(vec![
            EventOption::new(
                "Calculate performance",
                &[("knowledge", 15.0), ("safety", 15.0)],
                "You calculate reduced performance. The takeoff roll is eye-opening!",
            ),
            EventOption::new(
                "Normal takeoff",
                &[("safety", -15.0), ("knowledge", 10.0)],
                "Using way more runway than expected! Valuable scary lesson.",
            ),
            EventOption::new(
                "Delay flight",
                &[("safety", 20.0), ("money", -50.0)],
                "You wait for evening cooler temps. Smart ADM but costs a reschedule fee.",
            ),
        ]),
        EventDefinition::new(
            "marginal_vfr_temptation",
            CATEGORY,
            "Ceilings at 2,800 and hazy. A renter at the FBO shrugs: 'It's legal. I'm going.'",
        )
        .weight(0.12)
        .when(&["weather == marginal", "stats.flight_hours > 5"])
        .options(vec![
            EventOption::new(
                "Personal minimums say no",
                &[("safety", 12.0), ("morale", -3.0)],
                "You write your personal minimums on an index card and tape it in your logbook.",
            )
            .reputation(&[("safety", 1)]),
            EventOption::new(
                "Ask your CFI",
                &[("knowledge", 10.0), ("safety", 5.0)],
                "Twenty minutes on the difference between legal and smart.",
            )
            .reputation(&[("cfi", 1)]),
            EventOption::new(
                "Tag along in the right seat",
                &[("morale", 5.0), ("safety", -8.0), ("fatigue", 6.0)],
                "The haze is worse up there than it looked. Nobody talks much on the way back.",
            ),
        ]),
        EventDefinition::new(
            "thunderstorm_day",
            CATEGORY,
            "A line of thunderstorms parks over the field. Every lesson is scrubbed.",
        )
        .weight(0.15)
        .when(&["weather == storms"])
        .options(vec![
            EventOption::new(
                "Study convective weather",
                &[("knowledge", 8.0), ("safety", 4.0)],
                "Cumulonimbus life cycles, microbursts and why you never fly under an anvil.",
            ),
            EventOption::new(
                "Hangar flying",
                &[("morale", 8.0), ("fatigue", -5.0)],
                "Coffee and stories with the old-timers while the rain hammers the roof.",
            )
            .reputation(&[("peers", 1)]),
        ]),
    ]
}
