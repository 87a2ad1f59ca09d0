//! Catalog follow-ups tied to a chain. They are only eligible while the
//! linked chain is active.

use serde_json::json;

use crate::data::catalog::{EventCategory, EventDefinition, EventOption};

const CATEGORY: EventCategory = EventCategory::Consequence;

pub fn events() -> Vec<EventDefinition> {
    vec![
        EventDefinition::new(
            "ipad_overheating",
            CATEGORY,
            "Your iPad shuts down from heat during a critical phase of flight. ForeFlight is gone.",
        )
        .weight(0.15)
        .once()
        .chain_link("foreflight_user")
        .when(&["days_since.foreflight_user > 20"])
        .options(vec![
            EventOption::new(
                "Revert to paper backup",
                &[("safety", 15.0), ("knowledge", 10.0)],
                "Good thing you kept paper charts! Always have backups.",
            ),
            EventOption::new(
                "Wait for cooling",
                &[("safety", -10.0), ("morale", -5.0)],
                "You circle while waiting. Not ideal in busy airspace.",
            ),
            EventOption::new(
                "Use phone",
                &[("safety", 5.0), ("fatigue", 10.0)],
                "Your phone saves the day but the screen is tiny.",
            ),
        ]),
        EventDefinition::new(
            "outdated_chart_drama",
            CATEGORY,
            "The untowered airport changed traffic pattern direction last week. Your paper chart is old.",
        )
        .weight(0.15)
        .once()
        .chain_link("paper_charts_user")
        .when(&["days_since.paper_charts_user > 15"])
        .options(vec![
            EventOption::new(
                "Call UNICOM",
                &[("safety", 10.0), ("knowledge", 5.0)],
                "Smart move! You get current info and enter the pattern correctly.",
            ),
            EventOption::new(
                "Circle and observe",
                &[("safety", 15.0), ("money", -30.0)],
                "You spot other traffic and follow them. Extra fuel burned but safe.",
            ),
            EventOption::new(
                "Just guess",
                &[("safety", -20.0), ("morale", -10.0)],
                "Wrong pattern! You cause confusion and get yelled at on CTAF.",
            )
            .reputation(&[("peers", -1)]),
        ]),
        EventDefinition::new(
            "study_buddy_offer",
            CATEGORY,
            "Remember the student you helped out? They aced their written and offer to tutor you.",
        )
        .weight(0.8)
        .once()
        .chain_link("helped_student")
        .when(&["days_since.helped_student > 10"])
        .options(vec![
            EventOption::new(
                "Study together",
                &[("knowledge", 20.0), ("morale", 15.0)],
                "Their study methods are amazing! Your knowledge skyrockets.",
            )
            .reputation(&[("peers", 1)]),
            EventOption::new(
                "Too proud",
                &[("knowledge", 5.0)],
                "You decline but they share their notes anyway. Good people.",
            ),
            EventOption::new(
                "Rain check",
                &[("morale", 5.0)],
                "You'll connect later. The offer stands!",
            ),
        ]),
        EventDefinition::new(
            "emergency_loan_offer",
            CATEGORY,
            "Word got around that you're low on funds: 'You helped me fly, let me loan you $1000, no interest.'",
        )
        .weight(0.7)
        .once()
        .chain_link("helped_student")
        .when(&["stats.money < 2000", "days_since.helped_student > 25"])
        .options(vec![
            EventOption::new(
                "Accept gratefully",
                &[("money", 1000.0), ("morale", 20.0)],
                "True friendship! You promise to pay it forward someday.",
            )
            .chain_data(json!({ "owes_loan": 1000 }))
            .end_chain(),
            EventOption::new(
                "Decline politely",
                &[("morale", 10.0)],
                "You appreciate the offer but will manage. Friendship intact!",
            ),
        ]),
        EventDefinition::new(
            "cfi_weekend_flyin",
            CATEGORY,
            "Your CFI invites you to a weekend fly-in: 'You've earned this. Want to come?'",
        )
        .weight(0.6)
        .once()
        .chain_link("cfi_good_relationship")
        .when(&["reputation.cfi > 3", "day > 40"])
        .options(vec![
            EventOption::new(
                "Absolutely!",
                &[("money", -100.0), ("knowledge", 15.0), ("morale", 25.0)],
                "Amazing experience! You meet pilots, see cool planes, and learn tons.",
            )
            .reputation(&[("peers", 2), ("cfi", 1)]),
            EventOption::new(
                "Can't afford",
                &[("morale", -5.0)],
                "Your CFI understands. 'Next time!'",
            ),
        ]),
        EventDefinition::new(
            "hearing_concerns",
            CATEGORY,
            "After weeks with the cheap headset, you're getting headaches. Time to upgrade?",
        )
        .weight(0.5)
        .chain_link("cheap_headset")
        .when(&["days_since.cheap_headset > 30"])
        .options(vec![
            EventOption::new(
                "Upgrade now",
                &[("money", -600.0), ("safety", 15.0)],
                "The ANR headset is life-changing. Why did you wait so long?",
            )
            .end_chain(),
            EventOption::new(
                "Deal with it",
                &[("fatigue", 10.0)],
                "You push through but flying is less enjoyable. False economy.",
            )
            .chain_data(json!({ "permanent_fatigue": true })),
        ]),
        EventDefinition::new(
            "atc_singing_along",
            CATEGORY,
            "After your stuck mic incident, Tower starts singing Danger Zone whenever you call in.",
        )
        .weight(0.8)
        .once()
        .memorable()
        .chain_link("radio_fame")
        .when(&["days_since.radio_fame > 3"])
        .options(vec![
            EventOption::new(
                "Sing back",
                &[("morale", 30.0)],
                "You become legend. Other pilots join in. It's now the unofficial airport anthem!",
            )
            .reputation(&[("atc", 3), ("peers", 3)]),
            EventOption::new(
                "Professional only",
                &[("safety", 10.0)],
                "You stay professional. Tower respects it but still hums it off-mic.",
            )
            .end_chain(),
            EventOption::new(
                "Request callsign",
                &[("morale", 35.0)],
                "Tower starts calling you 'Maverick' unofficially. You've peaked in aviation!",
            )
            .chain_start("maverick_callsign"),
        ]),
        EventDefinition::new(
            "maverick_reputation",
            CATEGORY,
            "Your 'Maverick' reputation spreads. Pilots at other airports know about you!",
        )
        .weight(0.6)
        .once()
        .memorable()
        .chain_link("maverick_callsign")
        .when(&["days_since.maverick_callsign > 5"])
        .options(vec![
            EventOption::new(
                "Embrace fame",
                &[("morale", 30.0)],
                "You lean into it. Get custom 'MAVERICK' embroidered on flight bag.",
            )
            .reputation(&[("peers", 5)]),
            EventOption::new(
                "Stay humble",
                &[("safety", 15.0), ("morale", 20.0)],
                "You downplay it but secretly love it. Respect grows for your humility.",
            )
            .end_chain(),
            EventOption::new(
                "Request official",
                &[("morale", 35.0), ("money", -200.0)],
                "You apply for a custom N-number with MVRCK. Living the dream!",
            )
            .chain_data(json!({ "custom_n_number": "MVRCK" })),
        ]),
        EventDefinition::new(
            "airport_manager_lecture",
            CATEGORY,
            "The airport manager finds you after landing. 'We need to talk about pattern procedures.'",
        )
        .weight(0.9)
        .chain_link("straight_in_scolding")
        .options(vec![
            EventOption::new(
                "Accept lecture",
                &[("knowledge", 20.0), ("morale", -10.0)],
                "20-minute lecture on pattern etiquette. Embarrassing but educational.",
            )
            .end_chain(),
            EventOption::new(
                "Explain student status",
                &[("knowledge", 15.0), ("morale", -5.0)],
                "Manager softens: 'Your CFI should've taught better. Let me explain...'",
            )
            .end_chain(),
            EventOption::new(
                "Apologize and learn",
                &[("knowledge", 25.0)],
                "Manager appreciates humility. Becomes friendly and shares local tips.",
            )
            .reputation(&[("peers", 1)])
            .end_chain(),
        ]),
        EventDefinition::new(
            "warbird_tour_offer",
            CATEGORY,
            "The P-51 pilot finds you: 'Want to see the Mustang up close? Least I can do after the prop blast.'",
        )
        .weight(0.8)
        .memorable()
        .chain_link("warbird_tour")
        .options(vec![
            EventOption::new(
                "Absolutely!",
                &[("knowledge", 20.0), ("morale", 40.0)],
                "You sit in a P-51! They explain systems. You're inspired to get a complex endorsement.",
            )
            .end_chain(),
            EventOption::new(
                "Bring CFI",
                &[("knowledge", 25.0), ("morale", 35.0)],
                "CFI joins the tour. The warbird pilot offers to teach you aerobatics someday!",
            )
            .reputation(&[("cfi", 1)])
            .end_chain(),
            EventOption::new(
                "Rain check",
                &[("morale", -5.0)],
                "You miss the chance. The P-51 leaves next day for an airshow.",
            )
            .end_chain(),
        ]),
        EventDefinition::new(
            "faa_investigation",
            CATEGORY,
            "FAA calls about your report of the dangerous overtaking. They're investigating.",
        )
        .weight(0.7)
        .chain_link("faa_report")
        .when(&["days_since.faa_report > 7", "chain_phase.faa_report == initial"])
        .options(vec![
            EventOption::new(
                "Provide details",
                &[("safety", 20.0), ("knowledge", 15.0)],
                "Your documentation helps. The case goes to a formal hearing.",
            )
            .reputation(&[("safety", 3)])
            .next_phase("hearing"),
            EventOption::new(
                "Minimal response",
                &[("safety", 10.0)],
                "You provide basics. FAA appreciates the report but needs more for action.",
            )
            .end_chain(),
            EventOption::new(
                "Withdraw report",
                &[("safety", -10.0), ("morale", -10.0)],
                "You back down. The dangerous pilot remains a hazard to others.",
            )
            .end_chain(),
        ]),
        EventDefinition::new(
            "faa_hearing",
            CATEGORY,
            "The FAA asks you to give a statement at the enforcement hearing for the pilot who overtook you.",
        )
        .weight(0.7)
        .memorable()
        .chain_link("faa_report")
        .when(&["chain_phase.faa_report == hearing", "days_since.faa_report > 14"])
        .options(vec![
            EventOption::new(
                "Testify in person",
                &[("knowledge", 15.0), ("fatigue", 10.0), ("money", -60.0)],
                "Reckless pilot gets a violation. The inspector thanks you for your logbook notes.",
            )
            .reputation(&[("safety", 2), ("atc", 1)])
            .end_chain(),
            EventOption::new(
                "Send a written statement",
                &[("knowledge", 8.0)],
                "Your statement goes into the file. The system works, slowly.",
            )
            .end_chain(),
        ]),
        EventDefinition::new(
            "rainbow_after_storm",
            CATEGORY,
            "After your smart weather diversion, you break out to see a perfect double rainbow framing the runway.",
        )
        .weight(0.8)
        .once()
        .memorable()
        .chain_link("weather_diversion_good")
        .when(&["days_since.weather_diversion_good > 0"])
        .options(vec![
            EventOption::new(
                "Take it all in",
                &[("morale", 35.0), ("fatigue", -15.0)],
                "This is your reward for good ADM. The photo becomes your checkride good luck charm.",
            )
            .reputation(&[("safety", 1)])
            .end_chain(),
            EventOption::new(
                "Share with CFI",
                &[("morale", 30.0)],
                "CFI texts back: 'That's why we make safe decisions. Beautiful!'",
            )
            .reputation(&[("cfi", 2)])
            .end_chain(),
            EventOption::new(
                "Tell Tower",
                &[("morale", 25.0)],
                "'Tower, thanks for the vectors. Amazing rainbow!' 'Our pleasure, great decision making!'",
            )
            .reputation(&[("atc", 1)])
            .end_chain(),
        ]),
        EventDefinition::new(
            "night_cross_country_stars",
            CATEGORY,
            "Your CFI suggests a night cross-country to a towered field forty miles out. The sky is moonless.",
        )
        .weight(0.5)
        .once()
        .chain_link("night_flying")
        .when(&["days_since.night_flying > 5", "weather == clear"])
        .options(vec![
            EventOption::new(
                "Go for it",
                &[("money", -350.0), ("knowledge", 15.0), ("night_hours", 2.0), ("flight_hours", 2.0), ("morale", 20.0)],
                "The Milky Way over the wing and runway lights like a jewel box. Night currency logged.",
            )
            .end_chain(),
            EventOption::new(
                "Just the pattern",
                &[("money", -150.0), ("night_hours", 1.0), ("flight_hours", 1.0), ("safety", 5.0)],
                "Ten full-stop landings in the dark. The black hole approach is real.",
            ),
        ]),
        EventDefinition::new(
            "radio_static_returns",
            CATEGORY,
            "The static is back. The avionics shop says it's the antenna coax and quotes $280.",
        )
        .weight(0.4)
        .once()
        .chain_link("radio_issues")
        .when(&["days_since.radio_issues > 4"])
        .options(vec![
            EventOption::new(
                "Chip in for the repair",
                &[("money", -280.0), ("safety", 8.0)],
                "Clear as a bell. The FBO owner remembers who helped pay.",
            )
            .reputation(&[("fbo", 2)])
            .end_chain(),
            EventOption::new(
                "Use the handheld",
                &[("safety", 3.0), ("fatigue", 5.0)],
                "You fly with a handheld on your knee until the shop gets to it.",
            )
            .end_chain(),
        ]),
        EventDefinition::new(
            "mentor_checkin",
            CATEGORY,
            "The retired airline captain from the hangar BBQ calls to see how your training is going.",
        )
        .weight(0.5)
        .once()
        .chain_link("social_network")
        .when(&["days_since.social_network > 10"])
        .options(vec![
            EventOption::new(
                "Meet for coffee",
                &[("knowledge", 12.0), ("morale", 15.0)],
                "Two hours of threat and error management stories. Better than any textbook.",
            )
            .reputation(&[("peers", 1)]),
            EventOption::new(
                "Ask for a checkride prep session",
                &[("knowledge", 18.0), ("safety", 8.0), ("fatigue", 8.0)],
                "They run you through an oral exam at the kitchen table. Tough but fair.",
            ),
        ]),
    ]
}
