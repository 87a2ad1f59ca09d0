use serde_json::json;

use crate::data::catalog::{EventCategory, EventDefinition, EventOption};

const CATEGORY: EventCategory = EventCategory::Absurd;

pub fn events() -> Vec<EventDefinition> {
    vec![
        EventDefinition::new(
            "celebrity_encounter",
            CATEGORY,
            "Is that... Harrison Ford preflighting the Husky next to you? He notices your student pilot badge and walks over.",
        )
        .weight(0.01)
        .once()
        .memorable()
        .when(&["stats.flight_hours > 10", "day > 30"])
        .options(vec![
            EventOption::new(
                "Ask for advice",
                &[("knowledge", 20.0), ("morale", 30.0)],
                "He shares a story about his training days and the importance of always being a student.",
            )
            .reputation(&[("peers", 2)]),
            EventOption::new(
                "Play it cool",
                &[("safety", 10.0), ("morale", 15.0)],
                "He nods approvingly at your thorough preflight. 'Good habits,' he says.",
            )
            .reputation(&[("safety", 1)]),
            EventOption::new(
                "Fan out completely",
                &[("morale", 40.0), ("fatigue", 10.0)],
                "Best day ever! You got a selfie but forgot half your checklist in excitement.",
            ),
        ]),
        EventDefinition::new(
            "youtube_famous",
            CATEGORY,
            "Your horrible landing was filmed by a planespotter. The video 'Student Pilot Bounces 5 Times' has 2M views.",
        )
        .weight(0.008)
        .once()
        .memorable()
        .when(&["stats.flight_hours > 8", "stats.flight_hours < 25"])
        .options(vec![
            EventOption::new(
                "Laugh it off",
                &[("morale", 5.0)],
                "You become a meme legend at the flight school. At least you're famous!",
            )
            .chain_data(json!({ "fame_reaction": "humor" })),
            EventOption::new(
                "Get defensive",
                &[("morale", -20.0)],
                "The comments section destroys you. Maybe don't read those.",
            )
            .chain_data(json!({ "fame_reaction": "defensive" })),
            EventOption::new(
                "Make response video",
                &[("knowledge", 10.0), ("money", 200.0)],
                "Your 'What I Learned' video goes viral too. You monetize your mistake!",
            )
            .chain_data(json!({ "fame_reaction": "capitalize" })),
        ]),
        EventDefinition::new(
            "cow_on_runway",
            CATEGORY,
            "On short final, a cow wanders onto the runway. This is not a drill.",
        )
        .weight(0.02)
        .when(&["stats.flight_hours > 8", "last_action == fly"])
        .options(vec![
            EventOption::new(
                "Go around",
                &[("safety", 20.0), ("money", -30.0)],
                "Good decision. Extra pattern work while ground crew plays cowboy.",
            )
            .reputation(&[("safety", 1)]),
            EventOption::new(
                "Land anyway",
                &[("safety", -40.0), ("morale", -20.0)],
                "WHAT WERE YOU THINKING?! CFI is furious. The cow is unimpressed.",
            )
            .reputation(&[("cfi", -3), ("safety", -3)]),
            EventOption::new(
                "Buzz the cow",
                &[("safety", -20.0), ("morale", 10.0)],
                "It works but your CFI is NOT amused. 'We need to talk about judgment.'",
            )
            .reputation(&[("cfi", -1), ("peers", 1)]),
        ]),
        EventDefinition::new(
            "drone_near_miss",
            CATEGORY,
            "A large drone appears at your altitude, way above legal limits. It's filming you.",
        )
        .weight(0.025)
        .when(&["stats.flight_hours > 5", "last_action == fly"])
        .options(vec![
            EventOption::new(
                "Evasive action",
                &[("safety", 15.0)],
                "You avoid it safely and report to ATC. FAA will investigate.",
            )
            .chain_data(json!({ "drone_response": "evade" })),
            EventOption::new(
                "Wave at camera",
                &[("morale", 10.0), ("safety", -5.0)],
                "Priorities? At least you might be in someone's cool video.",
            )
            .chain_data(json!({ "drone_response": "wave" })),
            EventOption::new(
                "Follow it down",
                &[("safety", -20.0), ("knowledge", 5.0)],
                "You track the operator for authorities. Risky but helps catch the violator.",
            )
            .chain_data(json!({ "drone_response": "pursue" })),
        ]),
        EventDefinition::new(
            "marriage_proposal_banner",
            CATEGORY,
            "Another student hired a banner plane: 'MARRY ME SARAH?' Sarah is your CFI.",
        )
        .weight(0.01)
        .once()
        .memorable()
        .when(&["day > 40"])
        .options(vec![
            EventOption::new(
                "Awkward silence",
                &[("morale", -5.0)],
                "She says yes but adds 'After we land, let's focus.' Professional!",
            ),
            EventOption::new(
                "Congratulate",
                &[("morale", 15.0)],
                "She's beaming! Best lesson ever - she teaches with extra enthusiasm.",
            )
            .reputation(&[("cfi", 1)]),
            EventOption::new(
                "'Can we land?'",
                &[("safety", 10.0)],
                "Professional response. She appreciates your focus on flying.",
            )
            .reputation(&[("safety", 1)]),
        ]),
        EventDefinition::new(
            "movie_filming",
            CATEGORY,
            "A film crew is shooting a fighter-jet sequel at your airport. They need background Cessnas.",
        )
        .weight(0.005)
        .once()
        .memorable()
        .when(&["day > 30"])
        .options(vec![
            EventOption::new(
                "Volunteer",
                &[("money", 500.0), ("morale", 50.0), ("fatigue", 30.0)],
                "12-hour day but you're in a movie! The lead actor gives you a thumbs up.",
            )
            .reputation(&[("peers", 2)]),
            EventOption::new(
                "Too busy training",
                &[("safety", 10.0), ("knowledge", 10.0)],
                "You focus on your goals. The filming is distracting anyway.",
            ),
            EventOption::new(
                "Watch from ground",
                &[("morale", 20.0)],
                "Amazing aerobatics show! Free entertainment and aviation inspiration.",
            ),
        ]),
        EventDefinition::new(
            "ufo_sighting",
            CATEGORY,
            "You and your CFI see something impossible - a silver disc hovering, then accelerating vertically at impossible speed.",
        )
        .weight(0.003)
        .once()
        .memorable()
        .when(&["stats.flight_hours > 15"])
        .options(vec![
            EventOption::new(
                "Report to ATC",
                &[("knowledge", 5.0)],
                "ATC: 'Uhh... no radar contact. Say again?' They think you're joking.",
            )
            .chain_data(json!({ "ufo_report": "reported" })),
            EventOption::new(
                "Stay quiet",
                &[("morale", 10.0)],
                "You and your CFI share a bonding moment. 'Did we just see...?' 'Yep.'",
            ),
            EventOption::new(
                "Film it",
                &[("morale", 50.0)],
                "The footage is blurry but goes viral. You're now 'UFO pilot' at the school.",
            )
            .chain_data(json!({ "ufo_report": "filmed" })),
        ]),
        EventDefinition::new(
            "plane_raffle_win",
            CATEGORY,
            "Your flight school raffled off 10 free flight hours. YOUR TICKET WON!",
        )
        .weight(0.004)
        .once()
        .memorable()
        .when(&["day > 30"])
        .options(vec![
            EventOption::new(
                "Use immediately",
                &[("flight_hours", 10.0), ("morale", 30.0)],
                "10 free hours added to your logbook! Accelerated training here we come!",
            ),
            EventOption::new(
                "Spread them out",
                &[("flight_hours", 10.0), ("morale", 20.0), ("knowledge", 5.0)],
                "Smart planning. You'll use them strategically for best training value.",
            ),
            EventOption::new(
                "Share with struggling student",
                &[("flight_hours", 5.0), ("morale", 40.0)],
                "You give half to Jake who's out of money. The karma will return!",
            )
            .reputation(&[("peers", 5)])
            .chain_start("helped_student")
            .chain_data(json!({ "student": "Jake" })),
        ]),
        EventDefinition::new(
            "stuck_mic_singing",
            CATEGORY,
            "Your mic button stuck while you were singing 'Danger Zone.' Entire frequency heard your performance.",
        )
        .weight(0.05)
        .once()
        .memorable()
        .when(&["stats.flight_hours > 10"])
        .options(vec![
            EventOption::new(
                "Own it proudly",
                &[("morale", 25.0)],
                "Tower: 'Nice pipes! Frequency clear for encore!' You're now famous as 'Danger Zone pilot.'",
            )
            .reputation(&[("atc", 2), ("peers", 3)])
            .chain_start("radio_fame"),
            EventOption::new(
                "Apologize profusely",
                &[("morale", -10.0)],
                "'Sorry for stuck mic!' Tower: 'Best stuck mic we've had all year!'",
            ),
            EventOption::new(
                "Change airports",
                &[("morale", -15.0), ("money", -100.0)],
                "Too embarrassed to return. You find a new home airport. They eventually hear the story anyway.",
            ),
        ]),
        EventDefinition::new(
            "hot_mic_cfi_rant",
            CATEGORY,
            "Your CFI's mic is stuck while ranting about another student. The whole pattern hears everything.",
        )
        .weight(0.04)
        .when(&["stats.flight_hours > 15"])
        .options(vec![
            EventOption::new(
                "Discreetly signal",
                &[],
                "You tap their shoulder and point. They go pale. 'Thanks for having my back.'",
            )
            .reputation(&[("cfi", 2)]),
            EventOption::new(
                "Let it continue",
                &[("morale", 15.0), ("knowledge", 10.0)],
                "Entertainment value is high. You learn what NOT to do from the rant.",
            ),
            EventOption::new(
                "Key your mic",
                &[("safety", 10.0)],
                "You break in: 'Aircraft transmitting, check stuck mic.' CFI realizes and is grateful.",
            ),
        ]),
        EventDefinition::new(
            "helicopter_autorotation_panic",
            CATEGORY,
            "The helicopter school next door is practicing autorotations. Someone called 911 for 'falling aircraft!'",
        )
        .weight(0.08)
        .when(&["day > 20"])
        .options(vec![
            EventOption::new(
                "Watch the show",
                &[("knowledge", 15.0), ("morale", 15.0)],
                "Fire trucks arrive! The helicopter lands perfectly. Firefighters look confused.",
            ),
            EventOption::new(
                "Explain to crowd",
                &[("knowledge", 20.0)],
                "You calm worried onlookers, explaining autorotation training. Local news interviews you!",
            )
            .reputation(&[("peers", 2)]),
            EventOption::new(
                "Keep preflighting",
                &[("safety", 10.0)],
                "Not your circus. You focus on your plane while chaos unfolds nearby.",
            ),
        ]),
        EventDefinition::new(
            "piper_ditch_memes",
            CATEGORY,
            "Neighboring school's Piper rolled into a ditch. Group text memes arrived before the tow truck.",
        )
        .weight(0.06)
        .when(&["day > 30"])
        .options(vec![
            EventOption::new(
                "Share best meme",
                &[("morale", 20.0)],
                "'Piper: Now with off-road capability!' wins the meme war. Even the embarrassed pilot laughs.",
            )
            .reputation(&[("peers", 1)]),
            EventOption::new(
                "Offer to help",
                &[("morale", 15.0)],
                "You help with recovery. The grateful pilot offers to share their written test prep materials.",
            )
            .reputation(&[("peers", 2)])
            .chain_start("helped_student")
            .chain_data(json!({ "student": "Piper pilot" })),
            EventOption::new(
                "Learn from it",
                &[("knowledge", 15.0), ("safety", 10.0)],
                "You study what went wrong: brake failure during taxi. Mental note: always test brakes early.",
            ),
        ]),
    ]
}
