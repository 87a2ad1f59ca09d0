use serde_json::json;

use crate::data::catalog::{EventCategory, EventDefinition, EventOption};

const CATEGORY: EventCategory = EventCategory::Social;

pub fn events() -> Vec<EventDefinition> {
    vec![
        EventDefinition::new(
            "cfi_evaluation",
            CATEGORY,
            "Your CFI sits you down: 'We need to talk about your progress. I have some concerns.'",
        )
        .weight(0.2)
        .when(&["day > 10"])
        .options(vec![
            EventOption::new(
                "Listen openly",
                &[("knowledge", 10.0), ("safety", 8.0), ("morale", -3.0)],
                "Hard to hear, but valuable feedback about your steep turns and radio work.",
            )
            .reputation(&[("cfi", 1)]),
            EventOption::new(
                "Get defensive",
                &[("morale", -10.0), ("knowledge", 2.0)],
                "The conversation goes poorly. You realize later they were trying to help.",
            )
            .reputation(&[("cfi", -1)]),
            EventOption::new(
                "Ask for specific help",
                &[("knowledge", 15.0), ("safety", 10.0)],
                "Together you create a focused improvement plan. Great session!",
            )
            .reputation(&[("cfi", 2)])
            .chain_start("cfi_good_relationship"),
        ]),
        EventDefinition::new(
            "atc_friendly",
            CATEGORY,
            "Tower controller recognizes your tail number: 'Hey, you're sounding more confident on the radio!'",
        )
        .weight(0.15)
        .when(&["last_action == fly", "stats.flight_hours > 3"])
        .options(vec![EventOption::new(
            "Thank you, Tower!",
            &[("morale", 15.0), ("knowledge", 3.0)],
            "The encouragement means a lot. ATC are people too!",
        )
        .reputation(&[("atc", 1)])]),
        EventDefinition::new(
            "student_competition_pre_solo",
            CATEGORY,
            "Another student who started after you just soloed. They ask, 'Haven't you soloed yet?'",
        )
        .weight(0.2)
        .when(&["!milestone.first_solo", "stats.flight_hours > 8"])
        .options(vec![
            EventOption::new(
                "Each at own pace",
                &[("morale", 5.0), ("safety", 5.0)],
                "You remind yourself that safe progression matters more than speed.",
            ),
            EventOption::new(
                "Feel pressured",
                &[("morale", -15.0), ("safety", -5.0)],
                "The comparison stings. You consider rushing your training.",
            ),
            EventOption::new(
                "Congratulate them",
                &[("morale", 8.0), ("knowledge", 2.0)],
                "You're genuinely happy for them. They share some helpful solo tips.",
            )
            .reputation(&[("peers", 1)]),
        ]),
        EventDefinition::new(
            "student_competition_post_solo",
            CATEGORY,
            "A newer student asks about your training. 'Wow, you've already soloed? Any tips?'",
        )
        .weight(0.2)
        .when(&["milestone.first_solo"])
        .options(vec![
            EventOption::new(
                "Share wisdom",
                &[("morale", 10.0), ("knowledge", 5.0)],
                "Teaching others reinforces your own knowledge. You feel like a mentor!",
            ),
            EventOption::new(
                "Stay humble",
                &[("morale", 5.0), ("safety", 5.0)],
                "You share that every pilot's journey is different. Keep focusing on safety.",
            ),
            EventOption::new(
                "Encourage them",
                &[("morale", 8.0), ("safety", 3.0)],
                "You reassure them they'll get there. The aviation community supports each other.",
            )
            .reputation(&[("peers", 1)]),
        ]),
        EventDefinition::new(
            "cfi_late",
            CATEGORY,
            "Your CFI is 45 minutes late. The Hobbs meter is running on the scheduled plane.",
        )
        .weight(0.15)
        .when(&["last_action == fly"])
        .options(vec![
            EventOption::new(
                "Wait patiently",
                &[("money", -50.0), ("morale", -5.0)],
                "They arrive apologetic. You lose money but maintain the relationship.",
            ),
            EventOption::new(
                "Cancel and leave",
                &[("morale", -8.0), ("safety", 3.0)],
                "You stand up for yourself but miss the lesson.",
            )
            .reputation(&[("cfi", -1)]),
            EventOption::new(
                "Use time to preflight",
                &[("knowledge", 5.0), ("safety", 8.0)],
                "Most thorough preflight ever! You find a nail in the tire - good catch!",
            ),
        ]),
        EventDefinition::new(
            "relationship_pressure",
            CATEGORY,
            "Your partner sits you down: 'You're always at the airport. We need to talk about us.'",
        )
        .weight(0.15)
        .when(&["day > 20"])
        .options(vec![
            EventOption::new(
                "Promise to balance better",
                &[("morale", -8.0), ("fatigue", 5.0)],
                "You agree to reduce training frequency. Relationships require compromise.",
            )
            .chain_data(json!({ "relationship_balance": true })),
            EventOption::new(
                "Explain your dream",
                &[("morale", 10.0), ("knowledge", 2.0)],
                "They understand better now and even offer to visit the airport with you!",
            )
            .chain_data(json!({ "supportive_partner": true })),
            EventOption::new(
                "Take a break",
                &[("morale", -15.0), ("fatigue", -10.0)],
                "You pause training for a week. Sometimes perspective helps.",
            ),
        ]),
        EventDefinition::new(
            "family_doubt",
            CATEGORY,
            "Your parent calls: 'Isn't flying dangerous? I saw another small plane crash on the news.'",
        )
        .weight(0.12)
        .when(&["day > 5", "stats.flight_hours > 2"])
        .options(vec![
            EventOption::new(
                "Explain safety stats",
                &[("knowledge", 5.0), ("morale", -5.0)],
                "You share facts about GA safety, but their worry still weighs on you.",
            ),
            EventOption::new(
                "Brush it off",
                &[("morale", -10.0)],
                "You change the subject, but their doubt lingers in your mind.",
            ),
            EventOption::new(
                "Invite them to visit",
                &[("morale", 15.0), ("money", -50.0)],
                "They meet your CFI and see the plane. Now they're your biggest supporter!",
            ),
        ]),
        EventDefinition::new(
            "old_friend_encouragement",
            CATEGORY,
            "An old friend texts: 'Saw your flight training posts! So proud of you chasing your dreams!'",
        )
        .weight(0.1)
        .when(&["day > 15", "stats.morale < 70"])
        .options(vec![EventOption::new(
            "Thanks, means a lot!",
            &[("morale", 20.0)],
            "Sometimes a little encouragement is all you need to keep going.",
        )]),
        EventDefinition::new(
            "social_media_inspiration",
            CATEGORY,
            "You see a post: 'One year ago I was scared of flying. Today I passed my checkride!' with celebration photos.",
        )
        .weight(0.1)
        .when(&["stats.morale < 65", "day > 10"])
        .options(vec![EventOption::new(
            "If they can, I can!",
            &[("morale", 15.0), ("knowledge", 2.0)],
            "You reach out and they share helpful tips. The aviation community is amazing.",
        )]),
        EventDefinition::new(
            "hangar_bbq_invite",
            CATEGORY,
            "The old-timers are having their monthly hangar BBQ. 'Hey student, want to join us?'",
        )
        .weight(0.1)
        .when(&["day > 15", "!chain.social_network"])
        .options(vec![
            EventOption::new(
                "Join them",
                &[("money", -20.0), ("knowledge", 10.0), ("morale", 15.0)],
                "Amazing stories and connections! A retired airline captain offers to mentor you.",
            )
            .reputation(&[("peers", 2)])
            .chain_start("social_network")
            .chain_data(json!({ "mentor": "retired airline captain" })),
            EventOption::new(
                "Too busy",
                &[("morale", -3.0)],
                "You study instead. The opportunity for connections passes by.",
            ),
            EventOption::new(
                "Quick visit",
                &[("morale", 8.0)],
                "You grab a burger and hear one great story before heading out.",
            ),
        ]),
        EventDefinition::new(
            "young_eagles_event",
            CATEGORY,
            "EAA is hosting a Young Eagles event. They need pilot helpers (ground support for you).",
        )
        .weight(0.08)
        .when(&["day > 20"])
        .options(vec![
            EventOption::new(
                "Volunteer all day",
                &[("fatigue", 15.0), ("morale", 25.0), ("knowledge", 5.0)],
                "Inspiring kids discover aviation! One parent is an aviation attorney - good contact!",
            )
            .reputation(&[("peers", 3), ("fbo", 1)]),
            EventOption::new(
                "Help briefly",
                &[("morale", 10.0)],
                "You help with registration for an hour. Every bit helps!",
            ),
            EventOption::new(
                "Focus on training",
                &[("knowledge", 5.0)],
                "You study while planes fly kids overhead. Mixed feelings.",
            ),
        ]),
        EventDefinition::new(
            "cfi_switch_suggestion",
            CATEGORY,
            "Another student pulls you aside: 'Have you considered switching instructors? Just saying...'",
        )
        .weight(0.08)
        .when(&["day > 30", "stats.morale < 60"])
        .options(vec![
            EventOption::new(
                "Consider it",
                &[("morale", 5.0)],
                "Maybe a fresh perspective would help? You'll think about it.",
            )
            .chain_data(json!({ "instructor_change": true })),
            EventOption::new(
                "Defend your CFI",
                &[("morale", -5.0)],
                "You're loyal, but are you being honest with yourself?",
            )
            .reputation(&[("cfi", 1)]),
            EventOption::new(
                "Ask why",
                &[("knowledge", 8.0)],
                "They share specific concerns. Good feedback to discuss with your CFI.",
            ),
        ]),
        EventDefinition::new(
            "solo_shirt_cutting",
            CATEGORY,
            "You just soloed! Time for the traditional shirt tail cutting ceremony.",
        )
        .weight(1.0)
        .once()
        .memorable()
        .when(&["milestone.first_solo"])
        .options(vec![
            EventOption::new(
                "Embrace tradition",
                &[("morale", 30.0)],
                "Your shirt tail joins hundreds on the wall. You're part of aviation history!",
            )
            .reputation(&[("peers", 2), ("cfi", 1)]),
            EventOption::new(
                "Keep shirt intact",
                &[("morale", 10.0)],
                "You frame the whole shirt instead. Still meaningful!",
            ),
            EventOption::new(
                "Social media it",
                &[("morale", 25.0)],
                "Your solo post gets 500 likes! Friends are inspired by your achievement.",
            ),
        ]),
        EventDefinition::new(
            "discovery_flight_referral",
            CATEGORY,
            "A friend wants to try a discovery flight and asks if you know a good instructor. Your CFI offers a referral bonus.",
        )
        .weight(0.1)
        .when(&["stats.flight_hours > 10", "stats.morale > 50"])
        .options(vec![
            EventOption::new(
                "Make the referral",
                &[("money", 100.0), ("morale", 10.0)],
                "Your friend loves flying! Your CFI gives you a referral bonus.",
            )
            .reputation(&[("cfi", 1)]),
            EventOption::new(
                "Just give contact info",
                &[("morale", 5.0)],
                "You help without expecting anything. Good pilot community spirit.",
            ),
        ]),
        EventDefinition::new(
            "aopa_flyin_invite",
            CATEGORY,
            "AOPA is hosting a fly-in at nearby airport. Free seminars, vendor tents, hundreds of planes!",
        )
        .weight(0.08)
        .when(&["day > 30", "stats.flight_hours > 15"])
        .options(vec![
            EventOption::new(
                "Fly there solo!",
                &[("money", -100.0), ("knowledge", 20.0), ("morale", 25.0)],
                "Amazing experience! You learn about mountain flying and meet a retired 747 captain.",
            )
            .reputation(&[("peers", 3)]),
            EventOption::new(
                "Drive over",
                &[("money", -40.0), ("knowledge", 10.0), ("fatigue", 10.0)],
                "Long drive, great seminars. You come home with a bag full of free charts.",
            ),
            EventOption::new(
                "Skip it",
                &[("morale", -3.0)],
                "Photos from the fly-in fill your feed all weekend.",
            ),
        ]),
    ]
}
