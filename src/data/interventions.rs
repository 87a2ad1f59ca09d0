//! Events raised by flight actions when the pilot is too tired. They are
//! part of the catalog but never drawn at random.

use crate::data::catalog::{EventCategory, EventDefinition, EventOption};

pub const DUAL_INTERVENTIONS: [&str; 3] = [
    "cfi_imsafe_intervention",
    "cfi_pitot_cover_intervention",
    "cfi_mag_check_intervention",
];

pub const SOLO_INTERVENTIONS: [&str; 3] = [
    "solo_missed_traffic",
    "solo_high_on_final",
    "solo_slurred_radio",
];

const CATEGORY: EventCategory = EventCategory::Intervention;

pub fn events() -> Vec<EventDefinition> {
    vec![
        EventDefinition::new(
            DUAL_INTERVENTIONS[0],
            CATEGORY,
            "Your CFI takes one look at you: 'When's the last time you slept? We're not flying. Let's review IMSAFE instead.'",
        )
        .options(vec![
            EventOption::new(
                "Review IMSAFE",
                &[("knowledge", 5.0), ("safety", 10.0)],
                "You review: Illness, Medication, Stress, Alcohol, Fatigue, Emotion. The 'F' feels particularly relevant.",
            ),
            EventOption::new(
                "Insist you're fine",
                &[("morale", -15.0), ("safety", -10.0)],
                "Your CFI is firm: 'I'm the PIC and I say no. Find another instructor if you can't respect safety.'",
            )
            .reputation(&[("cfi", -1)]),
            EventOption::new(
                "Go rest instead",
                &[("fatigue", -20.0), ("morale", 3.0)],
                "You head home and sleep for eleven hours. Your CFI texts: 'Good call.'",
            ),
        ]),
        EventDefinition::new(
            DUAL_INTERVENTIONS[1],
            CATEGORY,
            "During preflight, you miss the pitot cover. Your CFI stops you: 'You're exhausted. This isn't safe.'",
        )
        .options(vec![
            EventOption::new(
                "Admit exhaustion",
                &[("safety", 15.0), ("morale", 5.0)],
                "Your CFI appreciates your honesty. 'Good ADM. Let's do ground school instead.'",
            ),
            EventOption::new(
                "Try to continue",
                &[("safety", -15.0), ("morale", -10.0)],
                "Your CFI grounds you. 'This is exactly how accidents happen. We're done for today.'",
            ),
        ]),
        EventDefinition::new(
            DUAL_INTERVENTIONS[2],
            CATEGORY,
            "You forget to check mags during run-up. Your CFI shuts down: 'STOP. Classic fatigue symptoms. You're not flying.'",
        )
        .options(vec![
            EventOption::new(
                "Accept decision",
                &[("safety", 12.0), ("knowledge", 8.0)],
                "You review emergency procedures instead. Valuable but humbling.",
            ),
            EventOption::new(
                "Argue it's minor",
                &[("morale", -20.0), ("safety", -8.0)],
                "'If you think mag checks are minor, we have bigger problems.'",
            ),
        ]),
        EventDefinition::new(
            SOLO_INTERVENTIONS[0],
            CATEGORY,
            "Tower: 'Confirm you're number two following the Cherokee?' You don't remember any Cherokee...",
        )
        .options(vec![
            EventOption::new(
                "Request clarification",
                &[("safety", -5.0), ("knowledge", 5.0)],
                "You finally spot traffic you completely missed. Wake-up call.",
            ),
            EventOption::new(
                "Extend downwind",
                &[("safety", 10.0), ("fatigue", 2.0)],
                "Smart move to buy time when confused.",
            ),
            EventOption::new(
                "Continue approach",
                &[("safety", -20.0), ("morale", -15.0)],
                "Near miss! Cherokee pilot reports you. Possible deviation.",
            )
            .reputation(&[("atc", -1)]),
        ]),
        EventDefinition::new(
            SOLO_INTERVENTIONS[1],
            CATEGORY,
            "Too high on final! Exhaustion has destroyed your sight picture. The runway looks tiny.",
        )
        .options(vec![
            EventOption::new(
                "Go around",
                &[("safety", 15.0), ("money", -30.0), ("fatigue", 3.0)],
                "Good decision. Second approach better.",
            ),
            EventOption::new(
                "Slip aggressively",
                &[("safety", -10.0), ("knowledge", 3.0)],
                "You bounce twice. Almost a prop strike!",
            ),
            EventOption::new(
                "Dive for runway",
                &[("safety", -25.0), ("morale", -20.0)],
                "Terrifying porpoise! Nearly lost control.",
            ),
        ]),
        EventDefinition::new(
            SOLO_INTERVENTIONS[2],
            CATEGORY,
            "Your radio calls are slurred: 'Uhh... tower... Cessna... um...' Can't form thoughts.",
        )
        .options(vec![
            EventOption::new(
                "Land immediately",
                &[("safety", 20.0), ("morale", -5.0)],
                "You get priority. Not proud but safe.",
            ),
            EventOption::new(
                "Leave pattern",
                &[("safety", 15.0), ("money", -40.0)],
                "Exit to practice area, collect yourself. Good ADM.",
            ),
            EventOption::new(
                "Try to continue",
                &[("safety", -30.0), ("morale", -25.0)],
                "Tower declares emergency FOR you! Certificate at risk.",
            )
            .reputation(&[("safety", -2)]),
        ]),
    ]
}
