use serde_json::json;

use crate::data::catalog::{EventCategory, EventDefinition, EventOption};

const CATEGORY: EventCategory = EventCategory::Financial;

pub fn events() -> Vec<EventDefinition> {
    vec![
        EventDefinition::new(
            "ppl_coin_intro",
            CATEGORY,
            "A fellow student pilot excitedly shows you his phone. 'Check out PPL Coin! It's a new crypto for pilots. I've already doubled my training fund!'",
        )
        .weight(0.15)
        .when(&["day > 10", "stats.money > 3000", "!chain.ppl_coin", "!decision.ppl_coin"])
        .options(vec![
            EventOption::new(
                "Invest $2000",
                &[("money", -2000.0)],
                "You buy 4000 PPL Coins at $0.50 each. Time will tell if this was wise...",
            )
            .chain_start("ppl_coin")
            .chain_data(json!({ "coins": 4000, "buy_price": 0.5 })),
            EventOption::new(
                "Research first",
                &[("knowledge", 2.0)],
                "You discover it's unregulated and based mostly on aviation memes. Concerning.",
            ),
            EventOption::new(
                "Hard pass",
                &[("safety", 3.0)],
                "You politely decline. Your training fund stays safe in the bank.",
            ),
        ]),
        EventDefinition::new(
            "headset_decision",
            CATEGORY,
            "Your borrowed headset finally died mid-flight. The FBO has several options available.",
        )
        .weight(0.2)
        .once()
        .when(&["stats.flight_hours > 2", "stats.flight_hours < 30"])
        .options(vec![
            EventOption::new(
                "Basic passive ($100)",
                &[("money", -100.0), ("safety", -2.0)],
                "It works, but the engine noise is fatiguing and ATC is hard to hear.",
            )
            .chain_start("cheap_headset"),
            EventOption::new(
                "ANR Lightspeed ($800)",
                &[("money", -800.0), ("safety", 8.0), ("morale", 10.0)],
                "Crystal clear audio and amazing comfort. Flying is so much more enjoyable!",
            ),
            EventOption::new(
                "Mid-range Faro ($350)",
                &[("money", -350.0), ("safety", 5.0), ("morale", 5.0)],
                "Good balance of features and cost. The noise reduction helps with fatigue.",
            ),
        ]),
        EventDefinition::new(
            "foreflight_subscription",
            CATEGORY,
            "Your paper charts are getting expensive to update. ForeFlight has a special student discount.",
        )
        .weight(0.15)
        .once()
        .when(&["stats.flight_hours > 5", "stats.knowledge > 30"])
        .options(vec![
            EventOption::new(
                "Basic Plus ($99/yr)",
                &[("money", -99.0), ("knowledge", 5.0)],
                "Digital charts and basic flight planning. A huge upgrade from paper!",
            )
            .chain_start("foreflight_user")
            .chain_data(json!({ "plan": "basic" })),
            EventOption::new(
                "Pro Plus ($199/yr)",
                &[("money", -199.0), ("knowledge", 8.0), ("safety", 5.0)],
                "Synthetic vision and hazard awareness. Your situational awareness improves dramatically.",
            )
            .chain_start("foreflight_user")
            .chain_data(json!({ "plan": "pro" })),
            EventOption::new(
                "Stick with paper",
                &[("money", -30.0)],
                "You buy updated sectionals. Old school, but it works.",
            )
            .chain_start("paper_charts_user"),
        ]),
        EventDefinition::new(
            "fuel_price_spike",
            CATEGORY,
            "Fuel prices just jumped 30% due to supply issues. The FBO is apologetic but firm on new rates.",
        )
        .weight(0.1)
        .once()
        .when(&["day > 7", "stats.money > 5000"])
        .options(vec![
            EventOption::new(
                "Absorb the cost",
                &[("money", -150.0), ("morale", -5.0)],
                "You'll manage, but your budget is getting tighter. All future flights cost more.",
            )
            .chain_data(json!({ "fuel_price_increased": true })),
            EventOption::new(
                "Switch to cheaper airport",
                &[("fatigue", 10.0), ("morale", -3.0)],
                "You find an airport 45min away with better prices. The extra driving adds fatigue to every flight.",
            )
            .chain_data(json!({ "cheaper_airport": true, "extra_driving": true })),
            EventOption::new(
                "Reduce flight frequency",
                &[("morale", -10.0), ("knowledge", -2.0)],
                "You space out lessons more to afford them. Progress slows but budget stays manageable.",
            )
            .chain_data(json!({ "reduced_frequency": true })),
        ]),
        EventDefinition::new(
            "work_bonus",
            CATEGORY,
            "Surprise! Your annual review went great and you got a $2000 bonus!",
        )
        .weight(0.08)
        .when(&["day > 15"])
        .options(vec![
            EventOption::new(
                "All to flight training!",
                &[("money", 2000.0), ("morale", 20.0)],
                "Your training fund gets a huge boost! PPL here you come!",
            ),
            EventOption::new(
                "Split it wisely",
                &[("money", 1000.0), ("morale", 15.0)],
                "Half for flying, half for life. Balance is important.",
            ),
        ]),
        EventDefinition::new(
            "aopa_scholarship",
            CATEGORY,
            "Email notification: 'Congratulations! You've been awarded a $500 AOPA flight training scholarship!'",
        )
        .weight(0.05)
        .once()
        .when(&["stats.knowledge > 50"])
        .options(vec![EventOption::new(
            "Amazing news!",
            &[("money", 500.0), ("morale", 25.0)],
            "Every bit helps! You're that much closer to your dream.",
        )]),
        EventDefinition::new(
            "car_breakdown",
            CATEGORY,
            "Your car won't start at the airport. The mechanic quotes $1200 for a new transmission.",
        )
        .weight(0.1)
        .options(vec![
            EventOption::new(
                "Fix it (no choice)",
                &[("money", -1200.0), ("morale", -20.0)],
                "There goes three flight lessons. Life always finds a way to interrupt dreams.",
            ),
            EventOption::new(
                "Cheap patch ($400)",
                &[("money", -400.0), ("morale", -10.0), ("safety", -5.0)],
                "It'll last a few months. You're cutting corners everywhere now.",
            ),
        ]),
        EventDefinition::new(
            "work_overtime",
            CATEGORY,
            "Your boss needs you to work weekends for the next month. 'It's critical for the project.'",
        )
        .weight(0.15)
        .when(&["day > 10"])
        .options(vec![
            EventOption::new(
                "Accept (need job)",
                &[("morale", -15.0), ("fatigue", 20.0), ("money", 500.0)],
                "Extra pay helps, but no weekend flying for a month. Progress stalls.",
            ),
            EventOption::new(
                "Negotiate mornings off",
                &[("morale", -5.0), ("fatigue", 10.0)],
                "You can still fly early mornings. Exhausting but manageable.",
            ),
            EventOption::new(
                "Risk saying no",
                &[("morale", 10.0), ("safety", 5.0)],
                "Surprisingly, they respect your boundary. 'We'll find another way.'",
            ),
        ]),
        EventDefinition::new(
            "tax_refund",
            CATEGORY,
            "Your tax refund arrived - $1,800! More than you expected.",
        )
        .weight(0.08)
        .once()
        .when(&["day > 30"])
        .options(vec![
            EventOption::new(
                "Straight to flying!",
                &[("money", 1800.0), ("morale", 18.0)],
                "That's 8-10 more flight hours funded! Perfect timing.",
            ),
            EventOption::new(
                "Save half",
                &[("money", 900.0), ("morale", 10.0)],
                "Emergency fund and flight fund both win. Smart choice.",
            ),
        ]),
        EventDefinition::new(
            "rent_increase",
            CATEGORY,
            "Letter from landlord: Rent is increasing by $200/month starting next month.",
        )
        .weight(0.1)
        .once()
        .when(&["day > 25"])
        .options(vec![
            EventOption::new(
                "Accept it",
                &[("morale", -25.0)],
                "That's one less flight lesson per month, indefinitely. Dreams just got harder.",
            ),
            EventOption::new(
                "Find roommate",
                &[("morale", -10.0), ("fatigue", 5.0)],
                "Sharing space isn't ideal, but it keeps the dream alive.",
            ),
        ]),
        EventDefinition::new(
            "employer_support",
            CATEGORY,
            "HR emails: 'We're starting an employee development fund. Flying lessons could qualify for $1000!'",
        )
        .weight(0.05)
        .once()
        .when(&["stats.knowledge > 40"])
        .options(vec![
            EventOption::new(
                "Apply immediately!",
                &[("money", 1000.0), ("morale", 30.0)],
                "Approved! Your company believes in your growth. What a boost!",
            ),
            EventOption::new(
                "Too good to be true?",
                &[("morale", -5.0)],
                "You hesitate and miss the deadline. Opportunity lost.",
            ),
        ]),
        EventDefinition::new(
            "credit_card_offer",
            CATEGORY,
            "Pre-approved for a credit card with 0% APR for 18 months. Could fund training now, pay later.",
        )
        .weight(0.08)
        .when(&["stats.money < 8000", "day > 20"])
        .options(vec![
            EventOption::new(
                "Take $3000 advance",
                &[("money", 3000.0), ("morale", -5.0)],
                "Risky but it accelerates training. Just need discipline to pay it back.",
            )
            .chain_data(json!({ "credit_card_debt": 3000 })),
            EventOption::new(
                "Too risky",
                &[("safety", 5.0)],
                "Debt and flying stress don't mix well. Slow and steady.",
            ),
        ]),
        EventDefinition::new(
            "pet_emergency",
            CATEGORY,
            "Your dog needs emergency surgery. The vet bill is $2000.",
        )
        .weight(0.08)
        .rare(1)
        .when(&["stats.money > 3000", "day > 15"])
        .options(vec![
            EventOption::new(
                "Do whatever it takes",
                &[("money", -2000.0), ("morale", -15.0)],
                "Your furry friend recovers fully, but the training fund takes a beating.",
            ),
            EventOption::new(
                "Payment plan",
                &[("money", -500.0), ("morale", -8.0)],
                "Vet offers monthly payments. Training slows but doesn't stop.",
            ),
        ]),
        EventDefinition::new(
            "flight_bag_upgrade",
            CATEGORY,
            "Your old backpack isn't cutting it. Time for a proper flight bag?",
        )
        .weight(0.15)
        .once()
        .when(&["stats.flight_hours > 5"])
        .options(vec![
            EventOption::new(
                "Brightline B7 ($250)",
                &[("money", -250.0), ("morale", 10.0)],
                "Professional pilot bag with perfect organization. You feel like a real pilot!",
            )
            .reputation(&[("peers", 1)]),
            EventOption::new(
                "Amazon basic ($50)",
                &[("money", -50.0)],
                "It holds your stuff. That's about it.",
            ),
            EventOption::new(
                "Keep backpack",
                &[("morale", -2.0)],
                "It's falling apart but still functional. Sort of.",
            ),
        ]),
        EventDefinition::new(
            "e6b_vs_app",
            CATEGORY,
            "You need a flight computer for navigation calculations. Old school or modern?",
        )
        .weight(0.1)
        .once()
        .when(&["stats.knowledge > 35"])
        .options(vec![
            EventOption::new(
                "Metal E6B ($70)",
                &[("money", -70.0), ("knowledge", 10.0)],
                "Classic tool that never needs batteries. You master the whiz wheel!",
            ),
            EventOption::new(
                "Electronic E6B ($150)",
                &[("money", -150.0), ("knowledge", 5.0)],
                "Quick calculations but you don't really understand the principles.",
            ),
            EventOption::new(
                "Phone app ($10)",
                &[("money", -10.0)],
                "Works great until your phone dies. Hope that doesn't happen in flight!",
            )
            .chain_data(json!({ "app_dependent": true })),
        ]),
        EventDefinition::new(
            "insurance_quote",
            CATEGORY,
            "After your first solo, renter's insurance is recommended. AOPA quotes you.",
        )
        .weight(0.1)
        .once()
        .when(&["stats.flight_hours > 10", "milestone.first_solo"])
        .options(vec![
            EventOption::new(
                "Full coverage ($800/yr)",
                &[("money", -800.0), ("safety", 15.0)],
                "Peace of mind. You're covered for $80k hull damage and liability.",
            )
            .reputation(&[("safety", 1)]),
            EventOption::new(
                "Basic coverage ($400/yr)",
                &[("money", -400.0), ("safety", 8.0)],
                "Liability only, but better than nothing.",
            ),
            EventOption::new(
                "Risk it",
                &[("safety", -10.0)],
                "You're personally liable for any damage. Hope nothing happens!",
            )
            .chain_data(json!({ "uninsured": true })),
        ]),
        EventDefinition::new(
            "lottery_ticket_win",
            CATEGORY,
            "The scratchers ticket you bought at the FBO... just won $5,000!",
        )
        .weight(0.005)
        .once()
        .memorable()
        .when(&["day > 20"])
        .options(vec![
            EventOption::new(
                "All on flying!",
                &[("money", 5000.0), ("morale", 35.0)],
                "Your training is now fully funded! Dreams do come true.",
            ),
            EventOption::new(
                "Save half",
                &[("money", 2500.0), ("safety", 10.0), ("morale", 20.0)],
                "Smart financial planning. You're set for training and emergencies.",
            ),
            EventOption::new(
                "Buy everyone drinks",
                &[("money", 4500.0), ("morale", 20.0)],
                "You're the FBO hero for a day! Everyone loves the generous student pilot.",
            )
            .reputation(&[("peers", 3), ("fbo", 2)]),
        ]),
    ]
}
