//! Declared event chains: phases, allowed transitions, and the dispatch
//! table for follow-ups that are generated from live state rather than
//! stored in the catalog.

use std::collections::BTreeMap;
use std::fmt;

use serde_json::{json, Value};

use crate::data::catalog::{CatalogError, EventCategory, EventDefinition, EventOption};
use crate::simulation::endgame::EndingKind;
use crate::simulation::state::{ActiveChain, GameState};

pub const INITIAL_PHASE: &str = "initial";

pub type ConsequenceFn = fn(&GameState, &ActiveChain) -> Option<EventDefinition>;

#[derive(Clone)]
pub struct ChainDefinition {
    pub id: &'static str,
    /// Declared in order; the first entry is where every chain starts.
    pub phases: &'static [&'static str],
    pub transitions: &'static [(&'static str, &'static str)],
    pub consequence: Option<ConsequenceFn>,
}

impl ChainDefinition {
    const fn single(id: &'static str) -> Self {
        Self {
            id,
            phases: &[INITIAL_PHASE],
            transitions: &[],
            consequence: None,
        }
    }

    pub fn has_phase(&self, phase: &str) -> bool {
        self.phases.contains(&phase)
    }

    pub fn allows(&self, from: &str, to: &str) -> bool {
        self.transitions
            .iter()
            .any(|(allowed_from, allowed_to)| *allowed_from == from && *allowed_to == to)
    }

    fn position(&self, phase: &str) -> Option<usize> {
        self.phases.iter().position(|declared| *declared == phase)
    }
}

impl fmt::Debug for ChainDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChainDefinition")
            .field("id", &self.id)
            .field("phases", &self.phases)
            .field("transitions", &self.transitions)
            .field("consequence", &self.consequence.is_some())
            .finish()
    }
}

const BUILTIN_CHAINS: &[ChainDefinition] = &[
    ChainDefinition {
        id: "ppl_coin",
        phases: &[INITIAL_PHASE, "crash"],
        transitions: &[(INITIAL_PHASE, "crash")],
        consequence: Some(ppl_coin_followup),
    },
    ChainDefinition {
        id: "checkride_prep",
        phases: &[INITIAL_PHASE, "checkride"],
        transitions: &[(INITIAL_PHASE, "checkride")],
        consequence: Some(checkride_followup),
    },
    ChainDefinition {
        id: "faa_report",
        phases: &[INITIAL_PHASE, "hearing"],
        transitions: &[(INITIAL_PHASE, "hearing")],
        consequence: None,
    },
    ChainDefinition::single("foreflight_user"),
    ChainDefinition::single("paper_charts_user"),
    ChainDefinition::single("helped_student"),
    ChainDefinition::single("cheap_headset"),
    ChainDefinition::single("cfi_good_relationship"),
    ChainDefinition::single("radio_fame"),
    ChainDefinition::single("maverick_callsign"),
    ChainDefinition::single("straight_in_scolding"),
    ChainDefinition::single("warbird_tour"),
    ChainDefinition::single("weather_diversion_good"),
    ChainDefinition::single("night_flying"),
    ChainDefinition::single("radio_issues"),
    ChainDefinition::single("social_network"),
];

/// Immutable lookup of chain definitions by id.
#[derive(Debug, Clone, Default)]
pub struct ChainRegistry {
    chains: BTreeMap<String, ChainDefinition>,
}

impl ChainRegistry {
    pub fn builtin() -> Result<Self, CatalogError> {
        Self::from_definitions(BUILTIN_CHAINS.iter().cloned())
    }

    /// Transitions must join declared phases and only move forward in
    /// declaration order, so a chain can never regress.
    pub fn from_definitions(
        definitions: impl IntoIterator<Item = ChainDefinition>,
    ) -> Result<Self, CatalogError> {
        let mut chains = BTreeMap::new();
        for definition in definitions {
            for (from, to) in definition.transitions {
                let forward = match (definition.position(from), definition.position(to)) {
                    (Some(from_idx), Some(to_idx)) => from_idx < to_idx,
                    _ => false,
                };
                if !forward {
                    return Err(CatalogError::InvalidTransition {
                        chain: definition.id.to_string(),
                        from: from.to_string(),
                        to: to.to_string(),
                    });
                }
            }
            let id = definition.id.to_string();
            if chains.insert(id.clone(), definition).is_some() {
                return Err(CatalogError::DuplicateChain(id));
            }
        }
        Ok(Self { chains })
    }

    pub fn get(&self, id: &str) -> Option<&ChainDefinition> {
        self.chains.get(id)
    }

    pub fn can_transition(&self, chain: &str, from: &str, to: &str) -> bool {
        self.get(chain)
            .map(|definition| definition.allows(from, to))
            .unwrap_or(false)
    }

    /// Follow-up generated for an active chain today, if any. Generated events
    /// carry the chain id as their link.
    pub fn consequence(&self, chain_id: &str, state: &GameState, chain: &ActiveChain) -> Option<EventDefinition> {
        let generate = self.get(chain_id)?.consequence?;
        generate(state, chain).map(|event| event.chain_link(chain_id))
    }

    pub fn iter(&self) -> impl Iterator<Item = &ChainDefinition> {
        self.chains.values()
    }

    pub fn len(&self) -> usize {
        self.chains.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chains.is_empty()
    }
}

const PPL_COIN_RISE_AGE: u32 = 5;
const PPL_COIN_CRASH_AGE: u32 = 10;

fn ppl_coin_followup(state: &GameState, chain: &ActiveChain) -> Option<EventDefinition> {
    let age = chain.age(state.day);
    match chain.phase.as_str() {
        INITIAL_PHASE if age >= PPL_COIN_RISE_AGE => Some(ppl_coin_rise()),
        "crash" if age >= PPL_COIN_CRASH_AGE => Some(ppl_coin_crash()),
        _ => None,
    }
}

fn ppl_coin_rise() -> EventDefinition {
    EventDefinition::new(
        "ppl_coin_rise",
        EventCategory::Consequence,
        "PPL Coin is mooning! It's now at $2.50. Your investment is worth $10,000!",
    )
    .scheduled()
    .memorable()
    .options(vec![
        EventOption::new("HODL to the moon!", &[], "Diamond hands! You're keeping all 4000 coins.")
            .next_phase("crash"),
        EventOption::new(
            "Sell half",
            &[("money", 5000.0)],
            "You cash out $5000, keeping 2000 coins. Smart hedging!",
        )
        .chain_data(json!({ "coins": 2000 }))
        .next_phase("crash"),
        EventOption::new(
            "Sell everything",
            &[("money", 10000.0), ("morale", 20.0)],
            "You pocket $10,000 profit! Perfect timing.",
        )
        .end_chain(),
    ])
}

fn ppl_coin_crash() -> EventDefinition {
    EventDefinition::new(
        "ppl_coin_crash",
        EventCategory::Consequence,
        "PPL Coin crashed overnight! The founder was arrested for fraud. It's now worthless.",
    )
    .scheduled()
    .memorable()
    .options(vec![EventOption::new(
        "Accept the loss",
        &[("morale", -25.0), ("knowledge", 10.0)],
        "",
    )
    .outcome_fn(ppl_coin_crash_outcome)
    .end_chain()])
}

fn ppl_coin_crash_outcome(state: &GameState) -> String {
    let coins = state
        .active_chains
        .get("ppl_coin")
        .and_then(|chain| chain.payload.get("coins"))
        .and_then(Value::as_u64)
        .unwrap_or(0);
    format!(
        "{coins} coins, worth nothing. Expensive lesson learned. At least you have a story for the hangar."
    )
}

const MOCK_CHECKRIDE_HOURS: f64 = 38.0;
const CHECKRIDE_HOURS: f64 = 40.0;
const CHECKRIDE_PASS_KNOWLEDGE: f64 = 80.0;
const CHECKRIDE_PASS_SAFETY: f64 = 75.0;

fn checkride_followup(state: &GameState, chain: &ActiveChain) -> Option<EventDefinition> {
    let hours = state.stats.flight_hours;
    match chain.phase.as_str() {
        INITIAL_PHASE if hours >= MOCK_CHECKRIDE_HOURS => Some(checkride_mock()),
        "checkride" if hours >= CHECKRIDE_HOURS => Some(checkride_final(passes_checkride(state))),
        _ => None,
    }
}

pub fn passes_checkride(state: &GameState) -> bool {
    state.stats.knowledge >= CHECKRIDE_PASS_KNOWLEDGE && state.stats.safety >= CHECKRIDE_PASS_SAFETY
}

fn checkride_mock() -> EventDefinition {
    EventDefinition::new(
        "checkride_mock",
        EventCategory::Consequence,
        "Your CFI announces: 'I think you're ready for your checkride! Let's do a mock exam.'",
    )
    .options(vec![
        EventOption::new(
            "Let's do this!",
            &[("money", -200.0), ("knowledge", 15.0), ("safety", 10.0)],
            "The mock checkride goes well. A few rough spots but you're close!",
        )
        .next_phase("checkride"),
        EventOption::new(
            "Need more practice",
            &[("safety", 5.0)],
            "You decide to fly a few more hours first. Better safe than sorry.",
        ),
    ])
}

/// The pass decision is taken from the state the event is built from; the
/// same state is seen again when the choice is resolved.
fn checkride_final(pass: bool) -> EventDefinition {
    let take = if pass {
        EventOption::new(
            "Take checkride ($500)",
            &[("money", -500.0)],
            "CONGRATULATIONS! You passed! You're now a licensed Private Pilot!",
        )
        .trigger_ending(EndingKind::Success)
        .end_chain()
    } else {
        EventOption::new(
            "Take checkride ($500)",
            &[("money", -500.0), ("morale", -10.0)],
            "You didn't pass. The DPE suggests more practice on steep turns and emergency procedures.",
        )
    };

    EventDefinition::new(
        "checkride_final",
        EventCategory::Consequence,
        "Today's the day! Your DPE examiner awaits. Ready for your Private Pilot checkride?",
    )
    .memorable()
    .options(vec![
        take,
        EventOption::new(
            "Postpone",
            &[("morale", -5.0)],
            "You reschedule for next week. Sometimes discretion is the better part of valor.",
        ),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::catalog::validate_event;
    use crate::simulation::state::ChainPayload;

    fn chain(start_day: u32, phase: &str) -> ActiveChain {
        ActiveChain {
            start_day,
            phase: phase.to_string(),
            payload: ChainPayload::new(),
        }
    }

    #[test]
    fn builtin_registry_is_consistent() {
        let registry = ChainRegistry::builtin().unwrap();
        assert!(registry.can_transition("ppl_coin", "initial", "crash"));
        assert!(!registry.can_transition("ppl_coin", "crash", "initial"));
        assert!(!registry.can_transition("unknown", "initial", "crash"));
        for definition in registry.iter() {
            assert_eq!(definition.phases[0], INITIAL_PHASE, "{}", definition.id);
        }
    }

    #[test]
    fn backward_transition_is_rejected() {
        let broken = ChainDefinition {
            id: "loop",
            phases: &["initial", "later"],
            transitions: &[("later", "initial")],
            consequence: None,
        };
        let err = ChainRegistry::from_definitions([broken]).unwrap_err();
        assert!(matches!(err, CatalogError::InvalidTransition { .. }));
    }

    #[test]
    fn duplicate_chain_is_rejected() {
        let err = ChainRegistry::from_definitions([
            ChainDefinition::single("twice"),
            ChainDefinition::single("twice"),
        ])
        .unwrap_err();
        assert!(matches!(err, CatalogError::DuplicateChain(id) if id == "twice"));
    }

    #[test]
    fn ppl_coin_follows_its_schedule() {
        let registry = ChainRegistry::builtin().unwrap();
        let mut state = GameState::default();
        state.day = 14;
        assert!(registry.consequence("ppl_coin", &state, &chain(10, "initial")).is_none());

        state.day = 15;
        let rise = registry
            .consequence("ppl_coin", &state, &chain(10, "initial"))
            .unwrap();
        assert_eq!(rise.id, "ppl_coin_rise");
        assert_eq!(rise.chain_link.as_deref(), Some("ppl_coin"));
        assert!(rise.scheduled);

        assert!(registry.consequence("ppl_coin", &state, &chain(10, "crash")).is_none());
        state.day = 20;
        let crash = registry
            .consequence("ppl_coin", &state, &chain(10, "crash"))
            .unwrap();
        assert_eq!(crash.id, "ppl_coin_crash");
    }

    #[test]
    fn checkride_outcome_depends_on_state() {
        let registry = ChainRegistry::builtin().unwrap();
        let mut state = GameState::default();
        state.stats.flight_hours = 41.0;
        state.stats.knowledge = 70.0;
        state.stats.safety = 90.0;
        let failing = registry
            .consequence("checkride_prep", &state, &chain(1, "checkride"))
            .unwrap();
        assert_eq!(failing.options[0].trigger_ending, None);
        assert!(!failing.options[0].end_chain);

        state.stats.knowledge = 85.0;
        let passing = registry
            .consequence("checkride_prep", &state, &chain(1, "checkride"))
            .unwrap();
        assert_eq!(passing.options[0].trigger_ending, Some(EndingKind::Success));
    }

    #[test]
    fn generated_followups_validate() {
        let registry = ChainRegistry::builtin().unwrap();
        let mut state = GameState::default();
        state.day = 30;
        state.stats.flight_hours = 45.0;
        let samples = [
            ("ppl_coin", chain(1, "initial")),
            ("ppl_coin", chain(1, "crash")),
            ("checkride_prep", chain(1, "initial")),
            ("checkride_prep", chain(1, "checkride")),
        ];
        for (id, active) in samples {
            let event = registry.consequence(id, &state, &active).unwrap();
            validate_event(&event, &registry).unwrap();
        }
    }
}
