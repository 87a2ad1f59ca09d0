use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use bevy_utils::tracing::info;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use thiserror::Error;

use crate::data::chains::ChainRegistry;
use crate::rng::RandomSource;
use crate::simulation::endgame::EndingKind;
use crate::simulation::state::{ChainPayload, GameState, StatDeltas};

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read event catalog {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse event catalog {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("duplicate event id {0}")]
    DuplicateId(String),
    #[error("event id cannot be empty")]
    EmptyId,
    #[error("event {0} has no text")]
    MissingText(String),
    #[error("event {0} has no options")]
    NoOptions(String),
    #[error("event {event} option {index} has no label")]
    UnlabeledOption { event: String, index: usize },
    #[error("event {event} has weight {weight} outside (0, 1]")]
    InvalidWeight { event: String, weight: f64 },
    #[error("event {event} references undeclared chain {chain}")]
    UndeclaredChain { event: String, chain: String },
    #[error("event {event} sets next phase {phase} without a chain link")]
    PhaseWithoutChain { event: String, phase: String },
    #[error("event {event} moves chain {chain} to undeclared phase {phase}")]
    UndeclaredPhase {
        event: String,
        chain: String,
        phase: String,
    },
    #[error("chain {chain} declares invalid transition {from} -> {to}")]
    InvalidTransition {
        chain: String,
        from: String,
        to: String,
    },
    #[error("chain {0} is declared twice")]
    DuplicateChain(String),
}

#[derive(Debug, Error)]
#[error("{0}")]
pub struct ImpactError(pub String);

pub type ImpactFn = fn(&GameState, &mut dyn RandomSource) -> Result<StatDeltas, ImpactError>;
pub type OutcomeFn = fn(&GameState) -> String;

/// Either fixed deltas or deltas computed from the state at resolution time.
#[derive(Clone)]
pub enum Impact {
    Static(StatDeltas),
    Computed(ImpactFn),
}

impl Default for Impact {
    fn default() -> Self {
        Impact::Static(StatDeltas::new())
    }
}

impl fmt::Debug for Impact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Impact::Static(deltas) => f.debug_tuple("Static").field(deltas).finish(),
            Impact::Computed(_) => f.write_str("Computed(..)"),
        }
    }
}

impl<'de> Deserialize<'de> for Impact {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        StatDeltas::deserialize(deserializer).map(Impact::Static)
    }
}

#[derive(Clone)]
pub enum Outcome {
    Static(String),
    Computed(OutcomeFn),
}

impl Outcome {
    pub fn render(&self, state: &GameState) -> String {
        match self {
            Outcome::Static(text) => text.clone(),
            Outcome::Computed(f) => f(state),
        }
    }
}

impl fmt::Debug for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Static(text) => f.debug_tuple("Static").field(text).finish(),
            Outcome::Computed(_) => f.write_str("Computed(..)"),
        }
    }
}

impl<'de> Deserialize<'de> for Outcome {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        String::deserialize(deserializer).map(Outcome::Static)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Frequency {
    Once,
    Rare,
    #[default]
    Repeatable,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventCategory {
    Financial,
    Social,
    Training,
    Safety,
    Weather,
    Equipment,
    Absurd,
    Consequence,
    /// Raised by actions, never drawn at random.
    Intervention,
    Custom,
}

impl EventCategory {
    pub fn is_random(self) -> bool {
        !matches!(self, EventCategory::Intervention)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct EventOption {
    pub text: String,
    #[serde(default)]
    pub impact: Impact,
    pub outcome: Outcome,
    #[serde(default)]
    pub reputation: BTreeMap<String, i64>,
    #[serde(default)]
    pub chain_start: Option<String>,
    #[serde(default)]
    pub chain_data: Option<ChainPayload>,
    #[serde(default)]
    pub next_phase: Option<String>,
    #[serde(default)]
    pub end_chain: bool,
    #[serde(default)]
    pub trigger_ending: Option<EndingKind>,
}

impl EventOption {
    pub fn new(text: &str, impact: &[(&str, f64)], outcome: &str) -> Self {
        Self {
            text: text.to_string(),
            impact: Impact::Static(deltas(impact)),
            outcome: Outcome::Static(outcome.to_string()),
            reputation: BTreeMap::new(),
            chain_start: None,
            chain_data: None,
            next_phase: None,
            end_chain: false,
            trigger_ending: None,
        }
    }

    pub fn computed(text: &str, impact: ImpactFn, outcome: &str) -> Self {
        Self {
            impact: Impact::Computed(impact),
            ..Self::new(text, &[], outcome)
        }
    }

    pub fn outcome_fn(mut self, outcome: OutcomeFn) -> Self {
        self.outcome = Outcome::Computed(outcome);
        self
    }

    pub fn reputation(mut self, deltas: &[(&str, i64)]) -> Self {
        self.reputation = deltas
            .iter()
            .map(|(faction, delta)| (faction.to_string(), *delta))
            .collect();
        self
    }

    pub fn chain_start(mut self, chain: &str) -> Self {
        self.chain_start = Some(chain.to_string());
        self
    }

    /// Accepts a JSON object; anything else is ignored.
    pub fn chain_data(mut self, data: Value) -> Self {
        if let Value::Object(map) = data {
            self.chain_data = Some(map);
        }
        self
    }

    pub fn next_phase(mut self, phase: &str) -> Self {
        self.next_phase = Some(phase.to_string());
        self
    }

    pub fn end_chain(mut self) -> Self {
        self.end_chain = true;
        self
    }

    pub fn trigger_ending(mut self, ending: EndingKind) -> Self {
        self.trigger_ending = Some(ending);
        self
    }
}

pub fn deltas(pairs: &[(&str, f64)]) -> StatDeltas {
    pairs
        .iter()
        .map(|(stat, delta)| (stat.to_string(), *delta))
        .collect()
}

#[derive(Debug, Clone, Deserialize)]
pub struct EventDefinition {
    pub id: String,
    #[serde(default = "default_category")]
    pub category: EventCategory,
    pub text: String,
    #[serde(default)]
    pub probability: Option<f64>,
    #[serde(default)]
    pub conditions: Vec<String>,
    #[serde(default)]
    pub frequency: Frequency,
    #[serde(default)]
    pub max_occurrences: Option<u32>,
    #[serde(default)]
    pub chain_link: Option<String>,
    #[serde(default)]
    pub memorable: bool,
    /// Set on follow-ups pinned to a day offset by the chain dispatch table;
    /// these skip the recency cooldown.
    #[serde(skip)]
    pub scheduled: bool,
    pub options: Vec<EventOption>,
}

fn default_category() -> EventCategory {
    EventCategory::Custom
}

impl EventDefinition {
    pub fn new(id: &str, category: EventCategory, text: &str) -> Self {
        Self {
            id: id.to_string(),
            category,
            text: text.to_string(),
            probability: None,
            conditions: Vec::new(),
            frequency: Frequency::Repeatable,
            max_occurrences: None,
            chain_link: None,
            memorable: false,
            scheduled: false,
            options: Vec::new(),
        }
    }

    pub fn weight(mut self, probability: f64) -> Self {
        self.probability = Some(probability);
        self
    }

    pub fn when(mut self, clauses: &[&str]) -> Self {
        self.conditions = clauses.iter().map(|clause| clause.to_string()).collect();
        self
    }

    pub fn once(mut self) -> Self {
        self.frequency = Frequency::Once;
        self
    }

    pub fn rare(mut self, max_occurrences: u32) -> Self {
        self.frequency = Frequency::Rare;
        self.max_occurrences = Some(max_occurrences);
        self
    }

    pub fn chain_link(mut self, chain: &str) -> Self {
        self.chain_link = Some(chain.to_string());
        self
    }

    pub fn memorable(mut self) -> Self {
        self.memorable = true;
        self
    }

    pub fn scheduled(mut self) -> Self {
        self.scheduled = true;
        self
    }

    pub fn options(mut self, options: Vec<EventOption>) -> Self {
        self.options = options;
        self
    }

    pub fn effective_weight(&self, default_weight: f64) -> f64 {
        self.probability.unwrap_or(default_weight)
    }

    pub fn summary(&self) -> EventSummary {
        EventSummary {
            id: self.id.clone(),
            category: self.category,
            text: self.text.clone(),
            options: self.options.iter().map(|option| option.text.clone()).collect(),
            memorable: self.memorable,
        }
    }
}

/// What a presentation layer needs to render an event and its choices.
#[derive(Debug, Clone, PartialEq)]
pub struct EventSummary {
    pub id: String,
    pub category: EventCategory,
    pub text: String,
    pub options: Vec<String>,
    pub memorable: bool,
}

/// JSON file shape for extra content merged into the builtin catalog.
#[derive(Debug, Deserialize)]
pub struct EventCatalogFile {
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,
    pub events: Vec<EventDefinition>,
}

fn default_schema_version() -> u32 {
    1
}

/// Immutable, validated set of event definitions with unique ids.
#[derive(Debug, Clone, Default)]
pub struct EventCatalog {
    events: Vec<EventDefinition>,
    index: HashMap<String, usize>,
}

impl EventCatalog {
    pub fn from_events(
        events: Vec<EventDefinition>,
        chains: &ChainRegistry,
    ) -> Result<Self, CatalogError> {
        let mut catalog = Self::default();
        for event in events {
            catalog.insert(event, chains)?;
        }
        Ok(catalog)
    }

    /// Builtin content from every category module, validated.
    pub fn builtin(chains: &ChainRegistry) -> Result<Self, CatalogError> {
        let catalog = Self::from_events(crate::data::builtin_events(), chains)?;
        info!(target: "ppl::catalog", events = catalog.len(), "catalog.loaded=builtin");
        Ok(catalog)
    }

    /// Merge events from a JSON file. Ids colliding with existing events fail
    /// the whole load and leave the catalog unchanged.
    pub fn merge_file(
        &mut self,
        path: impl AsRef<Path>,
        chains: &ChainRegistry,
    ) -> Result<usize, CatalogError> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).map_err(|source| CatalogError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let file: EventCatalogFile =
            serde_json::from_str(&raw).map_err(|source| CatalogError::Parse {
                path: path.to_path_buf(),
                source,
            })?;

        let mut merged = self.clone();
        let added = file.events.len();
        for event in file.events {
            merged.insert(event, chains)?;
        }
        *self = merged;
        info!(
            target: "ppl::catalog",
            path = %path.display(),
            schema_version = file.schema_version,
            added,
            "catalog.loaded=file"
        );
        Ok(added)
    }

    fn insert(&mut self, event: EventDefinition, chains: &ChainRegistry) -> Result<(), CatalogError> {
        validate_event(&event, chains)?;
        if self.index.contains_key(&event.id) {
            return Err(CatalogError::DuplicateId(event.id));
        }
        self.index.insert(event.id.clone(), self.events.len());
        self.events.push(event);
        Ok(())
    }

    pub fn get(&self, id: &str) -> Option<&EventDefinition> {
        self.index.get(id).map(|idx| &self.events[*idx])
    }

    /// Events in catalog order.
    pub fn iter(&self) -> impl Iterator<Item = &EventDefinition> {
        self.events.iter()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

/// Structural checks shared by catalog events and generated chain follow-ups.
pub fn validate_event(event: &EventDefinition, chains: &ChainRegistry) -> Result<(), CatalogError> {
    if event.id.trim().is_empty() {
        return Err(CatalogError::EmptyId);
    }
    if event.text.trim().is_empty() {
        return Err(CatalogError::MissingText(event.id.clone()));
    }
    if event.options.is_empty() {
        return Err(CatalogError::NoOptions(event.id.clone()));
    }
    if let Some(weight) = event.probability {
        if !(weight > 0.0 && weight <= 1.0) {
            return Err(CatalogError::InvalidWeight {
                event: event.id.clone(),
                weight,
            });
        }
    }
    if let Some(chain) = &event.chain_link {
        if chains.get(chain).is_none() {
            return Err(CatalogError::UndeclaredChain {
                event: event.id.clone(),
                chain: chain.clone(),
            });
        }
    }

    for (index, option) in event.options.iter().enumerate() {
        if option.text.trim().is_empty() {
            return Err(CatalogError::UnlabeledOption {
                event: event.id.clone(),
                index,
            });
        }
        if let Some(chain) = &option.chain_start {
            if chains.get(chain).is_none() {
                return Err(CatalogError::UndeclaredChain {
                    event: event.id.clone(),
                    chain: chain.clone(),
                });
            }
        }
        if let Some(phase) = &option.next_phase {
            let Some(chain) = &event.chain_link else {
                return Err(CatalogError::PhaseWithoutChain {
                    event: event.id.clone(),
                    phase: phase.clone(),
                });
            };
            let declared = chains
                .get(chain)
                .map(|definition| definition.has_phase(phase))
                .unwrap_or(false);
            if !declared {
                return Err(CatalogError::UndeclaredPhase {
                    event: event.id.clone(),
                    chain: chain.clone(),
                    phase: phase.clone(),
                });
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::condition;

    fn registry() -> ChainRegistry {
        ChainRegistry::builtin().unwrap()
    }

    fn simple(id: &str) -> EventDefinition {
        EventDefinition::new(id, EventCategory::Custom, "Something happens.")
            .options(vec![EventOption::new("Ok", &[("morale", 1.0)], "Fine.")])
    }

    #[test]
    fn builtin_catalog_validates() {
        let catalog = EventCatalog::builtin(&registry()).unwrap();
        assert!(catalog.len() > 50);
    }

    #[test]
    fn builtin_conditions_all_parse() {
        let catalog = EventCatalog::builtin(&registry()).unwrap();
        let state = GameState::default();
        for event in catalog.iter() {
            for clause in &event.conditions {
                assert!(
                    condition::evaluate(clause, &state).is_ok(),
                    "{}: `{}` does not evaluate",
                    event.id,
                    clause
                );
            }
        }
    }

    #[test]
    fn duplicate_ids_fail_fast() {
        let err = EventCatalog::from_events(vec![simple("a"), simple("a")], &registry()).unwrap_err();
        assert!(matches!(err, CatalogError::DuplicateId(id) if id == "a"));
    }

    #[test]
    fn empty_options_rejected() {
        let event = EventDefinition::new("bare", EventCategory::Custom, "Nothing to pick.");
        let err = EventCatalog::from_events(vec![event], &registry()).unwrap_err();
        assert!(matches!(err, CatalogError::NoOptions(_)));
    }

    #[test]
    fn undeclared_phase_rejected() {
        let event = EventDefinition::new("coin_moon", EventCategory::Custom, "To the moon.")
            .chain_link("ppl_coin")
            .options(vec![EventOption::new("Hold", &[], "Holding.").next_phase("moon")]);
        let err = EventCatalog::from_events(vec![event], &registry()).unwrap_err();
        assert!(matches!(err, CatalogError::UndeclaredPhase { .. }));
    }

    #[test]
    fn phase_without_chain_rejected() {
        let event = EventDefinition::new("orphan", EventCategory::Custom, "Orphan phase.")
            .options(vec![EventOption::new("Go", &[], "Gone.").next_phase("crash")]);
        let err = EventCatalog::from_events(vec![event], &registry()).unwrap_err();
        assert!(matches!(err, CatalogError::PhaseWithoutChain { .. }));
    }

    #[test]
    fn weight_must_be_in_unit_interval() {
        let event = simple("heavy").weight(1.5);
        let err = EventCatalog::from_events(vec![event], &registry()).unwrap_err();
        assert!(matches!(err, CatalogError::InvalidWeight { .. }));
    }

    #[test]
    fn json_events_deserialize_with_static_impacts() {
        let raw = r#"{
            "events": [{
                "id": "hangar_cat",
                "text": "A cat has moved into the hangar.",
                "probability": 0.2,
                "conditions": ["day > 3"],
                "options": [
                    { "text": "Adopt it", "impact": { "morale": 5, "money": -40 }, "outcome": "Purring copilot acquired." }
                ]
            }]
        }"#;
        let file: EventCatalogFile = serde_json::from_str(raw).unwrap();
        let event = &file.events[0];
        assert_eq!(event.category, EventCategory::Custom);
        assert_eq!(event.frequency, Frequency::Repeatable);
        match &event.options[0].impact {
            Impact::Static(deltas) => assert_eq!(deltas.get("money"), Some(&-40.0)),
            Impact::Computed(_) => panic!("expected static impact"),
        }
    }
}
