use bevy_utils::tracing::warn;

use crate::config::EngineConfig;
use crate::data::catalog::{EventCatalog, EventDefinition, Frequency};
use crate::rules::condition;
use crate::simulation::state::GameState;

/// Catalog events that may be drawn today, in catalog order.
pub fn eligible_events<'a>(
    catalog: &'a EventCatalog,
    state: &GameState,
    config: &EngineConfig,
) -> Vec<&'a EventDefinition> {
    catalog
        .iter()
        .filter(|event| is_eligible(event, state, config))
        .collect()
}

pub fn is_eligible(event: &EventDefinition, state: &GameState, config: &EngineConfig) -> bool {
    if !event.category.is_random() {
        return false;
    }
    if !conditions_hold(event, state) {
        return false;
    }
    if !passes_frequency(event, state) {
        return false;
    }
    if !passes_recency(event, state, config) {
        return false;
    }
    match &event.chain_link {
        Some(chain) => state.is_chain_active(chain),
        None => true,
    }
}

/// A clause that fails to evaluate makes the event ineligible; it never
/// aborts selection.
fn conditions_hold(event: &EventDefinition, state: &GameState) -> bool {
    match condition::evaluate_all(&event.conditions, state) {
        Ok(holds) => holds,
        Err(err) => {
            warn!(
                target: "ppl::eligibility",
                event = %event.id,
                error = %err,
                "condition failed to evaluate; event ineligible"
            );
            false
        }
    }
}

pub fn passes_frequency(event: &EventDefinition, state: &GameState) -> bool {
    let fired = state.occurrences(&event.id);
    match event.frequency {
        Frequency::Once => fired == 0,
        Frequency::Rare => fired < event.max_occurrences.unwrap_or(1),
        Frequency::Repeatable => true,
    }
}

/// Cooldown since the last firing. Scheduled chain follow-ups are exempt.
pub fn passes_recency(event: &EventDefinition, state: &GameState, config: &EngineConfig) -> bool {
    if event.scheduled {
        return true;
    }
    match state.last_fired(&event.id) {
        Some(day) => state.day.saturating_sub(day) >= config.cooldown_days,
        None => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::catalog::{EventCategory, EventOption};
    use crate::data::chains::ChainRegistry;

    fn event(id: &str) -> EventDefinition {
        EventDefinition::new(id, EventCategory::Custom, "Test event.")
            .options(vec![EventOption::new("Ok", &[], "Done.")])
    }

    fn catalog(events: Vec<EventDefinition>) -> EventCatalog {
        EventCatalog::from_events(events, &ChainRegistry::builtin().unwrap()).unwrap()
    }

    fn ids(events: &[&EventDefinition]) -> Vec<String> {
        events.iter().map(|event| event.id.clone()).collect()
    }

    #[test]
    fn once_events_fire_once() {
        let catalog = catalog(vec![event("solo_shirt").once()]);
        let config = EngineConfig::default();
        let mut state = GameState::default();
        state.day = 3;
        assert_eq!(eligible_events(&catalog, &state, &config).len(), 1);
        state.record_event("solo_shirt", 0, true);
        state.day = 50;
        assert!(eligible_events(&catalog, &state, &config).is_empty());
    }

    #[test]
    fn rare_events_stop_at_cap() {
        let catalog = catalog(vec![event("bird").rare(2)]);
        let config = EngineConfig::default();
        let mut state = GameState::default();
        state.record_event("bird", 0, false);
        state.day = 20;
        assert_eq!(eligible_events(&catalog, &state, &config).len(), 1);
        state.record_event("bird", 0, false);
        state.day = 40;
        assert!(eligible_events(&catalog, &state, &config).is_empty());
    }

    #[test]
    fn cooldown_window() {
        let catalog = catalog(vec![event("cfi_late")]);
        let config = EngineConfig::default();
        let mut state = GameState::default();
        state.day = 10;
        state.record_event("cfi_late", 0, false);
        for day in 11..15 {
            state.day = day;
            assert!(eligible_events(&catalog, &state, &config).is_empty(), "day {day}");
        }
        state.day = 15;
        assert_eq!(ids(&eligible_events(&catalog, &state, &config)), vec!["cfi_late"]);
    }

    #[test]
    fn scheduled_follow_ups_skip_cooldown() {
        let config = EngineConfig::default();
        let mut state = GameState::default();
        state.day = 4;
        state.record_event("ppl_coin_rise", 0, true);
        state.day = 5;
        assert!(!passes_recency(&event("ppl_coin_rise"), &state, &config));
        assert!(passes_recency(&event("ppl_coin_rise").scheduled(), &state, &config));
    }

    #[test]
    fn malformed_condition_is_ineligible() {
        let catalog = catalog(vec![
            event("broken").when(&["stats.charisma > 5"]),
            event("fine").when(&["day >= 1"]),
        ]);
        let state = GameState::default();
        let eligible = eligible_events(&catalog, &state, &EngineConfig::default());
        assert_eq!(ids(&eligible), vec!["fine"]);
    }

    #[test]
    fn chain_links_require_active_chain() {
        let catalog = catalog(vec![event("lecture").chain_link("straight_in_scolding")]);
        let config = EngineConfig::default();
        let mut state = GameState::default();
        assert!(eligible_events(&catalog, &state, &config).is_empty());
        crate::simulation::chains::start_chain(
            &mut state,
            "straight_in_scolding",
            Default::default(),
        );
        assert_eq!(eligible_events(&catalog, &state, &config).len(), 1);
    }

    #[test]
    fn interventions_are_never_drawn() {
        let intervention = EventDefinition::new("imsafe", EventCategory::Intervention, "Tired.")
            .options(vec![EventOption::new("Rest", &[], "Rested.")]);
        let catalog = catalog(vec![intervention]);
        let state = GameState::default();
        assert!(eligible_events(&catalog, &state, &EngineConfig::default()).is_empty());
    }
}
