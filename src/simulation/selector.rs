use std::borrow::Cow;

use bevy_utils::tracing::debug;

use crate::core::context::EngineContext;
use crate::data::catalog::EventDefinition;
use crate::rng::RandomSource;
use crate::simulation::chains::due_consequences;
use crate::simulation::eligibility::eligible_events;
use crate::simulation::state::GameState;

/// Roulette-wheel pick in slice order. Returns `None` only for an empty set.
pub fn select_weighted<'a>(
    eligible: &[&'a EventDefinition],
    default_weight: f64,
    rng: &mut dyn RandomSource,
) -> Option<&'a EventDefinition> {
    let first = *eligible.first()?;
    let total: f64 = eligible
        .iter()
        .map(|event| event.effective_weight(default_weight))
        .sum();
    let mut remaining = rng.next_f64() * total;
    for &event in eligible {
        remaining -= event.effective_weight(default_weight);
        if remaining <= 0.0 {
            return Some(event);
        }
    }
    Some(first)
}

/// Today's event, if any. A due chain follow-up always wins; otherwise an
/// ordinary event fires with the configured chance. Nothing fires on day one
/// or twice on the same day.
pub fn pick_daily_event<'a>(
    ctx: &'a EngineContext,
    state: &GameState,
    rng: &mut dyn RandomSource,
) -> Option<Cow<'a, EventDefinition>> {
    if state.game_ended || state.day <= 1 || state.last_event_day == state.day {
        return None;
    }

    if let Some(due) = due_consequences(state, &ctx.chains, &ctx.config)
        .into_iter()
        .next()
    {
        debug!(target: "ppl::selector", event = %due.id, day = state.day, "chain follow-up due");
        return Some(Cow::Owned(due));
    }

    if !rng.chance(ctx.config.event_chance) {
        debug!(target: "ppl::selector", day = state.day, "quiet day");
        return None;
    }

    let eligible = eligible_events(&ctx.catalog, state, &ctx.config);
    let picked = select_weighted(&eligible, ctx.config.default_weight, rng)?;
    debug!(
        target: "ppl::selector",
        event = %picked.id,
        eligible = eligible.len(),
        day = state.day,
        "event drawn"
    );
    Some(Cow::Borrowed(picked))
}
