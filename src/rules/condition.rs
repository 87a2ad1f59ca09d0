//! Precondition clauses attached to catalog events.
//!
//! A clause is either a comparison, `<lhs> <op> <rhs>`, or a flag such as
//! `milestone.first_solo` / `!chain.ppl_coin`. All clauses of an event must
//! hold for it to be eligible.

use thiserror::Error;

use crate::simulation::state::{GameState, Milestone, Stat, TrainingPhase};
use crate::simulation::weather::WeatherKind;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConditionError {
    #[error("unknown metric `{0}`")]
    UnknownMetric(String),
    #[error("unknown operator `{0}`")]
    UnknownOperator(String),
    #[error("`{0}` is not a number")]
    InvalidNumber(String),
    #[error("unknown value `{value}` for `{metric}`")]
    UnknownValue { metric: String, value: String },
    #[error("malformed clause `{0}`")]
    Malformed(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Op {
    Gt,
    Ge,
    Lt,
    Le,
    Eq,
    Ne,
}

impl Op {
    fn parse(raw: &str) -> Result<Self, ConditionError> {
        match raw {
            ">" => Ok(Op::Gt),
            ">=" => Ok(Op::Ge),
            "<" => Ok(Op::Lt),
            "<=" => Ok(Op::Le),
            "==" => Ok(Op::Eq),
            "!=" => Ok(Op::Ne),
            _ => Err(ConditionError::UnknownOperator(raw.to_string())),
        }
    }

    fn compare(self, left: f64, right: f64) -> bool {
        match self {
            Op::Gt => left > right,
            Op::Ge => left >= right,
            Op::Lt => left < right,
            Op::Le => left <= right,
            Op::Eq => (left - right).abs() < f64::EPSILON,
            Op::Ne => (left - right).abs() >= f64::EPSILON,
        }
    }

    fn equality(self, equal: bool, raw: &str) -> Result<bool, ConditionError> {
        match self {
            Op::Eq => Ok(equal),
            Op::Ne => Ok(!equal),
            _ => Err(ConditionError::UnknownOperator(raw.to_string())),
        }
    }
}

/// Evaluate every clause; the first false or failing clause stops evaluation.
pub fn evaluate_all<S: AsRef<str>>(clauses: &[S], state: &GameState) -> Result<bool, ConditionError> {
    for clause in clauses {
        if !evaluate(clause.as_ref(), state)? {
            return Ok(false);
        }
    }
    Ok(true)
}

pub fn evaluate(clause: &str, state: &GameState) -> Result<bool, ConditionError> {
    let clause = clause.trim();
    if clause.is_empty() {
        return Ok(true);
    }

    let parts: Vec<&str> = clause.split_whitespace().collect();
    match parts.as_slice() {
        [flag] => evaluate_flag(flag, state),
        [left, op, right] => evaluate_comparison(left, op, right, state),
        _ => Err(ConditionError::Malformed(clause.to_string())),
    }
}

fn evaluate_flag(flag: &str, state: &GameState) -> Result<bool, ConditionError> {
    if let Some(inner) = flag.strip_prefix('!') {
        return evaluate_flag(inner, state).map(|value| !value);
    }

    let Some((scope, key)) = flag.split_once('.') else {
        return Err(ConditionError::Malformed(flag.to_string()));
    };

    match scope {
        "milestone" => key
            .parse::<Milestone>()
            .map(|milestone| state.milestones.is_set(milestone))
            .map_err(|_| ConditionError::UnknownMetric(flag.to_string())),
        "chain" => Ok(state.is_chain_active(key)),
        "decision" => Ok(state.has_decision(key)),
        _ => Err(ConditionError::UnknownMetric(flag.to_string())),
    }
}

fn evaluate_comparison(
    left: &str,
    op_raw: &str,
    right: &str,
    state: &GameState,
) -> Result<bool, ConditionError> {
    let op = Op::parse(op_raw)?;

    match left {
        // `fly` matches every flight action.
        "last_action" => {
            let matched = state
                .last_action
                .map(|action| action.as_str() == right || (right == "fly" && action.is_flight()))
                .unwrap_or(false);
            op.equality(matched, op_raw)
        }
        "phase" => {
            let expected = right
                .parse::<TrainingPhase>()
                .map_err(|value| ConditionError::UnknownValue {
                    metric: left.to_string(),
                    value,
                })?;
            op.equality(state.phase == expected, op_raw)
        }
        "weather" => {
            let expected = right
                .parse::<WeatherKind>()
                .map_err(|value| ConditionError::UnknownValue {
                    metric: left.to_string(),
                    value,
                })?;
            op.equality(WeatherKind::for_day(state.day) == expected, op_raw)
        }
        _ if left.starts_with("chain_phase.") => {
            let chain = &left["chain_phase.".len()..];
            let current = state
                .active_chains
                .get(chain)
                .map(|active| active.phase.as_str());
            op.equality(current == Some(right), op_raw)
        }
        _ => {
            let right_value = right
                .parse::<f64>()
                .map_err(|_| ConditionError::InvalidNumber(right.to_string()))?;
            match numeric_metric(left, state)? {
                Some(left_value) => Ok(op.compare(left_value, right_value)),
                None => Ok(false),
            }
        }
    }
}

/// `Ok(None)` means the metric is well-formed but has no value yet, for
/// instance days since a decision that was never made.
fn numeric_metric(key: &str, state: &GameState) -> Result<Option<f64>, ConditionError> {
    if key == "day" {
        return Ok(Some(state.day as f64));
    }

    let Some((scope, name)) = key.split_once('.') else {
        return Err(ConditionError::UnknownMetric(key.to_string()));
    };

    match scope {
        "stats" => name
            .parse::<Stat>()
            .map(|stat| Some(state.stats.get(stat)))
            .map_err(|_| ConditionError::UnknownMetric(key.to_string())),
        "reputation" => Ok(Some(state.reputation_of(name) as f64)),
        "occurrences" => Ok(Some(state.occurrences(name) as f64)),
        "days_since" => Ok(state.days_since_decision(name).map(f64::from)),
        "chain_age" => Ok(state
            .active_chains
            .get(name)
            .map(|chain| chain.age(state.day) as f64)),
        _ => Err(ConditionError::UnknownMetric(key.to_string())),
    }
}
