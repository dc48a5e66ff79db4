//! Rule engine for multi-criteria dispatching.
//!
//! Composes dispatching rules sequentially (primary rule, then
//! tie-breakers) with a final deterministic tie-breaking strategy.
//!
//! # Reference
//! Haupt (1989), "A Survey of Priority Rule-Based Scheduling"

use std::cmp::Ordering;
use std::sync::Arc;

use chrono::{DateTime, Utc};

use super::{rules, DispatchingRule, RuleScore, SchedulingContext};
use crate::models::{Train, TrainId};

/// How ties are broken after all rules are exhausted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TieBreaker {
    /// Keep the input order (stable sort).
    #[default]
    InputOrder,
    /// Ascending train ID.
    ById,
}

/// A composable rule engine for train prioritization.
///
/// Rules are applied in sequence; a later rule is consulted only when
/// every earlier rule scores two trains within `epsilon` of each other.
///
/// # Example
/// ```
/// use section_sched::dispatching::{RuleEngine, TieBreaker};
/// use section_sched::dispatching::rules;
///
/// let engine = RuleEngine::new()
///     .with_rule(rules::PriorityScore)
///     .with_tie_breaker(rules::EarliestDeparture)
///     .with_final_tie_breaker(TieBreaker::ById);
/// ```
#[derive(Clone)]
pub struct RuleEngine {
    rules: Vec<Arc<dyn DispatchingRule>>,
    tie_breaker: TieBreaker,
    epsilon: f64,
}

impl RuleEngine {
    /// Creates an empty rule engine.
    pub fn new() -> Self {
        Self {
            rules: Vec::new(),
            tie_breaker: TieBreaker::InputOrder,
            epsilon: 1e-9,
        }
    }

    /// The precedence ranking: priority score descending, then earliest
    /// departure, then train ID.
    pub fn precedence() -> Self {
        Self::new()
            .with_rule(rules::PriorityScore)
            .with_tie_breaker(rules::EarliestDeparture)
            .with_final_tie_breaker(TieBreaker::ById)
    }

    /// Smith's ratio ranking: highest tier weight per travel minute first,
    /// then earliest departure, then train ID.
    ///
    /// Minimizes weighted completion time when all trains are released
    /// together. Needs travel times in the context.
    pub fn weighted_completion() -> Self {
        Self::new()
            .with_rule(rules::Wspt)
            .with_tie_breaker(rules::EarliestDeparture)
            .with_final_tie_breaker(TieBreaker::ById)
    }

    /// Adds a primary rule.
    pub fn with_rule<R: DispatchingRule + 'static>(mut self, rule: R) -> Self {
        self.rules.push(Arc::new(rule));
        self
    }

    /// Adds a tie-breaking rule, consulted after every rule added before it.
    pub fn with_tie_breaker<R: DispatchingRule + 'static>(self, rule: R) -> Self {
        self.with_rule(rule)
    }

    /// Sets the final tie-breaking strategy.
    pub fn with_final_tie_breaker(mut self, tie_breaker: TieBreaker) -> Self {
        self.tie_breaker = tie_breaker;
        self
    }

    /// Number of rules.
    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }

    /// Sorts trains by priority (highest priority first).
    ///
    /// Returns indices into the original train slice.
    pub fn sort_indices(&self, trains: &[Train], context: &SchedulingContext) -> Vec<usize> {
        if trains.is_empty() {
            return Vec::new();
        }

        // Scores computed once; the comparator only reads them.
        let scores: Vec<Vec<RuleScore>> = trains.iter().map(|t| self.evaluate(t, context)).collect();

        let mut indices: Vec<usize> = (0..trains.len()).collect();
        indices.sort_by(|&a, &b| self.compare(&trains[a], &scores[a], &trains[b], &scores[b]));
        indices
    }

    /// Sorts trains by priority and returns their IDs.
    pub fn sort_ids(&self, trains: &[Train], context: &SchedulingContext) -> Vec<TrainId> {
        self.sort_indices(trains, context)
            .into_iter()
            .map(|i| trains[i].id)
            .collect()
    }

    /// Evaluates a single train and returns scores from each rule.
    pub fn evaluate(&self, train: &Train, context: &SchedulingContext) -> Vec<RuleScore> {
        self.rules
            .iter()
            .map(|rule| rule.evaluate(train, context))
            .collect()
    }

    fn compare(&self, a: &Train, sa: &[RuleScore], b: &Train, sb: &[RuleScore]) -> Ordering {
        for (score_a, score_b) in sa.iter().zip(sb) {
            if (score_a - score_b).abs() > self.epsilon {
                return score_a.partial_cmp(score_b).unwrap_or(Ordering::Equal);
            }
        }

        match self.tie_breaker {
            TieBreaker::InputOrder => Ordering::Equal,
            TieBreaker::ById => a.id.cmp(&b.id),
        }
    }
}

impl Default for RuleEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for RuleEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RuleEngine")
            .field(
                "rules",
                &self.rules.iter().map(|r| r.name()).collect::<Vec<_>>(),
            )
            .field("tie_breaker", &self.tie_breaker)
            .finish()
    }
}

/// Orders trains for section entry: descending priority score, ties by
/// ascending departure (absent departures count as `reference_time`),
/// then by train ID.
pub fn precedence_order(trains: &[Train], reference_time: DateTime<Utc>) -> Vec<TrainId> {
    let context = SchedulingContext::at_time(reference_time);
    RuleEngine::precedence().sort_ids(trains, &context)
}
