//! Disjunctive conflict model for one section.
//!
//! Solver-independent formulation of the single-machine problem
//! `1 | r_j | Σ w_j C_j` with a sequence-independent gap:
//!
//! ```text
//! minimize   Σ w_i (s_i + p_i)
//! subject to s_i ≥ r_i                                        ∀ i
//!            s_j ≥ s_i + p_i + h − M (1 − y_ij)               ∀ i < j
//!            s_i ≥ s_j + p_j + h − M y_ij                     ∀ i < j
//!            y_ij ∈ {0, 1}
//! ```
//!
//! `y_ij = 1` means train `i` exits (plus headway) before `j` enters.
//! All times are minutes from the request start time.
//!
//! # Reference
//! Balas (1985), "On the facial structure of scheduling polyhedra"

use crate::models::TrainId;
use crate::scheduler::TrainPlan;

/// Slack added to the big-M constant (minutes).
const BIG_M_SLACK: f64 = 60.0;

/// A violated constraint of the conflict model.
#[derive(Debug, Clone, PartialEq)]
pub enum ModelViolation {
    /// A train starts before its release time.
    Release { train_id: TrainId, start: f64, release: f64 },
    /// Two occupations are closer than the headway.
    Overlap { first: TrainId, second: TrainId, gap: f64 },
}

/// Conflict model: release times, travel times, weights, and headway.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConflictModel {
    /// Train per index.
    pub train_ids: Vec<TrainId>,
    /// Release time `r_i` (minutes).
    pub release: Vec<f64>,
    /// Travel time `p_i` (minutes).
    pub travel: Vec<f64>,
    /// Objective weight `w_i`.
    pub weight: Vec<f64>,
    /// Headway `h` (minutes).
    pub headway: f64,
}

impl ConflictModel {
    /// Creates an empty model with the given headway.
    pub fn new(headway: f64) -> Self {
        Self {
            headway,
            ..Default::default()
        }
    }

    /// Adds a train.
    pub fn with_train(mut self, train_id: TrainId, release: f64, travel: f64, weight: f64) -> Self {
        self.train_ids.push(train_id);
        self.release.push(release);
        self.travel.push(travel);
        self.weight.push(weight);
        self
    }

    pub(crate) fn from_plans(plans: &[TrainPlan], headway: f64) -> Self {
        plans.iter().fold(Self::new(headway), |model, p| {
            model.with_train(p.train_id, p.release_minutes, p.travel_minutes, p.weight)
        })
    }

    /// Number of trains.
    pub fn len(&self) -> usize {
        self.train_ids.len()
    }

    /// Whether the model has no trains.
    pub fn is_empty(&self) -> bool {
        self.train_ids.is_empty()
    }

    /// Unordered index pairs `(i, j)` with `i < j`, one per ordering variable.
    pub fn pairs(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        let n = self.len();
        (0..n).flat_map(move |i| ((i + 1)..n).map(move |j| (i, j)))
    }

    /// Number of disjunctive pairs.
    pub fn pair_count(&self) -> usize {
        let n = self.len();
        n * n.saturating_sub(1) / 2
    }

    /// Latest start any non-idling permutation needs:
    /// `max r + Σ (p + h)`.
    pub fn horizon(&self) -> f64 {
        let max_release = self.release.iter().copied().fold(0.0, f64::max);
        let work: f64 = self.travel.iter().map(|p| p + self.headway).sum();
        max_release + work
    }

    /// Big-M constant deactivating the unchosen disjunct.
    ///
    /// At least `Σ r + Σ p + h` plus slack, and large enough to cover any
    /// start within the horizon: `Σ r + Σ p + (n + 1) h + max p + slack`.
    pub fn big_m(&self) -> f64 {
        let releases: f64 = self.release.iter().sum();
        let travel: f64 = self.travel.iter().sum();
        let max_travel = self.travel.iter().copied().fold(0.0, f64::max);
        releases + travel + (self.len() as f64 + 1.0) * self.headway + max_travel + BIG_M_SLACK
    }

    /// Objective `Σ w_i (s_i + p_i)` for the given starts.
    pub fn objective(&self, starts: &[f64]) -> f64 {
        starts
            .iter()
            .zip(&self.travel)
            .zip(&self.weight)
            .map(|((s, p), w)| w * (s + p))
            .sum()
    }

    /// Starts obtained by dispatching trains in `order` (indices), each
    /// at the later of its release and the previous exit plus headway.
    ///
    /// Always feasible for the model.
    pub fn sequence_starts(&self, order: &[usize]) -> Vec<f64> {
        let mut starts = self.release.clone();
        let mut free_at: Option<f64> = None;
        for &i in order {
            let start = match free_at {
                Some(t) => self.release[i].max(t + self.headway),
                None => self.release[i],
            };
            starts[i] = start;
            free_at = Some(start + self.travel[i]);
        }
        starts
    }

    /// Constraint violations of `starts`, with tolerance `tol` (minutes).
    pub fn violations(&self, starts: &[f64], tol: f64) -> Vec<ModelViolation> {
        let mut out = Vec::new();

        for (i, &s) in starts.iter().enumerate() {
            if s + tol < self.release[i] {
                out.push(ModelViolation::Release {
                    train_id: self.train_ids[i],
                    start: s,
                    release: self.release[i],
                });
            }
        }

        for (i, j) in self.pairs() {
            let (first, second) = if starts[i] <= starts[j] { (i, j) } else { (j, i) };
            let gap = starts[second] - (starts[first] + self.travel[first]);
            if gap + tol < self.headway {
                out.push(ModelViolation::Overlap {
                    first: self.train_ids[first],
                    second: self.train_ids[second],
                    gap,
                });
            }
        }

        out
    }

    /// Whether `starts` satisfies every constraint within `tol`.
    pub fn is_feasible(&self, starts: &[f64], tol: f64) -> bool {
        self.violations(starts, tol).is_empty()
    }
}
