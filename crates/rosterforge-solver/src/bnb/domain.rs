//! Variable bounds with an undo trail.

use super::EPSILON;
use crate::model::MilpModel;

/// A single bound mutation, recorded so backtracking can restore it.
#[derive(Debug, Clone, Copy, PartialEq)]
struct TrailEntry {
    var: usize,
    old_lower: f64,
    old_upper: f64,
}

/// Current `[lower, upper]` of every variable.
///
/// Bounds only ever tighten between two calls to [`Domains::undo_to`];
/// every change is pushed on the trail first.
#[derive(Debug, Clone)]
pub(super) struct Domains {
    lower: Vec<f64>,
    upper: Vec<f64>,
    binary: Vec<bool>,
    trail: Vec<TrailEntry>,
}

impl Domains {
    pub(super) fn from_model(model: &MilpModel) -> Self {
        let variables = model.variables();
        Self {
            lower: variables.iter().map(|v| v.kind().lower()).collect(),
            upper: variables.iter().map(|v| v.kind().upper()).collect(),
            binary: variables.iter().map(|v| v.kind().is_binary()).collect(),
            trail: Vec::new(),
        }
    }

    #[inline]
    pub(super) fn len(&self) -> usize {
        self.lower.len()
    }

    #[inline]
    pub(super) fn lower(&self, var: usize) -> f64 {
        self.lower[var]
    }

    #[inline]
    pub(super) fn upper(&self, var: usize) -> f64 {
        self.upper[var]
    }

    #[inline]
    pub(super) fn is_binary(&self, var: usize) -> bool {
        self.binary[var]
    }

    #[inline]
    pub(super) fn is_fixed(&self, var: usize) -> bool {
        self.upper[var] - self.lower[var] <= EPSILON
    }

    #[inline]
    pub(super) fn trail_len(&self) -> usize {
        self.trail.len()
    }

    /// Replaces the bounds of `var`, recording the old ones.
    pub(super) fn set_bounds(&mut self, var: usize, lower: f64, upper: f64) {
        self.trail.push(TrailEntry {
            var,
            old_lower: self.lower[var],
            old_upper: self.upper[var],
        });
        self.lower[var] = lower;
        self.upper[var] = upper;
    }

    /// Restores every bound changed after the trail had length `mark`.
    pub(super) fn undo_to(&mut self, mark: usize) {
        while self.trail.len() > mark {
            if let Some(entry) = self.trail.pop() {
                self.lower[entry.var] = entry.old_lower;
                self.upper[entry.var] = entry.old_upper;
            }
        }
    }
}
