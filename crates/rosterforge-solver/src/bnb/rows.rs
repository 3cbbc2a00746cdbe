//! Compiled `<=` rows and activity-based bound propagation.

use std::collections::BTreeMap;

use super::domain::Domains;
use super::EPSILON;
use crate::error::MilpError;
use crate::model::{Comparison, MilpModel};

/// `sum(a_i * x_i) <= rhs` over variable indices.
#[derive(Debug, Clone)]
pub(super) struct Row {
    pub(super) terms: Vec<(usize, f64)>,
    pub(super) rhs: f64,
}

impl Row {
    /// Returns true for `sum x <= 1` over binaries with unit coefficients.
    pub(super) fn is_packing(&self, domains: &Domains) -> bool {
        self.terms.len() >= 2
            && (self.rhs - 1.0).abs() <= EPSILON
            && self
                .terms
                .iter()
                .all(|&(var, a)| domains.is_binary(var) && (a - 1.0).abs() <= EPSILON)
    }
}

/// All rows of a model plus the propagation queue.
#[derive(Debug, Clone)]
pub(super) struct RowSet {
    rows: Vec<Row>,
    rows_of_var: Vec<Vec<usize>>,
    queue: Vec<usize>,
    queued: Vec<bool>,
}

impl RowSet {
    /// Normalizes every constraint into `<=` rows.
    ///
    /// Rows may hold at most one continuous variable, which is what makes
    /// leaf values of continuous variables exact.
    pub(super) fn compile(model: &MilpModel, domains: &Domains) -> Result<Self, MilpError> {
        let mut rows = Vec::with_capacity(model.constraint_count());
        for (index, constraint) in model.constraints().iter().enumerate() {
            let mut merged: BTreeMap<usize, f64> = BTreeMap::new();
            for &(var, a) in constraint.expr().terms() {
                *merged.entry(var.index()).or_insert(0.0) += a;
            }
            let terms: Vec<(usize, f64)> = merged
                .into_iter()
                .filter(|&(_, a)| a.abs() > EPSILON)
                .collect();

            let continuous = terms
                .iter()
                .filter(|&&(var, _)| !domains.is_binary(var))
                .count();
            if continuous > 1 {
                return Err(MilpError::Unsupported(format!(
                    "constraint {index} holds {continuous} continuous variables; \
                     branch-and-bound supports at most one per constraint"
                )));
            }

            let negated = || Row {
                terms: terms.iter().map(|&(var, a)| (var, -a)).collect(),
                rhs: -constraint.rhs(),
            };
            match constraint.comparison() {
                Comparison::LessEq => rows.push(Row {
                    terms: terms.clone(),
                    rhs: constraint.rhs(),
                }),
                Comparison::GreaterEq => rows.push(negated()),
                Comparison::Equal => {
                    rows.push(Row {
                        terms: terms.clone(),
                        rhs: constraint.rhs(),
                    });
                    rows.push(negated());
                }
            }
        }

        let mut rows_of_var = vec![Vec::new(); domains.len()];
        for (r, row) in rows.iter().enumerate() {
            for &(var, _) in &row.terms {
                rows_of_var[var].push(r);
            }
        }

        let queued = vec![false; rows.len()];
        Ok(Self {
            rows,
            rows_of_var,
            queue: Vec::new(),
            queued,
        })
    }

    pub(super) fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub(super) fn len(&self) -> usize {
        self.rows.len()
    }

    pub(super) fn enqueue_all(&mut self) {
        for r in 0..self.rows.len() {
            if !self.queued[r] {
                self.queued[r] = true;
                self.queue.push(r);
            }
        }
    }

    pub(super) fn enqueue_var(&mut self, var: usize) {
        for &r in &self.rows_of_var[var] {
            if !self.queued[r] {
                self.queued[r] = true;
                self.queue.push(r);
            }
        }
    }

    fn clear_queue(&mut self) {
        for r in self.queue.drain(..) {
            self.queued[r] = false;
        }
    }

    /// Runs every queued row to a fixpoint.
    ///
    /// Returns false as soon as a row cannot be satisfied within the current
    /// bounds; the queue is empty afterwards either way.
    pub(super) fn propagate(&mut self, domains: &mut Domains) -> bool {
        while let Some(r) = self.queue.pop() {
            self.queued[r] = false;
            if !self.propagate_row(r, domains) {
                self.clear_queue();
                return false;
            }
        }
        true
    }

    fn propagate_row(&mut self, r: usize, domains: &mut Domains) -> bool {
        let Self {
            rows,
            rows_of_var,
            queue,
            queued,
        } = self;
        let row = &rows[r];

        let min_activity: f64 = row
            .terms
            .iter()
            .map(|&(var, a)| min_contribution(domains, var, a))
            .sum();
        if min_activity > row.rhs + EPSILON {
            return false;
        }

        for &(var, a) in &row.terms {
            let residual = row.rhs - (min_activity - min_contribution(domains, var, a));
            let (lower, upper) = (domains.lower(var), domains.upper(var));

            let tightened = if a > 0.0 {
                let mut bound = residual / a;
                if domains.is_binary(var) {
                    bound = (bound + EPSILON).floor();
                }
                if bound >= upper - EPSILON {
                    continue;
                }
                if bound < lower - EPSILON {
                    return false;
                }
                (lower, bound.max(lower))
            } else {
                let mut bound = residual / a;
                if domains.is_binary(var) {
                    bound = (bound - EPSILON).ceil();
                }
                if bound <= lower + EPSILON {
                    continue;
                }
                if bound > upper + EPSILON {
                    return false;
                }
                (bound.min(upper), upper)
            };

            domains.set_bounds(var, tightened.0, tightened.1);
            for &other in &rows_of_var[var] {
                if other != r && !queued[other] {
                    queued[other] = true;
                    queue.push(other);
                }
            }
        }
        true
    }
}

#[inline]
fn min_contribution(domains: &Domains, var: usize, a: f64) -> f64 {
    if a > 0.0 {
        a * domains.lower(var)
    } else {
        a * domains.upper(var)
    }
}
