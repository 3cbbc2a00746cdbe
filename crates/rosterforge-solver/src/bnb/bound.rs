//! Optimistic objective bounds over the current domains.

use super::domain::Domains;
use super::rows::RowSet;
use super::EPSILON;
use crate::model::MilpModel;

/// Binaries with negative cost sharing one `sum x <= 1` row.
///
/// At most one member can be set, so the group is worth its single best
/// cost rather than the sum of all of them.
#[derive(Debug, Clone)]
struct PackingGroup {
    members: Vec<usize>,
}

/// Computes a lower bound on the objective of any completion.
#[derive(Debug, Clone)]
pub(super) struct ObjectiveBound {
    constant: f64,
    cost: Vec<f64>,
    priced: Vec<usize>,
    partitions: Vec<Vec<PackingGroup>>,
    integral: bool,
}

impl ObjectiveBound {
    pub(super) fn new(model: &MilpModel, domains: &Domains, rows: &RowSet) -> Self {
        let mut cost = vec![0.0; domains.len()];
        for &(var, c) in model.objective().terms() {
            cost[var.index()] += c;
        }
        let priced: Vec<usize> = (0..cost.len()).filter(|&v| cost[v].abs() > EPSILON).collect();

        let constant = model.objective().constant();
        let integral = is_integral(constant)
            && priced
                .iter()
                .all(|&v| domains.is_binary(v) && is_integral(cost[v]));

        let mut partitions = Vec::new();
        for prefer_large in [true, false] {
            let groups = packing_partition(&cost, domains, rows, prefer_large);
            if !groups.is_empty() && !partitions.iter().any(|p: &Vec<PackingGroup>| same(p, &groups)) {
                partitions.push(groups);
            }
        }

        Self {
            constant,
            cost,
            priced,
            partitions,
            integral,
        }
    }

    pub(super) fn cost(&self, var: usize) -> f64 {
        self.cost[var]
    }

    pub(super) fn is_integral(&self) -> bool {
        self.integral
    }

    /// Best objective any completion of `domains` could reach.
    pub(super) fn bound(&self, domains: &Domains) -> f64 {
        let separate: f64 = self.constant
            + self
                .priced
                .iter()
                .map(|&v| optimistic(self.cost[v], domains, v))
                .sum::<f64>();

        let mut best = separate;
        for groups in &self.partitions {
            let mut value = separate;
            for group in groups {
                let apart: f64 = group
                    .members
                    .iter()
                    .map(|&v| optimistic(self.cost[v], domains, v))
                    .sum();
                value += self.group_value(group, domains) - apart;
            }
            best = best.max(value);
        }
        best
    }

    fn group_value(&self, group: &PackingGroup, domains: &Domains) -> f64 {
        if group.members.iter().any(|&v| domains.lower(v) >= 1.0 - EPSILON) {
            return group
                .members
                .iter()
                .map(|&v| self.cost[v] * domains.lower(v))
                .sum();
        }
        group
            .members
            .iter()
            .filter(|&&v| domains.upper(v) >= 1.0 - EPSILON)
            .map(|&v| self.cost[v])
            .fold(0.0, f64::min)
    }

    /// Returns true if no completion with `bound` can improve on `incumbent`.
    pub(super) fn cannot_improve(&self, bound: f64, incumbent: f64) -> bool {
        if self.integral {
            bound > incumbent - 1.0 + 1e-6
        } else {
            bound >= incumbent - 1e-9
        }
    }
}

#[inline]
fn optimistic(cost: f64, domains: &Domains, var: usize) -> f64 {
    if cost > 0.0 {
        cost * domains.lower(var)
    } else {
        cost * domains.upper(var)
    }
}

fn is_integral(value: f64) -> bool {
    (value - value.round()).abs() <= EPSILON
}

fn same(a: &[PackingGroup], b: &[PackingGroup]) -> bool {
    a.len() == b.len() && a.iter().zip(b).all(|(x, y)| x.members == y.members)
}

/// Assigns each negative-cost binary to at most one packing row.
///
/// With `prefer_large` each variable joins the row holding the most
/// negative-cost binaries, otherwise the fewest (but at least two).
fn packing_partition(
    cost: &[f64],
    domains: &Domains,
    rows: &RowSet,
    prefer_large: bool,
) -> Vec<PackingGroup> {
    let rewarded = |v: usize| domains.is_binary(v) && cost[v] < -EPSILON;

    let mut weight = vec![0usize; rows.len()];
    let mut rows_of_var: Vec<Vec<usize>> = vec![Vec::new(); domains.len()];
    for (r, row) in rows.rows().iter().enumerate() {
        if !row.is_packing(domains) {
            continue;
        }
        for &(v, _) in &row.terms {
            if rewarded(v) {
                weight[r] += 1;
                rows_of_var[v].push(r);
            }
        }
    }

    let mut members: Vec<Vec<usize>> = vec![Vec::new(); rows.len()];
    for (v, candidates) in rows_of_var.iter().enumerate() {
        let chosen = candidates
            .iter()
            .copied()
            .filter(|&r| weight[r] >= 2)
            .min_by_key(|&r| {
                if prefer_large {
                    (usize::MAX - weight[r], r)
                } else {
                    (weight[r], r)
                }
            });
        if let Some(r) = chosen {
            members[r].push(v);
        }
    }

    members
        .into_iter()
        .filter(|m| m.len() >= 2)
        .map(|members| PackingGroup { members })
        .collect()
}
