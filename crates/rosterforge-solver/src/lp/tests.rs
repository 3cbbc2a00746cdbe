//! Tests for the `microlp` backend.

use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use std::time::Duration;

use super::*;
use crate::bnb::BranchAndBoundSolver;
use crate::model::{LinearConstraint, LinearExpr, VarId};
use crate::outcome::SolveStatus;

fn solve(model: &MilpModel) -> MilpOutcome {
    MicroLpSolver::new()
        .solve(model, &SolveLimits::new(Duration::from_secs(30)))
        .unwrap()
}

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-6
}

#[test]
fn test_empty_model_is_optimal() {
    let mut model = MilpModel::new("empty");
    model
        .set_objective(LinearExpr::constant_expr(4.0))
        .unwrap();

    let outcome = solve(&model);
    assert_eq!(outcome.status(), SolveStatus::Optimal);
    assert_eq!(outcome.solution().unwrap().objective(), 4.0);
}

#[test]
fn test_knapsack() {
    // max 6a + 5b + 4c  s.t.  3a + 2b + 2c <= 4
    let mut model = MilpModel::new("knapsack");
    let a = model.add_binary("a");
    let b = model.add_binary("b");
    let c = model.add_binary("c");
    model
        .add_constraint(LinearConstraint::le(
            LinearExpr::new().with_term(a, 3.0).with_term(b, 2.0).with_term(c, 2.0),
            4.0,
        ))
        .unwrap();
    model
        .set_objective(LinearExpr::new().with_term(a, -6.0).with_term(b, -5.0).with_term(c, -4.0))
        .unwrap();

    let outcome = solve(&model);
    let solution = outcome.solution().unwrap();
    assert_eq!(outcome.status(), SolveStatus::Optimal);
    assert!(close(solution.objective(), -9.0));
    assert!(!solution.is_set(a));
    assert!(solution.is_set(b));
    assert!(solution.is_set(c));
}

#[test]
fn test_binaries_come_back_exact() {
    let mut model = MilpModel::new("exact");
    let a = model.add_binary("a");
    let b = model.add_binary("b");
    model
        .add_constraint(LinearConstraint::equals(LinearExpr::sum([a, b]), 1.0))
        .unwrap();
    model
        .set_objective(LinearExpr::new().with_term(a, 1.0).with_term(b, 2.0))
        .unwrap();

    let outcome = solve(&model);
    assert_eq!(outcome.solution().unwrap().values(), &[1.0, 0.0]);
}

#[test]
fn test_infeasible() {
    let mut model = MilpModel::new("infeasible");
    let a = model.add_binary("a");
    let b = model.add_binary("b");
    model
        .add_constraint(LinearConstraint::ge(LinearExpr::sum([a, b]), 2.0))
        .unwrap();
    model
        .add_constraint(LinearConstraint::le(LinearExpr::sum([a, b]), 1.0))
        .unwrap();

    let outcome = solve(&model);
    assert_eq!(outcome.status(), SolveStatus::Infeasible);
    assert!(outcome.solution().is_none());
}

#[test]
fn test_integrality_is_enforced() {
    // The relaxation would take a = b = 0.5.
    let mut model = MilpModel::new("fractional");
    let a = model.add_binary("a");
    let b = model.add_binary("b");
    model
        .add_constraint(LinearConstraint::equals(
            LinearExpr::new().with_term(a, 2.0).with_term(b, 2.0),
            1.0,
        ))
        .unwrap();

    let outcome = solve(&model);
    assert_eq!(outcome.status(), SolveStatus::Infeasible);
}

#[test]
fn test_continuous_usage_indicator() {
    // u >= (a + b) / 3, u <= a + b; reward a and b, charge u.
    let mut model = MilpModel::new("indicator");
    let a = model.add_binary("a");
    let b = model.add_binary("b");
    let u = model.add_continuous("u", 0.0, 1.0).unwrap();
    model
        .add_constraint(LinearConstraint::ge(
            LinearExpr::from(u) - LinearExpr::sum([a, b]).scaled(1.0 / 3.0),
            0.0,
        ))
        .unwrap();
    model
        .add_constraint(LinearConstraint::le(
            LinearExpr::from(u) - LinearExpr::sum([a, b]),
            0.0,
        ))
        .unwrap();
    model
        .set_objective(LinearExpr::new().with_term(a, -1.0).with_term(b, -1.0).with_term(u, 1.0))
        .unwrap();

    let outcome = solve(&model);
    let solution = outcome.solution().unwrap();
    assert_eq!(outcome.status(), SolveStatus::Optimal);
    assert!(solution.is_set(a));
    assert!(solution.is_set(b));
    assert!(close(solution.value(u), 2.0 / 3.0));
    assert!(close(solution.objective(), -4.0 / 3.0));
}

#[test]
fn test_rows_with_two_continuous_variables_are_supported() {
    let mut model = MilpModel::new("coupled");
    let u = model.add_continuous("u", 0.0, 1.0).unwrap();
    let w = model.add_continuous("w", 0.0, 1.0).unwrap();
    model
        .add_constraint(LinearConstraint::le(LinearExpr::sum([u, w]), 1.0))
        .unwrap();
    model
        .set_objective(LinearExpr::new().with_term(u, -2.0).with_term(w, -1.0))
        .unwrap();

    let outcome = solve(&model);
    assert_eq!(outcome.status(), SolveStatus::Optimal);
    assert!(close(outcome.solution().unwrap().objective(), -2.0));
}

#[test]
fn test_node_limit_of_one_aborts_before_solving() {
    let mut model = MilpModel::new("limited");
    model.add_binary("x");
    let limits = SolveLimits::new(Duration::from_secs(30)).with_node_limit(1);

    let outcome = MicroLpSolver::new().solve(&model, &limits).unwrap();
    assert_eq!(outcome.status(), SolveStatus::Unknown);
}

#[test]
fn test_external_flag_aborts() {
    let mut model = MilpModel::new("flagged");
    model.add_binary("x");
    let flag = Arc::new(AtomicBool::new(true));
    let limits = SolveLimits::default().with_terminate(flag);

    let mut solver = MicroLpSolver::new();
    let outcome = solver.solve(&model, &limits).unwrap();
    assert_eq!(outcome.status(), SolveStatus::Unknown);
    assert!(outcome.solution().is_none());
    assert_eq!(solver.last_statistics().unwrap().incumbents, 0);
}

#[test]
fn test_statistics_recorded() {
    let mut model = MilpModel::new("stats");
    let a = model.add_binary("a");
    let b = model.add_binary("b");
    model
        .add_constraint(LinearConstraint::le(LinearExpr::sum([a, b]), 1.0))
        .unwrap();
    model
        .set_objective(LinearExpr::new().with_term(a, -1.0).with_term(b, -2.0))
        .unwrap();

    let mut solver = MicroLpSolver::new();
    let outcome = solver.solve(&model, &SolveLimits::default()).unwrap();
    let stats = solver.last_statistics().unwrap();
    assert!(close(outcome.solution().unwrap().objective(), -2.0));
    assert_eq!(stats.nodes, 1);
    assert_eq!(stats.incumbents, 1);
    assert_eq!(stats, outcome.statistics());
}

/// Deterministic pseudo-random coefficients in `[-5, 5]`.
fn coefficients(seed: u64, count: usize) -> Vec<f64> {
    let mut state = seed;
    (0..count)
        .map(|_| {
            state = state.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
            ((state >> 33) % 11) as f64 - 5.0
        })
        .collect()
}

#[test]
fn test_agrees_with_propagation_backend() {
    let n = 8;
    for seed in 1..=8u64 {
        let mut model = MilpModel::new(format!("random-{seed}"));
        let vars: Vec<VarId> = (0..n).map(|i| model.add_binary(format!("x{i}"))).collect();

        let mut objective = LinearExpr::new();
        for (&v, &c) in vars.iter().zip(&coefficients(seed, n)) {
            objective.add_term(v, c);
        }
        model.set_objective(objective).unwrap();
        for k in 0..3u64 {
            let mut expr = LinearExpr::new();
            for (&v, &w) in vars.iter().zip(&coefficients(seed * 31 + k, n)) {
                expr.add_term(v, w);
            }
            model.add_constraint(LinearConstraint::le(expr, 2.0)).unwrap();
        }

        let limits = SolveLimits::new(Duration::from_secs(30));
        let lp = MicroLpSolver::new().solve(&model, &limits).unwrap();
        let exact = BranchAndBoundSolver::new().solve(&model, &limits).unwrap();
        assert_eq!(lp.status(), exact.status(), "seed {seed}");
        if let (Some(a), Some(b)) = (lp.solution(), exact.solution()) {
            assert!(close(a.objective(), b.objective()), "seed {seed}");
        }
    }
}

#[test]
fn test_large_assignment_is_proven_quickly() {
    // 20 workers x 20 tasks, each task exactly once, each worker at most once.
    let n = 20;
    let mut model = MilpModel::new("assignment-20");
    let x: Vec<Vec<VarId>> = (0..n)
        .map(|w| (0..n).map(|t| model.add_binary(format!("x{w}_{t}"))).collect())
        .collect();
    for t in 0..n {
        model
            .add_constraint(LinearConstraint::equals(
                LinearExpr::sum((0..n).map(|w| x[w][t])),
                1.0,
            ))
            .unwrap();
    }
    for row in &x {
        model
            .add_constraint(LinearConstraint::le(LinearExpr::sum(row.iter().copied()), 1.0))
            .unwrap();
    }
    let mut objective = LinearExpr::new();
    for w in 0..n {
        for t in 0..n {
            // Diagonal costs 1, everything else 2.
            objective.add_term(x[w][t], if w == t { 1.0 } else { 2.0 });
        }
    }
    model.set_objective(objective).unwrap();

    let outcome = MicroLpSolver::new()
        .solve(&model, &SolveLimits::new(Duration::from_secs(20)))
        .unwrap();
    assert_eq!(outcome.status(), SolveStatus::Optimal);
    assert!(close(outcome.solution().unwrap().objective(), n as f64));
}
