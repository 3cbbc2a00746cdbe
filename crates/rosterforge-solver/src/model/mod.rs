//! Backend-neutral mixed-integer linear model.
//!
//! A [`MilpModel`] declares variables, linear constraints and a linear
//! objective to minimize. Backends implementing
//! [`MilpSolver`](crate::MilpSolver) consume it read-only.
//!
//! # Example
//!
//! ```
//! use rosterforge_solver::{LinearConstraint, LinearExpr, MilpModel};
//!
//! let mut model = MilpModel::new("pick-one");
//! let a = model.add_binary("a");
//! let b = model.add_binary("b");
//! model.add_constraint(LinearConstraint::le(LinearExpr::sum([a, b]), 1.0)).unwrap();
//! model.set_objective(LinearExpr::term(a, -2.0).with_term(b, -3.0)).unwrap();
//!
//! assert_eq!(model.variable_count(), 2);
//! assert_eq!(model.constraint_count(), 1);
//! ```

mod expr;

use crate::error::MilpError;

pub use expr::LinearExpr;

/// Handle of a declared variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VarId(usize);

impl VarId {
    #[inline]
    pub fn index(self) -> usize {
        self.0
    }
}

/// Domain of a variable.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum VarKind {
    /// Integer variable in `{0, 1}`.
    Binary,
    /// Real variable in `[lower, upper]`.
    Continuous { lower: f64, upper: f64 },
}

impl VarKind {
    pub fn lower(&self) -> f64 {
        match self {
            VarKind::Binary => 0.0,
            VarKind::Continuous { lower, .. } => *lower,
        }
    }

    pub fn upper(&self) -> f64 {
        match self {
            VarKind::Binary => 1.0,
            VarKind::Continuous { upper, .. } => *upper,
        }
    }

    pub fn is_binary(&self) -> bool {
        matches!(self, VarKind::Binary)
    }
}

/// A declared variable.
#[derive(Debug, Clone, PartialEq)]
pub struct Variable {
    name: String,
    kind: VarKind,
}

impl Variable {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> VarKind {
        self.kind
    }
}

/// Sense of a linear constraint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparison {
    LessEq,
    GreaterEq,
    Equal,
}

/// `expr (<=|>=|==) rhs`, with the expression constant folded into `rhs`.
#[derive(Debug, Clone, PartialEq)]
pub struct LinearConstraint {
    expr: LinearExpr,
    comparison: Comparison,
    rhs: f64,
}

impl LinearConstraint {
    pub fn new(lhs: impl Into<LinearExpr>, comparison: Comparison, rhs: f64) -> Self {
        let mut expr = lhs.into();
        let rhs = rhs - expr.constant();
        expr.set_constant(0.0);
        Self {
            expr,
            comparison,
            rhs,
        }
    }

    pub fn le(lhs: impl Into<LinearExpr>, rhs: f64) -> Self {
        Self::new(lhs, Comparison::LessEq, rhs)
    }

    pub fn ge(lhs: impl Into<LinearExpr>, rhs: f64) -> Self {
        Self::new(lhs, Comparison::GreaterEq, rhs)
    }

    pub fn equals(lhs: impl Into<LinearExpr>, rhs: f64) -> Self {
        Self::new(lhs, Comparison::Equal, rhs)
    }

    pub fn expr(&self) -> &LinearExpr {
        &self.expr
    }

    pub fn comparison(&self) -> Comparison {
        self.comparison
    }

    pub fn rhs(&self) -> f64 {
        self.rhs
    }

    /// Checks the constraint against a full assignment.
    pub fn is_satisfied(&self, values: &[f64], tolerance: f64) -> bool {
        let lhs = self.expr.evaluate(values);
        match self.comparison {
            Comparison::LessEq => lhs <= self.rhs + tolerance,
            Comparison::GreaterEq => lhs >= self.rhs - tolerance,
            Comparison::Equal => (lhs - self.rhs).abs() <= tolerance,
        }
    }
}

/// A minimization problem over binary and bounded continuous variables.
#[derive(Debug, Clone, Default)]
pub struct MilpModel {
    name: String,
    variables: Vec<Variable>,
    constraints: Vec<LinearConstraint>,
    objective: LinearExpr,
}

impl MilpModel {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Declares a `{0, 1}` variable.
    pub fn add_binary(&mut self, name: impl Into<String>) -> VarId {
        self.push_variable(name.into(), VarKind::Binary)
    }

    /// Declares a real variable in `[lower, upper]`.
    pub fn add_continuous(
        &mut self,
        name: impl Into<String>,
        lower: f64,
        upper: f64,
    ) -> Result<VarId, MilpError> {
        let name = name.into();
        if !lower.is_finite() || !upper.is_finite() {
            return Err(MilpError::NonFinite(format!("bounds of {name}")));
        }
        if lower > upper {
            return Err(MilpError::InvalidBounds { name, lower, upper });
        }
        Ok(self.push_variable(name, VarKind::Continuous { lower, upper }))
    }

    fn push_variable(&mut self, name: String, kind: VarKind) -> VarId {
        let id = VarId(self.variables.len());
        self.variables.push(Variable { name, kind });
        id
    }

    /// Adds a constraint after checking its variables and coefficients.
    pub fn add_constraint(&mut self, constraint: LinearConstraint) -> Result<(), MilpError> {
        self.check_expr(constraint.expr(), "constraint")?;
        if !constraint.rhs().is_finite() {
            return Err(MilpError::NonFinite("constraint right-hand side".to_string()));
        }
        self.constraints.push(constraint);
        Ok(())
    }

    /// Replaces the objective (minimized).
    pub fn set_objective(&mut self, objective: LinearExpr) -> Result<(), MilpError> {
        self.check_expr(&objective, "objective")?;
        if !objective.constant().is_finite() {
            return Err(MilpError::NonFinite("objective constant".to_string()));
        }
        self.objective = objective;
        Ok(())
    }

    fn check_expr(&self, expr: &LinearExpr, what: &str) -> Result<(), MilpError> {
        for &(var, coefficient) in expr.terms() {
            if var.index() >= self.variables.len() {
                return Err(MilpError::UnknownVariable(var));
            }
            if !coefficient.is_finite() {
                return Err(MilpError::NonFinite(format!(
                    "{what} coefficient of {}",
                    self.variables[var.index()].name
                )));
            }
        }
        Ok(())
    }

    pub fn variable(&self, id: VarId) -> Option<&Variable> {
        self.variables.get(id.index())
    }

    pub fn variables(&self) -> &[Variable] {
        &self.variables
    }

    pub fn constraints(&self) -> &[LinearConstraint] {
        &self.constraints
    }

    pub fn objective(&self) -> &LinearExpr {
        &self.objective
    }

    pub fn variable_count(&self) -> usize {
        self.variables.len()
    }

    pub fn constraint_count(&self) -> usize {
        self.constraints.len()
    }

    /// Returns true if `values` respects every domain and constraint.
    pub fn is_feasible(&self, values: &[f64], tolerance: f64) -> bool {
        if values.len() != self.variables.len() {
            return false;
        }
        let domains_ok = self.variables.iter().zip(values).all(|(var, &value)| {
            let in_bounds = value >= var.kind.lower() - tolerance
                && value <= var.kind.upper() + tolerance;
            let integral = !var.kind.is_binary() || (value - value.round()).abs() <= tolerance;
            in_bounds && integral
        });
        domains_ok
            && self
                .constraints
                .iter()
                .all(|constraint| constraint.is_satisfied(values, tolerance))
    }
}
