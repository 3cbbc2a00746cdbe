//! Sparse linear expressions.

use std::ops::{Add, AddAssign, Mul, Neg, Sub};

use smallvec::SmallVec;

use super::VarId;

/// `sum(coefficient * variable) + constant`.
///
/// Terms are kept in insertion order; a variable may appear more than once
/// and backends sum its coefficients.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LinearExpr {
    terms: SmallVec<[(VarId, f64); 4]>,
    constant: f64,
}

impl LinearExpr {
    pub fn new() -> Self {
        Self::default()
    }

    /// A constant expression.
    pub fn constant_expr(constant: f64) -> Self {
        Self {
            terms: SmallVec::new(),
            constant,
        }
    }

    /// A single `coefficient * var` term.
    pub fn term(var: VarId, coefficient: f64) -> Self {
        let mut expr = Self::new();
        expr.add_term(var, coefficient);
        expr
    }

    /// The unit-coefficient sum of `vars`.
    pub fn sum<I>(vars: I) -> Self
    where
        I: IntoIterator<Item = VarId>,
    {
        let mut expr = Self::new();
        for var in vars {
            expr.add_term(var, 1.0);
        }
        expr
    }

    pub fn with_term(mut self, var: VarId, coefficient: f64) -> Self {
        self.add_term(var, coefficient);
        self
    }

    pub fn add_term(&mut self, var: VarId, coefficient: f64) {
        self.terms.push((var, coefficient));
    }

    pub fn add_constant(&mut self, constant: f64) {
        self.constant += constant;
    }

    pub fn terms(&self) -> &[(VarId, f64)] {
        &self.terms
    }

    pub fn constant(&self) -> f64 {
        self.constant
    }

    pub(crate) fn set_constant(&mut self, constant: f64) {
        self.constant = constant;
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Multiplies every coefficient and the constant by `factor`.
    pub fn scaled(mut self, factor: f64) -> Self {
        for (_, coefficient) in self.terms.iter_mut() {
            *coefficient *= factor;
        }
        self.constant *= factor;
        self
    }

    /// Evaluates the expression; missing values count as zero.
    pub fn evaluate(&self, values: &[f64]) -> f64 {
        self.terms
            .iter()
            .map(|&(var, coefficient)| coefficient * values.get(var.index()).copied().unwrap_or(0.0))
            .sum::<f64>()
            + self.constant
    }
}

impl From<VarId> for LinearExpr {
    fn from(var: VarId) -> Self {
        LinearExpr::term(var, 1.0)
    }
}

impl AddAssign for LinearExpr {
    fn add_assign(&mut self, rhs: LinearExpr) {
        self.terms.extend(rhs.terms);
        self.constant += rhs.constant;
    }
}

impl Add for LinearExpr {
    type Output = LinearExpr;

    fn add(mut self, rhs: LinearExpr) -> LinearExpr {
        self += rhs;
        self
    }
}

impl Neg for LinearExpr {
    type Output = LinearExpr;

    fn neg(self) -> LinearExpr {
        self.scaled(-1.0)
    }
}

impl Sub for LinearExpr {
    type Output = LinearExpr;

    fn sub(self, rhs: LinearExpr) -> LinearExpr {
        self + (-rhs)
    }
}

impl Mul<f64> for LinearExpr {
    type Output = LinearExpr;

    fn mul(self, factor: f64) -> LinearExpr {
        self.scaled(factor)
    }
}
