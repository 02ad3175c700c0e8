use crate::expressions::VariableMap;
use crate::math::Real;
use std::fmt;
use std::sync::Arc;

/// A scalar that may change with the simulation time.
#[derive(Clone)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub enum Expression {
    Constant(Real),
    /// `c[0] + c[1] t + c[2] t² + ...`
    Polynomial(Vec<Real>),
    /// The current value of a variable of the [`VariableMap`].
    Variable(String),
    /// A user-defined function of time.
    #[cfg_attr(feature = "serde-serialize", serde(skip))]
    Function(Arc<dyn Fn(Real) -> Real + Send + Sync>),
}

impl Expression {
    pub fn constant(value: Real) -> Self {
        Self::Constant(value)
    }

    /// `start + rate * t`.
    pub fn linear(start: Real, rate: Real) -> Self {
        Self::Polynomial(vec![start, rate])
    }

    pub fn function(f: impl Fn(Real) -> Real + Send + Sync + 'static) -> Self {
        Self::Function(Arc::new(f))
    }

    pub fn eval(&self, time: Real, variables: &VariableMap) -> anyhow::Result<Real> {
        match self {
            Self::Constant(value) => Ok(*value),
            // Horner scheme.
            Self::Polynomial(coeffs) => Ok(coeffs.iter().rev().fold(0.0, |acc, c| acc * time + c)),
            Self::Variable(name) => variables
                .get(name)
                .ok_or_else(|| anyhow::anyhow!("unknown variable: {}", name)),
            Self::Function(f) => Ok(f(time)),
        }
    }
}

impl From<Real> for Expression {
    fn from(value: Real) -> Self {
        Self::Constant(value)
    }
}

impl fmt::Debug for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Constant(value) => f.debug_tuple("Constant").field(value).finish(),
            Self::Polynomial(coeffs) => f.debug_tuple("Polynomial").field(coeffs).finish(),
            Self::Variable(name) => f.debug_tuple("Variable").field(name).finish(),
            Self::Function(_) => f.write_str("Function(..)"),
        }
    }
}
