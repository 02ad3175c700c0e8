use crate::math::Real;
use parry::utils::hashmap::HashMap;

/// Named scalar values published by the kernels.
///
/// Boundary conditions write their outputs here (e.g. the reaction force of an
/// indenter) so they can be logged or read back by [`Expression::Variable`].
///
/// [`Expression::Variable`]: crate::expressions::Expression::Variable
#[derive(Clone, Debug, Default)]
pub struct VariableMap {
    values: HashMap<String, Real>,
}

impl VariableMap {
    pub fn new() -> Self {
        Self {
            values: HashMap::default(),
        }
    }

    pub fn set(&mut self, name: impl Into<String>, value: Real) {
        let _ = self.values.insert(name.into(), value);
    }

    pub fn get(&self, name: &str) -> Option<Real> {
        self.values.get(name).copied()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterates through all the variables, sorted by name.
    pub fn iter_sorted(&self) -> impl Iterator<Item = (&str, Real)> {
        let mut entries: Vec<_> = self.values.iter().map(|(k, v)| (k.as_str(), *v)).collect();
        entries.sort_by(|a, b| a.0.cmp(b.0));
        entries.into_iter()
    }
}
