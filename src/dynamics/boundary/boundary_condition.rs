use crate::dynamics::solver::StepContext;
use crate::dynamics::{BodySet, ParticleModelSet};
use crate::expressions::VariableMap;
use crate::parallel::Communicator;
use rapier::data::{Arena, Index};
use std::sync::Arc;

pub type BoundaryConditionHandle = Index;

/// A condition applied to the particles once per step.
pub trait BoundaryCondition: Send + Sync {
    /// The unique identifier of this condition, also used to name its outputs.
    fn id(&self) -> &str;

    fn apply(
        &self,
        ctx: &StepContext,
        bodies: &mut BodySet,
        models: &ParticleModelSet,
        communicator: &dyn Communicator,
        outputs: &mut VariableMap,
    ) -> anyhow::Result<()>;
}

/// The boundary conditions of a simulation, applied in insertion order.
#[derive(Clone)]
pub struct BoundaryConditionSet {
    conditions: Arena<Arc<dyn BoundaryCondition>>,
}

impl BoundaryConditionSet {
    pub fn new() -> Self {
        Self {
            conditions: Arena::new(),
        }
    }

    /// Registers a new boundary condition.
    ///
    /// Fails if a condition with the same identifier already exists.
    pub fn insert(
        &mut self,
        condition: impl BoundaryCondition + 'static,
    ) -> anyhow::Result<BoundaryConditionHandle> {
        if self.find(condition.id()).is_some() {
            anyhow::bail!(
                "a boundary condition with ID {} already exists",
                condition.id()
            );
        }

        info!("Creating new boundary condition with ID: {}", condition.id());
        Ok(self.conditions.insert(Arc::new(condition)))
    }

    pub fn remove(
        &mut self,
        handle: BoundaryConditionHandle,
    ) -> Option<Arc<dyn BoundaryCondition>> {
        self.conditions.remove(handle)
    }

    pub fn get(&self, handle: BoundaryConditionHandle) -> Option<&dyn BoundaryCondition> {
        self.conditions.get(handle).map(|c| &**c)
    }

    /// Finds a boundary condition by identifier.
    pub fn find(&self, id: &str) -> Option<BoundaryConditionHandle> {
        self.conditions
            .iter()
            .find(|(_, c)| c.id() == id)
            .map(|(handle, _)| handle)
    }

    pub fn len(&self) -> usize {
        self.conditions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (BoundaryConditionHandle, &dyn BoundaryCondition)> {
        self.conditions.iter().map(|(h, c)| (h, &**c))
    }

    /// Applies every boundary condition, one after the other.
    ///
    /// Conditions may be collective, so a failing condition doesn't prevent the next
    /// ones from being applied. The first error is returned once all of them ran.
    pub fn apply_all(
        &self,
        ctx: &StepContext,
        bodies: &mut BodySet,
        models: &ParticleModelSet,
        communicator: &dyn Communicator,
        outputs: &mut VariableMap,
    ) -> anyhow::Result<()> {
        let mut result = Ok(());

        for (_, condition) in self.conditions.iter() {
            if let Err(e) = condition.apply(ctx, bodies, models, communicator, outputs) {
                error!("Boundary condition {} failed: {}", condition.id(), e);
                if result.is_ok() {
                    result = Err(e);
                }
            }
        }

        result
    }
}

impl Default for BoundaryConditionSet {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod test {
    use super::BoundaryConditionSet;
    use crate::dynamics::boundary::{HertzIndenter, IndenterShape};
    use crate::dynamics::models::ElasticProperties;
    use crate::dynamics::solver::StepContext;
    use crate::dynamics::{Body, BodySet, Particle, ParticleGroup, ParticleModel, ParticleModelSet};
    use crate::expressions::{Expression, VariableMap};
    use crate::math::{Point, Vector, DIM};
    use crate::parallel::SingleProcess;

    fn indenter(id: &str, radius: Expression) -> HertzIndenter {
        HertzIndenter::new(
            id,
            IndenterShape::from_tag("sphere", radius).unwrap(),
            vec![Expression::constant(0.0); DIM],
            vec![Expression::constant(0.0); DIM],
            ParticleGroup::all(),
        )
        .unwrap()
    }

    #[test]
    fn failing_condition_does_not_skip_the_next_ones() {
        let mut models = ParticleModelSet::new();
        let model = models.insert(ParticleModel::new(ElasticProperties::new(200.0, 0.3)));
        let mut bodies = BodySet::new();
        let particle = Particle::new(Point::from(Vector::x() * 1.2), 0.5, 1.0);
        let _ = bodies.insert(Body::new("block", vec![particle].into(), model));

        let mut conditions = BoundaryConditionSet::new();
        conditions
            .insert(indenter("broken", Expression::Variable("missing".to_string())))
            .unwrap();
        conditions
            .insert(indenter("working", Expression::constant(1.0)))
            .unwrap();

        let mut outputs = VariableMap::new();
        let result = conditions.apply_all(
            &StepContext::new(1.0e-3),
            &mut bodies,
            &models,
            &SingleProcess,
            &mut outputs,
        );

        assert!(result.is_err());
        assert_eq!(outputs.get("broken_x"), None);
        assert!(outputs.get("working_x").unwrap() > 0.0);
    }
}
