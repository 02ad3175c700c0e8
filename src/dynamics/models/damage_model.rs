use crate::dynamics::models::CoreDamageModel;
use crate::dynamics::Particle;

/// A model updating the damage state of a particle once per step.
pub trait DamageModel: Send + Sync {
    fn update_particle(&self, particle: &mut Particle);
}

impl DamageModel for CoreDamageModel {
    fn update_particle(&self, particle: &mut Particle) {
        match self {
            Self::JohnsonCook(m) => m.update_particle(particle),
        }
    }
}
