use crate::dynamics::models::DamageModel;
use crate::dynamics::solver::ParticleKernels;
use crate::dynamics::{BodySet, ParticleModelSet, ParticleSet};
use rayon::prelude::*;

impl ParticleKernels {
    /// Accumulates the damage of every body made of a damageable material.
    pub fn update_bodies_damage(
        bodies: &mut BodySet,
        models: &ParticleModelSet,
    ) -> anyhow::Result<()> {
        let t0 = instant::now();

        for (_, body) in bodies.iter_mut() {
            let model = body.model(models)?;

            if let Some(damage_model) = &model.damage_model {
                Self::update_damage(damage_model, &mut body.particles);
            }
        }

        debug!("Damage update: {}ms", instant::now() - t0);
        Ok(())
    }

    /// Accumulates the damage of every particle with a non-zero mass.
    pub fn update_damage(model: &dyn DamageModel, particles: &mut ParticleSet) {
        particles
            .particles_mut()
            .par_iter_mut()
            .filter(|particle| particle.is_active())
            .for_each(|particle| model.update_particle(particle));
    }
}
