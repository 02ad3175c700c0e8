use crate::dynamics::solver::ParticleKernels;
use crate::dynamics::BodySet;
use crate::math::Vector;

impl ParticleKernels {
    /// Clears the external forces accumulated by the boundary conditions.
    pub fn reset_external_forces(bodies: &mut BodySet) {
        for (_, body) in bodies.iter_mut() {
            body.particles
                .for_each_particles_mut(|particle| particle.external_force = Vector::zeros());
        }
    }
}

#[cfg(test)]
mod test {
    use crate::dynamics::models::ElasticProperties;
    use crate::dynamics::solver::ParticleKernels;
    use crate::dynamics::{Body, BodySet, Particle, ParticleModel, ParticleModelSet, ParticleSet};
    use crate::math::{Point, Vector};

    #[test]
    fn external_forces_are_cleared() {
        let mut models = ParticleModelSet::new();
        let model = models.insert(ParticleModel::new(ElasticProperties::new(1.0, 0.2)));
        let mut particles = vec![Particle::new(Point::origin(), 0.5, 1.0); 10];
        for particle in &mut particles {
            particle.external_force = Vector::repeat(3.0);
        }

        let mut bodies = BodySet::new();
        let handle = bodies.insert(Body::new("body", ParticleSet::from(particles), model));
        ParticleKernels::reset_external_forces(&mut bodies);

        assert!(bodies[handle]
            .particles
            .iter()
            .all(|p| p.external_force == Vector::zeros()));
    }
}
