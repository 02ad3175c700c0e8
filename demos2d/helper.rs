use crumble2d::prelude::*;
use na::{vector, Point2};

pub fn block_particles(
    origin: Point2<Real>,
    ni: usize,
    nj: usize,
    particle_rad: Real,
    particle_density: Real,
    surface: GroupMask,
) -> Vec<Particle> {
    let mut particles = Vec::new();

    for i in 0..ni {
        for j in 0..nj {
            let shift = vector![
                (i as Real + 0.5) * particle_rad * 2.0,
                (j as Real + 0.5) * particle_rad * 2.0
            ];
            let mut particle = Particle::new(origin + shift, particle_rad, particle_density);

            // The top rows can be touched by the indenter.
            if j + 3 >= nj {
                particle = particle.with_groups(GroupMask::ALL | surface);
            }

            particles.push(particle);
        }
    }

    particles
}

/// Stands in for the constitutive update: the particles pushed by the indenter
/// are compressed along the force and flow plastically.
pub fn prescribe_loading(particles: &mut ParticleSet, plastic_strain_rate: Real, dt: Real) {
    let plastic_strain_increment = plastic_strain_rate * dt;

    particles.for_each_particles_mut(|particle| {
        let force = particle.external_force;
        let area = particle.volume.sqrt();

        if force.norm_squared() == 0.0 {
            particle.plastic_strain_increment = 0.0;
            particle.effective_plastic_strain_rate = 0.0;
            return;
        }

        let dir = force.normalize();
        particle.stress = -(dir * dir.transpose()) * (force.norm() / area);
        particle.plastic_strain_increment = plastic_strain_increment;
        particle.effective_plastic_strain += plastic_strain_increment;
        particle.effective_plastic_strain_rate = plastic_strain_rate;
    });
}

pub fn num_softening(particles: &ParticleSet) -> usize {
    particles.iter().filter(|p| p.damage.is_softening()).count()
}
