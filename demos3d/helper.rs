use crumble3d::prelude::*;
use na::{vector, Point3, Vector3};

pub fn slab_extents(size: [usize; 3], particle_rad: Real) -> Vector3<Real> {
    vector![
        size[0] as Real * particle_rad * 2.0,
        size[1] as Real * particle_rad * 2.0,
        size[2] as Real * particle_rad * 2.0
    ]
}

pub fn slab_particles(
    origin: Point3<Real>,
    size: [usize; 3],
    particle_rad: Real,
    particle_density: Real,
    surface: GroupMask,
) -> Vec<Particle> {
    let mut particles = Vec::new();
    let [ni, nj, nk] = size;

    for i in 0..ni {
        for j in 0..nj {
            for k in 0..nk {
                let shift = vector![i as Real + 0.5, j as Real + 0.5, k as Real + 0.5]
                    * particle_rad
                    * 2.0;
                let particle = Particle::new(origin + shift, particle_rad, particle_density);

                if j + 2 >= nj {
                    particles.push(particle.with_groups(GroupMask::ALL | surface));
                } else {
                    particles.push(particle);
                }
            }
        }
    }

    particles
}

/// Compresses the particles along the contact force and makes them flow plastically.
pub fn prescribe_loading(particles: &mut ParticleSet, plastic_strain_rate: Real, dt: Real) {
    particles.for_each_particles_mut(|particle| {
        let force = particle.external_force;

        if let Some(dir) = force.try_normalize(1.0e-20) {
            let area = particle.volume.powf(2.0 / 3.0);
            particle.stress = -(dir * dir.transpose()) * (force.norm() / area);
            particle.plastic_strain_increment = plastic_strain_rate * dt;
            particle.effective_plastic_strain += plastic_strain_rate * dt;
            particle.effective_plastic_strain_rate = plastic_strain_rate;
        } else {
            particle.plastic_strain_increment = 0.0;
            particle.effective_plastic_strain_rate = 0.0;
        }
    });
}

pub fn max_damage(particles: &ParticleSet) -> Real {
    particles
        .iter()
        .map(|p| p.damage.damage)
        .fold(0.0, Real::max)
}
