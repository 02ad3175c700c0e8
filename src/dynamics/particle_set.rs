use crate::dynamics::Particle;
use rayon::prelude::*;

/// The particles owned by the local process.
#[derive(Clone, Default)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct ParticleSet {
    pub(crate) particles: Vec<Particle>,
}

impl ParticleSet {
    pub fn new() -> Self {
        Self { particles: vec![] }
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn particles_mut(&mut self) -> &mut [Particle] {
        &mut self.particles
    }

    pub fn iter(&self) -> impl Iterator<Item = &Particle> {
        self.particles.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Particle> {
        self.particles.iter_mut()
    }

    #[inline(always)]
    pub fn for_each_particles_mut(&mut self, f: impl Fn(&mut Particle) + Sync) {
        self.particles.par_iter_mut().for_each(|p| f(p))
    }
}

impl From<Vec<Particle>> for ParticleSet {
    fn from(particles: Vec<Particle>) -> Self {
        Self { particles }
    }
}

impl<'a> IntoIterator for &'a ParticleSet {
    type Item = &'a Particle;
    type IntoIter = <&'a Vec<Particle> as IntoIterator>::IntoIter;

    fn into_iter(self) -> Self::IntoIter {
        (&self.particles).into_iter()
    }
}
