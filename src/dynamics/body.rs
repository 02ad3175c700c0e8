use crate::dynamics::{ParticleModel, ParticleModelHandle, ParticleModelSet, ParticleSet};
use rapier::data::{Arena, Index};

pub type BodyHandle = Index;

/// A deformable body: a set of particles made of the same material.
#[derive(Clone)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct Body {
    pub name: String,
    pub particles: ParticleSet,
    pub model: ParticleModelHandle,
}

impl Body {
    pub fn new(name: impl Into<String>, particles: ParticleSet, model: ParticleModelHandle) -> Self {
        Self {
            name: name.into(),
            particles,
            model,
        }
    }

    /// The material of this body.
    pub fn model<'a>(&self, models: &'a ParticleModelSet) -> anyhow::Result<&'a ParticleModel> {
        models.get(self.model).ok_or_else(|| {
            anyhow::anyhow!("body {} refers to a particle model that doesn't exist", self.name)
        })
    }
}

#[derive(Clone, Default)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct BodySet {
    bodies: Arena<Body>,
}

impl BodySet {
    pub fn new() -> Self {
        Self {
            bodies: Arena::new(),
        }
    }

    pub fn insert(&mut self, body: Body) -> BodyHandle {
        self.bodies.insert(body)
    }

    pub fn remove(&mut self, handle: BodyHandle) -> Option<Body> {
        self.bodies.remove(handle)
    }

    pub fn get(&self, handle: BodyHandle) -> Option<&Body> {
        self.bodies.get(handle)
    }

    pub fn get_mut(&mut self, handle: BodyHandle) -> Option<&mut Body> {
        self.bodies.get_mut(handle)
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    /// The total number of particles owned by the local process.
    pub fn num_particles(&self) -> usize {
        self.bodies.iter().map(|(_, body)| body.particles.len()).sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (BodyHandle, &Body)> {
        self.bodies.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (BodyHandle, &mut Body)> {
        self.bodies.iter_mut()
    }
}

impl std::ops::Index<BodyHandle> for BodySet {
    type Output = Body;

    #[inline]
    fn index(&self, i: BodyHandle) -> &Body {
        &self.bodies[i]
    }
}

impl std::ops::IndexMut<BodyHandle> for BodySet {
    #[inline]
    fn index_mut(&mut self, i: BodyHandle) -> &mut Body {
        &mut self.bodies[i]
    }
}
