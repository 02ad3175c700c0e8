pub use self::body::{Body, BodyHandle, BodySet};
pub use self::group::{BodySelector, ParticleGroup};
pub use self::particle::Particle;
pub use self::particle_model::{ParticleModel, ParticleModelHandle, ParticleModelSet};
pub use self::particle_set::ParticleSet;
pub use crate::core::dynamics::{GroupKind, GroupMask, ParticleDamage};

mod body;
pub mod boundary;
mod group;
pub mod models;
mod particle;
mod particle_model;
mod particle_set;
pub mod solver;
