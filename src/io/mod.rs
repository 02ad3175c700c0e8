pub use self::dump_particle::{ParticleDump, ParticleField};

mod dump_particle;
