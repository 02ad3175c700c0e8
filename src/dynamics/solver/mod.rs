pub use self::particle_kernels::ParticleKernels;
pub use self::step_context::StepContext;

mod damage_update;
mod external_forces;
mod particle_kernels;
mod step_context;
