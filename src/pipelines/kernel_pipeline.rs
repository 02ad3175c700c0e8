use crate::dynamics::boundary::BoundaryConditionSet;
use crate::dynamics::solver::{ParticleKernels, StepContext};
use crate::dynamics::{BodySet, ParticleModelSet};
use crate::expressions::VariableMap;
use crate::parallel::Communicator;

#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PipelineParameters {
    /// Clear the external forces of the particles before applying the boundary conditions.
    pub reset_external_forces: bool,
    pub enable_damage: bool,
}

impl Default for PipelineParameters {
    fn default() -> Self {
        Self {
            reset_external_forces: true,
            enable_damage: true,
        }
    }
}

/// Runs the per-step particle kernels in order: boundary conditions, then damage.
pub struct KernelPipeline {
    first_step: bool,
}

impl KernelPipeline {
    pub fn new() -> Self {
        KernelPipeline { first_step: true }
    }

    pub fn step(
        &mut self,
        params: &PipelineParameters,
        ctx: &StepContext,
        bodies: &mut BodySet,
        models: &ParticleModelSet,
        boundary_conditions: &BoundaryConditionSet,
        communicator: &dyn Communicator,
        outputs: &mut VariableMap,
    ) -> anyhow::Result<()> {
        if self.first_step {
            info!(
                "Rank {}/{}: {} bodies, {} particles, {} boundary conditions",
                communicator.rank(),
                communicator.num_ranks(),
                bodies.len(),
                bodies.num_particles(),
                boundary_conditions.len()
            );
            self.first_step = false;
        }

        let t0 = instant::now();

        if params.reset_external_forces {
            ParticleKernels::reset_external_forces(bodies);
        }

        let t1 = instant::now();
        boundary_conditions.apply_all(ctx, bodies, models, communicator, outputs)?;
        debug!("Boundary conditions: {}ms", instant::now() - t1);

        if params.enable_damage {
            ParticleKernels::update_bodies_damage(bodies, models)?;
        }

        debug!("Step {} (t = {}): {}ms", ctx.step, ctx.time, instant::now() - t0);
        Ok(())
    }
}

impl Default for KernelPipeline {
    fn default() -> Self {
        Self::new()
    }
}
