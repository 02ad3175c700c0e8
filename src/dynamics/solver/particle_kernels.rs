/// The kernels updating the per-particle state once per step.
///
/// Each kernel is a data-parallel loop over the active particles of a body and never
/// communicates with the other processes.
pub struct ParticleKernels;
