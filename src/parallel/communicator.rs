use crate::math::Real;

/// Collective operations between the cooperating processes sharing a simulation.
///
/// Each process owns a disjoint subset of the particles. Collective operations are
/// blocking: every process must call them, and their result is only valid once
/// every process contributed.
pub trait Communicator: Send + Sync {
    /// The index of the calling process.
    fn rank(&self) -> usize;

    /// The number of cooperating processes.
    fn num_ranks(&self) -> usize;

    /// Replaces `values` by their element-wise sum across all the processes.
    fn reduce_sum(&self, values: &mut [Real]);
}

/// A simulation running on a single process, where all reductions are the identity.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct SingleProcess;

impl Communicator for SingleProcess {
    fn rank(&self) -> usize {
        0
    }

    fn num_ranks(&self) -> usize {
        1
    }

    fn reduce_sum(&self, _values: &mut [Real]) {
        /* nothing */
    }
}
