use crate::math::Real;
use crate::parallel::Communicator;
use std::sync::{Arc, Barrier, Mutex, MutexGuard, PoisonError};

struct SharedState {
    barrier: Barrier,
    sum: Mutex<Vec<Real>>,
}

impl SharedState {
    fn sum(&self) -> MutexGuard<Vec<Real>> {
        self.sum.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// One rank of a group of in-process partitions, each driven by its own thread.
///
/// All the ranks of a group must call the collective operations the same number of
/// times, otherwise they will wait for each other forever.
pub struct ThreadCommunicator {
    rank: usize,
    num_ranks: usize,
    shared: Arc<SharedState>,
}

impl ThreadCommunicator {
    /// Creates the `num_ranks` communicators of a new group.
    pub fn group(num_ranks: usize) -> Vec<Self> {
        let shared = Arc::new(SharedState {
            barrier: Barrier::new(num_ranks),
            sum: Mutex::new(vec![]),
        });

        (0..num_ranks)
            .map(|rank| Self {
                rank,
                num_ranks,
                shared: shared.clone(),
            })
            .collect()
    }
}

impl Communicator for ThreadCommunicator {
    fn rank(&self) -> usize {
        self.rank
    }

    fn num_ranks(&self) -> usize {
        self.num_ranks
    }

    fn reduce_sum(&self, values: &mut [Real]) {
        {
            let mut sum = self.shared.sum();
            if sum.len() < values.len() {
                sum.resize(values.len(), 0.0);
            }

            for (s, v) in sum.iter_mut().zip(values.iter()) {
                *s += *v;
            }
        }

        // Wait for every contribution.
        self.shared.barrier.wait();
        values.copy_from_slice(&self.shared.sum()[..values.len()]);

        // Wait for every read before clearing the accumulator for the next reduction.
        if self.shared.barrier.wait().is_leader() {
            self.shared.sum().iter_mut().for_each(|s| *s = 0.0);
        }
        self.shared.barrier.wait();
    }
}
