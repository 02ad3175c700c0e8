use crate::math::Real;

/// The time and step index the kernels are run for.
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct StepContext {
    pub time: Real,
    pub step: u64,
    pub dt: Real,
}

impl StepContext {
    /// The context of the first step of a simulation.
    pub fn new(dt: Real) -> Self {
        Self {
            time: 0.0,
            step: 0,
            dt,
        }
    }

    /// Moves to the next step.
    pub fn advance(&mut self) {
        self.step += 1;
        self.time += self.dt;
    }
}
