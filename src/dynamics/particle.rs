use crate::core::utils;
use crate::dynamics::{GroupMask, ParticleDamage};
use crate::math::{Matrix, Point, Real, Vector, DIM};

#[derive(Copy, Clone, Debug)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct Particle {
    pub mass: Real,
    pub volume0: Real,
    pub volume: Real,

    pub position0: Point<Real>,
    pub position: Point<Real>,
    pub velocity: Vector<Real>,
    pub stress: Matrix<Real>, // Cauchy stress.

    pub groups: GroupMask,

    // External forces accumulated by the boundary conditions during the current step.
    pub external_force: Vector<Real>,

    // Plasticity and damage.
    pub effective_plastic_strain: Real,
    pub effective_plastic_strain_rate: Real,
    pub plastic_strain_increment: Real,
    pub temperature: Real,
    pub damage: ParticleDamage,
}

impl Particle {
    pub fn new(position: Point<Real>, radius: Real, density0: Real) -> Self {
        let volume0 = (radius * 2.0).powi(DIM as i32);

        Self {
            mass: volume0 * density0,
            volume0,
            volume: volume0,
            position0: position,
            position,
            velocity: Vector::zeros(),
            stress: Matrix::zeros(),
            groups: GroupMask::ALL,
            external_force: Vector::zeros(),
            effective_plastic_strain: 0.0,
            effective_plastic_strain_rate: 0.0,
            plastic_strain_increment: 0.0,
            temperature: 0.0,
            damage: ParticleDamage::default(),
        }
    }

    pub fn with_groups(mut self, groups: GroupMask) -> Self {
        self.groups = groups;
        self
    }

    /// Can this particle be acted upon by the kernels?
    pub fn is_active(&self) -> bool {
        self.mass > 0.0
    }

    /// The von Mises equivalent stress.
    pub fn equivalent_stress(&self) -> Real {
        utils::equivalent_stress(&self.stress)
    }
}
