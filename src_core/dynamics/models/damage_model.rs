use crate::dynamics::models::JohnsonCookDamage;
use crate::dynamics::ParticleDamage;
use crate::math::{Matrix, Real};

/// The damage models that can be attached to a material.
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[derive(Copy, Clone, Debug, PartialEq)]
#[repr(C)]
pub enum CoreDamageModel {
    JohnsonCook(JohnsonCookDamage),
}

impl CoreDamageModel {
    pub fn compute_damage(
        &self,
        state: ParticleDamage,
        pressure: Real,
        deviatoric_stress: &Matrix<Real>,
        plastic_strain_rate: Real,
        plastic_strain_increment: Real,
        temperature: Real,
    ) -> ParticleDamage {
        match self {
            Self::JohnsonCook(m) => m.compute_damage(
                state,
                pressure,
                deviatoric_stress,
                plastic_strain_rate,
                plastic_strain_increment,
                temperature,
            ),
        }
    }
}

impl From<JohnsonCookDamage> for CoreDamageModel {
    fn from(model: JohnsonCookDamage) -> Self {
        Self::JohnsonCook(model)
    }
}
