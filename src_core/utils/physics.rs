use crate::math::{DecomposedTensor, Matrix, Real};

/// `sqrt(3 / 2)`.
pub const SQRT_3_OVER_2: Real = 1.224_744_871_391_589;

/// Computes the modulus `E / (1 - nu²)` from the young modulus and poisson ratio.
pub fn plane_strain_modulus(young_modulus: Real, poisson_ratio: Real) -> Real {
    young_modulus / (1.0 - poisson_ratio * poisson_ratio)
}

/// The von Mises equivalent stress of a deviatoric stress tensor.
pub fn von_mises_stress(deviatoric_stress: &Matrix<Real>) -> Real {
    SQRT_3_OVER_2 * deviatoric_stress.norm()
}

/// The von Mises equivalent stress of a full stress tensor.
pub fn equivalent_stress(stress: &Matrix<Real>) -> Real {
    von_mises_stress(&deviatoric_part(stress))
}

pub fn deviatoric_part(tensor: &Matrix<Real>) -> Matrix<Real> {
    DecomposedTensor::decompose(tensor).deviatoric_part
}
