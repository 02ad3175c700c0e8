use crate::math::Real;

/// The isotropic elastic constants of a material.
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[derive(Copy, Clone, Debug, PartialEq)]
#[repr(C)]
pub struct ElasticProperties {
    pub young_modulus: Real,
    pub poisson_ratio: Real,
}

impl ElasticProperties {
    pub fn new(young_modulus: Real, poisson_ratio: Real) -> Self {
        Self {
            young_modulus,
            poisson_ratio,
        }
    }

    /// The modulus `E / (1 - nu²)` entering the Hertz contact laws.
    pub fn plane_strain_modulus(&self) -> Real {
        crate::utils::plane_strain_modulus(self.young_modulus, self.poisson_ratio)
    }
}
