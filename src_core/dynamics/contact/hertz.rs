use crate::dynamics::models::ElasticProperties;
use crate::math::Real;

#[cfg(not(feature = "std"))]
use na::ComplexField;

/// Parameters of the particle/indenter contact laws.
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[derive(Copy, Clone, Debug, PartialEq)]
#[repr(C)]
pub struct ContactParameters {
    /// Penetrations smaller than or equal to this value don't generate any force.
    ///
    /// Defaults to `0` in 2D and `1.0e-10` in 3D. The two defaults differ for
    /// historical reasons and are kept as-is so results stay comparable with
    /// existing simulations.
    pub min_penetration: Real,
}

impl Default for ContactParameters {
    fn default() -> Self {
        #[cfg(feature = "dim2")]
        let min_penetration = 0.0;
        #[cfg(feature = "dim3")]
        let min_penetration = 1.0e-10;

        Self { min_penetration }
    }
}

/// The radius of the disk (2D) or sphere (3D) a particle of the given volume stands for.
///
/// This is half the side of the square or cube having that volume.
#[cfg(feature = "dim2")]
pub fn effective_particle_radius(volume: Real) -> Real {
    0.5 * volume.sqrt()
}

/// The radius of the disk (2D) or sphere (3D) a particle of the given volume stands for.
///
/// This is half the side of the square or cube having that volume.
#[cfg(feature = "dim3")]
pub fn effective_particle_radius(volume: Real) -> Real {
    0.5 * volume.cbrt()
}

/// Magnitude of the repulsive force between a rigid indenter and a particle.
///
/// In 2D, this is a linearized line-contact law: `π/4 E/(1 - nu²) p`.
#[cfg(feature = "dim2")]
pub fn hertz_force_magnitude(
    material: &ElasticProperties,
    _indenter_radius: Real,
    penetration: Real,
) -> Real {
    0.25 * core::f64::consts::PI * material.plane_strain_modulus() * penetration
}

/// Magnitude of the repulsive force between a rigid indenter and a particle.
///
/// In 3D, this is the Hertz sphere contact law: `4/3 E/(1 - nu²) sqrt(R p³)`.
#[cfg(feature = "dim3")]
pub fn hertz_force_magnitude(
    material: &ElasticProperties,
    indenter_radius: Real,
    penetration: Real,
) -> Real {
    4.0 / 3.0
        * material.plane_strain_modulus()
        * (indenter_radius * penetration * penetration * penetration).sqrt()
}
