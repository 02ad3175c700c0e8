use crate::math::Real;

/*
 *=======================
 *                      *
 * DAMAGE COMPONENTS    *
 *                      *
 *=======================
 */

/// Cumulative ductile damage carried by a single particle.
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[derive(Copy, Clone, Debug, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
#[repr(C)]
pub struct ParticleDamage {
    /// Accumulated ratio between plastic strain and failure strain.
    ///
    /// Never decreases as long as the plastic strain increments are non-negative.
    pub damage_init: Real,
    /// Softening scalar in `[0, 1]`, only non-zero once `damage_init` reached 1.
    pub damage: Real,
}

impl ParticleDamage {
    /// Did the damage initiation threshold get crossed?
    pub fn is_softening(&self) -> bool {
        self.damage_init >= 1.0
    }
}
