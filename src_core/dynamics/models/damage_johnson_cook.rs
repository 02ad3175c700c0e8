use crate::dynamics::ParticleDamage;
use crate::math::{Matrix, Real};
use core::convert::TryFrom;
use core::fmt;

#[cfg(not(feature = "std"))]
use na::ComplexField;

/// Triaxiality values above this ceiling are clamped.
pub const MAX_TRIAXIALITY: Real = 3.0;

/// Once `damage_init` crossed 1, the damage grows ten times faster than it.
const SOFTENING_SLOPE: Real = 10.0;

/// Error raised when building a damage model from invalid parameters.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum DamageParameterError {
    /// The reference and melting temperatures are equal.
    DegenerateTemperatureRange { temperature: Real },
    /// Fewer parameters than required were supplied.
    NotEnoughArguments { expected: usize, found: usize },
}

impl fmt::Display for DamageParameterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DegenerateTemperatureRange { temperature } => write!(
                f,
                "reference temperature Tr={} equals melting temperature Tm={}",
                temperature, temperature
            ),
            Self::NotEnoughArguments { expected, found } => write!(
                f,
                "too few arguments for the Johnson-Cook damage model: expected {}, found {} \
                 (usage: d1 d2 d3 d4 d5 epsdot0 Tr Tm)",
                expected, found
            ),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for DamageParameterError {}

/// The raw, unvalidated, coefficients of a Johnson-Cook damage model.
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[derive(Copy, Clone, Debug, PartialEq)]
#[repr(C)]
pub struct JohnsonCookParameters {
    pub d1: Real,
    pub d2: Real,
    pub d3: Real,
    /// Strain-rate sensitivity. Ignored if not strictly positive.
    pub d4: Real,
    /// Temperature sensitivity. Ignored if not strictly positive.
    pub d5: Real,
    pub reference_strain_rate: Real,
    pub reference_temperature: Real,
    pub melting_temperature: Real,
}

impl JohnsonCookParameters {
    pub const NUM_PARAMETERS: usize = 8;
}

/// Johnson-Cook cumulative ductile damage.
///
/// The failure strain depends on the stress triaxiality, and optionally on the plastic
/// strain rate and the temperature:
///
/// `eps_f = [d1 + d2 exp(d3 triax)] [1 + d4 ln(epsdot / epsdot0)] [1 + d5 (T - Tr) / (Tm - Tr)]`
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[cfg_attr(
    feature = "serde-serialize",
    serde(try_from = "JohnsonCookParameters", into = "JohnsonCookParameters")
)]
#[derive(Copy, Clone, Debug, PartialEq)]
#[repr(C)]
pub struct JohnsonCookDamage {
    params: JohnsonCookParameters,
    temperature_range: Real,
}

impl JohnsonCookDamage {
    pub fn new(params: JohnsonCookParameters) -> Result<Self, DamageParameterError> {
        if params.reference_temperature == params.melting_temperature {
            return Err(DamageParameterError::DegenerateTemperatureRange {
                temperature: params.reference_temperature,
            });
        }

        Ok(Self {
            params,
            temperature_range: params.melting_temperature - params.reference_temperature,
        })
    }

    /// Builds the model from `[d1, d2, d3, d4, d5, epsdot0, Tr, Tm]`.
    ///
    /// Extra trailing values are ignored.
    pub fn from_args(args: &[Real]) -> Result<Self, DamageParameterError> {
        if args.len() < JohnsonCookParameters::NUM_PARAMETERS {
            return Err(DamageParameterError::NotEnoughArguments {
                expected: JohnsonCookParameters::NUM_PARAMETERS,
                found: args.len(),
            });
        }

        Self::new(JohnsonCookParameters {
            d1: args[0],
            d2: args[1],
            d3: args[2],
            d4: args[3],
            d5: args[4],
            reference_strain_rate: args[5],
            reference_temperature: args[6],
            melting_temperature: args[7],
        })
    }

    pub fn parameters(&self) -> &JohnsonCookParameters {
        &self.params
    }

    /// `Tm - Tr`.
    pub fn temperature_range(&self) -> Real {
        self.temperature_range
    }

    /// The stress triaxiality, clamped to [`MAX_TRIAXIALITY`].
    ///
    /// The `0.01 |p|` term regularizes the ratio when the von Mises stress vanishes.
    pub fn triaxiality(pressure: Real, von_mises: Real) -> Real {
        let mut triax = 0.0;

        if pressure != 0.0 && von_mises != 0.0 {
            triax = -pressure / (von_mises + 0.01 * pressure.abs());
        }

        triax.min(MAX_TRIAXIALITY)
    }

    pub fn failure_strain(
        &self,
        triaxiality: Real,
        plastic_strain_rate: Real,
        temperature: Real,
    ) -> Real {
        let p = &self.params;
        let mut failure_strain = p.d1 + p.d2 * (p.d3 * triaxiality).exp();

        // No rate factor at all below the reference rate.
        if p.d4 > 0.0 && plastic_strain_rate > p.reference_strain_rate {
            failure_strain *= 1.0 + p.d4 * (plastic_strain_rate / p.reference_strain_rate).ln();
        }

        if p.d5 > 0.0 && temperature >= p.reference_temperature {
            failure_strain *=
                1.0 + p.d5 * (temperature - p.reference_temperature) / self.temperature_range;
        }

        failure_strain
    }

    /// Accumulates the damage of one particle over one step.
    ///
    /// # Panics
    ///
    /// Panics if the von Mises stress derived from `deviatoric_stress` is negative, which
    /// indicates a corrupted stress tensor.
    pub fn compute_damage(
        &self,
        mut state: ParticleDamage,
        pressure: Real,
        deviatoric_stress: &Matrix<Real>,
        plastic_strain_rate: Real,
        plastic_strain_increment: Real,
        temperature: Real,
    ) -> ParticleDamage {
        let vm = crate::utils::von_mises_stress(deviatoric_stress);

        if vm < 0.0 {
            panic!(
                "von Mises stress vm={} < 0.0 computed from the deviatoric stress {:?}",
                vm, deviatoric_stress
            );
        }

        let triax = Self::triaxiality(pressure, vm);
        let failure_strain = self.failure_strain(triax, plastic_strain_rate, temperature);

        state.damage_init += plastic_strain_increment / failure_strain;

        if state.damage_init >= 1.0 {
            state.damage = ((state.damage_init - 1.0) * SOFTENING_SLOPE).min(1.0);
        }

        state
    }
}

impl TryFrom<JohnsonCookParameters> for JohnsonCookDamage {
    type Error = DamageParameterError;

    fn try_from(params: JohnsonCookParameters) -> Result<Self, Self::Error> {
        Self::new(params)
    }
}

impl From<JohnsonCookDamage> for JohnsonCookParameters {
    fn from(model: JohnsonCookDamage) -> Self {
        model.params
    }
}
