use crate::dynamics::models::{DamageModel, JohnsonCookDamage};
use crate::dynamics::Particle;
use crate::math::DecomposedTensor;

impl DamageModel for JohnsonCookDamage {
    fn update_particle(&self, particle: &mut Particle) {
        let stress = DecomposedTensor::decompose(&particle.stress);
        particle.damage = self.compute_damage(
            particle.damage,
            stress.pressure(),
            &stress.deviatoric_part,
            particle.effective_plastic_strain_rate,
            particle.plastic_strain_increment,
            particle.temperature,
        );
    }
}
