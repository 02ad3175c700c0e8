pub use self::damage_model::DamageModel;
pub use crate::core::dynamics::models::*;

mod damage_johnson_cook;
mod damage_model;
