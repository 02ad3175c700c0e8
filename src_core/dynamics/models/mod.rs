pub use self::damage_johnson_cook::{
    DamageParameterError, JohnsonCookDamage, JohnsonCookParameters, MAX_TRIAXIALITY,
};
pub use self::damage_model::CoreDamageModel;
pub use self::elastic_properties::ElasticProperties;

mod damage_johnson_cook;
mod damage_model;
mod elastic_properties;
