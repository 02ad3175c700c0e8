pub use self::boundary_condition::{
    BoundaryCondition, BoundaryConditionHandle, BoundaryConditionSet,
};
pub use self::indent_hertz::{
    particle_contact_force, ContactReport, HertzIndenter, IndenterShape, IndenterState,
};
pub use crate::core::dynamics::contact::*;

mod boundary_condition;
mod indent_hertz;
