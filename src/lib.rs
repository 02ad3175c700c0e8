#[cfg(feature = "dim2")]
pub extern crate parry2d_f64 as parry;
#[cfg(feature = "dim3")]
pub extern crate parry3d_f64 as parry;

#[cfg(feature = "dim2")]
pub extern crate rapier2d_f64 as rapier;
#[cfg(feature = "dim3")]
pub extern crate rapier3d_f64 as rapier;

#[cfg(feature = "dim2")]
pub extern crate crumble2d_core;
#[cfg(feature = "dim3")]
pub extern crate crumble3d_core;

pub extern crate nalgebra as na;

#[macro_use]
extern crate log;

#[cfg(feature = "serde")]
#[macro_use]
extern crate serde;

#[cfg(feature = "dim2")]
pub use crumble2d_core as core;
#[cfg(feature = "dim3")]
pub use crumble3d_core as core;

pub mod prelude {
    pub use crate::dynamics::boundary::*;
    pub use crate::dynamics::models::*;
    pub use crate::dynamics::solver::*;
    pub use crate::dynamics::*;
    pub use crate::expressions::*;
    pub use crate::io::*;
    pub use crate::math::*;
    pub use crate::parallel::*;
    pub use crate::pipelines::*;
}

pub mod math {
    pub use super::parry::math::*;
    pub use crate::core::math::DecomposedTensor;
}

pub mod dynamics;
pub mod expressions;
pub mod io;
pub mod parallel;
pub mod pipelines;
