pub use group::{GroupKind, GroupMask};
pub use particle::*;

pub mod contact;
mod group;
pub mod models;
mod particle;
