#![no_std]

#[cfg(feature = "std")]
extern crate std;

pub extern crate nalgebra as na;

#[cfg(feature = "serde")]
#[macro_use]
extern crate serde;

pub mod prelude {
    pub use crate::dynamics::contact::*;
    pub use crate::dynamics::models::*;
    pub use crate::dynamics::*;
    pub use crate::math::*;
}

pub mod math {
    pub use super::parry_math::math::*;

    #[derive(Copy, Clone, Debug, PartialEq)]
    pub struct DecomposedTensor {
        pub deviatoric_part: Matrix<Real>,
        pub spherical_part: Real,
    }

    impl DecomposedTensor {
        pub fn decompose(tensor: &Matrix<Real>) -> Self {
            let spherical_part = tensor.trace() / (DIM as Real);
            let mut deviatoric_part = *tensor;

            for i in 0..DIM {
                deviatoric_part[(i, i)] -= spherical_part;
            }

            Self {
                deviatoric_part,
                spherical_part,
            }
        }

        pub fn recompose(&self) -> Matrix<Real> {
            self.deviatoric_part + Matrix::identity() * self.spherical_part
        }

        /// The hydrostatic pressure, positive in compression.
        pub fn pressure(&self) -> Real {
            -self.spherical_part
        }
    }
}

mod parry_math {

    mod real {
        /// The scalar type used throughout this crate.
        #[cfg(feature = "f64")]
        pub type Real = f64;
    }

    /// Compilation flags dependent aliases for mathematical types.
    #[cfg(feature = "dim3")]
    pub mod math {
        pub use super::real::*;
        use na::{Matrix3, Point3, Vector3};

        /// The dimension of the space.
        pub const DIM: usize = 3;

        /// The point type.
        pub type Point<N> = Point3<N>;

        /// The vector type.
        pub type Vector<N> = Vector3<N>;

        /// The matrix type.
        pub type Matrix<N> = Matrix3<N>;
    }

    /// Compilation flags dependent aliases for mathematical types.
    #[cfg(feature = "dim2")]
    pub mod math {
        pub use super::real::*;
        use na::{Matrix2, Point2, Vector2};

        /// The dimension of the space.
        pub const DIM: usize = 2;

        /// The point type.
        pub type Point<N> = Point2<N>;

        /// The vector type.
        pub type Vector<N> = Vector2<N>;

        /// The matrix type.
        pub type Matrix<N> = Matrix2<N>;
    }
}

pub mod dynamics;
pub mod utils;
