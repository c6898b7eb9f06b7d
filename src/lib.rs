//! Echelon reduces dense matrices to row-echelon form in-place using Gaussian elimination.
//!
//! Matrices are generic over the field of their entries. Floating-point matrices use
//! [FloatField](rings::float::FloatField) and exact computations use
//! [RationalField](rings::rational::RationalField).
//!
//! For example:
//!
//! ```
//! use echelon::{
//!     matrix::Matrix,
//!     rings::rational::{Rational, RationalField},
//! };
//!
//! fn main() {
//!     let mut m = Matrix::from_nested_vec(
//!         vec![
//!             vec![Rational::from(1), Rational::from(2), Rational::from(3)],
//!             vec![Rational::from(4), Rational::from(5), Rational::from(6)],
//!             vec![Rational::from(7), Rational::from(8), Rational::from(9)],
//!         ],
//!         RationalField::new(),
//!     )
//!     .unwrap();
//!
//!     for step in m.row_echelon_logged() {
//!         println!("{}", step);
//!     }
//!
//!     assert!(m.is_row_echelon());
//!     assert_eq!(m.to_string(), "{{1,2,3},{0,-3,-6},{0,0,0}}");
//! }
//! ```
//!
//! Set `ECHELON_LOG=debug` to trace the reduction in the demo binary.

pub mod echelon;
pub mod matrix;
pub mod printer;
pub mod rings;
pub mod utils;

pub use echelon::{ReductionOptions, ReductionStep, SubMatrixMut};
pub use matrix::{Matrix, MatrixError};
