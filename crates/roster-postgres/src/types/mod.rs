//! Shared database types.

mod constraint;

pub use constraint::{ConstraintViolation, UserConstraints};
