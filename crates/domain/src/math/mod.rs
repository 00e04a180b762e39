//! Big-integer helpers shared by the value objects.

pub mod big;
