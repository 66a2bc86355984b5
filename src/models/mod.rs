pub mod exercise;
pub mod set;

pub use exercise::{Dimension, ExerciseSpec, InputType, LoadField};
pub use set::{SetRecord, SetType};
