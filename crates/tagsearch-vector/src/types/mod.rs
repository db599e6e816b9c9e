//! Vector types and their binary encoding.

mod converter;
mod vector;

pub use converter::FloatVectorConverter;
pub use vector::FloatVector;
