pub(crate) mod assemble;
mod engine;
mod operation;
mod ring;
mod select;

pub use operation::{boolean_operation, BooleanOperation};
pub use select::BooleanOp;
