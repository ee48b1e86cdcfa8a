pub mod boolean;
pub mod decompose;
pub mod offset;

pub use boolean::{boolean_operation, BooleanOp, BooleanOperation};
pub use decompose::{ConvexDecomposer, TriangulationDecomposer};
pub use offset::{offset, FlatTip, Offset2D, PointyTip, TipDecorator};
