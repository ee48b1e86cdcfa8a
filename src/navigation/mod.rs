//! Navigation meshes over convex cells with precomputed shortest paths.

mod cell;
mod distance;
mod mesh;
mod path;
mod table;

pub use cell::{CellId, NavCell, Neighbor, Portal};
pub use distance::{CellDistance, CentroidDistance};
pub use mesh::{NavMesh, NavMeshBuilder};
pub use path::{NavPath, PathEndpoint};
pub use table::{PathEntry, PathTable};
