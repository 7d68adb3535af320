pub mod handles;
pub(crate) mod hull_repair;
mod line_side_info;
mod locate;
pub mod math;
mod mesh;
pub(crate) mod mesh_operations;
mod polar_order;
mod repair_queue;
mod triangle;

pub use line_side_info::LineSide;
pub use locate::{
    LastUsedTriangleLocator, LinearScanLocator, PointLocator, PositionInTriangulation,
};
pub use mesh::{BoundaryEdge, Mesh};
pub use polar_order::PolarAngleOrder;
pub use triangle::{PositionInTriangle, Triangle};

pub(crate) use repair_queue::RepairQueue;
