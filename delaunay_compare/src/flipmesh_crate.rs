use flipmesh::{Kernel, PointLocator, Triangulator};

type FlipmeshPoint = flipmesh::Point2<f64>;

pub struct FlipmeshCrateWithConfiguration<K, L> {
    vertices: Vec<FlipmeshPoint>,
    triangulator: Triangulator<K, L>,
}

impl<K, L> Default for FlipmeshCrateWithConfiguration<K, L> {
    fn default() -> Self {
        Self {
            vertices: Vec::new(),
            triangulator: Triangulator::new(),
        }
    }
}

/// The configuration used by [flipmesh::triangulate]. Point location is a linear scan, so
/// creation takes quadratic time.
pub type FlipmeshCrateDefault =
    FlipmeshCrateWithConfiguration<flipmesh::TrivialKernel, flipmesh::LinearScanLocator>;
pub type FlipmeshCrate =
    FlipmeshCrateWithConfiguration<flipmesh::TrivialKernel, flipmesh::LastUsedTriangleLocator>;
pub type FlipmeshCrateExact =
    FlipmeshCrateWithConfiguration<flipmesh::FloatKernel, flipmesh::LastUsedTriangleLocator>;

impl<K: Kernel, L: PointLocator> crate::DelaunayCrate for FlipmeshCrateWithConfiguration<K, L> {
    type ResultType = flipmesh::Triangulation;

    fn init(&mut self, vertices: impl Iterator<Item = [f64; 2]>) {
        self.vertices = vertices.map(|vertex| vertex.into()).collect();
        self.triangulator = Triangulator::with_capacity(self.vertices.len());
    }

    fn run_creation(&self) -> Self::ResultType {
        self.triangulator.triangulate(&self.vertices).unwrap()
    }
}
