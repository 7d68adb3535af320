use delaunator::Point;

/// Wraps the `delaunator` crate, a port of the sweep-hull based JavaScript library.
#[derive(Default)]
pub struct DelaunatorCrate {
    vertices: Vec<Point>,
}

impl crate::DelaunayCrate for DelaunatorCrate {
    type ResultType = delaunator::Triangulation;

    fn init(&mut self, vertices: impl Iterator<Item = [f64; 2]>) {
        self.vertices = vertices.map(|[x, y]| Point { x, y }).collect();
    }

    fn run_creation(&self) -> Self::ResultType {
        delaunator::triangulate(&self.vertices)
    }
}
