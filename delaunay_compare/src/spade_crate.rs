use spade::Triangulation;

type SpadePoint = spade::Point2<f64>;

#[derive(Default)]
pub struct SpadeCrate {
    vertices: Vec<SpadePoint>,
}

impl crate::DelaunayCrate for SpadeCrate {
    type ResultType = spade::DelaunayTriangulation<SpadePoint>;

    fn init(&mut self, vertices: impl Iterator<Item = [f64; 2]>) {
        self.vertices = vertices.map(|vertex| vertex.into()).collect()
    }

    fn run_creation(&self) -> Self::ResultType {
        let mut result = Self::ResultType::new();
        for vertex in &self.vertices {
            result.insert(*vertex).unwrap();
        }
        result
    }
}
