use smallvec::SmallVec;

use super::handles::{FixedTriangleHandle, FixedVertexHandle, Neighbor};
use super::mesh::Mesh;
use super::triangle::{ccw, cw};

/// Triangles whose circumcircle condition may have been invalidated by an operation.
pub type Affected = SmallVec<[FixedTriangleHandle; 8]>;

fn push_neighbors(result: &mut Affected, neighbors: &[Neighbor]) {
    result.extend(neighbors.iter().filter_map(|n| n.triangle()));
}

/// Splits a triangle into three triangles sharing the new vertex `v`.
///
/// `v` must lie strictly inside of `t`.
pub fn insert_into_triangle(
    mesh: &mut Mesh,
    v: FixedVertexHandle,
    t: FixedTriangleHandle,
) -> Affected {
    // All triangles are oriented clockwise
    //
    // Original triangle:
    //        v1
    //       /  \
    //   t2 /    \ t0
    //     /  t   \
    //    v0 ---- v2
    //        t1
    //
    // With v inserted:
    //        v1
    //       / | \
    //      /  |  \
    //     / t v a \
    //    /  /   \  \
    //   / /   b   \ \
    //  v0 --------- v2
    let triangle = mesh.triangle(t);
    let [v0, v1, v2] = triangle.vertices();
    let [t0, t1, t2] = triangle.adjacent();

    let a = mesh.next_triangle_handle();
    let b = FixedTriangleHandle::new(a.index() + 1);

    mesh.update_triangle(
        t,
        [v0, v1, v],
        [Neighbor::Triangle(a), Neighbor::Triangle(b), t2],
    );
    mesh.push_triangle(
        [v1, v2, v],
        [Neighbor::Triangle(b), Neighbor::Triangle(t), t0],
    );
    mesh.push_triangle(
        [v2, v0, v],
        [Neighbor::Triangle(t), Neighbor::Triangle(a), t1],
    );

    mesh.relink(t0, t, a);
    mesh.relink(t1, t, b);

    let mut result: Affected = SmallVec::new();
    result.extend([t, a, b]);
    push_neighbors(&mut result, &[t0, t1, t2]);
    result
}

/// Splits the edge opposite to vertex `edge` of triangle `t` and the triangle on the other
/// side of that edge into four triangles sharing the new vertex `p`.
///
/// `p` must lie on the edge. Panics if the edge is a hull edge.
pub fn split_edge(
    mesh: &mut Mesh,
    p: FixedVertexHandle,
    t: FixedTriangleHandle,
    edge: usize,
) -> Affected {
    // Before:                     After:
    //          a                           a
    //        /   \                      /  |  \
    //   n_ab/  t  \ n_ca          n_ab /   |   \ n_ca
    //      /       \                  / t1 | t2 \
    //     b ------- c                b --- p --- c
    //      \       /                  \ o2 | o1 /
    //   n_bd\  o  / n_dc          n_bd \   |   / n_dc
    //        \   /                      \  |  /
    //          d                           d
    let triangle = mesh.triangle(t);
    let a = triangle.vertex(edge);
    let b = triangle.vertex(ccw(edge));
    let c = triangle.vertex(cw(edge));
    let n_ab = triangle.neighbor(cw(edge));
    let n_ca = triangle.neighbor(ccw(edge));

    let o = triangle
        .neighbor(edge)
        .triangle()
        .expect("Cannot split a hull edge. This is a bug.");

    let other = mesh.triangle(o);
    let j = other
        .index_of_neighbor(t)
        .expect("Adjacency is not mutual. This is a bug.");
    let d = other.vertex(j);
    debug_assert_eq!(other.vertex(ccw(j)), c);
    debug_assert_eq!(other.vertex(cw(j)), b);
    let n_dc = other.neighbor(cw(j));
    let n_bd = other.neighbor(ccw(j));

    let t2 = mesh.next_triangle_handle();
    let o2 = FixedTriangleHandle::new(t2.index() + 1);
    let (t1, o1) = (t, o);

    mesh.update_triangle(
        t1,
        [a, b, p],
        [Neighbor::Triangle(o2), Neighbor::Triangle(t2), n_ab],
    );
    mesh.push_triangle(
        [a, p, c],
        [Neighbor::Triangle(o1), n_ca, Neighbor::Triangle(t1)],
    );
    mesh.update_triangle(
        o1,
        [d, c, p],
        [Neighbor::Triangle(t2), Neighbor::Triangle(o2), n_dc],
    );
    mesh.push_triangle(
        [d, p, b],
        [Neighbor::Triangle(t1), n_bd, Neighbor::Triangle(o1)],
    );

    mesh.relink(n_ca, t, t2);
    mesh.relink(n_bd, o, o2);

    let mut result: Affected = SmallVec::new();
    result.extend([t1, t2, o1, o2]);
    push_neighbors(&mut result, &[n_ab, n_ca, n_dc, n_bd]);
    result
}

/// Replaces the edge shared by `t` and `o` with the other diagonal of their quadrilateral.
///
/// Returns `None` if the triangles are not adjacent. Otherwise, returns both triangles and
/// their outer neighbors.
///
/// The quadrilateral must be strictly convex.
pub fn flip(mesh: &mut Mesh, t: FixedTriangleHandle, o: FixedTriangleHandle) -> Option<Affected> {
    // Before:                  After:
    //        v0                       v0
    //      /    \                   /  |  \
    //  n20/  t   \n03           n20/   |   \n03
    //    /        \               /    |    \
    //  v2 -------- v3           v2  t  |  o  v3
    //    \        /               \    |    /
    //  n12\  o   /n31           n12\   |   /n31
    //      \    /                   \  |  /
    //        v1                       v1
    let triangle = mesh.triangle(t);
    let k = triangle.index_of_neighbor(o)?;
    let v0 = triangle.vertex(k);
    let v3 = triangle.vertex(ccw(k));
    let v2 = triangle.vertex(cw(k));
    let n03 = triangle.neighbor(cw(k));
    let n20 = triangle.neighbor(ccw(k));

    let other = mesh.triangle(o);
    let m = other
        .index_of_neighbor(t)
        .expect("Adjacency is not mutual. This is a bug.");
    let v1 = other.vertex(m);
    debug_assert_eq!(other.vertex(ccw(m)), v2);
    debug_assert_eq!(other.vertex(cw(m)), v3);
    let n12 = other.neighbor(cw(m));
    let n31 = other.neighbor(ccw(m));

    mesh.update_triangle(t, [v0, v1, v2], [n12, n20, Neighbor::Triangle(o)]);
    mesh.update_triangle(o, [v1, v0, v3], [n03, n31, Neighbor::Triangle(t)]);

    mesh.relink(n12, o, t);
    mesh.relink(n03, t, o);

    let mut result: Affected = SmallVec::new();
    result.extend([t, o]);
    push_neighbors(&mut result, &[n12, n20, n03, n31]);
    Some(result)
}

#[cfg(test)]
mod test {
    use super::{flip, insert_into_triangle, split_edge};
    use crate::delaunay_core::{Mesh, PositionInTriangle};
    use crate::handles::{FixedTriangleHandle, FixedVertexHandle, Neighbor};
    use crate::Point2;
    use approx::assert_relative_eq;

    fn single_triangle() -> Mesh {
        let mut mesh = Mesh::with_capacity(4);
        let v0 = mesh.add_vertex(Point2::new(0.0, 0.0));
        let v1 = mesh.add_vertex(Point2::new(0.0, 4.0));
        let v2 = mesh.add_vertex(Point2::new(4.0, 0.0));
        mesh.push_triangle([v0, v1, v2], [Neighbor::Boundary; 3]);
        mesh
    }

    fn unit_square() -> Mesh {
        //  v1 ---- v2
        //   | t0 / |
        //   |  /   |
        //   | / t1 |
        //  v0 ---- v3
        let mut mesh = Mesh::with_capacity(5);
        let v0 = mesh.add_vertex(Point2::new(0.0, 0.0));
        let v1 = mesh.add_vertex(Point2::new(0.0, 1.0));
        let v2 = mesh.add_vertex(Point2::new(1.0, 1.0));
        let v3 = mesh.add_vertex(Point2::new(1.0, 0.0));
        mesh.push_triangle(
            [v0, v1, v2],
            [
                Neighbor::Boundary,
                Neighbor::Triangle(FixedTriangleHandle::new(1)),
                Neighbor::Boundary,
            ],
        );
        mesh.push_triangle(
            [v0, v2, v3],
            [
                Neighbor::Boundary,
                Neighbor::Boundary,
                Neighbor::Triangle(FixedTriangleHandle::new(0)),
            ],
        );
        mesh
    }

    /// The unit square stays covered and keeps its four corners.
    fn check_quadrilateral(mesh: &Mesh) {
        let area: f64 = mesh.triangles().map(|t| t.area()).sum();
        assert_relative_eq!(area, 1.0);

        let mut corners: Vec<_> = mesh
            .triangles()
            .flat_map(|t| t.vertices())
            .map(|v| v.index())
            .collect();
        corners.sort_unstable();
        corners.dedup();
        assert_eq!(corners, vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_insert_into_triangle() {
        let mut mesh = single_triangle();
        let v = mesh.add_vertex(Point2::new(1.0, 1.0));
        let affected = insert_into_triangle(&mut mesh, v, FixedTriangleHandle::new(0));
        assert_eq!(affected.len(), 3);
        assert_eq!(mesh.num_triangles(), 3);
        mesh.sanity_check();
        assert!(mesh.triangles().all(|t| t.contains_vertex(v)));
        assert_eq!(mesh.boundary_edges().len(), 3);
    }

    #[test]
    fn test_insert_twice() {
        let mut mesh = single_triangle();
        let v = mesh.add_vertex(Point2::new(1.0, 1.0));
        insert_into_triangle(&mut mesh, v, FixedTriangleHandle::new(0));
        let w = mesh.add_vertex(Point2::new(0.5, 2.0));
        let target = mesh
            .fixed_triangles()
            .find(|h| mesh.triangle(*h).classify(Point2::new(0.5, 2.0)) == PositionInTriangle::Inside)
            .unwrap();
        let affected = insert_into_triangle(&mut mesh, w, target);
        // The new triangles and two inner neighbors
        assert_eq!(affected.len(), 5);
        assert_eq!(mesh.num_triangles(), 5);
        mesh.sanity_check();
    }

    #[test]
    fn test_split_edge() {
        let mut mesh = unit_square();
        let p = mesh.add_vertex(Point2::new(0.5, 0.5));
        let t0 = FixedTriangleHandle::new(0);
        // The diagonal (v2, v0) lies opposite to v1
        let affected = split_edge(&mut mesh, p, t0, 1);
        assert_eq!(affected.len(), 4);
        assert_eq!(mesh.num_triangles(), 4);
        mesh.sanity_check();
        assert!(mesh.triangles().all(|t| t.contains_vertex(p)));
        assert_eq!(mesh.boundary_edges().len(), 4);
    }

    #[test]
    #[should_panic]
    fn test_split_hull_edge() {
        let mut mesh = single_triangle();
        let p = mesh.add_vertex(Point2::new(0.0, 2.0));
        split_edge(&mut mesh, p, FixedTriangleHandle::new(0), 2);
    }

    #[test]
    fn test_flip() {
        let mut mesh = unit_square();
        let t0 = FixedTriangleHandle::new(0);
        let t1 = FixedTriangleHandle::new(1);
        let v = FixedVertexHandle::new;

        let affected = flip(&mut mesh, t0, t1).unwrap();
        assert_eq!(affected.as_slice(), &[t0, t1]);
        mesh.sanity_check();
        check_quadrilateral(&mesh);
        for t in mesh.triangles() {
            assert!(t.contains_vertex(v(1)));
            assert!(t.contains_vertex(v(3)));
        }

        flip(&mut mesh, t1, t0).unwrap();
        mesh.sanity_check();
        check_quadrilateral(&mesh);
        for t in mesh.triangles() {
            assert!(t.contains_vertex(v(0)));
            assert!(t.contains_vertex(v(2)));
        }
    }

    #[test]
    fn test_flip_with_outer_neighbors() {
        let mut mesh = unit_square();
        let p = mesh.add_vertex(Point2::new(0.25, 0.5));
        let affected = insert_into_triangle(&mut mesh, p, FixedTriangleHandle::new(0));
        mesh.sanity_check();
        // The inner triangle across the diagonal
        let across = mesh
            .fixed_triangles()
            .find(|h| {
                mesh.triangle(*h)
                    .neighbors()
                    .any(|n| n == FixedTriangleHandle::new(1))
            })
            .unwrap();
        assert!(affected.contains(&across));

        let result = flip(&mut mesh, across, FixedTriangleHandle::new(1)).unwrap();
        assert_eq!(result.len(), 4);
        mesh.sanity_check();
        assert_eq!(mesh.num_triangles(), 4);
    }

    #[test]
    fn test_flip_non_adjacent() {
        let mut mesh = single_triangle();
        let v = mesh.add_vertex(Point2::new(1.0, 1.0));
        insert_into_triangle(&mut mesh, v, FixedTriangleHandle::new(0));
        let other = mesh.add_vertex(Point2::new(10.0, 10.0));
        let lonely = mesh.push_triangle(
            [other, FixedVertexHandle::new(2), FixedVertexHandle::new(1)],
            [Neighbor::Boundary; 3],
        );
        assert!(flip(&mut mesh, FixedTriangleHandle::new(0), lonely).is_none());
    }
}
