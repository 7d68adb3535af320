use hashbrown::{HashMap, HashSet};
use smallvec::SmallVec;
use tracing::{debug, trace};

use super::handles::{FixedTriangleHandle, FixedVertexHandle, Neighbor};
use super::mesh::{BoundaryEdge, Mesh};
use super::polar_order::PolarAngleOrder;
use super::repair_queue::RepairQueue;
use crate::{Kernel, LineSide, Point2};

/// Summary of a single [remove_super_vertex] call.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct VertexRemoval {
    /// Number of deleted triangles.
    pub removed: usize,
    /// Number of surviving triangles that lost a neighbor.
    pub hurt: usize,
    /// Number of triangles created to close concavities.
    pub filled: usize,
}

/// Deletes all triangles that contain `corner` and closes concavities left behind.
///
/// The vertices that shared a triangle with `corner` form a chain around it. Walking that chain,
/// every chain vertex that lies further away from `corner` than the segment connecting its chain
/// neighbors gets cut off by a new triangle, until the chain is convex as seen from `corner`.
///
/// All surviving triangles next to the deleted region and all new triangles are queued for flip
/// repair. `corner` must be a vertex of the convex hull.
pub fn remove_super_vertex<K: Kernel>(
    mesh: &mut Mesh,
    corner: FixedVertexHandle,
    queue: &mut RepairQueue,
) -> VertexRemoval {
    let star: Vec<_> = mesh
        .fixed_triangles()
        .filter(|handle| mesh.triangle(*handle).contains_vertex(corner))
        .collect();
    let in_star: HashSet<_> = star.iter().copied().collect();

    let mut hurt = Vec::new();
    let mut hurt_set = HashSet::new();
    let mut freed = HashSet::new();

    for &handle in &star {
        let triangle = mesh.delete_triangle(handle);
        freed.extend(triangle.vertices().into_iter().filter(|v| *v != corner));

        for neighbor in triangle.neighbors() {
            if in_star.contains(&neighbor) {
                continue;
            }
            let detached = mesh
                .triangle_mut(neighbor)
                .replace_neighbor(handle, Neighbor::Detached);
            assert!(detached, "Adjacency is not mutual. This is a bug.");
            if hurt_set.insert(neighbor) {
                hurt.push(neighbor);
            }
        }
    }

    let num_hurt = hurt.len();
    let mut chain: Vec<_> = freed.into_iter().collect();
    chain.sort_unstable();
    PolarAngleOrder::new(mesh.vertex(corner)).sort_open(&mut chain, |v| mesh.vertex(*v));

    let filled = fill_chain::<K>(mesh, &mut chain, &mut hurt);

    for &handle in &hurt {
        let triangle = mesh.triangle_mut(handle);
        for slot in 0..3 {
            if triangle.neighbor(slot) == Neighbor::Detached {
                triangle.set_neighbor(slot, Neighbor::Boundary);
            }
        }
    }
    queue.extend(hurt.iter().copied());

    let result = VertexRemoval {
        removed: star.len(),
        hurt: num_hurt,
        filled,
    };
    debug!(
        corner = corner.index(),
        removed = result.removed,
        hurt = result.hurt,
        filled = result.filled,
        "removed super vertex"
    );
    result
}

/// Cuts off chain vertices that bend away from the removed corner.
///
/// `chain` must be sorted counterclockwise around the corner. Every new triangle is linked to
/// the triangles in `owners` that share one of its edges and then becomes an owner itself.
fn fill_chain<K: Kernel>(
    mesh: &mut Mesh,
    chain: &mut Vec<FixedVertexHandle>,
    owners: &mut Vec<FixedTriangleHandle>,
) -> usize {
    let mut filled = 0;
    let mut i = 0;
    while i + 2 < chain.len() {
        let (a, b, c) = (chain[i], chain[i + 1], chain[i + 2]);
        if K::side_query(mesh.vertex(a), mesh.vertex(c), mesh.vertex(b)) == LineSide::Right {
            // Edges: a -> c (slot 2), c -> b (slot 0), b -> a (slot 1)
            let new = mesh.push_triangle([a, c, b], [Neighbor::Detached; 3]);
            link_to_owner(mesh, owners, b, c, new, 0);
            link_to_owner(mesh, owners, a, b, new, 1);
            owners.push(new);
            chain.remove(i + 1);
            filled += 1;
            i = i.saturating_sub(1);
        } else {
            i += 1;
        }
    }
    filled
}

fn link_to_owner(
    mesh: &mut Mesh,
    owners: &[FixedTriangleHandle],
    from: FixedVertexHandle,
    to: FixedVertexHandle,
    new: FixedTriangleHandle,
    slot: usize,
) {
    let owner = owners.iter().find_map(|&handle| {
        mesh.triangle(handle)
            .edge_index_of(from, to)
            .map(|index| (handle, index))
    });

    let neighbor = match owner {
        Some((handle, index)) => {
            debug_assert_eq!(mesh.triangle(handle).neighbor(index), Neighbor::Detached);
            mesh.triangle_mut(handle)
                .set_neighbor(index, Neighbor::Triangle(new));
            Neighbor::Triangle(handle)
        }
        None => Neighbor::Boundary,
    };
    mesh.triangle_mut(new).set_neighbor(slot, neighbor);
}

/// Collects the hull edges of a mesh into closed loops.
///
/// Each loop is ordered clockwise: every edge ends where the next one starts.
pub fn boundary_loops(mesh: &Mesh) -> Vec<Vec<BoundaryEdge>> {
    let edges = mesh.boundary_edges();
    let mut outgoing: HashMap<FixedVertexHandle, SmallVec<[usize; 2]>> = HashMap::new();
    for (index, edge) in edges.iter().enumerate() {
        outgoing.entry(edge.from).or_default().push(index);
    }

    let mut used = vec![false; edges.len()];
    let mut loops = Vec::new();
    for start in 0..edges.len() {
        if used[start] {
            continue;
        }

        let mut current = start;
        let mut hull = Vec::new();
        loop {
            used[current] = true;
            hull.push(edges[current]);
            let next = outgoing
                .get(&edges[current].to)
                .and_then(|candidates| candidates.iter().copied().find(|index| !used[*index]));
            match next {
                Some(next) => current = next,
                None => break,
            }
        }
        loops.push(hull);
    }
    loops
}

fn contains_point<K: Kernel>(corners: [Point2<f64>; 3], point: Point2<f64>) -> bool {
    (0..3).all(|i| !K::side_query(corners[i], corners[(i + 1) % 3], point).is_on_left_side())
}

/// Fills reflex hull vertices with new triangles until the hull is convex.
///
/// With exact orientation tests, [remove_super_vertex] already leaves a convex hull behind. An
/// inexact kernel can misjudge nearly collinear chain vertices and leave dents, which are closed
/// here. Returns the number of created triangles, which are queued for flip repair together with
/// their neighbors.
pub fn seal_hull<K: Kernel>(mesh: &mut Mesh, queue: &mut RepairQueue) -> usize {
    boundary_loops(mesh)
        .into_iter()
        .map(|mut hull| seal_loop::<K>(mesh, &mut hull, queue))
        .sum()
}

fn seal_loop<K: Kernel>(
    mesh: &mut Mesh,
    hull: &mut Vec<BoundaryEdge>,
    queue: &mut RepairQueue,
) -> usize {
    let mut filled = 0;
    let mut i = 0;
    let mut unchanged = 0;
    while hull.len() > 3 && unchanged < hull.len() {
        let j = (i + 1) % hull.len();
        let (incoming, outgoing) = (hull[i], hull[j]);
        let (u, v, w) = (incoming.from, incoming.to, outgoing.to);
        let corners = [mesh.vertex(u), mesh.vertex(w), mesh.vertex(v)];

        let is_reflex = incoming.to == outgoing.from
            && K::side_query(corners[0], corners[2], corners[1]) == LineSide::Left;
        let is_empty = || {
            hull.iter()
                .map(|edge| edge.from)
                .filter(|vertex| ![u, v, w].contains(vertex))
                .all(|vertex| !contains_point::<K>(corners, mesh.vertex(vertex)))
        };

        if is_reflex && is_empty() {
            // Edges: u -> w (slot 2), w -> v (slot 0), v -> u (slot 1)
            let new = mesh.push_triangle(
                [u, w, v],
                [
                    Neighbor::Triangle(outgoing.triangle),
                    Neighbor::Triangle(incoming.triangle),
                    Neighbor::Boundary,
                ],
            );
            mesh.triangle_mut(outgoing.triangle)
                .set_neighbor(outgoing.slot, Neighbor::Triangle(new));
            mesh.triangle_mut(incoming.triangle)
                .set_neighbor(incoming.slot, Neighbor::Triangle(new));
            queue.extend([new, incoming.triangle, outgoing.triangle]);
            filled += 1;

            hull[i] = BoundaryEdge {
                from: u,
                to: w,
                triangle: new,
                slot: 2,
            };
            hull.remove(j);
            if j == 0 {
                i -= 1;
            }
            i = (i + hull.len() - 1) % hull.len();
            unchanged = 0;
        } else {
            i = (i + 1) % hull.len();
            unchanged += 1;
        }
    }

    if filled > 0 {
        trace!(filled, "sealed hull");
    }
    filled
}
