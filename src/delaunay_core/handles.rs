use std::convert::TryInto;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Internal type definition that is only exposed for documentation purposes.
///
/// Use the type aliases [FixedVertexHandle] and [FixedTriangleHandle] instead.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde")
)]
pub struct FixedHandleImpl<Type> {
    index: u32,
    ty: Type,
}

impl<Type> std::fmt::Debug for FixedHandleImpl<Type> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FixedHandle")
            .field("index", &self.index)
            .finish()
    }
}

impl<Type: Default> FixedHandleImpl<Type> {
    pub(crate) fn new(index: usize) -> Self {
        Self {
            index: index
                .try_into()
                .expect("Index too big - at most 2^32 elements supported"),
            ty: Type::default(),
        }
    }

    /// Returns the index of the referenced element.
    ///
    /// Vertex indices equal the index of the vertex in the input of the triangulation.
    pub fn index(&self) -> usize {
        self.index as usize
    }
}

#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Debug, Default, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde")
)]
pub struct VertexTag;

#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Debug, Default, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde")
)]
pub struct TriangleTag;

/// Refers to a vertex of a triangulation.
pub type FixedVertexHandle = FixedHandleImpl<VertexTag>;

/// Refers to a triangle of a triangulation.
pub type FixedTriangleHandle = FixedHandleImpl<TriangleTag>;

/// The content of one adjacency slot of a [Triangle](crate::Triangle).
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde")
)]
pub enum Neighbor {
    /// The edge is shared with another triangle.
    Triangle(FixedTriangleHandle),
    /// The edge is part of the convex hull.
    Boundary,
    /// The neighbor was deleted and has not been replaced yet.
    ///
    /// Only observable while the super triangle is being removed.
    Detached,
}

impl Neighbor {
    /// Returns the neighboring triangle, if there is one.
    #[inline]
    pub fn triangle(self) -> Option<FixedTriangleHandle> {
        match self {
            Neighbor::Triangle(handle) => Some(handle),
            Neighbor::Boundary | Neighbor::Detached => None,
        }
    }

    /// Returns `true` if this slot refers to the given triangle.
    #[inline]
    pub fn is(self, handle: FixedTriangleHandle) -> bool {
        self == Neighbor::Triangle(handle)
    }
}

impl From<Option<FixedTriangleHandle>> for Neighbor {
    fn from(handle: Option<FixedTriangleHandle>) -> Self {
        handle.map(Neighbor::Triangle).unwrap_or(Neighbor::Boundary)
    }
}

#[cfg(test)]
mod test {
    use super::{FixedTriangleHandle, FixedVertexHandle, Neighbor};

    #[test]
    fn test_neighbor_triangle() {
        let handle = FixedTriangleHandle::new(7);
        assert_eq!(Neighbor::Triangle(handle).triangle(), Some(handle));
        assert_eq!(Neighbor::Boundary.triangle(), None);
        assert_eq!(Neighbor::Detached.triangle(), None);
        assert!(Neighbor::Triangle(handle).is(handle));
        assert!(!Neighbor::Triangle(handle).is(FixedTriangleHandle::new(8)));
        assert_eq!(Neighbor::from(None), Neighbor::Boundary);
    }

    #[test]
    fn test_handle_index() {
        assert_eq!(FixedVertexHandle::new(42).index(), 42);
        assert!(FixedVertexHandle::new(1) < FixedVertexHandle::new(2));
    }

    #[test]
    #[should_panic]
    fn test_index_overflow() {
        FixedTriangleHandle::new(u32::MAX as usize + 1);
    }
}
