use std::collections::VecDeque;

use hashbrown::HashSet;

use super::handles::FixedTriangleHandle;

/// FIFO queue of triangles whose circumcircle condition needs to be checked.
///
/// A triangle is contained at most once. It can be pushed again after it was popped.
#[derive(Debug, Default, Clone)]
pub struct RepairQueue {
    queue: VecDeque<FixedTriangleHandle>,
    queued: HashSet<FixedTriangleHandle>,
}

impl RepairQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `false` if the triangle is already queued.
    pub fn push(&mut self, handle: FixedTriangleHandle) -> bool {
        if self.queued.insert(handle) {
            self.queue.push_back(handle);
            true
        } else {
            false
        }
    }

    pub fn pop(&mut self) -> Option<FixedTriangleHandle> {
        let handle = self.queue.pop_front()?;
        self.queued.remove(&handle);
        Some(handle)
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}

impl Extend<FixedTriangleHandle> for RepairQueue {
    fn extend<I: IntoIterator<Item = FixedTriangleHandle>>(&mut self, iter: I) {
        for handle in iter {
            self.push(handle);
        }
    }
}
