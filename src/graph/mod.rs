pub mod collide;

use slotmap::SecondaryMap;

use crate::geometry::disk::{Disk, DiskId, DiskSet};
use crate::geometry::tangent::{bitangents, TangentSegment};

pub use collide::{tangent_blocked, Obstacle};

/// Directed multigraph of collision-free bitangents between disk pairs.
///
/// Nodes are disks (copied out of the building [`DiskSet`], keyed by the
/// same IDs); edges are tangent segments. Adjacency is precomputed per
/// disk as outgoing edge indices, so the path search never scans the
/// full edge list.
#[derive(Debug, Clone, Default)]
pub struct ContactGraph {
    disks: SecondaryMap<DiskId, Disk>,
    edges: Vec<TangentSegment>,
    outgoing: SecondaryMap<DiskId, Vec<usize>>,
}

impl ContactGraph {
    /// Builds the contact graph for a disk set.
    ///
    /// Every ordered disk pair contributes its bitangents; with
    /// `check_collisions` set, each candidate is filtered against every
    /// third disk and every obstacle segment. Sentinel edges from nested
    /// pairs are kept unconditionally. O(n^3) in the disk count, which
    /// stays small in this domain.
    #[must_use]
    pub fn build(set: &DiskSet, check_collisions: bool, obstacles: &[Obstacle]) -> Self {
        let mut graph = Self::default();

        for (id, disk) in set.iter() {
            graph.disks.insert(id, *disk);
            graph.outgoing.insert(id, Vec::new());
        }

        let ids: Vec<DiskId> = set.iter().map(|(id, _)| id).collect();
        for &a_id in &ids {
            for &b_id in &ids {
                if a_id == b_id {
                    continue;
                }
                let (Some(a), Some(b)) = (set.get(a_id), set.get(b_id)) else {
                    continue;
                };
                for candidate in bitangents(a_id, a, b_id, b) {
                    if check_collisions && tangent_blocked(&candidate, set, obstacles, &[]) {
                        continue;
                    }
                    let index = graph.edges.len();
                    graph.edges.push(candidate);
                    if let Some(adj) = graph.outgoing.get_mut(a_id) {
                        adj.push(index);
                    }
                }
            }
        }

        graph
    }

    /// Returns the disk for an ID, if it is a node of this graph.
    #[must_use]
    pub fn disk(&self, id: DiskId) -> Option<&Disk> {
        self.disks.get(id)
    }

    /// All edges, in construction order.
    #[must_use]
    pub fn edges(&self) -> &[TangentSegment] {
        &self.edges
    }

    /// Edge by index.
    ///
    /// # Panics
    ///
    /// Panics if `index` is not a valid edge index of this graph.
    #[must_use]
    pub fn edge(&self, index: usize) -> &TangentSegment {
        &self.edges[index]
    }

    /// Outgoing edge indices of a disk.
    #[must_use]
    pub fn outgoing(&self, id: DiskId) -> &[usize] {
        self.outgoing.get(id).map_or(&[], Vec::as_slice)
    }

    /// Number of disks in the graph.
    #[must_use]
    pub fn disk_count(&self) -> usize {
        self.disks.len()
    }
}
