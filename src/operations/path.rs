//! Minimum-length envelope paths through a disk visiting sequence.
//!
//! # Algorithm
//!
//! 1. **Leg search**: between consecutive disks of the sequence, a
//!    Dijkstra search runs over graph edges. A search state is an edge
//!    (the edge's end angle is the arrival angle at its end disk);
//!    stepping from one edge to the next prices the connecting boundary
//!    arc by the chirality sweep convention plus the next tangent's
//!    length. Chirality labels must agree at every junction, so a leg
//!    can only arrive at its target in the requested turning sense.
//! 2. **Fixed mode**: the per-disk chirality is given; legs are chained
//!    directly, threading each leg's arrival angle into the next. If a
//!    leg is unreachable, the finder falls back to automatic mode.
//! 3. **Automatic mode**: a dynamic program over sequence positions with
//!    two states per disk (CCW/CW); each of the four transitions per
//!    step reuses the leg search. The cheaper terminal state is
//!    backtracked into a chirality assignment and the concatenated path.
//!
//! A cyclic sequence (first id equals last id) gets a closing arc from
//! the final tangent's arrival angle back to the first tangent's
//! departure angle. The first and last position are one junction, so
//! their chirality must agree: fixed mode rejects a flipping seam, and
//! automatic mode pins both ends of the DP to the same state.
//!
//! No-solution cases (fewer than two disks, ids missing from the graph,
//! disconnected topology) return an empty [`EnvelopePath`].

use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap};

use crate::geometry::disk::DiskId;
use crate::geometry::envelope::{ArcSegment, Chirality, EnvelopePath, EnvelopeSegment};
use crate::graph::ContactGraph;

const STATES: [Chirality; 2] = [Chirality::Ccw, Chirality::Cw];

/// Shortest-envelope-path finder over a contact graph.
#[derive(Debug)]
pub struct EnvelopePathFinder<'a> {
    graph: &'a ContactGraph,
}

/// One solved leg between consecutive sequence disks.
struct Leg {
    segments: Vec<EnvelopeSegment>,
    cost: f64,
    /// Polar angle of the arrival point on the target disk, if the leg
    /// carries any tangent (an empty leg leaves it unchanged).
    arrival_angle: Option<f64>,
}

/// Min-heap entry keyed by accumulated cost.
struct QueueEntry {
    cost: f64,
    edge: usize,
}

impl PartialEq for QueueEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cost.total_cmp(&other.cost).is_eq() && self.edge == other.edge
    }
}
impl Eq for QueueEntry {}
impl PartialOrd for QueueEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
impl Ord for QueueEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed: BinaryHeap is a max-heap, we want the cheapest first.
        other
            .cost
            .total_cmp(&self.cost)
            .then_with(|| other.edge.cmp(&self.edge))
    }
}

impl<'a> EnvelopePathFinder<'a> {
    /// Creates a finder over a built contact graph.
    #[must_use]
    pub fn new(graph: &'a ContactGraph) -> Self {
        Self { graph }
    }

    /// Finds the minimum-length envelope path visiting `sequence`.
    ///
    /// With `fixed` chiralities (one per sequence position) the topology
    /// is pinned; otherwise — and whenever the pinned topology is
    /// unreachable — all chirality assignments are searched.
    #[must_use]
    pub fn find_path(
        &self,
        sequence: &[DiskId],
        fixed: Option<&[Chirality]>,
    ) -> EnvelopePath {
        if sequence.len() < 2 {
            return EnvelopePath::empty();
        }
        if sequence.iter().any(|&id| self.graph.disk(id).is_none()) {
            return EnvelopePath::empty();
        }

        if let Some(chiralities) = fixed {
            if chiralities.len() == sequence.len() {
                if let Some(path) = self.fixed_topology(sequence, chiralities) {
                    return path;
                }
                tracing::debug!("fixed topology unreachable, falling back to automatic mode");
            }
        }

        self.automatic(sequence)
    }

    /// Chains legs under a pinned chirality per disk.
    fn fixed_topology(
        &self,
        sequence: &[DiskId],
        chiralities: &[Chirality],
    ) -> Option<EnvelopePath> {
        // A cyclic sequence shares its first and last position; the
        // turning sense cannot flip at the closing junction.
        if sequence.first() == sequence.last() && chiralities.first() != chiralities.last() {
            return None;
        }

        let mut segments = Vec::new();
        let mut arrival: Option<f64> = None;

        for i in 0..sequence.len() - 1 {
            let (u, v) = (sequence[i], sequence[i + 1]);
            let (cu, cv) = (chiralities[i], chiralities[i + 1]);
            if u == v {
                // Adjacent duplicate: zero-cost stay, but the turning
                // sense cannot flip in place.
                if cu != cv {
                    return None;
                }
                continue;
            }
            let leg = self.shortest_leg(u, cu, arrival, v, cv)?;
            segments.extend(leg.segments);
            arrival = leg.arrival_angle.or(arrival);
        }

        Some(self.assemble(sequence, chiralities.to_vec(), segments))
    }

    /// Viterbi-style dynamic program over two chirality states per disk.
    ///
    /// A cyclic sequence shares its first and last position, so both must
    /// resolve to the same turning sense: the DP runs once per pinned
    /// seam state and the cheaper consistent cycle wins.
    fn automatic(&self, sequence: &[DiskId]) -> EnvelopePath {
        let cyclic = sequence.first() == sequence.last();
        let solved = if cyclic {
            let ccw = self.solve_chiralities(sequence, Some(0));
            let cw = self.solve_chiralities(sequence, Some(1));
            match (ccw, cw) {
                (Some(a), Some(b)) => Some(if a.0 <= b.0 { a } else { b }),
                (a, b) => a.or(b),
            }
        } else {
            self.solve_chiralities(sequence, None)
        };

        let Some((_, chiralities, segments)) = solved else {
            return EnvelopePath::empty();
        };
        if segments.is_empty() {
            return EnvelopePath::empty();
        }
        self.assemble(sequence, chiralities, segments)
    }

    /// One DP pass. With `seam` set, both the first and the last position
    /// are pinned to that state index.
    fn solve_chiralities(
        &self,
        sequence: &[DiskId],
        seam: Option<usize>,
    ) -> Option<(f64, Vec<Chirality>, Vec<EnvelopeSegment>)> {
        #[derive(Clone)]
        struct Node {
            cost: f64,
            arrival: Option<f64>,
            prev_state: usize,
            leg: Vec<EnvelopeSegment>,
        }

        let n = sequence.len();
        let mut dp: Vec<[Option<Node>; 2]> = vec![[None, None]; n];
        for state in 0..2 {
            if seam.is_none_or(|s| s == state) {
                dp[0][state] = Some(Node {
                    cost: 0.0,
                    arrival: None,
                    prev_state: 0,
                    leg: Vec::new(),
                });
            }
        }

        for i in 0..n - 1 {
            for (s, &cu) in STATES.iter().enumerate() {
                let Some(node) = dp[i][s].clone() else {
                    continue;
                };
                for (s2, &cv) in STATES.iter().enumerate() {
                    let leg = if sequence[i] == sequence[i + 1] {
                        (s == s2).then(|| Leg {
                            segments: Vec::new(),
                            cost: 0.0,
                            arrival_angle: node.arrival,
                        })
                    } else {
                        self.shortest_leg(sequence[i], cu, node.arrival, sequence[i + 1], cv)
                    };
                    let Some(leg) = leg else { continue };
                    let cost = node.cost + leg.cost;
                    let better = dp[i + 1][s2]
                        .as_ref()
                        .is_none_or(|existing| cost < existing.cost);
                    if better {
                        dp[i + 1][s2] = Some(Node {
                            cost,
                            arrival: leg.arrival_angle.or(node.arrival),
                            prev_state: s,
                            leg: leg.segments,
                        });
                    }
                }
            }
        }

        // Backtrack from the cheaper (or pinned) terminal state.
        let terminal = match seam {
            Some(s) => s,
            None => match (&dp[n - 1][0], &dp[n - 1][1]) {
                (Some(a), Some(b)) => {
                    if a.cost <= b.cost {
                        0
                    } else {
                        1
                    }
                }
                (Some(_), None) => 0,
                (None, Some(_)) => 1,
                (None, None) => return None,
            },
        };
        let total = dp[n - 1][terminal].as_ref()?.cost;

        let mut chiralities = vec![Chirality::Ccw; n];
        let mut legs: Vec<Vec<EnvelopeSegment>> = Vec::with_capacity(n - 1);
        let mut state = terminal;
        for i in (1..n).rev() {
            let node = dp[i][state].clone()?;
            chiralities[i] = STATES[state];
            legs.push(node.leg);
            state = node.prev_state;
        }
        chiralities[0] = STATES[state];
        legs.reverse();

        let segments: Vec<EnvelopeSegment> = legs.into_iter().flatten().collect();
        Some((total, chiralities, segments))
    }

    /// Dijkstra over edge states from `(from, from_chir)` to `(to, to_chir)`.
    ///
    /// The cost of entering an edge accumulates the boundary arc from the
    /// previous arrival angle to the edge's departure angle (in the
    /// chirality's direction) plus the edge length. The first popped edge
    /// arriving at the target in the requested sense is optimal.
    fn shortest_leg(
        &self,
        from: DiskId,
        from_chir: Chirality,
        arrival_angle: Option<f64>,
        to: DiskId,
        to_chir: Chirality,
    ) -> Option<Leg> {
        let mut best: HashMap<usize, f64> = HashMap::new();
        let mut prev: HashMap<usize, usize> = HashMap::new();
        let mut heap: BinaryHeap<QueueEntry> = BinaryHeap::new();

        let from_disk = self.graph.disk(from)?;
        for &e in self.graph.outgoing(from) {
            let edge = self.graph.edge(e);
            if edge.kind().start_chirality() != from_chir {
                continue;
            }
            let entry_arc = arrival_angle.map_or(0.0, |a_in| {
                ArcSegment::new(from, from_disk, a_in, edge.start_angle(), from_chir).length()
            });
            let cost = entry_arc + edge.length();
            if !cost.is_finite() {
                continue;
            }
            if best.get(&e).is_none_or(|&c| cost < c) {
                best.insert(e, cost);
                heap.push(QueueEntry { cost, edge: e });
            }
        }

        while let Some(QueueEntry { cost, edge: e }) = heap.pop() {
            if best.get(&e).is_some_and(|&c| cost > c) {
                continue;
            }
            let edge = self.graph.edge(e);
            if edge.end_disk() == to && edge.kind().end_chirality() == to_chir {
                return self.reconstruct_leg(from, from_chir, arrival_angle, e, cost, &prev);
            }

            let junction = edge.end_disk();
            let chir = edge.kind().end_chirality();
            let Some(junction_disk) = self.graph.disk(junction) else {
                continue;
            };
            for &f in self.graph.outgoing(junction) {
                let next = self.graph.edge(f);
                if next.kind().start_chirality() != chir {
                    continue;
                }
                let arc =
                    ArcSegment::new(junction, junction_disk, edge.end_angle(), next.start_angle(), chir)
                        .length();
                let next_cost = cost + arc + next.length();
                if !next_cost.is_finite() {
                    continue;
                }
                if best.get(&f).is_none_or(|&c| next_cost < c) {
                    best.insert(f, next_cost);
                    prev.insert(f, e);
                    heap.push(QueueEntry {
                        cost: next_cost,
                        edge: f,
                    });
                }
            }
        }

        None
    }

    /// Rebuilds the segment list of a settled leg from the predecessor map.
    fn reconstruct_leg(
        &self,
        from: DiskId,
        from_chir: Chirality,
        arrival_angle: Option<f64>,
        last_edge: usize,
        cost: f64,
        prev: &HashMap<usize, usize>,
    ) -> Option<Leg> {
        let mut chain = vec![last_edge];
        let mut cursor = last_edge;
        while let Some(&p) = prev.get(&cursor) {
            chain.push(p);
            cursor = p;
        }
        chain.reverse();

        let mut segments = Vec::with_capacity(chain.len() * 2);
        for (i, &e) in chain.iter().enumerate() {
            let edge = self.graph.edge(e);
            if i == 0 {
                if let Some(a_in) = arrival_angle {
                    let disk = self.graph.disk(from)?;
                    segments.push(EnvelopeSegment::Arc(ArcSegment::new(
                        from,
                        disk,
                        a_in,
                        edge.start_angle(),
                        from_chir,
                    )));
                }
            } else {
                let previous = self.graph.edge(chain[i - 1]);
                let junction = previous.end_disk();
                let chir = previous.kind().end_chirality();
                let disk = self.graph.disk(junction)?;
                segments.push(EnvelopeSegment::Arc(ArcSegment::new(
                    junction,
                    disk,
                    previous.end_angle(),
                    edge.start_angle(),
                    chir,
                )));
            }
            segments.push(EnvelopeSegment::Tangent(*edge));
        }

        let arrival = self.graph.edge(last_edge).end_angle();
        Some(Leg {
            segments,
            cost,
            arrival_angle: Some(arrival),
        })
    }

    /// Applies the cycle closing arc and totals the path.
    fn assemble(
        &self,
        sequence: &[DiskId],
        chiralities: Vec<Chirality>,
        mut segments: Vec<EnvelopeSegment>,
    ) -> EnvelopePath {
        let closed = sequence.first() == sequence.last();
        if closed && !segments.is_empty() {
            let ends_in_arc = matches!(segments.last(), Some(EnvelopeSegment::Arc(_)));
            if !ends_in_arc {
                let first_tangent = segments.iter().find_map(|s| match s {
                    EnvelopeSegment::Tangent(t) => Some(*t),
                    EnvelopeSegment::Arc(_) => None,
                });
                let last_tangent = segments.iter().rev().find_map(|s| match s {
                    EnvelopeSegment::Tangent(t) => Some(*t),
                    EnvelopeSegment::Arc(_) => None,
                });
                if let (Some(first), Some(last)) = (first_tangent, last_tangent) {
                    let home = last.end_disk();
                    let chir = chiralities.last().copied().unwrap_or(Chirality::Ccw);
                    if let Some(disk) = self.graph.disk(home) {
                        segments.push(EnvelopeSegment::Arc(ArcSegment::new(
                            home,
                            disk,
                            last.end_angle(),
                            first.start_angle(),
                            chir,
                        )));
                    }
                }
            }
        }

        let total_length = segments.iter().map(EnvelopeSegment::length).sum();
        EnvelopePath {
            segments,
            chiralities,
            total_length,
        }
    }
}
