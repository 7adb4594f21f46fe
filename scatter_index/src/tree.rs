// Copyright 2025 the Scatter Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Region-subdividing conflict tree generic over the partition rule.
//!
//! Nodes live in a flat arena. A leaf holds its items directly; once a leaf grows
//! past [`TreeLimits::capacity`] it is split the next time an insertion reaches it.
//! Boxes that touch every child of a split node are kept once in that node's
//! spanning list instead of being copied into each child.

use alloc::vec::Vec;
use core::fmt::Debug;

use bitflags::Flags;

use crate::conflict::ConflictIndex;
use crate::partition::Partition;
use crate::types::{Aabb2D, Aabb3D};

/// Splitting limits for a [`RegionTree`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct TreeLimits {
    /// A leaf holding more items than this splits on the next insertion that reaches it.
    pub capacity: usize,
    /// Leaves at this depth never split.
    ///
    /// Many identical seeds would otherwise subdivide without bound.
    pub max_depth: u32,
}

impl Default for TreeLimits {
    fn default() -> Self {
        Self {
            capacity: 16,
            max_depth: 32,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
struct NodeIdx(usize);

impl NodeIdx {
    const ROOT: Self = Self(0);

    const fn new(i: usize) -> Self {
        Self(i)
    }

    const fn get(self) -> usize {
        self.0
    }
}

#[derive(Clone)]
enum NodeKind<R> {
    Leaf {
        items: Vec<R>,
    },
    Internal {
        spanning: Vec<R>,
        /// Children are stored contiguously, in partition order.
        first_child: NodeIdx,
    },
}

#[derive(Clone)]
struct Node<R> {
    region: R,
    depth: u32,
    kind: NodeKind<R>,
}

impl<R> Node<R> {
    fn leaf(region: R, depth: u32) -> Self {
        Self {
            region,
            depth,
            kind: NodeKind::Leaf { items: Vec::new() },
        }
    }
}

/// Where an accepted box gets stored.
#[derive(Copy, Clone, Debug)]
enum Target {
    Leaf(NodeIdx),
    Spanning(NodeIdx),
}

/// Insert-only conflict tree over regions of type `R`.
///
/// Use [`QuadTree`] for 2D and [`OcTree`] for 3D.
#[derive(Clone)]
pub struct RegionTree<R: Partition> {
    nodes: Vec<Node<R>>,
    limits: TreeLimits,
    len: usize,
    targets: Vec<Target>,
}

/// Conflict tree over 2D boxes, splitting into quadrants.
pub type QuadTree<T> = RegionTree<Aabb2D<T>>;

/// Conflict tree over 3D boxes, splitting into octants.
pub type OcTree<T> = RegionTree<Aabb3D<T>>;

impl<R: Partition> RegionTree<R> {
    /// Create an empty tree covering `region` with default limits.
    pub fn new(region: R) -> Self {
        Self::with_limits(region, TreeLimits::default())
    }

    /// Create an empty tree covering `region`.
    pub fn with_limits(region: R, limits: TreeLimits) -> Self {
        let mut nodes = Vec::new();
        nodes.push(Node::leaf(region, 0));
        Self {
            nodes,
            limits,
            len: 0,
            targets: Vec::new(),
        }
    }

    /// Create a tree seeded with already accepted boxes.
    ///
    /// Seeds are not checked against each other. Unlike insertion, seeding splits
    /// every overfull leaf right away.
    pub fn with_items(
        region: R,
        limits: TreeLimits,
        items: impl IntoIterator<Item = R>,
    ) -> Self {
        let mut tree = Self::with_limits(region, limits);
        let seeds: Vec<R> = items.into_iter().collect();
        tree.len = seeds.len();
        tree.nodes[0].kind = NodeKind::Leaf { items: seeds };

        // Splitting appends children, so this also visits every new node.
        let mut i = 0;
        while i < tree.nodes.len() {
            tree.split_if_full(NodeIdx::new(i));
            i += 1;
        }
        tree
    }

    /// Region covered by the root node.
    pub fn region(&self) -> R {
        self.nodes[NodeIdx::ROOT.get()].region
    }

    /// Splitting limits.
    pub fn limits(&self) -> TreeLimits {
        self.limits
    }

    /// Number of arena nodes, root included.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the root has been split.
    pub fn is_split(&self) -> bool {
        matches!(
            self.nodes[NodeIdx::ROOT.get()].kind,
            NodeKind::Internal { .. }
        )
    }

    /// Check `item` against the subtree at `idx`.
    ///
    /// With `commit` set, the lists `item` would be stored in are pushed onto
    /// `self.targets`; otherwise the subtree is only checked. Returns `false` on the
    /// first overlap.
    fn probe(&mut self, idx: NodeIdx, item: &R, commit: bool) -> bool {
        if commit {
            self.split_if_full(idx);
        }
        let node = &self.nodes[idx.get()];
        let region = node.region;
        let first_child = match &node.kind {
            NodeKind::Leaf { items } => {
                if items.iter().any(|b| b.overlaps(item)) {
                    return false;
                }
                if commit {
                    self.targets.push(Target::Leaf(idx));
                }
                return true;
            }
            NodeKind::Internal {
                spanning,
                first_child,
            } => {
                if spanning.iter().any(|b| b.overlaps(item)) {
                    return false;
                }
                *first_child
            }
        };

        let mask = region.classify(item);
        // An empty mask only comes from NaN coordinates; park those here too.
        let spans = mask.is_all() || mask.is_empty();
        if commit && spans {
            self.targets.push(Target::Spanning(idx));
        }
        let commit_children = commit && !spans;
        for i in 0..R::CHILDREN {
            if mask.contains(R::Mask::from_bits_retain(1_u8 << i))
                && !self.probe(
                    NodeIdx::new(first_child.get() + i),
                    item,
                    commit_children,
                )
            {
                return false;
            }
        }
        true
    }

    /// Split the leaf at `idx` if it holds more than `capacity` items.
    fn split_if_full(&mut self, idx: NodeIdx) {
        let node = &mut self.nodes[idx.get()];
        let NodeKind::Leaf { items } = &mut node.kind else {
            return;
        };
        if items.len() <= self.limits.capacity || node.depth >= self.limits.max_depth {
            return;
        }
        let items = core::mem::take(items);
        let region = node.region;
        let depth = node.depth + 1;

        let first_child = NodeIdx::new(self.nodes.len());
        for i in 0..R::CHILDREN {
            self.nodes.push(Node::leaf(region.child(i), depth));
        }

        let mut spanning = Vec::new();
        for item in items {
            let mask = region.classify(&item);
            if mask.is_all() || mask.is_empty() {
                spanning.push(item);
                continue;
            }
            for i in 0..R::CHILDREN {
                if mask.contains(R::Mask::from_bits_retain(1_u8 << i))
                    && let NodeKind::Leaf { items } =
                        &mut self.nodes[first_child.get() + i].kind
                {
                    items.push(item);
                }
            }
        }
        log::debug!(
            "split node {} at depth {} ({} spanning)",
            idx.get(),
            depth - 1,
            spanning.len()
        );
        self.nodes[idx.get()].kind = NodeKind::Internal {
            spanning,
            first_child,
        };
    }
}

impl<R: Partition> ConflictIndex for RegionTree<R> {
    type Bounds = R;

    fn try_add(&mut self, item: R) -> bool {
        self.targets.clear();
        if !self.probe(NodeIdx::ROOT, &item, true) {
            return false;
        }
        for target in self.targets.drain(..) {
            match target {
                Target::Leaf(idx) => {
                    if let NodeKind::Leaf { items } = &mut self.nodes[idx.get()].kind {
                        items.push(item);
                    }
                }
                Target::Spanning(idx) => {
                    if let NodeKind::Internal { spanning, .. } =
                        &mut self.nodes[idx.get()].kind
                    {
                        spanning.push(item);
                    }
                }
            }
        }
        self.len += 1;
        true
    }

    fn len(&self) -> usize {
        self.len
    }
}

impl<R: Partition> Debug for RegionTree<R> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let leaves = self
            .nodes
            .iter()
            .filter(|n| matches!(n.kind, NodeKind::Leaf { .. }))
            .count();
        let depth = self.nodes.iter().map(|n| n.depth).max().unwrap_or(0);
        f.debug_struct("RegionTree")
            .field("region", &self.region())
            .field("len", &self.len)
            .field("nodes", &self.nodes.len())
            .field("leaves", &leaves)
            .field("depth", &depth)
            .finish_non_exhaustive()
    }
}
