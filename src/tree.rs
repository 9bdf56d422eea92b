use std::cmp::Ordering;
use std::fmt;

use log::debug;

use crate::error::{validate, BuildError};
use crate::interval::Interval;
use crate::partition::{find_center, split};
use crate::radix::{sort_in_place, SortKey};

/// Buckets of at most this many intervals become leaves. Raising it trades
/// deeper trees for longer linear scans at the bottom.
pub const DEFAULT_LEAF_SIZE: usize = 40;

// child pointer for a missing subtree
const NIL: usize = usize::MAX;

#[derive(Clone, Debug)]
struct Node {
    center: i64,

    // this node's bucket is `lo..hi` in both `starts` and `ends`
    lo: usize,
    hi: usize,

    left: usize,
    right: usize,

    // leaves hold whatever was left over and are scanned linearly
    leaf: bool,
}

/// A static centered interval tree answering stabbing queries: which
/// intervals contain a given point.
///
/// Each node picks a center, keeps the intervals spanning it, and hands
/// intervals entirely before or after it to its left and right subtrees.
/// Every node's bucket is kept twice, ascending by start and descending by
/// end, so a query scans only the hits plus one miss per level.
///
/// Nodes live in one vector in pre-order, and all buckets share two flat
/// interval arrays. The tree is immutable after construction, so queries
/// can run from many threads at once.
///
/// # Examples
/// ```
/// use stabtree::{Interval, IntervalTree};
///
/// let tree = IntervalTree::new(vec![
///     Interval::new(0, 10, 1),
///     Interval::new(5, 15, 2),
///     Interval::new(20, 30, 3),
/// ]);
///
/// let mut keys = Vec::new();
/// tree.query(7, |interval| keys.push(interval.key));
/// keys.sort();
///
/// assert_eq!(keys, vec![1, 2]);
/// assert_eq!(tree.query_count(17), 0);
/// ```
#[derive(Clone, Debug)]
pub struct IntervalTree {
    nodes: Vec<Node>,

    // every bucket ascending by start
    starts: Vec<Interval>,

    // the same buckets descending by end
    ends: Vec<Interval>,

    height: usize,
}

impl IntervalTree {
    /// Build a tree using `DEFAULT_LEAF_SIZE`.
    ///
    /// Intervals must satisfy `0 <= start <= end`; this is not checked. See
    /// `try_new` for a checked variant.
    pub fn new<U>(intervals: U) -> IntervalTree
    where
        U: IntoIterator<Item = Interval>,
    {
        Self::with_leaf_size(intervals, DEFAULT_LEAF_SIZE)
    }

    /// Build a tree, turning any bucket of at most `leaf_size` intervals
    /// into a leaf.
    pub fn with_leaf_size<U>(intervals: U, leaf_size: usize) -> IntervalTree
    where
        U: IntoIterator<Item = Interval>,
    {
        let mut intervals: Vec<Interval> = intervals.into_iter().collect();
        let n = intervals.len();

        let mut builder = Builder {
            leaf_size,
            nodes: Vec::new(),
            starts: Vec::with_capacity(n),
            ends: Vec::with_capacity(n),
            height: 0,
        };

        if n > 0 {
            builder.build(&mut intervals, 1);
        }

        debug!(
            "built interval tree: {} intervals, {} nodes, height {}",
            n,
            builder.nodes.len(),
            builder.height
        );
        debug_assert_eq!(builder.starts.len(), n);
        debug_assert_eq!(builder.ends.len(), n);

        IntervalTree {
            nodes: builder.nodes,
            starts: builder.starts,
            ends: builder.ends,
            height: builder.height,
        }
    }

    /// Build a tree after checking that every interval has
    /// `0 <= start <= end`. Fails on the first offending interval.
    pub fn try_new<U>(intervals: U) -> Result<IntervalTree, BuildError>
    where
        U: IntoIterator<Item = Interval>,
    {
        let intervals: Vec<Interval> = intervals.into_iter().collect();
        for interval in &intervals {
            validate(interval)?;
        }
        Ok(Self::new(intervals))
    }

    /// Number of intervals in the set.
    pub fn len(&self) -> usize {
        self.starts.len()
    }

    /// True iff the set is empty.
    pub fn is_empty(&self) -> bool {
        self.starts.is_empty()
    }

    /// Number of nodes in the tree.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of nodes on the longest root-to-leaf path. Zero when empty.
    pub fn height(&self) -> usize {
        self.height
    }

    /// The root node, if the tree holds anything.
    pub fn root(&self) -> Option<NodeRef<'_>> {
        if self.nodes.is_empty() {
            None
        } else {
            Some(NodeRef { tree: self, idx: 0 })
        }
    }

    /// Call `visit` once on every interval containing `point`.
    ///
    /// The visiting order is unspecified but the same for repeated queries.
    pub fn query<'a, F>(&'a self, point: i64, mut visit: F)
    where
        F: FnMut(&'a Interval),
    {
        if self.is_empty() {
            return;
        }

        let mut idx = 0;
        while idx != NIL {
            let node = &self.nodes[idx];
            let starts = &self.starts[node.lo..node.hi];

            if node.leaf {
                for interval in starts {
                    if interval.start > point {
                        break;
                    } else if point <= interval.end {
                        visit(interval);
                    }
                }
                return;
            }

            idx = match point.cmp(&node.center) {
                // everything here covers the center, nothing below does
                Ordering::Equal => {
                    starts.iter().for_each(&mut visit);
                    NIL
                }
                // end >= center > point holds for the whole bucket
                Ordering::Less => {
                    for interval in starts {
                        if interval.start > point {
                            break;
                        }
                        visit(interval);
                    }
                    node.left
                }
                // start <= center < point holds for the whole bucket
                Ordering::Greater => {
                    for interval in &self.ends[node.lo..node.hi] {
                        if interval.end < point {
                            break;
                        }
                        visit(interval);
                    }
                    node.right
                }
            };
        }
    }

    /// Count the intervals containing `point`.
    pub fn query_count(&self, point: i64) -> usize {
        let mut count = 0;
        self.query(point, |_| count += 1);
        count
    }

    /// Iterate through every interval in the tree, node by node in
    /// pre-order, ascending by start within each node.
    pub fn iter(&self) -> std::slice::Iter<'_, Interval> {
        self.starts.iter()
    }
}

impl<'a> IntoIterator for &'a IntervalTree {
    type Item = &'a Interval;
    type IntoIter = std::slice::Iter<'a, Interval>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl FromIterator<Interval> for IntervalTree {
    fn from_iter<U: IntoIterator<Item = Interval>>(intervals: U) -> Self {
        IntervalTree::new(intervals)
    }
}

impl fmt::Display for IntervalTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.root() {
            Some(root) => fmt::Display::fmt(&root, f),
            None => write!(f, "Tree(empty)"),
        }
    }
}

/// A borrowed view of one tree node, for inspection and diagnostics.
#[derive(Clone, Copy)]
pub struct NodeRef<'a> {
    tree: &'a IntervalTree,
    idx: usize,
}

impl<'a> NodeRef<'a> {
    fn node(&self) -> &'a Node {
        &self.tree.nodes[self.idx]
    }

    fn child(&self, idx: usize) -> Option<NodeRef<'a>> {
        if idx == NIL {
            None
        } else {
            Some(NodeRef {
                tree: self.tree,
                idx,
            })
        }
    }

    /// The value this node splits on. It is the start of some input interval.
    pub fn center(&self) -> i64 {
        self.node().center
    }

    /// Number of intervals stored directly at this node.
    pub fn size(&self) -> usize {
        let node = self.node();
        node.hi - node.lo
    }

    /// This node's intervals, ascending by start.
    pub fn starts(&self) -> &'a [Interval] {
        let node = self.node();
        &self.tree.starts[node.lo..node.hi]
    }

    /// This node's intervals, descending by end.
    pub fn ends(&self) -> &'a [Interval] {
        let node = self.node();
        &self.tree.ends[node.lo..node.hi]
    }

    /// Subtree of intervals ending before `center`.
    pub fn left(&self) -> Option<NodeRef<'a>> {
        self.child(self.node().left)
    }

    /// Subtree of intervals starting after `center`.
    pub fn right(&self) -> Option<NodeRef<'a>> {
        self.child(self.node().right)
    }

    /// True for nodes that were not split further.
    pub fn is_leaf(&self) -> bool {
        self.node().leaf
    }
}

impl<'a> fmt::Debug for NodeRef<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NodeRef")
            .field("center", &self.center())
            .field("size", &self.size())
            .field("leaf", &self.is_leaf())
            .finish()
    }
}

impl<'a> fmt::Display for NodeRef<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let bucket = |child: Option<NodeRef<'_>>| child.map_or(0, |c| c.size());
        write!(
            f,
            "Node(center:{}, size:{}, left:{}, right:{})",
            self.center(),
            self.size(),
            bucket(self.left()),
            bucket(self.right())
        )
    }
}

// Construction state. Nodes and their buckets are appended in pre-order.
struct Builder {
    leaf_size: usize,
    nodes: Vec<Node>,
    starts: Vec<Interval>,
    ends: Vec<Interval>,
    height: usize,
}

impl Builder {
    // Build the subtree over non-empty `intervals`, returning its node index.
    // `intervals` gets reordered.
    fn build(&mut self, intervals: &mut [Interval], depth: usize) -> usize {
        debug_assert!(!intervals.is_empty());
        self.height = self.height.max(depth);

        let center = find_center(intervals);

        if intervals.len() <= self.leaf_size {
            return self.push_node(center, intervals, true);
        }

        let (l, r) = split(intervals, center);

        // the interval whose start was picked as center always covers it
        debug_assert!(l < r);

        let idx = self.push_node(center, &intervals[l..r], false);

        let (lower, rest) = intervals.split_at_mut(l);
        let upper = &mut rest[r - l..];

        if !lower.is_empty() {
            let left = self.build(lower, depth + 1);
            self.nodes[idx].left = left;
        }

        if !upper.is_empty() {
            let right = self.build(upper, depth + 1);
            self.nodes[idx].right = right;
        }

        idx
    }

    fn push_node(&mut self, center: i64, bucket: &[Interval], leaf: bool) -> usize {
        let lo = self.starts.len();
        let hi = lo + bucket.len();

        self.starts.extend_from_slice(bucket);
        sort_in_place(&mut self.starts[lo..hi], SortKey::Start);

        self.ends.extend_from_slice(bucket);
        sort_in_place(&mut self.ends[lo..hi], SortKey::End);
        self.ends[lo..hi].reverse();

        let idx = self.nodes.len();
        self.nodes.push(Node {
            center,
            lo,
            hi,
            left: NIL,
            right: NIL,
            leaf,
        });
        idx
    }
}
