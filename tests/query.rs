use stabtree::{Interval, IntervalTree, NodeRef, DEFAULT_LEAF_SIZE, RADIX_SORT_CUTOFF};

use fnv::FnvHashSet;
use rand::{thread_rng, Rng};

// Find covering intervals by simply checking every single one.
// We test against this algorithm which we assume to be correct.
fn brute_force_query<F>(intervals: &[Interval], point: i64, mut visit: F)
where
    F: FnMut(&Interval),
{
    for interval in intervals {
        if interval.start <= point && point <= interval.end {
            visit(interval);
        }
    }
}

// Run queries against both the tree and by brute force and check that
// they get the same results.
fn check_queries(a: &IntervalTree, b: &[Interval], queries: &[i64]) {
    let mut a_hits: Vec<i64> = Vec::new();
    let mut b_hits: Vec<i64> = Vec::new();

    for point in queries {
        a_hits.clear();
        b_hits.clear();

        a.query(*point, |interval| a_hits.push(interval.key));
        brute_force_query(b, *point, |interval| b_hits.push(interval.key));

        // no interval reported twice
        let unique: FnvHashSet<i64> = a_hits.iter().copied().collect();
        assert_eq!(unique.len(), a_hits.len());

        a_hits.sort_unstable();
        b_hits.sort_unstable();

        assert_eq!(a_hits, b_hits, "query point {}", point);
        assert_eq!(a.query_count(*point), b_hits.len());
    }
}

fn collect_centers(node: NodeRef<'_>, centers: &mut Vec<i64>) {
    centers.push(node.center());
    if let Some(left) = node.left() {
        collect_centers(left, centers);
    }
    if let Some(right) = node.right() {
        collect_centers(right, centers);
    }
}

// Every endpoint, its neighbors, and every node center.
fn boundary_queries(tree: &IntervalTree, intervals: &[Interval]) -> Vec<i64> {
    let mut queries = Vec::new();
    for interval in intervals {
        for point in [interval.start, interval.end] {
            queries.push(point);
            queries.push(point + 1);
            if point > 0 {
                queries.push(point - 1);
            }
        }
    }
    if let Some(root) = tree.root() {
        collect_centers(root, &mut queries);
    }
    queries
}

fn random_interval(min_start: i64, max_end: i64, min_len: i64, max_len: i64) -> (i64, i64) {
    let mut rng = thread_rng();
    let len = rng.gen_range(min_len..max_len + 1);
    let start = rng.gen_range(min_start..max_end - len + 1);
    (start, start + len - 1)
}

fn random_intervals(n: usize, max_end: i64, min_len: i64, max_len: i64) -> Vec<Interval> {
    (0..n)
        .map(|i| {
            let (start, end) = random_interval(0, max_end, min_len, max_len);
            Interval::new(start, end, i as i64)
        })
        .collect()
}

fn check_random_queries(
    n: usize,
    num_queries: usize,
    max_end: i64,
    min_len: i64,
    max_len: i64,
    leaf_size: usize,
) {
    let b = random_intervals(n, max_end, min_len, max_len);
    let a = IntervalTree::with_leaf_size(b.clone(), leaf_size);
    assert_eq!(a.len(), n);

    let mut rng = thread_rng();
    let queries: Vec<i64> = (0..num_queries)
        .map(|_| rng.gen_range(0..max_end + 2))
        .collect();
    check_queries(&a, &b, &queries);

    // endpoints of a sample of the intervals, plus every center
    let sample = &b[..n.min(500)];
    check_queries(&a, &b, &boundary_queries(&a, sample));
}

fn check_random_queries_default(n: usize, num_queries: usize) {
    let max_end = 1000000;
    let min_len = 1;
    let max_len = 10000;

    check_random_queries(n, num_queries, max_end, min_len, max_len, DEFAULT_LEAF_SIZE);
}

#[test]
fn query_empty_tree() {
    check_random_queries_default(0, 1000);
}

#[test]
fn query_example() {
    let intervals = vec![
        Interval::new(0, 10, 0xA),
        Interval::new(5, 15, 0xB),
        Interval::new(20, 30, 0xC),
    ];
    let tree = IntervalTree::new(intervals.clone());
    check_queries(&tree, &intervals, &[7, 25, 17]);
    check_queries(&tree, &intervals, &boundary_queries(&tree, &intervals));
}

#[test]
fn query_small_trees() {
    for n in 1..16 {
        check_random_queries_default(n, 1000);
    }
}

#[test]
fn query_around_leaf_size() {
    for n in DEFAULT_LEAF_SIZE - 2..DEFAULT_LEAF_SIZE + 3 {
        check_random_queries_default(n, 1000);
    }
}

#[test]
fn query_medium_tree() {
    check_random_queries_default(10000, 1000);
}

#[test]
fn query_small_leaves() {
    for leaf_size in [0, 1, 5, 8] {
        check_random_queries(2000, 1000, 100000, 1, 5000, leaf_size);
    }
}

#[test]
fn query_singleton_intervals() {
    check_random_queries(10000, 1000, 1000, 1, 1, DEFAULT_LEAF_SIZE);
}

#[test]
fn query_dense_intervals() {
    // long intervals over a short range pile up in the upper buckets,
    // which then take the radix sort path
    let b = random_intervals(20000, 10000, 2000, 8000);
    let a = IntervalTree::new(b.clone());

    let root = a.root().unwrap();
    assert!(root.size() >= RADIX_SORT_CUTOFF);

    let queries: Vec<i64> = (0..10002).step_by(7).collect();
    check_queries(&a, &b, &queries);
}

#[test]
fn query_nested_intervals() {
    // short intervals sorting before long ones by end must not stop the scan
    let mut b = Vec::new();
    for i in 0..500 {
        b.push(Interval::new(1000 - i, 1000 + i, i));
        b.push(Interval::new(1000, 1001 + i % 3, 1000 + i));
    }
    let a = IntervalTree::new(b.clone());
    check_queries(&a, &b, &boundary_queries(&a, &b));
}

#[test]
fn query_concurrently() {
    let b = random_intervals(5000, 100000, 1, 2000);
    let a = IntervalTree::new(b.clone());

    std::thread::scope(|s| {
        for _ in 0..4 {
            s.spawn(|| {
                let mut rng = thread_rng();
                let queries: Vec<i64> = (0..500).map(|_| rng.gen_range(0..100002)).collect();
                check_queries(&a, &b, &queries);
            });
        }
    });
}

#[test]
fn query_is_deterministic() {
    let b = random_intervals(3000, 50000, 1, 3000);
    let a = IntervalTree::new(b);

    for point in (0..50000).step_by(101) {
        let mut first = Vec::new();
        let mut second = Vec::new();
        a.query(point, |interval| first.push(interval.key));
        a.query(point, |interval| second.push(interval.key));
        assert_eq!(first, second);
    }
}
