use anyhow::{anyhow, Result};
use log::trace;
use serde::Serialize;

use super::prim::SpanningTree;

/// Outcome of spending a channel budget on a spanning tree.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ChannelAllocation {
    /// Heaviest tree edge left with an endpoint lacking a channel; 0 when none is left.
    pub radius: f64,
    /// Vertices that received a channel, in assignment order.
    pub equipped: Vec<usize>,
    pub covered_edges: usize,
    pub unused_channels: usize,
}

/// Greedily equips the endpoints of the heaviest tree edges first.
///
/// Works on a copy of the tree's edge heap, so the same tree can be queried
/// with several budgets.
pub fn allocate_channels(tree: &SpanningTree, budget: usize) -> Result<ChannelAllocation> {
    let mut heap = tree.edge_heap().clone();
    let mut has_channel = vec![false; tree.vertex_count()];
    let mut equipped = Vec::new();
    let mut remaining = budget;
    let mut covered_edges = 0;

    while remaining > 0 {
        let Some(w) = heap.peek_root() else { break };
        let v = tree
            .parent(w)
            .ok_or_else(|| anyhow!("edge heap entry {} has no parent in the tree", w))?;

        if !has_channel[v] {
            has_channel[v] = true;
            equipped.push(v);
            remaining -= 1;
        }
        if !has_channel[w] && remaining >= 1 {
            has_channel[w] = true;
            equipped.push(w);
            remaining -= 1;
        }
        if has_channel[v] && has_channel[w] {
            heap.delete_root();
            covered_edges += 1;
            trace!("channels: covered {}-{} ({:.2}), {} left", v, w, tree.dist_to(w), remaining);
        }
    }

    let radius = heap.peek_root().and_then(|w| heap.value(w)).unwrap_or(0.0);
    Ok(ChannelAllocation { radius, equipped, covered_edges, unused_channels: remaining })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::network::graph::CompleteGraph;
    use crate::network::models::{Point, TreeEdge};
    use crate::network::prim::prim;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn tree_of(raw: &[(i32, i32)]) -> SpanningTree {
        let points: Vec<Point> = raw.iter().copied().map(Point::from).collect();
        prim(&CompleteGraph::new(&points)).unwrap()
    }

    // Straight list-based replay of the greedy rule.
    fn simulate(tree: &SpanningTree, budget: usize) -> f64 {
        let mut edges: Vec<TreeEdge> = tree.edges().collect();
        edges.sort_by(|a, b| b.weight.total_cmp(&a.weight));
        let mut equipped = vec![false; tree.vertex_count()];
        let mut s = budget;
        let mut next = 0;
        while s > 0 && next < edges.len() {
            let e = edges[next];
            if !equipped[e.parent] {
                equipped[e.parent] = true;
                s -= 1;
            }
            if !equipped[e.child] && s > 0 {
                equipped[e.child] = true;
                s -= 1;
            }
            if equipped[e.parent] && equipped[e.child] {
                next += 1;
            }
        }
        edges.get(next).map(|e| e.weight).unwrap_or(0.0)
    }

    fn has_tied_weights(tree: &SpanningTree) -> bool {
        let mut w: Vec<f64> = tree.edges().map(|e| e.weight).collect();
        w.sort_by(f64::total_cmp);
        w.windows(2).any(|p| p[0] == p[1])
    }

    #[test]
    fn one_channel_on_two_outposts_leaves_the_edge() -> Result<()> {
        let tree = tree_of(&[(0, 0), (3, 4)]);
        let alloc = allocate_channels(&tree, 1)?;
        assert_eq!(alloc.radius, 5.0);
        assert_eq!(alloc.equipped, vec![0]);
        assert_eq!(alloc.covered_edges, 0);
        assert_eq!(alloc.unused_channels, 0);
        Ok(())
    }

    #[test]
    fn rectangle_with_one_channel_keeps_heaviest_edge() -> Result<()> {
        let tree = tree_of(&[(0, 0), (0, 3), (4, 0), (4, 3)]);
        let alloc = allocate_channels(&tree, 1)?;
        assert_eq!(alloc.radius, 4.0);
        Ok(())
    }

    #[test]
    fn path_with_full_budget_leaves_lightest_edge() -> Result<()> {
        let tree = tree_of(&[(0, 0), (1, 0), (3, 0), (6, 0), (10, 0), (15, 0)]);
        let alloc = allocate_channels(&tree, 5)?;
        assert_eq!(alloc.radius, 1.0);
        assert_eq!(alloc.covered_edges, 4);
        assert_eq!(alloc.radius, simulate(&tree, 5));
        Ok(())
    }

    #[test]
    fn matches_reference_simulation() -> Result<()> {
        let mut rng = StdRng::seed_from_u64(99);
        let mut checked = 0;
        while checked < 25 {
            let n: usize = rng.gen_range(2..40);
            let raw: Vec<(i32, i32)> = (0..n)
                .map(|_| (rng.gen_range(0..=10000), rng.gen_range(0..=10000)))
                .collect();
            let tree = tree_of(&raw);
            if has_tied_weights(&tree) {
                continue;
            }
            for budget in [1, n / 2, n - 1] {
                let alloc = allocate_channels(&tree, budget.max(1))?;
                assert_eq!(alloc.radius, simulate(&tree, budget.max(1)));
            }
            checked += 1;
        }
        Ok(())
    }

    #[test]
    fn larger_budget_never_raises_radius() -> Result<()> {
        let mut rng = StdRng::seed_from_u64(17);
        for _ in 0..20 {
            let n: usize = rng.gen_range(2..50);
            let raw: Vec<(i32, i32)> = (0..n)
                .map(|_| (rng.gen_range(0..=1000), rng.gen_range(0..=1000)))
                .collect();
            let tree = tree_of(&raw);
            let mut prev = f64::INFINITY;
            for budget in 1..=n + 1 {
                let r = allocate_channels(&tree, budget)?.radius;
                assert!(r <= prev, "budget {} raised radius {} -> {}", budget, prev, r);
                prev = r;
            }
        }
        Ok(())
    }

    #[test]
    fn exhausted_tree_reports_zero() -> Result<()> {
        let tree = tree_of(&[(0, 0), (3, 4)]);
        let alloc = allocate_channels(&tree, 2)?;
        assert_eq!(alloc.radius, 0.0);
        assert_eq!(alloc.covered_edges, 1);

        let alloc = allocate_channels(&tree, 10)?;
        assert_eq!(alloc.radius, 0.0);
        assert_eq!(alloc.unused_channels, 8);
        Ok(())
    }

    #[test]
    fn single_outpost_reports_zero() -> Result<()> {
        let tree = tree_of(&[(1, 1)]);
        let alloc = allocate_channels(&tree, 1)?;
        assert_eq!(alloc.radius, 0.0);
        assert!(alloc.equipped.is_empty());
        Ok(())
    }

    #[test]
    fn zero_budget_reports_heaviest_edge() -> Result<()> {
        let tree = tree_of(&[(0, 0), (0, 3), (4, 0), (4, 3)]);
        assert_eq!(allocate_channels(&tree, 0)?.radius, 4.0);
        Ok(())
    }

    #[test]
    fn allocation_leaves_tree_untouched() -> Result<()> {
        let tree = tree_of(&[(0, 0), (1, 0), (3, 0)]);
        let first = allocate_channels(&tree, 2)?;
        let second = allocate_channels(&tree, 2)?;
        assert_eq!(first, second);
        assert_eq!(tree.edge_heap().len(), 2);
        Ok(())
    }
}
