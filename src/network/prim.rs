use anyhow::Result;
use log::{debug, trace};

use super::graph::CompleteGraph;
use super::heap::{MaxHeap, MinHeap};
use super::models::TreeEdge;

pub const ROOT: usize = 0;

/// Minimum spanning tree produced by [`prim`].
///
/// Every non-root vertex `w` hangs off `edge_to[w]` with weight `dist_to[w]`.
/// `edge_heap` holds one entry per tree edge, keyed by weight, heaviest first;
/// an entry is identified by its child vertex.
#[derive(Clone, Debug)]
pub struct SpanningTree {
    edge_to: Vec<Option<usize>>,
    dist_to: Vec<f64>,
    marked: Vec<bool>,
    attached: Vec<usize>,
    edge_heap: MaxHeap,
}

impl SpanningTree {
    pub fn vertex_count(&self) -> usize {
        self.edge_to.len()
    }

    pub fn parent(&self, v: usize) -> Option<usize> {
        self.edge_to.get(v).copied().flatten()
    }

    pub fn dist_to(&self, v: usize) -> f64 {
        self.dist_to[v]
    }

    pub fn is_marked(&self, v: usize) -> bool {
        self.marked[v]
    }

    /// Tree edges in the order their child vertices joined the tree.
    pub fn edges(&self) -> impl Iterator<Item = TreeEdge> + '_ {
        self.attached.iter().filter_map(move |&child| {
            self.parent(child).map(|parent| TreeEdge { parent, child, weight: self.dist_to[child] })
        })
    }

    pub fn edge_count(&self) -> usize {
        self.attached.len()
    }

    pub fn total_weight(&self) -> f64 {
        self.edges().map(|e| e.weight).sum()
    }

    pub fn edge_heap(&self) -> &MaxHeap {
        &self.edge_heap
    }
}

/// Prim's algorithm from vertex 0 with an indexed min-heap frontier.
pub fn prim(graph: &CompleteGraph) -> Result<SpanningTree> {
    let n = graph.vertex_count();
    let mut tree = SpanningTree {
        edge_to: vec![None; n],
        dist_to: vec![f64::INFINITY; n],
        marked: vec![false; n],
        attached: Vec::with_capacity(n.saturating_sub(1)),
        edge_heap: MaxHeap::with_capacity(n),
    };
    if n == 0 {
        return Ok(tree);
    }

    let mut frontier = MinHeap::with_capacity(n);
    tree.dist_to[ROOT] = 0.0;
    frontier.insert(ROOT, 0.0)?;

    while let Some(v) = frontier.delete_root() {
        tree.marked[v] = true;
        if v != ROOT {
            tree.edge_heap.insert(v, tree.dist_to[v])?;
            tree.attached.push(v);
            trace!("prim: attach {} via {} ({:.2})", v, tree.edge_to[v].unwrap_or(ROOT), tree.dist_to[v]);
        }
        scan(graph, &mut tree, &mut frontier, v)?;
    }

    debug!(
        "prim: spanning tree over {} vertices, {} edges, weight {:.2}",
        n,
        tree.edge_count(),
        tree.total_weight()
    );
    Ok(tree)
}

fn scan(graph: &CompleteGraph, tree: &mut SpanningTree, frontier: &mut MinHeap, v: usize) -> Result<()> {
    for (w, cost) in graph.neighbors(v) {
        if tree.marked[w] {
            continue;
        }
        if cost < tree.dist_to[w] {
            tree.dist_to[w] = cost;
            tree.edge_to[w] = Some(v);
            if frontier.contains(w) {
                frontier.decrease_key(w, cost)?;
            } else {
                frontier.insert(w, cost)?;
            }
        }
    }
    Ok(())
}
