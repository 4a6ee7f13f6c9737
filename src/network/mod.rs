//! Outpost network core: complete distance graph, Prim's spanning tree and
//! the satellite channel allocator that derives the minimum radio range.

use anyhow::{anyhow, Result};

pub mod channels;
pub mod graph;
pub mod heap;
pub mod models;
pub mod prim;

use channels::ChannelAllocation;
use graph::CompleteGraph;
use models::Point;
use prim::SpanningTree;

/// One case: the outposts, their channel budget and, once computed, the tree.
#[derive(Clone, Debug)]
pub struct RadioNetwork {
    channel_budget: usize,
    graph: CompleteGraph,
    tree: Option<SpanningTree>,
}

impl RadioNetwork {
    /// Callers validate `points.len() > channel_budget >= 1` beforehand.
    pub fn build_graph(channel_budget: usize, points: &[Point]) -> Self {
        Self { channel_budget, graph: CompleteGraph::new(points), tree: None }
    }

    pub fn compute_mst(&mut self) -> Result<()> {
        self.tree = Some(prim::prim(&self.graph)?);
        Ok(())
    }

    /// Minimum radio range `D` left after spending the channel budget.
    pub fn minimum_radio_range(&self) -> Result<f64> {
        Ok(self.allocate()?.radius)
    }

    pub fn allocate(&self) -> Result<ChannelAllocation> {
        channels::allocate_channels(self.tree()?, self.channel_budget)
    }

    pub fn channel_budget(&self) -> usize {
        self.channel_budget
    }

    pub fn graph(&self) -> &CompleteGraph {
        &self.graph
    }

    pub fn tree(&self) -> Result<&SpanningTree> {
        self.tree
            .as_ref()
            .ok_or_else(|| anyhow!("spanning tree not computed; call compute_mst first"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn points(raw: &[(i32, i32)]) -> Vec<Point> {
        raw.iter().copied().map(Point::from).collect()
    }

    #[test]
    fn range_requires_tree() {
        let net = RadioNetwork::build_graph(1, &points(&[(0, 0), (3, 4)]));
        assert!(net.minimum_radio_range().is_err());
    }

    #[test]
    fn two_outposts_one_channel() -> Result<()> {
        let mut net = RadioNetwork::build_graph(1, &points(&[(0, 0), (3, 4)]));
        net.compute_mst()?;
        assert_eq!(format!("{:.2}", net.minimum_radio_range()?), "5.00");
        Ok(())
    }

    #[test]
    fn rectangle_one_channel() -> Result<()> {
        let mut net = RadioNetwork::build_graph(1, &points(&[(0, 0), (0, 3), (4, 0), (4, 3)]));
        net.compute_mst()?;
        assert!((net.tree()?.total_weight() - 10.0).abs() < 1e-9);
        assert_eq!(net.minimum_radio_range()?, 4.0);
        Ok(())
    }

    #[test]
    fn recomputing_tree_is_stable() -> Result<()> {
        let mut net = RadioNetwork::build_graph(2, &points(&[(0, 0), (5, 0), (5, 5), (20, 20)]));
        net.compute_mst()?;
        let first = net.minimum_radio_range()?;
        net.compute_mst()?;
        assert_eq!(net.minimum_radio_range()?, first);
        Ok(())
    }
}
