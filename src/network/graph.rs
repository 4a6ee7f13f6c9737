use std::fmt;

use super::models::{Edge, Point};

/// Complete undirected graph over a set of outposts, weighted by Euclidean
/// distance. Each pair is stored once in `edges`; `incident[v]` lists the
/// indices of every edge touching `v` so either endpoint can walk it.
#[derive(Clone, Debug)]
pub struct CompleteGraph {
    points: Vec<Point>,
    edges: Vec<Edge>,
    incident: Vec<Vec<usize>>,
}

impl CompleteGraph {
    pub fn new(points: &[Point]) -> Self {
        let v = points.len();
        let mut edges = Vec::with_capacity(v * v.saturating_sub(1) / 2);
        let mut incident: Vec<Vec<usize>> = (0..v).map(|_| Vec::with_capacity(v.saturating_sub(1))).collect();

        for i in 0..v {
            for j in (i + 1)..v {
                let idx = edges.len();
                edges.push(Edge { a: i, b: j, cost: points[i].distance(&points[j]) });
                incident[i].push(idx);
                incident[j].push(idx);
            }
        }

        Self { points: points.to_vec(), edges, incident }
    }

    pub fn vertex_count(&self) -> usize {
        self.points.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// `(neighbor, cost)` for every vertex adjacent to `v`, in edge creation order.
    pub fn neighbors(&self, v: usize) -> impl Iterator<Item = (usize, f64)> + '_ {
        self.incident[v].iter().map(move |&idx| {
            let e = &self.edges[idx];
            (e.other(v), e.cost)
        })
    }
}

/// Adjacency listing, one line per vertex: `v:  dest->cost ...`.
impl fmt::Display for CompleteGraph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Adjacency List:")?;
        for v in 0..self.vertex_count() {
            write!(f, "{}:", v)?;
            for (w, cost) in self.neighbors(v) {
                write!(f, "  {}->{:.2}", w, cost)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
