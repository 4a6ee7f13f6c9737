use serde::Serialize;

#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash, Serialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn distance(&self, other: &Point) -> f64 {
        let dx = f64::from(self.x) - f64::from(other.x);
        let dy = f64::from(self.y) - f64::from(other.y);
        (dx * dx + dy * dy).sqrt()
    }
}

impl From<(i32, i32)> for Point {
    fn from((x, y): (i32, i32)) -> Self {
        Self { x, y }
    }
}

/// Undirected edge, stored once per vertex pair.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Edge {
    pub a: usize,
    pub b: usize,
    pub cost: f64,
}

impl Edge {
    /// The endpoint opposite `v`.
    pub fn other(&self, v: usize) -> usize {
        if v == self.a { self.b } else { self.a }
    }
}

/// One tree connection: `child` attached to the tree through `parent`.
#[derive(Copy, Clone, Debug, PartialEq, Serialize)]
pub struct TreeEdge {
    pub parent: usize,
    pub child: usize,
    pub weight: f64,
}
