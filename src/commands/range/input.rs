use anyhow::{bail, Context, Result};
use log::debug;
use std::fmt;
use std::fs;
use std::path::Path;

use super::config::Limits;
use crate::network::models::Point;

/// A case as read from the input, before any range checks.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RawCase {
    /// 1-based position in the input.
    pub test: usize,
    pub channels: i64,
    pub outposts: i64,
    pub coords: Vec<(i64, i64)>,
}

/// Why a case was skipped without reaching the core.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Rejection {
    ChannelCount { max: i64 },
    OutpostCount { max: i64 },
    Coordinate { max: i64 },
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rejection::ChannelCount { max } => {
                write!(f, "Enter a number of satellite channels between 1 and {}!", max)
            }
            Rejection::OutpostCount { max } => write!(
                f,
                "Enter a number of outposts greater than the number of satellites and less than {}!",
                max
            ),
            Rejection::Coordinate { max } => write!(f, "Enter coordinates between 0 and {}!", max),
        }
    }
}

pub fn read_cases(path: &Path, limits: &Limits) -> Result<Vec<RawCase>> {
    let text = fs::read_to_string(path).with_context(|| format!("read input {}", path.display()))?;
    parse_cases(&text, limits).with_context(|| format!("parse input {}", path.display()))
}

/// Parses `N`, then per case `S V` followed by `V` coordinate lines.
/// Empty input yields no cases. When `S` or `V` is out of range the rest of
/// the header line and the next `V` lines are skipped unread, leaving the
/// case with no coordinates.
pub fn parse_cases(text: &str, limits: &Limits) -> Result<Vec<RawCase>> {
    let mut tokens = Tokens::new(text);
    if tokens.is_exhausted() {
        return Ok(Vec::new());
    }

    let count = tokens.next_int("case count")?;
    if count < 0 {
        bail!("line {}: negative case count {}", tokens.line(), count);
    }

    let mut cases = Vec::new();
    for test in 1..=count as usize {
        let channels = tokens.next_int("channel count")?;
        let outposts = tokens.next_int("outpost count")?;
        if let Some(rejection) = check_counts(channels, outposts, limits) {
            debug!("test {}: {}; skipping {} lines", test, rejection, outposts.max(0));
            tokens.skip_lines(outposts.max(0) as usize);
            cases.push(RawCase { test, channels, outposts, coords: Vec::new() });
            continue;
        }
        let mut coords = Vec::with_capacity(outposts.clamp(0, 1024) as usize);
        for _ in 0..outposts.max(0) {
            let x = tokens.next_int("x coordinate")?;
            let y = tokens.next_int("y coordinate")?;
            coords.push((x, y));
        }
        cases.push(RawCase { test, channels, outposts, coords });
    }
    Ok(cases)
}

/// Range checks in input order: channel count, outpost count, coordinates.
pub fn validate(case: &RawCase, limits: &Limits) -> Result<Vec<Point>, Rejection> {
    if let Some(rejection) = check_counts(case.channels, case.outposts, limits) {
        return Err(rejection);
    }
    let in_range = |c: i64| (0..=limits.max_coordinate).contains(&c);
    case.coords
        .iter()
        .map(|&(x, y)| match (i32::try_from(x), i32::try_from(y)) {
            (Ok(px), Ok(py)) if in_range(x) && in_range(y) => Ok(Point::new(px, py)),
            _ => Err(Rejection::Coordinate { max: limits.max_coordinate }),
        })
        .collect()
}

fn check_counts(channels: i64, outposts: i64, limits: &Limits) -> Option<Rejection> {
    if channels < 1 || channels > limits.max_channels {
        return Some(Rejection::ChannelCount { max: limits.max_channels });
    }
    if outposts <= channels || outposts > limits.max_outposts {
        return Some(Rejection::OutpostCount { max: limits.max_outposts });
    }
    None
}

struct Tokens<'a> {
    items: Vec<(usize, &'a str)>,
    pos: usize,
}

impl<'a> Tokens<'a> {
    fn new(text: &'a str) -> Self {
        let items = text
            .lines()
            .enumerate()
            .flat_map(|(i, line)| line.split_whitespace().map(move |t| (i + 1, t)))
            .collect();
        Self { items, pos: 0 }
    }

    fn is_exhausted(&self) -> bool {
        self.pos >= self.items.len()
    }

    fn line(&self) -> usize {
        self.items
            .get(self.pos.saturating_sub(1))
            .map(|&(line, _)| line)
            .unwrap_or(0)
    }

    /// Drops what is left of the current line, then `n` more lines.
    fn skip_lines(&mut self, n: usize) {
        let last = self.line().saturating_add(n);
        while self.items.get(self.pos).is_some_and(|&(line, _)| line <= last) {
            self.pos += 1;
        }
    }

    fn next_int(&mut self, what: &str) -> Result<i64> {
        let Some(&(line, tok)) = self.items.get(self.pos) else {
            bail!("unexpected end of input while reading {}", what);
        };
        self.pos += 1;
        tok.parse::<i64>()
            .with_context(|| format!("line {}: invalid {} '{}'", line, what, tok))
    }
}
