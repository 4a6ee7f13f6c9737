use anyhow::{bail, Result};
use log::{debug, info, warn};
use rayon::prelude::*;
use std::fmt::Write as _;
use std::path::Path;

use super::config::{Config, Limits};
use super::input::{self, RawCase};
use super::report::CaseOutcome;
use crate::network::channels::ChannelAllocation;
use crate::network::RadioNetwork;

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct RunStats {
    pub cases: usize,
    pub solved: usize,
    pub rejected: usize,
}

impl RunStats {
    fn from_outcomes(outcomes: &[CaseOutcome]) -> Self {
        let solved = outcomes.iter().filter(|o| o.is_ok()).count();
        Self { cases: outcomes.len(), solved, rejected: outcomes.len() - solved }
    }
}

/// Validates one case and, if it passes, runs graph -> tree -> allocation.
pub fn solve_case(case: &RawCase, limits: &Limits) -> Result<CaseOutcome> {
    let points = match input::validate(case, limits) {
        Ok(points) => points,
        Err(rejection) => {
            warn!("test {}: rejected: {}", case.test, rejection);
            return Ok(CaseOutcome::Rejected { test: case.test, message: rejection.to_string() });
        }
    };

    let channels = case.channels as usize;
    let mut network = RadioNetwork::build_graph(channels, &points);
    network.compute_mst()?;
    let mst_weight = network.tree()?.total_weight();
    let radius = network.minimum_radio_range()?;
    debug!(
        "test {}: {} outposts, {} channels, mst weight {:.2}, radius {:.2}",
        case.test,
        points.len(),
        channels,
        mst_weight,
        radius
    );
    Ok(CaseOutcome::Ok { test: case.test, channels, outposts: points.len(), radius, mst_weight })
}

/// Solves every case independently; output keeps input order.
pub fn run_cases(cases: &[RawCase], cfg: &Config) -> Result<(Vec<CaseOutcome>, RunStats)> {
    let outcomes = cases
        .par_iter()
        .map(|case| solve_case(case, &cfg.limits))
        .collect::<Result<Vec<_>>>()?;
    let stats = RunStats::from_outcomes(&outcomes);
    info!("solved {} of {} cases ({} rejected)", stats.solved, stats.cases, stats.rejected);
    Ok((outcomes, stats))
}

pub fn run_file(path: &Path, cfg: &Config) -> Result<(Vec<CaseOutcome>, RunStats)> {
    info!("reading cases from {}", path.display());
    let cases = input::read_cases(path, &cfg.limits)?;
    run_cases(&cases, cfg)
}

/// Adjacency listing, tree edges and radius for the case numbered `test`.
pub fn inspect_case(cases: &[RawCase], test: usize, limits: &Limits) -> Result<String> {
    let Some(case) = cases.iter().find(|c| c.test == test) else {
        bail!("no test {} in input ({} cases)", test, cases.len());
    };
    let points = match input::validate(case, limits) {
        Ok(points) => points,
        Err(rejection) => bail!("test {} rejected: {}", test, rejection),
    };

    let mut network = RadioNetwork::build_graph(case.channels as usize, &points);
    network.compute_mst()?;
    let alloc = network.allocate()?;

    let mut out = String::new();
    write_inspection(&mut out, test, &network, &alloc)?;
    Ok(out)
}

fn write_inspection(out: &mut String, test: usize, network: &RadioNetwork, alloc: &ChannelAllocation) -> Result<()> {
    let graph = network.graph();
    let tree = network.tree()?;
    writeln!(out, "Test {}: {} outposts, {} channels", test, graph.vertex_count(), network.channel_budget())?;
    writeln!(out, "Outposts:")?;
    for (v, p) in graph.points().iter().enumerate() {
        writeln!(out, "  {}: ({}, {})", v, p.x, p.y)?;
    }
    write!(out, "{}", graph)?;
    writeln!(out, "Spanning tree:")?;
    for e in tree.edges() {
        writeln!(out, "  {} -> {}  {:.2}", e.parent, e.child, e.weight)?;
    }
    writeln!(out, "Total weight: {:.2}", tree.total_weight())?;
    writeln!(out, "Channels: {:?}", alloc.equipped)?;
    writeln!(out, "D: {:.2}", alloc.radius)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn case(test: usize, channels: i64, coords: &[(i64, i64)]) -> RawCase {
        RawCase { test, channels, outposts: coords.len() as i64, coords: coords.to_vec() }
    }

    #[test]
    fn solves_valid_case() -> Result<()> {
        let out = solve_case(&case(1, 1, &[(0, 0), (3, 4)]), &Limits::default())?;
        assert_eq!(
            out,
            CaseOutcome::Ok { test: 1, channels: 1, outposts: 2, radius: 5.0, mst_weight: 5.0 }
        );
        Ok(())
    }

    #[test]
    fn rejected_case_skips_core() -> Result<()> {
        let out = solve_case(&case(3, 2, &[(0, 0), (3, 4)]), &Limits::default())?;
        assert!(matches!(out, CaseOutcome::Rejected { test: 3, .. }));
        Ok(())
    }

    #[test]
    fn run_keeps_order_and_counts() -> Result<()> {
        let cases = vec![
            case(1, 1, &[(0, 0), (0, 3), (4, 0), (4, 3)]),
            case(2, 0, &[(0, 0), (1, 1)]),
            case(3, 1, &[(0, 0), (3, 4)]),
        ];
        let (outcomes, stats) = run_cases(&cases, &Config::default())?;
        assert_eq!(outcomes.iter().map(|o| o.test()).collect::<Vec<_>>(), vec![1, 2, 3]);
        assert_eq!(stats, RunStats { cases: 3, solved: 2, rejected: 1 });
        Ok(())
    }

    #[test]
    fn inspect_lists_tree() -> Result<()> {
        let cases = vec![case(1, 1, &[(0, 0), (3, 4)])];
        let text = inspect_case(&cases, 1, &Limits::default())?;
        assert!(text.starts_with("Test 1: 2 outposts, 1 channels\n"));
        assert!(text.contains("  1: (3, 4)"));
        assert!(text.contains("Adjacency List:"));
        assert!(text.contains("  0 -> 1  5.00"));
        assert!(text.contains("D: 5.00"));
        assert!(inspect_case(&cases, 2, &Limits::default()).is_err());
        Ok(())
    }

    #[test]
    fn malformed_lines_in_rejected_case_do_not_stop_the_run() -> Result<()> {
        let cases = input::parse_cases("2\n0 2\n? ?\n? ?\n1 2\n0 0\n3 4\n", &Limits::default())?;
        let (outcomes, stats) = run_cases(&cases, &Config::default())?;
        assert!(matches!(outcomes[0], CaseOutcome::Rejected { test: 1, .. }));
        assert!(matches!(outcomes[1], CaseOutcome::Ok { test: 2, radius, .. } if radius == 5.0));
        assert_eq!(stats, RunStats { cases: 2, solved: 1, rejected: 1 });
        Ok(())
    }
}
