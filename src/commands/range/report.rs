use anyhow::Result;
use serde::Serialize;
use std::fmt::Write as _;

/// Per-case result, in input order.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum CaseOutcome {
    Ok {
        test: usize,
        channels: usize,
        outposts: usize,
        radius: f64,
        mst_weight: f64,
    },
    Rejected {
        test: usize,
        message: String,
    },
}

impl CaseOutcome {
    pub fn test(&self) -> usize {
        match self {
            CaseOutcome::Ok { test, .. } | CaseOutcome::Rejected { test, .. } => *test,
        }
    }

    pub fn is_ok(&self) -> bool {
        matches!(self, CaseOutcome::Ok { .. })
    }
}

pub const EMPTY_INPUT: &str = "File empty";

pub fn render_text(outcomes: &[CaseOutcome]) -> String {
    if outcomes.is_empty() {
        return format!("{}\n", EMPTY_INPUT);
    }
    let mut out = String::new();
    for o in outcomes {
        match o {
            CaseOutcome::Ok { test, radius, .. } => {
                let _ = writeln!(out, "Test {}:", test);
                let _ = writeln!(out, "{:.2}", radius);
            }
            CaseOutcome::Rejected { test, message } => {
                let _ = writeln!(out, "Error in test {}! {}", test, message);
            }
        }
        out.push('\n');
    }
    out
}

pub fn render_json(outcomes: &[CaseOutcome]) -> Result<String> {
    Ok(serde_json::to_string_pretty(outcomes)?)
}
