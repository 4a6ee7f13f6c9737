use anyhow::Result;
use clap::Args;
use std::path::PathBuf;

pub mod config;
pub mod executor;
pub mod input;
pub mod logging;
pub mod report;

#[derive(Args, Debug, Clone, Default)]
pub struct CommonOpts {
    /// Input file with the test cases (default: crate_root/input.txt or RADIO_INPUT)
    #[arg(long = "input")]
    pub input: Option<PathBuf>,
    /// Number of worker threads (rayon)
    #[arg(long = "threads")]
    pub threads: Option<usize>,
    /// Emit the report as JSON
    #[arg(long = "json")]
    pub json: bool,
    /// Log level (trace|debug|info|warn|error)
    #[arg(long = "log-level")]
    pub log_level: Option<String>,
}

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum RangeCommand {
    Solve,
    Inspect { case: usize },
}

/// CLI options overlaid with `RADIO_*` environment values (env wins when set).
pub fn resolve_config(common: &CommonOpts) -> config::Config {
    let mut cfg = config::Config {
        input: common.input.clone(),
        threads: common.threads,
        json: common.json,
        log_level: common.log_level.clone(),
        ..config::Config::default()
    };
    let env_cfg = config::Config::from_env_defaults();
    if env_cfg.input.is_some() { cfg.input = env_cfg.input; }
    if env_cfg.threads.is_some() { cfg.threads = env_cfg.threads; }
    if env_cfg.json { cfg.json = true; }
    if env_cfg.log_level.is_some() { cfg.log_level = env_cfg.log_level; }
    cfg.limits = env_cfg.limits;
    cfg
}

pub fn cmd_range(common: CommonOpts, sub: RangeCommand) -> Result<()> {
    let cfg = resolve_config(&common);

    logging::init(cfg.log_level.as_deref());
    if let Some(n) = cfg.threads {
        let _ = rayon::ThreadPoolBuilder::new().num_threads(n).build_global();
    }

    let input_path = cfg.input.clone().unwrap_or_else(crate::util::default_input);

    match sub {
        RangeCommand::Solve => {
            let (outcomes, _stats) = executor::run_file(&input_path, &cfg)?;
            if cfg.json {
                println!("{}", report::render_json(&outcomes)?);
            } else {
                print!("{}", report::render_text(&outcomes));
            }
            Ok(())
        }
        RangeCommand::Inspect { case } => {
            let cases = input::read_cases(&input_path, &cfg.limits)?;
            print!("{}", executor::inspect_case(&cases, case, &cfg.limits)?);
            Ok(())
        }
    }
}
