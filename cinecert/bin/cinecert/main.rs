//! CineCert - Home theater room certification
//!
//! Copyright (C) 2025 Pierre Aubert pierre(at)spinorama(dot)org
//!
//! This program is free software: you can redistribute it and/or modify
//! it under the terms of the GNU General Public License as published by
//! the Free Software Foundation, either version 3 of the License, or
//! (at your option) any later version.
//!
//! This program is distributed in the hope that it will be useful,
//! but WITHOUT ANY WARRANTY; without even the implied warranty of
//! MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
//! GNU General Public License for more details.
//!
//! You should have received a copy of the GNU General Public License
//! along with this program.  If not, see <https://www.gnu.org/licenses/>.

use anyhow::{Context, Result, anyhow};
use clap::{Parser, ValueEnum};
use log::{debug, error, info, warn};
use rayon::prelude::*;
use schemars::schema_for;
use std::path::{Path, PathBuf};

use cinecert::{AnalysisResult, analyze_project, load_project_config, validate_project_config};

mod report;

/// Output format of the analysis
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// Serialized analysis result
    Json,
    /// Human readable report
    Markdown,
}

impl OutputFormat {
    fn extension(self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::Markdown => "md",
        }
    }
}

/// CineCert - Check a home theater design against viewing and acoustic guidance
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to a project configuration JSON file (repeat for several projects)
    #[arg(short, long, required_unless_present = "schema")]
    config: Vec<PathBuf>,

    /// Output file, or directory when several configurations are given (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
    format: OutputFormat,

    /// Treat configuration warnings as errors
    #[arg(long)]
    strict: bool,

    /// Verbose output (deprecated, use RUST_LOG env var)
    #[arg(short, long)]
    verbose: bool,

    /// Dump JSON schema for the output format
    #[arg(long)]
    schema: bool,
}

fn main() -> Result<()> {
    // Initialize logger safely
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    if args.schema {
        let schema = schema_for!(AnalysisResult);
        println!("{}", serde_json::to_string_pretty(&schema)?);
        return Ok(());
    }

    if args.verbose {
        warn!("The --verbose flag is deprecated. Use RUST_LOG=debug instead.");
    }

    run(&args)
}

/// Load, validate and analyze one configuration file
fn process_config(config_path: &Path, strict: bool) -> Result<AnalysisResult> {
    info!("Loading project configuration from {:?}", config_path);

    let config = load_project_config(config_path)
        .with_context(|| format!("Failed to load config file: {:?}", config_path))?;

    let validation = validate_project_config(&config);
    validation.log_results();
    if strict && !validation.warnings.is_empty() {
        return Err(anyhow!(
            "{} configuration warning(s) in {:?} (--strict)",
            validation.warnings.len(),
            config_path
        ));
    }

    debug!(
        "{:?}: {} rows, {} walls, {} content",
        config_path,
        config.rows.len(),
        config.wall_construction.label(),
        config.content_standard.label()
    );

    analyze_project(&config).with_context(|| format!("Analysis of {:?} failed", config_path))
}

fn render(result: &AnalysisResult, title: &str, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => {
            serde_json::to_string_pretty(result).context("Failed to serialize analysis result")
        }
        OutputFormat::Markdown => Ok(report::render_markdown(result, title)),
    }
}

fn config_stem(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "project".to_string())
}

/// Where a result goes: a file, a file inside the output directory, or stdout
fn output_target(args: &Args, config_path: &Path) -> Option<PathBuf> {
    let output = args.output.as_ref()?;
    if args.config.len() > 1 {
        Some(output.join(format!(
            "{}.{}",
            config_stem(config_path),
            args.format.extension()
        )))
    } else {
        Some(output.clone())
    }
}

fn run(args: &Args) -> Result<()> {
    if let Some(dir) = args.output.as_ref().filter(|_| args.config.len() > 1) {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create output directory: {:?}", dir))?;
    }

    // Projects are independent, analyze them in parallel
    let results: Vec<(PathBuf, Result<AnalysisResult>)> = args
        .config
        .par_iter()
        .map(|path| (path.clone(), process_config(path, args.strict)))
        .collect();

    let mut failures = 0;
    for (config_path, result) in results {
        let analysis = match result {
            Ok(analysis) => analysis,
            Err(e) => {
                error!("{:#}", e);
                failures += 1;
                continue;
            }
        };

        info!(
            "{:?}: {} (score {:.0}/100, RT60 {:.2}s)",
            config_path,
            analysis.certification.label(),
            analysis.score,
            analysis.rt60.estimated_rt60
        );

        let rendered = render(&analysis, &config_stem(&config_path), args.format)?;
        match output_target(args, &config_path) {
            Some(target) => {
                info!("Saving result to {:?}", target);
                std::fs::write(&target, rendered)
                    .with_context(|| format!("Failed to write output: {:?}", target))?;
            }
            None => println!("{}", rendered),
        }
    }

    if failures > 0 {
        return Err(anyhow!(
            "{} of {} configuration(s) failed",
            failures,
            args.config.len()
        ));
    }

    info!("Done!");
    Ok(())
}
