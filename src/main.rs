// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use addon_closure::config::{load_scenario, Scenario};
use addon_closure::references::{detect_circular_dependencies, find_unresolved_references};
use addon_closure::resolver::{DependencyGraphBuilder, DependencyGraphResult};
use addon_closure::validation::validate_dependencies;
use anyhow::Context;
use clap::{Args, Parser, Subcommand};

/// Checks an addon's dependency closure against what was deployed.
#[derive(Parser, Debug)]
#[command(name = "addon-closure", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Build the expected closure, validate the deployment and check pending references.
    Check(ScenarioArgs),
    /// Print the resolved dependency graph as JSON.
    Graph(GraphArgs),
    /// Check pending configurations for circular and unresolved references.
    Cycles(ScenarioArgs),
}

#[derive(Args, Debug)]
struct ScenarioArgs {
    /// Scenario file (.yaml, .yml, .json or .toml)
    scenario: PathBuf,

    /// Fail when circular or unresolved references are found.
    #[arg(long)]
    strict: bool,
}

#[derive(Args, Debug)]
struct GraphArgs {
    /// Scenario file (.yaml, .yml, .json or .toml)
    scenario: PathBuf,
}

fn main() -> anyhow::Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let passed = match cli.command {
        Command::Check(args) => run_check(&args)?,
        Command::Graph(args) => run_graph(&args.scenario)?,
        Command::Cycles(args) => run_cycles(&args)?,
    };

    Ok(if passed {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

fn load(path: &Path) -> anyhow::Result<Scenario> {
    load_scenario(path).with_context(|| format!("loading scenario {}", path.display()))
}

fn resolve(scenario: &Scenario) -> anyhow::Result<DependencyGraphResult> {
    let root = &scenario.root;
    DependencyGraphBuilder::new(&scenario.catalog)
        .with_required_policy(scenario.settings.required_policy)
        .build_dependency_graph(
            &root.catalog_id,
            &root.offering_id,
            &root.version_locator,
            &root.flavor,
            &scenario.addon,
            BTreeSet::new(),
        )
        .with_context(|| format!("resolving dependency closure of '{}'", scenario.addon.offering_name))
}

fn run_check(args: &ScenarioArgs) -> anyhow::Result<bool> {
    let scenario = load(&args.scenario)?;
    let result = resolve(&scenario)?;

    println!("📦 Dependency closure of '{}'", scenario.addon.offering_name);
    println!("═══════════════════════════════════");
    for node in &result.expected_deployed {
        println!("  • {}", node);
    }
    println!();

    let validation =
        validate_dependencies(&result.graph, &result.expected_deployed, &scenario.deployed);
    print!("{}", validation);
    println!();

    let references_ok = report_references(&scenario, args.strict);

    Ok(validation.is_valid && references_ok)
}

fn run_graph(path: &Path) -> anyhow::Result<bool> {
    let scenario = load(path)?;
    let result = resolve(&scenario)?;

    let json = serde_json::to_string_pretty(&result).context("serializing dependency graph")?;
    println!("{}", json);
    Ok(true)
}

fn run_cycles(args: &ScenarioArgs) -> anyhow::Result<bool> {
    let scenario = load(&args.scenario)?;
    Ok(report_references(&scenario, args.strict))
}

/// Prints reference findings; returns false only when they count as failures.
fn report_references(scenario: &Scenario, strict: bool) -> bool {
    let strict = strict || scenario.settings.strict_cycles;
    let pending = scenario.pending_dependency_info();

    let cycles = detect_circular_dependencies(&pending);
    let unresolved = find_unresolved_references(&pending, &scenario.existing_ids());

    if cycles.is_empty() && unresolved.is_empty() {
        println!("✅ No circular or unresolved references among {} pending configurations", pending.len());
        return true;
    }

    let marker = if strict { "❌" } else { "⚠️" };
    for cycle in &cycles {
        println!("{} {}", marker, cycle);
        println!();
    }
    for finding in &unresolved {
        println!("{} {}", marker, finding);
    }

    !strict
}
