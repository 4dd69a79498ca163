//! Task orchestration
//!
//! A declarative task graph: each task lists the prerequisites that must
//! complete before it, the transitive closure is toposorted, and the
//! resulting order runs sequentially. Within one invocation a task runs
//! at most once; the first failure halts everything after it.

use std::collections::HashMap;
use std::fmt;

use petgraph::algo::toposort;
use petgraph::graph::{DiGraph, NodeIndex};
use tracing::info;

use crate::build::build_binary;
use crate::command::CommandRunner;
use crate::config::{CACHE_VOLUME, CARGO_VOLUME, PipelineConfig};
use crate::docker;
use crate::error::PipelineError;
use crate::manifest::read_version;
use crate::provision::ensure_image;
use crate::publish::publish;
use crate::target::BuildTarget;

/// A named, parameterized pipeline task.
///
/// The two target lineages are independent; they share nothing but the
/// cache volumes and the image namespace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Task {
    /// Ensure or force-rebuild the tagged build image.
    BuildImage { target: BuildTarget, force: bool },
    /// Compile inside the build image.
    Build { target: BuildTarget, release: bool },
    /// Package the release build into the versioned archive.
    Publish { target: BuildTarget },
    /// Remove the build-intermediate cache volume, and optionally the
    /// toolchain-state volume. Never touches built images.
    Clean { clean_cargo: bool },
}

impl Task {
    /// Prerequisites, in the order they must complete.
    pub fn prerequisites(self) -> Vec<Task> {
        match self {
            Task::BuildImage { .. } | Task::Clean { .. } => Vec::new(),
            Task::Build { target, .. } => vec![Task::BuildImage {
                target,
                force: false,
            }],
            Task::Publish { target } => vec![Task::Build {
                target,
                release: true,
            }],
        }
    }
}

impl fmt::Display for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Task::BuildImage { target, force: true } => write!(f, "build-image({target}, force)"),
            Task::BuildImage { target, force: false } => write!(f, "build-image({target})"),
            Task::Build { target, release } => {
                let mode = if *release { "release" } else { "debug" };
                write!(f, "build({target}, {mode})")
            }
            Task::Publish { target } => write!(f, "publish({target})"),
            Task::Clean { clean_cargo: true } => write!(f, "clean(cargo)"),
            Task::Clean { clean_cargo: false } => write!(f, "clean"),
        }
    }
}

/// Options shared by all pipeline entry points.
#[derive(Debug, Clone, Copy, Default)]
pub struct RunOptions {
    /// Describe the work instead of doing it. Docker invocations are
    /// printed through the runner; publish filesystem mutations are
    /// announced and skipped.
    pub dry_run: bool,
}

/// Expand a task's transitive prerequisites into a sequential order.
///
/// Dependencies come first and each distinct task appears once, so a
/// prerequisite shared by two tasks is not re-entered.
pub fn execution_order(task: Task) -> Result<Vec<Task>, PipelineError> {
    let mut graph: DiGraph<Task, ()> = DiGraph::new();
    let mut nodes: HashMap<Task, NodeIndex> = HashMap::new();
    let mut pending = vec![task];

    while let Some(current) = pending.pop() {
        let idx = *nodes
            .entry(current)
            .or_insert_with(|| graph.add_node(current));

        for prereq in current.prerequisites() {
            let seen = nodes.contains_key(&prereq);
            let dep_idx = *nodes
                .entry(prereq)
                .or_insert_with(|| graph.add_node(prereq));
            graph.add_edge(dep_idx, idx, ());
            if !seen {
                pending.push(prereq);
            }
        }
    }

    let sorted = toposort(&graph, None)
        .map_err(|cycle| PipelineError::Cycle(graph[cycle.node_id()].to_string()))?;
    Ok(sorted.into_iter().map(|idx| graph[idx]).collect())
}

/// Run `task` and everything it requires, sequentially.
pub fn run_task(
    config: &PipelineConfig,
    runner: &dyn CommandRunner,
    task: Task,
    options: RunOptions,
) -> Result<(), PipelineError> {
    let order = execution_order(task)?;

    // The archive name comes from the manifest; resolve it before any
    // subprocess runs so a broken manifest aborts the whole workflow.
    let version = if order.iter().any(|step| matches!(step, Task::Publish { .. })) {
        Some(read_version(&config.cargo_toml)?)
    } else {
        None
    };

    for step in order {
        info!(task = %step, "running task");
        run_single(config, runner, step, options, version.as_ref())?;
    }
    Ok(())
}

fn run_single(
    config: &PipelineConfig,
    runner: &dyn CommandRunner,
    task: Task,
    options: RunOptions,
    version: Option<&semver::Version>,
) -> Result<(), PipelineError> {
    match task {
        Task::BuildImage { target, force } => ensure_image(config, runner, target, force),
        Task::Build { target, release } => build_binary(config, runner, target, release),
        Task::Publish { .. } => {
            let version = match version {
                Some(version) => version.clone(),
                None => read_version(&config.cargo_toml)?,
            };
            if options.dry_run {
                println!(
                    "dry-run: would stage {} and {} into {}",
                    config.product,
                    config.service_name(),
                    config.dist_dir.display()
                );
                println!(
                    "dry-run: would write {}",
                    config.archive_path(&version).display()
                );
                return Ok(());
            }
            publish(config, &version)?;
            Ok(())
        }
        Task::Clean { clean_cargo } => {
            remove_volume(runner, CACHE_VOLUME)?;
            if clean_cargo {
                remove_volume(runner, CARGO_VOLUME)?;
            }
            Ok(())
        }
    }
}

fn remove_volume(runner: &dyn CommandRunner, name: &str) -> Result<(), PipelineError> {
    info!(volume = name, "removing cache volume");
    runner
        .run(&docker::volume_remove(name))
        .map_err(PipelineError::Clean)
}
