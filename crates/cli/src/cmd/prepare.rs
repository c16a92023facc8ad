//! Prepare command implementation
//!
//! Overlay the packaging resources onto the selected project.

use clap::Args;
use nuprep_engine::directory::DirectoryHost;
use nuprep_engine::prepare::{PrepareStats, prepare};
use owo_colors::OwoColorize;
use std::path::PathBuf;
use tracing::{debug, info};

use crate::command::Command;
use crate::common::RuntimeContext;
use crate::error::Result;

/// Mirror the packaging resources into the project and install the package
/// manifest
#[derive(Debug, Clone, Args)]
pub struct PrepareCommand {
    /// Directory holding the packaging resource templates
    #[arg(long, env = "NUPREP_RESOURCES_DIR", value_name = "DIR")]
    pub resources: PathBuf,
}

impl Command for PrepareCommand {
    type Output = PrepareStats;

    fn execute(&self, context: &RuntimeContext) -> Result<PrepareStats> {
        let mut host = DirectoryHost::open(context.project_root().clone())?;
        let project = host.project().clone();
        debug!(
            project = %project.name,
            resources = %self.resources.display(),
            "starting preparation"
        );

        let stats = prepare(&mut host, &self.resources, &project)?;

        print_summary(&stats);
        info!(project = %project.name, "project saved");
        Ok(stats)
    }
}

/// Print what the run did, one line per resource root
fn print_summary(stats: &PrepareStats) {
    for name in &stats.mirrored {
        println!("  {} {}", "✓".bright_green(), name.bright_white());
    }
    for name in &stats.skipped {
        println!(
            "  {} {} {}",
            "-".yellow(),
            name.bright_white(),
            "(already present)".dimmed()
        );
    }
    println!(
        "  {} {}",
        "✓".bright_green(),
        stats.manifest_name.bright_white()
    );
}
