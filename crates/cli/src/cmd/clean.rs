//! Implementation of the `jtc-release clean` command.
//!
//! Removes the named cache volumes. Built images are left alone; use
//! `build-image --force` to refresh those.

use anyhow::Result;

use jtc_release_core::pipeline::Task;
use jtc_release_core::PipelineConfig;

use crate::output::print_success;

pub fn cmd_clean(clean_cargo: bool, dry_run: bool) -> Result<()> {
    // Volume names are global; no checkout is needed for a clean.
    let config = PipelineConfig::from_repo(".");
    super::run_pipeline(&config, Task::Clean { clean_cargo }, dry_run)?;

    if !dry_run {
        print_success(if clean_cargo {
            "removed build and cargo cache volumes"
        } else {
            "removed build cache volume"
        });
    }
    Ok(())
}
