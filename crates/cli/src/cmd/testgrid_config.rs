use anyhow::{Context, Result};
use argp::FromArgs;
use ci_tools_core::config::GeneratorConfig;
use typed_path::Utf8NativePathBuf;

use crate::util::{native_path, to_std_path};

#[derive(FromArgs, PartialEq, Eq, Debug)]
/// Generate TestGrid dashboards for release-gating and release-informing jobs.
///
/// Reads the Release Controller configuration for all release candidates and
/// writes TestGrid configuration for the jobs involved, partitioned by product
/// (OKD or OCP), version, and whether they are blocking or informing.
pub struct Args {
    #[argp(option, from_str_fn(native_path))]
    /// path to Release Controller configuration directory
    release_config: Utf8NativePathBuf,
    #[argp(option, from_str_fn(native_path))]
    /// path to TestGrid configuration directory
    testgrid_config: Utf8NativePathBuf,
}

impl Args {
    pub fn config(&self) -> GeneratorConfig {
        GeneratorConfig::new(
            to_std_path(&self.release_config),
            to_std_path(&self.testgrid_config),
        )
    }
}

pub fn run(args: Args) -> Result<()> {
    let config = args.config();
    config.validate().context("Invalid options")?;
    let summary = ci_tools_testgrid::generate(&config)?;
    tracing::info!(
        descriptors = summary.descriptors,
        skipped = summary.skipped,
        dashboards = summary.dashboards,
        "Finished generating TestGrid dashboards."
    );
    Ok(())
}
