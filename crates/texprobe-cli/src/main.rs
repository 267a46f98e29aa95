#![forbid(unsafe_code)]

mod config;

use std::io::Write;

use anyhow::{Context, Result};
use texprobe_formats::TEXTURE_FORMATS;
use texprobe_suite::{SoftwareHost, TestRegistry, VolumeTextureSuite};
use tracing_subscriber::EnvFilter;

use crate::config::Config;

fn main() -> Result<()> {
    let config = Config::load();

    let filter = EnvFilter::try_new(&config.log_level)
        .with_context(|| format!("invalid log filter {:?}", config.log_level))?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    if config.list {
        let registry = TestRegistry::for_catalog(TEXTURE_FORMATS);
        let mut stdout = std::io::stdout().lock();
        for name in registry.names() {
            writeln!(stdout, "{name}").context("failed to write test list")?;
        }
        return Ok(());
    }

    let host = SoftwareHost::new(config.host);
    let mut suite = VolumeTextureSuite::new(host, config.suite);
    tracing::info!(
        tests = suite.registry().len(),
        output_dir = %suite.output_dir().display(),
        saving = suite.options().allow_saving,
        "running volume texture suite"
    );

    let outcomes = if config.tests.is_empty() {
        suite.run_all()
    } else {
        suite.run_named(config.tests.as_slice())
    }
    .context("volume texture suite aborted")?;

    for outcome in &outcomes {
        match &outcome.artifact {
            Some(path) => println!("{}: {}", outcome.name, path.display()),
            None => println!("{}: ok", outcome.name),
        }
    }
    Ok(())
}
