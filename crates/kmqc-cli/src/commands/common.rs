//! Shared helpers for CLI commands.

use std::path::PathBuf;

use anyhow::{Context, Result};
use console::style;
use tracing::debug;

use kmqc_adapter_qvm::{ConnectionConfig, connect};
use kmqc_ir::Program;

/// How a built program is dispatched.
#[derive(Debug, Clone)]
pub struct RunOptions {
    /// Print the payload and stop.
    pub dry_run: bool,
    /// YAML file with connection sections.
    pub config: Option<PathBuf>,
    /// Section of `config` to read.
    pub section: String,
}

/// Print the payload of `program`, or send it and print the response.
pub async fn run_program(program: &Program, opts: &RunOptions) -> Result<()> {
    if opts.dry_run {
        let payload = kmqc_ir::compile(program).context("Failed to compile program")?;
        println!("{}", serde_json::to_string_pretty(&payload)?);
        return Ok(());
    }

    debug!(section = %opts.section, config = ?opts.config, "Loading connection settings");
    let config = ConnectionConfig::load(opts.config.as_deref(), &opts.section)
        .with_context(|| format!("Failed to load connection section '{}'", opts.section))?;
    let conn = connect(config)?;

    println!(
        "  Executing {} instructions on {}",
        program.num_ops(),
        style(conn.endpoint()).yellow()
    );

    let response = conn.execute(program).await?;

    println!("\n{}", style("Response:").bold());
    println!("{}", serde_json::to_string_pretty(&response)?);

    Ok(())
}
