//! Reconcile command handler

use std::fs;

use anyhow::{Context, Result, bail};
use colored::*;

use super::{collect_inputs, file_name_of};
use crate::cli::{OutputFormat, ReconcileArgs};
use crate::config::Config;
use crate::recon::batch::{ReportFile, is_allowed_file};
use crate::recon::engine::process_batch;
use crate::recon::models::{BatchReport, DatePair};
use crate::scratch::ScratchDir;

/// Handle the reconcile command: collect and filter inputs, stage them in
/// a private scratch dir, run the pipeline and render the result. The
/// scratch dir is removed when this function returns, whatever the
/// outcome.
pub fn handle_reconcile_command(args: ReconcileArgs, config: &Config) -> Result<()> {
    if args.no_color {
        colored::control::set_override(false);
    }

    let registry = config.registry();
    if registry.is_empty() {
        bail!("Configured unit registry is empty");
    }

    let candidates = collect_inputs(&args.inputs)?;
    if candidates.is_empty() {
        bail!("No input files found");
    }

    // Extension allow-list, as the upload form enforced
    let mut accepted = Vec::new();
    for path in candidates {
        let name = file_name_of(&path);
        if is_allowed_file(&name) {
            accepted.push((path, name));
        } else {
            log::warn!("Skipping {}: not an .xlsx report", path.display());
        }
    }
    if accepted.is_empty() {
        bail!("No valid .xlsx report files among the inputs");
    }

    let scratch = ScratchDir::create().context("Failed to create scratch directory")?;
    log::debug!("Staging batch in {}", scratch.path().display());

    let mut batch = Vec::with_capacity(accepted.len());
    for (path, name) in &accepted {
        let staged = scratch
            .stage(path, name)
            .with_context(|| format!("Failed to stage {}", path.display()))?;
        batch.push(ReportFile::new(staged, name.clone()));
    }

    let min_days = args.min_days.unwrap_or(config.min_delinquent_days);

    let report = process_batch(&batch, &registry, config.resolve_cutoff, min_days)
        .context("Erro ao processar arquivos")?;

    let rendered = match args.format {
        OutputFormat::Json => {
            serde_json::to_string_pretty(&report).context("Failed to format JSON output")?
        }
        OutputFormat::Text => render_text(&report),
    };

    if let Some(output_path) = args.output {
        fs::write(&output_path, &rendered)
            .with_context(|| format!("Failed to write output to: {}", output_path.display()))?;
        println!("Result saved to: {}", output_path.display());
    } else {
        println!("{}", rendered);
    }

    Ok(())
}

/// Render a batch report for the terminal.
fn render_text(report: &BatchReport) -> String {
    let mut out = String::new();

    out.push_str(&format!(
        "Comparação: {}\n",
        render_date_pair(&DatePair {
            previous: report.diagnostics.previous,
            current: report.diagnostics.current,
        })
    ));

    for unit in &report.units {
        out.push('\n');
        out.push_str(&format!("{}\n", unit.unit.bold()));
        if let Some(alert) = &unit.alert {
            out.push_str(&format!("  {}\n", alert.yellow()));
            continue;
        }
        out.push_str(&format!(
            "  {} ({}): {}\n",
            "Bloquear".red(),
            unit.to_block.len(),
            join_or_dash(&unit.to_block)
        ));
        out.push_str(&format!(
            "  {} ({}): {}\n",
            "Desbloquear".green(),
            unit.to_unblock.len(),
            join_or_dash(&unit.to_unblock)
        ));
    }

    out.push('\n');
    out.push_str(&format!("{}\n", "Arquivos observados:".dimmed()));
    for obs in &report.diagnostics.files {
        let unit = obs.unit.as_deref().unwrap_or("(sem unidade)");
        let date = obs
            .date
            .map(|d| d.to_string())
            .unwrap_or_else(|| "(sem data)".to_string());
        out.push_str(&format!(
            "{}\n",
            format!("  {} {}: {} arquivo(s)", unit, date, obs.file_count).dimmed()
        ));
    }

    out
}

fn render_date_pair(dates: &DatePair) -> String {
    let previous = dates
        .previous
        .map(|d| d.to_string())
        .unwrap_or_else(|| "-".to_string());
    let current = dates
        .current
        .map(|d| d.to_string())
        .unwrap_or_else(|| "-".to_string());
    format!("{} -> {}", previous, current)
}

fn join_or_dash(ids: &[String]) -> String {
    if ids.is_empty() {
        "-".to_string()
    } else {
        ids.join(", ")
    }
}
