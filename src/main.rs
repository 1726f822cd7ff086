mod cli;

use vidmeta::{
    config,
    notifications::NotificationManager,
    scan::{self, ScanOptions},
    summary,
    table::{self, variants},
};

use anyhow::{Context, Result};
use clap::Parser;
use cli::Cli;
use std::sync::Arc;
use vidmeta_av::{check_tool, FfprobeProber};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Respect RUST_LOG env var if set, otherwise use defaults based on verbose flag
    let env_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| {
        if cli.verbose {
            "vidmeta=debug,vidmeta_av=debug,vidmeta_common=debug".to_string()
        } else {
            "vidmeta=info,vidmeta_av=info".to_string()
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(&env_filter)
        .with_writer(std::io::stderr)
        .init();

    let mut config = config::load_config_or_default(cli.config.as_deref())?;
    cli.apply_to(&mut config);
    config::validate_config(&config)?;

    if cli.update {
        anyhow::bail!("Update mode is not implemented; run a full scan instead");
    }

    let output = cli.output_path(&config);

    if cli.merge {
        tracing::info!("Merging {} tables into {:?}", cli.paths.len(), output);
        let report = table::merge_tables(&cli.paths, &output)?;
        summary::print_merge_summary(&report, &output);
        return Ok(());
    }

    let prober = FfprobeProber::new(&config.probe.ffprobe_path, config.probe.timeout())
        .with_context(|| {
            format!(
                "Cannot use {:?} for probing; install ffprobe or pass --ffprobe",
                config.probe.ffprobe_path
            )
        })?;
    if cli.verbose {
        let tool = check_tool(&prober.ffprobe_path().to_string_lossy());
        tracing::debug!(
            "Probing with {:?} ({})",
            prober.ffprobe_path(),
            tool.version.as_deref().unwrap_or("unknown version")
        );
    }

    let options = ScanOptions::from_config(&config, cli.paths.clone(), output.clone())?
        .with_progress(cli.percentage)
        .with_markers(cli.nomedia);

    summary::print_header(&cli.paths, options.workers, &output);

    let result = scan::run_scan(options, Arc::new(prober))?;
    result.summary.print(&output);

    if cli.verbose {
        variants::log_variants(&variants::find_variants(&result.rows));
    }

    let notifications = NotificationManager::new(&config.notify);
    if notifications.has_targets() {
        notifications.notify_all("vidmeta", &result.summary.notification_message());
    }

    Ok(())
}
