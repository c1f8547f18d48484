use anyhow::{Context, Result, bail};
use clap::Parser;
use placesaver_browser::{
    CdpDriver, ListResolutionEngine, PlaceImporter, SaveSequencer, SessionController, find_chrome,
};
use placesaver_cli::args::{self, Cli};
use placesaver_core::{ListTarget, PlaceRecord, RecordSource, RowWindow};

fn main() -> Result<()> {
    // Usage errors exit 1 like every other configuration failure; clap's
    // default would be 2.
    let cli = Cli::try_parse().unwrap_or_else(|e| {
        let _ = e.print();
        let code = match e.kind() {
            clap::error::ErrorKind::DisplayHelp | clap::error::ErrorKind::DisplayVersion => 0,
            _ => 1,
        };
        std::process::exit(code);
    });

    init_logging(cli.verbose);

    if cli.email.is_empty() {
        bail!("--email requires a non-empty string");
    }
    if cli.pass.is_empty() {
        bail!("--pass requires a non-empty string");
    }

    let target = args::resolve_target(cli.list_type, cli.list_name.as_deref())?;
    let window = RowWindow::new(cli.from, cli.to)?;

    // The whole window is read and validated before the browser starts.
    let records = RecordSource::new(&cli.file, window)
        .load()
        .with_context(|| format!("failed to read {}", cli.file.display()))?;
    if records.is_empty() {
        tracing::warn!("No records inside the requested row window, nothing to do");
        return Ok(());
    }
    tracing::info!(
        "Importing {} record(s) into \"{}\"",
        records.len(),
        target.display_name()
    );

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;
    runtime.block_on(run_import(cli, target, records))
}

async fn run_import(cli: Cli, target: ListTarget, records: Vec<PlaceRecord>) -> Result<()> {
    let chrome = find_chrome(cli.chrome_path)?;
    let mut driver = CdpDriver::launch(&chrome).await?;

    let sequencer = SaveSequencer::new(
        SessionController::new(cli.email, cli.pass),
        ListResolutionEngine::new(),
        target,
    );
    let summary = PlaceImporter::new(sequencer)
        .run(&mut driver, &records)
        .await;

    driver.close().await?;

    // Record-level failures were logged as they happened and do not change
    // the exit code; only pre-flight errors abort the run.
    if summary.failed_count() > 0 {
        tracing::warn!(
            "{} record(s) were not saved, see the log above",
            summary.failed_count()
        );
    }
    Ok(())
}

fn init_logging(verbose: bool) {
    use tracing_subscriber::EnvFilter;

    let filter = if verbose {
        EnvFilter::new("placesaver=debug,placesaver_core=debug,placesaver_browser=debug")
    } else {
        EnvFilter::new("placesaver=info,placesaver_core=info,placesaver_browser=info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .init();
}
