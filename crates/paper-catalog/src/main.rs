//! Interactive terminal viewer for the accepted-papers catalog.

use std::io::Write;
use std::sync::Arc;

use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};

use paper_catalog::commands::{Command, USAGE};
use paper_catalog::config::{Config, api};
use paper_catalog::download::{DownloadOutcome, Downloader, suggested_filename};
use paper_catalog::formatters;
use paper_catalog::models::Paper;
use paper_catalog::session::CatalogSession;
use paper_catalog::source::{CatalogClient, LoadState, PaperSource};

#[derive(Parser, Debug)]
#[command(name = "paper-catalog", version, about = "Browse accepted research papers from the terminal")]
struct Args {
    /// Data provider origin.
    #[arg(long, env = "PAPER_CATALOG_ORIGIN")]
    origin: Option<String>,

    /// Cards per page.
    #[arg(long, default_value_t = api::DEFAULT_PAGE_SIZE)]
    page_size: usize,

    /// Print the first page as JSON and exit.
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let mut config = args.origin.as_deref().map_or_else(Config::from_env, Config::with_origin);
    config.page_size = args.page_size.max(1);

    let client = CatalogClient::new(&config)?;
    let mut source = PaperSource::activate(client);

    if args.json {
        return run_json(&mut source, &config).await;
    }

    print!("{}", formatters::render_loading());
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    let Some(records) = await_records(&mut source, &mut lines).await? else {
        return Ok(());
    };

    run_interactive(records, &config, &mut lines).await
}

/// One-shot mode: settle the fetch, print the first page as JSON.
async fn run_json(source: &mut PaperSource, config: &Config) -> anyhow::Result<()> {
    match source.settled().await {
        LoadState::Loaded(records) => {
            let mut session = CatalogSession::new(records, config.page_size);
            let page = formatters::page_json(&session.view(), &config.origin);
            println!("{}", serde_json::to_string_pretty(&page)?);
            Ok(())
        }
        LoadState::Failed(message) => anyhow::bail!(message),
        LoadState::Loading => Ok(()),
    }
}

/// Result of one wait step while the catalog is loading.
enum LoadingStep {
    Settled(LoadState),
    Input(Option<String>),
}

/// Wait for the fetch to settle, still honoring quit (which cancels the
/// in-flight fetch silently).
async fn await_records(
    source: &mut PaperSource,
    lines: &mut Lines<BufReader<Stdin>>,
) -> anyhow::Result<Option<Arc<Vec<Paper>>>> {
    loop {
        let step = tokio::select! {
            state = source.settled() => LoadingStep::Settled(state),
            line = lines.next_line() => LoadingStep::Input(line?),
        };

        match step {
            LoadingStep::Settled(LoadState::Loaded(records)) => return Ok(Some(records)),
            LoadingStep::Settled(LoadState::Failed(message)) => {
                print!("{}", formatters::render_error(&message));
                anyhow::bail!(message)
            }
            // The state channel closed without settling; nothing to show.
            LoadingStep::Settled(LoadState::Loading) => return Ok(None),
            LoadingStep::Input(None) => {
                source.deactivate().await;
                return Ok(None);
            }
            LoadingStep::Input(Some(line)) => {
                if matches!(Command::parse(&line), Ok(Command::Quit)) {
                    source.deactivate().await;
                    return Ok(None);
                }
                print!("{}", formatters::render_loading());
            }
        }
    }
}

async fn run_interactive(
    records: Arc<Vec<Paper>>,
    config: &Config,
    lines: &mut Lines<BufReader<Stdin>>,
) -> anyhow::Result<()> {
    let downloader = Downloader::new(config)?;
    let mut session = CatalogSession::new(records, config.page_size);

    print!("{}", formatters::render_page(&session.view(), &config.origin));
    prompt()?;

    while let Some(line) = lines.next_line().await? {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            prompt()?;
            continue;
        }

        match Command::parse(trimmed) {
            Err(hint) => println!("{hint}"),
            Ok(Command::Quit) => break,
            Ok(Command::Help) => println!("{USAGE}"),
            Ok(command) => {
                apply(&mut session, &downloader, config, command).await;
            }
        }
        prompt()?;
    }

    Ok(())
}

/// Apply one intent and print the resulting view.
async fn apply(
    session: &mut CatalogSession,
    downloader: &Downloader,
    config: &Config,
    command: Command,
) {
    match command {
        Command::Search(query) => session.set_query(&query),
        Command::ClearSearch => session.clear_query(),
        Command::Field(field) => session.set_field(field),
        Command::Sort(sort_by) => session.set_sort(sort_by),
        Command::Direction(sort_dir) => session.set_direction(sort_dir),
        Command::Page(page) => session.set_page(page),
        Command::Next => session.next_page(),
        Command::Prev => session.prev_page(),
        Command::View(position) => {
            match session.record_at(position) {
                Some(paper) => print!("{}", formatters::render_detail(paper, &config.origin)),
                None => println!("No card {position} on this page."),
            }
            return;
        }
        Command::Download(position) => {
            download(session, downloader, position).await;
            return;
        }
        // Handled by the caller.
        Command::Help | Command::Quit => return,
    }
    print!("{}", formatters::render_page(&session.view(), &config.origin));
}

async fn download(session: &mut CatalogSession, downloader: &Downloader, position: usize) {
    let Some(paper) = session.record_at(position) else {
        println!("No card {position} on this page.");
        return;
    };
    let Some(url) = paper.download_target().map(ToString::to_string) else {
        println!("No downloadable file for card {position}.");
        return;
    };
    let filename = suggested_filename(paper.display_title());

    match downloader.fetch(&url, Some(&filename)).await {
        DownloadOutcome::Saved(path) => println!("Saved {}", path.display()),
        DownloadOutcome::Opened(url) => println!("Open in browser: {url}"),
    }
}

fn prompt() -> std::io::Result<()> {
    print!("> ");
    std::io::stdout().flush()
}
