//! fedi-tui: browse ActivityPub documents with HTTP-signed requests.
//!
//! On startup the process loads (or creates) its RSA identity, publishes
//! the matching actor document on a small HTTP server so peers can resolve
//! the key id, and opens the terminal navigator.
//!
//! ## Usage
//!
//! ```bash
//! fedi-tui --root-uri https://example.com/alice --preferred-username alice --name Alice
//!
//! # Open a document immediately, no profile server
//! fedi-tui --no-server --start-uri https://mastodon.example/users/bob
//! ```

use std::io;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::prelude::*;
use tokio::sync::mpsc;
use tracing::{error, info, warn};

use fedi_actor::{ActorDocument, ProfileServer};
use fedi_crypto::KeyManager;
use fedi_telemetry::{init_logging, TelemetryConfig};
use fedi_tui::{
    event::spawn_input_reader, fetch::spawn_fetch, ui, App, Args, Command, FetchPipeline,
};

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let telemetry = TelemetryConfig::from_env().with_log_file(&args.log_file);
    init_logging(&telemetry).context("failed to initialise logging")?;

    if args.root_uri.is_empty() {
        warn!("No --root-uri given; signatures will carry keyId \"#main-key\"");
    }

    // Key failures are fatal: nothing can be signed without an identity.
    let identity = KeyManager::new(&args.key_path)
        .ensure_identity(&args.root_uri)
        .with_context(|| format!("failed to load identity from {}", args.key_path.display()))?;
    let identity = Arc::new(identity);
    info!(key_id = %identity.key_id(), "Identity ready");

    let actor = Arc::new(
        ActorDocument::from_identity(&identity, &args.preferred_username, &args.name)
            .context("failed to build actor document")?,
    );

    if !args.no_server {
        start_profile_server(&args, actor).await;
    }

    let pipeline = Arc::new(
        FetchPipeline::new(Arc::clone(&identity), args.timeout())
            .context("failed to create HTTP client")?,
    );

    // Setup terminal with panic hook for cleanup
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture);
        original_hook(info);
    }));

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, pipeline, args.start_uri.as_deref()).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(e) = &result {
        error!(error = %e, "Event loop failed");
    }
    info!("Exiting");
    result
}

/// Bind and spawn the profile server. A bind failure only disables it.
async fn start_profile_server(args: &Args, actor: Arc<ActorDocument>) {
    match ProfileServer::bind(args.listen_addr, actor).await {
        Ok(server) => {
            tokio::spawn(async move {
                if let Err(e) = server.run().await {
                    error!(error = %e, "Profile server stopped");
                }
            });
        }
        Err(e) => warn!(error = %e, "Profile server disabled"),
    }
}

/// Main application loop.
async fn run_app<B: Backend>(
    terminal: &mut Terminal<B>,
    pipeline: Arc<FetchPipeline>,
    start_uri: Option<&str>,
) -> Result<()> {
    let (tx, mut rx) = mpsc::unbounded_channel();
    spawn_input_reader(tx.clone()).context("failed to start input reader")?;

    let size = terminal.size()?;
    let mut app = App::new(Rect::new(0, 0, size.width, size.height));

    let mut pending = start_uri.and_then(|uri| app.navigate(uri));

    loop {
        match pending.take() {
            Some(Command::Fetch(request)) => {
                info!(uri = %request.uri, generation = request.generation, "Fetching");
                spawn_fetch(Arc::clone(&pipeline), request, tx.clone());
            }
            Some(Command::Quit) => return Ok(()),
            None => {}
        }

        terminal.draw(|frame| ui::render(frame, &app))?;

        let Some(event) = rx.recv().await else {
            return Ok(());
        };
        pending = app.handle_event(event);
    }
}
