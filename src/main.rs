//! CaseMap TUI - tactical console for a construction-claims consultancy.
//!
//! A terminal dashboard over the firm's engagement book: project relationship
//! maps with drill-down anatomy boards, the document drive, the inbox, and
//! AI-drafted claim reports via the drafting service.

mod app;
mod data;
mod map;
mod models;
mod particles;
mod report;
mod sidebar;
mod theme;
mod ui;

use std::io::{self, stdout};
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::prelude::*;
use tokio::sync::mpsc;

use app::App;
use report::{ReportClient, ReportCommand, ReportMessage};

/// Frame rate for animations (approximately 30 FPS)
const FRAME_DURATION: Duration = Duration::from_millis(33);

/// Main entry point
#[tokio::main]
async fn main() -> Result<()> {
    // Initialize error handling
    color_eyre::install().ok();

    // Parse command line arguments for the drafting service URL
    let args: Vec<String> = std::env::args().collect();
    let service_url = args
        .get(1)
        .map(|s| s.as_str())
        .unwrap_or(report::DEFAULT_BASE_URL);

    run_tui(service_url).await
}

/// Run the TUI application
async fn run_tui(service_url: &str) -> Result<()> {
    // Setup terminal
    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)
        .context("Failed to enter alternate screen")?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;

    // Create communication channels
    let (report_tx, mut report_rx) = mpsc::channel::<ReportMessage>(32);
    let (cmd_tx, mut cmd_rx) = mpsc::channel::<ReportCommand>(32);

    // Create the drafting client and spawn the worker task
    let client = ReportClient::new(service_url)?;
    let worker = tokio::spawn(async move {
        run_report_worker(client, report_tx, &mut cmd_rx).await;
    });

    // Probe the service so the status bar starts honest
    cmd_tx.send(ReportCommand::CheckConnection).await.ok();

    // Create application state
    let mut app = App::new();

    // Main event loop
    let result = run_event_loop(&mut terminal, &mut app, &mut report_rx, &cmd_tx).await;

    // Cleanup
    disable_raw_mode().context("Failed to disable raw mode")?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )
    .context("Failed to leave alternate screen")?;
    terminal.show_cursor().context("Failed to show cursor")?;

    worker.abort();

    result
}

/// Run the drafting worker task
async fn run_report_worker(
    client: ReportClient,
    tx: mpsc::Sender<ReportMessage>,
    rx: &mut mpsc::Receiver<ReportCommand>,
) {
    while let Some(cmd) = rx.recv().await {
        match cmd {
            ReportCommand::Draft {
                project,
                subject,
                brief,
            } => match client.draft(&project, &subject, &brief).await {
                Ok(body) => {
                    tx.send(ReportMessage::Drafted { subject, body }).await.ok();
                }
                Err(e) => {
                    tx.send(ReportMessage::Failed(e.to_string())).await.ok();
                }
            },
            ReportCommand::CheckConnection => {
                let connected = client.health_check().await.unwrap_or(false);
                tx.send(ReportMessage::ConnectionStatus(connected)).await.ok();
            }
            ReportCommand::Shutdown => break,
        }
    }
}

/// Run the main event loop
async fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    report_rx: &mut mpsc::Receiver<ReportMessage>,
    cmd_tx: &mpsc::Sender<ReportCommand>,
) -> Result<()> {
    loop {
        // Terminal size drives the backdrop and the cached map layout
        let size = terminal.size()?;
        app.tick(size.width, size.height);

        // Render the UI
        terminal.draw(|frame| ui::render(frame, app))?;

        // Drain worker messages (non-blocking)
        while let Ok(msg) = report_rx.try_recv() {
            app.handle_report_message(msg);
        }

        // Handle input events with timeout for animation
        if event::poll(FRAME_DURATION)? {
            match event::read()? {
                Event::Key(key) => {
                    // Only handle key press events (not release)
                    if key.kind == KeyEventKind::Press {
                        if let Some(cmd) = app.handle_key(key) {
                            cmd_tx.send(cmd).await.ok();
                        }
                    }
                }
                Event::Mouse(mouse) => app.handle_mouse(mouse),
                _ => {}
            }
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}
