use mindweave::{actions, app, config, event, export, loader, ui};

use anyhow::{Context, Result};
use app::AppState;
use clap::Parser;
use config::{load_config, AppConfig, CliArgs, DumpFormat};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::fs::OpenOptions;
use std::io;
use std::sync::Mutex;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    // Parse command line arguments
    let args = CliArgs::parse();

    // Load configuration
    let config = load_config(&args)?;

    if args.debug_config {
        println!("Configuration:");
        println!("{:#?}", config);
        return Ok(());
    }

    init_logging(&config, args.dump.is_none())?;

    // Create application state
    let mut app = AppState::new(config);

    // Load file if provided
    if let Some(ref filename) = args.filename {
        let store = loader::load_file(filename)?;
        info!(path = %filename.display(), nodes = store.len(), "mind map loaded");
        app.load(store);
    }

    apply_intents(&mut app, &args);

    if let Some(format) = args.dump {
        let output = match format {
            DumpFormat::Json => export::to_json(&app.frame)?,
            DumpFormat::Text if app.frame.is_empty() => {
                format!("{}\n", ui::constants::EMPTY_STATE)
            }
            DumpFormat::Text => export::outline(&app.frame),
        };
        print!("{}", output);
        return Ok(());
    }

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Clear the terminal
    terminal.clear()?;

    let size = terminal.size()?;
    app.terminal_width = size.width;
    app.terminal_height = size.height;
    actions::fit_to_view(&mut app);

    // Run the main loop
    let res = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    // Handle any errors from the main loop
    if let Err(err) = res {
        eprintln!("Error: {}", err);
    }

    Ok(())
}

/// Applies `--collapse-all` and `--toggle` before the first frame.
fn apply_intents(app: &mut AppState, args: &CliArgs) {
    if args.collapse_all {
        app.session.collapse_all();
    }

    for raw in &args.toggles {
        match app.session.store().lookup(raw).cloned() {
            Some(id) => {
                app.session.toggle(&id);
            }
            None => warn!(id = %raw, "--toggle names no node in the map"),
        }
    }

    app.refresh();
}

/// Logs go to stderr for one-shot dumps. The interactive viewer owns the
/// terminal, so there they go to `log_file` or nowhere.
fn init_logging(config: &AppConfig, interactive: bool) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    if !interactive {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(io::stderr)
            .init();
        return Ok(());
    }

    if let Some(ref path) = config.log_file {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("opening log file {}", path.display()))?;
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(Mutex::new(file))
            .with_ansi(false)
            .init();
    }

    Ok(())
}

fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut AppState,
) -> Result<()> {
    while app.running {
        // Draw the UI
        terminal.draw(|frame| ui::render(frame, app))?;

        // Handle events
        if let Some(action) = event::handle_events(app)? {
            actions::execute_action(action, app)?;
        }
    }

    Ok(())
}
