use anyhow::Result;
use aws_dash::app::AppState;
use aws_dash::aws::AwsConnector;
use aws_dash::driver::Driver;
use aws_dash::message::Message;
use aws_dash::update::update;
use aws_dash::{config, event, logging, ui};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::sync::Arc;
use tokio::sync::mpsc;

#[tokio::main]
async fn main() -> Result<()> {
    if let Err(e) = logging::init() {
        eprintln!("Warning: file logging disabled: {}", e);
    }

    let config = match config::load() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Error loading config: {}", e);
            eprintln!("Error loading config: {}", e);
            std::process::exit(1);
        }
    };

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut state = AppState::new(config);
    let result = run_app(&mut terminal, &mut state).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = &result {
        tracing::error!("Exiting with error: {}", err);
    }
    result
}

async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    state: &mut AppState,
) -> Result<()> {
    let (tx, mut rx) = mpsc::unbounded_channel();
    let driver = Driver::new(tx.clone(), Arc::new(AwsConnector));

    let (width, height) = crossterm::terminal::size()?;
    tx.send(Message::Resize { width, height })?;
    tx.send(Message::Startup)?;
    event::spawn_input_reader(tx);

    terminal.draw(|f| ui::draw(f, state))?;

    while let Some(message) = rx.recv().await {
        if let Some(action) = update(state, message) {
            driver.dispatch(action);
        }
        if state.should_quit {
            tracing::info!("Quit requested");
            break;
        }
        terminal.draw(|f| ui::draw(f, state))?;
    }

    Ok(())
}
