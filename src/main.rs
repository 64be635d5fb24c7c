use std::io;

use clap::Parser;
use crossterm::event::EventStream;
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use tracing_subscriber::EnvFilter;

use taskboard::app::App;
use taskboard::net::api::ApiClient;
use taskboard::net::push::PushClient;

#[derive(Parser, Debug)]
#[command(name = "taskboard", about = "Synchronized kanban task board")]
struct Cli {
    /// REST backend origin.
    #[arg(long, env = "TASKBOARD_API_URL", default_value = "http://localhost:8080")]
    api_url: String,

    /// Push-channel origin.
    #[arg(long, env = "TASKBOARD_PUSH_URL", default_value = "ws://localhost:3001/ws")]
    push_url: String,

    /// Diagnostics file; the board owns the terminal, so logs cannot go to
    /// stderr.
    #[arg(long, env = "TASKBOARD_LOG_FILE", default_value = "taskboard.log")]
    log_file: String,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_tracing(&cli.log_file)?;

    let api = ApiClient::new(&cli.api_url);
    let mut push = PushClient::connect(&cli.push_url).await?;

    let mut app = App::new(api, push.handle());
    app.load_initial().await;

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = app.run(&mut terminal, EventStream::new(), &mut push).await;

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    push.shutdown();

    result?;
    Ok(())
}

fn init_tracing(path: &str) -> io::Result<()> {
    let file = std::fs::File::create(path)?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::sync::Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}
