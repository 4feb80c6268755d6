use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use dotenv::dotenv;
use log::{error, info};
use ratatui::prelude::*;
use std::{error::Error, io, time::Duration};

use app::config::Config;
use app::models::Task;
use app::resource_client::ResourceClient;

mod app;

// Composition root: config, logging, the resource client, then the UI holding a reference to it.
// Everything runs on one thread; each key press finishes its request chain before the next is read.
#[tokio::main(flavor = "current_thread")]
pub async fn main() -> Result<(), Box<dyn Error>> {
    dotenv().ok();
    let config = Config::from_env()?;
    app::logging::init(&config)?;
    let client: ResourceClient<Task> = ResourceClient::new(config.api_url.as_str());
    info!("task client starting against {}", client.base_url());

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Poll for input every 250 ms
    let tick_rate = Duration::from_millis(250);
    let app = app::ui::App::new(&client);
    let res = app::ui::run_app(&mut terminal, app, tick_rate).await;

    // Restore previous terminal state after exit
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        error!("terminal failure: {err}");
        println!("{err:?}");
    }

    info!("task client stopped");
    Ok(())
}
