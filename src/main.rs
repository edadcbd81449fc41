use anyhow::Result;
use site_picker::api::SitesClient;
use site_picker::app::App;
use site_picker::config::Config;
use site_picker::event::EventHandler;
use site_picker::picker::SitePicker;
use site_picker::token::EnvTokenStore;
use site_picker::{logging, tui};
use std::time::Duration;
use tokio::sync::oneshot;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env().unwrap_or_else(|e| {
        eprintln!("Failed to load config: {e:#}");
        std::process::exit(1);
    });

    let _log_guard = logging::init(&config.log_file)?;
    info!(api_url = %config.api_url, "starting site picker");

    let tokens = EnvTokenStore::new(config.token_var.clone());

    // The callback runs on the UI loop; the choice is printed once the
    // terminal is back to normal.
    let (selection_tx, mut selection_rx) = oneshot::channel();
    let picker = SitePicker::new(Box::new(move |site_id, description| {
        let _ = selection_tx.send((site_id, description));
    }));

    let mut terminal = tui::init()?;
    tui::install_panic_hook();

    let mut app = App::new(picker);
    let mut events = EventHandler::new(Duration::from_millis(250));
    app.activate(
        &tokens,
        |token| SitesClient::new(&config, token),
        events.sender(),
    );

    let res = app.run(&mut terminal, &mut events).await;

    tui::restore()?;
    res?;

    if let Ok((site_id, description)) = selection_rx.try_recv() {
        println!("{site_id}\t{}", description.unwrap_or_default());
    }

    Ok(())
}
