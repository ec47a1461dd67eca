mod app;
mod data;
mod state;
mod ui;

use std::io;

use app::RegionStatsApp;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let stdin = io::stdin();
    let mut app = RegionStatsApp::new(stdin.lock(), io::stdout());
    if let Err(e) = app.run() {
        log::error!("Session aborted: {e:#}");
        return Err(e);
    }
    Ok(())
}
