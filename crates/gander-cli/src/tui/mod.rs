//! Terminal UI host
//!
//! Maps segment trees to styled lines and drives scrolling from reveal
//! checkpoints.

mod app;
mod render;
mod scroll;
mod utils;

pub use app::App;

use anyhow::Result;

/// Run `app` full-screen, restoring the terminal on every exit path
pub async fn run(app: App) -> Result<()> {
    let mut terminal = ratatui::init();
    let result = app.run(&mut terminal).await;
    ratatui::restore();
    result
}
