pub mod action;
pub mod app;
pub mod cli;
pub mod component;
pub mod diagnostics;
pub mod init;
pub mod input;
pub mod settings;
pub mod tui;
pub mod utils;

use clap::Parser;
use color_eyre::eyre::Result;

use crate::{app::App, cli::AppArgs, settings::Settings};

#[tokio::main]
async fn main() -> Result<()> {
    init::init()?;

    let args = AppArgs::parse();
    let settings = Settings::load(&args)?;
    let mut app = App::new(settings)?;
    app.run().await?;

    Ok(())
}
