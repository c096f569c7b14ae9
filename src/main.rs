use std::io;

use anyhow::{Context, Result};
use clap::Parser;

use ewaste_explorer::app::ExplorerApp;
use ewaste_explorer::config::{Args, Settings};
use ewaste_explorer::data::loader;
use ewaste_explorer::state::AppState;

fn main() -> Result<()> {
    env_logger::init();

    let args = Args::parse();
    let settings = Settings::from_args(&args);

    let table = match &args.dataset {
        Some(path) => loader::load_file(path)
            .with_context(|| format!("invalid dataset {}", path.display()))?,
        None => loader::load_embedded().context("invalid built-in dataset")?,
    };
    log::info!("dataset ready: {} rows, {} items", table.len(), table.total());

    let mut app = ExplorerApp::new(AppState::new(table, settings));
    app.run(io::stdin().lock(), io::stdout().lock())
}
