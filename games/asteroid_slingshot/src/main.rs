mod engine;
mod slingshot_game;

use std::path::PathBuf;

use env_logger::Env;
use slingshot::SimConfig;

use engine::App;

use crate::slingshot_game::{GameAssets, SlingshotGame};

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let assets_dir = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("assets");
    let assets = GameAssets::load(&assets_dir)?;

    let game = SlingshotGame::new(SimConfig::default(), assets);
    let app = App::new(game);
    app.run();

    Ok(())
}
