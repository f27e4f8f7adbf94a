use adventure::logging;
use anyhow::Context;
use log::*;
use rooms::{generate, store, Config};
use std::env;

fn main() -> anyhow::Result<()> {
    let config = Config::from_env()?;
    logging::init(&config)?;

    let mut rng = config.rng();
    let graph = generate(&mut rng).context("room generation failed")?;

    let root = env::current_dir().context("failed to read the working directory")?;
    let dir = store::create_rooms_dir(&root)?;
    store::save(&dir, &graph).with_context(|| format!("failed to write rooms to {:?}", dir))?;
    info!("built {} rooms in {:?}", graph.len(), dir);
    Ok(())
}
