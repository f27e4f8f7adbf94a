use adventure::clock::TimeService;
use adventure::logging;
use adventure::navigate::Navigator;
use anyhow::Context;
use log::*;
use rooms::{store, Config};
use std::env;
use std::io;

fn main() -> anyhow::Result<()> {
    let config = Config::from_env()?;
    logging::init(&config)?;

    let root = env::current_dir().context("failed to read the working directory")?;
    let dir = store::find_newest(&root)?;
    let graph =
        store::load(&dir).with_context(|| format!("failed to load rooms from {:?}", dir))?;
    info!("playing {:?}", dir);

    let clock = TimeService::in_dir(&root);
    let stdin = io::stdin();
    let stdout = io::stdout();
    Navigator::new(&graph)?.run(stdin.lock(), stdout.lock(), &clock)?;
    Ok(())
}
