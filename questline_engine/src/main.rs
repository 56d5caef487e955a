#![warn(clippy::pedantic)]
#![allow(clippy::must_use_candidate)]
//! ** Questline **
//! Scene-graph RPG shell

use questline_engine::style::GameStyle;
use questline_engine::{Game, run_repl};
use questline_engine::{data_paths, settings};

use anyhow::{Context, Result};
use colored::Colorize;
use log::info;

fn main() -> Result<()> {
    env_logger::init();

    let settings = settings::load_settings(&data_paths::data_path(settings::SETTINGS_FILE));
    if !settings.color {
        colored::control::set_override(false);
    }

    info!("Start: loading Questline world...");
    let mut game = Game::load().context("while loading the world")?;
    info!("world loaded successfully; starting the game");

    println!("{:^80}", "QUESTLINE".bright_yellow().underline());
    println!(
        "\n{}\n",
        "A fork in the road, a pack on your back, and nowhere you have to be.".description_style()
    );

    run_repl(&mut game)
}
