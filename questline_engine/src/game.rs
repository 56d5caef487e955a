//! Session orchestration: ties the authored world, catalog, scene manager,
//! and player together, and owns new-game / save / load flows.

use crate::item::ItemCatalog;
use crate::loader::{self, LoadError};
use crate::player::Player;
use crate::save_files::{self, SaveGame};
use crate::scene_manager::{SceneManager, SelectionResult};
use crate::{QUESTLINE_VERSION, data_paths, settings};

use anyhow::{Context, Result};
use log::{debug, info, warn};
use questline_data::WorldDef;
use std::path::Path;

pub struct Game {
    pub world: WorldDef,
    pub catalog: ItemCatalog,
    pub manager: SceneManager,
    pub player: Player,
    /// True while the player is still allocating their starting build;
    /// `untrain` and renaming are only legal in this phase.
    pub creating: bool,
}

impl Game {
    /// Build a fresh session (new game, creation phase) from authored
    /// content.
    pub fn from_world(world: WorldDef) -> Self {
        let (catalog, manager) = loader::load_world(&world);
        let mut game = Self {
            world,
            catalog,
            manager,
            player: Player::default(),
            creating: true,
        };
        game.player
            .character
            .inventory
            .set_on_modified(Box::new(|| debug!("player inventory modified")));
        game
    }

    /// Load the authored world from the engine data directory and build a
    /// session from it.
    ///
    /// # Errors
    /// Fails when the world file is unreadable, unparsable, or invalid --
    /// a corrupt graph makes the whole session unplayable.
    pub fn load() -> Result<Self, LoadError> {
        let settings = settings::load_settings(&data_paths::data_path(settings::SETTINGS_FILE));
        let world = loader::load_world_def(&data_paths::data_path(&settings.world_file))?;
        Ok(Self::from_world(world))
    }

    /// Start over: fresh player, fresh graph, back to the creation phase.
    pub fn new_game(&mut self) {
        self.player.reset_attributes();
        self.manager.reset(&self.world.scenes);
        self.creating = true;
        info!("new game started");
    }

    /// Leave the character-creation phase.
    pub fn begin(&mut self) {
        self.creating = false;
        info!(
            "character '{}' finalized with {} unspent point(s)",
            self.player.name(),
            self.player.ability_points
        );
    }

    /// Dispatch an action choice on the current scene.
    pub fn select_action(&mut self, index: usize) -> SelectionResult {
        self.manager.select_action(index, &mut self.player, &self.catalog)
    }

    /// Write the current session to the active save directory.
    ///
    /// # Errors
    /// Returns an error when serialization or file IO fails.
    pub fn save(&self, slot: &str) -> Result<()> {
        self.save_to(&save_files::active_save_dir(), slot)
    }

    /// Write the current session to an explicit directory.
    ///
    /// # Errors
    /// Returns an error when serialization or file IO fails.
    pub fn save_to(&self, dir: &Path, slot: &str) -> Result<()> {
        let save = SaveGame {
            version: QUESTLINE_VERSION.to_string(),
            player: self.player.clone(),
            progress: self.manager.progress(),
        };
        save_files::write_save(dir, slot, &save)?;
        Ok(())
    }

    /// Restore a session from a save slot.
    ///
    /// The authored graph is reloaded first, then the saved player
    /// attributes and per-action runtime flags are merged onto it, so
    /// content edits between save and load degrade gracefully by position.
    ///
    /// # Errors
    /// Returns an error when the slot doesn't exist or can't be parsed.
    pub fn load_save(&mut self, slot: &str) -> Result<()> {
        self.load_save_from(&save_files::active_save_dir(), slot)
    }

    /// Restore a session from a save slot in an explicit directory.
    ///
    /// # Errors
    /// Returns an error when the slot doesn't exist or can't be parsed.
    pub fn load_save_from(&mut self, dir: &Path, slot: &str) -> Result<()> {
        let path = save_files::find_slot(dir, slot).with_context(|| format!("no save named '{slot}'"))?;
        let save = save_files::load_save_file(&path)?;
        if save.version != QUESTLINE_VERSION {
            warn!(
                "save '{slot}' was written by v{}; current engine is v{QUESTLINE_VERSION}",
                save.version
            );
        }

        self.manager.reset(&self.world.scenes);
        self.player.copy_attributes(&save.player);
        self.manager.restore_progress(save.progress);
        self.creating = false;
        info!("save '{slot}' restored from {}", path.display());
        Ok(())
    }
}
