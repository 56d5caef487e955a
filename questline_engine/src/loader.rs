//! Loader utilities for building a game session from authored content.
//!
//! World content is RON-backed [`WorldDef`] data; a corrupt or invalid
//! world is fatal to starting a session, so every failure here carries
//! enough context to show the user what is wrong with their files.

use crate::item::ItemCatalog;
use crate::scene_manager::SceneManager;

use log::info;
use questline_data::{WorldDef, validate_world};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Why authored content could not be loaded.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("could not read world file {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("could not parse world file {path}")]
    Parse {
        path: PathBuf,
        #[source]
        source: ron::error::SpannedError,
    },
    #[error("world validation failed:\n{details}")]
    Invalid { details: String },
}

/// Load and validate the authored world from a RON file.
///
/// # Errors
/// Fails when the file is unreadable, unparsable, or fails validation.
pub fn load_world_def(path: &Path) -> Result<WorldDef, LoadError> {
    let raw = fs::read_to_string(path).map_err(|source| LoadError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let world = ron::from_str::<WorldDef>(&raw).map_err(|source| LoadError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    validate_world_def(&world)?;
    info!(
        "world loaded from {}: {} scenes, {} items",
        path.display(),
        world.scenes.len(),
        world.items.len()
    );
    Ok(world)
}

/// Validate a WorldDef, aggregating all findings into a single error.
///
/// # Errors
/// Fails when validation finds any problem.
pub fn validate_world_def(world: &WorldDef) -> Result<(), LoadError> {
    let errors = validate_world(world);
    if errors.is_empty() {
        return Ok(());
    }
    let details = errors
        .into_iter()
        .map(|err| format!("- {err}"))
        .collect::<Vec<_>>()
        .join("\n");
    Err(LoadError::Invalid { details })
}

/// Build the runtime pieces of a session from validated world content.
pub fn load_world(world: &WorldDef) -> (ItemCatalog, SceneManager) {
    let catalog = ItemCatalog::from_defs(&world.items);
    let manager = SceneManager::from_defs(&world.scenes);
    info!(
        "session built: {} catalog items, {} scenes",
        catalog.len(),
        manager.scenes().len()
    );
    (catalog, manager)
}
