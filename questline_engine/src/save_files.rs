//! Save-game discovery and serialization helpers.
//!
//! A save file is a RON snapshot of the player plus the scene manager's
//! runtime progress, named `<slot>-questline-<version>.ron`. Listing save
//! files classifies each as ready, version-mismatched, or corrupted rather
//! than failing the whole listing on one bad file.

use crate::QUESTLINE_VERSION;
use crate::player::Player;
use crate::scene_manager::SceneProgress;

use anyhow::{Context, Result};
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{LazyLock, RwLock};
use std::time::SystemTime;

pub const SAVE_DIR: &str = "saved_games";

static ACTIVE_SAVE_DIR: LazyLock<RwLock<PathBuf>> = LazyLock::new(|| RwLock::new(PathBuf::from(SAVE_DIR)));

/// Everything a saved session needs to restore: the player and the scene
/// manager's runtime state. Authored content is reloaded, never persisted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SaveGame {
    pub version: String,
    pub player: Player,
    pub progress: SceneProgress,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveSlot {
    pub slot: String,
    pub version: String,
    pub path: PathBuf,
    pub file_name: String,
    pub modified: Option<SystemTime>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveSummary {
    pub player_name: String,
    pub level: u32,
    pub current_scene: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveFileStatus {
    Ready,
    VersionMismatch { save_version: String, current_version: String },
    Corrupted { message: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveFileEntry {
    pub slot: String,
    pub version: String,
    pub path: PathBuf,
    pub file_name: String,
    pub modified: Option<SystemTime>,
    pub summary: Option<SaveSummary>,
    pub status: SaveFileStatus,
}

/// Return the active save directory used for completions and save operations.
pub fn active_save_dir() -> PathBuf {
    ACTIVE_SAVE_DIR
        .read()
        .map(|guard| guard.clone())
        .unwrap_or_else(|_| PathBuf::from(SAVE_DIR))
}

/// Set the active save directory.
pub fn set_active_save_dir(path: PathBuf) {
    if let Ok(mut guard) = ACTIVE_SAVE_DIR.write() {
        *guard = path;
    }
}

/// File name for a slot under the current engine version.
pub fn save_file_name(slot: &str) -> String {
    format!("{slot}-questline-{QUESTLINE_VERSION}.ron")
}

/// Serialize a snapshot into `dir` under the given slot name.
///
/// # Errors
/// Returns an error on serialization failure or file IO failure.
pub fn write_save(dir: &Path, slot: &str, save: &SaveGame) -> Result<PathBuf> {
    let raw = ron::ser::to_string(save).context("serializing save game to RON")?;
    fs::create_dir_all(dir).with_context(|| format!("creating save directory {}", dir.display()))?;
    let path = dir.join(save_file_name(slot));
    fs::write(&path, raw).with_context(|| format!("writing save file {}", path.display()))?;
    info!("game saved to {}", path.display());
    Ok(path)
}

/// Load a save file from disk and deserialize its snapshot.
///
/// # Errors
/// Returns an error if the file cannot be read or deserialized.
pub fn load_save_file(path: &Path) -> Result<SaveGame> {
    let raw = fs::read_to_string(path).with_context(|| format!("reading save file {}", path.display()))?;
    ron::from_str::<SaveGame>(&raw).with_context(|| format!("parsing save file {}", path.display()))
}

/// Find the save file for a slot, regardless of the version it was written
/// under.
pub fn find_slot(dir: &Path, slot: &str) -> Option<PathBuf> {
    collect_save_slots(dir)
        .ok()?
        .into_iter()
        .find(|entry| entry.slot == slot)
        .map(|entry| entry.path)
}

/// Delete a slot's save file.
///
/// # Errors
/// Returns an error when the slot doesn't exist or removal fails.
pub fn delete_save(dir: &Path, slot: &str) -> Result<()> {
    let path = find_slot(dir, slot).with_context(|| format!("no save named '{slot}'"))?;
    fs::remove_file(&path).with_context(|| format!("removing save file {}", path.display()))?;
    info!("deleted save file {}", path.display());
    Ok(())
}

/// Discover save slot files stored in `dir`.
///
/// # Errors
/// Returns an error if the directory contents cannot be read or enumerated.
pub fn collect_save_slots(dir: &Path) -> Result<Vec<SaveSlot>> {
    if !dir.exists() {
        return Ok(Vec::new());
    }

    let mut slots = Vec::new();
    for entry in fs::read_dir(dir).with_context(|| format!("reading {}", dir.display()))? {
        let entry = entry.with_context(|| format!("enumerating {}", dir.display()))?;
        if let Some(slot) = slot_from_entry(&entry) {
            slots.push(slot);
        }
    }
    slots.sort_by(|a, b| a.slot.cmp(&b.slot).then(a.version.cmp(&b.version)));
    Ok(slots)
}

/// Build descriptive entries for save files located in `dir`, most recently
/// modified first.
///
/// # Errors
/// Returns an error if reading the directory fails.
pub fn build_save_entries(dir: &Path) -> Result<Vec<SaveFileEntry>> {
    let slots = collect_save_slots(dir)?;
    let mut entries: Vec<_> = slots.into_iter().map(entry_for_slot).collect();
    entries.sort_by(|a, b| b.modified.cmp(&a.modified).then(a.slot.cmp(&b.slot)));
    Ok(entries)
}

/// Render a save file's modified time as an absolute local timestamp.
pub fn format_modified(modified: SystemTime) -> String {
    let datetime = time::OffsetDateTime::from(modified);
    let local = datetime.to_offset(time::UtcOffset::current_local_offset().unwrap_or(time::UtcOffset::UTC));
    time::format_description::parse("[hour repr:12 padding:none]:[minute][period case:lower] [month]/[day]/[year]")
        .ok()
        .and_then(|format| local.format(&format).ok())
        .unwrap_or_else(|| "unknown".to_string())
}

/// Build a full [`SaveFileEntry`] from a discovered save slot.
fn entry_for_slot(slot: SaveSlot) -> SaveFileEntry {
    let mut version = slot.version.clone();
    let (summary, status) = match load_save_file(&slot.path) {
        Ok(save) => {
            version.clone_from(&save.version);
            let status = if save.version == QUESTLINE_VERSION {
                SaveFileStatus::Ready
            } else {
                SaveFileStatus::VersionMismatch {
                    save_version: save.version.clone(),
                    current_version: QUESTLINE_VERSION.to_string(),
                }
            };
            let summary = SaveSummary {
                player_name: save.player.character.name.clone(),
                level: save.player.level,
                current_scene: save.progress.current_index,
            };
            (Some(summary), status)
        },
        Err(err) => {
            warn!("failed to load save '{}' ({}): {err:#}", slot.slot, slot.path.display());
            (
                None,
                SaveFileStatus::Corrupted {
                    message: trim_error(&err),
                },
            )
        },
    };

    SaveFileEntry {
        slot: slot.slot,
        version,
        path: slot.path,
        file_name: slot.file_name,
        modified: slot.modified,
        summary,
        status,
    }
}

fn slot_from_entry(entry: &fs::DirEntry) -> Option<SaveSlot> {
    let path = entry.path();
    if !path.is_file() {
        return None;
    }
    if path.extension().and_then(|ext| ext.to_str()) != Some("ron") {
        return None;
    }
    let file_name = path.file_name().and_then(|name| name.to_str())?.to_string();
    let stem = path.file_stem().and_then(|stem| stem.to_str())?;
    let (slot, version) = stem.rsplit_once("-questline-")?;
    if slot.is_empty() {
        return None;
    }
    let modified = entry.metadata().ok().and_then(|meta| meta.modified().ok());
    Some(SaveSlot {
        slot: slot.to_string(),
        version: version.to_string(),
        path,
        file_name,
        modified,
    })
}

/// Clamp verbose error messages to a readable length.
fn trim_error(err: &impl ToString) -> String {
    let message = err.to_string();
    if message.chars().count() <= 120 {
        return message;
    }
    let mut trimmed = String::new();
    for (idx, ch) in message.chars().enumerate() {
        if idx >= 117 {
            trimmed.push_str("...");
            break;
        }
        trimmed.push(ch);
    }
    trimmed
}
