use serde::{Deserialize, Serialize};
use std::fmt;

/// Index of an item in the world's item table.
pub type ItemId = usize;

/// Index of a scene in the world's scene list.
pub type SceneId = usize;

/// Top-level authored world data loaded by the engine and edited by the editor.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct WorldDef {
    #[serde(default)]
    pub items: Vec<ItemDef>,
    #[serde(default)]
    pub scenes: Vec<SceneDef>,
}

/// Item definition. Items are identified by their stable position in
/// [`WorldDef::items`]; references elsewhere carry that index.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct ItemDef {
    pub name: String,
    #[serde(default)]
    pub kind: String,
}

/// A quantity of some item, referenced by table index.
///
/// Used for requirement minimums, reward payouts, and starting inventory.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct ItemStackDef {
    pub item: ItemId,
    pub quantity: u32,
}

/// The five character abilities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AbilityKind {
    Dexterity,
    Intelligence,
    Strength,
    Will,
    Wisdom,
}

impl AbilityKind {
    pub const ALL: [AbilityKind; 5] = [
        AbilityKind::Dexterity,
        AbilityKind::Intelligence,
        AbilityKind::Strength,
        AbilityKind::Will,
        AbilityKind::Wisdom,
    ];

    /// What the ability is used for, shown on the character sheet.
    pub fn describe(self) -> &'static str {
        match self {
            AbilityKind::Dexterity => "Ability checks, dodging, and running",
            AbilityKind::Intelligence => "Ability checks and enchanting",
            AbilityKind::Strength => "Ability checks and crafting",
            AbilityKind::Will => "Ability checks, crafting, and running",
            AbilityKind::Wisdom => "Ability checks, enchanting, and dodging",
        }
    }

    /// Parse a player- or editor-supplied ability name, case-insensitively.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "dexterity" | "dex" => Some(AbilityKind::Dexterity),
            "intelligence" | "int" => Some(AbilityKind::Intelligence),
            "strength" | "str" => Some(AbilityKind::Strength),
            "will" => Some(AbilityKind::Will),
            "wisdom" | "wis" => Some(AbilityKind::Wisdom),
            _ => None,
        }
    }
}

impl fmt::Display for AbilityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AbilityKind::Dexterity => write!(f, "dexterity"),
            AbilityKind::Intelligence => write!(f, "intelligence"),
            AbilityKind::Strength => write!(f, "strength"),
            AbilityKind::Will => write!(f, "will"),
            AbilityKind::Wisdom => write!(f, "wisdom"),
        }
    }
}

/// Minimum ability score demanded by a requirement.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct AbilityMinDef {
    pub ability: AbilityKind,
    pub score: f64,
}

/// Where an action sends the player when selected.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SceneTarget {
    /// Remain on the current scene.
    #[default]
    Stay,
    /// Return to the most recently visited scene.
    Previous,
    /// Jump to the scene at the given index.
    Scene(SceneId),
}

impl SceneTarget {
    /// Targets other than `Stay` move the player somewhere.
    pub fn navigates(self) -> bool {
        !matches!(self, SceneTarget::Stay)
    }
}

/// Gate on an action: all ability minimums AND all item minimums must hold.
/// Empty lists are vacuously satisfied.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct RequirementDef {
    #[serde(default)]
    pub abilities: Vec<AbilityMinDef>,
    #[serde(default)]
    pub items: Vec<ItemStackDef>,
}

impl RequirementDef {
    pub fn is_empty(&self) -> bool {
        self.abilities.is_empty() && self.items.is_empty()
    }
}

/// Payout granted when an action is first selected.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct RewardDef {
    #[serde(default)]
    pub experience: u64,
    #[serde(default)]
    pub items: Vec<ItemStackDef>,
}

impl RewardDef {
    pub fn is_empty(&self) -> bool {
        self.experience == 0 && self.items.is_empty()
    }
}

/// A selectable choice within a scene.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct ActionDef {
    pub description: String,
    #[serde(default)]
    pub consequence: String,
    #[serde(default)]
    pub target: SceneTarget,
    #[serde(default)]
    pub disable_on_select: bool,
    #[serde(default)]
    pub remove_on_select: bool,
    #[serde(default)]
    pub secret: bool,
    #[serde(default)]
    pub requirement: RequirementDef,
    #[serde(default)]
    pub reward: RewardDef,
}

/// A node in the scene graph, identified by its position in
/// [`WorldDef::scenes`].
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct SceneDef {
    pub name: String,
    #[serde(default)]
    pub enter_description: String,
    #[serde(default)]
    pub exit_description: String,
    #[serde(default)]
    pub image_path: String,
    #[serde(default)]
    pub actions: Vec<ActionDef>,
}
