//! Characters: a name, five ability scores, and an inventory.
//!
//! Derived bonuses are pure functions of the current scores and are never
//! stored.

use crate::ability::AbilityScores;
use crate::inventory::Inventory;

use questline_data::{AbilityKind, ItemId};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Character {
    pub name: String,
    pub abilities: AbilityScores,
    pub inventory: Inventory,
}

impl Character {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            abilities: AbilityScores::default(),
            inventory: Inventory::new(),
        }
    }

    pub fn ability_score(&self, kind: AbilityKind) -> f64 {
        self.abilities.score(kind)
    }

    /// `will + strength / 2`, rounded to two decimal places.
    pub fn crafting_bonus(&self) -> f64 {
        round2(self.ability_score(AbilityKind::Will) + self.ability_score(AbilityKind::Strength) / 2.0)
    }

    /// `wisdom + intelligence / 2`, rounded to two decimal places.
    pub fn enchanting_bonus(&self) -> f64 {
        round2(self.ability_score(AbilityKind::Wisdom) + self.ability_score(AbilityKind::Intelligence) / 2.0)
    }

    /// `dexterity + wisdom`, rounded to two decimal places.
    pub fn dodge_bonus(&self) -> f64 {
        round2(self.ability_score(AbilityKind::Dexterity) + self.ability_score(AbilityKind::Wisdom))
    }

    /// `dexterity + will`, rounded to two decimal places.
    pub fn run_bonus(&self) -> f64 {
        round2(self.ability_score(AbilityKind::Dexterity) + self.ability_score(AbilityKind::Will))
    }

    /// Floor of the sum of all five ability scores.
    #[allow(clippy::cast_possible_truncation)]
    pub fn power_level(&self) -> i64 {
        self.abilities.total().floor() as i64
    }

    /// Consume items from the character's inventory.
    pub fn use_item(&mut self, item_id: ItemId, quantity: u32) {
        self.inventory.use_item(item_id, quantity);
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
