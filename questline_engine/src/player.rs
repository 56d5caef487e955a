//! The player character: a [`Character`] plus progression state.
//!
//! Experience accumulates toward `level * 50`; each level-up consumes the
//! threshold and grants two ability points to spend through
//! [`Player::modify_ability_score`].

use crate::character::Character;

use log::info;
use questline_data::AbilityKind;
use serde::{Deserialize, Serialize};

/// Ability points granted on each level-up.
const ABILITY_POINTS_PER_LEVEL: u32 = 2;
/// Ability points a fresh player may allocate during creation.
pub const INITIAL_ABILITY_POINTS: u32 = 5;
/// Experience needed per level is `level * REQUIRED_EXPERIENCE_SCALE`.
const REQUIRED_EXPERIENCE_SCALE: u64 = 50;
pub const MAX_ABILITY_SCORE: f64 = 10.0;
pub const MIN_ABILITY_SCORE: f64 = 0.0;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Player {
    pub character: Character,
    pub level: u32,
    pub experience: u64,
    pub ability_points: u32,
}

impl Default for Player {
    fn default() -> Self {
        Self {
            character: Character::new("New Player"),
            level: 1,
            experience: 0,
            ability_points: INITIAL_ABILITY_POINTS,
        }
    }
}

impl Player {
    pub fn name(&self) -> &str {
        &self.character.name
    }

    pub fn ability_score(&self, kind: AbilityKind) -> f64 {
        self.character.ability_score(kind)
    }

    /// Experience needed to reach the next level.
    pub fn required_experience(&self) -> u64 {
        u64::from(self.level) * REQUIRED_EXPERIENCE_SCALE
    }

    /// Add experience and resolve any resulting level-ups.
    ///
    /// The threshold is consumed on each level-up, so leftover experience
    /// carries into the new level. Returns how many levels were gained.
    pub fn add_experience(&mut self, experience: u64) -> u32 {
        self.experience += experience;
        let mut levels_gained = 0;
        while self.experience >= self.required_experience() {
            self.experience -= self.required_experience();
            self.level_up();
            levels_gained += 1;
        }
        levels_gained
    }

    fn level_up(&mut self) {
        self.level += 1;
        self.ability_points += ABILITY_POINTS_PER_LEVEL;
        info!(
            "player '{}' reached level {} ({} ability points unspent)",
            self.character.name, self.level, self.ability_points
        );
    }

    /// Spend (or, during character creation, refund) ability points to
    /// adjust a score.
    ///
    /// Rejected without effect when: `amount` is negative and decrements
    /// aren't allowed, the player lacks the points, or the resulting score
    /// would leave `[0, 10]`. A negative amount refunds points. Returns
    /// whether the change was applied.
    pub fn modify_ability_score(&mut self, kind: AbilityKind, amount: i32, allow_decrement: bool) -> bool {
        if amount < 0 && !allow_decrement {
            return false;
        }
        if i64::from(self.ability_points) - i64::from(amount) < 0 {
            return false;
        }
        let new_score = self.character.abilities.score(kind) + f64::from(amount);
        if !(MIN_ABILITY_SCORE..=MAX_ABILITY_SCORE).contains(&new_score) {
            return false;
        }
        self.character.abilities.set_score(kind, new_score);
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        {
            self.ability_points = (i64::from(self.ability_points) - i64::from(amount)) as u32;
        }
        true
    }

    /// Reset every attribute back to a fresh player's defaults.
    pub fn reset_attributes(&mut self) {
        self.copy_attributes(&Player::default());
    }

    /// Copy all progression, ability, and inventory state from another
    /// player. The inventory's modification observer is kept.
    pub fn copy_attributes(&mut self, other: &Player) {
        self.character.name = other.character.name.clone();
        self.level = other.level;
        self.experience = other.experience;
        self.ability_points = other.ability_points;
        self.character.abilities = other.character.abilities;
        self.character.inventory.copy_from(&other.character.inventory);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::{ItemCatalog, ItemRef};
    use questline_data::ItemDef;

    #[test]
    fn add_zero_experience_changes_nothing() {
        let mut player = Player::default();
        let gained = player.add_experience(0);

        assert_eq!(gained, 0);
        assert_eq!(player.level, 1);
        assert_eq!(player.experience, 0);
        assert_eq!(player.ability_points, INITIAL_ABILITY_POINTS);
    }

    #[test]
    fn exact_threshold_levels_up_with_no_leftover() {
        let mut player = Player::default();
        let gained = player.add_experience(50);

        assert_eq!(gained, 1);
        assert_eq!(player.level, 2);
        assert_eq!(player.experience, 0);
        assert_eq!(player.ability_points, 7);
    }

    #[test]
    fn leftover_experience_carries_into_the_new_level() {
        let mut player = Player::default();
        // 125: level 1 needs 50 -> level 2 with 75 left; level 2 needs 100 -> stop
        let gained = player.add_experience(125);

        assert_eq!(gained, 1);
        assert_eq!(player.level, 2);
        assert_eq!(player.experience, 75);
        assert_eq!(player.ability_points, 7);
    }

    #[test]
    fn large_grant_resolves_multiple_level_ups() {
        let mut player = Player::default();
        // 50 + 100 = 150 consumed across two level-ups, 10 left over
        let gained = player.add_experience(160);

        assert_eq!(gained, 2);
        assert_eq!(player.level, 3);
        assert_eq!(player.experience, 10);
        assert_eq!(player.ability_points, 9);
    }

    #[test]
    fn modify_ability_score_spends_points() {
        let mut player = Player::default();
        assert!(player.modify_ability_score(AbilityKind::Strength, 2, false));

        assert!((player.ability_score(AbilityKind::Strength) - 3.0).abs() < f64::EPSILON);
        assert_eq!(player.ability_points, 3);
    }

    #[test]
    fn modify_ability_score_rejects_overspending() {
        let mut player = Player::default();
        assert!(!player.modify_ability_score(AbilityKind::Strength, 6, false));

        assert!((player.ability_score(AbilityKind::Strength) - 1.0).abs() < f64::EPSILON);
        assert_eq!(player.ability_points, INITIAL_ABILITY_POINTS);
    }

    #[test]
    fn modify_ability_score_rejects_scores_above_the_cap() {
        let mut player = Player::default();
        player.ability_points = 20;
        // 1.0 + 11 exceeds the maximum of 10
        assert!(!player.modify_ability_score(AbilityKind::Strength, 11, false));

        assert!((player.ability_score(AbilityKind::Strength) - 1.0).abs() < f64::EPSILON);
        assert_eq!(player.ability_points, 20);
    }

    #[test]
    fn modify_ability_score_rejects_decrement_unless_allowed() {
        let mut player = Player::default();
        assert!(!player.modify_ability_score(AbilityKind::Wisdom, -1, false));
        assert_eq!(player.ability_points, INITIAL_ABILITY_POINTS);
    }

    #[test]
    fn allowed_decrement_refunds_ability_points() {
        let mut player = Player::default();
        assert!(player.modify_ability_score(AbilityKind::Wisdom, 1, false));
        assert_eq!(player.ability_points, 4);

        assert!(player.modify_ability_score(AbilityKind::Wisdom, -1, true));
        assert!((player.ability_score(AbilityKind::Wisdom) - 1.0).abs() < f64::EPSILON);
        assert_eq!(player.ability_points, INITIAL_ABILITY_POINTS);
    }

    #[test]
    fn decrement_cannot_push_a_score_below_zero() {
        let mut player = Player::default();
        assert!(!player.modify_ability_score(AbilityKind::Wisdom, -2, true));
        assert!((player.ability_score(AbilityKind::Wisdom) - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn copy_attributes_transfers_everything() {
        let catalog = ItemCatalog::from_defs(&[ItemDef {
            name: "Rope".into(),
            kind: "tool".into(),
        }]);

        let mut source = Player::default();
        source.character.name = "Wren".into();
        source.add_experience(60);
        source.character.inventory.put(&catalog, [ItemRef::new(0, 2)]);

        let mut target = Player::default();
        target.copy_attributes(&source);

        assert_eq!(target, source);
    }

    #[test]
    fn reset_attributes_restores_defaults() {
        let mut player = Player::default();
        player.character.name = "Wren".into();
        player.add_experience(120);
        player.modify_ability_score(AbilityKind::Dexterity, 1, false);

        player.reset_attributes();
        assert_eq!(player, Player::default());
    }
}
