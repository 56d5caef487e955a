//! Ability scores for characters.
//!
//! Every character carries exactly the five canonical abilities; keying
//! them as struct fields makes a missing or duplicated ability
//! unrepresentable, so lookups can never fail.

use questline_data::AbilityKind;
use serde::{Deserialize, Serialize};

/// The starting score for every ability on a fresh character.
pub const DEFAULT_ABILITY_SCORE: f64 = 1.0;

/// One score per canonical ability.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct AbilityScores {
    dexterity: f64,
    intelligence: f64,
    strength: f64,
    will: f64,
    wisdom: f64,
}

impl Default for AbilityScores {
    fn default() -> Self {
        Self {
            dexterity: DEFAULT_ABILITY_SCORE,
            intelligence: DEFAULT_ABILITY_SCORE,
            strength: DEFAULT_ABILITY_SCORE,
            will: DEFAULT_ABILITY_SCORE,
            wisdom: DEFAULT_ABILITY_SCORE,
        }
    }
}

impl AbilityScores {
    pub fn score(&self, kind: AbilityKind) -> f64 {
        match kind {
            AbilityKind::Dexterity => self.dexterity,
            AbilityKind::Intelligence => self.intelligence,
            AbilityKind::Strength => self.strength,
            AbilityKind::Will => self.will,
            AbilityKind::Wisdom => self.wisdom,
        }
    }

    pub fn set_score(&mut self, kind: AbilityKind, score: f64) {
        match kind {
            AbilityKind::Dexterity => self.dexterity = score,
            AbilityKind::Intelligence => self.intelligence = score,
            AbilityKind::Strength => self.strength = score,
            AbilityKind::Will => self.will = score,
            AbilityKind::Wisdom => self.wisdom = score,
        }
    }

    /// Iterate scores in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = (AbilityKind, f64)> + '_ {
        AbilityKind::ALL.iter().map(|kind| (*kind, self.score(*kind)))
    }

    /// Sum of all five scores.
    pub fn total(&self) -> f64 {
        self.dexterity + self.intelligence + self.strength + self.will + self.wisdom
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_scores_are_one() {
        let scores = AbilityScores::default();
        for kind in AbilityKind::ALL {
            assert!((scores.score(kind) - 1.0).abs() < f64::EPSILON);
        }
    }

    #[test]
    fn set_score_round_trips() {
        let mut scores = AbilityScores::default();
        scores.set_score(AbilityKind::Will, 7.0);
        assert!((scores.score(AbilityKind::Will) - 7.0).abs() < f64::EPSILON);
        assert!((scores.score(AbilityKind::Strength) - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn iter_visits_all_five_in_canonical_order() {
        let scores = AbilityScores::default();
        let kinds: Vec<AbilityKind> = scores.iter().map(|(kind, _)| kind).collect();
        assert_eq!(kinds, AbilityKind::ALL.to_vec());
    }
}
