//! Requirements gate actions on minimum ability scores and item holdings.

use crate::character::Character;
use crate::item::{ItemCatalog, ItemRef};

use questline_data::{AbilityKind, RequirementDef};
use serde::{Deserialize, Serialize};

/// Minimum score demanded for one ability.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct AbilityMin {
    pub ability: AbilityKind,
    pub score: f64,
}

/// A predicate over a character: every ability minimum AND every item
/// minimum must hold. Empty lists are vacuously satisfied.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Requirement {
    pub abilities: Vec<AbilityMin>,
    pub items: Vec<ItemRef>,
}

impl Requirement {
    pub fn from_def(def: &RequirementDef) -> Self {
        Self {
            abilities: def
                .abilities
                .iter()
                .map(|min| AbilityMin {
                    ability: min.ability,
                    score: min.score,
                })
                .collect(),
            items: def.items.iter().map(|stack| ItemRef::new(stack.item, stack.quantity)).collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.abilities.is_empty() && self.items.is_empty()
    }

    /// Whether the character meets every minimum. A missing inventory item
    /// counts as quantity zero.
    pub fn met(&self, character: &Character) -> bool {
        for min in &self.abilities {
            if character.ability_score(min.ability) < min.score {
                return false;
            }
        }
        for required in &self.items {
            let held = character.inventory.get_by_id(required.id).map_or(0, |entry| entry.quantity);
            if held < required.quantity {
                return false;
            }
        }
        true
    }

    /// Consume the required items. Checking an ability never spends it.
    pub fn consume(&self, character: &mut Character) {
        for required in &self.items {
            character.use_item(required.id, required.quantity);
        }
    }

    /// Short requirement text appended to action descriptions, or `None`
    /// when there is nothing to demand.
    pub fn describe(&self, catalog: &ItemCatalog) -> Option<String> {
        if self.is_empty() {
            return None;
        }
        let mut parts = Vec::new();
        for min in &self.abilities {
            parts.push(format!("{} {}", min.ability, min.score));
        }
        for required in &self.items {
            parts.push(format!("{} x{}", catalog.name_of(required.id), required.quantity));
        }
        Some(format!("(needs {})", parts.join(", ")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use questline_data::ItemDef;

    fn test_catalog() -> ItemCatalog {
        ItemCatalog::from_defs(&[
            ItemDef {
                name: "Rope".into(),
                kind: "tool".into(),
            },
            ItemDef {
                name: "Apple".into(),
                kind: "food".into(),
            },
        ])
    }

    fn requirement(abilities: Vec<AbilityMin>, items: Vec<ItemRef>) -> Requirement {
        Requirement { abilities, items }
    }

    #[test]
    fn empty_requirement_is_vacuously_met() {
        let character = Character::new("Tester");
        assert!(Requirement::default().met(&character));
    }

    #[test]
    fn ability_minimum_gates_on_score() {
        let mut character = Character::new("Tester");
        let req = requirement(
            vec![AbilityMin {
                ability: AbilityKind::Strength,
                score: 3.0,
            }],
            Vec::new(),
        );

        assert!(!req.met(&character));
        character.abilities.set_score(AbilityKind::Strength, 3.0);
        assert!(req.met(&character));
    }

    #[test]
    fn missing_item_counts_as_zero() {
        let character = Character::new("Tester");
        let req = requirement(Vec::new(), vec![ItemRef::new(0, 1)]);
        assert!(!req.met(&character));
    }

    #[test]
    fn item_minimum_gates_on_quantity() {
        let catalog = test_catalog();
        let mut character = Character::new("Tester");
        character.inventory.put(&catalog, [ItemRef::new(0, 1)]);

        let req = requirement(Vec::new(), vec![ItemRef::new(0, 2)]);
        assert!(!req.met(&character));

        character.inventory.put(&catalog, [ItemRef::new(0, 1)]);
        assert!(req.met(&character));
    }

    #[test]
    fn consume_spends_items_but_not_abilities() {
        let catalog = test_catalog();
        let mut character = Character::new("Tester");
        character.abilities.set_score(AbilityKind::Will, 5.0);
        character.inventory.put(&catalog, [ItemRef::new(0, 3)]);

        let req = requirement(
            vec![AbilityMin {
                ability: AbilityKind::Will,
                score: 5.0,
            }],
            vec![ItemRef::new(0, 2)],
        );
        req.consume(&mut character);

        assert_eq!(character.inventory.get_by_id(0).unwrap().quantity, 1);
        assert!((character.ability_score(AbilityKind::Will) - 5.0).abs() < f64::EPSILON);
    }

    #[test]
    fn describe_lists_abilities_and_items() {
        let catalog = test_catalog();
        let req = requirement(
            vec![AbilityMin {
                ability: AbilityKind::Wisdom,
                score: 2.0,
            }],
            vec![ItemRef::new(1, 3)],
        );

        let text = req.describe(&catalog).unwrap();
        assert!(text.contains("wisdom 2"));
        assert!(text.contains("Apple x3"));
        assert!(Requirement::default().describe(&catalog).is_none());
    }
}
