//! Item definitions, references, and the item catalog.
//!
//! Items themselves are immutable definitions; everything the game moves
//! around is an [`ItemRef`] -- an `(id, quantity)` pair pointing into the
//! [`ItemCatalog`]. The catalog is built once at world load and passed
//! explicitly wherever item names must be resolved.

use questline_data::{ItemDef, ItemId};

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// An immutable item definition resolved from the catalog.
///
/// Two items are equal when both name and kind match. Ordering is by name
/// alone; the inventory uses it to keep its entries alphabetized.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Item {
    pub name: String,
    pub kind: String,
}

impl PartialOrd for Item {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Item {
    fn cmp(&self, other: &Self) -> Ordering {
        self.name.cmp(&other.name)
    }
}

/// A quantity of some catalog item.
///
/// Equality compares the id only, so two references to the same item are
/// "the same slot" regardless of quantity.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Eq)]
pub struct ItemRef {
    pub id: ItemId,
    pub quantity: u32,
}

impl ItemRef {
    pub fn new(id: ItemId, quantity: u32) -> Self {
        Self { id, quantity }
    }
}

impl PartialEq for ItemRef {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

/// The authoritative, read-only list of item definitions.
///
/// Built from authored content during world load and passed by reference
/// into every path that needs to resolve an [`ItemRef`]. Item ids are
/// stable positions in the underlying table.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ItemCatalog {
    items: Vec<Item>,
}

impl ItemCatalog {
    pub fn from_defs(defs: &[ItemDef]) -> Self {
        Self {
            items: defs
                .iter()
                .map(|def| Item {
                    name: def.name.clone(),
                    kind: def.kind.clone(),
                })
                .collect(),
        }
    }

    /// Resolve an item id to its definition, or `None` if out of range.
    pub fn get(&self, id: ItemId) -> Option<&Item> {
        self.items.get(id)
    }

    /// Resolve an item id to its display name. Unknown ids resolve to an
    /// empty string so display code never panics on stale references.
    pub fn name_of(&self, id: ItemId) -> &str {
        self.items.get(id).map_or("", |item| item.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Item> {
        self.items.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

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

    #[test]
    fn item_equality_requires_name_and_kind() {
        let rope = Item {
            name: "Rope".into(),
            kind: "tool".into(),
        };
        let fake_rope = Item {
            name: "Rope".into(),
            kind: "food".into(),
        };
        assert_ne!(rope, fake_rope);
        assert_eq!(rope, rope.clone());
    }

    #[test]
    fn item_ordering_is_by_name() {
        let rope = Item {
            name: "Rope".into(),
            kind: "tool".into(),
        };
        let apple = Item {
            name: "Apple".into(),
            kind: "zzz".into(),
        };
        assert!(apple < rope);
    }

    #[test]
    fn item_ref_equality_ignores_quantity() {
        assert_eq!(ItemRef::new(3, 1), ItemRef::new(3, 99));
        assert_ne!(ItemRef::new(3, 1), ItemRef::new(4, 1));
    }

    #[test]
    fn catalog_resolves_ids_in_range() {
        let catalog = test_catalog();
        assert_eq!(catalog.get(0).unwrap().name, "Rope");
        assert_eq!(catalog.name_of(1), "Apple");
        assert_eq!(catalog.len(), 2);
    }

    #[test]
    fn catalog_is_silent_on_unknown_ids() {
        let catalog = test_catalog();
        assert!(catalog.get(17).is_none());
        assert_eq!(catalog.name_of(17), "");
    }
}
