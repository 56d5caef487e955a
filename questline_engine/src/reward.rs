//! Rewards pay out experience and items when an action is first selected.

use crate::item::{ItemCatalog, ItemRef};
use crate::player::Player;

use log::warn;
use questline_data::RewardDef;
use serde::{Deserialize, Serialize};

/// What a successfully selected action grants.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Reward {
    pub experience: u64,
    pub items: Vec<ItemRef>,
}

/// Outcome of distributing a reward.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Payout {
    pub experience: u64,
    pub levels_gained: u32,
    /// Items that didn't fit in the player's inventory.
    pub rejected: Vec<ItemRef>,
}

impl Reward {
    pub fn from_def(def: &RewardDef) -> Self {
        Self {
            experience: def.experience,
            items: def.items.iter().map(|stack| ItemRef::new(stack.item, stack.quantity)).collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.experience == 0 && self.items.is_empty()
    }

    /// Grant experience first (resolving level-ups), then items.
    ///
    /// Items that don't fit are returned to the caller to surface; the
    /// inventory never silently drops them.
    pub fn distribute(&self, player: &mut Player, catalog: &ItemCatalog) -> Payout {
        let levels_gained = player.add_experience(self.experience);
        let rejected = player.character.inventory.put(catalog, self.items.iter().copied());
        if !rejected.is_empty() {
            warn!(
                "inventory full: {} reward stack(s) rejected for player '{}'",
                rejected.len(),
                player.name()
            );
        }
        Payout {
            experience: self.experience,
            levels_gained,
            rejected,
        }
    }
}
