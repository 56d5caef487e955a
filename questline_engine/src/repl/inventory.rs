//! `repl::inventory` module
//!
//! Handlers for inspecting and managing the player's inventory.

use crate::game::Game;
use crate::view::{InventoryLine, View, ViewItem};

use log::info;
use questline_data::ItemId;

/// Show the inventory table.
pub fn inv_handler(game: &Game, view: &mut View) {
    let lines = game
        .player
        .character
        .inventory
        .entries()
        .iter()
        .map(|entry| {
            let item = game.catalog.get(entry.id);
            InventoryLine {
                name: item.map_or_else(|| format!("<unknown item {}>", entry.id), |item| item.name.clone()),
                kind: item.map_or(String::new(), |item| item.kind.clone()),
                quantity: entry.quantity,
            }
        })
        .collect();
    view.push(ViewItem::InventoryTable {
        currency: game.player.character.inventory.currency,
        lines,
    });
}

/// Discard an item by (partial) name; quantity zero drops the whole stack.
pub fn drop_handler(game: &mut Game, view: &mut View, item: &str, quantity: u32) {
    let Some(item_id) = find_carried_item(game, item) else {
        view.push(ViewItem::ActionFailure(format!("You aren't carrying any \"{item}\".")));
        return;
    };
    let name = game.catalog.name_of(item_id).to_string();
    game.player.character.inventory.remove(item_id, quantity);
    info!("player dropped '{name}' (quantity {quantity})");
    let how_many = if quantity == 0 {
        "all of your".to_string()
    } else {
        format!("{quantity} of your")
    };
    view.push(ViewItem::ActionSuccess(format!("You drop {how_many} {name}.")));
}

/// Case-insensitive substring search over carried item names.
fn find_carried_item(game: &Game, search_term: &str) -> Option<ItemId> {
    let lc_term = search_term.to_lowercase();
    game.player
        .character
        .inventory
        .entries()
        .iter()
        .map(|entry| entry.id)
        .find(|id| game.catalog.name_of(*id).to_lowercase().contains(&lc_term))
}
