//! The player's capacity-bounded, alphabetized item collection.
//!
//! Entries are [`ItemRef`]s keyed by item id; at most one entry exists per
//! id, and the list stays sorted by item name (resolved through the
//! catalog). Mutations fire a synchronous `on_modified` callback so a host
//! view can refresh itself before control returns to the caller.

use crate::item::{ItemCatalog, ItemRef};

use questline_data::ItemId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The maximum number of distinct item stacks an inventory can hold.
pub const CAPACITY: usize = 10;

type ModifiedHook = Box<dyn FnMut()>;

#[derive(Default, Serialize, Deserialize)]
pub struct Inventory {
    pub currency: i64,
    entries: Vec<ItemRef>,
    #[serde(skip)]
    on_modified: Option<ModifiedHook>,
}

impl fmt::Debug for Inventory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Inventory")
            .field("currency", &self.currency)
            .field("entries", &self.entries)
            .finish_non_exhaustive()
    }
}

impl Clone for Inventory {
    fn clone(&self) -> Self {
        // the observer belongs to the original's host and is not cloned
        Self {
            currency: self.currency,
            entries: self.entries.clone(),
            on_modified: None,
        }
    }
}

impl PartialEq for Inventory {
    fn eq(&self, other: &Self) -> bool {
        self.currency == other.currency && self.entries == other.entries
    }
}

impl Inventory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the callback invoked after each mutation.
    pub fn set_on_modified(&mut self, hook: ModifiedHook) {
        self.on_modified = Some(hook);
    }

    pub fn capacity(&self) -> usize {
        CAPACITY
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// True once the number of stacks meets or exceeds the capacity.
    pub fn full(&self) -> bool {
        self.entries.len() >= CAPACITY
    }

    pub fn entries(&self) -> &[ItemRef] {
        &self.entries
    }

    pub fn get(&self, index: usize) -> Option<&ItemRef> {
        self.entries.get(index)
    }

    pub fn get_by_id(&self, item_id: ItemId) -> Option<&ItemRef> {
        self.entries.iter().find(|entry| entry.id == item_id)
    }

    pub fn contains_id(&self, item_id: ItemId) -> bool {
        self.get_by_id(item_id).is_some()
    }

    /// Put the given refs into the inventory, returning whatever didn't fit.
    ///
    /// Quantities merge onto an existing stack with the same id (a single
    /// stack has no quantity cap). New stacks are rejected once the
    /// inventory is full, otherwise inserted in name order. One modification
    /// notification fires for the whole batch.
    pub fn put(&mut self, catalog: &ItemCatalog, refs: impl IntoIterator<Item = ItemRef>) -> Vec<ItemRef> {
        let mut rejected = Vec::new();
        for incoming in refs {
            if let Some(existing) = self.entries.iter_mut().find(|entry| entry.id == incoming.id) {
                existing.quantity += incoming.quantity;
                continue;
            }
            if self.full() {
                rejected.push(incoming);
                continue;
            }
            let name = catalog.name_of(incoming.id);
            let at = self.entries.partition_point(|entry| catalog.name_of(entry.id) <= name);
            self.entries.insert(at, incoming);
        }
        self.notify();
        rejected
    }

    /// Remove `quantity` of the stack at `index`; zero removes the whole
    /// stack. Out-of-range indexes are a silent no-op.
    pub fn remove_at(&mut self, index: usize, quantity: u32) {
        let Some(entry) = self.entries.get_mut(index) else {
            return;
        };
        if quantity == 0 || entry.quantity <= quantity {
            self.entries.remove(index);
        } else {
            entry.quantity -= quantity;
        }
        self.notify();
    }

    /// Remove by item id; same decrement rules as [`Inventory::remove_at`].
    pub fn remove(&mut self, item_id: ItemId, quantity: u32) {
        if let Some(index) = self.entries.iter().position(|entry| entry.id == item_id) {
            self.remove_at(index, quantity);
        }
    }

    /// Consume `quantity` of the stack at `index`, deleting it when spent.
    pub fn use_at(&mut self, index: usize, quantity: u32) {
        let Some(entry) = self.entries.get_mut(index) else {
            return;
        };
        if entry.quantity <= quantity {
            self.entries.remove(index);
        } else {
            entry.quantity -= quantity;
        }
        self.notify();
    }

    /// Consume by item id; missing ids are a silent no-op.
    pub fn use_item(&mut self, item_id: ItemId, quantity: u32) {
        if let Some(index) = self.entries.iter().position(|entry| entry.id == item_id) {
            self.use_at(index, quantity);
        }
    }

    /// Remove every stack and return them to the caller.
    pub fn empty(&mut self) -> Vec<ItemRef> {
        let emptied = std::mem::take(&mut self.entries);
        self.notify();
        emptied
    }

    /// Remove every stack, discarding them.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.notify();
    }

    /// Replace contents from another inventory, keeping this one's observer.
    pub fn copy_from(&mut self, other: &Inventory) {
        self.currency = other.currency;
        self.entries = other.entries.clone();
        self.notify();
    }

    fn notify(&mut self) {
        if let Some(hook) = &mut self.on_modified {
            hook();
        }
    }
}
