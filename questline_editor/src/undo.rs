//! Undo/redo command stack for world edits.
//!
//! Every mutation of the loaded [`WorldDef`] goes through an
//! [`EditCommand`] so it can be undone and redone. New edits truncate the
//! redo tail, matching the usual editor stack behavior.

use questline_data::{ItemDef, SceneDef, WorldDef};

/// A reversible edit to the world.
pub trait EditCommand {
    fn label(&self) -> String;
    fn apply(&self, world: &mut WorldDef);
    fn revert(&self, world: &mut WorldDef);
}

/// Insert a scene at an index.
pub struct InsertScene {
    pub index: usize,
    pub scene: SceneDef,
}

impl EditCommand for InsertScene {
    fn label(&self) -> String {
        format!("new scene at {}", self.index)
    }
    fn apply(&self, world: &mut WorldDef) {
        world.scenes.insert(self.index, self.scene.clone());
    }
    fn revert(&self, world: &mut WorldDef) {
        world.scenes.remove(self.index);
    }
}

/// Remove the scene at an index, remembering it for undo.
pub struct RemoveScene {
    pub index: usize,
    pub scene: SceneDef,
}

impl EditCommand for RemoveScene {
    fn label(&self) -> String {
        format!("delete scene {} ({})", self.index, self.scene.name)
    }
    fn apply(&self, world: &mut WorldDef) {
        world.scenes.remove(self.index);
    }
    fn revert(&self, world: &mut WorldDef) {
        world.scenes.insert(self.index, self.scene.clone());
    }
}

/// Replace the scene at an index with an edited copy. Field and action
/// edits both come through here as before/after snapshots.
pub struct ReplaceScene {
    pub index: usize,
    pub before: SceneDef,
    pub after: SceneDef,
    pub what: String,
}

impl EditCommand for ReplaceScene {
    fn label(&self) -> String {
        format!("{} on scene {}", self.what, self.index)
    }
    fn apply(&self, world: &mut WorldDef) {
        world.scenes[self.index] = self.after.clone();
    }
    fn revert(&self, world: &mut WorldDef) {
        world.scenes[self.index] = self.before.clone();
    }
}

/// Append an item to the item table.
pub struct InsertItem {
    pub item: ItemDef,
}

impl EditCommand for InsertItem {
    fn label(&self) -> String {
        format!("new item '{}'", self.item.name)
    }
    fn apply(&self, world: &mut WorldDef) {
        world.items.push(self.item.clone());
    }
    fn revert(&self, world: &mut WorldDef) {
        world.items.pop();
    }
}

/// Remove the item at an index, remembering it for undo.
pub struct RemoveItem {
    pub index: usize,
    pub item: ItemDef,
}

impl EditCommand for RemoveItem {
    fn label(&self) -> String {
        format!("delete item {} ({})", self.index, self.item.name)
    }
    fn apply(&self, world: &mut WorldDef) {
        world.items.remove(self.index);
    }
    fn revert(&self, world: &mut WorldDef) {
        world.items.insert(self.index, self.item.clone());
    }
}

/// Replace the item at an index with an edited copy.
pub struct ReplaceItem {
    pub index: usize,
    pub before: ItemDef,
    pub after: ItemDef,
}

impl EditCommand for ReplaceItem {
    fn label(&self) -> String {
        format!("edit item {} ({})", self.index, self.after.name)
    }
    fn apply(&self, world: &mut WorldDef) {
        world.items[self.index] = self.after.clone();
    }
    fn revert(&self, world: &mut WorldDef) {
        world.items[self.index] = self.before.clone();
    }
}

/// The classic two-stack undo model.
#[derive(Default)]
pub struct UndoStack {
    undos: Vec<Box<dyn EditCommand>>,
    redos: Vec<Box<dyn EditCommand>>,
}

impl UndoStack {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply a command and push it onto the undo stack. Any redo history
    /// is discarded.
    pub fn push(&mut self, world: &mut WorldDef, command: Box<dyn EditCommand>) {
        command.apply(world);
        self.redos.clear();
        self.undos.push(command);
    }

    /// Revert the most recent edit, returning its label.
    pub fn undo(&mut self, world: &mut WorldDef) -> Option<String> {
        let command = self.undos.pop()?;
        command.revert(world);
        let label = command.label();
        self.redos.push(command);
        Some(label)
    }

    /// Re-apply the most recently undone edit, returning its label.
    pub fn redo(&mut self, world: &mut WorldDef) -> Option<String> {
        let command = self.redos.pop()?;
        command.apply(world);
        let label = command.label();
        self.undos.push(command);
        Some(label)
    }

    pub fn is_empty(&self) -> bool {
        self.undos.is_empty() && self.redos.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scene(name: &str) -> SceneDef {
        SceneDef {
            name: name.to_string(),
            ..SceneDef::default()
        }
    }

    #[test]
    fn insert_scene_undoes_and_redoes() {
        let mut world = WorldDef::default();
        let mut stack = UndoStack::new();

        stack.push(
            &mut world,
            Box::new(InsertScene {
                index: 0,
                scene: scene("Crossroads"),
            }),
        );
        assert_eq!(world.scenes.len(), 1);

        stack.undo(&mut world).unwrap();
        assert!(world.scenes.is_empty());

        stack.redo(&mut world).unwrap();
        assert_eq!(world.scenes[0].name, "Crossroads");
    }

    #[test]
    fn remove_scene_restores_at_the_same_index() {
        let mut world = WorldDef {
            scenes: vec![scene("A"), scene("B"), scene("C")],
            ..WorldDef::default()
        };
        let mut stack = UndoStack::new();

        let removed = world.scenes[1].clone();
        stack.push(&mut world, Box::new(RemoveScene { index: 1, scene: removed }));
        assert_eq!(world.scenes.len(), 2);

        stack.undo(&mut world).unwrap();
        assert_eq!(world.scenes[1].name, "B");
    }

    #[test]
    fn replace_scene_swaps_snapshots() {
        let mut world = WorldDef {
            scenes: vec![scene("Old Name")],
            ..WorldDef::default()
        };
        let mut stack = UndoStack::new();

        let before = world.scenes[0].clone();
        let mut after = before.clone();
        after.name = "New Name".into();
        stack.push(
            &mut world,
            Box::new(ReplaceScene {
                index: 0,
                before,
                after,
                what: "set name".into(),
            }),
        );
        assert_eq!(world.scenes[0].name, "New Name");

        stack.undo(&mut world).unwrap();
        assert_eq!(world.scenes[0].name, "Old Name");
    }

    #[test]
    fn new_edit_truncates_the_redo_tail() {
        let mut world = WorldDef::default();
        let mut stack = UndoStack::new();

        stack.push(
            &mut world,
            Box::new(InsertItem {
                item: ItemDef {
                    name: "Rope".into(),
                    kind: "tool".into(),
                },
            }),
        );
        stack.undo(&mut world).unwrap();

        stack.push(
            &mut world,
            Box::new(InsertItem {
                item: ItemDef {
                    name: "Lantern".into(),
                    kind: "gear".into(),
                },
            }),
        );
        assert!(stack.redo(&mut world).is_none());
        assert_eq!(world.items.len(), 1);
        assert_eq!(world.items[0].name, "Lantern");
    }

    #[test]
    fn undo_on_an_empty_stack_is_none() {
        let mut world = WorldDef::default();
        let mut stack = UndoStack::new();
        assert!(stack.undo(&mut world).is_none());
        assert!(stack.redo(&mut world).is_none());
    }
}
