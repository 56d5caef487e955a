//! Editor session state and command dispatch.
//!
//! Holds the loaded world, the undo stack, and the dirty flag, and applies
//! parsed [`EditorCommand`]s. All output goes straight to the terminal;
//! the editor has no turn model to buffer for.

use crate::commands::{ActionField, EditorCommand, ItemField, SceneField};
use crate::undo::{
    EditCommand, InsertItem, InsertScene, RemoveItem, RemoveScene, ReplaceItem, ReplaceScene, UndoStack,
};

use anyhow::{Context, Result};
use colored::Colorize;
use log::info;
use questline_data::{
    AbilityKind, AbilityMinDef, ActionDef, ItemDef, ItemStackDef, SceneDef, SceneTarget, WorldDef, validate_world,
};
use std::fs;
use std::path::PathBuf;

/// What the dispatch loop should do next.
#[derive(Debug, PartialEq, Eq)]
pub enum EditorControl {
    Continue,
    Quit,
}

pub struct EditorSession {
    pub world: WorldDef,
    pub path: PathBuf,
    stack: UndoStack,
    dirty: bool,
    quit_pending: bool,
}

impl EditorSession {
    /// Open a world file, or start a fresh world when the file doesn't
    /// exist yet.
    ///
    /// # Errors
    /// Fails when an existing file can't be read or parsed.
    pub fn open(path: PathBuf) -> Result<Self> {
        let world = if path.exists() {
            let raw = fs::read_to_string(&path).with_context(|| format!("reading {}", path.display()))?;
            ron::from_str(&raw).with_context(|| format!("parsing {}", path.display()))?
        } else {
            println!("{} does not exist yet; starting an empty world.", path.display());
            WorldDef::default()
        };
        info!("editor opened {}", path.display());
        Ok(Self {
            world,
            path,
            stack: UndoStack::new(),
            dirty: false,
            quit_pending: false,
        })
    }

    pub fn dirty(&self) -> bool {
        self.dirty
    }

    /// Apply one parsed command.
    pub fn dispatch(&mut self, command: EditorCommand) -> EditorControl {
        if !matches!(command, EditorCommand::Quit) {
            self.quit_pending = false;
        }
        match command {
            EditorCommand::ListScenes => self.list_scenes(),
            EditorCommand::ShowScene(index) => self.show_scene(index),
            EditorCommand::NewScene => {
                let index = self.world.scenes.len();
                self.edit(Box::new(InsertScene {
                    index,
                    scene: SceneDef {
                        name: format!("Scene {index}"),
                        ..SceneDef::default()
                    },
                }));
            },
            EditorCommand::DeleteScene(index) => self.delete_scene(index),
            EditorCommand::SetScene { scene, field, value } => self.set_scene(scene, field, value),
            EditorCommand::ListActions(scene) => self.show_scene(scene),
            EditorCommand::NewAction(scene) => {
                self.with_scene(scene, "new action", |def| {
                    def.actions.push(ActionDef {
                        description: "Do something".into(),
                        ..ActionDef::default()
                    });
                    true
                });
            },
            EditorCommand::DeleteAction { scene, action } => {
                self.with_scene(scene, "delete action", |def| {
                    if action < def.actions.len() {
                        def.actions.remove(action);
                        true
                    } else {
                        println!("{}", format!("scene {scene} has no action {action}").red());
                        false
                    }
                });
            },
            EditorCommand::SetAction {
                scene,
                action,
                field,
                value,
            } => self.set_action(scene, action, field, &value),
            EditorCommand::ReqAbility {
                scene,
                action,
                ability,
                score,
            } => {
                let Some(kind) = AbilityKind::from_name(&ability) else {
                    println!("{}", format!("unknown ability '{ability}'").red());
                    return EditorControl::Continue;
                };
                self.with_action(scene, action, "set requirement ability", |def| {
                    def.requirement.abilities.retain(|min| min.ability != kind);
                    def.requirement.abilities.push(AbilityMinDef { ability: kind, score });
                    true
                });
            },
            EditorCommand::ReqItem {
                scene,
                action,
                item,
                quantity,
            } => {
                self.with_action(scene, action, "set requirement item", |def| {
                    def.requirement.items.retain(|stack| stack.item != item);
                    def.requirement.items.push(ItemStackDef { item, quantity });
                    true
                });
            },
            EditorCommand::ReqClear { scene, action } => {
                self.with_action(scene, action, "clear requirement", |def| {
                    def.requirement = questline_data::RequirementDef::default();
                    true
                });
            },
            EditorCommand::RewardXp { scene, action, amount } => {
                self.with_action(scene, action, "set reward xp", |def| {
                    def.reward.experience = amount;
                    true
                });
            },
            EditorCommand::RewardItem {
                scene,
                action,
                item,
                quantity,
            } => {
                self.with_action(scene, action, "set reward item", |def| {
                    def.reward.items.retain(|stack| stack.item != item);
                    def.reward.items.push(ItemStackDef { item, quantity });
                    true
                });
            },
            EditorCommand::RewardClear { scene, action } => {
                self.with_action(scene, action, "clear reward", |def| {
                    def.reward = questline_data::RewardDef::default();
                    true
                });
            },
            EditorCommand::ListItems => self.list_items(),
            EditorCommand::NewItem { name, kind } => {
                self.edit(Box::new(InsertItem {
                    item: ItemDef { name, kind },
                }));
            },
            EditorCommand::DeleteItem(index) => self.delete_item(index),
            EditorCommand::SetItem { item, field, value } => self.set_item(item, field, value),
            EditorCommand::Undo => match self.stack.undo(&mut self.world) {
                Some(label) => {
                    self.dirty = true;
                    println!("undid: {label}");
                },
                None => println!("nothing to undo"),
            },
            EditorCommand::Redo => match self.stack.redo(&mut self.world) {
                Some(label) => {
                    self.dirty = true;
                    println!("redid: {label}");
                },
                None => println!("nothing to redo"),
            },
            EditorCommand::Validate => self.validate(),
            EditorCommand::Save => {
                if let Err(err) = self.save() {
                    println!("{}", format!("save failed: {err:#}").red());
                }
            },
            EditorCommand::Help => print_help(),
            EditorCommand::Quit => {
                if self.dirty && !self.quit_pending {
                    self.quit_pending = true;
                    println!(
                        "{}",
                        "There are unsaved changes. `save` to keep them, or `quit` again to discard.".yellow()
                    );
                } else {
                    return EditorControl::Quit;
                }
            },
            EditorCommand::Unknown => {
                println!("{}", "Didn't catch that. Try `help`.".red());
            },
        }
        EditorControl::Continue
    }

    /// Write the world back to its file, warning on validation findings
    /// but not refusing; the game binary is the gate.
    ///
    /// # Errors
    /// Returns an error when serialization or file IO fails.
    pub fn save(&mut self) -> Result<()> {
        let findings = validate_world(&self.world);
        if !findings.is_empty() {
            println!(
                "{}",
                format!("warning: saving a world with {} validation finding(s); run `validate`", findings.len())
                    .yellow()
            );
        }
        let raw = ron::ser::to_string_pretty(&self.world, ron::ser::PrettyConfig::default())
            .context("serializing world to RON")?;
        fs::write(&self.path, raw).with_context(|| format!("writing {}", self.path.display()))?;
        self.dirty = false;
        info!("world saved to {}", self.path.display());
        println!("saved {}", self.path.display());
        Ok(())
    }

    fn edit(&mut self, command: Box<dyn EditCommand>) {
        println!("{}", command.label());
        self.stack.push(&mut self.world, command);
        self.dirty = true;
    }

    /// Run a closure over a cloned scene and commit the change as a
    /// reversible snapshot edit if the closure reports success.
    fn with_scene(&mut self, scene: usize, what: &str, mutate: impl FnOnce(&mut SceneDef) -> bool) {
        let Some(before) = self.world.scenes.get(scene).cloned() else {
            println!("{}", format!("no scene {scene}").red());
            return;
        };
        let mut after = before.clone();
        if mutate(&mut after) {
            self.edit(Box::new(ReplaceScene {
                index: scene,
                before,
                after,
                what: what.to_string(),
            }));
        }
    }

    fn with_action(&mut self, scene: usize, action: usize, what: &str, mutate: impl FnOnce(&mut ActionDef) -> bool) {
        self.with_scene(scene, what, |def| match def.actions.get_mut(action) {
            Some(action_def) => mutate(action_def),
            None => {
                println!("{}", format!("scene {scene} has no action {action}").red());
                false
            },
        });
    }

    fn set_scene(&mut self, scene: usize, field: SceneField, value: String) {
        self.with_scene(scene, "set field", |def| {
            match field {
                SceneField::Name => def.name = value,
                SceneField::Enter => def.enter_description = value,
                SceneField::Exit => def.exit_description = value,
                SceneField::Image => def.image_path = value,
            }
            true
        });
    }

    fn set_action(&mut self, scene: usize, action: usize, field: ActionField, value: &str) {
        self.with_action(scene, action, "set field", |def| match field {
            ActionField::Description => {
                def.description = value.to_string();
                true
            },
            ActionField::Consequence => {
                def.consequence = value.to_string();
                true
            },
            ActionField::Target => match parse_target(value) {
                Some(target) => {
                    def.target = target;
                    true
                },
                None => {
                    println!("{}", "target must be `stay`, `back`, or a scene index".red());
                    false
                },
            },
            ActionField::Disable => match parse_bool(value) {
                Some(flag) => {
                    def.disable_on_select = flag;
                    true
                },
                None => {
                    bool_usage();
                    false
                },
            },
            ActionField::Remove => match parse_bool(value) {
                Some(flag) => {
                    def.remove_on_select = flag;
                    true
                },
                None => {
                    bool_usage();
                    false
                },
            },
            ActionField::Secret => match parse_bool(value) {
                Some(flag) => {
                    def.secret = flag;
                    true
                },
                None => {
                    bool_usage();
                    false
                },
            },
        });
    }

    fn delete_scene(&mut self, index: usize) {
        let Some(scene) = self.world.scenes.get(index).cloned() else {
            println!("{}", format!("no scene {index}").red());
            return;
        };
        self.edit(Box::new(RemoveScene { index, scene }));
        // deleting a scene renumbers everything after it; point out the fallout
        let findings = validate_world(&self.world);
        if !findings.is_empty() {
            println!(
                "{}",
                format!("note: {} validation finding(s) after delete; run `validate`", findings.len()).yellow()
            );
        }
    }

    fn delete_item(&mut self, index: usize) {
        let Some(item) = self.world.items.get(index).cloned() else {
            println!("{}", format!("no item {index}").red());
            return;
        };
        // positional item ids mean deletion silently renumbers every later
        // item; refuse while anything still references this one
        let references = self.count_item_references(index);
        if references > 0 {
            println!(
                "{}",
                format!(
                    "item {index} ({}) is referenced by {references} requirement/reward entr{}; remove those first",
                    item.name,
                    if references == 1 { "y" } else { "ies" }
                )
                .red()
            );
            return;
        }
        self.edit(Box::new(RemoveItem { index, item }));
    }

    fn count_item_references(&self, item: usize) -> usize {
        self.world
            .scenes
            .iter()
            .flat_map(|scene| &scene.actions)
            .map(|action| {
                action.requirement.items.iter().filter(|stack| stack.item == item).count()
                    + action.reward.items.iter().filter(|stack| stack.item == item).count()
            })
            .sum()
    }

    fn set_item(&mut self, index: usize, field: ItemField, value: String) {
        let Some(before) = self.world.items.get(index).cloned() else {
            println!("{}", format!("no item {index}").red());
            return;
        };
        let mut after = before.clone();
        match field {
            ItemField::Name => after.name = value,
            ItemField::Kind => after.kind = value,
        }
        self.edit(Box::new(ReplaceItem { index, before, after }));
    }

    fn list_scenes(&self) {
        if self.world.scenes.is_empty() {
            println!("(no scenes; `scene new` to add one)");
            return;
        }
        for (index, scene) in self.world.scenes.iter().enumerate() {
            println!("{index:>3}. {} ({} action(s))", scene.name.bold(), scene.actions.len());
        }
    }

    fn show_scene(&self, index: usize) {
        let Some(scene) = self.world.scenes.get(index) else {
            println!("{}", format!("no scene {index}").red());
            return;
        };
        println!("{index}. {}", scene.name.bold());
        println!("  enter: {}", scene.enter_description);
        println!("  exit:  {}", scene.exit_description);
        println!("  image: {}", scene.image_path);
        for (action_index, action) in scene.actions.iter().enumerate() {
            println!("  [{action_index}] {} -> {}", action.description, describe_target(action.target));
            if !action.consequence.is_empty() {
                println!("      consequence: {}", action.consequence);
            }
            let mut flags = Vec::new();
            if action.disable_on_select {
                flags.push("disable-on-select");
            }
            if action.remove_on_select {
                flags.push("remove-on-select");
            }
            if action.secret {
                flags.push("secret");
            }
            if !flags.is_empty() {
                println!("      flags: {}", flags.join(", "));
            }
            for min in &action.requirement.abilities {
                println!("      requires: {} {}", min.ability, min.score);
            }
            for stack in &action.requirement.items {
                println!("      requires: item {} x{}", stack.item, stack.quantity);
            }
            if action.reward.experience > 0 {
                println!("      rewards: {} xp", action.reward.experience);
            }
            for stack in &action.reward.items {
                println!("      rewards: item {} x{}", stack.item, stack.quantity);
            }
        }
    }

    fn list_items(&self) {
        if self.world.items.is_empty() {
            println!("(no items; `item new <name> <kind>` to add one)");
            return;
        }
        for (index, item) in self.world.items.iter().enumerate() {
            println!("{index:>3}. {:<24} {}", item.name.bold(), item.kind);
        }
    }

    fn validate(&self) {
        let findings = validate_world(&self.world);
        if findings.is_empty() {
            println!("{}", "world is valid".green());
            return;
        }
        for finding in findings {
            println!("{}", format!("- {finding}").red());
        }
    }
}

fn parse_target(value: &str) -> Option<SceneTarget> {
    match value {
        "stay" => Some(SceneTarget::Stay),
        "back" | "previous" => Some(SceneTarget::Previous),
        index => index.parse().ok().map(SceneTarget::Scene),
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value {
        "true" | "on" | "yes" => Some(true),
        "false" | "off" | "no" => Some(false),
        _ => None,
    }
}

fn bool_usage() {
    println!("{}", "expected `true` or `false`".red());
}

fn describe_target(target: SceneTarget) -> String {
    match target {
        SceneTarget::Stay => "stay".to_string(),
        SceneTarget::Previous => "previous scene".to_string(),
        SceneTarget::Scene(index) => format!("scene {index}"),
    }
}

fn print_help() {
    println!("scenes | scene <i> | scene new | scene del <i>");
    println!("scene set <i> name|enter|exit|image <text>");
    println!("actions <scene> | action new <scene> | action del <scene> <i>");
    println!("action set <scene> <i> desc|consequence|target|disable|remove|secret <value>");
    println!("req ability <scene> <i> <ability> <score> | req item <scene> <i> <item> <qty> | req clear <scene> <i>");
    println!("reward xp <scene> <i> <amount> | reward item <scene> <i> <item> <qty> | reward clear <scene> <i>");
    println!("items | item new <name> <kind> | item del <i> | item set <i> name|kind <value>");
    println!("undo | redo | validate | save | quit");
}

#[cfg(test)]
mod tests {
    use super::*;
    use questline_data::RequirementDef;

    fn session_with(world: WorldDef) -> EditorSession {
        EditorSession {
            world,
            path: PathBuf::from("unused.ron"),
            stack: UndoStack::new(),
            dirty: false,
            quit_pending: false,
        }
    }

    fn two_scene_world() -> WorldDef {
        WorldDef {
            items: vec![ItemDef {
                name: "Rope".into(),
                kind: "tool".into(),
            }],
            scenes: vec![
                SceneDef {
                    name: "Crossroads".into(),
                    actions: vec![ActionDef {
                        description: "Wait".into(),
                        ..ActionDef::default()
                    }],
                    ..SceneDef::default()
                },
                SceneDef {
                    name: "Mill".into(),
                    ..SceneDef::default()
                },
            ],
        }
    }

    #[test]
    fn scene_crud_with_undo() {
        let mut session = session_with(two_scene_world());

        session.dispatch(EditorCommand::NewScene);
        assert_eq!(session.world.scenes.len(), 3);

        session.dispatch(EditorCommand::SetScene {
            scene: 2,
            field: SceneField::Name,
            value: "Riverbank".into(),
        });
        assert_eq!(session.world.scenes[2].name, "Riverbank");

        session.dispatch(EditorCommand::Undo);
        assert_eq!(session.world.scenes[2].name, "Scene 2");
        session.dispatch(EditorCommand::Undo);
        assert_eq!(session.world.scenes.len(), 2);
        session.dispatch(EditorCommand::Redo);
        assert_eq!(session.world.scenes.len(), 3);
        assert!(session.dirty());
    }

    #[test]
    fn action_edits_are_reversible_snapshots() {
        let mut session = session_with(two_scene_world());

        session.dispatch(EditorCommand::SetAction {
            scene: 0,
            action: 0,
            field: ActionField::Target,
            value: "1".into(),
        });
        assert_eq!(session.world.scenes[0].actions[0].target, SceneTarget::Scene(1));

        session.dispatch(EditorCommand::ReqAbility {
            scene: 0,
            action: 0,
            ability: "strength".into(),
            score: 3.0,
        });
        assert_eq!(session.world.scenes[0].actions[0].requirement.abilities.len(), 1);

        session.dispatch(EditorCommand::Undo);
        assert!(session.world.scenes[0].actions[0].requirement.is_empty());
        session.dispatch(EditorCommand::Undo);
        assert_eq!(session.world.scenes[0].actions[0].target, SceneTarget::Stay);
    }

    #[test]
    fn referenced_items_cannot_be_deleted() {
        let mut world = two_scene_world();
        world.scenes[0].actions[0].requirement = RequirementDef {
            items: vec![ItemStackDef { item: 0, quantity: 1 }],
            ..RequirementDef::default()
        };
        let mut session = session_with(world);

        session.dispatch(EditorCommand::DeleteItem(0));
        assert_eq!(session.world.items.len(), 1);

        session.dispatch(EditorCommand::ReqClear { scene: 0, action: 0 });
        session.dispatch(EditorCommand::DeleteItem(0));
        assert!(session.world.items.is_empty());
    }

    #[test]
    fn bad_indices_leave_the_world_untouched() {
        let mut session = session_with(two_scene_world());
        let before = session.world.clone();

        session.dispatch(EditorCommand::DeleteScene(9));
        session.dispatch(EditorCommand::DeleteAction { scene: 0, action: 9 });
        session.dispatch(EditorCommand::SetItem {
            item: 9,
            field: ItemField::Name,
            value: "Ghost".into(),
        });

        assert_eq!(
            ron::ser::to_string(&session.world).unwrap(),
            ron::ser::to_string(&before).unwrap()
        );
        assert!(!session.dirty());
    }

    #[test]
    fn quit_requires_confirmation_when_dirty() {
        let mut session = session_with(two_scene_world());
        session.dispatch(EditorCommand::NewScene);

        assert_eq!(session.dispatch(EditorCommand::Quit), EditorControl::Continue);
        assert_eq!(session.dispatch(EditorCommand::Quit), EditorControl::Quit);
    }
}
