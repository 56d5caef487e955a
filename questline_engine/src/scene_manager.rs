//! The scene-graph traversal engine.
//!
//! Tracks the current scene, a LIFO trail of previously visited scene
//! indices, and the consequence text of the last navigating action.
//! Action selection dispatches through here so that requirement checks,
//! payout, and navigation happen as one atomic step per player choice.

use crate::action::Selection;
use crate::item::{ItemCatalog, ItemRef};
use crate::player::Player;
use crate::scene::Scene;

use log::{info, warn};
use questline_data::{SceneDef, SceneTarget};
use serde::{Deserialize, Serialize};

// Note: the manager itself is not serialized; saves persist only
// [`SceneProgress`], and the authored graph is rebuilt from content.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SceneManager {
    scenes: Vec<Scene>,
    current_index: usize,
    visited: Vec<usize>,
    last_consequence: String,
}

/// The manager's persisted runtime state: indices, the back trail, and the
/// per-action flags of every scene. Authored content is not part of a save.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SceneProgress {
    pub current_index: usize,
    pub visited: Vec<usize>,
    pub last_consequence: String,
    pub scenes: Vec<Vec<crate::action::ActionFlags>>,
}

/// Result of dispatching a player's action choice.
#[derive(Debug, Clone, PartialEq)]
pub enum SelectionResult {
    /// The scene or action index didn't resolve; nothing happened.
    NoAction,
    /// The action exists but is disabled or its requirement isn't met.
    RequirementNotMet,
    /// The action fired.
    Performed {
        selection: Selection,
        /// Whether the current scene actually changed.
        navigated: bool,
    },
}

impl SceneManager {
    pub fn from_defs(defs: &[SceneDef]) -> Self {
        Self {
            scenes: defs.iter().map(Scene::from_def).collect(),
            current_index: 0,
            visited: Vec::new(),
            last_consequence: String::new(),
        }
    }

    pub fn scenes(&self) -> &[Scene] {
        &self.scenes
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn visited(&self) -> &[usize] {
        &self.visited
    }

    pub fn last_consequence(&self) -> &str {
        &self.last_consequence
    }

    /// The scene the player is in, or `None` when the graph is empty.
    pub fn current(&self) -> Option<&Scene> {
        self.scenes.get(self.current_index)
    }

    /// The scene on top of the back trail.
    ///
    /// Returns `None` when the trail is empty, points out of range, or its
    /// top is a stale entry equal to the current index.
    pub fn previous(&self) -> Option<&Scene> {
        let top = *self.visited.last()?;
        if top == self.current_index {
            return None;
        }
        self.scenes.get(top)
    }

    /// Move per the target, maintaining the back trail. Returns whether the
    /// current scene changed.
    ///
    /// `Stay`, a target equal to the current index, an out-of-range index,
    /// and `Previous` on an empty trail are all silent no-ops.
    pub fn goto(&mut self, target: SceneTarget) -> bool {
        let moved = match target {
            SceneTarget::Stay => false,
            SceneTarget::Previous => {
                if let Some(back) = self.visited.pop() {
                    self.current_index = back;
                    true
                } else {
                    warn!("goto previous with an empty back trail; staying put");
                    false
                }
            },
            SceneTarget::Scene(index) => {
                if index == self.current_index || index >= self.scenes.len() {
                    false
                } else {
                    self.visited.push(self.current_index);
                    self.current_index = index;
                    true
                }
            },
        };

        if moved {
            info!("scene changed to {} ({:?})", self.current_index, target);
            self.refresh_return_action();
        }
        moved
    }

    /// Dispatch the player's choice of the action at `index` on the current
    /// scene.
    pub fn select_action(&mut self, index: usize, player: &mut Player, catalog: &ItemCatalog) -> SelectionResult {
        let Some(scene) = self.scenes.get_mut(self.current_index) else {
            return SelectionResult::NoAction;
        };
        let Some(action) = scene.action_mut(index) else {
            return SelectionResult::NoAction;
        };
        if !action.requirement_met(player) {
            return SelectionResult::RequirementNotMet;
        }
        let target = action.target;
        let consequence = action.consequence.clone();
        let Some(selection) = action.select(player, catalog) else {
            return SelectionResult::RequirementNotMet;
        };

        let mut navigated = false;
        if selection.navigate {
            navigated = self.goto(target);
            if navigated {
                self.last_consequence = consequence;
            }
        }
        SelectionResult::Performed { selection, navigated }
    }

    /// Reload the authored graph and restart from scene zero.
    pub fn reset(&mut self, defs: &[SceneDef]) {
        self.scenes = defs.iter().map(Scene::from_def).collect();
        self.current_index = 0;
        self.visited.clear();
        self.last_consequence.clear();
        info!("scene manager reset: {} scenes", self.scenes.len());
    }

    /// Compose the text shown for the current scene: the previous scene's
    /// exit text, the last navigating action's consequence, then the
    /// current scene's entry text.
    pub fn scene_description(&self) -> String {
        let mut parts = Vec::new();
        if let Some(previous) = self.previous()
            && !previous.exit_description.is_empty()
        {
            parts.push(previous.exit_description.clone());
        }
        if !self.last_consequence.is_empty() {
            parts.push(self.last_consequence.clone());
        }
        if let Some(current) = self.current()
            && !current.enter_description.is_empty()
        {
            parts.push(current.enter_description.clone());
        }
        parts.join("\n\n")
    }

    /// Snapshot the runtime state for a save file.
    pub fn progress(&self) -> SceneProgress {
        SceneProgress {
            current_index: self.current_index,
            visited: self.visited.clone(),
            last_consequence: self.last_consequence.clone(),
            scenes: self.scenes.iter().map(Scene::action_flags).collect(),
        }
    }

    /// Merge saved runtime state onto the (freshly reloaded) authored
    /// graph. Flags merge by position; indices that no longer resolve fall
    /// back to scene zero.
    pub fn restore_progress(&mut self, progress: SceneProgress) {
        if progress.current_index < self.scenes.len() {
            self.current_index = progress.current_index;
        } else {
            warn!(
                "saved scene index {} out of range ({} scenes); starting from scene 0",
                progress.current_index,
                self.scenes.len()
            );
            self.current_index = 0;
        }
        self.visited = progress.visited;
        self.last_consequence = progress.last_consequence;
        for (scene, flags) in self.scenes.iter_mut().zip(&progress.scenes) {
            scene.copy_action_flags(flags);
        }
        self.refresh_return_action();
    }

    /// Keep the current scene's return action naming the actual previous
    /// scene.
    fn refresh_return_action(&mut self) {
        let previous_name = self.previous().map(|scene| scene.name.clone());
        if let Some(name) = previous_name
            && let Some(current) = self.scenes.get_mut(self.current_index)
        {
            current.set_return_action(format!("Return to {name}"));
        }
    }

    /// Reward items rejected on the last selection are surfaced through
    /// [`SelectionResult`]; this helper names them for display.
    pub fn describe_rejected(rejected: &[ItemRef], catalog: &ItemCatalog) -> String {
        rejected
            .iter()
            .map(|entry| format!("{} x{}", catalog.name_of(entry.id), entry.quantity))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::Action;
    use crate::requirement::Requirement;
    use crate::reward::Reward;
    use questline_data::{ActionDef, ItemDef, ItemStackDef, RequirementDef, RewardDef};

    fn scene_def(name: &str, actions: Vec<ActionDef>) -> SceneDef {
        SceneDef {
            name: name.into(),
            enter_description: format!("You arrive at the {name}."),
            exit_description: format!("You leave the {name}."),
            image_path: String::new(),
            actions,
        }
    }

    fn go(description: &str, target: SceneTarget) -> ActionDef {
        ActionDef {
            description: description.into(),
            target,
            ..ActionDef::default()
        }
    }

    fn test_defs() -> Vec<SceneDef> {
        vec![
            scene_def(
                "Crossroads",
                vec![
                    go("To the mill", SceneTarget::Scene(1)),
                    go("To the river", SceneTarget::Scene(2)),
                ],
            ),
            scene_def(
                "Mill",
                vec![
                    ActionDef {
                        description: "Search the flour sacks".into(),
                        consequence: "Dust billows everywhere.".into(),
                        target: SceneTarget::Stay,
                        reward: RewardDef {
                            experience: 10,
                            ..RewardDef::default()
                        },
                        ..ActionDef::default()
                    },
                    go("Go back", SceneTarget::Previous),
                ],
            ),
            scene_def("River", vec![go("Go back", SceneTarget::Previous)]),
        ]
    }

    fn test_world() -> (SceneManager, Player, ItemCatalog) {
        let manager = SceneManager::from_defs(&test_defs());
        let catalog = ItemCatalog::from_defs(&[ItemDef {
            name: "Rope".into(),
            kind: "tool".into(),
        }]);
        (manager, Player::default(), catalog)
    }

    #[test]
    fn goto_pushes_and_pops_the_back_trail() {
        let (mut manager, _, _) = test_world();

        assert!(manager.goto(SceneTarget::Scene(2)));
        assert_eq!(manager.current_index(), 2);
        assert_eq!(manager.visited(), &[0]);

        assert!(manager.goto(SceneTarget::Previous));
        assert_eq!(manager.current_index(), 0);
        assert!(manager.visited().is_empty());
    }

    #[test]
    fn goto_current_index_is_a_no_op() {
        let (mut manager, _, _) = test_world();
        assert!(!manager.goto(SceneTarget::Scene(0)));
        assert!(manager.visited().is_empty());
    }

    #[test]
    fn goto_out_of_range_is_a_no_op() {
        let (mut manager, _, _) = test_world();
        assert!(!manager.goto(SceneTarget::Scene(17)));
        assert_eq!(manager.current_index(), 0);
    }

    #[test]
    fn goto_previous_with_empty_trail_is_a_no_op() {
        let (mut manager, _, _) = test_world();
        assert!(!manager.goto(SceneTarget::Previous));
        assert_eq!(manager.current_index(), 0);
    }

    #[test]
    fn goto_rewrites_the_return_action() {
        let (mut manager, _, _) = test_world();
        manager.goto(SceneTarget::Scene(1));

        let back = manager.current().unwrap().actions.last().unwrap();
        assert_eq!(back.description, "Return to Crossroads");
    }

    #[test]
    fn previous_guards_against_stale_top_entries() {
        let (mut manager, _, _) = test_world();
        manager.goto(SceneTarget::Scene(1));
        assert_eq!(manager.previous().unwrap().name, "Crossroads");

        // a top entry equal to the current index is treated as stale
        let mut stale = manager.clone();
        stale.visited = vec![stale.current_index()];
        assert!(stale.previous().is_none());
    }

    #[test]
    fn select_action_navigates_and_records_consequence() {
        let (mut manager, mut player, catalog) = test_world();

        let result = manager.select_action(0, &mut player, &catalog);
        assert!(matches!(result, SelectionResult::Performed { navigated: true, .. }));
        assert_eq!(manager.current_index(), 1);

        // staying action applies its reward but records no navigation
        let result = manager.select_action(0, &mut player, &catalog);
        match result {
            SelectionResult::Performed { selection, navigated } => {
                assert!(!navigated);
                assert_eq!(selection.experience, 10);
            },
            other => panic!("unexpected result: {other:?}"),
        }
        assert_eq!(player.experience, 10);
    }

    #[test]
    fn select_action_with_bad_index_is_a_no_op() {
        let (mut manager, mut player, catalog) = test_world();
        let result = manager.select_action(9, &mut player, &catalog);
        assert_eq!(result, SelectionResult::NoAction);
        assert_eq!(manager.current_index(), 0);
    }

    #[test]
    fn select_action_blocked_by_requirement_is_inert() {
        let mut defs = test_defs();
        defs[0].actions[0].requirement = RequirementDef {
            items: vec![ItemStackDef { item: 0, quantity: 1 }],
            ..RequirementDef::default()
        };
        let mut manager = SceneManager::from_defs(&defs);
        let catalog = ItemCatalog::from_defs(&[ItemDef {
            name: "Rope".into(),
            kind: "tool".into(),
        }]);
        let mut player = Player::default();

        let result = manager.select_action(0, &mut player, &catalog);
        assert_eq!(result, SelectionResult::RequirementNotMet);
        assert_eq!(manager.current_index(), 0);
        assert_eq!(player.experience, 0);
    }

    #[test]
    fn scene_description_layers_exit_consequence_and_entry() {
        let (mut manager, mut player, catalog) = test_world();
        let mut defs = test_defs();
        defs[0].actions[0].consequence = "The road dwindles to a track.".into();
        manager.reset(&defs);

        manager.select_action(0, &mut player, &catalog);
        let description = manager.scene_description();

        assert!(description.contains("You leave the Crossroads."));
        assert!(description.contains("The road dwindles to a track."));
        assert!(description.contains("You arrive at the Mill."));
    }

    #[test]
    fn reset_restores_the_authored_graph() {
        let (mut manager, mut player, catalog) = test_world();
        manager.select_action(0, &mut player, &catalog);
        manager.select_action(0, &mut player, &catalog);
        assert!(manager.current().unwrap().actions[0].selected);

        manager.reset(&test_defs());
        assert_eq!(manager.current_index(), 0);
        assert!(manager.visited().is_empty());
        assert!(!manager.scenes()[1].actions[0].selected);
    }

    #[test]
    fn progress_round_trips_through_restore() {
        let (mut manager, mut player, catalog) = test_world();
        manager.select_action(0, &mut player, &catalog); // to mill
        manager.select_action(0, &mut player, &catalog); // search sacks

        let progress = manager.progress();

        let mut restored = SceneManager::from_defs(&test_defs());
        restored.restore_progress(progress.clone());

        assert_eq!(restored.current_index(), manager.current_index());
        assert_eq!(restored.visited(), manager.visited());
        assert_eq!(restored.last_consequence(), manager.last_consequence());
        assert_eq!(restored.progress(), progress);
    }

    #[test]
    fn restore_progress_tolerates_out_of_range_saves() {
        let (mut manager, _, _) = test_world();
        let progress = SceneProgress {
            current_index: 42,
            visited: vec![0],
            last_consequence: String::new(),
            scenes: Vec::new(),
        };

        manager.restore_progress(progress);
        assert_eq!(manager.current_index(), 0);
    }

    #[test]
    fn action_and_requirement_types_compose() {
        // smoke check that runtime types build from defs end to end
        let def = ActionDef {
            description: "Haul the crate".into(),
            requirement: RequirementDef {
                items: vec![ItemStackDef { item: 0, quantity: 2 }],
                ..RequirementDef::default()
            },
            reward: RewardDef {
                experience: 5,
                items: vec![ItemStackDef { item: 0, quantity: 1 }],
                ..RewardDef::default()
            },
            ..ActionDef::default()
        };
        let action = Action::from_def(&def);
        assert_eq!(action.requirement, Requirement::from_def(&def.requirement));
        assert_eq!(action.reward, Reward::from_def(&def.reward));
        assert!(action.enabled);
    }
}
