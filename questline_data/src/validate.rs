use std::collections::HashSet;
use std::fmt;

use crate::*;

/// Validation error for malformed or dangling references in a WorldDef.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    DuplicateItemName { name: String },
    MissingItem { item: ItemId, context: String },
    MissingScene { scene: SceneId, context: String },
    InvalidValue { context: String },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::DuplicateItemName { name } => {
                write!(f, "duplicate item name '{name}'")
            },
            ValidationError::MissingItem { item, context } => {
                write!(f, "item index {item} out of range ({context})")
            },
            ValidationError::MissingScene { scene, context } => {
                write!(f, "scene index {scene} out of range ({context})")
            },
            ValidationError::InvalidValue { context } => {
                write!(f, "invalid value ({context})")
            },
        }
    }
}

impl std::error::Error for ValidationError {}

/// Validate cross-references and basic invariants in a WorldDef.
///
/// ```
/// use questline_data::{SceneDef, WorldDef, validate_world};
///
/// let world = WorldDef {
///     scenes: vec![SceneDef {
///         name: "Crossroads".into(),
///         enter_description: "Dusty roads meet here.".into(),
///         ..SceneDef::default()
///     }],
///     ..WorldDef::default()
/// };
/// assert!(validate_world(&world).is_empty());
/// ```
pub fn validate_world(world: &WorldDef) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    if world.scenes.is_empty() {
        errors.push(ValidationError::InvalidValue {
            context: "world has no scenes".to_string(),
        });
    }

    let mut names = HashSet::new();
    for item in &world.items {
        if item.name.trim().is_empty() {
            errors.push(ValidationError::InvalidValue {
                context: "item with empty name".to_string(),
            });
        } else if !names.insert(item.name.clone()) {
            errors.push(ValidationError::DuplicateItemName {
                name: item.name.clone(),
            });
        }
    }

    for (scene_idx, scene) in world.scenes.iter().enumerate() {
        if scene.name.trim().is_empty() {
            errors.push(ValidationError::InvalidValue {
                context: format!("scene {scene_idx} has no name"),
            });
        }
        for (action_idx, action) in scene.actions.iter().enumerate() {
            let context = format!("scene {scene_idx} action {action_idx}");
            if action.description.trim().is_empty() {
                errors.push(ValidationError::InvalidValue {
                    context: format!("{context} has no description"),
                });
            }
            if let SceneTarget::Scene(target) = action.target {
                check_scene(target, world, &context, &mut errors);
            }
            for min in &action.requirement.abilities {
                if !(0.0..=10.0).contains(&min.score) {
                    errors.push(ValidationError::InvalidValue {
                        context: format!("{context} requires {} {} (out of [0, 10])", min.ability, min.score),
                    });
                }
            }
            for stack in &action.requirement.items {
                check_stack(stack, world, &format!("{context} requirement"), &mut errors);
            }
            for stack in &action.reward.items {
                check_stack(stack, world, &format!("{context} reward"), &mut errors);
            }
        }
    }

    errors
}

fn check_scene(scene: SceneId, world: &WorldDef, context: &str, errors: &mut Vec<ValidationError>) {
    if scene >= world.scenes.len() {
        errors.push(ValidationError::MissingScene {
            scene,
            context: context.to_string(),
        });
    }
}

fn check_stack(stack: &ItemStackDef, world: &WorldDef, context: &str, errors: &mut Vec<ValidationError>) {
    if stack.item >= world.items.len() {
        errors.push(ValidationError::MissingItem {
            item: stack.item,
            context: context.to_string(),
        });
    }
    if stack.quantity == 0 {
        errors.push(ValidationError::InvalidValue {
            context: format!("{context}: zero quantity"),
        });
    }
}
