//! Editor command language.
//!
//! Same slice-pattern parsing style as the game shell, over a CRUD
//! vocabulary: `scene`, `action`, `req`, `reward`, `item`, plus the
//! session commands (`undo`, `redo`, `validate`, `save`, `quit`).

/// Fields of a scene that can be set from the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SceneField {
    Name,
    Enter,
    Exit,
    Image,
}

/// Fields of an action that can be set from the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionField {
    Description,
    Consequence,
    Target,
    Disable,
    Remove,
    Secret,
}

/// Fields of an item that can be set from the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemField {
    Name,
    Kind,
}

#[derive(Debug, PartialEq, variantly::Variantly)]
pub enum EditorCommand {
    ListScenes,
    ShowScene(usize),
    NewScene,
    DeleteScene(usize),
    SetScene { scene: usize, field: SceneField, value: String },
    ListActions(usize),
    NewAction(usize),
    DeleteAction { scene: usize, action: usize },
    SetAction { scene: usize, action: usize, field: ActionField, value: String },
    ReqAbility { scene: usize, action: usize, ability: String, score: f64 },
    ReqItem { scene: usize, action: usize, item: usize, quantity: u32 },
    ReqClear { scene: usize, action: usize },
    RewardXp { scene: usize, action: usize, amount: u64 },
    RewardItem { scene: usize, action: usize, item: usize, quantity: u32 },
    RewardClear { scene: usize, action: usize },
    ListItems,
    NewItem { name: String, kind: String },
    DeleteItem(usize),
    SetItem { item: usize, field: ItemField, value: String },
    Undo,
    Redo,
    Validate,
    Save,
    Help,
    Quit,
    Unknown,
}

/// Parse one line of editor input.
pub fn parse_editor_command(input: &str) -> EditorCommand {
    let words: Vec<&str> = input.split_whitespace().collect();
    match words.as_slice() {
        ["scenes"] => EditorCommand::ListScenes,
        ["scene", "new"] => EditorCommand::NewScene,
        ["scene", "del" | "delete", index] => {
            parse_index(index).map_or(EditorCommand::Unknown, EditorCommand::DeleteScene)
        },
        ["scene", index] => parse_index(index).map_or(EditorCommand::Unknown, EditorCommand::ShowScene),
        ["scene", "set", index, field, rest @ ..] if !rest.is_empty() => {
            match (parse_index(index), parse_scene_field(field)) {
                (Some(scene), Some(field)) => EditorCommand::SetScene {
                    scene,
                    field,
                    value: rest.join(" "),
                },
                _ => EditorCommand::Unknown,
            }
        },
        ["actions", index] => parse_index(index).map_or(EditorCommand::Unknown, EditorCommand::ListActions),
        ["action", "new", index] => parse_index(index).map_or(EditorCommand::Unknown, EditorCommand::NewAction),
        ["action", "del" | "delete", scene, action] => match (parse_index(scene), parse_index(action)) {
            (Some(scene), Some(action)) => EditorCommand::DeleteAction { scene, action },
            _ => EditorCommand::Unknown,
        },
        ["action", "set", scene, action, field, rest @ ..] if !rest.is_empty() => {
            match (parse_index(scene), parse_index(action), parse_action_field(field)) {
                (Some(scene), Some(action), Some(field)) => EditorCommand::SetAction {
                    scene,
                    action,
                    field,
                    value: rest.join(" "),
                },
                _ => EditorCommand::Unknown,
            }
        },
        ["req", "ability", scene, action, ability, score] => {
            match (parse_index(scene), parse_index(action), score.parse::<f64>()) {
                (Some(scene), Some(action), Ok(score)) => EditorCommand::ReqAbility {
                    scene,
                    action,
                    ability: (*ability).to_string(),
                    score,
                },
                _ => EditorCommand::Unknown,
            }
        },
        ["req", "item", scene, action, item, quantity] => {
            match (parse_index(scene), parse_index(action), parse_index(item), quantity.parse::<u32>()) {
                (Some(scene), Some(action), Some(item), Ok(quantity)) => EditorCommand::ReqItem {
                    scene,
                    action,
                    item,
                    quantity,
                },
                _ => EditorCommand::Unknown,
            }
        },
        ["req", "clear", scene, action] => match (parse_index(scene), parse_index(action)) {
            (Some(scene), Some(action)) => EditorCommand::ReqClear { scene, action },
            _ => EditorCommand::Unknown,
        },
        ["reward", "xp", scene, action, amount] => {
            match (parse_index(scene), parse_index(action), amount.parse::<u64>()) {
                (Some(scene), Some(action), Ok(amount)) => EditorCommand::RewardXp { scene, action, amount },
                _ => EditorCommand::Unknown,
            }
        },
        ["reward", "item", scene, action, item, quantity] => {
            match (parse_index(scene), parse_index(action), parse_index(item), quantity.parse::<u32>()) {
                (Some(scene), Some(action), Some(item), Ok(quantity)) => EditorCommand::RewardItem {
                    scene,
                    action,
                    item,
                    quantity,
                },
                _ => EditorCommand::Unknown,
            }
        },
        ["reward", "clear", scene, action] => match (parse_index(scene), parse_index(action)) {
            (Some(scene), Some(action)) => EditorCommand::RewardClear { scene, action },
            _ => EditorCommand::Unknown,
        },
        ["items"] => EditorCommand::ListItems,
        // the kind is the final token, so names may have several words
        ["item", "new", rest @ ..] if rest.len() >= 2 => EditorCommand::NewItem {
            name: rest[..rest.len() - 1].join(" "),
            kind: rest[rest.len() - 1].to_string(),
        },
        ["item", "del" | "delete", index] => {
            parse_index(index).map_or(EditorCommand::Unknown, EditorCommand::DeleteItem)
        },
        ["item", "set", index, field, rest @ ..] if !rest.is_empty() => {
            match (parse_index(index), parse_item_field(field)) {
                (Some(item), Some(field)) => EditorCommand::SetItem {
                    item,
                    field,
                    value: rest.join(" "),
                },
                _ => EditorCommand::Unknown,
            }
        },
        ["undo"] => EditorCommand::Undo,
        ["redo"] => EditorCommand::Redo,
        ["validate" | "check"] => EditorCommand::Validate,
        ["save" | "write"] => EditorCommand::Save,
        ["help" | "?"] => EditorCommand::Help,
        ["quit" | "exit"] => EditorCommand::Quit,
        _ => EditorCommand::Unknown,
    }
}

fn parse_index(token: &str) -> Option<usize> {
    token.parse().ok()
}

fn parse_scene_field(token: &str) -> Option<SceneField> {
    match token {
        "name" => Some(SceneField::Name),
        "enter" => Some(SceneField::Enter),
        "exit" => Some(SceneField::Exit),
        "image" => Some(SceneField::Image),
        _ => None,
    }
}

fn parse_action_field(token: &str) -> Option<ActionField> {
    match token {
        "desc" | "description" => Some(ActionField::Description),
        "consequence" => Some(ActionField::Consequence),
        "target" => Some(ActionField::Target),
        "disable" => Some(ActionField::Disable),
        "remove" => Some(ActionField::Remove),
        "secret" => Some(ActionField::Secret),
        _ => None,
    }
}

fn parse_item_field(token: &str) -> Option<ItemField> {
    match token {
        "name" => Some(ItemField::Name),
        "kind" | "type" => Some(ItemField::Kind),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crud_commands_parse() {
        assert!(parse_editor_command("scenes").is_list_scenes());
        assert_eq!(parse_editor_command("scene 3"), EditorCommand::ShowScene(3));
        assert!(parse_editor_command("scene new").is_new_scene());
        assert_eq!(parse_editor_command("scene del 1"), EditorCommand::DeleteScene(1));
        assert_eq!(
            parse_editor_command("scene set 0 name Old Mill"),
            EditorCommand::SetScene {
                scene: 0,
                field: SceneField::Name,
                value: "Old Mill".into()
            }
        );
    }

    #[test]
    fn action_commands_parse() {
        assert_eq!(
            parse_editor_command("action set 1 2 target stay"),
            EditorCommand::SetAction {
                scene: 1,
                action: 2,
                field: ActionField::Target,
                value: "stay".into()
            }
        );
        assert_eq!(
            parse_editor_command("req ability 0 1 strength 3.5"),
            EditorCommand::ReqAbility {
                scene: 0,
                action: 1,
                ability: "strength".into(),
                score: 3.5
            }
        );
        assert_eq!(
            parse_editor_command("reward item 0 1 4 2"),
            EditorCommand::RewardItem {
                scene: 0,
                action: 1,
                item: 4,
                quantity: 2
            }
        );
    }

    #[test]
    fn item_commands_parse() {
        assert_eq!(
            parse_editor_command("item new Rope tool"),
            EditorCommand::NewItem {
                name: "Rope".into(),
                kind: "tool".into()
            }
        );
        assert_eq!(
            parse_editor_command("item new Iron Key key"),
            EditorCommand::NewItem {
                name: "Iron Key".into(),
                kind: "key".into()
            }
        );
        assert_eq!(
            parse_editor_command("item set 0 name Hempen Rope"),
            EditorCommand::SetItem {
                item: 0,
                field: ItemField::Name,
                value: "Hempen Rope".into()
            }
        );
    }

    #[test]
    fn malformed_input_is_unknown() {
        assert!(parse_editor_command("scene set x name Foo").is_unknown());
        assert!(parse_editor_command("req ability 0 1 strength lots").is_unknown());
        assert!(parse_editor_command("frobnicate").is_unknown());
    }
}
