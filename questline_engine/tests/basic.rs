use questline_engine as qe;

use qe::command::{Command, parse_command};
use qe::{Game, QUESTLINE_VERSION};
use questline_data::{AbilityKind, WorldDef, validate_world};

fn shipped_world() -> WorldDef {
    ron::from_str(include_str!("../data/world.ron")).expect("shipped world.ron should parse")
}

#[test]
fn shipped_world_is_valid() {
    let world = shipped_world();
    let errors = validate_world(&world);
    assert!(errors.is_empty(), "validation errors: {errors:?}");
    assert_eq!(world.scenes.len(), 5);
}

#[test]
fn lib_version_is_set() {
    assert!(!QUESTLINE_VERSION.is_empty());
}

#[test]
fn command_parse_smoke() {
    assert!(matches!(parse_command("look"), Command::Look));
    assert!(matches!(parse_command("2"), Command::Choose(1)));
}

#[test]
fn play_through_the_shipped_world() {
    let mut game = Game::from_world(shipped_world());

    // creation: pump dexterity and strength, then set out
    assert!(game.player.modify_ability_score(AbilityKind::Dexterity, 2, false));
    assert!(game.player.modify_ability_score(AbilityKind::Strength, 2, false));
    game.begin();

    // Crossroads: search the milestone (stay, one-shot)
    game.select_action(0);
    assert_eq!(game.player.experience, 5);
    assert!(!game.manager.scenes()[0].actions[0].enabled);

    // selecting it again must not pay out twice
    game.select_action(0);
    assert_eq!(game.player.experience, 5);

    // north to the mill, search the sacks for the key, loot the loft
    game.select_action(1);
    assert_eq!(game.manager.current_index(), 1);
    game.select_action(0);
    assert!(game.player.character.inventory.contains_id(2), "should hold the iron key");
    game.select_action(1);
    assert!(game.player.character.inventory.contains_id(0), "should hold the rope");
    assert!(game.player.character.inventory.contains_id(1), "should hold the lantern");

    // back to the crossroads, then east to the river
    let back_index = game.manager.current().unwrap().actions.len() - 1;
    game.select_action(back_index);
    assert_eq!(game.manager.current_index(), 0);
    game.select_action(2);
    assert_eq!(game.manager.current_index(), 2);

    // the cave door consumes the key
    game.select_action(1);
    assert_eq!(game.manager.current_index(), 3);
    assert!(!game.player.character.inventory.contains_id(2), "key is spent on the lock");

    // the secret crevice is listed because dexterity is 3 and we carry a lantern
    let scene = game.manager.current().unwrap();
    let listed: Vec<usize> = scene
        .listed_actions(&game.player)
        .iter()
        .map(|(index, _)| *index)
        .collect();
    assert!(listed.contains(&1), "secret action should be visible: {listed:?}");

    // through to the vault; the lantern is consumed by the crevice
    game.select_action(1);
    assert_eq!(game.manager.current_index(), 4);
    assert!(!game.player.character.inventory.contains_id(1));

    // haul the strongbox: consumes the rope, pays 50 xp, removes itself
    let xp_before = game.player.experience;
    let level_before = game.player.level;
    game.select_action(0);
    assert!(!game.player.character.inventory.contains_id(0));
    assert!(
        game.player.level > level_before || game.player.experience > xp_before,
        "strongbox payout should move progression forward"
    );
    let vault = game.manager.current().unwrap();
    assert!(vault.actions[0].removed);

    // the return action names the scene we came from
    let back = vault.actions.last().unwrap();
    assert_eq!(back.description, "Return to Smugglers' Cave");
}

#[test]
fn save_restore_fidelity_mid_graph() {
    let dir = tempfile::tempdir().unwrap();

    let mut game = Game::from_world(shipped_world());
    game.player.character.name = "Wren".into();
    game.player.modify_ability_score(AbilityKind::Dexterity, 2, false);
    game.begin();

    game.select_action(0); // milestone
    game.select_action(1); // to the mill
    game.select_action(0); // take the key
    game.save_to(dir.path(), "fidelity").unwrap();

    let mut restored = Game::from_world(shipped_world());
    restored.load_save_from(dir.path(), "fidelity").unwrap();

    assert_eq!(restored.player, game.player);
    assert_eq!(restored.manager.current_index(), game.manager.current_index());
    assert_eq!(restored.manager.visited(), game.manager.visited());
    assert_eq!(restored.manager.last_consequence(), game.manager.last_consequence());

    // the specific runtime flags survive: milestone disabled, sack search removed
    assert!(!restored.manager.scenes()[0].actions[0].enabled);
    assert!(restored.manager.scenes()[0].actions[0].selected);
    assert!(restored.manager.scenes()[1].actions[0].removed);

    // and play continues identically from the restored state
    let back_index = restored.manager.current().unwrap().actions.len() - 1;
    restored.select_action(back_index);
    assert_eq!(restored.manager.current_index(), 0);
}
