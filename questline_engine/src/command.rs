//! Command module
//!
//! Describes possible commands used during gameplay.

/// Commands that can be executed by the player.
#[derive(Debug, PartialEq, Eq, variantly::Variantly)]
pub enum Command {
    /// Take the action with this 0-based index on the current scene.
    Choose(usize),
    Character,
    Begin,
    DeleteSave(String),
    Drop { item: String, quantity: u32 },
    Help,
    Inventory,
    ListSaves,
    Load(String),
    Look,
    Name(String),
    NewGame,
    Quit,
    Save(String),
    Train(String),
    Unknown,
    Untrain(String),
}

/// Parses an input string and returns a corresponding `Command` if recognized.
pub fn parse_command(input: &str) -> Command {
    let words: Vec<&str> = input.split_whitespace().collect();
    match words.as_slice() {
        [number] if number.parse::<usize>().is_ok() => parse_choice(number),
        ["choose" | "take" | "do", number] => parse_choice(number),
        ["look"] => Command::Look,
        ["inventory" | "inv"] => Command::Inventory,
        ["character" | "stats" | "sheet"] => Command::Character,
        ["train" | "raise", ability] => Command::Train((*ability).to_string()),
        ["untrain" | "lower", ability] => Command::Untrain((*ability).to_string()),
        ["drop" | "discard", rest @ ..] if !rest.is_empty() => parse_drop(rest),
        ["name", rest @ ..] if !rest.is_empty() => Command::Name(rest.join(" ")),
        ["begin" | "start" | "embark"] => Command::Begin,
        ["save", slot] => Command::Save((*slot).to_string()),
        ["load", slot] => Command::Load((*slot).to_string()),
        ["saves" | "list"] => Command::ListSaves,
        ["delete", slot] => Command::DeleteSave((*slot).to_string()),
        ["new"] => Command::NewGame,
        ["help" | "?"] => Command::Help,
        ["quit" | "exit"] => Command::Quit,
        _ => Command::Unknown,
    }
}

/// Menu numbers are 1-based on screen; selection indexes are 0-based.
fn parse_choice(number: &str) -> Command {
    match number.parse::<usize>() {
        Ok(n) if n >= 1 => Command::Choose(n - 1),
        _ => Command::Unknown,
    }
}

/// `drop <item...> [quantity]` -- a trailing integer is a quantity, and a
/// quantity of zero means "the whole stack".
fn parse_drop(rest: &[&str]) -> Command {
    if rest.len() >= 2
        && let Ok(quantity) = rest[rest.len() - 1].parse::<u32>()
    {
        return Command::Drop {
            item: rest[..rest.len() - 1].join(" "),
            quantity,
        };
    }
    Command::Drop {
        item: rest.join(" "),
        quantity: 0,
    }
}
