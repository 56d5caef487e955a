//! View module.
//!
//! Rather than printing from each command handler, handlers push
//! [`ViewItem`]s and the REPL flushes the buffer once per turn. This keeps
//! ordering and styling decisions in one place.

use crate::save_files::{SaveFileEntry, SaveFileStatus, format_modified};
use crate::style::GameStyle;

use colored::Colorize;
use questline_data::AbilityKind;
use textwrap::{fill, termwidth};

/// One displayed action choice.
#[derive(Debug, Clone)]
pub struct ActionLine {
    /// 1-based number the player types to choose this action.
    pub number: usize,
    pub description: String,
    pub available: bool,
    pub taken: bool,
}

/// One inventory row.
#[derive(Debug, Clone)]
pub struct InventoryLine {
    pub name: String,
    pub kind: String,
    pub quantity: u32,
}

/// Character-sheet snapshot pushed by the `character` command.
#[derive(Debug, Clone)]
pub struct SheetData {
    pub name: String,
    pub level: u32,
    pub experience: u64,
    pub required_experience: u64,
    pub ability_points: u32,
    pub abilities: Vec<(AbilityKind, f64)>,
    pub crafting_bonus: f64,
    pub enchanting_bonus: f64,
    pub dodge_bonus: f64,
    pub run_bonus: f64,
    pub power_level: i64,
}

/// Everything a handler can ask the view to display.
#[derive(Debug, Clone)]
pub enum ViewItem {
    SceneHeading(String),
    SceneDescription(String),
    ActionList(Vec<ActionLine>),
    Consequence(String),
    InventoryTable { currency: i64, lines: Vec<InventoryLine> },
    CharacterSheet(Box<SheetData>),
    ExperienceGain { experience: u64, levels_gained: u32 },
    SaveList(Vec<SaveFileEntry>),
    ActionSuccess(String),
    ActionFailure(String),
    EngineMessage(String),
    Error(String),
    Help { creating: bool },
}

/// Buffers display items for the current turn and renders them in order on
/// [`View::flush`].
#[derive(Debug, Clone, Default)]
pub struct View {
    pub width: usize,
    items: Vec<ViewItem>,
}

impl View {
    pub fn new() -> Self {
        Self {
            width: termwidth(),
            items: Vec::new(),
        }
    }

    pub fn push(&mut self, item: ViewItem) {
        self.items.push(item);
    }

    pub fn items(&self) -> &[ViewItem] {
        &self.items
    }

    /// Render and clear everything pushed this turn.
    pub fn flush(&mut self) {
        // re-check terminal width in case it's been resized
        self.width = termwidth();
        let items = std::mem::take(&mut self.items);
        for item in items {
            self.render(&item);
        }
    }

    fn render(&self, item: &ViewItem) {
        match item {
            ViewItem::SceneHeading(name) => {
                println!("\n{:.>width$}", "scene".section_style(), width = self.width);
                println!("{}\n", name.as_str().scene_titlebar_style());
            },
            ViewItem::SceneDescription(text) => {
                println!("{}\n", fill(text, self.width).description_style());
            },
            ViewItem::ActionList(lines) => {
                for line in lines {
                    let number = format!("{:>3}.", line.number);
                    let description = if line.taken {
                        line.description.action_taken_style()
                    } else if line.available {
                        line.description.action_style()
                    } else {
                        line.description.denied_style()
                    };
                    println!("{} {description}", number.bold());
                }
            },
            ViewItem::Consequence(text) => {
                println!("{}\n", fill(text, self.width).consequence_style());
            },
            ViewItem::InventoryTable { currency, lines } => {
                println!("{}", "Inventory".subheading_style());
                if lines.is_empty() {
                    println!("  (nothing but lint)");
                }
                for line in lines {
                    println!(
                        "  {:<24} {:<10} x{}",
                        line.name.item_style(),
                        line.kind.item_kind_style(),
                        line.quantity
                    );
                }
                println!("  {} coin(s)\n", currency);
            },
            ViewItem::CharacterSheet(sheet) => self.render_sheet(sheet),
            ViewItem::ExperienceGain {
                experience,
                levels_gained,
            } => {
                if *experience > 0 {
                    println!("{}", format!("+{experience} experience").xp_style());
                }
                for _ in 0..*levels_gained {
                    println!("{}", "LEVEL UP! (+2 ability points)".xp_style().bold());
                }
            },
            ViewItem::SaveList(entries) => self.render_save_list(entries),
            ViewItem::ActionSuccess(text) => println!("{}", fill(text, self.width)),
            ViewItem::ActionFailure(text) => println!("{}", fill(text, self.width).denied_style()),
            ViewItem::EngineMessage(text) => println!("{}", text.engine_style()),
            ViewItem::Error(text) => println!("{}", text.error_style()),
            ViewItem::Help { creating } => self.render_help(*creating),
        }
    }

    fn render_sheet(&self, sheet: &SheetData) {
        println!("{}", sheet.name.subheading_style().bold());
        println!(
            "  Level {}   XP {}/{}   unspent points: {}",
            sheet.level,
            sheet.experience,
            sheet.required_experience,
            sheet.ability_points.to_string().bold()
        );
        for (kind, score) in &sheet.abilities {
            println!(
                "  {:<14} {:>5}  {}",
                kind.to_string().ability_style(),
                score,
                kind.describe().engine_style()
            );
        }
        println!(
            "  crafting {:+.2}  enchanting {:+.2}  dodge {:+.2}  run {:+.2}  power level {}",
            sheet.crafting_bonus, sheet.enchanting_bonus, sheet.dodge_bonus, sheet.run_bonus, sheet.power_level
        );
    }

    fn render_save_list(&self, entries: &[SaveFileEntry]) {
        if entries.is_empty() {
            println!("{}", "No saved games found.".engine_style());
            return;
        }
        println!("{}", "Saved games".subheading_style());
        for entry in entries {
            let when = entry.modified.map_or_else(|| "unknown".to_string(), format_modified);
            let status = match &entry.status {
                SaveFileStatus::Ready => String::new(),
                SaveFileStatus::VersionMismatch { save_version, .. } => {
                    format!(" [v{save_version}]").error_style().to_string()
                },
                SaveFileStatus::Corrupted { message } => format!(" [corrupted: {message}]").error_style().to_string(),
            };
            let summary = entry.summary.as_ref().map_or(String::new(), |summary| {
                format!(" -- {}, level {}", summary.player_name, summary.level)
            });
            println!("  {:<16} {when}{summary}{status}", entry.slot.bold());
        }
    }

    #[allow(clippy::unused_self)]
    fn render_help(&self, creating: bool) {
        println!("{}", "Commands".subheading_style());
        println!("  <number>            take that action");
        println!("  look                describe the scene again");
        println!("  inventory | inv     show what you're carrying");
        println!("  drop <item> [qty]   discard an item (whole stack if no qty)");
        println!("  character | stats   show the character sheet");
        println!("  train <ability>     spend a point on an ability");
        if creating {
            println!("  untrain <ability>   take a point back (creation only)");
            println!("  name <name>         rename your character (creation only)");
            println!("  begin               lock in your build and set out");
        }
        println!("  save <slot>         save the game");
        println!("  load <slot>         load a saved game");
        println!("  saves               list saved games");
        println!("  delete <slot>       delete a saved game");
        println!("  new                 start a new game");
        println!("  help | ?            this list");
        println!("  quit | exit         leave the game");
    }
}
