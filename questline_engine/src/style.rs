//! Styling helpers for terminal output.
//!
//! The [`GameStyle`] trait provides a set of convenience methods for applying
//! ANSI styling via the `colored` crate. Implementations for `&str` and
//! `String` are provided so string literals can be styled directly.

use colored::{ColoredString, Colorize};

/// Convenience trait for applying color and style to text output.
pub trait GameStyle {
    fn scene_titlebar_style(&self) -> ColoredString;
    fn description_style(&self) -> ColoredString;
    fn consequence_style(&self) -> ColoredString;
    fn action_style(&self) -> ColoredString;
    fn action_taken_style(&self) -> ColoredString;
    fn item_style(&self) -> ColoredString;
    fn item_kind_style(&self) -> ColoredString;
    fn ability_style(&self) -> ColoredString;
    fn xp_style(&self) -> ColoredString;
    fn error_style(&self) -> ColoredString;
    fn denied_style(&self) -> ColoredString;
    fn subheading_style(&self) -> ColoredString;
    fn section_style(&self) -> ColoredString;
    fn prompt_style(&self) -> ColoredString;
    fn engine_style(&self) -> ColoredString;
}

impl GameStyle for &str {
    fn scene_titlebar_style(&self) -> ColoredString {
        self.truecolor(223, 77, 10).underline()
    }
    fn description_style(&self) -> ColoredString {
        self.italic().truecolor(102, 208, 250)
    }
    fn consequence_style(&self) -> ColoredString {
        self.italic().truecolor(230, 230, 30)
    }
    fn action_style(&self) -> ColoredString {
        self.truecolor(110, 220, 110)
    }
    fn action_taken_style(&self) -> ColoredString {
        self.truecolor(110, 220, 110).dimmed()
    }
    fn item_style(&self) -> ColoredString {
        self.truecolor(220, 180, 40)
    }
    fn item_kind_style(&self) -> ColoredString {
        self.truecolor(75, 80, 75).italic()
    }
    fn ability_style(&self) -> ColoredString {
        self.truecolor(220, 40, 220)
    }
    fn xp_style(&self) -> ColoredString {
        self.truecolor(75, 180, 255)
    }
    fn error_style(&self) -> ColoredString {
        self.truecolor(230, 30, 30)
    }
    fn denied_style(&self) -> ColoredString {
        self.italic().truecolor(230, 30, 30)
    }
    fn subheading_style(&self) -> ColoredString {
        self.underline()
    }
    fn section_style(&self) -> ColoredString {
        let bracketed = format!("[{self}]");
        bracketed.truecolor(75, 80, 75)
    }
    fn prompt_style(&self) -> ColoredString {
        self.truecolor(13, 130, 60)
    }
    fn engine_style(&self) -> ColoredString {
        self.truecolor(150, 150, 150)
    }
}

impl GameStyle for String {
    fn scene_titlebar_style(&self) -> ColoredString {
        self.as_str().scene_titlebar_style()
    }
    fn description_style(&self) -> ColoredString {
        self.as_str().description_style()
    }
    fn consequence_style(&self) -> ColoredString {
        self.as_str().consequence_style()
    }
    fn action_style(&self) -> ColoredString {
        self.as_str().action_style()
    }
    fn action_taken_style(&self) -> ColoredString {
        self.as_str().action_taken_style()
    }
    fn item_style(&self) -> ColoredString {
        self.as_str().item_style()
    }
    fn item_kind_style(&self) -> ColoredString {
        self.as_str().item_kind_style()
    }
    fn ability_style(&self) -> ColoredString {
        self.as_str().ability_style()
    }
    fn xp_style(&self) -> ColoredString {
        self.as_str().xp_style()
    }
    fn error_style(&self) -> ColoredString {
        self.as_str().error_style()
    }
    fn denied_style(&self) -> ColoredString {
        self.as_str().denied_style()
    }
    fn subheading_style(&self) -> ColoredString {
        self.as_str().subheading_style()
    }
    fn section_style(&self) -> ColoredString {
        self.as_str().section_style()
    }
    fn prompt_style(&self) -> ColoredString {
        self.as_str().prompt_style()
    }
    fn engine_style(&self) -> ColoredString {
        self.as_str().engine_style()
    }
}
