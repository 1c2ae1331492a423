//! Draw-type actions and drawn-card buffs.

use phf::phf_map;

pub mod draw_action {
    pub const DRAW: i64 = 3590;
    pub const REDRAW: i64 = 3593;
    pub const SLEEVE_DRAW: i64 = 7448;
    pub const DIVINATION: i64 = 16552;
}

/// Kind of event bounding a draw window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DrawKind {
    FightStart,
    Draw,
    SleeveDraw,
    Divination,
    FightEnd,
}

impl DrawKind {
    /// Casts that close the active draw window and open a new one.
    /// Redraw is not a boundary.
    pub fn from_cast(ability_id: i64) -> Option<Self> {
        match ability_id {
            draw_action::DRAW => Some(DrawKind::Draw),
            draw_action::SLEEVE_DRAW => Some(DrawKind::SleeveDraw),
            draw_action::DIVINATION => Some(DrawKind::Divination),
            _ => None,
        }
    }

    pub const fn name(&self) -> &'static str {
        match self {
            DrawKind::FightStart => "Fight Start",
            DrawKind::Draw => "Draw",
            DrawKind::SleeveDraw => "Sleeve Draw",
            DrawKind::Divination => "Divination",
            DrawKind::FightEnd => "Fight End",
        }
    }
}

impl std::fmt::Display for DrawKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Name of the card held after a draw, if the buff ID is a drawn-card buff
pub fn drawn_card_name(buff_id: i64) -> Option<&'static str> {
    DRAWN_CARD_BUFFS.get(&buff_id).copied()
}

static DRAWN_CARD_BUFFS: phf::Map<i64, &'static str> = phf_map! {
    1000913i64 => "The Balance",
    1000914i64 => "The Bole",
    1000915i64 => "The Arrow",
    1000916i64 => "The Spear",
    1000917i64 => "The Ewer",
    1000918i64 => "The Spire",
};
