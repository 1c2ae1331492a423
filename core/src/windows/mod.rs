//! Interval reconstruction over buff and cast streams.
//!
//! Both reconstructors tolerate missing or out-of-order pairing events and
//! repair them instead of failing.

mod card_plays;
mod draw_windows;


pub use card_plays::{CardPlay, reconstruct_card_plays, retain_player_targets};
pub use draw_windows::{DrawReconstruction, DrawWindow, reconstruct_draw_windows};

/// Fight start and end in log milliseconds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FightBounds {
    pub start: i64,
    pub end: i64,
}

impl FightBounds {
    pub fn new(start: i64, end: i64) -> Self {
        Self { start, end }
    }
}
