//! Static game data: card buffs, draw actions and job roles.

mod cards;
mod draws;
mod jobs;

pub use cards::{CardInfo, card_for_play_action, get_card_info, is_card_buff};
pub use draws::{DrawKind, draw_action, drawn_card_name};
pub use jobs::role_for_job;
