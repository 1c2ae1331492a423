//! Card buffs and the actions that play them.

use cardcalc_types::Role;
use phf::phf_map;

/// Damage buff granted by a played card
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CardInfo {
    pub name: &'static str,
    pub role: Role,
    /// Damage multiplier in percent for a target of the matching role (106 = +6%)
    pub bonus_pct: i64,
}

impl CardInfo {
    const fn new(name: &'static str, role: Role, bonus_pct: i64) -> Self {
        Self { name, role, bonus_pct }
    }
}

/// Get card info for a buff ability ID
pub fn get_card_info(buff_id: i64) -> Option<&'static CardInfo> {
    CARD_BUFFS.get(&buff_id)
}

pub fn is_card_buff(ability_id: i64) -> bool {
    CARD_BUFFS.contains_key(&ability_id)
}

/// Resolve a play action (cast) to the buff it applies
pub fn card_for_play_action(action_id: i64) -> Option<i64> {
    CARD_PLAY_ACTIONS.get(&action_id).copied()
}

/// Card buff lookup table indexed by buff ability ID
pub static CARD_BUFFS: phf::Map<i64, CardInfo> = phf_map! {
    // Melee
    1001876i64 => CardInfo::new("Lord of Crowns", Role::Melee, 108),
    1001882i64 => CardInfo::new("The Balance", Role::Melee, 106),
    1001884i64 => CardInfo::new("The Arrow", Role::Melee, 106),
    1001885i64 => CardInfo::new("The Spear", Role::Melee, 106),

    // Ranged
    1001877i64 => CardInfo::new("Lady of Crowns", Role::Ranged, 108),
    1001883i64 => CardInfo::new("The Bole", Role::Ranged, 106),
    1001886i64 => CardInfo::new("The Ewer", Role::Ranged, 106),
    1001887i64 => CardInfo::new("The Spire", Role::Ranged, 106),
};

/// Play action ID -> card buff ID
static CARD_PLAY_ACTIONS: phf::Map<i64, i64> = phf_map! {
    4401i64 => 1001882, // The Balance
    4402i64 => 1001884, // The Arrow
    4403i64 => 1001885, // The Spear
    4404i64 => 1001883, // The Bole
    4405i64 => 1001886, // The Ewer
    4406i64 => 1001887, // The Spire
    7444i64 => 1001876, // Lord of Crowns
    7445i64 => 1001877, // Lady of Crowns
};
