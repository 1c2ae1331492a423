//! Job to role mapping. Keys are the job type strings reported by the log service.

use cardcalc_types::Role;
use phf::phf_map;

pub fn role_for_job(job: &str) -> Role {
    JOB_ROLES.get(job).copied().unwrap_or(Role::NotApplicable)
}

static JOB_ROLES: phf::Map<&'static str, Role> = phf_map! {
    // Tanks and melee DPS
    "Paladin" => Role::Melee,
    "Warrior" => Role::Melee,
    "DarkKnight" => Role::Melee,
    "Gunbreaker" => Role::Melee,
    "Monk" => Role::Melee,
    "Dragoon" => Role::Melee,
    "Ninja" => Role::Melee,
    "Samurai" => Role::Melee,
    "Reaper" => Role::Melee,

    // Physical ranged, casters and healers
    "Bard" => Role::Ranged,
    "Machinist" => Role::Ranged,
    "Dancer" => Role::Ranged,
    "BlackMage" => Role::Ranged,
    "Summoner" => Role::Ranged,
    "RedMage" => Role::Ranged,
    "WhiteMage" => Role::Ranged,
    "Scholar" => Role::Ranged,
    "Astrologian" => Role::Ranged,
    "Sage" => Role::Ranged,

    "LimitBreak" => Role::LimitBreak,
    "Limit Break" => Role::LimitBreak,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roles() {
        assert_eq!(role_for_job("Samurai"), Role::Melee);
        assert_eq!(role_for_job("Astrologian"), Role::Ranged);
        assert_eq!(role_for_job("LimitBreak"), Role::LimitBreak);
        assert_eq!(role_for_job("Chocobo"), Role::NotApplicable);
    }
}
