use cardcalc_types::{CardDamageRow, CardPlayReport, Role};

use super::WindowContext;
use crate::damage::{attribute, without_bonus};
use crate::windows::CardPlay;

/// Damage table and target evaluation for one card play.
pub(super) fn build(ctx: &WindowContext<'_>, card: &CardPlay) -> CardPlayReport {
    let actors = ctx.actors;
    let attribution = attribute(ctx.series, card.start, card.end, actors, true);
    let target_role = actors.effective_role(card.target_id).unwrap_or_default();

    let mut damage_table: Vec<CardDamageRow> = actors
        .players()
        .map(|player| {
            let role = player.role();
            let mut real_damage = attribution.player_damage(player.id);
            if player.id == card.target_id {
                real_damage = without_bonus(real_damage, card, target_role);
            }
            let adjusted_damage = if role == card.role {
                real_damage
            } else {
                real_damage / 2
            };

            let prior_card_remaining_ms = ctx
                .cards
                .iter()
                .filter(|other| other.target_id == player.id && other.covers_start_of(card))
                .map(|other| other.end - card.start)
                .max();

            CardDamageRow {
                id: player.id,
                name: player.name.clone(),
                job: player.job.clone(),
                role,
                real_damage,
                adjusted_damage,
                bonus_damage: adjusted_damage * (card.bonus_pct - 100) / 100,
                has_card: prior_card_remaining_ms.is_some(),
                prior_card_remaining_ms,
                hit_mix: attribution.hit_breakdown(player.id).to_mix(),
            }
        })
        .collect();
    damage_table.sort_by(|a, b| b.adjusted_damage.cmp(&a.adjusted_damage).then(a.id.cmp(&b.id)));

    let optimal = damage_table
        .iter()
        .find(|row| row.role != Role::LimitBreak && !row.has_card);

    CardPlayReport {
        card_id: card.ability_id,
        card_name: card.name.to_string(),
        card_role: card.role,
        source_id: card.source_id,
        target_id: card.target_id,
        start: card.start,
        end: card.end,
        cast_time: card.cast_time,
        play_time: ctx.fight.format_time(card.cast_time),
        duration_secs: card.duration_ms() as f64 / 1000.0,
        optimal_target: optimal.map(|row| row.id),
        optimal_target_name: optimal.map(|row| row.name.clone()),
        correct: optimal.is_some_and(|row| row.id == card.target_id),
        correct_role: target_role == card.role,
        damage_table,
    }
}
