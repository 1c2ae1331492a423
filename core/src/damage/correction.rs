use cardcalc_types::Role;

use super::DamageSeries;
use crate::actors::ActorList;
use crate::windows::CardPlay;

/// Multiplier a card actually applied to its target. A role mismatch halves
/// the bonus above 1.
pub fn effective_bonus(card: &CardPlay, target_role: Role) -> f64 {
    let (numerator, denominator) = bonus_ratio(card, target_role);
    numerator as f64 / denominator as f64
}

/// `amount` with the card's effective bonus divided out, truncated toward zero.
pub fn without_bonus(amount: i64, card: &CardPlay, target_role: Role) -> i64 {
    let (numerator, denominator) = bonus_ratio(card, target_role);
    amount * denominator / numerator
}

/// Effective multiplier as an exact fraction: 106/100 on a match, 206/200
/// on a mismatch.
fn bonus_ratio(card: &CardPlay, target_role: Role) -> (i64, i64) {
    if target_role == card.role {
        (card.bonus_pct, 100)
    } else {
        (card.bonus_pct + 100, 200)
    }
}

/// Copy `series` with each card's bonus divided out of its target's damage
/// inside `[card.start, card.end]`. Amounts truncate toward zero.
///
/// Pets use their owner's role. Cards on untracked targets leave the series
/// unchanged. Applying this twice divides twice.
pub fn remove_card_bonus(series: &DamageSeries, cards: &[CardPlay], actors: &ActorList) -> DamageSeries {
    let mut corrected = series.clone();

    for card in cards {
        let Some(role) = actors.effective_role(card.target_id) else {
            tracing::debug!(
                card = card.name,
                target = card.target_id,
                "Card target is not tracked, skipping bonus removal"
            );
            continue;
        };
        for event in corrected.range_inclusive_mut(card.start, card.end) {
            if event.source_id == card.target_id {
                event.amount = without_bonus(event.amount, card, role);
            }
        }
    }

    corrected
}
