use cardcalc_types::{Role, RoleTimings, TimingEntry};

use super::WindowContext;
use crate::damage::{SearchWindow, TimingCandidate, search_burst_window, top_candidates};
use crate::windows::DrawWindow;

/// Best alternative play times inside a draw window, melee and ranged ranked separately.
pub(super) fn build(ctx: &WindowContext<'_>, window: &DrawWindow) -> (RoleTimings, RoleTimings) {
    let search = &ctx.config.search;
    let surface = search_burst_window(
        ctx.baseline,
        SearchWindow {
            start: window.start,
            end: window.end,
            duration: search.duration_ms,
            step: search.step_ms,
        },
        ctx.actors,
    );

    let count = search.count_for(window.duration_ms() as f64 / 1000.0);
    let ranked = |role: Role| {
        let candidates = top_candidates(
            &surface,
            |id| ctx.actors.player(id).is_some_and(|p| p.role() == role),
            count,
            search.dedup_radius_ms,
        );
        to_timings(ctx, candidates)
    };

    (ranked(Role::Melee), ranked(Role::Ranged))
}

fn to_timings(ctx: &WindowContext<'_>, candidates: Vec<TimingCandidate>) -> RoleTimings {
    let entries: Vec<TimingEntry> = candidates
        .into_iter()
        .enumerate()
        .map(|(i, candidate)| TimingEntry {
            rank: i + 1,
            timestamp: candidate.timestamp,
            time: ctx.fight.format_short(candidate.timestamp),
            actor_id: candidate.actor_id,
            actor_name: ctx.actors.name(candidate.actor_id).to_string(),
            damage: candidate.damage,
        })
        .collect();

    RoleTimings {
        best: entries.first().cloned(),
        entries,
    }
}
