//! Per-fight card play analysis
//!
//! Runs the whole pipeline for one fight: normalize the input streams,
//! rebuild card and draw windows, build the real and bonus-free damage
//! series, then evaluate every draw window.

mod card_report;
mod error;
mod timings;

#[cfg(test)]
mod tests;

use cardcalc_types::{AnalysisConfig, DrawWindowReport, EncounterInfo, FightAnalysis};
use rayon::prelude::*;

pub use error::AnalysisError;

use crate::actors::ActorList;
use crate::combat_log::{
    DamageStreams, FightDump, FightInfo, FightSelector, RawEvent, normalize_damage, normalize_events,
};
use crate::damage::{DamageSeries, aggregate_snapshots, remove_card_bonus};
use crate::windows::{CardPlay, DrawWindow, reconstruct_card_plays, reconstruct_draw_windows, retain_player_targets};

/// Everything needed to analyze one fight, already fetched.
#[derive(Debug, Clone, Copy)]
pub struct FightInput<'a> {
    pub fight: &'a FightInfo,
    pub actors: &'a ActorList,
    pub card_events: &'a [RawEvent],
    pub draw_events: &'a [RawEvent],
    pub damage: &'a DamageStreams,
}

/// Shared read-only state for evaluating draw windows
pub(crate) struct WindowContext<'a> {
    pub fight: &'a FightInfo,
    pub actors: &'a ActorList,
    pub series: &'a DamageSeries,
    pub baseline: &'a DamageSeries,
    pub cards: &'a [CardPlay],
    pub config: &'a AnalysisConfig,
}

impl WindowContext<'_> {
    fn report(&self, index: usize, window: &DrawWindow) -> DrawWindowReport {
        let card = self
            .cards
            .iter()
            .find(|card| window.start < card.start && card.start < window.end)
            .map(|card| card_report::build(self, card));
        let (melee, ranged) = timings::build(self, window);

        DrawWindowReport {
            index: index + 1,
            start: window.start,
            end: window.end,
            start_time: self.fight.format_time(window.start),
            end_time: self.fight.format_time(window.end),
            start_event: window.start_kind.name().to_string(),
            end_event: window.end_kind.name().to_string(),
            source_id: window.source_id,
            drawn_card: window.drawn_card_name().map(str::to_string),
            redraws: window.redraws,
            card,
            melee,
            ranged,
        }
    }
}

/// Analyze one fight.
pub fn analyze(input: FightInput<'_>, config: &AnalysisConfig) -> Result<FightAnalysis, AnalysisError> {
    let fight = input.fight;
    let bounds = fight.bounds();

    let card_events = normalize_events(input.card_events);
    let cards = reconstruct_card_plays(&card_events, bounds, config.cards.default_duration_ms);
    if cards.is_empty() {
        return Err(AnalysisError::NoCardPlays {
            fight_id: fight.fight_id,
        });
    }

    let draw_events = normalize_events(input.draw_events);
    let draws = reconstruct_draw_windows(&draw_events, bounds);
    if draws.cast_count == 0 {
        return Err(AnalysisError::NoDrawEvents {
            fight_id: fight.fight_id,
        });
    }

    let damage = normalize_damage(input.damage, &config.damage);
    let snapshots = aggregate_snapshots(&damage.periodic);
    let series = DamageSeries::from_parts(&snapshots, &damage.instant);
    let baseline = remove_card_bonus(&series, &cards, input.actors);
    let cards = retain_player_targets(cards, input.actors);

    tracing::debug!(
        fight = fight.fight_id,
        cards = cards.len(),
        windows = draws.windows.len(),
        damage_events = series.len(),
        "Evaluating draw windows"
    );

    let ctx = WindowContext {
        fight,
        actors: input.actors,
        series: &series,
        baseline: &baseline,
        cards: &cards,
        config,
    };
    let windows: Vec<DrawWindowReport> = if config.parallel {
        draws
            .windows
            .par_iter()
            .enumerate()
            .map(|(index, window)| ctx.report(index, window))
            .collect()
    } else {
        draws
            .windows
            .iter()
            .enumerate()
            .map(|(index, window)| ctx.report(index, window))
            .collect()
    };

    Ok(FightAnalysis {
        encounter: EncounterInfo {
            report: fight.report.clone(),
            fight_id: fight.fight_id,
            name: fight.name.clone(),
            duration: fight.format_duration(),
            kill: fight.kill,
        },
        actors: input.actors.summaries(),
        windows,
    })
}

/// Analyze the fight stored in a dump.
pub fn analyze_dump(dump: &FightDump, config: &AnalysisConfig) -> Result<FightAnalysis, AnalysisError> {
    let fight = dump
        .report
        .fight(FightSelector::Id(dump.fight_id))
        .ok_or_else(|| AnalysisError::FightNotFound {
            report: dump.report.code.clone(),
            fight_id: dump.fight_id,
        })?;
    let actors = ActorList::new(dump.players.clone(), dump.pets.clone());

    analyze(
        FightInput {
            fight: &fight,
            actors: &actors,
            card_events: &dump.card_events,
            draw_events: &dump.draw_events,
            damage: &dump.damage,
        },
        config,
    )
}
