use cardcalc_core::{
    AnalysisConfig, AnalysisConfigExt, CardPlayReport, DrawWindowReport, FightAnalysis, FightSelector,
    RoleTimings, analyze_dump, parse_report_url, read_fight_dump,
};
use std::io::Write;
use std::path::PathBuf;
use std::time::Instant;

use crate::CliContext;

pub fn load(path: &str, verbose: bool, ctx: &mut CliContext) -> Result<(), String> {
    let path = PathBuf::from(path);
    let timer = Instant::now();
    let dump = read_fight_dump(&path).map_err(|e| error_chain(&e))?;

    if verbose {
        println!(
            "loaded report {} fight {} ({} events) in {}ms",
            dump.report.code,
            dump.fight_id,
            dump.event_count(),
            timer.elapsed().as_millis()
        );
    }
    ctx.set_dump(path, dump);
    Ok(())
}

pub fn list_fights(ctx: &CliContext) -> Result<(), String> {
    let dump = ctx.dump()?;

    println!("{:<6}{:<32}{:>10}  Kill", "Fight", "Name", "Duration");
    println!("{}", "-".repeat(56));
    for fight in &dump.report.fights {
        let marker = if fight.id == dump.fight_id { " *" } else { "" };
        let duration = cardcalc_core::combat_log::format_offset(fight.end_time - fight.start_time);
        println!(
            "{:<6}{:<32}{:>10}  {}{}",
            fight.id,
            fight.name,
            duration,
            if fight.kill.unwrap_or(false) { "yes" } else { "no" },
            marker
        );
    }
    println!("\n* fight contained in the loaded dump");
    Ok(())
}

/// Check that a report URL points at the fight held by the loaded dump.
fn check_url(url: &str, ctx: &CliContext) -> Result<(), String> {
    let dump = ctx.dump()?;
    let (code, selector) = parse_report_url(url).map_err(|e| error_chain(&e))?;
    if code != dump.report.code {
        return Err(format!(
            "report {code} does not match loaded report {}",
            dump.report.code
        ));
    }

    let fight = dump
        .report
        .fight(selector)
        .ok_or_else(|| format!("fight not found in report {code}"))?;
    if fight.fight_id != dump.fight_id {
        let requested = match selector {
            FightSelector::Id(id) => id.to_string(),
            FightSelector::Last => format!("last ({})", fight.fight_id),
        };
        return Err(format!(
            "fight {requested} is not in the loaded dump, which holds fight {}",
            dump.fight_id
        ));
    }
    Ok(())
}

pub fn analyze(url: Option<&str>, json: bool, ctx: &mut CliContext) -> Result<(), String> {
    if let Some(url) = url {
        check_url(url, ctx)?;
    }

    let timer = Instant::now();
    let analysis = analyze_dump(ctx.dump()?, &ctx.config).map_err(|e| e.to_string())?;
    tracing::debug!(
        windows = analysis.windows.len(),
        elapsed_ms = timer.elapsed().as_millis() as u64,
        "Analysis finished"
    );

    if json {
        let text = serde_json::to_string_pretty(&analysis).map_err(|e| e.to_string())?;
        println!("{text}");
    } else {
        print_analysis(&analysis);
    }
    ctx.last_analysis = Some(analysis);
    Ok(())
}

pub fn show_window(index: usize, ctx: &CliContext) -> Result<(), String> {
    let analysis = ctx
        .last_analysis
        .as_ref()
        .ok_or("no analysis yet, run `analyze` first")?;
    let window = analysis
        .windows
        .iter()
        .find(|w| w.index == index)
        .ok_or_else(|| format!("no draw window {index} (1-{})", analysis.windows.len()))?;

    print_window(window);
    Ok(())
}

pub fn show_config(save: bool, ctx: &CliContext) -> Result<(), String> {
    let config: &AnalysisConfig = &ctx.config;
    if let Ok(path) = AnalysisConfig::config_path() {
        println!("config file: {}", path.display());
    }
    println!(
        "search: duration {}ms, step {}ms, dedup radius {}ms",
        config.search.duration_ms, config.search.step_ms, config.search.dedup_radius_ms
    );
    let tiers: Vec<String> = config
        .search
        .tiers
        .iter()
        .map(|t| format!("<{}s: {}", t.below_secs, t.count))
        .collect();
    println!("top-k: {} else {}", tiers.join(", "), config.search.max_count);
    println!("cards: default duration {}ms", config.cards.default_duration_ms);
    println!(
        "damage: support redirect {:?}, ignored lifecycle {:?}",
        config.damage.support_redirect_abilities, config.damage.ignored_lifecycle_abilities
    );
    println!("parallel: {}", config.parallel);

    if save {
        config.save().map_err(|e| error_chain(&e))?;
        println!("configuration saved");
    }
    Ok(())
}

pub fn exit() {
    let mut stdout = std::io::stdout();
    let _ = writeln!(stdout, "quitting...");
    let _ = stdout.flush();
}

fn error_chain(err: &dyn std::error::Error) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}

// ─────────────────────────────────────────────────────────────────────────────
// Text rendering
// ─────────────────────────────────────────────────────────────────────────────

fn print_analysis(analysis: &FightAnalysis) {
    let encounter = &analysis.encounter;
    println!(
        "{} ({}) fight {} - {} [{}]\n",
        encounter.name,
        encounter.report,
        encounter.fight_id,
        encounter.duration,
        if encounter.kill { "kill" } else { "wipe" }
    );

    for window in &analysis.windows {
        print_window(window);
    }
}

fn print_window(window: &DrawWindowReport) {
    println!(
        "Window {}: {} ({}) -> {} ({})",
        window.index, window.start_time, window.start_event, window.end_time, window.end_event
    );
    if let Some(drawn) = &window.drawn_card {
        let redraws = match window.redraws {
            0 => String::new(),
            n => format!(" after {n} redraw(s)"),
        };
        println!("Drew {drawn}{redraws}");
    }

    match &window.card {
        Some(card) => print_card(card),
        None => println!("No card played in this window"),
    }

    print_timings("Melee", &window.melee);
    print_timings("Ranged", &window.ranged);
    println!();
}

fn print_card(card: &CardPlayReport) {
    let target = card
        .damage_table
        .iter()
        .find(|row| row.id == card.target_id)
        .map_or("Unknown", |row| row.name.as_str());
    println!(
        "{} played on {} at {} (Duration: {:>4.1}s)",
        card.card_name, target, card.play_time, card.duration_secs
    );
    let verdict = if card.correct { "correct" } else { "incorrect" };
    println!(
        "The optimal target was {} ({verdict})",
        card.optimal_target_name.as_deref().unwrap_or("nobody")
    );

    let row_format = |name: &str, job: &str, adjusted: &str, real: &str, role: &str, has_card: &str, bonus: &str| {
        println!("{name:<22}{job:<13}{adjusted:>9}{real:>12}   {role:<12}{has_card:<9}{bonus:>7}")
    };
    row_format("Player", "Job", "Damage", "Raw Damage", "Role", "Has Card", "Bonus");
    println!("{}", "-".repeat(84));
    for row in &card.damage_table {
        let has_card = match row.prior_card_remaining_ms {
            Some(ms) => format!("{:.1}s", ms as f64 / 1000.0),
            None => "no".to_string(),
        };
        row_format(
            &row.name,
            &row.job,
            &row.adjusted_damage.to_string(),
            &row.real_damage.to_string(),
            row.role.label(),
            &has_card,
            &row.bonus_damage.to_string(),
        );
    }
}

fn print_timings(label: &str, timings: &RoleTimings) {
    let Some(best) = &timings.best else {
        println!("{label}: no damage in window");
        return;
    };
    println!(
        "{label}: best {} on {} for {} damage",
        best.time, best.actor_name, best.damage
    );
    for entry in timings.entries.iter().skip(1) {
        println!("  {:>2}. {}  {:<22}{:>9}", entry.rank, entry.time, entry.actor_name, entry.damage);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn loaded() -> Option<CliContext> {
        let path = "../integration-tests/fixtures/short_pull.json";
        if !std::path::Path::new(path).exists() {
            eprintln!("Skipping test: fixture file not found at {path}");
            return None;
        }
        let mut ctx = CliContext::with_config(AnalysisConfig::default());
        load(path, false, &mut ctx).unwrap();
        Some(ctx)
    }

    #[test]
    fn url_must_match_loaded_fight() {
        let Some(ctx) = loaded() else {
            return;
        };

        assert!(check_url("https://www.fflogs.com/reports/aBcD1234#fight=3", &ctx).is_ok());
        assert!(check_url("https://www.fflogs.com/reports/aBcD1234#fight=last", &ctx).is_ok());
        assert!(check_url("https://www.fflogs.com/reports/aBcD1234#fight=1", &ctx).is_err());
        assert!(check_url("https://www.fflogs.com/reports/zzzz#fight=3", &ctx).is_err());
    }

    #[test]
    fn window_requires_analysis() {
        let Some(mut ctx) = loaded() else {
            return;
        };

        assert!(show_window(1, &ctx).is_err());
        analyze(None, true, &mut ctx).unwrap();
        assert!(show_window(2, &ctx).is_ok());
        assert!(show_window(9, &ctx).is_err());
    }

    #[test]
    fn commands_need_a_dump() {
        let mut ctx = CliContext::with_config(AnalysisConfig::default());

        assert!(list_fights(&ctx).is_err());
        assert!(analyze(None, false, &mut ctx).is_err());
    }
}
