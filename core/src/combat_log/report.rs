//! Report and fight metadata, and locating a fight from a report URL.

use chrono::TimeDelta;
use serde::Deserialize;

use super::InputError;
use crate::windows::FightBounds;

/// Fight entry of a report's fight list
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FightSummary {
    pub id: u32,
    pub start_time: i64,
    pub end_time: i64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub kill: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ReportData {
    pub code: String,
    #[serde(default)]
    pub fights: Vec<FightSummary>,
}

impl ReportData {
    pub fn fight(&self, selector: FightSelector) -> Option<FightInfo> {
        let summary = match selector {
            FightSelector::Id(id) => self.fights.iter().find(|f| f.id == id),
            FightSelector::Last => self.fights.last(),
        }?;

        Some(FightInfo {
            report: self.code.clone(),
            fight_id: summary.id,
            start: summary.start_time,
            end: summary.end_time,
            name: summary.name.clone(),
            kill: summary.kill.unwrap_or(false),
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FightSelector {
    Id(u32),
    Last,
}

/// Bounds and identity of the fight under analysis (timestamps in ms)
#[derive(Debug, Clone, PartialEq)]
pub struct FightInfo {
    pub report: String,
    pub fight_id: u32,
    pub start: i64,
    pub end: i64,
    pub name: String,
    pub kill: bool,
}

impl FightInfo {
    pub fn duration_ms(&self) -> i64 {
        self.end - self.start
    }

    pub fn bounds(&self) -> FightBounds {
        FightBounds::new(self.start, self.end)
    }

    /// Fight-relative `MM:SS.mmm`
    pub fn format_time(&self, timestamp: i64) -> String {
        format_offset(timestamp - self.start)
    }

    /// Fight-relative `MM:SS`
    pub fn format_short(&self, timestamp: i64) -> String {
        let full = self.format_time(timestamp);
        match full.split_once('.') {
            Some((short, _)) => short.to_string(),
            None => full,
        }
    }

    pub fn format_duration(&self) -> String {
        format_offset(self.duration_ms())
    }
}

/// Render a millisecond offset as `MM:SS.mmm`. Negative offsets clamp to zero.
pub fn format_offset(offset_ms: i64) -> String {
    let delta = TimeDelta::milliseconds(offset_ms.max(0));
    let seconds = delta.num_seconds();
    let millis = (delta - TimeDelta::seconds(seconds)).num_milliseconds();
    format!("{:02}:{:02}.{:03}", delta.num_minutes(), seconds % 60, millis)
}

/// Split `.../reports/<code>#fight=<n|last>` into the report code and fight selector.
pub fn parse_report_url(url: &str) -> Result<(String, FightSelector), InputError> {
    let invalid = || InputError::InvalidReportUrl {
        url: url.to_string(),
    };

    let (path, fragment) = match url.split_once('#') {
        Some((path, fragment)) => (path, Some(fragment)),
        None => (url, None),
    };
    let path = path.split('?').next().unwrap_or(path);

    let code = path
        .split('/')
        .filter(|segment| !segment.is_empty())
        .next_back()
        .ok_or_else(invalid)?;
    if !code.chars().all(|c| c.is_ascii_alphanumeric()) || code.contains("reports") {
        return Err(invalid());
    }

    let fight = fragment
        .into_iter()
        .flat_map(|f| f.split('&'))
        .find_map(|pair| pair.strip_prefix("fight="))
        .ok_or_else(|| InputError::MissingFightSelector {
            url: url.to_string(),
        })?;

    let selector = if fight == "last" {
        FightSelector::Last
    } else {
        FightSelector::Id(fight.parse().map_err(|_| invalid())?)
    };

    Ok((code.to_string(), selector))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report() -> ReportData {
        ReportData {
            code: "qBxNr4V12gmZz63R".to_string(),
            fights: vec![
                FightSummary {
                    id: 1,
                    start_time: 0,
                    end_time: 60_000,
                    name: "Trash".to_string(),
                    kill: None,
                },
                FightSummary {
                    id: 12,
                    start_time: 100_000,
                    end_time: 520_123,
                    name: "Boss".to_string(),
                    kill: Some(true),
                },
            ],
        }
    }

    #[test]
    fn test_format_offset() {
        assert_eq!(format_offset(0), "00:00.000");
        assert_eq!(format_offset(83_456), "01:23.456");
        assert_eq!(format_offset(-5), "00:00.000");
    }

    #[test]
    fn test_fight_lookup() {
        let report = report();
        let fight = report.fight(FightSelector::Id(12)).unwrap();
        assert_eq!(fight.start, 100_000);
        assert!(fight.kill);
        assert_eq!(fight.format_duration(), "07:00.123");
        assert_eq!(fight.format_short(161_000), "01:01");
        assert_eq!(fight.format_short(fight.start + 6_001_500), "100:01");
        assert_eq!(report.fight(FightSelector::Last).unwrap().fight_id, 12);
        assert!(report.fight(FightSelector::Id(3)).is_none());
    }

    #[test]
    fn test_parse_report_url() {
        let (code, selector) = parse_report_url(
            "https://www.fflogs.com/reports/qBxNr4V12gmZz63R#fight=12&type=damage-done",
        )
        .unwrap();
        assert_eq!(code, "qBxNr4V12gmZz63R");
        assert_eq!(selector, FightSelector::Id(12));

        let (_, selector) =
            parse_report_url("https://www.fflogs.com/reports/qBxNr4V12gmZz63R/#fight=last").unwrap();
        assert_eq!(selector, FightSelector::Last);
    }

    #[test]
    fn test_parse_report_url_without_fight() {
        let err = parse_report_url("https://www.fflogs.com/reports/qBxNr4V12gmZz63R").unwrap_err();
        assert!(matches!(err, InputError::MissingFightSelector { .. }));

        let err = parse_report_url("https://www.fflogs.com/reports/abc#fight=twelve").unwrap_err();
        assert!(matches!(err, InputError::InvalidReportUrl { .. }));
    }
}
