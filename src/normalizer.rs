//! Raw feed record → canonical [`Match`].
//!
//! Every field degrades on its own: a missing team name becomes "TBD", an
//! unreadable kickoff becomes epoch 0 (and therefore a finished match). One bad
//! record never fails the snapshot.

use serde_json::Value;

use crate::classifier::Classifier;
use crate::models::{
    competition_slug, LiveMinute, Match, MatchStatus, StreamSource, Team, TBD_TEAM,
};

/// How long after kickoff a match still counts as live.
pub const LIVE_WINDOW_MS: i64 = 3 * 60 * 60 * 1000;

const MINUTE_MS: i64 = 60_000;

/// Lifecycle state from kickoff and `now` (both epoch ms).
/// A kickoff too far in the past to subtract from `now` counts as finished.
pub fn match_status(timestamp: i64, now: i64) -> MatchStatus {
    if timestamp > now {
        return MatchStatus::Upcoming;
    }
    match now.checked_sub(timestamp) {
        Some(elapsed) if elapsed < LIVE_WINDOW_MS => MatchStatus::Live,
        _ => MatchStatus::Finished,
    }
}

/// Phase label for a live match. Does not model stoppage time, delays or
/// abandonments; returns `None` when the match is not live.
pub fn live_minute(timestamp: i64, now: i64) -> Option<LiveMinute> {
    if match_status(timestamp, now) != MatchStatus::Live {
        return None;
    }
    let elapsed = now.checked_sub(timestamp)? / MINUTE_MS;
    Some(match elapsed {
        0..=45 => LiveMinute::JustStarted,
        46..=60 => LiveMinute::Halftime,
        61..=105 => LiveMinute::SecondHalf,
        _ => LiveMinute::Stoppage,
    })
}

/// Kickoff in epoch ms. Numbers are truncated, strings are read up to the
/// first non-digit; anything else is 0.
pub fn parse_timestamp(raw: &Value) -> i64 {
    match raw {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.is_finite()).map(|f| f as i64))
            .unwrap_or(0),
        Value::String(s) => parse_leading_int(s).unwrap_or(0),
        _ => 0,
    }
}

fn parse_leading_int(s: &str) -> Option<i64> {
    let s = s.trim_start();
    let sign_len = usize::from(s.starts_with(|c: char| c == '-' || c == '+'));
    let end = s[sign_len..]
        .find(|c: char| !c.is_ascii_digit())
        .map_or(s.len(), |i| i + sign_len);
    s[..end].parse::<i64>().ok()
}

fn parse_score(raw: &Value) -> Option<i32> {
    raw.as_i64()
        .and_then(|v| i32::try_from(v).ok())
        .or_else(|| raw.as_str().and_then(|s| s.trim().parse().ok()))
}

/// Non-empty string field, as JS-style truthiness would read it.
fn text(raw: &Value) -> Option<String> {
    raw.as_str().filter(|s| !s.is_empty()).map(str::to_string)
}

fn id_string(raw: &Value) -> String {
    match raw {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        _ => String::new(),
    }
}

fn team(raw: &Value, fallback_id: &str) -> Team {
    let name = text(&raw["name"]);
    Team {
        id: name.clone().unwrap_or_else(|| fallback_id.to_string()),
        name: name.unwrap_or_else(|| TBD_TEAM.to_string()),
        short_name: text(&raw["shortName"]).or_else(|| text(&raw["short_name"])),
        logo: text(&raw["badge"]),
    }
}

/// Build one canonical match. `now` is epoch ms.
pub fn normalize(raw: &Value, now: i64, classifier: &Classifier) -> Match {
    let timestamp = parse_timestamp(&raw["date"]);
    let status = match_status(timestamp, now);

    let home_team = team(&raw["teams"]["home"], "home");
    let away_team = team(&raw["teams"]["away"], "away");
    let title = text(&raw["title"]).unwrap_or_default();

    let classification = classifier.classify(
        &home_team.name,
        &away_team.name,
        Some(title.as_str()).filter(|t| !t.is_empty()),
    );

    let (home_score, away_score) = if status == MatchStatus::Live {
        (
            parse_score(&raw["scores"]["home"]),
            parse_score(&raw["scores"]["away"]),
        )
    } else {
        (None, None)
    };

    Match {
        id: id_string(&raw["id"]),
        title,
        status,
        live_minute: live_minute(timestamp, now),
        competition_id: competition_slug(&classification.competition),
        competition_name: classification.competition,
        competition_logo: classification.logo,
        home_team,
        away_team,
        home_score,
        away_score,
        stadium: text(&raw["venue"]).or_else(|| text(&raw["stadium"])),
        poster: text(&raw["poster"]),
        popular: raw["popular"].as_bool().unwrap_or(false),
        timestamp,
    }
}

/// Normalize every record of a snapshot, preserving feed order.
pub fn normalize_snapshot(records: &[Value], now: i64, classifier: &Classifier) -> Vec<Match> {
    records
        .iter()
        .map(|raw| normalize(raw, now, classifier))
        .collect()
}

/// Stream sources attached to a detail record.
pub fn stream_sources(raw: &Value) -> Vec<StreamSource> {
    let Some(items) = raw["sources"].as_array() else {
        return vec![];
    };
    items
        .iter()
        .enumerate()
        .map(|(idx, s)| {
            let raw_id = id_string(&s["id"]);
            StreamSource {
                id: if raw_id.is_empty() {
                    format!("src-{}", idx)
                } else {
                    format!("{}-{}", raw_id, idx)
                },
                name: text(&s["name"]).unwrap_or_else(|| format!("Source {}", idx + 1)),
                url: text(&s["url"])
                    .or_else(|| text(&s["embedUrl"]))
                    .or_else(|| text(&s["src"]))
                    .unwrap_or_default(),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const NOW: i64 = 1_760_000_000_000;

    fn minutes_ago(m: i64) -> i64 {
        NOW - m * MINUTE_MS
    }

    #[test]
    fn test_status_boundaries() {
        assert_eq!(match_status(NOW, NOW), MatchStatus::Live);
        assert_eq!(match_status(NOW + 1, NOW), MatchStatus::Upcoming);
        assert_eq!(match_status(NOW - LIVE_WINDOW_MS + 1, NOW), MatchStatus::Live);
        assert_eq!(match_status(NOW - LIVE_WINDOW_MS, NOW), MatchStatus::Finished);
        assert_eq!(match_status(0, NOW), MatchStatus::Finished);
    }

    #[test]
    fn test_live_minute_boundaries() {
        let label = |m| live_minute(minutes_ago(m), NOW);
        assert_eq!(label(0), Some(LiveMinute::JustStarted));
        assert_eq!(label(45), Some(LiveMinute::JustStarted));
        assert_eq!(label(46), Some(LiveMinute::Halftime));
        assert_eq!(label(60), Some(LiveMinute::Halftime));
        assert_eq!(label(61), Some(LiveMinute::SecondHalf));
        assert_eq!(label(105), Some(LiveMinute::SecondHalf));
        assert_eq!(label(106), Some(LiveMinute::Stoppage));
        assert_eq!(label(179), Some(LiveMinute::Stoppage));
    }

    #[test]
    fn test_live_minute_floors_partial_minutes() {
        // 45 minutes and 59 seconds is still minute 45.
        let ts = NOW - 45 * MINUTE_MS - 59_000;
        assert_eq!(live_minute(ts, NOW), Some(LiveMinute::JustStarted));
    }

    #[test]
    fn test_live_minute_absent_when_not_live() {
        assert_eq!(live_minute(NOW + 60_000, NOW), None);
        assert_eq!(live_minute(minutes_ago(180), NOW), None);
    }

    #[test]
    fn test_parse_timestamp_variants() {
        assert_eq!(parse_timestamp(&json!(1700000000000i64)), 1_700_000_000_000);
        assert_eq!(parse_timestamp(&json!("1700000000000")), 1_700_000_000_000);
        assert_eq!(parse_timestamp(&json!("1700000000000abc")), 1_700_000_000_000);
        assert_eq!(parse_timestamp(&json!(1700000000000.7f64)), 1_700_000_000_000);
        assert_eq!(parse_timestamp(&json!("soon")), 0);
        assert_eq!(parse_timestamp(&json!(null)), 0);
        assert_eq!(parse_timestamp(&json!({"ms": 5})), 0);
    }

    #[test]
    fn test_end_to_end_live_record() {
        let raw = json!({
            "id": 42,
            "date": minutes_ago(20),
            "teams": {"home": {"name": "Real Madrid"}, "away": {"name": "Barcelona"}},
            "scores": {"home": 1, "away": 0}
        });
        let m = normalize(&raw, NOW, &Classifier::default());
        assert_eq!(m.id, "42");
        assert_eq!(m.status, MatchStatus::Live);
        assert_eq!(m.live_minute, Some(LiveMinute::JustStarted));
        assert_eq!(m.home_score, Some(1));
        assert_eq!(m.away_score, Some(0));
        assert_eq!(m.competition_name, "La Liga");
        assert_eq!(m.competition_id, "la-liga");
        assert!(m.competition_logo.is_some());
    }

    #[test]
    fn test_scores_omitted_unless_live() {
        let classifier = Classifier::default();
        let upcoming = json!({
            "date": NOW + 3_600_000,
            "teams": {"home": {"name": "Arsenal"}, "away": {"name": "Chelsea"}},
            "scores": {"home": 0, "away": 0}
        });
        let m = normalize(&upcoming, NOW, &classifier);
        assert_eq!(m.status, MatchStatus::Upcoming);
        assert_eq!((m.home_score, m.away_score), (None, None));
        assert_eq!(m.live_minute, None);

        let finished = json!({
            "date": minutes_ago(200),
            "teams": {"home": {"name": "Arsenal"}, "away": {"name": "Chelsea"}},
            "scores": {"home": 2, "away": 2}
        });
        let m = normalize(&finished, NOW, &classifier);
        assert_eq!(m.status, MatchStatus::Finished);
        assert_eq!((m.home_score, m.away_score), (None, None));
    }

    #[test]
    fn test_live_nil_nil_keeps_zero_scores() {
        let raw = json!({
            "date": minutes_ago(5).to_string(),
            "teams": {"home": {"name": "Arsenal"}, "away": {"name": "Chelsea"}},
            "scores": {"home": 0, "away": "0"}
        });
        let m = normalize(&raw, NOW, &Classifier::default());
        assert_eq!((m.home_score, m.away_score), (Some(0), Some(0)));
    }

    #[test]
    fn test_malformed_record_degrades_per_field() {
        let m = normalize(&json!({"date": "not a date"}), NOW, &Classifier::default());
        assert_eq!(m.timestamp, 0);
        assert_eq!(m.status, MatchStatus::Finished);
        assert_eq!(m.home_team.name, TBD_TEAM);
        assert_eq!(m.home_team.id, "home");
        assert_eq!(m.away_team.name, TBD_TEAM);
        assert_eq!(m.away_team.id, "away");
        assert_eq!(m.id, "");
        assert_eq!(m.title, "");
        assert_eq!(m.competition_name, "Other");
        assert!(!m.popular);
    }

    #[test]
    fn test_optional_fields_are_copied() {
        let raw = json!({
            "id": "abc",
            "date": NOW + 1,
            "title": "Arsenal vs Chelsea",
            "popular": true,
            "stadium": "Emirates Stadium",
            "poster": "https://img/poster.jpg",
            "teams": {
                "home": {"name": "Arsenal", "badge": "https://img/ars.png", "shortName": "ARS"},
                "away": {"name": "Chelsea", "badge": ""}
            }
        });
        let m = normalize(&raw, NOW, &Classifier::default());
        assert!(m.popular);
        assert_eq!(m.stadium.as_deref(), Some("Emirates Stadium"));
        assert_eq!(m.poster.as_deref(), Some("https://img/poster.jpg"));
        assert_eq!(m.home_team.logo.as_deref(), Some("https://img/ars.png"));
        assert_eq!(m.home_team.short_name.as_deref(), Some("ARS"));
        assert_eq!(m.away_team.logo, None);
        assert_eq!(m.title, "Arsenal vs Chelsea");
    }

    #[test]
    fn test_venue_preferred_over_stadium() {
        let raw = json!({"venue": "Anfield", "stadium": "Elsewhere"});
        let m = normalize(&raw, NOW, &Classifier::default());
        assert_eq!(m.stadium.as_deref(), Some("Anfield"));
    }

    #[test]
    fn test_title_keyword_reaches_classifier() {
        let raw = json!({
            "date": NOW + 1,
            "title": "UCL Matchday 1",
            "teams": {"home": {"name": "Alpha"}, "away": {"name": "Omega"}}
        });
        let m = normalize(&raw, NOW, &Classifier::default());
        assert_eq!(m.competition_name, "Champions League");
    }

    #[test]
    fn test_snapshot_survives_bad_records() {
        let records = vec![
            json!(null),
            json!("garbage"),
            json!({"date": NOW - 1, "teams": {"home": {"name": "Arsenal"}, "away": {"name": "Chelsea"}}}),
        ];
        let matches = normalize_snapshot(&records, NOW, &Classifier::default());
        assert_eq!(matches.len(), 3);
        assert_eq!(matches[2].status, MatchStatus::Live);
        assert_eq!(matches[0].home_team.name, TBD_TEAM);
    }

    #[test]
    fn test_extreme_past_kickoff_is_finished() {
        assert_eq!(match_status(i64::MIN, NOW), MatchStatus::Finished);
        assert_eq!(live_minute(i64::MIN, NOW), None);
        assert_eq!(match_status(i64::MIN, i64::MAX), MatchStatus::Finished);
    }

    #[test]
    fn test_snapshot_survives_overflowing_kickoffs() {
        let teams = json!({"home": {"name": "Arsenal"}, "away": {"name": "Chelsea"}});
        let records = vec![
            json!({"date": -1e19, "teams": teams, "scores": {"home": 3, "away": 1}}),
            json!({"date": i64::MIN, "teams": teams}),
            json!({"date": i64::MIN.to_string(), "teams": teams}),
            json!({"date": minutes_ago(10), "teams": teams}),
        ];
        let matches = normalize_snapshot(&records, NOW, &Classifier::default());
        assert_eq!(matches.len(), 4);
        for m in &matches[..3] {
            assert_eq!(m.timestamp, i64::MIN);
            assert_eq!(m.status, MatchStatus::Finished);
            assert_eq!(m.live_minute, None);
            assert_eq!((m.home_score, m.away_score), (None, None));
        }
        assert_eq!(matches[3].status, MatchStatus::Live);
    }

    #[test]
    fn test_stream_sources() {
        let raw = json!({
            "sources": [
                {"id": "alpha", "name": "HD", "url": "https://a"},
                {"embedUrl": "https://b"},
                {"id": 7, "src": "https://c"},
                {}
            ]
        });
        let sources = stream_sources(&raw);
        assert_eq!(sources.len(), 4);
        assert_eq!(sources[0].id, "alpha-0");
        assert_eq!(sources[0].name, "HD");
        assert_eq!(sources[1].id, "src-1");
        assert_eq!(sources[1].name, "Source 2");
        assert_eq!(sources[1].url, "https://b");
        assert_eq!(sources[2].id, "7-2");
        assert_eq!(sources[2].url, "https://c");
        assert_eq!(sources[3].url, "");
        assert!(stream_sources(&json!({})).is_empty());
    }
}
