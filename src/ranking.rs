//! Orderings for the live and upcoming listings.
//!
//! Both sorts copy their input; the source slice may back several views.

use std::cmp::Ordering;

use crate::models::{competition_slug, Match};

/// Competitions that float to the top of live listings, best first.
pub const PRIORITY_COMPETITIONS: [&str; 8] = [
    "Premier League",
    "La Liga",
    "Serie A",
    "Bundesliga",
    "Ligue 1",
    "MLS",
    "Saudi Pro League",
    "Champions League",
];

/// Ordered list of priority competition names.
#[derive(Debug, Clone)]
pub struct PriorityList {
    entries: Vec<String>,
}

impl PriorityList {
    pub fn new<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        PriorityList {
            entries: entries.into_iter().map(|e| e.into().to_lowercase()).collect(),
        }
    }

    /// Index of the first entry named by the competition or the title.
    pub fn index_of(&self, m: &Match) -> Option<usize> {
        let competition = m.competition_name.to_lowercase();
        let title = m.title.to_lowercase();
        self.entries
            .iter()
            .position(|e| competition.contains(e.as_str()) || title.contains(e.as_str()))
    }

    /// Live-list comparator: priority index, then popular, then kickoff.
    pub fn compare_priority(&self, a: &Match, b: &Match) -> Ordering {
        match (self.index_of(a), self.index_of(b)) {
            (Some(ia), Some(ib)) => ia.cmp(&ib),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => b
                .popular
                .cmp(&a.popular)
                .then(a.timestamp.cmp(&b.timestamp)),
        }
    }

    /// Upcoming-list comparator: kickoff, then popular, then priority index.
    pub fn compare_chronological(&self, a: &Match, b: &Match) -> Ordering {
        let rank = |m: &Match| self.index_of(m).unwrap_or(usize::MAX);
        a.timestamp
            .cmp(&b.timestamp)
            .then(b.popular.cmp(&a.popular))
            .then_with(|| rank(a).cmp(&rank(b)))
    }

    pub fn sort_by_priority(&self, matches: &[Match]) -> Vec<Match> {
        let mut sorted = matches.to_vec();
        sorted.sort_by(|a, b| self.compare_priority(a, b));
        sorted
    }

    pub fn sort_chronologically(&self, matches: &[Match]) -> Vec<Match> {
        let mut sorted = matches.to_vec();
        sorted.sort_by(|a, b| self.compare_chronological(a, b));
        sorted
    }
}

impl Default for PriorityList {
    fn default() -> Self {
        PriorityList::new(PRIORITY_COMPETITIONS)
    }
}

/// Keep matches belonging to `selector`, given as a competition id or name slug.
/// `"all"` keeps everything.
pub fn filter_by_competition(matches: &[Match], selector: &str) -> Vec<Match> {
    if selector == "all" {
        return matches.to_vec();
    }
    matches
        .iter()
        .filter(|m| {
            m.competition_id == selector || competition_slug(&m.competition_name) == selector
        })
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{MatchStatus, Team};

    const T: i64 = 1_760_000_000_000;
    const MIN: i64 = 60_000;

    fn side(name: &str) -> Team {
        Team {
            id: name.into(),
            name: name.into(),
            short_name: None,
            logo: None,
        }
    }

    fn fixture(id: &str, competition: &str, timestamp: i64, popular: bool) -> Match {
        Match {
            id: id.into(),
            title: String::new(),
            status: MatchStatus::Upcoming,
            live_minute: None,
            competition_id: competition_slug(competition),
            competition_name: competition.into(),
            competition_logo: None,
            home_team: side("Home"),
            away_team: side("Away"),
            home_score: None,
            away_score: None,
            stadium: None,
            poster: None,
            popular,
            timestamp,
        }
    }

    fn ids(matches: &[Match]) -> Vec<&str> {
        matches.iter().map(|m| m.id.as_str()).collect()
    }

    #[test]
    fn test_priority_beats_kickoff_time() {
        let list = PriorityList::default();
        let input = vec![
            fixture("other-early", "Other", T, true),
            fixture("ucl", "Champions League", T + 90 * MIN, false),
            fixture("epl", "Premier League", T + 120 * MIN, false),
        ];
        let sorted = list.sort_by_priority(&input);
        assert_eq!(ids(&sorted), vec!["epl", "ucl", "other-early"]);
    }

    #[test]
    fn test_non_priority_popular_then_time() {
        let list = PriorityList::default();
        let input = vec![
            fixture("late", "Eredivisie (NED)", T + 30 * MIN, false),
            fixture("early", "Liga MX (MEX)", T, false),
            fixture("popular", "Other", T + 60 * MIN, true),
        ];
        let sorted = list.sort_by_priority(&input);
        assert_eq!(ids(&sorted), vec!["popular", "early", "late"]);
    }

    #[test]
    fn test_priority_ties_keep_input_order() {
        let list = PriorityList::default();
        let input = vec![
            fixture("b", "La Liga", T + 10 * MIN, false),
            fixture("a", "La Liga", T, true),
        ];
        let sorted = list.sort_by_priority(&input);
        assert_eq!(ids(&sorted), vec!["b", "a"]);
    }

    #[test]
    fn test_title_can_carry_priority() {
        let list = PriorityList::default();
        let mut m = fixture("titled", "Other", T, false);
        m.title = "Premier League: Arsenal vs Chelsea".into();
        assert_eq!(list.index_of(&m), Some(0));
        assert_eq!(list.index_of(&fixture("x", "Other", T, false)), None);
    }

    #[test]
    fn test_chronological_order() {
        let list = PriorityList::default();
        let input = vec![
            fixture("t10", "Other", T + 10 * MIN, false),
            fixture("t5", "Other", T + 5 * MIN, false),
            fixture("t5-popular", "Other", T + 5 * MIN, true),
        ];
        let sorted = list.sort_chronologically(&input);
        assert_eq!(ids(&sorted), vec!["t5-popular", "t5", "t10"]);
    }

    #[test]
    fn test_chronological_priority_breaks_remaining_ties() {
        let list = PriorityList::default();
        let input = vec![
            fixture("other", "Other", T, false),
            fixture("ucl", "Champions League", T, false),
            fixture("liga", "La Liga", T, false),
        ];
        let sorted = list.sort_chronologically(&input);
        assert_eq!(ids(&sorted), vec!["liga", "ucl", "other"]);
    }

    #[test]
    fn test_sorting_leaves_input_untouched() {
        let list = PriorityList::default();
        let input = vec![
            fixture("c", "Other", T + 20 * MIN, false),
            fixture("b", "Serie A", T + 10 * MIN, false),
            fixture("a", "Premier League", T, false),
        ];
        let snapshot = input.clone();
        let _ = list.sort_by_priority(&input);
        let _ = list.sort_chronologically(&input);
        assert_eq!(input, snapshot);
        assert_eq!(ids(&input), vec!["c", "b", "a"]);
    }

    #[test]
    fn test_filter_by_competition() {
        let input = vec![
            fixture("a", "Premier League", T, false),
            fixture("b", "La Liga", T, false),
            fixture("c", "Premier League", T, false),
        ];
        assert_eq!(ids(&filter_by_competition(&input, "premier-league")), vec!["a", "c"]);
        assert_eq!(filter_by_competition(&input, "all").len(), 3);
        assert!(filter_by_competition(&input, "serie-a").is_empty());
    }
}
