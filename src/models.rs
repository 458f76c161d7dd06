use serde::{Deserialize, Serialize};

/// Name of the bucket for matches no rule could place.
pub const OTHER_COMPETITION: &str = "Other";

/// Placeholder used when the feed omits a team name.
pub const TBD_TEAM: &str = "TBD";

/// A side in a fixture, built fresh from each feed snapshot.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Team {
    pub id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub short_name: Option<String>,
    /// Badge image URL
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logo: Option<String>,
}

/// Lifecycle state, derived from the kickoff timestamp only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchStatus {
    Live,
    Upcoming,
    Finished,
}

/// Coarse in-play phase estimated from minutes since kickoff.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum LiveMinute {
    #[serde(rename = "Just Started")]
    JustStarted,
    #[serde(rename = "Halftime")]
    Halftime,
    #[serde(rename = "Second Half")]
    SecondHalf,
    #[serde(rename = "90+")]
    Stoppage,
}

impl LiveMinute {
    pub fn label(self) -> &'static str {
        match self {
            LiveMinute::JustStarted => "Just Started",
            LiveMinute::Halftime => "Halftime",
            LiveMinute::SecondHalf => "Second Half",
            LiveMinute::Stoppage => "90+",
        }
    }
}

impl std::fmt::Display for LiveMinute {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Canonical fixture handed to the presentation layer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Match {
    pub id: String,
    pub title: String,
    pub status: MatchStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub live_minute: Option<LiveMinute>,
    /// Slug of `competition_name`
    pub competition_id: String,
    pub competition_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub competition_logo: Option<String>,
    pub home_team: Team,
    pub away_team: Team,
    /// Only populated while live
    #[serde(skip_serializing_if = "Option::is_none")]
    pub home_score: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub away_score: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stadium: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub poster: Option<String>,
    pub popular: bool,
    /// Kickoff instant, epoch milliseconds
    pub timestamp: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CompetitionKind {
    Domestic,
    Continental,
}

/// A competition as listed for filters and navigation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Competition {
    pub id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logo: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    pub kind: CompetitionKind,
}

/// One playable stream for a fixture, passed through from the detail endpoint.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StreamSource {
    pub id: String,
    pub name: String,
    pub url: String,
}

/// A match plus the stream sources the detail endpoint knows about.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchDetail {
    #[serde(flatten)]
    pub fixture: Match,
    pub sources: Vec<StreamSource>,
}

/// Competition id used in URLs and filters: lowercase, whitespace runs become `-`.
pub fn competition_slug(name: &str) -> String {
    name.split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join("-")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_competition_slug() {
        assert_eq!(competition_slug("Premier League"), "premier-league");
        assert_eq!(competition_slug("Liga MX (MEX)"), "liga-mx-(mex)");
        assert_eq!(competition_slug("Other"), "other");
    }

    #[test]
    fn test_live_minute_serializes_as_label() {
        let json = serde_json::to_string(&LiveMinute::Stoppage).unwrap();
        assert_eq!(json, "\"90+\"");
        assert_eq!(LiveMinute::Halftime.to_string(), "Halftime");
    }

    #[test]
    fn test_status_serializes_lowercase() {
        let json = serde_json::to_string(&MatchStatus::Upcoming).unwrap();
        assert_eq!(json, "\"upcoming\"");
    }
}
