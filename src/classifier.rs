//! Competition classifier.
//!
//! Resolution runs an ordered list of rules and stops at the first one that
//! produces an answer:
//!
//! ```text
//!  TitleOverride ─▶ DomesticMatch ─▶ ContinentalVerified ─▶ SingleSideFallback ─▶ Default
//! ```
//!
//! All matching is case-insensitive "team name contains alias". It is
//! permissive on purpose and will over-match short aliases shared by several
//! clubs.

use std::sync::Arc;
use tracing::debug;

use crate::models::OTHER_COMPETITION;
use crate::registry::{name_matches_any, DomesticLeague, RosterRegistry};

/// The rules in evaluation order.
pub const RULES: [Rule; 5] = [
    Rule::TitleOverride,
    Rule::DomesticMatch,
    Rule::ContinentalVerified,
    Rule::SingleSideFallback,
    Rule::Default,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    /// A continental keyword in the title wins outright.
    TitleOverride,
    /// Both sides belong to the same domestic league.
    DomesticMatch,
    /// Both sides qualified for a cup, or they come from different leagues.
    ContinentalVerified,
    /// Only one side has a known league; home is checked first.
    SingleSideFallback,
    Default,
}

/// Outcome of classifying one fixture.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    pub competition: String,
    pub logo: Option<String>,
    pub rule: Rule,
}

impl Classification {
    pub fn other() -> Self {
        Classification {
            competition: OTHER_COMPETITION.to_string(),
            logo: None,
            rule: Rule::Default,
        }
    }
}

/// Facts about one fixture shared by every rule.
struct Fixture<'a> {
    home: &'a str,
    away: &'a str,
    title: Option<&'a str>,
    home_domestic: Option<&'a DomesticLeague>,
    away_domestic: Option<&'a DomesticLeague>,
}

impl Rule {
    fn resolve(self, registry: &RosterRegistry, fx: &Fixture<'_>) -> Option<Classification> {
        match self {
            Rule::TitleOverride => {
                let cup = registry.cup_by_keyword(fx.title?)?;
                Some(self.hit(&cup.name, cup.logo.as_deref()))
            }
            Rule::DomesticMatch => match (fx.home_domestic, fx.away_domestic) {
                (Some(h), Some(a)) if h.name == a.name => {
                    Some(self.hit(&h.name, h.logo.as_deref()))
                }
                _ => None,
            },
            Rule::ContinentalVerified => {
                let both_qualified = registry.is_continental_qualifier(fx.home)
                    && registry.is_continental_qualifier(fx.away);
                let cross_border = matches!(
                    (fx.home_domestic, fx.away_domestic),
                    (Some(h), Some(a)) if h.name != a.name
                );
                if !both_qualified && !cross_border {
                    return None;
                }
                let home = fx.home.to_lowercase();
                let away = fx.away.to_lowercase();
                // Cups are scanned tier by tier, each checked against both sides.
                let cup = registry
                    .continental
                    .iter()
                    .find(|cup| {
                        name_matches_any(&home, &cup.qualifiers)
                            || name_matches_any(&away, &cup.qualifiers)
                    })
                    // Cross-border fixture between non-qualifiers: still a continental tie.
                    .or_else(|| registry.top_cup())?;
                Some(self.hit(&cup.name, cup.logo.as_deref()))
            }
            Rule::SingleSideFallback => {
                let league = fx.home_domestic.or(fx.away_domestic)?;
                Some(self.hit(&league.name, league.logo.as_deref()))
            }
            Rule::Default => Some(Classification::other()),
        }
    }

    fn hit(self, competition: &str, logo: Option<&str>) -> Classification {
        Classification {
            competition: competition.to_string(),
            logo: logo.map(str::to_string),
            rule: self,
        }
    }
}

/// Places fixtures into competitions using an injected season registry.
#[derive(Debug, Clone)]
pub struct Classifier {
    registry: Arc<RosterRegistry>,
}

impl Classifier {
    pub fn new(registry: Arc<RosterRegistry>) -> Self {
        Classifier { registry }
    }

    pub fn registry(&self) -> &RosterRegistry {
        &self.registry
    }

    /// Resolve the owning competition. Never fails; unknown fixtures land in "Other".
    pub fn classify(&self, home: &str, away: &str, title: Option<&str>) -> Classification {
        let fixture = self.fixture(home, away, title);

        for rule in RULES {
            if let Some(found) = rule.resolve(&self.registry, &fixture) {
                debug!(
                    "Classified '{} vs {}' as {} ({:?})",
                    home, away, found.competition, found.rule
                );
                return found;
            }
        }
        Classification::other()
    }

    /// Evaluate a single rule in isolation.
    pub fn apply_rule(
        &self,
        rule: Rule,
        home: &str,
        away: &str,
        title: Option<&str>,
    ) -> Option<Classification> {
        rule.resolve(&self.registry, &self.fixture(home, away, title))
    }

    fn fixture<'a>(&'a self, home: &'a str, away: &'a str, title: Option<&'a str>) -> Fixture<'a> {
        Fixture {
            home,
            away,
            title,
            home_domestic: self.registry.domestic_league_of(home),
            away_domestic: self.registry.domestic_league_of(away),
        }
    }
}

impl Default for Classifier {
    fn default() -> Self {
        Classifier::new(Arc::new(RosterRegistry::default()))
    }
}
