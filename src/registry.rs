//! Season roster data used to place fixtures into competitions.
//!
//! Two kinds of knowledge live here:
//! - domestic leagues, each with a fixed list of team aliases
//! - continental cups, each with the clubs that qualified this season and the
//!   title keywords editors use for them
//!
//! Cups are kept in priority order (top tier first). The data goes stale every
//! season and transfer window; a new season ships either as a new built-in
//! dataset or as a JSON file passed with `--roster-file`.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::models::{competition_slug, Competition, CompetitionKind, OTHER_COMPETITION};

/// A domestic league and every name variant of its member clubs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DomesticLeague {
    pub name: String,
    #[serde(default)]
    pub logo: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    pub teams: Vec<String>,
}

/// A continental club competition with its current-season qualifiers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContinentalCup {
    pub name: String,
    #[serde(default)]
    pub logo: Option<String>,
    /// Lowercase markers that identify the cup in a free-text title
    pub keywords: Vec<String>,
    pub qualifiers: Vec<String>,
}

/// Immutable roster knowledge for one season.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RosterRegistry {
    pub season: String,
    pub domestic: Vec<DomesticLeague>,
    /// Top tier first
    pub continental: Vec<ContinentalCup>,
}

/// Case-insensitive "name contains alias" test. Aliases are never matched the
/// other way round, so alias lists carry both short and long forms.
pub(crate) fn name_matches_any(name_lower: &str, aliases: &[String]) -> bool {
    aliases
        .iter()
        .any(|alias| !alias.is_empty() && name_lower.contains(&alias.to_lowercase()))
}

impl RosterRegistry {
    /// Load a season from a JSON file with the same shape as this struct.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read roster file {}", path.display()))?;
        let registry: RosterRegistry = serde_json::from_str(&raw)
            .with_context(|| format!("Failed to parse roster file {}", path.display()))?;
        if registry.domestic.is_empty() && registry.continental.is_empty() {
            anyhow::bail!("Roster file {} contains no competitions", path.display());
        }
        Ok(registry)
    }

    /// Every known competition, domestic first, without the "Other" bucket.
    pub fn list_competitions(&self) -> Vec<Competition> {
        let domestic = self.domestic.iter().map(|l| Competition {
            id: competition_slug(&l.name),
            name: l.name.clone(),
            logo: l.logo.clone(),
            country: l.country.clone(),
            kind: CompetitionKind::Domestic,
        });
        let continental = self.continental.iter().map(|c| Competition {
            id: competition_slug(&c.name),
            name: c.name.clone(),
            logo: c.logo.clone(),
            country: None,
            kind: CompetitionKind::Continental,
        });
        domestic
            .chain(continental)
            .filter(|c| c.name != OTHER_COMPETITION)
            .collect()
    }

    /// First domestic league (registry order) with an alias contained in `team`.
    pub fn domestic_league_of(&self, team: &str) -> Option<&DomesticLeague> {
        let lower = team.to_lowercase();
        self.domestic
            .iter()
            .find(|league| name_matches_any(&lower, &league.teams))
    }

    /// Highest-priority cup whose qualifier list matches `team`.
    pub fn continental_cup_for(&self, team: &str) -> Option<&ContinentalCup> {
        let lower = team.to_lowercase();
        self.continental
            .iter()
            .find(|cup| name_matches_any(&lower, &cup.qualifiers))
    }

    pub fn is_continental_qualifier(&self, team: &str) -> bool {
        self.continental_cup_for(team).is_some()
    }

    /// Highest-priority cup with a keyword contained in `title`.
    pub fn cup_by_keyword(&self, title: &str) -> Option<&ContinentalCup> {
        let lower = title.to_lowercase();
        self.continental
            .iter()
            .find(|cup| name_matches_any(&lower, &cup.keywords))
    }

    pub fn top_cup(&self) -> Option<&ContinentalCup> {
        self.continental.first()
    }

    /// Logo for any known competition name.
    pub fn competition_logo(&self, name: &str) -> Option<&str> {
        self.domestic
            .iter()
            .find(|l| l.name == name)
            .and_then(|l| l.logo.as_deref())
            .or_else(|| {
                self.continental
                    .iter()
                    .find(|c| c.name == name)
                    .and_then(|c| c.logo.as_deref())
            })
    }

    /// Built-in roster data for the 2025/26 season.
    pub fn season_2025_26() -> Self {
        RosterRegistry {
            season: "2025/26".to_string(),
            domestic: DOMESTIC_2025_26.iter().map(LeagueSeed::to_league).collect(),
            continental: CONTINENTAL_2025_26.iter().map(CupSeed::to_cup).collect(),
        }
    }
}

impl Default for RosterRegistry {
    fn default() -> Self {
        Self::season_2025_26()
    }
}

// ── Built-in season data ──────────────────────────────────────────────────────

struct LeagueSeed {
    name: &'static str,
    logo: &'static str,
    country: &'static str,
    teams: &'static [&'static str],
}

impl LeagueSeed {
    fn to_league(&self) -> DomesticLeague {
        DomesticLeague {
            name: self.name.to_string(),
            logo: Some(self.logo.to_string()),
            country: Some(self.country.to_string()),
            teams: self.teams.iter().map(|t| t.to_string()).collect(),
        }
    }
}

struct CupSeed {
    name: &'static str,
    logo: &'static str,
    keywords: &'static [&'static str],
    qualifiers: &'static [&'static str],
}

impl CupSeed {
    fn to_cup(&self) -> ContinentalCup {
        ContinentalCup {
            name: self.name.to_string(),
            logo: Some(self.logo.to_string()),
            keywords: self.keywords.iter().map(|k| k.to_string()).collect(),
            qualifiers: self.qualifiers.iter().map(|q| q.to_string()).collect(),
        }
    }
}

static DOMESTIC_2025_26: &[LeagueSeed] = &[
    // Leagues whose clubs carry short names that other leagues' aliases contain
    // come first: "Inter Miami" / "Internacional" before Serie A's "Inter",
    // "Rangers" before Ligue 1's "Angers".
    LeagueSeed {
        name: "Premier League",
        logo: "https://media.api-sports.io/football/leagues/39.png",
        country: "England",
        teams: &[
            "Arsenal", "Aston Villa", "Bournemouth", "Brentford", "Brighton", "Burnley",
            "Chelsea", "Crystal Palace", "Everton", "Fulham", "Leeds", "Liverpool",
            "Man City", "Man United", "Manchester United", "Manchester City", "Newcastle",
            "Nott'm Forest", "Nottingham Forest", "Sunderland", "Tottenham", "Spurs",
            "West Ham", "Wolves", "Wolverhampton",
        ],
    },
    LeagueSeed {
        name: "La Liga",
        logo: "https://media.api-sports.io/football/leagues/140.png",
        country: "Spain",
        teams: &[
            "Real Madrid", "Barcelona", "Atletico", "Atlético", "Sevilla", "Valencia",
            "Villarreal", "Real Sociedad", "Athletic Club", "Athletic Bilbao", "Betis",
            "Real Betis", "Girona", "Celta Vigo", "Mallorca", "Osasuna", "Alaves", "Alavés",
            "Getafe", "Rayo Vallecano", "Espanyol", "Levante", "Real Oviedo", "Elche",
        ],
    },
    LeagueSeed {
        name: "MLS",
        logo: "https://media.api-sports.io/football/leagues/253.png",
        country: "USA",
        teams: &[
            "LA Galaxy", "New York", "Seattle", "Colorado", "Inter Miami", "LAFC",
            "Columbus", "FC Cincinnati", "Orlando City", "Atlanta United",
        ],
    },
    LeagueSeed {
        name: "Brasileirão (BRA)",
        logo: "https://media.api-sports.io/football/leagues/71.png",
        country: "Brazil",
        teams: &[
            "Corinthians", "Flamengo", "Palmeiras", "Sao Paulo", "São Paulo", "Botafogo",
            "Gremio", "Grêmio", "Cruzeiro", "Fluminense", "Internacional",
        ],
    },
    LeagueSeed {
        name: "Serie A",
        logo: "https://media.api-sports.io/football/leagues/135.png",
        country: "Italy",
        teams: &[
            "Juventus", "Inter Milan", "Internazionale", "Inter", "AC Milan", "Napoli", "AS Roma",
            "Roma", "Lazio", "Atalanta", "Fiorentina", "Bologna", "Torino", "Genoa", "Como",
            "Parma", "Cremonese", "Udinese", "Sassuolo", "Lecce", "Hellas Verona", "Pisa",
            "Cagliari",
        ],
    },
    LeagueSeed {
        name: "Bundesliga",
        logo: "https://media.api-sports.io/football/leagues/78.png",
        country: "Germany",
        teams: &[
            "Bayern", "Bayern Munich", "Bayern München", "Dortmund", "Borussia Dortmund",
            "Leverkusen", "Bayer Leverkusen", "RB Leipzig", "Stuttgart", "VfB Stuttgart",
            "Eintracht Frankfurt", "Wolfsburg", "Mönchengladbach", "Monchengladbach",
            "M'gladbach", "Freiburg", "Mainz", "Augsburg", "Cologne", "FC Köln", "Hoffenheim",
            "St. Pauli", "Heidenheim", "Werder Bremen", "Hamburger SV", "Hamburg SV",
            "Union Berlin",
        ],
    },
    LeagueSeed {
        name: "Scottish Premiership",
        logo: "https://media.api-sports.io/football/leagues/179.png",
        country: "Scotland",
        teams: &[
            "Celtic", "Rangers", "Aberdeen", "Hearts", "Heart of Midlothian", "Hibernian",
            "Motherwell", "Dundee United",
        ],
    },
    LeagueSeed {
        name: "Ligue 1",
        logo: "https://media.api-sports.io/football/leagues/61.png",
        country: "France",
        teams: &[
            "PSG", "Paris Saint-Germain", "Paris Saint Germain", "Marseille", "Lyon",
            "Monaco", "Lille", "Lens", "Rennes", "Stade Rennais", "OGC Nice", "Nice",
            "Strasbourg", "Brest", "Nantes", "Toulouse", "Angers", "Auxerre", "Lorient",
            "Le Havre", "Metz", "Paris FC",
        ],
    },
    LeagueSeed {
        name: "Liga Profesional (ARG)",
        logo: "https://media.api-sports.io/football/leagues/128.png",
        country: "Argentina",
        teams: &[
            "Velez Sarsfield", "River Plate", "San Lorenzo", "Estudiantes", "Aldosivi",
            "Boca Juniors", "Racing Club", "Independiente",
        ],
    },
    LeagueSeed {
        name: "Liga MX (MEX)",
        logo: "https://media.api-sports.io/football/leagues/262.png",
        country: "Mexico",
        teams: &[
            "Pumas", "Monterrey", "Club America", "Club América", "Cruz Azul", "Chivas",
            "FC Juarez", "Queretaro", "Toluca", "Pachuca", "Tigres",
        ],
    },
    LeagueSeed {
        name: "Liga Portugal",
        logo: "https://media.api-sports.io/football/leagues/94.png",
        country: "Portugal",
        teams: &[
            "FC Porto", "Benfica", "Sporting CP", "Sporting Lisbon", "Braga", "Famalicao",
            "Casa Pia", "Rio Ave", "Vitoria Guimaraes", "Vitória",
        ],
    },
    LeagueSeed {
        name: "Saudi Pro League",
        logo: "https://media.api-sports.io/football/leagues/307.png",
        country: "Saudi Arabia",
        teams: &[
            "Al Nassr", "Al-Nassr", "Al Hilal", "Al-Hilal", "Al Ittihad", "Al-Ittihad",
            "Al Ahli", "Al-Ahli", "Al Shabab", "Al-Shabab", "Al Ettifaq", "Al-Ettifaq",
            "Al Qadsiah", "Al-Qadisiyah", "Damac", "Al Fateh", "Al-Fateh", "Al Riyadh",
            "Al-Riyadh", "Al Okhdood", "Al-Okhdood",
        ],
    },
    LeagueSeed {
        name: "Super Lig (TUR)",
        logo: "https://media.api-sports.io/football/leagues/203.png",
        country: "Turkey",
        teams: &[
            "Fenerbahce", "Fenerbahçe", "Galatasaray", "Besiktas", "Beşiktaş", "Trabzonspor",
            "Kasimpasa", "Kasımpaşa", "Samsunspor",
        ],
    },
    LeagueSeed {
        name: "Eredivisie (NED)",
        logo: "https://media.api-sports.io/football/leagues/88.png",
        country: "Netherlands",
        teams: &[
            "Ajax", "PSV", "Feyenoord", "AZ Alkmaar", "Twente", "FC Utrecht",
            "Go Ahead Eagles",
        ],
    },
];

static CONTINENTAL_2025_26: &[CupSeed] = &[
    CupSeed {
        name: "Champions League",
        logo: "https://media.api-sports.io/football/leagues/2.png",
        keywords: &["champions league", "ucl"],
        qualifiers: &[
            "Real Madrid", "Barcelona", "Atletico", "Atlético", "Athletic Club",
            "Athletic Bilbao", "Villarreal", "Liverpool", "Arsenal", "Man City",
            "Manchester City", "Chelsea", "Newcastle", "Tottenham", "Spurs", "Inter Milan",
            "Internazionale", "Napoli", "Juventus", "Atalanta", "Bayern", "Dortmund",
            "Leverkusen", "Eintracht Frankfurt", "PSG", "Paris Saint-Germain",
            "Paris Saint Germain", "Marseille", "Monaco", "Benfica", "Sporting CP",
            "Sporting Lisbon", "PSV", "Ajax", "Galatasaray", "Club Brugge",
            "Union Saint-Gilloise", "Olympiacos", "Slavia Prague", "Copenhagen", "Bodø/Glimt",
            "Bodo/Glimt", "Qarabag", "Qarabağ", "Pafos", "Kairat",
        ],
    },
    CupSeed {
        name: "Europa League",
        logo: "https://media.api-sports.io/football/leagues/3.png",
        keywords: &["europa league", "uel"],
        qualifiers: &[
            "AS Roma", "Roma", "Bologna", "Aston Villa", "Nottingham Forest", "Nott'm Forest",
            "Real Betis", "Betis", "Celta Vigo", "VfB Stuttgart", "Stuttgart", "Freiburg",
            "Lyon", "Lille", "OGC Nice", "FC Porto", "Braga", "Feyenoord", "Go Ahead Eagles",
            "FC Utrecht", "Fenerbahce", "Fenerbahçe", "Celtic", "Rangers", "Ferencvaros",
            "Ferencváros", "Red Star Belgrade", "Crvena Zvezda", "Dinamo Zagreb", "PAOK",
            "Panathinaikos", "Midtjylland", "Brann", "Young Boys", "Basel", "Salzburg",
            "Sturm Graz", "Malmo", "Malmö", "Genk", "Viktoria Plzen", "Viktoria Plzeň",
            "Ludogorets", "FCSB", "Maccabi Tel Aviv",
        ],
    },
    CupSeed {
        name: "Conference League",
        logo: "https://media.api-sports.io/football/leagues/848.png",
        keywords: &["conference league", "uecl"],
        qualifiers: &[
            "Crystal Palace", "Fiorentina", "Rayo Vallecano", "Mainz", "Strasbourg",
            "AZ Alkmaar", "Shakhtar Donetsk", "Legia Warsaw", "Lech Poznan", "Lech Poznań",
            "Jagiellonia", "Rakow", "Raków", "Rapid Wien", "Rapid Vienna", "Sparta Prague",
            "Sigma Olomouc", "AEK Athens", "AEK Larnaca", "Omonia", "Celje", "Breidablik",
            "Breiðablik", "Shelbourne", "Hamrun Spartans", "Drita", "KuPS", "Lincoln Red Imps",
            "Aberdeen", "Häcken", "Hacken", "Noah", "Universitatea Craiova", "Rijeka",
            "Zrinjski", "Slovan Bratislava", "Samsunspor", "Dynamo Kyiv", "Lausanne",
            "Shamrock Rovers",
        ],
    },
];
