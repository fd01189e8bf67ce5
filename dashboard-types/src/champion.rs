use serde::{Deserialize, Serialize};
use ts_rs::TS;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum ChampionClass {
    Cosmic,
    Tech,
    Science,
    Mystic,
    Mutant,
    Skill,
}

/// Star tier of a champion. Serialized as the bare number (6 or 7).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum StarRating {
    Six,
    Seven,
}

impl StarRating {
    /// Ranks a champion of this tier may hold.
    pub fn allowed_ranks(self) -> &'static [u8] {
        match self {
            StarRating::Six => &[4, 5, 6],
            StarRating::Seven => &[1, 2, 3],
        }
    }

    pub fn default_ranks(self) -> Vec<u8> {
        self.allowed_ranks().to_vec()
    }

    /// True when `ranks` is a set drawn from [`Self::allowed_ranks`]: every
    /// rank allowed, none repeated.
    pub fn permits_ranks(self, ranks: &[u8]) -> bool {
        let allowed = self.allowed_ranks();
        ranks
            .iter()
            .enumerate()
            .all(|(i, rank)| allowed.contains(rank) && !ranks[..i].contains(rank))
    }
}

impl TryFrom<u8> for StarRating {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            6 => Ok(StarRating::Six),
            7 => Ok(StarRating::Seven),
            other => Err(format!("unsupported star rating {other}")),
        }
    }
}

impl From<StarRating> for u8 {
    fn from(rating: StarRating) -> Self {
        match rating {
            StarRating::Six => 6,
            StarRating::Seven => 7,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Champion {
    pub id: String,
    pub name: String,
    pub class: ChampionClass,
    #[ts(type = "6 | 7")]
    pub star_rating: StarRating,
    pub ranks: Vec<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub image_url: Option<String>,
}

/// Input for a single champion addition. Ranks fall back to the tier default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct NewChampion {
    pub name: String,
    pub class: ChampionClass,
    #[ts(type = "6 | 7")]
    pub star_rating: StarRating,
    #[serde(default)]
    #[ts(optional)]
    pub ranks: Option<Vec<u8>>,
    #[serde(default)]
    #[ts(optional)]
    pub image_url: Option<String>,
}

impl NewChampion {
    pub fn new(name: impl Into<String>, class: ChampionClass, star_rating: StarRating) -> Self {
        Self {
            name: name.into(),
            class,
            star_rating,
            ranks: None,
            image_url: None,
        }
    }
}

/// Partial update merged over an existing champion. `None` leaves a field alone;
/// an empty `image_url` clears the image.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ChampionUpdate {
    #[ts(optional)]
    pub name: Option<String>,
    #[ts(optional)]
    pub class: Option<ChampionClass>,
    #[ts(optional, type = "6 | 7")]
    pub star_rating: Option<StarRating>,
    #[ts(optional)]
    pub ranks: Option<Vec<u8>>,
    #[ts(optional)]
    pub image_url: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChampionNameSeparators {
    /// The import dialog: comma separated.
    Commas,
    /// The add dialog also accepts periods.
    CommasAndPeriods,
}

/// Splits free text into champion names, trimming each and dropping blanks.
pub fn split_champion_names(text: &str, separators: ChampionNameSeparators) -> Vec<String> {
    text.split(|c: char| match separators {
        ChampionNameSeparators::Commas => c == ',',
        ChampionNameSeparators::CommasAndPeriods => c == ',' || c == '.',
    })
    .map(str::trim)
    .filter(|name| !name.is_empty())
    .map(str::to_string)
    .collect()
}
