use dashboard_types::{Champion, ChampionBan, ChampionClass, StarRating};

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ChampionFilter {
    pub class: Option<ChampionClass>,
    pub star_rating: Option<StarRating>,
}

impl ChampionFilter {
    pub fn matches(&self, champion: &Champion) -> bool {
        self.class.is_none_or(|class| champion.class == class)
            && self
                .star_rating
                .is_none_or(|rating| champion.star_rating == rating)
    }
}

#[derive(Debug)]
pub struct FilteredChampions<'a> {
    pub shown: Vec<&'a Champion>,
    pub total: usize,
}

pub fn filter_champions<'a>(
    champions: &'a [Champion],
    filter: &ChampionFilter,
) -> FilteredChampions<'a> {
    FilteredChampions {
        shown: champions.iter().filter(|c| filter.matches(c)).collect(),
        total: champions.len(),
    }
}

/// Roster champions that can still be banned, narrowed by a case-insensitive
/// name search. `bans` is the ban list of one difficulty.
pub fn ban_candidates<'a>(
    champions: &'a [Champion],
    bans: &[ChampionBan],
    search: &str,
) -> Vec<&'a Champion> {
    let search = search.trim().to_lowercase();
    champions
        .iter()
        .filter(|c| !bans.iter().any(|b| b.champion_id == c.id))
        .filter(|c| search.is_empty() || c.name.to_lowercase().contains(&search))
        .collect()
}
