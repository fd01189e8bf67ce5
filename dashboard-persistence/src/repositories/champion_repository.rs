use std::sync::Arc;

use crate::store::DocumentStore;
use dashboard_types::{
    ids, split_champion_names, Champion, ChampionClass, ChampionNameSeparators, ChampionUpdate,
    DashboardError, Document, NewChampion, StarRating,
};

/// The alliance-wide champion roster, held in the admin account's data bag.
pub struct ChampionRepository {
    store: Arc<DocumentStore>,
}

fn roster_mut(doc: &mut Document) -> Result<&mut Vec<Champion>, DashboardError> {
    doc.admin_mut()
        .map(|admin| &mut admin.data.champions)
        .ok_or(DashboardError::AdminUserNotFound)
}

fn clean_name(name: &str) -> Result<String, DashboardError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(DashboardError::invalid_input("champion name must not be empty"));
    }
    Ok(name.to_string())
}

fn check_ranks(star_rating: StarRating, ranks: &[u8]) -> Result<(), DashboardError> {
    if star_rating.permits_ranks(ranks) {
        Ok(())
    } else {
        Err(DashboardError::invalid_input(format!(
            "ranks {:?} are not valid for a {}-star champion (allowed: {:?})",
            ranks,
            u8::from(star_rating),
            star_rating.allowed_ranks()
        )))
    }
}

fn clean_image(image_url: Option<String>) -> Option<String> {
    image_url.filter(|url| !url.trim().is_empty())
}

fn drop_bans_for(doc: &mut Document, champion_ids: &[String]) {
    for bans in [
        &mut doc.war_map.champion_bans.challenger,
        &mut doc.war_map.champion_bans.expert,
        &mut doc.war_map.champion_bans.elite,
    ] {
        bans.retain(|ban| !champion_ids.contains(&ban.champion_id));
    }
}

impl ChampionRepository {
    pub fn new(store: Arc<DocumentStore>) -> Self {
        Self { store }
    }

    pub async fn list_champions(&self) -> Result<Vec<Champion>, DashboardError> {
        self.store
            .read(|doc| doc.admin().map(|admin| admin.data.champions.clone()))
            .await?
            .ok_or(DashboardError::AdminUserNotFound)
    }

    pub async fn add_champion(&self, spec: NewChampion) -> Result<Champion, DashboardError> {
        let ranks = match spec.ranks {
            Some(ranks) => {
                check_ranks(spec.star_rating, &ranks)?;
                ranks
            }
            None => spec.star_rating.default_ranks(),
        };
        let champion = Champion {
            id: ids::new_id(ids::CHAMPION_PREFIX),
            name: clean_name(&spec.name)?,
            class: spec.class,
            star_rating: spec.star_rating,
            ranks,
            image_url: clean_image(spec.image_url),
        };

        self.store
            .update(|doc| {
                roster_mut(doc)?.push(champion.clone());
                Ok(())
            })
            .await?;

        tracing::debug!("Added champion {} ({})", champion.name, champion.id);
        Ok(champion)
    }

    /// Adds one champion per non-blank name, all sharing class and star rating.
    pub async fn add_champions_bulk(
        &self,
        names: &[String],
        class: ChampionClass,
        star_rating: StarRating,
    ) -> Result<Vec<Champion>, DashboardError> {
        let champions: Vec<Champion> = names
            .iter()
            .map(|name| name.trim())
            .filter(|name| !name.is_empty())
            .map(|name| Champion {
                id: ids::new_id(ids::CHAMPION_PREFIX),
                name: name.to_string(),
                class,
                star_rating,
                ranks: star_rating.default_ranks(),
                image_url: None,
            })
            .collect();

        if champions.is_empty() {
            return Err(DashboardError::invalid_input(
                "enter at least one champion name",
            ));
        }

        self.store
            .update(|doc| {
                roster_mut(doc)?.extend(champions.iter().cloned());
                Ok(())
            })
            .await?;

        tracing::info!("Imported {} champions", champions.len());
        Ok(champions)
    }

    /// Splits `text` into names and adds them with [`Self::add_champions_bulk`].
    pub async fn add_champions_from_text(
        &self,
        text: &str,
        separators: ChampionNameSeparators,
        class: ChampionClass,
        star_rating: StarRating,
    ) -> Result<Vec<Champion>, DashboardError> {
        let names = split_champion_names(text, separators);
        self.add_champions_bulk(&names, class, star_rating).await
    }

    /// Removes a champion and any bans on it. Unknown ids are ignored.
    pub async fn delete_champion(&self, champion_id: &str) -> Result<(), DashboardError> {
        self.store
            .update(|doc| {
                roster_mut(doc)?.retain(|c| c.id != champion_id);
                drop_bans_for(doc, &[champion_id.to_string()]);
                Ok(())
            })
            .await
    }

    /// Empties the roster. Returns how many champions were removed.
    pub async fn delete_all_champions(&self) -> Result<usize, DashboardError> {
        let removed = self
            .store
            .update(|doc| {
                let removed: Vec<String> =
                    roster_mut(doc)?.drain(..).map(|c| c.id).collect();
                drop_bans_for(doc, &removed);
                Ok(removed.len())
            })
            .await?;

        tracing::info!("Deleted all {} champions", removed);
        Ok(removed)
    }

    /// Merges `updates` into an existing champion.
    ///
    /// Changing the star rating without new ranks resets ranks to the new default.
    pub async fn update_champion(
        &self,
        champion_id: &str,
        updates: ChampionUpdate,
    ) -> Result<Champion, DashboardError> {
        let name = updates.name.as_deref().map(clean_name).transpose()?;

        self.store
            .update(|doc| {
                let champion = roster_mut(doc)?
                    .iter_mut()
                    .find(|c| c.id == champion_id)
                    .ok_or_else(|| DashboardError::ChampionNotFound {
                        champion_id: champion_id.to_string(),
                    })?;

                let mut updated = champion.clone();
                if let Some(name) = name {
                    updated.name = name;
                }
                if let Some(class) = updates.class {
                    updated.class = class;
                }
                if let Some(star_rating) = updates.star_rating {
                    if star_rating != updated.star_rating && updates.ranks.is_none() {
                        updated.ranks = star_rating.default_ranks();
                    }
                    updated.star_rating = star_rating;
                }
                if let Some(ranks) = updates.ranks {
                    check_ranks(updated.star_rating, &ranks)?;
                    updated.ranks = ranks;
                }
                if let Some(image_url) = updates.image_url {
                    updated.image_url = clean_image(Some(image_url));
                }

                *champion = updated.clone();
                Ok(updated)
            })
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::connection::connect_to_memory_store;
    use crate::repositories::WarMapRepository;
    use dashboard_types::MapDifficulty;

    async fn setup_test_store() -> Arc<DocumentStore> {
        Arc::new(connect_to_memory_store().await.unwrap())
    }

    #[tokio::test]
    async fn test_add_champion_defaults_ranks() {
        let repo = ChampionRepository::new(setup_test_store().await);

        let six = repo
            .add_champion(NewChampion::new("Thor", ChampionClass::Cosmic, StarRating::Six))
            .await
            .unwrap();
        assert_eq!(six.ranks, vec![4, 5, 6]);
        assert!(six.id.starts_with("CHAMP_"));

        let seven = repo
            .add_champion(NewChampion::new("Hulk", ChampionClass::Science, StarRating::Seven))
            .await
            .unwrap();
        assert_eq!(seven.ranks, vec![1, 2, 3]);

        assert_eq!(repo.list_champions().await.unwrap(), vec![six, seven]);
    }

    #[tokio::test]
    async fn test_add_champion_validates_input() {
        let repo = ChampionRepository::new(setup_test_store().await);

        let mut spec = NewChampion::new("Storm", ChampionClass::Mutant, StarRating::Seven);
        spec.ranks = Some(vec![5]);
        let err = repo.add_champion(spec).await.unwrap_err();
        assert!(matches!(err, DashboardError::InvalidInput { .. }));

        let mut spec = NewChampion::new("Wolverine", ChampionClass::Mutant, StarRating::Six);
        spec.ranks = Some(vec![4, 4, 4, 4]);
        let err = repo.add_champion(spec).await.unwrap_err();
        assert!(matches!(err, DashboardError::InvalidInput { .. }));

        let err = repo
            .add_champion(NewChampion::new("   ", ChampionClass::Mutant, StarRating::Six))
            .await
            .unwrap_err();
        assert!(matches!(err, DashboardError::InvalidInput { .. }));
        assert!(repo.list_champions().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_update_champion_rejects_repeated_ranks() {
        let repo = ChampionRepository::new(setup_test_store().await);
        let thor = repo
            .add_champion(NewChampion::new("Thor", ChampionClass::Cosmic, StarRating::Six))
            .await
            .unwrap();

        let err = repo
            .update_champion(
                &thor.id,
                ChampionUpdate {
                    ranks: Some(vec![5, 5]),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, DashboardError::InvalidInput { .. }));
        assert_eq!(repo.list_champions().await.unwrap(), vec![thor]);
    }

    #[tokio::test]
    async fn test_bulk_add_from_text() {
        let repo = ChampionRepository::new(setup_test_store().await);

        let added = repo
            .add_champions_from_text(
                "Thor, Hulk., Iron Man",
                ChampionNameSeparators::CommasAndPeriods,
                ChampionClass::Tech,
                StarRating::Six,
            )
            .await
            .unwrap();

        let names: Vec<&str> = added.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Thor", "Hulk", "Iron Man"]);
        assert!(added.iter().all(|c| c.ranks == vec![4, 5, 6]));
        assert!(added.iter().all(|c| c.class == ChampionClass::Tech));
        assert_eq!(repo.list_champions().await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_bulk_add_rejects_blank_input() {
        let repo = ChampionRepository::new(setup_test_store().await);
        let err = repo
            .add_champions_bulk(
                &[" ".to_string(), String::new()],
                ChampionClass::Skill,
                StarRating::Six,
            )
            .await
            .unwrap_err();
        assert!(matches!(err, DashboardError::InvalidInput { .. }));
    }

    #[tokio::test]
    async fn test_update_champion_merges_fields() {
        let repo = ChampionRepository::new(setup_test_store().await);
        let thor = repo
            .add_champion(NewChampion::new("Thor", ChampionClass::Cosmic, StarRating::Six))
            .await
            .unwrap();

        let updated = repo
            .update_champion(
                &thor.id,
                ChampionUpdate {
                    star_rating: Some(StarRating::Seven),
                    image_url: Some("https://img/thor.png".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.name, "Thor");
        assert_eq!(updated.star_rating, StarRating::Seven);
        assert_eq!(updated.ranks, vec![1, 2, 3]);
        assert_eq!(updated.image_url.as_deref(), Some("https://img/thor.png"));

        let cleared = repo
            .update_champion(
                &thor.id,
                ChampionUpdate {
                    ranks: Some(vec![2]),
                    image_url: Some(String::new()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(cleared.ranks, vec![2]);
        assert!(cleared.image_url.is_none());

        let err = repo
            .update_champion("CHAMP_missing", ChampionUpdate::default())
            .await
            .unwrap_err();
        assert!(matches!(err, DashboardError::ChampionNotFound { .. }));
    }

    #[tokio::test]
    async fn test_delete_champions_drops_their_bans() {
        let store = setup_test_store().await;
        let repo = ChampionRepository::new(store.clone());
        let war_map = WarMapRepository::new(store.clone());

        let thor = repo
            .add_champion(NewChampion::new("Thor", ChampionClass::Cosmic, StarRating::Six))
            .await
            .unwrap();
        let hulk = repo
            .add_champion(NewChampion::new("Hulk", ChampionClass::Science, StarRating::Six))
            .await
            .unwrap();
        war_map
            .add_champion_ban(MapDifficulty::Expert, &thor.id)
            .await
            .unwrap();
        war_map
            .add_champion_ban(MapDifficulty::Elite, &hulk.id)
            .await
            .unwrap();

        repo.delete_champion(&thor.id).await.unwrap();
        let map = war_map.get_war_map().await.unwrap();
        assert!(map.champion_bans.expert.is_empty());
        assert_eq!(map.champion_bans.elite.len(), 1);

        assert_eq!(repo.delete_all_champions().await.unwrap(), 1);
        assert!(repo.list_champions().await.unwrap().is_empty());
        assert!(war_map.get_war_map().await.unwrap().champion_bans.elite.is_empty());
    }

    #[tokio::test]
    async fn test_missing_admin_is_reported() {
        let store = setup_test_store().await;
        let mut document = store.load().await.unwrap();
        document.users.clear();
        store.save(document).await.unwrap();

        let repo = ChampionRepository::new(store);
        assert_eq!(
            repo.list_champions().await.unwrap_err(),
            DashboardError::AdminUserNotFound
        );
        let err = repo
            .add_champion(NewChampion::new("Thor", ChampionClass::Cosmic, StarRating::Six))
            .await
            .unwrap_err();
        assert_eq!(err, DashboardError::AdminUserNotFound);
    }
}
