use crate::domain::model::{Ad, AdDraft, AdFilter, AdId, UserId};
use crate::domain::ports::AdRepository;
use crate::utils::error::{ExchangeError, Result};
use crate::utils::validation;

/// Owner-enforced CRUD over the ad catalog.
///
/// Unlike the proposal path, catalog mutations answer `Forbidden` openly: an ad
/// is public, so there is no existence to hide.
pub struct AdService<R: AdRepository> {
    repo: R,
}

impl<R: AdRepository> AdService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    pub async fn post_ad(&self, acting: UserId, draft: AdDraft) -> Result<Ad> {
        validate_draft(&draft)?;
        let ad = self.repo.insert_ad(acting, draft).await?;
        tracing::info!("ad {} posted by user {}", ad.id, acting);
        Ok(ad)
    }

    pub async fn edit_ad(&self, acting: UserId, id: AdId, draft: AdDraft) -> Result<Ad> {
        validate_draft(&draft)?;
        let current = self
            .repo
            .ad_by_id(id)
            .await?
            .ok_or(ExchangeError::AdNotFound { id })?;
        if current.owner != acting {
            return Err(ExchangeError::Forbidden);
        }
        let ad = self.repo.replace_ad(id, draft).await?;
        tracing::info!("ad {} updated by user {}", id, acting);
        Ok(ad)
    }

    pub async fn remove_ad(&self, acting: UserId, id: AdId) -> Result<()> {
        let current = self
            .repo
            .ad_by_id(id)
            .await?
            .ok_or(ExchangeError::AdNotFound { id })?;
        if current.owner != acting {
            return Err(ExchangeError::Forbidden);
        }
        self.repo.delete_ad(id).await?;
        tracing::info!("ad {} removed by user {}", id, acting);
        Ok(())
    }

    pub async fn browse(&self, filter: &AdFilter) -> Result<Vec<Ad>> {
        self.repo.browse(filter).await
    }

    pub async fn my_ads(&self, acting: UserId) -> Result<Vec<Ad>> {
        self.repo.ads_by_owner(acting).await
    }
}

fn validate_draft(draft: &AdDraft) -> Result<()> {
    validation::validate_non_empty_string("title", &draft.title)?;
    validation::validate_max_length("title", &draft.title, 200)?;
    if let Some(url) = &draft.image_url {
        validation::validate_url("image_url", url)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::MemoryCatalog;
    use crate::domain::model::{Category, Condition};

    fn draft(title: &str) -> AdDraft {
        AdDraft {
            title: title.to_string(),
            description: "desc".to_string(),
            category: Category::Electronics,
            condition: Condition::New,
            image_url: None,
        }
    }

    fn service() -> AdService<MemoryCatalog> {
        AdService::new(MemoryCatalog::new())
    }

    #[tokio::test]
    async fn test_post_ad_binds_owner_to_acting_user() {
        let service = service();
        let ad = service.post_ad(UserId(7), draft("Lamp")).await.unwrap();
        assert_eq!(ad.owner, UserId(7));
        assert_eq!(service.my_ads(UserId(7)).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_post_ad_rejects_blank_title_and_bad_image_url() {
        let service = service();

        let blank = service.post_ad(UserId(1), draft("  ")).await;
        assert!(matches!(
            blank,
            Err(ExchangeError::InvalidConfigValueError { .. })
        ));

        let mut bad_url = draft("Lamp");
        bad_url.image_url = Some("ftp://example.com/lamp.png".to_string());
        let result = service.post_ad(UserId(1), bad_url).await;
        assert!(matches!(
            result,
            Err(ExchangeError::InvalidConfigValueError { .. })
        ));
    }

    #[tokio::test]
    async fn test_edit_ad_requires_ownership() {
        let service = service();
        let ad = service.post_ad(UserId(1), draft("Lamp")).await.unwrap();

        let result = service.edit_ad(UserId(2), ad.id, draft("Hacked")).await;
        assert!(matches!(result, Err(ExchangeError::Forbidden)));

        let updated = service
            .edit_ad(UserId(1), ad.id, draft("Desk lamp"))
            .await
            .unwrap();
        assert_eq!(updated.title, "Desk lamp");
        assert_eq!(updated.owner, UserId(1));
    }

    #[tokio::test]
    async fn test_remove_ad_requires_ownership_and_existence() {
        let service = service();
        let ad = service.post_ad(UserId(1), draft("Lamp")).await.unwrap();

        let foreign = service.remove_ad(UserId(2), ad.id).await;
        assert!(matches!(foreign, Err(ExchangeError::Forbidden)));

        service.remove_ad(UserId(1), ad.id).await.unwrap();

        let missing = service.remove_ad(UserId(1), ad.id).await;
        assert!(matches!(missing, Err(ExchangeError::AdNotFound { .. })));
    }

    #[tokio::test]
    async fn test_browse_filters_by_category_condition_and_search() {
        let service = service();
        service.post_ad(UserId(1), draft("Reading lamp")).await.unwrap();

        let mut books = draft("Rust book");
        books.category = Category::Books;
        books.condition = Condition::Used;
        service.post_ad(UserId(2), books).await.unwrap();

        let by_category = service
            .browse(&AdFilter {
                category: Some(Category::Books),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(by_category.len(), 1);
        assert_eq!(by_category[0].title, "Rust book");

        let by_condition = service
            .browse(&AdFilter {
                condition: Some(Condition::New),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(by_condition.len(), 1);

        let by_search = service
            .browse(&AdFilter {
                search: Some("LAMP".to_string()),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(by_search.len(), 1);
        assert_eq!(by_search[0].title, "Reading lamp");
    }
}
