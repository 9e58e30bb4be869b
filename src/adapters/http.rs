use crate::domain::model::{Ad, AdFilter, AdId, UserId};
use crate::domain::ports::AdCatalog;
use crate::utils::error::{ExchangeError, Result};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};

/// Read-only ad catalog backed by a remote JSON service.
///
/// `GET {base}/ads/{id}` answers one ad, `GET {base}/ads` a filtered listing.
pub struct HttpAdCatalog {
    base_url: String,
    client: Client,
}

impl HttpAdCatalog {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            base_url,
            client: Client::new(),
        }
    }

    pub fn with_timeout(base_url: impl Into<String>, timeout: std::time::Duration) -> Result<Self> {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { base_url, client })
    }

    async fn fetch_listing(&self, query: &[(&str, String)]) -> Result<Vec<Ad>> {
        let url = format!("{}/ads", self.base_url);
        tracing::debug!("catalog request: GET {} {:?}", url, query);

        let response = self.client.get(&url).query(query).send().await?;
        if !response.status().is_success() {
            return Err(ExchangeError::Unavailable {
                message: format!("catalog answered {} for ad listing", response.status()),
            });
        }

        let ads: Vec<Ad> = response.json().await?;
        Ok(ads)
    }
}

#[async_trait]
impl AdCatalog for HttpAdCatalog {
    async fn ad_by_id(&self, id: AdId) -> Result<Option<Ad>> {
        let url = format!("{}/ads/{}", self.base_url, id);
        tracing::debug!("catalog request: GET {}", url);

        let response = self.client.get(&url).send().await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !response.status().is_success() {
            return Err(ExchangeError::Unavailable {
                message: format!("catalog answered {} for ad {}", response.status(), id),
            });
        }

        let ad: Ad = response.json().await?;
        Ok(Some(ad))
    }

    async fn ads_by_owner(&self, owner: UserId) -> Result<Vec<Ad>> {
        self.fetch_listing(&[("owner", owner.to_string())]).await
    }

    async fn browse(&self, filter: &AdFilter) -> Result<Vec<Ad>> {
        let mut query = Vec::new();
        if let Some(category) = filter.category {
            query.push(("category", category.as_str().to_string()));
        }
        if let Some(condition) = filter.condition {
            query.push(("condition", condition.as_str().to_string()));
        }
        if let Some(search) = &filter.search {
            query.push(("search", search.clone()));
        }
        self.fetch_listing(&query).await
    }
}
