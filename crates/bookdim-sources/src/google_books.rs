//! Google Books enrichment.
//!
//! Each scraped book is looked up in the volumes API by ISBN-13, then
//! ISBN-10, then title and author. The first item of the first non-empty
//! response becomes the Google Books record; books with no hit are left out.

use std::thread;
use std::time::Duration;

use reqwest::Url;
use serde::Deserialize;
use tracing::{debug, info, warn};

use bookdim_model::{GoodreadsRecord, GoogleBooksRecord};

use crate::error::{Result, SourceError};
use crate::http::PageFetcher;

pub const VOLUMES_URL: &str = "https://www.googleapis.com/books/v1/volumes";

/// Languages the API is asked to restrict results to.
const LANG_RESTRICT: &str = "es,en";

// ============================================================================
// API types
// ============================================================================

/// Volumes search response.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VolumesResponse {
    #[serde(default)]
    pub total_items: u64,
    #[serde(default)]
    pub items: Vec<Volume>,
}

impl VolumesResponse {
    /// First item when the response reports any hits.
    pub fn first_hit(&self) -> Option<&Volume> {
        if self.total_items == 0 {
            return None;
        }
        self.items.first()
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Volume {
    pub id: Option<String>,
    #[serde(default)]
    pub volume_info: VolumeInfo,
    #[serde(default)]
    pub sale_info: SaleInfo,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VolumeInfo {
    pub title: Option<String>,
    pub subtitle: Option<String>,
    #[serde(default)]
    pub authors: Vec<String>,
    pub publisher: Option<String>,
    pub published_date: Option<String>,
    pub language: Option<String>,
    #[serde(default)]
    pub categories: Vec<String>,
    #[serde(default)]
    pub industry_identifiers: Vec<IndustryIdentifier>,
}

impl VolumeInfo {
    fn identifier(&self, kind: &str) -> Option<String> {
        self.industry_identifiers
            .iter()
            .find(|id| id.kind.as_deref() == Some(kind))
            .and_then(|id| id.identifier.clone())
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct IndustryIdentifier {
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub identifier: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaleInfo {
    pub list_price: Option<ListPrice>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListPrice {
    pub amount: Option<f64>,
    pub currency_code: Option<String>,
}

// ============================================================================
// Lookup
// ============================================================================

/// A volumes search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VolumeQuery {
    Isbn(String),
    TitleAuthor { title: String, author: String },
}

impl VolumeQuery {
    /// Value of the `q` parameter.
    pub fn to_q(&self) -> String {
        match self {
            Self::Isbn(isbn) => format!("isbn:{isbn}"),
            Self::TitleAuthor { title, author } => format!("intitle:{title}+inauthor:{author}"),
        }
    }

    /// Queries to try for a scraped book, most specific first.
    ///
    /// The title/author query needs both parts.
    pub fn candidates(record: &GoodreadsRecord) -> Vec<Self> {
        let present = |value: &Option<String>| {
            value
                .as_deref()
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map(str::to_string)
        };
        let mut queries: Vec<Self> = [&record.isbn13, &record.isbn10]
            .into_iter()
            .filter_map(present)
            .map(Self::Isbn)
            .collect();
        if let (Some(title), Some(author)) = (present(&record.title), present(&record.author)) {
            queries.push(Self::TitleAuthor { title, author });
        }
        queries
    }
}

/// Source of volumes search responses.
pub trait VolumeLookup {
    /// `None` when the search could not be performed.
    fn lookup(&self, query: &VolumeQuery) -> Option<VolumesResponse>;
}

/// Volumes API client.
pub struct GoogleBooksClient<F> {
    fetcher: F,
    api_key: String,
    volumes_url: String,
    /// Pause after each request.
    delay: Duration,
}

impl<F: PageFetcher> GoogleBooksClient<F> {
    pub fn new(fetcher: F, api_key: impl Into<String>) -> Self {
        Self {
            fetcher,
            api_key: api_key.into(),
            volumes_url: VOLUMES_URL.to_string(),
            delay: Duration::from_millis(500),
        }
    }

    pub fn with_volumes_url(mut self, url: impl Into<String>) -> Self {
        self.volumes_url = url.into();
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Request URL for a query, with `q`, `key` and `langRestrict` encoded.
    pub fn request_url(&self, query: &VolumeQuery) -> Result<Url> {
        Url::parse_with_params(
            &self.volumes_url,
            [
                ("q", query.to_q().as_str()),
                ("key", self.api_key.as_str()),
                ("langRestrict", LANG_RESTRICT),
            ],
        )
        .map_err(|error| SourceError::InvalidUrl {
            url: self.volumes_url.clone(),
            message: error.to_string(),
        })
    }

    fn search(&self, query: &VolumeQuery) -> Result<VolumesResponse> {
        let url = self.request_url(query)?;
        let body = self.fetcher.fetch_text(url.as_str())?;
        serde_json::from_str(&body).map_err(|source| SourceError::Decode {
            url: self.volumes_url.clone(),
            source,
        })
    }
}

impl<F: PageFetcher> VolumeLookup for GoogleBooksClient<F> {
    fn lookup(&self, query: &VolumeQuery) -> Option<VolumesResponse> {
        let response = self.search(query);
        if !self.delay.is_zero() {
            thread::sleep(self.delay);
        }
        match response {
            Ok(response) => Some(response),
            Err(error) => {
                warn!(q = %query.to_q(), error = %error, "volume search failed");
                None
            }
        }
    }
}

// ============================================================================
// Enrichment
// ============================================================================

/// Flatten a volume into a landing zone record.
pub fn extract_volume(volume: &Volume) -> GoogleBooksRecord {
    let info = &volume.volume_info;
    let price = volume.sale_info.list_price.as_ref();
    GoogleBooksRecord {
        gb_id: volume.id.clone(),
        title: info.title.clone(),
        subtitle: info.subtitle.clone(),
        authors: join_list(&info.authors),
        publisher: info.publisher.clone(),
        pub_date: info.published_date.clone(),
        language: info.language.clone(),
        categories: join_list(&info.categories),
        isbn13: info.identifier("ISBN_13"),
        isbn10: info.identifier("ISBN_10"),
        price_amount: price.and_then(|p| p.amount),
        price_currency: price.and_then(|p| p.currency_code.clone()),
    }
}

fn join_list(values: &[String]) -> Option<String> {
    (!values.is_empty()).then(|| values.join(", "))
}

/// Look every scraped book up and collect the matches, in input order.
pub fn enrich(lookup: &impl VolumeLookup, records: &[GoodreadsRecord]) -> Vec<GoogleBooksRecord> {
    let mut enriched = Vec::with_capacity(records.len());
    for record in records {
        let title = record.title.as_deref().unwrap_or_default();
        let hit = VolumeQuery::candidates(record).into_iter().find_map(|query| {
            let response = lookup.lookup(&query)?;
            let volume = response.first_hit()?;
            debug!(title, q = %query.to_q(), "volume found");
            Some(extract_volume(volume))
        });
        match hit {
            Some(volume) => enriched.push(volume),
            None => info!(title, "no Google Books match"),
        }
    }
    info!(
        books = records.len(),
        matched = enriched.len(),
        "enrichment finished"
    );
    enriched
}
