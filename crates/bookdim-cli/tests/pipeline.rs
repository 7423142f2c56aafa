//! Stage-by-stage pipeline tests without network access.

use std::time::Duration;

use chrono::{TimeZone, Utc};

use bookdim_cli::pipeline::{
    baseline_quality, enrich_google_books, ingest, integrate, output, pipeline_quality,
    scrape_goodreads,
};
use bookdim_ingest::{GOODREADS_FILE, GOOGLE_BOOKS_FILE};
use bookdim_model::ScrapeConfig;
use bookdim_output::OutputLayout;
use bookdim_sources::{
    GoodreadsScraper, IndustryIdentifier, ListPrice, PageFetcher, Result, SaleInfo, SourceError,
    Volume, VolumeInfo, VolumeLookup, VolumeQuery, VolumesResponse,
};

const BASE: &str = "https://goodreads.test";

const SEARCH_PAGE: &str = r#"<table>
<tr itemscope itemtype="http://schema.org/Book"><td>
  <a class="bookTitle" href="/book/show/3735293-clean-code"><span>Clean Code</span></a>
  <a class="authorName" href="/author/show/45372"><span>Robert C. Martin</span></a>
  <span class="minirating">4.37 avg rating — 23,456 ratings</span>
</td></tr>
</table>"#;

const BOOK_PAGE: &str = "<html><body><div>ISBN: 0132350882</div></body></html>";

struct CannedSite;

impl PageFetcher for CannedSite {
    fn fetch_text(&self, url: &str) -> Result<String> {
        match url {
            "https://goodreads.test/search?q=clean+code&page=1" => Ok(SEARCH_PAGE.to_string()),
            "https://goodreads.test/book/show/3735293-clean-code" => Ok(BOOK_PAGE.to_string()),
            _ => Err(SourceError::Status {
                url: url.to_string(),
                status: 404,
            }),
        }
    }
}

/// Answers every ISBN query with the same volume.
struct OneVolume;

impl VolumeLookup for OneVolume {
    fn lookup(&self, query: &VolumeQuery) -> Option<VolumesResponse> {
        let VolumeQuery::Isbn(_) = query else {
            return None;
        };
        Some(VolumesResponse {
            total_items: 1,
            items: vec![Volume {
                id: Some("_i6bDeoCQzsC".to_string()),
                volume_info: VolumeInfo {
                    title: Some("Clean Code".to_string()),
                    authors: vec!["Robert C. Martin".to_string()],
                    publisher: Some("Pearson Education".to_string()),
                    published_date: Some("2008-08-01".to_string()),
                    language: Some("en".to_string()),
                    industry_identifiers: vec![IndustryIdentifier {
                        kind: Some("ISBN_13".to_string()),
                        identifier: Some("9780132350884".to_string()),
                    }],
                    ..VolumeInfo::default()
                },
                sale_info: SaleInfo {
                    list_price: Some(ListPrice {
                        amount: Some(35.99),
                        currency_code: Some("EUR".to_string()),
                    }),
                },
            }],
        })
    }
}

#[test]
fn stages_run_end_to_end() {
    let landing = tempfile::tempdir().unwrap();
    let out = tempfile::tempdir().unwrap();
    let scraper = GoodreadsScraper::new(CannedSite)
        .with_base_url(BASE)
        .with_delays(Duration::ZERO, Duration::ZERO);
    let config = ScrapeConfig::new("clean code", 3).unwrap();

    let scraped = scrape_goodreads(&scraper, &config, landing.path()).unwrap();
    assert_eq!(scraped.books, 1);
    assert_eq!(scraped.path, landing.path().join(GOODREADS_FILE));

    let enriched = enrich_google_books(&OneVolume, landing.path()).unwrap();
    assert_eq!(enriched.books, 1);
    assert_eq!(enriched.matched, 1);
    assert_eq!(enriched.path, landing.path().join(GOOGLE_BOOKS_FILE));

    let sources = ingest(landing.path()).unwrap();
    let baseline = baseline_quality(&sources);
    assert_eq!(baseline.goodreads.total_rows, 1);
    assert_eq!(baseline.google_books.total_rows, 1);
    assert_eq!(baseline.goodreads.source, "Goodreads");
    assert_eq!(baseline.google_books.source, "Google Books");

    let integration = integrate(&sources, Utc.with_ymd_and_hms(2024, 5, 2, 8, 30, 0).unwrap());
    assert_eq!(integration.dim_book.len(), 1);
    let book = &integration.dim_book[0];
    assert_eq!(book.book_id.as_str(), "9780132350884");
    assert_eq!(book.isbn10.as_deref(), Some("0132350882"));
    assert_eq!(book.publisher.as_deref(), Some("Pearson Education"));
    assert_eq!(book.pub_year, Some(2008));

    let quality = pipeline_quality(baseline, &integration);
    assert_eq!(quality.dimension_size, 1);
    assert_eq!(quality.sources[1].source, "Google Books");
    let paths = output(&integration, &quality, &OutputLayout::under(out.path())).unwrap();
    assert!(paths.iter().all(|path| path.is_file()));
}

#[test]
fn enrich_without_scrape_output_fails() {
    let landing = tempfile::tempdir().unwrap();
    let error = enrich_google_books(&OneVolume, landing.path()).unwrap_err();
    assert!(format!("{error:#}").contains("run `scrape` first"));
}

#[test]
fn ingest_requires_both_landing_files() {
    let landing = tempfile::tempdir().unwrap();
    let scraper = GoodreadsScraper::new(CannedSite)
        .with_base_url(BASE)
        .with_delays(Duration::ZERO, Duration::ZERO);
    let config = ScrapeConfig::new("clean code", 1).unwrap();
    scrape_goodreads(&scraper, &config, landing.path()).unwrap();

    let error = ingest(landing.path()).unwrap_err();
    let message = format!("{error:#}");
    assert!(message.contains(GOOGLE_BOOKS_FILE));
    assert!(message.contains("run `enrich` first"));
}
