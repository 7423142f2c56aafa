use bookdim_model::{BookSourceDetail, SourcePriority};

/// Winners of a deduplication pass.
#[derive(Debug, Clone, PartialEq)]
pub struct DedupeResult {
    /// One detail row per distinct `book_id`, ordered by `book_id`.
    pub winners: Vec<BookSourceDetail>,
    /// Rows dropped because an earlier row already claimed their `book_id`.
    pub dropped: usize,
}

/// Keep one row per `book_id`, preferring Google-Books-matched rows.
///
/// Rows are stably sorted by `(book_id, priority)` and the first row of each
/// group wins. Among rows with equal priority the input order decides.
pub fn deduplicate(details: &[BookSourceDetail]) -> DedupeResult {
    let mut ordered: Vec<&BookSourceDetail> = details.iter().collect();
    ordered.sort_by(|a, b| {
        a.book_id
            .cmp(&b.book_id)
            .then_with(|| priority(a).cmp(&priority(b)))
    });

    let mut winners: Vec<BookSourceDetail> = Vec::with_capacity(ordered.len());
    for detail in ordered {
        if winners
            .last()
            .is_some_and(|last| last.book_id == detail.book_id)
        {
            continue;
        }
        winners.push(detail.clone());
    }

    DedupeResult {
        dropped: details.len() - winners.len(),
        winners,
    }
}

fn priority(detail: &BookSourceDetail) -> SourcePriority {
    detail.record.priority()
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use bookdim_model::{
        BookId, GoodreadsRecord, GoogleBooksRecord, MergedRecord, NormalizedRecord,
    };

    use super::*;

    fn detail(id: &str, title: &str, matched: bool) -> BookSourceDetail {
        let google_books = matched.then(|| GoogleBooksRecord {
            title: Some(title.to_string()),
            ..GoogleBooksRecord::default()
        });
        BookSourceDetail {
            book_id: BookId::from_isbn13(id),
            record: NormalizedRecord {
                merged: MergedRecord {
                    goodreads: GoodreadsRecord {
                        title: Some(title.to_string()),
                        ..GoodreadsRecord::default()
                    },
                    google_books,
                    ingested_at: Utc::now(),
                },
                isbn13: None,
                isbn10: None,
                pub_date: None,
                pub_year: None,
                language: None,
                currency: None,
                title: Some(title.to_string()),
                normalized_title: None,
                authors: Vec::new(),
                primary_author: None,
                publisher: None,
                price: None,
            },
        }
    }

    #[test]
    fn test_matched_row_wins_regardless_of_position() {
        let details = vec![
            detail("b", "goodreads only", false),
            detail("b", "matched", true),
            detail("a", "single", false),
        ];
        let result = deduplicate(&details);
        assert_eq!(result.dropped, 1);
        let ids: Vec<&str> = result.winners.iter().map(|d| d.book_id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b"]);
        assert_eq!(result.winners[1].record.title.as_deref(), Some("matched"));
    }

    #[test]
    fn test_equal_priority_keeps_first_row() {
        let details = vec![detail("a", "first", false), detail("a", "second", false)];
        let result = deduplicate(&details);
        assert_eq!(result.winners.len(), 1);
        assert_eq!(result.winners[0].record.title.as_deref(), Some("first"));
    }

    #[test]
    fn test_empty_input() {
        let result = deduplicate(&[]);
        assert!(result.winners.is_empty());
        assert_eq!(result.dropped, 0);
    }
}
