//! In-memory accumulation of extracted email records
//!
//! The store is append-only during the crawl. Deduplication happens once,
//! at finalize time, in a single pass over insertion order.

use std::collections::HashSet;

/// One extracted email occurrence
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailRecord {
    /// Organization name from the listing page
    pub organization: String,

    /// The extracted email address, case preserved
    pub email: String,

    /// URL of the page the email was found on
    pub page_url: String,

    /// "main" for the organization page, the link label (or "sub-page")
    /// for sub-pages
    pub page_type: String,
}

/// Accumulates email records for one crawl run
#[derive(Debug, Default)]
pub struct ResultStore {
    records: Vec<EmailRecord>,
}

impl ResultStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a record; duplicates are accepted and kept
    pub fn add(&mut self, record: EmailRecord) {
        self.records.push(record);
    }

    /// Number of raw records collected so far
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// All raw records in insertion order
    pub fn records(&self) -> &[EmailRecord] {
        &self.records
    }

    /// Returns the deduplicated result set
    ///
    /// Walks records in insertion order and keeps the first record for each
    /// (organization, email) key; later duplicates are dropped regardless of
    /// differing page URL or page type. Running this on its own output
    /// returns the same sequence unchanged.
    pub fn finalize_deduplicated(&self) -> Vec<EmailRecord> {
        let mut seen = HashSet::new();
        let mut unique = Vec::new();

        for record in &self.records {
            let key = (record.organization.clone(), record.email.clone());
            if seen.insert(key) {
                unique.push(record.clone());
            }
        }

        unique
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(org: &str, email: &str, url: &str, page_type: &str) -> EmailRecord {
        EmailRecord {
            organization: org.to_string(),
            email: email.to_string(),
            page_url: url.to_string(),
            page_type: page_type.to_string(),
        }
    }

    #[test]
    fn test_empty_store() {
        let store = ResultStore::new();
        assert!(store.is_empty());
        assert!(store.finalize_deduplicated().is_empty());
    }

    #[test]
    fn test_duplicates_accumulate() {
        let mut store = ResultStore::new();
        store.add(record("Foo", "a@b.mn", "https://x/1", "main"));
        store.add(record("Foo", "a@b.mn", "https://x/2", "Contact"));
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_first_record_wins() {
        let mut store = ResultStore::new();
        store.add(record("Foo", "a@b.mn", "https://x/1", "main"));
        store.add(record("Foo", "a@b.mn", "https://x/2", "Contact"));

        let unique = store.finalize_deduplicated();
        assert_eq!(unique.len(), 1);
        assert_eq!(unique[0].page_url, "https://x/1");
        assert_eq!(unique[0].page_type, "main");
    }

    #[test]
    fn test_same_email_different_organizations_kept() {
        let mut store = ResultStore::new();
        store.add(record("Foo", "shared@gov.mn", "https://x/1", "main"));
        store.add(record("Bar", "shared@gov.mn", "https://y/1", "main"));
        assert_eq!(store.finalize_deduplicated().len(), 2);
    }

    #[test]
    fn test_insertion_order_preserved() {
        let mut store = ResultStore::new();
        store.add(record("Foo", "one@gov.mn", "https://x/1", "main"));
        store.add(record("Bar", "two@gov.mn", "https://y/1", "main"));
        store.add(record("Foo", "three@gov.mn", "https://x/2", "Contact"));

        let emails: Vec<_> = store
            .finalize_deduplicated()
            .into_iter()
            .map(|r| r.email)
            .collect();
        assert_eq!(emails, vec!["one@gov.mn", "two@gov.mn", "three@gov.mn"]);
    }

    #[test]
    fn test_deduplication_is_idempotent() {
        let mut store = ResultStore::new();
        store.add(record("Foo", "a@b.mn", "https://x/1", "main"));
        store.add(record("Foo", "a@b.mn", "https://x/2", "Contact"));
        store.add(record("Bar", "c@d.mn", "https://y/1", "main"));

        let first = store.finalize_deduplicated();

        let mut second_store = ResultStore::new();
        for r in &first {
            second_store.add(r.clone());
        }
        assert_eq!(second_store.finalize_deduplicated(), first);
    }
}
