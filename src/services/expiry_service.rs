//! Expiry classification
//!
//! Pure date arithmetic over documents: days until expiry, the 30/60/90-day
//! reminder buckets, and the worker grouping used by the dashboard. "Today"
//! is always passed in by the caller.

use std::collections::HashMap;
use std::hash::Hash;

use chrono::{Duration, NaiveDate};
use serde::Serialize;

use crate::models::document::{Document, DocumentStatus, DocumentWithOwner};

/// Widest reminder window, in days
pub const MAX_WINDOW_DAYS: i64 = 90;

/// Whole days from `today` to `expiry_date`; negative once expired
pub fn days_until_expiry(expiry_date: NaiveDate, today: NaiveDate) -> i64 {
    (expiry_date - today).num_days()
}

/// True iff `0 <= days_until_expiry <= days`
pub fn is_expiring_within(expiry_date: NaiveDate, today: NaiveDate, days: i64) -> bool {
    let remaining = days_until_expiry(expiry_date, today);
    (0..=days).contains(&remaining)
}

/// Reminder window a document falls into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ExpiryBucket {
    #[serde(rename = "30")]
    Within30,
    #[serde(rename = "60")]
    Within60,
    #[serde(rename = "90")]
    Within90,
}

impl ExpiryBucket {
    /// Print and display order
    pub const ALL: [ExpiryBucket; 3] = [
        ExpiryBucket::Within30,
        ExpiryBucket::Within60,
        ExpiryBucket::Within90,
    ];

    /// Upper bound of the window, inclusive
    pub fn days(&self) -> i64 {
        match self {
            ExpiryBucket::Within30 => 30,
            ExpiryBucket::Within60 => 60,
            ExpiryBucket::Within90 => 90,
        }
    }

    /// Last date (inclusive) that still belongs to this bucket
    pub fn until(&self, today: NaiveDate) -> NaiveDate {
        today + Duration::days(self.days())
    }

    /// Bucket for an expiry date, or `None` outside `[today, today+90]`.
    /// A date on a boundary belongs to the smaller bucket.
    pub fn classify(expiry_date: NaiveDate, today: NaiveDate) -> Option<ExpiryBucket> {
        let remaining = days_until_expiry(expiry_date, today);
        if !(0..=MAX_WINDOW_DAYS).contains(&remaining) {
            return None;
        }
        ExpiryBucket::ALL
            .into_iter()
            .find(|bucket| remaining <= bucket.days())
    }
}

/// Bucket for a document; only ACTIVE documents qualify
pub fn classify_document(document: &Document, today: NaiveDate) -> Option<ExpiryBucket> {
    if document.status != DocumentStatus::Active {
        return None;
    }
    ExpiryBucket::classify(document.expiry_date, today)
}

/// Documents split into the three reminder buckets, each ordered by expiry
#[derive(Debug, Clone, PartialEq)]
pub struct BucketSet<T> {
    pub within_30: Vec<T>,
    pub within_60: Vec<T>,
    pub within_90: Vec<T>,
}

impl<T> Default for BucketSet<T> {
    fn default() -> Self {
        Self {
            within_30: Vec::new(),
            within_60: Vec::new(),
            within_90: Vec::new(),
        }
    }
}

impl<T> BucketSet<T> {
    pub fn get(&self, bucket: ExpiryBucket) -> &[T] {
        match bucket {
            ExpiryBucket::Within30 => &self.within_30,
            ExpiryBucket::Within60 => &self.within_60,
            ExpiryBucket::Within90 => &self.within_90,
        }
    }

    fn get_mut(&mut self, bucket: ExpiryBucket) -> &mut Vec<T> {
        match bucket {
            ExpiryBucket::Within30 => &mut self.within_30,
            ExpiryBucket::Within60 => &mut self.within_60,
            ExpiryBucket::Within90 => &mut self.within_90,
        }
    }

    pub fn len(&self) -> usize {
        self.within_30.len() + self.within_60.len() + self.within_90.len()
    }

    /// Consume into `(bucket, items)` pairs in display order
    pub fn into_entries(self) -> [(ExpiryBucket, Vec<T>); 3] {
        [
            (ExpiryBucket::Within30, self.within_30),
            (ExpiryBucket::Within60, self.within_60),
            (ExpiryBucket::Within90, self.within_90),
        ]
    }
}

/// Split documents into buckets. Documents that are not ACTIVE or expire
/// outside `[today, today+90]` are dropped. Order within a bucket is by
/// expiry date, ties keeping their input order.
pub fn partition(documents: Vec<DocumentWithOwner>, today: NaiveDate) -> BucketSet<DocumentWithOwner> {
    let mut ordered = documents;
    ordered.sort_by_key(|d| d.document.expiry_date);

    let mut buckets = BucketSet::default();
    for entry in ordered {
        if let Some(bucket) = classify_document(&entry.document, today) {
            buckets.get_mut(bucket).push(entry);
        }
    }
    buckets
}

/// Group items by key, keeping each key where it was first seen
pub fn group_by_key<T, K, F>(items: impl IntoIterator<Item = T>, key: F) -> Vec<(K, Vec<T>)>
where
    K: Eq + Hash + Clone,
    F: Fn(&T) -> K,
{
    let mut positions: HashMap<K, usize> = HashMap::new();
    let mut groups: Vec<(K, Vec<T>)> = Vec::new();

    for item in items {
        let k = key(&item);
        match positions.get(&k) {
            Some(&index) => groups[index].1.push(item),
            None => {
                positions.insert(k.clone(), groups.len());
                groups.push((k, vec![item]));
            }
        }
    }
    groups
}

/// Documents of one worker inside a bucket
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WorkerGroup {
    pub worker_id: i64,
    pub worker_name: String,
    pub company_id: i64,
    pub company_name: String,
    pub documents: Vec<Document>,
}

/// Group a bucket's documents by owning worker, first-seen order
pub fn group_by_worker(documents: Vec<DocumentWithOwner>) -> Vec<WorkerGroup> {
    group_by_key(documents, |d| d.document.worker_id)
        .into_iter()
        .filter_map(|(worker_id, entries)| {
            let first = entries.first()?;
            let worker_name = first.worker_name.clone();
            let company_id = first.company_id;
            let company_name = first.company_name.clone();
            Some(WorkerGroup {
                worker_id,
                worker_name,
                company_id,
                company_name,
                documents: entries.into_iter().map(|e| e.document).collect(),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::document::DocumentType;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn entry(id: i64, worker_id: i64, expiry: NaiveDate, status: DocumentStatus) -> DocumentWithOwner {
        DocumentWithOwner {
            document: Document {
                id,
                worker_id,
                doc_type: DocumentType::Kitas,
                document_number: format!("K-{}", id),
                issue_date: date(2023, 1, 1),
                expiry_date: expiry,
                status,
            },
            worker_name: format!("Worker {}", worker_id),
            company_id: 1,
            company_name: "PT Maju".to_string(),
        }
    }

    #[test]
    fn test_days_until_expiry() {
        let today = date(2024, 1, 1);
        assert_eq!(days_until_expiry(date(2024, 1, 31), today), 30);
        assert_eq!(days_until_expiry(date(2023, 12, 31), today), -1);
        assert_eq!(days_until_expiry(today, today), 0);
    }

    #[test]
    fn test_is_expiring_within() {
        let today = date(2024, 1, 1);
        assert!(is_expiring_within(today, today, 30));
        assert!(is_expiring_within(date(2024, 1, 31), today, 30));
        assert!(!is_expiring_within(date(2024, 2, 1), today, 30));
        assert!(!is_expiring_within(date(2023, 12, 31), today, 30));
    }

    #[test]
    fn test_classify_boundaries() {
        let today = date(2024, 1, 1);
        assert_eq!(ExpiryBucket::classify(today, today), Some(ExpiryBucket::Within30));
        assert_eq!(ExpiryBucket::classify(date(2024, 1, 31), today), Some(ExpiryBucket::Within30));
        assert_eq!(ExpiryBucket::classify(date(2024, 2, 1), today), Some(ExpiryBucket::Within60));
        assert_eq!(ExpiryBucket::classify(today + Duration::days(60), today), Some(ExpiryBucket::Within60));
        assert_eq!(ExpiryBucket::classify(today + Duration::days(61), today), Some(ExpiryBucket::Within90));
        assert_eq!(ExpiryBucket::classify(today + Duration::days(90), today), Some(ExpiryBucket::Within90));
        assert_eq!(ExpiryBucket::classify(today + Duration::days(91), today), None);
        assert_eq!(ExpiryBucket::classify(today - Duration::days(1), today), None);
    }

    #[test]
    fn test_every_day_in_window_lands_in_exactly_one_bucket() {
        let today = date(2024, 2, 27);
        for offset in -5..=100 {
            let expiry = today + Duration::days(offset);
            let docs = vec![entry(1, 1, expiry, DocumentStatus::Active)];
            let buckets = partition(docs, today);
            let expected = if (0..=90).contains(&offset) { 1 } else { 0 };
            assert_eq!(buckets.len(), expected, "offset {}", offset);
        }
    }

    #[test]
    fn test_partition_excludes_expired_status() {
        let today = date(2024, 1, 1);
        let docs = vec![
            entry(1, 1, date(2024, 1, 10), DocumentStatus::Expired),
            entry(2, 1, date(2024, 1, 10), DocumentStatus::Active),
        ];
        let buckets = partition(docs, today);
        assert_eq!(buckets.within_30.len(), 1);
        assert_eq!(buckets.within_30[0].document.id, 2);
    }

    #[test]
    fn test_partition_orders_by_expiry() {
        let today = date(2024, 1, 1);
        let docs = vec![
            entry(1, 1, date(2024, 1, 20), DocumentStatus::Active),
            entry(2, 2, date(2024, 1, 5), DocumentStatus::Active),
            entry(3, 1, date(2024, 3, 1), DocumentStatus::Active),
        ];
        let buckets = partition(docs, today);
        let ids: Vec<i64> = buckets.within_30.iter().map(|d| d.document.id).collect();
        assert_eq!(ids, vec![2, 1]);
        assert_eq!(buckets.get(ExpiryBucket::Within60)[0].document.id, 3);
        assert!(buckets.within_90.is_empty());
    }

    #[test]
    fn test_group_by_worker_keeps_first_seen_order() {
        let today = date(2024, 1, 1);
        let docs = vec![
            entry(1, 7, date(2024, 1, 3), DocumentStatus::Active),
            entry(2, 3, date(2024, 1, 4), DocumentStatus::Active),
            entry(3, 7, date(2024, 1, 5), DocumentStatus::Active),
        ];
        let groups = group_by_worker(partition(docs, today).within_30);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].worker_id, 7);
        assert_eq!(groups[0].documents.len(), 2);
        assert_eq!(groups[1].worker_id, 3);
    }

    #[test]
    fn test_group_by_key_generic() {
        let groups = group_by_key(vec!["b1", "a1", "b2"], |s| s.chars().next().unwrap());
        assert_eq!(groups, vec![('b', vec!["b1", "b2"]), ('a', vec!["a1"])]);
    }
}
