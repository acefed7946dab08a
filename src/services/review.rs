use thiserror::Error;
use validator::Validate;

use crate::models::{Review, ReviewRequest};

#[derive(Debug, Error)]
pub enum ReviewError {
    #[error("Validation failed: {0}")]
    Validation(#[from] validator::ValidationErrors),
}

/// Mock review ledger for ended mentorships. Keeps reviews in memory only.
#[derive(Debug, Clone, Default)]
pub struct ReviewLedger {
    reviews: Vec<Review>,
}

impl ReviewLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a review; a rating outside 1..=5 is rejected
    pub fn submit_review(&mut self, req: ReviewRequest) -> Result<&Review, ReviewError> {
        req.validate()?;

        let comment = req.comment.trim();
        let review = Review {
            id: uuid::Uuid::new_v4().to_string(),
            partner_id: req.partner_id,
            rating: req.rating,
            comment: (!comment.is_empty()).then(|| comment.to_string()),
            created_at: chrono::Utc::now(),
        };

        tracing::info!("Review for {} submitted ({} stars)", review.partner_id, review.rating);
        self.reviews.push(review);
        Ok(&self.reviews[self.reviews.len() - 1])
    }

    /// Leave without reviewing
    pub fn skip_review(&self, partner_id: &str) {
        tracing::debug!("Review for {} skipped", partner_id);
    }

    pub fn reviews_for<'a>(&'a self, partner_id: &'a str) -> impl Iterator<Item = &'a Review> + 'a {
        self.reviews.iter().filter(move |r| r.partner_id == partner_id)
    }

    /// Mean rating for `partner_id`, `None` without reviews
    pub fn average_rating(&self, partner_id: &str) -> Option<f64> {
        let (count, total) = self
            .reviews_for(partner_id)
            .fold((0u32, 0u32), |(n, sum), r| (n + 1, sum + u32::from(r.rating)));
        (count > 0).then(|| f64::from(total) / f64::from(count))
    }

    pub fn len(&self) -> usize {
        self.reviews.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reviews.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(partner_id: &str, rating: u8, comment: &str) -> ReviewRequest {
        ReviewRequest {
            partner_id: partner_id.to_string(),
            rating,
            comment: comment.to_string(),
        }
    }

    #[test]
    fn test_zero_rating_rejected() {
        let mut ledger = ReviewLedger::new();
        let result = ledger.submit_review(request("p1", 0, "great"));

        assert!(matches!(result, Err(ReviewError::Validation(_))));
        assert!(ledger.is_empty());
    }

    #[test]
    fn test_rating_above_five_rejected() {
        let mut ledger = ReviewLedger::new();
        assert!(ledger.submit_review(request("p1", 6, "")).is_err());
        assert!(ledger.is_empty());
    }

    #[test]
    fn test_submit_and_query() {
        let mut ledger = ReviewLedger::new();
        let review = ledger.submit_review(request("p1", 5, "  Very helpful  ")).unwrap();
        assert_eq!(review.comment.as_deref(), Some("Very helpful"));

        let review = ledger.submit_review(request("p1", 4, "")).unwrap();
        assert!(review.comment.is_none());

        ledger.submit_review(request("p2", 2, "")).unwrap();

        assert_eq!(ledger.reviews_for("p1").count(), 2);
        assert_eq!(ledger.average_rating("p1"), Some(4.5));
        assert_eq!(ledger.average_rating("p3"), None);
        assert_eq!(ledger.len(), 3);
    }

    #[test]
    fn test_skip_records_nothing() {
        let ledger = ReviewLedger::new();
        ledger.skip_review("p1");
        assert!(ledger.is_empty());
    }
}
