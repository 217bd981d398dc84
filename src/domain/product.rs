//! Product domain entity, embedded reviews and rating aggregates.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::image::StoredImage;

/// Customer review embedded in its product document.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Review {
    pub id: Uuid,
    /// Reviewing user
    pub user: Uuid,
    /// Display name captured at review time
    pub name: String,
    /// Rating between 1 and 5
    pub rating: f64,
    pub comment: String,
}

impl Review {
    pub fn new(user: Uuid, name: String, rating: f64, comment: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            user,
            name,
            rating,
            comment,
        }
    }
}

/// Product domain entity.
///
/// Reviews live inside the product document; `ratings` and `num_of_reviews`
/// are derived aggregates and must be recomputed on every review mutation.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Product {
    #[serde(rename = "_id")]
    #[schema(value_type = Uuid)]
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub price: f64,
    /// Mean of all review ratings, 0 when unreviewed
    pub ratings: f64,
    pub images: Vec<StoredImage>,
    pub category: String,
    pub stock: i64,
    pub num_of_reviews: u64,
    pub reviews: Vec<Review>,
    /// Admin who created the product
    pub user: Uuid,
    pub created_at: DateTime<Utc>,
}

impl Product {
    /// Create a new unreviewed product.
    pub fn new(input: CreateProduct, created_by: Uuid) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: input.name,
            description: input.description,
            price: input.price,
            ratings: 0.0,
            images: input.images,
            category: input.category,
            stock: input.stock,
            num_of_reviews: 0,
            reviews: Vec::new(),
            user: created_by,
            created_at: Utc::now(),
        }
    }

    /// Record a review, overwriting any earlier review by the same user.
    ///
    /// Aggregates are recomputed afterwards, so a repeated reviewer changes
    /// the mean without inflating the review count.
    pub fn upsert_review(&mut self, user: Uuid, name: String, rating: f64, comment: String) {
        match self.reviews.iter_mut().find(|review| review.user == user) {
            Some(existing) => {
                existing.rating = rating;
                existing.comment = comment;
                existing.name = name;
            }
            None => self.reviews.push(Review::new(user, name, rating, comment)),
        }
        self.recompute_rating();
    }

    /// Remove a review by id. Returns false when no such review exists.
    pub fn remove_review(&mut self, review_id: Uuid) -> bool {
        let before = self.reviews.len();
        self.reviews.retain(|review| review.id != review_id);
        if self.reviews.len() == before {
            return false;
        }
        self.recompute_rating();
        true
    }

    fn recompute_rating(&mut self) {
        self.num_of_reviews = self.reviews.len() as u64;
        self.ratings = if self.reviews.is_empty() {
            0.0
        } else {
            let sum: f64 = self.reviews.iter().map(|review| review.rating).sum();
            sum / self.reviews.len() as f64
        };
    }
}

/// Product creation data (admin only)
#[derive(Debug, Clone)]
pub struct CreateProduct {
    pub name: String,
    pub description: String,
    pub price: f64,
    pub category: String,
    pub stock: i64,
    pub images: Vec<StoredImage>,
}

/// Partial product update (admin only)
#[derive(Debug, Clone, Default)]
pub struct UpdateProduct {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub category: Option<String>,
    pub stock: Option<i64>,
    pub images: Option<Vec<StoredImage>>,
}
