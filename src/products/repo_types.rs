use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use time::OffsetDateTime;
use uuid::Uuid;

/// Product record in the database. `rating` is the running average of all
/// submitted ratings; `num_reviews` is how many went into it.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Product {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub price: f64,
    pub category: String,
    pub image: String, // empty string when none
    pub rating: f64,
    pub num_reviews: i64,
    pub created_at: OffsetDateTime,
}
