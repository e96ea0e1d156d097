use crate::models::Rating;
use std::collections::HashMap;
use tokio::sync::Mutex;

/// Per-laptop score accumulator.
#[derive(Default)]
pub struct RatingStore {
    ratings: Mutex<HashMap<String, Rating>>,
}

impl RatingStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `score` to the laptop's totals and returns the totals as they
    /// stand right after this update. Updates for every key are serialized
    /// behind one lock, so no two callers see the same count for a laptop.
    pub async fn record(&self, laptop_id: &str, score: f64) -> Rating {
        let mut ratings = self.ratings.lock().await;
        let rating = ratings.entry(laptop_id.to_string()).or_default();
        rating.add(score);
        *rating
    }

    pub async fn get(&self, laptop_id: &str) -> Option<Rating> {
        self.ratings.lock().await.get(laptop_id).copied()
    }
}
