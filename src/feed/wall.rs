use chrono::{DateTime, Utc};
use log::{debug, info};
use rand::seq::SliceRandom;
use rand::Rng;

use crate::error::{DebtBreakerError, Result};
use crate::feed::models::{Spark, SparkCategory, SparkTone};

/// 希望之墙：匿名帖子列表，新帖在最前
#[derive(Debug, Clone)]
pub struct Wall {
    sparks: Vec<Spark>,
    next_id: u64,
}

impl Wall {
    pub fn new() -> Self {
        Self {
            sparks: Vec::new(),
            next_id: 1,
        }
    }

    pub fn from_sparks(sparks: Vec<Spark>) -> Self {
        let next_id = sparks
            .iter()
            .filter_map(|s| s.id.parse::<u64>().ok())
            .max()
            .unwrap_or(0)
            + 1;
        Self { sparks, next_id }
    }

    pub fn post(&mut self, category: SparkCategory, content: &str) -> Result<&Spark> {
        self.post_with_rng(&mut rand::thread_rng(), category, content, Utc::now())
    }

    pub fn post_with_rng<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        category: SparkCategory,
        content: &str,
        now: DateTime<Utc>,
    ) -> Result<&Spark> {
        if content.trim().is_empty() {
            return Err(DebtBreakerError::empty_content("spark"));
        }

        let tone = *SparkTone::ALL.choose(rng).unwrap_or(&SparkTone::Green);
        let icon = category.icons().choose(rng).copied().unwrap_or("mood");

        let spark = Spark {
            id: self.next_id.to_string(),
            content: content.to_string(),
            posted_at: now,
            likes: 0,
            secondary_stat: 0,
            tone,
            icon: icon.to_string(),
            category,
            replies: Vec::new(),
        };
        self.next_id += 1;

        info!("New {} spark {} posted", category.label(), spark.id);
        self.sparks.insert(0, spark);
        Ok(&self.sparks[0])
    }

    /// 追加回复；回复不可编辑或删除
    pub fn reply(&mut self, spark_id: &str, text: &str) -> Result<&Spark> {
        if text.trim().is_empty() {
            return Err(DebtBreakerError::empty_content("reply"));
        }

        let spark = self
            .sparks
            .iter_mut()
            .find(|s| s.id == spark_id)
            .ok_or_else(|| DebtBreakerError::spark_not_found(spark_id))?;

        spark.replies.push(text.to_string());
        debug!("Spark {} now has {} replies", spark.id, spark.replies.len());
        Ok(spark)
    }

    pub fn get(&self, spark_id: &str) -> Option<&Spark> {
        self.sparks.iter().find(|s| s.id == spark_id)
    }

    pub fn by_category(&self, category: SparkCategory) -> Vec<&Spark> {
        self.sparks.iter().filter(|s| s.category == category).collect()
    }

    pub fn sparks(&self) -> &[Spark] {
        &self.sparks
    }
}

impl Default for Wall {
    fn default() -> Self {
        Self::new()
    }
}
