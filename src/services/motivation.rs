// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Quote of the day.

use crate::models::ContentSource;
use crate::services::coach::CoachService;
use chrono::NaiveDate;
use tokio::sync::Mutex;

#[derive(Debug, Clone)]
struct DailyQuote {
    date: NaiveDate,
    message: String,
    source: ContentSource,
}

/// Process-wide cache holding one quote per UTC calendar date.
///
/// The lock is held across the model call, so concurrent first requests of
/// a new day wait for a single generation instead of racing.
#[derive(Debug, Default)]
pub struct DailyMotivation {
    current: Mutex<Option<DailyQuote>>,
}

impl DailyMotivation {
    pub fn new() -> Self {
        Self::default()
    }

    /// The quote for `date`, generating it on the first call of the day.
    /// Whatever the first call produced, fallback included, is kept until
    /// the date changes.
    pub async fn quote_for(&self, date: NaiveDate, coach: &CoachService) -> (String, ContentSource) {
        let mut current = self.current.lock().await;

        if let Some(quote) = current.as_ref().filter(|q| q.date == date) {
            return (quote.message.clone(), quote.source);
        }

        let (message, source) = coach.motivation_quote(date).await.into_parts();
        tracing::info!(%date, ?source, "New quote of the day");

        *current = Some(DailyQuote {
            date,
            message: message.clone(),
            source,
        });
        (message, source)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::llm::{GenerationError, GenerationRequest, TextGenerator};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    /// Returns a different sentence on every call.
    #[derive(Default)]
    struct Counting {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl TextGenerator for Counting {
        async fn generate(&self, _request: &GenerationRequest) -> Result<String, GenerationError> {
            let n = self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(format!("Quote number {}", n))
        }
    }

    #[tokio::test]
    async fn test_same_day_is_cached_and_new_day_regenerates() {
        let generator = Arc::new(Counting::default());
        let coach = CoachService::new(generator.clone());
        let cache = Arc::new(DailyMotivation::new());
        let day = NaiveDate::from_ymd_opt(2026, 10, 17).unwrap();

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let cache = cache.clone();
                let coach = coach.clone();
                tokio::spawn(async move { cache.quote_for(day, &coach).await })
            })
            .collect();

        let mut quotes = Vec::new();
        for handle in handles {
            quotes.push(handle.await.unwrap().0);
        }
        assert!(quotes.iter().all(|q| q == &quotes[0]));
        assert_eq!(generator.calls.load(Ordering::SeqCst), 1);

        let next = cache.quote_for(day.succ_opt().unwrap(), &coach).await;
        assert_ne!(next.0, quotes[0]);
        assert_eq!(next.1, ContentSource::Generated);
        assert_eq!(generator.calls.load(Ordering::SeqCst), 2);
    }
}
