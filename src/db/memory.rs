// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Process-local document store.
//!
//! Documents are kept as JSON values per collection, in insertion order.
//! Used by the test suite and for local development without Firestore.

use crate::db::ORDER_FIELD;
use crate::error::AppError;
use dashmap::DashMap;
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use std::sync::Arc;

#[derive(Debug, Clone)]
struct StoredDoc {
    id: String,
    body: Value,
}

/// In-memory backend. Cloning shares the same underlying data.
#[derive(Debug, Clone, Default)]
pub struct MemoryBackend {
    collections: Arc<DashMap<String, Vec<StoredDoc>>>,
}

fn encode<T: Serialize>(doc: &T) -> Result<Value, AppError> {
    serde_json::to_value(doc).map_err(|e| AppError::Database(format!("Encode failed: {}", e)))
}

fn decode<T: DeserializeOwned>(body: &Value) -> Result<T, AppError> {
    serde_json::from_value(body.clone())
        .map_err(|e| AppError::Database(format!("Decode failed: {}", e)))
}

/// Newest first; documents sharing a timestamp keep reverse insertion order.
fn newest_first(docs: &mut Vec<&StoredDoc>) {
    docs.reverse();
    docs.sort_by(|a, b| {
        let a = a.body.get(ORDER_FIELD).and_then(Value::as_str);
        let b = b.body.get(ORDER_FIELD).and_then(Value::as_str);
        b.cmp(&a)
    });
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get<T: DeserializeOwned>(&self, collection: &str, id: &str) -> Result<Option<T>, AppError> {
        let Some(docs) = self.collections.get(collection) else {
            return Ok(None);
        };
        let found = docs
            .iter()
            .find(|d| d.id == id)
            .map(|d| decode(&d.body))
            .transpose();
        found
    }

    /// Insert or fully replace a document.
    pub fn put<T: Serialize>(&self, collection: &str, id: &str, doc: &T) -> Result<(), AppError> {
        let body = encode(doc)?;
        let mut docs = self.collections.entry(collection.to_string()).or_default();

        match docs.iter().position(|d| d.id == id) {
            Some(index) => docs[index].body = body,
            None => docs.push(StoredDoc {
                id: id.to_string(),
                body,
            }),
        }
        Ok(())
    }

    pub fn delete(&self, collection: &str, id: &str) -> Result<(), AppError> {
        if let Some(mut docs) = self.collections.get_mut(collection) {
            docs.retain(|d| d.id != id);
        }
        Ok(())
    }

    pub fn delete_many(&self, collection: &str, ids: &[String]) -> Result<(), AppError> {
        if let Some(mut docs) = self.collections.get_mut(collection) {
            docs.retain(|d| !ids.contains(&d.id));
        }
        Ok(())
    }

    /// Documents whose string `field` equals `value`, newest first.
    pub fn find_by<T: DeserializeOwned>(
        &self,
        collection: &str,
        field: &str,
        value: &str,
        limit: Option<u32>,
    ) -> Result<Vec<T>, AppError> {
        let Some(docs) = self.collections.get(collection) else {
            return Ok(vec![]);
        };

        let mut matching: Vec<&StoredDoc> = docs
            .iter()
            .filter(|d| d.body.get(field).and_then(Value::as_str) == Some(value))
            .collect();
        newest_first(&mut matching);

        let limit = limit.map(|l| l as usize).unwrap_or(usize::MAX);
        let decoded = matching
            .into_iter()
            .take(limit)
            .map(|d| decode(&d.body))
            .collect();
        decoded
    }

    /// Every document in a collection, newest first.
    pub fn list<T: DeserializeOwned>(&self, collection: &str) -> Result<Vec<T>, AppError> {
        let Some(docs) = self.collections.get(collection) else {
            return Ok(vec![]);
        };

        let mut all: Vec<&StoredDoc> = docs.iter().collect();
        newest_first(&mut all);
        let decoded = all.into_iter().map(|d| decode(&d.body)).collect();
        decoded
    }
}
