// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Typed record operations on top of the generic document API.

use super::{collections, Database, Document, Owned, OWNER_FIELD};
use crate::error::AppError;
use crate::models::{Competition, Feedback, PhysicalProgram, Role, Training, User};
use serde::{Deserialize, Serialize};

/// Minimal view of a user document used to find non-canonical roles.
#[derive(Debug, Serialize, Deserialize)]
struct RoleProbe {
    id: String,
    #[serde(default)]
    role: Option<String>,
}

impl Document for RoleProbe {
    const COLLECTION: &'static str = collections::USERS;

    fn id(&self) -> &str {
        &self.id
    }
}

/// What a cascading user deletion removed.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CascadeReport {
    pub trainings: usize,
    pub programs: usize,
    pub competitions: usize,
    pub feedbacks: usize,
}

impl Database {
    pub async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let mut found: Vec<User> = self.find_by("email", email, Some(1)).await?;
        Ok(found.pop())
    }

    pub async fn find_user_by_username(&self, username: &str) -> Result<Option<User>, AppError> {
        let mut found: Vec<User> = self.find_by("username", username, Some(1)).await?;
        Ok(found.pop())
    }

    /// All of a user's records of one kind, newest first.
    pub async fn list_owned<T: Owned>(&self, user_id: &str) -> Result<Vec<T>, AppError> {
        self.find_by(OWNER_FIELD, user_id, None).await
    }

    /// A user's `limit` most recent records of one kind.
    pub async fn recent_owned<T: Owned>(
        &self,
        user_id: &str,
        limit: u32,
    ) -> Result<Vec<T>, AppError> {
        self.find_by(OWNER_FIELD, user_id, Some(limit)).await
    }

    /// Delete a record on behalf of `user_id`.
    ///
    /// Fails with `NotFound` for unknown ids and `NotOwner` when the record
    /// belongs to someone else; in both cases nothing is removed.
    pub async fn delete_owned<T: Owned>(&self, id: &str, user_id: &str) -> Result<(), AppError> {
        let record: T = self
            .get(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("{} {}", T::COLLECTION, id)))?;

        if record.owner_id() != user_id {
            tracing::warn!(
                collection = T::COLLECTION,
                record_id = id,
                owner = record.owner_id(),
                requester = user_id,
                "Rejected delete of record owned by another user"
            );
            return Err(AppError::NotOwner);
        }

        self.delete::<T>(id).await?;
        tracing::info!(collection = T::COLLECTION, record_id = id, user_id, "Record deleted");
        Ok(())
    }

    async fn delete_all_owned<T: Owned>(&self, user_id: &str) -> Result<usize, AppError> {
        let records: Vec<T> = self.list_owned(user_id).await?;
        let ids: Vec<String> = records.iter().map(|r| r.id().to_string()).collect();
        self.delete_many::<T>(&ids).await?;
        Ok(ids.len())
    }

    /// Delete a user and every record they own.
    ///
    /// Owned records are removed before the account itself.
    pub async fn delete_user_cascade(&self, user_id: &str) -> Result<CascadeReport, AppError> {
        let report = CascadeReport {
            trainings: self.delete_all_owned::<Training>(user_id).await?,
            programs: self.delete_all_owned::<PhysicalProgram>(user_id).await?,
            competitions: self.delete_all_owned::<Competition>(user_id).await?,
            feedbacks: self.delete_all_owned::<Feedback>(user_id).await?,
        };
        self.delete::<User>(user_id).await?;

        tracing::info!(
            user_id,
            trainings = report.trainings,
            programs = report.programs,
            competitions = report.competitions,
            feedbacks = report.feedbacks,
            "User and owned records deleted"
        );
        Ok(report)
    }

    /// Rewrite legacy role spellings (`user`, `joueur`, missing) to their
    /// canonical value. Returns the number of users updated.
    pub async fn migrate_legacy_roles(&self) -> Result<usize, AppError> {
        let probes: Vec<RoleProbe> = self.list_all().await?;
        let mut migrated = 0;

        for probe in probes {
            if probe.role.as_deref().is_some_and(Role::is_canonical) {
                continue;
            }
            // Deserializing through `User` maps the legacy value to its canonical role.
            let Some(user) = self.get::<User>(&probe.id).await? else {
                continue;
            };
            tracing::info!(
                user_id = %user.id,
                from = probe.role.as_deref().unwrap_or("<none>"),
                to = user.role.as_str(),
                "Migrating legacy role"
            );
            self.save(&user).await?;
            migrated += 1;
        }

        Ok(migrated)
    }
}
