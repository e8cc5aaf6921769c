// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! User model for storage and API.

use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Account role.
///
/// Older documents carry `"user"` or `"joueur"` (or no role at all); both
/// read as [`Role::Player`] and are rewritten by the startup migration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    #[serde(alias = "user", alias = "joueur")]
    Player,
    Coach,
    Admin,
}

impl Role {
    /// Canonical stored spelling.
    pub fn as_str(self) -> &'static str {
        match self {
            Role::Player => "player",
            Role::Coach => "coach",
            Role::Admin => "admin",
        }
    }

    /// Whether a raw stored value is already canonical.
    pub fn is_canonical(raw: &str) -> bool {
        matches!(raw, "player" | "coach" | "admin")
    }
}

/// User document stored in the `users` collection.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Document ID (UUID)
    pub id: String,
    /// Display name
    pub name: String,
    /// Unique, lowercased email address
    pub email: String,
    /// bcrypt hash of the password
    pub password: String,
    /// Optional unique handle
    #[serde(default)]
    pub username: Option<String>,
    /// Avatar URL or data URI
    #[serde(default)]
    pub avatar: Option<String>,
    #[serde(default)]
    pub role: Role,
    /// Registration timestamp (RFC 3339)
    pub date: String,
}

/// Public projection of a user. Never carries the password hash.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
#[serde(rename_all = "camelCase")]
pub struct PublicUser {
    pub id: String,
    pub name: String,
    pub email: String,
    pub username: Option<String>,
    pub avatar: Option<String>,
    pub role: Role,
    pub date: String,
}

impl From<&User> for PublicUser {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.clone(),
            name: user.name.clone(),
            email: user.email.clone(),
            username: user.username.clone(),
            avatar: user.avatar.clone(),
            role: user.role,
            date: user.date.clone(),
        }
    }
}
