//! Azure management lock data model.

use serde::{Deserialize, Serialize};

/// A management lock as returned by `az lock list`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ManagementLock {
    /// Lock name.
    pub name: String,
    /// Lock level, `CanNotDelete` or `ReadOnly`.
    pub level: String,
    /// Free text note.
    #[serde(default)]
    pub notes: Option<String>,
    /// Full resource ID of the lock.
    #[serde(default)]
    pub id: Option<String>,
}

/// A lock to be created on a resource group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LockSpec {
    pub name: String,
    pub level: String,
    pub notes: String,
}
