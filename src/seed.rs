//! Versioned startup seed.
//!
//! A seed appends a fixed set of records and prunes one sentinel ID. The
//! version it last applied is kept in a marker file next to the users file
//! (`users.json.seed`), so restarting the service does not append the same
//! records again or prune a record that was created after the first run.
//! The marker only counts while the users file exists: a store opened from
//! a missing file is seeded again.

use crate::error::{Error, Result};
use crate::model::User;
use crate::persist::atomic_write;
use crate::store::UserStore;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Version of [`Seed::builtin`]. Bump it when the built-in records change.
pub const BUILTIN_SEED_VERSION: u32 = 1;

/// Records to add and an ID to drop, applied once per version.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Seed {
    /// Compared against the marker file; higher versions run again.
    pub version: u32,
    /// Appended as-is, IDs included, unless the ID is already taken.
    pub records: Vec<User>,
    /// First record with this ID is removed when the seed runs.
    pub prune: Option<i64>,
}

/// What [`apply`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedOutcome {
    /// The marker already holds this version or a newer one.
    Skipped {
        /// Version found in the marker.
        applied_version: u32,
    },
    /// The seed ran.
    Applied {
        /// Seed records that were appended.
        inserted: usize,
        /// Whether a record with the prune ID was removed.
        pruned: bool,
    },
}

#[derive(Debug, Serialize, Deserialize)]
struct Marker {
    version: u32,
}

impl Seed {
    /// The three demo users and the removal of ID 3.
    pub fn builtin() -> Self {
        Self {
            version: BUILTIN_SEED_VERSION,
            records: vec![
                User {
                    id: 8,
                    name: "Romario".into(),
                    kind: "Autor".into(),
                    age: 18,
                    email: "romario@gmail.com".into(),
                    phone: 32_458_798,
                    city: "Rio de Janeiro".into(),
                },
                User {
                    id: 9,
                    name: "Ana".into(),
                    kind: "Autor".into(),
                    age: 68,
                    email: "ana@gmail.com".into(),
                    phone: 38_956_474,
                    city: "Berlin".into(),
                },
                User {
                    id: 11,
                    name: "Gwen".into(),
                    kind: "Reader".into(),
                    age: 43,
                    email: "gwen@gmail.com".into(),
                    phone: 55_663_214,
                    city: "Dublin".into(),
                },
            ],
            prune: Some(3),
        }
    }
}

/// Run `seed` against `store` unless its version was already applied.
///
/// Seed records whose ID is already taken are left out, so a partially
/// seeded file is completed rather than duplicated.
#[tracing::instrument(skip(store, seed), fields(version = seed.version))]
pub fn apply(store: &UserStore, seed: &Seed) -> Result<SeedOutcome> {
    let marker = marker_path(store.path());
    let applied = if store.file_existed() {
        read_marker(&marker)?
    } else {
        None
    };
    if let Some(applied_version) = applied {
        if applied_version >= seed.version {
            tracing::debug!(applied_version, "seed already applied");
            return Ok(SeedOutcome::Skipped { applied_version });
        }
    }

    let fresh: Vec<User> = seed
        .records
        .iter()
        .filter(|u| !store.contains(u.id))
        .cloned()
        .collect();
    let inserted = fresh.len();
    if inserted > 0 {
        store.extend(fresh)?;
    }

    let pruned = match seed.prune {
        Some(id) => store.remove(id)?.is_some(),
        None => false,
    };

    write_marker(&marker, seed.version)?;
    tracing::info!(inserted, pruned, "seed applied");
    Ok(SeedOutcome::Applied { inserted, pruned })
}

/// `<users file>.seed`.
pub fn marker_path(users_path: &Path) -> PathBuf {
    let mut name = users_path.as_os_str().to_owned();
    name.push(".seed");
    PathBuf::from(name)
}

fn read_marker(path: &Path) -> Result<Option<u32>> {
    let bytes = match std::fs::read(path) {
        Ok(b) => b,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(Error::Io(e.to_string())),
    };
    let marker: Marker = serde_json::from_slice(&bytes)?;
    Ok(Some(marker.version))
}

fn write_marker(path: &Path, version: u32) -> Result<()> {
    let bytes =
        serde_json::to_vec(&Marker { version }).map_err(|e| Error::Serialize(e.to_string()))?;
    atomic_write(path, &bytes)
}
