//! The record store and its builder.

use crate::error::Result;
use crate::model::User;
use crate::persist::{load_existing, save};
use crate::serializer::JsonSerializer;
use parking_lot::RwLock;
use std::path::{Path, PathBuf};

/// Ordered, in-memory collection of users mirrored to a JSON file.
///
/// Use [`open`](Self::open) for the default pretty-printed file or
/// [`builder`](Self::builder) to pick the output format.
///
/// Every mutation holds the write lock across both the in-memory change and
/// the file rewrite, so writers never interleave on disk. Reads clone out of
/// a read lock and therefore wait for any write in progress; call them from
/// a blocking context (the HTTP handlers use `spawn_blocking`).
///
/// New IDs are `len + 1` at the time of the insert. After a delete that can
/// hand out an ID that is still in use; callers that need unique IDs must
/// not delete.
pub struct UserStore {
    users: RwLock<Vec<User>>,
    path: PathBuf,
    serializer: JsonSerializer,
    file_existed: bool,
}

impl UserStore {
    /// Open (or start empty if missing) the users file at `path`.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        Self::builder(path).build()
    }

    /// Start configuring a new store. Call [`.build()`](UserStoreBuilder::build)
    /// when ready.
    pub fn builder(path: impl AsRef<Path>) -> UserStoreBuilder {
        UserStoreBuilder::new(path)
    }

    // ---- reads ----

    /// Snapshot of every record, in insertion order.
    #[must_use]
    pub fn list(&self) -> Vec<User> {
        self.users.read().clone()
    }

    /// First record with `id`, or `None`.
    #[must_use]
    pub fn get(&self, id: i64) -> Option<User> {
        self.users.read().iter().find(|u| u.id == id).cloned()
    }

    /// `true` if some record carries `id`.
    #[must_use]
    pub fn contains(&self, id: i64) -> bool {
        self.users.read().iter().any(|u| u.id == id)
    }

    /// Number of records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.users.read().len()
    }

    /// `true` when the store has no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Path to the backing JSON file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// `false` if the file was missing when the store was opened.
    #[must_use]
    pub fn file_existed(&self) -> bool {
        self.file_existed
    }

    // ---- writes ----

    /// Assign the next ID to `user`, append it and rewrite the file.
    ///
    /// If the write fails the record stays in memory and the error is
    /// returned, so memory and file disagree until the next successful write.
    pub fn create(&self, mut user: User) -> Result<User> {
        let mut users = self.users.write();
        user.id = next_id(users.len());
        users.push(user.clone());
        tracing::info!(id = user.id, "user created");
        save(&self.path, &users, &self.serializer)?;
        Ok(user)
    }

    /// Remove the first record with `id` and rewrite the file.
    ///
    /// Returns the remaining records in their original order, or `None` if
    /// nothing matched (in which case the file is left alone). As with
    /// [`create`](Self::create), a failed write does not undo the removal.
    pub fn remove(&self, id: i64) -> Result<Option<Vec<User>>> {
        let mut users = self.users.write();
        let Some(index) = users.iter().position(|u| u.id == id) else {
            return Ok(None);
        };
        users.remove(index);
        tracing::info!(id, "user deleted");
        save(&self.path, &users, &self.serializer)?;
        Ok(Some(users.clone()))
    }

    /// Append records as-is, keeping their IDs. Only writes the file once.
    pub fn extend<I>(&self, iter: I) -> Result<()>
    where
        I: IntoIterator<Item = User>,
    {
        let mut users = self.users.write();
        users.extend(iter);
        save(&self.path, &users, &self.serializer)
    }

    // ---- persistence ----

    /// Rewrite the file from the current in-memory records.
    pub fn flush(&self) -> Result<()> {
        let users = self.users.read();
        save(&self.path, &users, &self.serializer)
    }
}

impl std::fmt::Debug for UserStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UserStore")
            .field("path", &self.path)
            .field("len", &self.len())
            .field("pretty", &self.serializer.is_pretty())
            .field("file_existed", &self.file_existed)
            .finish_non_exhaustive()
    }
}

fn next_id(len: usize) -> i64 {
    i64::try_from(len).map_or(i64::MAX, |n| n.saturating_add(1))
}

// ---------------------------------------------------------------------------
// Builder
// ---------------------------------------------------------------------------

/// Configures and opens a [`UserStore`].
///
/// ```rust,no_run
/// use json_users::UserStore;
///
/// let store = UserStore::builder("users.json")
///     .pretty(false)
///     .build()
///     .unwrap();
/// ```
#[derive(Debug)]
pub struct UserStoreBuilder {
    path: PathBuf,
    pretty: bool,
}

impl UserStoreBuilder {
    fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            pretty: true,
        }
    }

    /// Write human-readable JSON with two-space indentation (default: on).
    pub fn pretty(mut self, yes: bool) -> Self {
        self.pretty = yes;
        self
    }

    /// Load the file (missing means empty) and return the store.
    pub fn build(self) -> Result<UserStore> {
        let serializer = if self.pretty {
            JsonSerializer::pretty()
        } else {
            JsonSerializer::new()
        };

        let loaded = load_existing(&self.path, &serializer)?;
        let file_existed = loaded.is_some();
        let users = loaded.unwrap_or_default();
        tracing::info!(path = %self.path.display(), count = users.len(), "users loaded");

        Ok(UserStore {
            users: RwLock::new(users),
            path: self.path,
            serializer,
            file_existed,
        })
    }
}
