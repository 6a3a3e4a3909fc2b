//! Disk I/O helpers: load the users file and write it back atomically.
//!
//! The rename-over approach is close to atomic on most platforms. On FAT32 or
//! network shares there are no hard guarantees.

use crate::error::{Error, Result};
use crate::model::User;
use crate::serializer::Serializer;
use std::path::{Path, PathBuf};

/// Reads and deserializes the file at `path`.
///
/// A missing file yields an empty collection. Anything else that goes wrong,
/// including an empty or truncated file, is an error.
pub fn load<S>(path: &Path, serializer: &S) -> Result<Vec<User>>
where
    S: Serializer,
{
    Ok(load_existing(path, serializer)?.unwrap_or_default())
}

/// Like [`load`], but returns `None` instead of an empty collection when the
/// file does not exist.
pub fn load_existing<S>(path: &Path, serializer: &S) -> Result<Option<Vec<User>>>
where
    S: Serializer,
{
    let bytes = match std::fs::read(path) {
        Ok(b) => b,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!(path = %path.display(), "users file missing, starting empty");
            return Ok(None);
        }
        Err(e) => return Err(Error::Io(e.to_string())),
    };
    let doc = serializer.deserialize(&bytes)?;
    Ok(Some(doc.users))
}

/// Wraps `users` in `{"users": [...]}` and rewrites the whole file.
pub fn save<S>(path: &Path, users: &[User], serializer: &S) -> Result<()>
where
    S: Serializer,
{
    let bytes = serializer.serialize(users)?;
    atomic_write(path, &bytes)?;
    tracing::debug!(path = %path.display(), count = users.len(), "users file written");
    Ok(())
}

/// Write `bytes` to `<path>.tmp` and then rename over `path`. This avoids
/// leaving a half-written file if the process crashes mid-write.
pub fn atomic_write(path: &Path, bytes: &[u8]) -> Result<()> {
    let tmp = tmp_path(path);
    std::fs::write(&tmp, bytes).map_err(|e| Error::Io(e.to_string()))?;
    std::fs::rename(&tmp, path).map_err(|e| Error::Io(e.to_string()))?;
    Ok(())
}

/// `<path>.<ext>.tmp`, next to the target so the rename stays on one filesystem.
pub(crate) fn tmp_path(path: &Path) -> PathBuf {
    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("json");
    path.with_extension(format!("{ext}.tmp"))
}
