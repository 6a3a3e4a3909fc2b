//! Serialization layer for the users document. Defaults to JSON via serde_json.
//!
//! Implement [`Serializer`] if you need a different on-disk format.

use crate::error::{Error, Result};
use crate::model::{User, UsersFile};
use serde::Serialize;

/// Converts the users document to/from bytes for persistence.
pub trait Serializer: Send + Sync {
    /// Encode `users` wrapped in the `{"users": [...]}` document.
    fn serialize(&self, users: &[User]) -> Result<Vec<u8>>;

    /// Decode bytes back into a document.
    fn deserialize(&self, bytes: &[u8]) -> Result<UsersFile>;
}

/// JSON serializer with optional pretty-printing.
#[derive(Debug, Clone, Default)]
pub struct JsonSerializer {
    pretty: bool,
}

impl JsonSerializer {
    /// Compact JSON (single line, no extra whitespace).
    pub fn new() -> Self {
        Self::default()
    }

    /// Two-space indented JSON followed by a newline. This is the format
    /// `users.json` is written in.
    pub fn pretty() -> Self {
        Self { pretty: true }
    }

    /// `true` when this serializer indents its output.
    pub fn is_pretty(&self) -> bool {
        self.pretty
    }
}

#[derive(Serialize)]
struct UsersDoc<'a> {
    users: &'a [User],
}

impl Serializer for JsonSerializer {
    fn serialize(&self, users: &[User]) -> Result<Vec<u8>> {
        let doc = UsersDoc { users };
        if self.pretty {
            let mut bytes =
                serde_json::to_vec_pretty(&doc).map_err(|e| Error::Serialize(e.to_string()))?;
            bytes.push(b'\n');
            Ok(bytes)
        } else {
            serde_json::to_vec(&doc).map_err(|e| Error::Serialize(e.to_string()))
        }
    }

    fn deserialize(&self, bytes: &[u8]) -> Result<UsersFile> {
        serde_json::from_slice(bytes).map_err(Error::from)
    }
}
