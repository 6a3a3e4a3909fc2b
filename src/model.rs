//! User records and the on-disk document that wraps them.

use serde::{Deserialize, Deserializer, Serialize};

/// A single user record.
///
/// Field names on the wire are the capitalized ones (`"ID"`, `"Name"`, ...).
/// Input also accepts the lower-case spelling, and any missing field falls
/// back to its zero value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct User {
    /// Assigned by the store; whatever a client sends is overwritten.
    #[serde(rename = "ID", alias = "id")]
    pub id: i64,
    /// Display name.
    #[serde(rename = "Name", alias = "name")]
    pub name: String,
    /// Free-form role tag such as `"Author"` or `"Reader"`.
    #[serde(rename = "Type", alias = "type")]
    pub kind: String,
    /// Age in years.
    #[serde(rename = "Age", alias = "age")]
    pub age: i64,
    /// Contact address, not validated.
    #[serde(rename = "Email", alias = "email")]
    pub email: String,
    /// Phone number stored as a plain integer.
    #[serde(rename = "Phone", alias = "phone")]
    pub phone: i64,
    /// City of residence.
    #[serde(rename = "City", alias = "city")]
    pub city: String,
}

/// The persisted document as read back from disk: `{"users": [...]}`.
///
/// The HTTP list endpoint returns the bare array instead; only the file
/// carries the wrapper. Writing goes through
/// [`Serializer::serialize`](crate::serializer::Serializer::serialize),
/// which wraps a borrowed slice the same way.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct UsersFile {
    /// Every record, in file order.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub users: Vec<User>,
}

// `{"users": null}` is a valid file and means "no users".
fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<User>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<User>>::deserialize(deserializer)?.unwrap_or_default())
}
