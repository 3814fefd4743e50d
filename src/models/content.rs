//! Shared shape of the ordered content collections.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};

use super::ServerTimestamp;

/// A kind of ordered content kept in its own collection.
///
/// Implementors are the editable field set of a record; the store adds the identifier
/// and timestamps, see [`Entry`].
pub trait ContentKind:
    Serialize + DeserializeOwned + Clone + Default + Send + Sync + 'static
{
    /// Collection holding every record of this kind.
    const COLLECTION: &'static str;
    /// Human-readable name used in messages.
    const LABEL: &'static str;

    /// Partial update; `None` fields are left untouched.
    type Patch: Serialize + DeserializeOwned + Clone + Default + Send + Sync + 'static;

    fn sort_order(&self) -> u32;

    fn set_sort_order(&mut self, order: u32);

    /// Name of the first required field that is blank, if any.
    fn missing_field(&self) -> Option<&'static str>;

    /// Patch that writes every field of `self`.
    fn to_patch(&self) -> Self::Patch;
}

/// A stored record together with its store-assigned identity.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Entry<K> {
    pub id: String,
    #[serde(flatten)]
    pub fields: K,
    pub created_at: ServerTimestamp,
    pub updated_at: ServerTimestamp,
}

pub(crate) fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

/// Deserialize a patch field that can be cleared: absent stays `None`, `null` becomes
/// `Some(None)`.
pub(crate) fn clearable<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}
