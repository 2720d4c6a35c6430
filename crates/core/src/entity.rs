//! Entity trait: identity + continuity across state changes.

use chrono::{DateTime, Utc};

use crate::EntityId;

/// A record owned by an entity store.
///
/// The store assigns the identifier and both timestamps; everything else comes
/// from a caller-supplied [`Entity::Draft`]. Implementations must keep `id` and
/// `created_at` untouched in [`Entity::replace`].
pub trait Entity: Clone + Send + Sync + 'static {
    /// The caller-supplied part of the entity (all mutable fields).
    type Draft: Send;

    /// Human-readable collection name used in errors and logs.
    const KIND: &'static str;

    fn id(&self) -> EntityId;

    /// Materialize a new record from a draft.
    fn create(id: EntityId, draft: Self::Draft, now: DateTime<Utc>) -> Self;

    /// Full replace of all mutable fields. Refreshes `updated_at`.
    fn replace(&mut self, draft: Self::Draft, now: DateTime<Utc>);

    /// Refresh `updated_at` after an in-place mutation.
    fn touch(&mut self, now: DateTime<Utc>);
}
