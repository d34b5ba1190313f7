//! Core traits shared by all climaqual entities.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::error::QualResult;

/// Primary key type. Entities are identified by UUIDs generated at creation
/// time, so an id is never "missing" on an in-memory value.
pub type Id = Uuid;

/// Generate a fresh entity id.
pub fn new_id() -> Id {
    Uuid::new_v4()
}

/// Trait for entities that carry a primary key
pub trait Identifiable {
    fn id(&self) -> Id;
}

/// Trait for entities with created_at / updated_at timestamps
pub trait Timestamped {
    fn created_at(&self) -> DateTime<Utc>;
    fn updated_at(&self) -> DateTime<Utc>;
}

/// Base trait for all domain entities
pub trait Entity: Identifiable + Timestamped + Send + Sync {
    /// Human-readable type name for error messages
    const TYPE_NAME: &'static str;
}

/// Persistence port for the external data layer.
///
/// The workflow core never performs I/O itself; callers read an entity,
/// run a service over it, and write the result back as a whole. A
/// qualification object's full stage set is the unit of atomicity, which
/// is why the port exposes whole-entity `save` rather than field patches.
#[async_trait]
pub trait Repository<T: Entity>: Send + Sync {
    /// Find by primary key
    async fn find(&self, id: Id) -> QualResult<T>;

    /// Find by primary key, returning None if not found
    async fn find_optional(&self, id: Id) -> QualResult<Option<T>>;

    /// Write the entity back in full
    async fn save(&self, entity: &T) -> QualResult<()>;

    /// Delete an entity
    async fn delete(&self, id: Id) -> QualResult<()>;
}
