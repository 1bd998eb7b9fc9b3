//! Field mapping between submission projections and entities.
//!
//! Only the id and the scalar fields are copied. The image is never mapped
//! in either direction: an upload is not stored bytes, and stored bytes are
//! never echoed back into a form. Callers decide what happens to it.

use crate::models::resource::{Resource, ResourcePost};

/// Build an entity from a submitted form. The image is left empty.
///
/// A missing id maps to `0`; create ignores it and the database assigns one.
pub fn entity_from_post<R: Resource>(post: &ResourcePost<R::Fields>) -> R {
    R::assemble(post.id.unwrap_or_default(), post.fields.clone(), None)
}

/// Build a form projection from a stored entity, for the edit page.
pub fn post_from_entity<R: Resource>(entity: &R) -> ResourcePost<R::Fields> {
    ResourcePost {
        id: Some(entity.id()),
        fields: entity.fields().clone(),
        image: None,
    }
}
