//! Entity models, the submission projection and the field-mapping layer.

pub mod book;
pub mod mapping;
pub mod news;
pub mod note;
pub mod resource;
