//! News entity model.

use dunno_core::types::DbId;
use serde::Serialize;
use sqlx::FromRow;
use validator::Validate;

use crate::models::resource::{FieldSpec, Resource, ResourceFields, ResourcePost};

/// Scalar fields of a news item.
#[derive(Debug, Clone, Default, PartialEq, Eq, FromRow, Serialize, Validate)]
pub struct NewsFields {
    #[validate(length(min = 1, message = "The Title field is required."))]
    pub title: String,
    #[validate(length(min = 1, message = "The Description field is required."))]
    pub description: String,
}

/// A row from the `news` table.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
pub struct News {
    pub id: DbId,
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub fields: NewsFields,
    #[serde(skip)]
    pub image: Option<Vec<u8>>,
}

/// Form submission for a news item.
pub type NewsPost = ResourcePost<NewsFields>;

impl ResourceFields for NewsFields {
    const FIELDS: &'static [FieldSpec] = &[
        FieldSpec::line("title", "Title").searchable(),
        FieldSpec::text("description", "Description").searchable(),
    ];

    fn value(&self, column: &str) -> Option<&str> {
        match column {
            "title" => Some(&self.title),
            "description" => Some(&self.description),
            _ => None,
        }
    }

    fn set_value(&mut self, column: &str, value: String) -> bool {
        match column {
            "title" => self.title = value,
            "description" => self.description = value,
            _ => return false,
        }
        true
    }
}

impl Resource for News {
    type Fields = NewsFields;

    const TABLE: &'static str = "news";
    const ENTITY: &'static str = "News";
    const PLURAL: &'static str = "News";
    // Only books have a search form.
    const SEARCHABLE: bool = false;

    fn assemble(id: DbId, fields: NewsFields, image: Option<Vec<u8>>) -> Self {
        Self { id, fields, image }
    }

    fn id(&self) -> DbId {
        self.id
    }

    fn fields(&self) -> &NewsFields {
        &self.fields
    }

    fn image(&self) -> Option<&[u8]> {
        self.image.as_deref()
    }

    fn set_image(&mut self, image: Option<Vec<u8>>) {
        self.image = image;
    }
}
