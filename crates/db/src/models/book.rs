//! Book entity model.

use dunno_core::types::DbId;
use serde::Serialize;
use sqlx::FromRow;
use validator::Validate;

use crate::models::resource::{FieldSpec, Resource, ResourceFields, ResourcePost};

/// Scalar fields of a book.
#[derive(Debug, Clone, Default, PartialEq, Eq, FromRow, Serialize, Validate)]
pub struct BookFields {
    #[validate(length(min = 1, message = "The Title field is required."))]
    pub title: String,
    #[validate(length(min = 1, message = "The Description field is required."))]
    pub description: String,
    /// Free text, e.g. a weight or size.
    #[validate(length(min = 1, message = "The Displacement field is required."))]
    pub displacement: String,
}

/// A row from the `books` table.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
pub struct Book {
    pub id: DbId,
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub fields: BookFields,
    #[serde(skip)]
    pub image: Option<Vec<u8>>,
}

/// Form submission for a book.
pub type BookPost = ResourcePost<BookFields>;

impl ResourceFields for BookFields {
    const FIELDS: &'static [FieldSpec] = &[
        FieldSpec::line("title", "Title").searchable(),
        FieldSpec::text("description", "Description").searchable(),
        FieldSpec::line("displacement", "Displacement"),
    ];

    fn value(&self, column: &str) -> Option<&str> {
        match column {
            "title" => Some(&self.title),
            "description" => Some(&self.description),
            "displacement" => Some(&self.displacement),
            _ => None,
        }
    }

    fn set_value(&mut self, column: &str, value: String) -> bool {
        match column {
            "title" => self.title = value,
            "description" => self.description = value,
            "displacement" => self.displacement = value,
            _ => return false,
        }
        true
    }
}

impl Resource for Book {
    type Fields = BookFields;

    const TABLE: &'static str = "books";
    const ENTITY: &'static str = "Book";
    const PLURAL: &'static str = "Books";
    const SEARCHABLE: bool = true;

    fn assemble(id: DbId, fields: BookFields, image: Option<Vec<u8>>) -> Self {
        Self { id, fields, image }
    }

    fn id(&self) -> DbId {
        self.id
    }

    fn fields(&self) -> &BookFields {
        &self.fields
    }

    fn image(&self) -> Option<&[u8]> {
        self.image.as_deref()
    }

    fn set_image(&mut self, image: Option<Vec<u8>>) {
        self.image = image;
    }
}
