//! Note entity model.

use dunno_core::types::DbId;
use serde::Serialize;
use sqlx::FromRow;
use validator::Validate;

use crate::models::resource::{FieldSpec, Resource, ResourceFields, ResourcePost};

/// Scalar fields of a note.
#[derive(Debug, Clone, Default, PartialEq, Eq, FromRow, Serialize, Validate)]
pub struct NoteFields {
    #[validate(length(min = 1, message = "The Title field is required."))]
    pub title: String,
    #[validate(length(min = 1, message = "The Description field is required."))]
    pub description: String,
}

/// A row from the `notes` table.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
pub struct Note {
    pub id: DbId,
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub fields: NoteFields,
    #[serde(skip)]
    pub image: Option<Vec<u8>>,
}

/// Form submission for a note.
pub type NotePost = ResourcePost<NoteFields>;

impl ResourceFields for NoteFields {
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

impl Resource for Note {
    type Fields = NoteFields;

    const TABLE: &'static str = "notes";
    const ENTITY: &'static str = "Note";
    const PLURAL: &'static str = "Notes";
    const SEARCHABLE: bool = false;

    fn assemble(id: DbId, fields: NoteFields, image: Option<Vec<u8>>) -> Self {
        Self { id, fields, image }
    }

    fn id(&self) -> DbId {
        self.id
    }

    fn fields(&self) -> &NoteFields {
        &self.fields
    }

    fn image(&self) -> Option<&[u8]> {
        self.image.as_deref()
    }

    fn set_image(&mut self, image: Option<Vec<u8>>) {
        self.image = image;
    }
}
