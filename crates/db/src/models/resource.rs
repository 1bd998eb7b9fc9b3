//! The schema every CRUD resource is described by.
//!
//! A resource is a flat record: a numeric id, a set of text fields and an
//! optional image blob. [`ResourceFields`] describes the text fields,
//! [`Resource`] describes the record and its table. Repositories, handlers,
//! routes and views are all generic over [`Resource`].

use dunno_core::types::DbId;
use dunno_core::upload::Upload;
use sqlx::sqlite::SqliteRow;
use sqlx::FromRow;
use validator::Validate;

/// One scalar text field of a resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    /// Column name in the resource table. Also the struct field name, so
    /// validation errors are keyed by it.
    pub column: &'static str,
    /// Name of the HTML form input.
    pub form_name: &'static str,
    /// Human-readable label.
    pub label: &'static str,
    /// Rendered as a `<textarea>` rather than a single-line input.
    pub multiline: bool,
    /// Included in the list search.
    pub searchable: bool,
}

impl FieldSpec {
    pub const fn line(column: &'static str, form_name: &'static str) -> Self {
        Self {
            column,
            form_name,
            label: form_name,
            multiline: false,
            searchable: false,
        }
    }

    pub const fn text(column: &'static str, form_name: &'static str) -> Self {
        Self {
            multiline: true,
            ..Self::line(column, form_name)
        }
    }

    pub const fn searchable(self) -> Self {
        Self {
            searchable: true,
            ..self
        }
    }
}

/// The scalar (non-image) fields of a resource.
pub trait ResourceFields:
    Clone + Default + Send + Sync + Unpin + Validate + for<'r> FromRow<'r, SqliteRow> + 'static
{
    /// Field descriptions in column order.
    const FIELDS: &'static [FieldSpec];

    /// Read a field by column name.
    fn value(&self, column: &str) -> Option<&str>;

    /// Write a field by column name. Returns `false` for an unknown column.
    fn set_value(&mut self, column: &str, value: String) -> bool;
}

/// A persisted record with an id, scalar fields and an optional image.
pub trait Resource: Send + Sync + Unpin + for<'r> FromRow<'r, SqliteRow> + 'static {
    type Fields: ResourceFields;

    /// Backing table.
    const TABLE: &'static str;
    /// Singular display name, also used in not-found errors.
    const ENTITY: &'static str;
    /// Plural name, used as the route segment (`/Books`).
    const PLURAL: &'static str;
    /// Whether the list page offers a search form.
    const SEARCHABLE: bool;

    fn assemble(id: DbId, fields: Self::Fields, image: Option<Vec<u8>>) -> Self;

    fn id(&self) -> DbId;

    fn fields(&self) -> &Self::Fields;

    fn image(&self) -> Option<&[u8]>;

    fn set_image(&mut self, image: Option<Vec<u8>>);
}

/// The shape a resource is submitted in from an HTML form.
///
/// Same scalar fields as the entity, but the image is the incoming upload
/// (if any) rather than stored bytes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResourcePost<F> {
    /// `None` when the form carried no (or an unparseable) id.
    pub id: Option<DbId>,
    pub fields: F,
    pub image: Option<Upload>,
}
