//! Binding of submitted HTML forms.
//!
//! Create and edit forms are `multipart/form-data` (they carry an image
//! file); search and delete-confirm forms are url-encoded.

use std::collections::{BTreeMap, HashMap};

use axum::extract::Multipart;
use dunno_core::antiforgery::TOKEN_FIELD;
use dunno_core::upload::Upload;
use dunno_db::models::resource::{ResourceFields, ResourcePost};
use serde::Deserialize;
use validator::ValidationErrors;

use crate::error::AppResult;

/// Form input carrying the record id.
pub const ID_FIELD: &str = "Id";
/// Form input carrying the image file.
pub const IMAGE_FIELD: &str = "Image";

/// Validation messages keyed by column name.
pub type FieldErrors = BTreeMap<String, Vec<String>>;

/// A fully read `multipart/form-data` submission.
#[derive(Debug, Default)]
pub struct SubmittedForm {
    values: HashMap<String, String>,
    image: Option<Upload>,
}

impl SubmittedForm {
    /// Read every part of the submission into memory.
    ///
    /// Text parts are kept by name (last one wins); the `Image` part is
    /// read fully as bytes. Unknown file parts are drained and ignored.
    pub async fn read(mut multipart: Multipart) -> AppResult<Self> {
        let mut form = Self::default();

        while let Some(field) = multipart.next_field().await? {
            let name = field.name().unwrap_or("").to_string();
            if name == IMAGE_FIELD {
                let file_name = field.file_name().map(str::to_string);
                let content_type = field.content_type().map(str::to_string);
                let data = field.bytes().await?;
                form.image =
                    Upload::from_part(file_name.as_deref(), content_type.as_deref(), data.to_vec());
            } else if field.file_name().is_some() {
                field.bytes().await?;
            } else {
                let text = field.text().await?;
                form.values.insert(name, text);
            }
        }

        Ok(form)
    }

    /// The submitted anti-forgery token, if any.
    pub fn token(&self) -> Option<&str> {
        self.values.get(TOKEN_FIELD).map(String::as_str)
    }

    /// Bind the submission onto a resource's submission projection.
    ///
    /// Fields that are missing or contain only whitespace bind as empty
    /// strings so that required-field validation rejects them. An id that
    /// does not parse binds as `None`.
    pub fn into_post<F: ResourceFields>(self) -> ResourcePost<F> {
        let id = self
            .values
            .get(ID_FIELD)
            .and_then(|raw| raw.trim().parse().ok());

        let mut fields = F::default();
        for field in F::FIELDS {
            let value = self
                .values
                .get(field.form_name)
                .filter(|v| !v.trim().is_empty())
                .cloned()
                .unwrap_or_default();
            fields.set_value(field.column, value);
        }

        ResourcePost {
            id,
            fields,
            image: self.image,
        }
    }
}

/// The list search form (`POST /Books`).
#[derive(Debug, Deserialize)]
pub struct SearchForm {
    #[serde(rename = "searchString", default)]
    pub search_string: Option<String>,
    #[serde(rename = "__RequestVerificationToken", default)]
    pub token: Option<String>,
}

/// The delete confirmation form.
#[derive(Debug, Deserialize)]
pub struct ConfirmForm {
    #[serde(rename = "__RequestVerificationToken", default)]
    pub token: Option<String>,
}

/// Flatten validator output into display messages per column.
pub fn field_errors(errors: &ValidationErrors) -> FieldErrors {
    errors
        .field_errors()
        .into_iter()
        .map(|(field, errs)| {
            let messages = errs
                .iter()
                .map(|e| {
                    e.message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| format!("The {field} field is invalid."))
                })
                .collect();
            (field.to_string(), messages)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use dunno_db::models::book::BookFields;
    use validator::Validate;

    use super::*;

    fn form(pairs: &[(&str, &str)]) -> SubmittedForm {
        SubmittedForm {
            values: pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            image: None,
        }
    }

    #[test]
    fn binds_fields_by_form_name() {
        let post: ResourcePost<BookFields> = form(&[
            ("Id", "12"),
            ("Title", "Atlas"),
            ("Description", "Maps"),
            ("Displacement", "1kg"),
        ])
        .into_post();

        assert_eq!(post.id, Some(12));
        assert_eq!(post.fields.title, "Atlas");
        assert_eq!(post.fields.description, "Maps");
        assert_eq!(post.fields.displacement, "1kg");
        assert!(post.image.is_none());
    }

    #[test]
    fn unparseable_id_binds_as_none() {
        let post: ResourcePost<BookFields> = form(&[("Id", "abc")]).into_post();
        assert_eq!(post.id, None);
    }

    #[test]
    fn whitespace_only_fields_fail_validation() {
        let post: ResourcePost<BookFields> =
            form(&[("Title", "   "), ("Description", "Maps"), ("Displacement", "1kg")])
                .into_post();

        let errors = post.fields.validate().unwrap_err();
        let messages = field_errors(&errors);
        assert_eq!(
            messages.get("title"),
            Some(&vec!["The Title field is required.".to_string()])
        );
        assert!(!messages.contains_key("description"));
    }

    #[test]
    fn token_is_read_from_hidden_field() {
        let submitted = form(&[("__RequestVerificationToken", "abc.1.def")]);
        assert_eq!(submitted.token(), Some("abc.1.def"));
        assert_eq!(form(&[]).token(), None);
    }
}
