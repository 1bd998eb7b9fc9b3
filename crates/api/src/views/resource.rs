//! Pages for a single resource type: list, details, create/edit form and
//! delete confirmation.

use dunno_core::antiforgery::TOKEN_FIELD;
use dunno_db::models::resource::{Resource, ResourceFields, ResourcePost};

use super::{escape, layout};
use crate::forms::{FieldErrors, ID_FIELD, IMAGE_FIELD};

/// Which submission a form page is for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit,
}

impl FormMode {
    fn action(self) -> &'static str {
        match self {
            FormMode::Create => "Create",
            FormMode::Edit => "Edit",
        }
    }
}

fn token_input(token: &str) -> String {
    format!(
        r#"<input type="hidden" name="{TOKEN_FIELD}" value="{}">"#,
        escape(token)
    )
}

fn image_tag<R: Resource>(item: &R) -> String {
    match item.image() {
        Some(bytes) if !bytes.is_empty() => format!(
            r#"<img class="imgAdjust" src="/{}/Image/{}" alt="{}">"#,
            R::PLURAL,
            item.id(),
            escape(item.fields().value("title").unwrap_or_default()),
        ),
        _ => String::new(),
    }
}

/// Definition list of every scalar field of `item`.
fn field_list<R: Resource>(item: &R) -> String {
    let fields = item.fields();
    let mut out = String::from("<dl>");
    for field in <R::Fields as ResourceFields>::FIELDS {
        out.push_str(&format!(
            "<dt>{}</dt><dd>{}</dd>",
            escape(field.label),
            escape(fields.value(field.column).unwrap_or_default())
        ));
    }
    out.push_str("</dl>");
    out
}

/// The list page. `search` is the term a filtered list was produced with.
pub fn index<R: Resource>(items: &[R], search: Option<&str>, token: &str) -> String {
    let plural = R::PLURAL;
    let mut content = format!(
        "<h1>{plural}</h1>\n<p><a href=\"/{plural}/Create\">Create New</a></p>\n"
    );

    if R::SEARCHABLE {
        content.push_str(&format!(
            r#"<form method="post" action="/{plural}">{}<input type="text" name="searchString" value="{}"><button type="submit">Search</button></form>
"#,
            token_input(token),
            escape(search.unwrap_or_default()),
        ));
    }

    if items.is_empty() {
        content.push_str("<p class=\"empty\">Nothing here yet.</p>\n");
    }

    for item in items {
        let fields = item.fields();
        let id = item.id();
        content.push_str(&format!(
            r#"<article class="card">{image}<h2 class="titleAdjust">{title}</h2><p class="descAdjust">{description}</p><p><a href="/{plural}/Edit/{id}">Edit</a> | <a href="/{plural}/Details/{id}">Details</a> | <a href="/{plural}/Delete/{id}">Delete</a></p></article>
"#,
            image = image_tag(item),
            title = escape(fields.value("title").unwrap_or_default()),
            description = escape(fields.value("description").unwrap_or_default()),
        ));
    }

    layout(plural, &content)
}

/// The details page.
pub fn details<R: Resource>(item: &R) -> String {
    let plural = R::PLURAL;
    let id = item.id();
    let content = format!(
        "<h1>Details</h1>\n<h4>{entity}</h4>\n{image}\n{fields}\n<p><a href=\"/{plural}/Edit/{id}\">Edit</a> | <a href=\"/{plural}\">Back to List</a></p>",
        entity = R::ENTITY,
        image = image_tag(item),
        fields = field_list(item),
    );
    layout("Details", &content)
}

/// The create or edit form, pre-filled with `post` and annotated with
/// `errors`.
pub fn form<R: Resource>(
    mode: FormMode,
    post: &ResourcePost<R::Fields>,
    errors: &FieldErrors,
    token: &str,
) -> String {
    let plural = R::PLURAL;
    let action = match (mode, post.id) {
        (FormMode::Edit, Some(id)) => format!("/{plural}/Edit/{id}"),
        _ => format!("/{plural}/{}", mode.action()),
    };

    let mut content = format!(
        "<h1>{}</h1>\n<h4>{}</h4>\n<form method=\"post\" action=\"{action}\" enctype=\"multipart/form-data\">\n{}\n",
        mode.action(),
        R::ENTITY,
        token_input(token),
    );

    if mode == FormMode::Edit {
        if let Some(id) = post.id {
            content.push_str(&format!(
                "<input type=\"hidden\" name=\"{ID_FIELD}\" value=\"{id}\">\n"
            ));
        }
    }

    for field in <R::Fields as ResourceFields>::FIELDS {
        let value = escape(post.fields.value(field.column).unwrap_or_default());
        let name = field.form_name;
        let input = if field.multiline {
            format!(r#"<textarea id="{name}" name="{name}">{value}</textarea>"#)
        } else {
            format!(r#"<input type="text" id="{name}" name="{name}" value="{value}">"#)
        };
        let messages: String = errors
            .get(field.column)
            .into_iter()
            .flatten()
            .map(|m| format!(r#"<span class="field-validation-error">{}</span>"#, escape(m)))
            .collect();
        content.push_str(&format!(
            "<div class=\"form-group\"><label for=\"{name}\">{}</label>{input}{messages}</div>\n",
            escape(field.label),
        ));
    }

    content.push_str(&format!(
        r#"<div class="form-group"><label for="{IMAGE_FIELD}">{IMAGE_FIELD}</label><input type="file" id="{IMAGE_FIELD}" name="{IMAGE_FIELD}" accept="image/*"></div>
<button type="submit">{}</button>
</form>
<p><a href="/{plural}">Back to List</a></p>"#,
        if mode == FormMode::Create { "Create" } else { "Save" },
    ));

    layout(mode.action(), &content)
}

/// The delete confirmation page.
pub fn delete<R: Resource>(item: &R, token: &str) -> String {
    let plural = R::PLURAL;
    let id = item.id();
    let content = format!(
        "<h1>Delete</h1>\n<h3>Are you sure you want to delete this?</h3>\n<h4>{entity}</h4>\n{image}\n{fields}\n<form method=\"post\" action=\"/{plural}/Delete/{id}\">{token}<button type=\"submit\">Delete</button> | <a href=\"/{plural}\">Back to List</a></form>",
        entity = R::ENTITY,
        image = image_tag(item),
        fields = field_list(item),
        token = token_input(token),
    );
    layout("Delete", &content)
}
