//! Generic CRUD actions for any [`Resource`].
//!
//! Every mutating action verifies the anti-forgery token before touching
//! the database. Successful writes redirect (303) to the resource list;
//! validation failures re-render the submitted form with status 422.

use axum::extract::{Multipart, Path, State};
use axum::http::{header, StatusCode};
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::Form;
use dunno_core::error::CoreError;
use dunno_core::types::DbId;
use dunno_core::upload::{sniff_content_type, Upload};
use dunno_db::models::mapping::{entity_from_post, post_from_entity};
use dunno_db::models::resource::{Resource, ResourcePost};
use dunno_db::repositories::ResourceRepo;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::forms::{field_errors, ConfirmForm, FieldErrors, SearchForm, SubmittedForm};
use crate::state::AppState;
use crate::views::{self, resource::FormMode};

fn not_found<R: Resource>(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: R::ENTITY,
        id,
    })
}

fn to_list<R: Resource>() -> Response {
    Redirect::to(&format!("/{}", R::PLURAL)).into_response()
}

/// Route ids that are not a number name no record, same as an unknown id.
fn parse_id<R: Resource>(raw: &str) -> AppResult<DbId> {
    raw.parse()
        .map_err(|_| AppError::NotFound(format!("{} with id {raw} not found", R::ENTITY)))
}

fn log_upload<R: Resource>(upload: &Upload) {
    tracing::debug!(
        entity = R::ENTITY,
        file_name = %upload.file_name,
        content_type = upload.content_type.as_deref().unwrap_or("-"),
        bytes = upload.len(),
        empty = upload.is_empty(),
        "Received image",
    );
}

async fn load<R: Resource>(state: &AppState, id: DbId) -> AppResult<R> {
    ResourceRepo::<R>::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found::<R>(id))
}

// ---------------------------------------------------------------------------
// List
// ---------------------------------------------------------------------------

/// GET /{Resource}
pub async fn index<R: Resource>(State(state): State<AppState>) -> AppResult<Html<String>> {
    let items = ResourceRepo::<R>::list(&state.pool).await?;
    let token = state.antiforgery.issue();
    Ok(Html(views::resource::index(&items, None, &token)))
}

/// POST /{Resource}
///
/// Filtered list. Only routed for resources with search enabled.
pub async fn search<R: Resource>(
    State(state): State<AppState>,
    Form(form): Form<SearchForm>,
) -> AppResult<Html<String>> {
    state.antiforgery.verify(form.token.as_deref())?;

    let term = form.search_string.unwrap_or_default();
    let items = ResourceRepo::<R>::search(&state.pool, &term).await?;

    tracing::debug!(entity = R::ENTITY, term = %term, hits = items.len(), "Search");

    let token = state.antiforgery.issue();
    Ok(Html(views::resource::index(&items, Some(&term), &token)))
}

// ---------------------------------------------------------------------------
// Details / image
// ---------------------------------------------------------------------------

/// GET /{Resource}/Details/{id}
pub async fn details<R: Resource>(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> AppResult<Html<String>> {
    let id = parse_id::<R>(&raw_id)?;
    let item = load::<R>(&state, id).await?;
    Ok(Html(views::resource::details(&item)))
}

/// GET /{Resource}/Image/{id}
///
/// Serves the stored image bytes. 404 when the record or its image is
/// missing.
pub async fn image<R: Resource>(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> AppResult<Response> {
    let id = parse_id::<R>(&raw_id)?;
    let mut conn = state.pool.acquire().await?;
    let bytes = ResourceRepo::<R>::find_image(&mut conn, id)
        .await?
        .flatten()
        .filter(|b| !b.is_empty())
        .ok_or_else(|| not_found::<R>(id))?;

    Ok((
        [
            (header::CONTENT_TYPE, sniff_content_type(&bytes)),
            (header::CACHE_CONTROL, "no-cache"),
        ],
        bytes,
    )
        .into_response())
}

/// GET /{Resource}/Details, /Edit, /Delete without an id.
pub async fn missing_id<R: Resource>() -> Response {
    views::error_page(
        StatusCode::NOT_FOUND,
        &format!("No {} id given", R::ENTITY.to_lowercase()),
    )
}

// ---------------------------------------------------------------------------
// Create
// ---------------------------------------------------------------------------

/// GET /{Resource}/Create
pub async fn create_form<R: Resource>(State(state): State<AppState>) -> Html<String> {
    let post = ResourcePost::<R::Fields>::default();
    let token = state.antiforgery.issue();
    Html(views::resource::form::<R>(
        FormMode::Create,
        &post,
        &FieldErrors::new(),
        &token,
    ))
}

/// POST /{Resource}/Create
pub async fn create<R: Resource>(
    State(state): State<AppState>,
    multipart: Multipart,
) -> AppResult<Response> {
    let form = SubmittedForm::read(multipart).await?;
    state.antiforgery.verify(form.token())?;
    let post: ResourcePost<R::Fields> = form.into_post();

    if let Err(errors) = post.fields.validate() {
        return Ok(redisplay::<R>(&state, FormMode::Create, &post, &field_errors(&errors)));
    }

    let mut entity: R = entity_from_post(&post);
    if let Some(upload) = &post.image {
        log_upload::<R>(upload);
    }
    entity.set_image(post.image.map(Upload::into_bytes));

    let created = ResourceRepo::<R>::create(&state.pool, &entity).await?;

    tracing::info!(
        entity = R::ENTITY,
        id = created.id(),
        image_bytes = created.image().map_or(0, <[u8]>::len),
        "Created",
    );

    Ok(to_list::<R>())
}

// ---------------------------------------------------------------------------
// Edit
// ---------------------------------------------------------------------------

/// GET /{Resource}/Edit/{id}
pub async fn edit_form<R: Resource>(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> AppResult<Html<String>> {
    let id = parse_id::<R>(&raw_id)?;
    let item = load::<R>(&state, id).await?;
    let post = post_from_entity(&item);
    let token = state.antiforgery.issue();
    Ok(Html(views::resource::form::<R>(
        FormMode::Edit,
        &post,
        &FieldErrors::new(),
        &token,
    )))
}

/// POST /{Resource}/Edit/{id}
///
/// The payload id must match the route id. Without a new upload the
/// previously stored image is re-read and written back unchanged. The
/// re-read and the write share one transaction.
///
/// If the write matches no row the record is checked once more: gone
/// means 404, still present is an unresolved conflict and fails the
/// request.
pub async fn edit<R: Resource>(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    multipart: Multipart,
) -> AppResult<Response> {
    let id = parse_id::<R>(&raw_id)?;
    let form = SubmittedForm::read(multipart).await?;
    state.antiforgery.verify(form.token())?;
    let post: ResourcePost<R::Fields> = form.into_post();

    if post.id != Some(id) {
        tracing::debug!(entity = R::ENTITY, id, payload_id = ?post.id, "Edit id mismatch");
        return Err(not_found::<R>(id));
    }

    if let Err(errors) = post.fields.validate() {
        return Ok(redisplay::<R>(&state, FormMode::Edit, &post, &field_errors(&errors)));
    }

    let mut entity: R = entity_from_post(&post);
    let uploaded = post.image.is_some();

    let mut tx = state.pool.begin().await?;
    let image = match post.image {
        Some(upload) => {
            log_upload::<R>(&upload);
            Some(upload.into_bytes())
        }
        None => ResourceRepo::<R>::find_image(&mut tx, id).await?.flatten(),
    };
    entity.set_image(image);

    if !ResourceRepo::<R>::update(&mut tx, &entity).await? {
        tx.rollback().await?;
        if !ResourceRepo::<R>::exists(&state.pool, id).await? {
            return Err(not_found::<R>(id));
        }
        return Err(AppError::Core(CoreError::Internal(format!(
            "Concurrency conflict updating {} {id}",
            R::ENTITY
        ))));
    }
    tx.commit().await?;

    tracing::info!(entity = R::ENTITY, id, image_replaced = uploaded, "Updated");

    Ok(to_list::<R>())
}

// ---------------------------------------------------------------------------
// Delete
// ---------------------------------------------------------------------------

/// GET /{Resource}/Delete/{id}
pub async fn delete_form<R: Resource>(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> AppResult<Html<String>> {
    let id = parse_id::<R>(&raw_id)?;
    let item = load::<R>(&state, id).await?;
    let token = state.antiforgery.issue();
    Ok(Html(views::resource::delete(&item, &token)))
}

/// POST /{Resource}/Delete/{id}
pub async fn delete<R: Resource>(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    Form(form): Form<ConfirmForm>,
) -> AppResult<Response> {
    let id = parse_id::<R>(&raw_id)?;
    state.antiforgery.verify(form.token.as_deref())?;

    if !ResourceRepo::<R>::delete(&state.pool, id).await? {
        return Err(not_found::<R>(id));
    }

    tracing::info!(entity = R::ENTITY, id, "Deleted");

    Ok(to_list::<R>())
}

fn redisplay<R: Resource>(
    state: &AppState,
    mode: FormMode,
    post: &ResourcePost<R::Fields>,
    errors: &FieldErrors,
) -> Response {
    let token = state.antiforgery.issue();
    (
        StatusCode::UNPROCESSABLE_ENTITY,
        Html(views::resource::form::<R>(mode, post, errors, &token)),
    )
        .into_response()
}
