//! Route generator for a CRUD resource.

use axum::routing::get;
use axum::Router;
use dunno_db::models::resource::Resource;

use crate::handlers::resource as h;
use crate::state::AppState;

/// Routes for resource `R`, mounted under `/{R::PLURAL}`.
///
/// ```text
/// GET  /                 -> index
/// POST /                 -> search        (searchable resources only)
/// GET  /Details/{id}     -> details
/// GET  /Image/{id}       -> image
/// GET  /Create           -> create_form
/// POST /Create           -> create
/// GET  /Edit/{id}        -> edit_form
/// POST /Edit/{id}        -> edit
/// GET  /Delete/{id}      -> delete_form
/// POST /Delete/{id}      -> delete
/// GET  /Details, /Edit, /Delete -> missing_id (404)
/// ```
pub fn router<R: Resource>() -> Router<AppState> {
    let base = format!("/{}", R::PLURAL);

    let list = if R::SEARCHABLE {
        get(h::index::<R>).post(h::search::<R>)
    } else {
        get(h::index::<R>)
    };

    Router::new()
        .route(&base, list)
        .route(&format!("{base}/Details/{{id}}"), get(h::details::<R>))
        .route(&format!("{base}/Image/{{id}}"), get(h::image::<R>))
        .route(
            &format!("{base}/Create"),
            get(h::create_form::<R>).post(h::create::<R>),
        )
        .route(
            &format!("{base}/Edit/{{id}}"),
            get(h::edit_form::<R>).post(h::edit::<R>),
        )
        .route(
            &format!("{base}/Delete/{{id}}"),
            get(h::delete_form::<R>).post(h::delete::<R>),
        )
        .route(&format!("{base}/Details"), get(h::missing_id::<R>))
        .route(&format!("{base}/Edit"), get(h::missing_id::<R>))
        .route(&format!("{base}/Delete"), get(h::missing_id::<R>))
}
