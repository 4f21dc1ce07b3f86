//! HTTP Handlers

use std::io;
use std::sync::Arc;

use auth::middleware::CurrentUser;
use axum::Json;
use axum::extract::{Form, Multipart, Path, State};
use axum::http::{HeaderValue, StatusCode, header};
use axum::response::{IntoResponse, Response};
use futures::TryStreamExt;
use kernel::view::{Alert, FormView, ViewData};
use tokio_util::io::StreamReader;

use crate::application::config::GalleryConfig;
use crate::application::gallery_service::GalleryService;
use crate::domain::entity::gallery::Gallery;
use crate::domain::repository::GalleryRepository;
use crate::error::{GalleryError, GalleryResult};
use crate::presentation::dto::{GalleryForm, GalleryView, new_gallery_view};

/// Multipart field carrying uploaded images
pub const IMAGES_FIELD: &str = "images";

pub struct GalleryAppState<R>
where
    R: GalleryRepository,
{
    pub galleries: Arc<GalleryService<R>>,
}

impl<R> GalleryAppState<R>
where
    R: GalleryRepository + Sync,
{
    pub fn new(repo: R, config: &GalleryConfig) -> Self {
        Self {
            galleries: Arc::new(GalleryService::new(Arc::new(repo), config)),
        }
    }
}

impl<R> Clone for GalleryAppState<R>
where
    R: GalleryRepository,
{
    fn clone(&self) -> Self {
        Self {
            galleries: self.galleries.clone(),
        }
    }
}

// ============================================================================
// Helpers
// ============================================================================

/// Load a gallery (with images) from a raw path segment
async fn gallery_by_id<R>(state: &GalleryAppState<R>, id: &str) -> GalleryResult<Gallery>
where
    R: GalleryRepository + Sync,
{
    let id = id.parse().map_err(|_| GalleryError::InvalidId)?;
    state.galleries.by_id(id).await
}

/// Like [`gallery_by_id`], but someone else's gallery is reported as missing
async fn owned_gallery<R>(
    state: &GalleryAppState<R>,
    id: &str,
    user: &CurrentUser,
) -> GalleryResult<Gallery>
where
    R: GalleryRepository + Sync,
{
    let gallery = gallery_by_id(state, id).await?;
    if !gallery.is_owned_by(user.id()) {
        tracing::debug!(gallery_id = %gallery.id(), user_id = %user.id(), "Gallery not owned by user");
        return Err(GalleryError::NotFound);
    }
    Ok(gallery)
}

fn redirect(location: String) -> Response {
    match HeaderValue::try_from(location) {
        Ok(location) => (StatusCode::FOUND, [(header::LOCATION, location)]).into_response(),
        Err(_) => GalleryError::Internal("redirect target is not a valid header value".to_string())
            .into_response(),
    }
}

fn edit_path(gallery: &Gallery) -> String {
    format!("/galleries/{}/edit", gallery.id())
}

/// Re-render the edit page with the error as an alert
fn edit_error(err: GalleryError, gallery: &Gallery) -> Response {
    err.log();
    let mut view = ViewData::new(GalleryView::from(gallery));
    view.set_alert(&err.to_app_error());
    (err.status_code(), Json(view)).into_response()
}

// ============================================================================
// Galleries
// ============================================================================

/// GET /galleries
pub async fn index<R>(
    State(state): State<GalleryAppState<R>>,
    user: CurrentUser,
) -> GalleryResult<Json<ViewData<Vec<GalleryView>>>>
where
    R: GalleryRepository + Send + Sync + 'static,
{
    let galleries = state.galleries.by_user_id(user.id()).await?;
    Ok(Json(ViewData::new(
        galleries.iter().map(GalleryView::from).collect(),
    )))
}

/// GET /galleries/new
pub async fn new_form() -> Json<ViewData<FormView>> {
    Json(ViewData::new(new_gallery_view("")))
}

/// POST /galleries
pub async fn create<R>(
    State(state): State<GalleryAppState<R>>,
    user: CurrentUser,
    Form(form): Form<GalleryForm>,
) -> Response
where
    R: GalleryRepository + Send + Sync + 'static,
{
    let mut gallery = Gallery::new(user.id(), form.title);

    match state.galleries.create(&mut gallery).await {
        Ok(()) => redirect(edit_path(&gallery)),
        Err(e) => {
            e.log();
            let mut view = ViewData::new(new_gallery_view(&gallery.title));
            view.set_alert(&e.to_app_error());
            (e.status_code(), Json(view)).into_response()
        }
    }
}

/// GET /galleries/{id}
pub async fn show<R>(
    State(state): State<GalleryAppState<R>>,
    Path(id): Path<String>,
) -> GalleryResult<Json<ViewData<GalleryView>>>
where
    R: GalleryRepository + Send + Sync + 'static,
{
    let gallery = gallery_by_id(&state, &id).await?;
    Ok(Json(ViewData::new(GalleryView::from(&gallery))))
}

/// GET /galleries/{id}/edit
pub async fn edit<R>(
    State(state): State<GalleryAppState<R>>,
    user: CurrentUser,
    Path(id): Path<String>,
) -> GalleryResult<Json<ViewData<GalleryView>>>
where
    R: GalleryRepository + Send + Sync + 'static,
{
    let gallery = owned_gallery(&state, &id, &user).await?;
    Ok(Json(ViewData::new(GalleryView::from(&gallery))))
}

/// POST /galleries/{id}/update
pub async fn update<R>(
    State(state): State<GalleryAppState<R>>,
    user: CurrentUser,
    Path(id): Path<String>,
    Form(form): Form<GalleryForm>,
) -> Response
where
    R: GalleryRepository + Send + Sync + 'static,
{
    let mut gallery = match owned_gallery(&state, &id, &user).await {
        Ok(gallery) => gallery,
        Err(e) => return e.into_response(),
    };

    gallery.title = form.title;
    if let Err(e) = state.galleries.update(&mut gallery).await {
        return edit_error(e, &gallery);
    }

    let view = ViewData::new(GalleryView::from(&gallery))
        .alert(Alert::success("Gallery successfully updated"));
    Json(view).into_response()
}

/// POST /galleries/{id}/delete
pub async fn delete<R>(
    State(state): State<GalleryAppState<R>>,
    user: CurrentUser,
    Path(id): Path<String>,
) -> Response
where
    R: GalleryRepository + Send + Sync + 'static,
{
    let gallery = match owned_gallery(&state, &id, &user).await {
        Ok(gallery) => gallery,
        Err(e) => return e.into_response(),
    };

    match state.galleries.delete(gallery.id()).await {
        Ok(()) => redirect("/galleries".to_string()),
        Err(e) => edit_error(e, &gallery),
    }
}

// ============================================================================
// Images
// ============================================================================

/// POST /galleries/{id}/images
///
/// Every file in the `images` field is streamed to disk; other fields are
/// skipped.
pub async fn upload_images<R>(
    State(state): State<GalleryAppState<R>>,
    user: CurrentUser,
    Path(id): Path<String>,
    mut multipart: Multipart,
) -> Response
where
    R: GalleryRepository + Send + Sync + 'static,
{
    let gallery = match owned_gallery(&state, &id, &user).await {
        Ok(gallery) => gallery,
        Err(e) => return e.into_response(),
    };

    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => break,
            Err(e) => return edit_error(e.into(), &gallery),
        };
        if field.name() != Some(IMAGES_FIELD) {
            continue;
        }
        // Browsers send an empty filename when no file was picked
        let Some(filename) = field
            .file_name()
            .filter(|name| !name.is_empty())
            .map(str::to_owned)
        else {
            continue;
        };

        let reader = StreamReader::new(field.map_err(io::Error::other));
        tokio::pin!(reader);

        if let Err(e) = state
            .galleries
            .upload_image(&gallery, &filename, &mut reader)
            .await
        {
            return edit_error(e, &gallery);
        }
    }

    redirect(edit_path(&gallery))
}

/// POST /galleries/{id}/images/{filename}/delete
pub async fn delete_image<R>(
    State(state): State<GalleryAppState<R>>,
    user: CurrentUser,
    Path((id, filename)): Path<(String, String)>,
) -> Response
where
    R: GalleryRepository + Send + Sync + 'static,
{
    let gallery = match owned_gallery(&state, &id, &user).await {
        Ok(gallery) => gallery,
        Err(e) => return e.into_response(),
    };

    match state.galleries.delete_image(&gallery, &filename).await {
        Ok(()) => redirect(edit_path(&gallery)),
        Err(e) => edit_error(e, &gallery),
    }
}
