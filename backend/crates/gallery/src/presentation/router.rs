//! Gallery Router

use auth::middleware::require_user;
use axum::extract::DefaultBodyLimit;
use axum::middleware::from_fn;
use axum::{
    Router,
    routing::{get, post},
};

use crate::domain::repository::GalleryRepository;
use crate::presentation::handlers::{self, GalleryAppState};

/// Gallery pages. Everything except `GET /galleries/{id}` needs a signed-in
/// user; expects `auth::middleware::identify_user` to run outside it.
pub fn gallery_router<R>(state: GalleryAppState<R>) -> Router
where
    R: GalleryRepository + Send + Sync + 'static,
{
    let protected = Router::new()
        .route(
            "/galleries",
            get(handlers::index::<R>).post(handlers::create::<R>),
        )
        .route("/galleries/new", get(handlers::new_form))
        .route("/galleries/{id}/edit", get(handlers::edit::<R>))
        .route("/galleries/{id}/update", post(handlers::update::<R>))
        .route("/galleries/{id}/delete", post(handlers::delete::<R>))
        // Uploads are streamed to disk, so no body size cap
        .route(
            "/galleries/{id}/images",
            post(handlers::upload_images::<R>).layer(DefaultBodyLimit::disable()),
        )
        .route(
            "/galleries/{id}/images/{filename}/delete",
            post(handlers::delete_image::<R>),
        )
        .route_layer(from_fn(require_user));

    let public = Router::new().route("/galleries/{id}", get(handlers::show::<R>));

    protected.merge(public).with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::config::GalleryConfig;
    use crate::domain::entity::gallery::Gallery;
    use crate::infra::memory::MemoryGalleryRepository;
    use auth::User;
    use auth::middleware::CurrentUser;
    use axum::body::Body;
    use axum::http::{Request, StatusCode, header};
    use kernel::id::UserId;
    use std::sync::Arc;
    use tower::ServiceExt;

    const BOUNDARY: &str = "gallery-test-boundary";

    struct TestApp {
        state: GalleryAppState<MemoryGalleryRepository>,
        dir: tempfile::TempDir,
    }

    impl TestApp {
        fn new() -> Self {
            let dir = tempfile::tempdir().unwrap();
            let state = GalleryAppState::new(
                MemoryGalleryRepository::new(),
                &GalleryConfig::new(dir.path()),
            );
            Self { state, dir }
        }

        fn router(&self) -> Router {
            gallery_router(self.state.clone())
        }

        async fn gallery(&self, owner: i64, title: &str) -> Gallery {
            let mut gallery = Gallery::new(UserId::new(owner), title);
            self.state.galleries.create(&mut gallery).await.unwrap();
            gallery
        }
    }

    fn signed_in(mut req: Request<Body>, user_id: i64) -> Request<Body> {
        req.extensions_mut()
            .insert(CurrentUser(Arc::new(User::with_id(UserId::new(user_id)))));
        req
    }

    fn get_req(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    fn post_form(uri: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn post_images(uri: &str, files: &[(&str, &[u8])]) -> Request<Body> {
        let mut body = Vec::new();
        for (filename, data) in files {
            body.extend_from_slice(
                format!(
                    "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"images\"; filename=\"{filename}\"\r\nContent-Type: application/octet-stream\r\n\r\n"
                )
                .as_bytes(),
            );
            body.extend_from_slice(data);
            body.extend_from_slice(b"\r\n");
        }
        body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());

        Request::builder()
            .method("POST")
            .uri(uri)
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(body))
            .unwrap()
    }

    async fn json_body(res: axum::response::Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(res.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_protected_routes_redirect_to_login() {
        let app = TestApp::new();
        let res = app.router().oneshot(get_req("/galleries")).await.unwrap();
        assert_eq!(res.status(), StatusCode::FOUND);
        assert_eq!(res.headers()[header::LOCATION], "/login");
    }

    #[tokio::test]
    async fn test_create_redirects_to_edit() {
        let app = TestApp::new();
        let res = app
            .router()
            .oneshot(signed_in(post_form("/galleries", "title=Trip"), 1))
            .await
            .unwrap();

        assert_eq!(res.status(), StatusCode::FOUND);
        assert_eq!(res.headers()[header::LOCATION], "/galleries/1/edit");

        let res = app
            .router()
            .oneshot(signed_in(get_req("/galleries"), 1))
            .await
            .unwrap();
        let json = json_body(res).await;
        assert_eq!(json["yield"][0]["title"], "Trip");
        assert_eq!(json["yield"][0]["user_id"], 1);
    }

    #[tokio::test]
    async fn test_create_without_title_rerenders_form() {
        let app = TestApp::new();
        let res = app
            .router()
            .oneshot(signed_in(post_form("/galleries", "title="), 1))
            .await
            .unwrap();

        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        let json = json_body(res).await;
        assert_eq!(json["alert"]["message"], "Title is required");
        assert_eq!(json["yield"]["action"], "/galleries");
    }

    #[tokio::test]
    async fn test_show_is_public() {
        let app = TestApp::new();
        let gallery = app.gallery(1, "Trip").await;

        let res = app
            .router()
            .oneshot(get_req(&format!("/galleries/{}", gallery.id())))
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::OK);
        let json = json_body(res).await;
        assert_eq!(json["yield"]["title"], "Trip");
    }

    #[tokio::test]
    async fn test_invalid_id() {
        let app = TestApp::new();
        let res = app
            .router()
            .oneshot(get_req("/galleries/abc"))
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
        let json = json_body(res).await;
        assert_eq!(json["alert"]["message"], "Invalid gallery id");
    }

    #[tokio::test]
    async fn test_edit_by_non_owner_is_not_found() {
        let app = TestApp::new();
        let gallery = app.gallery(1, "Private trip").await;

        let res = app
            .router()
            .oneshot(signed_in(
                get_req(&format!("/galleries/{}/edit", gallery.id())),
                2,
            ))
            .await
            .unwrap();

        assert_eq!(res.status(), StatusCode::NOT_FOUND);
        let json = json_body(res).await;
        assert_eq!(json["alert"]["message"], "Gallery not found");
        assert!(json["yield"].is_null());
    }

    #[tokio::test]
    async fn test_update_shows_success_alert() {
        let app = TestApp::new();
        let gallery = app.gallery(1, "Trip").await;

        let res = app
            .router()
            .oneshot(signed_in(
                post_form(&format!("/galleries/{}/update", gallery.id()), "title=Beach"),
                1,
            ))
            .await
            .unwrap();

        assert_eq!(res.status(), StatusCode::OK);
        let json = json_body(res).await;
        assert_eq!(json["alert"]["level"], "success");
        assert_eq!(json["alert"]["message"], "Gallery successfully updated");
        assert_eq!(json["yield"]["title"], "Beach");
    }

    #[tokio::test]
    async fn test_delete_redirects_to_index() {
        let app = TestApp::new();
        let gallery = app.gallery(1, "Trip").await;

        let res = app
            .router()
            .oneshot(signed_in(
                post_form(&format!("/galleries/{}/delete", gallery.id()), ""),
                1,
            ))
            .await
            .unwrap();

        assert_eq!(res.status(), StatusCode::FOUND);
        assert_eq!(res.headers()[header::LOCATION], "/galleries");
        assert!(app.state.galleries.by_id(gallery.id()).await.is_err());
    }

    #[tokio::test]
    async fn test_upload_and_delete_images() {
        let app = TestApp::new();
        let gallery = app.gallery(1, "Trip").await;
        let edit = format!("/galleries/{}/edit", gallery.id());

        let res = app
            .router()
            .oneshot(signed_in(
                post_images(
                    &format!("/galleries/{}/images", gallery.id()),
                    &[("a.jpg", &b"first"[..]), ("b c.jpg", &b"second"[..])],
                ),
                1,
            ))
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::FOUND);
        assert_eq!(res.headers()[header::LOCATION], edit.as_str());

        let stored = app.dir.path().join("galleries/1/b c.jpg");
        assert_eq!(std::fs::read(&stored).unwrap(), b"second");

        let res = app
            .router()
            .oneshot(signed_in(get_req(&edit), 1))
            .await
            .unwrap();
        let json = json_body(res).await;
        assert_eq!(json["yield"]["images"][1]["path"], "/images/galleries/1/b%20c.jpg");

        let res = app
            .router()
            .oneshot(signed_in(
                post_form(&format!("/galleries/{}/images/a.jpg/delete", gallery.id()), ""),
                1,
            ))
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::FOUND);
        assert!(!app.dir.path().join("galleries/1/a.jpg").exists());
    }

    #[tokio::test]
    async fn test_upload_to_foreign_gallery_writes_nothing() {
        let app = TestApp::new();
        let gallery = app.gallery(1, "Trip").await;

        let res = app
            .router()
            .oneshot(signed_in(
                post_images(
                    &format!("/galleries/{}/images", gallery.id()),
                    &[("a.jpg", &b"data"[..])],
                ),
                2,
            ))
            .await
            .unwrap();

        assert_eq!(res.status(), StatusCode::NOT_FOUND);
        assert!(!app.dir.path().join("galleries").exists());
    }

    #[tokio::test]
    async fn test_upload_larger_than_default_body_limit() {
        let app = TestApp::new();
        let gallery = app.gallery(1, "Trip").await;
        let data = vec![0xAB_u8; 3 * 1024 * 1024];

        let res = app
            .router()
            .oneshot(signed_in(
                post_images(
                    &format!("/galleries/{}/images", gallery.id()),
                    &[("big.jpg", &data[..])],
                ),
                1,
            ))
            .await
            .unwrap();

        assert_eq!(res.status(), StatusCode::FOUND);
        let stored = app.dir.path().join("galleries/1/big.jpg");
        assert_eq!(std::fs::metadata(&stored).unwrap().len(), data.len() as u64);
    }

    #[tokio::test]
    async fn test_upload_skips_part_without_filename() {
        let app = TestApp::new();
        let gallery = app.gallery(1, "Trip").await;

        let res = app
            .router()
            .oneshot(signed_in(
                post_images(
                    &format!("/galleries/{}/images", gallery.id()),
                    &[("", &b""[..])],
                ),
                1,
            ))
            .await
            .unwrap();

        assert_eq!(res.status(), StatusCode::FOUND);
        assert_eq!(
            res.headers()[header::LOCATION],
            format!("/galleries/{}/edit", gallery.id()).as_str()
        );
        assert!(!app.dir.path().join("galleries").exists());
    }
}
