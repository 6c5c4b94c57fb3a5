use ::common::storage::ObjectStore;
use reqwest::Method;
use serde_json::json;

use std::sync::Arc;

use crate::common::{
    BUCKET, PANIC_MESSAGE, PUBLIC_URL, PanickingStore, TestApp, UnavailableStore,
    assert_generated_key, routes,
};

mod health {
    use super::*;

    #[tokio::test]
    async fn reports_bucket() {
        let app = TestApp::spawn().await;
        let res = app.get(routes::HEALTH).await;

        assert_eq!(res.status, 200);
        assert_eq!(res.body, json!({"status": "ok", "bucket": BUCKET}));
    }

    #[tokio::test]
    async fn answers_any_method() {
        let app = TestApp::spawn().await;
        let res = app.request(Method::POST, routes::HEALTH).await;

        assert_eq!(res.status, 200);
        assert_eq!(res.body["status"], "ok");
    }
}

mod upload {
    use super::*;

    #[tokio::test]
    async fn stores_png_under_generated_key() {
        let app = TestApp::spawn().await;
        let res = app
            .upload("cat.png", vec![7u8; 2048], "image/png", None)
            .await;

        assert_eq!(res.status, 200, "{}", res.text);
        assert_eq!(res.body["success"], true);
        assert_eq!(res.body["size"], 2048);
        assert_eq!(res.body["type"], "image/png");

        let key = res.body["filename"].as_str().unwrap();
        assert_generated_key(key, "artworks", "png");
        assert_eq!(res.body["url"], format!("{PUBLIC_URL}/{key}"));

        let stored = app.store.head(key).await.unwrap().expect("object stored");
        assert_eq!(stored.size, 2048);
        assert_eq!(stored.http_metadata.content_type.as_deref(), Some("image/png"));
        assert_eq!(stored.custom_metadata["originalName"], "cat.png");
    }

    #[tokio::test]
    async fn honours_folder_field() {
        let app = TestApp::spawn().await;
        let key = app.upload_png("me.png", Some("profile")).await;
        assert_generated_key(&key, "profile", "png");
    }

    #[tokio::test]
    async fn rejects_oversized_file_without_writing() {
        let app = TestApp::spawn().await;
        let res = app
            .upload("big.jpg", vec![0u8; 15 * 1024 * 1024], "image/jpeg", None)
            .await;

        assert_eq!(res.status, 400);
        assert_eq!(res.error(), "File too large. Max size: 10MB");
        assert!(app.store.list("").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn rejects_disallowed_type_without_writing() {
        let app = TestApp::spawn().await;
        let res = app
            .upload("notes.txt", b"hello".to_vec(), "text/plain", None)
            .await;

        assert_eq!(res.status, 400);
        assert_eq!(
            res.error(),
            "Invalid file type. Allowed: jpg, png, webp, gif"
        );
        assert!(app.store.list("").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn type_is_checked_before_size() {
        let app = TestApp::spawn().await;
        let res = app
            .upload("huge.bmp", vec![0u8; 11 * 1024 * 1024], "image/bmp", None)
            .await;

        assert_eq!(res.status, 400);
        assert!(res.error().starts_with("Invalid file type"));
    }

    #[tokio::test]
    async fn rejects_traversal_folder() {
        let app = TestApp::spawn().await;
        let res = app
            .upload("cat.png", vec![1u8; 16], "image/png", Some("../secrets"))
            .await;

        assert_eq!(res.status, 400);
        assert_eq!(res.error(), "Invalid folder");
        assert!(app.store.list("").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn key_that_cannot_be_a_bucket_path_is_rejected() {
        let app = TestApp::spawn().await;
        let part = reqwest::multipart::Part::bytes(vec![1u8; 16])
            .file_name("x.a//b")
            .mime_str("image/png")
            .unwrap();
        let form = reqwest::multipart::Form::new()
            .percent_encode_noop()
            .part("file", part);
        let res = app
            .client
            .post(format!("http://{}{}", app.addr, routes::UPLOAD))
            .multipart(form)
            .send()
            .await
            .unwrap();
        let res = crate::common::TestResponse::from_response(res).await;

        assert_eq!(res.status, 400);
        assert_eq!(res.error(), "key contains an empty or relative segment");
        assert!(app.store.list("").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn folder_named_after_existing_key_on_disk() {
        let app = TestApp::spawn_on_disk().await;
        let existing = app.upload_png("cat.png", None).await;

        let res = app
            .upload("cat.png", vec![3u8; 32], "image/png", Some(&existing))
            .await;
        assert_eq!(res.status, 200, "{}", res.text);
        let nested = res.body["filename"].as_str().unwrap();
        assert_generated_key(nested, &existing, "png");

        assert!(app.store.exists(&existing).await.unwrap());
        assert!(app.store.exists(nested).await.unwrap());
        assert_eq!(app.get(routes::LIST).await.body["count"], 2);
    }

    #[tokio::test]
    async fn missing_file_field() {
        let app = TestApp::spawn().await;
        let form = reqwest::multipart::Form::new().text("folder", "artworks");
        let res = app
            .client
            .post(format!("http://{}{}", app.addr, routes::UPLOAD))
            .multipart(form)
            .send()
            .await
            .unwrap();
        let res = crate::common::TestResponse::from_response(res).await;

        assert_eq!(res.status, 400);
        assert_eq!(res.error(), "No file provided");
    }

    #[tokio::test]
    async fn non_multipart_body() {
        let app = TestApp::spawn().await;
        let res = app
            .post_json(routes::UPLOAD, &json!({"file": "cat.png"}))
            .await;

        assert_eq!(res.status, 400);
        assert_eq!(res.error(), "No file provided");
    }
}

mod delete {
    use super::*;

    #[tokio::test]
    async fn requires_filename() {
        let app = TestApp::spawn().await;
        let res = app.delete_file(&json!({})).await;

        assert_eq!(res.status, 400);
        assert_eq!(res.error(), "No filename provided");

        let res = app.delete_file(&json!({"filename": ""})).await;
        assert_eq!(res.status, 400);
    }

    #[tokio::test]
    async fn malformed_body_is_bad_request() {
        let app = TestApp::spawn().await;
        let res = app
            .send_raw_json(Method::DELETE, routes::DELETE, "{not json")
            .await;

        assert_eq!(res.status, 400);
        assert!(!res.error().is_empty());
    }

    #[tokio::test]
    async fn missing_object_leaves_store_untouched() {
        let app = TestApp::spawn().await;
        let kept = app.upload_png("keep.png", None).await;

        let res = app
            .delete_file(&json!({"filename": "artworks/0-zzzzzz.png"}))
            .await;

        assert_eq!(res.status, 404);
        assert_eq!(res.error(), "File not found");
        assert!(app.store.exists(&kept).await.unwrap());
    }

    #[tokio::test]
    async fn deleted_image_is_gone() {
        let app = TestApp::spawn().await;
        let key = app.upload_png("cat.png", None).await;

        let res = app.delete_file(&json!({"filename": key})).await;
        assert_eq!(res.status, 200);
        assert_eq!(res.body, json!({"success": true, "deleted": key}));

        let res = app.get(&routes::image(&key)).await;
        assert_eq!(res.status, 404);
        assert_eq!(res.error(), "Image not found");
    }
}

mod list {
    use super::*;

    #[tokio::test]
    async fn empty_bucket() {
        let app = TestApp::spawn().await;
        let res = app.get(routes::LIST).await;

        assert_eq!(res.status, 200);
        assert_eq!(res.body, json!({"images": [], "count": 0}));
    }

    #[tokio::test]
    async fn only_gallery_prefix_sorted_by_key() {
        let app = TestApp::spawn().await;
        let first = app.upload_png("a.png", None).await;
        let second = app.upload_png("b.png", None).await;
        app.upload_png("me.png", Some("profile")).await;

        let res = app.get(routes::LIST).await;
        assert_eq!(res.status, 200);
        assert_eq!(res.body["count"], 2);

        let mut expected = vec![first, second];
        expected.sort();
        let keys: Vec<&str> = res.body["images"]
            .as_array()
            .unwrap()
            .iter()
            .map(|i| i["key"].as_str().unwrap())
            .collect();
        assert_eq!(keys, expected);
        assert_eq!(
            res.body["images"][0]["url"],
            format!("{PUBLIC_URL}/{}", expected[0])
        );
    }
}

mod image {
    use super::*;

    #[tokio::test]
    async fn returns_metadata() {
        let app = TestApp::spawn().await;
        let key = app.upload_png("cat.png", None).await;

        let res = app.get(&routes::image(&key)).await;
        assert_eq!(res.status, 200);
        assert_eq!(res.body["key"], key.as_str());
        assert_eq!(res.body["size"], 64);
        assert_eq!(res.body["httpMetadata"]["contentType"], "image/png");
        assert_eq!(res.body["customMetadata"]["originalName"], "cat.png");
        let uploaded_at = res.body["customMetadata"]["uploadedAt"].as_str().unwrap();
        assert!(uploaded_at.ends_with('Z'));
        assert_eq!(res.body["url"], format!("{PUBLIC_URL}/{key}"));
    }
}

mod files {
    use super::*;

    #[tokio::test]
    async fn serves_bytes_with_cache_headers() {
        let app = TestApp::spawn().await;
        let key = app.upload_png("cat.png", None).await;

        let res = app
            .client
            .get(format!("http://{}{}", app.addr, routes::file(&key)))
            .send()
            .await
            .unwrap();
        assert_eq!(res.status(), 200);
        let headers = res.headers().clone();
        assert_eq!(headers["content-type"], "image/png");
        assert_eq!(
            headers["cache-control"],
            "public, max-age=31536000, immutable"
        );
        assert!(headers.contains_key("etag"));
        let bytes = res.bytes().await.unwrap();
        assert_eq!(bytes.as_ref(), vec![0x89u8; 64].as_slice());
    }

    #[tokio::test]
    async fn matching_etag_is_not_modified() {
        let app = TestApp::spawn().await;
        let key = app.upload_png("cat.png", None).await;
        let url = format!("http://{}{}", app.addr, routes::file(&key));

        let first = app.client.get(&url).send().await.unwrap();
        let etag = first.headers()["etag"].to_str().unwrap().to_string();

        let second = app
            .client
            .get(&url)
            .header("If-None-Match", &etag)
            .send()
            .await
            .unwrap();
        assert_eq!(second.status(), 304);

        let stale = app
            .client
            .get(&url)
            .header("If-None-Match", "\"stale\"")
            .send()
            .await
            .unwrap();
        assert_eq!(stale.status(), 200);
    }

    #[tokio::test]
    async fn unknown_key() {
        let app = TestApp::spawn().await;
        let res = app.get(&routes::file("artworks/missing.png")).await;
        assert_eq!(res.status, 404);
    }
}

mod routing {
    use super::*;

    fn assert_cors(res: &crate::common::TestResponse) {
        assert_eq!(res.header("access-control-allow-origin"), Some("*"));
        assert_eq!(
            res.header("access-control-allow-methods"),
            Some("GET, POST, PUT, DELETE, OPTIONS")
        );
        assert_eq!(
            res.header("access-control-allow-headers"),
            Some("Content-Type, Authorization")
        );
    }

    #[tokio::test]
    async fn options_short_circuits_on_any_path() {
        let app = TestApp::spawn().await;
        for path in [routes::UPLOAD, "/no/such/path"] {
            let res = app.request(Method::OPTIONS, path).await;
            assert_eq!(res.status, 200, "OPTIONS {path}");
            assert!(res.text.is_empty());
            assert_cors(&res);
        }
    }

    #[tokio::test]
    async fn browser_preflight() {
        let app = TestApp::spawn().await;
        let res = app
            .client
            .request(Method::OPTIONS, format!("http://{}{}", app.addr, routes::DELETE))
            .header("Origin", "https://gallery.example.com")
            .header("Access-Control-Request-Method", "DELETE")
            .send()
            .await
            .unwrap();
        let res = crate::common::TestResponse::from_response(res).await;

        assert_eq!(res.status, 200);
        assert_cors(&res);
    }

    #[tokio::test]
    async fn regular_responses_carry_cors_headers() {
        let app = TestApp::spawn().await;
        assert_cors(&app.get(routes::HEALTH).await);
        assert_cors(&app.get("/nope").await);
    }

    #[tokio::test]
    async fn unknown_path_is_not_found() {
        let app = TestApp::spawn().await;
        let res = app.get("/nope").await;

        assert_eq!(res.status, 404);
        assert_eq!(res.body, json!({"error": "Not found"}));
    }

    #[tokio::test]
    async fn wrong_method_is_not_found() {
        let app = TestApp::spawn().await;

        let res = app.get(routes::UPLOAD).await;
        assert_eq!(res.status, 404);
        assert_eq!(res.body, json!({"error": "Not found"}));

        let res = app.request(Method::POST, routes::LIST).await;
        assert_eq!(res.status, 404);
    }
}

mod failures {
    use super::*;

    #[tokio::test]
    async fn store_error_is_internal() {
        let app = TestApp::spawn_with_store(Arc::new(UnavailableStore)).await;

        let res = app.get(routes::LIST).await;
        assert_eq!(res.status, 500);
        assert_eq!(
            res.body,
            json!({"error": "storage IO error: disk unavailable"})
        );

        let res = app
            .upload("cat.png", vec![1u8; 16], "image/png", None)
            .await;
        assert_eq!(res.status, 500);
        assert_eq!(res.error(), "storage IO error: disk unavailable");
    }

    #[tokio::test]
    async fn handler_panic_becomes_internal_error() {
        let app = TestApp::spawn_with_store(Arc::new(PanickingStore)).await;

        let res = app.get(routes::LIST).await;
        assert_eq!(res.status, 500);
        assert_eq!(res.body, json!({"error": PANIC_MESSAGE}));

        let res = app.get(routes::HEALTH).await;
        assert_eq!(res.status, 200);
    }
}
