use serde_json::{Value, json};

use crate::common::{TestApp, routes};

fn titles(body: &Value) -> Vec<&str> {
    body["data"]
        .as_array()
        .expect("data should be an array")
        .iter()
        .map(|a| a["title"].as_str().unwrap())
        .collect()
}

mod artworks {
    use super::*;

    #[tokio::test]
    async fn lists_demo_gallery() {
        let app = TestApp::spawn().await;
        let res = app.get(routes::ARTWORKS).await;

        assert_eq!(res.status, 200);
        assert_eq!(res.body["error"], Value::Null);
        assert_eq!(res.body["data"].as_array().unwrap().len(), 6);
    }

    #[tokio::test]
    async fn filters_by_category_and_featured() {
        let app = TestApp::spawn().await;

        let res = app
            .get(&format!("{}?category=portraits", routes::ARTWORKS))
            .await;
        assert_eq!(titles(&res.body), vec!["Soul Portrait", "Gentle Spirit"]);

        let res = app
            .get(&format!("{}?category=all&featured=true", routes::ARTWORKS))
            .await;
        assert_eq!(
            titles(&res.body),
            vec!["Ethereal Dreams", "Golden Hour", "Abstract Flow"]
        );

        let res = app.get(&format!("{}?limit=2", routes::ARTWORKS)).await;
        assert_eq!(res.body["data"].as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn categories_start_with_all() {
        let app = TestApp::spawn().await;
        let res = app.get(routes::CATEGORIES).await;

        assert_eq!(res.status, 200);
        assert_eq!(
            res.body["data"],
            json!(["all", "abstract", "landscapes", "portraits"])
        );
    }

    #[tokio::test]
    async fn single_artwork() {
        let app = TestApp::spawn().await;
        let res = app.get(&routes::artwork(3)).await;

        assert_eq!(res.status, 200);
        assert_eq!(res.body["data"]["title"], "Soul Portrait");
        assert_eq!(res.body["data"]["is_sold"], true);
    }

    #[tokio::test]
    async fn unknown_artwork_is_not_found() {
        let app = TestApp::spawn().await;
        let res = app.get(&routes::artwork(999)).await;

        assert_eq!(res.status, 404);
        assert_eq!(res.body, json!({"data": null, "error": "Not found"}));
    }

    #[tokio::test]
    async fn non_numeric_id_is_bad_request() {
        let app = TestApp::spawn().await;
        let res = app.get(&routes::artwork("abc")).await;

        assert_eq!(res.status, 400);
        assert_eq!(res.body["data"], Value::Null);
        assert!(res.body["error"].is_string());
    }

    #[tokio::test]
    async fn writes_need_a_database() {
        let app = TestApp::spawn().await;

        let res = app
            .post_json(
                routes::ARTWORKS,
                &json!({"title": "New Piece", "category": "abstract", "year": 2025}),
            )
            .await;
        assert_eq!(res.status, 503);
        assert_eq!(
            res.body,
            json!({"data": null, "error": "Database not configured"})
        );

        let res = app
            .put_json(&routes::artwork(1), &json!({"title": "Renamed"}))
            .await;
        assert_eq!(res.status, 503);

        let res = app
            .request(reqwest::Method::DELETE, &routes::artwork(1))
            .await;
        assert_eq!(res.status, 503);
    }

    #[tokio::test]
    async fn blank_title_is_rejected_before_storage() {
        let app = TestApp::spawn().await;
        let res = app
            .post_json(
                routes::ARTWORKS,
                &json!({"title": "  ", "category": "abstract", "year": 2025}),
            )
            .await;

        assert_eq!(res.status, 400);
        assert_eq!(res.body["data"], Value::Null);
    }

    #[tokio::test]
    async fn malformed_json_uses_envelope() {
        let app = TestApp::spawn().await;
        let res = app
            .send_raw_json(reqwest::Method::POST, routes::ARTWORKS, "{\"title\":")
            .await;

        assert_eq!(res.status, 400);
        assert_eq!(res.body["data"], Value::Null);
        assert!(res.body["error"].is_string());
    }
}

mod contacts {
    use super::*;

    #[tokio::test]
    async fn submission_is_acknowledged_in_demo_mode() {
        let app = TestApp::spawn().await;
        let res = app
            .post_json(
                routes::CONTACTS,
                &json!({
                    "name": "Ada",
                    "email": "ada@example.com",
                    "projectType": "Personal Portrait",
                    "vision": "A portrait of my cat"
                }),
            )
            .await;

        assert_eq!(res.status, 200, "{}", res.text);
        assert_eq!(res.body["data"]["message"], "A portrait of my cat");
        assert_eq!(res.body["data"]["project_type"], "Personal Portrait");
        assert_eq!(res.body["data"]["is_read"], false);

        let listed = app.get(routes::CONTACTS).await;
        assert_eq!(listed.body["data"], json!([]));
    }

    #[tokio::test]
    async fn invalid_email_is_rejected() {
        let app = TestApp::spawn().await;
        let res = app
            .post_json(
                routes::CONTACTS,
                &json!({"name": "Ada", "email": "not-an-email", "message": "Hi"}),
            )
            .await;

        assert_eq!(res.status, 400);
        assert_eq!(res.body["data"], Value::Null);
    }

    #[tokio::test]
    async fn marking_read_needs_a_database() {
        let app = TestApp::spawn().await;
        let res = app
            .post_json(&routes::contact_read(1), &json!({}))
            .await;
        assert_eq!(res.status, 503);
    }
}

mod commissions {
    use super::*;

    #[tokio::test]
    async fn request_starts_pending() {
        let app = TestApp::spawn().await;
        let res = app
            .post_json(
                routes::COMMISSIONS,
                &json!({
                    "name": "Grace",
                    "email": "grace@example.com",
                    "projectType": "Album Cover",
                    "vision": "Stormy sea at dusk",
                    "budget": "$500-1000"
                }),
            )
            .await;

        assert_eq!(res.status, 200, "{}", res.text);
        assert_eq!(res.body["data"]["status"], "pending");
        assert_eq!(res.body["data"]["vision"], "Stormy sea at dusk");
    }

    #[tokio::test]
    async fn unknown_status_is_rejected() {
        let app = TestApp::spawn().await;
        let res = app
            .put_json(&routes::commission(1), &json!({"status": "shipped"}))
            .await;

        assert_eq!(res.status, 400);
        assert!(
            res.body["error"]
                .as_str()
                .unwrap()
                .starts_with("Invalid status")
        );
    }
}

mod settings {
    use super::*;

    #[tokio::test]
    async fn about_falls_back_to_defaults() {
        let app = TestApp::spawn().await;
        let res = app.get(routes::ABOUT).await;

        assert_eq!(res.status, 200);
        assert_eq!(res.body["error"], Value::Null);
        assert_eq!(res.body["data"]["name"], "Studio Artist");
        assert_eq!(res.body["data"]["exhibitions"].as_array().unwrap().len(), 3);
    }

    #[tokio::test]
    async fn missing_setting_is_not_found() {
        let app = TestApp::spawn().await;
        let res = app.get(&routes::setting("tagline")).await;
        assert_eq!(res.status, 404);
    }

    #[tokio::test]
    async fn writes_need_a_database() {
        let app = TestApp::spawn().await;
        let res = app
            .put_json(&routes::setting("tagline"), &json!({"value": "Light"}))
            .await;
        assert_eq!(res.status, 503);
    }
}
