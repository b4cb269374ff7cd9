use sea_orm::{ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter};
use serde_json::json;

use dinnersready::entity::{image, image_ingredient};

use crate::common::{TestApp, TestResponse, routes};

/// Count of ingredient links for a stored image, looked up by filename.
async fn link_count(app: &TestApp, filename: &str) -> u64 {
    let stored = image::Entity::find()
        .filter(image::Column::FilePath.eq(filename))
        .one(&app.db)
        .await
        .expect("Failed to query images")
        .expect("Uploaded image row should exist");

    image_ingredient::Entity::find()
        .filter(image_ingredient::Column::ImageId.eq(stored.id))
        .count(&app.db)
        .await
        .expect("Failed to count ingredient links")
}

fn assert_detections(res: &TestResponse) {
    let ingredients = res.body["ingredients"].as_array().unwrap();
    assert!(
        (2..=4).contains(&ingredients.len()),
        "unexpected detection count: {}",
        res.text
    );
    for item in ingredients {
        assert!(!item["name"].as_str().unwrap().is_empty());
        let confidence = item["confidence"].as_f64().unwrap();
        assert!((0.0..=1.0).contains(&confidence), "confidence {confidence}");
    }
}

mod upload {
    use super::*;

    #[tokio::test]
    async fn authenticated_upload_stores_the_file_and_records_it() {
        let app = TestApp::spawn().await;
        let token = app.create_authenticated_user("alice", "securepass").await;

        let res = app
            .upload_image("fridge.png", "image/png", vec![0u8; 128], Some(&token))
            .await;

        assert_eq!(res.status, 200, "{}", res.text);
        let filename = res.body["filename"].as_str().unwrap();
        assert!(filename.starts_with("fridge-"));
        assert!(filename.ends_with(".png"));
        assert_eq!(
            res.body["file_path"].as_str().unwrap(),
            format!("/uploads/{filename}")
        );

        let recorded = image::Entity::find()
            .filter(image::Column::FilePath.eq(filename))
            .one(&app.db)
            .await
            .expect("Failed to query images");
        assert!(recorded.is_some_and(|i| i.user_id.is_some()));
    }

    #[tokio::test]
    async fn anonymous_upload_succeeds_without_an_image_row() {
        let app = TestApp::spawn().await;

        let res = app
            .upload_image("fridge.jpg", "image/jpeg", vec![0u8; 128], None)
            .await;

        assert_eq!(res.status, 200, "{}", res.text);

        let rows = image::Entity::find()
            .count(&app.db)
            .await
            .expect("Failed to count images");
        assert_eq!(rows, 0);
    }

    #[tokio::test]
    async fn uploads_with_a_disallowed_extension_are_rejected() {
        let app = TestApp::spawn().await;

        let res = app
            .upload_image("notes.txt", "text/plain", b"hello".to_vec(), None)
            .await;

        assert_eq!(res.status, 400);
        assert_eq!(res.body["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn uploads_with_a_disallowed_content_type_are_rejected() {
        let app = TestApp::spawn().await;

        let res = app
            .upload_image("fridge.png", "application/pdf", vec![0u8; 16], None)
            .await;

        assert_eq!(res.status, 400);
        assert_eq!(res.body["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn empty_uploads_are_rejected() {
        let app = TestApp::spawn().await;

        let res = app
            .upload_image("fridge.png", "image/png", Vec::new(), None)
            .await;

        assert_eq!(res.status, 400);
        assert_eq!(res.body["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn a_request_without_an_image_field_is_rejected() {
        let app = TestApp::spawn().await;

        let form = reqwest::multipart::Form::new().text("comment", "no file here");
        let res = app
            .client
            .post(format!("http://{}{}", app.addr, routes::UPLOAD))
            .multipart(form)
            .send()
            .await
            .expect("Failed to send multipart request");
        let res = TestResponse::from_response(res).await;

        assert_eq!(res.status, 400);
        assert_eq!(res.body["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn the_stored_file_is_served_back_under_uploads() {
        let app = TestApp::spawn().await;
        let bytes = vec![7u8; 64];

        let res = app
            .upload_image("fridge.webp", "image/webp", bytes.clone(), None)
            .await;
        assert_eq!(res.status, 200, "{}", res.text);

        let file_path = res.body["file_path"].as_str().unwrap();
        let served = app
            .client
            .get(format!("http://{}{}", app.addr, file_path))
            .send()
            .await
            .expect("Failed to fetch stored file");

        assert_eq!(served.status().as_u16(), 200);
        assert_eq!(served.bytes().await.unwrap().to_vec(), bytes);
    }
}

mod scan {
    use super::*;

    #[tokio::test]
    async fn scan_returns_between_two_and_four_detections() {
        let app = TestApp::spawn().await;

        let upload = app
            .upload_image("fridge.png", "image/png", vec![0u8; 64], None)
            .await;
        let filename = upload.body["filename"].as_str().unwrap();

        let res = app
            .post_without_token(routes::SCAN, &json!({"image_path": filename}))
            .await;

        assert_eq!(res.status, 200, "{}", res.text);
        assert_detections(&res);
    }

    #[tokio::test]
    async fn scan_accepts_the_public_uploads_path() {
        let app = TestApp::spawn().await;

        let upload = app
            .upload_image("fridge.png", "image/png", vec![0u8; 64], None)
            .await;
        let file_path = upload.body["file_path"].as_str().unwrap();

        let res = app
            .post_without_token(routes::SCAN, &json!({"image_path": file_path}))
            .await;

        assert_eq!(res.status, 200, "{}", res.text);
        assert_detections(&res);
    }

    #[tokio::test]
    async fn scan_with_a_blank_path_is_a_client_error() {
        let app = TestApp::spawn().await;

        let res = app
            .post_without_token(routes::SCAN, &json!({"image_path": "  "}))
            .await;

        assert_eq!(res.status, 400);
        assert_eq!(res.body["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn rescanning_replaces_the_stored_ingredient_links() {
        let app = TestApp::spawn().await;
        let token = app.create_authenticated_user("alice", "securepass").await;

        let upload = app
            .upload_image("fridge.png", "image/png", vec![0u8; 64], Some(&token))
            .await;
        let filename = upload.body["filename"].as_str().unwrap().to_string();

        let first = app
            .post_with_token(routes::SCAN, &json!({"image_path": &filename}), &token)
            .await;
        assert_eq!(first.status, 200, "{}", first.text);
        let first_count = first.body["ingredients"].as_array().unwrap().len() as u64;
        assert_eq!(link_count(&app, &filename).await, first_count);

        let second = app
            .post_with_token(routes::SCAN, &json!({"image_path": &filename}), &token)
            .await;
        assert_eq!(second.status, 200, "{}", second.text);
        let second_count = second.body["ingredients"].as_array().unwrap().len() as u64;

        // Old links are gone; only the latest detection remains.
        assert_eq!(link_count(&app, &filename).await, second_count);
    }

    #[tokio::test]
    async fn anonymous_scans_do_not_persist_links() {
        let app = TestApp::spawn().await;
        let token = app.create_authenticated_user("alice", "securepass").await;

        let upload = app
            .upload_image("fridge.png", "image/png", vec![0u8; 64], Some(&token))
            .await;
        let filename = upload.body["filename"].as_str().unwrap().to_string();

        let res = app
            .post_without_token(routes::SCAN, &json!({"image_path": &filename}))
            .await;

        assert_eq!(res.status, 200, "{}", res.text);
        assert_eq!(link_count(&app, &filename).await, 0);
    }

    #[tokio::test]
    async fn scanning_someone_elses_image_detects_but_does_not_relink() {
        let app = TestApp::spawn().await;
        let alice = app.create_authenticated_user("alice", "securepass").await;
        let bob = app.create_authenticated_user("bob", "securepass").await;

        let upload = app
            .upload_image("fridge.png", "image/png", vec![0u8; 64], Some(&alice))
            .await;
        let filename = upload.body["filename"].as_str().unwrap().to_string();

        let res = app
            .post_with_token(routes::SCAN, &json!({"image_path": &filename}), &bob)
            .await;

        assert_eq!(res.status, 200, "{}", res.text);
        assert_detections(&res);
        assert_eq!(link_count(&app, &filename).await, 0);
    }
}
