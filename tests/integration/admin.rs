use serde_json::json;

use crate::common::{TestApp, routes};

mod access_control {
    use super::*;

    #[tokio::test]
    async fn admin_routes_require_a_token() {
        let app = TestApp::spawn().await;

        let res = app.get_without_token(routes::ADMIN_USERS).await;

        assert_eq!(res.status, 401);
        assert_eq!(res.body["code"], "TOKEN_MISSING");
    }

    #[tokio::test]
    async fn regular_users_cannot_reach_admin_routes() {
        let app = TestApp::spawn().await;
        let token = app.create_authenticated_user("alice", "securepass").await;

        for path in [routes::ADMIN_USERS, routes::ADMIN_STATS] {
            let res = app.get_with_token(path, &token).await;
            assert_eq!(res.status, 403, "expected 403 for {path}");
            assert_eq!(res.body["code"], "PERMISSION_DENIED");
        }

        let res = app.delete_with_token(&routes::admin_user(1), &token).await;
        assert_eq!(res.status, 403);
    }
}

mod user_management {
    use super::*;

    #[tokio::test]
    async fn admin_can_list_users_with_counts() {
        let app = TestApp::spawn().await;
        app.create_authenticated_user("alice", "securepass").await;
        let admin = app.admin_token().await;

        let res = app.get_with_token(routes::ADMIN_USERS, &admin).await;

        assert_eq!(res.status, 200, "{}", res.text);
        let users = res.body["users"].as_array().unwrap();
        assert_eq!(users.len(), 2); // seeded admin + alice

        let alice = users.iter().find(|u| u["username"] == "alice").unwrap();
        assert_eq!(alice["role"], "user");
        assert_eq!(alice["image_count"], 0);
        assert_eq!(alice["saved_recipe_count"], 0);
        // Newest first: alice registered after the seeded admin.
        assert_eq!(users[0]["username"], "alice");
    }

    #[tokio::test]
    async fn admin_can_delete_another_user() {
        let app = TestApp::spawn().await;
        let alice_token = app.create_authenticated_user("alice", "securepass").await;
        let admin = app.admin_token().await;

        let me = app.get_with_token(routes::ME, &alice_token).await;
        let alice_id = me.body["user"]["id"].as_i64().unwrap() as i32;

        let res = app
            .delete_with_token(&routes::admin_user(alice_id), &admin)
            .await;
        assert_eq!(res.status, 200, "{}", res.text);

        let list = app.get_with_token(routes::ADMIN_USERS, &admin).await;
        assert!(
            list.body["users"]
                .as_array()
                .unwrap()
                .iter()
                .all(|u| u["username"] != "alice")
        );
    }

    #[tokio::test]
    async fn deleting_a_user_removes_their_owned_rows() {
        let app = TestApp::spawn().await;
        let alice_token = app.create_authenticated_user("alice", "securepass").await;
        let admin = app.admin_token().await;

        // Give alice an upload and a bookmark.
        let upload = app
            .upload_image("fridge.png", "image/png", vec![0u8; 64], Some(&alice_token))
            .await;
        assert_eq!(upload.status, 200, "{}", upload.text);

        let suggestions = app.get_without_token("/api/recipes/suggestions?ingredients=cheese").await;
        let recipe_id = suggestions.body["recipes"][0]["id"].as_i64().unwrap();
        app.post_with_token(
            routes::SAVE_RECIPE,
            &json!({"recipe_id": recipe_id}),
            &alice_token,
        )
        .await;

        let me = app.get_with_token(routes::ME, &alice_token).await;
        let alice_id = me.body["user"]["id"].as_i64().unwrap() as i32;

        let res = app
            .delete_with_token(&routes::admin_user(alice_id), &admin)
            .await;
        assert_eq!(res.status, 200, "{}", res.text);

        let stats = app.get_with_token(routes::ADMIN_STATS, &admin).await;
        assert_eq!(stats.body["total_images"], 0);
    }

    #[tokio::test]
    async fn deleting_an_unknown_user_is_not_found() {
        let app = TestApp::spawn().await;
        let admin = app.admin_token().await;

        let res = app
            .delete_with_token(&routes::admin_user(999999), &admin)
            .await;

        assert_eq!(res.status, 404);
        assert_eq!(res.body["code"], "NOT_FOUND");
    }

    #[tokio::test]
    async fn an_admin_cannot_delete_their_own_account() {
        let app = TestApp::spawn().await;
        let admin = app.admin_token().await;

        let me = app.get_with_token(routes::ME, &admin).await;
        let admin_id = me.body["user"]["id"].as_i64().unwrap() as i32;

        let res = app
            .delete_with_token(&routes::admin_user(admin_id), &admin)
            .await;

        assert_eq!(res.status, 400);
        assert_eq!(res.body["code"], "VALIDATION_ERROR");
    }
}

mod stats {
    use super::*;

    #[tokio::test]
    async fn stats_report_totals_and_recent_uploads() {
        let app = TestApp::spawn().await;
        let alice_token = app.create_authenticated_user("alice", "securepass").await;
        let admin = app.admin_token().await;

        app.upload_image("fridge.jpg", "image/jpeg", vec![1u8; 32], Some(&alice_token))
            .await;

        let res = app.get_with_token(routes::ADMIN_STATS, &admin).await;

        assert_eq!(res.status, 200, "{}", res.text);
        assert_eq!(res.body["total_users"], 2);
        assert_eq!(res.body["total_images"], 1);
        assert_eq!(res.body["total_recipes"], 6);
        assert!(res.body["total_ingredients"].as_u64().unwrap() >= 6);

        let recent = res.body["recent_images"].as_array().unwrap();
        assert_eq!(recent.len(), 1);
        assert_eq!(recent[0]["username"], "alice");
    }
}
