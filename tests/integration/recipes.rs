use serde_json::json;

use crate::common::{TestApp, TestResponse, routes};

/// Recipe id from a suggestions response, looked up by name.
fn recipe_id(res: &TestResponse, name: &str) -> i64 {
    res.body["recipes"]
        .as_array()
        .expect("recipes should be an array")
        .iter()
        .find(|r| r["name"] == name)
        .unwrap_or_else(|| panic!("recipe {name:?} not in response: {}", res.text))["id"]
        .as_i64()
        .unwrap()
}

mod suggestions {
    use super::*;

    #[tokio::test]
    async fn missing_ingredients_parameter_is_a_client_error() {
        let app = TestApp::spawn().await;

        let res = app.get_without_token("/api/recipes/suggestions").await;

        assert_eq!(res.status, 400);
        assert_eq!(res.body["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn blank_ingredients_parameter_is_a_client_error() {
        let app = TestApp::spawn().await;

        let res = app
            .get_without_token(&routes::suggestions("%20,%20"))
            .await;

        assert_eq!(res.status, 400);
        assert_eq!(res.body["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn omelette_outranks_pancakes_for_eggs_milk_cheese() {
        let app = TestApp::spawn().await;

        let res = app
            .get_without_token(&routes::suggestions("eggs,milk,cheese"))
            .await;

        assert_eq!(res.status, 200, "{}", res.text);
        let recipes = res.body["recipes"].as_array().unwrap();

        assert_eq!(recipes[0]["name"], "Omelette");
        assert_eq!(recipes[0]["match_count"], 3);

        let pancakes = recipes.iter().find(|r| r["name"] == "Pancakes").unwrap();
        assert_eq!(pancakes["match_count"], 2);
    }

    #[tokio::test]
    async fn results_are_sorted_non_increasing_with_name_tiebreak() {
        let app = TestApp::spawn().await;

        let res = app
            .get_without_token(&routes::suggestions("eggs,milk,butter"))
            .await;

        assert_eq!(res.status, 200);
        let recipes = res.body["recipes"].as_array().unwrap();
        assert!(!recipes.is_empty());

        let scores: Vec<i64> = recipes
            .iter()
            .map(|r| r["match_count"].as_i64().unwrap())
            .collect();
        assert!(
            scores.windows(2).all(|w| w[0] >= w[1]),
            "not sorted: {scores:?}"
        );
        assert!(scores.iter().all(|&s| s >= 1));

        // All six seeded recipes contain eggs+milk+butter or a subset;
        // the 3-score block must come out name-ascending.
        let top_names: Vec<&str> = recipes
            .iter()
            .take_while(|r| r["match_count"] == 3)
            .map(|r| r["name"].as_str().unwrap())
            .collect();
        let mut sorted = top_names.clone();
        sorted.sort_unstable();
        assert_eq!(top_names, sorted);
    }

    #[tokio::test]
    async fn match_count_equals_the_true_intersection_size() {
        let app = TestApp::spawn().await;

        let res = app.get_without_token(&routes::suggestions("bread")).await;

        assert_eq!(res.status, 200);
        for recipe in res.body["recipes"].as_array().unwrap() {
            let ingredients: Vec<&str> = recipe["ingredients"]
                .as_array()
                .unwrap()
                .iter()
                .map(|i| i.as_str().unwrap())
                .collect();
            assert!(ingredients.contains(&"bread"));
            assert_eq!(recipe["match_count"], 1);
            assert_eq!(recipe["matching_ingredients"], json!(["bread"]));
        }
    }

    #[tokio::test]
    async fn request_set_is_normalized_and_echoed_back() {
        let app = TestApp::spawn().await;

        let res = app
            .get_without_token(&routes::suggestions("%20Eggs%20,MILK,eggs,"))
            .await;

        assert_eq!(res.status, 200);
        assert_eq!(res.body["requested_ingredients"], json!(["eggs", "milk"]));
    }

    #[tokio::test]
    async fn unknown_ingredients_match_nothing() {
        let app = TestApp::spawn().await;

        let res = app
            .get_without_token(&routes::suggestions("durian"))
            .await;

        assert_eq!(res.status, 200);
        assert_eq!(res.body["recipes"], json!([]));
    }
}

mod saving {
    use super::*;

    #[tokio::test]
    async fn saving_a_recipe_requires_authentication() {
        let app = TestApp::spawn().await;

        let res = app
            .post_without_token(routes::SAVE_RECIPE, &json!({"recipe_id": 1}))
            .await;

        assert_eq!(res.status, 401);
        assert_eq!(res.body["code"], "TOKEN_MISSING");
    }

    #[tokio::test]
    async fn saving_an_unknown_recipe_is_not_found() {
        let app = TestApp::spawn().await;
        let token = app.create_authenticated_user("alice", "securepass").await;

        let res = app
            .post_with_token(routes::SAVE_RECIPE, &json!({"recipe_id": 999999}), &token)
            .await;

        assert_eq!(res.status, 404);
        assert_eq!(res.body["code"], "NOT_FOUND");
    }

    #[tokio::test]
    async fn first_save_succeeds_and_second_save_conflicts() {
        let app = TestApp::spawn().await;
        let token = app.create_authenticated_user("alice", "securepass").await;

        let suggestions = app
            .get_without_token(&routes::suggestions("cheese"))
            .await;
        let id = recipe_id(&suggestions, "Omelette");

        let first = app
            .post_with_token(routes::SAVE_RECIPE, &json!({"recipe_id": id}), &token)
            .await;
        assert_eq!(first.status, 201, "{}", first.text);
        assert_eq!(first.body["saved_recipe"]["recipe"]["name"], "Omelette");

        let second = app
            .post_with_token(routes::SAVE_RECIPE, &json!({"recipe_id": id}), &token)
            .await;
        assert_eq!(second.status, 409);
        assert_eq!(second.body["code"], "CONFLICT");
    }

    #[tokio::test]
    async fn two_users_can_save_the_same_recipe() {
        let app = TestApp::spawn().await;
        let alice = app.create_authenticated_user("alice", "securepass").await;
        let bob = app.create_authenticated_user("bob", "securepass").await;

        let suggestions = app
            .get_without_token(&routes::suggestions("cheese"))
            .await;
        let id = recipe_id(&suggestions, "Omelette");

        let first = app
            .post_with_token(routes::SAVE_RECIPE, &json!({"recipe_id": id}), &alice)
            .await;
        let second = app
            .post_with_token(routes::SAVE_RECIPE, &json!({"recipe_id": id}), &bob)
            .await;

        assert_eq!(first.status, 201);
        assert_eq!(second.status, 201);
    }

    #[tokio::test]
    async fn saved_recipes_are_listed_most_recent_first() {
        let app = TestApp::spawn().await;
        let token = app.create_authenticated_user("alice", "securepass").await;

        let suggestions = app
            .get_without_token(&routes::suggestions("eggs,cheese,bread"))
            .await;
        let omelette = recipe_id(&suggestions, "Omelette");
        let grilled = recipe_id(&suggestions, "Grilled Cheese Sandwich");

        app.post_with_token(routes::SAVE_RECIPE, &json!({"recipe_id": omelette}), &token)
            .await;
        app.post_with_token(routes::SAVE_RECIPE, &json!({"recipe_id": grilled}), &token)
            .await;

        let res = app.get_with_token(routes::SAVED_RECIPES, &token).await;

        assert_eq!(res.status, 200);
        let names: Vec<&str> = res.body["saved_recipes"]
            .as_array()
            .unwrap()
            .iter()
            .map(|r| r["name"].as_str().unwrap())
            .collect();
        assert_eq!(names, vec!["Grilled Cheese Sandwich", "Omelette"]);
    }

    #[tokio::test]
    async fn saved_list_is_empty_for_a_new_user() {
        let app = TestApp::spawn().await;
        let token = app.create_authenticated_user("alice", "securepass").await;

        let res = app.get_with_token(routes::SAVED_RECIPES, &token).await;

        assert_eq!(res.status, 200);
        assert_eq!(res.body["saved_recipes"], json!([]));
    }
}
