use serde_json::json;

use crate::common::{TestApp, routes};

mod role_seeding {
    use super::*;

    #[tokio::test]
    async fn default_roles_are_seeded() {
        let app = TestApp::spawn().await;

        let res = app.get(routes::ROLES).await;

        assert_eq!(res.status, 200);
        let names: Vec<&str> = res
            .body
            .as_array()
            .unwrap()
            .iter()
            .map(|r| r["name"].as_str().unwrap())
            .collect();
        for expected in ["Admin", "Reviewer", "Editor", "Auditor"] {
            assert!(names.contains(&expected), "missing seeded role {expected}");
        }
    }
}

mod role_creation {
    use super::*;

    #[tokio::test]
    async fn creating_a_role_assigns_an_id() {
        let app = TestApp::spawn().await;

        let res = app
            .post(
                routes::ROLES,
                &json!({"name": "Risk Officer", "description": "Owns the risk register"}),
            )
            .await;

        assert_eq!(res.status, 201);
        assert!(res.body["id"].is_number());
        assert_eq!(res.body["name"], "Risk Officer");
        assert_eq!(res.body["description"], "Owns the risk register");
        assert!(res.body["created_at"].is_string());

        let id = res.body["id"].as_i64().unwrap() as i32;
        let fetched = app.get(&routes::role(id)).await;
        assert_eq!(fetched.status, 200);
        assert_eq!(fetched.body, res.body);
    }

    #[tokio::test]
    async fn description_defaults_to_empty() {
        let app = TestApp::spawn().await;

        let res = app.post(routes::ROLES, &json!({"name": "Observer"})).await;

        assert_eq!(res.status, 201);
        assert_eq!(res.body["description"], "");
    }

    #[tokio::test]
    async fn duplicate_name_is_a_conflict() {
        let app = TestApp::spawn().await;

        let first = app
            .post(routes::ROLES, &json!({"name": "Risk Officer"}))
            .await;
        assert_eq!(first.status, 201);

        let res = app
            .post(routes::ROLES, &json!({"name": "Risk Officer"}))
            .await;

        assert_eq!(res.status, 409);
        assert_eq!(res.body["code"], "CONFLICT");
    }

    #[tokio::test]
    async fn blank_name_is_rejected() {
        let app = TestApp::spawn().await;

        let res = app.post(routes::ROLES, &json!({"name": "  "})).await;

        assert_eq!(res.status, 400);
        assert_eq!(res.body["code"], "VALIDATION_ERROR");
    }
}

mod role_updates {
    use super::*;

    #[tokio::test]
    async fn updating_description_leaves_name_unchanged() {
        let app = TestApp::spawn().await;
        let created = app
            .post(
                routes::ROLES,
                &json!({"name": "Risk Officer", "description": "old"}),
            )
            .await;
        let id = created.body["id"].as_i64().unwrap() as i32;

        let res = app
            .patch(&routes::role(id), &json!({"description": "new"}))
            .await;

        assert_eq!(res.status, 200);
        assert_eq!(res.body["name"], "Risk Officer");
        assert_eq!(res.body["description"], "new");
    }

    #[tokio::test]
    async fn empty_patch_returns_current_row_unchanged() {
        let app = TestApp::spawn().await;
        let created = app
            .post(routes::ROLES, &json!({"name": "Risk Officer"}))
            .await;
        let id = created.body["id"].as_i64().unwrap() as i32;

        let res = app.patch(&routes::role(id), &json!({})).await;

        assert_eq!(res.status, 200);
        assert_eq!(res.body, created.body);
    }

    #[tokio::test]
    async fn explicit_empty_name_is_rejected() {
        let app = TestApp::spawn().await;
        let created = app
            .post(routes::ROLES, &json!({"name": "Risk Officer"}))
            .await;
        let id = created.body["id"].as_i64().unwrap() as i32;

        let res = app.patch(&routes::role(id), &json!({"name": ""})).await;

        assert_eq!(res.status, 400);
        assert_eq!(res.body["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn updating_a_missing_role_is_404() {
        let app = TestApp::spawn().await;

        let res = app
            .patch(&routes::role(999_999), &json!({"description": "x"}))
            .await;

        assert_eq!(res.status, 404);
    }
}

mod role_deletion {
    use super::*;

    #[tokio::test]
    async fn deleting_a_role_returns_no_content() {
        let app = TestApp::spawn().await;
        let created = app
            .post(routes::ROLES, &json!({"name": "Risk Officer"}))
            .await;
        let id = created.body["id"].as_i64().unwrap() as i32;

        let res = app.delete(&routes::role(id)).await;
        assert_eq!(res.status, 204);

        let fetched = app.get(&routes::role(id)).await;
        assert_eq!(fetched.status, 404);
    }

    #[tokio::test]
    async fn deleting_a_missing_role_is_404() {
        let app = TestApp::spawn().await;

        let res = app.delete(&routes::role(999_999)).await;

        assert_eq!(res.status, 404);
        assert_eq!(res.body["code"], "NOT_FOUND");
    }
}
