use std::time::Duration;

use serde_json::json;

use crate::common::{TestApp, routes};

async fn insert_topic(app: &TestApp, title: &str) -> i32 {
    use sea_orm::{ActiveModelTrait, Set};
    use server::entity::topic;

    let model = topic::ActiveModel {
        title: Set(title.to_string()),
        created_at: Set(chrono::Utc::now()),
        ..Default::default()
    };
    model.insert(&app.db).await.expect("insert topic").id
}

async fn insert_subtopic_in_topic(app: &TestApp, topic_id: i32, title: &str) -> i32 {
    use sea_orm::{ActiveModelTrait, Set};
    use server::entity::subtopic;

    let model = subtopic::ActiveModel {
        title: Set(title.to_string()),
        topic_id: Set(topic_id),
        created_at: Set(chrono::Utc::now()),
        ..Default::default()
    };
    model.insert(&app.db).await.expect("insert subtopic").id
}

async fn insert_subtopic(app: &TestApp) -> i32 {
    let topic_id = insert_topic(app, "Data governance").await;
    insert_subtopic_in_topic(app, topic_id, "Data quality").await
}

async fn insert_file(app: &TestApp, filename: &str) -> i32 {
    use sea_orm::{ActiveModelTrait, Set};
    use server::entity::file;

    let model = file::ActiveModel {
        filename: Set(filename.to_string()),
        content: Set(b"evidence bytes".to_vec()),
        project_id: Set(None),
        uploaded_by: Set(Some(1)),
        uploaded_time: Set(chrono::Utc::now()),
        ..Default::default()
    };
    model.insert(&app.db).await.expect("insert file").id
}

async fn file_exists(app: &TestApp, id: i32) -> bool {
    use sea_orm::EntityTrait;
    use server::entity::file;

    file::Entity::find_by_id(id)
        .one(&app.db)
        .await
        .expect("query file")
        .is_some()
}

fn question_payload(subtopic_id: i32) -> serde_json::Value {
    json!({
        "subtopic_id": subtopic_id,
        "question": "Q1",
        "answer_type": "text",
        "evidence_required": false,
        "hint": "h",
        "is_required": true,
        "priority_level": "high priority",
        "answer": null
    })
}

fn evidence_descriptor(file_id: i32, filename: &str) -> serde_json::Value {
    json!({
        "id": file_id,
        "filename": filename,
        "project_id": 1,
        "uploaded_by": 1,
        "uploaded_time": "2026-02-01T10:00:00Z"
    })
}

mod question_creation {
    use super::*;

    #[tokio::test]
    async fn creating_a_question_assigns_id_and_leaves_status_unset() {
        let app = TestApp::spawn().await;
        let subtopic_id = insert_subtopic(&app).await;

        let res = app
            .post(routes::QUESTIONS, &question_payload(subtopic_id))
            .await;

        assert_eq!(res.status, 201);
        assert!(res.body["id"].is_number());
        assert_eq!(res.body["question"], "Q1");
        assert_eq!(res.body["hint"], "h");
        assert_eq!(res.body["priority_level"], "high priority");
        assert_eq!(res.body["answer_type"], "text");
        assert_eq!(res.body["evidence_required"], false);
        assert_eq!(res.body["is_required"], true);
        assert!(res.body["status"].is_null());
        assert!(res.body["answer"].is_null());
        assert_eq!(res.body["evidence_files"], json!([]));

        let id = res.body["id"].as_i64().unwrap() as i32;
        let fetched = app.get(&routes::question(id)).await;
        assert_eq!(fetched.status, 200);
        assert_eq!(fetched.body, res.body);
    }

    #[tokio::test]
    async fn create_rejects_unknown_subtopic() {
        let app = TestApp::spawn().await;

        let res = app.post(routes::QUESTIONS, &question_payload(999_999)).await;

        assert_eq!(res.status, 404);
        assert_eq!(res.body["code"], "NOT_FOUND");
    }

    #[tokio::test]
    async fn create_rejects_out_of_set_priority_level() {
        let app = TestApp::spawn().await;
        let subtopic_id = insert_subtopic(&app).await;

        let mut payload = question_payload(subtopic_id);
        payload["priority_level"] = json!("urgent");
        let res = app.post(routes::QUESTIONS, &payload).await;

        assert_eq!(res.status, 400);
        assert_eq!(res.body["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn create_rejects_blank_question_text() {
        let app = TestApp::spawn().await;
        let subtopic_id = insert_subtopic(&app).await;

        let mut payload = question_payload(subtopic_id);
        payload["question"] = json!("   ");
        let res = app.post(routes::QUESTIONS, &payload).await;

        assert_eq!(res.status, 400);
        assert_eq!(res.body["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn malformed_path_id_is_rejected_before_the_store() {
        let app = TestApp::spawn().await;

        let res = app.get("/api/v1/questions/not-a-number").await;

        assert_eq!(res.status, 400);
    }
}

mod question_updates {
    use super::*;

    #[tokio::test]
    async fn empty_patch_returns_current_row_unchanged() {
        let app = TestApp::spawn().await;
        let subtopic_id = insert_subtopic(&app).await;
        let created = app
            .post(routes::QUESTIONS, &question_payload(subtopic_id))
            .await;
        let id = created.body["id"].as_i64().unwrap() as i32;

        let res = app.patch(&routes::question(id), &json!({})).await;

        assert_eq!(res.status, 200);
        assert_eq!(res.body, created.body);
    }

    #[tokio::test]
    async fn patch_only_touches_supplied_fields() {
        let app = TestApp::spawn().await;
        let subtopic_id = insert_subtopic(&app).await;
        let created = app
            .post(routes::QUESTIONS, &question_payload(subtopic_id))
            .await;
        let id = created.body["id"].as_i64().unwrap() as i32;

        let res = app
            .patch(&routes::question(id), &json!({"status": "In progress"}))
            .await;
        assert_eq!(res.status, 200);
        assert_eq!(res.body["status"], "In progress");
        assert!(res.body["answer"].is_null());

        // Snapshot before/after: updating the answer must not move the status.
        let res = app
            .patch(
                &routes::question(id),
                &json!({"answer": "Access is reviewed quarterly"}),
            )
            .await;
        assert_eq!(res.status, 200);
        assert_eq!(res.body["answer"], "Access is reviewed quarterly");
        assert_eq!(res.body["status"], "In progress");
    }

    #[tokio::test]
    async fn explicit_null_answer_clears_to_empty_string() {
        let app = TestApp::spawn().await;
        let subtopic_id = insert_subtopic(&app).await;
        let created = app
            .post(routes::QUESTIONS, &question_payload(subtopic_id))
            .await;
        let id = created.body["id"].as_i64().unwrap() as i32;

        app.patch(&routes::question(id), &json!({"answer": "draft answer"}))
            .await;
        let res = app.patch(&routes::question(id), &json!({"answer": null})).await;

        assert_eq!(res.status, 200);
        assert_eq!(res.body["answer"], "");
    }

    #[tokio::test]
    async fn updating_a_missing_question_is_404() {
        let app = TestApp::spawn().await;

        let res = app
            .patch(&routes::question(999_999), &json!({"status": "Done"}))
            .await;

        assert_eq!(res.status, 404);
        assert_eq!(res.body["code"], "NOT_FOUND");
    }
}

mod evidence_files {
    use super::*;

    #[tokio::test]
    async fn attach_merges_descriptors_into_the_list() {
        let app = TestApp::spawn().await;
        let subtopic_id = insert_subtopic(&app).await;
        let created = app
            .post(routes::QUESTIONS, &question_payload(subtopic_id))
            .await;
        let id = created.body["id"].as_i64().unwrap() as i32;

        let file_a = insert_file(&app, "soc2-report.pdf").await;
        let file_b = insert_file(&app, "pentest-summary.pdf").await;

        let res = app
            .patch(
                &routes::question_evidence_files(id),
                &json!({"uploads": [
                    evidence_descriptor(file_a, "soc2-report.pdf"),
                    evidence_descriptor(file_b, "pentest-summary.pdf"),
                ]}),
            )
            .await;

        assert_eq!(res.status, 200);
        let files = res.body["evidence_files"].as_array().unwrap();
        assert_eq!(files.len(), 2);
        // Responses carry only the summary form of each descriptor.
        assert_eq!(files[0], json!({"id": file_a, "filename": "soc2-report.pdf"}));
        assert_eq!(
            files[1],
            json!({"id": file_b, "filename": "pentest-summary.pdf"})
        );
    }

    #[tokio::test]
    async fn detach_removes_descriptor_and_deletes_the_file_row() {
        let app = TestApp::spawn().await;
        let subtopic_id = insert_subtopic(&app).await;
        let created = app
            .post(routes::QUESTIONS, &question_payload(subtopic_id))
            .await;
        let id = created.body["id"].as_i64().unwrap() as i32;

        let file_a = insert_file(&app, "a.pdf").await;
        let file_b = insert_file(&app, "b.pdf").await;
        app.patch(
            &routes::question_evidence_files(id),
            &json!({"uploads": [
                evidence_descriptor(file_a, "a.pdf"),
                evidence_descriptor(file_b, "b.pdf"),
            ]}),
        )
        .await;

        let res = app
            .patch(
                &routes::question_evidence_files(id),
                &json!({"deleted": [file_a]}),
            )
            .await;

        assert_eq!(res.status, 200);
        let files = res.body["evidence_files"].as_array().unwrap();
        assert_eq!(files.len(), 1);
        assert_eq!(files[0]["id"], file_b);

        assert!(!file_exists(&app, file_a).await);
        assert!(file_exists(&app, file_b).await);
    }

    #[tokio::test]
    async fn deleting_a_question_removes_referenced_file_rows() {
        let app = TestApp::spawn().await;
        let subtopic_id = insert_subtopic(&app).await;
        let created = app
            .post(routes::QUESTIONS, &question_payload(subtopic_id))
            .await;
        let id = created.body["id"].as_i64().unwrap() as i32;

        let file_a = insert_file(&app, "a.pdf").await;
        let file_b = insert_file(&app, "b.pdf").await;
        app.patch(
            &routes::question_evidence_files(id),
            &json!({"uploads": [
                evidence_descriptor(file_a, "a.pdf"),
                evidence_descriptor(file_b, "b.pdf"),
            ]}),
        )
        .await;

        let res = app.delete(&routes::question(id)).await;
        assert_eq!(res.status, 204);

        // Cleanup runs inside the delete transaction, so by the time the
        // response arrives both rows must be gone.
        assert!(!file_exists(&app, file_a).await);
        assert!(!file_exists(&app, file_b).await);

        let fetched = app.get(&routes::question(id)).await;
        assert_eq!(fetched.status, 404);
    }

    #[tokio::test]
    async fn deleting_a_missing_question_is_404() {
        let app = TestApp::spawn().await;

        let res = app.delete(&routes::question(999_999)).await;

        assert_eq!(res.status, 404);
        assert_eq!(res.body["code"], "NOT_FOUND");
    }
}

mod question_listing {
    use super::*;

    #[tokio::test]
    async fn listing_is_most_recent_first() {
        let app = TestApp::spawn().await;
        let subtopic_id = insert_subtopic(&app).await;

        let first = app
            .post(routes::QUESTIONS, &question_payload(subtopic_id))
            .await;
        tokio::time::sleep(Duration::from_millis(15)).await;
        let second = app
            .post(routes::QUESTIONS, &question_payload(subtopic_id))
            .await;

        let res = app.get(&routes::subtopic_questions(subtopic_id)).await;

        assert_eq!(res.status, 200);
        let items = res.body.as_array().unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0]["id"], second.body["id"]);
        assert_eq!(items[1]["id"], first.body["id"]);

        // The unscoped listing uses the same ordering.
        let all = app.get(routes::QUESTIONS).await;
        assert_eq!(all.status, 200);
        let items = all.body.as_array().unwrap();
        assert_eq!(items[0]["id"], second.body["id"]);
        assert_eq!(items[1]["id"], first.body["id"]);
    }

    #[tokio::test]
    async fn topic_listing_spans_its_subtopics_only() {
        let app = TestApp::spawn().await;
        let topic_id = insert_topic(&app, "Data governance").await;
        let sub_a = insert_subtopic_in_topic(&app, topic_id, "Quality").await;
        let sub_b = insert_subtopic_in_topic(&app, topic_id, "Retention").await;

        let other_topic = insert_topic(&app, "Transparency").await;
        let other_sub = insert_subtopic_in_topic(&app, other_topic, "Disclosure").await;

        app.post(routes::QUESTIONS, &question_payload(sub_a)).await;
        app.post(routes::QUESTIONS, &question_payload(sub_b)).await;
        app.post(routes::QUESTIONS, &question_payload(other_sub))
            .await;

        let res = app.get(&routes::topic_questions(topic_id)).await;

        assert_eq!(res.status, 200);
        let items = res.body.as_array().unwrap();
        assert_eq!(items.len(), 2);
        for item in items {
            let subtopic = item["subtopic_id"].as_i64().unwrap() as i32;
            assert!(subtopic == sub_a || subtopic == sub_b);
        }
    }

    #[tokio::test]
    async fn listing_an_empty_subtopic_returns_an_empty_array() {
        let app = TestApp::spawn().await;
        let subtopic_id = insert_subtopic(&app).await;

        let res = app.get(&routes::subtopic_questions(subtopic_id)).await;

        assert_eq!(res.status, 200);
        assert_eq!(res.body, json!([]));
    }

    #[tokio::test]
    async fn listing_an_unknown_subtopic_is_404() {
        let app = TestApp::spawn().await;

        let res = app.get(&routes::subtopic_questions(999_999)).await;

        assert_eq!(res.status, 404);
        assert_eq!(res.body["code"], "NOT_FOUND");
    }
}
