use sea_orm::sea_query::{Index, OnConflict, PostgresQueryBuilder};
use sea_orm::*;
use tracing::info;

use crate::entity::{project_risk, question, role, vendor_risk};

/// Default roles seeded on startup.
const DEFAULT_ROLES: &[(&str, &str)] = &[
    ("Admin", "Full administrative access to the platform"),
    ("Reviewer", "Reviews assessments and risk registers"),
    ("Editor", "Creates and edits assessments and risks"),
    ("Auditor", "Read-only access for audit purposes"),
];

/// Seed the `role` table with defaults.
pub async fn seed_default_roles(db: &DatabaseConnection) -> Result<(), DbErr> {
    let mut roles_inserted = 0u32;
    for &(name, description) in DEFAULT_ROLES {
        let model = role::ActiveModel {
            name: Set(name.to_string()),
            description: Set(description.to_string()),
            created_at: Set(chrono::Utc::now()),
            ..Default::default()
        };

        let result = role::Entity::insert(model)
            .on_conflict(
                OnConflict::column(role::Column::Name)
                    .do_nothing()
                    .to_owned(),
            )
            .exec_without_returning(db)
            .await;

        match result {
            Ok(_) => roles_inserted += 1,
            Err(DbErr::RecordNotInserted) => {}
            Err(e) => return Err(e),
        }
    }

    if roles_inserted > 0 {
        info!("Seeded {} new roles", roles_inserted);
    }

    Ok(())
}

/// Create secondary indexes for the scoped list queries. Best effort;
/// a failure is logged and startup continues.
pub async fn ensure_indexes(db: &DatabaseConnection) -> Result<(), DbErr> {
    // Composite index for subtopic-scoped question listing:
    // SELECT * FROM question WHERE subtopic_id = ? ORDER BY created_at DESC, id ASC
    create_index(
        db,
        Index::create()
            .if_not_exists()
            .name("idx_question_subtopic_created")
            .table(question::Entity)
            .col(question::Column::SubtopicId)
            .col(question::Column::CreatedAt)
            .to_string(PostgresQueryBuilder),
        "idx_question_subtopic_created",
    )
    .await;

    // Project-scoped risk listings.
    create_index(
        db,
        Index::create()
            .if_not_exists()
            .name("idx_project_risk_project_created")
            .table(project_risk::Entity)
            .col(project_risk::Column::ProjectId)
            .col(project_risk::Column::CreatedAt)
            .to_string(PostgresQueryBuilder),
        "idx_project_risk_project_created",
    )
    .await;

    create_index(
        db,
        Index::create()
            .if_not_exists()
            .name("idx_vendor_risk_project_created")
            .table(vendor_risk::Entity)
            .col(vendor_risk::Column::ProjectId)
            .col(vendor_risk::Column::CreatedAt)
            .to_string(PostgresQueryBuilder),
        "idx_vendor_risk_project_created",
    )
    .await;

    Ok(())
}

async fn create_index(db: &DatabaseConnection, stmt: String, name: &str) {
    match db.execute_unprepared(&stmt).await {
        Ok(_) => {
            info!("Ensured index {} exists", name);
        }
        Err(e) => {
            tracing::warn!("Failed to create index {}: {}", name, e);
        }
    }
}
