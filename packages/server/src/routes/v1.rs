use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

use crate::handlers;
use crate::state::AppState;

pub fn routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .nest("/questions", question_routes())
        .nest("/subtopics", subtopic_routes())
        .nest("/topics", topic_routes())
        .nest("/roles", role_routes())
        .nest("/projects", project_scoped_routes())
        .nest("/project-risks", project_risk_routes())
        .nest("/vendor-risks", vendor_risk_routes())
}

fn question_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(
            handlers::question::list_questions,
            handlers::question::create_question
        ))
        .routes(routes!(
            handlers::question::get_question,
            handlers::question::update_question,
            handlers::question::delete_question
        ))
        .routes(routes!(handlers::question::update_question_evidence_files))
}

fn subtopic_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new().routes(routes!(handlers::question::list_questions_by_subtopic))
}

fn topic_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new().routes(routes!(handlers::question::list_questions_by_topic))
}

fn role_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(
            handlers::role::list_roles,
            handlers::role::create_role
        ))
        .routes(routes!(
            handlers::role::get_role,
            handlers::role::update_role,
            handlers::role::delete_role
        ))
}

fn project_scoped_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(handlers::project_risk::list_project_risks))
        .routes(routes!(
            handlers::project_risk::list_non_mitigated_project_risks
        ))
        .routes(routes!(handlers::vendor_risk::list_vendor_risks_by_project))
}

fn project_risk_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(handlers::project_risk::create_project_risk))
        .routes(routes!(
            handlers::project_risk::get_project_risk,
            handlers::project_risk::update_project_risk,
            handlers::project_risk::delete_project_risk
        ))
}

fn vendor_risk_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(
            handlers::vendor_risk::list_vendor_risks,
            handlers::vendor_risk::create_vendor_risk
        ))
        .routes(routes!(
            handlers::vendor_risk::get_vendor_risk,
            handlers::vendor_risk::update_vendor_risk,
            handlers::vendor_risk::delete_vendor_risk
        ))
}
