pub mod config;
pub mod domain;
pub mod global;
pub mod state;
pub mod utils;

pub use state::AppState;

use axum::{
    http::{header, HeaderValue, Method},
    middleware,
    routing::{get, patch, post, put},
    Router,
};
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};
use utoipa_swagger_ui::SwaggerUi;

use domain::{
    auth, board, checklist, consultation, counselor, healing, health, notice, review, user,
};
use global::middleware::request_id_middleware;

#[derive(OpenApi)]
#[openapi(
    paths(
        health::handler::root,
        health::handler::health_check,
        auth::handler::register,
        auth::handler::login,
        auth::handler::refresh,
        auth::handler::logout,
        auth::handler::me,
        user::handler::list_users,
        user::handler::update_me,
        user::handler::withdraw,
        user::handler::admin_update_user,
        user::handler::delete_user,
        counselor::handler::list_counselors,
        counselor::handler::list_online_counselors,
        counselor::handler::get_counselor,
        counselor::handler::create_counselor,
        counselor::handler::update_counselor,
        counselor::handler::delete_counselor,
        counselor::handler::toggle_counselor_status,
        consultation::handler::create_consultation,
        consultation::handler::list_my_consultations,
        consultation::handler::list_public_consultations,
        consultation::handler::list_all_consultations,
        consultation::handler::consultation_stats,
        consultation::handler::get_consultation,
        consultation::handler::update_consultation,
        consultation::handler::delete_consultation,
        consultation::handler::add_session,
        consultation::handler::list_sessions,
        consultation::handler::update_session,
        healing::handler::get_progress,
        healing::handler::upsert_progress,
        healing::handler::list_steps,
        healing::handler::get_step,
        healing::handler::upsert_step,
        healing::handler::delete_step,
        review::handler::create_review,
        review::handler::list_reviews,
        review::handler::list_approved_reviews,
        review::handler::get_review,
        review::handler::update_review,
        review::handler::delete_review,
        review::handler::like_review,
        review::handler::unlike_review,
        notice::handler::create_notice,
        notice::handler::list_notices,
        notice::handler::list_published_notices,
        notice::handler::get_notice,
        notice::handler::update_notice,
        notice::handler::delete_notice,
        board::handler::create_board,
        board::handler::list_boards,
        board::handler::get_board,
        board::handler::update_board,
        board::handler::delete_board,
        board::handler::list_comments,
        board::handler::create_comment,
        board::handler::update_comment,
        board::handler::delete_comment,
        board::handler::like_board,
        board::handler::unlike_board,
        checklist::handler::list_checklists,
        checklist::handler::get_checklist,
        checklist::handler::create_checklist,
        checklist::handler::update_checklist,
        checklist::handler::delete_checklist,
        checklist::handler::list_items,
        checklist::handler::create_item,
        checklist::handler::update_item,
        checklist::handler::delete_item,
        checklist::handler::submit_responses,
        checklist::handler::list_my_responses,
        checklist::handler::checklist_summary,
    ),
    components(
        schemas(
            utils::response::ErrorResponse,
            utils::response::MessageResponse,
            utils::pagination::UserPage,
            utils::pagination::CounselorPage,
            utils::pagination::ConsultationPage,
            utils::pagination::PublicConsultationPage,
            utils::pagination::ReviewPage,
            utils::pagination::NoticePage,
            utils::pagination::BoardPage,
            utils::pagination::ChecklistMasterPage,
            health::dto::ServiceInfo,
            health::dto::HealthStatus,
            health::dto::HealthState,
            health::dto::HealthChecks,
            health::dto::CheckResult,
            auth::dto::RegisterRequest,
            auth::dto::LoginRequest,
            auth::dto::TokenRefreshRequest,
            auth::dto::TokenResponse,
            user::dto::UserResponse,
            user::dto::UpdateMeRequest,
            user::dto::AdminUpdateUserRequest,
            counselor::dto::CounselorResponse,
            counselor::dto::CreateCounselorRequest,
            counselor::dto::UpdateCounselorRequest,
            consultation::entity::consultation::ConsultationType,
            consultation::entity::consultation::ConsultationStatus,
            consultation::entity::consultation::UrgencyLevel,
            consultation::entity::consultation_session::SessionStatus,
            consultation::dto::CreateConsultationRequest,
            consultation::dto::UpdateConsultationRequest,
            consultation::dto::ConsultationResponse,
            consultation::dto::PublicConsultationItem,
            consultation::dto::ConsultationStats,
            consultation::dto::CreateSessionRequest,
            consultation::dto::UpdateSessionRequest,
            consultation::dto::SessionResponse,
            healing::entity::healing_step::QaPair,
            healing::dto::UpsertProgressRequest,
            healing::dto::ProgressResponse,
            healing::dto::QaPairInput,
            healing::dto::UpsertStepRequest,
            healing::dto::StepResponse,
            review::dto::CreateReviewRequest,
            review::dto::UpdateReviewRequest,
            review::dto::ReviewResponse,
            review::dto::ReviewLikeResponse,
            notice::entity::notice::NoticeType,
            notice::entity::notice::NoticeStatus,
            notice::dto::CreateNoticeRequest,
            notice::dto::UpdateNoticeRequest,
            notice::dto::NoticeResponse,
            board::dto::CreateBoardRequest,
            board::dto::UpdateBoardRequest,
            board::dto::BoardListItem,
            board::dto::BoardResponse,
            board::dto::CreateCommentRequest,
            board::dto::UpdateCommentRequest,
            board::dto::CommentResponse,
            board::dto::BoardLikeResponse,
            checklist::entity::checklist_item::ItemType,
            checklist::dto::CreateChecklistMasterRequest,
            checklist::dto::UpdateChecklistMasterRequest,
            checklist::dto::ChecklistMasterResponse,
            checklist::dto::ChecklistDetailResponse,
            checklist::dto::CreateChecklistItemRequest,
            checklist::dto::UpdateChecklistItemRequest,
            checklist::dto::ChecklistItemResponse,
            checklist::dto::ChecklistAnswer,
            checklist::dto::SubmitChecklistRequest,
            checklist::dto::ChecklistResponseItem,
            checklist::dto::ChecklistSummary,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "헬스체크"),
        (name = "Auth", description = "회원가입/로그인/토큰"),
        (name = "User", description = "회원 관리"),
        (name = "Counselor", description = "상담사"),
        (name = "Consultation", description = "상담 신청/회기"),
        (name = "Healing", description = "힐링 프로그램 진행"),
        (name = "Review", description = "상담 후기"),
        (name = "Notice", description = "공지사항"),
        (name = "Board", description = "게시판/댓글/좋아요"),
        (name = "Checklist", description = "사전 체크리스트")
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE, header::ACCEPT])
        .allow_credentials(true)
}

fn api_routes() -> Router<AppState> {
    Router::new()
        // Auth
        .route("/auth/register", post(auth::handler::register))
        .route("/auth/login", post(auth::handler::login))
        .route("/auth/refresh", post(auth::handler::refresh))
        .route("/auth/logout", post(auth::handler::logout))
        .route("/auth/me", get(auth::handler::me))
        // User
        .route("/users", get(user::handler::list_users))
        .route(
            "/users/me",
            patch(user::handler::update_me).delete(user::handler::withdraw),
        )
        .route(
            "/users/:user_id",
            patch(user::handler::admin_update_user)
                .delete(user::handler::delete_user),
        )
        // Counselor
        .route(
            "/counselors",
            get(counselor::handler::list_counselors).post(counselor::handler::create_counselor),
        )
        .route(
            "/counselors/online",
            get(counselor::handler::list_online_counselors),
        )
        .route(
            "/counselors/:counselor_id",
            get(counselor::handler::get_counselor)
                .put(counselor::handler::update_counselor)
                .delete(counselor::handler::delete_counselor),
        )
        .route(
            "/counselors/:counselor_id/toggle-status",
            patch(counselor::handler::toggle_counselor_status)
                .put(counselor::handler::toggle_counselor_status),
        )
        // Consultation
        .route(
            "/consultations",
            post(consultation::handler::create_consultation)
                .get(consultation::handler::list_my_consultations),
        )
        .route(
            "/consultations/public",
            get(consultation::handler::list_public_consultations),
        )
        .route(
            "/consultations/admin",
            get(consultation::handler::list_all_consultations),
        )
        .route(
            "/consultations/stats/overview",
            get(consultation::handler::consultation_stats),
        )
        .route(
            "/consultations/:consultation_id",
            get(consultation::handler::get_consultation)
                .put(consultation::handler::update_consultation)
                .delete(consultation::handler::delete_consultation),
        )
        .route(
            "/consultations/:consultation_id/sessions",
            post(consultation::handler::add_session).get(consultation::handler::list_sessions),
        )
        .route(
            "/consultations/:consultation_id/sessions/:session_id",
            put(consultation::handler::update_session),
        )
        // Healing
        .route(
            "/consultations/:consultation_id/healing/progress",
            get(healing::handler::get_progress).put(healing::handler::upsert_progress),
        )
        .route(
            "/consultations/:consultation_id/healing/steps",
            get(healing::handler::list_steps),
        )
        .route(
            "/consultations/:consultation_id/healing/steps/:step_number",
            get(healing::handler::get_step)
                .put(healing::handler::upsert_step)
                .delete(healing::handler::delete_step),
        )
        // Review
        .route(
            "/reviews",
            post(review::handler::create_review).get(review::handler::list_reviews),
        )
        .route("/reviews/approved", get(review::handler::list_approved_reviews))
        .route(
            "/reviews/:review_id",
            get(review::handler::get_review)
                .put(review::handler::update_review)
                .delete(review::handler::delete_review),
        )
        .route(
            "/reviews/:review_id/like",
            post(review::handler::like_review).delete(review::handler::unlike_review),
        )
        // Notice
        .route(
            "/notices",
            post(notice::handler::create_notice).get(notice::handler::list_notices),
        )
        .route(
            "/notices/published",
            get(notice::handler::list_published_notices),
        )
        .route(
            "/notices/:notice_id",
            get(notice::handler::get_notice)
                .put(notice::handler::update_notice)
                .delete(notice::handler::delete_notice),
        )
        // Board
        .route(
            "/boards",
            post(board::handler::create_board).get(board::handler::list_boards),
        )
        .route(
            "/boards/:board_id",
            get(board::handler::get_board)
                .put(board::handler::update_board)
                .delete(board::handler::delete_board),
        )
        .route(
            "/boards/:board_id/comments",
            get(board::handler::list_comments).post(board::handler::create_comment),
        )
        .route(
            "/boards/:board_id/comments/:comment_id",
            put(board::handler::update_comment).delete(board::handler::delete_comment),
        )
        .route(
            "/boards/:board_id/like",
            post(board::handler::like_board).delete(board::handler::unlike_board),
        )
        // Checklist
        .route(
            "/checklists",
            get(checklist::handler::list_checklists).post(checklist::handler::create_checklist),
        )
        .route(
            "/checklists/responses/me",
            get(checklist::handler::list_my_responses),
        )
        .route(
            "/checklists/:master_id",
            get(checklist::handler::get_checklist)
                .put(checklist::handler::update_checklist)
                .delete(checklist::handler::delete_checklist),
        )
        .route(
            "/checklists/:master_id/items",
            get(checklist::handler::list_items).post(checklist::handler::create_item),
        )
        .route(
            "/checklists/:master_id/items/:item_id",
            put(checklist::handler::update_item).delete(checklist::handler::delete_item),
        )
        .route(
            "/checklists/:master_id/responses",
            post(checklist::handler::submit_responses),
        )
        .route(
            "/checklists/:master_id/summary",
            get(checklist::handler::checklist_summary),
        )
}

/// 애플리케이션 라우터 구성
pub fn create_router(state: AppState) -> Router {
    let cors = cors_layer(&state.config.cors_origins);

    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .route("/", get(health::root))
        .route("/health", get(health::health_check))
        .nest("/api/v1", api_routes())
        .layer(middleware::from_fn(request_id_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
