pub mod config;
pub mod dtos;
pub mod handlers;
pub mod models;
pub mod services;
pub mod startup;
pub mod utils;

use axum::{
    http::{header, HeaderName, HeaderValue, Method},
    middleware::from_fn,
    routing::{get, post, put},
    Router,
};
use service_core::middleware::{
    metrics::metrics_middleware,
    security_headers::security_headers_middleware,
    tracing::{make_request_span, request_id_middleware, REQUEST_ID_HEADER},
};
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::startup::AppState;
use crate::utils::user_id::USER_ID_HEADER;

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::health::health_check,
        handlers::health::readiness_check,
        handlers::auth::login,
        handlers::auth::register,
        handlers::users::update_user,
        handlers::professionals::list_professionals,
        handlers::professionals::get_professional,
        handlers::professionals::list_pending_invitations,
        handlers::appointments::create_appointment,
        handlers::appointments::list_client_appointments,
        handlers::appointments::list_professional_appointments,
        handlers::working_hours::create_working_hours,
        handlers::working_hours::list_working_hours,
        handlers::working_hours::update_working_hours,
        handlers::working_hours::delete_working_hours,
        handlers::procedures::create_procedure,
        handlers::procedures::list_procedures,
        handlers::procedures::update_procedure,
        handlers::procedures::delete_procedure,
        handlers::ratings::create_rating,
        handlers::establishments::create_establishment,
        handlers::establishments::list_establishments,
        handlers::establishments::get_establishment,
        handlers::establishments::update_establishment,
        handlers::establishments::list_members,
        handlers::establishments::remove_professional,
        handlers::invitations::invite_professional,
        handlers::invitations::respond_invitation,
        handlers::uploads::set_image_url,
        handlers::admins::list_admins,
        handlers::admins::get_admin,
        handlers::admins::create_admin,
        handlers::admins::update_admin,
        handlers::admins::delete_admin,
        handlers::reports::professional_revenue,
        handlers::reports::professional_ratings,
        handlers::reports::professional_appointments_per_month,
        handlers::reports::establishment_revenue,
        handlers::reports::establishment_ratings,
        handlers::reports::establishment_appointments_per_month,
    ),
    components(
        schemas(
            dtos::ErrorResponse,
            dtos::MessageResponse,
            dtos::CreatedResponse,
            dtos::LoginRequest,
            dtos::RegisterRequest,
            dtos::CreateAdminRequest,
            dtos::UpdateUserRequest,
            dtos::UserResponse,
            dtos::AuthResponse,
            dtos::CreateAppointmentRequest,
            dtos::AppointmentResponse,
            dtos::ProfessionalAppointmentResponse,
            dtos::CreateRatingRequest,
            dtos::RatingResponse,
            dtos::CreateWorkingHoursRequest,
            dtos::UpdateWorkingHoursRequest,
            dtos::WorkingHoursResponse,
            dtos::CreateWorkingHoursResponse,
            dtos::CreateProcedureRequest,
            dtos::UpdateProcedureRequest,
            dtos::ProcedureResponse,
            dtos::ImageUrlRequest,
            dtos::ImageUrlResponse,
            dtos::EstablishmentRequest,
            dtos::EstablishmentResponse,
            dtos::MemberResponse,
            dtos::InviteRequest,
            dtos::InviteResponse,
            dtos::RespondInvitationRequest,
            dtos::InvitationView,
            dtos::RevenueReport,
            dtos::RatingReport,
            dtos::MonthlyAppointmentsReport,
            models::UserKind,
            models::Weekday,
            models::Address,
            models::MemberStatus,
            models::InvitationKind,
            models::InvitationResponse,
        )
    ),
    tags(
        (name = "Authentication", description = "Login and registration"),
        (name = "Users", description = "Profile updates for every account kind"),
        (name = "Professionals", description = "Professional directory"),
        (name = "Working hours", description = "Weekly availability windows"),
        (name = "Procedures", description = "Services offered by professionals"),
        (name = "Appointments", description = "Booking against working hours"),
        (name = "Ratings", description = "Client feedback"),
        (name = "Establishments", description = "Businesses and their professionals"),
        (name = "Invitations", description = "Establishment invitations"),
        (name = "Uploads", description = "Image URLs for professionals and procedures"),
        (name = "Admins", description = "Administrator accounts"),
        (name = "Reports", description = "Revenue, ratings and monthly bookings"),
        (name = "Observability", description = "Service health and monitoring"),
    )
)]
pub struct ApiDoc;

fn api_routes() -> Router<AppState> {
    use crate::handlers::*;

    Router::new()
        .route("/login", post(auth::login))
        .route("/register", post(auth::register))
        .route("/users/:id", put(users::update_user))
        .route("/appointments", post(appointments::create_appointment))
        .route(
            "/appointments/client/:id",
            get(appointments::list_client_appointments),
        )
        .route(
            "/appointments/professional/:id",
            get(appointments::list_professional_appointments),
        )
        .route("/professionals", get(professionals::list_professionals))
        .route("/professionals/:id", get(professionals::get_professional))
        .route(
            "/professionals/:id/pending-invitations",
            get(professionals::list_pending_invitations),
        )
        .route("/working-hours", post(working_hours::create_working_hours))
        // GET takes a professional id, PUT and DELETE a working-hours id.
        .route(
            "/working-hours/:id",
            get(working_hours::list_working_hours)
                .put(working_hours::update_working_hours)
                .delete(working_hours::delete_working_hours),
        )
        .route("/procedures", post(procedures::create_procedure))
        .route(
            "/procedures/:id",
            get(procedures::list_procedures)
                .put(procedures::update_procedure)
                .delete(procedures::delete_procedure),
        )
        .route("/ratings", post(ratings::create_rating))
        .route(
            "/establishments",
            get(establishments::list_establishments).post(establishments::create_establishment),
        )
        .route(
            "/establishments/:id",
            get(establishments::get_establishment).put(establishments::update_establishment),
        )
        .route(
            "/establishments/:id/professionals",
            get(establishments::list_members),
        )
        .route(
            "/establishments/:id/professionals/:professional_id",
            axum::routing::delete(establishments::remove_professional),
        )
        .route("/invitations", post(invitations::invite_professional))
        .route(
            "/invitations/:id/respond",
            post(invitations::respond_invitation),
        )
        .route("/upload/:kind/:id", put(uploads::set_image_url))
        .route(
            "/admins",
            get(admins::list_admins).post(admins::create_admin),
        )
        .route(
            "/admins/:id",
            get(admins::get_admin)
                .put(admins::update_admin)
                .delete(admins::delete_admin),
        )
        .route(
            "/reports/professionals/:id/revenue",
            get(reports::professional_revenue),
        )
        .route(
            "/reports/professionals/:id/ratings",
            get(reports::professional_ratings),
        )
        .route(
            "/reports/professionals/:id/appointments-per-month",
            get(reports::professional_appointments_per_month),
        )
        .route(
            "/reports/establishments/:id/revenue",
            get(reports::establishment_revenue),
        )
        .route(
            "/reports/establishments/:id/ratings",
            get(reports::establishment_ratings),
        )
        .route(
            "/reports/establishments/:id/appointments-per-month",
            get(reports::establishment_appointments_per_month),
        )
}

fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let origins = if allowed_origins.iter().any(|o| o == "*") {
        AllowOrigin::from(Any)
    } else {
        AllowOrigin::list(allowed_origins.iter().filter_map(|o| {
            o.parse::<HeaderValue>()
                .map_err(|e| tracing::error!("Invalid CORS origin '{}': {}. Skipping.", o, e))
                .ok()
        }))
    };

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([
            header::AUTHORIZATION,
            header::CONTENT_TYPE,
            HeaderName::from_static(REQUEST_ID_HEADER),
            HeaderName::from_static(USER_ID_HEADER),
        ])
}

pub fn build_router(state: AppState) -> Router {
    let mut app = Router::new()
        .route("/health", get(handlers::health_check))
        .route("/ready", get(handlers::readiness_check))
        .route("/metrics", get(handlers::metrics_endpoint))
        .nest("/api", api_routes());

    if state.config.swagger.enabled {
        app = app.merge(SwaggerUi::new("/docs").url("/.well-known/openapi.json", ApiDoc::openapi()));
    } else {
        // Keep the OpenAPI document reachable for tooling.
        app = app.route(
            "/.well-known/openapi.json",
            get(|| async { axum::Json(ApiDoc::openapi()) }),
        );
    }

    let cors = cors_layer(&state.config.security.allowed_origins);

    app.with_state(state)
        .layer(from_fn(metrics_middleware))
        .layer(TraceLayer::new_for_http().make_span_with(make_request_span::<axum::body::Body>))
        .layer(from_fn(request_id_middleware))
        .layer(from_fn(security_headers_middleware))
        .layer(cors)
}
