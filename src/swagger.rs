use actix_web::web;
use utoipa::OpenApi;
use utoipa::{
    Modify,
    openapi::security::{ApiKey, ApiKeyValue, SecurityScheme},
};
use utoipa_swagger_ui::SwaggerUi;

use crate::handlers;
use crate::models::*;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.as_mut().unwrap();
        components.add_security_scheme(
            "admin_email",
            SecurityScheme::ApiKey(ApiKey::Header(ApiKeyValue::new("X-Admin-Email"))),
        );
        components.add_security_scheme(
            "admin_key",
            SecurityScheme::ApiKey(ApiKey::Header(ApiKeyValue::new("X-Admin-Key"))),
        );
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::auth::login,
        handlers::tickets::submit_ticket,
        handlers::tickets::referral_status,
        handlers::stats::get_stats,
        handlers::winners::get_winners,
        handlers::announcements::get_current,
        handlers::announcements::get_archive,
        handlers::config::get_public_config,
        handlers::admin::pending_tickets,
        handlers::admin::ticket_history,
        handlers::admin::approve_ticket,
        handlers::admin::reject_ticket,
        handlers::admin::declare_winner,
        handlers::admin::broadcast,
        handlers::admin::get_config,
        handlers::admin::set_config,
    ),
    components(
        schemas(
            Ticket,
            TicketStatus,
            PrizeType,
            DeviceType,
            SubmitTicketRequest,
            SubmitTicketResponse,
            HistoryQuery,
            ReferralStatusResponse,
            Winner,
            Announcement,
            BroadcastRequest,
            AppConfig,
            PrizeImages,
            PublicConfigResponse,
            AdminLoginRequest,
            AdminLoginResponse,
            PrizeStats,
            StatsSnapshot,
            ApiError,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "auth", description = "Admin authentication API"),
        (name = "tickets", description = "Ticket submission API"),
        (name = "stats", description = "Derived statistics API"),
        (name = "winners", description = "Winner wall API"),
        (name = "announcements", description = "Announcement API"),
        (name = "config", description = "Public configuration API"),
        (name = "admin", description = "Admin review API"),
    ),
    info(
        title = "Aura Backend API",
        version = "1.0.0",
        description = "Aura Platinum raffle backend REST API documentation"
    ),
    servers(
        (url = "/api/v1", description = "Local server")
    )
)]
pub struct ApiDoc;

pub fn swagger_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        SwaggerUi::new("/swagger-ui/{_:.*}").url("/api-docs/openapi.json", ApiDoc::openapi()),
    )
    .route(
        "/swagger-ui",
        web::get().to(|| async {
            actix_web::HttpResponse::Found()
                .append_header(("Location", "/swagger-ui/"))
                .finish()
        }),
    );
}
