use actix_web::{HttpResponse, ResponseError, Result, web};
use serde_json::json;

use crate::models::Announcement;
use crate::services::AnnouncementService;

#[utoipa::path(
    get,
    path = "/announcements/current",
    tag = "announcements",
    responses(
        (status = 200, description = "当前横幅（从未广播时为默认文案）", body = Announcement)
    )
)]
pub async fn get_current(service: web::Data<AnnouncementService>) -> Result<HttpResponse> {
    match service.current() {
        Ok(announcement) => {
            Ok(HttpResponse::Ok().json(json!({ "success": true, "data": announcement })))
        }
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/announcements/archive",
    tag = "announcements",
    responses(
        (status = 200, description = "新闻档案，最新在前，最多 50 条", body = [Announcement])
    )
)]
pub async fn get_archive(service: web::Data<AnnouncementService>) -> Result<HttpResponse> {
    match service.archive() {
        Ok(archive) => Ok(HttpResponse::Ok().json(json!({ "success": true, "data": archive }))),
        Err(e) => Ok(e.error_response()),
    }
}

/// 路由配置
pub fn announcement_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/announcements")
            .route("/current", web::get().to(get_current))
            .route("/archive", web::get().to(get_archive)),
    );
}
