use actix_web::{HttpMessage, HttpRequest, HttpResponse, ResponseError, Result, web};
use serde_json::json;

use crate::middlewares::AdminIdentity;
use crate::models::*;
use crate::services::{AnnouncementService, AppConfigService, TicketService, WinnerService};

/// 从请求扩展中获取管理员标识（中间件在鉴权后注入）
fn get_admin_identity(req: &HttpRequest) -> String {
    req.extensions()
        .get::<AdminIdentity>()
        .map(|identity| identity.0.clone())
        .unwrap_or_else(|| "admin".to_string())
}

#[utoipa::path(
    get,
    path = "/admin/tickets/pending",
    tag = "admin",
    responses(
        (status = 200, description = "待审核队列（存储顺序）", body = [Ticket]),
        (status = 401, description = "凭据缺失或错误")
    )
)]
pub async fn pending_tickets(service: web::Data<TicketService>) -> Result<HttpResponse> {
    match service.pending() {
        Ok(tickets) => Ok(HttpResponse::Ok().json(json!({ "success": true, "data": tickets }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/admin/tickets/history",
    tag = "admin",
    params(
        ("search" = Option<String>, Query, description = "姓名/票号/审核人/手机号子串，大小写不敏感"),
        ("status" = Option<String>, Query, description = "approved 或 rejected"),
        ("processed_by" = Option<String>, Query, description = "精确匹配审核人")
    ),
    responses(
        (status = 200, description = "审核历史，按处理时间倒序，过滤条件取 AND", body = [Ticket]),
        (status = 401, description = "凭据缺失或错误")
    )
)]
pub async fn ticket_history(
    service: web::Data<TicketService>,
    query: web::Query<HistoryQuery>,
) -> Result<HttpResponse> {
    match service.history(&query.into_inner()) {
        Ok(tickets) => Ok(HttpResponse::Ok().json(json!({ "success": true, "data": tickets }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/admin/tickets/{id}/approve",
    tag = "admin",
    params(
        ("id" = String, Path, description = "工单 id")
    ),
    responses(
        (status = 200, description = "审批通过", body = Ticket),
        (status = 404, description = "工单不存在"),
        (status = 401, description = "凭据缺失或错误")
    )
)]
/// 审批通过。审核人记录为配置的管理员展示名（缺省回落到登录邮箱）。
pub async fn approve_ticket(
    service: web::Data<TicketService>,
    path: web::Path<String>,
    req: HttpRequest,
) -> Result<HttpResponse> {
    let actor = get_admin_identity(&req);
    match service.set_status(&path.into_inner(), TicketStatus::Approved, &actor) {
        Ok(ticket) => Ok(HttpResponse::Ok().json(json!({ "success": true, "data": ticket }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/admin/tickets/{id}/reject",
    tag = "admin",
    params(
        ("id" = String, Path, description = "工单 id")
    ),
    responses(
        (status = 200, description = "已驳回", body = Ticket),
        (status = 404, description = "工单不存在"),
        (status = 401, description = "凭据缺失或错误")
    )
)]
pub async fn reject_ticket(
    service: web::Data<TicketService>,
    path: web::Path<String>,
    req: HttpRequest,
) -> Result<HttpResponse> {
    let actor = get_admin_identity(&req);
    match service.set_status(&path.into_inner(), TicketStatus::Rejected, &actor) {
        Ok(ticket) => Ok(HttpResponse::Ok().json(json!({ "success": true, "data": ticket }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/admin/tickets/{id}/declare-winner",
    tag = "admin",
    params(
        ("id" = String, Path, description = "工单 id（必须已审批通过）")
    ),
    responses(
        (status = 200, description = "声明成功，已同步广播突发新闻", body = Winner),
        (status = 400, description = "工单未通过审核或已中奖"),
        (status = 404, description = "工单不存在"),
        (status = 401, description = "凭据缺失或错误")
    )
)]
/// 声明中奖：标记工单、追加中奖记录、广播突发新闻（单一事务边界）
pub async fn declare_winner(
    service: web::Data<WinnerService>,
    path: web::Path<String>,
) -> Result<HttpResponse> {
    match service.declare(&path.into_inner()) {
        Ok(winner) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": winner,
            "message": "WINNER DECLARED! HALL OF FAME UPDATED."
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/admin/announcements",
    tag = "admin",
    request_body = BroadcastRequest,
    responses(
        (status = 200, description = "广播成功", body = Announcement),
        (status = 401, description = "凭据缺失或错误")
    )
)]
/// 广播横幅并写入新闻档案（超过 50 条丢弃最旧的）
pub async fn broadcast(
    service: web::Data<AnnouncementService>,
    request: web::Json<BroadcastRequest>,
) -> Result<HttpResponse> {
    let request = request.into_inner();
    match service.broadcast(&request.text, request.is_breaking.unwrap_or(false)) {
        Ok(announcement) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": announcement,
            "message": "TRANSMISSION SUCCESSFUL"
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/admin/config",
    tag = "admin",
    responses(
        (status = 200, description = "完整运营配置（含管理员凭据）", body = AppConfig),
        (status = 401, description = "凭据缺失或错误")
    )
)]
pub async fn get_config(service: web::Data<AppConfigService>) -> Result<HttpResponse> {
    match service.get() {
        Ok(config) => Ok(HttpResponse::Ok().json(json!({ "success": true, "data": config }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    put,
    path = "/admin/config",
    tag = "admin",
    request_body = AppConfig,
    responses(
        (status = 200, description = "保存成功（整条覆盖）", body = AppConfig),
        (status = 401, description = "凭据缺失或错误")
    )
)]
pub async fn set_config(
    service: web::Data<AppConfigService>,
    request: web::Json<AppConfig>,
) -> Result<HttpResponse> {
    match service.set(request.into_inner()) {
        Ok(config) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": config,
            "message": "SYSTEM PARAMETERS SYNCHRONIZED"
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

/// 路由配置
pub fn admin_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/admin")
            .route("/tickets/pending", web::get().to(pending_tickets))
            .route("/tickets/history", web::get().to(ticket_history))
            .route("/tickets/{id}/approve", web::post().to(approve_ticket))
            .route("/tickets/{id}/reject", web::post().to(reject_ticket))
            .route("/tickets/{id}/declare-winner", web::post().to(declare_winner))
            .route("/announcements", web::post().to(broadcast))
            .route("/config", web::get().to(get_config))
            .route("/config", web::put().to(set_config)),
    );
}
