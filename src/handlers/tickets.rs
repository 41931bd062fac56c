use actix_web::{HttpRequest, HttpResponse, ResponseError, Result, web};
use serde_json::json;

use crate::models::*;
use crate::services::TicketService;

#[utoipa::path(
    post,
    path = "/tickets",
    tag = "tickets",
    request_body = SubmitTicketRequest,
    responses(
        (status = 200, description = "提交成功，返回新工单与祝福语", body = SubmitTicketResponse),
        (status = 400, description = "校验失败（姓名/手机号/收据）")
    )
)]
/// 提交一张参与票：
/// 1. 校验姓名、手机号、收据
/// 2. 调用外部收据核验（仅参考，不门禁）
/// 3. 入库后生成祝福语
pub async fn submit_ticket(
    service: web::Data<TicketService>,
    request: web::Json<SubmitTicketRequest>,
    req: HttpRequest,
) -> Result<HttpResponse> {
    let user_agent = req
        .headers()
        .get(actix_web::http::header::USER_AGENT)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();

    match service.submit(request.into_inner(), user_agent).await {
        Ok(response) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": response,
            "message": "Ticket Secured! Awaiting Verification."
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/referrals/{code}",
    tag = "tickets",
    params(
        ("code" = String, Path, description = "推荐码")
    ),
    responses(
        (status = 200, description = "推荐进度", body = ReferralStatusResponse)
    )
)]
/// 查询某推荐码的进度（已审核通过的被推荐票数 / 阈值）
pub async fn referral_status(
    service: web::Data<TicketService>,
    path: web::Path<String>,
) -> Result<HttpResponse> {
    let code = path.into_inner();
    match service.referral_status(&code) {
        Ok(status) => Ok(HttpResponse::Ok().json(json!({ "success": true, "data": status }))),
        Err(e) => Ok(e.error_response()),
    }
}

/// 路由配置
pub fn ticket_config(cfg: &mut web::ServiceConfig) {
    cfg.service(web::scope("/tickets").route("", web::post().to(submit_ticket)))
        .service(web::scope("/referrals").route("/{code}", web::get().to(referral_status)));
}
