use actix_web::{HttpResponse, ResponseError, Result, web};
use serde_json::json;

use crate::models::Winner;
use crate::services::WinnerService;

#[utoipa::path(
    get,
    path = "/winners",
    tag = "winners",
    responses(
        (status = 200, description = "中奖名单（按声明顺序）", body = [Winner])
    )
)]
/// 中奖墙数据
pub async fn get_winners(service: web::Data<WinnerService>) -> Result<HttpResponse> {
    match service.list() {
        Ok(winners) => Ok(HttpResponse::Ok().json(json!({ "success": true, "data": winners }))),
        Err(e) => Ok(e.error_response()),
    }
}

/// 路由配置
pub fn winner_config(cfg: &mut web::ServiceConfig) {
    cfg.service(web::scope("/winners").route("", web::get().to(get_winners)));
}
