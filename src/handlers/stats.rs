use actix_web::{HttpResponse, Result, web};
use serde_json::json;

use crate::models::StatsSnapshot;
use crate::services::StatsService;

#[utoipa::path(
    get,
    path = "/stats",
    tag = "stats",
    responses(
        (status = 200, description = "当前统计快照", body = StatsSnapshot)
    )
)]
/// 读取轮询刷新任务维护的派生统计快照（不触发重算）
pub async fn get_stats(service: web::Data<StatsService>) -> Result<HttpResponse> {
    let snapshot = service.snapshot();
    Ok(HttpResponse::Ok().json(json!({ "success": true, "data": snapshot })))
}

/// 路由配置
pub fn stats_config(cfg: &mut web::ServiceConfig) {
    cfg.service(web::scope("/stats").route("", web::get().to(get_stats)));
}
