use actix_web::{HttpResponse, ResponseError, Result, web};
use serde_json::json;

use crate::models::PublicConfigResponse;
use crate::services::AppConfigService;

#[utoipa::path(
    get,
    path = "/config",
    tag = "config",
    responses(
        (status = 200, description = "参与者可见的运营配置（不含管理员凭据）", body = PublicConfigResponse)
    )
)]
/// 支付通道、票价、推荐阈值与奖品展示图
pub async fn get_public_config(service: web::Data<AppConfigService>) -> Result<HttpResponse> {
    match service.public() {
        Ok(config) => Ok(HttpResponse::Ok().json(json!({ "success": true, "data": config }))),
        Err(e) => Ok(e.error_response()),
    }
}

/// 路由配置
pub fn config_config(cfg: &mut web::ServiceConfig) {
    cfg.service(web::scope("/config").route("", web::get().to(get_public_config)));
}
