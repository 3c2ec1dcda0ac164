/*!
 * 速率限制中间件
 *
 * 固定窗口计数，用于登录、刷新令牌和短信群发等端点。
 * 已认证请求按用户计数，匿名请求按客户端 IP 计数；超限返回 429。
 *
 * ```rust,ignore
 * web::resource("/login").route(web::post().to(login).wrap(RateLimit::login()))
 * ```
 */

use actix_service::{Service, Transform};
use actix_web::{
    Error, HttpResponse,
    body::EitherBody,
    dev::{ServiceRequest, ServiceResponse},
    http::StatusCode,
    http::header::CONTENT_TYPE,
};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use moka::future::Cache;
use once_cell::sync::Lazy;
use std::net::IpAddr;
use std::rc::Rc;
use std::time::Duration;
use tracing::warn;

use crate::middlewares::RequireJWT;
use crate::models::{ApiResponse, ErrorCode};

/// 计数窗口
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Window {
    started_at: i64,
    count: u32,
}

// 条目空闲一小时后淘汰，窗口是否过期由 started_at 判断
static RATE_LIMIT_CACHE: Lazy<Cache<String, Window>> = Lazy::new(|| {
    Cache::builder()
        .time_to_idle(Duration::from_secs(3600))
        .max_capacity(100_000)
        .build()
});

#[derive(Clone)]
pub struct RateLimit {
    max_requests: u32,
    window_secs: u64,
    key_prefix: String,
}

impl RateLimit {
    pub fn new(max_requests: u32, window_secs: u64) -> Self {
        Self {
            max_requests,
            window_secs,
            key_prefix: String::new(),
        }
    }

    pub fn with_prefix(mut self, prefix: &str) -> Self {
        self.key_prefix = prefix.to_string();
        self
    }

    /// 登录：5次/分钟
    pub fn login() -> Self {
        Self::new(5, 60).with_prefix("login")
    }

    /// 刷新令牌：10次/分钟
    pub fn refresh_token() -> Self {
        Self::new(10, 60).with_prefix("refresh")
    }

    /// 短信群发：5次/分钟/用户
    pub fn sms_send() -> Self {
        Self::new(5, 60).with_prefix("sms_send")
    }
}

/// 记录一次请求，返回新的窗口以及本次是否放行
fn hit(previous: Option<Window>, now: i64, max_requests: u32, window_secs: u64) -> (Window, bool) {
    let window = match previous {
        Some(w) if now - w.started_at < window_secs as i64 => w,
        _ => Window {
            started_at: now,
            count: 0,
        },
    };
    if window.count >= max_requests {
        return (window, false);
    }
    (
        Window {
            count: window.count + 1,
            ..window
        },
        true,
    )
}

/// 客户端 IP：优先取连接信息，其次取反向代理头中的第一个合法地址
fn client_ip(req: &ServiceRequest) -> String {
    let from_connection = req
        .connection_info()
        .realip_remote_addr()
        .map(str::to_string);
    if let Some(ip) = from_connection.as_deref().filter(|ip| ip.parse::<IpAddr>().is_ok()) {
        return ip.to_string();
    }

    ["X-Forwarded-For", "X-Real-IP"]
        .iter()
        .filter_map(|name| req.headers().get(*name))
        .filter_map(|value| value.to_str().ok())
        .filter_map(|value| value.split(',').next())
        .map(str::trim)
        .find(|ip| ip.parse::<IpAddr>().is_ok())
        .map(str::to_string)
        .or(from_connection)
        .unwrap_or_else(|| "unknown".to_string())
}

fn rate_limited_response(retry_after: u64) -> HttpResponse {
    HttpResponse::build(StatusCode::TOO_MANY_REQUESTS)
        .insert_header((CONTENT_TYPE, "application/json; charset=utf-8"))
        .insert_header(("Retry-After", retry_after.to_string()))
        .json(ApiResponse::<()>::error_empty(
            ErrorCode::RateLimitExceeded,
            "Too many requests, please try again later",
        ))
}

impl<S, B> Transform<S, ServiceRequest> for RateLimit
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = RateLimitMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RateLimitMiddleware {
            service: Rc::new(service),
            limit: self.clone(),
        }))
    }
}

pub struct RateLimitMiddleware<S> {
    service: Rc<S>,
    limit: RateLimit,
}

impl<S, B> Service<ServiceRequest> for RateLimitMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(
        &self,
        ctx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let srv = self.service.clone();
        let limit = self.limit.clone();

        Box::pin(async move {
            let identifier = RequireJWT::extract_user_id(req.request())
                .map(|id| format!("user:{id}"))
                .unwrap_or_else(|| format!("ip:{}", client_ip(&req)));
            let cache_key = format!("{}:{}", limit.key_prefix, identifier);

            let now = chrono::Utc::now().timestamp();
            let previous = RATE_LIMIT_CACHE.get(&cache_key).await;
            let (window, allowed) = hit(previous, now, limit.max_requests, limit.window_secs);
            RATE_LIMIT_CACHE.insert(cache_key.clone(), window).await;

            if !allowed {
                warn!(
                    "Rate limit exceeded for key: {} ({}/{})",
                    cache_key, window.count, limit.max_requests
                );
                let retry_after = (window.started_at + limit.window_secs as i64 - now).max(1) as u64;
                return Ok(
                    req.into_response(rate_limited_response(retry_after).map_into_right_body())
                );
            }

            Ok(srv.call(req).await?.map_into_left_body())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rate_limit_presets() {
        let login = RateLimit::login();
        assert_eq!(login.max_requests, 5);
        assert_eq!(login.window_secs, 60);
        assert_eq!(login.key_prefix, "login");
        assert_eq!(RateLimit::sms_send().key_prefix, "sms_send");
        assert_eq!(RateLimit::refresh_token().max_requests, 10);
    }

    #[test]
    fn test_window_blocks_after_limit() {
        let mut window = None;
        for _ in 0..3 {
            let (next, allowed) = hit(window, 1_000, 3, 60);
            assert!(allowed);
            window = Some(next);
        }
        let (blocked, allowed) = hit(window, 1_030, 3, 60);
        assert!(!allowed);
        assert_eq!(blocked.count, 3);
    }

    #[test]
    fn test_window_resets_after_expiry() {
        let full = Window {
            started_at: 1_000,
            count: 5,
        };
        let (next, allowed) = hit(Some(full), 1_060, 5, 60);
        assert!(allowed);
        assert_eq!(next, Window { started_at: 1_060, count: 1 });
    }
}
