//! 短信网关
//!
//! 实际投递交给外部网关，内置的 `log` 网关只记录日志并全部视为成功。

use async_trait::async_trait;
use std::sync::Arc;
use tracing::{info, warn};

use crate::errors::Result;

#[async_trait]
pub trait SmsGateway: Send + Sync {
    /// 发送单条短信，返回错误表示该号码投递失败
    async fn send(&self, sender_id: &str, phone: &str, message: &str) -> Result<()>;

    fn name(&self) -> &'static str;
}

pub struct LogSmsGateway;

#[async_trait]
impl SmsGateway for LogSmsGateway {
    async fn send(&self, sender_id: &str, phone: &str, message: &str) -> Result<()> {
        info!(
            "SMS [{}] -> {}: {} chars",
            sender_id,
            phone,
            message.chars().count()
        );
        Ok(())
    }

    fn name(&self) -> &'static str {
        "log"
    }
}

/// 按配置选择网关，未知类型回退到日志网关
pub fn gateway_for(kind: &str) -> Arc<dyn SmsGateway> {
    match kind {
        "log" => Arc::new(LogSmsGateway),
        other => {
            warn!("Unknown SMS gateway '{}', falling back to log gateway", other);
            Arc::new(LogSmsGateway)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gateway_selection() {
        assert_eq!(gateway_for("log").name(), "log");
        assert_eq!(gateway_for("twilio").name(), "log");
    }

    #[tokio::test]
    async fn test_log_gateway_accepts_everything() {
        let gateway = LogSmsGateway;
        assert!(gateway.send("SCHOOL", "9845012345", "hello").await.is_ok());
    }
}
