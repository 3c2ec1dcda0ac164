use serde::Deserialize;
use ts_rs::TS;

#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/auth.ts")]
pub struct LoginRequest {
    /// 用户名或邮箱
    pub username: String,
    pub password: String,
    /// 延长刷新令牌有效期
    #[serde(default)]
    pub remember_me: bool,
}

impl LoginRequest {
    /// 用于查找账号的标识，邮箱不区分大小写
    pub fn identifier(&self) -> String {
        let trimmed = self.username.trim();
        if trimmed.contains('@') {
            trimmed.to_lowercase()
        } else {
            trimmed.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn login(username: &str) -> LoginRequest {
        LoginRequest {
            username: username.to_string(),
            password: "secret".to_string(),
            remember_me: false,
        }
    }

    #[test]
    fn test_identifier_normalization() {
        assert_eq!(login("  clerk_01 ").identifier(), "clerk_01");
        assert_eq!(login("Clerk_01").identifier(), "Clerk_01");
        assert_eq!(login(" Office@School.TEST ").identifier(), "office@school.test");
    }

    #[test]
    fn test_remember_me_defaults_off() {
        let req: LoginRequest =
            serde_json::from_str(r#"{"username":"admin","password":"pw"}"#).unwrap();
        assert!(!req.remember_me);
    }
}
