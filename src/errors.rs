//! 统一错误处理模块
//!
//! 使用宏自动生成错误类型，支持错误代码和类型名称。

use std::fmt;

/// 定义错误类型的宏
///
/// 自动生成：
/// - enum 定义
/// - code() 方法 - 返回错误代码
/// - error_type() 方法 - 返回错误类型名称
/// - message() 方法 - 返回错误详情
/// - 便捷构造函数
macro_rules! define_erp_errors {
    ($(
        $variant:ident($code:literal, $type_name:literal)
    ),* $(,)?) => {
        #[derive(Debug, Clone)]
        pub enum ErpError {
            $($variant(String),)*
        }

        impl ErpError {
            /// 获取错误代码
            pub fn code(&self) -> &'static str {
                match self {
                    $(ErpError::$variant(_) => $code,)*
                }
            }

            /// 获取错误类型名称
            pub fn error_type(&self) -> &'static str {
                match self {
                    $(ErpError::$variant(_) => $type_name,)*
                }
            }

            /// 获取错误详情
            pub fn message(&self) -> &str {
                match self {
                    $(ErpError::$variant(msg) => msg,)*
                }
            }
        }

        // 生成便捷构造函数
        paste::paste! {
            impl ErpError {
                $(
                    pub fn [<$variant:snake>]<T: Into<String>>(msg: T) -> Self {
                        ErpError::$variant(msg.into())
                    }
                )*
            }
        }
    };
}

define_erp_errors! {
    CacheConnection("E001", "Cache Connection Error"),
    DatabaseConfig("E003", "Database Configuration Error"),
    DatabaseConnection("E004", "Database Connection Error"),
    DatabaseOperation("E005", "Database Operation Error"),
    FileOperation("E006", "File Operation Error"),
    Validation("E007", "Validation Error"),
    NotFound("E008", "Resource Not Found"),
    Serialization("E009", "Serialization Error"),
    DateParse("E011", "Date Parse Error"),
    Authentication("E012", "Authentication Error"),
    Authorization("E013", "Authorization Error"),
    Conflict("E014", "Resource Conflict"),
    Gateway("E015", "Gateway Error"),
}

impl ErpError {
    /// 格式化为简洁输出
    pub fn format_simple(&self) -> String {
        format!("{}: {}", self.error_type(), self.message())
    }
}

impl fmt::Display for ErpError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for ErpError {}

// 为常见的错误类型实现 From trait
impl From<sea_orm::DbErr> for ErpError {
    fn from(err: sea_orm::DbErr) -> Self {
        ErpError::DatabaseOperation(err.to_string())
    }
}

impl From<std::io::Error> for ErpError {
    fn from(err: std::io::Error) -> Self {
        ErpError::FileOperation(err.to_string())
    }
}

impl From<serde_json::Error> for ErpError {
    fn from(err: serde_json::Error) -> Self {
        ErpError::Serialization(err.to_string())
    }
}

impl From<csv::Error> for ErpError {
    fn from(err: csv::Error) -> Self {
        ErpError::Serialization(err.to_string())
    }
}

impl From<chrono::ParseError> for ErpError {
    fn from(err: chrono::ParseError) -> Self {
        ErpError::DateParse(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, ErpError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(ErpError::cache_connection("test").code(), "E001");
        assert_eq!(ErpError::database_config("test").code(), "E003");
        assert_eq!(ErpError::validation("test").code(), "E007");
        assert_eq!(ErpError::authentication("test").code(), "E012");
        assert_eq!(ErpError::conflict("test").code(), "E014");
    }

    #[test]
    fn test_error_types() {
        assert_eq!(
            ErpError::cache_connection("test").error_type(),
            "Cache Connection Error"
        );
        assert_eq!(
            ErpError::validation("test").error_type(),
            "Validation Error"
        );
    }

    #[test]
    fn test_error_message() {
        let err = ErpError::validation("Invalid input");
        assert_eq!(err.message(), "Invalid input");
    }

    #[test]
    fn test_from_parse_error_is_date_parse() {
        let parse_err = chrono::NaiveDate::parse_from_str("2024-13-40", "%Y-%m-%d").unwrap_err();
        let err: ErpError = parse_err.into();
        assert_eq!(err.code(), "E011");
    }

    #[test]
    fn test_format_simple() {
        let err = ErpError::validation("Invalid URL");
        let formatted = err.format_simple();
        assert!(formatted.contains("Validation Error"));
        assert!(formatted.contains("Invalid URL"));
    }
}
