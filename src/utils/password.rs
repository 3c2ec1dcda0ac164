use crate::config::{AppConfig, Argon2Config};
use crate::errors::ErpError;
use argon2::password_hash::{SaltString, rand_core::OsRng};
use argon2::{Algorithm, Argon2, Params, PasswordHash, PasswordHasher, PasswordVerifier, Version};

fn hasher(config: &Argon2Config) -> Result<Argon2<'static>, ErpError> {
    let params = Params::new(
        config.memory_cost,
        config.time_cost,
        config.parallelism,
        None,
    )
    .map_err(|e| ErpError::validation(format!("Invalid Argon2 parameters: {e}")))?;
    Ok(Argon2::new(Algorithm::Argon2id, Version::V0x13, params))
}

/// 按配置的 Argon2id 参数哈希密码
pub fn hash_password(password: &str) -> Result<String, ErpError> {
    hash_password_with(&AppConfig::get().argon2, password)
}

pub fn hash_password_with(config: &Argon2Config, password: &str) -> Result<String, ErpError> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = hasher(config)?
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| ErpError::validation(format!("Password hashing failed: {e}")))?;
    Ok(hash.to_string())
}

/// 校验密码，参数取自哈希串本身，配置调整后旧哈希仍可验证
pub fn verify_password(password: &str, hash: &str) -> bool {
    PasswordHash::new(hash).is_ok_and(|parsed| {
        Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cheap() -> Argon2Config {
        Argon2Config {
            memory_cost: 1024,
            time_cost: 1,
            parallelism: 1,
        }
    }

    #[test]
    fn test_hash_and_verify() {
        let hash = hash_password_with(&cheap(), "Clerk@2025").unwrap();
        assert!(hash.starts_with("$argon2id$"));
        assert!(verify_password("Clerk@2025", &hash));
        assert!(!verify_password("clerk@2025", &hash));
    }

    #[test]
    fn test_salts_differ() {
        let a = hash_password_with(&cheap(), "same").unwrap();
        let b = hash_password_with(&cheap(), "same").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_bad_input_is_rejected() {
        assert!(!verify_password("anything", "not-a-phc-string"));
        let invalid = Argon2Config {
            memory_cost: 1,
            ..cheap()
        };
        assert!(hash_password_with(&invalid, "pw").is_err());
    }
}
