//! JWT 令牌服务
//!
//! 处理访问/刷新令牌对的生成、验证和解析。
//! 客户端通过自定义 `token` 请求头携带访问令牌。

use chrono::{Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use ring::rand::{SecureRandom, SystemRandom};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// 携带签名令牌的请求头
pub const AUTH_HEADER: &str = "token";

/// JWT 配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JwtConfig {
    /// JWT 密钥 (应至少 32 字节)
    pub secret: String,
    /// 访问令牌过期时间 (小时)
    pub access_ttl_hours: i64,
    /// 刷新令牌过期时间 (小时)
    pub refresh_ttl_hours: i64,
}

impl Default for JwtConfig {
    fn default() -> Self {
        let secret = match load_jwt_secret() {
            Ok(secret) => secret,
            Err(e) => {
                #[cfg(debug_assertions)]
                {
                    tracing::warn!("JWT configuration error: {}, using emergency key", e);
                    "emergency-fallback-key-must-be-replaced-in-production".to_string()
                }
                #[cfg(not(debug_assertions))]
                {
                    panic!("FATAL: JWT_SECRET configuration failed: {}", e);
                }
            }
        };

        Self {
            secret,
            access_ttl_hours: std::env::var("JWT_ACCESS_TTL_HOURS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(24),
            refresh_ttl_hours: std::env::var("JWT_REFRESH_TTL_HOURS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(72),
        }
    }
}

/// 存储在令牌中的 JWT Claims
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// 用户 ID (Subject)
    pub sub: String,
    /// 邮箱
    pub email: String,
    /// 名
    pub first_name: String,
    /// 姓
    pub last_name: String,
    /// 角色
    pub role: String,
    /// 令牌类型: access | refresh
    pub token_type: String,
    /// 过期时间戳
    pub exp: i64,
    /// 签发时间戳
    pub iat: i64,
}

/// 签发的令牌对
#[derive(Debug, Clone, Serialize)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

/// JWT 错误
#[derive(Error, Debug)]
pub enum JwtError {
    #[error("无效令牌: {0}")]
    InvalidToken(String),

    #[error("令牌已过期")]
    ExpiredToken,

    #[error("无效签名")]
    InvalidSignature,

    #[error("令牌生成失败: {0}")]
    GenerationFailed(String),

    #[error("配置错误: {0}")]
    ConfigError(String),
}

/// 生成可打印的安全 JWT 密钥 (用于开发环境)
pub fn generate_secure_printable_jwt_secret() -> String {
    let allowed_chars =
        "ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789!@#$%^&*()-_=+";

    let rng = SystemRandom::new();
    let mut key = String::new();

    for _ in 0..64 {
        let mut byte = [0u8; 1];
        if rng.fill(&mut byte).is_err() {
            // 随机数生成失败时退回固定的开发密钥
            return "DineServerDevelopmentSecureKey2026!".to_string();
        }
        let idx = (byte[0] as usize) % allowed_chars.len();
        key.push(allowed_chars.chars().nth(idx).unwrap());
    }

    key
}

/// 从环境变量安全地加载 JWT 密钥
fn load_jwt_secret() -> Result<String, JwtError> {
    match std::env::var("JWT_SECRET") {
        Ok(secret) => {
            if secret.len() < 32 {
                return Err(JwtError::ConfigError(
                    "JWT_SECRET must be at least 32 characters long".to_string(),
                ));
            }
            Ok(secret)
        }
        Err(_) => {
            #[cfg(debug_assertions)]
            {
                tracing::warn!(
                    "JWT_SECRET not set! Generating secure temporary key for development."
                );
                Ok(generate_secure_printable_jwt_secret())
            }
            #[cfg(not(debug_assertions))]
            {
                Err(JwtError::ConfigError(
                    "JWT_SECRET environment variable must be set in production!".to_string(),
                ))
            }
        }
    }
}

/// JWT 令牌服务
#[derive(Debug, Clone)]
pub struct JwtService {
    pub config: JwtConfig,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl JwtService {
    /// 使用默认配置创建新的 JWT 服务
    pub fn new() -> Self {
        Self::with_config(JwtConfig::default())
    }

    /// 使用指定配置创建新的 JWT 服务
    pub fn with_config(config: JwtConfig) -> Self {
        let encoding_key = EncodingKey::from_secret(config.secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.secret.as_bytes());

        Self {
            config,
            encoding_key,
            decoding_key,
        }
    }

    /// 为用户签发访问/刷新令牌对
    ///
    /// 两个令牌携带同样的身份 Claims，只有 `token_type` 和过期时间不同。
    pub fn generate_token_pair(
        &self,
        user_id: &str,
        email: &str,
        first_name: &str,
        last_name: &str,
        role: &str,
    ) -> Result<TokenPair, JwtError> {
        let access_token =
            self.generate_token(user_id, email, first_name, last_name, role, "access")?;
        let refresh_token =
            self.generate_token(user_id, email, first_name, last_name, role, "refresh")?;

        Ok(TokenPair {
            access_token,
            refresh_token,
        })
    }

    fn generate_token(
        &self,
        user_id: &str,
        email: &str,
        first_name: &str,
        last_name: &str,
        role: &str,
        token_type: &str,
    ) -> Result<String, JwtError> {
        let now = Utc::now();
        let ttl_hours = match token_type {
            "refresh" => self.config.refresh_ttl_hours,
            _ => self.config.access_ttl_hours,
        };
        let expiration = now + Duration::hours(ttl_hours);

        let claims = Claims {
            sub: user_id.to_string(),
            email: email.to_string(),
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
            role: role.to_string(),
            token_type: token_type.to_string(),
            exp: expiration.timestamp(),
            iat: now.timestamp(),
        };

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| JwtError::GenerationFailed(e.to_string()))
    }

    /// 验证并解码令牌
    pub fn validate_token(&self, token: &str) -> Result<Claims, JwtError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_required_spec_claims(&["sub", "exp", "iat"]);

        let token_data = decode::<Claims>(token, &self.decoding_key, &validation).map_err(|e| {
            match e.kind() {
                ErrorKind::ExpiredSignature => JwtError::ExpiredToken,
                ErrorKind::InvalidSignature => JwtError::InvalidSignature,
                ErrorKind::InvalidToken => JwtError::InvalidToken(e.to_string()),
                _ => JwtError::InvalidToken(format!("Token validation failed: {}", e)),
            }
        })?;

        Ok(token_data.claims)
    }
}

impl Default for JwtService {
    fn default() -> Self {
        Self::new()
    }
}

/// 当前用户上下文 (从 JWT Claims 解析)
///
/// 由认证中间件创建，注入到请求扩展；handler 通过提取器获取。
#[derive(Debug, Clone)]
pub struct CurrentUser {
    /// 用户 ID
    pub id: String,
    /// 邮箱
    pub email: String,
    /// 名
    pub first_name: String,
    /// 姓
    pub last_name: String,
    /// 角色
    pub role: String,
}

impl From<Claims> for CurrentUser {
    fn from(claims: Claims) -> Self {
        Self {
            id: claims.sub,
            email: claims.email,
            first_name: claims.first_name,
            last_name: claims.last_name,
            role: claims.role,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_service() -> JwtService {
        JwtService::with_config(JwtConfig {
            secret: "unit-test-secret-0123456789abcdefghij".to_string(),
            access_ttl_hours: 24,
            refresh_ttl_hours: 72,
        })
    }

    #[test]
    fn test_pair_generation_and_validation() {
        let service = test_service();

        let pair = service
            .generate_token_pair("user:123", "jane@example.com", "Jane", "Doe", "USER")
            .expect("Failed to generate token pair");

        let access = service
            .validate_token(&pair.access_token)
            .expect("Failed to validate access token");
        assert_eq!(access.sub, "user:123");
        assert_eq!(access.email, "jane@example.com");
        assert_eq!(access.first_name, "Jane");
        assert_eq!(access.last_name, "Doe");
        assert_eq!(access.role, "USER");
        assert_eq!(access.token_type, "access");

        let refresh = service
            .validate_token(&pair.refresh_token)
            .expect("Failed to validate refresh token");
        assert_eq!(refresh.token_type, "refresh");
        // 刷新令牌活得更久
        assert!(refresh.exp > access.exp);
    }

    #[test]
    fn test_expired_token_is_rejected() {
        let service = JwtService::with_config(JwtConfig {
            secret: "unit-test-secret-0123456789abcdefghij".to_string(),
            access_ttl_hours: -2,
            refresh_ttl_hours: 72,
        });

        let pair = service
            .generate_token_pair("user:123", "jane@example.com", "Jane", "Doe", "USER")
            .expect("Failed to generate token pair");

        match service.validate_token(&pair.access_token) {
            Err(JwtError::ExpiredToken) => {}
            other => panic!("expected ExpiredToken, got {:?}", other.map(|c| c.sub)),
        }
    }

    #[test]
    fn test_foreign_signature_is_rejected() {
        let service = test_service();
        let other = JwtService::with_config(JwtConfig {
            secret: "another-secret-entirely-0123456789abcd".to_string(),
            access_ttl_hours: 24,
            refresh_ttl_hours: 72,
        });

        let pair = other
            .generate_token_pair("user:123", "jane@example.com", "Jane", "Doe", "USER")
            .expect("Failed to generate token pair");

        assert!(matches!(
            service.validate_token(&pair.access_token),
            Err(JwtError::InvalidSignature)
        ));
    }

    #[test]
    fn test_garbage_token_is_rejected() {
        let service = test_service();
        assert!(service.validate_token("not-a-jwt").is_err());
    }

    #[test]
    fn test_current_user_from_claims() {
        let service = test_service();
        let pair = service
            .generate_token_pair("user:42", "a@b.com", "A", "B", "ADMIN")
            .unwrap();
        let claims = service.validate_token(&pair.access_token).unwrap();
        let user = CurrentUser::from(claims);
        assert_eq!(user.id, "user:42");
        assert_eq!(user.role, "ADMIN");
    }
}
