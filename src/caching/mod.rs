//! # Caching Module
//!
//! 토큰 무효화 캐시와 그 Redis 백엔드를 제공하는 모듈입니다.
//!
//! - [`redis`] - 멀티플렉싱 연결 기반 Redis 클라이언트 래퍼
//! - [`revocation`] - 로그아웃된 액세스 토큰의 jti 블랙리스트

pub mod redis;
pub mod revocation;

pub use redis::RedisClient;
pub use revocation::{
    InMemoryRevocationStore, RedisRevocationStore, RevocationCache, RevocationStore,
};
