//! # Role Model
//!
//! 플랫폼의 사용자 역할을 닫힌 열거형으로 정의하는 모듈입니다.
//! 문자열 기반 역할 비교 대신 컴파일 타임에 모든 분기가 검증되는
//! 열거형을 사용하며, 새 역할 추가 시 모든 match 지점에서 컴파일
//! 에러가 발생하도록 와일드카드 분기를 두지 않습니다.

use serde::{Deserialize, Serialize};

/// 사용자 역할
///
/// 코칭 플랫폼의 세 가지 역할입니다. JWT 클레임과 API 응답에서는
/// 소문자 문자열(`"trainer"`, `"client"`, `"admin"`)로 직렬화됩니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// 트레이너 - 프로그램 작성 및 담당 회원 관리
    Trainer,
    /// 클라이언트 - 본인 데이터 접근
    Client,
    /// 관리자 - 전체 접근 권한
    Admin,
}

impl Role {
    /// 역할을 문자열로 변환합니다.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Trainer => "trainer",
            Role::Client => "client",
            Role::Admin => "admin",
        }
    }

    /// 문자열에서 역할을 생성합니다 (대소문자 무관).
    ///
    /// # 반환값
    ///
    /// * `Ok(Role)` - 유효한 역할인 경우
    /// * `Err(String)` - 알 수 없는 역할인 경우
    pub fn from_str(s: &str) -> Result<Self, String> {
        match s.to_lowercase().as_str() {
            "trainer" => Ok(Role::Trainer),
            "client" => Ok(Role::Client),
            "admin" => Ok(Role::Admin),
            _ => Err(format!("Unknown role: {}", s)),
        }
    }

    /// 요구 역할을 만족하는지 검사합니다.
    ///
    /// 관리자는 모든 요구 역할을 만족합니다. 그 외에는 정확히
    /// 일치하는 역할만 허용됩니다.
    pub fn satisfies(&self, required: Role) -> bool {
        match self {
            Role::Admin => true,
            Role::Trainer => required == Role::Trainer,
            Role::Client => required == Role::Client,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_from_string() {
        assert_eq!(Role::from_str("trainer").unwrap(), Role::Trainer);
        assert_eq!(Role::from_str("client").unwrap(), Role::Client);
        assert_eq!(Role::from_str("admin").unwrap(), Role::Admin);

        // 대소문자 무관 테스트
        assert_eq!(Role::from_str("ADMIN").unwrap(), Role::Admin);
        assert_eq!(Role::from_str("Trainer").unwrap(), Role::Trainer);

        // 알 수 없는 역할 테스트
        assert!(Role::from_str("superuser").is_err());
        assert!(Role::from_str("").is_err());
    }

    #[test]
    fn test_role_roundtrip() {
        for role in [Role::Trainer, Role::Client, Role::Admin] {
            assert_eq!(Role::from_str(role.as_str()).unwrap(), role);
        }
    }

    #[test]
    fn test_role_serialization_is_lowercase() {
        let json = serde_json::to_string(&Role::Trainer).unwrap();
        assert_eq!(json, "\"trainer\"");

        let deserialized: Role = serde_json::from_str("\"admin\"").unwrap();
        assert_eq!(deserialized, Role::Admin);
    }

    #[test]
    fn test_admin_satisfies_everything() {
        assert!(Role::Admin.satisfies(Role::Trainer));
        assert!(Role::Admin.satisfies(Role::Client));
        assert!(Role::Admin.satisfies(Role::Admin));
    }

    #[test]
    fn test_non_admin_roles_only_satisfy_themselves() {
        assert!(Role::Trainer.satisfies(Role::Trainer));
        assert!(!Role::Trainer.satisfies(Role::Client));
        assert!(!Role::Trainer.satisfies(Role::Admin));

        assert!(Role::Client.satisfies(Role::Client));
        assert!(!Role::Client.satisfies(Role::Trainer));
        assert!(!Role::Client.satisfies(Role::Admin));
    }
}
