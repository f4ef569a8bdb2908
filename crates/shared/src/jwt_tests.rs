//! Unit tests for JWT claims.

#[cfg(test)]
mod tests {
    use crate::auth::{Claims, TokenKind};
    use chrono::{Duration, Utc};
    use uuid::Uuid;

    #[test]
    fn test_claims_new_sets_correct_fields() {
        let account_id = Uuid::new_v4();
        let expires_at = Utc::now() + Duration::hours(1);

        let claims = Claims::new(account_id, "maria", TokenKind::Access, expires_at);

        assert_eq!(claims.sub, account_id);
        assert_eq!(claims.username, "maria");
        assert_eq!(claims.kind, TokenKind::Access);
        assert!(claims.iat <= Utc::now().timestamp());
        assert_eq!(claims.exp, expires_at.timestamp());
    }

    #[test]
    fn test_claims_account_id_returns_sub() {
        let account_id = Uuid::new_v4();
        let expires_at = Utc::now() + Duration::hours(1);

        let claims = Claims::new(account_id, "maria", TokenKind::Refresh, expires_at);

        assert_eq!(claims.account_id(), account_id);
        assert!(!claims.is_access());
    }

    #[test]
    fn test_claims_iat_is_current_time() {
        let before = Utc::now().timestamp();
        let expires_at = Utc::now() + Duration::hours(1);

        let claims = Claims::new(Uuid::new_v4(), "maria", TokenKind::Access, expires_at);

        let after = Utc::now().timestamp();
        assert!(claims.iat >= before);
        assert!(claims.iat <= after);
    }

    #[test]
    fn test_token_kind_serializes_snake_case() {
        let json = serde_json::to_string(&TokenKind::Refresh).unwrap();
        assert_eq!(json, "\"refresh\"");
    }
}
