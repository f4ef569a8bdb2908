use super::*;

#[test]
fn test_app_error_status_codes() {
    assert_eq!(AppError::Unauthorized("test".into()).status_code(), 401);
    assert_eq!(AppError::NotFound("test".into()).status_code(), 404);
    assert_eq!(AppError::Validation("test".into()).status_code(), 400);
    assert_eq!(AppError::Conflict("test".into()).status_code(), 409);
    assert_eq!(AppError::Database("test".into()).status_code(), 500);
    assert_eq!(AppError::ExternalService("test".into()).status_code(), 500);
    assert_eq!(AppError::Internal("test".into()).status_code(), 500);
}

#[test]
fn test_app_error_error_codes() {
    assert_eq!(
        AppError::Unauthorized("test".into()).error_code(),
        "unauthorized"
    );
    assert_eq!(AppError::NotFound("test".into()).error_code(), "not_found");
    assert_eq!(
        AppError::Validation("test".into()).error_code(),
        "validation_error"
    );
    assert_eq!(AppError::Conflict("test".into()).error_code(), "conflict");
    assert_eq!(
        AppError::Database("test".into()).error_code(),
        "database_error"
    );
    assert_eq!(
        AppError::ExternalService("test".into()).error_code(),
        "external_service_error"
    );
    assert_eq!(
        AppError::Internal("test".into()).error_code(),
        "internal_error"
    );
}

#[test]
fn test_only_infrastructure_errors_are_server_errors() {
    assert!(!AppError::NotFound("x".into()).is_server_error());
    assert!(!AppError::Validation("x".into()).is_server_error());
    assert!(!AppError::Conflict("x".into()).is_server_error());
    assert!(AppError::Database("x".into()).is_server_error());
    assert!(AppError::ExternalService("x".into()).is_server_error());
    assert!(AppError::Internal("x".into()).is_server_error());
}
