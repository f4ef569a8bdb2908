use super::*;
use std::str::FromStr;
use uuid::Uuid;

#[test]
fn test_typed_id_creation() {
    let id = AccountId::new();
    assert!(!id.to_string().is_empty());
}

#[test]
fn test_typed_id_from_uuid() {
    let uuid = Uuid::new_v4();
    let id = ExpenseId::from_uuid(uuid);
    assert_eq!(id.into_inner(), uuid);
    assert_eq!(ExpenseId::from(uuid), id);
}

#[test]
fn test_typed_id_new_is_unique() {
    assert_ne!(CategoryId::new(), CategoryId::new());
}

#[test]
fn test_typed_id_display() {
    let uuid = Uuid::new_v4();
    let id = RevenueId::from_uuid(uuid);
    assert_eq!(format!("{id}"), uuid.to_string());
}

#[test]
fn test_typed_id_from_str() {
    let uuid = Uuid::new_v4();
    let id = AbstractId::from_str(&uuid.to_string()).unwrap();
    assert_eq!(id.into_inner(), uuid);
}

#[test]
fn test_typed_id_from_str_error() {
    assert!(PaymentOptionId::from_str("invalid").is_err());
}

#[test]
fn test_typed_id_serializes_as_plain_uuid() {
    let uuid = Uuid::new_v4();
    let json = serde_json::to_string(&AccountId::from_uuid(uuid)).unwrap();
    assert_eq!(json, format!("\"{uuid}\""));
}
