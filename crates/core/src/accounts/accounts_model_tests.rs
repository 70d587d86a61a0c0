//! Tests for account domain models.

#[cfg(test)]
mod tests {
    use crate::accounts::{normalize_email, NewAccount};
    use crate::errors::{Error, ValidationError};

    fn new_account(name: &str, email: &str) -> NewAccount {
        NewAccount {
            name: name.to_string(),
            email: email.to_string(),
            is_demo: false,
        }
    }

    #[test]
    fn test_normalize_email_trims_and_lowercases() {
        assert_eq!(normalize_email("  Alice@Example.COM "), "alice@example.com");
    }

    #[test]
    fn test_validate_accepts_plain_account() {
        assert!(new_account("Alice", "alice@example.com").validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_blank_name() {
        let err = new_account("   ", "alice@example.com").validate().unwrap_err();
        assert!(matches!(
            err,
            Error::Validation(ValidationError::MissingField(ref f)) if f == "name"
        ));
    }

    #[test]
    fn test_validate_rejects_malformed_email() {
        for email in ["alice", "@example.com", "alice@", "a@b@c", "al ice@example.com"] {
            let err = new_account("Alice", email).validate().unwrap_err();
            assert!(
                matches!(err, Error::Validation(ValidationError::InvalidField { .. })),
                "expected {email} to be rejected"
            );
        }
    }

    #[test]
    fn test_normalized_canonicalizes_fields() {
        let account = new_account("  Alice ", "ALICE@Example.com").normalized();
        assert_eq!(account.name, "Alice");
        assert_eq!(account.email, "alice@example.com");
    }

    #[test]
    fn test_new_account_rejects_unknown_fields() {
        let json = r#"{"name":"A","email":"a@b.c","password":"x"}"#;
        assert!(serde_json::from_str::<NewAccount>(json).is_err());
    }

    #[test]
    fn test_new_account_defaults() {
        let json = r#"{"name":"A","email":"a@b.c"}"#;
        let parsed: NewAccount = serde_json::from_str(json).unwrap();
        assert!(!parsed.is_demo);
    }

    #[test]
    fn test_new_account_rejects_opening_balance() {
        let json = r#"{"name":"A","email":"a@b.c","balance":1000000}"#;
        assert!(serde_json::from_str::<NewAccount>(json).is_err());
    }
}
