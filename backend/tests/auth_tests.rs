//! Role policy and validation tests
//!
//! Verifies the capability matrix behind the role-gated API and the shared
//! input validators.

use shared::{validate_email, validate_password, validate_phone, Action, Resource, Role};

// ============================================================================
// Role Policy Tests
// ============================================================================

mod role_policy {
    use super::*;

    const ALL_RESOURCES: [Resource; 10] = [
        Resource::Product,
        Resource::Category,
        Resource::Supplier,
        Resource::Customer,
        Resource::Movement,
        Resource::Alert,
        Resource::Quotation,
        Resource::Report,
        Resource::User,
        Resource::Dashboard,
    ];

    const ALL_ACTIONS: [Action; 6] = [
        Action::View,
        Action::Create,
        Action::Edit,
        Action::Delete,
        Action::Dismiss,
        Action::Export,
    ];

    #[test]
    fn administrator_may_do_everything() {
        for resource in ALL_RESOURCES {
            for action in ALL_ACTIONS {
                assert!(
                    Role::Administrator.permits(resource, action),
                    "Administrator denied {:?} on {:?}",
                    action,
                    resource
                );
            }
        }
    }

    #[test]
    fn user_may_view_everything_except_user_administration() {
        for resource in ALL_RESOURCES {
            let expected = resource != Resource::User;
            assert_eq!(Role::User.permits(resource, Action::View), expected);
        }
    }

    #[test]
    fn user_may_record_movements() {
        assert!(Role::User.permits(Resource::Movement, Action::Create));
    }

    #[test]
    fn user_may_create_and_export_quotations() {
        assert!(Role::User.permits(Resource::Quotation, Action::Create));
        assert!(Role::User.permits(Resource::Quotation, Action::Export));
    }

    #[test]
    fn user_may_generate_reports() {
        assert!(Role::User.permits(Resource::Report, Action::Create));
        assert!(Role::User.permits(Resource::Report, Action::Export));
    }

    #[test]
    fn user_may_dismiss_alerts() {
        assert!(Role::User.permits(Resource::Alert, Action::Dismiss));
    }

    #[test]
    fn catalog_mutation_is_administrative() {
        for resource in [
            Resource::Product,
            Resource::Category,
            Resource::Supplier,
            Resource::Customer,
            Resource::User,
        ] {
            for action in [Action::Create, Action::Edit, Action::Delete] {
                assert!(
                    !Role::User.permits(resource, action),
                    "User allowed {:?} on {:?}",
                    action,
                    resource
                );
            }
        }
    }

    #[test]
    fn role_parse_round_trips() {
        assert_eq!(Role::parse("Administrator"), Some(Role::Administrator));
        assert_eq!(Role::parse("User"), Some(Role::User));
        assert_eq!(Role::parse(Role::Administrator.as_str()), Some(Role::Administrator));
        assert_eq!(Role::parse("administrator"), None);
        assert_eq!(Role::parse("Manager"), None);
    }
}

// ============================================================================
// Validation Tests
// ============================================================================

mod validation {
    use super::*;

    #[test]
    fn accepts_plausible_emails() {
        assert!(validate_email("ana@example.com").is_ok());
        assert!(validate_email("a.b@c.co").is_ok());
    }

    #[test]
    fn rejects_malformed_emails() {
        assert!(validate_email("not-an-email").is_err());
        assert!(validate_email("a@b").is_err());
        assert!(validate_email("").is_err());
    }

    #[test]
    fn phone_must_be_exactly_ten_digits() {
        assert!(validate_phone("0991234567").is_ok());
        assert!(validate_phone("099123456").is_err()); // 9 digits
        assert!(validate_phone("09912345678").is_err()); // 11 digits
        assert!(validate_phone("099-123-45").is_err()); // non-digits
    }

    #[test]
    fn password_requires_eight_characters() {
        assert!(validate_password("12345678").is_ok());
        assert!(validate_password("1234567").is_err());
    }
}
