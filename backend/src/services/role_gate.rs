//! Authorization predicate restricting admin section visibility by role.
//!
//! The gate answers one question: may this role see this section? A denial
//! is never an error surface; the reconciler silently rewrites the path to
//! the role's fallback section instead.

use crate::session::models::{AdminRole, AdminSection};

/// Whether `role` may see `section`.
///
/// A `None` role means the role is not yet resolved; the gate fails open
/// for that brief window only, so a known-but-unprivileged role is never
/// confused with an unknown one.
#[must_use]
pub fn is_section_allowed(section: AdminSection, role: Option<AdminRole>) -> bool {
    let Some(role) = role else {
        return true;
    };
    match section {
        AdminSection::Registrations => true,
        AdminSection::Services
        | AdminSection::Templates
        | AdminSection::Declarations
        | AdminSection::Users => {
            matches!(role, AdminRole::SuperAdmin | AdminRole::DateOfficer)
        }
    }
}

/// The section a role lands on when its requested section is denied.
///
/// Every current role falls back to registrations; the per-role hook stays
/// so finer defaults can land without touching call sites.
#[must_use]
pub fn fallback_section(role: Option<AdminRole>) -> AdminSection {
    match role {
        Some(
            AdminRole::Coordinator
            | AdminRole::SuperAdmin
            | AdminRole::DateOfficer
            | AdminRole::UabaOfficer,
        )
        | None => AdminSection::Registrations,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registrations_is_open_to_every_role() {
        for role in [
            AdminRole::Coordinator,
            AdminRole::SuperAdmin,
            AdminRole::DateOfficer,
            AdminRole::UabaOfficer,
        ] {
            assert!(is_section_allowed(AdminSection::Registrations, Some(role)));
        }
    }

    #[test]
    fn management_sections_require_privileged_roles() {
        for section in [
            AdminSection::Services,
            AdminSection::Templates,
            AdminSection::Declarations,
            AdminSection::Users,
        ] {
            assert!(is_section_allowed(section, Some(AdminRole::SuperAdmin)));
            assert!(is_section_allowed(section, Some(AdminRole::DateOfficer)));
            assert!(!is_section_allowed(section, Some(AdminRole::Coordinator)));
            assert!(!is_section_allowed(section, Some(AdminRole::UabaOfficer)));
        }
    }

    #[test]
    fn unresolved_role_fails_open() {
        assert!(is_section_allowed(AdminSection::Users, None));
        assert!(is_section_allowed(AdminSection::Templates, None));
    }

    #[test]
    fn every_role_falls_back_to_registrations() {
        for role in [
            AdminRole::Coordinator,
            AdminRole::SuperAdmin,
            AdminRole::DateOfficer,
            AdminRole::UabaOfficer,
        ] {
            assert_eq!(fallback_section(Some(role)), AdminSection::Registrations);
        }
        assert_eq!(fallback_section(None), AdminSection::Registrations);
    }
}
