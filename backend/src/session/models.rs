//! Data structures for session-related entities.
//!
//! This module defines the authenticated identity union, administrator
//! roles, the navigation vocabulary (sections, auth views, portal kinds),
//! and the persisted-key catalog used by the session service.

use serde::{Deserialize, Serialize};

/// Administrator role restricting which management sections are visible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdminRole {
    Coordinator,
    SuperAdmin,
    DateOfficer,
    UabaOfficer,
}

impl AdminRole {
    /// Maps the collaborator's numeric user-type code to a role.
    ///
    /// Unknown codes yield `None`; the caller decides how to degrade.
    #[must_use]
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            1 => Some(Self::SuperAdmin),
            2 => Some(Self::Coordinator),
            3 => Some(Self::DateOfficer),
            4 => Some(Self::UabaOfficer),
            _ => None,
        }
    }
}

/// Authenticated applicant identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicantIdentity {
    pub id: i64,
    pub display_name: String,
    pub email: String,
    #[serde(default)]
    pub token: Option<String>,
}

/// Authenticated administrator identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdministratorIdentity {
    pub role: AdminRole,
    pub user_id: i64,
    pub display_name: String,
    #[serde(default)]
    pub zonal_office_id: Option<i64>,
    #[serde(default)]
    pub zonal_office_name: Option<String>,
    #[serde(default)]
    pub token: Option<String>,
}

/// The authenticated identity: an applicant or an administrator, never both.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SessionIdentity {
    #[default]
    None,
    Applicant(ApplicantIdentity),
    Administrator(AdministratorIdentity),
}

impl SessionIdentity {
    /// True iff the identity is an applicant with a non-zero id or an
    /// administrator with a non-zero user id. Derived, never stored.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        match self {
            Self::None => false,
            Self::Applicant(applicant) => applicant.id != 0,
            Self::Administrator(admin) => admin.user_id != 0,
        }
    }

    /// The administrator role, when the identity is administrative.
    #[must_use]
    pub fn role(&self) -> Option<AdminRole> {
        match self {
            Self::Administrator(admin) => Some(admin.role),
            _ => None,
        }
    }

    /// The bearer token carried by the identity, if any.
    #[must_use]
    pub fn token(&self) -> Option<&str> {
        match self {
            Self::None => None,
            Self::Applicant(applicant) => applicant.token.as_deref(),
            Self::Administrator(admin) => admin.token.as_deref(),
        }
    }
}

/// Which portal a not-yet-authenticated visitor is headed for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PortalKind {
    Applicant,
    Administrator,
}

/// Auth sub-view shown to unauthenticated applicants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthView {
    Login,
    Register,
    Recovery,
}

/// Active section of the applicant panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApplicantSection {
    Cv,
    Positions,
}

impl ApplicantSection {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Cv => "cv",
            Self::Positions => "positions",
        }
    }

    #[must_use]
    pub fn from_slug(slug: &str) -> Option<Self> {
        match slug {
            "cv" => Some(Self::Cv),
            "positions" => Some(Self::Positions),
            _ => None,
        }
    }
}

/// Section of the administrator panel, derived from the path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdminSection {
    Registrations,
    Services,
    Templates,
    Declarations,
    Users,
}

impl AdminSection {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Registrations => "registrations",
            Self::Services => "services",
            Self::Templates => "templates",
            Self::Declarations => "declarations",
            Self::Users => "users",
        }
    }

    /// Parses a path slug, folding the legacy slugs into their current
    /// sections (`applications` was renamed to `registrations`; `profiles`
    /// and `positions` were merged into `services`).
    #[must_use]
    pub fn from_slug(slug: &str) -> Option<Self> {
        match slug {
            "registrations" | "applications" => Some(Self::Registrations),
            "services" | "profiles" | "positions" => Some(Self::Services),
            "templates" => Some(Self::Templates),
            "declarations" => Some(Self::Declarations),
            "users" => Some(Self::Users),
            _ => None,
        }
    }
}

/// Where the user currently is, as far as the engine is concerned.
///
/// `section`/`tab` are meaningful only for applicant sessions,
/// `admin_section` only for administrator sessions. The state is rebuilt
/// from the location on every reconciliation; only the last-known sections
/// are cached in the durable store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavigationState {
    pub path: String,
    pub section: Option<ApplicantSection>,
    pub tab: Option<String>,
    pub admin_section: Option<AdminSection>,
}

impl Default for NavigationState {
    fn default() -> Self {
        Self {
            path: "/".to_string(),
            section: None,
            tab: None,
            admin_section: None,
        }
    }
}

/// Persisted-key catalog. The common namespace prefix is applied by the
/// tiered store, not here.
pub mod keys {
    /// Marker recording which identity schema is persisted.
    pub const SESSION_KIND: &str = "session-kind";
    /// Serialized applicant record.
    pub const APPLICANT: &str = "applicant";
    /// Serialized administrator record.
    pub const ADMINISTRATOR: &str = "administrator";
    /// Bearer token for collaborator calls.
    pub const TOKEN: &str = "token";
    /// Last active applicant section.
    pub const ACTIVE_SECTION: &str = "active-section";
    /// Last active applicant tab.
    pub const ACTIVE_TAB: &str = "active-tab";
    /// Last active administrator section.
    pub const ADMIN_SECTION: &str = "admin-section";
    /// Remember-me flag recording the retention tier choice.
    pub const REMEMBER: &str = "remember";

    /// Every auth key wiped on logout, both tiers.
    pub const AUTH_KEYS: [&str; 8] = [
        SESSION_KIND,
        APPLICANT,
        ADMINISTRATOR,
        TOKEN,
        ACTIVE_SECTION,
        ACTIVE_TAB,
        ADMIN_SECTION,
        REMEMBER,
    ];

    /// Session-kind marker value for applicants.
    pub const KIND_APPLICANT: &str = "applicant";
    /// Session-kind marker value for administrators.
    pub const KIND_ADMINISTRATOR: &str = "administrator";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn authentication_requires_non_zero_id() {
        assert!(!SessionIdentity::None.is_authenticated());

        let ghost = SessionIdentity::Applicant(ApplicantIdentity {
            id: 0,
            display_name: String::new(),
            email: String::new(),
            token: None,
        });
        assert!(!ghost.is_authenticated());

        let applicant = SessionIdentity::Applicant(ApplicantIdentity {
            id: 7,
            display_name: "Ana".into(),
            email: "ana@example.com".into(),
            token: None,
        });
        assert!(applicant.is_authenticated());

        let ghost_admin = SessionIdentity::Administrator(AdministratorIdentity {
            role: AdminRole::Coordinator,
            user_id: 0,
            display_name: String::new(),
            zonal_office_id: None,
            zonal_office_name: None,
            token: None,
        });
        assert!(!ghost_admin.is_authenticated());
    }

    #[test]
    fn role_codes_map_to_roles() {
        assert_eq!(AdminRole::from_code(1), Some(AdminRole::SuperAdmin));
        assert_eq!(AdminRole::from_code(2), Some(AdminRole::Coordinator));
        assert_eq!(AdminRole::from_code(3), Some(AdminRole::DateOfficer));
        assert_eq!(AdminRole::from_code(4), Some(AdminRole::UabaOfficer));
        assert_eq!(AdminRole::from_code(9), None);
    }

    #[test]
    fn admin_slugs_fold_legacy_names() {
        assert_eq!(
            AdminSection::from_slug("applications"),
            Some(AdminSection::Registrations)
        );
        assert_eq!(
            AdminSection::from_slug("profiles"),
            Some(AdminSection::Services)
        );
        assert_eq!(
            AdminSection::from_slug("positions"),
            Some(AdminSection::Services)
        );
        assert_eq!(AdminSection::from_slug("made-up"), None);
    }

    #[test]
    fn auth_key_catalog_is_complete() {
        assert_eq!(keys::AUTH_KEYS.len(), 8);
    }
}
