//! Route reconciliation state machine.
//!
//! On every path change and every identity change the engine re-derives
//! where the user is allowed to be. The reconciler is a pure function over
//! `(path, identity)`: it never reads prior navigation state, so applying
//! it twice always yields the same outcome.
//!
//! # Transition rules
//!
//! | Identity | Path | Outcome |
//! |----------|------|---------|
//! | anonymous | `/` | stay, portal selector unset |
//! | anonymous | under `/admin` | portal = administrator, redirect to `/admin/login` |
//! | anonymous | elsewhere | portal = applicant, auth view from path, else redirect `/login` |
//! | administrator | outside `/admin`, or exactly `/admin` | redirect to the default admin section |
//! | administrator | `/admin/<slug>` | slug folded (legacy names), role-gated, denied → fallback section |
//! | applicant | under `/admin`, stale `/applications`, or unrecognized | redirect to the CV root |
//! | applicant | `/cv`, `/positions` | stay, active section set |
//! | applicant | legacy `/profiles` | rewritten to `/positions` |

use tracing::debug;

use crate::services::role_gate;
use crate::session::models::{
    AdminRole, AdminSection, ApplicantSection, AuthView, PortalKind, SessionIdentity,
};

/// Neutral landing path.
pub const NEUTRAL_ROOT: &str = "/";
/// Canonical applicant login path.
pub const LOGIN_PATH: &str = "/login";
/// Administrator login path.
pub const ADMIN_LOGIN_PATH: &str = "/admin/login";
/// Applicant default section (the CV root).
pub const CV_ROOT: &str = "/cv";
/// Applicant positions root.
pub const POSITIONS_ROOT: &str = "/positions";

const ADMIN_PREFIX_SEGMENT: &str = "admin";

/// Outcome of one reconciliation pass.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct Reconciliation {
    /// Corrected path; equals the input when no redirect is needed.
    pub path: String,
    /// Whether the caller must replace the current location.
    pub redirect: bool,
    /// Session-type selector forced for unauthenticated visitors.
    pub portal: Option<PortalKind>,
    /// Auth sub-view for unauthenticated applicant paths.
    pub auth_view: Option<AuthView>,
    /// Active section for applicant sessions.
    pub section: Option<ApplicantSection>,
    /// Active section for administrator sessions.
    pub admin_section: Option<AdminSection>,
}

impl Reconciliation {
    fn stay(path: String) -> Self {
        Self {
            path,
            redirect: false,
            portal: None,
            auth_view: None,
            section: None,
            admin_section: None,
        }
    }

    fn redirect(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            redirect: true,
            portal: None,
            auth_view: None,
            section: None,
            admin_section: None,
        }
    }
}

/// Maps the current location and identity to the corrected location.
#[must_use]
pub fn reconcile(path: &str, identity: &SessionIdentity) -> Reconciliation {
    let path = normalize(path);
    let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
    let under_admin = segments.first() == Some(&ADMIN_PREFIX_SEGMENT);

    let outcome = if !identity.is_authenticated() {
        reconcile_anonymous(&path, &segments, under_admin)
    } else {
        match identity {
            SessionIdentity::Administrator(admin) => {
                reconcile_administrator(&path, &segments, under_admin, admin.role)
            }
            _ => reconcile_applicant(&path, &segments, under_admin),
        }
    };

    if outcome.redirect {
        debug!(from = %path, to = %outcome.path, "reconciler redirect");
    }
    outcome
}

fn reconcile_anonymous(path: &str, segments: &[&str], under_admin: bool) -> Reconciliation {
    // Neutral landing page: nothing to force yet.
    if segments.is_empty() {
        return Reconciliation::stay(path.to_string());
    }

    if under_admin {
        let mut outcome = if path == ADMIN_LOGIN_PATH {
            Reconciliation::stay(path.to_string())
        } else {
            Reconciliation::redirect(ADMIN_LOGIN_PATH)
        };
        outcome.portal = Some(PortalKind::Administrator);
        return outcome;
    }

    let view = match segments[0] {
        "login" => Some(AuthView::Login),
        "register" => Some(AuthView::Register),
        "recovery" => Some(AuthView::Recovery),
        _ => None,
    };
    let mut outcome = match view {
        Some(view) => {
            let mut stay = Reconciliation::stay(path.to_string());
            stay.auth_view = Some(view);
            stay
        }
        None => {
            let mut redirect = Reconciliation::redirect(LOGIN_PATH);
            redirect.auth_view = Some(AuthView::Login);
            redirect
        }
    };
    outcome.portal = Some(PortalKind::Applicant);
    outcome
}

fn reconcile_applicant(path: &str, segments: &[&str], under_admin: bool) -> Reconciliation {
    // The admin panel and the retired applications surface both send the
    // applicant back to their default section.
    if under_admin || segments.first() == Some(&"applications") {
        let mut outcome = Reconciliation::redirect(CV_ROOT);
        outcome.section = Some(ApplicantSection::Cv);
        return outcome;
    }

    match segments.first() {
        Some(&"cv") => {
            let mut outcome = Reconciliation::stay(path.to_string());
            outcome.section = Some(ApplicantSection::Cv);
            outcome
        }
        Some(&"positions") => {
            let mut outcome = Reconciliation::stay(path.to_string());
            outcome.section = Some(ApplicantSection::Positions);
            outcome
        }
        // Legacy name for the positions surface.
        Some(&"profiles") => {
            let tail = rebuild_tail(segments, 1);
            let mut outcome = Reconciliation::redirect(format!("{POSITIONS_ROOT}{tail}"));
            outcome.section = Some(ApplicantSection::Positions);
            outcome
        }
        _ => {
            let mut outcome = Reconciliation::redirect(CV_ROOT);
            outcome.section = Some(ApplicantSection::Cv);
            outcome
        }
    }
}

fn reconcile_administrator(
    path: &str,
    segments: &[&str],
    under_admin: bool,
    role: AdminRole,
) -> Reconciliation {
    let default_section = role_gate::fallback_section(Some(role));

    if !under_admin || segments.len() == 1 {
        return admin_section_redirect(default_section);
    }

    let slug = segments[1];
    let section = match AdminSection::from_slug(slug) {
        Some(section) => section,
        None => return admin_section_redirect(default_section),
    };

    if !role_gate::is_section_allowed(section, Some(role)) {
        return admin_section_redirect(role_gate::fallback_section(Some(role)));
    }

    if slug != section.as_str() {
        // Legacy slug: rewrite to the canonical section, keeping the tail.
        let tail = rebuild_tail(segments, 2);
        let mut outcome =
            Reconciliation::redirect(format!("/admin/{}{}", section.as_str(), tail));
        outcome.admin_section = Some(section);
        return outcome;
    }

    let mut outcome = Reconciliation::stay(path.to_string());
    outcome.admin_section = Some(section);
    outcome
}

fn admin_section_redirect(section: AdminSection) -> Reconciliation {
    let mut outcome = Reconciliation::redirect(format!("/admin/{}", section.as_str()));
    outcome.admin_section = Some(section);
    outcome
}

/// Joins the segments after `skip` back into a path suffix.
fn rebuild_tail(segments: &[&str], skip: usize) -> String {
    segments[skip..]
        .iter()
        .map(|segment| format!("/{segment}"))
        .collect()
}

fn normalize(path: &str) -> String {
    if path.is_empty() {
        return NEUTRAL_ROOT.to_string();
    }
    if path.starts_with('/') {
        path.to_string()
    } else {
        format!("/{path}")
    }
}
