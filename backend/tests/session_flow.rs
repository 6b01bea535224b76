//! End-to-end scenarios over the public engine surface: login, route
//! reconciliation, admission-controlled registration, expiry, and teardown,
//! with the collaborator mocked and the durable tier on disk.

use std::sync::Arc;

use adapters::models::{AccountRecord, ApplicantCredentials, CvStatus, Position};
use adapters::{EphemeralBackend, MockApiClient, PersistentBackend, TieredStore};

use backend::services::admission::{AdmissionError, AdmissionService};
use backend::session::models::{AdminSection, ApplicantSection};
use backend::session::{SessionIdentity, SessionService};
use backend::errors::PortalError;

fn seed_api() -> Arc<MockApiClient> {
    let api = Arc::new(MockApiClient::new());
    api.seed_account(
        "ana@example.com",
        AccountRecord {
            id: 7,
            display_name: "Ana Silva".into(),
            email: Some("ana@example.com".into()),
            user_type: None,
            zonal_office_id: None,
            zonal_office_name: None,
            token: Some("tok-7".into()),
        },
    );
    api.seed_admin_account(
        "lvega",
        AccountRecord {
            id: 3,
            display_name: "Luis Vega".into(),
            email: None,
            user_type: Some(2),
            zonal_office_id: Some(11),
            zonal_office_name: Some("North".into()),
            token: Some("tok-3".into()),
        },
    );
    api.seed_position(Position {
        id: 40,
        name: "Field Coordinator".into(),
        zonal_office_id: Some(11),
        active: true,
        opens_at: None,
        closes_at: None,
    });
    api.seed_cv_status(7, CvStatus { id: 2, complete: true });
    api
}

fn store_at(dir: &std::path::Path) -> TieredStore {
    TieredStore::new(
        Box::new(PersistentBackend::open(dir.join("session-store.json"))),
        Box::new(EphemeralBackend::new()),
        "convoca.",
    )
}

fn credentials() -> ApplicantCredentials {
    ApplicantCredentials {
        email: "ana@example.com".into(),
        password: "pw".into(),
    }
}

#[tokio::test]
async fn applicant_journey_from_login_to_logout() {
    let dir = tempfile::tempdir().unwrap();
    let api = seed_api();
    let session = SessionService::new(store_at(dir.path()), api.clone());
    let admission = AdmissionService::new(api.clone());

    // Anonymous visit to a protected path lands on the login view.
    assert_eq!(session.reconcile("/cv").path, "/login");

    let identity = session.login_applicant(&credentials(), true).await.unwrap();
    assert!(identity.is_authenticated());

    // The same path now resolves, and the section is tracked.
    let outcome = session.reconcile("/cv");
    assert!(!outcome.redirect);
    assert_eq!(outcome.section, Some(ApplicantSection::Cv));

    // Initiate, then submit; the admission check runs fresh both times.
    admission.initiate(7, 40).await.unwrap();
    let record = admission.submit(&session.identity(), 40, 2).await.unwrap();
    assert_eq!(record.position_id, 40);
    assert!(record.registration_number.is_some());

    // A second attempt for the same position is a terminal denial.
    let denied = admission.initiate(7, 40).await;
    assert!(matches!(
        denied,
        Err(PortalError::Admission(AdmissionError::AlreadyRegistered))
    ));

    session.logout();
    assert_eq!(session.identity(), SessionIdentity::None);
    assert_eq!(session.reconcile("/cv").path, "/login");
}

#[tokio::test]
async fn remembered_session_survives_a_restart() {
    let dir = tempfile::tempdir().unwrap();
    let api = seed_api();

    {
        let session = SessionService::new(store_at(dir.path()), api.clone());
        session.login_applicant(&credentials(), true).await.unwrap();
        session.remember_section(ApplicantSection::Positions, None);
    }

    // A brand-new process over the same store file.
    let session = SessionService::new(store_at(dir.path()), api);
    let identity = session.rehydrate();
    match identity {
        SessionIdentity::Applicant(applicant) => assert_eq!(applicant.id, 7),
        other => panic!("expected applicant, got {other:?}"),
    }
    assert_eq!(
        session.navigation().section,
        Some(ApplicantSection::Positions)
    );
}

#[tokio::test]
async fn session_only_login_does_not_survive_a_restart() {
    let dir = tempfile::tempdir().unwrap();
    let api = seed_api();

    {
        let session = SessionService::new(store_at(dir.path()), api.clone());
        session.login_applicant(&credentials(), false).await.unwrap();
        assert!(session.identity().is_authenticated());
    }

    let session = SessionService::new(store_at(dir.path()), api);
    assert!(!session.rehydrate().is_authenticated());
}

#[tokio::test]
async fn administrator_journey_is_role_gated() {
    let dir = tempfile::tempdir().unwrap();
    let api = seed_api();
    let session = SessionService::new(store_at(dir.path()), api);

    let identity = session
        .login_administrator(&adapters::models::AdminCredentials {
            username: "lvega".into(),
            password: "pw".into(),
        })
        .await
        .unwrap();
    assert!(matches!(identity, SessionIdentity::Administrator(_)));

    // Coordinators may not manage templates; the path is rewritten, not
    // rejected.
    let outcome = session.reconcile("/admin/templates");
    assert!(outcome.redirect);
    assert_eq!(outcome.path, "/admin/registrations");
    assert_eq!(outcome.admin_section, Some(AdminSection::Registrations));

    // The allowed section sticks and is restored after a restart.
    session.reconcile("/admin/registrations/42");
    assert_eq!(
        session.navigation().admin_section,
        Some(AdminSection::Registrations)
    );
}

#[tokio::test]
async fn expiry_leaves_a_one_shot_notice() {
    let dir = tempfile::tempdir().unwrap();
    let api = seed_api();
    let session = SessionService::new(store_at(dir.path()), api);

    session.login_applicant(&credentials(), false).await.unwrap();
    session.expire("your session has expired, sign in again");

    assert!(!session.identity().is_authenticated());
    let notice = session.take_notice().unwrap();
    assert_eq!(notice.message, "your session has expired, sign in again");
    assert!(session.take_notice().is_none());
}
