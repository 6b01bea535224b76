//! Core business logic for the session system.
//!
//! This service owns the authenticated identity, the retention tier chosen
//! at login, and the navigation state. It orchestrates classification of
//! login responses, persistence into the tiered store, rehydration at
//! startup, and teardown — keeping the persisted credentials, the in-memory
//! state, and the navigation location mutually consistent.

use std::sync::Arc;

use adapters::models::{AccountRecord, AdminCredentials, ApplicantCredentials};
use adapters::{ApiClient, RetentionTier, TieredStore};
use parking_lot::RwLock;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::services::notices::{self, TransientNotice};
use crate::services::reconciler::{self, Reconciliation};
use crate::session::errors::SessionError;
use crate::session::models::{
    keys, AdminRole, AdminSection, AdministratorIdentity, ApplicantIdentity, ApplicantSection,
    NavigationState, SessionIdentity,
};

/// Session engine: identity, retention tier, and navigation state.
pub struct SessionService {
    store: TieredStore,
    api: Arc<dyn ApiClient>,
    identity: RwLock<SessionIdentity>,
    tier: RwLock<RetentionTier>,
    navigation: RwLock<NavigationState>,
}

impl SessionService {
    pub fn new(store: TieredStore, api: Arc<dyn ApiClient>) -> Self {
        Self {
            store,
            api,
            identity: RwLock::new(SessionIdentity::None),
            tier: RwLock::new(RetentionTier::SessionOnly),
            navigation: RwLock::new(NavigationState::default()),
        }
    }

    /// Snapshot of the current identity.
    #[must_use]
    pub fn identity(&self) -> SessionIdentity {
        self.identity.read().clone()
    }

    /// Snapshot of the current navigation state.
    #[must_use]
    pub fn navigation(&self) -> NavigationState {
        self.navigation.read().clone()
    }

    /// The retention tier chosen at login.
    #[must_use]
    pub fn tier(&self) -> RetentionTier {
        *self.tier.read()
    }

    /// The underlying tiered store.
    #[must_use]
    pub fn store(&self) -> &TieredStore {
        &self.store
    }

    /// Classifies a login response into an identity.
    ///
    /// The numeric user-type field wins: when present and recognized, the
    /// record encodes an administrative account even though it arrived
    /// through the applicant-shaped login. Only an absent field makes the
    /// record an applicant. Classification runs before any persistence
    /// decision, because the two identities use different schemas and
    /// retention rules.
    #[must_use]
    pub fn classify_identity(record: &AccountRecord) -> SessionIdentity {
        if let Some(code) = record.user_type {
            match AdminRole::from_code(code) {
                Some(role) => {
                    return SessionIdentity::Administrator(AdministratorIdentity {
                        role,
                        user_id: record.id,
                        display_name: record.display_name.clone(),
                        zonal_office_id: record.zonal_office_id,
                        zonal_office_name: record.zonal_office_name.clone(),
                        token: record.token.clone(),
                    });
                }
                None => {
                    warn!(code, "unrecognized user-type code, treating as applicant");
                }
            }
        }
        SessionIdentity::Applicant(ApplicantIdentity {
            id: record.id,
            display_name: record.display_name.clone(),
            email: record.email.clone().unwrap_or_default(),
            token: record.token.clone(),
        })
    }

    /// Logs an applicant in. `remember` selects the retention tier; a
    /// record that classifies as administrative is persisted under the
    /// administrator schema with durable retention instead.
    pub async fn login_applicant(
        &self,
        credentials: &ApplicantCredentials,
        remember: bool,
    ) -> Result<SessionIdentity, SessionError> {
        let record = self.api.login_applicant(credentials).await?;
        let identity = Self::classify_identity(&record);
        let tier = match identity {
            SessionIdentity::Administrator(_) => RetentionTier::Remembered,
            _ if remember => RetentionTier::Remembered,
            _ => RetentionTier::SessionOnly,
        };
        self.establish(identity.clone(), tier);
        Ok(identity)
    }

    /// Logs an administrator in. Administrators are not offered a
    /// "remember me" choice: their sessions are always durable.
    pub async fn login_administrator(
        &self,
        credentials: &AdminCredentials,
    ) -> Result<SessionIdentity, SessionError> {
        let record = self.api.login_administrator(credentials).await?;
        let identity = Self::classify_identity(&record);
        self.establish(identity.clone(), RetentionTier::Remembered);
        Ok(identity)
    }

    /// Persists `identity` under `tier` and makes it current.
    ///
    /// The kind marker and the identity payload are written in the same
    /// synchronous pass; no caller can observe one without the other.
    fn establish(&self, identity: SessionIdentity, tier: RetentionTier) {
        match &identity {
            SessionIdentity::Applicant(applicant) => {
                self.store
                    .write(keys::SESSION_KIND, keys::KIND_APPLICANT, tier);
                match serde_json::to_string(applicant) {
                    Ok(raw) => self.store.write(keys::APPLICANT, &raw, tier),
                    Err(err) => warn!(%err, "could not encode applicant record"),
                }
                self.store.remove(keys::ADMINISTRATOR);
                if tier == RetentionTier::Remembered {
                    self.store.write(keys::REMEMBER, "true", tier);
                } else {
                    self.store.remove(keys::REMEMBER);
                }
            }
            SessionIdentity::Administrator(admin) => {
                self.store
                    .write(keys::SESSION_KIND, keys::KIND_ADMINISTRATOR, tier);
                match serde_json::to_string(admin) {
                    Ok(raw) => self.store.write(keys::ADMINISTRATOR, &raw, tier),
                    Err(err) => warn!(%err, "could not encode administrator record"),
                }
                self.store.remove(keys::APPLICANT);
                // The flag records an applicant choice; administrators
                // derive durability from their kind.
                self.store.remove(keys::REMEMBER);
            }
            SessionIdentity::None => {}
        }
        match identity.token() {
            Some(token) => self.store.write(keys::TOKEN, token, tier),
            None => self.store.remove(keys::TOKEN),
        }

        *self.identity.write() = identity;
        *self.tier.write() = tier;
    }

    /// Clears the session: identity to `None`, every persisted auth key
    /// wiped from both tiers, navigation back to defaults.
    pub fn logout(&self) {
        *self.identity.write() = SessionIdentity::None;
        *self.tier.write() = RetentionTier::SessionOnly;
        *self.navigation.write() = NavigationState::default();
        for key in keys::AUTH_KEYS {
            self.store.remove(key);
        }
    }

    /// Restores the persisted session at startup.
    ///
    /// A missing marker means logged out; a corrupt record is treated the
    /// same way (logged, keys purged, never propagated).
    pub fn rehydrate(&self) -> SessionIdentity {
        let kind = self.store.read(keys::SESSION_KIND);
        let (identity, tier) = match kind.as_deref() {
            Some(keys::KIND_APPLICANT) => {
                match self.parse_record::<ApplicantIdentity>(keys::APPLICANT) {
                    Some(applicant) if applicant.id != 0 => {
                        let remembered =
                            self.store.read(keys::REMEMBER).as_deref() == Some("true");
                        let tier = if remembered {
                            RetentionTier::Remembered
                        } else {
                            RetentionTier::SessionOnly
                        };
                        (SessionIdentity::Applicant(applicant), tier)
                    }
                    _ => {
                        self.purge();
                        (SessionIdentity::None, RetentionTier::SessionOnly)
                    }
                }
            }
            Some(keys::KIND_ADMINISTRATOR) => {
                match self.parse_record::<AdministratorIdentity>(keys::ADMINISTRATOR) {
                    Some(admin) if admin.user_id != 0 => {
                        (SessionIdentity::Administrator(admin), RetentionTier::Remembered)
                    }
                    _ => {
                        self.purge();
                        (SessionIdentity::None, RetentionTier::SessionOnly)
                    }
                }
            }
            None => (SessionIdentity::None, RetentionTier::SessionOnly),
            Some(other) => {
                warn!(kind = %other, "unknown session kind marker, discarding session");
                self.purge();
                (SessionIdentity::None, RetentionTier::SessionOnly)
            }
        };

        self.restore_navigation(&identity);
        debug!(authenticated = identity.is_authenticated(), "session rehydrated");
        *self.identity.write() = identity.clone();
        *self.tier.write() = tier;
        identity
    }

    fn parse_record<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let raw = self.store.read(key)?;
        match serde_json::from_str(&raw) {
            Ok(record) => Some(record),
            Err(err) => {
                warn!(key, %err, "malformed persisted session record");
                None
            }
        }
    }

    fn purge(&self) {
        for key in keys::AUTH_KEYS {
            self.store.remove(key);
        }
    }

    /// Brings the cached last-known sections back into navigation state.
    fn restore_navigation(&self, identity: &SessionIdentity) {
        let mut navigation = NavigationState::default();
        match identity {
            SessionIdentity::Applicant(_) => {
                navigation.section = self
                    .store
                    .read(keys::ACTIVE_SECTION)
                    .as_deref()
                    .and_then(ApplicantSection::from_slug);
                navigation.tab = self.store.read(keys::ACTIVE_TAB);
            }
            SessionIdentity::Administrator(_) => {
                navigation.admin_section = self
                    .store
                    .read(keys::ADMIN_SECTION)
                    .as_deref()
                    .and_then(AdminSection::from_slug);
            }
            SessionIdentity::None => {}
        }
        *self.navigation.write() = navigation;
    }

    /// Reconciles `path` against the current identity, applying the outcome
    /// to navigation state and caching the resulting section.
    pub fn reconcile(&self, path: &str) -> Reconciliation {
        let identity = self.identity();
        let outcome = reconciler::reconcile(path, &identity);

        {
            let mut navigation = self.navigation.write();
            navigation.path = outcome.path.clone();
            navigation.section = outcome.section;
            navigation.admin_section = outcome.admin_section;
        }

        if identity.is_authenticated() {
            let tier = self.tier();
            if let Some(section) = outcome.section {
                self.store.write(keys::ACTIVE_SECTION, section.as_str(), tier);
            }
            if let Some(section) = outcome.admin_section {
                self.store.write(keys::ADMIN_SECTION, section.as_str(), tier);
            }
        }
        outcome
    }

    /// Caches the applicant's explicit section/tab choice.
    pub fn remember_section(&self, section: ApplicantSection, tab: Option<&str>) {
        let identity = self.identity();
        if !matches!(identity, SessionIdentity::Applicant(_)) || !identity.is_authenticated() {
            return;
        }
        let tier = self.tier();
        self.store.write(keys::ACTIVE_SECTION, section.as_str(), tier);
        match tab {
            Some(tab) => self.store.write(keys::ACTIVE_TAB, tab, tier),
            None => self.store.remove(keys::ACTIVE_TAB),
        }
        let mut navigation = self.navigation.write();
        navigation.section = Some(section);
        navigation.tab = tab.map(str::to_string);
    }

    /// Tears the session down because a collaborator rejected its
    /// credential, leaving a one-shot notice for the next load.
    pub fn expire(&self, message: &str) {
        let identity = self.identity();
        notices::stash(&self.store, &identity, &TransientNotice::warning(message));
        self.logout();
    }

    /// Takes the pending one-shot notice, if any.
    #[must_use]
    pub fn take_notice(&self) -> Option<TransientNotice> {
        notices::take(&self.store)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use adapters::{EphemeralBackend, MockApiClient, StoreBackend};

    use super::*;

    const NS: &str = "convoca.";

    struct Harness {
        durable: Arc<EphemeralBackend>,
        scoped: Arc<EphemeralBackend>,
        api: Arc<MockApiClient>,
        service: SessionService,
    }

    impl Harness {
        fn new() -> Self {
            let durable = Arc::new(EphemeralBackend::new());
            let scoped = Arc::new(EphemeralBackend::new());
            let api = Arc::new(MockApiClient::new());
            let service = SessionService::new(
                TieredStore::new(
                    Box::new(Arc::clone(&durable)),
                    Box::new(Arc::clone(&scoped)),
                    NS,
                ),
                api.clone(),
            );
            Self {
                durable,
                scoped,
                api,
                service,
            }
        }

        /// A second execution context: same durable tier, fresh session tier.
        fn next_context(&self) -> SessionService {
            SessionService::new(
                TieredStore::new(
                    Box::new(Arc::clone(&self.durable)),
                    Box::new(EphemeralBackend::new()),
                    NS,
                ),
                self.api.clone(),
            )
        }

        fn seed_applicant(&self) {
            self.api.seed_account(
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
        }
    }

    fn applicant_credentials() -> ApplicantCredentials {
        ApplicantCredentials {
            email: "ana@example.com".into(),
            password: "pw".into(),
        }
    }

    #[test]
    fn classification_prefers_the_user_type_field() {
        let record = AccountRecord {
            id: 3,
            display_name: "Luis Vega".into(),
            email: None,
            user_type: Some(3),
            zonal_office_id: Some(11),
            zonal_office_name: Some("North".into()),
            token: None,
        };
        match SessionService::classify_identity(&record) {
            SessionIdentity::Administrator(admin) => {
                assert_eq!(admin.role, AdminRole::DateOfficer);
                assert_eq!(admin.user_id, 3);
                assert_eq!(admin.zonal_office_id, Some(11));
            }
            other => panic!("expected administrator, got {other:?}"),
        }

        let plain = AccountRecord {
            user_type: None,
            ..record.clone()
        };
        assert!(matches!(
            SessionService::classify_identity(&plain),
            SessionIdentity::Applicant(_)
        ));

        let unknown = AccountRecord {
            user_type: Some(42),
            ..record
        };
        assert!(matches!(
            SessionService::classify_identity(&unknown),
            SessionIdentity::Applicant(_)
        ));
    }

    #[tokio::test]
    async fn session_only_login_stays_out_of_the_durable_tier() {
        let harness = Harness::new();
        harness.seed_applicant();

        let identity = harness
            .service
            .login_applicant(&applicant_credentials(), false)
            .await
            .unwrap();
        assert!(identity.is_authenticated());
        assert_eq!(harness.service.tier(), RetentionTier::SessionOnly);

        assert!(harness.durable.read("convoca.session-kind").is_none());
        assert_eq!(
            harness.scoped.read("convoca.session-kind").as_deref(),
            Some("applicant")
        );
        assert!(harness.scoped.read("convoca.applicant").is_some());
        assert!(harness.durable.read("convoca.remember").is_none());

        // A new execution context loses the session tier entirely.
        let next = harness.next_context();
        assert!(!next.rehydrate().is_authenticated());
    }

    #[tokio::test]
    async fn remembered_login_survives_a_fresh_context() {
        let harness = Harness::new();
        harness.seed_applicant();

        harness
            .service
            .login_applicant(&applicant_credentials(), true)
            .await
            .unwrap();
        assert_eq!(harness.service.tier(), RetentionTier::Remembered);
        assert_eq!(
            harness.durable.read("convoca.remember").as_deref(),
            Some("true")
        );

        let next = harness.next_context();
        match next.rehydrate() {
            SessionIdentity::Applicant(applicant) => {
                assert_eq!(applicant.id, 7);
                assert_eq!(applicant.display_name, "Ana Silva");
                assert_eq!(applicant.email, "ana@example.com");
                assert_eq!(applicant.token.as_deref(), Some("tok-7"));
            }
            other => panic!("expected applicant, got {other:?}"),
        }
        assert_eq!(next.tier(), RetentionTier::Remembered);
    }

    #[tokio::test]
    async fn applicant_login_can_reclassify_as_administrator() {
        let harness = Harness::new();
        harness.api.seed_account(
            "luis@example.com",
            AccountRecord {
                id: 3,
                display_name: "Luis Vega".into(),
                email: Some("luis@example.com".into()),
                user_type: Some(1),
                zonal_office_id: None,
                zonal_office_name: None,
                token: Some("tok-3".into()),
            },
        );

        let identity = harness
            .service
            .login_applicant(
                &ApplicantCredentials {
                    email: "luis@example.com".into(),
                    password: "pw".into(),
                },
                false,
            )
            .await
            .unwrap();

        assert!(matches!(identity, SessionIdentity::Administrator(_)));
        // Administrative sessions are always durable, remember-me or not.
        assert_eq!(harness.service.tier(), RetentionTier::Remembered);
        assert_eq!(
            harness.durable.read("convoca.session-kind").as_deref(),
            Some("administrator")
        );
        assert!(harness.durable.read("convoca.administrator").is_some());
        assert!(harness.durable.read("convoca.applicant").is_none());
    }

    #[tokio::test]
    async fn logout_wipes_every_auth_key_from_both_tiers() {
        let harness = Harness::new();
        harness.seed_applicant();
        harness
            .service
            .login_applicant(&applicant_credentials(), true)
            .await
            .unwrap();

        // Scatter section caches and a stray session-tier copy as well.
        harness.service.reconcile("/cv");
        harness
            .service
            .remember_section(ApplicantSection::Cv, Some("experience"));

        harness.service.logout();

        for key in keys::AUTH_KEYS {
            let namespaced = format!("{NS}{key}");
            assert!(harness.durable.read(&namespaced).is_none(), "{key} durable");
            assert!(harness.scoped.read(&namespaced).is_none(), "{key} scoped");
        }
        assert!(!harness.service.identity().is_authenticated());
        assert_eq!(harness.service.navigation(), NavigationState::default());
    }

    #[tokio::test]
    async fn corrupt_persisted_record_rehydrates_logged_out() {
        let harness = Harness::new();
        harness.seed_applicant();
        harness
            .service
            .login_applicant(&applicant_credentials(), true)
            .await
            .unwrap();

        // Corrupt the payload behind the marker.
        harness
            .durable
            .write("convoca.applicant", "{definitely-not-json");

        let next = harness.next_context();
        assert!(!next.rehydrate().is_authenticated());

        // The broken keys are gone, so the next start is clean.
        assert!(harness.durable.read("convoca.session-kind").is_none());
        assert!(harness.durable.read("convoca.applicant").is_none());
    }

    #[tokio::test]
    async fn rehydration_restores_cached_sections() {
        let harness = Harness::new();
        harness.seed_applicant();
        harness
            .service
            .login_applicant(&applicant_credentials(), true)
            .await
            .unwrap();
        harness
            .service
            .remember_section(ApplicantSection::Positions, Some("open"));

        let next = harness.next_context();
        next.rehydrate();
        let navigation = next.navigation();
        assert_eq!(navigation.section, Some(ApplicantSection::Positions));
        assert_eq!(navigation.tab.as_deref(), Some("open"));
    }

    #[tokio::test]
    async fn expire_leaves_a_single_notice_and_logs_out() {
        let harness = Harness::new();
        harness.seed_applicant();
        harness
            .service
            .login_applicant(&applicant_credentials(), false)
            .await
            .unwrap();

        harness.service.expire("session expired, sign in again");

        assert!(!harness.service.identity().is_authenticated());
        let notice = harness.service.take_notice().unwrap();
        assert_eq!(notice.message, "session expired, sign in again");
        assert!(harness.service.take_notice().is_none());

        // Expiring an anonymous session leaves nothing behind.
        harness.service.expire("again");
        assert!(harness.service.take_notice().is_none());
    }

    #[tokio::test]
    async fn reconcile_applies_and_caches_the_outcome() {
        let harness = Harness::new();
        harness.seed_applicant();
        harness
            .service
            .login_applicant(&applicant_credentials(), false)
            .await
            .unwrap();

        let outcome = harness.service.reconcile("/profiles/3");
        assert_eq!(outcome.path, "/positions/3");
        assert_eq!(harness.service.navigation().path, "/positions/3");
        assert_eq!(
            harness.scoped.read("convoca.active-section").as_deref(),
            Some("positions")
        );
    }
}
