//! [`Session`] — owner of the active principal.
//!
//! A session is constructed explicitly, restored once at process start with
//! [`Session::restore_session`], and torn down with [`Session::end_session`].
//! It is the only thing that mutates the active principal.

use chrono::Utc;

use crate::{
  AuthFailure, Error, Result,
  access::{self, GateDecision, Gated, NavPolicy, Route},
  directory::IdentityDirectory,
  kv::{KeyValueStore, SESSION_KEY},
  principal::{Principal, Role, RoleSet},
};

pub struct Session<D, S> {
  directory: D,
  store:     S,
  principal: Option<Principal>,
}

impl<D, S> Session<D, S>
where
  D: IdentityDirectory,
  S: KeyValueStore,
{
  /// A session with no active principal. Call [`Self::restore_session`] to
  /// pick up a previously persisted login.
  pub fn new(directory: D, store: S) -> Self {
    Self { directory, store, principal: None }
  }

  // ── Lifecycle ───────────────────────────────────────────────────────────

  /// Log in as `identifier` (an email address).
  ///
  /// On failure the current session, if any, is left untouched. On success
  /// the principal replaces any existing one and is persisted; a failure to
  /// persist is logged and does not fail the login.
  pub fn authenticate(
    &mut self,
    identifier: &str,
    secret: &str,
  ) -> Result<Principal, AuthFailure> {
    let Some(mut principal) = self.directory.lookup(identifier) else {
      tracing::debug!(identifier, "login rejected: unknown identifier");
      return Err(AuthFailure::NotFound);
    };
    if !self.directory.verify_secret(secret) {
      tracing::debug!(identifier, "login rejected: secret mismatch");
      return Err(AuthFailure::BadSecret);
    }

    principal.last_login = Some(Utc::now());
    if let Err(e) = self.persist(&principal) {
      tracing::warn!(error = %e, "failed to persist session");
    }

    tracing::info!(
      email = %principal.email,
      role = %principal.role,
      "session started"
    );
    self.principal = Some(principal.clone());
    Ok(principal)
  }

  /// Adopt the principal persisted by an earlier process, if any.
  ///
  /// Missing, unreadable or malformed session data all read as "no session";
  /// the latter two are logged.
  pub fn restore_session(&mut self) -> Option<&Principal> {
    match self.load_persisted() {
      Ok(Some(principal)) => {
        tracing::debug!(email = %principal.email, "session restored");
        self.principal = Some(principal);
      }
      Ok(None) => {}
      Err(e) => tracing::warn!(error = %e, "ignoring persisted session"),
    }
    self.principal.as_ref()
  }

  /// Drop the active principal and its persisted copy. Safe to call with no
  /// active session.
  pub fn end_session(&mut self) {
    if let Some(principal) = self.principal.take() {
      tracing::info!(email = %principal.email, "session ended");
    }
    if let Err(e) = self.store.remove(SESSION_KEY) {
      tracing::warn!(error = %e, "failed to clear persisted session");
    }
  }

  fn persist(&self, principal: &Principal) -> Result<()> {
    let json = serde_json::to_string(principal)?;
    self.store.set(SESSION_KEY, &json).map_err(Error::store)
  }

  fn load_persisted(&self) -> Result<Option<Principal>> {
    let raw = self.store.get(SESSION_KEY).map_err(Error::store)?;
    raw
      .map(|json| serde_json::from_str(&json))
      .transpose()
      .map_err(Error::CorruptSessionData)
  }

  // ── Queries ─────────────────────────────────────────────────────────────

  pub fn current_principal(&self) -> Option<&Principal> {
    self.principal.as_ref()
  }

  pub fn is_authenticated(&self) -> bool { self.principal.is_some() }

  pub fn role(&self) -> Option<Role> { self.principal.as_ref().map(|p| p.role) }

  /// `false` when unauthenticated. An empty `required` set places no
  /// restriction; otherwise the principal's role must be a member.
  pub fn has_any_role(&self, required: &RoleSet) -> bool {
    self.role().is_some_and(|role| required.admits(role))
  }

  pub fn is_admin(&self) -> bool { self.has_any_role(&RoleSet::from([Role::Admin])) }

  pub fn is_manager(&self) -> bool {
    self.has_any_role(&RoleSet::from([Role::Admin, Role::Manager]))
  }

  pub fn is_viewer(&self) -> bool { self.has_any_role(&RoleSet::all()) }

  // ── Access gate ─────────────────────────────────────────────────────────

  /// Evaluate the access gate against the current session state.
  pub fn gate(&self, required: &RoleSet) -> GateDecision {
    access::evaluate(self.current_principal(), required)
  }

  /// Run `child` only when the gate grants access.
  pub fn guard<T>(
    &self,
    required: &RoleSet,
    child: impl FnOnce(&Principal) -> T,
  ) -> Gated<T> {
    match (self.gate(required), self.current_principal()) {
      (GateDecision::Granted, Some(principal)) => Gated::Rendered(child(principal)),
      (decision, _) => Gated::Denied(decision),
    }
  }

  /// Routes the current principal may navigate to.
  pub fn navigation(&self, policy: NavPolicy) -> Vec<Route> {
    access::visible_routes(self.current_principal(), policy)
  }
}

#[cfg(test)]
mod tests {
  use std::{io, rc::Rc};

  use super::*;
  use crate::{
    directory::MockDirectory,
    kv::{LOCALE_KEY, MemoryStore},
  };

  fn session(store: &MemoryStore) -> Session<MockDirectory, &MemoryStore> {
    Session::new(MockDirectory::default(), store)
  }

  #[test]
  fn authenticate_sets_and_persists_principal() {
    let store = MemoryStore::new();
    let mut s = session(&store);

    let principal = s.authenticate("admin@example.com", "password").unwrap();
    assert_eq!(principal.role, Role::Admin);
    assert!(principal.last_login.is_some());
    assert_eq!(s.current_principal().map(|p| p.role), Some(Role::Admin));
    assert!(s.is_authenticated());

    let raw = store.get(SESSION_KEY).unwrap().unwrap();
    let persisted: Principal = serde_json::from_str(&raw).unwrap();
    assert_eq!(persisted, principal);
  }

  #[test]
  fn bad_secret_leaves_session_unchanged() {
    let store = MemoryStore::new();
    let mut s = session(&store);
    s.authenticate("manager@example.com", "password").unwrap();

    let err = s.authenticate("admin@example.com", "wrong").unwrap_err();
    assert_eq!(err, AuthFailure::BadSecret);
    assert_eq!(s.role(), Some(Role::Manager));

    let raw = store.get(SESSION_KEY).unwrap().unwrap();
    assert!(raw.contains("manager@example.com"));
  }

  #[test]
  fn unknown_identifier_is_not_found() {
    let store = MemoryStore::new();
    let mut s = session(&store);
    let err = s.authenticate("nobody@example.com", "password").unwrap_err();
    assert_eq!(err, AuthFailure::NotFound);
    assert!(!s.is_authenticated());
    assert!(store.is_empty());
  }

  #[test]
  fn failure_messages_do_not_distinguish_causes() {
    assert_eq!(
      AuthFailure::NotFound.to_string(),
      AuthFailure::BadSecret.to_string()
    );
  }

  #[test]
  fn restore_picks_up_previous_login() {
    let store = MemoryStore::new();
    session(&store)
      .authenticate("viewer@example.com", "password")
      .unwrap();

    let mut fresh = session(&store);
    assert!(!fresh.is_authenticated());
    let restored = fresh.restore_session().cloned();
    assert_eq!(restored.map(|p| p.email), Some("viewer@example.com".into()));
    assert_eq!(fresh.role(), Some(Role::Viewer));
  }

  #[test]
  fn restore_with_nothing_persisted_is_none() {
    let store = MemoryStore::new();
    let mut s = session(&store);
    assert!(s.restore_session().is_none());
  }

  #[test]
  fn malformed_persisted_session_reads_as_absent() {
    let store = MemoryStore::new();
    store.set(SESSION_KEY, "{not json").unwrap();
    let mut s = session(&store);
    assert!(s.restore_session().is_none());
    assert!(!s.is_authenticated());

    store.set(SESSION_KEY, r#"{"id":"1","role":"superuser"}"#).unwrap();
    assert!(s.restore_session().is_none());
  }

  #[test]
  fn restore_accepts_full_timestamp_fields() {
    let store = MemoryStore::new();
    store
      .set(
        SESSION_KEY,
        r#"{"id":"1","name":"Admin User","email":"admin@example.com","role":"admin","status":"active","createdAt":"2024-01-01T00:00:00.000Z","lastLogin":"2024-05-01T10:00:00.000Z"}"#,
      )
      .unwrap();
    let mut s = session(&store);
    assert_eq!(s.restore_session().map(|p| p.role), Some(Role::Admin));
    assert!(s.is_admin());
  }

  // ── Unavailable store ─────────────────────────────────────────────────

  /// Every operation fails, as if the backing storage were unreachable.
  struct OfflineStore;

  fn offline() -> io::Error { io::Error::other("store offline") }

  impl KeyValueStore for OfflineStore {
    type Error = io::Error;

    fn get(&self, _key: &str) -> Result<Option<String>, io::Error> { Err(offline()) }

    fn set(&self, _key: &str, _value: &str) -> Result<(), io::Error> { Err(offline()) }

    fn remove(&self, _key: &str) -> Result<(), io::Error> { Err(offline()) }
  }

  #[test]
  fn unreadable_store_restores_nothing() {
    let mut s = Session::new(MockDirectory::default(), OfflineStore);
    assert!(s.restore_session().is_none());
    assert!(!s.is_authenticated());
  }

  #[test]
  fn login_succeeds_when_store_rejects_writes() {
    let mut s = Session::new(MockDirectory::default(), OfflineStore);
    let principal = s.authenticate("manager@example.com", "password").unwrap();
    assert_eq!(principal.role, Role::Manager);
    assert!(s.is_authenticated());
    assert!(s.is_manager());

    // A failed read keeps the in-memory principal.
    assert_eq!(s.restore_session().map(|p| p.role), Some(Role::Manager));
  }

  #[test]
  fn logout_clears_principal_when_store_rejects_removal() {
    let mut s = Session::new(MockDirectory::default(), OfflineStore);
    s.authenticate("admin@example.com", "password").unwrap();
    s.end_session();
    assert!(s.current_principal().is_none());
    assert_eq!(s.gate(&RoleSet::empty()), GateDecision::LoginRequired);
  }

  #[test]
  fn end_session_is_idempotent() {
    let store = MemoryStore::new();
    store.set(LOCALE_KEY, "jp").unwrap();
    let mut s = session(&store);
    s.authenticate("admin@example.com", "password").unwrap();

    s.end_session();
    assert!(s.current_principal().is_none());
    assert_eq!(store.get(SESSION_KEY).unwrap(), None);

    s.end_session();
    assert!(s.current_principal().is_none());
    // Only the session entry is cleared.
    assert_eq!(store.get(LOCALE_KEY).unwrap().as_deref(), Some("jp"));
  }

  #[test]
  fn has_any_role_is_false_when_unauthenticated() {
    let store = MemoryStore::new();
    let s = session(&store);
    assert!(!s.has_any_role(&RoleSet::empty()));
    assert!(!s.has_any_role(&RoleSet::all()));
    assert!(!s.is_viewer());
  }

  #[test]
  fn has_any_role_matches_set_membership_for_every_role() {
    let sets = [
      RoleSet::empty(),
      RoleSet::from([Role::Admin]),
      RoleSet::from([Role::Manager]),
      RoleSet::from([Role::Viewer]),
      RoleSet::from([Role::Admin, Role::Viewer]),
      RoleSet::from([Role::Admin, Role::Manager]),
      RoleSet::all(),
    ];
    for email in ["admin@example.com", "manager@example.com", "viewer@example.com"] {
      let store = MemoryStore::new();
      let mut s = session(&store);
      let role = s.authenticate(email, "password").unwrap().role;
      for set in &sets {
        let expected = set.is_empty() || set.contains(role);
        assert_eq!(s.has_any_role(set), expected, "{role} against {{{set}}}");
      }
    }
  }

  #[test]
  fn role_shortcuts_follow_coverage() {
    let store = MemoryStore::new();
    let mut s = session(&store);

    s.authenticate("manager@example.com", "password").unwrap();
    assert!(!s.is_admin());
    assert!(s.is_manager());
    assert!(s.is_viewer());

    s.authenticate("viewer@example.com", "password").unwrap();
    assert!(!s.is_manager());
    assert!(s.is_viewer());
  }

  #[test]
  fn guard_only_runs_child_when_granted() {
    let store = Rc::new(MemoryStore::new());
    let mut s = Session::new(MockDirectory::default(), Rc::clone(&store));
    let users = Route::Users.required_roles();

    let mut ran = false;
    let out = s.guard(&users, |_| ran = true);
    assert_eq!(out, Gated::Denied(GateDecision::LoginRequired));
    assert!(!ran);

    s.authenticate("viewer@example.com", "password").unwrap();
    let out = s.guard(&users, |p| p.name.clone());
    assert_eq!(
      out,
      Gated::Denied(GateDecision::InsufficientPermissions { required: users.clone() })
    );

    s.authenticate("manager@example.com", "password").unwrap();
    let out = s.guard(&users, |p| p.name.clone());
    assert_eq!(out, Gated::Rendered("Manager User".to_string()));
  }

  #[test]
  fn gate_follows_session_changes() {
    let store = MemoryStore::new();
    let mut s = session(&store);
    let open = RoleSet::empty();

    assert_eq!(s.gate(&open), GateDecision::LoginRequired);
    s.authenticate("viewer@example.com", "password").unwrap();
    assert_eq!(s.gate(&open), GateDecision::Granted);
    s.end_session();
    assert_eq!(s.gate(&open), GateDecision::LoginRequired);
  }
}
