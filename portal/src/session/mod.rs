pub mod auth;
pub mod handoff;
pub mod storage;

use std::{cell::RefCell, fmt, rc::Rc};

use api_types::UserProfile;
use secrecy::{ExposeSecret, SecretString};
use yew::prelude::*;

use self::storage::{BrowserStorage, SessionStorage};

pub const USER_KEY: &str = "user-data";
pub const TOKEN_KEY: &str = "user-token";

/// The signed-in user paired with the bearer token issued for them.
/// Authenticated only when both halves are present.
#[derive(Debug, Clone, Default)]
pub struct Session {
    pub user: Option<UserProfile>,
    pub token: Option<SecretString>,
}

impl Session {
    pub fn is_authenticated(&self) -> bool {
        self.user.is_some() && self.token.is_some()
    }
}

impl PartialEq for Session {
    fn eq(&self, other: &Self) -> bool {
        let same_token = match (&self.token, &other.token) {
            (Some(a), Some(b)) => a.expose_secret() == b.expose_secret(),
            (None, None) => true,
            _ => false,
        };
        same_token && self.user == other.user
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    Hydrating,
    Ready,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStatus {
    Loading,
    Anonymous,
    Authenticated,
}

/// Owns the session and its persisted copy. Every mutation writes storage in
/// the same call, so a reload right after any operation sees the same state.
pub struct SessionStore {
    storage: Box<dyn SessionStorage>,
    session: Session,
    phase: SessionPhase,
}

impl fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionStore")
            .field("session", &self.session)
            .field("phase", &self.phase)
            .finish()
    }
}

impl SessionStore {
    pub fn new(storage: Box<dyn SessionStorage>) -> Self {
        SessionStore {
            storage,
            session: Session::default(),
            phase: SessionPhase::Hydrating,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn status(&self) -> SessionStatus {
        match self.phase {
            SessionPhase::Hydrating => SessionStatus::Loading,
            SessionPhase::Ready if self.session.is_authenticated() => SessionStatus::Authenticated,
            SessionPhase::Ready => SessionStatus::Anonymous,
        }
    }

    /// Reads both persisted slots once. A half-written or unreadable session
    /// is discarded.
    pub fn hydrate(&mut self) {
        let saved_user = self.storage.get(USER_KEY);
        let saved_token = self.storage.get(TOKEN_KEY);
        match (saved_user, saved_token) {
            (Some(raw_user), Some(token)) => match serde_json::from_str::<UserProfile>(&raw_user) {
                Ok(user) => {
                    log::info!("Session restored from storage, user_id={}", user.id);
                    self.session = Session {
                        user: Some(user),
                        token: Some(SecretString::from(token)),
                    };
                }
                Err(error) => {
                    log::error!("Fail to parse saved user data, cleaning session. Error={error}");
                    self.clear();
                }
            },
            (None, None) => {
                self.session = Session::default();
            }
            _ => {
                log::warn!("Incomplete session in storage, cleaning it");
                self.clear();
            }
        }
        self.phase = SessionPhase::Ready;
    }

    pub fn establish(&mut self, user: UserProfile, token: SecretString) {
        self.storage.set(TOKEN_KEY, token.expose_secret());
        self.persist_user(&user);
        self.session = Session {
            user: Some(user),
            token: Some(token),
        };
        self.phase = SessionPhase::Ready;
    }

    /// First half of a token handoff: forget whoever was signed in and keep
    /// only the new token, so requests made to validate it carry it.
    pub fn begin_handoff(&mut self, token: SecretString) {
        self.clear();
        self.storage.set(TOKEN_KEY, token.expose_secret());
        self.session.token = Some(token);
        self.phase = SessionPhase::Ready;
    }

    pub fn complete_handoff(&mut self, user: UserProfile) {
        if self.session.token.is_none() {
            log::warn!("Handoff completed without a pending token, ignoring profile");
            return;
        }
        self.persist_user(&user);
        self.session.user = Some(user);
    }

    pub fn update_user(&mut self, user: UserProfile) {
        self.persist_user(&user);
        self.session.user = Some(user);
    }

    pub fn logout(&mut self) {
        self.clear();
        self.phase = SessionPhase::Ready;
    }

    fn clear(&mut self) {
        self.session = Session::default();
        self.storage.remove(USER_KEY);
        self.storage.remove(TOKEN_KEY);
    }

    fn persist_user(&self, user: &UserProfile) {
        match serde_json::to_string(user) {
            Ok(raw) => self.storage.set(USER_KEY, &raw),
            Err(error) => log::error!("Fail to serialize user data, error={error}"),
        }
    }
}

/// Context value handed to every view. Clones share one store; `revision`
/// changes after each mutation so context consumers re-render.
#[derive(Clone)]
pub struct SessionHandle {
    store: Rc<RefCell<SessionStore>>,
    revision: usize,
    notify: Callback<()>,
}

impl PartialEq for SessionHandle {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.store, &other.store) && self.revision == other.revision
    }
}

impl fmt::Debug for SessionHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionHandle")
            .field("store", &self.store.borrow())
            .field("revision", &self.revision)
            .finish()
    }
}

impl SessionHandle {
    pub fn new(store: Rc<RefCell<SessionStore>>, revision: usize, notify: Callback<()>) -> Self {
        SessionHandle {
            store,
            revision,
            notify,
        }
    }

    pub fn status(&self) -> SessionStatus {
        self.store.borrow().status()
    }

    pub fn is_authenticated(&self) -> bool {
        self.status() == SessionStatus::Authenticated
    }

    #[cfg(test)]
    pub fn snapshot(&self) -> Session {
        self.store.borrow().session().clone()
    }

    pub fn user(&self) -> Option<UserProfile> {
        self.store.borrow().session().user.clone()
    }

    pub fn token(&self) -> Option<SecretString> {
        self.store.borrow().session().token.clone()
    }

    pub fn hydrate(&self) {
        self.update(SessionStore::hydrate);
    }

    pub fn establish(&self, user: UserProfile, token: SecretString) {
        self.update(move |store| store.establish(user, token));
    }

    pub fn begin_handoff(&self, token: SecretString) {
        self.update(move |store| store.begin_handoff(token));
    }

    pub fn complete_handoff(&self, user: UserProfile) {
        self.update(move |store| store.complete_handoff(user));
    }

    pub fn update_user(&self, user: UserProfile) {
        self.update(move |store| store.update_user(user));
    }

    pub fn logout(&self) {
        self.update(SessionStore::logout);
    }

    fn update(&self, mutation: impl FnOnce(&mut SessionStore)) {
        mutation(&mut self.store.borrow_mut());
        self.notify.emit(());
    }
}

#[derive(Default)]
struct Revision(usize);

impl Reducible for Revision {
    type Action = ();

    fn reduce(self: Rc<Self>, _: Self::Action) -> Rc<Self> {
        Rc::new(Revision(self.0.wrapping_add(1)))
    }
}

#[derive(Properties, PartialEq)]
pub struct SessionProviderProps {
    pub children: Children,
}

/// Creates the one session store of the application and hydrates it from
/// local storage after the first render.
#[function_component(SessionProvider)]
pub fn session_provider(props: &SessionProviderProps) -> Html {
    let revision = use_reducer(Revision::default);
    let store = use_mut_ref(|| SessionStore::new(Box::new(BrowserStorage)));

    let notify = {
        let dispatcher = revision.dispatcher();
        Callback::from(move |_| dispatcher.dispatch(()))
    };
    let handle = SessionHandle::new(store, revision.0, notify);

    {
        let handle = handle.clone();
        use_effect_with((), move |_| {
            handle.hydrate();
        });
    }

    html! {
        <ContextProvider<SessionHandle> context={handle}>
            {props.children.clone()}
        </ContextProvider<SessionHandle>>
    }
}

#[hook]
pub fn use_session() -> SessionHandle {
    use_context::<SessionHandle>().expect("use_session called outside SessionProvider")
}

#[cfg(test)]
pub(crate) mod tests {
    use super::storage::MemoryStorage;
    use super::*;

    pub(crate) fn profile(id: &str, first_name: &str) -> UserProfile {
        UserProfile {
            id: id.to_owned(),
            first_name: first_name.to_owned(),
            email: format!("{first_name}@example.com"),
            ..Default::default()
        }
    }

    pub(crate) fn handle_over(storage: &MemoryStorage) -> SessionHandle {
        let mut store = SessionStore::new(Box::new(storage.clone()));
        store.hydrate();
        SessionHandle::new(Rc::new(RefCell::new(store)), 0, Callback::from(|_| ()))
    }

    fn token(raw: &str) -> SecretString {
        SecretString::from(raw.to_owned())
    }

    #[test]
    fn starts_loading_until_hydrated() {
        let storage = MemoryStorage::default();
        let mut store = SessionStore::new(Box::new(storage));
        assert_eq!(store.status(), SessionStatus::Loading);
        store.hydrate();
        assert_eq!(store.status(), SessionStatus::Anonymous);
    }

    #[test]
    fn reload_restores_exact_session() {
        let storage = MemoryStorage::default();
        let mut store = SessionStore::new(Box::new(storage.clone()));
        store.hydrate();
        store.establish(profile("u1", "asha"), token("T1"));

        let mut reloaded = SessionStore::new(Box::new(storage.clone()));
        reloaded.hydrate();
        assert_eq!(reloaded.status(), SessionStatus::Authenticated);
        assert_eq!(reloaded.session(), store.session());
        assert_eq!(storage.get(TOKEN_KEY).as_deref(), Some("T1"));
    }

    #[test]
    fn logout_clears_memory_and_storage_and_is_idempotent() {
        let storage = MemoryStorage::default();
        let mut store = SessionStore::new(Box::new(storage.clone()));
        store.hydrate();
        store.establish(profile("u1", "asha"), token("T1"));

        store.logout();
        let once = store.session().clone();
        assert_eq!(store.status(), SessionStatus::Anonymous);
        assert!(storage.is_empty());

        store.logout();
        assert_eq!(store.session(), &once);
        assert!(storage.is_empty());
    }

    #[test]
    fn corrupt_profile_is_discarded_on_hydrate() {
        let storage = MemoryStorage::default();
        storage.set(USER_KEY, "{not json");
        storage.set(TOKEN_KEY, "T1");

        let mut store = SessionStore::new(Box::new(storage.clone()));
        store.hydrate();
        assert_eq!(store.status(), SessionStatus::Anonymous);
        assert!(storage.is_empty());
    }

    #[test]
    fn token_without_profile_is_not_a_session() {
        let storage = MemoryStorage::default();
        storage.set(TOKEN_KEY, "T1");

        let mut store = SessionStore::new(Box::new(storage.clone()));
        store.hydrate();
        assert_eq!(store.status(), SessionStatus::Anonymous);
        assert_eq!(storage.get(TOKEN_KEY), None);
    }

    #[test]
    fn handoff_never_pairs_old_profile_with_new_token() {
        let storage = MemoryStorage::default();
        let mut store = SessionStore::new(Box::new(storage.clone()));
        store.hydrate();
        store.establish(profile("old", "old"), token("OLD"));

        store.begin_handoff(token("NEW"));
        assert_eq!(store.session().user, None);
        assert_eq!(storage.get(USER_KEY), None);
        assert_eq!(storage.get(TOKEN_KEY).as_deref(), Some("NEW"));
        assert_eq!(store.status(), SessionStatus::Anonymous);

        store.complete_handoff(profile("new", "new"));
        assert_eq!(store.status(), SessionStatus::Authenticated);
        assert_eq!(store.session().user.as_ref().map(|u| u.id.as_str()), Some("new"));
    }

    #[test]
    fn update_user_rewrites_cached_profile() {
        let storage = MemoryStorage::default();
        let mut store = SessionStore::new(Box::new(storage.clone()));
        store.hydrate();
        store.establish(profile("u1", "asha"), token("T1"));

        store.update_user(profile("u1", "meera"));
        let saved: UserProfile = serde_json::from_str(&storage.get(USER_KEY).unwrap()).unwrap();
        assert_eq!(saved.first_name, "meera");
        assert_eq!(storage.get(TOKEN_KEY).as_deref(), Some("T1"));
    }

    #[test]
    fn handle_clones_share_one_store() {
        let storage = MemoryStorage::default();
        let handle = handle_over(&storage);
        let other = handle.clone();

        handle.establish(profile("u1", "asha"), token("T1"));
        assert!(other.is_authenticated());
        other.logout();
        assert!(!handle.is_authenticated());
    }

    #[test]
    fn token_is_redacted_in_debug_output() {
        let session = Session {
            user: Some(profile("u1", "asha")),
            token: Some(token("super-secret-token")),
        };
        assert!(!format!("{session:?}").contains("super-secret-token"));
    }
}
