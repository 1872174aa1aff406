//! Only [`AuthSession`] writes the stored token; the API layer just reads it.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use log::{debug, info, warn};
use serde::Deserialize;
use yew::prelude::*;

use crate::config::TOKEN_STORAGE_KEY;
use crate::error::AuthError;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Editor,
    #[default]
    #[serde(other)]
    Unknown,
}

impl Role {
    pub fn label(self) -> &'static str {
        match self {
            Role::Admin => "Admin",
            Role::Editor => "Editor",
            Role::Unknown => "User",
        }
    }
}

/// Payload of the access token as issued by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Claims {
    #[serde(default, alias = "_id")]
    pub id: Option<String>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub role: Role,
    /// Expiry, seconds since the Unix epoch.
    #[serde(default)]
    pub exp: Option<i64>,
}

impl Claims {
    pub fn is_expired(&self, now: i64) -> bool {
        self.exp.is_some_and(|exp| exp < now)
    }
}

/// Reads the claims out of a JWT without verifying its signature; the
/// server does that on every request.
pub fn decode_claims(token: &str) -> Result<Claims, AuthError> {
    let segments: Vec<&str> = token.trim().split('.').collect();
    let [_, payload, _] = segments.as_slice() else {
        return Err(AuthError::MalformedToken(format!(
            "expected 3 segments, found {}",
            segments.len()
        )));
    };

    let bytes = URL_SAFE_NO_PAD
        .decode(payload.trim_end_matches('='))
        .map_err(|e| AuthError::MalformedToken(e.to_string()))?;
    serde_json::from_slice(&bytes).map_err(|e| AuthError::MalformedToken(e.to_string()))
}

pub fn now_secs() -> i64 {
    chrono::Utc::now().timestamp()
}

pub trait TokenStore {
    fn load(&self) -> Option<String>;
    fn save(&self, token: &str);
    fn clear(&self);
}

/// Token kept in the browser's local storage.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalTokenStore;

impl TokenStore for LocalTokenStore {
    fn load(&self) -> Option<String> {
        let storage = web_sys::window()?.local_storage().ok()??;
        storage
            .get_item(TOKEN_STORAGE_KEY)
            .ok()
            .flatten()
            .filter(|token| !token.is_empty())
    }

    fn save(&self, token: &str) {
        if let Some(window) = web_sys::window() {
            if let Ok(Some(storage)) = window.local_storage() {
                if storage.set_item(TOKEN_STORAGE_KEY, token).is_err() {
                    warn!("could not persist access token");
                }
            }
        }
    }

    fn clear(&self) {
        if let Some(window) = web_sys::window() {
            if let Ok(Some(storage)) = window.local_storage() {
                let _ = storage.remove_item(TOKEN_STORAGE_KEY);
            }
        }
    }
}

pub struct AuthSession<S: TokenStore> {
    store: S,
    user: Option<Claims>,
}

impl<S: TokenStore> AuthSession<S> {
    /// Restores the session from `store`, discarding a token that no longer
    /// decodes or has expired.
    pub fn hydrate(store: S, now: i64) -> Self {
        let user = match store.load().map(|token| decode_claims(&token)) {
            None => None,
            Some(Ok(claims)) if claims.is_expired(now) => {
                info!("stored session expired, signing out");
                store.clear();
                None
            }
            Some(Ok(claims)) => {
                debug!("restored session for {}", claims.name);
                Some(claims)
            }
            Some(Err(err)) => {
                warn!("discarding stored token: {err}");
                store.clear();
                None
            }
        };
        Self { store, user }
    }

    /// Accepts a freshly issued token. Nothing is persisted when the token is
    /// unusable.
    pub fn login(&mut self, token: &str, now: i64) -> Result<&Claims, AuthError> {
        let claims = decode_claims(token)?;
        if claims.is_expired(now) {
            return Err(AuthError::Expired);
        }
        self.store.save(token);
        info!("signed in as {} ({})", claims.name, claims.role.label());
        Ok(&*self.user.insert(claims))
    }

    pub fn logout(&mut self) {
        self.store.clear();
        self.user = None;
        info!("signed out");
    }

    pub fn current_user(&self) -> Option<&Claims> {
        self.user.as_ref()
    }
}

/// What components see of the session.
#[derive(Clone, PartialEq)]
pub struct AuthContext {
    user: Option<Claims>,
    on_login: Callback<String, Result<Claims, AuthError>>,
    on_logout: Callback<()>,
}

impl AuthContext {
    pub fn current_user(&self) -> Option<&Claims> {
        self.user.as_ref()
    }

    pub fn role(&self) -> Option<Role> {
        self.user.as_ref().map(|user| user.role)
    }

    pub fn is_admin(&self) -> bool {
        self.role() == Some(Role::Admin)
    }

    pub fn login(&self, token: String) -> Result<Claims, AuthError> {
        self.on_login.emit(token)
    }

    pub fn logout(&self) {
        self.on_logout.emit(());
    }
}

#[derive(Properties, PartialEq)]
pub struct AuthProviderProps {
    pub children: Children,
}

#[function_component(AuthProvider)]
pub fn auth_provider(props: &AuthProviderProps) -> Html {
    let session = use_mut_ref(|| AuthSession::hydrate(LocalTokenStore, now_secs()));
    let user = {
        let session = session.clone();
        use_state(move || session.borrow().current_user().cloned())
    };

    let on_login = {
        let session = session.clone();
        let user = user.clone();
        Callback::from(move |token: String| -> Result<Claims, AuthError> {
            let claims = session.borrow_mut().login(&token, now_secs())?.clone();
            user.set(Some(claims.clone()));
            Ok(claims)
        })
    };

    let on_logout = {
        let user = user.clone();
        Callback::from(move |_| {
            session.borrow_mut().logout();
            user.set(None);
        })
    };

    let context = AuthContext {
        user: (*user).clone(),
        on_login,
        on_logout,
    };

    html! {
        <ContextProvider<AuthContext> context={context}>
            { for props.children.iter() }
        </ContextProvider<AuthContext>>
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;

    #[derive(Clone, Default)]
    struct MemoryTokenStore(Rc<RefCell<Option<String>>>);

    impl TokenStore for MemoryTokenStore {
        fn load(&self) -> Option<String> {
            self.0.borrow().clone()
        }

        fn save(&self, token: &str) {
            *self.0.borrow_mut() = Some(token.to_string());
        }

        fn clear(&self) {
            *self.0.borrow_mut() = None;
        }
    }

    fn token(payload: &str) -> String {
        format!(
            "{}.{}.signature",
            URL_SAFE_NO_PAD.encode(r#"{"alg":"HS256","typ":"JWT"}"#),
            URL_SAFE_NO_PAD.encode(payload)
        )
    }

    #[test]
    fn decodes_role_and_name() {
        let claims =
            decode_claims(&token(r#"{"id":"u1","name":"Ravi","role":"editor","exp":2000}"#))
                .unwrap();
        assert_eq!(claims.id.as_deref(), Some("u1"));
        assert_eq!(claims.name, "Ravi");
        assert_eq!(claims.role, Role::Editor);
        assert!(!claims.is_expired(1999));
        assert!(claims.is_expired(2001));
    }

    #[test]
    fn unknown_role_is_not_privileged() {
        let claims = decode_claims(&token(r#"{"name":"x","role":"auditor"}"#)).unwrap();
        assert_eq!(claims.role, Role::Unknown);
        assert!(!claims.is_expired(i64::MAX));
    }

    #[test]
    fn padded_payload_is_accepted() {
        let raw = token(r#"{"name":"a","role":"admin"}"#);
        let mut parts: Vec<String> = raw.split('.').map(str::to_string).collect();
        parts[1].push_str("==");
        assert_eq!(decode_claims(&parts.join(".")).unwrap().role, Role::Admin);
    }

    #[test]
    fn malformed_tokens_are_rejected() {
        assert!(matches!(decode_claims("abc"), Err(AuthError::MalformedToken(_))));
        assert!(matches!(decode_claims("a.!!!.c"), Err(AuthError::MalformedToken(_))));
        let not_json = format!("a.{}.c", URL_SAFE_NO_PAD.encode("hello"));
        assert!(matches!(decode_claims(&not_json), Err(AuthError::MalformedToken(_))));
    }

    #[test]
    fn hydrate_restores_valid_session() {
        let store = MemoryTokenStore::default();
        store.save(&token(r#"{"name":"Asha","role":"admin","exp":500}"#));
        let session = AuthSession::hydrate(store.clone(), 100);
        assert_eq!(session.current_user().map(|u| u.role), Some(Role::Admin));
        assert!(store.load().is_some());
    }

    #[test]
    fn hydrate_drops_expired_and_garbage_tokens() {
        let store = MemoryTokenStore::default();
        store.save(&token(r#"{"name":"Asha","role":"admin","exp":50}"#));
        let session = AuthSession::hydrate(store.clone(), 100);
        assert!(session.current_user().is_none());
        assert!(store.load().is_none());

        store.save("garbage");
        let session = AuthSession::hydrate(store.clone(), 100);
        assert!(session.current_user().is_none());
        assert!(store.load().is_none());
    }

    #[test]
    fn login_persists_and_logout_clears() {
        let store = MemoryTokenStore::default();
        let mut session = AuthSession::hydrate(store.clone(), 0);
        assert!(session.current_user().is_none());

        let issued = token(r#"{"name":"Ravi","role":"editor"}"#);
        assert_eq!(session.login(&issued, 0).unwrap().name, "Ravi");
        assert_eq!(store.load(), Some(issued));

        session.logout();
        assert!(session.current_user().is_none());
        assert!(store.load().is_none());
    }

    #[test]
    fn bad_login_leaves_state_untouched() {
        let store = MemoryTokenStore::default();
        let mut session = AuthSession::hydrate(store.clone(), 10);
        assert!(session.login("nope", 10).is_err());
        let stale = token(r#"{"name":"Old","role":"admin","exp":5}"#);
        assert_eq!(session.login(&stale, 10).unwrap_err(), AuthError::Expired);
        assert!(session.current_user().is_none());
        assert!(store.load().is_none());
    }
}
