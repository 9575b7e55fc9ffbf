#[cfg(test)]
use std::cell::RefCell;

use crate::api::{AuthGateway, LoginRequest, SignupRequest, LOGIN_OK, SIGNUP_OK};
use crate::error::AuthError;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Session {
    pub authenticated: bool,
    pub token: Option<String>,
}

impl Session {
    /// Any stored, non-empty token counts as a live session. It is not checked
    /// against the server.
    pub fn restore(store: &dyn TokenStore) -> Self {
        match store.load().filter(|t| !t.is_empty()) {
            Some(token) => Self {
                authenticated: true,
                token: Some(token),
            },
            None => Self::default(),
        }
    }

    pub fn signed_in(token: String) -> Self {
        Self {
            authenticated: true,
            token: Some(token),
        }
    }
}

/// Where the bearer token lives between page loads.
pub trait TokenStore {
    fn load(&self) -> Option<String>;
    fn save(&self, token: &str) -> Result<(), AuthError>;
    fn clear(&self) -> Result<(), AuthError>;
}

/// Browser `localStorage` under a single key.
pub struct LocalTokenStore {
    key: String,
}

impl LocalTokenStore {
    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }

    fn storage(&self) -> Result<web_sys::Storage, AuthError> {
        web_sys::window()
            .and_then(|window| window.local_storage().ok().flatten())
            .ok_or_else(|| AuthError::Storage("localStorage is unavailable".to_string()))
    }
}

impl TokenStore for LocalTokenStore {
    fn load(&self) -> Option<String> {
        self.storage().ok()?.get_item(&self.key).ok().flatten()
    }

    fn save(&self, token: &str) -> Result<(), AuthError> {
        self.storage()?
            .set_item(&self.key, token)
            .map_err(|e| AuthError::Storage(format!("{:?}", e)))
    }

    fn clear(&self) -> Result<(), AuthError> {
        self.storage()?
            .remove_item(&self.key)
            .map_err(|e| AuthError::Storage(format!("{:?}", e)))
    }
}

#[cfg(test)]
#[derive(Default)]
pub struct MemoryTokenStore {
    token: RefCell<Option<String>>,
}

#[cfg(test)]
impl MemoryTokenStore {
    pub fn with_token(token: &str) -> Self {
        Self {
            token: RefCell::new(Some(token.to_string())),
        }
    }
}

#[cfg(test)]
impl TokenStore for MemoryTokenStore {
    fn load(&self) -> Option<String> {
        self.token.borrow().clone()
    }

    fn save(&self, token: &str) -> Result<(), AuthError> {
        *self.token.borrow_mut() = Some(token.to_string());
        Ok(())
    }

    fn clear(&self) -> Result<(), AuthError> {
        *self.token.borrow_mut() = None;
        Ok(())
    }
}

pub async fn login(
    gateway: &dyn AuthGateway,
    store: &dyn TokenStore,
    request: &LoginRequest,
) -> Result<String, AuthError> {
    let reply = gateway.login(request).await.map_err(|e| {
        log::error!("Error logging in: {:?}", e);
        e
    })?;
    let token = reply.into_token(LOGIN_OK).map_err(|e| {
        log::warn!("login refused: {}", e);
        e
    })?;
    store.save(&token)?;
    log::info!("logged in");
    Ok(token)
}

/// Creates the account and signs in with the token it returns.
pub async fn signup(
    gateway: &dyn AuthGateway,
    store: &dyn TokenStore,
    request: &SignupRequest,
) -> Result<String, AuthError> {
    let reply = gateway.signup(request).await.map_err(|e| {
        log::error!("Error signing up: {:?}", e);
        e
    })?;
    let token = reply.into_token(SIGNUP_OK).map_err(|e| {
        log::warn!("signup refused: {}", e);
        e
    })?;
    store.save(&token)?;
    log::info!("account created");
    Ok(token)
}

pub fn logout(store: &dyn TokenStore) {
    if let Err(e) = store.clear() {
        log::warn!("could not remove stored token: {}", e);
    }
    log::info!("logged out");
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::api::{AuthBody, GatewayReply};
    use async_trait::async_trait;
    use std::cell::Cell;

    /// Replays one canned reply for either endpoint and counts calls.
    pub(crate) struct FakeGateway {
        pub reply: Result<GatewayReply, AuthError>,
        pub calls: Cell<usize>,
    }

    impl FakeGateway {
        pub fn replying(status: u16, token: Option<&str>, message: Option<&str>) -> Self {
            Self {
                reply: Ok(GatewayReply {
                    status,
                    body: AuthBody {
                        token: token.map(str::to_string),
                        message: message.map(str::to_string),
                    },
                }),
                calls: Cell::new(0),
            }
        }

        pub fn unreachable() -> Self {
            Self {
                reply: Err(AuthError::Transport("connection refused".into())),
                calls: Cell::new(0),
            }
        }
    }

    #[async_trait(?Send)]
    impl AuthGateway for FakeGateway {
        async fn login(&self, _request: &LoginRequest) -> Result<GatewayReply, AuthError> {
            self.calls.set(self.calls.get() + 1);
            self.reply.clone()
        }

        async fn signup(&self, _request: &SignupRequest) -> Result<GatewayReply, AuthError> {
            self.calls.set(self.calls.get() + 1);
            self.reply.clone()
        }
    }

    fn credentials() -> LoginRequest {
        LoginRequest {
            username: "asha".into(),
            password: "hunter22".into(),
        }
    }

    #[test]
    fn restore_trusts_a_stored_token() {
        let session = Session::restore(&MemoryTokenStore::with_token("abc"));
        assert!(session.authenticated);
        assert_eq!(session.token.as_deref(), Some("abc"));
    }

    #[test]
    fn restore_without_token_is_signed_out() {
        assert_eq!(
            Session::restore(&MemoryTokenStore::default()),
            Session::default()
        );
        assert_eq!(
            Session::restore(&MemoryTokenStore::with_token("")),
            Session::default()
        );
    }

    #[tokio::test]
    async fn login_persists_token() {
        let gateway = FakeGateway::replying(200, Some("abc"), None);
        let store = MemoryTokenStore::default();

        let token = login(&gateway, &store, &credentials()).await.unwrap();
        assert_eq!(token, "abc");
        assert_eq!(gateway.calls.get(), 1);
        assert_eq!(store.load().as_deref(), Some("abc"));
    }

    #[tokio::test]
    async fn rejected_login_surfaces_message_and_stores_nothing() {
        let gateway = FakeGateway::replying(400, None, Some("Invalid credentials"));
        let store = MemoryTokenStore::default();

        let err = login(&gateway, &store, &credentials()).await.unwrap_err();
        assert_eq!(err.to_string(), "Invalid credentials");
        assert_eq!(store.load(), None);
    }

    #[tokio::test]
    async fn transport_failure_is_reported_not_raised() {
        let gateway = FakeGateway::unreachable();
        let store = MemoryTokenStore::default();

        let err = login(&gateway, &store, &credentials()).await.unwrap_err();
        assert!(matches!(err, AuthError::Transport(_)));
        assert_eq!(err.to_string(), "Network error");
        assert_eq!(store.load(), None);
    }

    #[tokio::test]
    async fn signup_expects_created() {
        let store = MemoryTokenStore::default();
        let request = SignupRequest {
            username: "asha".into(),
            password: "hunter22".into(),
            ..Default::default()
        };

        let ok = FakeGateway::replying(201, Some("fresh"), None);
        assert_eq!(signup(&ok, &store, &request).await, Ok("fresh".to_string()));
        assert_eq!(store.load().as_deref(), Some("fresh"));

        let store = MemoryTokenStore::default();
        let wrong_status = FakeGateway::replying(200, Some("fresh"), None);
        assert!(signup(&wrong_status, &store, &request).await.is_err());
        assert_eq!(store.load(), None);
    }

    struct CapturingLogger;

    static CAPTURED: std::sync::Mutex<Vec<String>> = std::sync::Mutex::new(Vec::new());
    static CAPTURING: CapturingLogger = CapturingLogger;

    impl log::Log for CapturingLogger {
        fn enabled(&self, _metadata: &log::Metadata) -> bool {
            true
        }

        fn log(&self, record: &log::Record) {
            CAPTURED.lock().unwrap().push(record.args().to_string());
        }

        fn flush(&self) {}
    }

    #[tokio::test]
    async fn auth_logs_leave_out_the_username() {
        let _ = log::set_logger(&CAPTURING);
        log::set_max_level(log::LevelFilter::Trace);

        let request = LoginRequest {
            username: "quiet-user-7".into(),
            password: "hunter22".into(),
        };
        let store = MemoryTokenStore::default();
        let ok = FakeGateway::replying(200, Some("abc"), None);
        login(&ok, &store, &request).await.unwrap();
        let refused = FakeGateway::replying(401, None, Some("Invalid credentials"));
        login(&refused, &store, &request).await.unwrap_err();

        let signup_request = SignupRequest {
            username: "quiet-user-7".into(),
            password: "hunter22".into(),
            ..Default::default()
        };
        let created = FakeGateway::replying(201, Some("fresh"), None);
        signup(&created, &store, &signup_request).await.unwrap();

        let lines = CAPTURED.lock().unwrap();
        assert!(lines.iter().any(|l| l.contains("logged in")));
        assert!(lines.iter().all(|l| !l.contains("quiet-user-7")));
    }

    #[test]
    fn logout_clears_stored_token() {
        let store = MemoryTokenStore::with_token("abc");
        logout(&store);
        assert_eq!(store.load(), None);
    }
}
