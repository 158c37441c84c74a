use crate::{
    api::{ApiClient, ApiError, AuthResponse, AvatarUpload, LoginRequest, RegisterRequest},
    session::{ProfileUpdate, SessionStore, UserProfile, DEFAULT_AVATAR},
};
use leptos::*;
use serde_json::{Map, Value};

/// What an observer renders from. Rebuilt from the store on every signal.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AuthState {
    pub user: Option<UserProfile>,
    pub is_authenticated: bool,
}

impl AuthState {
    pub fn from_store(store: &SessionStore) -> Self {
        Self {
            user: store.get_user(),
            is_authenticated: store.is_logged_in(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoginOutcome {
    /// The backend has no location for this user yet.
    pub needs_location: bool,
}

#[component]
pub fn AuthProvider(
    #[prop(optional)] store: Option<SessionStore>,
    children: Children,
) -> impl IntoView {
    provide_context(store.unwrap_or_else(SessionStore::browser));
    view! { <>{children()}</> }
}

pub fn use_session_store() -> SessionStore {
    match use_context::<SessionStore>() {
        Some(store) => store,
        None => {
            let store = SessionStore::browser();
            provide_context(store.clone());
            store
        }
    }
}

/// Subscribes the calling component to the session.
///
/// Both the in-process change signal and the cross-tab `storage` event are
/// registered; both registrations are released when the component's
/// reactive owner is cleaned up.
pub fn use_auth() -> ReadSignal<AuthState> {
    let store = use_session_store();
    let (auth, set_auth) = create_signal(AuthState::from_store(&store));
    let refresh = {
        let store = store.clone();
        move || {
            let next = AuthState::from_store(&store);
            if auth.get_untracked() != next {
                set_auth.set(next);
            }
        }
    };
    let observer = store.observe(refresh);
    on_cleanup(move || drop(observer));
    auth
}

pub async fn login_request(
    request: LoginRequest,
    remember: bool,
    api: &ApiClient,
    store: &SessionStore,
) -> Result<LoginOutcome, ApiError> {
    let response = api.login(&request).await?;
    Ok(persist_login(response, remember, store, stored_login_user))
}

/// Google sign-in never offers "remember me"; its tokens are tab-scoped.
pub async fn google_login_request(
    credential: String,
    api: &ApiClient,
    store: &SessionStore,
) -> Result<LoginOutcome, ApiError> {
    let response = api.google_login(&credential).await?;
    Ok(persist_login(response, false, store, |user| {
        serde_json::to_value(profile_from_google(&user))
            .ok()
            .and_then(|value| value.as_object().cloned())
            .unwrap_or_default()
    }))
}

fn persist_login(
    response: AuthResponse,
    remember: bool,
    store: &SessionStore,
    to_profile: impl FnOnce(Map<String, Value>) -> Map<String, Value>,
) -> LoginOutcome {
    if let (Some(access), Some(refresh)) = (&response.access, &response.refresh) {
        store.save_tokens(Some(access), Some(refresh), remember);
    }
    let needs_location = match response.user {
        Some(user) => {
            let has_location = user
                .get("location")
                .and_then(Value::as_str)
                .map(|location| !location.is_empty())
                .unwrap_or(false);
            store.save_user(&to_profile(user));
            !has_location
        }
        None => true,
    };
    LoginOutcome { needs_location }
}

fn stored_login_user(mut user: Map<String, Value>) -> Map<String, Value> {
    let has_avatar = user
        .get("avatar")
        .and_then(Value::as_str)
        .map(|avatar| !avatar.is_empty())
        .unwrap_or(false);
    if !has_avatar {
        user.insert("avatar".into(), Value::from(DEFAULT_AVATAR));
    }
    user
}

/// Maps the Google login payload onto the cached profile shape.
pub fn profile_from_google(user: &Map<String, Value>) -> ProfileUpdate {
    let text = |key: &str| {
        user.get(key)
            .and_then(Value::as_str)
            .filter(|value| !value.is_empty())
            .map(str::to_string)
    };
    ProfileUpdate {
        id: user
            .get("id")
            .and_then(|id| serde_json::from_value(id.clone()).ok()),
        username: text("username").or_else(|| text("name")),
        email: text("email"),
        avatar: Some(
            text("avatar")
                .or_else(|| text("picture"))
                .unwrap_or_else(|| DEFAULT_AVATAR.to_string()),
        ),
        phone: Some(text("phone").unwrap_or_default()),
        location: Some(text("location").unwrap_or_default()),
        ..ProfileUpdate::default()
    }
}

pub fn use_login_action() -> Action<(LoginRequest, bool), Result<LoginOutcome, ApiError>> {
    let store = use_session_store();
    let api = use_context::<ApiClient>().unwrap_or_default();

    create_action(move |(request, remember): &(LoginRequest, bool)| {
        let payload = request.clone();
        let remember = *remember;
        let api = api.clone();
        let store = store.clone();
        async move { login_request(payload, remember, &api, &store).await }
    })
}

pub fn use_google_login_action() -> Action<String, Result<LoginOutcome, ApiError>> {
    let store = use_session_store();
    let api = use_context::<ApiClient>().unwrap_or_default();

    create_action(move |credential: &String| {
        let credential = credential.clone();
        let api = api.clone();
        let store = store.clone();
        async move { google_login_request(credential, &api, &store).await }
    })
}

#[derive(Debug, Clone, PartialEq)]
pub struct RegistrationSubmission {
    pub form: RegisterRequest,
    pub avatar: Option<AvatarUpload>,
}

/// Creates the account. Registering does not sign in: the session is left
/// as it was and the user goes through the login page afterwards.
pub async fn register_request(
    submission: RegistrationSubmission,
    api: &ApiClient,
) -> Result<(), ApiError> {
    if let Some(avatar) = &submission.avatar {
        avatar.validate()?;
    }
    api.register(&submission.form, submission.avatar.as_ref())
        .await
        .map_err(|err| {
            log::error!("Registration error: {}", err);
            err
        })
}

pub fn use_register_action() -> Action<RegistrationSubmission, Result<(), ApiError>> {
    let api = use_context::<ApiClient>().unwrap_or_default();

    create_action(move |submission: &RegistrationSubmission| {
        let submission = submission.clone();
        let api = api.clone();
        async move { register_request(submission, &api).await }
    })
}

/// Clears the local session. The backend keeps no server-side session to
/// revoke; the refresh token simply expires.
pub fn use_logout() -> Callback<()> {
    let store = use_session_store();
    Callback::new(move |_: ()| store.logout())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn as_map(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn google_profile_falls_back_to_name_and_picture() {
        let profile = profile_from_google(&as_map(json!({
            "id": 9,
            "name": "Bella Rose",
            "email": "bella@example.com",
            "picture": "https://lh3.googleusercontent.com/a/b"
        })));
        assert_eq!(profile.username.as_deref(), Some("Bella Rose"));
        assert_eq!(
            profile.avatar.as_deref(),
            Some("https://lh3.googleusercontent.com/a/b")
        );
        assert_eq!(profile.phone.as_deref(), Some(""));
        assert_eq!(profile.location.as_deref(), Some(""));
        assert_eq!(profile.id, Some(crate::session::ProfileId::Number(9)));
    }

    #[test]
    fn google_profile_prefers_backend_fields() {
        let profile = profile_from_google(&as_map(json!({
            "username": "bella",
            "name": "Bella Rose",
            "avatar": "/media/bella.png",
            "picture": "https://lh3.googleusercontent.com/a/b",
            "location": "Goa"
        })));
        assert_eq!(profile.username.as_deref(), Some("bella"));
        assert_eq!(profile.avatar.as_deref(), Some("/media/bella.png"));
        assert_eq!(profile.location.as_deref(), Some("Goa"));
    }

    #[test]
    fn google_profile_defaults_avatar() {
        let profile = profile_from_google(&Map::new());
        assert_eq!(profile.avatar.as_deref(), Some(DEFAULT_AVATAR));
        assert!(profile.username.is_none());
    }

    #[test]
    fn login_user_gets_default_avatar() {
        let user = stored_login_user(as_map(json!({ "username": "a", "avatar": null })));
        assert_eq!(user["avatar"], json!(DEFAULT_AVATAR));
        let user = stored_login_user(as_map(json!({ "avatar": "https://x/y.png" })));
        assert_eq!(user["avatar"], json!("https://x/y.png"));
    }

    #[test]
    fn auth_state_mirrors_store() {
        let store = SessionStore::in_memory("http://host");
        assert_eq!(AuthState::from_store(&store), AuthState::default());

        store.save_user(&json!({ "username": "a" }));
        let state = AuthState::from_store(&store);
        assert!(!state.is_authenticated);
        assert_eq!(state.user.unwrap().username, "a");

        store.save_tokens(Some("tok"), None, false);
        assert!(AuthState::from_store(&store).is_authenticated);
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::session::StorageArea;
    use crate::test_support::ssr::with_runtime;
    use httpmock::prelude::*;
    use serde_json::json;

    #[test]
    fn use_auth_follows_store_changes() {
        with_runtime(|| {
            let store = SessionStore::in_memory("http://host");
            provide_context(store.clone());
            let auth = use_auth();
            assert!(!auth.get_untracked().is_authenticated);

            store.save_tokens(Some("tok"), Some("ref"), true);
            store.save_user(&json!({ "username": "milo" }));
            let snapshot = auth.get_untracked();
            assert!(snapshot.is_authenticated);
            assert_eq!(snapshot.user.unwrap().username, "milo");

            store.logout();
            assert_eq!(auth.get_untracked(), AuthState::default());
        });
    }

    #[test]
    fn use_auth_registers_one_observer() {
        with_runtime(|| {
            let store = SessionStore::in_memory("http://host");
            provide_context(store.clone());
            let _auth = use_auth();
            let _other = use_auth();
            assert_eq!(store.subscriber_count(), 2);
        });
    }

    #[test]
    fn use_session_store_reuses_provided_store() {
        with_runtime(|| {
            let store = SessionStore::in_memory("http://host");
            store.save_tokens(Some("tok"), None, true);
            provide_context(store);
            assert_eq!(use_session_store().get_token().as_deref(), Some("tok"));
        });
    }

    #[tokio::test]
    async fn password_login_writes_through_store() {
        let server = MockServer::start_async().await;
        server.mock(|when, then| {
            when.method(POST).path("/api/login/");
            then.status(200).json_body(json!({
                "access": "acc",
                "refresh": "ref",
                "user": { "id": 1, "username": "milo", "email": "m@example.com" }
            }));
        });
        let api = ApiClient::new_with_base_url(server.url("/api"));
        let store = SessionStore::in_memory("http://host");

        let outcome = login_request(
            LoginRequest {
                email: "m@example.com".into(),
                password: "secret".into(),
            },
            true,
            &api,
            &store,
        )
        .await
        .unwrap();

        assert!(outcome.needs_location);
        assert!(store.is_logged_in());
        assert_eq!(store.get_refresh_token().as_deref(), Some("ref"));
        assert_eq!(
            store.get_user().unwrap().avatar.as_deref(),
            Some("http://host/default-avatar.png")
        );
    }

    #[tokio::test]
    async fn failed_login_leaves_store_untouched() {
        let server = MockServer::start_async().await;
        server.mock(|when, then| {
            when.method(POST).path("/api/login/");
            then.status(400).json_body(json!({}));
        });
        let api = ApiClient::new_with_base_url(server.url("/api"));
        let store = SessionStore::in_memory("http://host");

        let err = login_request(
            LoginRequest {
                email: "m@example.com".into(),
                password: "wrong".into(),
            },
            false,
            &api,
            &store,
        )
        .await
        .unwrap_err();

        assert_eq!(err.error, "Invalid username or password");
        assert!(store.get_token().is_none());
        assert!(store.get_user().is_none());
    }

    #[tokio::test]
    async fn login_with_location_skips_prompt() {
        let server = MockServer::start_async().await;
        server.mock(|when, then| {
            when.method(POST).path("/api/login/");
            then.status(200).json_body(json!({
                "access": "acc",
                "refresh": "ref",
                "user": { "username": "milo", "location": "Pune" }
            }));
        });
        let api = ApiClient::new_with_base_url(server.url("/api"));
        let store = SessionStore::in_memory("http://host");

        let outcome = login_request(
            LoginRequest {
                email: "m@example.com".into(),
                password: "secret".into(),
            },
            false,
            &api,
            &store,
        )
        .await
        .unwrap();
        assert!(!outcome.needs_location);
    }

    #[tokio::test]
    async fn google_login_keeps_tokens_tab_scoped() {
        let server = MockServer::start_async().await;
        server.mock(|when, then| {
            when.method(POST).path("/api/google-login/");
            then.status(200).json_body(json!({
                "access": "acc",
                "refresh": "ref",
                "user": { "id": 2, "name": "Bella", "email": "b@example.com", "picture": "https://g/p.png" }
            }));
        });
        let api = ApiClient::new_with_base_url(server.url("/api"));
        let durable = crate::session::MemoryStorage::new();
        let store = SessionStore::new(
            std::rc::Rc::new(durable.clone()),
            std::rc::Rc::new(crate::session::MemoryStorage::new()),
            "http://host",
        );

        google_login_request("id-token".into(), &api, &store)
            .await
            .unwrap();

        assert!(store.is_logged_in());
        assert!(durable.get_item("access").unwrap().is_none());
        let user = store.get_user().unwrap();
        assert_eq!(user.username, "Bella");
        assert_eq!(user.avatar.as_deref(), Some("https://g/p.png"));
    }

    fn registration(avatar: Option<AvatarUpload>) -> RegistrationSubmission {
        RegistrationSubmission {
            form: RegisterRequest {
                username: "milo".into(),
                email: "milo@example.com".into(),
                password: "secret123".into(),
                password2: "secret123".into(),
                address: "Pune".into(),
            },
            avatar,
        }
    }

    #[tokio::test]
    async fn registration_surfaces_backend_field_errors() {
        let server = MockServer::start_async().await;
        let mock = server.mock(|when, then| {
            when.method(POST).path("/api/register/");
            then.status(400)
                .json_body(json!({ "password": ["This password is too short."] }));
        });
        let api = ApiClient::new_with_base_url(server.url("/api"));

        let err = register_request(registration(None), &api).await.unwrap_err();

        mock.assert();
        assert_eq!(err.error, crate::api::REGISTRATION_FAILED);
        assert_eq!(
            err.errors_for("password"),
            vec!["This password is too short.".to_string()]
        );
    }

    #[tokio::test]
    async fn oversized_avatar_is_rejected_before_sending() {
        let server = MockServer::start_async().await;
        let mock = server.mock(|when, then| {
            when.method(POST).path("/api/register/");
            then.status(201);
        });
        let api = ApiClient::new_with_base_url(server.url("/api"));
        let avatar = AvatarUpload {
            file_name: "huge.png".into(),
            mime: "image/png".into(),
            bytes: vec![0; crate::api::MAX_AVATAR_BYTES + 1],
        };

        let err = register_request(registration(Some(avatar)), &api)
            .await
            .unwrap_err();

        assert_eq!(err.code, "VALIDATION_ERROR");
        assert_eq!(mock.hits(), 0);
    }
}
