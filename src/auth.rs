//! Identity-provider client and shared session state. The provider exposes
//! an accounts REST surface (sign-up, password sign-in, profile update,
//! token lookup, federated credential exchange); the session is persisted to
//! localStorage and re-verified on startup before `loading` clears.

use gloo_net::http::Request;
use leptos::logging::log;
use leptos::*;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{browser, config};

const SESSION_KEY: &str = "prorec.session";

#[derive(Debug, Error, Clone, PartialEq)]
pub enum AuthError {
    #[error("{0}")]
    Provider(String),
    #[error("request failed: {0}")]
    Network(String),
    #[error("could not decode provider response: {0}")]
    Decode(String),
}

impl From<gloo_net::Error> for AuthError {
    fn from(err: gloo_net::Error) -> Self {
        AuthError::Network(err.to_string())
    }
}

/// The signed-in user as the rest of the app sees it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AuthUser {
    pub uid: String,
    pub email: String,
    pub display_name: String,
    pub photo_url: String,
    pub id_token: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct TokenResponse {
    #[serde(default)]
    local_id: String,
    #[serde(default)]
    email: String,
    #[serde(default)]
    display_name: String,
    #[serde(default)]
    photo_url: String,
    id_token: String,
}

impl From<TokenResponse> for AuthUser {
    fn from(token: TokenResponse) -> Self {
        AuthUser {
            uid: token.local_id,
            email: token.email,
            display_name: token.display_name,
            photo_url: token.photo_url,
            id_token: token.id_token,
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PasswordCredentials<'a> {
    email: &'a str,
    password: &'a str,
    return_secure_token: bool,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ProfileUpdate<'a> {
    id_token: &'a str,
    display_name: &'a str,
    photo_url: &'a str,
    return_secure_token: bool,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct LookupRequest<'a> {
    id_token: &'a str,
}

#[derive(Deserialize)]
struct LookupResponse {
    #[serde(default)]
    users: Vec<LookupUser>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct LookupUser {
    #[serde(default)]
    local_id: String,
    #[serde(default)]
    email: String,
    #[serde(default)]
    display_name: String,
    #[serde(default)]
    photo_url: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct IdpRequest<'a> {
    post_body: String,
    request_uri: &'a str,
    return_secure_token: bool,
    return_idp_credential: bool,
}

#[derive(Deserialize)]
struct ProviderError {
    error: ProviderErrorBody,
}

#[derive(Deserialize)]
struct ProviderErrorBody {
    #[serde(default)]
    message: String,
}

fn endpoint(action: &str) -> String {
    format!(
        "{}/v1/accounts:{}?key={}",
        config::auth_base(),
        action,
        config::auth_api_key()
    )
}

/// The provider reports errors as SCREAMING_SNAKE codes.
fn friendly_message(code: &str) -> String {
    match code {
        "EMAIL_NOT_FOUND" | "INVALID_PASSWORD" | "INVALID_LOGIN_CREDENTIALS" => {
            "Invalid email or password.".into()
        }
        "EMAIL_EXISTS" => "An account with this email already exists.".into(),
        "TOO_MANY_ATTEMPTS_TRY_LATER" => "Too many attempts, please try again later.".into(),
        other => other.replace('_', " ").to_lowercase(),
    }
}

async fn provider_call<B, T>(action: &str, body: &B) -> Result<T, AuthError>
where
    B: Serialize,
    T: DeserializeOwned,
{
    let response = Request::post(&endpoint(action)).json(body)?.send().await?;
    if response.ok() {
        response
            .json::<T>()
            .await
            .map_err(|e| AuthError::Decode(e.to_string()))
    } else {
        let err: ProviderError = response
            .json()
            .await
            .map_err(|e| AuthError::Decode(e.to_string()))?;
        Err(AuthError::Provider(friendly_message(&err.error.message)))
    }
}

async fn lookup(id_token: &str) -> Result<AuthUser, AuthError> {
    let response: LookupResponse = provider_call("lookup", &LookupRequest { id_token }).await?;
    let record = response
        .users
        .into_iter()
        .next()
        .ok_or_else(|| AuthError::Provider("session expired".into()))?;
    Ok(AuthUser {
        uid: record.local_id,
        email: record.email,
        display_name: record.display_name,
        photo_url: record.photo_url,
        id_token: id_token.to_string(),
    })
}

/// Application-wide auth state, created once at the root and handed out
/// through context. Mutated only through the methods below.
#[derive(Clone, Copy)]
pub struct AuthContext {
    pub user: RwSignal<Option<AuthUser>>,
    /// True until the persisted session has been resolved one way or the
    /// other; route guards show a loading view while this holds.
    pub loading: RwSignal<bool>,
}

impl AuthContext {
    pub fn new() -> Self {
        AuthContext {
            user: create_rw_signal(None),
            loading: create_rw_signal(true),
        }
    }

    fn store_session(user: &AuthUser) {
        if let Ok(json) = serde_json::to_string(user) {
            browser::storage_set(SESSION_KEY, &json);
        }
    }

    fn establish(self, user: AuthUser) -> AuthUser {
        Self::store_session(&user);
        self.user.set(Some(user.clone()));
        user
    }

    /// Restores and verifies the persisted session, then completes a
    /// federated redirect if one is pending. Runs once at startup.
    pub async fn restore(self) {
        if let Ok(Some(user)) = self.complete_federated_sign_in().await {
            log!("[AUTH] federated sign-in completed for {}", user.email);
            self.loading.set(false);
            return;
        }

        if let Some(raw) = browser::storage_get(SESSION_KEY) {
            if let Ok(saved) = serde_json::from_str::<AuthUser>(&raw) {
                match lookup(&saved.id_token).await {
                    Ok(fresh) => {
                        self.user.set(Some(fresh));
                        self.loading.set(false);
                        return;
                    }
                    Err(err) => {
                        log!("[AUTH] stored session rejected: {}", err);
                        browser::storage_remove(SESSION_KEY);
                    }
                }
            }
        }
        self.user.set(None);
        self.loading.set(false);
    }

    pub async fn sign_up(self, email: &str, password: &str) -> Result<AuthUser, AuthError> {
        let token: TokenResponse = provider_call(
            "signUp",
            &PasswordCredentials {
                email,
                password,
                return_secure_token: true,
            },
        )
        .await?;
        Ok(self.establish(token.into()))
    }

    /// A failed attempt leaves `user` untouched (still signed out).
    pub async fn sign_in(self, email: &str, password: &str) -> Result<AuthUser, AuthError> {
        let token: TokenResponse = provider_call(
            "signInWithPassword",
            &PasswordCredentials {
                email,
                password,
                return_secure_token: true,
            },
        )
        .await?;
        Ok(self.establish(token.into()))
    }

    /// Updates display name and photo at the provider and mirrors them into
    /// the local session.
    pub async fn update_profile(self, display_name: &str, photo_url: &str) -> Result<(), AuthError> {
        let Some(current) = self.user.get_untracked() else {
            return Err(AuthError::Provider("not signed in".into()));
        };
        let token: TokenResponse = provider_call(
            "update",
            &ProfileUpdate {
                id_token: &current.id_token,
                display_name,
                photo_url,
                return_secure_token: true,
            },
        )
        .await?;

        let id_token = if token.id_token.is_empty() {
            current.id_token.clone()
        } else {
            token.id_token
        };
        self.establish(AuthUser {
            display_name: display_name.to_string(),
            photo_url: photo_url.to_string(),
            id_token,
            ..current
        });
        Ok(())
    }

    pub fn sign_out(self) {
        browser::storage_remove(SESSION_KEY);
        self.user.set(None);
    }

    /// Leaves the SPA for the provider's Google sign-in page; the provider
    /// redirects back with a credential in the URL fragment, picked up by
    /// `restore` on the next load.
    pub fn begin_federated_sign_in(self) {
        let origin = web_sys::window()
            .and_then(|w| w.location().origin().ok())
            .unwrap_or_default();
        let url = format!(
            "{}/v1/oauth/authorize?provider=google.com&key={}&continue={}",
            config::auth_base(),
            config::auth_api_key(),
            urlencoding::encode(&origin)
        );
        browser::navigate_to(&url);
    }

    async fn complete_federated_sign_in(self) -> Result<Option<AuthUser>, AuthError> {
        let Some(fragment) = browser::location_fragment() else {
            return Ok(None);
        };
        let Some(credential) = fragment
            .split('&')
            .find_map(|part| part.strip_prefix("id_token="))
        else {
            return Ok(None);
        };

        let origin = web_sys::window()
            .and_then(|w| w.location().origin().ok())
            .unwrap_or_default();
        let token: TokenResponse = provider_call(
            "signInWithIdp",
            &IdpRequest {
                post_body: format!("id_token={credential}&providerId=google.com"),
                request_uri: &origin,
                return_secure_token: true,
                return_idp_credential: true,
            },
        )
        .await?;
        Ok(Some(self.establish(token.into())))
    }
}

impl Default for AuthContext {
    fn default() -> Self {
        Self::new()
    }
}

pub fn use_auth() -> AuthContext {
    expect_context::<AuthContext>()
}

/// Sign-up password rules, checked client-side before the provider is
/// called. The provider enforces its own minimum as well.
pub fn password_problems(password: &str) -> Vec<&'static str> {
    let mut problems = Vec::new();
    if password.len() < 6 {
        problems.push("Password must be at least 6 characters.");
    }
    if !password.chars().any(|c| c.is_ascii_uppercase()) {
        problems.push("Password must contain an uppercase letter.");
    }
    if !password.chars().any(|c| c.is_ascii_lowercase()) {
        problems.push("Password must contain a lowercase letter.");
    }
    if !password.chars().any(|c| c.is_ascii_digit()) {
        problems.push("Password must contain a digit.");
    }
    if !password.chars().any(|c| !c.is_ascii_alphanumeric()) {
        problems.push("Password must contain a special character.");
    }
    problems
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provider_codes_map_to_readable_messages() {
        assert_eq!(friendly_message("INVALID_PASSWORD"), "Invalid email or password.");
        assert_eq!(friendly_message("EMAIL_NOT_FOUND"), "Invalid email or password.");
        assert_eq!(friendly_message("USER_DISABLED"), "user disabled");
    }

    #[test]
    fn password_rules_catch_each_missing_class() {
        assert!(password_problems("Aa1!xy").is_empty());
        assert!(password_problems("aa1!xy")
            .contains(&"Password must contain an uppercase letter."));
        assert!(password_problems("AA1!XY")
            .contains(&"Password must contain a lowercase letter."));
        assert!(password_problems("Aab!xy").contains(&"Password must contain a digit."));
        assert!(password_problems("Aa1bxy")
            .contains(&"Password must contain a special character."));
        assert!(password_problems("A1!x").contains(&"Password must be at least 6 characters."));
    }
}
