//! Build-time configuration. The backend URL and third-party API keys are
//! injected through the environment when the bundle is built; there is no
//! runtime configuration.

/// Base URL of the REST backend.
pub fn api_base() -> &'static str {
    option_env!("PROREC_API_URL").unwrap_or("http://localhost:5000")
}

/// Base URL of the identity provider.
pub fn auth_base() -> &'static str {
    option_env!("PROREC_AUTH_URL").unwrap_or("https://identitytoolkit.googleapis.com")
}

/// API key sent with every identity-provider call.
pub fn auth_api_key() -> &'static str {
    option_env!("PROREC_AUTH_API_KEY").unwrap_or("")
}

/// One-shot image upload endpoint.
pub fn image_host_url() -> &'static str {
    option_env!("PROREC_IMAGE_HOST_URL").unwrap_or("https://api.imgbb.com/1/upload")
}

pub fn image_host_key() -> &'static str {
    option_env!("PROREC_IMAGE_HOST_KEY").unwrap_or("")
}
