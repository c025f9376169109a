//! One-shot multipart image upload to the image host. Returns the public
//! URL used in query/recommendation/profile records.

use gloo_net::http::Request;
use serde::Deserialize;

use crate::api::ApiError;
use crate::config;

#[derive(Deserialize)]
struct UploadResponse {
    data: UploadData,
    #[serde(default)]
    success: bool,
}

#[derive(Deserialize)]
struct UploadData {
    url: String,
}

pub async fn upload_image(file: &web_sys::File) -> Result<String, ApiError> {
    let form = web_sys::FormData::new()
        .map_err(|_| ApiError::Network("could not build form data".into()))?;
    form.append_with_blob("image", file)
        .map_err(|_| ApiError::Network("could not attach the file".into()))?;

    let url = format!("{}?key={}", config::image_host_url(), config::image_host_key());
    let response = Request::post(&url).body(form)?.send().await?;
    if !response.ok() {
        return Err(ApiError::Http(response.status()));
    }
    let parsed: UploadResponse = response
        .json()
        .await
        .map_err(|e| ApiError::Decode(e.to_string()))?;
    if !parsed.success {
        return Err(ApiError::Network("image host rejected the upload".into()));
    }
    Ok(parsed.data.url)
}
