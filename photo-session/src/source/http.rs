use super::SourceError;
use serde::de::DeserializeOwned;

pub(crate) fn build_client(timeout_secs: u64) -> Result<reqwest::Client, SourceError> {
    reqwest::Client::builder()
        .timeout(std::time::Duration::from_secs(timeout_secs))
        .connect_timeout(std::time::Duration::from_secs(10))
        .tcp_keepalive(std::time::Duration::from_secs(30))
        .user_agent("PhotoSession/0.1.0")
        .build()
        .map_err(|e| SourceError::NetworkError(format!("Client build failed: {}", e)))
}

/// GET `url` and decode the JSON body
pub(crate) async fn get_json<T: DeserializeOwned>(
    client: &reqwest::Client,
    url: &str,
) -> Result<T, SourceError> {
    let response = client
        .get(url)
        .header("Accept", "application/json")
        .send()
        .await
        .map_err(|e| SourceError::NetworkError(format!("Request to {} failed: {}", url, e)))?;

    if !response.status().is_success() {
        return Err(SourceError::ServerError(format!(
            "{} returned status: {}",
            url,
            response.status()
        )));
    }

    response
        .json::<T>()
        .await
        .map_err(|e| SourceError::JsonError(format!("Failed to parse response: {}", e)))
}
