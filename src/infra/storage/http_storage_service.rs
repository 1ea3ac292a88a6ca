use crate::domain::ports::StorageService;
use crate::error::AppError;
use async_trait::async_trait;
use reqwest::Client;
use tracing::error;

/// Client for the hosted object store. Objects live under opaque keys; the
/// public read URL is `{public_base}/{key}` and is assembled by callers.
pub struct HttpStorageService {
    client: Client,
    api_url: String,
    api_key: String,
}

impl HttpStorageService {
    pub fn new(api_url: String, api_key: String) -> Self {
        Self {
            client: Client::new(),
            api_url,
            api_key,
        }
    }
}

#[async_trait]
impl StorageService for HttpStorageService {
    async fn upload(&self, key: &str, data: &[u8], content_type: &str) -> Result<(), AppError> {
        let res = self.client.post(format!("{}/{}", self.api_url, key))
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", content_type.to_string())
            .body(data.to_vec())
            .send()
            .await
            .map_err(|e| {
                let msg = format!("Storage service connection error: {}", e);
                error!("{}", msg);
                AppError::InternalWithMsg(msg)
            })?;

        if !res.status().is_success() {
            let status = res.status();
            let text = res.text().await.unwrap_or_default();
            let msg = format!("Storage upload failed. Status: {}, Body: {}", status, text);
            error!("{}", msg);
            return Err(AppError::InternalWithMsg(msg));
        }

        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), AppError> {
        let res = self.client.delete(format!("{}/{}", self.api_url, key))
            .header("Authorization", format!("Bearer {}", self.api_key))
            .send()
            .await
            .map_err(|e| {
                let msg = format!("Storage service connection error: {}", e);
                error!("{}", msg);
                AppError::InternalWithMsg(msg)
            })?;

        if !res.status().is_success() {
            let status = res.status();
            let text = res.text().await.unwrap_or_default();
            let msg = format!("Storage delete failed. Status: {}, Body: {}", status, text);
            error!("{}", msg);
            return Err(AppError::InternalWithMsg(msg));
        }

        Ok(())
    }
}
