// Communication with the remote task service
// Philosophy of CRUD lives here, one HTTP round trip per call
use std::marker::PhantomData;

use derivative::Derivative;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::app::error::ApiError;

// HTTP client for one REST resource. `T` is the item shape the resource serves.
#[derive(Derivative)]
#[derivative(Debug, Clone(bound = ""))]
pub struct ResourceClient<T> {
    base_url: String,
    #[derivative(Debug = "ignore")]
    http: Client,
    #[derivative(Debug = "ignore")]
    _item: PhantomData<fn() -> T>,
}

impl<T> ResourceClient<T>
where
    T: Serialize + DeserializeOwned,
{
    pub fn new(base_url: impl Into<String>) -> ResourceClient<T> {
        let base_url: String = base_url.into();
        ResourceClient {
            base_url: base_url.trim_end_matches('/').to_string(),
            http: Client::new(),
            _item: PhantomData,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn item_url(&self, id: i64) -> String {
        format!("{}/{}", self.base_url, id)
    }

    // READ (all)
    pub async fn list_all(&self) -> Result<Vec<T>, ApiError> {
        let response = self.http.get(&self.base_url).send().await?;
        let response = ensure_success(response, "list")?;
        decode(response).await
    }

    // READ (one). The UI always reloads the whole list, so only the tests fetch single items.
    #[cfg_attr(not(test), allow(dead_code))]
    pub async fn get_by_id(&self, id: i64) -> Result<T, ApiError> {
        let response = self.http.get(self.item_url(id)).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::NotFound { id, status });
        }
        decode(response).await
    }

    // CREATE
    pub async fn create(&self, item: &T) -> Result<T, ApiError> {
        let response = self.http.post(&self.base_url).json(item).send().await?;
        let response = ensure_success(response, "create")?;
        decode(response).await
    }

    // UPDATE, partial: only the fields present in `changes` are sent
    pub async fn update<P>(&self, id: i64, changes: &P) -> Result<T, ApiError>
    where
        P: Serialize + ?Sized,
    {
        let response = self
            .http
            .patch(self.item_url(id))
            .json(changes)
            .send()
            .await?;
        let response = ensure_success(response, "update")?;
        decode(response).await
    }

    // DELETE
    pub async fn delete(&self, id: i64) -> Result<(), ApiError> {
        let response = self.http.delete(self.item_url(id)).send().await?;
        ensure_success(response, "delete")?;
        Ok(())
    }
}

fn ensure_success(response: Response, operation: &'static str) -> Result<Response, ApiError> {
    let status = response.status();
    if status.is_success() {
        Ok(response)
    } else {
        Err(ApiError::RequestFailed { operation, status })
    }
}

async fn decode<R: DeserializeOwned>(response: Response) -> Result<R, ApiError> {
    let body = response.bytes().await?;
    Ok(serde_json::from_slice(&body)?)
}
