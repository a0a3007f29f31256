//! `SirestClient`: typed access to the backend resources
//!
//! Resource methods live in [`crate::api`], one module per resource. Each
//! unpacks the `{ success, <resource>: payload }` envelope.

use crate::config::ClientConfig;
use crate::error::ClientResult;
use crate::http::{HttpClient, NetworkHttpClient};
use crate::session::Session;
use serde::Serialize;
use serde::de::DeserializeOwned;
use shared::response::Envelope;
use std::sync::Arc;

/// Backend client, cheap to clone
#[derive(Debug)]
pub struct SirestClient<C: HttpClient = NetworkHttpClient> {
    http: Arc<C>,
}

impl<C: HttpClient> Clone for SirestClient<C> {
    fn clone(&self) -> Self {
        Self {
            http: Arc::clone(&self.http),
        }
    }
}

impl SirestClient<NetworkHttpClient> {
    pub fn new(config: ClientConfig) -> ClientResult<Self> {
        Ok(Self::with_http(NetworkHttpClient::new(config)?))
    }

    /// Build from `SIREST_*` environment variables
    pub fn from_env() -> ClientResult<Self> {
        Self::new(ClientConfig::from_env())
    }
}

impl<C: HttpClient> SirestClient<C> {
    pub fn with_http(http: C) -> Self {
        Self {
            http: Arc::new(http),
        }
    }

    pub fn http(&self) -> &Arc<C> {
        &self.http
    }

    /// GET `endpoint` and take `field` from the envelope
    pub(crate) async fn fetch<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        field: &str,
        session: Option<&Session>,
    ) -> ClientResult<T> {
        let env: Envelope = self.http.get(endpoint, session).await?;
        Ok(env.take(field)?)
    }

    /// GET `endpoint`; a null `field` yields `T::default()`, a missing one is an error
    pub(crate) async fn fetch_or_default<T: DeserializeOwned + Default>(
        &self,
        endpoint: &str,
        field: &str,
        session: Option<&Session>,
    ) -> ClientResult<T> {
        let env: Envelope = self.http.get(endpoint, session).await?;
        Ok(env.take_or_default(field)?)
    }

    pub(crate) async fn post_for<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        endpoint: &str,
        field: &str,
        body: &B,
        session: Option<&Session>,
    ) -> ClientResult<T> {
        let env: Envelope = self.http.post(endpoint, body, session).await?;
        Ok(env.take(field)?)
    }

    pub(crate) async fn put_for<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        endpoint: &str,
        field: &str,
        body: &B,
        session: Option<&Session>,
    ) -> ClientResult<T> {
        let env: Envelope = self.http.put(endpoint, body, session).await?;
        Ok(env.take(field)?)
    }

    /// POST and only check `success`
    pub(crate) async fn post_unit<B: Serialize + Sync>(
        &self,
        endpoint: &str,
        body: &B,
        session: Option<&Session>,
    ) -> ClientResult<()> {
        let env: Envelope = self.http.post(endpoint, body, session).await?;
        env.ensure_success()?;
        Ok(())
    }
}
