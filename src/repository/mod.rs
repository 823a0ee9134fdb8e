//! Repository layer for remote API operations
//!
//! One [`Repository`] wraps the HTTP client, the service root URL and the
//! session store; per-resource methods live in the submodules as
//! `impl Repository` blocks.

pub mod auth;
pub mod dashboard;
pub mod drivers;
pub mod history;
pub mod insurance;
pub mod patients;
pub mod schedules;
pub mod trips;
pub mod users;

use reqwest::{Client, Method, RequestBuilder};
use serde::{de::DeserializeOwned, Serialize};

use crate::{
    config::ApiConfig,
    error::{AppError, AppResult},
    services::session::SessionStore,
};

/// Main repository struct holding the HTTP client
#[derive(Clone)]
pub struct Repository {
    client: Client,
    base_url: String,
    session: SessionStore,
}

impl Repository {
    /// Create a new repository for the configured service
    pub fn new(config: &ApiConfig, session: SessionStore) -> AppResult<Self> {
        let client = Client::builder().timeout(config.timeout()).build()?;
        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            session,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Request builder with the bearer token attached when logged in
    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let builder = self.client.request(method, self.url(path));
        match self.session.token() {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    /// Send and return the raw body of a successful response
    async fn send(&self, builder: RequestBuilder, method: &Method, path: &str) -> AppResult<String> {
        tracing::debug!("{} {}", method, path);
        let response = builder.send().await.map_err(|e| {
            tracing::warn!("{} {} failed: {}", method, path, e);
            AppError::from(e)
        })?;

        let status = response.status();
        let body = response.text().await?;
        if status.is_success() {
            return Ok(body);
        }

        let error = AppError::from_response(status, &body);
        tracing::warn!("{} {} -> {}: {}", method, path, status.as_u16(), error);
        Err(error)
    }

    async fn send_json<T: DeserializeOwned>(
        &self,
        builder: RequestBuilder,
        method: Method,
        path: &str,
    ) -> AppResult<T> {
        let body = self.send(builder, &method, path).await?;
        serde_json::from_str(&body).map_err(|e| {
            tracing::warn!("{} {}: unexpected response body: {}", method, path, e);
            AppError::Decode(format!("{} {}: {}", method, path, e))
        })
    }

    pub(crate) async fn get<T: DeserializeOwned>(&self, path: &str) -> AppResult<T> {
        self.send_json(self.request(Method::GET, path), Method::GET, path).await
    }

    pub(crate) async fn get_query<T, Q>(&self, path: &str, query: &Q) -> AppResult<T>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        let builder = self.request(Method::GET, path).query(query);
        self.send_json(builder, Method::GET, path).await
    }

    pub(crate) async fn post<T, B>(&self, path: &str, body: &B) -> AppResult<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let builder = self.request(Method::POST, path).json(body);
        self.send_json(builder, Method::POST, path).await
    }

    pub(crate) async fn put<T, B>(&self, path: &str, body: &B) -> AppResult<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let builder = self.request(Method::PUT, path).json(body);
        self.send_json(builder, Method::PUT, path).await
    }

    /// PUT whose response body is ignored
    pub(crate) async fn put_unit<B>(&self, path: &str, body: &B) -> AppResult<()>
    where
        B: Serialize + ?Sized,
    {
        let builder = self.request(Method::PUT, path).json(body);
        self.send(builder, &Method::PUT, path).await?;
        Ok(())
    }

    /// Active flag toggle shared by every soft-deletable resource
    pub(crate) async fn toggle(&self, path: &str) -> AppResult<()> {
        self.put_unit(path, &serde_json::json!({})).await
    }

    pub(crate) async fn delete(&self, path: &str) -> AppResult<()> {
        self.send(self.request(Method::DELETE, path), &Method::DELETE, path).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn repository(base_url: &str) -> Repository {
        let config = ApiConfig {
            base_url: base_url.to_string(),
            timeout_secs: 5,
        };
        Repository::new(&config, SessionStore::in_memory()).unwrap()
    }

    #[test]
    fn test_url_joining() {
        let repo = repository("http://localhost:8080/");
        assert_eq!(repo.base_url(), "http://localhost:8080");
        assert_eq!(repo.url("/traslados/activos"), "http://localhost:8080/traslados/activos");
        assert_eq!(repo.url("agendas"), "http://localhost:8080/agendas");
    }

    #[tokio::test]
    async fn test_unreachable_service_is_transport_error() {
        // Port 9 (discard) is not expected to serve HTTP
        let repo = repository("http://127.0.0.1:9");
        let result: AppResult<serde_json::Value> = repo.get("/traslados").await;
        assert!(matches!(result, Err(AppError::Transport(_))));
    }
}
