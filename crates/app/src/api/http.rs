//! reqwest-backed store API client.

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use tracing::debug;

use tillpoint::{catalog::Product, members::Member, promotions::Promotion};

use crate::{
    api::{
        ApiError, SalesApi, errors,
        models::{NewMember, Transaction, TransactionRequest},
    },
    auth::Session,
};

/// HTTP client for the store API.
#[derive(Debug, Clone)]
pub struct HttpSalesApi {
    base_url: String,
    session: Session,
    http: Client,
}

impl HttpSalesApi {
    /// Create a client for the store API at `base_url`.
    #[must_use]
    pub fn new(base_url: impl Into<String>, session: Session) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }

        Self {
            base_url,
            session,
            http: Client::new(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// Attach the bearer token when the session carries one. Endpoints
    /// reject unauthenticated calls server-side; checkout additionally
    /// pre-checks the session before building a request at all.
    fn authorize(&self, builder: RequestBuilder) -> RequestBuilder {
        match self.session.bearer() {
            Ok(token) => builder.bearer_auth(token),
            Err(_) => builder,
        }
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<T, ApiError> {
        let response = self
            .authorize(self.http.get(self.url(path)).query(query))
            .send()
            .await?;

        Self::decode(path, response).await
    }

    async fn post_json<B: serde::Serialize + Sync, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let response = self
            .authorize(self.http.post(self.url(path)).json(body))
            .send()
            .await?;

        Self::decode(path, response).await
    }

    async fn decode<T: DeserializeOwned>(path: &str, response: Response) -> Result<T, ApiError> {
        let status = response.status();
        let body = response.text().await?;

        debug!(path, %status, "store API response");

        if !status.is_success() {
            return Err(errors::rejection(status, &body));
        }

        serde_json::from_str(&body)
            .map_err(|error| ApiError::UnexpectedResponse(format!("{error} in body: {body}")))
    }
}

#[async_trait]
impl SalesApi for HttpSalesApi {
    async fn search_products(&self, q: &str) -> Result<Vec<Product>, ApiError> {
        self.get_json("/products", &[("q", q)]).await
    }

    async fn product_by_barcode(&self, barcode: &str) -> Result<Vec<Product>, ApiError> {
        self.get_json("/products", &[("barcode", barcode)]).await
    }

    async fn active_promotions(&self) -> Result<Vec<Promotion>, ApiError> {
        self.get_json("/promotions", &[("active_only", "true")]).await
    }

    async fn find_members(&self, q: &str) -> Result<Vec<Member>, ApiError> {
        self.get_json("/members", &[("q", q)]).await
    }

    async fn create_member(&self, member: NewMember) -> Result<Member, ApiError> {
        self.post_json("/members", &member).await
    }

    async fn submit_transaction(
        &self,
        request: TransactionRequest,
    ) -> Result<Transaction, ApiError> {
        self.post_json("/transactions", &request).await
    }
}
