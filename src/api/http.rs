use async_trait::async_trait;
use reqwest::{RequestBuilder, Response, StatusCode};
use serde_json::Value;

use crate::config::ApiConfig;
use crate::errors::{AppError, AppResult};
use crate::models::{LoginRequest, LoginResponse, Order, OrderStatus, OrderStatusUpdateRequest};

use super::OrderApi;

const FETCH_ORDER_FAILED: &str = "Ошибка при загрузке деталей заказа";
const UPDATE_STATUS_FAILED: &str = "Ошибка при обновлении статуса заказа";
const LOGIN_FAILED: &str = "Ошибка при входе";
const INVALID_CREDENTIALS: &str = "Неверный email или пароль";

/// REST client for the Troika API
#[derive(Debug, Clone)]
pub struct HttpOrderApi {
    client: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl HttpOrderApi {
    pub fn new(config: &ApiConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            token: config.token.clone(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    /// Exchange staff credentials for an access token
    pub async fn login(&self, email: &str, password: &str) -> AppResult<String> {
        let payload = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };

        let response = self
            .client
            .post(self.url("/auth/staff/login"))
            .json(&payload)
            .send()
            .await
            .map_err(|err| transport_failure(err, LOGIN_FAILED))?;

        if response.status() == StatusCode::UNAUTHORIZED {
            let reason = failure_reason(response).await;
            return Err(AppError::unauthorized(reason.unwrap_or_else(|| INVALID_CREDENTIALS.to_string())));
        }
        if !response.status().is_success() {
            return Err(remote_failure(response, LOGIN_FAILED).await);
        }

        let body: LoginResponse = response
            .json()
            .await
            .map_err(|err| transport_failure(err, LOGIN_FAILED))?;
        Ok(body.token)
    }
}

#[async_trait]
impl OrderApi for HttpOrderApi {
    async fn get_order(&self, order_id: i64) -> AppResult<Order> {
        tracing::debug!(order_id, "fetching order");

        let response = self
            .authorized(self.client.get(self.url(&format!("/orders/{order_id}"))))
            .send()
            .await
            .map_err(|err| transport_failure(err, FETCH_ORDER_FAILED))?;

        if !response.status().is_success() {
            return Err(remote_failure(response, FETCH_ORDER_FAILED).await);
        }

        response
            .json::<Order>()
            .await
            .map_err(|err| transport_failure(err, FETCH_ORDER_FAILED))
    }

    async fn update_order_status(&self, order_id: i64, status: OrderStatus) -> AppResult<()> {
        tracing::debug!(order_id, status = %status, "updating order status");

        let response = self
            .authorized(self.client.put(self.url(&format!("/orders/{order_id}/status"))))
            .json(&OrderStatusUpdateRequest { status })
            .send()
            .await
            .map_err(|err| transport_failure(err, UPDATE_STATUS_FAILED))?;

        if !response.status().is_success() {
            return Err(remote_failure(response, UPDATE_STATUS_FAILED).await);
        }

        Ok(())
    }
}

fn transport_failure(err: reqwest::Error, fallback: &str) -> AppError {
    tracing::warn!(error = %err, "request to api failed");
    AppError::remote(fallback)
}

async fn remote_failure(response: Response, fallback: &str) -> AppError {
    let status = response.status();
    let reason = failure_reason(response).await;
    tracing::warn!(status = %status, reason = ?reason, "api rejected request");
    AppError::remote(reason.unwrap_or_else(|| fallback.to_string()))
}

/// Pull the human-readable message out of an error body: `message` or `data.message`.
async fn failure_reason(response: Response) -> Option<String> {
    let body: Value = response.json().await.ok()?;
    body.get("message")
        .or_else(|| body.pointer("/data/message"))
        .and_then(Value::as_str)
        .filter(|message| !message.is_empty())
        .map(str::to_string)
}
