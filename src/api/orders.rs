use reqwest::Method;
use uuid::Uuid;

use super::endpoint;
use super::mapping::{order_registration, order_update};
use super::wire::WireOrder;
use crate::error::Result;
use crate::models::{Order, OrderRequest};
use crate::transport::AuthenticatedClient;

/// Order endpoints of the tracking API.
#[derive(Debug, Clone)]
pub struct OrdersApi {
    client: AuthenticatedClient,
    base_url: String,
}

impl OrdersApi {
    pub fn new(client: AuthenticatedClient, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    /// Register the order itself. Parcels in `request` are not sent here.
    pub async fn create(
        &self,
        request: &OrderRequest,
        market_id: Option<Uuid>,
        eshop_id: Option<Uuid>,
    ) -> Result<Order> {
        let body = order_registration(request, market_id, eshop_id);
        let url = endpoint(&self.base_url, "/v1/order")?;
        let order: WireOrder = self
            .client
            .send_json(Method::POST, url, Some(&body), "create order")
            .await?;
        Ok(order.into())
    }

    pub async fn get(&self, order_id: Uuid) -> Result<Order> {
        let url = endpoint(&self.base_url, &format!("/v1/order/{order_id}"))?;
        let order: WireOrder = self
            .client
            .send_json::<(), _>(Method::GET, url, None, "get order")
            .await?;
        Ok(order.into())
    }

    pub async fn update(&self, order_id: Uuid, request: &OrderRequest) -> Result<Order> {
        let body = order_update(request);
        let url = endpoint(&self.base_url, &format!("/v1/order/{order_id}"))?;
        let order: WireOrder = self
            .client
            .send_json(Method::PUT, url, Some(&body), "update order")
            .await?;
        Ok(order.into())
    }

    pub async fn cancel(&self, order_id: Uuid) -> Result<Order> {
        let url = endpoint(&self.base_url, &format!("/v1/order/{order_id}/cancel"))?;
        let order: WireOrder = self
            .client
            .send_json::<(), _>(Method::POST, url, None, "cancel order")
            .await?;
        Ok(order.into())
    }
}
