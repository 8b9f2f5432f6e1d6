use reqwest::Method;
use uuid::Uuid;

use super::endpoint;
use super::mapping::{parcel_registration, parcel_state_update, parcel_update};
use super::wire::WireParcel;
use crate::error::Result;
use crate::models::{DeliveryState, Parcel, ParcelRequest};
use crate::transport::AuthenticatedClient;

/// Parcel endpoints of the tracking API.
#[derive(Debug, Clone)]
pub struct ParcelsApi {
    client: AuthenticatedClient,
    base_url: String,
}

impl ParcelsApi {
    pub fn new(client: AuthenticatedClient, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    fn parcel_url(&self, order_id: Uuid, parcel_id: Uuid, suffix: &str) -> Result<reqwest::Url> {
        endpoint(
            &self.base_url,
            &format!("/v1/order/{order_id}/parcel/{parcel_id}{suffix}"),
        )
    }

    pub async fn create(&self, order_id: Uuid, request: &ParcelRequest) -> Result<Parcel> {
        let body = parcel_registration(request);
        let url = endpoint(&self.base_url, &format!("/v1/order/{order_id}/parcel"))?;
        let parcel: WireParcel = self
            .client
            .send_json(Method::POST, url, Some(&body), "create parcel")
            .await?;
        Ok(parcel.into())
    }

    pub async fn get(&self, order_id: Uuid, parcel_id: Uuid) -> Result<Parcel> {
        let url = self.parcel_url(order_id, parcel_id, "")?;
        let parcel: WireParcel = self
            .client
            .send_json::<(), _>(Method::GET, url, None, "get parcel")
            .await?;
        Ok(parcel.into())
    }

    pub async fn update(
        &self,
        order_id: Uuid,
        parcel_id: Uuid,
        request: &ParcelRequest,
    ) -> Result<Parcel> {
        let body = parcel_update(request);
        let url = self.parcel_url(order_id, parcel_id, "")?;
        let parcel: WireParcel = self
            .client
            .send_json(Method::PUT, url, Some(&body), "update parcel")
            .await?;
        Ok(parcel.into())
    }

    pub async fn delete(&self, order_id: Uuid, parcel_id: Uuid) -> Result<()> {
        let url = self.parcel_url(order_id, parcel_id, "")?;
        self.client
            .send_empty::<()>(Method::DELETE, url, None, "delete parcel")
            .await
    }

    /// Set the delivery state. `Expired` is rejected before any request.
    pub async fn update_state(
        &self,
        order_id: Uuid,
        parcel_id: Uuid,
        state: DeliveryState,
    ) -> Result<Parcel> {
        let body = parcel_state_update(state)?;
        let url = self.parcel_url(order_id, parcel_id, "/state")?;
        let parcel: WireParcel = self
            .client
            .send_json(Method::PUT, url, Some(&body), "update parcel state")
            .await?;
        Ok(parcel.into())
    }
}
