//! SDK entry point.

use std::sync::Arc;

use tracing::{debug, warn};
use uuid::Uuid;

use crate::api::{OrdersApi, ParcelsApi};
use crate::auth::{AuthSession, HttpTokenIssuer, TokenIssuer};
use crate::config::FoxdeliConfig;
use crate::error::{FoxdeliError, Result};
use crate::models::{DeliveryState, Order, OrderRequest, Parcel, ParcelRequest};
use crate::transport::http::build_client;
use crate::transport::{AuthenticatedClient, ReqwestTransport, RequestTransport};

/// Client for the Foxdeli order and parcel tracking API.
///
/// Owns one [`AuthSession`]; every call goes through the same token lifecycle.
///
/// # Example
/// ```no_run
/// use foxdeli::config::FoxdeliConfig;
/// use foxdeli::Foxdeli;
///
/// # async fn example() -> foxdeli::error::Result<()> {
/// let config = FoxdeliConfig::new().with_stage(true);
/// let foxdeli = Foxdeli::init(config, "shop@example.com", "secret").await?;
/// let order = foxdeli.get_order(uuid::Uuid::nil()).await?;
/// println!("{:?}", order.order_state);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Foxdeli {
    session: Arc<AuthSession>,
    orders: OrdersApi,
    parcels: ParcelsApi,
    eshop_id: Option<Uuid>,
    market_id: Option<Uuid>,
}

impl Foxdeli {
    /// Store credentials, authorize against the configured environment, and
    /// build the resource clients.
    pub async fn init(
        config: FoxdeliConfig,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Result<Self> {
        let http = build_client(config.timeout())?;
        let issuer = Arc::new(HttpTokenIssuer::new(http.clone(), config.token_url()));
        let transport = Arc::new(ReqwestTransport::new(http));
        Self::with_parts(config, issuer, transport, username, password).await
    }

    /// [`Foxdeli::init`] with credentials taken from the config.
    pub async fn from_config(config: FoxdeliConfig) -> Result<Self> {
        let username = config.username.clone().ok_or_else(|| {
            FoxdeliError::Configuration("FOXDELI_USERNAME is not set".to_string())
        })?;
        let password = config.password.clone().ok_or_else(|| {
            FoxdeliError::Configuration("FOXDELI_PASSWORD is not set".to_string())
        })?;
        Self::init(config, username, password).await
    }

    /// Build from environment variables; see [`FoxdeliConfig::from_env`].
    pub async fn from_env() -> Result<Self> {
        Self::from_config(FoxdeliConfig::from_env()?).await
    }

    /// Build around a caller-supplied token issuer and transport.
    pub async fn with_parts(
        config: FoxdeliConfig,
        issuer: Arc<dyn TokenIssuer>,
        transport: Arc<dyn RequestTransport>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Result<Self> {
        let session = Arc::new(AuthSession::new(issuer));
        session.set_credentials(username, password)?;
        session.authorize_now().await?;
        debug!(environment = %config.environment, "Foxdeli client initialized");

        let client = AuthenticatedClient::new(session.clone(), transport);
        let tracking_url = config.tracking_url().to_string();
        Ok(Self {
            session,
            orders: OrdersApi::new(client.clone(), tracking_url.clone()),
            parcels: ParcelsApi::new(client, tracking_url),
            eshop_id: config.eshop_id,
            market_id: config.market_id,
        })
    }

    pub fn session(&self) -> &Arc<AuthSession> {
        &self.session
    }

    pub fn orders(&self) -> &OrdersApi {
        &self.orders
    }

    pub fn parcels(&self) -> &ParcelsApi {
        &self.parcels
    }

    pub fn current_access_token(&self) -> Option<String> {
        self.session.current_access_token()
    }

    /// Replace credentials; a changed value drops the cached tokens, and the
    /// next challenged request re-authorizes.
    pub fn set_credentials(
        &self,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Result<()> {
        self.session.set_credentials(username, password)
    }

    pub async fn authorize_now(&self) -> Result<()> {
        self.session.authorize_now().await
    }

    pub fn eshop_id(&self) -> Option<Uuid> {
        self.eshop_id
    }

    pub fn market_id(&self) -> Option<Uuid> {
        self.market_id
    }

    /// Default eshop for [`Foxdeli::create_order`].
    pub fn set_eshop_id(&mut self, eshop_id: Uuid) -> Result<()> {
        if eshop_id.is_nil() {
            return Err(FoxdeliError::InvalidArgument("EshopId cannot be nil".to_string()));
        }
        self.eshop_id = Some(eshop_id);
        Ok(())
    }

    /// Default market for [`Foxdeli::create_order`].
    pub fn set_market_id(&mut self, market_id: Uuid) -> Result<()> {
        if market_id.is_nil() {
            return Err(FoxdeliError::InvalidArgument("MarketId cannot be nil".to_string()));
        }
        self.market_id = Some(market_id);
        Ok(())
    }

    /// Create an order under the default market and eshop.
    pub async fn create_order(&self, request: &OrderRequest) -> Result<Order> {
        self.create_order_in(request, self.market_id, self.eshop_id).await
    }

    /// Create an order under the given market and the default eshop.
    pub async fn create_order_for_market(
        &self,
        request: &OrderRequest,
        market_id: Uuid,
    ) -> Result<Order> {
        self.create_order_in(request, Some(market_id), self.eshop_id).await
    }

    /// Create an order, then each of its parcels. A parcel that fails is
    /// logged and skipped; the order is re-fetched so the result lists the
    /// parcels that were created.
    pub async fn create_order_in(
        &self,
        request: &OrderRequest,
        market_id: Option<Uuid>,
        eshop_id: Option<Uuid>,
    ) -> Result<Order> {
        let order = self.orders.create(request, market_id, eshop_id).await?;
        if request.parcels.is_empty() {
            return Ok(order);
        }
        for parcel in &request.parcels {
            if let Err(e) = self.parcels.create(order.order_id, parcel).await {
                warn!(
                    order_id = %order.order_id,
                    error = %e,
                    "Failed to create parcel for new order"
                );
            }
        }
        self.orders.get(order.order_id).await
    }

    pub async fn get_order(&self, order_id: Uuid) -> Result<Order> {
        self.orders.get(order_id).await
    }

    pub async fn update_order(&self, order_id: Uuid, request: &OrderRequest) -> Result<Order> {
        self.orders.update(order_id, request).await
    }

    pub async fn cancel_order(&self, order_id: Uuid) -> Result<Order> {
        self.orders.cancel(order_id).await
    }

    pub async fn create_parcel(&self, order_id: Uuid, request: &ParcelRequest) -> Result<Parcel> {
        self.parcels.create(order_id, request).await
    }

    pub async fn get_parcel(&self, order_id: Uuid, parcel_id: Uuid) -> Result<Parcel> {
        self.parcels.get(order_id, parcel_id).await
    }

    pub async fn update_parcel(
        &self,
        order_id: Uuid,
        parcel_id: Uuid,
        request: &ParcelRequest,
    ) -> Result<Parcel> {
        self.parcels.update(order_id, parcel_id, request).await
    }

    pub async fn delete_parcel(&self, order_id: Uuid, parcel_id: Uuid) -> Result<()> {
        self.parcels.delete(order_id, parcel_id).await
    }

    pub async fn update_parcel_state(
        &self,
        order_id: Uuid,
        parcel_id: Uuid,
        state: DeliveryState,
    ) -> Result<Parcel> {
        self.parcels.update_state(order_id, parcel_id, state).await
    }
}
