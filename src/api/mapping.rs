//! Field-by-field conversion between public models and wire bodies.

use uuid::Uuid;

use super::wire::{
    InputDeliveryState, OrderRegistration, OrderUpdate, ParcelRegistration, ParcelStateUpdate,
    ParcelUpdate, WireOrder, WireParcel,
};
use crate::error::FoxdeliError;
use crate::models::{DeliveryState, Order, OrderRequest, Parcel, ParcelRequest};

pub fn order_update(request: &OrderRequest) -> OrderUpdate {
    OrderUpdate {
        platform: request.platform.clone(),
        order_number: request.order_number.clone(),
        external_identifier: request.external_identifier.clone(),
        price: request.price.clone(),
        cash_on_delivery: request.cash_on_delivery.clone(),
        additional_costs: request.additional_costs.clone(),
        payment: request.payment.clone(),
        customer: request.customer.clone(),
        destination: request.destination.clone(),
        products: request.products.clone(),
    }
}

pub fn order_registration(
    request: &OrderRequest,
    market_id: Option<Uuid>,
    eshop_id: Option<Uuid>,
) -> OrderRegistration {
    OrderRegistration {
        market_id,
        eshop_id,
        order: order_update(request),
    }
}

pub fn parcel_registration(request: &ParcelRequest) -> ParcelRegistration {
    ParcelRegistration {
        products: request.products.clone(),
        dimensions: request.dimensions.clone(),
        tracking: request.tracking.clone(),
    }
}

pub fn parcel_update(request: &ParcelRequest) -> ParcelUpdate {
    parcel_registration(request)
}

pub fn parcel_state_update(state: DeliveryState) -> Result<ParcelStateUpdate, FoxdeliError> {
    let state = match state {
        DeliveryState::Waiting => InputDeliveryState::Waiting,
        DeliveryState::InTransit => InputDeliveryState::InTransit,
        DeliveryState::Delayed => InputDeliveryState::Delayed,
        DeliveryState::ReadyToPickup => InputDeliveryState::ReadyToPickup,
        DeliveryState::Delivered => InputDeliveryState::Delivered,
        DeliveryState::Returning => InputDeliveryState::Returning,
        DeliveryState::Returned => InputDeliveryState::Returned,
        DeliveryState::Cancelled => InputDeliveryState::Cancelled,
        DeliveryState::Lost => InputDeliveryState::Lost,
        DeliveryState::Expired | DeliveryState::Unknown => {
            return Err(FoxdeliError::InvalidArgument(format!(
                "Delivery state {state} cannot be set by clients"
            )))
        }
    };
    Ok(ParcelStateUpdate { state })
}

impl From<WireParcel> for Parcel {
    fn from(parcel: WireParcel) -> Self {
        Self {
            parcel_id: parcel.id,
            order_id: parcel.order_id,
            dimensions: parcel.dimensions,
            state: parcel.state,
            tracking_state: parcel.tracking_state,
            max_store_date: parcel.max_store_date,
            delivery_window: parcel.delivery_window,
            active_tracking: parcel.active_tracking,
            timeline: parcel.timeline.unwrap_or_default(),
            products: parcel.products.unwrap_or_default(),
            carrier_tracking_url: parcel.carrier_tracking_url,
        }
    }
}

impl From<WireOrder> for Order {
    fn from(order: WireOrder) -> Self {
        Self {
            order_id: order.id,
            platform: order.platform,
            order_number: order.order_number,
            order_state: order.order_state,
            market_id: order.market_id,
            eshop_id: order.eshop_id,
            external_identifier: order.external_identifier,
            destination: order.destination,
            price: order.price,
            additional_costs: order.additional_costs.unwrap_or_default(),
            cash_on_delivery: order.cash_on_delivery,
            payment: order.payment,
            customer: order.customer,
            parcels: order
                .parcels
                .unwrap_or_default()
                .into_iter()
                .map(Parcel::from)
                .collect(),
            products: order.products.unwrap_or_default(),
            cancelled: order.cancelled,
            in_important_state: order.in_important_state,
            in_urgent_state: order.in_urgent_state,
            snooze: order.snooze,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Money, ParcelRequest};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn registration_flattens_order_and_omits_empty_fields() {
        let market = Uuid::new_v4();
        let request = OrderRequest::builder()
            .order_number("A-1".to_string())
            .price(Money::new(100.0, "CZK"))
            .parcels(vec![ParcelRequest::default()])
            .build();

        let body = serde_json::to_value(order_registration(&request, Some(market), None)).unwrap();

        assert_eq!(
            body,
            json!({
                "marketId": market,
                "eshopId": null,
                "orderNumber": "A-1",
                "price": { "amount": 100.0, "currency": "CZK" }
            })
        );
    }

    #[test]
    fn wire_order_maps_id_and_nested_parcels() {
        let order_id = Uuid::new_v4();
        let parcel_id = Uuid::new_v4();
        let wire: WireOrder = serde_json::from_value(json!({
            "id": order_id,
            "orderNumber": "A-1",
            "additionalCosts": null,
            "parcels": [{
                "id": parcel_id,
                "orderId": order_id,
                "state": { "delivery": "IN_TRANSIT", "deliverToday": true },
                "products": ["sku-1"]
            }]
        }))
        .unwrap();

        let order = Order::from(wire);

        assert_eq!(order.order_id, order_id);
        assert!(order.additional_costs.is_empty());
        assert_eq!(order.parcels.len(), 1);
        let parcel = &order.parcels[0];
        assert_eq!(parcel.parcel_id, parcel_id);
        assert_eq!(parcel.products, vec!["sku-1".to_string()]);
        assert_eq!(
            parcel.state.as_ref().and_then(|s| s.delivery),
            Some(DeliveryState::InTransit)
        );
    }

    #[test]
    fn unknown_delivery_state_is_tolerated() {
        let wire: WireParcel = serde_json::from_value(json!({
            "id": Uuid::new_v4(),
            "state": { "delivery": "TELEPORTED" }
        }))
        .unwrap();
        assert_eq!(
            Parcel::from(wire).state.and_then(|s| s.delivery),
            Some(DeliveryState::Unknown)
        );
    }

    #[test]
    fn parcel_update_sends_only_given_fields() {
        let request = ParcelRequest::builder()
            .products(vec!["sku-9".to_string()])
            .build();

        let body = serde_json::to_value(parcel_update(&request)).unwrap();

        assert_eq!(body, json!({ "products": ["sku-9"] }));
    }

    #[test]
    fn expired_state_cannot_be_sent() {
        let err = parcel_state_update(DeliveryState::Expired).unwrap_err();
        assert!(matches!(err, FoxdeliError::InvalidArgument(msg) if msg.contains("EXPIRED")));
        let body = serde_json::to_value(parcel_state_update(DeliveryState::Delivered).unwrap())
            .unwrap();
        assert_eq!(body, json!({ "state": "DELIVERED" }));
    }
}
