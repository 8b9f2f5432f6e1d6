//! Public order and parcel records.

pub mod common;
pub mod order;
pub mod parcel;

pub use common::{
    AdditionalCost, Address, Customer, DeliveryState, DeliveryWindow, Destination, Dimensions,
    Money, ParcelShopData, ParcelState, ParcelTimeline, ParcelTracking, ParcelTrackingConfig,
    PaymentInfo, Product, Snooze,
};
pub use order::{Order, OrderRequest};
pub use parcel::{Parcel, ParcelRequest};
