//! Tracking API resources and their wire format.

pub mod mapping;
pub mod orders;
pub mod parcels;
pub mod wire;

pub use orders::OrdersApi;
pub use parcels::ParcelsApi;

use reqwest::Url;

use crate::error::FoxdeliError;

/// Join `path` onto a base URL that may itself carry a path prefix.
pub(crate) fn endpoint(base_url: &str, path: &str) -> Result<Url, FoxdeliError> {
    let joined = format!("{}{path}", base_url.trim_end_matches('/'));
    Url::parse(&joined)
        .map_err(|e| FoxdeliError::Configuration(format!("Invalid API URL {joined}: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_keeps_base_path_prefix() {
        let url = endpoint("https://api.example.com/tracking/", "/v1/order/1").unwrap();
        assert_eq!(url.as_str(), "https://api.example.com/tracking/v1/order/1");
    }

    #[test]
    fn endpoint_rejects_garbage_base() {
        assert!(matches!(
            endpoint("not a url", "/v1/order"),
            Err(FoxdeliError::Configuration(_))
        ));
    }
}
