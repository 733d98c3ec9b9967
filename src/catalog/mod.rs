pub mod builtin;
pub mod sources;

use crate::domain::model::{Client, Control, Service};

pub use sources::{FileCatalogSource, HttpCatalogSource, MockCatalogSource};

/// Sentinel client id for a portfolio not addressed to any specific client.
pub const GENERIC_CLIENT_ID: &str = "generic-client";

/// Synthetic client that recommends every service and control in catalog order.
pub fn build_generic_client(services: &[Service], controls: &[Control]) -> Client {
    Client {
        id: GENERIC_CLIENT_ID.to_string(),
        name: "Portafolio General".to_string(),
        industry: "Sin cliente especifico".to_string(),
        city: Some(String::new()),
        logo_src: None,
        recommended_service_ids: services.iter().map(|s| s.id.clone()).collect(),
        recommended_control_ids: controls.iter().map(|c| c.id.clone()).collect(),
    }
}
