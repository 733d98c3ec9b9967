pub mod codec;
pub mod derive;
pub mod export;
pub mod ordering;
pub mod session;
pub mod view;

pub use crate::domain::ports::{CatalogSource, ConfigProvider, Storage};
pub use crate::utils::error::Result;
