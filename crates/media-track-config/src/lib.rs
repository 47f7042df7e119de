pub mod config;
pub mod credentials;
pub mod paths;

pub use config::{
    CatalogConfig, Config, IdentityConfig, RecommendOptions, SearchOptions, StoreConfig,
};
pub use credentials::CredentialStore;
pub use paths::PathManager;
