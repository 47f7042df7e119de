pub mod error;
pub mod identity;
pub mod store;
pub mod tmdb;
pub mod traits;

pub use error::ServiceError;
pub use identity::{sign_in, SessionTokens};
pub use store::{spawn_watch, RestDocumentStore, UserDataPatch, UserDocumentStore};
pub use tmdb::TmdbClient;
pub use traits::{Catalog, DiscoverQuery, Page, Person};
