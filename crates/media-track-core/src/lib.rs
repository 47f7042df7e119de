pub mod browse;
pub mod cache;
pub mod error;
pub mod filter;
pub mod recommend;
pub mod session;

pub use browse::{BrowseContext, Browser};
pub use cache::SessionCache;
pub use error::CoreError;
pub use filter::{filter_untracked, ListFilter};
pub use recommend::{recommend, AffinityTable, RecommendRequest, ScoredItem};
pub use session::{MembershipState, Session};

#[cfg(test)]
pub(crate) mod testutil;
