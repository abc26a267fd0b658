//! External collaborators: market data, caching, persistence, narratives.

pub mod cache;
pub mod market_data;
pub mod narrative;
pub mod store;

/// Error type returned across collaborator boundaries.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

pub use cache::{Cache, TtlCache};
pub use market_data::{CachedMarketDataProvider, MarketDataProvider, StaticMarketDataProvider};
pub use narrative::{NarrativeGenerator, NarrativeRequest, TemplateNarrativeGenerator};
pub use store::{InMemorySignalStore, SignalStore};
