//! # subgate
//!
//! Async proxy client for a hosted subscription billing backend.
//!
//! The crate fronts the backend's HTTP API with a typed operation surface
//! (plans, customers, subscriptions), translates backend faults into a
//! domain error taxonomy, and optionally caches the plan catalog with a TTL.
//! The facade comes in three statically-chosen variants:
//!
//! - **Live** - real HTTP transport with per-operation fault translation
//! - **Disabled** - every operation fails fast with `FeatureNotEnabled`,
//!   never touching the network
//! - **Stub** - an in-memory fake for development and UI work
//!
//! ```rust,no_run
//! use subgate::{SubgateClient, SubgateConfig, SubscriptionService};
//!
//! # async fn example() -> subgate::Result<()> {
//! let config = SubgateConfig::new()
//!     .with_enabled(true)
//!     .with_base_url("https://billing.example.com")
//!     .with_api_key("sk_live_...")
//!     .from_env();
//!
//! let client = SubgateClient::from_config(&config)?;
//! let plans = client.list_plans().await?;
//! # client.close().await
//! # }
//! ```
//!
//! This layer never retries: one request per call, faults either translate
//! or propagate. Subscription lifecycle state is whatever the backend
//! reports; nothing is inferred locally.

pub mod cache;
pub mod client;
pub mod config;
pub mod endpoints;
pub mod error;
pub mod models;
pub mod stub;
pub mod transport;
pub mod upgrade;

mod translate;

pub use cache::{Cache, CacheExt, InMemoryCache, NoOpCache};
pub use client::{DisabledClient, LiveClient, SubgateClient, SubscriptionService};
pub use config::SubgateConfig;
pub use endpoints::Operation;
pub use error::{BackendFault, Result, SubgateError};
pub use models::{
    BackendMessage, CreateSubscriptionRequest, Customer, ErrorEnvelope, Plan, ProductMetadata,
    ReactivationResponse, Subscription, SubscriptionList, ORIGIN_SYSTEM,
};
pub use stub::StubClient;
pub use transport::{BackendTransport, HttpTransport, TransportFault, TransportResult};
pub use upgrade::is_plan_upgrade;
