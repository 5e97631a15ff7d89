//! Error types for the subscription proxy.
//!
//! Backend faults are translated into this taxonomy per operation; anything
//! without a mapping propagates as an opaque [`BackendFault`].

use thiserror::Error;

pub type Result<T> = std::result::Result<T, SubgateError>;

/// A fault reported by the billing backend.
///
/// Carries the HTTP status together with the backend's own error number and
/// message when the response body was a well-formed error envelope. For a
/// non-envelope body, `errno` is absent and `message` holds the raw body text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("billing backend fault (status {status}, errno {errno:?}): {message}")]
pub struct BackendFault {
    pub status: u16,
    pub errno: Option<i64>,
    pub message: String,
}

impl BackendFault {
    #[must_use]
    pub fn new(status: u16, errno: Option<i64>, message: impl Into<String>) -> Self {
        Self {
            status,
            errno,
            message: message.into(),
        }
    }

    /// Check if this is a client-side fault (4xx).
    #[must_use]
    pub fn is_client_error(&self) -> bool {
        (400..500).contains(&self.status)
    }

    /// Check if this is a backend-side fault (5xx).
    #[must_use]
    pub fn is_server_error(&self) -> bool {
        (500..600).contains(&self.status)
    }
}

/// Errors surfaced by the subscription proxy.
#[derive(Debug, Error)]
pub enum SubgateError {
    /// Subscription support is switched off; no operation is available.
    #[error("subscriptions feature is not enabled")]
    FeatureNotEnabled,

    /// The backend has no customer record for this account.
    #[error("unknown customer: {uid}")]
    UnknownCustomer { uid: String },

    /// The backend has no such subscription for this customer.
    #[error("unknown subscription: {subscription_id}")]
    UnknownSubscription { subscription_id: String },

    /// The referenced plan does not exist in the catalog.
    #[error("unknown subscription plan{}", display_plan_id(.plan_id))]
    UnknownSubscriptionPlan { plan_id: Option<String> },

    /// The requested plan change is not a valid upgrade path.
    #[error("invalid plan upgrade to '{plan_id}'")]
    InvalidPlanUpgrade { plan_id: String },

    /// The subscription was already changed by a concurrent request.
    #[error("subscription has already been changed")]
    SubscriptionAlreadyChanged,

    /// The payment token was rejected when creating a subscription.
    #[error("payment token rejected: {reason}")]
    RejectedSubscriptionPaymentToken { reason: String },

    /// The payment token was rejected when updating the customer.
    #[error("customer update rejected: {reason}")]
    RejectedCustomerUpdate { reason: String },

    /// An unmapped backend fault, propagated as-is. Opaque to callers.
    #[error(transparent)]
    Backend(#[from] BackendFault),

    /// A 2xx response whose body did not match the operation's schema.
    #[error("invalid {operation} response from backend: {detail}")]
    InvalidBackendResponse {
        operation: &'static str,
        detail: String,
    },

    /// The request never produced a backend response (connect, timeout,
    /// body read).
    #[error("{operation} request failed")]
    Http {
        operation: &'static str,
        #[source]
        source: reqwest::Error,
    },

    /// The transport failed to release its resources.
    #[error("transport shutdown failed: {0}")]
    TransportShutdown(String),

    /// A cache backend failure. Never fatal on the plan-list path.
    #[error("cache error: {0}")]
    Cache(String),

    /// Invalid proxy configuration.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// One or more sub-resources failed to release during shutdown.
    #[error("shutdown failures: {}", .failures.join("; "))]
    Shutdown { failures: Vec<String> },
}

fn display_plan_id(plan_id: &Option<String>) -> String {
    match plan_id {
        Some(id) => format!(": {id}"),
        None => String::new(),
    }
}

impl SubgateError {
    /// Check if this error means the named entity does not exist upstream.
    #[must_use]
    pub fn is_unknown_entity(&self) -> bool {
        matches!(
            self,
            Self::UnknownCustomer { .. }
                | Self::UnknownSubscription { .. }
                | Self::UnknownSubscriptionPlan { .. }
        )
    }

    /// Check if this error reflects a rejected payment instrument.
    #[must_use]
    pub fn is_payment_rejection(&self) -> bool {
        matches!(
            self,
            Self::RejectedSubscriptionPaymentToken { .. } | Self::RejectedCustomerUpdate { .. }
        )
    }
}
