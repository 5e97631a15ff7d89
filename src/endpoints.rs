//! Operation table for the billing backend API.
//!
//! Every wire operation lives under a fixed path prefix and carries a stable
//! name used in logs and fault context.

use reqwest::Method;

/// Fixed prefix the backend mounts its API under.
pub(crate) const PATH_PREFIX: &str = "/v1/sub";

/// One variant per wire operation the proxy performs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    ListPlans,
    ListSubscriptions,
    GetCustomer,
    UpdateCustomer,
    DeleteCustomer,
    CreateSubscription,
    UpdateSubscription,
    CancelSubscription,
    ReactivateSubscription,
}

impl Operation {
    /// Stable operation name for logging and fault context.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::ListPlans => "listPlans",
            Self::ListSubscriptions => "listSubscriptions",
            Self::GetCustomer => "getCustomer",
            Self::UpdateCustomer => "updateCustomer",
            Self::DeleteCustomer => "deleteCustomer",
            Self::CreateSubscription => "createSubscription",
            Self::UpdateSubscription => "updateSubscription",
            Self::CancelSubscription => "cancelSubscription",
            Self::ReactivateSubscription => "reactivateSubscription",
        }
    }

    #[must_use]
    pub fn method(&self) -> Method {
        match self {
            Self::ListPlans | Self::ListSubscriptions | Self::GetCustomer => Method::GET,
            Self::UpdateCustomer | Self::CreateSubscription | Self::ReactivateSubscription => {
                Method::POST
            }
            Self::UpdateSubscription => Method::PATCH,
            Self::DeleteCustomer | Self::CancelSubscription => Method::DELETE,
        }
    }
}

pub(crate) fn plans_path() -> String {
    format!("{PATH_PREFIX}/plans")
}

pub(crate) fn customer_path(uid: &str) -> String {
    format!("{PATH_PREFIX}/customer/{uid}")
}

pub(crate) fn subscriptions_path(uid: &str) -> String {
    format!("{PATH_PREFIX}/customer/{uid}/subscriptions")
}

pub(crate) fn subscription_path(uid: &str, subscription_id: &str) -> String {
    format!("{PATH_PREFIX}/customer/{uid}/subscriptions/{subscription_id}")
}
