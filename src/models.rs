//! Wire schemas for the billing backend.
//!
//! Deserialization is the schema check: a backend body that parses as neither
//! an operation's success shape nor the error envelope is a transport-level
//! schema fault, never a silently-accepted value.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Plan catalog entry. `amount` is in minor currency units.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Plan {
    pub plan_id: String,
    pub product_id: String,
    pub product_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plan_name: Option<String>,
    pub interval: String,
    pub amount: u64,
    pub currency: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_metadata: Option<ProductMetadata>,
}

/// Product metadata bag attached to a plan.
///
/// Only `productSet` and `productSetOrder` have meaning to this crate (they
/// drive the upgrade check); everything else is carried opaquely.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ProductMetadata {
    #[serde(
        rename = "productSet",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub product_set: Option<String>,
    #[serde(
        rename = "productSetOrder",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub product_set_order: Option<String>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

/// A customer's subscription as reported by the backend.
///
/// `status` is an opaque backend string; lifecycle state is never inferred
/// locally. Timestamps are epoch seconds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subscription {
    pub subscription_id: String,
    pub plan_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plan_name: Option<String>,
    pub status: String,
    pub cancel_at_period_end: bool,
    pub current_period_start: i64,
    pub current_period_end: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_at: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SubscriptionList {
    pub subscriptions: Vec<Subscription>,
}

/// Backend customer record: payment-method reference plus billing contact
/// fields. All card fields are absent until a payment method is attached.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last4: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exp_month: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exp_year: Option<u16>,
    #[serde(default)]
    pub subscriptions: Vec<Subscription>,
}

/// Bare acknowledgement body used by cancel and delete.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackendMessage {
    pub message: String,
}

/// Reactivation outcome. Always carries the affected plan so a caller can
/// confirm to the user exactly what was restored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReactivationResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub plan: Plan,
}

/// The backend's fault body: `{ "message": ..., "errno": ... }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorEnvelope {
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub errno: Option<i64>,
}

/// Origin tag stamped into every subscription creation, so the backend can
/// attribute the signup to this caller.
pub const ORIGIN_SYSTEM: &str = "accounts";

/// Caller-facing request to create a subscription. The origin tag is stamped
/// on by the transport payload, not supplied by callers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateSubscriptionRequest {
    pub payment_token: String,
    pub plan_id: String,
    pub display_name: String,
    pub email: String,
}

/// Wire payload for createSubscription.
#[derive(Debug, Clone, Serialize)]
pub(crate) struct CreateSubscriptionPayload<'a> {
    pub pmt_token: &'a str,
    pub plan_id: &'a str,
    pub email: &'a str,
    pub origin_system: &'static str,
    pub display_name: &'a str,
}

impl<'a> CreateSubscriptionPayload<'a> {
    pub(crate) fn from_request(request: &'a CreateSubscriptionRequest) -> Self {
        Self {
            pmt_token: &request.payment_token,
            plan_id: &request.plan_id,
            email: &request.email,
            origin_system: ORIGIN_SYSTEM,
            display_name: &request.display_name,
        }
    }
}

/// Wire payload for updateSubscription.
#[derive(Debug, Clone, Serialize)]
pub(crate) struct UpdateSubscriptionPayload<'a> {
    pub plan_id: &'a str,
}

/// Wire payload for updateCustomer.
#[derive(Debug, Clone, Serialize)]
pub(crate) struct UpdateCustomerPayload<'a> {
    pub pmt_token: &'a str,
}
