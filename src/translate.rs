//! Backend fault translation.
//!
//! Each operation has its own mapping from `{status, errno}` (or, where the
//! backend only gives message literals, `{status, message}`) into the domain
//! taxonomy. The raw fault is always logged with full request context before
//! it is mapped; anything without a mapping propagates untouched.

use crate::error::{BackendFault, SubgateError};
use crate::models::CreateSubscriptionRequest;

const LOG_TARGET: &str = "subgate::client";

// Backend errno values surfaced by updateSubscription.
const ERRNO_INVALID_UPGRADE_A: i64 = 1001;
const ERRNO_INVALID_UPGRADE_B: i64 = 1002;
const ERRNO_ALREADY_CHANGED: i64 = 1003;
const ERRNO_UNKNOWN_CUSTOMER: i64 = 4000;
const ERRNO_UNKNOWN_SUBSCRIPTION: i64 = 4001;
const ERRNO_INVALID_UPGRADE_C: i64 = 4002;
const ERRNO_UNKNOWN_PLAN: i64 = 4003;

// Message literals used by cancel/reactivate faults, which carry no errno.
const MSG_INVALID_UID: &str = "invalid uid";
const MSG_INVALID_SUBSCRIPTION: &str = "invalid subscription id";

pub(crate) fn list_plans(fault: BackendFault) -> SubgateError {
    tracing::error!(
        target: LOG_TARGET,
        status = fault.status,
        errno = ?fault.errno,
        message = %fault.message,
        "listPlans failed"
    );
    SubgateError::Backend(fault)
}

pub(crate) fn list_subscriptions(fault: BackendFault, uid: &str) -> SubgateError {
    tracing::error!(
        target: LOG_TARGET,
        status = fault.status,
        errno = ?fault.errno,
        message = %fault.message,
        uid,
        "listSubscriptions failed"
    );
    match fault.status {
        404 => SubgateError::UnknownCustomer {
            uid: uid.to_string(),
        },
        _ => SubgateError::Backend(fault),
    }
}

pub(crate) fn get_customer(fault: BackendFault, uid: &str) -> SubgateError {
    tracing::error!(
        target: LOG_TARGET,
        status = fault.status,
        errno = ?fault.errno,
        message = %fault.message,
        uid,
        "getCustomer failed"
    );
    match fault.status {
        404 => SubgateError::UnknownCustomer {
            uid: uid.to_string(),
        },
        _ => SubgateError::Backend(fault),
    }
}

pub(crate) fn update_customer(fault: BackendFault, uid: &str) -> SubgateError {
    tracing::error!(
        target: LOG_TARGET,
        status = fault.status,
        errno = ?fault.errno,
        message = %fault.message,
        uid,
        "updateCustomer failed"
    );
    match fault.status {
        404 => SubgateError::UnknownCustomer {
            uid: uid.to_string(),
        },
        400 | 402 => SubgateError::RejectedCustomerUpdate {
            reason: fault.message,
        },
        _ => SubgateError::Backend(fault),
    }
}

pub(crate) fn delete_customer(fault: BackendFault, uid: &str) -> SubgateError {
    // 404 never reaches here; deletion of an absent customer is a success.
    tracing::error!(
        target: LOG_TARGET,
        status = fault.status,
        errno = ?fault.errno,
        message = %fault.message,
        uid,
        "deleteCustomer failed"
    );
    SubgateError::Backend(fault)
}

pub(crate) fn create_subscription(
    fault: BackendFault,
    uid: &str,
    request: &CreateSubscriptionRequest,
) -> SubgateError {
    tracing::error!(
        target: LOG_TARGET,
        status = fault.status,
        errno = ?fault.errno,
        message = %fault.message,
        uid,
        payment_token = %request.payment_token,
        plan_id = %request.plan_id,
        display_name = %request.display_name,
        email = %request.email,
        "createSubscription failed"
    );
    match fault.status {
        404 => SubgateError::UnknownSubscriptionPlan {
            plan_id: Some(request.plan_id.clone()),
        },
        400 | 402 => SubgateError::RejectedSubscriptionPaymentToken {
            reason: fault.message,
        },
        _ => SubgateError::Backend(fault),
    }
}

pub(crate) fn update_subscription(
    fault: BackendFault,
    uid: &str,
    subscription_id: &str,
    plan_id: &str,
) -> SubgateError {
    tracing::error!(
        target: LOG_TARGET,
        status = fault.status,
        errno = ?fault.errno,
        message = %fault.message,
        uid,
        subscription_id,
        plan_id,
        "updateSubscription failed"
    );
    match (fault.status, fault.errno) {
        (
            400 | 404,
            Some(ERRNO_INVALID_UPGRADE_A | ERRNO_INVALID_UPGRADE_B | ERRNO_INVALID_UPGRADE_C),
        ) => SubgateError::InvalidPlanUpgrade {
            plan_id: plan_id.to_string(),
        },
        (400 | 404, Some(ERRNO_ALREADY_CHANGED)) => SubgateError::SubscriptionAlreadyChanged,
        (400 | 404, Some(ERRNO_UNKNOWN_CUSTOMER)) => SubgateError::UnknownCustomer {
            uid: uid.to_string(),
        },
        (400 | 404, Some(ERRNO_UNKNOWN_SUBSCRIPTION)) => SubgateError::UnknownSubscription {
            subscription_id: subscription_id.to_string(),
        },
        (400 | 404, Some(ERRNO_UNKNOWN_PLAN)) => SubgateError::UnknownSubscriptionPlan {
            plan_id: Some(plan_id.to_string()),
        },
        _ => SubgateError::Backend(fault),
    }
}

pub(crate) fn cancel_subscription(
    fault: BackendFault,
    uid: &str,
    subscription_id: &str,
) -> SubgateError {
    tracing::error!(
        target: LOG_TARGET,
        status = fault.status,
        errno = ?fault.errno,
        message = %fault.message,
        uid,
        subscription_id,
        "cancelSubscription failed"
    );
    match (fault.status, fault.message.as_str()) {
        (400 | 404, MSG_INVALID_UID) => SubgateError::UnknownCustomer {
            uid: uid.to_string(),
        },
        (400 | 404, MSG_INVALID_SUBSCRIPTION) => SubgateError::UnknownSubscription {
            subscription_id: subscription_id.to_string(),
        },
        _ => SubgateError::Backend(fault),
    }
}

pub(crate) fn reactivate_subscription(
    fault: BackendFault,
    uid: &str,
    subscription_id: &str,
) -> SubgateError {
    tracing::error!(
        target: LOG_TARGET,
        status = fault.status,
        errno = ?fault.errno,
        message = %fault.message,
        uid,
        subscription_id,
        "reactivateSubscription failed"
    );
    // The backend only emits the recognizable literals under 404 here.
    match (fault.status, fault.message.as_str()) {
        (404, MSG_INVALID_UID) => SubgateError::UnknownCustomer {
            uid: uid.to_string(),
        },
        (404, MSG_INVALID_SUBSCRIPTION) => SubgateError::UnknownSubscription {
            subscription_id: subscription_id.to_string(),
        },
        _ => SubgateError::Backend(fault),
    }
}
