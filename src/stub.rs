//! In-memory stub facade.
//!
//! Serves a deterministic canned plan catalog and keeps customer state in a
//! process-local table. Useful for local development and UI work against
//! subscription flows without a billing backend.

use crate::client::SubscriptionService;
use crate::error::{Result, SubgateError};
use crate::models::{
    BackendMessage, CreateSubscriptionRequest, Customer, Plan, ProductMetadata,
    ReactivationResponse, Subscription, SubscriptionList,
};
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;
use std::time::{SystemTime, UNIX_EPOCH};

const MONTH_SECONDS: i64 = 30 * 24 * 60 * 60;

#[derive(Debug, Clone, Default)]
struct StubCustomer {
    payment_type: Option<String>,
    last4: Option<String>,
    subscriptions: Vec<Subscription>,
}

/// Stub facade backed by a canned catalog and a mutexed customer table.
/// The lock is held only for table access, never across an await point.
pub struct StubClient {
    plans: Vec<Plan>,
    customers: Mutex<HashMap<String, StubCustomer>>,
    next_subscription: AtomicU64,
}

impl Default for StubClient {
    fn default() -> Self {
        Self::new()
    }
}

impl StubClient {
    #[must_use]
    pub fn new() -> Self {
        Self {
            plans: canned_plans(),
            customers: Mutex::new(HashMap::new()),
            next_subscription: AtomicU64::new(1),
        }
    }

    fn plan(&self, plan_id: &str) -> Option<&Plan> {
        self.plans.iter().find(|plan| plan.plan_id == plan_id)
    }

    fn customer_view(&self, uid: &str) -> Result<Customer> {
        let customers = self.customers.lock().expect("stub customer table");
        let customer = customers
            .get(uid)
            .ok_or_else(|| SubgateError::UnknownCustomer {
                uid: uid.to_string(),
            })?;
        Ok(Customer {
            payment_type: customer.payment_type.clone(),
            last4: customer.last4.clone(),
            exp_month: Some(8),
            exp_year: Some(2030),
            subscriptions: customer.subscriptions.clone(),
        })
    }
}

impl SubscriptionService for StubClient {
    async fn list_plans(&self) -> Result<Vec<Plan>> {
        Ok(self.plans.clone())
    }

    async fn list_subscriptions(&self, uid: &str) -> Result<SubscriptionList> {
        let customers = self.customers.lock().expect("stub customer table");
        let customer = customers
            .get(uid)
            .ok_or_else(|| SubgateError::UnknownCustomer {
                uid: uid.to_string(),
            })?;
        Ok(SubscriptionList {
            subscriptions: customer.subscriptions.clone(),
        })
    }

    async fn get_customer(&self, uid: &str) -> Result<Customer> {
        self.customer_view(uid)
    }

    async fn update_customer(&self, uid: &str, payment_token: &str) -> Result<Customer> {
        {
            let mut customers = self.customers.lock().expect("stub customer table");
            let customer =
                customers
                    .get_mut(uid)
                    .ok_or_else(|| SubgateError::UnknownCustomer {
                        uid: uid.to_string(),
                    })?;
            customer.payment_type = Some("credit".to_string());
            customer.last4 = Some(derive_last4(payment_token));
        }
        self.customer_view(uid)
    }

    async fn delete_customer(&self, uid: &str) -> Result<BackendMessage> {
        let removed = self
            .customers
            .lock()
            .expect("stub customer table")
            .remove(uid);
        let message = if removed.is_some() {
            "customer deleted"
        } else {
            // same idempotent ack the live path synthesizes
            "unknown customer"
        };
        Ok(BackendMessage {
            message: message.to_string(),
        })
    }

    async fn create_subscription(
        &self,
        uid: &str,
        request: &CreateSubscriptionRequest,
    ) -> Result<SubscriptionList> {
        let plan = self
            .plan(&request.plan_id)
            .ok_or_else(|| SubgateError::UnknownSubscriptionPlan {
                plan_id: Some(request.plan_id.clone()),
            })?
            .clone();

        let id = self.next_subscription.fetch_add(1, Ordering::SeqCst);
        let now = epoch_now();
        let subscription = Subscription {
            subscription_id: format!("sub_stub_{id}"),
            plan_id: plan.plan_id.clone(),
            plan_name: plan.plan_name.clone(),
            status: "active".to_string(),
            cancel_at_period_end: false,
            current_period_start: now,
            current_period_end: now + MONTH_SECONDS,
            end_at: None,
        };

        let mut customers = self.customers.lock().expect("stub customer table");
        let customer = customers.entry(uid.to_string()).or_insert_with(|| {
            // first subscription registers the customer
            StubCustomer {
                payment_type: Some("credit".to_string()),
                last4: Some(derive_last4(&request.payment_token)),
                subscriptions: Vec::new(),
            }
        });
        customer.subscriptions.push(subscription);
        Ok(SubscriptionList {
            subscriptions: customer.subscriptions.clone(),
        })
    }

    async fn update_subscription(
        &self,
        uid: &str,
        subscription_id: &str,
        plan_id: &str,
    ) -> Result<Subscription> {
        let plan = self
            .plan(plan_id)
            .ok_or_else(|| SubgateError::UnknownSubscriptionPlan {
                plan_id: Some(plan_id.to_string()),
            })?
            .clone();

        let mut customers = self.customers.lock().expect("stub customer table");
        let customer = customers
            .get_mut(uid)
            .ok_or_else(|| SubgateError::UnknownCustomer {
                uid: uid.to_string(),
            })?;
        let subscription = customer
            .subscriptions
            .iter_mut()
            .find(|sub| sub.subscription_id == subscription_id)
            .ok_or_else(|| SubgateError::UnknownSubscription {
                subscription_id: subscription_id.to_string(),
            })?;

        if subscription.plan_id == plan_id {
            return Err(SubgateError::SubscriptionAlreadyChanged);
        }

        subscription.plan_id = plan.plan_id.clone();
        subscription.plan_name = plan.plan_name.clone();
        Ok(subscription.clone())
    }

    async fn cancel_subscription(
        &self,
        uid: &str,
        subscription_id: &str,
    ) -> Result<BackendMessage> {
        let mut customers = self.customers.lock().expect("stub customer table");
        let customer = customers
            .get_mut(uid)
            .ok_or_else(|| SubgateError::UnknownCustomer {
                uid: uid.to_string(),
            })?;
        let subscription = customer
            .subscriptions
            .iter_mut()
            .find(|sub| sub.subscription_id == subscription_id)
            .ok_or_else(|| SubgateError::UnknownSubscription {
                subscription_id: subscription_id.to_string(),
            })?;

        subscription.cancel_at_period_end = true;
        subscription.end_at = Some(subscription.current_period_end);
        Ok(BackendMessage {
            message: "subscription cancelled".to_string(),
        })
    }

    async fn reactivate_subscription(
        &self,
        uid: &str,
        subscription_id: &str,
    ) -> Result<ReactivationResponse> {
        let plan_id = {
            let mut customers = self.customers.lock().expect("stub customer table");
            let customer = customers
                .get_mut(uid)
                .ok_or_else(|| SubgateError::UnknownCustomer {
                    uid: uid.to_string(),
                })?;
            let subscription = customer
                .subscriptions
                .iter_mut()
                .find(|sub| sub.subscription_id == subscription_id)
                .ok_or_else(|| SubgateError::UnknownSubscription {
                    subscription_id: subscription_id.to_string(),
                })?;

            subscription.cancel_at_period_end = false;
            subscription.end_at = None;
            subscription.plan_id.clone()
        };

        let plan = self
            .plan(&plan_id)
            .ok_or(SubgateError::UnknownSubscriptionPlan {
                plan_id: Some(plan_id),
            })?
            .clone();
        Ok(ReactivationResponse {
            message: Some("subscription reactivated".to_string()),
            plan,
        })
    }

    async fn close(&self) -> Result<()> {
        Ok(())
    }
}

fn epoch_now() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or(0)
}

fn derive_last4(payment_token: &str) -> String {
    let digits: String = payment_token
        .chars()
        .filter(char::is_ascii_digit)
        .collect();
    if digits.len() >= 4 {
        digits[digits.len() - 4..].to_string()
    } else {
        "4242".to_string()
    }
}

fn canned_plans() -> Vec<Plan> {
    let metadata = |set: &str, order: &str| ProductMetadata {
        product_set: Some(set.to_string()),
        product_set_order: Some(order.to_string()),
        extra: Default::default(),
    };

    vec![
        Plan {
            plan_id: "plan_stub_basic".to_string(),
            product_id: "prod_stub_storage".to_string(),
            product_name: "Stub Storage".to_string(),
            plan_name: Some("Basic".to_string()),
            interval: "month".to_string(),
            amount: 500,
            currency: "usd".to_string(),
            product_metadata: Some(metadata("stub_storage", "1")),
        },
        Plan {
            plan_id: "plan_stub_pro".to_string(),
            product_id: "prod_stub_storage".to_string(),
            product_name: "Stub Storage".to_string(),
            plan_name: Some("Pro".to_string()),
            interval: "month".to_string(),
            amount: 1500,
            currency: "usd".to_string(),
            product_metadata: Some(metadata("stub_storage", "2")),
        },
        Plan {
            plan_id: "plan_stub_relay".to_string(),
            product_id: "prod_stub_relay".to_string(),
            product_name: "Stub Relay".to_string(),
            plan_name: None,
            interval: "year".to_string(),
            amount: 9900,
            currency: "usd".to_string(),
            product_metadata: None,
        },
    ]
}
