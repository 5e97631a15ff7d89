//! The proxy facade.
//!
//! Three variants, decided once at construction from config: a live HTTP
//! client, a disabled client that fails everything fast, and an in-memory
//! stub. All three expose the same operation surface.

use crate::cache::{Cache, CacheExt, InMemoryCache};
use crate::config::SubgateConfig;
use crate::error::{Result, SubgateError};
use crate::models::{
    BackendMessage, CreateSubscriptionRequest, Customer, Plan, ReactivationResponse, Subscription,
    SubscriptionList,
};
use crate::stub::StubClient;
use crate::translate;
use crate::transport::{BackendTransport, HttpTransport, TransportFault};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Logical cache key for the plan catalog. The catalog is global, so one
/// key suffices.
const PLANS_CACHE_KEY: &str = "listPlans";

const LOG_TARGET: &str = "subgate::client";

/// The operation surface shared by every facade variant.
#[allow(async_fn_in_trait)]
pub trait SubscriptionService: Send + Sync {
    /// Fetch the plan catalog, cache-first where a cache is configured.
    async fn list_plans(&self) -> Result<Vec<Plan>>;

    /// List a customer's subscriptions. A customer the backend refuses to
    /// disclose (403) simply has none.
    async fn list_subscriptions(&self, uid: &str) -> Result<SubscriptionList>;

    async fn get_customer(&self, uid: &str) -> Result<Customer>;

    /// Replace the customer's payment method.
    async fn update_customer(&self, uid: &str, payment_token: &str) -> Result<Customer>;

    /// Delete the customer record. Idempotent: deleting an absent customer
    /// succeeds.
    async fn delete_customer(&self, uid: &str) -> Result<BackendMessage>;

    async fn create_subscription(
        &self,
        uid: &str,
        request: &CreateSubscriptionRequest,
    ) -> Result<SubscriptionList>;

    /// Move a subscription to a different plan.
    async fn update_subscription(
        &self,
        uid: &str,
        subscription_id: &str,
        plan_id: &str,
    ) -> Result<Subscription>;

    async fn cancel_subscription(
        &self,
        uid: &str,
        subscription_id: &str,
    ) -> Result<BackendMessage>;

    /// Undo a pending cancellation. The response carries the affected plan.
    async fn reactivate_subscription(
        &self,
        uid: &str,
        subscription_id: &str,
    ) -> Result<ReactivationResponse>;

    /// Release transport and cache resources, aggregating failures rather
    /// than stopping at the first. Subsequent calls are no-ops.
    async fn close(&self) -> Result<()>;
}

// =============================================================================
// Live facade
// =============================================================================

/// Live facade: real transport, optional plan-catalog cache, fault
/// translation per operation.
pub struct LiveClient<T: BackendTransport> {
    transport: T,
    cache: Option<Arc<dyn Cache>>,
    plans_ttl: Duration,
    closed: AtomicBool,
}

impl<T: BackendTransport> LiveClient<T> {
    #[must_use]
    pub fn new(transport: T, cache: Option<Arc<dyn Cache>>, plans_ttl: Duration) -> Self {
        Self {
            transport,
            cache,
            plans_ttl,
            closed: AtomicBool::new(false),
        }
    }

    async fn cached_plans(&self) -> Option<Vec<Plan>> {
        let cache = self.cache.as_deref()?;
        match cache.get::<Vec<Plan>>(PLANS_CACHE_KEY).await {
            Ok(Some(plans)) => Some(plans),
            Ok(None) => None,
            Err(err) => {
                tracing::warn!(
                    target: "subgate::cache",
                    error = %err,
                    "plan cache read failed, fetching from backend"
                );
                None
            }
        }
    }

    async fn store_plans(&self, plans: &[Plan]) {
        let Some(cache) = self.cache.as_deref() else {
            return;
        };
        if let Err(err) = cache
            .set(PLANS_CACHE_KEY, &plans, Some(self.plans_ttl))
            .await
        {
            tracing::warn!(
                target: "subgate::cache",
                error = %err,
                "plan cache write failed"
            );
        }
    }
}

impl<T: BackendTransport> SubscriptionService for LiveClient<T> {
    async fn list_plans(&self) -> Result<Vec<Plan>> {
        if let Some(plans) = self.cached_plans().await {
            return Ok(plans);
        }

        let plans = match self.transport.list_plans().await {
            Ok(plans) => plans,
            Err(TransportFault::Backend(fault)) => return Err(translate::list_plans(fault)),
            Err(other) => return Err(other.into()),
        };
        self.store_plans(&plans).await;
        Ok(plans)
    }

    async fn list_subscriptions(&self, uid: &str) -> Result<SubscriptionList> {
        match self.transport.list_subscriptions(uid).await {
            Ok(list) => Ok(list),
            // The backend answers 403 for accounts it will not disclose;
            // to this caller that customer has no subscriptions.
            Err(TransportFault::Backend(fault)) if fault.status == 403 => {
                tracing::debug!(
                    target: LOG_TARGET,
                    uid,
                    "listSubscriptions forbidden, reporting empty list"
                );
                Ok(SubscriptionList::default())
            }
            Err(TransportFault::Backend(fault)) => Err(translate::list_subscriptions(fault, uid)),
            Err(other) => Err(other.into()),
        }
    }

    async fn get_customer(&self, uid: &str) -> Result<Customer> {
        match self.transport.get_customer(uid).await {
            Ok(customer) => Ok(customer),
            Err(TransportFault::Backend(fault)) => Err(translate::get_customer(fault, uid)),
            Err(other) => Err(other.into()),
        }
    }

    async fn update_customer(&self, uid: &str, payment_token: &str) -> Result<Customer> {
        match self.transport.update_customer(uid, payment_token).await {
            Ok(customer) => Ok(customer),
            Err(TransportFault::Backend(fault)) => Err(translate::update_customer(fault, uid)),
            Err(other) => Err(other.into()),
        }
    }

    async fn delete_customer(&self, uid: &str) -> Result<BackendMessage> {
        match self.transport.delete_customer(uid).await {
            Ok(message) => Ok(message),
            // Deleting a customer the backend never heard of is a success.
            Err(TransportFault::Backend(fault)) if fault.status == 404 => {
                tracing::info!(
                    target: LOG_TARGET,
                    uid,
                    "deleteCustomer: customer already absent"
                );
                Ok(BackendMessage {
                    message: "unknown customer".to_string(),
                })
            }
            Err(TransportFault::Backend(fault)) => Err(translate::delete_customer(fault, uid)),
            Err(other) => Err(other.into()),
        }
    }

    async fn create_subscription(
        &self,
        uid: &str,
        request: &CreateSubscriptionRequest,
    ) -> Result<SubscriptionList> {
        match self.transport.create_subscription(uid, request).await {
            Ok(list) => Ok(list),
            Err(TransportFault::Backend(fault)) => {
                Err(translate::create_subscription(fault, uid, request))
            }
            Err(other) => Err(other.into()),
        }
    }

    async fn update_subscription(
        &self,
        uid: &str,
        subscription_id: &str,
        plan_id: &str,
    ) -> Result<Subscription> {
        match self
            .transport
            .update_subscription(uid, subscription_id, plan_id)
            .await
        {
            Ok(subscription) => Ok(subscription),
            Err(TransportFault::Backend(fault)) => Err(translate::update_subscription(
                fault,
                uid,
                subscription_id,
                plan_id,
            )),
            Err(other) => Err(other.into()),
        }
    }

    async fn cancel_subscription(
        &self,
        uid: &str,
        subscription_id: &str,
    ) -> Result<BackendMessage> {
        match self
            .transport
            .cancel_subscription(uid, subscription_id)
            .await
        {
            Ok(message) => Ok(message),
            Err(TransportFault::Backend(fault)) => Err(translate::cancel_subscription(
                fault,
                uid,
                subscription_id,
            )),
            Err(other) => Err(other.into()),
        }
    }

    async fn reactivate_subscription(
        &self,
        uid: &str,
        subscription_id: &str,
    ) -> Result<ReactivationResponse> {
        let ack = match self
            .transport
            .reactivate_subscription(uid, subscription_id)
            .await
        {
            Ok(ack) => ack,
            Err(TransportFault::Backend(fault)) => {
                return Err(translate::reactivate_subscription(
                    fault,
                    uid,
                    subscription_id,
                ))
            }
            Err(other) => return Err(other.into()),
        };

        // The backend's ack is bare; resolve the affected plan so the caller
        // can confirm what was restored.
        let subscriptions = self.list_subscriptions(uid).await?;
        let plan_id = subscriptions
            .subscriptions
            .iter()
            .find(|sub| sub.subscription_id == subscription_id)
            .map(|sub| sub.plan_id.clone())
            .ok_or_else(|| SubgateError::UnknownSubscription {
                subscription_id: subscription_id.to_string(),
            })?;

        let plan = self
            .list_plans()
            .await?
            .into_iter()
            .find(|plan| plan.plan_id == plan_id)
            .ok_or(SubgateError::UnknownSubscriptionPlan {
                plan_id: Some(plan_id),
            })?;

        Ok(ReactivationResponse {
            message: Some(ack.message),
            plan,
        })
    }

    async fn close(&self) -> Result<()> {
        if self.closed.swap(true, Ordering::SeqCst) {
            return Ok(());
        }

        let mut failures = Vec::new();
        if let Err(err) = self.transport.close().await {
            failures.push(format!("transport: {err}"));
        }
        if let Some(cache) = self.cache.as_deref() {
            if let Err(err) = cache.close().await {
                failures.push(format!("cache: {err}"));
            }
        }

        if failures.is_empty() {
            Ok(())
        } else {
            Err(SubgateError::Shutdown { failures })
        }
    }
}

// =============================================================================
// Disabled facade
// =============================================================================

/// Facade used when subscription support is switched off. Every operation
/// fails with `FeatureNotEnabled` and nothing ever touches the network.
#[derive(Debug, Clone, Copy, Default)]
pub struct DisabledClient;

impl DisabledClient {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl SubscriptionService for DisabledClient {
    async fn list_plans(&self) -> Result<Vec<Plan>> {
        Err(SubgateError::FeatureNotEnabled)
    }

    async fn list_subscriptions(&self, _uid: &str) -> Result<SubscriptionList> {
        Err(SubgateError::FeatureNotEnabled)
    }

    async fn get_customer(&self, _uid: &str) -> Result<Customer> {
        Err(SubgateError::FeatureNotEnabled)
    }

    async fn update_customer(&self, _uid: &str, _payment_token: &str) -> Result<Customer> {
        Err(SubgateError::FeatureNotEnabled)
    }

    async fn delete_customer(&self, _uid: &str) -> Result<BackendMessage> {
        Err(SubgateError::FeatureNotEnabled)
    }

    async fn create_subscription(
        &self,
        _uid: &str,
        _request: &CreateSubscriptionRequest,
    ) -> Result<SubscriptionList> {
        Err(SubgateError::FeatureNotEnabled)
    }

    async fn update_subscription(
        &self,
        _uid: &str,
        _subscription_id: &str,
        _plan_id: &str,
    ) -> Result<Subscription> {
        Err(SubgateError::FeatureNotEnabled)
    }

    async fn cancel_subscription(
        &self,
        _uid: &str,
        _subscription_id: &str,
    ) -> Result<BackendMessage> {
        Err(SubgateError::FeatureNotEnabled)
    }

    async fn reactivate_subscription(
        &self,
        _uid: &str,
        _subscription_id: &str,
    ) -> Result<ReactivationResponse> {
        Err(SubgateError::FeatureNotEnabled)
    }

    async fn close(&self) -> Result<()> {
        Ok(())
    }
}

// =============================================================================
// Facade selection
// =============================================================================

/// The proxy facade, one of three statically-known variants.
pub enum SubgateClient {
    Live(LiveClient<HttpTransport>),
    Disabled(DisabledClient),
    Stub(StubClient),
}

impl SubgateClient {
    /// Build the facade once from config.
    ///
    /// Stubs win over the enabled flag: a configuration asking for canned
    /// data gets it even while the live integration is switched off.
    pub fn from_config(config: &SubgateConfig) -> Result<Self> {
        if config.use_stubs {
            tracing::info!(target: LOG_TARGET, "serving stub subscription data");
            return Ok(Self::Stub(StubClient::new()));
        }
        if !config.enabled {
            tracing::info!(target: LOG_TARGET, "subscriptions disabled");
            return Ok(Self::Disabled(DisabledClient::new()));
        }

        config.validate()?;
        let transport = HttpTransport::new(config)?;
        let ttl = Duration::from_secs(config.plans_cache_ttl_seconds);
        let cache: Option<Arc<dyn Cache>> = if config.plans_cache_ttl_seconds > 0 {
            Some(Arc::new(InMemoryCache::new(config.cache_max_entries, ttl)))
        } else {
            None
        };
        tracing::info!(
            target: LOG_TARGET,
            base_url = %config.base_url,
            plans_cache_ttl_seconds = config.plans_cache_ttl_seconds,
            "subscription backend configured"
        );
        Ok(Self::Live(LiveClient::new(transport, cache, ttl)))
    }
}

macro_rules! delegate {
    ($self:ident, $client:ident => $call:expr) => {
        match $self {
            SubgateClient::Live($client) => $call,
            SubgateClient::Disabled($client) => $call,
            SubgateClient::Stub($client) => $call,
        }
    };
}

impl SubscriptionService for SubgateClient {
    async fn list_plans(&self) -> Result<Vec<Plan>> {
        delegate!(self, client => client.list_plans().await)
    }

    async fn list_subscriptions(&self, uid: &str) -> Result<SubscriptionList> {
        delegate!(self, client => client.list_subscriptions(uid).await)
    }

    async fn get_customer(&self, uid: &str) -> Result<Customer> {
        delegate!(self, client => client.get_customer(uid).await)
    }

    async fn update_customer(&self, uid: &str, payment_token: &str) -> Result<Customer> {
        delegate!(self, client => client.update_customer(uid, payment_token).await)
    }

    async fn delete_customer(&self, uid: &str) -> Result<BackendMessage> {
        delegate!(self, client => client.delete_customer(uid).await)
    }

    async fn create_subscription(
        &self,
        uid: &str,
        request: &CreateSubscriptionRequest,
    ) -> Result<SubscriptionList> {
        delegate!(self, client => client.create_subscription(uid, request).await)
    }

    async fn update_subscription(
        &self,
        uid: &str,
        subscription_id: &str,
        plan_id: &str,
    ) -> Result<Subscription> {
        delegate!(self, client => client.update_subscription(uid, subscription_id, plan_id).await)
    }

    async fn cancel_subscription(
        &self,
        uid: &str,
        subscription_id: &str,
    ) -> Result<BackendMessage> {
        delegate!(self, client => client.cancel_subscription(uid, subscription_id).await)
    }

    async fn reactivate_subscription(
        &self,
        uid: &str,
        subscription_id: &str,
    ) -> Result<ReactivationResponse> {
        delegate!(self, client => client.reactivate_subscription(uid, subscription_id).await)
    }

    async fn close(&self) -> Result<()> {
        delegate!(self, client => client.close().await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::endpoints::Operation;
    use crate::transport::test::MockTransport;
    use serde_json::json;

    fn plan_body(plan_id: &str) -> serde_json::Value {
        json!({
            "plan_id": plan_id,
            "product_id": "prod_1",
            "product_name": "Example Product",
            "interval": "month",
            "amount": 500,
            "currency": "usd"
        })
    }

    fn subscription_body(subscription_id: &str, plan_id: &str) -> serde_json::Value {
        json!({
            "subscription_id": subscription_id,
            "plan_id": plan_id,
            "status": "active",
            "cancel_at_period_end": false,
            "current_period_start": 1_565_816_388,
            "current_period_end": 1_568_408_388
        })
    }

    fn live(transport: MockTransport) -> LiveClient<MockTransport> {
        LiveClient::new(transport, None, Duration::from_secs(600))
    }

    fn cached_live(transport: MockTransport) -> LiveClient<MockTransport> {
        let cache: Arc<dyn Cache> =
            Arc::new(InMemoryCache::new(16, Duration::from_secs(600)));
        LiveClient::new(transport, Some(cache), Duration::from_secs(600))
    }

    #[tokio::test]
    async fn test_list_plans_caches_after_first_fetch() {
        let transport =
            MockTransport::new().respond(Operation::ListPlans, json!([plan_body("plan_1")]));
        let client = cached_live(transport);

        let first = client.list_plans().await.unwrap();
        let second = client.list_plans().await.unwrap();
        assert_eq!(first, second);
        assert_eq!(client.transport.call_count(Operation::ListPlans), 1);
    }

    #[tokio::test]
    async fn test_list_plans_poisoned_cache_entry_falls_back_to_backend() {
        let transport =
            MockTransport::new().respond(Operation::ListPlans, json!([plan_body("plan_1")]));
        let cache = Arc::new(InMemoryCache::new(16, Duration::from_secs(600)));
        cache
            .set_bytes("listPlans", b"garbage".to_vec(), None)
            .await
            .unwrap();
        let client = LiveClient::new(
            transport,
            Some(cache as Arc<dyn Cache>),
            Duration::from_secs(600),
        );

        let plans = client.list_plans().await.unwrap();
        assert_eq!(plans.len(), 1);
        assert_eq!(client.transport.call_count(Operation::ListPlans), 1);
    }

    #[tokio::test]
    async fn test_list_plans_without_cache_always_fetches() {
        let transport = MockTransport::new()
            .respond(Operation::ListPlans, json!([plan_body("plan_1")]))
            .respond(Operation::ListPlans, json!([plan_body("plan_1")]));
        let client = live(transport);

        client.list_plans().await.unwrap();
        client.list_plans().await.unwrap();
        assert_eq!(client.transport.call_count(Operation::ListPlans), 2);
    }

    #[tokio::test]
    async fn test_list_plans_fault_propagates_and_is_not_cached() {
        let transport = MockTransport::new()
            .fail(Operation::ListPlans, 503, None, "unavailable")
            .respond(Operation::ListPlans, json!([plan_body("plan_1")]));
        let client = cached_live(transport);

        let err = client.list_plans().await.unwrap_err();
        assert!(matches!(err, SubgateError::Backend(f) if f.status == 503));

        // the failure left nothing behind; the retry fetches and succeeds
        let plans = client.list_plans().await.unwrap();
        assert_eq!(plans.len(), 1);
    }

    #[tokio::test]
    async fn test_list_subscriptions_403_reports_empty() {
        let transport =
            MockTransport::new().fail(Operation::ListSubscriptions, 403, None, "forbidden");
        let client = live(transport);

        let list = client.list_subscriptions("uid1").await.unwrap();
        assert!(list.subscriptions.is_empty());
    }

    #[tokio::test]
    async fn test_list_subscriptions_404_is_unknown_customer() {
        let transport =
            MockTransport::new().fail(Operation::ListSubscriptions, 404, None, "not found");
        let client = live(transport);

        let err = client.list_subscriptions("uid1").await.unwrap_err();
        assert!(matches!(err, SubgateError::UnknownCustomer { uid } if uid == "uid1"));
    }

    #[tokio::test]
    async fn test_delete_customer_404_synthesizes_success() {
        let transport = MockTransport::new().fail(Operation::DeleteCustomer, 404, None, "nope");
        let client = live(transport);

        let ack = client.delete_customer("uid1").await.unwrap();
        assert_eq!(ack.message, "unknown customer");
    }

    #[tokio::test]
    async fn test_delete_customer_other_fault_propagates() {
        let transport = MockTransport::new().fail(Operation::DeleteCustomer, 500, None, "boom");
        let client = live(transport);

        let err = client.delete_customer("uid1").await.unwrap_err();
        assert!(matches!(err, SubgateError::Backend(f) if f.status == 500));
    }

    #[tokio::test]
    async fn test_create_subscription_maps_payment_rejection() {
        let transport =
            MockTransport::new().fail(Operation::CreateSubscription, 402, None, "card declined");
        let client = live(transport);

        let request = CreateSubscriptionRequest {
            payment_token: "tok_visa".to_string(),
            plan_id: "plan_1".to_string(),
            display_name: "Jane Doe".to_string(),
            email: "jane@example.com".to_string(),
        };
        let err = client.create_subscription("uid1", &request).await.unwrap_err();
        assert!(
            matches!(err, SubgateError::RejectedSubscriptionPaymentToken { reason } if reason == "card declined")
        );
    }

    #[tokio::test]
    async fn test_update_subscription_errno_mapping_through_facade() {
        let transport = MockTransport::new().fail(
            Operation::UpdateSubscription,
            400,
            Some(1003),
            "already changed",
        );
        let client = live(transport);

        let err = client
            .update_subscription("uid1", "sub1", "plan_2")
            .await
            .unwrap_err();
        assert!(matches!(err, SubgateError::SubscriptionAlreadyChanged));
    }

    #[tokio::test]
    async fn test_reactivate_returns_affected_plan() {
        let transport = MockTransport::new()
            .respond(
                Operation::ReactivateSubscription,
                json!({"message": "reactivated"}),
            )
            .respond(
                Operation::ListSubscriptions,
                json!({"subscriptions": [subscription_body("sub1", "plan_1")]}),
            )
            .respond(Operation::ListPlans, json!([plan_body("plan_1")]));
        let client = live(transport);

        let response = client
            .reactivate_subscription("uid1", "sub1")
            .await
            .unwrap();
        assert_eq!(response.plan.plan_id, "plan_1");
        assert_eq!(response.message.as_deref(), Some("reactivated"));
    }

    #[tokio::test]
    async fn test_reactivate_404_literal_maps() {
        let transport = MockTransport::new().fail(
            Operation::ReactivateSubscription,
            404,
            None,
            "invalid subscription id",
        );
        let client = live(transport);

        let err = client
            .reactivate_subscription("uid1", "sub1")
            .await
            .unwrap_err();
        assert!(matches!(err, SubgateError::UnknownSubscription { .. }));
    }

    #[tokio::test]
    async fn test_cancel_literal_maps_on_400() {
        let transport =
            MockTransport::new().fail(Operation::CancelSubscription, 400, None, "invalid uid");
        let client = live(transport);

        let err = client.cancel_subscription("uid1", "sub1").await.unwrap_err();
        assert!(matches!(err, SubgateError::UnknownCustomer { .. }));
    }

    struct FailingCache;

    #[async_trait::async_trait]
    impl Cache for FailingCache {
        async fn get_bytes(&self, _key: &str) -> Result<Option<Vec<u8>>> {
            Ok(None)
        }

        async fn set_bytes(
            &self,
            _key: &str,
            _value: Vec<u8>,
            _ttl: Option<Duration>,
        ) -> Result<()> {
            Ok(())
        }

        async fn delete(&self, _key: &str) -> Result<()> {
            Ok(())
        }

        async fn close(&self) -> Result<()> {
            Err(SubgateError::Cache("connection teardown failed".to_string()))
        }

        fn is_healthy(&self) -> bool {
            false
        }
    }

    #[tokio::test]
    async fn test_close_reports_both_transport_and_cache_failures() {
        let transport = MockTransport::new().fail_close();
        let client = LiveClient::new(
            transport,
            Some(Arc::new(FailingCache) as Arc<dyn Cache>),
            Duration::from_secs(600),
        );

        let err = client.close().await.unwrap_err();
        match err {
            SubgateError::Shutdown { failures } => {
                assert_eq!(failures.len(), 2);
                assert!(failures[0].starts_with("transport:"));
                assert!(failures[1].starts_with("cache:"));
            }
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_close_aggregates_failures_and_is_idempotent() {
        let transport = MockTransport::new().fail_close();
        let client = cached_live(transport);

        let err = client.close().await.unwrap_err();
        match err {
            SubgateError::Shutdown { failures } => {
                assert_eq!(failures.len(), 1);
                assert!(failures[0].starts_with("transport:"));
            }
            other => panic!("unexpected: {other:?}"),
        }

        // second close is a no-op
        assert!(client.close().await.is_ok());
    }

    #[tokio::test]
    async fn test_disabled_client_rejects_everything() {
        let client = DisabledClient::new();

        assert!(matches!(
            client.list_plans().await,
            Err(SubgateError::FeatureNotEnabled)
        ));
        assert!(matches!(
            client.get_customer("uid1").await,
            Err(SubgateError::FeatureNotEnabled)
        ));
        assert!(matches!(
            client.cancel_subscription("uid1", "sub1").await,
            Err(SubgateError::FeatureNotEnabled)
        ));
        assert!(client.close().await.is_ok());
    }

    #[tokio::test]
    async fn test_from_config_selects_variant() {
        let disabled = SubgateClient::from_config(&SubgateConfig::default()).unwrap();
        assert!(matches!(disabled, SubgateClient::Disabled(_)));

        let stub = SubgateClient::from_config(
            &SubgateConfig::new().with_enabled(true).with_stubs(true),
        )
        .unwrap();
        assert!(matches!(stub, SubgateClient::Stub(_)));

        // stubs are served even while the integration is switched off
        let stub = SubgateClient::from_config(&SubgateConfig::new().with_stubs(true)).unwrap();
        assert!(matches!(stub, SubgateClient::Stub(_)));

        let live = SubgateClient::from_config(
            &SubgateConfig::new()
                .with_enabled(true)
                .with_base_url("https://billing.example.com")
                .with_api_key("sk_test_123"),
        )
        .unwrap();
        assert!(matches!(live, SubgateClient::Live(_)));
    }

    #[tokio::test]
    async fn test_from_config_rejects_invalid_live_settings() {
        let result = SubgateClient::from_config(&SubgateConfig::new().with_enabled(true));
        assert!(matches!(result, Err(SubgateError::Config(_))));
    }
}
