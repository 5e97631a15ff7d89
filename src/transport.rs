//! HTTP transport for the billing backend.
//!
//! One attempt per call, always: retries and circuit breaking belong to the
//! backend's own edge, not this layer. Every request carries the static
//! bearer credential; the credential is never logged.

use crate::config::SubgateConfig;
use crate::endpoints::{self, Operation};
use crate::error::{BackendFault, Result, SubgateError};
use crate::models::{
    BackendMessage, CreateSubscriptionPayload, CreateSubscriptionRequest, Customer, ErrorEnvelope,
    Plan, Subscription, SubscriptionList, UpdateCustomerPayload, UpdateSubscriptionPayload,
};
use reqwest::header;
use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;
use std::time::Duration;
use thiserror::Error;

pub type TransportResult<T> = std::result::Result<T, TransportFault>;

/// A failed exchange with the backend.
#[derive(Debug, Error)]
pub enum TransportFault {
    /// Non-2xx response. The fault carries the envelope's errno and message
    /// when the body was a well-formed envelope, the raw body text otherwise.
    #[error(transparent)]
    Backend(#[from] BackendFault),

    /// 2xx response whose body did not match the operation's success schema.
    #[error("invalid {operation} response from backend: {detail}")]
    InvalidResponse {
        operation: &'static str,
        detail: String,
    },

    /// No usable response at all: connect failure, timeout, or body read.
    #[error("{operation} request failed")]
    Http {
        operation: &'static str,
        #[source]
        source: reqwest::Error,
    },
}

impl From<TransportFault> for SubgateError {
    fn from(fault: TransportFault) -> Self {
        match fault {
            TransportFault::Backend(fault) => Self::Backend(fault),
            TransportFault::InvalidResponse { operation, detail } => {
                Self::InvalidBackendResponse { operation, detail }
            }
            TransportFault::Http { operation, source } => Self::Http { operation, source },
        }
    }
}

/// The wire operations the proxy performs against the backend, plus resource
/// release. The seam that lets the facade be tested without a server.
#[allow(async_fn_in_trait)]
pub trait BackendTransport: Send + Sync {
    async fn list_plans(&self) -> TransportResult<Vec<Plan>>;

    async fn list_subscriptions(&self, uid: &str) -> TransportResult<SubscriptionList>;

    async fn get_customer(&self, uid: &str) -> TransportResult<Customer>;

    async fn update_customer(&self, uid: &str, payment_token: &str) -> TransportResult<Customer>;

    async fn delete_customer(&self, uid: &str) -> TransportResult<BackendMessage>;

    async fn create_subscription(
        &self,
        uid: &str,
        request: &CreateSubscriptionRequest,
    ) -> TransportResult<SubscriptionList>;

    async fn update_subscription(
        &self,
        uid: &str,
        subscription_id: &str,
        plan_id: &str,
    ) -> TransportResult<Subscription>;

    async fn cancel_subscription(
        &self,
        uid: &str,
        subscription_id: &str,
    ) -> TransportResult<BackendMessage>;

    async fn reactivate_subscription(
        &self,
        uid: &str,
        subscription_id: &str,
    ) -> TransportResult<BackendMessage>;

    /// Release transport resources. Called once, from the facade's close.
    async fn close(&self) -> Result<()>;
}

/// reqwest-backed transport, built once from config.
pub struct HttpTransport {
    client: reqwest::Client,
    base_url: String,
    api_key: SecretString,
}

impl std::fmt::Debug for HttpTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpTransport")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl HttpTransport {
    /// Build the transport from validated config.
    pub fn new(config: &SubgateConfig) -> Result<Self> {
        let base = url::Url::parse(&config.base_url)
            .map_err(|e| SubgateError::Config(format!("invalid base URL: {e}")))?;

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .connect_timeout(Duration::from_secs(config.connect_timeout_seconds))
            .pool_max_idle_per_host(config.pool_max_idle_per_host)
            .build()
            .map_err(|e| SubgateError::Config(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: base.as_str().trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
        })
    }

    fn request(&self, op: Operation, path: &str) -> reqwest::RequestBuilder {
        tracing::debug!(
            target: "subgate::transport",
            operation = op.name(),
            method = %op.method(),
            path,
            "dispatching backend request"
        );
        self.client
            .request(op.method(), format!("{}{}", self.base_url, path))
            .header(header::AUTHORIZATION, self.api_key.expose_secret().as_str())
    }

    async fn execute<R: DeserializeOwned>(
        &self,
        op: Operation,
        request: reqwest::RequestBuilder,
    ) -> TransportResult<R> {
        let response = request.send().await.map_err(|source| TransportFault::Http {
            operation: op.name(),
            source,
        })?;
        let status = response.status();
        let body = response.bytes().await.map_err(|source| TransportFault::Http {
            operation: op.name(),
            source,
        })?;

        if status.is_success() {
            return serde_json::from_slice::<R>(&body).map_err(|e| {
                TransportFault::InvalidResponse {
                    operation: op.name(),
                    detail: e.to_string(),
                }
            });
        }

        let fault = match serde_json::from_slice::<ErrorEnvelope>(&body) {
            Ok(envelope) => BackendFault::new(status.as_u16(), envelope.errno, envelope.message),
            Err(_) => BackendFault::new(
                status.as_u16(),
                None,
                String::from_utf8_lossy(&body).into_owned(),
            ),
        };
        tracing::debug!(
            target: "subgate::transport",
            operation = op.name(),
            status = fault.status,
            errno = ?fault.errno,
            "backend returned fault"
        );
        Err(TransportFault::Backend(fault))
    }
}

impl BackendTransport for HttpTransport {
    async fn list_plans(&self) -> TransportResult<Vec<Plan>> {
        let op = Operation::ListPlans;
        self.execute(op, self.request(op, &endpoints::plans_path()))
            .await
    }

    async fn list_subscriptions(&self, uid: &str) -> TransportResult<SubscriptionList> {
        let op = Operation::ListSubscriptions;
        self.execute(op, self.request(op, &endpoints::subscriptions_path(uid)))
            .await
    }

    async fn get_customer(&self, uid: &str) -> TransportResult<Customer> {
        let op = Operation::GetCustomer;
        self.execute(op, self.request(op, &endpoints::customer_path(uid)))
            .await
    }

    async fn update_customer(&self, uid: &str, payment_token: &str) -> TransportResult<Customer> {
        let op = Operation::UpdateCustomer;
        let payload = UpdateCustomerPayload {
            pmt_token: payment_token,
        };
        self.execute(
            op,
            self.request(op, &endpoints::customer_path(uid)).json(&payload),
        )
        .await
    }

    async fn delete_customer(&self, uid: &str) -> TransportResult<BackendMessage> {
        let op = Operation::DeleteCustomer;
        self.execute(op, self.request(op, &endpoints::customer_path(uid)))
            .await
    }

    async fn create_subscription(
        &self,
        uid: &str,
        request: &CreateSubscriptionRequest,
    ) -> TransportResult<SubscriptionList> {
        let op = Operation::CreateSubscription;
        let payload = CreateSubscriptionPayload::from_request(request);
        self.execute(
            op,
            self.request(op, &endpoints::subscriptions_path(uid))
                .json(&payload),
        )
        .await
    }

    async fn update_subscription(
        &self,
        uid: &str,
        subscription_id: &str,
        plan_id: &str,
    ) -> TransportResult<Subscription> {
        let op = Operation::UpdateSubscription;
        let payload = UpdateSubscriptionPayload { plan_id };
        self.execute(
            op,
            self.request(op, &endpoints::subscription_path(uid, subscription_id))
                .json(&payload),
        )
        .await
    }

    async fn cancel_subscription(
        &self,
        uid: &str,
        subscription_id: &str,
    ) -> TransportResult<BackendMessage> {
        let op = Operation::CancelSubscription;
        self.execute(
            op,
            self.request(op, &endpoints::subscription_path(uid, subscription_id)),
        )
        .await
    }

    async fn reactivate_subscription(
        &self,
        uid: &str,
        subscription_id: &str,
    ) -> TransportResult<BackendMessage> {
        let op = Operation::ReactivateSubscription;
        self.execute(
            op,
            self.request(op, &endpoints::subscription_path(uid, subscription_id)),
        )
        .await
    }

    async fn close(&self) -> Result<()> {
        // The pool drains when the client drops; nothing to flush eagerly.
        Ok(())
    }
}

/// Scriptable transport for exercising the facade without a server.
#[cfg(any(test, feature = "test-transport"))]
pub mod test {
    use super::*;
    use std::collections::{HashMap, VecDeque};
    use std::sync::Mutex;

    enum MockOutcome {
        Body(serde_json::Value),
        Fault(BackendFault),
    }

    /// Mock transport with per-operation scripted outcomes and call
    /// recording. Outcomes are consumed in FIFO order per operation;
    /// an unscripted call panics.
    #[derive(Default)]
    pub struct MockTransport {
        outcomes: Mutex<HashMap<&'static str, VecDeque<MockOutcome>>>,
        calls: Mutex<Vec<&'static str>>,
        fail_close: bool,
    }

    impl MockTransport {
        #[must_use]
        pub fn new() -> Self {
            Self::default()
        }

        /// Script a successful response body for an operation.
        #[must_use]
        pub fn respond(self, op: Operation, body: serde_json::Value) -> Self {
            self.outcomes
                .lock()
                .unwrap()
                .entry(op.name())
                .or_default()
                .push_back(MockOutcome::Body(body));
            self
        }

        /// Script a backend fault for an operation.
        #[must_use]
        pub fn fail(
            self,
            op: Operation,
            status: u16,
            errno: Option<i64>,
            message: &str,
        ) -> Self {
            self.outcomes
                .lock()
                .unwrap()
                .entry(op.name())
                .or_default()
                .push_back(MockOutcome::Fault(BackendFault::new(status, errno, message)));
            self
        }

        /// Make `close()` report a failure.
        #[must_use]
        pub fn fail_close(mut self) -> Self {
            self.fail_close = true;
            self
        }

        /// Operation names in call order (for assertions).
        pub fn calls(&self) -> Vec<&'static str> {
            self.calls.lock().unwrap().clone()
        }

        pub fn call_count(&self, op: Operation) -> usize {
            self.calls
                .lock()
                .unwrap()
                .iter()
                .filter(|name| **name == op.name())
                .count()
        }

        fn take<R: DeserializeOwned>(&self, op: Operation) -> TransportResult<R> {
            self.calls.lock().unwrap().push(op.name());
            let outcome = self
                .outcomes
                .lock()
                .unwrap()
                .get_mut(op.name())
                .and_then(VecDeque::pop_front)
                .unwrap_or_else(|| panic!("no scripted outcome for {}", op.name()));
            match outcome {
                MockOutcome::Body(body) => serde_json::from_value(body).map_err(|e| {
                    TransportFault::InvalidResponse {
                        operation: op.name(),
                        detail: e.to_string(),
                    }
                }),
                MockOutcome::Fault(fault) => Err(TransportFault::Backend(fault)),
            }
        }
    }

    impl BackendTransport for MockTransport {
        async fn list_plans(&self) -> TransportResult<Vec<Plan>> {
            self.take(Operation::ListPlans)
        }

        async fn list_subscriptions(&self, _uid: &str) -> TransportResult<SubscriptionList> {
            self.take(Operation::ListSubscriptions)
        }

        async fn get_customer(&self, _uid: &str) -> TransportResult<Customer> {
            self.take(Operation::GetCustomer)
        }

        async fn update_customer(
            &self,
            _uid: &str,
            _payment_token: &str,
        ) -> TransportResult<Customer> {
            self.take(Operation::UpdateCustomer)
        }

        async fn delete_customer(&self, _uid: &str) -> TransportResult<BackendMessage> {
            self.take(Operation::DeleteCustomer)
        }

        async fn create_subscription(
            &self,
            _uid: &str,
            _request: &CreateSubscriptionRequest,
        ) -> TransportResult<SubscriptionList> {
            self.take(Operation::CreateSubscription)
        }

        async fn update_subscription(
            &self,
            _uid: &str,
            _subscription_id: &str,
            _plan_id: &str,
        ) -> TransportResult<Subscription> {
            self.take(Operation::UpdateSubscription)
        }

        async fn cancel_subscription(
            &self,
            _uid: &str,
            _subscription_id: &str,
        ) -> TransportResult<BackendMessage> {
            self.take(Operation::CancelSubscription)
        }

        async fn reactivate_subscription(
            &self,
            _uid: &str,
            _subscription_id: &str,
        ) -> TransportResult<BackendMessage> {
            self.take(Operation::ReactivateSubscription)
        }

        async fn close(&self) -> Result<()> {
            if self.fail_close {
                Err(SubgateError::TransportShutdown(
                    "mock transport close failure".to_string(),
                ))
            } else {
                Ok(())
            }
        }
    }
}
