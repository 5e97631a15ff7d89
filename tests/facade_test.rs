//! Facade behavior through the public API.

use subgate::{
    is_plan_upgrade, CreateSubscriptionRequest, SubgateClient, SubgateConfig, SubgateError,
    SubscriptionService,
};

fn stub_client() -> SubgateClient {
    let config = SubgateConfig::new().with_enabled(true).with_stubs(true);
    SubgateClient::from_config(&config).unwrap()
}

#[tokio::test]
async fn disabled_facade_rejects_every_operation() {
    let client = SubgateClient::from_config(&SubgateConfig::default()).unwrap();

    assert!(matches!(
        client.list_plans().await,
        Err(SubgateError::FeatureNotEnabled)
    ));
    assert!(matches!(
        client.list_subscriptions("uid1").await,
        Err(SubgateError::FeatureNotEnabled)
    ));
    assert!(matches!(
        client.delete_customer("uid1").await,
        Err(SubgateError::FeatureNotEnabled)
    ));
    assert!(client.close().await.is_ok());
}

#[tokio::test]
async fn stubs_are_served_even_while_disabled() {
    let config = SubgateConfig::new().with_stubs(true); // enabled stays false
    let client = SubgateClient::from_config(&config).unwrap();
    let plans = client.list_plans().await.unwrap();
    assert!(!plans.is_empty());
}

#[tokio::test]
async fn stub_facade_runs_a_full_subscription_flow() {
    let client = stub_client();

    let plans = client.list_plans().await.unwrap();
    assert!(!plans.is_empty());

    let plan_id = &plans[0].plan_id;
    let request = CreateSubscriptionRequest {
        payment_token: "tok_1234567890123456".to_string(),
        plan_id: plan_id.clone(),
        display_name: "Integration Test".to_string(),
        email: "it@example.com".to_string(),
    };

    let list = client.create_subscription("uid_it", &request).await.unwrap();
    assert_eq!(list.subscriptions.len(), 1);
    let sub_id = list.subscriptions[0].subscription_id.clone();

    client.cancel_subscription("uid_it", &sub_id).await.unwrap();
    let response = client
        .reactivate_subscription("uid_it", &sub_id)
        .await
        .unwrap();
    assert_eq!(&response.plan.plan_id, plan_id);

    let customer = client.get_customer("uid_it").await.unwrap();
    assert_eq!(customer.subscriptions.len(), 1);

    client.delete_customer("uid_it").await.unwrap();
    assert!(matches!(
        client.get_customer("uid_it").await,
        Err(SubgateError::UnknownCustomer { .. })
    ));

    client.close().await.unwrap();
}

#[tokio::test]
async fn stub_catalog_supports_the_upgrade_check() {
    let client = stub_client();
    let plans = client.list_plans().await.unwrap();

    let basic = plans
        .iter()
        .find(|p| p.plan_id == "plan_stub_basic")
        .unwrap();
    let pro = plans.iter().find(|p| p.plan_id == "plan_stub_pro").unwrap();
    let relay = plans
        .iter()
        .find(|p| p.plan_id == "plan_stub_relay")
        .unwrap();

    assert!(is_plan_upgrade(
        basic.product_metadata.as_ref(),
        pro.product_metadata.as_ref()
    )
    .unwrap());
    assert!(!is_plan_upgrade(
        pro.product_metadata.as_ref(),
        basic.product_metadata.as_ref()
    )
    .unwrap());

    // a plan with no metadata is unknown to the upgrade check
    assert!(is_plan_upgrade(
        basic.product_metadata.as_ref(),
        relay.product_metadata.as_ref()
    )
    .is_err());
}
