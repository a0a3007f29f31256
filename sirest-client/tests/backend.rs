//! Client against an in-process fake backend

mod common;

use common::{ANON_TOKEN, FakeBackend};
use shared::models::{PaymentMethod, RestaurantConfig, Role};
use shared::order::{OrderDraft, OrderFilter, OrderItem, OrderStatus};
use sirest_client::{
    ClientError, OrderService, PaymentService, RefetchRegistry, Resource, ResourcePoller,
    SettleRequest, Session,
};
use std::time::Duration;

async fn login(backend: &FakeBackend, email: &str) -> Session {
    backend.client().login(email, "demo123").await.unwrap()
}

fn soup_and_bread(table: u32) -> OrderDraft {
    let mut draft = OrderDraft::dine_in(table);
    draft.add_item(OrderItem::new("p1", "Soup", 10.0, 2)).unwrap();
    draft.add_item(OrderItem::new("p2", "Bread", 3.0, 1)).unwrap();
    draft
}

#[tokio::test]
async fn test_login_uses_anon_token_then_session_token() {
    let backend = FakeBackend::start().await;
    let client = backend.client();

    let session = client.login("Mesero@sirest.co", "demo123").await.unwrap();
    assert_eq!(session.role(), Role::Waiter);
    assert_eq!(session.token(), "tok-mesero@sirest.co");

    client.list_orders(&session).await.unwrap();

    let st = backend.state.lock();
    assert_eq!(
        st.auth_for("POST auth/login"),
        vec![Some(format!("Bearer {ANON_TOKEN}"))]
    );
    assert_eq!(
        st.auth_for("GET orders"),
        vec![Some("Bearer tok-mesero@sirest.co".to_string())]
    );
}

#[tokio::test]
async fn test_every_request_is_json() {
    let backend = FakeBackend::start().await;
    let waiter = login(&backend, "mesero@sirest.co").await;
    let client = backend.client();
    client.list_orders(&waiter).await.unwrap();
    let create = soup_and_bread(1).build(waiter.user_id(), None).unwrap();
    client.create_order(&waiter, &create).await.unwrap();

    let st = backend.state.lock();
    assert_eq!(st.content_types.len(), 3);
    for (route, content_type) in &st.content_types {
        assert_eq!(content_type.as_deref(), Some("application/json"), "{route}");
    }
}

#[tokio::test]
async fn test_bad_credentials_are_unauthorized() {
    let backend = FakeBackend::start().await;
    let err = backend
        .client()
        .login("mesero@sirest.co", "wrong-password")
        .await
        .unwrap_err();
    match err {
        ClientError::Unauthorized(msg) => assert_eq!(msg, "Credenciales inválidas"),
        other => panic!("expected Unauthorized, got {other:?}"),
    }
}

#[tokio::test]
async fn test_invalid_email_never_reaches_backend() {
    let backend = FakeBackend::start().await;
    let err = backend.client().login("not-an-email", "demo123").await.unwrap_err();
    assert!(err.is_local());
    assert_eq!(backend.state.lock().count("POST auth/login"), 0);
}

#[tokio::test]
async fn test_error_bodies_map_to_api_errors() {
    let backend = FakeBackend::start().await;
    let session = login(&backend, "admin@sirest.co").await;
    let client = backend.client();

    // non-JSON body falls back to the status text
    match client.list_alerts(&session).await.unwrap_err() {
        ClientError::Api { status, message } => {
            assert_eq!(status, 503);
            assert_eq!(message, "Service Unavailable");
        }
        other => panic!("unexpected {other:?}"),
    }

    // JSON body carries the server message
    match client.staff_status(&session).await.unwrap_err() {
        ClientError::Api { status, message } => {
            assert_eq!(status, 404);
            assert_eq!(message, "not here");
        }
        other => panic!("unexpected {other:?}"),
    }

    // 2xx with the wrong payload shape
    let err = client.list_tables(&session).await.unwrap_err();
    assert!(matches!(err, ClientError::InvalidResponse(_)), "{err:?}");
}

#[tokio::test]
async fn test_create_order_through_service() {
    let backend = FakeBackend::start().await;
    let session = login(&backend, "mesero@sirest.co").await;
    let orders = OrderService::new(backend.client(), RefetchRegistry::new());

    let order = orders.create(&session, soup_and_bread(4)).await.unwrap();
    assert_eq!(order.subtotal, 23.0);
    assert_eq!(order.status, OrderStatus::Pending);
    assert_eq!(order.table_number, Some(4));
    assert_eq!(order.created_by, session.user_id());

    let listed = orders
        .fetch(&session, &OrderFilter::status(OrderStatus::Pending))
        .await
        .unwrap();
    assert_eq!(listed.len(), 1);
}

#[tokio::test]
async fn test_cook_cannot_place_orders() {
    let backend = FakeBackend::start().await;
    let session = login(&backend, "cocinero@sirest.co").await;
    let orders = OrderService::new(backend.client(), RefetchRegistry::new());

    let err = orders.create(&session, soup_and_bread(1)).await.unwrap_err();
    assert!(err.is_local());
    assert_eq!(backend.state.lock().count("POST orders"), 0);
}

#[tokio::test]
async fn test_illegal_transition_is_refused_locally() {
    let backend = FakeBackend::start().await;
    let waiter = login(&backend, "mesero@sirest.co").await;
    let cook = login(&backend, "cocinero@sirest.co").await;
    let orders = OrderService::new(backend.client(), RefetchRegistry::new());

    let order = orders.create(&waiter, soup_and_bread(2)).await.unwrap();
    let preparing = orders
        .transition(&cook, &order, OrderStatus::Preparing)
        .await
        .unwrap();
    assert_eq!(preparing.status, OrderStatus::Preparing);

    // pending -> served skips the kitchen
    let err = orders
        .transition(&waiter, &order, OrderStatus::Served)
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::Transition(_)), "{err:?}");

    // paid only through settle
    let ready = orders
        .transition(&cook, &preparing, OrderStatus::Ready)
        .await
        .unwrap();
    let admin = login(&backend, "admin@sirest.co").await;
    let err = orders
        .transition(&admin, &ready, OrderStatus::Paid)
        .await
        .unwrap_err();
    assert!(err.is_local());

    assert_eq!(backend.state.lock().count("PUT orders/:id"), 2);
}

#[tokio::test]
async fn test_stale_version_is_a_conflict() {
    let backend = FakeBackend::start().await;
    let waiter = login(&backend, "mesero@sirest.co").await;
    let cook = login(&backend, "cocinero@sirest.co").await;
    let orders = OrderService::new(backend.client(), RefetchRegistry::new());

    let order = orders.create(&waiter, soup_and_bread(2)).await.unwrap();
    let preparing = orders
        .transition(&cook, &order, OrderStatus::Preparing)
        .await
        .unwrap();
    assert_eq!(preparing.version, order.version + 1);

    // another screen still holds the pending copy
    let back = orders
        .transition(&cook, &preparing, OrderStatus::Pending)
        .await
        .unwrap();
    let err = orders
        .transition(&cook, &order, OrderStatus::Preparing)
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::Conflict(_)), "{err:?}");
    assert_eq!(back.status, OrderStatus::Pending);
}

#[tokio::test]
async fn test_settle_cash_payment() {
    let backend = FakeBackend::start().await;
    let waiter = login(&backend, "mesero@sirest.co").await;
    let cook = login(&backend, "cocinero@sirest.co").await;
    let cashier = login(&backend, "cajero@sirest.co").await;
    let orders = OrderService::new(backend.client(), RefetchRegistry::new());
    let payments = PaymentService::new(orders.clone());

    let mut draft = OrderDraft::dine_in(5);
    draft.add_item(OrderItem::new("p1", "Menu", 100.0, 1)).unwrap();
    let order = orders.create(&waiter, draft).await.unwrap();
    let order = orders.transition(&cook, &order, OrderStatus::Preparing).await.unwrap();
    let order = orders.transition(&cook, &order, OrderStatus::Ready).await.unwrap();

    let config = RestaurantConfig::default();

    // the cook cannot charge
    let req = SettleRequest::new(PaymentMethod::Cash).with_received(150.0);
    let err = payments.settle(&cook, &order, &config, &req).await.unwrap_err();
    assert!(err.is_local());

    // short cash is refused before anything is sent
    let short = SettleRequest::new(PaymentMethod::Cash).with_received(100.0);
    let err = payments.settle(&cashier, &order, &config, &short).await.unwrap_err();
    assert!(err.is_local());

    let settled = payments.settle(&cashier, &order, &config, &req).await.unwrap();
    assert_eq!(settled.payment.total, 119.0);
    assert_eq!(settled.change, Some(31.0));
    assert_eq!(settled.order.status, OrderStatus::Paid);
    let breakdown = settled.payment.breakdown.unwrap();
    assert_eq!(breakdown.tax, 19.0);
    assert_eq!(breakdown.service_charge, 0.0);

    // paid is terminal
    let err = payments.settle(&cashier, &settled.order, &config, &req).await.unwrap_err();
    assert!(matches!(err, ClientError::Transition(_)));
    assert_eq!(backend.state.lock().payments.len(), 1);
}

/// Waiter places a 100.0 order and the cook brings it to `ready`
async fn ready_order(
    backend: &FakeBackend,
    orders: &OrderService,
) -> shared::order::Order {
    let waiter = login(backend, "mesero@sirest.co").await;
    let cook = login(backend, "cocinero@sirest.co").await;
    let mut draft = OrderDraft::dine_in(2);
    draft.add_item(OrderItem::new("p1", "Menu", 100.0, 1)).unwrap();
    let order = orders.create(&waiter, draft).await.unwrap();
    let order = orders.transition(&cook, &order, OrderStatus::Preparing).await.unwrap();
    orders.transition(&cook, &order, OrderStatus::Ready).await.unwrap()
}

#[tokio::test]
async fn test_second_settle_of_same_order_is_refused() {
    let backend = FakeBackend::start().await;
    let cashier = login(&backend, "cajero@sirest.co").await;
    let orders = OrderService::new(backend.client(), RefetchRegistry::new());
    let payments = PaymentService::new(orders.clone());
    let config = RestaurantConfig::default();

    // two screens holding the same `ready` snapshot
    let order = ready_order(&backend, &orders).await;
    let first = SettleRequest::new(PaymentMethod::Card);
    let second = SettleRequest::new(PaymentMethod::Card);

    payments.settle(&cashier, &order, &config, &first).await.unwrap();
    let err = payments.settle(&cashier, &order, &config, &second).await.unwrap_err();
    assert_eq!(err.code(), shared::error::ErrorCode::OrderAlreadyPaid, "{err:?}");
    assert_eq!(backend.state.lock().payments.len(), 1);
    assert_eq!(backend.state.lock().count("POST payments"), 1);
}

#[tokio::test]
async fn test_settle_with_stale_order_stores_nothing() {
    let backend = FakeBackend::start().await;
    let cashier = login(&backend, "cajero@sirest.co").await;
    let waiter = login(&backend, "mesero@sirest.co").await;
    let orders = OrderService::new(backend.client(), RefetchRegistry::new());
    let payments = PaymentService::new(orders.clone());

    let stale = ready_order(&backend, &orders).await;
    // served elsewhere after the cashier loaded it
    orders.transition(&waiter, &stale, OrderStatus::Served).await.unwrap();

    let req = SettleRequest::new(PaymentMethod::Card);
    let err = payments
        .settle(&cashier, &stale, &RestaurantConfig::default(), &req)
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::Conflict(_)), "{err:?}");
    assert!(backend.state.lock().payments.is_empty());
}

#[tokio::test]
async fn test_payment_idempotency_key_dedupes() {
    let backend = FakeBackend::start().await;
    let cashier = login(&backend, "cajero@sirest.co").await;
    let client = backend.client();

    let create = shared::models::PaymentCreate {
        order_id: "ord-x".into(),
        breakdown: shared::models::PaymentBreakdown::compute(
            50.0,
            Default::default(),
            true,
            0.0,
        ),
        total: 64.5,
        method: PaymentMethod::Card,
        received: None,
        change: None,
        idempotency_key: uuid::Uuid::new_v4(),
        expected_order_version: 1,
    };
    let first = client.create_payment(&cashier, &create).await.unwrap();
    let second = client.create_payment(&cashier, &create).await.unwrap();
    assert_eq!(first.id, second.id);
    assert_eq!(client.list_payments(&cashier).await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_init_demo_data_is_idempotent() {
    let backend = FakeBackend::start().await;
    let client = backend.client();

    let first = client.init_demo_data().await.unwrap();
    let second = client.init_demo_data().await.unwrap();
    assert!(first.created_anything());
    assert_eq!(first.users_created, 5);
    assert!(!second.created_anything());
    assert_eq!(first.accounts, second.accounts);
}

#[tokio::test]
async fn test_signup_returns_client_session() {
    let backend = FakeBackend::start().await;
    let req = shared::client::SignupRequest {
        email: "nueva@correo.co".into(),
        password: "secreto1".into(),
        name: "Nueva".into(),
        phone: None,
    };
    let session = backend.client().signup(&req).await.unwrap();
    assert_eq!(session.role(), Role::Client);

    let short = shared::client::SignupRequest {
        password: "123".into(),
        ..req
    };
    assert!(backend.client().signup(&short).await.unwrap_err().is_local());
}

#[tokio::test]
async fn test_order_poller_refetches_after_create() {
    let backend = FakeBackend::start().await;
    let waiter = login(&backend, "mesero@sirest.co").await;
    let client = backend.client();

    let pollers = ResourcePoller::new(client.clone(), waiter.clone(), Duration::from_secs(3600));
    let poller = pollers.orders();
    let mut rx = poller.subscribe();
    rx.changed().await.unwrap();
    assert_eq!(rx.borrow_and_update().data.as_deref().map(Vec::len), Some(0));

    let registry = RefetchRegistry::new();
    registry.register(Resource::Orders, poller.refetch_handle());
    let orders = OrderService::new(client, registry);
    orders.create(&waiter, soup_and_bread(3)).await.unwrap();

    tokio::time::timeout(Duration::from_secs(5), rx.changed())
        .await
        .unwrap()
        .unwrap();
    let state = rx.borrow().clone();
    assert_eq!(state.data.as_deref().map(Vec::len), Some(1));
    assert_eq!(state.generation, 2);
}

#[tokio::test]
async fn test_order_poller_keeps_snapshot_when_field_missing() {
    let backend = FakeBackend::start().await;
    let waiter = login(&backend, "mesero@sirest.co").await;
    let client = backend.client();
    let orders = OrderService::new(client.clone(), RefetchRegistry::new());
    orders.create(&waiter, soup_and_bread(4)).await.unwrap();

    let pollers = ResourcePoller::new(client, waiter, Duration::from_secs(3600));
    let poller = pollers.orders();
    let mut rx = poller.subscribe();
    rx.changed().await.unwrap();
    assert_eq!(rx.borrow_and_update().data.as_deref().map(Vec::len), Some(1));

    backend.state.lock().orders_field_missing = true;
    poller.refetch_handle().refetch();
    tokio::time::timeout(Duration::from_secs(5), rx.changed())
        .await
        .unwrap()
        .unwrap();

    let state = rx.borrow().clone();
    assert_eq!(state.data.as_deref().map(Vec::len), Some(1));
    assert!(state.error.as_deref().is_some_and(|e| e.contains("orders")), "{state:?}");
    assert!(!state.loading);
}
