mod common;

use common::{client_for, mock_gateway, TEST_KEY_AUTH_HEADER};
use rust_decimal_macros::dec;
use serde_json::json;
use vindi::GatewayError;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, ResponseTemplate};

#[tokio::test]
async fn test_create_customer_posts_exact_fields_and_returns_id() {
    let server = mock_gateway().await;
    Mock::given(method("POST"))
        .and(path("/customers"))
        .and(header("authorization", TEST_KEY_AUTH_HEADER))
        .and(header("content-type", "application/json"))
        .and(body_json(json!({
            "name": "Jane Doe",
            "email": "jane@example.com",
            "code": "ext-42"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"customer": {"id": 777}})))
        .expect(1)
        .mount(&server)
        .await;

    let mut client = client_for(&server);
    let id = client
        .create_customer("Jane Doe", "jane@example.com", "ext-42")
        .await
        .unwrap();
    assert_eq!(id, 777);
}

#[tokio::test]
async fn test_list_payment_methods_hits_fixed_endpoint() {
    let server = mock_gateway().await;
    Mock::given(method("GET"))
        .and(path("/payment_methods"))
        .and(header("authorization", TEST_KEY_AUTH_HEADER))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "payment_methods": [{"id": 1, "code": "credit_card"}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let mut client = client_for(&server);
    let record = client.list_payment_methods().await.unwrap();
    assert_eq!(record.status, 200);
    assert_eq!(
        client.last_body().unwrap()["payment_methods"][0]["code"],
        json!("credit_card")
    );
}

#[tokio::test]
async fn test_create_payment_profile_sends_card_fields() {
    let server = mock_gateway().await;
    Mock::given(method("POST"))
        .and(path("/payment_profiles"))
        .and(body_json(json!({
            "holder_name": "Jane Doe",
            "card_expiration": "12/29",
            "card_number": "4111111111111111",
            "card_cvv": "123",
            "customer_id": 777
        })))
        .respond_with(
            ResponseTemplate::new(201).set_body_json(json!({"payment_profile": {"id": 31}})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let mut client = client_for(&server);
    let record = client
        .create_payment_profile(vindi::NewPaymentProfile {
            holder_name: "Jane Doe".into(),
            card_expiration: "12/29".into(),
            card_number: "4111111111111111".into(),
            card_cvv: "123".into(),
            customer_id: 777,
        })
        .await
        .unwrap();
    assert_eq!(record.status, 201);
}

#[tokio::test]
async fn test_create_bill_nests_one_item_with_fractional_amount() {
    let server = mock_gateway().await;
    Mock::given(method("POST"))
        .and(path("/bills"))
        .and(body_json(json!({
            "customer_id": 55,
            "payment_method_code": "credit_card",
            "bill_items": [{"product_id": 12, "amount": "0.5"}]
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"bill": {"id": 90}})))
        .expect(1)
        .mount(&server)
        .await;

    let mut client = client_for(&server);
    let record = client
        .create_bill(55, "credit_card", dec!(0.5), 12)
        .await
        .unwrap();
    assert_eq!(record.status, 201);
}

#[tokio::test]
async fn test_create_bill_accepts_zero_amount() {
    let server = mock_gateway().await;
    Mock::given(method("POST"))
        .and(path("/bills"))
        .and(body_json(json!({
            "customer_id": 55,
            "payment_method_code": "credit_card",
            "bill_items": [{"product_id": 12, "amount": "0"}]
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"bill": {"id": 91}})))
        .expect(1)
        .mount(&server)
        .await;

    let mut client = client_for(&server);
    client
        .create_bill(55, "credit_card", dec!(0), 12)
        .await
        .unwrap();
}

#[tokio::test]
async fn test_get_bill_targets_literal_id_in_path() {
    let server = mock_gateway().await;
    Mock::given(method("GET"))
        .and(path("/bills/42"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"bill": {"id": 42, "status": "paid"}})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let mut client = client_for(&server);
    let record = client.get_bill(42).await.unwrap();
    assert!(record.effective_url.ends_with("/bills/42"));
    assert_eq!(client.last_body().unwrap()["bill"]["status"], json!("paid"));
}

#[tokio::test]
async fn test_posted_body_round_trips_through_echo() {
    let body = json!({
        "name": "Jane Doe",
        "email": "jane@example.com",
        "code": "ext-42"
    });

    let server = mock_gateway().await;
    Mock::given(method("POST"))
        .and(path("/customers"))
        .and(body_json(body.clone()))
        .respond_with(ResponseTemplate::new(200).set_body_json(body.clone()))
        .mount(&server)
        .await;

    let mut client = client_for(&server);
    let endpoint = format!("{}/customers", server.uri());
    client.execute(&endpoint, Some(body.clone())).await.unwrap();

    assert_eq!(client.last_body(), Some(&body));
}

#[tokio::test]
async fn test_last_response_is_stable_without_new_calls() {
    let server = mock_gateway().await;
    Mock::given(method("GET"))
        .and(path("/payment_methods"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"payment_methods": []})))
        .mount(&server)
        .await;

    let mut client = client_for(&server);
    assert!(client.last_response().is_none());

    let record = client.list_payment_methods().await.unwrap();
    let first = client.last_response().cloned();
    let second = client.last_response().cloned();
    assert_eq!(first.as_ref(), Some(&record));
    assert_eq!(first, second);
}

#[tokio::test]
async fn test_empty_response_body_clears_decoded_state() {
    let server = mock_gateway().await;
    Mock::given(method("GET"))
        .and(path("/bills/1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"bill": {"id": 1}})))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/bills/2"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;

    let mut client = client_for(&server);
    client.get_bill(1).await.unwrap();
    assert!(client.last_body().is_some());

    client.get_bill(2).await.unwrap();
    assert!(client.last_body().is_none());
    assert_eq!(client.last_response().unwrap().status, 204);
}

#[tokio::test]
async fn test_record_exposes_raw_headers_and_status() {
    let server = mock_gateway().await;
    Mock::given(method("GET"))
        .and(path("/payment_methods"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("x-request-id", "abc-123")
                .set_body_json(json!({"payment_methods": []})),
        )
        .mount(&server)
        .await;

    let mut client = client_for(&server);
    let record = client.list_payment_methods().await.unwrap();

    assert!(record.header.contains("200"));
    assert!(record.header.contains("x-request-id: abc-123"));
    assert!(record.header.ends_with("\r\n\r\n"));
    assert!(record.is_success());
}

#[tokio::test]
async fn test_error_for_status_surfaces_unprocessable_entity() {
    let server = mock_gateway().await;
    Mock::given(method("GET"))
        .and(path("/bills/7"))
        .respond_with(
            ResponseTemplate::new(422)
                .set_body_json(json!({"errors": [{"id": "invalid_parameter"}]})),
        )
        .mount(&server)
        .await;

    let mut client = client_for(&server);
    let record = client.get_bill(7).await.unwrap();

    assert_eq!(record.status, 422);
    assert!(matches!(
        record.error_for_status(),
        Err(GatewayError::Http { status: 422 })
    ));
    // The exchange is still recorded for inspection.
    assert_eq!(
        client.last_body().unwrap()["errors"][0]["id"],
        json!("invalid_parameter")
    );
}
