use recipe_share_api::routes::health::{SERVICE_NAME, health_check};

#[tokio::test]
async fn health_check_reports_service_identity() {
    let response = health_check().await;
    assert_eq!(response.0.message, "Health check");

    let data = response.0.data.expect("health data");
    assert_eq!(data.status, "ok");
    assert_eq!(data.service, SERVICE_NAME);
    assert_eq!(data.version, env!("CARGO_PKG_VERSION"));
}
