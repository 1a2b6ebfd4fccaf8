// ==========================================
// HttpImportEndpoint 集成测试
// ==========================================
// 测试目标: 请求路径 / 请求体 / Bearer 头 / 非 2xx 处理
// 说明: 使用本地 StubServer，不访问外部网络
// ==========================================

mod helpers;

use cricket_import::api::{HttpImportEndpoint, NoCredentials, StaticToken};
use cricket_import::{EntityKind, ImportPipeline, ImportSettings};
use helpers::{player_csv, StubServer};
use std::sync::Arc;

fn ok_body(imported: usize) -> String {
    format!(
        r#"{{"data":{{"imported":{},"failed":0,"skipped":0,"errors":[]}}}}"#,
        imported
    )
}

fn settings_for(server: &StubServer, batch_size: usize) -> ImportSettings {
    ImportSettings {
        api_base_url: server.base_url.clone(),
        batch_size,
        request_timeout_secs: 5,
        ..ImportSettings::default()
    }
}

#[tokio::test]
async fn test_batches_posted_with_bearer_token() {
    let server = StubServer::start(vec![(200, ok_body(2)), (200, ok_body(1))]).await;
    let settings = settings_for(&server, 2);
    let endpoint =
        HttpImportEndpoint::new(&settings, Arc::new(StaticToken::new("secret-token"))).unwrap();

    let result = ImportPipeline::new(&endpoint, &settings)
        .run_bytes(EntityKind::Player, "players.csv", player_csv(3).as_bytes())
        .await
        .unwrap();

    assert_eq!(result.imported, 3);

    let requests = server.requests();
    assert_eq!(requests.len(), 2);
    for request in &requests {
        assert_eq!(request.method, "POST");
        assert_eq!(request.path, "/api/players/bulk-import");
        assert_eq!(request.header("authorization"), Some("Bearer secret-token"));
    }

    let first = requests[0].json();
    assert_eq!(first["players"].as_array().unwrap().len(), 2);
    assert_eq!(first["skipDuplicates"], true);
    assert_eq!(first["players"][0]["fullName"], "Player 1");
}

#[tokio::test]
async fn test_non_success_status_becomes_batch_failure() {
    let server = StubServer::start(vec![
        (400, r#"{"message":"registrations must be an array"}"#.to_string()),
        (200, ok_body(1)),
    ])
    .await;
    let settings = settings_for(&server, 1);
    let endpoint = HttpImportEndpoint::new(&settings, Arc::new(NoCredentials)).unwrap();

    let csv = "Name,Email,Diet\nAsha,asha@x.com,veg\nBen,ben@x.com,non veg\n";
    let result = ImportPipeline::new(&endpoint, &settings)
        .run_bytes(EntityKind::FoodRegistration, "food.csv", csv.as_bytes())
        .await
        .unwrap();

    assert_eq!(result.failed, 1);
    assert_eq!(result.imported, 1);
    assert_eq!(result.batches_failed, 1);
    assert!(result.errors[0]
        .message
        .contains("registrations must be an array"));

    let requests = server.requests();
    assert_eq!(requests.len(), 2);
    assert_eq!(requests[0].method, "POST");
    assert_eq!(requests[0].path, "/api/food-registrations/bulk-import");
    assert_eq!(requests[0].header("authorization"), None);
}

#[tokio::test]
async fn test_unreachable_backend_counts_every_batch_failed() {
    // 绑定后立即释放端口，连接会被拒绝
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let settings = ImportSettings {
        api_base_url: format!("http://{}/api", addr),
        batch_size: 2,
        request_timeout_secs: 2,
        ..ImportSettings::default()
    };
    let endpoint = HttpImportEndpoint::new(&settings, Arc::new(NoCredentials)).unwrap();

    let result = ImportPipeline::new(&endpoint, &settings)
        .run_bytes(EntityKind::Player, "players.csv", player_csv(5).as_bytes())
        .await
        .unwrap();

    assert_eq!(result.imported, 0);
    assert_eq!(result.failed, 5);
    assert_eq!(result.batches_failed, 3);
    assert_eq!(result.errors.len(), 3);
}
