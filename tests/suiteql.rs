//! Integration tests for SuiteQL query execution.

mod helpers;

use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use helpers::{seeded_session, test_client};
use netsuite_client::RetryStrategy;

#[tokio::test]
async fn test_suiteql_posts_normalized_query_with_transient_preference() {
    let server = MockServer::start().await;

    // The multiline query below must arrive collapsed to single spaces
    Mock::given(method("POST"))
        .and(path("/services/rest/query/v1/suiteql"))
        .and(header("Prefer", "transient"))
        .and(body_json(json!({
            "q": "SELECT Transaction.tranid, Transaction.id FROM Transaction WHERE Transaction.tranid = 'SO12345'"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "items": [{"id": "812", "tranid": "SO12345"}],
            "totalResults": 1,
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server.uri(), seeded_session());
    let query = "
        SELECT
            Transaction.tranid,
            Transaction.id
        FROM
            Transaction
        WHERE
            Transaction.tranid = 'SO12345'";

    let result = client
        .suiteql_query(query, RetryStrategy::Aggressive)
        .await
        .expect("query should succeed");

    assert_eq!(result["totalResults"], 1);
    assert_eq!(result["items"][0]["id"], "812");
}
