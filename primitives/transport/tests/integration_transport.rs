//! Integration tests for the shared transport API.
//!
//! These exercise consumer usage patterns against an in-memory transport,
//! without requiring a running service.

use serde_json::{json, Value};
use transport::{DynTransport, Returns, RpcError, RpcRequest, Transport};

struct DummyTransport;

#[async_trait::async_trait]
impl transport::Transport for DummyTransport {
    async fn send(&self, request: &RpcRequest) -> Result<Vec<Value>, RpcError> {
        match request.method.as_str() {
            "fba_tools.fail" => Err(RpcError::rpc("dummy error")),
            "fba_tools.echo" => Ok(request.params.clone()),
            _ => Ok(vec![json!({"state": "OK"})]),
        }
    }

    fn endpoint(&self) -> &str { "dummy://" }
}

#[tokio::test]
async fn consumer_can_call_transport() {
    let t = DummyTransport;
    let result = t.send(&RpcRequest::new("fba_tools.status", vec![])).await.expect("ok");
    assert_eq!(Returns::Single.select(result)["state"], "OK");
}

#[tokio::test]
async fn consumer_sees_rpc_error() {
    let t = DummyTransport;
    let err = t.send(&RpcRequest::new("fba_tools.fail", vec![])).await.expect_err("should err");
    match err {
        RpcError::Rpc { status, error } => {
            assert_eq!(status, 500);
            assert_eq!(error, json!("dummy error"));
        }
        _ => panic!("unexpected error variant"),
    }
}

#[tokio::test]
async fn consumer_can_share_dyn_transport() {
    let t: DynTransport = std::sync::Arc::new(DummyTransport);
    let params = vec![json!({"fbamodel_id": "m1"})];

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let t = t.clone();
            let request = RpcRequest::new("fba_tools.echo", params.clone());
            tokio::spawn(async move { t.send(&request).await })
        })
        .collect();

    for handle in handles {
        let result = handle.await.expect("task completes").expect("echo succeeds");
        assert_eq!(result, params);
    }
    assert_eq!(t.endpoint(), "dummy://");
}
