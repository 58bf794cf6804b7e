//! Mailing list lookup tests

use std::sync::Arc;

use proptest::prelude::*;
use serde_json::json;

use core_kernel::{ApiUserId, MailingListId};
use domain_contact::{MailingListClient, MailingLists, RecordingTransport, RpcOperation};
use domain_settings::Credentials;

fn credentials() -> Credentials {
    Credentials::new(Some(ApiUserId::new(1234)), Some("tok")).unwrap()
}

fn lists_response(items: &[(u64, &str)]) -> serde_json::Value {
    let items: Vec<_> = items
        .iter()
        .map(|(id, name)| json!({ "mailingListId": id, "mailingListName": name }))
        .collect();
    json!({ "errorCode": 0, "errorMessage": "", "mailingListTypeItems": items })
}

#[tokio::test]
async fn test_lists_sorted_ascending() {
    let transport = Arc::new(RecordingTransport::new().with_response(
        RpcOperation::GetMailingLists,
        lists_response(&[(30, "C"), (10, "A"), (20, "B")]),
    ));
    let client = MailingListClient::new(transport.clone());

    let lists = client.fetch_lists(Some(&credentials())).await;

    let ids: Vec<u64> = lists.ids().map(|id| id.get()).collect();
    assert_eq!(ids, vec![10, 20, 30]);
    assert_eq!(lists.name(MailingListId::new(10)), Some("A"));

    let request = transport.last_request(RpcOperation::GetMailingLists).await.unwrap();
    assert_eq!(
        request,
        json!({ "header": { "userId": 1234, "userToken": "tok" }, "categoryId": 0 })
    );
}

#[tokio::test]
async fn test_no_credentials_no_call() {
    let transport = Arc::new(RecordingTransport::new());
    let client = MailingListClient::new(transport.clone());

    assert!(client.fetch_lists(None).await.is_empty());
    assert_eq!(transport.call_count().await, 0);
}

#[tokio::test]
async fn test_error_code_gives_empty_result() {
    let transport = Arc::new(RecordingTransport::new().with_response(
        RpcOperation::GetMailingLists,
        json!({ "errorCode": 2, "errorMessage": "Invalid credentials", "mailingListTypeItems": [] }),
    ));
    let client = MailingListClient::new(transport);

    assert_eq!(client.fetch_lists(Some(&credentials())).await, MailingLists::default());
}

#[tokio::test]
async fn test_fault_gives_empty_result() {
    let transport = Arc::new(
        RecordingTransport::new().with_fault(RpcOperation::GetMailingLists, "connection refused"),
    );
    let client = MailingListClient::new(transport);

    assert!(client.fetch_lists(Some(&credentials())).await.is_empty());
}

#[tokio::test]
async fn test_missing_items_is_empty() {
    let transport = Arc::new(RecordingTransport::new().with_response(
        RpcOperation::GetMailingLists,
        json!({ "errorCode": 0, "errorMessage": "" }),
    ));
    let client = MailingListClient::new(transport);

    assert!(client.fetch_lists(Some(&credentials())).await.is_empty());
}

proptest! {
    #[test]
    fn lists_always_iterate_in_ascending_order(ids in prop::collection::vec(0u64..10_000, 0..40)) {
        let lists = MailingLists::from_pairs(
            ids.iter().map(|id| (MailingListId::new(*id), format!("List {}", id))),
        );

        let ordered: Vec<u64> = lists.ids().map(|id| id.get()).collect();
        let mut expected = ids.clone();
        expected.sort_unstable();
        expected.dedup();

        prop_assert_eq!(ordered, expected);
    }
}
