//! Share network operations against a scripted transport

mod common;

use futures::StreamExt;
use manila_client::share_network::{
    SecurityServiceAssociation, ShareNetworkApi, ShareNetworkCreateRequest,
    ShareNetworkListFilter, ShareNetworkUpdateRequest,
};
use reqwest::Method;
use serde_json::json;

use common::{client_with, response, ScriptedTransport};

#[tokio::test]
async fn test_create_posts_enveloped_body_and_extracts_network() {
    let transport = ScriptedTransport::with_responses(vec![response(
        200,
        &json!({"share_network": {
            "id": "sn-1",
            "project_id": "demo",
            "neutron_net_id": "net-1",
            "name": "my_network",
            "created_at": "2015-09-07T08:41:03.000000"
        }})
        .to_string(),
    )]);
    let api = ShareNetworkApi::new(client_with(transport.clone()));

    let opts = ShareNetworkCreateRequest {
        neutron_net_id: Some("net-1".to_string()),
        name: Some("my_network".to_string()),
        ..Default::default()
    };
    let network = api.create(&opts).await.extract().unwrap();
    assert_eq!(network.id, "sn-1");
    assert_eq!(network.neutron_net_id.as_deref(), Some("net-1"));

    let requests = transport.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].method, Method::POST);
    assert_eq!(requests[0].url.path(), "/v2/demo/share-networks");
    assert_eq!(
        requests[0].body.as_ref().unwrap(),
        &json!({"share_network": {"neutron_net_id": "net-1", "name": "my_network"}})
    );
}

#[tokio::test]
async fn test_update_sends_explicit_clear_and_omits_unset() {
    let transport = ScriptedTransport::with_responses(vec![response(
        200,
        &json!({"share_network": {"id": "sn-1", "name": "renamed"}}).to_string(),
    )]);
    let api = ShareNetworkApi::new(client_with(transport.clone()));

    let opts = ShareNetworkUpdateRequest {
        name: Some("renamed".to_string()),
        description: Some(String::new()),
        ..Default::default()
    };
    let network = api.update("sn-1", &opts).await.extract().unwrap();
    assert_eq!(network.name.as_deref(), Some("renamed"));

    let requests = transport.requests();
    assert_eq!(requests[0].method, Method::PUT);
    assert_eq!(requests[0].url.path(), "/v2/demo/share-networks/sn-1");
    assert_eq!(
        requests[0].body.as_ref().unwrap(),
        &json!({"share_network": {"name": "renamed", "description": ""}})
    );
}

#[tokio::test]
async fn test_get_and_delete() {
    let transport = ScriptedTransport::with_responses(vec![
        response(200, &json!({"share_network": {"id": "sn-1"}}).to_string()),
        response(202, ""),
    ]);
    let api = ShareNetworkApi::new(client_with(transport.clone()));

    let network = api.get("sn-1").await.extract().unwrap();
    assert_eq!(network.id, "sn-1");

    api.delete("sn-1").await.check().unwrap();

    let requests = transport.requests();
    assert_eq!(requests.len(), 2);
    assert_eq!(requests[0].method, Method::GET);
    assert_eq!(requests[1].method, Method::DELETE);
    assert!(requests[1].body.is_none());
}

#[tokio::test]
async fn test_security_service_actions_use_action_url_and_envelopes() {
    let transport = ScriptedTransport::with_responses(vec![
        response(200, &json!({"share_network": {"id": "sn-1"}}).to_string()),
        response(200, &json!({"share_network": {"id": "sn-1"}}).to_string()),
    ]);
    let api = ShareNetworkApi::new(client_with(transport.clone()));
    let association = SecurityServiceAssociation::new("sec-1");

    api.add_security_service("sn-1", &association)
        .await
        .extract()
        .unwrap();
    api.remove_security_service("sn-1", &association)
        .await
        .extract()
        .unwrap();

    let requests = transport.requests();
    assert_eq!(requests.len(), 2);
    for request in &requests {
        assert_eq!(request.method, Method::POST);
        assert_eq!(request.url.path(), "/v2/demo/share-networks/sn-1/action");
    }
    assert_eq!(
        requests[0].body.as_ref().unwrap(),
        &json!({"add_security_service": {"security_service_id": "sec-1"}})
    );
    assert_eq!(
        requests[1].body.as_ref().unwrap(),
        &json!({"remove_security_service": {"security_service_id": "sec-1"}})
    );
}

#[tokio::test]
async fn test_list_detail_walks_pages_by_marker() {
    let page_one = json!({
        "share_networks": [{"id": "sn-1"}, {"id": "sn-2"}],
        "share_networks_links": [{"rel": "next", "href": "ignored"}]
    });
    let page_two = json!({
        "share_networks": [{"id": "sn-3"}]
    });
    let transport = ScriptedTransport::with_responses(vec![
        response(200, &page_one.to_string()),
        response(200, &page_two.to_string()),
    ]);
    let api = ShareNetworkApi::new(client_with(transport.clone()));

    let filter = ShareNetworkListFilter {
        limit: Some(2),
        ..Default::default()
    };
    let networks = api.list_detail(&filter).unwrap().all().await.unwrap();

    let ids: Vec<&str> = networks.iter().map(|n| n.id.as_str()).collect();
    assert_eq!(ids, vec!["sn-1", "sn-2", "sn-3"]);

    let requests = transport.requests();
    assert_eq!(requests.len(), 2);
    assert_eq!(requests[0].url.path(), "/v2/demo/share-networks/detail");
    assert_eq!(requests[0].url.query(), Some("limit=2"));
    // follow-up request keeps the filter and resumes from the last item
    assert_eq!(requests[1].url.query(), Some("limit=2&marker=sn-2"));
}

#[tokio::test]
async fn test_list_detail_fetches_next_page_only_on_demand() {
    let page_one = json!({
        "share_networks": [{"id": "sn-1"}],
        "share_networks_links": [{"rel": "next", "href": "ignored"}]
    });
    let page_two = json!({"share_networks": [{"id": "sn-2"}]});
    let transport = ScriptedTransport::with_responses(vec![
        response(200, &page_one.to_string()),
        response(200, &page_two.to_string()),
    ]);
    let api = ShareNetworkApi::new(client_with(transport.clone()));

    let pager = api
        .list_detail(&ShareNetworkListFilter::default())
        .unwrap();
    let mut stream = Box::pin(pager.into_stream());

    let first = stream.next().await.unwrap().unwrap();
    assert_eq!(first.id, "sn-1");
    // page two has not been requested yet
    assert_eq!(transport.requests().len(), 1);

    let second = stream.next().await.unwrap().unwrap();
    assert_eq!(second.id, "sn-2");
    assert_eq!(transport.requests().len(), 2);

    assert!(stream.next().await.is_none());
}

#[tokio::test]
async fn test_all_default_filter_sends_no_query() {
    let transport = ScriptedTransport::with_responses(vec![response(
        200,
        &json!({"share_networks": []}).to_string(),
    )]);
    let api = ShareNetworkApi::new(client_with(transport.clone()));

    let networks = api
        .list_detail(&ShareNetworkListFilter::default())
        .unwrap()
        .all()
        .await
        .unwrap();
    assert!(networks.is_empty());
    assert_eq!(transport.requests()[0].url.query(), None);
}
