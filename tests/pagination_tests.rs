//! Integration tests for paginated listing: page-sentinel disjointness,
//! default page sizes and the coexistence of paged and unpaged views.

mod client_harness;

use client_harness::*;
use requery::prelude::*;

#[tokio::test]
async fn test_pages_have_disjoint_sentinels() {
    let transport = MockTransport::new();
    transport.respond_json(
        Method::Get,
        "Organization?page=0&size=20",
        json!([org_json("1", "Acme")]),
    );
    transport.respond_json(
        Method::Get,
        "Organization?page=1&size=20",
        json!([org_json("2", "Globex")]),
    );
    let host = mock_host(&transport);
    let orgs = host.resource::<Organization>();

    orgs.list_paged(&PageRequest::new(0)).await.unwrap();
    orgs.list_paged(&PageRequest::new(1)).await.unwrap();

    // Invalidating page 0 must not evict page 1's cached view.
    host.cache().invalidate(&[Tag::page("Organization", 0)]).unwrap();

    orgs.list_paged(&PageRequest::new(0)).await.unwrap();
    orgs.list_paged(&PageRequest::new(1)).await.unwrap();

    assert_eq!(
        transport.request_count(Method::Get, "Organization?page=0&size=20"),
        2
    );
    assert_eq!(
        transport.request_count(Method::Get, "Organization?page=1&size=20"),
        1
    );
}

#[tokio::test]
async fn test_paged_views_provide_record_tags() {
    let transport = MockTransport::new();
    transport.respond_json(
        Method::Get,
        "Organization?page=0&size=20",
        json!([org_json("1", "Acme"), org_json("2", "Globex")]),
    );
    let host = mock_host(&transport);
    let orgs = host.resource::<Organization>();

    orgs.list_paged(&PageRequest::new(0)).await.unwrap();
    assert_eq!(host.cache().len(), 1);

    // A record tag eviction hits the page that contained the record.
    host.cache()
        .invalidate(&[Tag::record("Organization", "2".into())])
        .unwrap();
    assert!(host.cache().is_empty());
}

#[tokio::test]
async fn test_page_helper_uses_host_default_page_size() {
    let transport = MockTransport::new();
    transport.respond_json(
        Method::Get,
        "Organization?page=0&size=2",
        json!([org_json("1", "Acme"), org_json("2", "Globex")]),
    );
    let host = ClientBuilder::new()
        .with_transport(transport.clone())
        .with_default_page_size(2)
        .build()
        .unwrap();
    let orgs = host.resource::<Organization>();

    let page = orgs.page(0).await.unwrap();
    assert_eq!(page.len(), 2);
    assert_eq!(
        transport.request_count(Method::Get, "Organization?page=0&size=2"),
        1
    );
}

#[tokio::test]
async fn test_paged_and_unpaged_views_are_distinct_cache_entries() {
    let transport = MockTransport::new();
    transport.respond_json(
        Method::Get,
        "Organization?page=0&size=20",
        json!([org_json("1", "Acme")]),
    );
    transport.respond_json(Method::Get, "Organization", json!([org_json("1", "Acme")]));
    let host = mock_host(&transport);
    let orgs = host.resource::<Organization>();

    orgs.list_paged(&PageRequest::new(0)).await.unwrap();
    orgs.list_all(None).await.unwrap();
    assert_eq!(host.cache().len(), 2);

    // The LIST sentinel belongs to the unpaged view only.
    host.cache().invalidate(&[Tag::list("Organization")]).unwrap();
    assert_eq!(host.cache().len(), 1);
}
