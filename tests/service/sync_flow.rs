//! End-to-end flow: sync the dataset from a mocked feed, then query it.

use std::time::Duration;

use fuelwatch::data::location::LocationRepository;
use fuelwatch::feed::{FeedClient, FeedClientConfig};
use fuelwatch::model::sync::SyncOutcome;
use fuelwatch::service::location::LocationResolver;
use fuelwatch::service::nearby::{NearbyQuery, NearbySearch};
use fuelwatch::service::sync::SyncService;
use fuelwatch::service::trend::{TrendQuery, TrendService};
use fuelwatch_test_utils::{constant, fixture, TestSetup};

fn sync_service(test: &TestSetup) -> SyncService {
    let feed_client = FeedClient::new(FeedClientConfig {
        base_url: test.server.url(),
        api_key: constant::TEST_API_KEY.into(),
        api_secret: constant::TEST_API_SECRET.into(),
        bearer_token: Some(constant::TEST_ACCESS_TOKEN.into()),
        timeout: Duration::from_secs(5),
    })
    .unwrap();

    SyncService::new(test.db.clone(), feed_client)
}

/// Two Sydney-area stations and one far-away station, each with prices.
fn snapshot() -> serde_json::Value {
    fixture::feed_snapshot_json(
        &[
            fixture::feed_station_json("1001", "Shell", -33.92, 151.23),
            fixture::feed_station_json("1002", "Caltex", -33.95, 151.24),
            fixture::feed_station_json("2001", "BP", -36.08, 146.92),
        ],
        &[
            fixture::feed_price_json("1001", "E10", 179.9),
            fixture::feed_price_json("1001", "P95", 199.9),
            fixture::feed_price_json("1002", "E10", 169.5),
            fixture::feed_price_json("2001", "E10", 159.9),
        ],
    )
}

/// A synced dataset answers nearby searches with distances, prices, and the
/// full brand list for the area.
#[tokio::test]
async fn sync_then_nearby_search() {
    let mut test = TestSetup::new().await.unwrap();
    test.with_tables().await.unwrap();
    let _mock = fixture::mock_all_prices_endpoint(&mut test.server, &snapshot(), 1).await;

    let outcome = sync_service(&test).synchronize().await.unwrap();
    assert!(matches!(outcome, SyncOutcome::Completed(_)));

    let resolver = LocationResolver::new(test.db.clone());
    let search = NearbySearch::new(&test.db, &resolver);
    let result = search
        .search(&NearbyQuery {
            latitude: Some(-33.92),
            longitude: Some(151.23),
            ..NearbyQuery::default()
        })
        .await
        .unwrap();

    assert_eq!(result.stations.len(), 2);
    assert_eq!(result.stations[0].station_code, "1001");
    assert!(result.stations[0].distance_km.is_some());
    assert!(!result.stations[0].prices.is_empty());
    assert_eq!(result.available_brands, vec!["Ampol", "Shell"]);
}

/// A suburb reference resolves through the address extracted during sync and
/// the seeded postcode table.
#[tokio::test]
async fn sync_then_search_by_suburb() {
    let mut test = TestSetup::new().await.unwrap();
    test.with_tables().await.unwrap();
    // The shared station fixture addresses are all in Kingsford NSW 2032.
    LocationRepository::new(&test.db)
        .upsert(fixture::postcode_location("2032", -33.92, 151.22, "Kingsford"))
        .await
        .unwrap();
    let _mock = fixture::mock_all_prices_endpoint(&mut test.server, &snapshot(), 1).await;

    sync_service(&test).synchronize().await.unwrap();

    let resolver = LocationResolver::new(test.db.clone());
    let search = NearbySearch::new(&test.db, &resolver);
    let result = search
        .search(&NearbyQuery {
            suburb: Some("Kingsford".to_string()),
            ..NearbyQuery::default()
        })
        .await
        .unwrap();

    assert!(result.message.is_none());
    assert!(!result.stations.is_empty());
}

/// Each sync appends one history snapshot per price, so two syncs give every
/// fuel a two-point trend.
#[tokio::test]
async fn sync_twice_then_trends() {
    let mut test = TestSetup::new().await.unwrap();
    test.with_tables().await.unwrap();
    let _mock = fixture::mock_all_prices_endpoint(&mut test.server, &snapshot(), 2).await;

    let service = sync_service(&test);
    service.synchronize().await.unwrap();
    service.synchronize().await.unwrap();

    let trend_service = TrendService::new(&test.db);
    let series = trend_service
        .trends(&TrendQuery {
            station_code: "1001".to_string(),
            fuel_type: None,
            period_days: 7,
        })
        .await
        .unwrap();

    assert_eq!(series.len(), 2);
    for fuel in &series {
        assert_eq!(fuel.points.len(), 2);
        assert!(fuel.points[0].timestamp <= fuel.points[1].timestamp);
    }
}
