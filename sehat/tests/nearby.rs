use serde_json::json;
use std::time::Duration;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use sehat::config::NearbyConfig;
use sehat::nearby::{FixedLocation, GeoPoint, NearbyFinder, NoLocation, SearchStatus};
use sehat::notify::NoticeLevel;

const HERE: GeoPoint = GeoPoint { lat: 12.9716, lon: 77.5946 };

fn config(mirrors: Vec<String>, services: &MockServer) -> NearbyConfig {
    NearbyConfig {
        mirror_timeout_secs: 1,
        overpass_mirrors: mirrors,
        nominatim_url: services.uri(),
        routing_url: services.uri(),
        ..NearbyConfig::default()
    }
}

fn mirror(server: &MockServer) -> String {
    format!("{}/api/interpreter", server.uri())
}

async fn mount_reverse(services: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/reverse"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "display_name": "MG Road, Bengaluru, Karnataka, India"
        })))
        .mount(services)
        .await;
}

fn one_hospital() -> serde_json::Value {
    json!({"elements": [{
        "type": "node", "id": 42, "lat": 12.9800, "lon": 77.6000,
        "tags": {"name": "Bowring Hospital", "addr:street": "Shivaji Nagar", "addr:city": "Bengaluru"}
    }]})
}

#[tokio::test]
async fn test_slow_primary_falls_back_to_second_mirror() {
    let services = MockServer::start().await;
    mount_reverse(&services).await;

    let slow = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/interpreter"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"elements": []}))
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&slow)
        .await;

    let healthy = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/interpreter"))
        .respond_with(ResponseTemplate::new(200).set_body_json(one_hospital()))
        .expect(1)
        .mount(&healthy)
        .await;

    let mut finder = NearbyFinder::from_config(&config(vec![mirror(&slow), mirror(&healthy)], &services));
    finder.locate(&FixedLocation(HERE)).await;

    assert_eq!(finder.status(), &SearchStatus::Loaded);
    assert_eq!(finder.address(), "MG Road, Bengaluru, Karnataka, India");

    let hospitals = finder.hospitals();
    assert_eq!(hospitals.len(), 1);
    assert_eq!(hospitals[0].name, "Bowring Hospital");
    assert_eq!(hospitals[0].address, "Shivaji Nagar, Bengaluru");
    let expected = HERE.distance_km(&GeoPoint::new(12.98, 77.60));
    assert!((hospitals[0].distance_km - expected).abs() < 1e-9);
    assert_eq!(hospitals[0].distance_label(), "1.10 km");
    assert!(finder.drain_notifications().is_empty());
}

#[tokio::test]
async fn test_error_status_and_garbage_are_skipped() {
    let services = MockServer::start().await;
    mount_reverse(&services).await;

    let failing = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(504).set_body_json(json!({"elements": []})))
        .mount(&failing)
        .await;

    let garbage = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>rate limited</html>"))
        .mount(&garbage)
        .await;

    let healthy = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(one_hospital()))
        .mount(&healthy)
        .await;

    let mirrors = vec![mirror(&failing), mirror(&garbage), mirror(&healthy)];
    let mut finder = NearbyFinder::from_config(&config(mirrors, &services));
    finder.search_at(HERE).await;

    assert_eq!(finder.hospitals().len(), 1);
}

#[tokio::test]
async fn test_empty_result_is_not_a_failure() {
    let services = MockServer::start().await;
    mount_reverse(&services).await;

    let empty = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"elements": []})))
        .mount(&empty)
        .await;

    let never = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(one_hospital()))
        .expect(0)
        .mount(&never)
        .await;

    let mut finder = NearbyFinder::from_config(&config(vec![mirror(&empty), mirror(&never)], &services));
    finder.search_at(HERE).await;

    assert_eq!(finder.status(), &SearchStatus::Empty);
    assert!(finder.hospitals().is_empty());
    let notices = finder.drain_notifications();
    assert_eq!(notices[0].level, NoticeLevel::Info);
    assert_eq!(notices[0].message, "No hospitals found nearby.");
}

#[tokio::test]
async fn test_all_mirrors_failing_is_terminal() {
    let services = MockServer::start().await;
    mount_reverse(&services).await;

    let mirrors = vec![
        "http://127.0.0.1:9/api/interpreter".to_string(),
        "http://127.0.0.1:9/other/interpreter".to_string(),
    ];
    let mut finder = NearbyFinder::from_config(&config(mirrors, &services));
    finder.search_at(HERE).await;

    let message = "Error fetching hospitals: All Overpass servers failed. Please try again later.";
    assert_eq!(finder.status(), &SearchStatus::Failed(message.to_string()));
    assert_eq!(finder.drain_notifications()[0].message, message);
}

#[tokio::test]
async fn test_reverse_geocoding_outcomes() {
    let services = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/reverse"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"error": "Unable to geocode"})))
        .mount(&services)
        .await;

    let mut finder = NearbyFinder::from_config(&config(vec![], &services));
    finder.search_at(HERE).await;
    assert_eq!(finder.address(), "Address not found");

    let mut offline = NearbyFinder::from_config(&NearbyConfig {
        mirror_timeout_secs: 1,
        overpass_mirrors: vec![],
        nominatim_url: "http://127.0.0.1:9".to_string(),
        ..NearbyConfig::default()
    });
    offline.search_at(HERE).await;
    assert_eq!(offline.address(), "Unable to fetch address");
}

#[tokio::test]
async fn test_manual_address_search() {
    let services = MockServer::start().await;
    mount_reverse(&services).await;
    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("q", "Bangalore, MG Road"))
        .and(query_param("limit", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"lat": "12.9750", "lon": "77.6060", "display_name": "MG Road"}
        ])))
        .mount(&services)
        .await;
    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("q", "Atlantis"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&services)
        .await;

    let healthy = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(one_hospital()))
        .mount(&healthy)
        .await;

    let mut finder = NearbyFinder::from_config(&config(vec![mirror(&healthy)], &services));

    finder.search_address("   ").await;
    assert!(finder.search_location().is_none());

    finder.search_address("Atlantis").await;
    assert_eq!(finder.drain_notifications()[0].message, "Location not found. Try a different query.");
    assert!(finder.search_location().is_none());

    finder.search_address("Bangalore, MG Road").await;
    assert_eq!(finder.search_location(), Some(GeoPoint::new(12.975, 77.606)));
    assert!(finder.real_location().is_none());
    assert_eq!(finder.hospitals().len(), 1);
}

#[tokio::test]
async fn test_geocoding_failure_message() {
    let services = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&services)
        .await;

    let mut finder = NearbyFinder::from_config(&config(vec![], &services));
    finder.search_address("Pune").await;

    let notices = finder.drain_notifications();
    assert_eq!(notices[0].level, NoticeLevel::Error);
    assert_eq!(notices[0].message, "Geocoding failed. Check network and try again.");
}

#[tokio::test]
async fn test_route_from_real_location() {
    let services = MockServer::start().await;
    mount_reverse(&services).await;
    Mock::given(method("GET"))
        .and(path("/route/v1/driving/77.5946,12.9716;77.6,12.98"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "code": "Ok",
            "routes": [{"distance": 1534.2, "duration": 301.0}]
        })))
        .mount(&services)
        .await;

    let healthy = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(one_hospital()))
        .mount(&healthy)
        .await;

    let mut finder = NearbyFinder::from_config(&config(vec![mirror(&healthy)], &services));
    finder.locate(&FixedLocation(HERE)).await;

    let route = finder.route_to(0).await.expect("route");
    assert_eq!(route.distance_m, 1534.2);
    assert!(finder.hospitals()[0]
        .directions_url
        .contains("origin=12.9716,77.5946&destination=12.98,77.6"));

    assert!(finder.route_to(7).await.is_none());
}

#[tokio::test]
async fn test_route_failure_message() {
    let services = MockServer::start().await;
    mount_reverse(&services).await;
    Mock::given(method("GET"))
        .and(path("/route/v1/driving/77.5946,12.9716;77.6,12.98"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "code": "NoRoute", "message": "Impossible route between points"
        })))
        .mount(&services)
        .await;

    let healthy = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(one_hospital()))
        .mount(&healthy)
        .await;

    let mut finder = NearbyFinder::from_config(&config(vec![mirror(&healthy)], &services));
    finder.locate(&FixedLocation(HERE)).await;
    finder.drain_notifications();

    assert!(finder.route_to(0).await.is_none());
    assert_eq!(
        finder.drain_notifications()[0].message,
        "Unable to calculate route. Please try again or check your network."
    );
}

#[tokio::test]
async fn test_location_failure_sets_error_state() {
    let services = MockServer::start().await;
    let mut finder = NearbyFinder::from_config(&config(vec![], &services));

    finder.locate(&NoLocation).await;

    assert!(finder.location_error().is_some());
    assert!(finder.real_location().is_none());
    assert_eq!(finder.status(), &SearchStatus::Idle);
}
