//! Application state and routing

use crate::handlers;
use axum::{routing::get, Router};
use freight_core::{MemoryStore, Organization, OrganizationService, Shipment, ShipmentService};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub organizations: Arc<OrganizationService>,
    pub shipments: Arc<ShipmentService>,
}

impl AppState {
    /// Services over fresh, empty in-memory stores.
    ///
    /// Both services share the organization table so shipments can be
    /// reconciled against registered organizations.
    pub fn in_memory() -> Self {
        let organization_store = Arc::new(MemoryStore::<Organization>::new());
        let shipment_store = Arc::new(MemoryStore::<Shipment>::new());

        Self {
            organizations: Arc::new(OrganizationService::new(organization_store.clone())),
            shipments: Arc::new(ShipmentService::new(shipment_store, organization_store)),
        }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        // Liveness
        .route("/", get(handlers::health))
        .merge(organization_routes())
        .merge(shipment_routes())
        .layer(
            ServiceBuilder::new()
                .layer(
                    TraceLayer::new_for_http()
                        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                        .on_response(DefaultOnResponse::new().level(Level::INFO)),
                )
                .layer(
                    CorsLayer::new()
                        .allow_origin(Any)
                        .allow_methods(Any)
                        .allow_headers(Any),
                ),
        )
        .with_state(state)
}

fn organization_routes() -> Router<AppState> {
    use handlers::organizations;

    Router::new()
        .route(
            "/organizations",
            get(organizations::list).post(organizations::create),
        )
        .route("/organizations/", get(organizations::missing_id))
        .route("/organizations/:id", get(organizations::get))
}

fn shipment_routes() -> Router<AppState> {
    use handlers::shipments;

    Router::new()
        .route("/shipments", get(shipments::list).post(shipments::create))
        .route("/shipments/", get(shipments::missing_reference_id))
        .route("/shipments/:reference_id", get(shipments::get))
        .route(
            "/shipments/aggregate/weight/",
            get(shipments::missing_unit),
        )
        .route(
            "/shipments/aggregate/weight/:unit",
            get(shipments::aggregate_weight),
        )
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::{to_bytes, Body},
        http::{Method, Request, StatusCode},
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    async fn send(
        app: &Router,
        method: Method,
        uri: &str,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json");
        let request = match body {
            Some(body) => request.body(Body::from(serde_json::to_vec(&body).unwrap())),
            None => request.body(Body::empty()),
        }
        .unwrap();

        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    async fn get_json(app: &Router, uri: &str) -> (StatusCode, Value) {
        send(app, Method::GET, uri, None).await
    }

    async fn post_json(app: &Router, uri: &str, body: Value) -> (StatusCode, Value) {
        send(app, Method::POST, uri, Some(body)).await
    }

    fn app() -> Router {
        router(AppState::in_memory())
    }

    fn pack(weight: &str, unit: &str) -> Value {
        json!({ "nodes": [{ "totalWeight": { "weight": weight, "unit": unit } }] })
    }

    fn organizations_fixture() -> Vec<Value> {
        vec![
            json!({ "id": "381f5cc5-dfe4-4f58-98ad-116666855ca3", "code": "SEA", "type": "ORGANIZATION" }),
            json!({ "id": "34f195b5-2aa1-4914-85ab-f8849f9b541a", "code": "FMT", "type": "ORGANIZATION" }),
            json!({ "id": "99f2535b-3f90-4758-8549-5b13c43a8504", "code": "BOG", "type": "ORGANIZATION" }),
        ]
    }

    fn shipments_fixture() -> Vec<Value> {
        let [sea, fmt, bog] = <[Value; 3]>::try_from(organizations_fixture()).unwrap();
        vec![
            json!({
                "referenceId": "S00001175",
                "organizations": [sea.clone()],
                "estimatedTimeArrival": "2020-11-20T00:00:00",
                "transportPacks": pack("3", "KILOGRAMS"),
                "type": "SHIPMENT"
            }),
            json!({
                "referenceId": "S00001009",
                "organizations": [],
                "estimatedTimeArrival": "2020-01-17T15:07:00",
                "transportPacks": pack("1000", "OUNCES"),
                "type": "SHIPMENT"
            }),
            json!({
                "referenceId": "S00001142",
                "organizations": [fmt],
                "estimatedTimeArrival": "2020-08-29T00:00:00",
                "transportPacks": { "nodes": [] },
                "type": "SHIPMENT"
            }),
            json!({
                "referenceId": "S00001071",
                "organizations": [bog.clone()],
                "estimatedTimeArrival": "2020-03-13T00:00:00",
                "transportPacks": pack("5", "KILOGRAMS"),
                "type": "SHIPMENT"
            }),
            json!({
                "referenceId": "S00001167",
                "organizations": [sea],
                "estimatedTimeArrival": "2020-11-21T00:00:00",
                "transportPacks": pack("22690", "KILOGRAMS"),
                "type": "SHIPMENT"
            }),
            json!({
                "referenceId": "S00001197",
                "organizations": [bog],
                "estimatedTimeArrival": null,
                "transportPacks": pack("10", "POUNDS"),
                "type": "SHIPMENT"
            }),
        ]
    }

    async fn seeded_app() -> Router {
        let app = app();
        for org in organizations_fixture() {
            let (status, _) = post_json(&app, "/organizations", org).await;
            assert_eq!(status, StatusCode::CREATED);
        }
        for shipment in shipments_fixture() {
            let (status, _) = post_json(&app, "/shipments", shipment).await;
            assert_eq!(status, StatusCode::CREATED);
        }
        app
    }

    #[tokio::test]
    async fn test_liveness() {
        let (status, body) = get_json(&app(), "/").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!("Running :)"));
    }

    #[tokio::test]
    async fn test_list_shipments_returns_everything_posted() {
        let app = seeded_app().await;
        let (status, body) = get_json(&app, "/shipments").await;
        assert_eq!(status, StatusCode::OK);

        let listed = Shipment::from_json_array(&body).unwrap();
        let expected = Shipment::from_json_array(&Value::Array(shipments_fixture())).unwrap();
        assert_eq!(listed, expected);
    }

    #[tokio::test]
    async fn test_get_shipment() {
        let app = seeded_app().await;
        let (status, body) = get_json(&app, "/shipments/S00001175").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["type"], "SHIPMENT");
        assert_eq!(
            Shipment::from_json(&body).unwrap(),
            Shipment::from_json(&shipments_fixture()[0]).unwrap()
        );

        let (status, body) = get_json(&app, "/shipments/NOT_A_VALID_ID").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(
            body,
            json!({ "message": "Object with primary key NOT_A_VALID_ID not found." })
        );

        let (status, body) = get_json(&app, "/shipments/").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({ "message": "Reference ID is required" }));
    }

    #[tokio::test]
    async fn test_aggregate_weight_in_every_unit() {
        let app = seeded_app().await;
        for (unit, total) in [
            ("KILOGRAMS", "22730.89"),
            ("OUNCES", "801809.25"),
            ("POUNDS", "50112.96"),
        ] {
            let uri = format!("/shipments/aggregate/weight/{}", unit);
            let (status, body) = get_json(&app, &uri).await;
            assert_eq!(status, StatusCode::OK);
            assert_eq!(body, json!({ "totalWeight": total, "unit": unit }));
        }
    }

    #[tokio::test]
    async fn test_aggregate_small_mixed_store() {
        let app = app();
        for (reference_id, packs) in [("A", pack("3", "KILOGRAMS")), ("B", pack("10", "POUNDS"))] {
            let shipment = json!({ "referenceId": reference_id, "transportPacks": packs });
            post_json(&app, "/shipments", shipment).await;
        }

        let (_, body) = get_json(&app, "/shipments/aggregate/weight/KILOGRAMS").await;
        assert_eq!(body["totalWeight"], "7.54");
    }

    #[tokio::test]
    async fn test_aggregate_empty_store() {
        let (status, body) = get_json(&app(), "/shipments/aggregate/weight/POUNDS").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "totalWeight": "0.00", "unit": "POUNDS" }));
    }

    #[tokio::test]
    async fn test_aggregate_rejects_unknown_unit() {
        let app = app();
        for uri in [
            "/shipments/aggregate/weight/METERS",
            "/shipments/aggregate/weight/",
        ] {
            let (status, body) = get_json(&app, uri).await;
            assert_eq!(status, StatusCode::BAD_REQUEST);
            assert_eq!(body, json!({ "message": "Unit is required" }));
        }
    }

    #[tokio::test]
    async fn test_resubmitted_shipment_is_updated() {
        let app = seeded_app().await;
        let mut shipment = shipments_fixture()[0].clone();
        shipment["organizations"] = json!(["ORGANIZATION_1", "ORGANIZATION_2"]);

        let (status, body) = post_json(&app, "/shipments", shipment).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body["organizations"],
            json!([
                { "type": "ORGANIZATION", "code": "ORGANIZATION_1" },
                { "type": "ORGANIZATION", "code": "ORGANIZATION_2" }
            ])
        );

        let (_, listed) = get_json(&app, "/shipments").await;
        assert_eq!(listed.as_array().unwrap().len(), 6);
    }

    #[tokio::test]
    async fn test_new_reference_id_is_created() {
        let app = seeded_app().await;
        let mut shipment = shipments_fixture()[0].clone();
        shipment["referenceId"] = json!("SHIPMENT_4");

        let (status, body) = post_json(&app, "/shipments", shipment).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["referenceId"], "SHIPMENT_4");
    }

    #[tokio::test]
    async fn test_shipment_stub_resolved_to_registered_organization() {
        let app = app();
        post_json(&app, "/organizations", json!({ "id": "A", "code": "X" })).await;

        let (status, body) = post_json(
            &app,
            "/shipments",
            json!({
                "referenceId": "S1",
                "organizations": ["X"],
                "transportPacks": { "nodes": [] }
            }),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);

        let expected = json!([{ "type": "ORGANIZATION", "id": "A", "code": "X" }]);
        assert_eq!(body["organizations"], expected);

        let (_, stored) = get_json(&app, "/shipments/S1").await;
        assert_eq!(stored["organizations"], expected);
    }

    #[tokio::test]
    async fn test_invalid_shipment_payloads() {
        let app = app();
        let (status, body) = post_json(&app, "/shipments", json!({})).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({ "message": "Invalid JSON" }));

        let (status, _) = post_json(
            &app,
            "/shipments",
            json!({
                "referenceId": "S1",
                "transportPacks": pack("1", "STONE")
            }),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (_, listed) = get_json(&app, "/shipments").await;
        assert_eq!(listed, json!([]));
    }

    #[tokio::test]
    async fn test_organization_create_then_update() {
        let app = app();
        let (status, body) =
            post_json(&app, "/organizations", json!({ "id": "A", "code": "X" })).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body, json!({ "type": "ORGANIZATION", "id": "A", "code": "X" }));

        let (status, body) =
            post_json(&app, "/organizations", json!({ "id": "A", "code": "Y" })).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["code"], "Y");

        let (_, listed) = get_json(&app, "/organizations").await;
        assert_eq!(listed, json!([{ "type": "ORGANIZATION", "id": "A", "code": "Y" }]));
    }

    #[tokio::test]
    async fn test_get_organization() {
        let app = seeded_app().await;
        let (status, body) =
            get_json(&app, "/organizations/381f5cc5-dfe4-4f58-98ad-116666855ca3").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["code"], "SEA");

        let (status, body) = get_json(&app, "/organizations/NOT_A_VALID_ID").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(
            body,
            json!({ "message": "Object with primary key NOT_A_VALID_ID not found." })
        );

        let (status, body) = get_json(&app, "/organizations/").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({ "message": "ID is required" }));
    }

    #[tokio::test]
    async fn test_organization_without_id_gets_one() {
        let app = app();
        let (status, body) = post_json(&app, "/organizations", json!({ "code": "SEA" })).await;
        assert_eq!(status, StatusCode::CREATED);

        let id = body["id"].as_str().unwrap();
        let (status, fetched) = get_json(&app, &format!("/organizations/{}", id)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(fetched, body);
    }

    #[tokio::test]
    async fn test_invalid_organization_payloads() {
        let app = app();
        let (status, body) = post_json(&app, "/organizations", json!({})).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({ "message": "Invalid JSON" }));

        let request = Request::builder()
            .method(Method::POST)
            .uri("/organizations")
            .header("content-type", "application/json")
            .body(Body::from("{not json"))
            .unwrap();
        let response = app.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(
            serde_json::from_slice::<Value>(&bytes).unwrap(),
            json!({ "message": "Invalid JSON" })
        );
    }
}
