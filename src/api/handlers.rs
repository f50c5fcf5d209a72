//! Request handlers for the prediction endpoint.

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use chrono::{NaiveDate, NaiveTime};

use super::AppState;
use super::types::{ErrorResponse, PredictionRequest, PredictionResponse};
use crate::features::schema::feature_vector;

/// Predicts per-category energy for a point in time.
///
/// `POST /predict` → 200 + `PredictionResponse` JSON
/// Malformed date or time → 400 + `ErrorResponse`
///
/// The request date buckets through the same labeling function the
/// simulator uses; a label outside the trained vocabulary one-hot
/// encodes to zeros rather than failing the request.
pub async fn predict(
    State(state): State<Arc<AppState>>,
    Json(request): Json<PredictionRequest>,
) -> impl IntoResponse {
    let date = match NaiveDate::parse_from_str(&request.date, "%d:%m:%Y") {
        Ok(date) => date,
        Err(e) => {
            return Err((
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse {
                    error: format!("invalid date \"{}\" (expected DD:MM:YYYY): {e}", request.date),
                }),
            ));
        }
    };
    let time = match NaiveTime::parse_from_str(&request.time, "%H:%M:%S") {
        Ok(time) => time,
        Err(e) => {
            return Err((
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse {
                    error: format!("invalid time \"{}\" (expected HH:MM:SS): {e}", request.time),
                }),
            ));
        }
    };

    let features = feature_vector(date, time, request.consumed_power);
    let outputs = state.model.predict(&features);
    Ok(Json(PredictionResponse::from_outputs(&outputs)))
}

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use axum::http::Request;
    use tower::util::ServiceExt;

    use super::*;
    use crate::api::model::LinearModel;
    use crate::api::router;
    use crate::catalog::ORDERED_CATEGORIES;

    fn make_test_state() -> Arc<AppState> {
        let intercepts: Vec<f64> = (0..ORDERED_CATEGORIES.len())
            .map(|i| 0.1 * (i + 1) as f64)
            .collect();
        Arc::new(AppState {
            model: LinearModel::constant(intercepts),
        })
    }

    fn predict_request(body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/predict")
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .expect("request should build")
    }

    #[tokio::test]
    async fn predict_returns_named_category_fields() {
        let app = router(make_test_state());
        let resp = app
            .oneshot(predict_request(
                r#"{"date": "01:04:2024", "time": "14:00:00", "consumed_power": 3.719}"#,
            ))
            .await
            .expect("request should succeed");

        assert_eq!(resp.status(), StatusCode::OK);

        let body = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .expect("body should read");
        let json: serde_json::Value = serde_json::from_slice(&body).expect("valid JSON");
        for category in ORDERED_CATEGORIES {
            assert!(json.get(*category).is_some(), "missing field {category}");
        }
        assert!((json["white_goods"].as_f64().unwrap_or(0.0) - 0.1).abs() < 1e-9);
        assert!((json["utility_appliances"].as_f64().unwrap_or(0.0) - 0.6).abs() < 1e-9);
    }

    #[tokio::test]
    async fn invalid_date_returns_400() {
        let app = router(make_test_state());
        let resp = app
            .oneshot(predict_request(
                r#"{"date": "2024-04-01", "time": "14:00:00", "consumed_power": 1.0}"#,
            ))
            .await
            .expect("request should succeed");

        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let body = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .expect("body should read");
        let json: serde_json::Value = serde_json::from_slice(&body).expect("valid JSON");
        assert!(json.get("error").is_some());
    }

    #[tokio::test]
    async fn invalid_time_returns_400() {
        let app = router(make_test_state());
        let resp = app
            .oneshot(predict_request(
                r#"{"date": "01:04:2024", "time": "25:99:00", "consumed_power": 1.0}"#,
            ))
            .await
            .expect("request should succeed");

        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }
}
