use crate::management::event_store::EventStore;
use crate::management::observation_manager::ObservationManager;
use actix_web::{get, post, web, HttpResponse, Responder, Scope};
use common::observation::{LocalizedObject, MemoryEntry, RawObservation};
use serde::{Deserialize, Serialize};

pub fn initialize() -> Scope {
    web::scope("/observation")
        .service(detect)
        .service(boxes)
        .service(memory)
        .service(reset_memory)
}

#[derive(Deserialize, Debug)]
struct DetectionReport {
    #[serde(default, alias = "localized_object_annotations")]
    objects: Vec<LocalizedObject>,
}

#[derive(Serialize, Debug)]
struct MemoryReport {
    cycle: u64,
    entries: Vec<MemoryEntry>,
    recorded_events: usize,
}

#[post("/detect")]
async fn detect(report: web::Json<DetectionReport>) -> impl Responder {
    let report = ObservationManager::process_objects(report.into_inner().objects).await;
    HttpResponse::Ok().json(report)
}

#[post("/boxes")]
async fn boxes(observations: web::Json<Vec<RawObservation>>) -> impl Responder {
    let report = ObservationManager::process(observations.into_inner()).await;
    HttpResponse::Ok().json(report)
}

#[get("/memory")]
async fn memory() -> impl Responder {
    let memory = ObservationManager::memory().await;
    HttpResponse::Ok().json(MemoryReport {
        cycle: memory.cycle(),
        entries: memory.entries().to_vec(),
        recorded_events: EventStore::count().await,
    })
}

#[post("/memory/reset")]
async fn reset_memory() -> impl Responder {
    let dropped = ObservationManager::reset_memory().await;
    HttpResponse::Ok().json(dropped)
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{test, App};
    use serde_json::json;

    #[actix_web::test]
    async fn uploaded_boxes_are_recorded_once() {
        let app = test::init_service(App::new().service(initialize())).await;
        let upload = json!([
            {"coordinates": [0.61, 0.71, 0.66, 0.79], "confidence": 0.8},
            {"coordinates": [0.612, 0.708, 0.661, 0.791], "confidence": 0.7},
            {"coordinates": [0.61, 0.71]}
        ]);
        let request = test::TestRequest::post().uri("/observation/boxes").set_json(&upload).to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, request).await;
        assert_eq!(body["cars"].as_array().unwrap().len(), 1);
        assert_eq!(body["duplicate"], 1);
        assert_eq!(body["rejected"].as_array().unwrap().len(), 1);

        let request = test::TestRequest::post().uri("/observation/boxes").set_json(&upload).to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, request).await;
        assert!(body["cars"].as_array().unwrap().is_empty());
        assert_eq!(body["duplicate"], 2);
    }

    #[actix_web::test]
    async fn detector_output_keeps_tracked_labels() {
        let app = test::init_service(App::new().service(initialize())).await;
        let detection = json!({"localized_object_annotations": [
            {"name": "Car", "score": 0.93, "vertices": [{"x": 0.81, "y": 0.41}, {"x": 0.86, "y": 0.41}, {"x": 0.86, "y": 0.47}, {"x": 0.81, "y": 0.47}]},
            {"name": "Person", "score": 0.88, "vertices": [{"x": 0.21, "y": 0.51}, {"x": 0.24, "y": 0.59}]}
        ]});
        let request = test::TestRequest::post().uri("/observation/detect").set_json(&detection).to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, request).await;
        let cars = body["cars"].as_array().unwrap();
        assert_eq!(cars.len(), 1);
        assert_eq!(cars[0]["bounding_box"]["x_max"], 0.86);
    }

    #[::core::prelude::v1::test]
    fn detector_payload_accepts_vision_field_name() {
        let body = r#"{"localized_object_annotations": [{"name": "Car", "score": 0.91, "vertices": [{"x": 0.1, "y": 0.2}, {"x": 0.3, "y": 0.4}]}]}"#;
        let report: DetectionReport = serde_json::from_str(body).unwrap();
        assert_eq!(report.objects.len(), 1);
        assert_eq!(report.objects[0].vertices[1].y, 0.4);
    }

    #[::core::prelude::v1::test]
    fn detector_payload_may_be_empty() {
        let report: DetectionReport = serde_json::from_str("{}").unwrap();
        assert!(report.objects.is_empty());
    }
}
