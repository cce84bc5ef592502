use crate::management::event_store::EventStore;
use crate::utils::logging::*;
use actix_web::{get, web, HttpResponse, Responder, Scope};
use chrono::NaiveDate;
use common::analysis::{self, BucketFrequency};
use serde::{Deserialize, Serialize};

pub fn initialize() -> Scope {
    web::scope("/analysis")
        .service(aggregate)
        .service(average)
        .service(summary)
        .service(month)
}

#[derive(Deserialize, Debug)]
struct RangeQuery {
    start: NaiveDate,
    end: NaiveDate,
    #[serde(default = "default_frequency")]
    freq: BucketFrequency,
}

fn default_frequency() -> BucketFrequency {
    BucketFrequency::Day
}

#[derive(Serialize, Debug)]
struct AverageReport {
    start: NaiveDate,
    end: NaiveDate,
    freq: BucketFrequency,
    average: f64,
}

async fn reject(entry: AnalysisEntry) -> HttpResponse {
    let message = entry.to_string();
    logging_warning!(entry);
    HttpResponse::BadRequest().body(message)
}

#[get("/aggregate")]
async fn aggregate(query: web::Query<RangeQuery>) -> impl Responder {
    let RangeQuery { start, end, freq } = query.into_inner();
    let events = EventStore::select(start, end).await;
    if events.is_empty() && start <= end {
        logging_debug!(AnalysisEntry::EmptyInputWarning(start, end));
    }
    match analysis::aggregate(&events, start, end, freq) {
        Ok(buckets) => HttpResponse::Ok().json(buckets),
        Err(entry) => reject(entry).await,
    }
}

#[get("/average")]
async fn average(query: web::Query<RangeQuery>) -> impl Responder {
    let RangeQuery { start, end, freq } = query.into_inner();
    let events = EventStore::select(start, end).await;
    match analysis::average(&events, start, end, freq) {
        Ok(average) => HttpResponse::Ok().json(AverageReport { start, end, freq, average }),
        Err(entry) => reject(entry).await,
    }
}

#[get("/summary")]
async fn summary(query: web::Query<RangeQuery>) -> impl Responder {
    let RangeQuery { start, end, .. } = query.into_inner();
    let events = EventStore::select(start, end).await;
    match analysis::summarize(&events, start, end) {
        Ok(summary) => HttpResponse::Ok().json(summary),
        Err(entry) => reject(entry).await,
    }
}

#[get("/month/{year}/{month}")]
async fn month(path: web::Path<(i32, u32)>) -> impl Responder {
    let (year, month) = path.into_inner();
    let (start, end) = match analysis::month_range(year, month) {
        Ok(range) => range,
        Err(entry) => return reject(entry).await,
    };
    let events = EventStore::select(start, end).await;
    match analysis::aggregate(&events, start, end, BucketFrequency::Day) {
        Ok(buckets) => HttpResponse::Ok().json(buckets),
        Err(entry) => reject(entry).await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;
    use actix_web::{test, App};

    #[actix_web::test]
    async fn reversed_range_is_bad_request() {
        let app = test::init_service(App::new().service(initialize())).await;
        let request = test::TestRequest::get().uri("/analysis/aggregate?start=2024-05-01&end=2024-04-01&freq=d").to_request();
        let response = test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn average_without_events_is_zero() {
        let app = test::init_service(App::new().service(initialize())).await;
        let request = test::TestRequest::get().uri("/analysis/average?start=1999-01-01&end=1999-01-31&freq=w").to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, request).await;
        assert_eq!(body["average"], 0.0);
        assert_eq!(body["freq"], "week");
    }

    #[actix_web::test]
    async fn invalid_month_is_bad_request() {
        let app = test::init_service(App::new().service(initialize())).await;
        let request = test::TestRequest::get().uri("/analysis/month/2024/13").to_request();
        let response = test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn unknown_frequency_is_rejected() {
        let app = test::init_service(App::new().service(initialize())).await;
        let request = test::TestRequest::get().uri("/analysis/aggregate?start=2024-04-01&end=2024-04-30&freq=fortnight").to_request();
        let response = test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
