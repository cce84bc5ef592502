use crate::utils::logging::Logger;
use actix_web::{get, web, HttpResponse, Responder, Scope};
use chrono::{DateTime, Local};

pub fn initialize() -> Scope {
    web::scope("/log")
        .service(system_log)
        .service(system_log_since)
}

#[get("/system_log")]
async fn system_log() -> impl Responder {
    HttpResponse::Ok().json(Logger::get_system_logs().await)
}

#[get("/system_log/since/{since}")]
async fn system_log_since(since: web::Path<String>) -> impl Responder {
    match parse_datetime(&since.into_inner()) {
        Ok(since_time) => HttpResponse::Ok().json(Logger::get_system_logs_since(since_time).await),
        Err(err) => HttpResponse::BadRequest().body(err),
    }
}

fn parse_datetime(datetime_str: &str) -> Result<DateTime<Local>, String> {
    DateTime::parse_from_rfc3339(datetime_str)
        .map_err(|_| "Invalid datetime format.".to_string())
        .map(|dt| dt.with_timezone(&Local))
}
