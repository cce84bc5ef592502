use crate::management::observation_manager::ObservationManager;
use crate::utils::config::Config;
use crate::utils::logging::*;
use actix_web::{get, post, web, HttpResponse, Responder, Scope};

pub fn initialize() -> Scope {
    web::scope("/config")
        .service(get_config)
        .service(update_config)
}

#[get("/get")]
async fn get_config() -> impl Responder {
    web::Json(Config::now().await)
}

#[post("/update")]
async fn update_config(config: web::Json<Config>) -> impl Responder {
    let config = config.into_inner();
    if Config::now().await.restart_required(&config) {
        logging_warning!(SystemEntry::RestartRequired);
        return HttpResponse::Conflict().body(SystemEntry::RestartRequired.to_string());
    }
    if Config::validate(&config) {
        ObservationManager::configure(config.deduplicator()).await;
        Config::update(config).await;
        logging_information!(SystemEntry::ConfigUpdated);
        HttpResponse::Ok().finish()
    } else {
        logging_warning!(SystemEntry::InvalidConfig);
        HttpResponse::BadRequest().body("Invalid configuration.")
    }
}
