use crate::management::event_store::EventStore;
use crate::management::observation_manager::ObservationManager;
use crate::utils::config::Config;
use crate::utils::logging::*;
use crate::web::api::{analysis, config, log, observation};
use actix_web::{App, HttpServer};
use std::time::Duration;
use tokio::time::sleep;

pub struct Management;

impl Management {
    pub async fn run() {
        logging_information!(SystemEntry::Initializing);
        let config = Config::now().await;
        EventStore::initialize(&config.event_store_path, config.timezone()).await;
        ObservationManager::configure(config.deduplicator()).await;
        let http_server = loop {
            let config = Config::now().await;
            let http_server = HttpServer::new(|| {
                let cors = actix_cors::Cors::default()
                    .allow_any_origin()
                    .allow_any_method()
                    .allow_any_header()
                    .max_age(3600);
                App::new()
                    .wrap(cors)
                    .service(analysis::initialize())
                    .service(config::initialize())
                    .service(log::initialize())
                    .service(observation::initialize())
            })
            .bind(format!("0.0.0.0:{}", config.http_server_bind_port));
            match http_server {
                Ok(http_server) => break http_server,
                Err(err) => {
                    logging_critical!(NetworkEntry::BindPortError(err));
                    sleep(Duration::from_secs(config.bind_retry_duration)).await;
                    continue;
                }
            }
        };
        logging_information!(SystemEntry::WebReady);
        logging_information!(SystemEntry::InitializeComplete);
        logging_information!(SystemEntry::Online);
        if let Err(err) = http_server.run().await {
            logging_emergency!(SystemEntry::WebPanic(err));
        }
    }

    pub async fn terminate() {
        logging_information!(SystemEntry::Terminating);
        logging_information!(format!("Management: {} events recorded.", EventStore::count().await));
        logging_information!(SystemEntry::TerminateComplete);
    }
}
