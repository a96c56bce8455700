use actix_web::error::{JsonPayloadError, PathError, QueryPayloadError};
use actix_web::web::{get, post, put, scope, JsonConfig, PathConfig, QueryConfig, ServiceConfig};
use actix_web::HttpRequest;

use crate::error::Error;
use crate::handlers;

fn path_error(err: PathError, _: &HttpRequest) -> actix_web::Error {
    Error::BusinessError(err.to_string()).into()
}

fn query_error(err: QueryPayloadError, _: &HttpRequest) -> actix_web::Error {
    Error::BusinessError(err.to_string()).into()
}

fn json_error(err: JsonPayloadError, _: &HttpRequest) -> actix_web::Error {
    Error::BusinessError(err.to_string()).into()
}

pub fn configure(cfg: &mut ServiceConfig) {
    // malformed extractor input answers with the same JSON error body as the handlers
    cfg.app_data(PathConfig::default().error_handler(path_error))
        .app_data(QueryConfig::default().error_handler(query_error))
        .app_data(JsonConfig::default().error_handler(json_error))
        .route("/", get().to(handlers::index))
        .service(
            scope("/initiatives")
                .route("", get().to(handlers::initiative::list))
                .route("", post().to(handlers::initiative::create))
                .route("/{initiative_id}", get().to(handlers::initiative::detail))
                .route("/{initiative_id}/apply", post().to(handlers::initiative::apply)),
        )
        .service(scope("/participations").route("/{participation_id}/approve", put().to(handlers::participation::review)))
        .service(scope("/certificates").route("", post().to(handlers::certificate::create)))
        .service(
            scope("/volunteers/{volunteer_id}")
                .route("/participations", get().to(handlers::volunteer::participations))
                .route("/certificates", get().to(handlers::volunteer::certificates)),
        )
        .service(
            scope("/organizations/{organization_id}")
                .route("/initiatives", get().to(handlers::organization::initiatives))
                .route("/applications", get().to(handlers::organization::applications)),
        )
        .service(
            scope("/coordinators/{coordinator_id}")
                .route("/students", get().to(handlers::coordinator::students))
                .route("/reports", get().to(handlers::coordinator::report)),
        )
        .service(
            scope("/users")
                .route("", get().to(handlers::user::list))
                .route("/{user_id}", get().to(handlers::user::detail)),
        )
        .route("/statistics", get().to(handlers::statistics::overview));
}
