use actix_web::{
    http::{
        header::{self, ContentType},
        Method, StatusCode,
    },
    web, HttpRequest, HttpResponse,
};
use chrono::Local;
use serde::Serialize;
use tracing::{error, info, warn};

use crate::{
    error::AppError,
    pipeline::{to_payload, ReviewPipeline},
    utils::params::{FormPairs, ReviewForm, ReviewQuery},
};

/// Mounts the review endpoints on `/`. Expects `web::Data<ReviewPipeline>` in app data.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/")
            .route(web::get().to(get_reviews))
            .route(web::post().to(create_review))
            .default_service(web::to(method_not_allowed)),
    );
}

pub async fn get_reviews(
    pipeline: web::Data<ReviewPipeline>,
    pairs: web::Query<FormPairs>,
) -> Result<HttpResponse, AppError> {
    let query = ReviewQuery::from_pairs(&pairs);
    info!("[API] GET reviews - {:?}", query);

    let reviews = pipeline.read(&query).await.map_err(|err| {
        error!("[API] Failed to filter reviews: {}", err);
        AppError::from(err)
    })?;
    let body = encode(&reviews)?;

    info!("[API] Returning {} reviews", reviews.len());
    Ok(json_response(StatusCode::OK, body))
}

/// Reads the body as form data regardless of the declared Content-Type.
pub async fn create_review(
    pipeline: web::Data<ReviewPipeline>,
    body: web::Bytes,
) -> Result<HttpResponse, AppError> {
    let pairs = decode_form(&body).map_err(|err| {
        error!("[API] Undecodable review body: {}", err);
        err
    })?;
    let form = ReviewForm::from_pairs(&pairs);

    let created = pipeline
        .create(&form, Local::now().naive_local())
        .await
        .map_err(|err| {
            warn!("[API] Rejected review: {}", err);
            AppError::from(err)
        })?;
    let body = encode(&created)?;

    info!("[API] Saved review ID: {} for {}", created.review.review_id, created.review.location);
    Ok(json_response(StatusCode::CREATED, body))
}

pub async fn method_not_allowed(req: HttpRequest) -> HttpResponse {
    warn!("[API] Unsupported method {} on {}", req.method(), req.path());
    HttpResponse::MethodNotAllowed()
        .insert_header((header::ALLOW, format!("{}, {}", Method::GET, Method::POST)))
        .content_type(ContentType::plaintext())
        .body("Method Not Allowed")
}

fn decode_form(body: &[u8]) -> Result<FormPairs, AppError> {
    std::str::from_utf8(body)?;
    Ok(serde_urlencoded::from_bytes(body)?)
}

fn encode<T: Serialize + ?Sized>(value: &T) -> Result<Vec<u8>, AppError> {
    to_payload(value).map_err(|err| {
        error!("[API] Failed to serialize response: {}", err);
        AppError::from(err)
    })
}

// actix-web derives Content-Length from the sized body.
fn json_response(status: StatusCode, body: Vec<u8>) -> HttpResponse {
    HttpResponse::build(status)
        .content_type(ContentType::json())
        .body(body)
}
