use std::convert::Infallible;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::debug;
use warp::http::StatusCode;
use warp::reply::Json;
use warp::{Filter, Rejection, Reply};

use crate::error::ServiceError;
use crate::patient::Patient;
use crate::service::PatientService;

/// Envelope for every response the API produces.
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiResponse {
    pub status: String,
    pub message: String,
    pub data: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct SortParams {
    sort_by: String,
    #[serde(default = "default_order")]
    order: String,
}

fn default_order() -> String {
    "asc".to_string()
}

pub struct RestApi {
    service: Arc<PatientService>,
}

impl RestApi {
    pub fn new(service: Arc<PatientService>) -> Self {
        RestApi { service }
    }

    pub fn routes(&self) -> impl Filter<Extract = impl Reply, Error = Rejection> + Clone {
        self.info()
            .or(self.view_all())
            .or(self.get_patient())
            .or(self.sorted())
            .or(self.create_patient())
    }

    fn info(&self) -> impl Filter<Extract = impl Reply, Error = Rejection> + Clone {
        let service = Arc::clone(&self.service);

        warp::path::end().and(warp::get()).map(move || {
            success(StatusCode::OK, service.info(), None)
        })
    }

    fn view_all(&self) -> impl Filter<Extract = impl Reply, Error = Rejection> + Clone {
        let service = Arc::clone(&self.service);

        warp::path!("view")
            .and(warp::get())
            .and_then(move || {
                let service = Arc::clone(&service);
                async move {
                    let reply = match service.view_all() {
                        Ok(patients) => success(
                            StatusCode::OK,
                            "Patients retrieved",
                            Some(serde_json::to_value(&patients).unwrap()),
                        ),
                        Err(err) => failure(&err),
                    };
                    Ok::<_, Infallible>(reply)
                }
            })
    }

    fn get_patient(&self) -> impl Filter<Extract = impl Reply, Error = Rejection> + Clone {
        let service = Arc::clone(&self.service);

        warp::path!("patient" / String)
            .and(warp::get())
            .and_then(move |id: String| {
                let service = Arc::clone(&service);
                async move {
                    let reply = match service.get_patient(&id) {
                        Ok(view) => success(
                            StatusCode::OK,
                            "Patient found",
                            Some(serde_json::to_value(&view).unwrap()),
                        ),
                        Err(err) => failure(&err),
                    };
                    Ok::<_, Infallible>(reply)
                }
            })
    }

    fn sorted(&self) -> impl Filter<Extract = impl Reply, Error = Rejection> + Clone {
        let service = Arc::clone(&self.service);

        warp::path!("sorted")
            .and(warp::get())
            .and(warp::query::<SortParams>())
            .and_then(move |params: SortParams| {
                let service = Arc::clone(&service);
                async move {
                    let reply = match service.list_sorted(&params.sort_by, &params.order) {
                        Ok(views) => success(
                            StatusCode::OK,
                            "Patients sorted",
                            Some(serde_json::to_value(&views).unwrap()),
                        ),
                        Err(err) => failure(&err),
                    };
                    Ok::<_, Infallible>(reply)
                }
            })
    }

    fn create_patient(&self) -> impl Filter<Extract = impl Reply, Error = Rejection> + Clone {
        let service = Arc::clone(&self.service);

        warp::path!("create")
            .and(warp::post())
            .and(warp::body::json())
            .and_then(move |patient: Patient| {
                let service = Arc::clone(&service);
                async move {
                    let reply = match service.create(patient) {
                        Ok(()) => {
                            success(StatusCode::CREATED, "Patient created successfully", None)
                        }
                        Err(err) => failure(&err),
                    };
                    Ok::<_, Infallible>(reply)
                }
            })
    }
}

fn success(
    code: StatusCode,
    message: &str,
    data: Option<serde_json::Value>,
) -> warp::reply::WithStatus<Json> {
    let response = ApiResponse {
        status: "success".to_string(),
        message: message.to_string(),
        data,
    };
    warp::reply::with_status(warp::reply::json(&response), code)
}

fn failure(err: &ServiceError) -> warp::reply::WithStatus<Json> {
    debug!("request failed: {}", err);
    let response = ApiResponse {
        status: "error".to_string(),
        message: err.to_string(),
        data: None,
    };
    warp::reply::with_status(warp::reply::json(&response), status_for(err))
}

fn status_for(err: &ServiceError) -> StatusCode {
    match err {
        ServiceError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
        ServiceError::InvalidQuery(_) => StatusCode::BAD_REQUEST,
        ServiceError::NotFound(_) => StatusCode::NOT_FOUND,
        ServiceError::Conflict(_) => StatusCode::CONFLICT,
        ServiceError::Storage(_) => StatusCode::SERVICE_UNAVAILABLE,
    }
}

/// Turns transport-level rejections into the same response envelope the
/// handlers use.
pub async fn handle_rejection(err: Rejection) -> Result<impl Reply, Infallible> {
    let (code, message) = if err.is_not_found() {
        (StatusCode::NOT_FOUND, "Not found".to_string())
    } else if let Some(e) = err.find::<warp::filters::body::BodyDeserializeError>() {
        (StatusCode::UNPROCESSABLE_ENTITY, e.to_string())
    } else if err.find::<warp::reject::InvalidQuery>().is_some() {
        (StatusCode::BAD_REQUEST, "Invalid query string".to_string())
    } else if err.find::<warp::reject::MethodNotAllowed>().is_some() {
        (
            StatusCode::METHOD_NOT_ALLOWED,
            "Method not allowed".to_string(),
        )
    } else {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            "Unhandled error".to_string(),
        )
    };

    let response = ApiResponse {
        status: "error".to_string(),
        message,
        data: None,
    };
    Ok(warp::reply::with_status(
        warp::reply::json(&response),
        code,
    ))
}
