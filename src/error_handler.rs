use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use diesel::result::Error as DieselError;
use diesel_async::pooled_connection::bb8::RunError as BB8RunError;
use diesel_async::pooled_connection::PoolError;
use serde_json::json;
use std::fmt;

// Every variant renders as an HTTP 200 with a `{"status":"error"}` body:
// callers inspect the envelope, never the status line. Missing rows on
// by-id lookups are not errors at all (the handler answers with an empty
// JSON value instead).
#[derive(Debug)]
pub enum ServiceError {
    Validation(String),
    Database(String),
    Pool(String),
    Internal(String),
}

impl ServiceError {
    fn from_diesel_error(error: DieselError) -> ServiceError {
        match error {
            DieselError::DatabaseError(kind, info) => {
                log::error!("Database error: {:?} - Info: {}", kind, info.message());
                ServiceError::Database(info.message().to_string())
            }
            err => {
                log::error!("Unexpected Diesel error: {}", err);
                ServiceError::Database(err.to_string())
            }
        }
    }

    fn from_pool_error(error: PoolError) -> ServiceError {
        log::error!("Pool error: {:?}", error);
        ServiceError::Pool("Could not connect to the database pool.".to_string())
    }

    fn from_bb8_run_error(error: BB8RunError) -> ServiceError {
        log::error!("BB8 connection pool error: {:?}", error);
        ServiceError::Pool("Could not obtain connection from database pool.".to_string())
    }
}

impl From<DieselError> for ServiceError {
    fn from(error: DieselError) -> ServiceError {
        ServiceError::from_diesel_error(error)
    }
}

impl From<PoolError> for ServiceError {
    fn from(error: PoolError) -> ServiceError {
        ServiceError::from_pool_error(error)
    }
}

impl From<BB8RunError> for ServiceError {
    fn from(error: BB8RunError) -> ServiceError {
        ServiceError::from_bb8_run_error(error)
    }
}

impl fmt::Display for ServiceError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ServiceError::Validation(msg) => write!(f, "{}", msg),
            ServiceError::Database(msg) => write!(f, "Database error: {}", msg),
            ServiceError::Pool(msg) => write!(f, "{}", msg),
            ServiceError::Internal(msg) => write!(f, "{}", msg),
        }
    }
}

impl ResponseError for ServiceError {
    fn status_code(&self) -> StatusCode {
        StatusCode::OK
    }

    fn error_response(&self) -> HttpResponse {
        let message = self.to_string();

        match self {
            ServiceError::Validation(_) => {
                log::warn!("Responding with validation error: {}", message)
            }
            _ => log::error!("Responding with error envelope: {}", message),
        }

        HttpResponse::Ok().json(json!({
            "status": "error",
            "message": message
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_errors_render_as_success_shaped_envelope() {
        let err = ServiceError::Validation("All fields are required".to_string());
        let resp = err.error_response();
        assert_eq!(resp.status(), StatusCode::OK);
    }

    #[test]
    fn validation_display_is_the_bare_message() {
        let err = ServiceError::Validation("Email and password are required".to_string());
        assert_eq!(err.to_string(), "Email and password are required");
    }

    #[test]
    fn database_display_carries_the_underlying_message() {
        let err = ServiceError::Database("duplicate key value".to_string());
        assert_eq!(err.to_string(), "Database error: duplicate key value");
    }
}
