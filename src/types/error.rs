use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use sea_orm::DbErr;
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    // business rules
    #[error("team_name already exists")]
    TeamExists,
    #[error("PR id already exists")]
    PrExists,
    #[error("cannot reassign on merged PR")]
    PrMerged,
    #[error("reviewer is not assigned to this PR")]
    NotAssigned,
    #[error("no active replacement candidate in team")]
    NoCandidate,
    #[error("resource not found")]
    NotFound,
    #[error("validation error: {0}")]
    Validation(String),

    // infra things
    #[error(transparent)]
    Db(DbErr),
    #[error("internal error: {0}")]
    Internal(String),
}

impl From<DbErr> for AppError {
    fn from(e: DbErr) -> Self {
        match &e {
            DbErr::RecordNotFound(_) => AppError::NotFound,
            _ => AppError::Db(e),
        }
    }
}

#[derive(Serialize)]
struct ErrorBody<'a, 'b> {
    code: &'a str,
    message: &'b str,
}

#[derive(Serialize)]
struct ErrorEnvelope<'a, 'b> {
    error: ErrorBody<'a, 'b>,
}

impl AppError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::TeamExists => "TEAM_EXISTS",
            Self::PrExists => "PR_EXISTS",
            Self::PrMerged => "PR_MERGED",
            Self::NotAssigned => "NOT_ASSIGNED",
            Self::NoCandidate => "NO_CANDIDATE",
            Self::NotFound => "NOT_FOUND",
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::Db(_) => "DB_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::TeamExists | Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::PrExists | Self::PrMerged | Self::NotAssigned | Self::NoCandidate => {
                StatusCode::CONFLICT
            }
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::Db(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(ErrorEnvelope {
            error: ErrorBody {
                code: self.kind(),
                message: &self.to_string(),
            },
        })
    }
}
