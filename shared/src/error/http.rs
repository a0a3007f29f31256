//! HTTP status code mapping for error codes

use super::codes::ErrorCode;
use http::StatusCode;

impl ErrorCode {
    /// Get the appropriate HTTP status code for this error code
    pub fn http_status(&self) -> StatusCode {
        match self {
            Self::Success => StatusCode::OK,

            Self::NotFound
            | Self::OrderNotFound
            | Self::ProductNotFound
            | Self::TableNotFound
            | Self::UserNotFound => StatusCode::NOT_FOUND,

            Self::AlreadyExists
            | Self::VersionConflict
            | Self::OrderAlreadyPaid
            | Self::UserEmailExists => StatusCode::CONFLICT,

            Self::NotAuthenticated
            | Self::InvalidCredentials
            | Self::SessionExpired
            | Self::AccountDisabled => StatusCode::UNAUTHORIZED,

            Self::PermissionDenied | Self::RoleRequired | Self::AdminRequired => {
                StatusCode::FORBIDDEN
            }

            Self::OrderInvalidTransition | Self::PaymentOrderNotPayable => {
                StatusCode::UNPROCESSABLE_ENTITY
            }

            Self::PaymentInsufficientAmount => StatusCode::PAYMENT_REQUIRED,

            Self::NetworkError => StatusCode::SERVICE_UNAVAILABLE,

            Self::InternalError | Self::ConfigError | Self::Unknown => {
                StatusCode::INTERNAL_SERVER_ERROR
            }

            // 400 for validation and business errors
            _ => StatusCode::BAD_REQUEST,
        }
    }

    /// Best-effort classification of a bare HTTP status (no structured body)
    pub fn from_http_status(status: StatusCode) -> Self {
        match status {
            s if s.is_success() => Self::Success,
            StatusCode::BAD_REQUEST => Self::InvalidRequest,
            StatusCode::UNAUTHORIZED => Self::NotAuthenticated,
            StatusCode::FORBIDDEN => Self::PermissionDenied,
            StatusCode::NOT_FOUND => Self::NotFound,
            StatusCode::CONFLICT => Self::VersionConflict,
            StatusCode::UNPROCESSABLE_ENTITY => Self::ValidationFailed,
            StatusCode::SERVICE_UNAVAILABLE | StatusCode::GATEWAY_TIMEOUT => Self::NetworkError,
            s if s.is_server_error() => Self::InternalError,
            _ => Self::Unknown,
        }
    }
}
