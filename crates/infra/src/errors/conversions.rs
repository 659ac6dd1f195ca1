//! Conversions from external infrastructure errors into domain errors.

use hrcal_domain::HrCalError;
use reqwest::Error as HttpError;
use reqwest::StatusCode;

/// Error newtype that keeps conversions on the infrastructure side and can be
/// converted back into the domain error.
#[derive(Debug)]
pub struct InfraError(pub HrCalError);

impl From<InfraError> for HrCalError {
    fn from(value: InfraError) -> Self {
        value.0
    }
}

impl From<HrCalError> for InfraError {
    fn from(value: HrCalError) -> Self {
        InfraError(value)
    }
}

/// Extension trait to make the conversion logic explicit in tests and within
/// this module.
trait IntoHrCalError {
    fn into_hrcal(self) -> HrCalError;
}

/* -------------------------------------------------------------------------- */
/* HTTP status → HrCalError */
/* -------------------------------------------------------------------------- */

/// Map a non-success HTTP status onto the domain error taxonomy.
///
/// `context` names the request (usually the collection path) and is appended
/// to the message.
pub fn status_error(status: StatusCode, context: &str) -> HrCalError {
    let code = status.as_u16();
    let message = format!(
        "HTTP {} {} ({context})",
        code,
        status.canonical_reason().unwrap_or("unknown status")
    );

    match code {
        401 | 403 => HrCalError::Auth(message),
        404 => HrCalError::NotFound(message),
        429 => HrCalError::Network(message),
        400..=499 => HrCalError::InvalidInput(message),
        _ => HrCalError::Network(message),
    }
}

/* -------------------------------------------------------------------------- */
/* reqwest::Error → HrCalError */
/* -------------------------------------------------------------------------- */

impl IntoHrCalError for HttpError {
    fn into_hrcal(self) -> HrCalError {
        if self.is_timeout() {
            return HrCalError::Network("HTTP request timed out".into());
        }

        if self.is_connect() {
            return HrCalError::Network("HTTP connection failure".into());
        }

        if self.is_decode() {
            return HrCalError::Parse(format!("invalid response body: {self}"));
        }

        if self.is_builder() {
            return HrCalError::Config(format!("invalid HTTP request: {self}"));
        }

        if let Some(status) = self.status() {
            let context = self.url().map(|url| url.path().to_string()).unwrap_or_default();
            return status_error(status, &context);
        }

        HrCalError::Network(self.to_string())
    }
}

impl From<HttpError> for InfraError {
    fn from(value: HttpError) -> Self {
        InfraError(value.into_hrcal())
    }
}

/* -------------------------------------------------------------------------- */
/* serde_json::Error → HrCalError */
/* -------------------------------------------------------------------------- */

impl IntoHrCalError for serde_json::Error {
    fn into_hrcal(self) -> HrCalError {
        HrCalError::Parse(format!("invalid JSON payload: {self}"))
    }
}

impl From<serde_json::Error> for InfraError {
    fn from(value: serde_json::Error) -> Self {
        InfraError(value.into_hrcal())
    }
}

/* -------------------------------------------------------------------------- */
/* Tests */
/* -------------------------------------------------------------------------- */
