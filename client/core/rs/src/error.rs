/// Error returned by every [StackitClient](crate::StackitClient) call.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
  #[error("Failed to send request")]
  Request(#[source] reqwest::Error),

  #[error("Request failed with status {status}: {body}")]
  Status { status: u16, body: String },

  #[error("Failed to decode response body")]
  Decode(#[source] reqwest::Error),
}

impl ApiError {
  pub fn status(&self) -> Option<u16> {
    match self {
      ApiError::Status { status, .. } => Some(*status),
      ApiError::Request(e) | ApiError::Decode(e) => {
        e.status().map(|status| status.as_u16())
      }
    }
  }

  /// Gateway errors the wait handlers poll through.
  pub fn is_transient(&self) -> bool {
    matches!(self.status(), Some(502..=504))
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn gateway_errors_are_transient() {
    for status in [502, 503, 504] {
      let err = ApiError::Status {
        status,
        body: String::new(),
      };
      assert!(err.is_transient(), "{status}");
    }
    for status in [400, 404, 500] {
      let err = ApiError::Status {
        status,
        body: String::new(),
      };
      assert!(!err.is_transient(), "{status}");
    }
  }

  #[test]
  fn status_error_names_status_and_body() {
    let err = ApiError::Status {
      status: 409,
      body: String::from("instance is locked"),
    };
    assert_eq!(
      err.to_string(),
      "Request failed with status 409: instance is locked"
    );
  }
}
