use mm_e2e::errors::ApiError;
use std::error::Error;

#[test]
fn test_api_error_implements_error_trait() {
    fn assert_error<T: Error>(_: &T) {}

    let error = ApiError::ParseError("test error".to_string());
    assert_error(&error);
}

#[test]
fn test_api_error_display() {
    let error = ApiError::HttpError("Connection error".to_string());
    assert_eq!(
        format!("{error}"),
        "Failed to send HTTP request: Connection error"
    );

    let error = ApiError::SessionError("MMUSERID cookie not set".to_string());
    assert_eq!(
        format!("{error}"),
        "No authenticated session: MMUSERID cookie not set"
    );

    let error = ApiError::UnexpectedStatus {
        method: "POST".to_string(),
        path: "/api/v4/users".to_string(),
        expected: "201".to_string(),
        actual: 403,
        body: "{\"message\":\"forbidden\"}".to_string(),
    };
    assert_eq!(
        format!("{error}"),
        "Unexpected response status for POST /api/v4/users: expected 201, got 403: {\"message\":\"forbidden\"}"
    );
    assert_eq!(error.status(), Some(403));
}

#[test]
fn test_api_error_from_conversions() {
    let err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
    let api_err: ApiError = err.into();
    assert!(matches!(api_err, ApiError::ParseError(_)));
    assert_eq!(api_err.status(), None);

    let err = std::io::Error::new(std::io::ErrorKind::NotFound, "plugin.tar.gz");
    let api_err: ApiError = err.into();
    match api_err {
        ApiError::IoError(msg) => assert!(msg.contains("plugin.tar.gz")),
        other => panic!("Unexpected error type: {other:?}"),
    }

    // reqwest::Error has no public constructor; this only checks the conversion exists
    #[allow(unused)]
    #[allow(clippy::items_after_statements)]
    fn _check_reqwest_conversion(err: reqwest::Error) -> ApiError {
        ApiError::from(err)
    }
}
