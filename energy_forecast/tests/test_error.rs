use energy_forecast::{Period, ProjectionError};
use std::io;

#[test]
fn test_error_conversion() {
    // IO error conversion
    let io_error = io::Error::new(io::ErrorKind::NotFound, "file not found");
    let error = ProjectionError::from(io_error);
    assert!(matches!(error, ProjectionError::IoError(_)));

    // Math error conversion
    let math_error = trend_math::average_change(&[1.0]).unwrap_err();
    let error = ProjectionError::from(math_error);
    assert!(matches!(error, ProjectionError::MathError(_)));

    // JSON error conversion
    let json_error = serde_json::from_str::<Vec<f64>>("[1,").unwrap_err();
    let error = ProjectionError::from(json_error);
    assert!(matches!(error, ProjectionError::JsonError(_)));
}

#[test]
fn test_error_display() {
    let error = ProjectionError::InvalidInput("History is empty".to_string());
    assert_eq!(error.to_string(), "Invalid input: History is empty");

    let io_error = io::Error::new(io::ErrorKind::PermissionDenied, "permission denied");
    let error_string = ProjectionError::from(io_error).to_string();
    assert!(error_string.contains("IO error"));
    assert!(error_string.contains("permission denied"));
}

#[test]
fn test_parse_error_from_period() {
    let error = "the thirteenth month".parse::<Period>().unwrap_err();

    if let ProjectionError::ParseError(msg) = error {
        assert!(msg.contains("the thirteenth month"));
    } else {
        panic!("Wrong error variant");
    }
}
