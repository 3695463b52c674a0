//! Unit tests for TOML configuration parsing.

#![cfg(feature = "std")]

use std::io::Write;

use motion_kernel::config::{load_config, parse_config, SystemConfig};
use motion_kernel::error::{ConfigError, LimitKind};
use motion_kernel::{DurationDiscretization, Error, KinematicRequest};

const TWO_AXES: &str = r#"
duration_discretization = "discrete"

[[axes]]
name = "shoulder"
max_velocity = 2.0
max_acceleration = 4.0
max_jerk = 8.0
min_acceleration = -2.0

[[axes]]
name = "elbow"
max_velocity = 1.0
max_acceleration = 1.0
"#;

/// Test parsing a two-axis configuration with optional fields.
#[test]
fn test_parse_two_axes() {
    let config: SystemConfig = parse_config(TWO_AXES).expect("Failed to parse TOML");
    assert_eq!(config.duration_discretization, DurationDiscretization::Discrete);

    let names: Vec<&str> = config.axis_names().collect();
    assert_eq!(names, ["shoulder", "elbow"]);

    let shoulder = config.axis("shoulder").expect("Axis not found");
    assert_eq!(shoulder.effective_min_acceleration(), -2.0);
    assert!(shoulder.is_jerk_limited());
    assert!(!config.axis("elbow").unwrap().is_jerk_limited());
}

/// Test the request built from a parsed configuration.
#[test]
fn test_request_from_parsed_config() {
    let config = parse_config(TWO_AXES).unwrap();
    let request = KinematicRequest::<2>::from_config(&config).unwrap();

    assert_eq!(request.duration_discretization, DurationDiscretization::Discrete);
    assert_eq!(request.min_acceleration, Some([-2.0, -1.0]));
    assert_eq!(request.max_jerk[1], f64::INFINITY);
    assert!(request.is_valid());
}

/// Test loading a configuration file from disk.
#[test]
fn test_load_config_from_file() {
    let path = std::env::temp_dir().join("motion_kernel_two_axes.toml");
    let mut file = std::fs::File::create(&path).unwrap();
    file.write_all(TWO_AXES.as_bytes()).unwrap();
    drop(file);

    let config = load_config(&path).unwrap();
    assert_eq!(config.axes.len(), 2);

    std::fs::remove_file(&path).ok();
}

/// Test that validation runs as part of parsing.
#[test]
fn test_parse_rejects_invalid_limits() {
    let toml = r#"
[[axes]]
name = "x"
max_velocity = 1.0
max_acceleration = 1.0
min_velocity = 0.5
"#;

    let result = parse_config(toml);
    assert!(matches!(
        result,
        Err(Error::Config(ConfigError::InvalidLimit {
            limit: LimitKind::MinVelocity,
            ..
        }))
    ));
}

/// Test that an empty configuration is rejected.
#[test]
fn test_parse_rejects_empty_config() {
    assert_eq!(parse_config(""), Err(Error::Config(ConfigError::NoAxes)));
}

/// Test duplicate axis names.
#[test]
fn test_parse_rejects_duplicate_names() {
    let toml = r#"
[[axes]]
name = "x"
max_velocity = 1.0
max_acceleration = 1.0

[[axes]]
name = "x"
max_velocity = 2.0
max_acceleration = 2.0
"#;

    let err = parse_config(toml).unwrap_err();
    assert!(err.to_string().contains("Duplicate axis name"));
}
