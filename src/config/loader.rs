//! Configuration loading from files (std only).

use std::fs;
use std::path::Path;

use crate::error::{ConfigError, Error, Result};

use super::SystemConfig;

/// Load configuration from a TOML file.
///
/// # Errors
///
/// Returns an error if the file cannot be read, parsed or validated.
///
/// # Example
///
/// ```rust,ignore
/// use motion_kernel::load_config;
///
/// let config = load_config("axes.toml")?;
/// ```
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<SystemConfig> {
    let content = fs::read_to_string(path.as_ref()).map_err(|e| {
        let msg = truncated(&e.to_string());
        Error::Config(ConfigError::IoError(msg))
    })?;

    parse_config(&content)
}

/// Parse configuration from a TOML string.
///
/// # Errors
///
/// Returns an error if the TOML is invalid or fails validation.
pub fn parse_config(content: &str) -> Result<SystemConfig> {
    let config: SystemConfig = toml::from_str(content).map_err(|e| {
        let msg = truncated(e.message());
        Error::Config(ConfigError::ParseError(msg))
    })?;

    // Validate the configuration
    super::validation::validate_config(&config)?;

    debug!("loaded configuration with {} axes", config.axes.len());
    Ok(config)
}

/// Longest prefix of `msg` that fits the error message capacity.
fn truncated(msg: &str) -> heapless::String<128> {
    let mut out = heapless::String::new();
    for c in msg.chars() {
        if out.push(c).is_err() {
            break;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::{ControlInterface, Synchronization};

    #[test]
    fn test_parse_minimal_config() {
        let toml = r#"
[[axes]]
name = "x"
max_velocity = 1.0
max_acceleration = 2.0
max_jerk = 5.0
"#;

        let config = parse_config(toml).unwrap();
        let x = config.axis("x").unwrap();
        assert_eq!(x.max_jerk, 5.0);
        assert!(x.enabled);
        assert_eq!(config.control_interface, ControlInterface::Position);
        assert_eq!(config.synchronization, Synchronization::Time);
    }

    #[test]
    fn test_parse_modes_and_optional_limits() {
        let toml = r#"
control_interface = "velocity"
synchronization = "time_if_necessary"
duration_discretization = "discrete"

[[axes]]
name = "x"
max_velocity = 1.0
max_acceleration = 2.0
min_velocity = -0.5
min_position = -10.0
max_position = 10.0

[[axes]]
name = "y"
max_velocity = 1.0
max_acceleration = 2.0
max_jerk = 3.0
enabled = false
"#;

        let config = parse_config(toml).unwrap();
        assert_eq!(config.control_interface, ControlInterface::Velocity);
        assert_eq!(config.synchronization, Synchronization::TimeIfNecessary);
        assert_eq!(config.axis_index("y"), Some(1));

        let x = config.axis("x").unwrap();
        assert!(!x.is_jerk_limited());
        assert_eq!(x.effective_min_velocity(), -0.5);
        assert_eq!(x.max_position, Some(10.0));
        assert!(!config.axis("y").unwrap().enabled);
    }

    #[test]
    fn test_parse_error() {
        let result = parse_config("[[axes]]\nname = 3\n");
        assert!(matches!(result, Err(Error::Config(ConfigError::ParseError(_)))));
    }

    #[test]
    fn test_unknown_mode_is_rejected() {
        let toml = r#"
synchronization = "sometimes"

[[axes]]
name = "x"
max_velocity = 1.0
max_acceleration = 2.0
"#;
        assert!(matches!(
            parse_config(toml),
            Err(Error::Config(ConfigError::ParseError(_)))
        ));
    }

    #[test]
    fn test_missing_file() {
        let result = load_config("/nonexistent/axes.toml");
        assert!(matches!(result, Err(Error::Config(ConfigError::IoError(_)))));
    }
}
