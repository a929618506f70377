//! crisol.yaml parsing and validation.
//!
//! Parses the config and validates structural constraints before any
//! generator is built:
//! - Version must be "1.0"
//! - Target identity must be present and well-formed
//! - Required fields per generator type, with parseable payloads

use super::types::*;
use super::value::ValueKind;
use regex::Regex;
use std::path::Path;
use std::sync::OnceLock;

/// Validation error.
#[derive(Debug, Clone)]
pub struct ValidationError {
    pub message: String,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

/// Parse a crisol.yaml file from disk.
pub fn parse_config_file(path: &Path) -> Result<CrisolConfig, String> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| format!("failed to read {}: {}", path.display(), e))?;
    parse_config(&content)
}

/// Parse a crisol.yaml from a string.
pub fn parse_config(yaml: &str) -> Result<CrisolConfig, String> {
    serde_yaml_ng::from_str(yaml).map_err(|e| format!("YAML parse error: {}", e))
}

/// Kinds must be CamelCase alphanumeric so their lowercased form is a
/// legal manifest name label.
fn kind_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new("^[A-Za-z][A-Za-z0-9]*$").expect("literal pattern"))
}

/// Validate a parsed config. Returns a list of errors (empty = valid).
pub fn validate_config(config: &CrisolConfig) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    // Version check
    if config.version != "1.0" {
        errors.push(ValidationError {
            message: format!("version must be \"1.0\", got \"{}\"", config.version),
        });
    }

    // Target identity
    if config.target.api_version.is_empty() {
        errors.push(ValidationError {
            message: "target.api_version must not be empty".to_string(),
        });
    }
    if !kind_pattern().is_match(&config.target.kind) {
        errors.push(ValidationError {
            message: format!(
                "target.kind '{}' must be alphanumeric and start with a letter",
                config.target.kind
            ),
        });
    }
    if config.target.schema.is_some() && config.target.schema_version.is_none() {
        errors.push(ValidationError {
            message: "target.schema_version is required when target.schema is set".to_string(),
        });
    }

    // Validate each field's generator declaration
    for (name, spec) in &config.fields {
        match spec.generator {
            GeneratorType::Repeat => validate_repeat(name, spec, &mut errors),
            GeneratorType::Cidr => validate_cidr(name, spec, &mut errors),
        }
    }

    errors
}

fn validate_repeat(name: &str, spec: &FieldSpec, errors: &mut Vec<ValidationError>) {
    if spec.kind == ValueKind::Nil {
        errors.push(ValidationError {
            message: format!("field '{}' (repeat) uses the reserved kind 'nil'", name),
        });
    }

    let payload = match &spec.value {
        Some(v) => v,
        None => {
            errors.push(ValidationError {
                message: format!("field '{}' (repeat) has no value", name),
            });
            return;
        }
    };

    // Payloads must parse per their declared kind, so rendering can't fail
    // mid-enumeration.
    match spec.kind {
        ValueKind::Integer => {
            if payload.parse::<i64>().is_err() {
                errors.push(ValidationError {
                    message: format!(
                        "field '{}' (integer) payload '{}' is not a valid integer",
                        name, payload
                    ),
                });
            }
        }
        ValueKind::List => match serde_json::from_str::<serde_json::Value>(payload) {
            Ok(json) if json.is_array() => {}
            _ => errors.push(ValidationError {
                message: format!("field '{}' (list) payload is not a JSON array", name),
            }),
        },
        ValueKind::Struct => match serde_json::from_str::<serde_json::Value>(payload) {
            Ok(json) if json.is_object() => {}
            _ => errors.push(ValidationError {
                message: format!("field '{}' (struct) payload is not a JSON object", name),
            }),
        },
        ValueKind::Json => {
            if serde_json::from_str::<serde_json::Value>(payload).is_err() {
                errors.push(ValidationError {
                    message: format!("field '{}' (json) payload is not valid JSON", name),
                });
            }
        }
        ValueKind::IpPrefix => {
            if payload.parse::<std::net::IpAddr>().is_err() {
                errors.push(ValidationError {
                    message: format!(
                        "field '{}' (ip-prefix) payload '{}' is not a valid address",
                        name, payload
                    ),
                });
            }
        }
        ValueKind::String | ValueKind::Nil => {}
    }
}

fn validate_cidr(name: &str, spec: &FieldSpec, errors: &mut Vec<ValidationError>) {
    match &spec.subnet {
        Some(subnet) => {
            if subnet.trim().parse::<ipnet::IpNet>().is_err() {
                errors.push(ValidationError {
                    message: format!("field '{}' (cidr) subnet '{}' is not valid", name, subnet),
                });
            }
        }
        None => errors.push(ValidationError {
            message: format!("field '{}' (cidr) has no subnet", name),
        }),
    }
}
