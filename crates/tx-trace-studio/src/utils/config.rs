//! Configuration and constants for trace aggregation.
//!
//! The defaults mirror what the execution engine allows; a TOML file can
//! override the session bounds and the output column set:
//!
//! ```toml
//! [session]
//! max_depth = 1025
//!
//! [output]
//! function_trace = true
//! classification_tags = true
//! ```

use super::error::ConfigError;
use log::debug;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Maximum call-stack depth the execution engine allows (1024 nested calls plus the root)
pub const DEFAULT_MAX_DEPTH: usize = 1025;

/// Largest accepted `session.max_depth`; per-depth tables are allocated densely
pub const MAX_DEPTH_LIMIT: usize = 1 << 16;

/// Current trace record schema version
pub const SCHEMA_VERSION: &str = "1.0.0";

// Canonical event signatures used for token classification
pub const TRANSFER_EVENT: &str = "Transfer(address,address,uint256)";
pub const APPROVAL_EVENT: &str = "Approval(address,address,uint256)";
pub const APPROVAL_FOR_ALL_EVENT: &str = "ApprovalForAll(address,address,bool)";

// Header rows written at the top of each trace blob
pub const FUNCTION_TRACE_HEADER: &str =
    "index,calltype,depth,from,to,value,gas,input,output,callstack,tracepath";
pub const EVENT_TRACE_HEADER: &str = "address,topics,data,type,function";
pub const EVENT_TRACE_HEADER_UNTAGGED: &str = "address,topics,data";
pub const TRANSFER_TRACE_HEADER: &str =
    "from,to,tokenAddr,value,calldepth,traceindex,tracepath,type";
pub const TRANSFER_TRACE_HEADER_UNTAGGED: &str =
    "from,to,tokenAddr,value,calldepth,traceindex,tracepath";

/// Complete trace configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct TraceConfig {
    /// Session bounds
    #[serde(default)]
    pub session: SessionConfig,

    /// Output column selection
    #[serde(default)]
    pub output: OutputSchema,
}

/// Bounds applied to a single trace session
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct SessionConfig {
    /// Frames at or beyond this depth are rejected with `DepthExceeded`
    #[serde(default = "default_max_depth")]
    pub max_depth: usize,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

fn default_max_depth() -> usize {
    DEFAULT_MAX_DEPTH
}

/// Which trace blobs and columns are emitted
///
/// Deployments differ in whether they keep the function trace and whether
/// event/transfer rows carry classification columns; both are switches here
/// rather than separate renderers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct OutputSchema {
    /// Emit the nested function-call trace
    #[serde(default = "enabled")]
    pub function_trace: bool,

    /// Emit `type`/`function` columns on events and `type` on transfers
    #[serde(default = "enabled")]
    pub classification_tags: bool,
}

impl Default for OutputSchema {
    fn default() -> Self {
        Self {
            function_trace: true,
            classification_tags: true,
        }
    }
}

fn enabled() -> bool {
    true
}

impl TraceConfig {
    /// Config with a custom depth bound and default output
    pub fn with_max_depth(max_depth: usize) -> Self {
        Self {
            session: SessionConfig { max_depth },
            output: OutputSchema::default(),
        }
    }

    /// Reject values the session cannot work with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.session.max_depth == 0 {
            return Err(ConfigError::Invalid(
                "session.max_depth must be greater than 0".to_string(),
            ));
        }

        if self.session.max_depth > MAX_DEPTH_LIMIT {
            return Err(ConfigError::Invalid(format!(
                "session.max_depth is too large (max {})",
                MAX_DEPTH_LIMIT
            )));
        }

        Ok(())
    }
}

/// Load a trace configuration from a TOML file
///
/// # Errors
/// * `ConfigError::Io` - If file cannot be read
/// * `ConfigError::Parse` - If TOML is invalid
/// * `ConfigError::Invalid` - If values are out of range
pub fn load_config(path: impl AsRef<Path>) -> Result<TraceConfig, ConfigError> {
    let path = path.as_ref();
    debug!("Loading trace config from: {}", path.display());

    let contents = fs::read_to_string(path)?;
    let config: TraceConfig = toml::from_str(&contents)?;
    config.validate()?;

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_toml_uses_defaults() {
        let config: TraceConfig = toml::from_str("").unwrap();
        assert_eq!(config, TraceConfig::default());
        assert_eq!(config.session.max_depth, DEFAULT_MAX_DEPTH);
        assert!(config.output.function_trace);
        assert!(config.output.classification_tags);
    }

    #[test]
    fn test_partial_output_section() {
        let config: TraceConfig = toml::from_str(
            r#"
            [output]
            classification_tags = false
            "#,
        )
        .unwrap();

        assert!(config.output.function_trace);
        assert!(!config.output.classification_tags);
    }

    #[test]
    fn test_zero_depth_rejected() {
        let config = TraceConfig::with_max_depth(0);
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_depth_limit() {
        assert!(TraceConfig::with_max_depth(MAX_DEPTH_LIMIT).validate().is_ok());
        assert!(matches!(
            TraceConfig::with_max_depth(MAX_DEPTH_LIMIT + 1).validate(),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            TraceConfig::with_max_depth(u32::MAX as usize).validate(),
            Err(ConfigError::Invalid(_))
        ));
    }
}
