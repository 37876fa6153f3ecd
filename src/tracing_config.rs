//! Tracing configuration for debugging constructor resolution.
//!
//! Supports three output formats controlled by `RFX_LOG_FORMAT`:
//!
//! - `text` (default): Standard `tracing-subscriber` flat output
//! - `tree`: Hierarchical indented output via `tracing-tree`, one level per
//!   resolver entry point
//! - `json`: One JSON object per span/event
//!
//! ## Quick start
//!
//! ```bash
//! # Which constructor won, and why
//! RFX_LOG=rfx_reflect=debug RFX_LOG_FORMAT=tree cargo test
//!
//! # Every scanned candidate and escalation attempt
//! RFX_LOG=rfx_reflect::resolver=trace,rfx_reflect::registry=trace cargo test
//! ```
//!
//! The subscriber is only initialised when `RFX_LOG` (or `RUST_LOG`) is set.

use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, Registry, fmt};

/// Tracing output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Standard flat text lines (default).
    #[default]
    Text,
    /// Hierarchical indented tree via `tracing-tree`.
    Tree,
    /// Newline-delimited JSON objects.
    Json,
}

impl LogFormat {
    /// Parse a format name, case-insensitively. Unknown names mean `Text`.
    pub fn parse(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "tree" => Self::Tree,
            "json" => Self::Json,
            _ => Self::Text,
        }
    }

    fn from_env() -> Self {
        Self::parse(&std::env::var("RFX_LOG_FORMAT").unwrap_or_default())
    }
}

/// Build an `EnvFilter` from `RFX_LOG`, falling back to `RUST_LOG`.
///
/// `RFX_LOG` takes precedence when both are set.
fn build_filter() -> EnvFilter {
    if let Ok(val) = std::env::var("RFX_LOG") {
        EnvFilter::builder().parse_lossy(val)
    } else {
        EnvFilter::from_default_env()
    }
}

/// Initialise the global tracing subscriber.
///
/// Does nothing when neither `RFX_LOG` nor `RUST_LOG` is set. Returns
/// whether a subscriber was installed; `false` also when another global
/// subscriber already exists.
///
/// All output goes to stderr.
pub fn init_tracing() -> bool {
    let has_rfx_log = std::env::var("RFX_LOG").is_ok();
    let has_rust_log = std::env::var("RUST_LOG").is_ok();
    if !has_rfx_log && !has_rust_log {
        return false;
    }

    let filter = build_filter();
    let installed = match LogFormat::from_env() {
        LogFormat::Tree => {
            let tree_layer = tracing_tree::HierarchicalLayer::default()
                .with_writer(std::io::stderr)
                .with_indent_amount(2)
                .with_indent_lines(true)
                .with_deferred_spans(true)
                .with_span_retrace(true)
                .with_targets(true);

            Registry::default().with(filter).with(tree_layer).try_init().is_ok()
        }
        LogFormat::Json => {
            let json_layer = fmt::layer().json().with_writer(std::io::stderr);

            Registry::default().with(filter).with(json_layer).try_init().is_ok()
        }
        LogFormat::Text => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .try_init()
            .is_ok(),
    };
    if installed {
        tracing::debug!(format = ?LogFormat::from_env(), "tracing initialised");
    }
    installed
}
