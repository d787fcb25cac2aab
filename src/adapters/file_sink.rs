//! File sink writer.
//!
//! Writes a resolved secret's raw content to a file, applying mode and
//! ownership bits from the sink spec.

use crate::domain::{Defaults, Secret, Sink};
use crate::errors::{Error, PortKind, Result};
use crate::ports::SinkWriter;
use async_trait::async_trait;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

/// Type tag for the file sink.
pub const FILE_SINK_TYPE: &str = "file";

const DEFAULT_MODE: u32 = 0o400;

/// Parsed spec for a file sink.
///
/// ```yaml
/// sinks:
///   - type: file
///     var: db-url
///     spec:
///       path: /run/secrets/db-url
///       mode: "0600"     # octal string, default 0400
///       user: 33         # optional uid
///       group: 33        # optional gid
/// ```
#[derive(Debug, Clone, PartialEq)]
struct FileSinkSpec {
    path: String,
    mode: u32,
    user: Option<u32>,
    group: Option<u32>,
}

impl FileSinkSpec {
    fn from_spec(spec: &serde_json::Value) -> Result<Self> {
        let path = spec
            .get("path")
            .and_then(|v| v.as_str())
            .ok_or_else(|| {
                Error::port(PortKind::Sink, "must provide a path element for a file sink spec")
            })?
            .to_string();

        let mode = match spec.get("mode") {
            Some(v) => parse_mode(v)?,
            None => DEFAULT_MODE,
        };
        let user = spec.get("user").map(parse_id).transpose()?;
        let group = spec.get("group").map(parse_id).transpose()?;

        Ok(Self { path, mode, user, group })
    }
}

/// Modes are octal strings like `"0600"`. Bare integers are rejected: YAML
/// reads `0600` as decimal 600, which is a different permission set.
fn parse_mode(value: &serde_json::Value) -> Result<u32> {
    match value {
        serde_json::Value::String(s) => {
            u32::from_str_radix(s.trim_start_matches("0o"), 8).map_err(|_| {
                Error::port(PortKind::Sink, "mode in file sink spec must be an octal string")
            })
        }
        _ => Err(Error::port(
            PortKind::Sink,
            "mode in file sink spec must be an octal string like \"0600\"",
        )),
    }
}

fn parse_id(value: &serde_json::Value) -> Result<u32> {
    match value {
        serde_json::Value::Number(n) => n.as_u64().map(|n| n as u32).ok_or_else(|| {
            Error::port(PortKind::Sink, "user/group in file sink spec must be positive")
        }),
        serde_json::Value::String(s) => s.parse().map_err(|_| {
            Error::port(PortKind::Sink, "user/group in file sink spec must be numeric")
        }),
        _ => Err(Error::port(
            PortKind::Sink,
            "user/group in file sink spec must be string or integer",
        )),
    }
}

/// Sink writer emitting secrets to files with ownership and permission bits.
#[derive(Debug, Clone, Default)]
pub struct FileSink;

impl FileSink {
    /// Creates a new file sink writer.
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl SinkWriter for FileSink {
    async fn write(
        &self,
        cancel: &CancellationToken,
        _defaults: &Defaults,
        secret: &Secret,
        sink: &Sink,
    ) -> Result<()> {
        if cancel.is_cancelled() {
            return Err(Error::port(PortKind::Sink, "write cancelled"));
        }

        let spec = FileSinkSpec::from_spec(&sink.spec)?;

        #[cfg(unix)]
        {
            use std::fs::Permissions;
            use std::os::unix::fs::PermissionsExt;
            use tokio::io::AsyncWriteExt;

            // The file is created with the declared mode; at no point does
            // secret content exist on disk under umask-default permissions.
            let mut file = tokio::fs::OpenOptions::new()
                .write(true)
                .create(true)
                .truncate(true)
                .mode(spec.mode)
                .open(&spec.path)
                .await?;

            // Opening a pre-existing file keeps its old mode; tighten it
            // before any content lands.
            file.set_permissions(Permissions::from_mode(spec.mode)).await?;
            file.write_all(&secret.raw_content).await?;
            file.flush().await?;
            drop(file);

            if spec.user.is_some() || spec.group.is_some() {
                if let Err(e) = std::os::unix::fs::chown(&spec.path, spec.user, spec.group) {
                    // Do not leave a secret behind with the wrong owner.
                    if let Err(remove_err) = std::fs::remove_file(&spec.path) {
                        warn!(
                            path = %spec.path,
                            error = %remove_err,
                            "unable to chown sink file, and unable to delete it afterwards"
                        );
                    }
                    return Err(e.into());
                }
            }
        }

        #[cfg(not(unix))]
        tokio::fs::write(&spec.path, &secret.raw_content).await?;

        info!(
            secret = %secret.name,
            path = %spec.path,
            mode = format!("{:o}", spec.mode),
            "written secret to file sink"
        );
        Ok(())
    }
}
