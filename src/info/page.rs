//! The info page template.
//!
//! Markup is fixed at compile time; the three dynamic values are only ever
//! written through [`Escaped`].

use std::fmt::Write;

use thiserror::Error;

use crate::info::escape::Escaped;
use crate::info::ConnectionInfo;

/// Failure while writing the page into its buffer.
#[derive(Debug, Error)]
#[error("failed to render info page")]
pub struct RenderError(#[from] std::fmt::Error);

const HEAD: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>IP Address Display</title>
    <style>
        body { font-family: Arial, sans-serif; max-width: 800px; margin: 50px auto; padding: 20px; background-color: #f5f5f5; }
        .container { background-color: white; padding: 30px; border-radius: 10px; box-shadow: 0 2px 10px rgba(0,0,0,0.1); }
        h1 { color: #333; text-align: center; margin-bottom: 30px; }
        .ip-info { background-color: #f8f9fa; padding: 20px; border-radius: 5px; margin: 15px 0; border-left: 4px solid #007bff; }
        .ip-label { font-weight: bold; color: #495057; margin-bottom: 5px; }
        .ip-value { font-family: monospace; font-size: 18px; color: #007bff; word-break: break-all; }
        .timestamp { text-align: center; color: #6c757d; font-size: 14px; margin-top: 30px; }
    </style>
</head>
"#;

/// Render the full HTML document for one request.
pub fn render(info: &ConnectionInfo) -> Result<String, RenderError> {
    let mut out = String::with_capacity(HEAD.len() + 1024);
    out.push_str(HEAD);

    write!(
        out,
        r#"<body>
    <div class="container">
        <h1>🌐 IP Address Information</h1>

        <div class="ip-info">
            <div class="ip-label">Client Original IP (X-Forwarded-For):</div>
            <div class="ip-value">{forwarded_ip}</div>
        </div>

        <div class="ip-info">
            <div class="ip-label">Direct Connecting IP:</div>
            <div class="ip-value">{direct_ip}</div>
        </div>

        <div class="timestamp">
            Requested at: {timestamp}
        </div>
    </div>
</body>
</html>
"#,
        forwarded_ip = Escaped(&info.forwarded_ip),
        direct_ip = Escaped(&info.direct_ip),
        timestamp = Escaped(&info.timestamp),
    )?;

    Ok(out)
}
