// SPDX-FileCopyrightText: 2026 Buzzlens Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Client identifier extraction from proxy headers.
//!
//! Takes the raw `X-Forwarded-For` / `X-Real-IP` header values so the HTTP
//! framework stays out of this crate. The result is only ever used as a
//! rate-limit key, never for authorization.

/// Derive the rate-limit identifier for a request.
///
/// Precedence: first address of the comma-separated `X-Forwarded-For` value,
/// then `X-Real-IP`, then the literal `"unknown"`.
pub fn client_identifier(forwarded_for: Option<&str>, real_ip: Option<&str>) -> String {
    if let Some(forwarded) = forwarded_for
        && let Some(first) = forwarded.split(',').next()
    {
        let first = first.trim();
        if !first.is_empty() {
            return first.to_string();
        }
    }

    if let Some(ip) = real_ip {
        let ip = ip.trim();
        if !ip.is_empty() {
            return ip.to_string();
        }
    }

    "unknown".to_string()
}
