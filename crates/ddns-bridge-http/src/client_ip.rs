//! Caller address resolution
//!
//! Used when the request carries no `ip` parameter.

use axum::http::HeaderMap;
use std::net::{IpAddr, SocketAddr};

const X_FORWARDED_FOR: &str = "x-forwarded-for";
const X_REAL_IP: &str = "x-real-ip";

/// Resolve the caller's address
///
/// With `trust_forwarded` set, the first `X-Forwarded-For` entry and then
/// `X-Real-IP` are consulted before the socket peer. Header values that do
/// not parse as an address are ignored.
pub fn resolve(
    headers: &HeaderMap,
    peer: Option<SocketAddr>,
    trust_forwarded: bool,
) -> Option<IpAddr> {
    if trust_forwarded
        && let Some(ip) = forwarded_for(headers).or_else(|| real_ip(headers))
    {
        return Some(ip);
    }

    peer.map(|addr| addr.ip().to_canonical())
}

fn forwarded_for(headers: &HeaderMap) -> Option<IpAddr> {
    let value = headers.get(X_FORWARDED_FOR)?.to_str().ok()?;
    value.split(',').next()?.trim().parse().ok()
}

fn real_ip(headers: &HeaderMap) -> Option<IpAddr> {
    headers.get(X_REAL_IP)?.to_str().ok()?.trim().parse().ok()
}
