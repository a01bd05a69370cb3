//! Request routing metadata.
//!
//! Calls that address a resource carry an `x-goog-request-params` entry so
//! the frontend can route them without decoding the payload.

/// Metadata key holding the routing parameters.
pub const ROUTING_HEADER: &str = "x-goog-request-params";

/// Requests that expose routing keys.
pub trait RoutingParams {
    /// `(key, value)` pairs to route on; empty when the request has none.
    fn routing_params(&self) -> Vec<(&'static str, String)>;
}

/// Render routing pairs as a single metadata entry.
///
/// Values are percent-encoded, keys are emitted in the given order.
/// Returns `None` for an empty set of pairs.
#[must_use]
pub fn routing_header(params: &[(&'static str, String)]) -> Option<(String, String)> {
    if params.is_empty() {
        return None;
    }
    let value = params
        .iter()
        .map(|(k, v)| format!("{k}={}", urlencoding::encode(v)))
        .collect::<Vec<_>>()
        .join("&");
    Some((ROUTING_HEADER.to_owned(), value))
}

/// Append the routing entry for `request` to `metadata`.
pub fn append_routing_header<R: RoutingParams + ?Sized>(
    request: &R,
    metadata: &mut Vec<(String, String)>,
) {
    if let Some(entry) = routing_header(&request.routing_params()) {
        metadata.push(entry);
    }
}
