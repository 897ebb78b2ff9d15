// src/adapter/params.rs

use serde_json::Value;

use crate::error::AdapterError;

/// Typed form of one slot's Platformio parameters, produced by `validate`.
/// Consumed immediately by the request builder, never persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct PlatformioParams {
    pub pub_id: u64,
    /// The exchange calls this the TagId.
    pub placement_id: u64,
    pub site_id: u64,
    pub width: u64,
    pub height: u64,
    pub bid_floor: Option<f64>,
}

impl PlatformioParams {
    /// Validates one slot's raw parameter payload.
    ///
    /// Required fields are checked in a fixed order (placementId, pubId,
    /// size) so the rendered error for a bad slot is deterministic. The size
    /// string must be `<width>x<height>` with a case-insensitive separator;
    /// a string that does not split into two tokens reports the whole value
    /// as a bad AdSize rather than a per-axis error.
    ///
    /// Pure function of the payload, no side effects.
    pub fn validate(params: &Value) -> Result<PlatformioParams, AdapterError> {
        let placement_id =
            uint_param(params, "placementId").ok_or(AdapterError::missing("TagId", "placementId"))?;
        let pub_id =
            uint_param(params, "pubId").ok_or(AdapterError::missing("PublisherId", "pubId"))?;
        // siteId lands on the site block but its absence is not an error;
        // the exchange treats 0 as unattributed inventory.
        let site_id = uint_param(params, "siteId").unwrap_or(0);

        let size = match params.get("size").and_then(Value::as_str) {
            Some(s) if !s.is_empty() => s,
            _ => return Err(AdapterError::missing("AdSize", "size")),
        };
        let (width, height) = parse_ad_size(size)?;

        let bid_floor = params
            .get("bidFloor")
            .and_then(Value::as_f64)
            .filter(|floor| *floor >= 0.0);

        Ok(PlatformioParams {
            pub_id,
            placement_id,
            site_id,
            width,
            height,
            bid_floor,
        })
    }
}

fn parse_ad_size(size: &str) -> Result<(u64, u64), AdapterError> {
    let tokens: Vec<&str> = size.split(['x', 'X']).collect();
    if tokens.len() != 2 {
        return Err(AdapterError::invalid("AdSize", size));
    }
    let width = positive_int(tokens[0]).ok_or_else(|| AdapterError::invalid("Width", tokens[0]))?;
    let height =
        positive_int(tokens[1]).ok_or_else(|| AdapterError::invalid("Height", tokens[1]))?;
    Ok((width, height))
}

fn positive_int(token: &str) -> Option<u64> {
    token.parse::<u64>().ok().filter(|v| *v > 0)
}

/// Reads a required id that publishers send either as a JSON number or as a
/// numeric string. Zero and non-numeric values count as absent, matching the
/// exchange's zero-value probing.
fn uint_param(params: &Value, key: &str) -> Option<u64> {
    match params.get(key)? {
        Value::Number(n) => n.as_u64().filter(|v| *v > 0),
        Value::String(s) => s.trim().parse::<u64>().ok().filter(|v| *v > 0),
        _ => None,
    }
}
