//! Response envelope unwrapping
//!
//! Collections come back in one of three shapes:
//! - a bare array `[...]`
//! - `{ "data": [...] }`
//! - `{ "data": { "data": [...] } }`, the paginator form, where the inner
//!   object also carries `current_page` / `last_page`
//!
//! Nesting is followed up to `MAX_ENVELOPE_DEPTH` levels.

use hrcal_domain::constants::MAX_ENVELOPE_DEPTH;
use serde_json::Value;

/// One unwrapped page of a collection.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Page {
    pub records: Vec<Value>,
    pub current_page: Option<u64>,
    pub last_page: Option<u64>,
    /// False when the payload matched none of the known shapes.
    pub recognized: bool,
}

impl Page {
    /// Whether the paginator reports pages after this one.
    pub fn has_more(&self) -> bool {
        matches!((self.current_page, self.last_page), (Some(current), Some(last)) if current < last)
    }
}

/// Unwrap `payload` into its records and pagination markers.
pub fn extract_page(payload: &Value) -> Page {
    unwrap_level(payload, 0).unwrap_or_default()
}

fn unwrap_level(value: &Value, depth: usize) -> Option<Page> {
    if depth > MAX_ENVELOPE_DEPTH {
        return None;
    }

    match value {
        Value::Array(items) => Some(Page { records: items.clone(), recognized: true, ..Page::default() }),
        Value::Object(map) => {
            let mut page = unwrap_level(map.get("data")?, depth + 1)?;
            // innermost paginator wins
            if page.current_page.is_none() && page.last_page.is_none() {
                let meta = map.get("meta").and_then(Value::as_object).unwrap_or(map);
                page.current_page = page_number(meta.get("current_page"));
                page.last_page = page_number(meta.get("last_page"));
            }
            Some(page)
        }
        _ => None,
    }
}

fn page_number(value: Option<&Value>) -> Option<u64> {
    match value? {
        Value::Number(n) => n.as_u64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}
