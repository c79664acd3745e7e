//! Conversion from JSON documents, used for statically configured attributes.

use std::fmt;
use std::sync::Arc;

use crate::attr::Attr;
use crate::value::{Opaque, Value};

/// Null becomes the empty value, integers become `Int64` (or `Uint64`
/// above `i64::MAX`), other numbers `Float64`, and objects groups in
/// key order. Arrays have no attribute form and are kept whole as `Any`.
impl From<serde_json::Value> for Value {
    fn from(v: serde_json::Value) -> Self {
        use serde_json::Value as Json;

        match v {
            Json::Null => Value::default(),
            Json::Bool(b) => Value::bool(b),
            Json::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Value::int64(i)
                } else if let Some(u) = n.as_u64() {
                    Value::uint64(u)
                } else {
                    Value::float64(n.as_f64().unwrap_or(f64::NAN))
                }
            }
            Json::String(s) => Value::string(s),
            Json::Array(items) => Value::from_opaque(Arc::new(JsonArray(Json::Array(items)))),
            Json::Object(map) => Value::group(map.into_iter().map(|(k, v)| Attr::new(k, v))),
        }
    }
}

impl From<serde_json::Value> for crate::args::Arg {
    fn from(v: serde_json::Value) -> Self {
        crate::args::Arg::Value(v.into())
    }
}

/// Rendered as JSON text.
struct JsonArray(serde_json::Value);

impl Opaque for JsonArray {
    fn as_any(&self) -> &dyn std::any::Any {
        &self.0
    }

    fn eq_opaque(&self, other: &dyn Opaque) -> bool {
        other
            .as_any()
            .downcast_ref::<serde_json::Value>()
            .is_some_and(|o| *o == self.0)
    }

    fn render(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::kind::Kind;

    #[test]
    fn scalars() {
        assert_eq!(Value::from(json!(null)), Value::default());
        assert_eq!(Value::from(json!(true)), Value::bool(true));
        assert_eq!(Value::from(json!(-3)), Value::int64(-3));
        assert_eq!(Value::from(json!(u64::MAX)), Value::uint64(u64::MAX));
        assert_eq!(Value::from(json!(0.25)), Value::float64(0.25));
        assert_eq!(Value::from(json!("svc")), Value::string("svc"));
    }

    #[test]
    fn objects_become_groups() {
        let v = Value::from(json!({"host": "a", "port": 80}));
        assert_eq!(v, Value::group([Attr::new("host", "a"), Attr::new("port", 80)]));
    }

    #[test]
    fn arrays_stay_whole() {
        let v = Value::from(json!([1, "two"]));
        assert_eq!(v.kind(), Kind::Any);
        assert_eq!(v.to_string(), r#"[1,"two"]"#);
        assert_eq!(v, Value::from(json!([1, "two"])));
        assert_eq!(v.downcast_ref::<serde_json::Value>(), Some(&json!([1, "two"])));
    }
}
