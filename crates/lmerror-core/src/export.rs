use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::value::ErrorValue;

/// `{ timestamp, error, response?, previous? }`, recursing into linked error values
///
/// [`ErrorValue::from_value`] reads the export back but does not restore
/// `timestamp`; re-imported values are stamped when they are built.
impl Serialize for ErrorValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;

        map.serialize_entry("timestamp", &format!("{:.3}", self.timestamp()))?;
        map.serialize_entry("error", self.descriptor())?;

        if let Some(response) = self.response() {
            map.serialize_entry("response", response)?;
        }

        if let Some(previous) = self.previous() {
            map.serialize_entry("previous", &PreviousRef(previous))?;
        }

        map.end()
    }
}

struct PreviousRef<'a>(&'a (dyn std::error::Error + Send + Sync + 'static));

impl Serialize for PreviousRef<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if let Some(value) = self.0.downcast_ref::<ErrorValue>() {
            return value.serialize(serializer);
        }

        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry("message", &self.0.to_string())?;
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use serde_json::json;

    use crate::{ErrorDescriptor, ErrorValue, HeaderEntry, Patterns, ResponseSnapshot};

    #[test]
    fn exports_nested_chain() {
        let root = ErrorValue::new(
            ErrorDescriptor::new("connection refused", "conn_refused").unwrap(),
            None,
            Some(Arc::new(std::io::Error::other("os error 111"))),
        );
        let outer = ErrorValue::new(
            ErrorDescriptor::new("db timeout", "db_timeout_01").unwrap(),
            Some(
                ResponseSnapshot::new(
                    "503",
                    vec![HeaderEntry::new("Retry-After", "120").unwrap()],
                    Some(json!("try later")),
                )
                .unwrap(),
            ),
            Some(Arc::new(root.clone())),
        );

        let exported = serde_json::to_value(&outer).unwrap();

        assert_eq!(
            exported,
            json!({
                "timestamp": format!("{:.3}", outer.timestamp()),
                "error": { "message": "db timeout", "code": "db_timeout_01" },
                "response": {
                    "statusCode": "503",
                    "headers": [{ "name": "Retry-After", "value": "120" }],
                    "body": "try later"
                },
                "previous": {
                    "timestamp": format!("{:.3}", root.timestamp()),
                    "error": { "message": "connection refused", "code": "conn_refused" },
                    "previous": { "message": "os error 111" }
                }
            })
        );
    }

    #[test]
    fn export_reimports_chain_with_fresh_timestamps() {
        let inner = ErrorValue::new(ErrorDescriptor::new("inner", "inner_01").unwrap(), None, None);
        let outer = ErrorValue::new(
            ErrorDescriptor::new("outer", "outer_01").unwrap(),
            Some(ResponseSnapshot::new("404", Vec::new(), None).unwrap()),
            Some(Arc::new(inner)),
        );

        let exported = serde_json::to_value(&outer).unwrap();
        let imported = ErrorValue::from_value(&exported, Patterns::standard()).unwrap();

        assert_eq!(imported.descriptor(), outer.descriptor());
        assert_eq!(imported.response(), outer.response());
        assert_eq!(imported.previous_value().unwrap().code(), "inner_01");

        let mut stale = exported;
        stale["timestamp"] = "2000-01-01T00:00:00.000Z".into();
        let imported = ErrorValue::from_value(&stale, Patterns::standard()).unwrap();
        assert!(imported.timestamp() > "2000-01-01T00:00:00Z".parse::<jiff::Timestamp>().unwrap());
    }
}
