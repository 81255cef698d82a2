use serde::de::{self, Deserializer, IgnoredAny, MapAccess, Visitor};
use serde::Deserialize;
use std::fmt;

/// Inbound webhook payload.
///
/// Keys match case-insensitively (`Reason` fills `reason`), fields the sender
/// adds beyond these are ignored, and missing or `null` ones decode as empty
/// strings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AlertEvent {
    pub reason: String,
    pub message: String,
}

impl AlertEvent {
    /// Decode the first JSON value in `body`; anything after it is ignored.
    pub fn decode(body: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::Deserializer::from_slice(body)
            .into_iter::<AlertEvent>()
            .next()
            .unwrap_or_else(|| Err(de::Error::custom("EOF")))
    }
}

impl<'de> Deserialize<'de> for AlertEvent {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(AlertEventVisitor)
    }
}

struct AlertEventVisitor;

impl<'de> Visitor<'de> for AlertEventVisitor {
    type Value = AlertEvent;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("an alert object with `reason` and `message`")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<AlertEvent, A::Error> {
        let mut event = AlertEvent::default();

        while let Some(key) = map.next_key::<String>()? {
            let slot = if key.eq_ignore_ascii_case("reason") {
                &mut event.reason
            } else if key.eq_ignore_ascii_case("message") {
                &mut event.message
            } else {
                map.next_value::<IgnoredAny>()?;
                continue;
            };

            // later duplicates win; null leaves the field as it was
            if let Some(value) = map.next_value::<Option<String>>()? {
                *slot = value;
            }
        }

        Ok(event)
    }
}
