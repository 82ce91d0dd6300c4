use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MispTag {
    pub name: String,
}

impl MispTag {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MispAttribute {
    pub category: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub value: String,
    pub comment: String,
    pub disable_correlation: bool,
    /// Provenance tags, in insertion order without duplicates.
    #[serde(rename = "Tag", default)]
    pub tags: Vec<MispTag>,
}

impl MispAttribute {
    pub fn new(category: impl Into<String>, kind: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            category: category.into(),
            kind: kind.into(),
            value: value.into(),
            comment: String::new(),
            disable_correlation: false,
            tags: Vec::new(),
        }
    }

    pub fn with_correlation_disabled(mut self, disabled: bool) -> Self {
        self.disable_correlation = disabled;
        self
    }

    pub fn with_tag(mut self, name: impl Into<String>) -> Self {
        self.add_tag(name);
        self
    }

    pub fn add_tag(&mut self, name: impl Into<String>) {
        let name = name.into();
        if !self.tags.iter().any(|t| t.name == name) {
            self.tags.push(MispTag { name });
        }
    }

    pub fn has_tag(&self, name: &str) -> bool {
        self.tags.iter().any(|t| t.name == name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MispEvent {
    pub info: String,
    pub date: String,
    pub distribution: String,
    pub threat_level_id: String,
    pub analysis: String,
    pub published: bool,
    pub sharing_group_id: Option<String>,
    #[serde(rename = "Tag", default)]
    pub tags: Vec<MispTag>,
    #[serde(rename = "Attribute", default)]
    pub attributes: Vec<MispAttribute>,
}

impl MispEvent {
    pub fn has_tag(&self, name: &str) -> bool {
        self.tags.iter().any(|t| t.name == name)
    }

    /// First attribute of the given MISP type.
    pub fn attribute(&self, kind: &str) -> Option<&MispAttribute> {
        self.attributes.iter().find(|a| a.kind == kind)
    }
}

/// Request body of `POST /events/add`.
#[derive(Debug, Serialize)]
pub struct EventEnvelope<'a> {
    #[serde(rename = "Event")]
    pub event: &'a MispEvent,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_add_tag_ignores_duplicates() {
        let attr = MispAttribute::new("Other", "text", "x")
            .with_tag("fortigate:msg")
            .with_tag("fortigate:msg")
            .with_tag("fortigate:action");
        let names: Vec<&str> = attr.tags.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["fortigate:msg", "fortigate:action"]);
    }

    #[test]
    fn test_attribute_json_shape() {
        let attr = MispAttribute::new("Network activity", "ip-src|port", "10.0.0.1|1234")
            .with_tag("fortigate:srcip");
        let value = serde_json::to_value(&attr).unwrap();
        assert_eq!(
            value,
            json!({
                "category": "Network activity",
                "type": "ip-src|port",
                "value": "10.0.0.1|1234",
                "comment": "",
                "disable_correlation": false,
                "Tag": [{"name": "fortigate:srcip"}]
            })
        );
    }

    #[test]
    fn test_envelope_wraps_event() {
        let event = MispEvent {
            info: "[FortiGate] 2024-01-01T10:00:00+0900 AV(Web)".to_string(),
            date: "2024-01-01T10:00:00+0900".to_string(),
            distribution: "2".to_string(),
            threat_level_id: "4".to_string(),
            analysis: "0".to_string(),
            published: true,
            sharing_group_id: None,
            tags: vec![MispTag::new("fortigate")],
            attributes: vec![],
        };
        let value = serde_json::to_value(EventEnvelope { event: &event }).unwrap();
        assert_eq!(value["Event"]["info"], "[FortiGate] 2024-01-01T10:00:00+0900 AV(Web)");
        assert_eq!(value["Event"]["Tag"][0]["name"], "fortigate");
        assert!(value["Event"]["sharing_group_id"].is_null());
    }
}
