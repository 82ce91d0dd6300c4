use super::attribute::event_datetime;
use super::model::{MispAttribute, MispEvent, MispTag};
use crate::conf::{EventDefaults, MappingConfig};
use crate::parser::FieldMap;

/// Combines a resolved label and the attribute list into a MISP event.
pub struct EventAssembler<'a> {
    mapping: &'a MappingConfig,
    defaults: &'a EventDefaults,
}

impl<'a> EventAssembler<'a> {
    pub fn new(mapping: &'a MappingConfig, defaults: &'a EventDefaults) -> Self {
        Self { mapping, defaults }
    }

    pub fn assemble(&self, label: &str, fields: &FieldMap, attributes: Vec<MispAttribute>) -> MispEvent {
        let datetime = event_datetime(fields);

        MispEvent {
            info: format!("[{}] {} {}", self.defaults.source_label, datetime, label),
            // MISP keeps the calendar day of this value
            date: datetime,
            distribution: self.defaults.distribution.clone(),
            threat_level_id: self.defaults.threat_level_id.clone(),
            analysis: self.defaults.analysis.clone(),
            published: self.defaults.published,
            sharing_group_id: self.defaults.sharing_group_id.clone(),
            tags: self.event_tags(fields),
            attributes,
        }
    }

    /// Classification tag followed by `{namespace}:{key}:{value}` for every
    /// tag key present in the record. Absent keys are skipped.
    pub fn event_tags(&self, fields: &FieldMap) -> Vec<MispTag> {
        let namespace = &self.mapping.tag_namespace;

        std::iter::once(MispTag::new(namespace.as_str()))
            .chain(self.mapping.tag_keys.iter().filter_map(|key| {
                fields
                    .get(key)
                    .map(|value| MispTag::new(format!("{}:{}:{}", namespace, key, value)))
            }))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::misp::AttributeBuilder;
    use crate::parser::Tokenizer;

    const AV_LINE: &str = "date=2024-01-01 time=10:00:00 tz=+0900 logid=0000008192 srcip=10.0.0.1 \
        srcport=1234 dstip=10.0.0.2 dstport=80 devname=fw1 devid=1 eventtime=1 type=utm \
        subtype=virus level=warning vd=root action=block";

    fn tag_names(event: &MispEvent) -> Vec<&str> {
        event.tags.iter().map(|t| t.name.as_str()).collect()
    }

    #[test]
    fn test_assemble_av_event() {
        let mapping = MappingConfig::default();
        let defaults = EventDefaults::default();
        let fields = Tokenizer::default().tokenize(AV_LINE).unwrap();
        let attributes = AttributeBuilder::new(&mapping).build(&fields, "008192");

        let event = EventAssembler::new(&mapping, &defaults).assemble("AV(Web)", &fields, attributes);

        assert_eq!(event.info, "[FortiGate] 2024-01-01T10:00:00+0900 AV(Web)");
        assert_eq!(event.date, "2024-01-01T10:00:00+0900");
        assert_eq!(event.distribution, "2");
        assert_eq!(event.threat_level_id, "4");
        assert_eq!(event.analysis, "0");
        assert!(event.published);
        assert_eq!(
            tag_names(&event),
            vec![
                "fortigate",
                "fortigate:devname:fw1",
                "fortigate:devid:1",
                "fortigate:type:utm",
                "fortigate:subtype:virus",
                "fortigate:level:warning",
                "fortigate:vd:root",
                "fortigate:action:block",
            ]
        );
        assert_eq!(event.attributes.len(), 3);
        assert_eq!(event.attributes[0].kind, "datetime");
    }

    #[test]
    fn test_missing_tag_fields_are_skipped() {
        let mapping = MappingConfig::default();
        let defaults = EventDefaults::default();
        let fields = Tokenizer::default()
            .tokenize("date=2024-01-01 time=10:00:00 logid=0000008192 devname=fw1")
            .unwrap();

        let tags = EventAssembler::new(&mapping, &defaults).event_tags(&fields);
        let names: Vec<&str> = tags.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["fortigate", "fortigate:devname:fw1"]);
    }

    #[test]
    fn test_empty_tag_value_still_tagged() {
        let mapping = MappingConfig::default();
        let defaults = EventDefaults::default();
        let fields = Tokenizer::default().tokenize(r#"date=2024-01-01 action="""#).unwrap();

        let tags = EventAssembler::new(&mapping, &defaults).event_tags(&fields);
        assert_eq!(tags.last().map(|t| t.name.as_str()), Some("fortigate:action:"));
    }

    #[test]
    fn test_defaults_pass_through() {
        let mapping = MappingConfig::default();
        let defaults = EventDefaults {
            source_label: "FGT-HQ".to_string(),
            distribution: "0".to_string(),
            threat_level_id: "1".to_string(),
            analysis: "2".to_string(),
            published: false,
            sharing_group_id: Some("7".to_string()),
        };
        let fields = Tokenizer::default()
            .tokenize("date=2024-01-01 time=10:00:00 tz=+0900")
            .unwrap();

        let event = EventAssembler::new(&mapping, &defaults).assemble("IPS(signature)", &fields, vec![]);
        assert_eq!(event.info, "[FGT-HQ] 2024-01-01T10:00:00+0900 IPS(signature)");
        assert_eq!(event.distribution, "0");
        assert_eq!(event.threat_level_id, "1");
        assert_eq!(event.analysis, "2");
        assert!(!event.published);
        assert_eq!(event.sharing_group_id.as_deref(), Some("7"));
        assert_eq!(event.date, "2024-01-01T10:00:00+0900");
    }
}
