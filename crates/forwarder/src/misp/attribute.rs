use super::model::MispAttribute;
use crate::conf::MappingConfig;
use crate::parser::FieldMap;

const PAYLOAD_DELIVERY: &str = "Payload delivery";
const NETWORK_ACTIVITY: &str = "Network activity";

/// Address/port field pairs and the MISP type they combine into.
const ADDRESS_PAIRS: [(&str, &str, &str); 2] = [
    ("srcip", "srcport", "ip-src|port"),
    ("dstip", "dstport", "ip-dst|port"),
];

/// `{date}T{time}{tz}`; missing parts are left empty.
pub fn event_datetime(fields: &FieldMap) -> String {
    format!(
        "{}T{}{}",
        fields.get("date").unwrap_or_default(),
        fields.get("time").unwrap_or_default(),
        fields.get("tz").unwrap_or_default(),
    )
}

/// Builds the attribute list of one record.
///
/// Order is fixed: the datetime attribute, the source and destination
/// address|port pairs, then every other field in encounter order.
pub struct AttributeBuilder<'a> {
    mapping: &'a MappingConfig,
}

impl<'a> AttributeBuilder<'a> {
    pub fn new(mapping: &'a MappingConfig) -> Self {
        Self { mapping }
    }

    pub fn build(&self, fields: &FieldMap, message_id: &str) -> Vec<MispAttribute> {
        let mut attributes = Vec::with_capacity(fields.len() + 1);
        attributes.push(self.datetime(fields));
        attributes.extend(self.address_ports(fields, message_id));
        attributes.extend(self.generic(fields));
        attributes
    }

    fn datetime(&self, fields: &FieldMap) -> MispAttribute {
        ["date", "time", "tz"].into_iter().fold(
            MispAttribute::new("Other", "datetime", event_datetime(fields))
                .with_correlation_disabled(true),
            |attr, key| attr.with_tag(self.mapping.provenance_tag(key)),
        )
    }

    fn address_ports(&self, fields: &FieldMap, message_id: &str) -> Vec<MispAttribute> {
        let category = if self.mapping.is_av_message(message_id) {
            PAYLOAD_DELIVERY
        } else {
            NETWORK_ACTIVITY
        };

        ADDRESS_PAIRS
            .into_iter()
            .filter_map(|(ip_key, port_key, kind)| {
                let ip = fields.get_non_empty(ip_key)?;
                let port = fields.get_non_empty(port_key)?;
                Some(
                    MispAttribute::new(category, kind, format!("{}|{}", ip, port))
                        .with_tag(self.mapping.provenance_tag(ip_key))
                        .with_tag(self.mapping.provenance_tag(port_key)),
                )
            })
            .collect()
    }

    fn generic(&self, fields: &FieldMap) -> Vec<MispAttribute> {
        fields
            .iter()
            .filter(|(key, _)| !self.mapping.is_ignored(key) && !self.mapping.is_tag_key(key))
            .map(|(key, value)| {
                let ct = self.mapping.category_type(key);
                MispAttribute::new(ct.category.as_str(), ct.kind.as_str(), value)
                    .with_correlation_disabled(self.mapping.disables_correlation(&ct.category))
                    .with_tag(self.mapping.provenance_tag(key))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::Tokenizer;

    fn fields(line: &str) -> FieldMap {
        Tokenizer::default().tokenize(line).unwrap()
    }

    fn tag_names(attr: &MispAttribute) -> Vec<&str> {
        attr.tags.iter().map(|t| t.name.as_str()).collect()
    }

    // ── datetime ─────────────────────────────────────────────────

    #[test]
    fn test_event_datetime() {
        let f = fields("date=2024-01-01 time=10:00:00 tz=+0900");
        assert_eq!(event_datetime(&f), "2024-01-01T10:00:00+0900");
    }

    #[test]
    fn test_event_datetime_missing_tz() {
        let f = fields("date=2024-01-01 time=10:00:00");
        assert_eq!(event_datetime(&f), "2024-01-01T10:00:00");
    }

    #[test]
    fn test_datetime_attribute_always_first() {
        let mapping = MappingConfig::default();
        let attrs = AttributeBuilder::new(&mapping)
            .build(&fields("date=2024-01-01 time=10:00:00 tz=+0900"), "008192");

        assert_eq!(attrs.len(), 1);
        let dt = &attrs[0];
        assert_eq!(dt.category, "Other");
        assert_eq!(dt.kind, "datetime");
        assert_eq!(dt.value, "2024-01-01T10:00:00+0900");
        assert_eq!(dt.comment, "");
        assert!(dt.disable_correlation);
        assert_eq!(tag_names(dt), vec!["fortigate:date", "fortigate:time", "fortigate:tz"]);
    }

    // ── address|port ─────────────────────────────────────────────

    #[test]
    fn test_address_port_category_for_av_message() {
        let mapping = MappingConfig::default();
        let f = fields("date=2024-01-01 srcip=10.0.0.1 srcport=1234 dstip=10.0.0.2 dstport=80");
        let attrs = AttributeBuilder::new(&mapping).build(&f, "008192");

        let src = &attrs[1];
        assert_eq!(src.kind, "ip-src|port");
        assert_eq!(src.value, "10.0.0.1|1234");
        assert_eq!(src.category, "Payload delivery");
        assert!(!src.disable_correlation);
        assert_eq!(tag_names(src), vec!["fortigate:srcip", "fortigate:srcport"]);

        let dst = &attrs[2];
        assert_eq!(dst.kind, "ip-dst|port");
        assert_eq!(dst.value, "10.0.0.2|80");
        assert_eq!(dst.category, "Payload delivery");
    }

    #[test]
    fn test_address_port_category_for_other_message() {
        let mapping = MappingConfig::default();
        let f = fields("date=2024-01-01 srcip=10.0.0.1 srcport=1234");
        let attrs = AttributeBuilder::new(&mapping).build(&f, "016384");

        assert_eq!(attrs[1].kind, "ip-src|port");
        assert_eq!(attrs[1].category, "Network activity");
    }

    #[test]
    fn test_address_port_requires_both_parts() {
        let mapping = MappingConfig::default();
        let f = fields(r#"date=2024-01-01 srcip=10.0.0.1 srcport="" dstport=80"#);
        let attrs = AttributeBuilder::new(&mapping).build(&f, "008192");

        assert!(attrs.iter().all(|a| !a.kind.ends_with("|port")));
        // the halves are still ignored as generic fields
        assert_eq!(attrs.len(), 1);
    }

    #[test]
    fn test_destination_pair_without_source_pair() {
        let mapping = MappingConfig::default();
        let f = fields("date=2024-01-01 dstip=10.0.0.2 dstport=443");
        let attrs = AttributeBuilder::new(&mapping).build(&f, "013056");

        assert_eq!(attrs.len(), 2);
        assert_eq!(attrs[1].kind, "ip-dst|port");
    }

    // ── generic fields ───────────────────────────────────────────

    #[test]
    fn test_unknown_field_falls_back_to_other_text() {
        let mapping = MappingConfig::default();
        let f = fields("date=2024-01-01 policyid=12");
        let attrs = AttributeBuilder::new(&mapping).build(&f, "008192");

        let attr = &attrs[1];
        assert_eq!(attr.category, "Other");
        assert_eq!(attr.kind, "text");
        assert_eq!(attr.value, "12");
        assert!(attr.disable_correlation);
        assert_eq!(tag_names(attr), vec!["fortigate:policyid"]);
    }

    #[test]
    fn test_known_fields_use_category_table() {
        let mapping = MappingConfig::default();
        let f = fields(
            r#"date=2024-01-01 filename="eicar.com" url="http://example.com/eicar.com" ref="http://www.fortinet.com/ve?vn=EICAR_TEST_FILE""#,
        );
        let attrs = AttributeBuilder::new(&mapping).build(&f, "008192");

        let filename = attrs.iter().find(|a| a.has_tag("fortigate:filename")).unwrap();
        assert_eq!((filename.category.as_str(), filename.kind.as_str()), ("Payload delivery", "filename"));
        assert!(!filename.disable_correlation);

        let url = attrs.iter().find(|a| a.has_tag("fortigate:url")).unwrap();
        assert_eq!((url.category.as_str(), url.kind.as_str()), ("Network activity", "url"));
        assert!(!url.disable_correlation);

        let reference = attrs.iter().find(|a| a.has_tag("fortigate:ref")).unwrap();
        assert_eq!((reference.category.as_str(), reference.kind.as_str()), ("External analysis", "url"));
        assert!(reference.disable_correlation);
    }

    #[test]
    fn test_ignored_and_tag_fields_are_not_attributes() {
        let mapping = MappingConfig::default();
        let f = fields(
            "date=2024-01-01 time=10:00:00 tz=+0900 logid=0000008192 devname=fw1 devid=1 \
             eventtime=1 type=utm subtype=virus level=warning vd=root action=block",
        );
        let attrs = AttributeBuilder::new(&mapping).build(&f, "008192");
        assert_eq!(attrs.len(), 1, "Only the datetime attribute should remain: {:?}", attrs);
    }

    #[test]
    fn test_generic_fields_follow_encounter_order() {
        let mapping = MappingConfig::default();
        let f = fields("date=2024-01-01 virus=EICAR srcip=10.0.0.1 srcport=1 filehash=abc");
        let attrs = AttributeBuilder::new(&mapping).build(&f, "008192");

        let kinds: Vec<&str> = attrs.iter().map(|a| a.kind.as_str()).collect();
        assert_eq!(kinds, vec!["datetime", "ip-src|port", "text", "md5"]);
        assert_eq!(attrs[2].value, "EICAR");
        assert_eq!(attrs[3].value, "abc");
    }

    #[test]
    fn test_empty_generic_value_is_kept() {
        let mapping = MappingConfig::default();
        let f = fields(r#"date=2024-01-01 catdesc="""#);
        let attrs = AttributeBuilder::new(&mapping).build(&f, "054803");
        assert_eq!(attrs[1].value, "");
        assert!(attrs[1].has_tag("fortigate:catdesc"));
    }
}
