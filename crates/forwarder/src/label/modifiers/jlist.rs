use super::LabelModifier;
use crate::parser::FieldMap;

const DOMAIN_FILTERS: &[&str] = &["DCJUST_Domain_Block_Filter", "DCJUST_Domain_Detect_Filter"];
const URL_FILTERS: &[&str] = &["DCJUST_URL_Block_Filter", "DCJUST_URL_Detect_Filter"];
const IP_POLICIES: &[&str] = &["DCJUST_IP_Block_1", "DCJUST_IP_Detect_1"];

/// Relabels hits on the JLIST block/detect lists.
///
/// The lists surface as a dedicated AV message id, as DNS and web filter
/// categories (`catdesc`), and as firewall policy names (`policyname`).
#[derive(Debug, Clone, Copy, Default)]
pub struct JlistModifier;

impl LabelModifier for JlistModifier {
    fn modify_label(&self, message_id: &str, fields: &FieldMap) -> Option<String> {
        let label = match message_id {
            "008212" => "JLIST_AV",
            "054803" if field_in(fields, "catdesc", DOMAIN_FILTERS) => "JLIST_Domain",
            "013056" if field_in(fields, "catdesc", URL_FILTERS) => "JLIST_URL",
            "000013" if field_in(fields, "policyname", IP_POLICIES) => "JLIST_IP",
            _ => return None,
        };
        Some(label.to_string())
    }

    fn name(&self) -> &'static str {
        "jlist"
    }
}

fn field_in(fields: &FieldMap, key: &str, allowed: &[&str]) -> bool {
    fields.get(key).is_some_and(|v| allowed.contains(&v))
}
