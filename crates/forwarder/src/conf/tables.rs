//! Tables — built-in FortiGate lookup tables used when the config file is silent.

use std::collections::HashMap;

use super::model::CategoryType;

/// Message id → event label.
pub fn message_labels() -> HashMap<String, String> {
    [
        ("008192", "AV(Web)"),
        ("008194", "AV(Mail)"),
        ("008705", "AV(oversize)"),
        ("009233", "AV sandbox (analytics)"),
        ("009238", "AV Sandbox (monitored)"),
        ("009236", "AV sandbox (blocked)"),
        ("013056", "Web Filter (Category Block)"),
        ("020480", "Email Filter (FortiGuard)"),
        ("016384", "IPS(signature)"),
        ("018432", "IPS(Anomaly)"),
        ("016400", "IPS(Botnet IP)"),
        ("054601", "DNS Filter (Botnet Domain)"),
        ("054803", "DNS Filter (FortiGuard)"),
    ]
    .into_iter()
    .map(|(id, label)| (id.to_string(), label.to_string()))
    .collect()
}

/// Anti-virus message ids; their address|port attributes are payload delivery.
pub fn av_message_ids() -> Vec<String> {
    strings(&["008192", "008194", "008705", "009233", "009238", "009236", "008212"])
}

/// Fields consumed structurally and never emitted as generic attributes.
pub fn ignore_keys() -> Vec<String> {
    strings(&[
        "date", "time", "devname", "devid", "eventtime", "tz", "logid", "type", "subtype",
        "level", "vd", "srcip", "srcport", "dstip", "dstport",
    ])
}

/// Fields folded into event tags.
pub fn tag_keys() -> Vec<String> {
    strings(&["devname", "devid", "type", "subtype", "level", "vd", "action"])
}

/// Field name → MISP (category, type).
pub fn key_category_type() -> HashMap<String, CategoryType> {
    [
        ("filehash", "Payload delivery", "md5"),
        ("filename", "Payload delivery", "filename"),
        ("from", "Network activity", "email-src"),
        ("hostname", "Network activity", "hostname"),
        ("mastersrcmac", "Network activity", "mac-address"),
        ("recipient", "Network activity", "email-dst"),
        ("ref", "External analysis", "url"),
        ("referralurl", "External analysis", "url"),
        ("sender", "Network activity", "email-src"),
        ("srcmac", "Network activity", "mac-address"),
        ("to", "Network activity", "email-dst"),
        ("url", "Network activity", "url"),
        ("analyticscksum", "Payload delivery", "sha256"),
    ]
    .into_iter()
    .map(|(key, category, kind)| (key.to_string(), CategoryType::new(category, kind)))
    .collect()
}

pub fn default_category_type() -> CategoryType {
    CategoryType::new("Other", "text")
}

pub fn disable_correlation_categories() -> Vec<String> {
    strings(&["External analysis", "Other"])
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_labels_cover_av_web() {
        assert_eq!(message_labels().get("008192").map(String::as_str), Some("AV(Web)"));
    }

    #[test]
    fn test_jlist_av_id_has_no_baseline_label() {
        // 008212 is labelled only through the JLIST modifier
        assert!(!message_labels().contains_key("008212"));
        assert!(av_message_ids().contains(&"008212".to_string()));
    }

    #[test]
    fn test_address_fields_are_ignored() {
        let ignored = ignore_keys();
        for key in ["srcip", "srcport", "dstip", "dstport"] {
            assert!(ignored.contains(&key.to_string()), "{} should be ignored", key);
        }
    }

    #[test]
    fn test_action_is_a_tag_key_but_not_ignored() {
        assert!(tag_keys().contains(&"action".to_string()));
        assert!(!ignore_keys().contains(&"action".to_string()));
    }
}
