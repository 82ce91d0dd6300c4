//! Runtime module — process lifecycle: logging, config, submitter selection.

pub mod boot;
