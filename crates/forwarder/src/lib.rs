// FortiGate log → MISP event forwarder.

// Core record processing
pub mod parser;
pub mod label;
pub mod misp;

// Delivery and orchestration
pub mod conf;
pub mod submit;
pub mod pipeline;
pub mod runtime;
