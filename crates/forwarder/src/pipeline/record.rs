use crate::conf::{EventDefaults, ForwarderConfig, MappingConfig};
use crate::label::LabelResolver;
use crate::misp::{AttributeBuilder, EventAssembler, MispEvent};
use crate::parser::{FieldMap, Tokenizer};

/// Event built from one log line, with the context needed to report on it.
#[derive(Debug, Clone)]
pub struct BuiltRecord {
    pub message_id: String,
    pub label: String,
    pub event: MispEvent,
}

#[derive(Debug, Clone)]
pub enum LineOutcome {
    /// No `date=` anchor in the line.
    NotARecord,
    /// Parsed, but neither the label table nor a modifier labels it.
    Unlabelled(FieldMap),
    Event(Box<BuiltRecord>),
}

/// Turns raw lines into events. Holds only read-only tables, so one
/// instance serves a whole run.
pub struct RecordProcessor {
    tokenizer: Tokenizer,
    resolver: LabelResolver,
    mapping: MappingConfig,
    defaults: EventDefaults,
}

impl RecordProcessor {
    pub fn new(tokenizer: Tokenizer, resolver: LabelResolver, mapping: MappingConfig, defaults: EventDefaults) -> Self {
        Self {
            tokenizer,
            resolver,
            mapping,
            defaults,
        }
    }

    pub fn from_config(config: &ForwarderConfig) -> Self {
        Self::new(
            Tokenizer::new(config.parser.delimiter),
            LabelResolver::from_config(&config.mapping),
            config.mapping.clone(),
            config.event.clone(),
        )
    }

    pub fn process(&self, line: &str) -> LineOutcome {
        let Some(fields) = self.tokenizer.tokenize(line) else {
            return LineOutcome::NotARecord;
        };
        let Some(resolved) = self.resolver.resolve(&fields) else {
            return LineOutcome::Unlabelled(fields);
        };

        let attributes = AttributeBuilder::new(&self.mapping).build(&fields, &resolved.message_id);
        let event = EventAssembler::new(&self.mapping, &self.defaults).assemble(&resolved.label, &fields, attributes);

        LineOutcome::Event(Box::new(BuiltRecord {
            message_id: resolved.message_id,
            label: resolved.label,
            event,
        }))
    }
}
