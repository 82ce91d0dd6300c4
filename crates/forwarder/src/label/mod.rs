/// Label resolution
///
/// Maps a record's message id to a human readable label: first through the
/// static label table, then through the configured [`LabelModifier`] chain.
///
/// - `resolver.rs`: table lookup plus modifier fold
/// - `modifiers/`: the modifier trait and bundled implementations

pub mod modifiers;
pub mod resolver;

pub use modifiers::{LabelModifier, ModifierKind};
pub use resolver::{message_id, LabelResolver, ResolvedLabel};

/// Length of the message id suffix of `logid`.
pub const MESSAGE_ID_LEN: usize = 6;
