//! Dimensional tags attached to connection observations.
//!
//! # Cardinality
//!
//! Tag values are bounded by the protocols a node speaks:
//! - `direction`: 3 values (outbound, inbound, unknown)
//! - `transport`: one per transport plus `unknown` (~5 values)
//! - `security`: one per security protocol (~3 values), absent for QUIC
//! - `muxer`: one per stream multiplexer (~2 values), absent for QUIC

use common::types::{ConnectionState, Direction};
use metrics::Label;
use serde::Serialize;
use std::fmt;

/// Value used when a transport fails to report its identifier.
pub const UNKNOWN_TRANSPORT: &str = "unknown";

/// Dimension along which connection observations are grouped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TagKey {
    Direction,
    Transport,
    Security,
    Muxer,
}

impl TagKey {
    /// Number of tag keys.
    pub const COUNT: usize = 4;

    /// Every tag key, in label order.
    pub const ALL: [TagKey; TagKey::COUNT] = [
        TagKey::Direction,
        TagKey::Transport,
        TagKey::Security,
        TagKey::Muxer,
    ];

    /// Returns the tag key as a metric label name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            TagKey::Direction => "direction",
            TagKey::Transport => "transport",
            TagKey::Security => "security",
            TagKey::Muxer => "muxer",
        }
    }

    const fn slot(self) -> usize {
        self as usize
    }
}

impl fmt::Display for TagKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Tags for a single observation.
///
/// A fixed slot per [`TagKey`]; inserting a key twice replaces the earlier
/// value. Values borrow from the connection state they were built from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TagSet<'a> {
    values: [Option<&'a str>; TagKey::COUNT],
}

impl<'a> TagSet<'a> {
    /// Create an empty tag set.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            values: [None; TagKey::COUNT],
        }
    }

    /// Insert or replace the value for `key`.
    pub fn upsert(&mut self, key: TagKey, value: &'a str) {
        if let Some(slot) = self.values.get_mut(key.slot()) {
            *slot = Some(value);
        }
    }

    /// Get the value for `key`, if set.
    #[must_use]
    pub fn get(&self, key: TagKey) -> Option<&'a str> {
        self.values.get(key.slot()).copied().flatten()
    }

    /// Whether `key` has a value.
    #[must_use]
    pub fn contains(&self, key: TagKey) -> bool {
        self.get(key).is_some()
    }

    /// Number of keys with a value.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.iter().filter(|v| v.is_some()).count()
    }

    /// Whether no key has a value.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Iterate over the set tags in [`TagKey::ALL`] order.
    pub fn iter(&self) -> impl Iterator<Item = (TagKey, &'a str)> + '_ {
        TagKey::ALL
            .into_iter()
            .filter_map(|key| self.get(key).map(|value| (key, value)))
    }

    /// Build metric labels for the keys a view aggregates on.
    ///
    /// Tags outside `keys` are dropped, as are keys with no value.
    #[must_use]
    pub fn labels_for(&self, keys: &[TagKey]) -> Vec<Label> {
        keys.iter()
            .filter_map(|key| {
                self.get(*key)
                    .map(|value| Label::new(key.as_str(), value.to_owned()))
            })
            .collect()
    }
}

/// Tags for connection open/close/duration observations.
#[must_use]
pub fn connection_tags(direction: Direction, state: &ConnectionState) -> TagSet<'_> {
    let mut tags = TagSet::new();
    tags.upsert(TagKey::Direction, direction.as_str());
    append_connection_state(&mut tags, state);
    tags
}

/// Tags for handshake latency observations. Direction is not included.
#[must_use]
pub fn handshake_tags(state: &ConnectionState) -> TagSet<'_> {
    let mut tags = TagSet::new();
    append_connection_state(&mut tags, state);
    tags
}

fn append_connection_state<'a>(tags: &mut TagSet<'a>, state: &'a ConnectionState) {
    // A transport that leaves this empty is misbehaving; still record.
    if state.transport.is_empty() {
        tags.upsert(TagKey::Transport, UNKNOWN_TRANSPORT);
    } else {
        tags.upsert(TagKey::Transport, &state.transport);
    }
    // QUIC and similar transports have no separate security or muxer layer.
    if !state.security.is_empty() {
        tags.upsert(TagKey::Security, &state.security);
    }
    if !state.stream_multiplexer.is_empty() {
        tags.upsert(TagKey::Muxer, &state.stream_multiplexer);
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    fn tcp_state() -> ConnectionState {
        ConnectionState::new("tcp")
            .with_security("tls")
            .with_stream_multiplexer("yamux")
    }

    #[test]
    fn test_full_connection_tags() {
        let state = tcp_state();
        let tags = connection_tags(Direction::Outbound, &state);

        assert_eq!(tags.len(), 4);
        assert_eq!(tags.get(TagKey::Direction), Some("outbound"));
        assert_eq!(tags.get(TagKey::Transport), Some("tcp"));
        assert_eq!(tags.get(TagKey::Security), Some("tls"));
        assert_eq!(tags.get(TagKey::Muxer), Some("yamux"));
    }

    #[test]
    fn test_quic_omits_security_and_muxer() {
        let state = ConnectionState::new("quic");
        let tags = connection_tags(Direction::Inbound, &state);

        assert_eq!(tags.len(), 2);
        assert_eq!(tags.get(TagKey::Direction), Some("inbound"));
        assert_eq!(tags.get(TagKey::Transport), Some("quic"));
        assert!(!tags.contains(TagKey::Security));
        assert!(!tags.contains(TagKey::Muxer));
    }

    #[test]
    fn test_missing_transport_is_unknown() {
        let state = ConnectionState::default().with_security("noise");
        let tags = connection_tags(Direction::Unknown, &state);

        assert_eq!(tags.get(TagKey::Transport), Some(UNKNOWN_TRANSPORT));
        assert_eq!(tags.get(TagKey::Direction), Some("unknown"));
        assert_eq!(tags.get(TagKey::Security), Some("noise"));
        assert!(!tags.contains(TagKey::Muxer));
    }

    #[test]
    fn test_direction_always_set() {
        let state = ConnectionState::default();
        for direction in [Direction::Inbound, Direction::Outbound, Direction::Unknown] {
            let tags = connection_tags(direction, &state);
            assert_eq!(tags.get(TagKey::Direction), Some(direction.as_str()));
        }
    }

    #[test]
    fn test_handshake_tags_have_no_direction() {
        let state = tcp_state();
        let tags = handshake_tags(&state);

        assert_eq!(tags.len(), 3);
        assert!(!tags.contains(TagKey::Direction));
        assert_eq!(tags.get(TagKey::Transport), Some("tcp"));
    }

    #[test]
    fn test_upsert_replaces_value() {
        let mut tags = TagSet::new();
        assert!(tags.is_empty());

        tags.upsert(TagKey::Transport, "tcp");
        tags.upsert(TagKey::Transport, "websocket");

        assert_eq!(tags.len(), 1);
        assert_eq!(tags.get(TagKey::Transport), Some("websocket"));
    }

    #[test]
    fn test_iter_follows_key_order() {
        let mut tags = TagSet::new();
        tags.upsert(TagKey::Muxer, "mplex");
        tags.upsert(TagKey::Direction, "inbound");

        let collected: Vec<_> = tags.iter().collect();
        assert_eq!(
            collected,
            vec![(TagKey::Direction, "inbound"), (TagKey::Muxer, "mplex")]
        );
    }

    #[test]
    fn test_labels_for_projects_onto_view_keys() {
        let state = tcp_state();
        let tags = connection_tags(Direction::Outbound, &state);

        let labels = tags.labels_for(&[TagKey::Transport, TagKey::Muxer]);
        let pairs: Vec<_> = labels.iter().map(|l| (l.key(), l.value())).collect();

        assert_eq!(pairs, vec![("transport", "tcp"), ("muxer", "yamux")]);
    }

    #[test]
    fn test_labels_for_skips_unset_keys() {
        let state = ConnectionState::new("quic-v1");
        let tags = connection_tags(Direction::Inbound, &state);

        let labels = tags.labels_for(&TagKey::ALL);
        let keys: Vec<_> = labels.iter().map(Label::key).collect();

        assert_eq!(keys, vec!["direction", "transport"]);
    }
}
