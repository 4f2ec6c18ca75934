use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ExtractError;

/// Field text meaning "not applicable" (e.g. an RPC call without arguments).
pub const NONE_SENTINEL: &str = "None";

/// Closing delimiter of every multi-line block.
pub const BLOCK_CLOSE: &str = "*/";

/// Kind of documentation block, selected per run by the mode argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TagKind {
    #[serde(rename = "data")]
    DataStructure,
    #[serde(rename = "events")]
    Event,
    #[serde(rename = "rpc")]
    RpcCall,
    Property,
    #[serde(rename = "changelog")]
    ChangeLog,
    #[serde(rename = "version")]
    VersionMarker,
}

impl TagKind {
    pub const ALL: [TagKind; 6] = [
        TagKind::DataStructure,
        TagKind::Event,
        TagKind::RpcCall,
        TagKind::Property,
        TagKind::ChangeLog,
        TagKind::VersionMarker,
    ];

    /// Marker text that opens a block of this kind. Matched case-sensitively
    /// anywhere in a line.
    pub fn tag(self) -> &'static str {
        match self {
            TagKind::DataStructure => "Doc DataStructure:",
            TagKind::Event => "Doc Event:",
            TagKind::RpcCall => "Doc RPC:",
            TagKind::Property => "Doc Property:",
            TagKind::ChangeLog => "Protocol Change Log:",
            // Trailing space is part of the label.
            TagKind::VersionMarker => "Protocol Version: ",
        }
    }

    /// Mode selector used on the command line.
    pub fn mode(self) -> &'static str {
        match self {
            TagKind::DataStructure => "data",
            TagKind::Event => "events",
            TagKind::RpcCall => "rpc",
            TagKind::Property => "property",
            TagKind::ChangeLog => "changelog",
            TagKind::VersionMarker => "version",
        }
    }

    /// Parse a mode selector. Any unlisted value is a configuration error.
    pub fn from_mode(mode: &str) -> Result<Self, ExtractError> {
        TagKind::ALL
            .into_iter()
            .find(|k| k.mode() == mode)
            .ok_or_else(|| ExtractError::UnknownMode(mode.to_string()))
    }
}

impl fmt::Display for TagKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            TagKind::DataStructure => "DataStructure",
            TagKind::Event => "Event",
            TagKind::RpcCall => "RPC",
            TagKind::Property => "Property",
            TagKind::ChangeLog => "Change Log",
            TagKind::VersionMarker => "Protocol Version",
        };
        f.write_str(label)
    }
}

impl FromStr for TagKind {
    type Err = ExtractError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TagKind::from_mode(s)
    }
}

/// A tag found on a header line: its kind and the column it starts at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockTag {
    pub kind: TagKind,
    /// Character index of the tag within its header line.
    pub column: usize,
    /// 1-based line number of the header line.
    pub line: usize,
}

impl BlockTag {
    /// Width of the left margin stripped from every field line of the block.
    ///
    /// Two characters past the tag column, matching the `* ` decoration of a
    /// doc comment.
    pub fn margin(&self) -> usize {
        self.column + 2
    }
}

/// One parsed documentation block.
///
/// Text fields are trimmed and never contain the label that ended them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Record {
    DataStructure {
        name: String,
        summary: String,
        structure: String,
        line: usize,
    },
    Event {
        name: String,
        summary: String,
        structure: String,
        line: usize,
    },
    Rpc {
        name: String,
        summary: String,
        arguments: String,
        return_shape: String,
        example_call: String,
        example_return: String,
        line: usize,
    },
    Property {
        name: String,
        summary: String,
        arguments: String,
        line: usize,
    },
    ChangeLog {
        log: String,
        line: usize,
    },
    Version {
        version: String,
        line: usize,
    },
}

impl Record {
    pub fn kind(&self) -> TagKind {
        match self {
            Record::DataStructure { .. } => TagKind::DataStructure,
            Record::Event { .. } => TagKind::Event,
            Record::Rpc { .. } => TagKind::RpcCall,
            Record::Property { .. } => TagKind::Property,
            Record::ChangeLog { .. } => TagKind::ChangeLog,
            Record::Version { .. } => TagKind::VersionMarker,
        }
    }

    /// 1-based line number of the tag that opened this record.
    pub fn line(&self) -> usize {
        match self {
            Record::DataStructure { line, .. }
            | Record::Event { line, .. }
            | Record::Rpc { line, .. }
            | Record::Property { line, .. }
            | Record::ChangeLog { line, .. }
            | Record::Version { line, .. } => *line,
        }
    }

    /// Record name, for kinds that carry one.
    pub fn name(&self) -> Option<&str> {
        match self {
            Record::DataStructure { name, .. }
            | Record::Event { name, .. }
            | Record::Rpc { name, .. }
            | Record::Property { name, .. } => Some(name),
            Record::ChangeLog { .. } | Record::Version { .. } => None,
        }
    }
}

/// Returns the field text unless it is the `None` sentinel.
pub fn present(text: &str) -> Option<&str> {
    if text == NONE_SENTINEL {
        None
    } else {
        Some(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn modes_round_trip_through_from_mode() {
        for kind in TagKind::ALL {
            assert_eq!(TagKind::from_mode(kind.mode()).unwrap(), kind);
        }
    }

    #[test]
    fn unknown_mode_is_rejected() {
        let err = "rpcs".parse::<TagKind>().unwrap_err();
        assert!(matches!(err, ExtractError::UnknownMode(ref m) if m == "rpcs"));
    }

    #[test]
    fn version_tag_keeps_trailing_space() {
        assert_eq!(TagKind::VersionMarker.tag(), "Protocol Version: ");
    }

    #[test]
    fn margin_is_two_past_column() {
        let tag = BlockTag {
            kind: TagKind::RpcCall,
            column: 9,
            line: 1,
        };
        assert_eq!(tag.margin(), 11);
    }

    #[test]
    fn sentinel_is_exact_match() {
        assert_eq!(present("None"), None);
        assert_eq!(present("None given"), Some("None given"));
        assert_eq!(present("none"), Some("none"));
    }

    #[test]
    fn record_serializes_with_kind_tag() {
        let rec = Record::Version {
            version: "0.7.4".into(),
            line: 3,
        };
        let json = serde_json::to_string(&rec).unwrap();
        assert_eq!(json, r#"{"kind":"version","version":"0.7.4","line":3}"#);
    }
}
