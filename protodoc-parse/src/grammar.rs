//! Record grammars.
//!
//! Every multi-line block kind is described by one [`Grammar`]: an ordered
//! list of labelled fields closed by `*/`. The label that introduces field
//! N+1 is the stop marker that ends field N, and the last field ends at the
//! closing delimiter.

use std::io::BufRead;

use crate::error::{Diagnostic, ExtractError, Result};
use crate::extract::FieldReader;
use crate::lines::LineSource;
use crate::types::{BLOCK_CLOSE, BlockTag, Record, TagKind};

/// How a field is typeset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldStyle {
    /// Running text, no heading.
    Prose,
    /// Bold label followed by a verbatim block.
    Verbatim,
    /// Like `Verbatim`, but the text `None` means "no value".
    Optional,
}

/// One labelled field of a grammar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    /// Label text introducing the field, also the stop marker of the
    /// preceding field.
    pub label: &'static str,
    pub key: &'static str,
    pub style: FieldStyle,
}

/// Field sequence for one block kind.
#[derive(Debug)]
pub struct Grammar {
    pub kind: TagKind,
    /// Whether a name precedes the first label. Unnamed grammars treat the
    /// tag itself as the first label.
    pub named: bool,
    pub fields: &'static [FieldSpec],
    pub close: &'static str,
}

const SUMMARY: FieldSpec = FieldSpec {
    label: "Summary:",
    key: "summary",
    style: FieldStyle::Prose,
};

const STRUCTURE: FieldSpec = FieldSpec {
    label: "Structure:",
    key: "structure",
    style: FieldStyle::Verbatim,
};

const ARGUMENTS: FieldSpec = FieldSpec {
    label: "Arguments:",
    key: "arguments",
    style: FieldStyle::Optional,
};

const STRUCTURE_FIELDS: &[FieldSpec] = &[SUMMARY, STRUCTURE];

pub static DATA_STRUCTURE: Grammar = Grammar {
    kind: TagKind::DataStructure,
    named: true,
    fields: STRUCTURE_FIELDS,
    close: BLOCK_CLOSE,
};

pub static EVENT: Grammar = Grammar {
    kind: TagKind::Event,
    named: true,
    fields: STRUCTURE_FIELDS,
    close: BLOCK_CLOSE,
};

pub static RPC_CALL: Grammar = Grammar {
    kind: TagKind::RpcCall,
    named: true,
    fields: &[
        SUMMARY,
        ARGUMENTS,
        FieldSpec {
            label: "Return:",
            key: "return_shape",
            style: FieldStyle::Optional,
        },
        FieldSpec {
            label: "Example call:",
            key: "example_call",
            style: FieldStyle::Verbatim,
        },
        FieldSpec {
            label: "Example return:",
            key: "example_return",
            style: FieldStyle::Verbatim,
        },
    ],
    close: BLOCK_CLOSE,
};

pub static PROPERTY: Grammar = Grammar {
    kind: TagKind::Property,
    named: true,
    fields: &[SUMMARY, ARGUMENTS],
    close: BLOCK_CLOSE,
};

pub static CHANGE_LOG: Grammar = Grammar {
    kind: TagKind::ChangeLog,
    named: false,
    fields: &[FieldSpec {
        label: "Protocol Change Log:",
        key: "log",
        style: FieldStyle::Verbatim,
    }],
    close: BLOCK_CLOSE,
};

impl Grammar {
    /// Grammar for `kind`. Version markers are single-line and have none.
    pub fn for_kind(kind: TagKind) -> Option<&'static Grammar> {
        match kind {
            TagKind::DataStructure => Some(&DATA_STRUCTURE),
            TagKind::Event => Some(&EVENT),
            TagKind::RpcCall => Some(&RPC_CALL),
            TagKind::Property => Some(&PROPERTY),
            TagKind::ChangeLog => Some(&CHANGE_LOG),
            TagKind::VersionMarker => None,
        }
    }

    /// Stop marker ending field `index`.
    fn stop_after(&self, index: usize) -> &'static str {
        self.fields
            .get(index + 1)
            .map(|f| f.label)
            .unwrap_or(self.close)
    }

    /// Consume the body of a block whose tag was found on the header line.
    ///
    /// `after_tag` is the rest of the header line following the tag text.
    pub fn read<R: BufRead>(
        &self,
        tag: BlockTag,
        after_tag: &str,
        source: &mut LineSource<R>,
        diagnostics: &mut Vec<Diagnostic>,
    ) -> Result<Record> {
        let mut reader = FieldReader::new(source, diagnostics, tag);
        let first = self.fields[0].label;

        let name = if self.named {
            let inline = after_tag.trim();
            let name = if inline.is_empty() {
                reader.next_stripped(first)?.trim().to_string()
            } else {
                inline.to_string()
            };
            let header = reader.next_raw(first)?;
            let pos = header
                .text
                .find(first)
                .ok_or(ExtractError::MalformedHeader {
                    kind: tag.kind,
                    line: tag.line,
                    found_at: header.number,
                    expected: first,
                })?;
            reader.seed(&header.text[pos + first.len()..]);
            name
        } else {
            reader.seed(after_tag);
            String::new()
        };

        let mut values = Vec::with_capacity(self.fields.len());
        for index in 0..self.fields.len() {
            values.push(reader.read_until(self.stop_after(index))?);
        }

        Ok(build_record(tag, name, values))
    }
}

fn build_record(tag: BlockTag, name: String, values: Vec<String>) -> Record {
    let mut values = values.into_iter();
    let mut next = || values.next().unwrap_or_default();
    let line = tag.line;
    match tag.kind {
        TagKind::DataStructure => Record::DataStructure {
            name,
            summary: next(),
            structure: next(),
            line,
        },
        TagKind::Event => Record::Event {
            name,
            summary: next(),
            structure: next(),
            line,
        },
        TagKind::RpcCall => Record::Rpc {
            name,
            summary: next(),
            arguments: next(),
            return_shape: next(),
            example_call: next(),
            example_return: next(),
            line,
        },
        TagKind::Property => Record::Property {
            name,
            summary: next(),
            arguments: next(),
            line,
        },
        TagKind::ChangeLog => Record::ChangeLog { log: next(), line },
        TagKind::VersionMarker => Record::Version {
            version: next(),
            line,
        },
    }
}

/// Read a version marker: the trimmed text after the tag on its own line.
pub fn read_version(tag: BlockTag, after_tag: &str) -> Record {
    Record::Version {
        version: after_tag.trim().to_string(),
        line: tag.line,
    }
}

impl Record {
    /// Fields after the name, paired with their grammar entry, in grammar
    /// order. Version markers have none.
    pub fn fields(&self) -> Vec<(&'static FieldSpec, &str)> {
        let values: Vec<&str> = match self {
            Record::DataStructure {
                summary, structure, ..
            }
            | Record::Event {
                summary, structure, ..
            } => vec![summary.as_str(), structure.as_str()],
            Record::Rpc {
                summary,
                arguments,
                return_shape,
                example_call,
                example_return,
                ..
            } => vec![
                summary.as_str(),
                arguments.as_str(),
                return_shape.as_str(),
                example_call.as_str(),
                example_return.as_str(),
            ],
            Record::Property {
                summary, arguments, ..
            } => vec![summary.as_str(), arguments.as_str()],
            Record::ChangeLog { log, .. } => vec![log.as_str()],
            Record::Version { .. } => Vec::new(),
        };
        match Grammar::for_kind(self.kind()) {
            Some(grammar) => grammar.fields.iter().zip(values).collect(),
            None => Vec::new(),
        }
    }
}
