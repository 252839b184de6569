//! XML descriptor sources.
//!
//! A [`Descriptor`] owns the full text of one input file together with the kind the caller
//! assigned to it. Parsing borrows from that text, so all sources are loaded before any table is
//! built and stay alive for the whole build.

use crate::error::{ContractError, Result};
use roxmltree::{Document, Node, ParsingOptions};
use std::fmt;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DescriptorKind {
    Errors,
    Operations,
    Services,
}

impl DescriptorKind {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            DescriptorKind::Errors => "error",
            DescriptorKind::Operations => "operation",
            DescriptorKind::Services => "service",
        }
    }
}

impl fmt::Display for DescriptorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone)]
pub struct Descriptor {
    kind: DescriptorKind,
    origin: PathBuf,
    text: String,
}

impl Descriptor {
    /// Read a descriptor file fully into memory.
    ///
    /// # Errors
    ///
    /// Returns [`ContractError::ReadInput`] if the file cannot be read.
    pub fn load(kind: DescriptorKind, path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|source| ContractError::ReadInput {
            kind: kind.as_str(),
            path: path.display().to_string(),
            source,
        })?;
        tracing::info!("Loaded {} descriptor {}", kind, path.display());
        Ok(Self::from_text(kind, path, text))
    }

    #[must_use]
    pub fn from_text(kind: DescriptorKind, origin: impl Into<PathBuf>, text: String) -> Self {
        Self {
            kind,
            origin: origin.into(),
            text,
        }
    }

    #[must_use]
    pub fn kind(&self) -> DescriptorKind {
        self.kind
    }

    #[must_use]
    pub fn origin(&self) -> &Path {
        &self.origin
    }

    /// Parse the descriptor text as XML.
    ///
    /// # Errors
    ///
    /// Returns [`ContractError::MalformedInput`] naming this file if the text is not well-formed XML.
    pub fn parse(&self) -> Result<Document<'_>> {
        let options = ParsingOptions {
            allow_dtd: true,
            ..ParsingOptions::default()
        };
        Document::parse_with_options(&self.text, options).map_err(|source| {
            ContractError::MalformedInput {
                kind: self.kind.as_str(),
                path: self.origin.display().to_string(),
                source,
            }
        })
    }
}

/// Element children of `node` with the given local tag name, in document order.
pub(crate) fn children_named<'a, 'input: 'a>(
    node: Node<'a, 'input>,
    tag: &'a str,
) -> impl Iterator<Item = Node<'a, 'input>> + 'a {
    node.children()
        .filter(move |n| n.is_element() && n.tag_name().name() == tag)
}

/// Attribute value, treating an empty string the same as a missing attribute.
pub(crate) fn non_empty_attr<'a>(node: Node<'a, '_>, name: &str) -> Option<&'a str> {
    node.attribute(name).filter(|v| !v.is_empty())
}
