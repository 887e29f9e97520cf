//! Relationship-related objects for OPC packages.
//!
//! A `.rels` part maps relationship ids (`rId3`) to targets. Slides use them
//! for hyperlinks and embedded pictures; the presentation part uses them for
//! slide order.

use crate::common::xml::attr_value;
use crate::ooxml::opc::constants::target_mode;
use crate::ooxml::opc::error::{OpcError, Result};
use crate::ooxml::opc::packuri::PackURI;
use quick_xml::Reader;
use quick_xml::events::Event;
use smallvec::SmallVec;

/// A single relationship from a source part to a target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Relationship {
    /// Relationship ID (e.g., "rId1", "rId2")
    r_id: String,

    /// Relationship type URI
    reltype: String,

    /// Target reference - either a part URI or external URL
    target_ref: String,

    /// Whether this is an external relationship
    is_external: bool,
}

impl Relationship {
    pub fn new(r_id: String, reltype: String, target_ref: String, is_external: bool) -> Self {
        Self {
            r_id,
            reltype,
            target_ref,
            is_external,
        }
    }

    /// Get the relationship ID.
    #[inline]
    pub fn r_id(&self) -> &str {
        &self.r_id
    }

    /// Get the relationship type.
    #[inline]
    pub fn reltype(&self) -> &str {
        &self.reltype
    }

    /// Get the target reference.
    ///
    /// For internal relationships, this is a relative part reference.
    /// For external relationships, this is an absolute URL.
    #[inline]
    pub fn target_ref(&self) -> &str {
        &self.target_ref
    }

    #[inline]
    pub fn is_external(&self) -> bool {
        self.is_external
    }

    /// Whether the relationship type URI ends with `suffix`.
    #[inline]
    pub fn is_type(&self, suffix: &str) -> bool {
        self.reltype.ends_with(suffix)
    }
}

/// Collection of relationships from a single source part.
///
/// Stored in document order; slides rarely carry more than a handful.
#[derive(Debug, Clone, Default)]
pub struct Relationships {
    /// Base URI for resolving relative references
    base_uri: String,

    rels: SmallVec<[Relationship; 8]>,
}

impl Relationships {
    /// Create a new empty relationships collection.
    pub fn new(base_uri: impl Into<String>) -> Self {
        Self {
            base_uri: base_uri.into(),
            rels: SmallVec::new(),
        }
    }

    /// Parse a `.rels` part.
    ///
    /// `base_uri` is the directory of the source part (e.g. `/ppt/slides`),
    /// against which internal targets are resolved.
    ///
    /// # Errors
    /// Returns `OpcError::XmlError` when the part is not well-formed or has
    /// no root element.
    pub fn from_xml(xml: &[u8], base_uri: &str) -> Result<Self> {
        let mut rels = Self::new(base_uri);
        let mut reader = Reader::from_reader(xml);
        reader.config_mut().trim_text(true);

        let mut buf = Vec::new();
        let mut depth = 0usize;
        let mut saw_root = false;

        loop {
            match reader.read_event_into(&mut buf) {
                Ok(Event::Start(ref e)) => {
                    depth += 1;
                    saw_root = true;
                    if e.local_name().as_ref() == b"Relationship" {
                        rels.push_from_attrs(e);
                    }
                },
                Ok(Event::Empty(ref e)) => {
                    saw_root = true;
                    if e.local_name().as_ref() == b"Relationship" {
                        rels.push_from_attrs(e);
                    }
                },
                Ok(Event::End(_)) => depth = depth.saturating_sub(1),
                Ok(Event::Eof) => break,
                Err(e) => return Err(OpcError::XmlError(format!("Rels parse error: {}", e))),
                _ => {},
            }
            buf.clear();
        }

        if !saw_root || depth != 0 {
            return Err(OpcError::XmlError(
                "Rels parse error: missing or unterminated root element".to_string(),
            ));
        }

        Ok(rels)
    }

    fn push_from_attrs(&mut self, e: &quick_xml::events::BytesStart<'_>) {
        let r_id = attr_value(e, b"Id");
        let reltype = attr_value(e, b"Type");
        let target_ref = attr_value(e, b"Target");
        let is_external = attr_value(e, b"TargetMode")
            .is_some_and(|mode| mode == target_mode::EXTERNAL);

        if let (Some(id), Some(rt), Some(tr)) = (r_id, reltype, target_ref) {
            self.rels.push(Relationship::new(id, rt, tr, is_external));
        }
    }

    /// Get a relationship by its ID.
    pub fn get(&self, r_id: &str) -> Option<&Relationship> {
        self.rels.iter().find(|rel| rel.r_id == r_id)
    }

    /// Get the absolute target partname for an internal relationship.
    pub fn target_partname(&self, rel: &Relationship) -> Result<PackURI> {
        if rel.is_external {
            return Err(OpcError::InvalidRelationship(format!(
                "Cannot get target_partname for external relationship '{}'",
                rel.r_id
            )));
        }
        PackURI::from_rel_ref(&self.base_uri, &rel.target_ref).map_err(OpcError::InvalidPackUri)
    }

    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = &Relationship> {
        self.rels.iter()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.rels.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.rels.is_empty()
    }
}
