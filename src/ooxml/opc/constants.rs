/// Constant values related to the Open Packaging Convention.
///
/// Relationship types, target modes and well-known part names used when
/// walking a presentation package.

/// Open XML relationship target modes
pub mod target_mode {
    pub const EXTERNAL: &str = "External";
}

/// Relationship type URIs, matched by suffix.
///
/// Strict and transitional packages use different URI prefixes for the same
/// relationship, so lookups compare the trailing segment only.
pub mod relationship_type {
    pub const HYPERLINK: &str = "/hyperlink";
    pub const IMAGE: &str = "/image";
    pub const SLIDE: &str = "/slide";
}

/// Well-known part names inside a presentation package
pub mod part_name {
    /// The presentation manifest listing slides in display order
    pub const PRESENTATION: &str = "/ppt/presentation.xml";
}
