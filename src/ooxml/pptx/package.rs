/// Package implementation for PowerPoint presentations.
use crate::ooxml::error::{OoxmlError, Result};
use crate::ooxml::opc::constants::{part_name, relationship_type};
use crate::ooxml::opc::{PackURI, PhysPkgReader, Relationship, Relationships};
use crate::ooxml::pptx::parts::presentation::{PresentationPart, SlideSize};
use crate::ooxml::pptx::parts::slide::{SlideLinks, SlideSource};
use std::collections::HashMap;
use std::io::Read;
use std::path::Path;
use tracing::debug;

/// A PowerPoint (.pptx) package.
///
/// This is the main entry point for reading presentations. The archive is
/// decompressed once and the presentation manifest parsed up front.
///
/// # Examples
///
/// ```rust,no_run
/// use pptx_reveal::ooxml::pptx::Package;
///
/// let pkg = Package::open("presentation.pptx")?;
/// println!("Presentation has {} slides", pkg.presentation().slide_count());
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub struct Package {
    phys: PhysPkgReader,
    presentation: PresentationPart,
}

impl Package {
    /// Open a .pptx package from a file path.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::from_phys(PhysPkgReader::open(path)?)
    }

    /// Create a .pptx package from the bytes of the archive.
    pub fn from_bytes(data: Vec<u8>) -> Result<Self> {
        Self::from_phys(PhysPkgReader::from_bytes(data)?)
    }

    /// Create a .pptx package from a reader.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        Self::from_phys(PhysPkgReader::from_reader(reader)?)
    }

    fn from_phys(phys: PhysPkgReader) -> Result<Self> {
        let uri = Self::presentation_uri()?;
        let blob = phys
            .blob_for(&uri)
            .map_err(|_| OoxmlError::PartNotFound(uri.to_string()))?;
        let presentation = PresentationPart::from_xml(blob)?;
        Ok(Self { phys, presentation })
    }

    fn presentation_uri() -> Result<PackURI> {
        PackURI::new(part_name::PRESENTATION).map_err(OoxmlError::InvalidFormat)
    }

    #[inline]
    pub fn presentation(&self) -> &PresentationPart {
        &self.presentation
    }

    #[inline]
    pub fn slide_size(&self) -> SlideSize {
        self.presentation.slide_size()
    }

    /// Get the underlying physical package.
    #[inline]
    pub fn phys(&self) -> &PhysPkgReader {
        &self.phys
    }

    /// Resolve every slide in presentation order.
    ///
    /// Manifest entries without a matching slide relationship are skipped.
    /// A slide without a relationship part gets empty link maps.
    ///
    /// # Errors
    ///
    /// Fails when the presentation relationships are missing or malformed,
    /// when a referenced slide part is absent, or when a slide's relationship
    /// part is malformed.
    pub fn slides(&self) -> Result<Vec<SlideSource<'_>>> {
        let pres_uri = Self::presentation_uri()?;
        let rels_xml = self.phys.rels_xml_for(&pres_uri)?.ok_or_else(|| {
            OoxmlError::PartNotFound(format!("relationships for {}", pres_uri))
        })?;
        let rels = Relationships::from_xml(rels_xml, pres_uri.base_uri())?;

        let slide_rels: HashMap<&str, &Relationship> = rels
            .iter()
            .filter(|rel| {
                rel.is_type(relationship_type::SLIDE) || rel.target_ref().starts_with("slides/slide")
            })
            .map(|rel| (rel.r_id(), rel))
            .collect();

        let mut sources = Vec::with_capacity(self.presentation.slide_count());
        for rid in self.presentation.slide_rids() {
            let Some(rel) = slide_rels.get(rid.as_str()) else {
                debug!(r_id = %rid, "slide id has no slide relationship, skipping");
                continue;
            };

            let partname = rels.target_partname(rel)?;
            let xml = self.phys.blob_for(&partname)?;
            let links = match self.phys.rels_xml_for(&partname)? {
                Some(slide_rels_xml) => {
                    let slide_rels = Relationships::from_xml(slide_rels_xml, partname.base_uri())?;
                    SlideLinks::from_relationships(&slide_rels)?
                },
                None => SlideLinks::default(),
            };

            sources.push(SlideSource {
                index: sources.len(),
                partname,
                xml,
                links,
            });
        }

        Ok(sources)
    }
}

impl std::fmt::Debug for Package {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Package")
            .field("slides", &self.presentation.slide_count())
            .field("slide_size", &self.presentation.slide_size())
            .finish()
    }
}
