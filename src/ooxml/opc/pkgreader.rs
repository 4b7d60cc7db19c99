//! Package reader used to walk a written deck back from its ZIP bytes.
//!
//! Only the pieces needed to follow relationships are parsed: the package
//! relationships, per-part .rels members, and raw part blobs.
use crate::ooxml::opc::constants::relationship_type as rt;
use crate::ooxml::opc::error::{OpcError, Result};
use crate::ooxml::opc::packuri::{PACKAGE_URI, PackURI};
use crate::ooxml::opc::phys_pkg::PhysPkgReader;
use crate::ooxml::opc::rel::Relationships;

/// Read-only view over a serialized OPC package.
pub struct PackageReader<'data> {
    phys: PhysPkgReader<'data>,
}

impl<'data> PackageReader<'data> {
    /// Open a package from its ZIP bytes.
    pub fn new(data: &'data [u8]) -> Result<Self> {
        Ok(Self {
            phys: PhysPkgReader::new(data)?,
        })
    }

    /// Partname of the main document, found through the package's
    /// officeDocument relationship.
    pub fn main_document_partname(&mut self) -> Result<PackURI> {
        let package_uri = PackURI::new(PACKAGE_URI).map_err(OpcError::InvalidPackUri)?;
        let rels = self.rels_for(&package_uri)?;
        let rel = rels
            .first_of_type(rt::OFFICE_DOCUMENT)
            .ok_or_else(|| OpcError::RelationshipNotFound("officeDocument".to_string()))?;
        let r_id = rel.r_id().to_string();
        rels.target_partname(&r_id)
    }

    /// Relationships owned by a part (empty if the part has none).
    pub fn rels_for(&mut self, source: &PackURI) -> Result<Relationships> {
        match self.phys.rels_xml_for(source)? {
            Some(xml) => Relationships::from_xml(&xml, source.base_uri()),
            None => Ok(Relationships::new(source.base_uri().to_string())),
        }
    }

    /// Raw bytes of a part.
    pub fn blob(&mut self, partname: &PackURI) -> Result<Vec<u8>> {
        self.phys.blob_for(partname)
    }

    /// Check whether a part exists.
    pub fn contains(&self, partname: &PackURI) -> bool {
        self.phys.contains(partname)
    }
}
