//! In-memory OPC package assembled part by part before serialization.
use crate::ooxml::opc::error::{OpcError, Result};
use crate::ooxml::opc::packuri::{PACKAGE_URI, PackURI};
use crate::ooxml::opc::part::Part;
use crate::ooxml::opc::pkgwriter::PackageWriter;
use crate::ooxml::opc::rel::Relationships;
use std::collections::HashMap;

/// An Open Packaging Convention package under construction.
///
/// Parts keep the order they were added in; the ZIP members come out in that
/// order after `[Content_Types].xml` and the package relationships.
#[derive(Debug)]
pub struct OpcPackage {
    /// Package-level relationships
    rels: Relationships,

    /// All parts in insertion order
    parts: Vec<Part>,

    /// Partname to index into `parts`
    index: HashMap<String, usize>,
}

impl OpcPackage {
    /// Create a new empty OPC package.
    pub fn new() -> Self {
        Self {
            rels: Relationships::new(PACKAGE_URI.to_string()),
            parts: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Add a new part to the package.
    ///
    /// Returns an error if a part with the same partname already exists.
    pub fn add_part(&mut self, part: Part) -> Result<()> {
        let partname = part.partname().to_string();
        if self.index.contains_key(&partname) {
            return Err(OpcError::DuplicatePart(partname));
        }
        self.index.insert(partname, self.parts.len());
        self.parts.push(part);
        Ok(())
    }

    /// Get a part by partname.
    pub fn get_part(&self, partname: &PackURI) -> Result<&Part> {
        self.index
            .get(partname.as_str())
            .map(|&i| &self.parts[i])
            .ok_or_else(|| OpcError::PartNotFound(partname.to_string()))
    }

    /// Get mutable access to a part by partname.
    pub fn get_part_mut(&mut self, partname: &PackURI) -> Result<&mut Part> {
        match self.index.get(partname.as_str()) {
            Some(&i) => Ok(&mut self.parts[i]),
            None => Err(OpcError::PartNotFound(partname.to_string())),
        }
    }

    /// Check if a part exists in the package.
    pub fn contains_part(&self, partname: &PackURI) -> bool {
        self.index.contains_key(partname.as_str())
    }

    /// Get an iterator over all parts in insertion order.
    pub fn iter_parts(&self) -> impl Iterator<Item = &Part> {
        self.parts.iter()
    }

    /// Get the number of parts in the package.
    pub fn part_count(&self) -> usize {
        self.parts.len()
    }

    /// Get a reference to the package-level relationships.
    pub fn rels(&self) -> &Relationships {
        &self.rels
    }

    /// Relate the package itself to a part and return the rId.
    pub fn relate_to(&mut self, partname: &PackURI, reltype: &str) -> String {
        let target_ref = partname.relative_ref(PACKAGE_URI);
        self.rels.get_or_add(reltype, &target_ref)
    }

    /// Relate one part in the package to another and return the rId.
    pub fn relate_parts(&mut self, source: &PackURI, target: &PackURI, reltype: &str) -> Result<String> {
        let part = self.get_part_mut(source)?;
        Ok(part.relate_to(target, reltype))
    }

    /// Find the next free partname for a numbered template.
    ///
    /// `template` contains a `%d` placeholder, e.g. "/ppt/media/image%d.png".
    pub fn next_partname(&self, template: &str) -> Result<PackURI> {
        let mut n = 1u32;
        loop {
            let candidate = template.replace("%d", &n.to_string());
            if !self.index.contains_key(&candidate) {
                return PackURI::new(candidate).map_err(OpcError::InvalidPackUri);
            }
            n += 1;
        }
    }

    /// Serialize the package to ZIP bytes.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        PackageWriter::to_bytes(self)
    }
}

impl Default for OpcPackage {
    fn default() -> Self {
        Self::new()
    }
}
