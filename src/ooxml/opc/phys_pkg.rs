//! Physical package access: the ZIP container behind an OPC package.
//!
//! The writer builds the archive entirely in memory; the reader works over a
//! borrowed byte slice. Neither touches the filesystem.
use crate::ooxml::opc::error::{OpcError, Result};
use crate::ooxml::opc::packuri::PackURI;
use std::io::{Cursor, Read, Write};
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipArchive, ZipWriter};

/// Physical package writer for creating OPC packages.
pub struct PhysPkgWriter {
    /// The underlying ZIP archive writer
    archive: ZipWriter<Cursor<Vec<u8>>>,
}

impl PhysPkgWriter {
    /// Create a new package writer that writes to memory.
    pub fn new() -> Self {
        Self {
            archive: ZipWriter::new(Cursor::new(Vec::new())),
        }
    }

    /// Write a part to the package with Deflate compression.
    pub fn write(&mut self, pack_uri: &PackURI, blob: &[u8]) -> Result<()> {
        let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
        self.archive.start_file(pack_uri.membername(), options)?;
        self.archive.write_all(blob)?;
        Ok(())
    }

    /// Write a part to the package without compression.
    ///
    /// Used for media that is already compressed (PNG, JPEG, GIF).
    pub fn write_stored(&mut self, pack_uri: &PackURI, blob: &[u8]) -> Result<()> {
        let options = SimpleFileOptions::default().compression_method(CompressionMethod::Stored);
        self.archive.start_file(pack_uri.membername(), options)?;
        self.archive.write_all(blob)?;
        Ok(())
    }

    /// Finish writing and return the package bytes.
    pub fn finish(self) -> Result<Vec<u8>> {
        let cursor = self.archive.finish()?;
        Ok(cursor.into_inner())
    }
}

impl Default for PhysPkgWriter {
    fn default() -> Self {
        Self::new()
    }
}

/// Physical package reader over an in-memory ZIP archive.
pub struct PhysPkgReader<'data> {
    archive: ZipArchive<Cursor<&'data [u8]>>,
}

impl<'data> PhysPkgReader<'data> {
    /// Open a ZIP archive held in memory.
    pub fn new(data: &'data [u8]) -> Result<Self> {
        let archive = ZipArchive::new(Cursor::new(data))?;
        Ok(Self { archive })
    }

    /// Check whether the archive has a member for this part.
    pub fn contains(&self, pack_uri: &PackURI) -> bool {
        self.archive
            .file_names()
            .any(|name| name == pack_uri.membername())
    }

    /// Read the bytes of a part.
    pub fn blob_for(&mut self, pack_uri: &PackURI) -> Result<Vec<u8>> {
        let mut file = match self.archive.by_name(pack_uri.membername()) {
            Ok(file) => file,
            Err(zip::result::ZipError::FileNotFound) => {
                return Err(OpcError::PartNotFound(pack_uri.to_string()));
            },
            Err(e) => return Err(e.into()),
        };
        let mut blob = Vec::with_capacity(file.size() as usize);
        file.read_to_end(&mut blob)?;
        Ok(blob)
    }

    /// Read a part's relationships XML, or `None` if it has no .rels member.
    pub fn rels_xml_for(&mut self, source_uri: &PackURI) -> Result<Option<Vec<u8>>> {
        let rels_uri = source_uri.rels_uri();
        if !self.contains(&rels_uri) {
            return Ok(None);
        }
        self.blob_for(&rels_uri).map(Some)
    }

    /// Member names in archive order.
    pub fn member_names(&self) -> Vec<String> {
        self.archive.file_names().map(str::to_string).collect()
    }

    /// Number of members in the archive.
    pub fn len(&self) -> usize {
        self.archive.len()
    }

    /// Check whether the archive has no members.
    pub fn is_empty(&self) -> bool {
        self.archive.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip() {
        let mut writer = PhysPkgWriter::new();
        let pack_uri = PackURI::new("/ppt/slides/slide1.xml").unwrap();
        writer.write(&pack_uri, b"<p:sld/>").unwrap();
        let zip_data = writer.finish().unwrap();

        let mut reader = PhysPkgReader::new(&zip_data).unwrap();
        assert_eq!(reader.blob_for(&pack_uri).unwrap(), b"<p:sld/>");
    }

    #[test]
    fn test_stored_and_deflated_members() {
        let mut writer = PhysPkgWriter::new();
        let content_types = PackURI::new("/[Content_Types].xml").unwrap();
        let image = PackURI::new("/ppt/media/image1.png").unwrap();
        writer.write(&content_types, b"<Types/>").unwrap();
        writer.write_stored(&image, &[0x89, b'P', b'N', b'G']).unwrap();
        let zip_data = writer.finish().unwrap();

        let mut reader = PhysPkgReader::new(&zip_data).unwrap();
        assert_eq!(reader.len(), 2);
        assert_eq!(
            reader.member_names(),
            vec!["[Content_Types].xml".to_string(), "ppt/media/image1.png".to_string()]
        );
        assert_eq!(reader.blob_for(&image).unwrap(), vec![0x89, b'P', b'N', b'G']);
    }

    #[test]
    fn test_missing_part_and_rels() {
        let mut writer = PhysPkgWriter::new();
        let slide = PackURI::new("/ppt/slides/slide1.xml").unwrap();
        writer.write(&slide, b"<p:sld/>").unwrap();
        let zip_data = writer.finish().unwrap();

        let mut reader = PhysPkgReader::new(&zip_data).unwrap();
        let missing = PackURI::new("/ppt/slides/slide2.xml").unwrap();
        assert!(matches!(reader.blob_for(&missing), Err(OpcError::PartNotFound(_))));
        assert!(reader.rels_xml_for(&slide).unwrap().is_none());
    }

    #[test]
    fn test_not_a_zip() {
        assert!(PhysPkgReader::new(b"definitely not a zip archive").is_err());
    }
}
