//! Open Packaging Conventions (OPC) implementation.
//!
//! The container layer under PresentationML: parts, relationships, content
//! types, and the ZIP archive. Writing builds a package in memory and
//! serializes it in one pass; reading only follows relationships so a
//! written deck can be inspected again.
pub mod constants;
pub mod error;
pub mod package;
pub mod packuri;
pub mod part;
pub mod phys_pkg;
pub mod pkgreader;
pub mod pkgwriter;
pub mod rel;

// Re-export commonly used types
pub use package::OpcPackage;
pub use packuri::PackURI;
pub use part::Part;
pub use pkgreader::PackageReader;
pub use rel::{Relationship, Relationships};
