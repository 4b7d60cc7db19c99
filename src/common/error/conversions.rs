//! Error conversion implementations.
//!
//! Writer-side failures from the OPC and PresentationML layers all surface as
//! [`Error::Serialization`], so callers see a single "could not build the deck"
//! condition. Reader-side failures are mapped by the outline reader itself.

use super::types::Error;
use crate::ooxml::error::OoxmlError;
use crate::ooxml::opc::error::OpcError;

impl From<OpcError> for Error {
    fn from(err: OpcError) -> Self {
        match err {
            OpcError::Io(e) => Error::Io(e),
            other => Error::Serialization(other.to_string()),
        }
    }
}

impl From<OoxmlError> for Error {
    fn from(err: OoxmlError) -> Self {
        match err {
            OoxmlError::Opc(e) => Error::from(e),
            OoxmlError::Io(e) => Error::Io(e),
            OoxmlError::InvalidFormat(s) => Error::UnsupportedImage(s),
            OoxmlError::Xml(s) | OoxmlError::Other(s) => Error::Serialization(s),
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::InvalidResponse(err.to_string())
    }
}

impl From<base64::DecodeError> for Error {
    fn from(err: base64::DecodeError) -> Self {
        Error::InvalidResponse(format!("inline image data is not valid base64: {}", err))
    }
}
