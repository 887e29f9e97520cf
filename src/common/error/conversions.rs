//! Error conversion implementations.
//!
//! This module contains From trait implementations to convert from the
//! lower-level package errors to the unified Error type.
use super::types::Error;
use crate::ooxml::error::OoxmlError;
use crate::ooxml::opc::error::OpcError;

impl From<OpcError> for Error {
    fn from(err: OpcError) -> Self {
        Error::Container(OoxmlError::Opc(err))
    }
}

impl From<zip::result::ZipError> for Error {
    fn from(err: zip::result::ZipError) -> Self {
        Error::Container(OoxmlError::Opc(OpcError::ZipError(err)))
    }
}
