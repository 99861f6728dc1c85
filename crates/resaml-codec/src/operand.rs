//! Evaluated operand objects.
//!
//! The namespace collaborator hands the codec already-evaluated objects;
//! this is the minimal shape the resource entry points consume (`_CRS` and
//! `_PRS` return a Buffer, `_PRT` a Package of Packages).

use crate::error::{ResourceError, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OperandObject {
    Integer(u64),
    String(String),
    Buffer(Vec<u8>),
    Package(Vec<OperandObject>),
}

impl OperandObject {
    pub fn kind(&self) -> &'static str {
        match self {
            OperandObject::Integer(_) => "integer",
            OperandObject::String(_) => "string",
            OperandObject::Buffer(_) => "buffer",
            OperandObject::Package(_) => "package",
        }
    }

    pub fn as_integer(&self) -> Result<u64> {
        match self {
            OperandObject::Integer(value) => Ok(*value),
            _ => Err(ResourceError::BadOperandData("expected an integer operand")),
        }
    }

    pub fn as_buffer(&self) -> Result<&[u8]> {
        match self {
            OperandObject::Buffer(bytes) => Ok(bytes),
            _ => Err(ResourceError::BadOperandData("expected a buffer operand")),
        }
    }

    pub fn as_package(&self) -> Result<&[OperandObject]> {
        match self {
            OperandObject::Package(elements) => Ok(elements),
            _ => Err(ResourceError::BadOperandData("expected a package operand")),
        }
    }
}
