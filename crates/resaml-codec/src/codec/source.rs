//! The optional ResourceSource trailer shared by the address-space and
//! extended IRQ descriptors: one index byte followed by a NUL-terminated
//! ASCII name. It is present on the wire exactly when the declared body
//! length exceeds the descriptor's fixed minimum.

use crate::error::{ResourceError, Result};
use crate::record::ResourceSource;

// Keeps the enclosing descriptor's 16-bit body length out of reach.
const MAX_NAME_LEN: usize = 0xF000;

/// Decodes the trailer bytes after a descriptor's fixed fields. An empty
/// slice means the descriptor carries no ResourceSource.
pub(crate) fn decode(trailer: &[u8]) -> Result<Option<ResourceSource>> {
    if trailer.is_empty() {
        return Ok(None);
    }
    if trailer.len() < 2 {
        return Err(ResourceError::MalformedStream(
            "resource source trailer too short",
        ));
    }
    let index = trailer[0];
    if trailer[trailer.len() - 1] != 0 {
        return Err(ResourceError::MalformedStream(
            "resource source name is not NUL-terminated",
        ));
    }
    let name_bytes = &trailer[1..trailer.len() - 1];
    let name = core::str::from_utf8(name_bytes)
        .map_err(|_| ResourceError::MalformedStream("resource source name is not ascii"))?;
    if !name.is_ascii() || name.contains('\0') {
        return Err(ResourceError::MalformedStream(
            "resource source name is not ascii",
        ));
    }
    Ok(Some(ResourceSource {
        index,
        name: name.to_owned(),
    }))
}

pub(crate) fn validate(source: &Option<ResourceSource>) -> Result<()> {
    let Some(src) = source else { return Ok(()) };
    if !src.name.is_ascii() || src.name.contains('\0') {
        return Err(ResourceError::InvalidArgument(
            "resource source name must be ascii without embedded NUL",
        ));
    }
    if src.name.len() > MAX_NAME_LEN {
        return Err(ResourceError::InvalidArgument(
            "resource source name too long",
        ));
    }
    Ok(())
}

/// Appends the trailer. Callers must have run [`validate`] first (the
/// encoders do, while computing the body length).
pub(crate) fn encode(source: &Option<ResourceSource>, out: &mut Vec<u8>) {
    if let Some(src) = source {
        out.push(src.index);
        out.extend_from_slice(src.name.as_bytes());
        out.push(0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_trailer_is_absent() {
        assert_eq!(decode(&[]).unwrap(), None);
    }

    #[test]
    fn trailer_round_trips_verbatim() {
        let src = ResourceSource {
            index: 2,
            name: "\\_SB.LNKA".to_owned(),
        };
        let mut wire = Vec::new();
        encode(&Some(src.clone()), &mut wire);
        assert_eq!(wire.len(), 2 + src.name.len());
        assert_eq!(decode(&wire).unwrap(), Some(src));
    }

    #[test]
    fn missing_terminator_is_malformed() {
        assert!(matches!(
            decode(&[0x01, b'A', b'B']),
            Err(ResourceError::MalformedStream(_))
        ));
    }

    #[test]
    fn lone_index_and_nul_is_an_empty_name() {
        let decoded = decode(&[0x07, 0x00]).unwrap().unwrap();
        assert_eq!(decoded.index, 0x07);
        assert_eq!(decoded.name, "");
    }
}
