use crate::errors::ExtractionError;

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Decode a text upload as UTF-8, dropping a leading byte order mark
pub fn decode(bytes: &[u8]) -> Result<String, ExtractionError> {
    let bytes = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);
    String::from_utf8(bytes.to_vec()).map_err(|e| {
        ExtractionError::InvalidEncoding(format!("invalid byte at offset {}", e.utf8_error().valid_up_to()))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_shouldStripBom() {
        assert_eq!(decode(b"\xEF\xBB\xBFHola").unwrap(), "Hola");
        assert_eq!(decode("añejo\r\n".as_bytes()).unwrap(), "añejo\r\n");
    }

    #[test]
    fn test_decode_withLatin1_shouldReportOffset() {
        let err = decode(b"ma\xF1ana").unwrap_err();
        assert!(matches!(err, ExtractionError::InvalidEncoding(ref m) if m.contains("offset 2")));
    }
}
