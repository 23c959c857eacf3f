use crate::error::AnalysisError;

/// Decode plain-text bytes as UTF-8, verbatim.
pub fn extract(bytes: &[u8]) -> Result<String, AnalysisError> {
    String::from_utf8(bytes.to_vec()).map_err(|e| AnalysisError::unreadable("plain text", e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verbatim() {
        let raw = "Penalty of ₹ 50,000\r\nSole jurisdiction.\n";
        assert_eq!(extract(raw.as_bytes()).unwrap(), raw);
    }

    #[test]
    fn test_invalid_utf8() {
        let err = extract(&[0x66, 0xff, 0xfe]).unwrap_err();
        assert!(matches!(
            err,
            AnalysisError::UnreadableDocument { media: "plain text", .. }
        ));
    }
}
