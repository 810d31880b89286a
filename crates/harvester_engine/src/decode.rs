use chardetng::EncodingDetector;
use encoding_rs::{Encoding, UTF_16BE, UTF_16LE, UTF_8};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedXml {
    pub text: String,
    pub encoding_label: String,
}

#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq)]
pub enum DecodeError {
    #[error("failed to decode bytes with {encoding}: {message}")]
    DecodeFailure { encoding: String, message: String },
}

/// Decode raw bytes into UTF-8 using: BOM -> Content-Type charset -> XML
/// declaration encoding -> chardetng fallback.
///
/// The returned text has any BOM stripped, so it can go straight to the parser.
pub fn decode_xml(bytes: &[u8], content_type: Option<&str>) -> Result<DecodedXml, DecodeError> {
    if let Some((encoding, bom_len)) = Encoding::for_bom(bytes) {
        return decode_with(&bytes[bom_len..], encoding);
    }

    if let Some(label) = content_type.and_then(extract_charset) {
        if let Some(enc) = Encoding::for_label(label.as_bytes()) {
            return decode_with(bytes, enc);
        }
    }

    // A readable declaration rules out UTF-16, whatever it claims.
    if let Some(label) = declared_encoding(bytes) {
        if let Some(enc) = Encoding::for_label(label.as_bytes())
            .filter(|enc| *enc != UTF_16LE && *enc != UTF_16BE)
        {
            return decode_with(bytes, enc);
        }
    }

    // XML without a declaration defaults to UTF-8; only sniff when that fails.
    if std::str::from_utf8(bytes).is_ok() {
        return decode_with(bytes, UTF_8);
    }
    let mut detector = EncodingDetector::new();
    detector.feed(bytes, true);
    let enc = detector.guess(None, true);
    decode_with(bytes, enc)
}

fn extract_charset(content_type: &str) -> Option<String> {
    content_type
        .split(';')
        .filter_map(|part| {
            let (key, value) = part.trim().split_once('=')?;
            key.trim()
                .eq_ignore_ascii_case("charset")
                .then(|| value.trim_matches([' ', '"', '\''].as_ref()))
        })
        .next()
        .map(|s| s.to_string())
}

/// Reads `encoding="..."` from a leading `<?xml ...?>` declaration.
fn declared_encoding(bytes: &[u8]) -> Option<String> {
    let head = &bytes[..bytes.len().min(256)];
    let head = String::from_utf8_lossy(head);
    let decl = head.trim_start().strip_prefix("<?xml")?;
    let decl = &decl[..decl.find("?>")?];
    let rest = &decl[decl.find("encoding")? + "encoding".len()..];
    let rest = rest.trim_start().strip_prefix('=')?.trim_start();
    let quote = rest.chars().next().filter(|c| *c == '"' || *c == '\'')?;
    let value = &rest[1..];
    let end = value.find(quote)?;
    Some(value[..end].to_string())
}

fn decode_with(bytes: &[u8], enc: &'static Encoding) -> Result<DecodedXml, DecodeError> {
    let (text, had_errors) = enc.decode_without_bom_handling(bytes);
    if had_errors {
        return Err(DecodeError::DecodeFailure {
            encoding: enc.name().to_string(),
            message: "decoding error".into(),
        });
    }
    Ok(DecodedXml {
        text: text.into_owned(),
        encoding_label: enc.name().to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_declared_encoding() {
        let xml = br#"<?xml version="1.0" encoding='ISO-8859-1'?><a/>"#;
        assert_eq!(declared_encoding(xml).as_deref(), Some("ISO-8859-1"));
        assert_eq!(declared_encoding(b"<a/>"), None);
    }

    #[test]
    fn charset_parameter_is_case_insensitive() {
        assert_eq!(
            extract_charset("text/xml; Charset=\"utf-8\"").as_deref(),
            Some("utf-8")
        );
        assert_eq!(extract_charset("text/xml"), None);
    }
}
