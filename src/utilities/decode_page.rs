//! Page charset detection.
//!
//! Image references are read from the decoded text, so a page in Shift_JIS or
//! EUC-JP has to be transcoded before parsing or every non-ASCII `src`/`href`
//! turns into a different URL.

use std::sync::OnceLock;

use encoding_rs::{Encoding, UTF_8};
use regex::Regex;

static META_CHARSET_RE: OnceLock<Regex> = OnceLock::new();
static HTTP_EQUIV_CHARSET_RE: OnceLock<Regex> = OnceLock::new();

/// Declarations past this offset are not looked at.
const SNIFF_LEN: usize = 1024;

/// Picks the page encoding: `<meta charset>`, then `<meta http-equiv>`, then
/// the charset of the response `Content-Type`, then UTF-8.
pub fn detect_encoding(body: &[u8], header_charset: Option<&str>) -> &'static Encoding {
    let head = String::from_utf8_lossy(&body[..body.len().min(SNIFF_LEN)]);

    let meta_charset = META_CHARSET_RE.get_or_init(|| {
        Regex::new(r#"(?i)<meta[^>]+charset\s*=\s*["']?([^"'\s>;]+)"#).expect("meta charset pattern is valid")
    });
    let http_equiv_charset = HTTP_EQUIV_CHARSET_RE.get_or_init(|| {
        Regex::new(
            r#"(?i)<meta[^>]+http-equiv\s*=\s*["']?content-type["']?[^>]+content\s*=\s*["']?[^"'>]*;\s*charset\s*=\s*([^"'\s>;]+)"#,
        )
        .expect("http-equiv charset pattern is valid")
    });

    [meta_charset, http_equiv_charset]
        .into_iter()
        .filter_map(|re| re.captures(&head).and_then(|c| c.get(1)))
        .map(|label| label.as_str())
        .chain(header_charset)
        .find_map(|label| Encoding::for_label(label.trim().as_bytes()))
        .unwrap_or(UTF_8)
}

/// Decodes page bytes to text. Invalid sequences become U+FFFD.
pub fn decode_page(body: &[u8], header_charset: Option<&str>) -> String {
    let encoding = detect_encoding(body, header_charset);
    let (text, _, _) = encoding.decode(body);
    text.into_owned()
}

/// Reads the `charset` parameter of a `Content-Type` header value.
pub fn charset_from_content_type(content_type: &str) -> Option<String> {
    content_type
        .split(';')
        .skip(1)
        .filter_map(|param| param.split_once('='))
        .find(|(name, _)| name.trim().eq_ignore_ascii_case("charset"))
        .map(|(_, value)| value.trim().trim_matches('"').to_string())
        .filter(|value| !value.is_empty())
}
