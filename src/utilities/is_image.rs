use std::sync::OnceLock;

use regex::Regex;

static IMAGE_RE: OnceLock<Regex> = OnceLock::new();

/// Returns true when the reference names a jpg, jpeg, png, bmp or gif file.
///
/// A trailing query string or fragment after the extension is accepted.
pub fn is_image(candidate: &str) -> bool {
    IMAGE_RE
        .get_or_init(|| {
            Regex::new(r"(?i)^.+\.(jpg|jpeg|png|bmp|gif)([?#].*)?$")
                .expect("image extension pattern is valid")
        })
        .is_match(candidate)
}
