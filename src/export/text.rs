/// The plain-text artifact is the translation itself
pub fn to_bytes(translated: &str) -> Vec<u8> {
    translated.as_bytes().to_vec()
}
