use md5::{Digest, Md5};

/// Stable word id: lowercase hex MD5 of the UTF-8 word text.
///
/// Ids key the persisted files, so they must stay identical across runs and releases.
pub fn word_id(word: &str) -> String {
    let mut hasher = Md5::new();
    hasher.update(word.as_bytes());
    hex::encode(hasher.finalize())
}
