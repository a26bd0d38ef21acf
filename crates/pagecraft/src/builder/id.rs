//! Structural ids for configs that do not name one.

use sha2::{Digest, Sha256};

use crate::config::ComponentConfig;

/// Derives an id from the config's canonical JSON form.
///
/// The id is `prefix` followed by the first 16 bytes of the SHA-256 digest,
/// hex-encoded. Structurally equal configs get equal ids, across runs and
/// processes; that includes identical anonymous siblings.
///
/// ```rust
/// use pagecraft::{generate_id, ComponentConfig};
///
/// let config = ComponentConfig::component("TextWidget").with_prop("text", "hi");
/// let id = generate_id("ct-", &config);
/// assert!(id.starts_with("ct-"));
/// assert_eq!(id.len(), 3 + 32);
/// assert_eq!(id, generate_id("ct-", &config.clone()));
/// ```
pub fn generate_id(prefix: &str, config: &ComponentConfig) -> String {
    let digest = Sha256::digest(config.to_canonical_json().as_bytes());
    format!("{}{}", prefix, hex::encode(&digest[..16]))
}
