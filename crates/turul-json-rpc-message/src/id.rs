//! Request identifier generation for outbound requests.

/// Generate an opaque request id.
///
/// The id is the lowercase hex MD5 digest of a random 64-bit integer.
/// Collisions within a process are extremely unlikely but the value is
/// not suitable for anything security sensitive.
pub fn generate_id() -> String {
    let seed = rand::random::<u64>();
    format!("{:x}", md5::compute(seed.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_generated_ids_are_hex_digests() {
        let id = generate_id();
        assert_eq!(id.len(), 32);
        assert!(id.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }

    #[test]
    fn test_generated_ids_do_not_collide() {
        let ids: HashSet<String> = (0..1_000).map(|_| generate_id()).collect();
        assert_eq!(ids.len(), 1_000);
    }
}
