use fxhash::hash64;

use crate::normalize::l2_normalize_in_place;
use crate::EmbedConfig;

/// Deterministic stub provider used in `"stub"` mode. Derives sinusoid
/// values from a hash of the input text, so identical text always maps to
/// the identical vector without touching the network. Not a semantic
/// embedding; useful for tests and degraded offline operation.
pub(crate) fn make_stub_vector(text: &str, cfg: &EmbedConfig) -> Vec<f32> {
    let h = hash64(text.as_bytes());
    let mut v = vec![0f32; cfg.dimension];
    for (idx, value) in v.iter_mut().enumerate() {
        let mixed =
            h.rotate_left((idx % 64) as u32) ^ (idx as u64).wrapping_mul(0x9E37_79B9_7F4A_7C15);
        *value = ((mixed >> 40) as f32 * 1e-3).sin();
    }
    if cfg.normalize {
        l2_normalize_in_place(&mut v);
    }
    v
}
