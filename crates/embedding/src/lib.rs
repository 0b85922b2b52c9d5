//! Text embedding provider boundary for mediarec.
//!
//! Turns catalog texts and user queries into dense vectors. The model itself
//! is an external capability: text in, fixed-length float vector out,
//! deterministic for a fixed model version. Two providers are wired in:
//!
//! - **API mode** — POST to a hosted inference endpoint (Hugging Face,
//!   OpenAI, or any custom service speaking a compatible JSON shape).
//! - **Stub mode** — deterministic hash-seeded vectors, no network. This is
//!   the test double for everything downstream and the default, so a fresh
//!   checkout works offline.
//!
//! Failed provider calls are not retried; callers decide whether a failure
//! is fatal. Vectors are L2-normalized by default since every consumer in
//! this workspace scores them with cosine similarity.
//!
//! ## Env vars to know
//!
//! - `MEDIAREC_API_URL` - inference endpoint consumed by the demo binary
//! - `MEDIAREC_API_TOKEN` - bearer token for that endpoint

mod api;
mod config;
mod error;
mod normalize;
mod stub;

pub use crate::config::EmbedConfig;
pub use crate::error::EmbedError;

use crate::api::embed_batch_via_api;
use crate::stub::make_stub_vector;

/// Encode one text into an embedding vector using the configured provider.
pub async fn embed(text: &str, cfg: &EmbedConfig) -> Result<Vec<f32>, EmbedError> {
    match cfg.mode.as_str() {
        "api" => {
            let texts = [text];
            let mut vectors = embed_batch_via_api(&texts, cfg).await?;
            vectors
                .pop()
                .ok_or_else(|| EmbedError::Response("provider returned no vectors".into()))
        }
        _ => Ok(make_stub_vector(text, cfg)),
    }
}

/// Batch variant of [`embed`]: one provider round-trip for the whole slice,
/// output order matching input order.
pub async fn embed_batch<T>(texts: &[T], cfg: &EmbedConfig) -> Result<Vec<Vec<f32>>, EmbedError>
where
    T: AsRef<str>,
{
    if texts.is_empty() {
        return Err(EmbedError::EmptyInput);
    }

    match cfg.mode.as_str() {
        "api" => embed_batch_via_api(texts, cfg).await,
        _ => Ok(texts
            .iter()
            .map(|text| make_stub_vector(text.as_ref(), cfg))
            .collect()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stub_cfg() -> EmbedConfig {
        EmbedConfig {
            dimension: 64,
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn embed_is_deterministic_in_stub_mode() {
        let cfg = stub_cfg();
        let a = embed("mind-bending sci-fi dream heist", &cfg).await.unwrap();
        let b = embed("mind-bending sci-fi dream heist", &cfg).await.unwrap();
        assert_eq!(a, b);
    }

    #[tokio::test]
    async fn embed_has_configured_dimension() {
        let cfg = stub_cfg();
        let v = embed("some text", &cfg).await.unwrap();
        assert_eq!(v.len(), 64);
    }

    #[tokio::test]
    async fn embed_normalizes_by_default() {
        let cfg = stub_cfg();
        let v = embed("some text", &cfg).await.unwrap();
        let norm: f32 = v.iter().map(|x| x * x).sum::<f32>().sqrt();
        assert!((norm - 1.0).abs() < 1e-4);
    }

    #[tokio::test]
    async fn embed_batch_preserves_order() {
        let cfg = stub_cfg();
        let texts = ["first", "second", "third"];
        let vectors = embed_batch(&texts, &cfg).await.unwrap();
        assert_eq!(vectors.len(), 3);
        for (text, vector) in texts.iter().zip(&vectors) {
            assert_eq!(*vector, embed(text, &cfg).await.unwrap());
        }
    }

    #[tokio::test]
    async fn embed_batch_rejects_empty_input() {
        let cfg = stub_cfg();
        let texts: [&str; 0] = [];
        let err = embed_batch(&texts, &cfg).await.unwrap_err();
        assert!(matches!(err, EmbedError::EmptyInput));
    }

    #[tokio::test]
    async fn unknown_mode_falls_back_to_stub() {
        let cfg = EmbedConfig {
            mode: "onnx".into(),
            dimension: 32,
            ..Default::default()
        };
        let v = embed("fallback", &cfg).await.unwrap();
        assert_eq!(v.len(), 32);
    }

    #[tokio::test]
    async fn different_texts_produce_different_vectors() {
        let cfg = stub_cfg();
        let a = embed("hello world", &cfg).await.unwrap();
        let b = embed("goodbye world", &cfg).await.unwrap();
        assert_ne!(a, b);
    }

    #[tokio::test]
    async fn api_mode_unreachable_endpoint_is_unavailable() {
        let cfg = EmbedConfig {
            mode: "api".into(),
            api_url: Some("http://127.0.0.1:1/embed".into()),
            api_timeout_secs: Some(1),
            ..Default::default()
        };
        let err = embed("text", &cfg).await.unwrap_err();
        assert!(matches!(err, EmbedError::Unavailable(_)));
    }
}
