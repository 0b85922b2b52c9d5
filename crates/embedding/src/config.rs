use serde::{Deserialize, Serialize};

/// Runtime configuration describing which embedding provider to call and how
/// to post-process vectors.
///
/// The cache-build path and the query path must share one `EmbedConfig`
/// instance: cosine scores are only meaningful between vectors from the same
/// model in the same vector space.
///
/// # Example
/// ```no_run
/// use embedding::{embed, EmbedConfig};
///
/// # async fn run() {
/// let cfg = EmbedConfig {
///     mode: "api".into(),
///     api_url: Some("https://router.huggingface.co/hf-inference/models/sentence-transformers/all-MiniLM-L6-v2/pipeline/feature-extraction".into()),
///     api_auth_header: Some("Bearer hf_xxx".into()),
///     api_provider: Some("hf".into()),
///     ..Default::default()
/// };
///
/// let _vector = embed("mind-bending sci-fi dream heist", &cfg).await;
/// # }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EmbedConfig {
    /// Provider selector: `"api"` (remote HTTP) or `"stub"` (deterministic
    /// offline vectors). Unknown values fall back to the stub.
    pub mode: String,
    /// Model label; sent to providers that select models per-request and
    /// recorded in the embedding cache for compatibility checks.
    pub model_name: String,
    /// Inference endpoint when [`mode`](Self::mode) is `"api"`.
    pub api_url: Option<String>,
    /// Authorization header value (e.g., `"Bearer hf_xxx"`).
    pub api_auth_header: Option<String>,
    /// Remote provider hint: `"hf"`, `"openai"`, or `"custom"` (default).
    pub api_provider: Option<String>,
    /// Overall API timeout in seconds.
    pub api_timeout_secs: Option<u64>,
    /// Expected output vector length. The stub emits vectors of exactly this
    /// length; in API mode, set it to the configured model's output length so
    /// downstream consumers can tell cached vectors from a differently-sized
    /// encoder apart.
    pub dimension: usize,
    /// Normalize vectors to unit length (recommended for cosine similarity).
    pub normalize: bool,
}

impl Default for EmbedConfig {
    fn default() -> Self {
        Self {
            mode: "stub".into(),
            model_name: "all-MiniLM-L6-v2".into(),
            api_url: None,
            api_auth_header: None,
            api_provider: None,
            api_timeout_secs: Some(30),
            dimension: 384,
            normalize: true,
        }
    }
}
