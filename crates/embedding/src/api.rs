use std::time::Duration;

use once_cell::sync::Lazy;
use serde_json::{json, Value};

use crate::normalize::l2_normalize_in_place;
use crate::{EmbedConfig, EmbedError};

// Shared HTTP client with connection pooling. Per-request timeouts come from
// the config; this only caps connection establishment.
static HTTP_CLIENT: Lazy<reqwest::Client> = Lazy::new(|| {
    reqwest::Client::builder()
        .connect_timeout(Duration::from_secs(10))
        .pool_max_idle_per_host(8)
        .build()
        .expect("failed to build HTTP client")
});

#[derive(Clone, Copy)]
enum ApiProviderKind {
    HuggingFace,
    OpenAi,
    Custom,
}

fn api_provider_kind(cfg: &EmbedConfig) -> ApiProviderKind {
    let provider = cfg
        .api_provider
        .as_deref()
        .unwrap_or("custom")
        .to_ascii_lowercase();
    match provider.as_str() {
        "hf" | "huggingface" => ApiProviderKind::HuggingFace,
        "openai" | "gpt" => ApiProviderKind::OpenAi,
        _ => ApiProviderKind::Custom,
    }
}

/// Encode a batch of texts through the configured remote provider. One
/// request covers the whole batch; the response must contain exactly one
/// vector per input, in input order.
pub(crate) async fn embed_batch_via_api<T>(
    texts: &[T],
    cfg: &EmbedConfig,
) -> Result<Vec<Vec<f32>>, EmbedError>
where
    T: AsRef<str>,
{
    let url = cfg
        .api_url
        .as_deref()
        .ok_or_else(|| EmbedError::InvalidConfig("api_url is required for api mode".into()))?;

    let inputs: Vec<String> = texts.iter().map(|t| t.as_ref().to_owned()).collect();
    let payload = build_api_payload(api_provider_kind(cfg), &inputs, cfg);
    let response = send_api_request(url, cfg, payload).await?;
    let mut vectors = parse_embeddings_from_value(response)?;

    if vectors.len() != inputs.len() {
        return Err(EmbedError::Response(format!(
            "provider returned {} embeddings for {} inputs",
            vectors.len(),
            inputs.len()
        )));
    }

    if cfg.normalize {
        for vector in &mut vectors {
            l2_normalize_in_place(vector);
        }
    }

    Ok(vectors)
}

fn build_api_payload(provider: ApiProviderKind, texts: &[String], cfg: &EmbedConfig) -> Value {
    match provider {
        ApiProviderKind::HuggingFace => json!({ "inputs": texts }),
        ApiProviderKind::OpenAi => json!({ "input": texts, "model": cfg.model_name }),
        ApiProviderKind::Custom => json!({ "texts": texts }),
    }
}

async fn send_api_request(
    url: &str,
    cfg: &EmbedConfig,
    payload: Value,
) -> Result<Value, EmbedError> {
    let timeout = Duration::from_secs(cfg.api_timeout_secs.unwrap_or(30));
    let mut request = HTTP_CLIENT.post(url).timeout(timeout).json(&payload);
    if let Some(header) = cfg.api_auth_header.as_deref() {
        request = request.header("Authorization", header);
    }

    let response = request
        .send()
        .await
        .map_err(|e| EmbedError::Unavailable(e.to_string()))?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(EmbedError::Unavailable(format!(
            "provider answered {status}: {body}"
        )));
    }

    response
        .json::<Value>()
        .await
        .map_err(|e| EmbedError::Response(e.to_string()))
}

/// Accepts the response shapes the common providers produce: a bare array of
/// vectors (HF feature-extraction), `{"embeddings": [...]}` (custom
/// services), or `{"data": [{"embedding": [...]}]}` (OpenAI).
fn parse_embeddings_from_value(value: Value) -> Result<Vec<Vec<f32>>, EmbedError> {
    match value {
        Value::Object(mut map) => {
            if let Some(embeddings) = map.remove("embeddings") {
                return parse_embedding_collection(embeddings);
            }

            if let Some(Value::Array(items)) = map.remove("data") {
                let mut vectors = Vec::with_capacity(items.len());
                for item in items {
                    match item {
                        Value::Object(mut obj) => match obj.remove("embedding") {
                            Some(embedding) => vectors.push(parse_embedding_vector(embedding)?),
                            None => {
                                return Err(EmbedError::Response(
                                    "missing `embedding` field in data item".into(),
                                ))
                            }
                        },
                        _ => {
                            return Err(EmbedError::Response(
                                "unexpected entry inside `data` array".into(),
                            ))
                        }
                    }
                }
                return Ok(vectors);
            }

            Err(EmbedError::Response("unsupported response shape".into()))
        }
        other => parse_embedding_collection(other),
    }
}

fn parse_embedding_collection(value: Value) -> Result<Vec<Vec<f32>>, EmbedError> {
    match value {
        Value::Array(items) => {
            if items.is_empty() {
                Ok(Vec::new())
            } else if items.iter().all(|item| matches!(item, Value::Array(_))) {
                items.into_iter().map(parse_embedding_vector).collect()
            } else {
                // Single flat vector for a single input.
                parse_embedding_vector(Value::Array(items)).map(|vec| vec![vec])
            }
        }
        other => parse_embedding_vector(other).map(|vec| vec![vec]),
    }
}

fn parse_embedding_vector(value: Value) -> Result<Vec<f32>, EmbedError> {
    match value {
        Value::Array(values) => values
            .into_iter()
            .map(|entry| match entry {
                Value::Number(num) => num
                    .as_f64()
                    .map(|f| f as f32)
                    .ok_or_else(|| EmbedError::Response("non-finite embedding value".into())),
                other => Err(EmbedError::Response(format!(
                    "embedding entries must be numbers, got {other:?}"
                ))),
            })
            .collect(),
        other => Err(EmbedError::Response(format!(
            "embedding vector must be an array, got {other:?}"
        ))),
    }
}
