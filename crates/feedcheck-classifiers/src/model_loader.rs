//! Candle-backed transformer classifiers loaded from the model registry

use crate::classifier::{ClassificationMetadata, ClassificationResult, Classifier};
use crate::model_config::{ArchitectureConfig, ModelConfig, ModelSource};
use async_trait::async_trait;
use candle_core::{DType, Device, IndexOp, Tensor, D};
use candle_nn::{Linear, Module, VarBuilder};
use candle_transformers::models::bert::{BertModel, Config as BertConfig};
use candle_transformers::models::distilbert::{Config as DistilBertConfig, DistilBertModel};
use feedcheck_core::{Error, Result};
use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;
use tokenizers::{Tokenizer, TruncationParams};

/// Load the classifier registered under `key`.
///
/// This blocks while weights are downloaded and memory-mapped; call it once
/// at startup.
pub fn load_model(key: &str, config: &ModelConfig) -> Result<Arc<dyn Classifier>> {
    let name = config.display_name(key).to_string();
    tracing::info!("Loading model '{}' ({})", key, name);

    let model_path = resolve_model_path(&config.source)?;
    let device = get_device(&config.inference.device)?;
    let mut tokenizer = load_tokenizer(&model_path)?;
    truncate_to(&mut tokenizer, config.inference.max_length)?;
    let labels = resolve_labels(&model_path, &config.architecture)?;
    let vb = load_var_builder(&model_path, &device)?;

    let backbone = match &config.architecture {
        ArchitectureConfig::BertSequenceClassification { .. } => {
            let bert_config: BertConfig = parse_json_config(&model_path.join("config.json"))?;
            let hidden_size = bert_config.hidden_size;
            let model = BertModel::load(vb.pp("bert"), &bert_config)
                .map_err(candle_err("Failed to load BERT model"))?;
            let pooler = candle_nn::linear(hidden_size, hidden_size, vb.pp("bert.pooler.dense"))
                .map_err(candle_err("Failed to load BERT pooler"))?;
            let classifier = candle_nn::linear(hidden_size, labels.len(), vb.pp("classifier"))
                .map_err(candle_err("Failed to load classification head"))?;
            Backbone::Bert {
                model,
                pooler,
                classifier,
            }
        }
        ArchitectureConfig::DistilBertSequenceClassification { .. } => {
            let config_json: serde_json::Value =
                parse_json_config(&model_path.join("config.json"))?;
            let hidden_size = config_json
                .get("dim")
                .or_else(|| config_json.get("hidden_size"))
                .and_then(|v| v.as_u64())
                .unwrap_or(768) as usize;
            let distil_config: DistilBertConfig = serde_json::from_value(config_json)?;
            let model = DistilBertModel::load(vb.pp("distilbert"), &distil_config)
                .map_err(candle_err("Failed to load DistilBERT model"))?;
            let pre_classifier =
                candle_nn::linear(hidden_size, hidden_size, vb.pp("pre_classifier"))
                    .map_err(candle_err("Failed to load pre_classifier"))?;
            let classifier = candle_nn::linear(hidden_size, labels.len(), vb.pp("classifier"))
                .map_err(candle_err("Failed to load classification head"))?;
            Backbone::DistilBert {
                model,
                pre_classifier,
                classifier,
            }
        }
    };

    tracing::info!(
        "Loaded model '{}' with {} labels: {:?}",
        name,
        labels.len(),
        labels
    );

    Ok(Arc::new(TransformerClassifier {
        name,
        tokenizer,
        backbone,
        device,
        labels,
    }))
}

fn candle_err(context: &'static str) -> impl Fn(candle_core::Error) -> Error {
    move |e| Error::classifier(format!("{}: {}", context, e))
}

fn resolve_model_path(source: &ModelSource) -> Result<PathBuf> {
    match source {
        ModelSource::Local { path } => {
            if !path.exists() {
                return Err(Error::model_unavailable(format!(
                    "Model path does not exist: {}",
                    path.display()
                )));
            }
            Ok(path.clone())
        }
        ModelSource::HuggingFace { repo, revision } => download_from_huggingface(repo, revision),
        ModelSource::Builtin { implementation } => Err(Error::model_unavailable(format!(
            "Builtin implementation '{}' has no transformer weights",
            implementation
        ))),
    }
}

fn download_from_huggingface(repo: &str, revision: &str) -> Result<PathBuf> {
    tracing::info!("Fetching model from HuggingFace: {}@{}", repo, revision);

    let api = hf_hub::api::sync::Api::new().map_err(|e| {
        Error::model_unavailable(format!("Failed to initialize HuggingFace API: {}", e))
    })?;
    let repo_obj = api.repo(hf_hub::Repo::with_revision(
        repo.to_string(),
        hf_hub::RepoType::Model,
        revision.to_string(),
    ));

    let config_path = repo_obj
        .get("config.json")
        .map_err(|e| Error::model_unavailable(format!("Failed to download config.json: {}", e)))?;

    if !["model.safetensors", "pytorch_model.bin"]
        .iter()
        .any(|file| repo_obj.get(file).is_ok())
    {
        return Err(Error::model_unavailable(
            "No model weights found (tried model.safetensors, pytorch_model.bin)",
        ));
    }

    let mut found_tokenizer = false;
    for file in ["tokenizer.json", "vocab.txt"] {
        match repo_obj.get(file) {
            Ok(_) => {
                tracing::debug!("Found tokenizer file: {}", file);
                found_tokenizer = true;
            }
            Err(_) => tracing::debug!("File not found: {}", file),
        }
    }
    if !found_tokenizer {
        return Err(Error::model_unavailable(
            "No tokenizer found (tried tokenizer.json, vocab.txt)",
        ));
    }

    let model_dir = config_path
        .parent()
        .ok_or_else(|| Error::model_unavailable("Invalid cache path"))?;

    tracing::info!("Model available at: {}", model_dir.display());
    Ok(model_dir.to_path_buf())
}

fn get_device(device_str: &str) -> Result<Device> {
    match device_str.to_lowercase().as_str() {
        "cuda" | "cuda:0" => {
            Device::new_cuda(0).map_err(|e| Error::config(format!("Failed to initialize CUDA: {}", e)))
        }
        "mps" | "metal" => Device::new_metal(0)
            .map_err(|e| Error::config(format!("Failed to initialize Metal: {}", e))),
        _ => Ok(Device::Cpu),
    }
}

fn parse_json_config<T: DeserializeOwned>(config_path: &Path) -> Result<T> {
    let config_str = std::fs::read_to_string(config_path).map_err(|e| {
        Error::classifier(format!("Failed to read config {}: {}", config_path.display(), e))
    })?;

    serde_json::from_str(&config_str).map_err(|e| {
        Error::classifier(format!("Failed to parse config {}: {}", config_path.display(), e))
    })
}

fn load_var_builder(model_path: &Path, device: &Device) -> Result<VarBuilder<'static>> {
    let safetensors = model_path.join("model.safetensors");
    if safetensors.exists() {
        // SAFETY: the weights file is treated as read-only for the lifetime of the process
        return unsafe {
            VarBuilder::from_mmaped_safetensors(&[safetensors], DType::F32, device)
                .map_err(candle_err("Failed to load weights"))
        };
    }

    let pytorch = model_path.join("pytorch_model.bin");
    if pytorch.exists() {
        return VarBuilder::from_pth(&pytorch, DType::F32, device)
            .map_err(candle_err("Failed to load PyTorch weights"));
    }

    Err(Error::model_unavailable(format!(
        "No weights found in {} (tried model.safetensors, pytorch_model.bin)",
        model_path.display()
    )))
}

fn load_tokenizer(model_path: &Path) -> Result<Tokenizer> {
    let tokenizer_json_path = model_path.join("tokenizer.json");
    if tokenizer_json_path.exists() {
        tracing::debug!("Loading tokenizer from tokenizer.json");
        return Tokenizer::from_file(&tokenizer_json_path)
            .map_err(|e| Error::classifier(format!("Failed to load tokenizer.json: {}", e)));
    }

    let vocab_path = model_path.join("vocab.txt");
    if vocab_path.exists() {
        tracing::debug!("Building tokenizer from vocab.txt");

        use tokenizers::models::wordpiece::WordPiece;
        use tokenizers::normalizers::BertNormalizer;
        use tokenizers::pre_tokenizers::bert::BertPreTokenizer;
        use tokenizers::processors::bert::BertProcessing;

        let wordpiece = WordPiece::from_file(vocab_path.to_string_lossy().as_ref())
            .unk_token("[UNK]".to_string())
            .build()
            .map_err(|e| Error::classifier(format!("Failed to build WordPiece model: {}", e)))?;

        let mut tokenizer = Tokenizer::new(wordpiece);
        tokenizer.with_normalizer(Some(BertNormalizer::default()));
        tokenizer.with_pre_tokenizer(Some(BertPreTokenizer));

        let sep_id = tokenizer.token_to_id("[SEP]").unwrap_or(102);
        let cls_id = tokenizer.token_to_id("[CLS]").unwrap_or(101);
        tokenizer.with_post_processor(Some(BertProcessing::new(
            ("[SEP]".to_string(), sep_id),
            ("[CLS]".to_string(), cls_id),
        )));

        return Ok(tokenizer);
    }

    Err(Error::model_unavailable(format!(
        "No tokenizer found in {} (tried tokenizer.json, vocab.txt)",
        model_path.display()
    )))
}

/// Cap encodings at `max_length` tokens, special tokens included
fn truncate_to(tokenizer: &mut Tokenizer, max_length: usize) -> Result<()> {
    tokenizer
        .with_truncation(Some(TruncationParams {
            max_length,
            ..Default::default()
        }))
        .map_err(|e| Error::config(format!("Invalid truncation length {}: {}", max_length, e)))?;
    Ok(())
}

/// Registry labels win; otherwise `id2label` from the model's config.json
fn resolve_labels(model_path: &Path, architecture: &ArchitectureConfig) -> Result<Vec<String>> {
    let num_labels = architecture.num_labels();
    let declared = architecture.labels();
    if !declared.is_empty() {
        if declared.len() != num_labels {
            return Err(Error::config(format!(
                "{} labels declared for a {}-label model",
                declared.len(),
                num_labels
            )));
        }
        return Ok(declared.to_vec());
    }

    let config: serde_json::Value = parse_json_config(&model_path.join("config.json"))?;
    let labels = labels_from_id2label(&config, num_labels);
    tracing::debug!("Labels read from config.json: {:?}", labels);
    Ok(labels)
}

fn labels_from_id2label(config: &serde_json::Value, num_labels: usize) -> Vec<String> {
    let id2label = config.get("id2label").and_then(|v| v.as_object());
    (0..num_labels)
        .map(|idx| {
            id2label
                .and_then(|map| map.get(&idx.to_string()))
                .and_then(|v| v.as_str())
                .map(str::to_string)
                .unwrap_or_else(|| format!("LABEL_{}", idx))
        })
        .collect()
}

enum Backbone {
    Bert {
        model: BertModel,
        pooler: Linear,
        classifier: Linear,
    },
    DistilBert {
        model: DistilBertModel,
        pre_classifier: Linear,
        classifier: Linear,
    },
}

struct TransformerClassifier {
    name: String,
    tokenizer: Tokenizer,
    backbone: Backbone,
    device: Device,
    labels: Vec<String>,
}

impl TransformerClassifier {
    fn logits(&self, text: &str) -> Result<Tensor> {
        let encoding = self
            .tokenizer
            .encode(text, true)
            .map_err(|e| Error::classifier(format!("Tokenization failed: {}", e)))?;

        match &self.backbone {
            Backbone::Bert {
                model,
                pooler,
                classifier,
            } => {
                let input_ids = Tensor::new(encoding.get_ids(), &self.device)
                    .and_then(|t| t.unsqueeze(0))
                    .map_err(candle_err("Failed to create input tensor"))?;
                let token_type_ids = Tensor::new(encoding.get_type_ids(), &self.device)
                    .and_then(|t| t.unsqueeze(0))
                    .map_err(candle_err("Failed to create token type tensor"))?;

                let hidden_states = model
                    .forward(&input_ids, &token_type_ids, None)
                    .map_err(candle_err("Model forward pass failed"))?;

                let cls = hidden_states
                    .i((.., 0))
                    .map_err(candle_err("Failed to get CLS token"))?;
                let pooled = pooler
                    .forward(&cls)
                    .and_then(|t| t.tanh())
                    .map_err(candle_err("Pooler failed"))?;

                classifier
                    .forward(&pooled)
                    .map_err(candle_err("Classification head failed"))
            }
            Backbone::DistilBert {
                model,
                pre_classifier,
                classifier,
            } => {
                let ids: Vec<i64> = encoding.get_ids().iter().map(|&x| x as i64).collect();
                let input_ids = Tensor::new(ids.as_slice(), &self.device)
                    .and_then(|t| t.unsqueeze(0))
                    .map_err(candle_err("Failed to create input tensor"))?;

                // DistilBERT masks positions flagged with 1
                let inverted: Vec<u8> = encoding
                    .get_attention_mask()
                    .iter()
                    .map(|&x| u8::from(x == 0))
                    .collect();
                let attention_mask = Tensor::new(inverted.as_slice(), &self.device)
                    .and_then(|t| t.unsqueeze(0))
                    .map_err(candle_err("Failed to create attention mask"))?;

                let hidden_states = model
                    .forward(&input_ids, &attention_mask)
                    .map_err(candle_err("Model forward pass failed"))?;

                let cls = hidden_states
                    .i((.., 0))
                    .map_err(candle_err("Failed to get CLS token"))?;
                let pooled = pre_classifier
                    .forward(&cls)
                    .and_then(|t| t.relu())
                    .map_err(candle_err("Pre-classifier failed"))?;

                classifier
                    .forward(&pooled)
                    .map_err(candle_err("Classification head failed"))
            }
        }
    }
}

#[async_trait]
impl Classifier for TransformerClassifier {
    async fn classify(&self, text: &str) -> Result<ClassificationResult> {
        let start = Instant::now();

        let logits = self.logits(text)?;
        let probs: Vec<f32> = candle_nn::ops::softmax(&logits, D::Minus1)
            .and_then(|t| t.squeeze(0))
            .and_then(|t| t.to_vec1())
            .map_err(candle_err("Softmax failed"))?;

        let (top_idx, top_prob) = probs
            .iter()
            .copied()
            .enumerate()
            .max_by(|(_, a), (_, b)| a.total_cmp(b))
            .ok_or_else(|| Error::classifier("Model produced no scores"))?;

        let label = self
            .labels
            .get(top_idx)
            .cloned()
            .unwrap_or_else(|| format!("LABEL_{}", top_idx));

        let all_scores = self
            .labels
            .iter()
            .cloned()
            .zip(probs.iter().copied())
            .collect();

        Ok(ClassificationResult {
            label,
            score: top_prob,
            metadata: ClassificationMetadata {
                model: Some(self.name.clone()),
                all_scores: Some(all_scores),
            },
            latency_us: start.elapsed().as_micros() as u64,
        })
    }

    fn name(&self) -> &str {
        &self.name
    }
}
