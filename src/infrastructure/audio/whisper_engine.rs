//! Local Whisper transcription on CPU via candle.
//!
//! The engine holds one loaded model for the process lifetime. Decoding is
//! greedy, timestamps are never requested, and only the concatenated text
//! survives; segment metadata is dropped at this boundary.

use async_trait::async_trait;
use candle_core::{Device, Tensor};
use candle_nn::VarBuilder;
use candle_transformers::models::whisper::{self as m, Config};
use hf_hub::api::sync::Api;
use hf_hub::{Repo, RepoType};
use tokenizers::Tokenizer;
use tokio::sync::Mutex;

use crate::application::ports::{TranscriptionEngine, TranscriptionError};

use super::audio_decoder::decode_to_pcm;

const MEL_FILTERS_REPO: &str = "FL33TW00D-HF/whisper-base";
const MAX_DECODE_TOKENS: usize = 224;

/// Accepts either a bare accuracy tier ("base", "small", "medium", ...) or a
/// full Hugging Face repo id. Larger tiers are a drop-in configuration change.
pub fn resolve_model_repo(model: &str) -> String {
    if model.contains('/') {
        model.to_string()
    } else {
        format!("openai/whisper-{}", model)
    }
}

/// Mel filter banks ship as raw little-endian f32 files, one asset per bin
/// count. The large tiers use 128 bins; every other tier uses 80.
pub fn mel_filters_asset(num_mel_bins: usize) -> Result<&'static str, TranscriptionError> {
    match num_mel_bins {
        80 => Ok("melfilters.bytes"),
        128 => Ok("melfilters128.bytes"),
        other => Err(TranscriptionError::ModelLoadFailed(format!(
            "no mel filter asset for {} bins",
            other
        ))),
    }
}

pub struct WhisperEngine {
    model: Mutex<m::model::Whisper>,
    tokenizer: Tokenizer,
    config: Config,
    device: Device,
    mel_filters: Vec<f32>,
}

impl WhisperEngine {
    pub fn load(model: &str) -> Result<Self, TranscriptionError> {
        let device = Device::Cpu;
        let repo_id = resolve_model_repo(model);

        tracing::info!(model = %repo_id, "Loading Whisper model");

        let api = Api::new().map_err(load_err)?;
        let repo = api.repo(Repo::new(repo_id, RepoType::Model));

        let config_path = repo
            .get("config.json")
            .map_err(|e| TranscriptionError::ModelLoadFailed(format!("config.json: {}", e)))?;
        let tokenizer_path = repo
            .get("tokenizer.json")
            .map_err(|e| TranscriptionError::ModelLoadFailed(format!("tokenizer.json: {}", e)))?;
        let weights_path = repo.get("model.safetensors").map_err(|e| {
            TranscriptionError::ModelLoadFailed(format!("model.safetensors: {}", e))
        })?;

        let config: Config = serde_json::from_str(
            &std::fs::read_to_string(&config_path)
                .map_err(|e| TranscriptionError::ModelLoadFailed(format!("read config: {}", e)))?,
        )
        .map_err(|e| TranscriptionError::ModelLoadFailed(format!("parse config: {}", e)))?;

        let tokenizer = Tokenizer::from_file(&tokenizer_path)
            .map_err(|e| TranscriptionError::ModelLoadFailed(format!("tokenizer: {}", e)))?;

        let mel_filters = load_mel_filters(&api, &config)?;

        // SAFETY: safetensors files are memory-mapped read-only
        let vb = unsafe {
            VarBuilder::from_mmaped_safetensors(&[weights_path], m::DTYPE, &device)
                .map_err(|e| TranscriptionError::ModelLoadFailed(format!("weights: {}", e)))?
        };

        let model = m::model::Whisper::load(&vb, config.clone())
            .map_err(|e| TranscriptionError::ModelLoadFailed(format!("model: {}", e)))?;

        tracing::info!("Whisper model ready");

        Ok(Self {
            model: Mutex::new(model),
            tokenizer,
            config,
            device,
            mel_filters,
        })
    }

    fn mel_for_chunk(&self, chunk: &[f32]) -> Result<Tensor, TranscriptionError> {
        let samples = if chunk.len() < m::N_SAMPLES {
            let mut padded = chunk.to_vec();
            padded.resize(m::N_SAMPLES, 0.0);
            padded
        } else {
            chunk.to_vec()
        };

        let mel = m::audio::pcm_to_mel(&self.config, &samples, &self.mel_filters);
        let n_mel = self.config.num_mel_bins;
        let n_frames = mel.len() / n_mel;

        Tensor::from_vec(mel, (1, n_mel, n_frames), &self.device)
            .map_err(|e| TranscriptionError::TranscriptionFailed(format!("mel tensor: {}", e)))
    }
}

#[async_trait]
impl TranscriptionEngine for WhisperEngine {
    async fn transcribe(&self, audio_data: &[u8]) -> Result<String, TranscriptionError> {
        let pcm = decode_to_pcm(audio_data)?;

        let mut model = self.model.lock().await;
        let mut segments: Vec<String> = Vec::new();

        for (i, chunk) in pcm.chunks(m::N_SAMPLES).enumerate() {
            tracing::debug!(segment = i, "Transcribing audio segment");
            let mel = self.mel_for_chunk(chunk)?;
            let text = greedy_decode(&mut model, &self.tokenizer, &self.device, &mel)?;
            if !text.is_empty() {
                segments.push(text);
            }
        }

        let transcript = segments.join(" ");

        tracing::info!(
            segments = segments.len(),
            chars = transcript.len(),
            "Transcription completed"
        );

        Ok(transcript)
    }
}

fn greedy_decode(
    model: &mut m::model::Whisper,
    tokenizer: &Tokenizer,
    device: &Device,
    mel: &Tensor,
) -> Result<String, TranscriptionError> {
    let sot = token_id(tokenizer, m::SOT_TOKEN)?;
    let transcribe = token_id(tokenizer, m::TRANSCRIBE_TOKEN)?;
    let no_timestamps = token_id(tokenizer, m::NO_TIMESTAMPS_TOKEN)?;
    let eot = token_id(tokenizer, m::EOT_TOKEN)?;

    let audio_features = model
        .encoder
        .forward(mel, true)
        .map_err(|e| TranscriptionError::TranscriptionFailed(format!("encoder: {}", e)))?;

    let mut tokens = vec![sot, transcribe, no_timestamps];
    let prompt_len = tokens.len();
    let mut text = String::new();

    for _ in 0..MAX_DECODE_TOKENS {
        let input = Tensor::new(tokens.as_slice(), device)
            .and_then(|t| t.unsqueeze(0))
            .map_err(transcribe_err)?;

        let decoder_output = model
            .decoder
            .forward(&input, &audio_features, tokens.len() == prompt_len)
            .map_err(|e| TranscriptionError::TranscriptionFailed(format!("decoder: {}", e)))?;

        let logits = decoder_output
            .squeeze(0)
            .and_then(|t| model.decoder.final_linear(&t))
            .map_err(|e| TranscriptionError::TranscriptionFailed(format!("linear: {}", e)))?;

        let next = logits
            .dim(0)
            .and_then(|len| logits.get(len - 1))
            .and_then(|last| last.argmax(0))
            .and_then(|t| t.to_scalar::<u32>())
            .map_err(transcribe_err)?;

        if next == eot {
            break;
        }
        tokens.push(next);

        if let Some(piece) = tokenizer.id_to_token(next) {
            text.push_str(&piece.replace('Ġ', " ").replace('▁', " "));
        }
    }

    model.reset_kv_cache();

    Ok(text.trim().to_string())
}

fn token_id(tokenizer: &Tokenizer, token: &str) -> Result<u32, TranscriptionError> {
    tokenizer.token_to_id(token).ok_or_else(|| {
        TranscriptionError::TranscriptionFailed(format!("token not found: {}", token))
    })
}

fn load_mel_filters(api: &Api, config: &Config) -> Result<Vec<f32>, TranscriptionError> {
    let asset = mel_filters_asset(config.num_mel_bins)?;
    let repo = api.repo(Repo::new(MEL_FILTERS_REPO.to_string(), RepoType::Model));
    let path = repo
        .get(asset)
        .map_err(|e| TranscriptionError::ModelLoadFailed(format!("{}: {}", asset, e)))?;

    let bytes = std::fs::read(&path)
        .map_err(|e| TranscriptionError::ModelLoadFailed(format!("mel filters: {}", e)))?;

    let expected = config.num_mel_bins * (m::N_FFT / 2 + 1);
    if bytes.len() < expected * 4 {
        return Err(TranscriptionError::ModelLoadFailed(format!(
            "mel filters file too small: {} bytes, expected at least {}",
            bytes.len(),
            expected * 4
        )));
    }

    Ok(bytes
        .chunks_exact(4)
        .take(expected)
        .map(|b| f32::from_le_bytes([b[0], b[1], b[2], b[3]]))
        .collect())
}

fn load_err(e: impl std::fmt::Display) -> TranscriptionError {
    TranscriptionError::ModelLoadFailed(e.to_string())
}

fn transcribe_err(e: impl std::fmt::Display) -> TranscriptionError {
    TranscriptionError::TranscriptionFailed(e.to_string())
}
