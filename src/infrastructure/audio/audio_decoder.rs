//! Turns an uploaded audio asset (mp3, wav, or m4a bytes) into the mono
//! 16 kHz f32 PCM stream Whisper consumes. Stereo lectures are averaged
//! down to one channel before resampling.

use std::io::Cursor;

use symphonia::core::audio::SampleBuffer;
use symphonia::core::codecs::DecoderOptions;
use symphonia::core::errors::Error as SymphoniaError;
use symphonia::core::formats::FormatOptions;
use symphonia::core::io::MediaSourceStream;
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;

use crate::application::ports::TranscriptionError;

pub const WHISPER_SAMPLE_RATE: u32 = 16_000;

pub fn decode_to_pcm(data: &[u8]) -> Result<Vec<f32>, TranscriptionError> {
    let (pcm, source_rate) = decode_samples(data)?;

    let pcm = if source_rate == WHISPER_SAMPLE_RATE {
        pcm
    } else {
        resample_to_whisper_rate(&pcm, source_rate)?
    };

    tracing::debug!(
        samples = pcm.len(),
        duration_secs = pcm.len() as f32 / WHISPER_SAMPLE_RATE as f32,
        "Audio ready for transcription"
    );

    Ok(pcm)
}

/// Decodes every packet of the default track into mono f32 samples at the
/// container's native rate.
fn decode_samples(data: &[u8]) -> Result<(Vec<f32>, u32), TranscriptionError> {
    let source = MediaSourceStream::new(Box::new(Cursor::new(data.to_vec())), Default::default());

    let probed = symphonia::default::get_probe()
        .format(
            &Hint::new(),
            source,
            &FormatOptions::default(),
            &MetadataOptions::default(),
        )
        .map_err(|e| decode_err("probe", e))?;

    let mut format = probed.format;

    let track = format
        .default_track()
        .ok_or_else(|| TranscriptionError::DecodingFailed("no audio track found".to_string()))?;
    let track_id = track.id;
    let codec_params = track.codec_params.clone();

    let source_rate = codec_params
        .sample_rate
        .ok_or_else(|| TranscriptionError::DecodingFailed("unknown sample rate".to_string()))?;
    let channels = codec_params.channels.map(|c| c.count()).unwrap_or(1);

    let mut decoder = symphonia::default::get_codecs()
        .make(&codec_params, &DecoderOptions::default())
        .map_err(|e| decode_err("codec", e))?;

    let mut pcm: Vec<f32> = Vec::new();

    loop {
        let packet = match format.next_packet() {
            Ok(p) => p,
            // End of stream surfaces as an unexpected EOF.
            Err(SymphoniaError::IoError(ref e))
                if e.kind() == std::io::ErrorKind::UnexpectedEof =>
            {
                break;
            }
            Err(e) => return Err(decode_err("packet", e)),
        };

        if packet.track_id() != track_id {
            continue;
        }

        let decoded = match decoder.decode(&packet) {
            Ok(d) => d,
            Err(SymphoniaError::DecodeError(e)) => {
                tracing::warn!(error = %e, "Skipping corrupt audio frame");
                continue;
            }
            Err(e) => return Err(decode_err("decode", e)),
        };

        let frames = decoded.frames();
        if frames == 0 {
            continue;
        }

        let mut buffer = SampleBuffer::<f32>::new(frames as u64, *decoded.spec());
        buffer.copy_interleaved_ref(decoded);

        downmix_into(&mut pcm, buffer.samples(), channels);
    }

    if pcm.is_empty() {
        return Err(TranscriptionError::DecodingFailed(
            "no audio samples decoded".to_string(),
        ));
    }

    Ok((pcm, source_rate))
}

fn downmix_into(pcm: &mut Vec<f32>, interleaved: &[f32], channels: usize) {
    if channels <= 1 {
        pcm.extend_from_slice(interleaved);
        return;
    }
    for frame in interleaved.chunks(channels) {
        pcm.push(frame.iter().sum::<f32>() / channels as f32);
    }
}

fn resample_to_whisper_rate(
    samples: &[f32],
    from_rate: u32,
) -> Result<Vec<f32>, TranscriptionError> {
    use rubato::{
        Resampler, SincFixedIn, SincInterpolationParameters, SincInterpolationType, WindowFunction,
    };

    let params = SincInterpolationParameters {
        sinc_len: 256,
        f_cutoff: 0.95,
        interpolation: SincInterpolationType::Linear,
        oversampling_factor: 256,
        window: WindowFunction::BlackmanHarris2,
    };

    let ratio = WHISPER_SAMPLE_RATE as f64 / from_rate as f64;
    let chunk_size = 1024;
    let expected_len = (samples.len() as f64 * ratio) as usize;

    let mut resampler = SincFixedIn::<f32>::new(ratio, 2.0, params, chunk_size, 1)
        .map_err(|e| decode_err("resampler init", e))?;

    let mut output = Vec::with_capacity(expected_len + chunk_size);

    for chunk in samples.chunks(chunk_size) {
        let input = if chunk.len() < chunk_size {
            let mut padded = chunk.to_vec();
            padded.resize(chunk_size, 0.0);
            padded
        } else {
            chunk.to_vec()
        };

        let processed = resampler
            .process(&[input], None)
            .map_err(|e| decode_err("resample", e))?;

        if let Some(channel) = processed.first() {
            output.extend_from_slice(channel);
        }
    }

    // The final padded chunk overshoots; trim to the expected length.
    output.truncate(expected_len);

    Ok(output)
}

fn decode_err(stage: &str, e: impl std::fmt::Display) -> TranscriptionError {
    TranscriptionError::DecodingFailed(format!("{}: {}", stage, e))
}
