mod ffmpeg_converter;

pub use ffmpeg_converter::{derived_audio_path, FfmpegConverter};
