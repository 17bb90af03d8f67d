use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};

use crate::error::Result;

pub const SPEECH_SAMPLE_RATE: u32 = 24_000;
pub const SPEECH_CHANNELS: u16 = 1;

/// 16 位有符号小端 PCM 音频
#[derive(Debug, Clone, PartialEq)]
pub struct PcmAudio {
    pub sample_rate: u32,
    pub channels: u16,
    pub samples: Vec<i16>,
}

impl PcmAudio {
    /// 解码 base64 传输的语音数据；末尾不成对的字节被丢弃
    pub fn from_base64(data: &str) -> Result<Self> {
        let bytes = BASE64.decode(data.trim())?;
        Ok(Self::from_le_bytes(&bytes))
    }

    pub fn from_le_bytes(bytes: &[u8]) -> Self {
        let samples = bytes
            .chunks_exact(2)
            .map(|pair| i16::from_le_bytes([pair[0], pair[1]]))
            .collect();

        Self {
            sample_rate: SPEECH_SAMPLE_RATE,
            channels: SPEECH_CHANNELS,
            samples,
        }
    }

    /// 归一化到 [-1.0, 1.0)
    pub fn to_f32(&self) -> Vec<f32> {
        self.samples.iter().map(|&s| s as f32 / 32768.0).collect()
    }

    pub fn duration_secs(&self) -> f64 {
        if self.sample_rate == 0 || self.channels == 0 {
            return 0.0;
        }
        self.samples.len() as f64 / (self.sample_rate as f64 * self.channels as f64)
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// 封装为 RIFF/WAVE 容器，便于作为文件发送
    pub fn to_wav(&self) -> Vec<u8> {
        let bits_per_sample: u16 = 16;
        let block_align = self.channels * bits_per_sample / 8;
        let byte_rate = self.sample_rate * block_align as u32;
        let data_len = (self.samples.len() * 2) as u32;

        let mut wav = Vec::with_capacity(44 + data_len as usize);
        wav.extend_from_slice(b"RIFF");
        wav.extend_from_slice(&(36 + data_len).to_le_bytes());
        wav.extend_from_slice(b"WAVE");

        wav.extend_from_slice(b"fmt ");
        wav.extend_from_slice(&16u32.to_le_bytes());
        wav.extend_from_slice(&1u16.to_le_bytes()); // PCM
        wav.extend_from_slice(&self.channels.to_le_bytes());
        wav.extend_from_slice(&self.sample_rate.to_le_bytes());
        wav.extend_from_slice(&byte_rate.to_le_bytes());
        wav.extend_from_slice(&block_align.to_le_bytes());
        wav.extend_from_slice(&bits_per_sample.to_le_bytes());

        wav.extend_from_slice(b"data");
        wav.extend_from_slice(&data_len.to_le_bytes());
        for sample in &self.samples {
            wav.extend_from_slice(&sample.to_le_bytes());
        }
        wav
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_extremes() {
        let encoded = BASE64.encode([0x00, 0x80, 0xff, 0x7f]);
        let audio = PcmAudio::from_base64(&encoded).unwrap();
        assert_eq!(audio.samples, vec![-32768, 32767]);
        assert_eq!(audio.sample_rate, 24_000);
        assert_eq!(audio.channels, 1);

        let normalized = audio.to_f32();
        assert_eq!(normalized[0], -1.0);
        assert!(normalized[1] < 1.0 && normalized[1] > 0.999);
    }

    #[test]
    fn test_odd_trailing_byte_dropped() {
        let audio = PcmAudio::from_le_bytes(&[0x01, 0x00, 0x05]);
        assert_eq!(audio.samples, vec![1]);
    }

    #[test]
    fn test_invalid_base64() {
        assert!(PcmAudio::from_base64("not base64 !!").is_err());
    }

    #[test]
    fn test_wav_container() {
        let audio = PcmAudio::from_le_bytes(&vec![0u8; 48_000]);
        assert_eq!(audio.duration_secs(), 1.0);

        let wav = audio.to_wav();
        assert_eq!(wav.len(), 44 + 48_000);
        assert_eq!(&wav[0..4], b"RIFF");
        assert_eq!(&wav[8..12], b"WAVE");
        assert_eq!(u32::from_le_bytes([wav[24], wav[25], wav[26], wav[27]]), 24_000);
        assert_eq!(&wav[36..40], b"data");
    }
}
