//! 情绪陪伴服务：AI 鼓励文案与语音播报。
//!
//! 远端调用失败时不向上传播错误：文案退回固定兜底语句，语音则静默。
//! 返回值会标明是否使用了兜底，调用方可以据此区分展示。

use std::str::FromStr;
use std::sync::Arc;

use log::{debug, warn};
use rand::seq::SliceRandom;

use crate::ai::audio::PcmAudio;
use crate::ai::traits::GenerativeClient;
use crate::error::DebtBreakerError;

pub const FALLBACK_ENCOURAGEMENT: &str = "每一步小小的努力，都是在为自由铺路。";

pub const MOTIVATIONAL_QUOTES: [&str; 10] = [
    "每一步小小的努力，都是在为自由铺路。",
    "债务终会清零，但你的意志将永存。",
    "黎明前的黑暗最深，但光芒终将到来。",
    "不再逃避的那一刻，你就已经赢了。",
    "优雅上岸，从心开始。",
    "今天的克制，是为了明天的阔绰。",
    "每一次还款，都是重获自由的仪式。",
    "不要看山有多高，看脚下的路有多坚实。",
    "即使在风暴中，也要保持内心的航向。",
    "你比你想象的更强大，更有韧性。",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mood {
    #[default]
    Peace,
    Ok,
    Anxious,
    Broken,
}

impl Mood {
    pub fn label(&self) -> &'static str {
        match self {
            Mood::Peace => "平静",
            Mood::Ok => "一般",
            Mood::Anxious => "焦虑",
            Mood::Broken => "崩溃",
        }
    }
}

impl FromStr for Mood {
    type Err = DebtBreakerError;

    fn from_str(tag: &str) -> Result<Self, Self::Err> {
        match tag.trim().to_lowercase().as_str() {
            "" | "peace" | "平静" => Ok(Mood::Peace),
            "ok" | "一般" => Ok(Mood::Ok),
            "anxious" | "焦虑" => Ok(Mood::Anxious),
            "broken" | "崩溃" => Ok(Mood::Broken),
            other => Err(DebtBreakerError::invalid_command(format!("unknown mood: {other}"))),
        }
    }
}

/// 文案生成结果
#[derive(Debug, Clone, PartialEq)]
pub enum Generated {
    Generated(String),
    Fallback(String),
}

impl Generated {
    pub fn text(&self) -> &str {
        match self {
            Generated::Generated(text) | Generated::Fallback(text) => text,
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, Generated::Fallback(_))
    }
}

/// 语音合成结果
#[derive(Debug, Clone, PartialEq)]
pub enum Speech {
    Audio(PcmAudio),
    Silent,
}

#[derive(Clone)]
pub struct Companion {
    client: Arc<dyn GenerativeClient>,
}

impl Companion {
    pub fn new(client: Arc<dyn GenerativeClient>) -> Self {
        Self { client }
    }

    pub async fn encourage(&self, mood: Mood) -> Generated {
        let prompt = format!(
            "作为一个温柔的债务咨询师和心理医生，给一个目前感到“{}”的正在努力还清债务的人写一句非常简短但充满力量的鼓励。不要超过30个字。",
            mood.label()
        );

        match self.client.generate(&prompt).await {
            Ok(text) => {
                debug!("Generated encouragement for mood {:?}", mood);
                Generated::Generated(text)
            }
            Err(e) => {
                warn!("AI generation failed, using fallback: {e}");
                Generated::Fallback(FALLBACK_ENCOURAGEMENT.to_string())
            }
        }
    }

    pub async fn speak(&self, text: &str) -> Speech {
        let prompt = format!("用温柔且坚定的语气朗读：{text}");

        let payload = match self.client.synthesize(&prompt).await {
            Ok(payload) => payload,
            Err(e) => {
                warn!("TTS failed: {e}");
                return Speech::Silent;
            }
        };

        match PcmAudio::from_base64(&payload) {
            Ok(audio) if !audio.is_empty() => {
                debug!("Decoded {:.1}s of speech", audio.duration_secs());
                Speech::Audio(audio)
            }
            Ok(_) => {
                warn!("TTS returned an empty payload");
                Speech::Silent
            }
            Err(e) => {
                warn!("TTS payload could not be decoded: {e}");
                Speech::Silent
            }
        }
    }

    pub fn random_quote() -> &'static str {
        MOTIVATIONAL_QUOTES
            .choose(&mut rand::thread_rng())
            .copied()
            .unwrap_or(FALLBACK_ENCOURAGEMENT)
    }
}
