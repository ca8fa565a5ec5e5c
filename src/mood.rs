//! Keyword-based mood classification.
//!
//! Maps free journal text to a [`Mood`] and a coarse [`Sentiment`] by scanning
//! a fixed, ordered keyword table. Matching is case-insensitive substring
//! containment: no tokenization and no negation handling, so "not happy"
//! still counts as happy.

use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The fixed set of mood labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mood {
    Joy,
    #[serde(alias = "sad")]
    Sadness,
    Fear,
    Anger,
    Stressed,
    Calm,
    Neutral,
    /// Only reachable through the book library, never produced by [`classify`].
    Radiant,
}

impl Mood {
    pub const ALL: [Mood; 8] = [
        Mood::Joy,
        Mood::Sadness,
        Mood::Fear,
        Mood::Anger,
        Mood::Stressed,
        Mood::Calm,
        Mood::Neutral,
        Mood::Radiant,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Mood::Joy => "joy",
            Mood::Sadness => "sadness",
            Mood::Fear => "fear",
            Mood::Anger => "anger",
            Mood::Stressed => "stressed",
            Mood::Calm => "calm",
            Mood::Neutral => "neutral",
            Mood::Radiant => "radiant",
        }
    }

    /// Moods that push the running score up instead of down.
    #[must_use]
    pub const fn is_uplifting(self) -> bool {
        matches!(self, Mood::Joy | Mood::Calm | Mood::Radiant)
    }
}

impl fmt::Display for Mood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Mood {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        let mood = match s.trim().to_lowercase().as_str() {
            "joy" => Mood::Joy,
            // The book library historically keys sadness under both labels.
            "sad" | "sadness" => Mood::Sadness,
            "fear" => Mood::Fear,
            "anger" => Mood::Anger,
            "stressed" => Mood::Stressed,
            "calm" => Mood::Calm,
            "neutral" => Mood::Neutral,
            "radiant" => Mood::Radiant,
            other => bail!("Unknown mood label `{other}`"),
        };
        Ok(mood)
    }
}

/// Coarse polarity of a journal entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Positive,
    Negative,
}

impl Sentiment {
    #[must_use]
    pub const fn from_score(score: i32) -> Self {
        if score >= 0 {
            Sentiment::Positive
        } else {
            Sentiment::Negative
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Sentiment::Positive => "positive",
            Sentiment::Negative => "negative",
        }
    }
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Ordered keyword table. Later rows win ties: the mood of the last matching
/// keyword in this order becomes the result.
pub const KEYWORD_TABLE: &[(Mood, &[&str])] = &[
    (Mood::Joy, &["happy", "joy", "excited", "great", "grateful", "delight"]),
    (Mood::Sadness, &["sad", "down", "alone", "lonely", "dull", "blue"]),
    (Mood::Fear, &["afraid", "fear", "nervous", "worried", "trembled", "scared"]),
    (Mood::Anger, &["angry", "mad", "irritated", "furious", "outrage"]),
    (Mood::Stressed, &["stress", "tired", "overwhelmed", "exhausted", "pressure"]),
    (Mood::Calm, &["calm", "peaceful", "quiet", "relaxed"]),
];

/// Checked only when no keyword matched.
pub const FALLBACK_SAD_PHRASES: &[&str] = &["not good", "bad", "sad", "tired", "alone"];

/// Result of classifying one piece of text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Classification {
    pub mood: Mood,
    pub sentiment: Sentiment,
    /// Signed keyword score: +1 per uplifting match, -1 per other match.
    pub score: i32,
    /// Every matched keyword, in table order.
    pub matched: Vec<&'static str>,
}

/// Confidence reported for a mood picked by the fallback rules.
pub const FALLBACK_CONFIDENCE: f64 = 0.5;

impl Classification {
    /// Share of the matched keywords that belong to the winning mood, in
    /// `0.0..=1.0`. Fallback results report [`FALLBACK_CONFIDENCE`].
    #[must_use]
    pub fn confidence(&self) -> f64 {
        let Some(&(_, keywords)) = KEYWORD_TABLE.iter().find(|(mood, _)| *mood == self.mood) else {
            return FALLBACK_CONFIDENCE;
        };
        if self.matched.is_empty() {
            return FALLBACK_CONFIDENCE;
        }
        let hits = self.matched.iter().filter(|k| keywords.contains(*k)).count();
        hits as f64 / self.matched.len() as f64
    }
}

/// Classify `text` into a mood and sentiment.
///
/// Walks [`KEYWORD_TABLE`] in order. Each keyword found in the lower-cased
/// text overwrites the "last seen" mood and moves the score. When nothing
/// matches, an exclamation mark means joy, a [`FALLBACK_SAD_PHRASES`] hit
/// means sadness, and anything else is neutral. Sentiment is positive when
/// the score is not below zero, so unmatched text is always positive.
///
/// # Examples
///
/// ```
/// use feelbuddy::mood::{classify, Mood, Sentiment};
///
/// let result = classify("I feel so sad and alone");
/// assert_eq!(result.mood, Mood::Sadness);
/// assert_eq!(result.sentiment, Sentiment::Negative);
/// ```
#[must_use]
pub fn classify(text: &str) -> Classification {
    let lowered = text.to_lowercase();
    let mut last_seen: Option<Mood> = None;
    let mut score = 0i32;
    let mut matched = Vec::new();

    for &(mood, keywords) in KEYWORD_TABLE {
        for &keyword in keywords {
            if lowered.contains(keyword) {
                last_seen = Some(mood);
                score += if mood.is_uplifting() { 1 } else { -1 };
                matched.push(keyword);
            }
        }
    }

    let mood = last_seen.unwrap_or_else(|| fallback_mood(&lowered));
    log::trace!("Classified text as `{mood}' with score {score} ({} matches)", matched.len());

    Classification {
        mood,
        sentiment: Sentiment::from_score(score),
        score,
        matched,
    }
}

fn fallback_mood(lowered: &str) -> Mood {
    if lowered.contains('!') {
        Mood::Joy
    } else if FALLBACK_SAD_PHRASES.iter().any(|phrase| lowered.contains(phrase)) {
        Mood::Sadness
    } else {
        Mood::Neutral
    }
}
