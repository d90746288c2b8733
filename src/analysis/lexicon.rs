//! Lexicon-based sentiment scorer.
//!
//! Valence rules follow VADER: word valences on a -4..4 scale, boosters and
//! dampeners on the preceding three tokens, negation, ALL-CAPS emphasis,
//! "but" contrast and `!`/`?` emphasis. The raw sum is normalized into the
//! compound score with `x / sqrt(x^2 + 15)`.

use std::collections::HashMap;

use super::{SentimentScore, SentimentScorer};

const BOOST_INCREMENT: f64 = 0.293;
const BOOST_DECREMENT: f64 = -0.293;
const CAPS_INCREMENT: f64 = 0.733;
const NEGATION_SCALAR: f64 = -0.74;
const NORMALIZATION_ALPHA: f64 = 15.0;
const EXCLAMATION_WEIGHT: f64 = 0.292;
const MAX_EXCLAMATIONS: usize = 4;
const QUESTION_WEIGHT: f64 = 0.18;
const MAX_QUESTION_EMPHASIS: f64 = 0.96;
const LOOKBACK: usize = 3;

const VALENCES: &[(&str, f64)] = &[
    // positive
    ("good", 1.9),
    ("great", 3.1),
    ("best", 3.2),
    ("better", 1.9),
    ("love", 3.2),
    ("loved", 2.9),
    ("loving", 2.9),
    ("like", 2.0),
    ("liked", 1.8),
    ("happy", 2.7),
    ("glad", 2.0),
    ("amazing", 2.8),
    ("awesome", 3.1),
    ("excellent", 2.7),
    ("wonderful", 2.7),
    ("fantastic", 2.6),
    ("incredible", 2.2),
    ("perfect", 2.7),
    ("nice", 1.8),
    ("cool", 1.3),
    ("fun", 2.3),
    ("funny", 1.9),
    ("beautiful", 2.9),
    ("brilliant", 2.8),
    ("win", 2.8),
    ("winning", 2.4),
    ("winner", 2.8),
    ("success", 2.7),
    ("successful", 2.8),
    ("thanks", 1.9),
    ("thank", 1.5),
    ("grateful", 2.0),
    ("excited", 1.4),
    ("exciting", 2.2),
    ("hope", 1.9),
    ("hopeful", 1.6),
    ("proud", 2.1),
    ("strong", 2.3),
    ("support", 1.7),
    ("fine", 0.8),
    ("ok", 0.9),
    ("okay", 0.9),
    ("yes", 1.7),
    ("wow", 2.8),
    ("lol", 2.9),
    ("haha", 2.0),
    ("enjoy", 2.2),
    ("enjoyed", 2.3),
    ("agree", 1.5),
    ("safe", 1.9),
    ("free", 2.3),
    ("gain", 2.4),
    ("gains", 1.9),
    ("profit", 1.9),
    ("bullish", 2.4),
    ("moon", 1.6),
    ("rally", 1.8),
    ("recovery", 1.4),
    ("growth", 1.6),
    ("congrats", 2.4),
    ("congratulations", 2.9),
    (":)", 2.0),
    (":-)", 2.0),
    (":d", 2.9),
    ("<3", 1.9),
    // negative
    ("bad", -2.5),
    ("worse", -2.1),
    ("worst", -3.1),
    ("hate", -2.7),
    ("hated", -3.2),
    ("sad", -2.1),
    ("angry", -2.3),
    ("awful", -2.0),
    ("terrible", -2.1),
    ("horrible", -2.5),
    ("disgusting", -2.4),
    ("disappointed", -1.9),
    ("disappointing", -2.2),
    ("poor", -2.1),
    ("ugly", -2.3),
    ("stupid", -2.4),
    ("boring", -1.3),
    ("annoying", -1.8),
    ("fail", -2.5),
    ("failed", -2.3),
    ("failure", -2.3),
    ("lose", -1.9),
    ("losing", -1.6),
    ("lost", -1.3),
    ("loss", -1.3),
    ("wrong", -2.1),
    ("problem", -1.7),
    ("problems", -1.7),
    ("broken", -2.1),
    ("sick", -2.3),
    ("pain", -2.3),
    ("hurt", -2.4),
    ("fear", -2.2),
    ("scared", -1.9),
    ("worried", -1.2),
    ("panic", -2.3),
    ("crash", -1.7),
    ("crisis", -3.1),
    ("disaster", -3.1),
    ("scam", -2.5),
    ("fraud", -2.8),
    ("dead", -3.3),
    ("kill", -3.7),
    ("war", -2.9),
    ("no", -1.2),
    ("never", -0.4),
    ("bearish", -2.4),
    ("dump", -1.6),
    ("risk", -1.1),
    ("sorry", -0.3),
    ("ugh", -1.8),
    (":(", -1.9),
    (":-(", -1.5),
];

const BOOSTERS: &[(&str, f64)] = &[
    ("absolutely", BOOST_INCREMENT),
    ("amazingly", BOOST_INCREMENT),
    ("completely", BOOST_INCREMENT),
    ("deeply", BOOST_INCREMENT),
    ("especially", BOOST_INCREMENT),
    ("extremely", BOOST_INCREMENT),
    ("highly", BOOST_INCREMENT),
    ("incredibly", BOOST_INCREMENT),
    ("most", BOOST_INCREMENT),
    ("really", BOOST_INCREMENT),
    ("so", BOOST_INCREMENT),
    ("super", BOOST_INCREMENT),
    ("totally", BOOST_INCREMENT),
    ("truly", BOOST_INCREMENT),
    ("very", BOOST_INCREMENT),
    ("barely", BOOST_DECREMENT),
    ("hardly", BOOST_DECREMENT),
    ("kinda", BOOST_DECREMENT),
    ("less", BOOST_DECREMENT),
    ("little", BOOST_DECREMENT),
    ("marginally", BOOST_DECREMENT),
    ("partly", BOOST_DECREMENT),
    ("scarcely", BOOST_DECREMENT),
    ("slightly", BOOST_DECREMENT),
    ("somewhat", BOOST_DECREMENT),
];

const NEGATIONS: &[&str] = &[
    "not", "no", "never", "neither", "nor", "none", "nobody", "nothing", "nowhere", "without",
    "cannot", "dont", "doesnt", "didnt", "cant", "wont", "wouldnt", "shouldnt", "couldnt",
    "isnt", "arent", "wasnt", "werent", "havent", "hasnt", "hadnt", "aint",
];

/// VADER-style scorer over a built-in word list.
#[derive(Debug, Clone)]
pub struct LexiconScorer {
    valences: HashMap<String, f64>,
    boosters: HashMap<String, f64>,
}

impl LexiconScorer {
    pub fn new() -> Self {
        Self {
            valences: VALENCES
                .iter()
                .map(|(word, valence)| (word.to_string(), *valence))
                .collect(),
            boosters: BOOSTERS
                .iter()
                .map(|(word, scalar)| (word.to_string(), *scalar))
                .collect(),
        }
    }

    /// Add or override a word valence (-4..4 scale).
    pub fn with_word(mut self, word: &str, valence: f64) -> Self {
        self.valences.insert(word.to_lowercase(), valence);
        self
    }

    /// Number of words with a valence.
    pub fn len(&self) -> usize {
        self.valences.len()
    }

    pub fn is_empty(&self) -> bool {
        self.valences.is_empty()
    }

    fn valence(&self, lower: &str) -> Option<f64> {
        self.valences.get(lower).copied()
    }

    /// Booster contribution of `token` to a word of the given valence.
    fn boost(&self, token: &str, lower: &str, valence: f64, caps_differ: bool) -> f64 {
        let Some(&base) = self.boosters.get(lower) else {
            return 0.0;
        };
        let mut scalar = if valence < 0.0 { -base } else { base };
        if caps_differ && is_shouted(token) {
            scalar += if valence > 0.0 {
                CAPS_INCREMENT
            } else {
                -CAPS_INCREMENT
            };
        }
        scalar
    }

    /// Valence of each token after local modifiers.
    fn token_valences(&self, tokens: &[&str]) -> Vec<f64> {
        let lowered: Vec<String> = tokens.iter().map(|t| t.to_lowercase()).collect();
        let caps_differ = caps_differ(tokens);

        let mut valences = Vec::with_capacity(tokens.len());
        for (i, token) in tokens.iter().enumerate() {
            let lower = lowered[i].as_str();
            if self.boosters.contains_key(lower) {
                valences.push(0.0);
                continue;
            }
            let Some(mut valence) = self.valence(lower) else {
                valences.push(0.0);
                continue;
            };

            if caps_differ && is_shouted(token) {
                valence += if valence > 0.0 {
                    CAPS_INCREMENT
                } else {
                    -CAPS_INCREMENT
                };
            }

            for distance in 1..=LOOKBACK.min(i) {
                let j = i - distance;
                let prior = lowered[j].as_str();
                if self.valence(prior).is_none() {
                    let damping = match distance {
                        1 => 1.0,
                        2 => 0.95,
                        _ => 0.9,
                    };
                    valence += self.boost(tokens[j], prior, valence, caps_differ) * damping;
                }
                if is_negation(prior) {
                    valence *= NEGATION_SCALAR;
                }
            }

            valences.push(valence);
        }

        apply_but_contrast(&lowered, &mut valences);
        valences
    }
}

impl Default for LexiconScorer {
    fn default() -> Self {
        Self::new()
    }
}

impl SentimentScorer for LexiconScorer {
    fn score(&self, text: &str) -> SentimentScore {
        let tokens = tokenize(text);
        let valences = self.token_valences(&tokens);
        if valences.is_empty() {
            return SentimentScore::default();
        }

        let emphasis = punctuation_emphasis(text);
        let mut total: f64 = valences.iter().sum();
        if total > 0.0 {
            total += emphasis;
        } else if total < 0.0 {
            total -= emphasis;
        }

        let (mut positive, mut negative, neutral) = split_valences(&valences);
        if positive > negative.abs() {
            positive += emphasis;
        } else if positive < negative.abs() {
            negative -= emphasis;
        }
        let denominator = positive + negative.abs() + neutral;

        SentimentScore {
            negative: round_to(negative.abs() / denominator, 3),
            neutral: round_to(neutral / denominator, 3),
            positive: round_to(positive / denominator, 3),
            compound: round_to(normalize(total), 4),
        }
    }
}

/// Whitespace tokens with surrounding punctuation removed, unless stripping
/// would leave two characters or fewer (keeps emoticons like `:)` intact).
fn tokenize(text: &str) -> Vec<&str> {
    text.split_whitespace()
        .map(|token| {
            let stripped = token.trim_matches(|c: char| c.is_ascii_punctuation());
            if stripped.chars().count() <= 2 {
                token
            } else {
                stripped
            }
        })
        .collect()
}

/// Has at least one letter and no lowercase letters.
fn is_shouted(token: &str) -> bool {
    token.chars().any(char::is_alphabetic) && !token.chars().any(char::is_lowercase)
}

/// True when some, but not all, tokens are shouted.
fn caps_differ(tokens: &[&str]) -> bool {
    let shouted = tokens.iter().filter(|t| is_shouted(t)).count();
    shouted > 0 && shouted < tokens.len()
}

fn is_negation(lower: &str) -> bool {
    NEGATIONS.contains(&lower) || lower.contains("n't")
}

/// Halve valences before "but" and strengthen those after it.
fn apply_but_contrast(lowered: &[String], valences: &mut [f64]) {
    let Some(pivot) = lowered.iter().position(|t| t == "but") else {
        return;
    };
    for (i, valence) in valences.iter_mut().enumerate() {
        if i < pivot {
            *valence *= 0.5;
        } else if i > pivot {
            *valence *= 1.5;
        }
    }
}

fn punctuation_emphasis(text: &str) -> f64 {
    let exclamations = text.matches('!').count().min(MAX_EXCLAMATIONS);
    let questions = text.matches('?').count();
    let question_emphasis = match questions {
        0 | 1 => 0.0,
        2..=3 => questions as f64 * QUESTION_WEIGHT,
        _ => MAX_QUESTION_EMPHASIS,
    };
    exclamations as f64 * EXCLAMATION_WEIGHT + question_emphasis
}

/// Shifted positive sum, shifted negative sum and neutral count.
fn split_valences(valences: &[f64]) -> (f64, f64, f64) {
    valences
        .iter()
        .fold((0.0, 0.0, 0.0), |(pos, neg, neu), &v| {
            if v > 0.0 {
                (pos + v + 1.0, neg, neu)
            } else if v < 0.0 {
                (pos, neg + v - 1.0, neu)
            } else {
                (pos, neg, neu + 1.0)
            }
        })
}

fn normalize(score: f64) -> f64 {
    (score / (score * score + NORMALIZATION_ALPHA).sqrt()).clamp(-1.0, 1.0)
}

fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}
