//! Sentiment scoring
//!
//! The pipeline only needs something that turns review text into a
//! [`SentimentScore`]; [`SentimentScorer`] is that seam. [`LexiconScorer`] is the
//! default implementation: a valence lexicon with booster words, negation,
//! contrastive "but", `!` emphasis and ALL-CAPS emphasis, normalized into a
//! compound score in `[-1, 1]`.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

const NORMALIZATION_ALPHA: f64 = 15.0;
const NEGATION_SCALAR: f64 = -0.74;
const CAPS_INCREMENT: f64 = 0.733;
const EXCLAMATION_INCREMENT: f64 = 0.292;
const MAX_EXCLAMATIONS: usize = 4;
const BUT_BEFORE: f64 = 0.5;
const BUT_AFTER: f64 = 1.5;

/// Polarity of a piece of text. Only `compound` drives ranking; the
/// proportions are passed through to clients.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Default)]
pub struct SentimentScore {
    pub neg: f64,
    pub neu: f64,
    pub pos: f64,
    pub compound: f64,
}

pub trait SentimentScorer: Send + Sync {
    /// Must be deterministic for identical input.
    fn score(&self, text: &str) -> SentimentScore;
}

pub struct LexiconScorer {
    valences: HashMap<&'static str, f64>,
    boosters: HashMap<&'static str, f64>,
    negations: HashSet<&'static str>,
}

impl Default for LexiconScorer {
    fn default() -> Self {
        Self::new()
    }
}

impl LexiconScorer {
    pub fn new() -> Self {
        Self {
            valences: Self::build_valence_lexicon(),
            boosters: Self::build_booster_lexicon(),
            negations: Self::build_negation_lexicon(),
        }
    }

    fn build_valence_lexicon() -> HashMap<&'static str, f64> {
        [
            // Positive
            ("good", 1.9),
            ("great", 3.1),
            ("nice", 1.8),
            ("fine", 0.8),
            ("decent", 1.0),
            ("wonderful", 2.7),
            ("amazing", 2.8),
            ("awesome", 3.1),
            ("excellent", 2.7),
            ("fantastic", 2.6),
            ("outstanding", 3.0),
            ("perfect", 2.7),
            ("superb", 3.1),
            ("best", 3.2),
            ("better", 1.9),
            ("love", 3.2),
            ("loved", 2.9),
            ("lovely", 2.8),
            ("like", 1.5),
            ("liked", 1.8),
            ("enjoy", 2.2),
            ("enjoyed", 2.3),
            ("happy", 2.7),
            ("pleasant", 2.3),
            ("friendly", 2.2),
            ("helpful", 1.9),
            ("delicious", 2.7),
            ("tasty", 2.0),
            ("fresh", 1.3),
            ("clean", 1.7),
            ("recommend", 1.5),
            ("recommended", 1.6),
            ("comfortable", 1.5),
            ("welcoming", 1.9),
            ("beautiful", 2.9),
            ("fast", 0.9),
            ("quick", 0.9),
            ("satisfied", 1.8),
            ("glad", 2.0),
            ("thanks", 1.9),
            ("worth", 0.9),
            ("fun", 2.3),
            // Negative
            ("bad", -2.5),
            ("worse", -2.1),
            ("worst", -3.1),
            ("terrible", -2.1),
            ("horrible", -2.5),
            ("awful", -2.0),
            ("poor", -2.1),
            ("disappointing", -2.2),
            ("disappointed", -1.9),
            ("rude", -2.0),
            ("dirty", -1.9),
            ("disgusting", -2.4),
            ("gross", -2.1),
            ("hate", -2.7),
            ("hated", -3.2),
            ("slow", -0.8),
            ("cold", -0.6),
            ("bland", -1.1),
            ("stale", -1.5),
            ("expensive", -0.9),
            ("overpriced", -1.6),
            ("unfriendly", -1.9),
            ("unpleasant", -2.1),
            ("angry", -2.3),
            ("sad", -2.1),
            ("sick", -2.3),
            ("mediocre", -1.0),
            ("waste", -1.8),
            ("problem", -1.7),
            ("broken", -1.4),
            ("noisy", -0.9),
            ("wrong", -2.1),
            ("ugly", -2.3),
        ]
        .into_iter()
        .collect()
    }

    fn build_booster_lexicon() -> HashMap<&'static str, f64> {
        [
            ("absolutely", 0.293),
            ("completely", 0.293),
            ("extremely", 0.293),
            ("incredibly", 0.293),
            ("really", 0.293),
            ("so", 0.293),
            ("totally", 0.293),
            ("very", 0.293),
            ("super", 0.293),
            ("truly", 0.293),
            ("most", 0.293),
            ("barely", -0.293),
            ("hardly", -0.293),
            ("kinda", -0.293),
            ("marginally", -0.293),
            ("slightly", -0.293),
            ("somewhat", -0.293),
            ("occasionally", -0.293),
        ]
        .into_iter()
        .collect()
    }

    fn build_negation_lexicon() -> HashSet<&'static str> {
        [
            "not", "no", "never", "none", "nobody", "nothing", "neither", "nor", "nowhere",
            "cannot", "without", "aint", "dont", "didnt", "doesnt", "isnt", "wasnt", "wont",
        ]
        .into_iter()
        .collect()
    }

    fn is_negation(&self, word: &str) -> bool {
        self.negations.contains(word) || word.ends_with("n't")
    }

    fn valence_at(&self, tokens: &[&str], lowered: &[String], index: usize, caps_differential: bool) -> f64 {
        let Some(&base) = self.valences.get(lowered[index].as_str()) else {
            return 0.0;
        };

        let mut valence = base;
        if caps_differential && is_all_caps(tokens[index]) {
            valence += CAPS_INCREMENT * valence.signum();
        }

        for distance in 1..=3 {
            let Some(prior_index) = index.checked_sub(distance) else {
                break;
            };
            let prior = lowered[prior_index].as_str();

            if let Some(&boost) = self.boosters.get(prior) {
                let mut scalar = boost * valence.signum();
                if caps_differential && is_all_caps(tokens[prior_index]) {
                    scalar += CAPS_INCREMENT * scalar.signum();
                }
                scalar *= match distance {
                    1 => 1.0,
                    2 => 0.95,
                    _ => 0.9,
                };
                valence += scalar;
            }

            if self.is_negation(prior) {
                valence *= NEGATION_SCALAR;
            }
        }

        valence
    }
}

impl SentimentScorer for LexiconScorer {
    fn score(&self, text: &str) -> SentimentScore {
        let tokens: Vec<&str> = text
            .split_whitespace()
            .map(|token| token.trim_matches(|c: char| !c.is_alphanumeric() && c != '\''))
            .filter(|token| !token.is_empty())
            .collect();

        if tokens.is_empty() {
            return SentimentScore {
                neu: 1.0,
                ..SentimentScore::default()
            };
        }

        let lowered: Vec<String> = tokens.iter().map(|token| token.to_lowercase()).collect();
        let caps_differential = tokens.iter().any(|t| is_all_caps(t)) && !tokens.iter().all(|t| is_all_caps(t));

        let mut sentiments: Vec<f64> = (0..tokens.len())
            .map(|index| self.valence_at(&tokens, &lowered, index, caps_differential))
            .collect();

        // Contrastive "but": what follows outweighs what precedes.
        if let Some(but_index) = lowered.iter().position(|word| word == "but") {
            for (index, sentiment) in sentiments.iter_mut().enumerate() {
                if index < but_index {
                    *sentiment *= BUT_BEFORE;
                } else if index > but_index {
                    *sentiment *= BUT_AFTER;
                }
            }
        }

        let emphasis = text.matches('!').count().min(MAX_EXCLAMATIONS) as f64 * EXCLAMATION_INCREMENT;

        let mut total: f64 = sentiments.iter().sum();
        if total > 0.0 {
            total += emphasis;
        } else if total < 0.0 {
            total -= emphasis;
        }

        let mut pos_sum = 0.0;
        let mut neg_sum = 0.0;
        let mut neu_count = 0.0;
        for &sentiment in &sentiments {
            if sentiment > 0.0 {
                pos_sum += sentiment + 1.0;
            } else if sentiment < 0.0 {
                neg_sum += sentiment - 1.0;
            } else {
                neu_count += 1.0;
            }
        }
        if pos_sum > neg_sum.abs() {
            pos_sum += emphasis;
        } else if pos_sum < neg_sum.abs() {
            neg_sum -= emphasis;
        }

        let denominator = pos_sum + neg_sum.abs() + neu_count;

        SentimentScore {
            neg: round_to(neg_sum.abs() / denominator, 3),
            neu: round_to(neu_count / denominator, 3),
            pos: round_to(pos_sum / denominator, 3),
            compound: round_to(normalize(total), 4),
        }
    }
}

fn normalize(score: f64) -> f64 {
    (score / (score * score + NORMALIZATION_ALPHA).sqrt()).clamp(-1.0, 1.0)
}

fn is_all_caps(token: &str) -> bool {
    token.chars().any(char::is_alphabetic) && token.chars().all(|c| !c.is_lowercase())
}

fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    // `+ 0.0` turns a rounded -0.0 into 0.0
    (value * factor).round() / factor + 0.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn score(text: &str) -> SentimentScore {
        LexiconScorer::new().score(text)
    }

    #[test]
    fn positive_text_scores_positive() {
        let result = score("This is wonderful and amazing");
        assert!(result.compound > 0.5, "compound was {}", result.compound);
        assert!(result.pos > result.neg);
    }

    #[test]
    fn negative_text_scores_negative() {
        let result = score("Awful. The worst burger I have ever had.");
        assert!(result.compound < -0.5, "compound was {}", result.compound);
        assert!(result.neg > result.pos);
    }

    #[test]
    fn neutral_and_empty_text() {
        let result = score("The table is by the window");
        assert_eq!(result.compound, 0.0);
        assert_eq!(result.neu, 1.0);

        let empty = score("   ");
        assert_eq!(empty.compound, 0.0);
        assert_eq!(empty.neu, 1.0);
    }

    #[test]
    fn negation_flips_polarity() {
        assert!(score("good").compound > 0.0);
        assert!(score("not good").compound < 0.0);
        assert!(score("it isn't bad").compound > 0.0);
    }

    #[test]
    fn boosters_caps_and_exclamations_intensify() {
        let plain = score("The food was good").compound;
        assert!(score("The food was very good").compound > plain);
        assert!(score("The food was GOOD").compound > plain);
        assert!(score("The food was good!!").compound > plain);
        assert!(score("The food was slightly good").compound < plain);
    }

    #[test]
    fn clause_after_but_dominates() {
        assert!(score("The view was nice but the food was terrible").compound < 0.0);
        assert!(score("The wait was bad but the food was great").compound > 0.0);
    }

    #[test]
    fn compound_stays_in_range_and_is_deterministic() {
        let text = "GREAT GREAT GREAT best best best love love love amazing!!!!!";
        let first = score(text);
        assert!((-1.0..=1.0).contains(&first.compound));
        assert_eq!(first, score(text));

        let low = score("worst worst worst hate hate awful terrible horrible");
        assert!((-1.0..=1.0).contains(&low.compound));
    }

    #[test]
    fn cancelling_valences_give_unsigned_zero() {
        let result = score("good slow bland");
        assert_eq!(result.compound, 0.0);
        assert!(result.compound.is_sign_positive());
    }

    #[test]
    fn proportions_sum_to_one() {
        let result = score("Great food but the staff were rude and the room was noisy");
        let sum = result.neg + result.neu + result.pos;
        assert!((sum - 1.0).abs() < 0.01, "sum was {sum}");
    }
}
