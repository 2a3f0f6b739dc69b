use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// One of the four fixed mood categories.
///
/// The declaration order is significant: it is the order of the mood bar
/// buttons and the positional order of a distribution.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Mood {
    #[default]
    Happy,
    Sad,
    Angry,
    Surprised,
}

impl Mood {
    /// All moods in button / chart order.
    pub const ALL: [Mood; 4] = [Mood::Happy, Mood::Sad, Mood::Angry, Mood::Surprised];

    /// Identifier used in request paths and config files.
    pub fn slug(self) -> &'static str {
        match self {
            Mood::Happy => "happy",
            Mood::Sad => "sad",
            Mood::Angry => "angry",
            Mood::Surprised => "surprised",
        }
    }

    /// Capitalised label used for buttons and chart segments.
    pub fn label(self) -> &'static str {
        match self {
            Mood::Happy => "Happy",
            Mood::Sad => "Sad",
            Mood::Angry => "Angry",
            Mood::Surprised => "Surprised",
        }
    }

    pub fn emoji(self) -> &'static str {
        match self {
            Mood::Happy => "\u{1F60A}",
            Mood::Sad => "\u{1F622}",
            Mood::Angry => "\u{1F621}",
            Mood::Surprised => "\u{1F62E}",
        }
    }

    /// Segment colour as a `#RRGGBB` hex string.
    pub fn colour(self) -> &'static str {
        match self {
            Mood::Happy => "#FFD700",
            Mood::Sad => "#87CEFA",
            Mood::Angry => "#FF6347",
            Mood::Surprised => "#DA70D6",
        }
    }

    /// Position of this mood in [`Mood::ALL`].
    pub fn index(self) -> usize {
        match self {
            Mood::Happy => 0,
            Mood::Sad => 1,
            Mood::Angry => 2,
            Mood::Surprised => 3,
        }
    }

    /// The mood after this one, wrapping around.
    pub fn next(self) -> Mood {
        Mood::ALL[(self.index() + 1) % Mood::ALL.len()]
    }

    /// The mood before this one, wrapping around.
    pub fn prev(self) -> Mood {
        Mood::ALL[(self.index() + Mood::ALL.len() - 1) % Mood::ALL.len()]
    }

    /// Button caption, e.g. "😊 Happy".
    pub fn button_caption(self) -> String {
        format!("{} {}", self.emoji(), self.label())
    }
}

impl fmt::Display for Mood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

impl FromStr for Mood {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "happy" => Ok(Mood::Happy),
            "sad" => Ok(Mood::Sad),
            "angry" => Ok(Mood::Angry),
            "surprised" => Ok(Mood::Surprised),
            _ => Err(format!(
                "Unknown mood: {}. Valid options: happy, sad, angry, surprised",
                s
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_is_in_chart_label_order() {
        let labels: Vec<&str> = Mood::ALL.iter().map(|m| m.label()).collect();
        assert_eq!(labels, vec!["Happy", "Sad", "Angry", "Surprised"]);
    }

    #[test]
    fn index_matches_position_in_all() {
        for (i, mood) in Mood::ALL.iter().enumerate() {
            assert_eq!(mood.index(), i);
        }
    }

    #[test]
    fn next_and_prev_wrap_around() {
        assert_eq!(Mood::Surprised.next(), Mood::Happy);
        assert_eq!(Mood::Happy.prev(), Mood::Surprised);
        assert_eq!(Mood::Sad.next(), Mood::Angry);
        assert_eq!(Mood::Angry.prev(), Mood::Sad);
    }

    #[test]
    fn parse_is_case_insensitive() {
        assert_eq!("Angry".parse::<Mood>(), Ok(Mood::Angry));
        assert_eq!(" surprised ".parse::<Mood>(), Ok(Mood::Surprised));
        assert!("neutral".parse::<Mood>().is_err());
    }

    #[test]
    fn serde_uses_lowercase_slugs() {
        let yaml = serde_yaml::to_string(&Mood::Surprised).unwrap();
        assert_eq!(yaml.trim(), "surprised");
        let mood: Mood = serde_yaml::from_str("sad").unwrap();
        assert_eq!(mood, Mood::Sad);
    }

    #[test]
    fn button_caption_has_emoji_and_label() {
        assert_eq!(Mood::Happy.button_caption(), "\u{1F60A} Happy");
    }
}
