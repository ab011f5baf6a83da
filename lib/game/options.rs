use derive_more::{Display, Error, From};
use serde::{Deserialize, Serialize};
use std::{fmt, path::PathBuf, str::FromStr};

#[cfg(test)]
use proptest::prelude::*;

/// Where games are read from and saved to.
#[derive(Debug, Clone, Eq, PartialEq, Hash, Deserialize, Serialize)]
#[cfg_attr(test, derive(test_strategy::Arbitrary))]
#[serde(deny_unknown_fields, rename = "options", default)]
pub struct Options {
    /// The directory scoresheets are saved to.
    #[cfg_attr(test, strategy("[a-z][a-z0-9_/]{0,15}".prop_map(PathBuf::from)))]
    pub games: PathBuf,

    /// The game record to replay.
    #[cfg_attr(test, strategy("[a-z][a-z0-9_]{0,11}\\.pgn".prop_map(PathBuf::from)))]
    pub replay: PathBuf,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            games: PathBuf::from("games"),
            replay: PathBuf::from("game.pgn"),
        }
    }
}

/// Prints the options in [RON](https://github.com/ron-rs/ron).
impl fmt::Display for Options {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = ron::ser::to_string(self).map_err(|_| fmt::Error)?;
        f.write_str(&s)
    }
}

/// The reason why parsing [`Options`] failed.
#[derive(Debug, Display, Eq, PartialEq, Error, From)]
#[display(fmt = "failed to parse game options")]
pub struct ParseOptionsError(ron::de::SpannedError);

impl FromStr for Options {
    type Err = ParseOptionsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(ron::de::from_str(s)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_strategy::proptest;

    #[test]
    fn options_deserializes_missing_fields_to_default() {
        assert_eq!("options()".parse(), Ok(Options::default()));
    }

    #[test]
    fn options_can_be_partially_specified() {
        assert_eq!(
            r#"options(games: "saved")"#.parse(),
            Ok(Options {
                games: PathBuf::from("saved"),
                ..Options::default()
            })
        );
    }

    #[test]
    fn parsing_options_with_unknown_fields_fails() {
        assert!(r#"options(clock: "5m")"#.parse::<Options>().is_err());
    }

    #[proptest]
    fn parsing_printed_options_is_an_identity(o: Options) {
        assert_eq!(o.to_string().parse(), Ok(o));
    }
}
