//! Tunable options for the tactical layer, set by name like UCI `setoption`.

use tracing::{debug, warn};

use crate::quiet::QuietPromotions;
use crate::see::SeeValues;

/// Errors from [`TacticsConfig::set_option`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// No option with this name exists.
    #[error("unknown option: {name}")]
    UnknownOption { name: String },

    /// The value could not be parsed for this option.
    #[error("invalid value for {name}: \"{value}\"")]
    InvalidValue { name: &'static str, value: String },

    /// The value parsed but lies outside the allowed range.
    #[error("{name} must be between {min} and {max}, got {value}")]
    OutOfRange { name: &'static str, value: i32, min: i32, max: i32 },
}

/// Range accepted for the SEE piece values.
const VALUE_RANGE: (i32, i32) = (1, 5_000);

/// Configuration knobs for the tactical layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TacticsConfig {
    /// Whether checking quiet promotions are generated as quiet checks.
    pub quiet_promotions: QuietPromotions,
    /// Piece values used by the exchange evaluator.
    pub see_values: SeeValues,
}

impl TacticsConfig {
    /// Option names accepted by [`set_option`](Self::set_option).
    pub const OPTION_NAMES: [&'static str; 6] = [
        "QuietPromotions",
        "SeeValuePawn",
        "SeeValueKnight",
        "SeeValueBishop",
        "SeeValueRook",
        "SeeValueQueen",
    ];

    /// Set one option by name. Names are matched case-insensitively.
    pub fn set_option(&mut self, name: &str, value: &str) -> Result<(), ConfigError> {
        let result = self.apply_option(name, value.trim());
        match &result {
            Ok(()) => debug!(option = name, value, "tactics option set"),
            Err(e) => warn!(option = name, error = %e, "tactics option rejected"),
        }
        result
    }

    fn apply_option(&mut self, name: &str, value: &str) -> Result<(), ConfigError> {
        let Some(&canonical) = Self::OPTION_NAMES.iter().find(|n| n.eq_ignore_ascii_case(name)) else {
            return Err(ConfigError::UnknownOption { name: name.to_string() });
        };

        if canonical == "QuietPromotions" {
            self.quiet_promotions = match value.to_ascii_lowercase().as_str() {
                "true" => QuietPromotions::Include,
                "false" => QuietPromotions::Exclude,
                _ => return Err(ConfigError::InvalidValue { name: canonical, value: value.to_string() }),
            };
            return Ok(());
        }

        let parsed: i32 = value
            .parse()
            .map_err(|_| ConfigError::InvalidValue { name: canonical, value: value.to_string() })?;
        let (min, max) = VALUE_RANGE;
        if !(min..=max).contains(&parsed) {
            return Err(ConfigError::OutOfRange { name: canonical, value: parsed, min, max });
        }

        let values = &mut self.see_values;
        let slot = match canonical {
            "SeeValuePawn" => &mut values.pawn,
            "SeeValueKnight" => &mut values.knight,
            "SeeValueBishop" => &mut values.bishop,
            "SeeValueRook" => &mut values.rook,
            _ => &mut values.queen,
        };
        *slot = parsed;
        Ok(())
    }

    /// Apply a `name=value` pair, as given on a command line.
    pub fn set_pair(&mut self, pair: &str) -> Result<(), ConfigError> {
        let (name, value) = pair.split_once('=').unwrap_or((pair, ""));
        self.set_option(name.trim(), value)
    }
}
