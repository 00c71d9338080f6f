use std::fmt;
use std::num::IntErrorKind;

use crate::EncodeError;

const HEX_WIDTH: usize = 6;

/// A control parameter as handed over by the transformation layer: either
/// an integer already or the decimal text captured from the source.
///
/// Values are held as `i128`; decimal text outside that range is rejected
/// with [`EncodeError::ParameterOutOfRange`].
///
/// ```
/// # use rtfde_core::ControlParameter;
/// assert_eq!(ControlParameter::from(42u16).as_integer(), Ok(42));
/// assert_eq!(ControlParameter::from(" -7 ").as_integer(), Ok(-7));
/// assert!(ControlParameter::from("4x").as_integer().is_err());
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ControlParameter {
    /// An integral value.
    Integer(i128),
    /// Decimal digits, optionally signed and padded with whitespace.
    Text(String),
}

impl ControlParameter {
    /// Coerces the parameter into an integer.
    pub fn as_integer(&self) -> Result<i128, EncodeError> {
        match self {
            ControlParameter::Integer(value) => Ok(*value),
            ControlParameter::Text(text) => {
                text.trim().parse::<i128>().map_err(|err| match err.kind() {
                    IntErrorKind::PosOverflow | IntErrorKind::NegOverflow => {
                        EncodeError::ParameterOutOfRange { value: text.clone() }
                    }
                    _ => EncodeError::InvalidParameter { value: text.clone() },
                })
            }
        }
    }
}

impl fmt::Display for ControlParameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ControlParameter::Integer(value) => write!(f, "{value}"),
            ControlParameter::Text(text) => f.write_str(text),
        }
    }
}

macro_rules! integer_parameter {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for ControlParameter {
                fn from(value: $ty) -> Self {
                    ControlParameter::Integer(i128::from(value))
                }
            }
        )*
    };
}

integer_parameter!(i8, i16, i32, i64, u8, u16, u32, u64);

impl From<usize> for ControlParameter {
    fn from(value: usize) -> Self {
        u64::try_from(value).map_or_else(
            |_| ControlParameter::Text(value.to_string()),
            |value| ControlParameter::Integer(i128::from(value)),
        )
    }
}

impl From<&str> for ControlParameter {
    fn from(value: &str) -> Self {
        ControlParameter::Text(value.to_string())
    }
}

impl From<String> for ControlParameter {
    fn from(value: String) -> Self {
        ControlParameter::Text(value)
    }
}

/// Renders a control parameter as `0x`-prefixed, zero-padded, lower-case hex
/// with a minimum width of six characters.
///
/// ```
/// # use rtfde_core::encode_control_parameter;
/// assert_eq!(encode_control_parameter(10)?, "0x000a");
/// assert_eq!(encode_control_parameter("42")?, "0x002a");
/// assert_eq!(encode_control_parameter(-10)?, "-0x00a");
/// assert_eq!(encode_control_parameter(0x1_0000)?, "0x10000");
/// # Ok::<(), rtfde_core::EncodeError>(())
/// ```
pub fn encode_control_parameter<P>(parameter: P) -> Result<String, EncodeError>
where
    P: Into<ControlParameter>,
{
    let value = parameter.into().as_integer()?;
    let sign = if value < 0 { "-" } else { "" };
    let digits = format!("{:x}", value.unsigned_abs());
    let padding = HEX_WIDTH.saturating_sub(sign.len() + 2 + digits.len());
    Ok(format!("{sign}0x{}{digits}", "0".repeat(padding)))
}

/// Replaces literal backslashes and braces with their `\'hh` escapes.
///
/// The escapes themselves contain no braces, and their only backslash is
/// emitted after the scan has moved past the character it replaces, so no
/// output is ever escaped twice.
///
/// ```
/// # use rtfde_core::encode_escaped_control_chars;
/// assert_eq!(encode_escaped_control_chars(r"a\{b}"), r"a\'5c\'7bb\'7d");
/// assert_eq!(encode_escaped_control_chars("plain"), "plain");
/// ```
#[must_use]
pub fn encode_escaped_control_chars(raw_text: &str) -> String {
    let mut encoded = String::with_capacity(raw_text.len());
    for ch in raw_text.chars() {
        match ch {
            '\\' => encoded.push_str("\\'5c"),
            '{' => encoded.push_str("\\'7b"),
            '}' => encoded.push_str("\\'7d"),
            other => encoded.push(other),
        }
    }
    encoded
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn numeric_text_matches_integer() {
        assert_eq!(encode_control_parameter("42"), encode_control_parameter(42));
        assert_eq!(encode_control_parameter("+42"), encode_control_parameter(42u8));
    }

    #[test]
    fn rejects_non_integer_text() {
        for bad in ["", "4.2", "0x10", "forty"] {
            assert_eq!(
                encode_control_parameter(bad),
                Err(EncodeError::InvalidParameter { value: bad.to_string() }),
                "input {bad:?}"
            );
        }
    }

    #[test]
    fn error_names_offending_value() {
        let err = encode_control_parameter("fs").unwrap_err();
        assert_eq!(err.to_string(), "invalid control parameter: \"fs\" is not an integer");
    }

    #[test]
    fn oversized_text_is_out_of_range() {
        let huge = format!("1{}", "0".repeat(40));
        let err = encode_control_parameter(huge.as_str()).unwrap_err();
        assert_eq!(err, EncodeError::ParameterOutOfRange { value: huge.clone() });
        assert_eq!(
            err.to_string(),
            format!("control parameter {huge:?} does not fit in a 128-bit integer")
        );
        let negative = format!("-{huge}");
        assert_eq!(
            encode_control_parameter(negative.as_str()),
            Err(EncodeError::ParameterOutOfRange { value: negative.clone() })
        );
    }

    #[test]
    fn usize_values_are_encoded_in_full() {
        assert_eq!(ControlParameter::from(usize::MAX).as_integer(), Ok(usize::MAX as i128));
        assert_eq!(encode_control_parameter(10usize).unwrap(), "0x000a");
    }

    #[test]
    fn escapes_each_reserved_character_once() {
        let encoded = encode_escaped_control_chars("\\{}");
        assert_eq!(encoded, "\\'5c\\'7b\\'7d");
        assert_eq!(encoded.matches("\\'").count(), 3);
    }

    #[test]
    fn already_escaped_text_is_escaped_again_verbatim() {
        assert_eq!(encode_escaped_control_chars("\\'7b"), "\\'5c'7b");
    }

    proptest! {
        #[test]
        fn sixteen_bit_values_round_trip(n in 0u16..=u16::MAX) {
            let encoded = encode_control_parameter(n).unwrap();
            prop_assert_eq!(encoded.len(), 6);
            prop_assert!(encoded.starts_with("0x"));
            prop_assert_eq!(u16::from_str_radix(&encoded[2..], 16).unwrap(), n);
        }

        #[test]
        fn text_without_reserved_characters_is_unchanged(text in "[^\\\\{}]*") {
            prop_assert_eq!(encode_escaped_control_chars(&text), text);
        }

        #[test]
        fn output_has_no_literal_braces(text in ".*") {
            let encoded = encode_escaped_control_chars(&text);
            prop_assert!(!encoded.contains('{') && !encoded.contains('}'), "encoded contains a brace: {:?}", encoded);
        }
    }
}
