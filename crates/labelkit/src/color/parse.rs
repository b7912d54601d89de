//! CSS color string parsing.
//!
//! Built on the `cssparser` tokenizer, so whitespace, comments and escapes are
//! handled the way a browser would. Supported notations:
//!
//! | Notation | Examples |
//! |----------|----------|
//! | Hex | `#999`, `#d73a4a`, `#d73a4a80`, `#fff8` |
//! | `rgb()` / `rgba()` | `rgb(215, 58, 74)`, `rgba(215 58 74 / 50%)`, `rgb(100%, 0%, 0%)` |
//! | `hsl()` / `hsla()` | `hsl(354, 66%, 54%)`, `hsl(354deg 66% 54% / 0.5)` |
//! | Named | `rebeccapurple`, `Tomato`, `transparent` |

use cssparser::{BasicParseErrorKind, ParseError, ParseErrorKind, Parser, ParserInput, Token};

use super::model::{Hsl, Rgba};
use super::named;
use crate::error::InvalidColorError;

type ColorParseError<'i> = ParseError<'i, String>;

/// Parses a CSS color string into RGBA.
///
/// # Errors
///
/// Returns [`InvalidColorError`] when the input is not a single, complete color value.
///
/// ```rust
/// use labelkit::color::{parse_rgba, Rgba};
///
/// assert_eq!(parse_rgba("#999").unwrap(), Rgba::opaque(153, 153, 153));
/// assert_eq!(parse_rgba("hsl(0, 100%, 50%)").unwrap(), Rgba::opaque(255, 0, 0));
/// assert!(parse_rgba("not-a-color").is_err());
/// ```
pub fn parse_rgba(input: &str) -> Result<Rgba, InvalidColorError> {
    let mut parser_input = ParserInput::new(input);
    let mut parser = Parser::new(&mut parser_input);

    let parsed = parser.parse_entirely(parse_color);
    parsed.map_err(|err| InvalidColorError::new(input, describe(err)))
}

fn parse_color<'i>(input: &mut Parser<'i, '_>) -> Result<Rgba, ColorParseError<'i>> {
    let location = input.current_source_location();
    let token = input.next()?.clone();
    match token {
        Token::Hash(ref value) | Token::IDHash(ref value) => {
            parse_hex(value).ok_or_else(|| {
                location.new_custom_error(format!("invalid hex color '#{}'", &**value))
            })
        }
        Token::Ident(ref name) => {
            if name.eq_ignore_ascii_case("transparent") {
                return Ok(Rgba { r: 0, g: 0, b: 0, a: 0.0 });
            }
            named::lookup(name)
                .map(|[r, g, b]| Rgba::opaque(r, g, b))
                .ok_or_else(|| {
                    location.new_custom_error(format!("unknown color name '{}'", &**name))
                })
        }
        Token::Function(ref name) => {
            let name = name.to_ascii_lowercase();
            match name.as_str() {
                "rgb" | "rgba" => input.parse_nested_block(parse_rgb_function),
                "hsl" | "hsla" => input.parse_nested_block(parse_hsl_function),
                other => Err(location.new_custom_error(format!(
                    "unsupported color function '{}()'",
                    other
                ))),
            }
        }
        other => Err(location.new_unexpected_token_error(other)),
    }
}

fn parse_hex(digits: &str) -> Option<Rgba> {
    if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    let nibble = |i: usize| u8::from_str_radix(&digits[i..i + 1], 16).ok().map(|v| v * 17);
    let byte = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).ok();

    match digits.len() {
        3 => Some(Rgba::opaque(nibble(0)?, nibble(1)?, nibble(2)?)),
        4 => Some(Rgba {
            r: nibble(0)?,
            g: nibble(1)?,
            b: nibble(2)?,
            a: f64::from(nibble(3)?) / 255.0,
        }),
        6 => Some(Rgba::opaque(byte(0)?, byte(2)?, byte(4)?)),
        8 => Some(Rgba {
            r: byte(0)?,
            g: byte(2)?,
            b: byte(4)?,
            a: f64::from(byte(6)?) / 255.0,
        }),
        _ => None,
    }
}

/// Parses three components plus optional alpha, in either the legacy comma
/// form or the space-separated form with a `/` before the alpha.
fn parse_components<'i, T>(
    input: &mut Parser<'i, '_>,
    mut component: impl FnMut(usize, &mut Parser<'i, '_>) -> Result<T, ColorParseError<'i>>,
) -> Result<([T; 3], f64), ColorParseError<'i>> {
    let first = component(0, input)?;
    let legacy = input.try_parse(|i| i.expect_comma()).is_ok();

    let second = component(1, input)?;
    if legacy {
        input.expect_comma()?;
    }
    let third = component(2, input)?;

    let alpha_follows = if legacy {
        input.try_parse(|i| i.expect_comma()).is_ok()
    } else {
        input.try_parse(|i| i.expect_delim('/')).is_ok()
    };
    let alpha = if alpha_follows { parse_alpha(input)? } else { 1.0 };

    Ok(([first, second, third], alpha))
}

fn parse_rgb_function<'i>(input: &mut Parser<'i, '_>) -> Result<Rgba, ColorParseError<'i>> {
    let ([r, g, b], a) = parse_components(input, |_, i| parse_rgb_channel(i))?;
    Ok(Rgba { r, g, b, a })
}

fn parse_rgb_channel<'i>(input: &mut Parser<'i, '_>) -> Result<u8, ColorParseError<'i>> {
    let location = input.current_source_location();
    let value = match *input.next()? {
        Token::Number { value, .. } => f64::from(value),
        Token::Percentage { unit_value, .. } => f64::from(unit_value) * 255.0,
        ref other => return Err(location.new_unexpected_token_error(other.clone())),
    };
    Ok(value.clamp(0.0, 255.0).round() as u8)
}

fn parse_hsl_function<'i>(input: &mut Parser<'i, '_>) -> Result<Rgba, ColorParseError<'i>> {
    let ([h, s, l], a) = parse_components(input, |index, i| {
        if index == 0 {
            parse_hue(i)
        } else {
            parse_percentage(i)
        }
    })?;
    let (r, g, b) = Hsl::new(h, s, l).to_rgb();
    Ok(Rgba { r, g, b, a })
}

fn parse_hue<'i>(input: &mut Parser<'i, '_>) -> Result<f64, ColorParseError<'i>> {
    let location = input.current_source_location();
    match *input.next()? {
        Token::Number { value, .. } => Ok(f64::from(value)),
        Token::Dimension { value, ref unit, .. } => {
            let value = f64::from(value);
            match unit.to_ascii_lowercase().as_str() {
                "deg" => Ok(value),
                "grad" => Ok(value * 0.9),
                "rad" => Ok(value.to_degrees()),
                "turn" => Ok(value * 360.0),
                other => Err(location.new_custom_error(format!("unknown angle unit '{}'", other))),
            }
        }
        ref other => Err(location.new_unexpected_token_error(other.clone())),
    }
}

/// Saturation or lightness in percent. Bare numbers are accepted as percentages.
fn parse_percentage<'i>(input: &mut Parser<'i, '_>) -> Result<f64, ColorParseError<'i>> {
    let location = input.current_source_location();
    match *input.next()? {
        Token::Percentage { unit_value, .. } => Ok(f64::from(unit_value) * 100.0),
        Token::Number { value, .. } => Ok(f64::from(value)),
        ref other => Err(location.new_unexpected_token_error(other.clone())),
    }
}

fn parse_alpha<'i>(input: &mut Parser<'i, '_>) -> Result<f64, ColorParseError<'i>> {
    let location = input.current_source_location();
    let value = match *input.next()? {
        Token::Number { value, .. } => f64::from(value),
        Token::Percentage { unit_value, .. } => f64::from(unit_value),
        ref other => return Err(location.new_unexpected_token_error(other.clone())),
    };
    Ok(value.clamp(0.0, 1.0))
}

fn describe(err: ColorParseError<'_>) -> String {
    match err.kind {
        ParseErrorKind::Custom(message) => message,
        ParseErrorKind::Basic(BasicParseErrorKind::EndOfInput) => {
            "unexpected end of input".to_string()
        }
        ParseErrorKind::Basic(BasicParseErrorKind::UnexpectedToken(token)) => {
            format!("unexpected token {:?}", token)
        }
        ParseErrorKind::Basic(other) => format!("{:?}", other),
    }
}
