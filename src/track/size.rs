//! Track-size expressions: parsing, display, and conversion to taffy.
//!
//! A track is sized by one of the textual forms allowed in `columns`/`rows`:
//! `200px`, `12` (cells), `1fr`, `25%`, `auto`, `min-content`, `max-content`,
//! `fit-content(<length>)`, or `minmax(<track>, <track>)`.

use std::fmt;
use std::str::FromStr;

use taffy::style::{
    LengthPercentage, MaxTrackSizingFunction, MinTrackSizingFunction, TrackSizingFunction,
};
use taffy::style_helpers::{TaffyAuto, TaffyFitContent, TaffyMaxContent, TaffyMinContent};

use super::tokenizer::{split_dimension, tokenize, Lexeme, Token};
use crate::config::Axis;

// ---------------------------------------------------------------------------
// CellMetrics
// ---------------------------------------------------------------------------

/// How many CSS pixels one terminal cell stands for.
///
/// Pixel track sizes and breakpoint thresholds are authored in px; the grid is
/// laid out in cells.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellMetrics {
    pub cell_width_px: f32,
    pub cell_height_px: f32,
}

impl Default for CellMetrics {
    fn default() -> Self {
        Self {
            cell_width_px: 8.0,
            cell_height_px: 16.0,
        }
    }
}

impl CellMetrics {
    /// Convert a px length along `axis` to cells.
    pub fn px_to_cells(&self, px: f32, axis: Axis) -> f32 {
        let unit = match axis {
            Axis::Column => self.cell_width_px,
            Axis::Row => self.cell_height_px,
        };
        if unit <= 0.0 {
            px
        } else {
            px / unit
        }
    }

    /// Viewport width in px for a terminal `columns` wide.
    pub fn viewport_width_px(&self, columns: u16) -> u32 {
        (columns as f32 * self.cell_width_px).round() as u32
    }
}

// ---------------------------------------------------------------------------
// TrackParseError
// ---------------------------------------------------------------------------

/// Errors raised while parsing a track-size expression.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TrackParseError {
    #[error("empty track size")]
    Empty,
    #[error("unrecognized character at position {0}")]
    Lex(usize),
    #[error("unexpected `{found}` at position {position}")]
    UnexpectedToken { position: usize, found: String },
    #[error("unexpected end of track size")]
    UnexpectedEnd,
    #[error("unknown unit `{0}`")]
    UnknownUnit(String),
}

// ---------------------------------------------------------------------------
// TrackSize
// ---------------------------------------------------------------------------

/// A definite length used by `fit-content()`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Length {
    Px(f32),
    Cells(f32),
    Percent(f32),
}

/// A parsed track-size expression.
#[derive(Debug, Clone, PartialEq)]
pub enum TrackSize {
    Px(f32),
    Cells(f32),
    Fr(f32),
    Percent(f32),
    Auto,
    MinContent,
    MaxContent,
    FitContent(Length),
    MinMax(Box<TrackSize>, Box<TrackSize>),
}

impl TrackSize {
    /// The size a collapsed track is set to.
    pub const ZERO: TrackSize = TrackSize::Px(0.0);

    /// Parse an expression such as `minmax(100px, 1fr)`.
    pub fn parse(input: &str) -> Result<TrackSize, TrackParseError> {
        let lexemes = tokenize(input).map_err(TrackParseError::Lex)?;
        if lexemes.is_empty() {
            return Err(TrackParseError::Empty);
        }
        let mut parser = Parser { lexemes, pos: 0 };
        let track = parser.track()?;
        match parser.peek() {
            None => Ok(track),
            Some(extra) => Err(TrackParseError::UnexpectedToken {
                position: extra.position,
                found: extra.text.to_owned(),
            }),
        }
    }

    /// Parse, falling back to `auto` with a warning on malformed input.
    pub fn parse_lenient(input: &str) -> TrackSize {
        TrackSize::parse(input).unwrap_or_else(|err| {
            tracing::warn!(track = input, %err, "invalid track size, using auto");
            TrackSize::Auto
        })
    }

    /// Whether the track is a definite zero length.
    pub fn is_zero(&self) -> bool {
        matches!(self, TrackSize::Px(v) | TrackSize::Cells(v) if *v == 0.0)
    }

    /// Convert to a taffy track sizing function in cell units.
    pub fn to_taffy(&self, axis: Axis, metrics: &CellMetrics) -> TrackSizingFunction {
        TrackSizingFunction {
            min: self.min_function(axis, metrics),
            max: self.max_function(axis, metrics),
        }
    }

    fn min_function(&self, axis: Axis, metrics: &CellMetrics) -> MinTrackSizingFunction {
        match self {
            TrackSize::Px(v) => MinTrackSizingFunction::length(metrics.px_to_cells(*v, axis)),
            TrackSize::Cells(v) => MinTrackSizingFunction::length(*v),
            TrackSize::Percent(p) => MinTrackSizingFunction::percent(*p / 100.0),
            TrackSize::Fr(_) | TrackSize::Auto | TrackSize::FitContent(_) => {
                MinTrackSizingFunction::AUTO
            }
            TrackSize::MinContent => MinTrackSizingFunction::MIN_CONTENT,
            TrackSize::MaxContent => MinTrackSizingFunction::MAX_CONTENT,
            TrackSize::MinMax(min, _) => min.min_function(axis, metrics),
        }
    }

    fn max_function(&self, axis: Axis, metrics: &CellMetrics) -> MaxTrackSizingFunction {
        match self {
            TrackSize::Px(v) => MaxTrackSizingFunction::length(metrics.px_to_cells(*v, axis)),
            TrackSize::Cells(v) => MaxTrackSizingFunction::length(*v),
            TrackSize::Percent(p) => MaxTrackSizingFunction::percent(*p / 100.0),
            TrackSize::Fr(f) => MaxTrackSizingFunction::fr(*f),
            TrackSize::Auto => MaxTrackSizingFunction::AUTO,
            TrackSize::MinContent => MaxTrackSizingFunction::MIN_CONTENT,
            TrackSize::MaxContent => MaxTrackSizingFunction::MAX_CONTENT,
            TrackSize::FitContent(limit) => {
                let limit = match limit {
                    Length::Px(v) => LengthPercentage::length(metrics.px_to_cells(*v, axis)),
                    Length::Cells(v) => LengthPercentage::length(*v),
                    Length::Percent(p) => LengthPercentage::percent(*p / 100.0),
                };
                MaxTrackSizingFunction::fit_content(limit)
            }
            TrackSize::MinMax(_, max) => max.max_function(axis, metrics),
        }
    }
}

impl FromStr for TrackSize {
    type Err = TrackParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TrackSize::parse(s)
    }
}

/// Format a number without a trailing `.0` for whole values.
fn number(f: &mut fmt::Formatter<'_>, value: f32, unit: &str) -> fmt::Result {
    if value.fract() == 0.0 {
        write!(f, "{}{unit}", value as i64)
    } else {
        write!(f, "{value}{unit}")
    }
}

impl fmt::Display for Length {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Length::Px(v) => number(f, *v, "px"),
            Length::Cells(v) => number(f, *v, ""),
            Length::Percent(v) => number(f, *v, "%"),
        }
    }
}

impl fmt::Display for TrackSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TrackSize::Px(v) => number(f, *v, "px"),
            TrackSize::Cells(v) => number(f, *v, ""),
            TrackSize::Fr(v) => number(f, *v, "fr"),
            TrackSize::Percent(v) => number(f, *v, "%"),
            TrackSize::Auto => f.write_str("auto"),
            TrackSize::MinContent => f.write_str("min-content"),
            TrackSize::MaxContent => f.write_str("max-content"),
            TrackSize::FitContent(limit) => write!(f, "fit-content({limit})"),
            TrackSize::MinMax(min, max) => write!(f, "minmax({min}, {max})"),
        }
    }
}

// ---------------------------------------------------------------------------
// Parser
// ---------------------------------------------------------------------------

struct Parser<'a> {
    lexemes: Vec<Lexeme<'a>>,
    pos: usize,
}

impl<'a> Parser<'a> {
    fn peek(&self) -> Option<&Lexeme<'a>> {
        self.lexemes.get(self.pos)
    }

    fn next(&mut self) -> Result<Lexeme<'a>, TrackParseError> {
        let lexeme = self
            .lexemes
            .get(self.pos)
            .cloned()
            .ok_or(TrackParseError::UnexpectedEnd)?;
        self.pos += 1;
        Ok(lexeme)
    }

    fn expect(&mut self, token: Token) -> Result<(), TrackParseError> {
        let lexeme = self.next()?;
        if lexeme.token == token {
            Ok(())
        } else {
            Err(unexpected(&lexeme))
        }
    }

    fn track(&mut self) -> Result<TrackSize, TrackParseError> {
        let lexeme = self.next()?;
        match lexeme.token {
            Token::Dimension => dimension(&lexeme),
            Token::Number => Ok(TrackSize::Cells(parse_number(&lexeme, lexeme.text)?)),
            Token::Ident => match lexeme.text.to_ascii_lowercase().as_str() {
                "auto" => Ok(TrackSize::Auto),
                "min-content" => Ok(TrackSize::MinContent),
                "max-content" => Ok(TrackSize::MaxContent),
                "fit-content" => {
                    self.expect(Token::ParenOpen)?;
                    let limit = self.length()?;
                    self.expect(Token::ParenClose)?;
                    Ok(TrackSize::FitContent(limit))
                }
                "minmax" => {
                    self.expect(Token::ParenOpen)?;
                    let min = self.track()?;
                    self.expect(Token::Comma)?;
                    let max = self.track()?;
                    self.expect(Token::ParenClose)?;
                    Ok(TrackSize::MinMax(Box::new(min), Box::new(max)))
                }
                _ => Err(unexpected(&lexeme)),
            },
            _ => Err(unexpected(&lexeme)),
        }
    }

    fn length(&mut self) -> Result<Length, TrackParseError> {
        let lexeme = self.next()?;
        match (lexeme.token, dimension(&lexeme)) {
            (Token::Number, _) => Ok(Length::Cells(parse_number(&lexeme, lexeme.text)?)),
            (Token::Dimension, Ok(TrackSize::Px(v))) => Ok(Length::Px(v)),
            (Token::Dimension, Ok(TrackSize::Percent(v))) => Ok(Length::Percent(v)),
            _ => Err(unexpected(&lexeme)),
        }
    }
}

fn unexpected(lexeme: &Lexeme<'_>) -> TrackParseError {
    TrackParseError::UnexpectedToken {
        position: lexeme.position,
        found: lexeme.text.to_owned(),
    }
}

fn parse_number(lexeme: &Lexeme<'_>, text: &str) -> Result<f32, TrackParseError> {
    text.parse().map_err(|_| unexpected(lexeme))
}

fn dimension(lexeme: &Lexeme<'_>) -> Result<TrackSize, TrackParseError> {
    let (num, unit) = split_dimension(lexeme.text).ok_or_else(|| unexpected(lexeme))?;
    let value = parse_number(lexeme, num)?;
    match unit {
        "px" => Ok(TrackSize::Px(value)),
        "fr" => Ok(TrackSize::Fr(value)),
        "%" => Ok(TrackSize::Percent(value)),
        other => Err(TrackParseError::UnknownUnit(other.to_owned())),
    }
}
