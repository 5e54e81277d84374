//! In-memory drawing read from, and written back to, a `.sheet` listing.
//!
//! ```text
//! # block 4
//! text "R/C" at (10, 20) height 2 layer "LOTS" handle "A1"
//! text "5c" at (30, 20, 0) height 2 rotation 1.5708
//! ```
//!
//! `x`, `y`, `height` are required; `z` and `rotation` default to 0, `layer`
//! to "0". Entities without a handle get one assigned (`N1`, `N2`, ...).

use std::collections::HashSet;
use std::fmt;

use glam::{DVec3, dvec3};
use miette::SourceSpan;
use pest::Parser;
use pest::iterators::Pair;

use crate::drawing::{Drawing, NewText, TextEntity};
use crate::errors::{DrawingError, SheetError, SourceContext};
use crate::types::{Angle, Height};
use crate::{Rule, SheetParser};

const DEFAULT_LAYER: &str = "0";

/// One line of a sheet
#[derive(Debug, Clone, PartialEq)]
pub struct SheetEntity {
    pub entity: TextEntity,
    /// Text style name, copied onto texts created from this one
    pub style: Option<String>,
}

/// A drawing held entirely in memory
#[derive(Debug, Clone, PartialEq)]
pub struct Sheet {
    name: String,
    entities: Vec<SheetEntity>,
    next_id: usize,
}

impl Sheet {
    pub fn new(name: impl Into<String>) -> Self {
        Sheet {
            name: name.into(),
            entities: Vec::new(),
            next_id: 0,
        }
    }

    /// Parse a sheet listing. `name` is used for diagnostics and as the
    /// drawing name.
    pub fn parse(name: impl Into<String>, source: &str) -> Result<Sheet, SheetError> {
        let ctx = SourceContext::new(name, source);
        let pairs = SheetParser::parse(Rule::sheet, source).map_err(|e| syntax_error(&ctx, e))?;

        let mut parsed = Vec::new();
        let mut seen = HashSet::new();
        for pair in pairs.flat_map(|sheet| sheet.into_inner()) {
            if pair.as_rule() != Rule::entity {
                continue;
            }
            let (entity, handle) = parse_entity(&ctx, pair)?;
            if let Some((handle, span)) = &handle {
                if !seen.insert(handle.clone()) {
                    return Err(SheetError::DuplicateHandle {
                        handle: handle.clone(),
                        src: ctx.named_source(),
                        span: *span,
                    });
                }
            }
            parsed.push((entity, handle.map(|(handle, _)| handle)));
        }

        let mut sheet = Sheet::new(ctx.name);
        for (mut entity, handle) in parsed {
            entity.entity.handle = match handle {
                Some(handle) => handle,
                None => sheet.fresh_handle(&seen),
            };
            seen.insert(entity.entity.handle.clone());
            sheet.entities.push(entity);
        }
        Ok(sheet)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn entities(&self) -> &[SheetEntity] {
        &self.entities
    }

    pub fn get(&self, handle: &str) -> Option<&SheetEntity> {
        self.entities.iter().find(|e| e.entity.handle == handle)
    }

    pub fn push(&mut self, entity: TextEntity, style: Option<String>) {
        self.entities.push(SheetEntity { entity, style });
    }

    fn get_mut(&mut self, handle: &str) -> Result<&mut SheetEntity, DrawingError> {
        self.entities
            .iter_mut()
            .find(|e| e.entity.handle == handle)
            .ok_or_else(|| unknown(handle))
    }

    /// Next `N<n>` handle not in `reserved` and not used by this sheet.
    fn fresh_handle(&mut self, reserved: &HashSet<String>) -> String {
        loop {
            self.next_id += 1;
            let handle = format!("N{}", self.next_id);
            if !reserved.contains(&handle) && self.get(&handle).is_none() {
                return handle;
            }
        }
    }
}

fn unknown(handle: &str) -> DrawingError {
    DrawingError::UnknownHandle {
        handle: handle.to_string(),
    }
}

impl Drawing for Sheet {
    fn name(&self) -> &str {
        &self.name
    }

    fn text_entities(&mut self) -> Result<Vec<TextEntity>, DrawingError> {
        Ok(self.entities.iter().map(|e| e.entity.clone()).collect())
    }

    fn set_text(&mut self, handle: &str, text: &str) -> Result<(), DrawingError> {
        self.get_mut(handle)?.entity.text = text.to_string();
        Ok(())
    }

    fn add_text(&mut self, template: &str, text: NewText) -> Result<String, DrawingError> {
        let style = self.get_mut(template)?.style.clone();
        let handle = self.fresh_handle(&HashSet::new());
        let entity = TextEntity {
            handle: handle.clone(),
            text: text.text,
            insertion: text.insertion,
            height: text.height,
            rotation: text.rotation,
            layer: text.layer,
        };
        self.push(entity, style);
        Ok(handle)
    }

    fn delete(&mut self, handle: &str) -> Result<(), DrawingError> {
        let index = self
            .entities
            .iter()
            .position(|e| e.entity.handle == handle)
            .ok_or_else(|| unknown(handle))?;
        self.entities.remove(index);
        Ok(())
    }
}

impl fmt::Display for Sheet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for SheetEntity { entity, style } in &self.entities {
            let p = entity.insertion;
            write!(
                f,
                "text \"{}\" at ({}, {}, {}) height {} rotation {} layer \"{}\"",
                entity.text, p.x, p.y, p.z, entity.height, entity.rotation, entity.layer
            )?;
            if let Some(style) = style {
                write!(f, " style \"{style}\"")?;
            }
            writeln!(f, " handle \"{}\"", entity.handle)?;
        }
        Ok(())
    }
}

// ============================================================================
// Parsing
// ============================================================================

fn span_of(pair: &Pair<Rule>) -> SourceSpan {
    let span = pair.as_span();
    SourceSpan::from((span.start(), span.end() - span.start()))
}

fn syntax_error(ctx: &SourceContext, err: pest::error::Error<Rule>) -> SheetError {
    let span = match err.location {
        pest::error::InputLocation::Pos(pos) => SourceSpan::from((pos, 0)),
        pest::error::InputLocation::Span((start, end)) => SourceSpan::from((start, end - start)),
    };
    SheetError::Syntax {
        message: err.variant.message().into_owned(),
        src: ctx.named_source(),
        span,
    }
}

fn invalid_number(ctx: &SourceContext, pair: &Pair<Rule>, message: String) -> SheetError {
    SheetError::InvalidNumber {
        message,
        src: ctx.named_source(),
        span: span_of(pair),
    }
}

fn parse_number(ctx: &SourceContext, pair: &Pair<Rule>) -> Result<f64, SheetError> {
    let value: f64 = pair
        .as_str()
        .parse()
        .map_err(|e| invalid_number(ctx, pair, format!("{e}")))?;
    if value.is_finite() {
        Ok(value)
    } else {
        Err(invalid_number(ctx, pair, "value is infinite".to_string()))
    }
}

/// The single `number` child of `height`/`rotation`
fn parse_child_number<'i>(
    ctx: &SourceContext,
    pair: Pair<'i, Rule>,
) -> Result<(f64, Pair<'i, Rule>), SheetError> {
    let span = span_of(&pair);
    let number = pair.into_inner().next().ok_or_else(|| SheetError::Syntax {
        message: "expected a number".to_string(),
        src: ctx.named_source(),
        span,
    })?;
    Ok((parse_number(ctx, &number)?, number))
}

/// Contents of a `string`, or of the `string` inside `layer`/`style`/`handle`
fn string_value(pair: Pair<Rule>) -> String {
    let string = if pair.as_rule() == Rule::string {
        Some(pair)
    } else {
        pair.into_inner().find(|p| p.as_rule() == Rule::string)
    };
    string
        .and_then(|string| string.into_inner().next())
        .map(|chars| chars.as_str().to_string())
        .unwrap_or_default()
}

fn parse_point(ctx: &SourceContext, pair: Pair<Rule>) -> Result<DVec3, SheetError> {
    let span = span_of(&pair);
    let coords = pair
        .into_inner()
        .map(|number| parse_number(ctx, &number))
        .collect::<Result<Vec<_>, _>>()?;
    let [x, y, rest @ ..] = coords.as_slice() else {
        return Err(SheetError::Syntax {
            message: "expected at least two coordinates".to_string(),
            src: ctx.named_source(),
            span,
        });
    };
    Ok(dvec3(*x, *y, rest.first().copied().unwrap_or(0.0)))
}

type ParsedEntity = (SheetEntity, Option<(String, SourceSpan)>);

fn parse_entity(ctx: &SourceContext, pair: Pair<Rule>) -> Result<ParsedEntity, SheetError> {
    let mut text = String::new();
    let mut insertion = DVec3::ZERO;
    let mut height = Height::default();
    let mut rotation = Angle::ZERO;
    let mut layer = DEFAULT_LAYER.to_string();
    let mut style = None;
    let mut handle = None;

    for inner in pair.into_inner() {
        match inner.as_rule() {
            Rule::string => text = string_value(inner),
            Rule::point => insertion = parse_point(ctx, inner)?,
            Rule::height => {
                let (value, number) = parse_child_number(ctx, inner)?;
                height = Height::try_new(value)
                    .map_err(|e| invalid_number(ctx, &number, format!("height {e}")))?;
            }
            Rule::rotation => {
                let (value, number) = parse_child_number(ctx, inner)?;
                rotation = Angle::try_radians(value)
                    .map_err(|e| invalid_number(ctx, &number, format!("rotation {e}")))?;
            }
            Rule::layer => layer = string_value(inner),
            Rule::style => style = Some(string_value(inner)),
            Rule::handle => {
                let span = span_of(&inner);
                handle = Some((string_value(inner), span));
            }
            _ => {}
        }
    }

    let entity = TextEntity {
        handle: String::new(),
        text,
        insertion,
        height,
        rotation,
        layer,
    };
    Ok((SheetEntity { entity, style }, handle))
}
