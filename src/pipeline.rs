//! Drawing pipeline: run every text entity through [`annotate`] and apply
//! the result.

use std::fmt;

use crate::annotate::{Annotation, SplitFallback, annotate};
use crate::drawing::{Drawing, NewText, TextEntity};
use crate::errors::{DrawingError, LabelError};
use crate::log::{debug, info, warn};
use crate::placement::place;
use crate::rules::Rules;
use crate::zoning::{Label, SplitResult};

/// Orchestration settings
#[derive(Debug, Clone, Default)]
pub struct Settings {
    pub rules: Rules,
    /// Analyse and log without modifying the drawing
    pub dry_run: bool,
    pub fallback: SplitFallback,
    /// Entities on these layers are skipped entirely
    pub ignore_layers: Vec<String>,
}

impl Settings {
    fn ignores(&self, layer: &str) -> bool {
        self.ignore_layers.iter().any(|ignored| ignored == layer)
    }
}

/// Tally of one pipeline run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Summary {
    pub processed: usize,
    pub split: usize,
    pub modified: usize,
    pub errors: usize,
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rule = "=".repeat(30);
        writeln!(f, "{rule}")?;
        writeln!(f, "SUMMARY")?;
        writeln!(f, "{rule}")?;
        writeln!(f, "Total processed:  {}", self.processed)?;
        writeln!(f, "Split (R/C):      {}", self.split)?;
        writeln!(f, "Modified (text):  {}", self.modified)?;
        writeln!(f, "Errors:           {}", self.errors)?;
        write!(f, "{rule}")
    }
}

/// What happened to one entity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Outcome {
    Split,
    Modified,
    Unchanged,
}

/// Annotate every text entity of `drawing`.
///
/// Failing to enumerate entities aborts the run. A failure on a single
/// entity is logged and counted, and the run moves on to the next one.
/// Unless `dry_run` is set, all edits are bracketed in one undo mark.
pub fn annotate_drawing<D: Drawing>(
    drawing: &mut D,
    settings: &Settings,
) -> Result<Summary, DrawingError> {
    info!(
        "annotating {} ({})",
        drawing.name(),
        if settings.dry_run { "dry run" } else { "live" }
    );

    if !settings.dry_run {
        drawing.begin_undo_mark();
    }
    let result = annotate_entities(drawing, settings);
    if !settings.dry_run {
        drawing.end_undo_mark();
    }

    let summary = result?;
    info!("\n{summary}");
    Ok(summary)
}

fn annotate_entities<D: Drawing>(
    drawing: &mut D,
    settings: &Settings,
) -> Result<Summary, DrawingError> {
    let entities = drawing.text_entities()?;
    info!("found {} text entities", entities.len());

    let mut summary = Summary::default();
    for entity in &entities {
        if settings.ignores(&entity.layer) {
            debug!("skipping {} on ignored layer {}", entity.handle, entity.layer);
            continue;
        }
        summary.processed += 1;

        match annotate_entity(drawing, entity, settings) {
            Ok(Outcome::Split) => summary.split += 1,
            Ok(Outcome::Modified) => summary.modified += 1,
            Ok(Outcome::Unchanged) => {}
            Err(err) => {
                warn!("error processing entity {}: {}", entity.handle, err);
                summary.errors += 1;
            }
        }
    }
    Ok(summary)
}

fn annotate_entity<D: Drawing>(
    drawing: &mut D,
    entity: &TextEntity,
    settings: &Settings,
) -> Result<Outcome, LabelError> {
    let Some(label) = Label::new(&entity.text) else {
        return Ok(Outcome::Unchanged);
    };

    let annotation = annotate(&label, &settings.rules, settings.fallback)?;
    if let Some(reason) = annotation.rejected_split() {
        debug!("not splitting {:?}: {}", entity.text, reason);
    }

    match annotation {
        Annotation::Split(split) => {
            info!(
                "splitting {:?} -> [{}, {}]",
                entity.text,
                split.first().label,
                split.second().label
            );
            if !settings.dry_run {
                apply_split(drawing, entity, &split)?;
            }
            Ok(Outcome::Split)
        }
        Annotation::Normalized { label: normalized, .. } => {
            if normalized.as_str() == label.as_str() {
                return Ok(Outcome::Unchanged);
            }
            info!(
                "normalized {:?} -> {:?} ({})",
                entity.text,
                normalized.as_str(),
                normalized.zoning()
            );
            if !settings.dry_run {
                drawing.set_text(&entity.handle, normalized.as_str())?;
            }
            Ok(Outcome::Modified)
        }
        Annotation::NoRule { .. } => Ok(Outcome::Unchanged),
    }
}

/// Replace `entity` by one new text per split part.
///
/// If any step fails, the texts added so far are removed again so the
/// source label is left as the only copy.
fn apply_split<D: Drawing>(
    drawing: &mut D,
    entity: &TextEntity,
    split: &SplitResult,
) -> Result<(), DrawingError> {
    let mut added = Vec::with_capacity(2);
    for part in split {
        let text = NewText {
            text: part.label.to_string(),
            insertion: place(entity.insertion, entity.height, entity.rotation, part.offset),
            height: entity.height,
            rotation: entity.rotation,
            layer: entity.layer.clone(),
        };
        match drawing.add_text(&entity.handle, text) {
            Ok(handle) => added.push(handle),
            Err(err) => {
                roll_back(drawing, &added);
                return Err(err);
            }
        }
    }
    drawing.delete(&entity.handle).inspect_err(|_| roll_back(drawing, &added))
}

fn roll_back<D: Drawing>(drawing: &mut D, added: &[String]) {
    for handle in added {
        if let Err(err) = drawing.delete(handle) {
            warn!("could not remove partial split text {}: {}", handle, err);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Angle, Height};
    use glam::dvec3;

    /// Records every call; fails `set_text` for handles listed in `broken`.
    #[derive(Default)]
    struct Recorder {
        entities: Vec<TextEntity>,
        broken: Vec<String>,
        /// 1-based index of the `add_text` call that fails
        fail_add: Option<usize>,
        adds: usize,
        fail_listing: bool,
        calls: Vec<String>,
    }

    impl Recorder {
        fn with(texts: &[&str]) -> Self {
            let entities = texts
                .iter()
                .enumerate()
                .map(|(i, text)| TextEntity {
                    handle: format!("H{i}"),
                    text: text.to_string(),
                    insertion: dvec3(i as f64, 0.0, 0.0),
                    height: Height::try_new(1.0).unwrap(),
                    rotation: Angle::ZERO,
                    layer: "LOTS".to_string(),
                })
                .collect();
            Recorder {
                entities,
                ..Default::default()
            }
        }
    }

    impl Drawing for Recorder {
        fn name(&self) -> &str {
            "recorder"
        }

        fn text_entities(&mut self) -> Result<Vec<TextEntity>, DrawingError> {
            if self.fail_listing {
                return Err(DrawingError::Backend {
                    message: "selection failed".to_string(),
                });
            }
            Ok(self.entities.clone())
        }

        fn set_text(&mut self, handle: &str, text: &str) -> Result<(), DrawingError> {
            if self.broken.iter().any(|b| b == handle) {
                return Err(DrawingError::UnknownHandle {
                    handle: handle.to_string(),
                });
            }
            self.calls.push(format!("set {handle} {text}"));
            Ok(())
        }

        fn add_text(&mut self, template: &str, text: NewText) -> Result<String, DrawingError> {
            self.adds += 1;
            if self.fail_add == Some(self.adds) {
                return Err(DrawingError::Backend {
                    message: "cannot create text".to_string(),
                });
            }
            self.calls.push(format!(
                "add {} at {} like {template}",
                text.text, text.insertion.x
            ));
            Ok(format!("N{}", self.calls.len()))
        }

        fn delete(&mut self, handle: &str) -> Result<(), DrawingError> {
            self.calls.push(format!("delete {handle}"));
            Ok(())
        }

        fn begin_undo_mark(&mut self) {
            self.calls.push("begin".to_string());
        }

        fn end_undo_mark(&mut self) {
            self.calls.push("end".to_string());
        }
    }

    #[test]
    fn applies_every_kind_of_annotation() {
        let mut drawing = Recorder::with(&["R/C", "r", "1C", "45", "7T"]);
        let summary = annotate_drawing(&mut drawing, &Settings::default()).unwrap();

        assert_eq!(
            summary,
            Summary {
                processed: 5,
                split: 1,
                modified: 2,
                errors: 0,
            }
        );
        assert_eq!(
            drawing.calls,
            [
                "begin",
                "add 1R at 0 like H0",
                "add 1C at 1.5 like H0",
                "delete H0",
                "set H1 1R",
                "set H4 1T",
                "end",
            ]
        );
    }

    #[test]
    fn dry_run_touches_nothing() {
        let mut drawing = Recorder::with(&["R/C", "r"]);
        let settings = Settings {
            dry_run: true,
            ..Settings::default()
        };
        let summary = annotate_drawing(&mut drawing, &settings).unwrap();

        assert_eq!(summary.split, 1);
        assert_eq!(summary.modified, 1);
        assert!(drawing.calls.is_empty());
    }

    #[test]
    fn entity_failures_are_counted_and_skipped() {
        let mut drawing = Recorder::with(&["r", "c"]);
        drawing.broken.push("H0".to_string());
        let summary = annotate_drawing(&mut drawing, &Settings::default()).unwrap();

        assert_eq!(summary.errors, 1);
        assert_eq!(summary.modified, 1);
        assert_eq!(drawing.calls, ["begin", "set H1 1C", "end"]);
    }

    #[test]
    fn failed_split_removes_texts_already_added() {
        let mut drawing = Recorder::with(&["R/C", "r"]);
        drawing.fail_add = Some(2);
        let summary = annotate_drawing(&mut drawing, &Settings::default()).unwrap();

        assert_eq!(
            summary,
            Summary {
                processed: 2,
                split: 0,
                modified: 1,
                errors: 1,
            }
        );
        assert_eq!(
            drawing.calls,
            [
                "begin",
                "add 1R at 0 like H0",
                "delete N2",
                "set H1 1R",
                "end",
            ]
        );
    }

    #[test]
    fn listing_failure_aborts_but_closes_undo_mark() {
        let mut drawing = Recorder::with(&["r"]);
        drawing.fail_listing = true;
        let err = annotate_drawing(&mut drawing, &Settings::default()).unwrap_err();

        assert!(matches!(err, DrawingError::Backend { .. }));
        assert_eq!(drawing.calls, ["begin", "end"]);
    }

    #[test]
    fn ignored_layers_are_not_processed() {
        let mut drawing = Recorder::with(&["r", "c"]);
        drawing.entities[1].layer = "0".to_string();
        let settings = Settings {
            ignore_layers: vec!["0".to_string()],
            ..Settings::default()
        };
        let summary = annotate_drawing(&mut drawing, &settings).unwrap();

        assert_eq!(summary.processed, 1);
        assert_eq!(drawing.calls, ["begin", "set H0 1R", "end"]);
    }

    #[test]
    fn blank_text_is_processed_but_unchanged() {
        let mut drawing = Recorder::with(&["   "]);
        let summary = annotate_drawing(&mut drawing, &Settings::default()).unwrap();
        assert_eq!(summary.processed, 1);
        assert_eq!(summary.modified, 0);
    }

    #[test]
    fn summary_report() {
        let summary = Summary {
            processed: 12,
            split: 3,
            modified: 4,
            errors: 1,
        };
        insta::assert_snapshot!(summary.to_string(), @r"
        ==============================
        SUMMARY
        ==============================
        Total processed:  12
        Split (R/C):      3
        Modified (text):  4
        Errors:           1
        ==============================
        ");
    }
}
