//! ComposedDocument entity - a text artifact split into owned segments
//!
//! Fixed segments belong to the hand-written input and the scaffold
//! templates; region segments belong to the binding generator. The document
//! is only flattened to text when it is written, and re-split from text when
//! the generator hands it back.

use std::ops::Range;

use thiserror::Error;

use crate::domain::value_objects::RegionKind;

/// Marker protocol violations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ComposeError {
    /// Input text already contains a reserved tag
    #[error("{origin} already contains the reserved marker '{token}'")]
    ReservedMarker { token: String, origin: String },

    #[error("marker '{token}' not found")]
    MissingMarker { token: String },

    #[error("marker '{token}' appears {count} times, expected exactly once")]
    DuplicateMarker { token: String, count: usize },

    #[error("region '{kind}' closes before it opens")]
    MisorderedMarker { kind: RegionKind },

    #[error("region '{inner}' starts inside region '{outer}'")]
    NestedRegions { outer: RegionKind, inner: RegionKind },

    #[error("region '{kind}' already present in document")]
    DuplicateRegion { kind: RegionKind },
}

/// Byte ranges of one region inside a text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegionSpan {
    pub kind: RegionKind,
    /// The whole begin tag line, newline included
    pub begin_line: Range<usize>,
    /// Text strictly between the tag lines
    pub body: Range<usize>,
    /// The whole end tag line, newline included
    pub end_line: Range<usize>,
}

impl RegionSpan {
    /// Find the single region of `kind` in `text`.
    ///
    /// Depends only on `text` and `kind`, so locating several kinds gives
    /// the same spans whatever the order.
    pub fn locate(text: &str, kind: RegionKind) -> Result<Self, ComposeError> {
        let begin_line = tag_line(text, &kind.begin_tag())?;
        let end_line = tag_line(text, &kind.end_tag())?;

        if end_line.start < begin_line.end {
            return Err(ComposeError::MisorderedMarker { kind });
        }

        Ok(Self {
            kind,
            body: begin_line.end..end_line.start,
            begin_line,
            end_line,
        })
    }
}

/// Line range holding the only occurrence of `tag`
fn tag_line(text: &str, tag: &str) -> Result<Range<usize>, ComposeError> {
    let mut hits = text.match_indices(tag);
    let (pos, _) = hits.next().ok_or_else(|| ComposeError::MissingMarker {
        token: tag.to_string(),
    })?;

    let extra = hits.count();
    if extra > 0 {
        return Err(ComposeError::DuplicateMarker {
            token: tag.to_string(),
            count: extra + 1,
        });
    }

    let start = text[..pos].rfind('\n').map_or(0, |i| i + 1);
    let end = text[pos..].find('\n').map_or(text.len(), |i| pos + i + 1);
    Ok(start..end)
}

/// Reject text that would corrupt region boundaries once embedded.
pub fn ensure_unmarked(text: &str, origin: &str) -> Result<(), ComposeError> {
    for kind in RegionKind::ALL {
        for tag in [kind.begin_tag(), kind.end_tag()] {
            if text.contains(&tag) {
                return Err(ComposeError::ReservedMarker {
                    token: tag,
                    origin: origin.to_string(),
                });
            }
        }
    }
    Ok(())
}

/// One owned span of a document
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// Owned by the hand-written input or the scaffold
    Fixed(String),
    /// Owned by the generator
    Region { kind: RegionKind, body: String },
}

/// Ordered segments, serialized to text only at the filesystem boundary
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ComposedDocument {
    segments: Vec<Segment>,
}

impl ComposedDocument {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append fixed text, merging with a preceding fixed segment.
    pub fn push_fixed(&mut self, text: impl Into<String>) {
        let text = text.into();
        if text.is_empty() {
            return;
        }
        match self.segments.last_mut() {
            Some(Segment::Fixed(prev)) => prev.push_str(&text),
            _ => self.segments.push(Segment::Fixed(text)),
        }
    }

    /// Append a region. Each kind may appear only once.
    pub fn push_region(
        &mut self,
        kind: RegionKind,
        body: impl Into<String>,
    ) -> Result<(), ComposeError> {
        if self.region(kind).is_some() {
            return Err(ComposeError::DuplicateRegion { kind });
        }
        self.segments.push(Segment::Region {
            kind,
            body: body.into(),
        });
        Ok(())
    }

    /// Append a region together with its marker frame.
    pub fn push_framed_region(&mut self, kind: RegionKind) -> Result<(), ComposeError> {
        self.push_fixed(kind.frame_open());
        self.push_region(kind, String::new())?;
        self.push_fixed(kind.frame_close());
        Ok(())
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Body of the region of `kind`, if the document has one
    pub fn region(&self, kind: RegionKind) -> Option<&str> {
        self.segments.iter().find_map(|s| match s {
            Segment::Region { kind: k, body } if *k == kind => Some(body.as_str()),
            _ => None,
        })
    }

    /// Region kinds in document order
    pub fn region_kinds(&self) -> Vec<RegionKind> {
        self.segments
            .iter()
            .filter_map(|s| match s {
                Segment::Region { kind, .. } => Some(*kind),
                Segment::Fixed(_) => None,
            })
            .collect()
    }

    /// Replace the body of an existing region.
    pub fn replace_region(
        &mut self,
        kind: RegionKind,
        new_body: impl Into<String>,
    ) -> Result<(), ComposeError> {
        let slot = self.segments.iter_mut().find_map(|s| match s {
            Segment::Region { kind: k, body } if *k == kind => Some(body),
            _ => None,
        });
        match slot {
            Some(body) => {
                *body = new_body.into();
                Ok(())
            }
            None => Err(ComposeError::MissingMarker {
                token: kind.begin_tag(),
            }),
        }
    }

    /// Fixed segments in order
    pub fn fixed_segments(&self) -> Vec<&str> {
        self.segments
            .iter()
            .filter_map(|s| match s {
                Segment::Fixed(text) => Some(text.as_str()),
                Segment::Region { .. } => None,
            })
            .collect()
    }

    /// All non-marked content concatenated
    pub fn fixed_text(&self) -> String {
        self.fixed_segments().concat()
    }

    /// Flatten to the on-disk text.
    pub fn render(&self) -> String {
        let mut out = String::new();
        for segment in &self.segments {
            match segment {
                Segment::Fixed(text) => out.push_str(text),
                Segment::Region { body, .. } => out.push_str(body),
            }
        }
        out
    }

    /// Split `text` back into segments, expecting exactly the given regions.
    pub fn parse(text: &str, kinds: &[RegionKind]) -> Result<Self, ComposeError> {
        let mut spans = Vec::with_capacity(kinds.len());
        for &kind in kinds {
            if spans.iter().any(|s: &RegionSpan| s.kind == kind) {
                continue;
            }
            spans.push(RegionSpan::locate(text, kind)?);
        }
        spans.sort_by_key(|s| s.begin_line.start);

        for pair in spans.windows(2) {
            if pair[1].begin_line.start < pair[0].end_line.end {
                return Err(ComposeError::NestedRegions {
                    outer: pair[0].kind,
                    inner: pair[1].kind,
                });
            }
        }

        let mut doc = Self::new();
        let mut cursor = 0;
        for span in &spans {
            doc.push_fixed(&text[cursor..span.body.start]);
            doc.push_region(span.kind, &text[span.body.clone()])?;
            cursor = span.body.end;
        }
        doc.push_fixed(&text[cursor..]);
        Ok(doc)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ComposedDocument {
        let mut doc = ComposedDocument::new();
        doc.push_fixed("head\n");
        doc.push_framed_region(RegionKind::GlueCode).unwrap();
        doc.push_fixed("middle {\n");
        doc.push_framed_region(RegionKind::Pydef).unwrap();
        doc.push_fixed("}");
        doc
    }

    #[test]
    fn push_fixed_merges_adjacent_text() {
        let mut doc = ComposedDocument::new();
        doc.push_fixed("a");
        doc.push_fixed("");
        doc.push_fixed("b");
        assert_eq!(doc.segments(), &[Segment::Fixed("ab".to_string())]);
    }

    #[test]
    fn duplicate_region_is_rejected() {
        let mut doc = ComposedDocument::new();
        doc.push_region(RegionKind::Stub, "").unwrap();
        assert_eq!(
            doc.push_region(RegionKind::Stub, ""),
            Err(ComposeError::DuplicateRegion {
                kind: RegionKind::Stub
            })
        );
    }

    #[test]
    fn parse_of_render_round_trips() {
        let doc = sample();
        let parsed =
            ComposedDocument::parse(&doc.render(), &[RegionKind::GlueCode, RegionKind::Pydef])
                .unwrap();
        assert_eq!(parsed, doc);
    }

    #[test]
    fn parse_keeps_filled_bodies_separate_from_fixed_text() {
        let mut doc = sample();
        doc.replace_region(RegionKind::Pydef, "m.def(\"add\", add);\n")
            .unwrap();
        let text = doc.render();

        let parsed =
            ComposedDocument::parse(&text, &[RegionKind::Pydef, RegionKind::GlueCode]).unwrap();
        assert_eq!(parsed.region(RegionKind::Pydef), Some("m.def(\"add\", add);\n"));
        assert_eq!(parsed.region(RegionKind::GlueCode), Some(""));
        assert_eq!(parsed.fixed_text(), sample().fixed_text());
    }

    #[test]
    fn locate_is_order_independent() {
        let text = sample().render();
        let glue_first = (
            RegionSpan::locate(&text, RegionKind::GlueCode).unwrap(),
            RegionSpan::locate(&text, RegionKind::Pydef).unwrap(),
        );
        let pydef_first = {
            let p = RegionSpan::locate(&text, RegionKind::Pydef).unwrap();
            let g = RegionSpan::locate(&text, RegionKind::GlueCode).unwrap();
            (g, p)
        };
        assert_eq!(glue_first, pydef_first);
    }

    #[test]
    fn locate_reports_missing_marker() {
        let text = sample().render().replace("</litgen_pydef>", "");
        assert_eq!(
            RegionSpan::locate(&text, RegionKind::Pydef),
            Err(ComposeError::MissingMarker {
                token: "</litgen_pydef>".to_string()
            })
        );
    }

    #[test]
    fn locate_reports_duplicate_marker() {
        let text = format!("{}// <litgen_pydef>\n", sample().render());
        assert!(matches!(
            RegionSpan::locate(&text, RegionKind::Pydef),
            Err(ComposeError::DuplicateMarker { count: 2, .. })
        ));
    }

    #[test]
    fn locate_reports_reversed_markers() {
        let text = "// </litgen_stub>\n// <litgen_stub>\n";
        assert_eq!(
            RegionSpan::locate(text, RegionKind::Stub),
            Err(ComposeError::MisorderedMarker {
                kind: RegionKind::Stub
            })
        );
    }

    #[test]
    fn parse_rejects_nested_regions() {
        let text = "// <litgen_glue_code>\n// <litgen_pydef>\n// </litgen_pydef>\n// </litgen_glue_code>\n";
        assert!(matches!(
            ComposedDocument::parse(text, &[RegionKind::GlueCode, RegionKind::Pydef]),
            Err(ComposeError::NestedRegions { .. })
        ));
    }

    #[test]
    fn ensure_unmarked_detects_reserved_tags() {
        assert!(ensure_unmarked("int add(int a, int b);", "source").is_ok());
        let err = ensure_unmarked("// </litgen_stub>", "source").unwrap_err();
        assert_eq!(
            err.to_string(),
            "source already contains the reserved marker '</litgen_stub>'"
        );
    }
}
