use super::guard::{Guard, GuardLines};
use super::sink::OutputSink;
use crate::error::{GenError, Result};
use crate::parser::{Action, Line, Marker, MarkerSet, Zone};
use crate::rules::RuleSet;
use serde::Serialize;
use std::borrow::Cow;
use std::io::Write;
use tracing::debug;

/// Line counts gathered while splitting.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SplitStats {
    /// Lines before the entry point.
    pub preamble_lines: usize,
    pub declaration_lines: usize,
    pub statement_lines: usize,
    /// Lines in which at least one substitution fired.
    pub substituted_lines: usize,
    /// Lines after the "leave define mode" marker.
    pub trailing_lines: usize,
    /// Line of the "enter define mode" marker the guard follows.
    pub guard_line: usize,
}

/// Both finished writers plus the counts.
pub struct SplitOutcome<A, B> {
    pub declarations: A,
    pub attributes: B,
    pub stats: SplitStats,
}

/// Routes generated source into the declarations and attributes artifacts.
pub struct Splitter<'a> {
    pub markers: &'a MarkerSet,
    pub declaration_rules: &'a RuleSet,
    pub define_mode_rules: &'a RuleSet,
    pub guard: &'a GuardLines,
}

impl<'a> Splitter<'a> {
    pub fn split<A: Write, B: Write>(
        &self,
        lines: &[Line],
        declarations: OutputSink<A>,
        mut attributes: OutputSink<B>,
    ) -> Result<SplitOutcome<A, B>> {
        let mut zone = Zone::BeforeEntry;
        let mut open_declarations = Some(declarations);
        let mut finished_declarations: Option<A> = None;
        let mut guard = Guard::Pending;
        let mut stats = SplitStats::default();

        let mut remaining = lines.iter();
        for line in remaining.by_ref() {
            let (next, action) = zone.advance(line.content(), self.markers);

            match action {
                Action::Discard => stats.preamble_lines += 1,
                Action::Boundary(marker) => {
                    debug!(%marker, line = line.number, "zone boundary");
                    if marker == Marker::AttributeVectors {
                        if let Some(sink) = open_declarations.take() {
                            finished_declarations = Some(sink.finish()?);
                        }
                    }
                }
                Action::Declaration => {
                    if let Some(sink) = open_declarations.as_mut() {
                        sink.push(&line.text)?;
                    }
                    let rewritten = self.declaration_rules.apply(&line.text);
                    if let Cow::Owned(_) = rewritten {
                        stats.substituted_lines += 1;
                    }
                    attributes.push(&rewritten)?;
                    stats.declaration_lines += 1;
                }
                Action::Statement => {
                    let rewritten = self.define_mode_rules.apply(&line.text);
                    if let Cow::Owned(_) = rewritten {
                        stats.substituted_lines += 1;
                    }
                    attributes.push(&rewritten)?;
                    stats.statement_lines += 1;

                    if self.enters_define_mode(line, &rewritten) {
                        guard = guard.open(
                            line.number,
                            newline_of(line),
                            &mut attributes,
                            self.guard,
                        )?;
                    }
                }
            }

            zone = next;
            if zone == Zone::Done {
                break;
            }
        }
        stats.trailing_lines = remaining.count();

        if let Some(marker) = zone.awaiting() {
            return Err(GenError::MissingMarker(marker));
        }
        stats.guard_line = guard.close(&mut attributes, self.guard)?;

        let declarations =
            finished_declarations.ok_or(GenError::MissingMarker(Marker::AttributeVectors))?;
        let attributes = attributes.finish()?;

        Ok(SplitOutcome {
            declarations,
            attributes,
            stats,
        })
    }

    fn enters_define_mode(&self, line: &Line, rewritten: &str) -> bool {
        self.markers.matches(Marker::EnterDefineMode, line.content())
            || self
                .markers
                .matches(Marker::EnterDefineMode, rewritten.trim_end_matches(['\r', '\n']))
    }
}

/// The guard lines reuse the terminator of the marker line they follow.
fn newline_of(line: &Line) -> &'static str {
    if line.text.ends_with("\r\n") {
        "\r\n"
    } else {
        "\n"
    }
}
