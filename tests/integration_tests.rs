use ncgen_split::config::MarkerPatterns;
use ncgen_split::emitter::{Banner, GuardLines, OutputSink, SplitStats, Splitter};
use ncgen_split::parser::{split_lines, MarkerSet};
use ncgen_split::rules::{file_name_rules, grid_dimension_rules, RuleSet};
use ncgen_split::GenError;

const FIXTURE: &str = include_str!("fixtures/ncgen_output.c");

// Everything the splitter borrows, built from the stock configuration
struct Parts {
    markers: MarkerSet,
    declaration_rules: RuleSet,
    define_mode_rules: RuleSet,
    guard: GuardLines,
}

impl Parts {
    fn stock() -> Self {
        Self {
            markers: MarkerSet::compile(&MarkerPatterns::default()).expect("default markers"),
            declaration_rules: RuleSet::new(grid_dimension_rules()),
            define_mode_rules: RuleSet::new(file_name_rules()),
            guard: GuardLines::default(),
        }
    }

    fn splitter(&self) -> Splitter<'_> {
        Splitter {
            markers: &self.markers,
            declaration_rules: &self.declaration_rules,
            define_mode_rules: &self.define_mode_rules,
            guard: &self.guard,
        }
    }
}

fn banner() -> Banner {
    Banner::new("ncgen-split", "pism_state.cdl")
}

// Split `source` into in-memory artifacts, banners stripped
fn split(parts: &Parts, source: &str) -> Result<(String, String, SplitStats), GenError> {
    let lines = split_lines(source);
    let declarations = OutputSink::create("declarations", Vec::new(), &banner())?;
    let attributes = OutputSink::create("attributes", Vec::new(), &banner())?;
    let outcome = parts.splitter().split(&lines, declarations, attributes)?;

    let header = banner().to_string();
    let a = String::from_utf8(outcome.declarations).expect("utf-8");
    let b = String::from_utf8(outcome.attributes).expect("utf-8");
    assert!(a.starts_with(&header), "declarations should open with the banner");
    assert!(b.starts_with(&header), "attributes should open with the banner");
    Ok((
        a[header.len()..].to_string(),
        b[header.len()..].to_string(),
        outcome.stats,
    ))
}

// Lines `from..=to` (one-based) of the fixture, terminators kept
fn fixture_lines(from: usize, to: usize) -> String {
    split_lines(FIXTURE)[from - 1..to]
        .iter()
        .map(|l| l.text.as_str())
        .collect()
}

#[cfg(test)]
mod splitter_tests {
    use super::*;

    #[test]
    fn test_declarations_are_copied_verbatim() {
        let (a, _, _) = split(&Parts::stock(), FIXTURE).expect("split");

        assert_eq!(a, fixture_lines(16, 48));
        assert!(a.contains("   size_t x_len = 91;\n"));
        assert!(!a.contains("main()"), "entry point line is a boundary only");
        assert!(!a.contains("attribute vectors"));
    }

    #[test]
    fn test_attributes_start_with_substituted_declarations() {
        let parts = Parts::stock();
        let (a, b, _) = split(&parts, FIXTURE).expect("split");

        let expected: String = split_lines(&a)
            .iter()
            .map(|l| parts.declaration_rules.apply(&l.text))
            .collect();
        assert!(b.starts_with(&expected));
        assert!(b.contains("   size_t x_len = grid.p->Mx;\n"));
        assert!(b.contains("   size_t y_len = grid.p->My;\n"));
        assert!(b.contains("   size_t z_len = grid.p->Mz;\n"));
        assert!(b.contains("   size_t zb_len = grid.p->Mbz;\n"));
    }

    #[test]
    fn test_guard_wraps_define_mode_section() {
        let (_, b, stats) = split(&Parts::stock(), FIXTURE).expect("split");

        assert!(b.contains(
            "   /* enter define mode */\nif (grid.rank == 0) {\n   stat = nc_create(fname, NC_CLOBBER|NC_64BIT_OFFSET, &ncid);\n"
        ));
        assert_eq!(b.matches("if (grid.rank == 0) {").count(), 1);
        assert_eq!(b.matches("} // end if (grid.rank == 0)").count(), 1);
        assert!(b.ends_with("   check_err(stat,__LINE__,__FILE__);\n\n} // end if (grid.rank == 0)\n"));
        assert_eq!(stats.guard_line, 52);
    }

    #[test]
    fn test_attribute_vectors_and_trailer_handling() {
        let (a, b, _) = split(&Parts::stock(), FIXTURE).expect("split");

        // attribute vector declarations belong to the attributes artifact only
        assert!(!a.contains("polar_stereographic_standard_parallel"));
        assert!(b.contains("   int polar_stereographic_standard_parallel[1];\n"));

        assert!(!b.contains("attribute vectors"));
        assert!(!b.contains("leave define mode"));
        assert!(!b.contains("nc_enddef"));
        assert!(!b.contains("pism_state.nc\""));
    }

    #[test]
    fn test_substituted_lines_follow_actual_rewrites() {
        let mut parts = Parts::stock();
        parts.declaration_rules = RuleSet::new(vec![
            ncgen_split::rules::SubstitutionRule::new("919", "X"),
            ncgen_split::rules::SubstitutionRule::new("192", "Y"),
        ]);
        let source = "main() {\nint a = 91920;\nint b = 0;\n/* attribute vectors */\n/* enter define mode */\n/* leave define mode */\n";
        let (_, b, stats) = split(&parts, source).expect("split");

        assert!(b.starts_with("int a = X20;\nint b = 0;\n"));
        assert_eq!(stats.substituted_lines, 1);
    }

    #[test]
    fn test_split_stats() {
        let (_, _, stats) = split(&Parts::stock(), FIXTURE).expect("split");

        assert_eq!(stats.preamble_lines, 14);
        assert_eq!(stats.declaration_lines, 33);
        assert_eq!(stats.statement_lines, 24);
        assert_eq!(stats.trailing_lines, 6);
        assert_eq!(stats.substituted_lines, 5);
    }

    #[test]
    fn test_missing_entry_point() {
        let source = FIXTURE.replace("main()", "start()");
        let err = split(&Parts::stock(), &source).unwrap_err();
        assert!(matches!(
            err,
            GenError::MissingMarker(ncgen_split::parser::Marker::EntryPoint)
        ));
    }

    #[test]
    fn test_empty_input_is_missing_entry_point() {
        let err = split(&Parts::stock(), "").unwrap_err();
        assert!(matches!(
            err,
            GenError::MissingMarker(ncgen_split::parser::Marker::EntryPoint)
        ));
    }

    #[test]
    fn test_missing_attribute_vectors() {
        let source = FIXTURE.replace("/* attribute vectors */", "/* vectors */");
        let err = split(&Parts::stock(), &source).unwrap_err();
        assert!(matches!(
            err,
            GenError::MissingMarker(ncgen_split::parser::Marker::AttributeVectors)
        ));
    }

    #[test]
    fn test_missing_leave_define_mode() {
        let source = FIXTURE.replace("/* leave define mode */", "/* done */");
        let err = split(&Parts::stock(), &source).unwrap_err();
        assert!(matches!(
            err,
            GenError::MissingMarker(ncgen_split::parser::Marker::LeaveDefineMode)
        ));
    }

    #[test]
    fn test_guard_close_requires_open() {
        let source = FIXTURE.replace("/* enter define mode */", "/* create */");
        let err = split(&Parts::stock(), &source).unwrap_err();
        assert!(matches!(
            err,
            GenError::MissingMarker(ncgen_split::parser::Marker::EnterDefineMode)
        ));
    }

    #[test]
    fn test_repeated_enter_define_mode() {
        let source = FIXTURE.replace(
            "   /* define variables */\n",
            "   /* enter define mode */\n",
        );
        match split(&Parts::stock(), &source) {
            Err(GenError::RepeatedMarker { marker, line }) => {
                assert_eq!(marker, ncgen_split::parser::Marker::EnterDefineMode);
                assert_eq!(line, 62);
            }
            other => panic!("expected RepeatedMarker, got {:?}", other.map(|r| r.2)),
        }
    }

    #[test]
    fn test_guard_opens_on_substituted_marker() {
        let mut parts = Parts::stock();
        parts.define_mode_rules = RuleSet::new(vec![ncgen_split::rules::SubstitutionRule::new(
            "/* begin */",
            "/* enter define mode */",
        )]);
        let source = FIXTURE.replace("/* enter define mode */", "/* begin */");

        let (_, b, _) = split(&parts, &source).expect("split");
        assert!(b.contains("   /* enter define mode */\nif (grid.rank == 0) {\n"));
    }

    #[test]
    fn test_crlf_lines_survive() {
        let source = FIXTURE.replace('\n', "\r\n");
        let (a, b, _) = split(&Parts::stock(), &source).expect("split");

        assert!(a.contains("   size_t x_len = 91;\r\n"));
        assert!(b.contains("   /* enter define mode */\r\nif (grid.rank == 0) {\r\n"));
        assert!(b.ends_with("} // end if (grid.rank == 0)\r\n"));
    }

    #[test]
    fn test_minimal_input() {
        let source = "main() {\nint a = 91;\n/* attribute vectors */\n/* enter define mode */\nopen(\"pism_state.nc\");\n/* leave define mode */\n";
        let (a, b, _) = split(&Parts::stock(), source).expect("split");

        assert_eq!(a, "int a = 91;\n");
        assert_eq!(
            b,
            "int a = grid.p->Mx;\n/* enter define mode */\nif (grid.rank == 0) {\nopen(fname);\n} // end if (grid.rank == 0)\n"
        );
    }

    #[test]
    fn test_split_is_deterministic() {
        let parts = Parts::stock();
        let first = split(&parts, FIXTURE).expect("split");
        let second = split(&parts, FIXTURE).expect("split");
        assert_eq!(first.0, second.0);
        assert_eq!(first.1, second.1);
    }
}

#[cfg(test)]
mod rules_tests {
    use super::*;
    use ncgen_split::rules::SubstitutionRule;
    use std::borrow::Cow;

    #[test]
    fn test_no_token_leaves_line_alone() {
        let rules = RuleSet::new(grid_dimension_rules());
        assert!(matches!(rules.apply("   int x_dim;\n"), Cow::Borrowed("   int x_dim;\n")));
        assert_eq!(rules.apply(""), "");
    }

    #[test]
    fn test_several_tokens_on_one_line() {
        let rules = RuleSet::new(grid_dimension_rules());
        assert_eq!(
            rules.apply("f(94, 91, 93, 92);"),
            "f(grid.p->Mbz, grid.p->Mx, grid.p->Mz, grid.p->My);"
        );
        assert_eq!(
            rules.apply("f(91, 92, 93, 94);"),
            "f(grid.p->Mx, grid.p->My, grid.p->Mz, grid.p->Mbz);"
        );
    }

    #[test]
    fn test_only_first_occurrence_is_replaced() {
        let rules = RuleSet::new(grid_dimension_rules());
        assert_eq!(rules.apply("a = 91 + 91;"), "a = grid.p->Mx + 91;");
    }

    #[test]
    fn test_rules_never_see_each_others_output() {
        let rules = RuleSet::new(vec![
            SubstitutionRule::new("a", "b"),
            SubstitutionRule::new("b", "c"),
        ]);
        assert_eq!(rules.apply("a"), "b");
        assert_eq!(rules.apply("ab"), "bc");
    }

    #[test]
    fn test_overlapping_match_is_dropped() {
        let rules = RuleSet::new(vec![
            SubstitutionRule::new("919", "X"),
            SubstitutionRule::new("192", "Y"),
        ]);
        assert_eq!(rules.apply("91920"), "X20");
        assert!(matches!(rules.apply("91920"), Cow::Owned(_)));
    }

    #[test]
    fn test_file_name_rule() {
        let rules = RuleSet::new(file_name_rules());
        assert_eq!(rules.apply("ncopen(\"pism_state.nc\")"), "ncopen(fname)");
        assert_eq!(rules.apply("ncopen(pism_state.nc)"), "ncopen(pism_state.nc)");
    }
}

#[cfg(test)]
mod zone_tests {
    use super::*;
    use ncgen_split::parser::{Action, Marker, Zone};

    #[test]
    fn test_transitions() {
        let m = MarkerSet::compile(&MarkerPatterns::default()).expect("markers");

        assert_eq!(
            Zone::BeforeEntry.advance("int", &m),
            (Zone::BeforeEntry, Action::Discard)
        );
        assert_eq!(
            Zone::BeforeEntry.advance("main() {", &m),
            (Zone::Declarations, Action::Boundary(Marker::EntryPoint))
        );
        assert_eq!(
            Zone::Declarations.advance("main() {", &m),
            (Zone::Declarations, Action::Declaration)
        );
        assert_eq!(
            Zone::Declarations.advance("   /* attribute vectors */", &m),
            (
                Zone::AttributeStatements,
                Action::Boundary(Marker::AttributeVectors)
            )
        );
        assert_eq!(
            Zone::AttributeStatements.advance("   /* enter define mode */", &m),
            (Zone::AttributeStatements, Action::Statement)
        );
        assert_eq!(
            Zone::AttributeStatements.advance("   /* leave define mode */", &m),
            (Zone::Done, Action::Boundary(Marker::LeaveDefineMode))
        );
        assert_eq!(
            Zone::Done.advance("main() {", &m),
            (Zone::Done, Action::Discard)
        );
    }

    #[test]
    fn test_entry_point_is_anchored() {
        let m = MarkerSet::compile(&MarkerPatterns::default()).expect("markers");
        assert_eq!(
            Zone::BeforeEntry.advance("int main() {", &m),
            (Zone::BeforeEntry, Action::Discard)
        );
    }

    #[test]
    fn test_awaiting() {
        assert_eq!(Zone::BeforeEntry.awaiting(), Some(Marker::EntryPoint));
        assert_eq!(Zone::Declarations.awaiting(), Some(Marker::AttributeVectors));
        assert_eq!(
            Zone::AttributeStatements.awaiting(),
            Some(Marker::LeaveDefineMode)
        );
        assert_eq!(Zone::Done.awaiting(), None);
    }

    #[test]
    fn test_line_splitting_keeps_bytes() {
        let lines = split_lines("a\r\nb\nc");
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0].text, "a\r\n");
        assert_eq!(lines[0].content(), "a");
        assert_eq!(lines[2].text, "c");
        assert_eq!(lines[2].number, 3);
    }
}
