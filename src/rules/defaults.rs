use super::table::SubstitutionRule;

/// The CDL gives the x, y, ice and bedrock dimensions the lengths 91..94 so
/// the compiler's output can be pointed at the runtime grid instead.
pub fn grid_dimension_rules() -> Vec<SubstitutionRule> {
    vec![
        SubstitutionRule::new("91", "grid.p->Mx"),
        SubstitutionRule::new("92", "grid.p->My"),
        SubstitutionRule::new("93", "grid.p->Mz"),
        SubstitutionRule::new("94", "grid.p->Mbz"),
    ]
}

/// The compiled-in output file name becomes the caller's `fname`.
pub fn file_name_rules() -> Vec<SubstitutionRule> {
    vec![SubstitutionRule::new("\"pism_state.nc\"", "fname")]
}
