mod defaults;
mod table;

pub use defaults::{file_name_rules, grid_dimension_rules};
pub use table::{RuleSet, SubstitutionRule};
