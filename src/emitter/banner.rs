use std::fmt;

/// "Do not edit" header written at the top of both artifacts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Banner {
    pub generator: String,
    pub definition: String,
}

impl Banner {
    pub fn new(generator: impl Into<String>, definition: impl Into<String>) -> Self {
        Self {
            generator: generator.into(),
            definition: definition.into(),
        }
    }
}

impl fmt::Display for Banner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "// This file was automatically generated by `{}' from",
            self.generator
        )?;
        writeln!(
            f,
            "// `{}'.  If you edit it, your changes will be overwritten",
            self.definition
        )?;
        writeln!(f, "// on the next invocation of `{}'.", self.generator)
    }
}
