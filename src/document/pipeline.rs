//! Pipeline document rendering.

use crate::workflow::{GenerateError, Workflow};

/// Who generated a document, for its banner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Generator {
    pub name: &'static str,
    pub version: &'static str,
}

impl Generator {
    /// This build of actiongen.
    pub fn current() -> Self {
        Generator {
            name: "actiongen",
            version: env!("CARGO_PKG_VERSION"),
        }
    }

    /// Comment lines placed above the generated YAML.
    pub fn banner(&self) -> String {
        format!(
            "# This workflow was generated by {} {}.\n\
             # Edit .actiongen.json and regenerate instead of changing it by hand.\n\n",
            self.name, self.version
        )
    }
}

impl Default for Generator {
    fn default() -> Self {
        Generator::current()
    }
}

/// Render a workflow as YAML text with the generator banner.
pub fn render(workflow: &Workflow, generator: &Generator) -> Result<String, GenerateError> {
    let yaml = serde_yaml::to_string(workflow)?;
    Ok(format!("{}{}", generator.banner(), yaml))
}
