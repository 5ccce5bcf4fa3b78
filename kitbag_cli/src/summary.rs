//! Immutable application metadata.

/// Descriptive metadata of a command-line application, consumed by help and
/// version front-ends.
#[derive(Debug, Clone, Default)]
pub struct Summary {
    name: String,
    bin_name: String,
    author: String,
    version: String,
    description: String,
}

impl Summary {
    pub fn new(name: &str, bin_name: &str, author: &str, version: &str, description: &str) -> Self {
        Self {
            name: name.to_owned(),
            bin_name: bin_name.to_owned(),
            author: author.to_owned(),
            version: version.to_owned(),
            description: description.to_owned(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn bin_name(&self) -> &str {
        &self.bin_name
    }

    pub fn author(&self) -> &str {
        &self.author
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn description(&self) -> &str {
        &self.description
    }
}
