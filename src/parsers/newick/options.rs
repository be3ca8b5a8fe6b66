/// Controls what [Tree::from_newick](crate::Tree::from_newick) keeps and
/// how forgiving it is.
///
/// Disabling `load_labels` or `load_lengths` discards the corresponding
/// payloads during parsing; the text is still fully validated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseOptions {
    /// Tolerate a leading byte-order mark.
    pub lenient: bool,
    pub load_labels: bool,
    pub load_lengths: bool,
    /// Convert underscores in unquoted labels to spaces.
    pub underscores_to_spaces: bool,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            lenient: false,
            load_labels: true,
            load_lengths: true,
            underscores_to_spaces: false,
        }
    }
}

impl ParseOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_lenient(mut self, lenient: bool) -> Self {
        self.lenient = lenient;
        self
    }

    pub fn with_labels(mut self, load_labels: bool) -> Self {
        self.load_labels = load_labels;
        self
    }

    pub fn with_lengths(mut self, load_lengths: bool) -> Self {
        self.load_lengths = load_lengths;
        self
    }

    pub fn with_underscores_to_spaces(mut self, convert: bool) -> Self {
        self.underscores_to_spaces = convert;
        self
    }
}
