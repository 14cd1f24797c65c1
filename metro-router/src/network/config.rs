//! Loader configuration.

/// Which same-named stations get interchange connections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InterchangePolicy {
    /// Connect every pair of stations sharing a name, even two platforms
    /// listed on the same line.
    #[default]
    AllSameName,

    /// Only connect same-named stations that have no line in common.
    DistinctLinesOnly,
}

/// Configuration for reading station records and building the network.
#[derive(Debug, Clone)]
pub struct LoaderConfig {
    /// Field delimiter of the station file.
    pub delimiter: u8,

    /// Whether the first row is a `code,name,line,num` header.
    /// Without a header, fields are read in that order.
    pub has_headers: bool,

    /// Interchange connection rule.
    pub interchanges: InterchangePolicy,
}

impl LoaderConfig {
    /// Create a new configuration with the given parameters.
    pub fn new(delimiter: u8, has_headers: bool, interchanges: InterchangePolicy) -> Self {
        Self {
            delimiter,
            has_headers,
            interchanges,
        }
    }

    /// Set the field delimiter.
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Set whether the file starts with a header row.
    pub fn with_headers(mut self, has_headers: bool) -> Self {
        self.has_headers = has_headers;
        self
    }

    /// Set the interchange policy.
    pub fn with_interchanges(mut self, interchanges: InterchangePolicy) -> Self {
        self.interchanges = interchanges;
        self
    }
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            delimiter: b',',
            has_headers: true,
            interchanges: InterchangePolicy::AllSameName,
        }
    }
}
