//! Codec configuration

use crate::error::{Error, ErrorKind, Result};

/// Limits applied while decoding and formatting applied while encoding
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Config {
    /// Maximum XML element nesting depth
    pub max_depth: usize,
    /// Maximum input size in bytes
    pub max_size: usize,
    /// Indent encoded output
    pub pretty: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_depth: 64,
            max_size: 10 * 1024 * 1024, // 10MB
            pretty: false,
        }
    }
}

impl Config {
    pub const fn new() -> Self {
        Self {
            max_depth: 64,
            max_size: 10 * 1024 * 1024,
            pretty: false,
        }
    }

    pub const fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub const fn with_max_size(mut self, max_size: usize) -> Self {
        self.max_size = max_size;
        self
    }

    pub const fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    pub(crate) fn check_size(&self, len: usize) -> Result<()> {
        if len > self.max_size {
            return Err(Error::new(ErrorKind::MaxSizeExceeded { max: self.max_size }));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_matches_new() {
        assert_eq!(Config::default(), Config::new());
    }

    #[test]
    fn test_size_limit() {
        let config = Config::new().with_max_size(4);
        assert!(config.check_size(4).is_ok());
        assert!(matches!(
            config.check_size(5).map_err(|e| e.kind().clone()),
            Err(ErrorKind::MaxSizeExceeded { max: 4 })
        ));
    }
}
