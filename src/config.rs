//! Run settings owned by the harness.

/// Global switches and scalars consumed while reading and by the renderers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Replace `$name` and `${name}` in input lines. Cleared by `-nv`.
    pub substitute_variables: bool,
    /// Fold `` ` ``/`'` pairs and `--` into typographic characters (`-tr`).
    pub translate_characters: bool,
    /// Output rounding granularity in fixed-point units.
    pub resolution: i32,
    /// Floor applied by renderers to stroke widths.
    pub minimum_thickness: i32,
    /// Preformatted value for the `date` variable; computed from the clock
    /// when absent.
    pub timestamp: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            substitute_variables: true,
            translate_characters: false,
            resolution: 1,
            minimum_thickness: 0,
            timestamp: None,
        }
    }
}

impl Settings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn without_variables(mut self) -> Self {
        self.substitute_variables = false;
        self
    }

    pub fn translating(mut self) -> Self {
        self.translate_characters = true;
        self
    }

    pub fn with_timestamp(mut self, stamp: impl Into<String>) -> Self {
        self.timestamp = Some(stamp.into());
        self
    }

    /// Apply a harness option word (`-nv`, `-tr`). Returns false for words
    /// this layer does not own.
    pub fn apply_flag(&mut self, flag: &str) -> bool {
        match flag {
            "-nv" => self.substitute_variables = false,
            "-tr" => self.translate_characters = true,
            _ => return false,
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let s = Settings::default();
        assert!(s.substitute_variables);
        assert!(!s.translate_characters);
        assert_eq!(s.resolution, 1);
        assert_eq!(s.timestamp, None);
    }

    #[test]
    fn harness_flags() {
        let mut s = Settings::new();
        assert!(s.apply_flag("-nv"));
        assert!(s.apply_flag("-tr"));
        assert!(!s.apply_flag("-svg"));
        assert!(!s.substitute_variables);
        assert!(s.translate_characters);
    }
}
