/// Which list the view shows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DisplayMode {
    #[default]
    All,
    Bookmarked,
}

impl DisplayMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            DisplayMode::All => "all",
            DisplayMode::Bookmarked => "bookmarked",
        }
    }
}

impl std::fmt::Display for DisplayMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_all() {
        assert_eq!(DisplayMode::default(), DisplayMode::All);
        assert_eq!(DisplayMode::Bookmarked.to_string(), "bookmarked");
    }
}
