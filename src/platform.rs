//! Host platform detection.
use std::fmt;

/// Operating systems the provisioning engine distinguishes.
///
/// The winget and scoop backends only exist on Windows; deployments, pip
/// packages and the color pipeline run on Unix-likes as well.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Os {
    Windows,
    /// Linux and other Unix-likes.
    Unix,
}

impl Os {
    /// The operating system this binary was built for.
    #[must_use]
    pub const fn current() -> Self {
        if cfg!(windows) {
            Self::Windows
        } else {
            Self::Unix
        }
    }

    #[must_use]
    pub const fn is_windows(self) -> bool {
        matches!(self, Self::Windows)
    }
}

impl fmt::Display for Os {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Windows => "windows",
            Self::Unix => "unix",
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn current_matches_build_target() {
        assert_eq!(Os::current().is_windows(), cfg!(windows));
    }

    #[test]
    fn display_names() {
        assert_eq!(Os::Windows.to_string(), "windows");
        assert_eq!(Os::Unix.to_string(), "unix");
    }
}
