use std::fmt;

use crate::domain::content::{
    DOCKERFILE_TEMPLATE, DOCKERIGNORE_URL, GITIGNORE_URL, VARIANT_PLACEHOLDER,
};

// ============================================================================
// Variant
// ============================================================================

/// Which requirements manifest a build recipe installs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Variant {
    Base,
    Dev,
}

impl Variant {
    pub const ALL: [Variant; 2] = [Variant::Base, Variant::Dev];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Base => "base",
            Self::Dev => "dev",
        }
    }

    /// File name of the build recipe for this variant.
    pub const fn recipe_file_name(self) -> &'static str {
        match self {
            Self::Base => "Dockerfile",
            Self::Dev => "Dockerfile.dev",
        }
    }

    /// Render the build-recipe template for this variant.
    pub fn render_recipe(self) -> String {
        DOCKERFILE_TEMPLATE.replace(VARIANT_PLACEHOLDER, self.as_str())
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// RemoteSource
// ============================================================================

/// An ignore list maintained upstream and fetched at scaffold time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RemoteSource {
    DockerIgnore,
    GitIgnore,
}

impl RemoteSource {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::DockerIgnore => "dockerignore",
            Self::GitIgnore => "gitignore",
        }
    }

    /// Canonical upstream location.
    pub const fn default_url(self) -> &'static str {
        match self {
            Self::DockerIgnore => DOCKERIGNORE_URL,
            Self::GitIgnore => GITIGNORE_URL,
        }
    }
}

impl fmt::Display for RemoteSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Resolved URLs for every [`RemoteSource`].
///
/// Defaults to the canonical upstream locations; callers may point either
/// source at a mirror.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceUrls {
    pub dockerignore: String,
    pub gitignore: String,
}

impl SourceUrls {
    pub fn url_for(&self, source: RemoteSource) -> &str {
        match source {
            RemoteSource::DockerIgnore => &self.dockerignore,
            RemoteSource::GitIgnore => &self.gitignore,
        }
    }
}

impl Default for SourceUrls {
    fn default() -> Self {
        Self {
            dockerignore: RemoteSource::DockerIgnore.default_url().to_string(),
            gitignore: RemoteSource::GitIgnore.default_url().to_string(),
        }
    }
}
