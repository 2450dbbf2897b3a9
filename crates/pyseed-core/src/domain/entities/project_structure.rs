use std::collections::HashSet;
use std::fmt;
use std::path::{Path, PathBuf};

use crate::domain::{
    content::{DEV_REQUIREMENTS, FLAKE8_CONFIG},
    entities::common::RelativePath,
    error::DomainError,
    value_objects::{RemoteSource, Variant},
};

/// Ordered description of everything a scaffold creates under its root.
///
/// Entries are materialized front to back, so the order here *is* the
/// creation order. It contains no I/O, only data.
#[derive(Debug, Clone)]
pub struct ProjectStructure {
    pub(crate) root: PathBuf,
    pub(crate) entries: Vec<FsEntry>,
}

impl ProjectStructure {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            entries: Vec::new(),
        }
    }

    /// The fixed Python service layout.
    ///
    /// ```text
    /// code/__init__.py          (empty)
    /// code/main.py              (empty)
    /// requirements/base.txt     (empty)
    /// requirements/dev.txt      (fixed content)
    /// docker/Dockerfile         (recipe, base)
    /// docker/Dockerfile.dev     (recipe, dev)
    /// .dockerignore             (remote)
    /// .flake8                   (fixed content)
    /// .gitignore                (remote)
    /// ```
    pub fn python_service(root: impl Into<PathBuf>) -> Self {
        let mut structure = Self::new(root)
            .with_directory("code")
            .with_file("code/__init__.py", FileContent::Empty)
            .with_file("code/main.py", FileContent::Empty)
            .with_directory("requirements")
            .with_file("requirements/base.txt", FileContent::Empty)
            .with_file(
                "requirements/dev.txt",
                FileContent::Literal(DEV_REQUIREMENTS),
            )
            .with_directory("docker");

        for variant in Variant::ALL {
            structure.add_file(
                Path::new("docker").join(variant.recipe_file_name()),
                FileContent::Recipe(variant),
            );
        }

        structure
            .with_file(".dockerignore", FileContent::Remote(RemoteSource::DockerIgnore))
            .with_file(".flake8", FileContent::Literal(FLAKE8_CONFIG))
            .with_file(".gitignore", FileContent::Remote(RemoteSource::GitIgnore))
    }

    pub fn add_file(&mut self, path: impl Into<PathBuf>, content: FileContent) {
        self.entries.push(FsEntry::File(FileToWrite {
            path: RelativePath::new(path),
            content,
        }));
    }

    pub fn add_directory(&mut self, path: impl Into<PathBuf>) {
        self.entries.push(FsEntry::Directory(DirectoryToCreate {
            path: RelativePath::new(path),
        }));
    }

    pub fn with_file(mut self, path: impl Into<PathBuf>, content: FileContent) -> Self {
        self.add_file(path, content);
        self
    }

    pub fn with_directory(mut self, path: impl Into<PathBuf>) -> Self {
        self.add_directory(path);
        self
    }

    /// Check the layout invariants:
    /// - at least one entry
    /// - no path appears twice
    /// - every entry's parent is the root or a directory declared earlier
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.entries.is_empty() {
            return Err(DomainError::EmptyStructure);
        }

        let mut seen = HashSet::new();
        let mut directories = HashSet::new();
        for entry in &self.entries {
            let path = entry.path();

            if let Some(parent) = path.parent() {
                if !directories.contains(&parent) {
                    return Err(DomainError::ParentNotDeclared {
                        path: path.to_string(),
                        parent: parent.to_string(),
                    });
                }
            }

            if !seen.insert(path.clone()) {
                return Err(DomainError::DuplicatePath {
                    path: path.to_string(),
                });
            }

            if let FsEntry::Directory(dir) = entry {
                directories.insert(dir.path.clone());
            }
        }

        Ok(())
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn entries(&self) -> &[FsEntry] {
        &self.entries
    }

    pub fn files(&self) -> impl Iterator<Item = &FileToWrite> {
        self.entries.iter().filter_map(|e| match e {
            FsEntry::File(f) => Some(f),
            _ => None,
        })
    }

    pub fn directories(&self) -> impl Iterator<Item = &DirectoryToCreate> {
        self.entries.iter().filter_map(|e| match e {
            FsEntry::Directory(d) => Some(d),
            _ => None,
        })
    }

    pub fn entry_count(&self) -> usize {
        self.entries.len()
    }
}

#[derive(Debug, Clone)]
pub enum FsEntry {
    File(FileToWrite),
    Directory(DirectoryToCreate),
}

impl FsEntry {
    pub fn path(&self) -> &RelativePath {
        match self {
            Self::File(f) => &f.path,
            Self::Directory(d) => &d.path,
        }
    }
}

#[derive(Debug, Clone)]
pub struct FileToWrite {
    pub path: RelativePath,
    pub content: FileContent,
}

#[derive(Debug, Clone)]
pub struct DirectoryToCreate {
    pub path: RelativePath,
}

/// Where a file's bytes come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileContent {
    /// Zero-length file.
    Empty,
    /// Fixed text, written verbatim.
    Literal(&'static str),
    /// Build-recipe template rendered for a variant.
    Recipe(Variant),
    /// Ignore list fetched over the network at write time.
    Remote(RemoteSource),
}

impl FileContent {
    /// Content that can be produced without I/O. `None` for remote content.
    pub fn render_local(&self) -> Option<String> {
        match self {
            Self::Empty => Some(String::new()),
            Self::Literal(text) => Some((*text).to_string()),
            Self::Recipe(variant) => Some(variant.render_recipe()),
            Self::Remote(_) => None,
        }
    }
}

impl fmt::Display for FileContent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => f.write_str("empty"),
            Self::Literal(_) => f.write_str("fixed content"),
            Self::Recipe(variant) => write!(f, "build recipe ({variant})"),
            Self::Remote(source) => write!(f, "fetched ({source})"),
        }
    }
}
