//! Fixed text blocks written into every scaffold.
//!
//! These are plain immutable values. The layout table in
//! [`crate::domain::ProjectStructure::python_service`] decides where each one
//! lands; nothing here knows about paths.

/// Build-recipe template. `{variant}` selects the requirements file to install.
pub const DOCKERFILE_TEMPLATE: &str = "\
FROM python:3.12-slim-bullseye

RUN useradd --create-home --home-dir /app --shell /bin/bash app
WORKDIR /app

COPY requirements ./requirements
RUN pip install --disable-pip-version-check --no-cache-dir -r requirements/{variant}.txt

COPY . .
USER app
";

/// The single placeholder in [`DOCKERFILE_TEMPLATE`].
pub const VARIANT_PLACEHOLDER: &str = "{variant}";

/// Development manifest: pulls in the base manifest plus the linting toolchain.
pub const DEV_REQUIREMENTS: &str = "\
-r base.txt
flake8
flake8-print
flake8-multiline-containers
flake8-builtins
flake8-import-order
flake8-commas
flake8-quotes
";

/// Linter configuration. The leading blank line is part of the file.
pub const FLAKE8_CONFIG: &str = "
[flake8]
max-line-length = 100
import-order-style = google
application-import-names = code
exclude = venv
";

/// Canonical `.dockerignore` reference.
pub const DOCKERIGNORE_URL: &str = "https://raw.githubusercontent.com/GoogleCloudPlatform/getting-started-python/main/optional-kubernetes-engine/.dockerignore";

/// Canonical Python `.gitignore` template.
pub const GITIGNORE_URL: &str =
    "https://raw.githubusercontent.com/github/gitignore/main/Python.gitignore";

/// Branch the repository starts on, regardless of the user's git defaults.
pub const INITIAL_BRANCH: &str = "develop";

pub const INITIAL_COMMIT_MESSAGE: &str = "initial commit";
