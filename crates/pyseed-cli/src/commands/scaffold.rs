//! Implementation of `pyseed <PROJECT_NAME>`.
//!
//! Responsibility: validate the name, wire the production adapters from
//! config, call the core scaffold service, and display results. No layout
//! rules live here.

use std::path::PathBuf;

use tracing::{info, instrument};

use pyseed_adapters::{GitCli, HttpFetcher, LocalFilesystem};
use pyseed_core::{
    application::{ApplicationError, ScaffoldOptions, ScaffoldReport, ScaffoldService},
    domain::{FileContent, FileToWrite, FsEntry, ProjectStructure, SourceUrls},
    error::PyseedError,
};

use crate::{
    cli::Cli,
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
};

/// Execute a scaffold run.
///
/// Dispatch sequence:
/// 1. Validate the project name
/// 2. Build adapters and options from config and flags
/// 3. Early-exit with the plan if `--dry-run`
/// 4. Execute scaffolding via `ScaffoldService`
/// 5. Print the created files and next steps
#[instrument(skip_all, fields(project = %cli.project_name))]
pub fn execute(cli: Cli, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let root = validate_project_name(&cli.project_name)?;
    let options = config.scaffold_options(cli.keep_partial);
    let sources = options.sources.clone();
    let rollback = options.rollback_on_failure;
    let service = build_service(&config, options)?;

    if cli.dry_run {
        let plan = service.plan(&root)?;
        return print_plan(&plan, &sources, &output);
    }

    info!(path = %root.display(), rollback, "Scaffold started");
    let spinner = output.spinner(&format!("Scaffolding {}...", root.display()));
    let result = service.scaffold(&root);
    spinner.finish_and_clear();

    match result {
        Ok(report) => print_report(&report, &output),
        Err(e) => {
            let existed_before = matches!(
                e,
                PyseedError::Application(ApplicationError::ProjectExists { .. })
            );
            if !rollback && !existed_before && root.exists() {
                output.warning(&format!(
                    "Partial project left in place at {}",
                    root.display()
                ))?;
            }
            Err(e.into())
        }
    }
}

fn build_service(config: &AppConfig, options: ScaffoldOptions) -> CliResult<ScaffoldService> {
    let fetcher = HttpFetcher::new(&config.http_settings())?;
    let git = GitCli::with_executable(config.git.executable.as_str());

    Ok(ScaffoldService::new(
        Box::new(LocalFilesystem::new()),
        Box::new(fetcher),
        Box::new(git),
        options,
    ))
}

/// The name is used verbatim as a path; only a blank name is rejected.
fn validate_project_name(name: &str) -> CliResult<PathBuf> {
    if name.trim().is_empty() {
        return Err(CliError::InvalidProjectName {
            name: name.into(),
            reason: "name cannot be empty".into(),
        });
    }
    Ok(PathBuf::from(name))
}

// ── UI helpers ────────────────────────────────────────────────────────────────

fn print_plan(plan: &ProjectStructure, sources: &SourceUrls, out: &OutputManager) -> CliResult<()> {
    out.header(&format!("Dry run: would create {}", plan.root().display()))?;
    for entry in plan.entries() {
        match entry {
            FsEntry::Directory(dir) => out.print(&format!("  {}/", dir.path))?,
            FsEntry::File(file) => out.print(&format!(
                "  {:<24} {}",
                file.path.as_str(),
                describe(file, sources)
            ))?,
        }
    }
    out.print(&format!(
        "  {:<24} git init, add, commit on 'develop'",
        ".git/"
    ))?;
    out.print("")?;
    out.info("Nothing was written")?;
    Ok(())
}

fn describe(file: &FileToWrite, sources: &SourceUrls) -> String {
    match file.content {
        FileContent::Remote(source) => {
            format!("{} from {}", file.content, sources.url_for(source))
        }
        other => other.to_string(),
    }
}

fn print_report(report: &ScaffoldReport, out: &OutputManager) -> CliResult<()> {
    out.success(&format!(
        "Created {} with an initial commit on '{}'",
        report.root.display(),
        report.branch
    ))?;

    out.print("")?;
    for file in &report.files {
        out.print(&format!("  + {}", file.display()))?;
    }

    out.print("")?;
    out.print("Next steps:")?;
    out.print(&format!("  cd {}", report.root.display()))?;
    out.print("  docker build -f docker/Dockerfile.dev .")?;
    Ok(())
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use pyseed_core::domain::{RemoteSource, Variant};

    // ── validate_project_name ─────────────────────────────────────────────────

    #[test]
    fn empty_name_is_invalid() {
        assert!(matches!(
            validate_project_name(""),
            Err(CliError::InvalidProjectName { .. })
        ));
        assert!(validate_project_name("   ").is_err());
    }

    #[test]
    fn names_are_used_verbatim() {
        for name in ["my-service", "../svc/billing", "/tmp/abs/svc", ".hidden"] {
            assert_eq!(validate_project_name(name).unwrap(), PathBuf::from(name));
        }
    }

    // ── describe ─────────────────────────────────────────────────────────────

    fn file(path: &str, content: FileContent) -> FileToWrite {
        FileToWrite {
            path: path.into(),
            content,
        }
    }

    #[test]
    fn remote_files_show_their_url() {
        let sources = SourceUrls {
            dockerignore: "http://mirror.local/d".into(),
            gitignore: "http://mirror.local/g".into(),
        };
        let text = describe(
            &file(".gitignore", FileContent::Remote(RemoteSource::GitIgnore)),
            &sources,
        );
        assert!(text.contains("http://mirror.local/g"));
    }

    #[test]
    fn local_files_show_content_kind() {
        let sources = SourceUrls::default();
        assert_eq!(
            describe(&file("code/main.py", FileContent::Empty), &sources),
            "empty"
        );
        assert!(
            describe(
                &file("docker/Dockerfile.dev", FileContent::Recipe(Variant::Dev)),
                &sources
            )
            .contains("dev")
        );
    }
}
