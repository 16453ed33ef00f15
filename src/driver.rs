//! Build-time generation over every discovered project.
//!
//! Projects run one after another. A failing project is logged and the rest
//! still run.

use tracing::{error, info};

use crate::discover::{self, ContentRoot};
use crate::error::Result;
use crate::generate::{DocsGenerator, GenerateOptions, OpenApiSource};

/// What happened to each project, by name, in processing order.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RunReport {
    pub generated: Vec<String>,
    pub failed: Vec<String>,
    /// Projects whose specs disappeared between discovery and generation.
    pub skipped: Vec<String>,
}

impl RunReport {
    pub fn is_empty(&self) -> bool {
        self.generated.is_empty() && self.failed.is_empty() && self.skipped.is_empty()
    }
}

pub struct Driver<G> {
    root: ContentRoot,
    generator: G,
    include_description: bool,
}

impl<G: DocsGenerator> Driver<G> {
    pub fn new(root: ContentRoot, generator: G) -> Self {
        Self {
            root,
            generator,
            include_description: true,
        }
    }

    pub fn include_description(mut self, include: bool) -> Self {
        self.include_description = include;
        self
    }

    pub fn generator(&self) -> &G {
        &self.generator
    }

    pub async fn run(&self) -> RunReport {
        let mut report = RunReport::default();
        let projects = discover::find_projects(&self.root);
        if projects.is_empty() {
            info!("No OpenAPI specs found in any project");
            return report;
        }
        info!("Found OpenAPI specs in projects: {}", projects.join(", "));

        for name in projects {
            match self.generate_project(&name).await {
                Ok(true) => report.generated.push(name),
                Ok(false) => report.skipped.push(name),
                Err(e) => {
                    error!("Failed to generate docs for {}: {}", name, e);
                    report.failed.push(name);
                }
            }
        }
        report
    }

    /// `Ok(false)` when the project no longer has specs.
    async fn generate_project(&self, name: &str) -> Result<bool> {
        let project = discover::project(&self.root, name)?;
        if project.specs.is_empty() {
            return Ok(false);
        }
        info!("Generating docs for {} from {} spec(s)", name, project.specs.len());

        let source = OpenApiSource::new(project.specs);
        self.generator
            .generate_files(GenerateOptions {
                input: &source,
                output: &project.output_dir,
                include_description: self.include_description,
            })
            .await?;
        info!("Generated docs for {} at {}", name, project.output_dir.display());
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::discover::tests::touch;
    use crate::error::Error;
    use std::path::{Path, PathBuf};
    use std::sync::Mutex;
    use tempfile::TempDir;

    #[derive(Debug, Clone, PartialEq, Eq)]
    struct Call {
        input: Vec<PathBuf>,
        output: PathBuf,
        include_description: bool,
    }

    /// Records calls; fails for outputs under any project in `fail`.
    #[derive(Default)]
    struct Recorder {
        calls: Mutex<Vec<Call>>,
        fail: Vec<String>,
    }

    impl DocsGenerator for Recorder {
        async fn generate_files(&self, options: GenerateOptions<'_>) -> Result<Vec<PathBuf>> {
            let mut input = options.input.input().to_vec();
            input.sort();
            self.calls.lock().unwrap().push(Call {
                input,
                output: options.output.to_path_buf(),
                include_description: options.include_description,
            });
            if self
                .fail
                .iter()
                .any(|p| options.output.components().any(|c| c.as_os_str() == p.as_str()))
            {
                return Err(Error::Render {
                    name: "index".to_string(),
                    message: "boom".to_string(),
                });
            }
            Ok(Vec::new())
        }
    }

    fn calls(driver: &Driver<Recorder>) -> Vec<Call> {
        driver.generator().calls.lock().unwrap().clone()
    }

    fn output(root: &Path, project: &str) -> PathBuf {
        root.join(project).join("docs/openapi/(generated)")
    }

    #[tokio::test]
    async fn scenario_generates_only_qualifying_project() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "projA/openapi/a.yaml");
        touch(dir.path(), "projA/openapi/b.yml");
        std::fs::create_dir_all(dir.path().join("projB/openapi")).unwrap();
        touch(dir.path(), "_hidden/openapi/c.yaml");

        let driver = Driver::new(ContentRoot::new(dir.path()), Recorder::default());
        let report = driver.run().await;

        assert_eq!(report.generated, vec!["projA".to_string()]);
        assert_eq!(
            calls(&driver),
            vec![Call {
                input: vec![
                    dir.path().join("projA/openapi/a.yaml"),
                    dir.path().join("projA/openapi/b.yml"),
                ],
                output: output(dir.path(), "projA"),
                include_description: true,
            }]
        );
    }

    #[tokio::test]
    #[tracing_test::traced_test]
    async fn nothing_found_means_no_calls() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "api/openapi/spec.json");

        let driver = Driver::new(ContentRoot::new(dir.path()), Recorder::default());
        let report = driver.run().await;

        assert!(report.is_empty());
        assert!(calls(&driver).is_empty());
        logs_assert(|lines: &[&str]| {
            match lines
                .iter()
                .filter(|line| line.contains("No OpenAPI specs found in any project"))
                .count()
            {
                1 => Ok(()),
                n => Err(format!("expected one \"no specs\" line, got {}", n)),
            }
        });
        assert!(!logs_contain("Generating docs for"));
    }

    #[tokio::test]
    async fn missing_root_means_no_calls() {
        let dir = TempDir::new().unwrap();
        let driver = Driver::new(ContentRoot::new(dir.path().join("gone")), Recorder::default());

        assert!(driver.run().await.is_empty());
        assert!(calls(&driver).is_empty());
    }

    #[tokio::test]
    #[tracing_test::traced_test]
    async fn one_failure_does_not_stop_the_rest() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "alpha/openapi/a.yaml");
        touch(dir.path(), "beta/openapi/b.yaml");
        let root = ContentRoot::new(dir.path());
        // fail whichever project the listing yields first
        let order = discover::find_projects(&root);
        let (first, second) = (order[0].clone(), order[1].clone());
        let recorder = Recorder {
            fail: vec![first.clone()],
            ..Recorder::default()
        };

        let driver = Driver::new(root, recorder);
        let report = driver.run().await;

        assert_eq!(report.failed, vec![first.clone()]);
        assert_eq!(report.generated, vec![second.clone()]);
        let outputs: Vec<PathBuf> = calls(&driver).into_iter().map(|c| c.output).collect();
        assert_eq!(outputs, vec![output(dir.path(), &first), output(dir.path(), &second)]);

        let failed = format!("Failed to generate docs for {}: ", first);
        let generated = format!("Generated docs for {} at ", second);
        logs_assert(|lines: &[&str]| {
            let failed_at = lines.iter().position(|l| l.contains(&failed));
            let generated_at = lines.iter().position(|l| l.contains(&generated));
            match (failed_at, generated_at) {
                (Some(f), Some(g)) if f < g => Ok(()),
                other => Err(format!("unexpected log positions {:?}", other)),
            }
        });
        assert!(logs_contain("boom"));
    }

    #[tokio::test]
    async fn calls_follow_discovery_order() {
        let dir = TempDir::new().unwrap();
        for name in ["one", "two", "three"] {
            touch(dir.path(), &format!("{}/openapi/spec.yaml", name));
        }
        let root = ContentRoot::new(dir.path());
        let expected: Vec<PathBuf> = discover::find_projects(&root)
            .iter()
            .map(|p| output(dir.path(), p))
            .collect();

        let driver = Driver::new(root, Recorder::default()).include_description(false);
        driver.run().await;

        let calls = calls(&driver);
        let outputs: Vec<PathBuf> = calls.iter().map(|c| c.output.clone()).collect();
        assert_eq!(outputs, expected);
        assert!(calls.iter().all(|c| !c.include_description));
    }
}
