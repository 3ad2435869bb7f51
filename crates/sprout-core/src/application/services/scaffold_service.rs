//! Scaffold Service - main application orchestrator.
//!
//! This service coordinates the entire scaffolding workflow:
//! 1. Read the dependency lists from the bundled manifest
//! 2. Create the project directory
//! 3. `npm init -y`, then merge the fixed scripts into `package.json`
//! 4. Install runtime, then dev dependencies
//! 5. Copy config files and the source tree (concurrently)
//!
//! Any failure after step 2 removes the project directory before the error
//! is returned.

use std::path::{Path, PathBuf};
use std::thread;

use tracing::{debug, info, instrument, warn};

use crate::{
    application::{
        ApplicationError,
        ports::{Filesystem, ProcessRunner, ProgressReporter},
        services::package_manager::{PackageManager, run_checked},
    },
    domain::{
        CopyJob, DependencyKind, Manifest, ManifestPatch, ProjectName, ScaffoldStage,
        TOOLING_PACKAGES, TemplateBundle, installable_specifiers,
    },
    error::{SproutError, SproutResult},
};

/// Everything that stays fixed between runs.
#[derive(Debug, Clone)]
pub struct ScaffoldSettings {
    pub package_manager: PackageManager,
    pub bundle: TemplateBundle,
    pub patch: ManifestPatch,
    /// Scaffold into a directory that already has entries.
    pub allow_existing: bool,
}

impl ScaffoldSettings {
    pub fn new(bundle: TemplateBundle) -> Self {
        Self {
            package_manager: PackageManager::default(),
            bundle,
            patch: ManifestPatch::standard(),
            allow_existing: false,
        }
    }
}

/// One project to create.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScaffoldRequest {
    pub name: ProjectName,
    /// Absolute path of the project directory.
    pub root: PathBuf,
}

impl ScaffoldRequest {
    pub fn new(name: ProjectName, root: impl Into<PathBuf>) -> Self {
        Self {
            name,
            root: root.into(),
        }
    }
}

/// What a successful run produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScaffoldReport {
    pub name: ProjectName,
    pub root: PathBuf,
    pub dependencies: Vec<String>,
    pub dev_dependencies: Vec<String>,
}

/// Specifier lists resolved before anything touches the disk.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct InstallPlan {
    dependencies: Vec<String>,
    dev_dependencies: Vec<String>,
}

/// Main scaffolding service.
pub struct ScaffoldService {
    runner: Box<dyn ProcessRunner>,
    filesystem: Box<dyn Filesystem>,
    progress: Box<dyn ProgressReporter>,
    settings: ScaffoldSettings,
}

impl ScaffoldService {
    /// Create a new scaffold service with the given adapters.
    pub fn new(
        runner: Box<dyn ProcessRunner>,
        filesystem: Box<dyn Filesystem>,
        progress: Box<dyn ProgressReporter>,
        settings: ScaffoldSettings,
    ) -> Self {
        Self {
            runner,
            filesystem,
            progress,
            settings,
        }
    }

    pub fn settings(&self) -> &ScaffoldSettings {
        &self.settings
    }

    /// Scaffold a new project.
    ///
    /// Errors raised before the directory is created leave the disk alone.
    /// Errors raised afterwards are wrapped in
    /// [`ApplicationError::StepFailed`] once the directory has been removed.
    #[instrument(
        skip_all,
        fields(project = %request.name, root = %request.root.display())
    )]
    pub fn scaffold(&self, request: &ScaffoldRequest) -> SproutResult<ScaffoldReport> {
        info!("Scaffolding React project");

        self.check_target(&request.root)?;
        let plan = self.plan_installs()?;
        debug!(
            dependencies = plan.dependencies.len(),
            dev_dependencies = plan.dev_dependencies.len(),
            "Install plan resolved"
        );

        let mut stage = ScaffoldStage::Validating;
        match self.run_steps(&request.root, &plan, &mut stage) {
            Ok(()) => {
                info!("Scaffold completed successfully");
                Ok(ScaffoldReport {
                    name: request.name.clone(),
                    root: request.root.clone(),
                    dependencies: plan.dependencies,
                    dev_dependencies: plan.dev_dependencies,
                })
            }
            Err(err) => {
                let failed_step = stage.next();
                warn!(stage = %failed_step, error = %err, "Scaffold step failed");
                self.progress
                    .fail(&format!("Welp something broke: {err}"));
                if failed_step.needs_rollback() {
                    self.rollback(&request.root);
                }
                Err(ApplicationError::StepFailed {
                    stage: failed_step,
                    source: Box::new(err),
                }
                .into())
            }
        }
    }

    // -------------------------------------------------------------------------
    // Internal Helpers
    // -------------------------------------------------------------------------

    /// Refuse to scaffold over existing content unless explicitly allowed.
    fn check_target(&self, root: &Path) -> SproutResult<()> {
        if self.settings.allow_existing || !self.filesystem.exists(root) {
            return Ok(());
        }
        if self.filesystem.is_empty_dir(root)? {
            return Ok(());
        }
        Err(ApplicationError::ProjectExists {
            path: root.to_path_buf(),
        }
        .into())
    }

    /// Read the bundled manifest and derive both install lists.
    fn plan_installs(&self) -> SproutResult<InstallPlan> {
        let path = self.settings.bundle.manifest_path();
        let text = self.filesystem.read_to_string(&path)?;
        let source = Manifest::from_json_str(&text)?;

        Ok(InstallPlan {
            dependencies: installable_specifiers(
                source.dependency_entries(DependencyKind::Runtime),
                TOOLING_PACKAGES,
            ),
            dev_dependencies: installable_specifiers(
                source.dependency_entries(DependencyKind::Dev),
                TOOLING_PACKAGES,
            ),
        })
    }

    /// Walk the stages in order. `stage` always holds the last stage reached.
    fn run_steps(
        &self,
        root: &Path,
        plan: &InstallPlan,
        stage: &mut ScaffoldStage,
    ) -> SproutResult<()> {
        self.filesystem.create_dir_all(root)?;
        *stage = stage.next();

        self.init_manifest(root)?;
        *stage = stage.next();

        self.patch_manifest(root)?;
        *stage = stage.next();

        self.install(root, DependencyKind::Runtime, &plan.dependencies)?;
        *stage = stage.next();

        self.install(root, DependencyKind::Dev, &plan.dev_dependencies)?;
        *stage = stage.next();

        self.copy_templates(root)?;
        *stage = stage.next();

        debug_assert_eq!(*stage, ScaffoldStage::TemplatesCopied);
        *stage = stage.next();
        Ok(())
    }

    fn init_manifest(&self, root: &Path) -> SproutResult<()> {
        let pm = &self.settings.package_manager;
        self.progress
            .start(&format!("Initializing package with {}", pm.program()));
        run_checked(self.runner.as_ref(), &pm.init_invocation(root))?;
        self.progress
            .succeed(&format!("{} init ran successfully", pm.program()));
        Ok(())
    }

    fn patch_manifest(&self, root: &Path) -> SproutResult<()> {
        self.progress.start("Adding configuration to npm package");
        let path = root.join(crate::domain::template::MANIFEST_FILE);

        let text = self.filesystem.read_to_string(&path)?;
        let mut manifest = Manifest::from_json_str(&text)?;
        self.settings.patch.apply(&mut manifest);
        self.filesystem
            .write_file(&path, &manifest.to_json_string()?)?;

        self.progress.succeed("npm package configured");
        Ok(())
    }

    fn install(&self, root: &Path, kind: DependencyKind, specifiers: &[String]) -> SproutResult<()> {
        self.progress
            .info(&format!("Initializing installation of {kind}"));
        let invocation = self
            .settings
            .package_manager
            .install_invocation(root, kind, specifiers);
        run_checked(self.runner.as_ref(), &invocation)?;
        self.progress.succeed(&format!("{kind} installed"));
        Ok(())
    }

    /// Issue every copy at once and wait for all of them.
    ///
    /// Destinations are disjoint, so the copies share nothing but the
    /// filesystem handle.
    fn copy_templates(&self, root: &Path) -> SproutResult<()> {
        self.progress
            .start("Copying configuration files and React application files");

        let skip_jest_config = self.settings.patch.has_block("jest");
        let jobs = self.settings.bundle.copy_jobs(root, skip_jest_config);
        let filesystem: &dyn Filesystem = self.filesystem.as_ref();

        let results: Vec<SproutResult<()>> = thread::scope(|scope| {
            let handles: Vec<_> = jobs
                .iter()
                .map(|job| scope.spawn(move || copy_one(filesystem, job)))
                .collect();
            handles
                .into_iter()
                .map(|handle| {
                    handle.join().unwrap_or_else(|_| {
                        Err(SproutError::Internal {
                            message: "template copy worker panicked".into(),
                        })
                    })
                })
                .collect()
        });
        results.into_iter().collect::<SproutResult<Vec<()>>>()?;

        self.progress.succeed("React codebase ready to go!");
        Ok(())
    }

    /// Best-effort removal of the project directory.
    fn rollback(&self, root: &Path) {
        if !self.filesystem.exists(root) {
            debug!(path = %root.display(), "Nothing to roll back");
            return;
        }
        match self.filesystem.remove_dir_all(root) {
            Ok(()) => info!(path = %root.display(), "Rollback successful"),
            Err(e) => warn!(error = %e, path = %root.display(), "Rollback failed"),
        }
    }
}

fn copy_one(filesystem: &dyn Filesystem, job: &CopyJob) -> SproutResult<()> {
    match job {
        CopyJob::File { from, to } => filesystem.copy_file(from, to),
        CopyJob::Tree { from, to } => filesystem.copy_tree(from, to),
    }
}
