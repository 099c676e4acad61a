//! One job per (platform, compiler) pair.

use crate::core::catalog::{Compiler, LinuxToolchain, Platform, XcodeMode};
use crate::workflow::schema::Job;
use crate::workflow::steps::{self, JobContext};

/// Runner label for Linux jobs; the toolchain comes from the container.
pub const LINUX_RUNNER: &str = "ubuntu-latest";

/// Stable job key, `<platform>-<compiler>`.
pub fn job_id(platform: &Platform, compiler: &Compiler) -> String {
    format!("{}-{}", platform.id, compiler.id)
}

/// Display name; umbrella platforms also name the Xcode version.
pub fn job_name(platform: &Platform, compiler: &Compiler) -> String {
    if platform.sub_platforms.is_empty() {
        format!("{} ({})", platform.name, compiler.name)
    } else {
        format!(
            "{} ({}, Xcode {})",
            platform.name,
            compiler.name,
            compiler.mac.xcode_version()
        )
    }
}

/// Build the job for one matrix cell.
pub fn build_job(ctx: &JobContext<'_>) -> Job {
    let platform = ctx.platform;
    let compiler = ctx.compiler;
    let id = job_id(platform, compiler);
    let name = job_name(platform, compiler);

    let mut job = if platform.is_linux() {
        let job = Job::new(name.as_str(), LINUX_RUNNER);
        match compiler.linux {
            LinuxToolchain::Container(image) => job.with_container(image),
            LinuxToolchain::Setup(_) => job,
        }
    } else {
        let job = Job::new(name.as_str(), compiler.mac.image());
        if compiler.uses_custom_toolchain() {
            job.with_env("TOOLCHAINS", "swift")
        } else {
            job
        }
    };

    job.steps.push(steps::checkout());
    job.steps.push(steps::make_logs_dir());
    if platform.is_apple() {
        job.steps.push(steps::install_xcbeautify());
    }

    if platform.is_linux() {
        if let LinuxToolchain::Setup(version) = compiler.linux {
            job.steps.push(steps::setup_swift(version));
        }
    } else {
        match compiler.mac {
            XcodeMode::Toolchain {
                version, branch, ..
            } => job.steps.extend(steps::install_toolchain(branch, version)),
            XcodeMode::Xcode { version, .. } => job.steps.push(steps::select_xcode(version)),
        }
    }

    if platform.needs_destination {
        job.steps.extend(steps::workspace_build(ctx));
    } else {
        job.steps.extend(steps::direct_build(ctx));
    }

    if ctx.repo.upload_logs {
        job.steps.push(steps::upload_logs(&id));
    }
    if ctx.repo.notify {
        job.steps.push(steps::notify(&name));
    }

    job
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::catalog::Catalog;
    use crate::core::{CompilerId, Configuration, PlatformId, Repo, TestMode};
    use crate::test_support::sample_repo;

    fn job_for(catalog: &Catalog, repo: &Repo, platform: PlatformId, compiler: CompilerId) -> Job {
        let configs = [Configuration::Release];
        build_job(&JobContext {
            catalog,
            repo,
            platform: catalog.platform(platform).unwrap(),
            compiler: catalog.compiler(compiler).unwrap(),
            configurations: &configs,
        })
    }

    fn step_names(job: &Job) -> Vec<&str> {
        job.steps.iter().filter_map(|s| s.name.as_deref()).collect()
    }

    #[test]
    fn test_job_names() {
        let catalog = Catalog::standard();
        let swift61 = catalog.compiler(CompilerId::Swift61).unwrap();

        let linux = catalog.platform(PlatformId::Linux).unwrap();
        assert_eq!(job_id(linux, swift61), "linux-swift61");
        assert_eq!(job_name(linux, swift61), "Linux (Swift 6.1)");

        let xcode = catalog.platform(PlatformId::Xcode).unwrap();
        assert_eq!(job_name(xcode, swift61), "Xcode (Swift 6.1, Xcode 16.4)");
    }

    #[test]
    fn test_linux_job_runs_in_container() {
        let catalog = Catalog::standard();
        let repo = sample_repo(&[PlatformId::Linux], &[CompilerId::Swift59], TestMode::Test);
        let job = job_for(&catalog, &repo, PlatformId::Linux, CompilerId::Swift59);

        assert_eq!(job.runs_on, LINUX_RUNNER);
        assert_eq!(job.container.as_deref(), Some("swift:5.9-jammy"));
        assert!(job.env.is_empty());
        assert_eq!(
            step_names(&job),
            vec![
                "Checkout",
                "Make Logs Directory",
                "Swift Version",
                "Build (Release)",
                "Test (Release)",
                "Upload Logs"
            ]
        );
    }

    #[test]
    fn test_macos_job_selects_xcode() {
        let catalog = Catalog::standard();
        let repo = sample_repo(&[PlatformId::MacOS], &[CompilerId::Swift510], TestMode::Build);
        let job = job_for(&catalog, &repo, PlatformId::MacOS, CompilerId::Swift510);

        assert_eq!(job.runs_on, "macos-14");
        assert!(job.container.is_none());
        assert_eq!(
            step_names(&job),
            vec![
                "Checkout",
                "Make Logs Directory",
                "Install xcbeautify",
                "Xcode Version",
                "Swift Version",
                "Build (Release)",
                "Upload Logs"
            ]
        );
    }

    #[test]
    fn test_nightly_job_installs_toolchain() {
        let catalog = Catalog::standard();
        let repo = sample_repo(&[PlatformId::MacOS], &[CompilerId::SwiftNightly], TestMode::Build);
        let job = job_for(&catalog, &repo, PlatformId::MacOS, CompilerId::SwiftNightly);

        assert_eq!(job.env.get("TOOLCHAINS").map(String::as_str), Some("swift"));
        let names = step_names(&job);
        assert!(names.contains(&"Install Toolchain"));
        assert_eq!(names.iter().filter(|n| **n == "Xcode Version").count(), 1);
    }

    #[test]
    fn test_setup_swift_on_linux() {
        let mut catalog_compiler = *Catalog::standard().compiler(CompilerId::Swift61).unwrap();
        catalog_compiler.linux = LinuxToolchain::Setup("6.1");

        let catalog = Catalog::standard();
        let repo = sample_repo(&[PlatformId::Linux], &[CompilerId::Swift61], TestMode::Build);
        let configs = [Configuration::Release];
        let job = build_job(&JobContext {
            catalog: &catalog,
            repo: &repo,
            platform: catalog.platform(PlatformId::Linux).unwrap(),
            compiler: &catalog_compiler,
            configurations: &configs,
        });

        assert!(job.container.is_none());
        let setup = &job.steps[2];
        assert_eq!(setup.uses.as_deref(), Some("swift-actions/setup-swift@v2"));
        assert_eq!(
            setup.with_inputs.get("swift-version"),
            Some(&serde_yaml::Value::from("6.1"))
        );
    }

    #[test]
    fn test_notify_and_upload_flags() {
        let catalog = Catalog::standard();
        let mut repo = sample_repo(&[PlatformId::IOS], &[CompilerId::Swift60], TestMode::Build);
        repo.upload_logs = false;
        repo.notify = true;

        let job = job_for(&catalog, &repo, PlatformId::IOS, CompilerId::Swift60);
        let names = step_names(&job);
        assert!(!names.contains(&"Upload Logs"));
        assert_eq!(names.last(), Some(&"Slack Notification"));

        let slack = job.steps.last().unwrap();
        assert_eq!(
            slack.with_inputs.get("message"),
            Some(&serde_yaml::Value::from("iOS (Swift 6.0)"))
        );
    }
}
