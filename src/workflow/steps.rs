//! Step builders for generated jobs.
//!
//! Each function returns finished [`Step`] values; nothing here knows about
//! job ordering, which lives in [`super::job`].

use crate::core::catalog::{Catalog, Compiler, Configuration, Platform};
use crate::core::Repo;
use crate::workflow::schema::Step;

const CHECKOUT_ACTION: &str = "actions/checkout@v4";
const SETUP_SWIFT_ACTION: &str = "swift-actions/setup-swift@v2";
const UPLOAD_ACTION: &str = "actions/upload-artifact@v4";
const SLACK_ACTION: &str = "act10ns/slack@v2";

/// Directory build logs are collected into.
pub const LOG_DIR: &str = "logs";

const BEAUTIFY: &str = "xcbeautify --renderer github-actions";
const TOOLCHAIN_PATH: &str = "export PATH=\"$PWD/swift-latest:$PATH\"; ";

/// Everything a job's steps depend on.
#[derive(Debug, Clone, Copy)]
pub struct JobContext<'a> {
    pub catalog: &'a Catalog,
    pub repo: &'a Repo,
    pub platform: &'a Platform,
    pub compiler: &'a Compiler,
    pub configurations: &'a [Configuration],
}

impl JobContext<'_> {
    /// Apple runners filter build output through xcbeautify.
    fn beautify(&self) -> bool {
        self.platform.is_apple()
    }

    /// Prefix putting a side-installed toolchain first on the PATH.
    fn path_prefix(&self) -> &'static str {
        if self.platform.is_apple() && self.compiler.uses_custom_toolchain() {
            TOOLCHAIN_PATH
        } else {
            ""
        }
    }

    fn runs_tests_on(&self, target: &Platform) -> bool {
        self.repo.runs_tests() && self.compiler.supports_testing(target.id)
    }
}

/// `command 2>&1 | tee logs/<log> [| xcbeautify]`
fn logged(command: &str, log: &str, beautify: bool) -> String {
    let mut line = format!("{} 2>&1 | tee {}/{}.log", command, LOG_DIR, log);
    if beautify {
        line.push_str(" | ");
        line.push_str(BEAUTIFY);
    }
    line
}

pub fn checkout() -> Step {
    Step::uses(CHECKOUT_ACTION).with_name("Checkout")
}

pub fn make_logs_dir() -> Step {
    Step::run(format!("mkdir -p {}", LOG_DIR)).with_name("Make Logs Directory")
}

pub fn install_xcbeautify() -> Step {
    Step::run("command -v xcbeautify || brew install xcbeautify").with_name("Install xcbeautify")
}

/// Install a swift.org toolchain over the base Xcode.
///
/// The `development` branch installs whichever snapshot `latest-build.yml`
/// names; any other branch is a release package with a fixed name.
pub fn install_toolchain(branch: &str, xcode_version: &str) -> Vec<Step> {
    let download = if branch == "development" {
        format!(
            "branch=\"{branch}\"\n\
             curl -fsSL -o latest-build.yml \"https://download.swift.org/$branch/xcode/latest-build.yml\"\n\
             dir=$(grep '^dir:' latest-build.yml | sed -e 's/^dir: *//')\n\
             download=$(grep '^download:' latest-build.yml | sed -e 's/^download: *//')\n\
             echo \"Installing toolchain $dir\"\n\
             curl -fsSL -o \"$download\" \"https://download.swift.org/$branch/xcode/$dir/$download\"\n\
             sudo installer -pkg \"$download\" -target /\n\
             ln -s \"/Library/Developer/Toolchains/$dir.xctoolchain/usr/bin\" swift-latest\n"
        )
    } else {
        format!(
            "curl -fsSL -o {branch}-osx.pkg \"https://download.swift.org/{lower}/xcode/{branch}/{branch}-osx.pkg\"\n\
             sudo installer -pkg {branch}-osx.pkg -target /\n\
             ln -s \"/Library/Developer/Toolchains/{branch}.xctoolchain/usr/bin\" swift-latest\n",
            lower = branch.to_lowercase(),
        )
    };

    let install = format!(
        "{download}\
         sudo xcode-select -s /Applications/Xcode_{xcode_version}.app\n\
         {TOOLCHAIN_PATH}swift --version\n"
    );

    vec![
        Step::run(install)
            .with_name("Install Toolchain")
            .with_shell("bash"),
        Step::run("xcodebuild -version\nxcrun swift --version\n").with_name("Xcode Version"),
    ]
}

/// Select a pre-installed Xcode.
pub fn select_xcode(version: &str) -> Step {
    Step::run(format!(
        "sudo xcode-select -s /Applications/Xcode_{}.app\nxcodebuild -version\nswift --version\n",
        version
    ))
    .with_name("Xcode Version")
}

/// Install a named Swift version on a Linux runner.
pub fn setup_swift(version: &str) -> Step {
    Step::uses(SETUP_SWIFT_ACTION)
        .with_name("Install Swift")
        .with_input("swift-version", version)
}

/// Build and test with SwiftPM directly.
pub fn direct_build(ctx: &JobContext<'_>) -> Vec<Step> {
    let prefix = ctx.path_prefix();
    let platform = ctx.platform.id.as_str();
    let beautify = ctx.beautify();
    let mut steps = vec![Step::run(format!("{}swift --version", prefix)).with_name("Swift Version")];

    for config in ctx.configurations {
        let quiet = if ctx.compiler.quiet { " --quiet" } else { "" };
        let build = format!(
            "{}swift build --configuration {}{}",
            prefix,
            config.as_str(),
            quiet
        );
        steps.push(
            Step::run(logged(
                &build,
                &format!("{}-build-{}", platform, config),
                beautify,
            ))
            .with_name(format!("Build ({})", config.name()))
            .with_shell("bash"),
        );

        if !ctx.runs_tests_on(ctx.platform) {
            continue;
        }

        let testing = if config.is_release() {
            " -Xswiftc -enable-testing"
        } else {
            ""
        };
        let test = format!(
            "{}swift test --configuration {}{}",
            prefix,
            config.as_str(),
            testing
        );

        if ctx.compiler.separate_test_frameworks {
            let passes = [
                ("XCTest", "xctest", "--disable-swift-testing"),
                ("Swift Testing", "swift-testing", "--disable-xctest"),
            ];
            for (label, slug, flag) in passes {
                steps.push(
                    Step::run(logged(
                        &format!("{} {}", test, flag),
                        &format!("{}-test-{}-{}", platform, slug, config),
                        beautify,
                    ))
                    .with_name(format!("Test ({}, {})", label, config.name()))
                    .with_shell("bash"),
                );
            }
        } else {
            steps.push(
                Step::run(logged(
                    &test,
                    &format!("{}-test-{}", platform, config),
                    beautify,
                ))
                .with_name(format!("Test ({})", config.name()))
                .with_shell("bash"),
            );
        }
    }

    steps
}

/// Shell snippet exporting `WORKSPACE` and `SCHEME` for a device target.
fn detect_scheme_script(package: &str, target: &Platform) -> String {
    format!(
        r#"WORKSPACE="{package}.xcworkspace"
if [[ ! -e "$WORKSPACE" ]]
then
  WORKSPACE="."
  GOTPACKAGE=$(xcodebuild -workspace . -list | (grep "{package}-Package" || true))
  if [[ $GOTPACKAGE != "" ]]
  then
    SCHEME="{package}-Package"
  else
    SCHEME="{package}"
  fi
else
  SCHEME="{package}-{name}"
fi
echo "WORKSPACE=$WORKSPACE" >> "$GITHUB_ENV"
echo "SCHEME=$SCHEME" >> "$GITHUB_ENV"
"#,
        name = target.name,
    )
}

/// Build and test each device target with xcodebuild.
pub fn workspace_build(ctx: &JobContext<'_>) -> Vec<Step> {
    let prefix = ctx.path_prefix();
    let mut steps = Vec::new();

    for target in ctx.platform.device_targets(ctx.catalog) {
        steps.push(
            Step::run(detect_scheme_script(&ctx.repo.package, target))
                .with_name(format!("Detect Workspace & Scheme ({})", target.name))
                .with_shell("bash"),
        );

        let destination = target
            .destination
            .map(|d| format!(" -destination \"{}\"", d))
            .unwrap_or_default();

        for config in ctx.configurations {
            let testability = if config.is_release() {
                " ENABLE_TESTABILITY=YES"
            } else {
                ""
            };
            let args = format!(
                "-workspace \"$WORKSPACE\" -scheme \"$SCHEME\"{} -configuration {} CODE_SIGN_IDENTITY=\"\" CODE_SIGNING_REQUIRED=NO{}",
                destination,
                config.xcode_id(),
                testability
            );

            steps.push(
                Step::run(logged(
                    &format!("{}xcodebuild clean build {}", prefix, args),
                    &format!("xcodebuild-{}-build-{}", target.id, config),
                    true,
                ))
                .with_name(format!("Build ({} {})", target.name, config.name()))
                .with_shell("bash"),
            );

            if ctx.runs_tests_on(target) {
                steps.push(
                    Step::run(logged(
                        &format!("{}xcodebuild test {}", prefix, args),
                        &format!("xcodebuild-{}-test-{}", target.id, config),
                        true,
                    ))
                    .with_name(format!("Test ({} {})", target.name, config.name()))
                    .with_shell("bash"),
                );
            }
        }
    }

    steps
}

pub fn upload_logs(job_id: &str) -> Step {
    Step::uses(UPLOAD_ACTION)
        .with_name("Upload Logs")
        .with_if("always()")
        .with_input("name", format!("logs-{}", job_id))
        .with_input("path", LOG_DIR)
}

pub fn notify(job_name: &str) -> Step {
    Step::uses(SLACK_ACTION)
        .with_name("Slack Notification")
        .with_if("always()")
        .with_input("status", "${{ job.status }}")
        .with_input("message", job_name)
        .with_input("webhook-url", "${{ secrets.SLACK_WEBHOOK }}")
}
