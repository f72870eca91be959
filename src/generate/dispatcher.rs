//! Platform-matched invocation of generation entry points.

use std::io;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::generate::{GenerationPlan, PlatformKind};
use crate::shell::{self, CommandResult};
use crate::ui::UserInterface;

/// Type of the injected script runner: (script, args, cwd).
pub type ScriptRunner<'a> = &'a dyn Fn(&Path, &[String], &Path) -> io::Result<CommandResult>;

/// How one dispatch attempt ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttemptStatus {
    /// The entry point ran and exited zero.
    Succeeded,
    /// The entry point ran but exited non-zero.
    Failed { exit_code: Option<i32> },
    /// The entry point could not be launched at all.
    Unavailable { message: String },
}

/// One invoked (or attempted) entry point.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchAttempt {
    pub platform: PlatformKind,
    pub script: PathBuf,
    pub status: AttemptStatus,
}

/// What the dispatcher did for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchReport {
    /// Platform the dispatch ran against.
    pub platform: PlatformKind,
    /// Rows that matched the platform, in table order.
    pub attempts: Vec<DispatchAttempt>,
}

impl DispatchReport {
    /// Whether any entry point process was actually launched.
    pub fn invoked(&self) -> bool {
        self.attempts
            .iter()
            .any(|a| !matches!(a.status, AttemptStatus::Unavailable { .. }))
    }

    /// Whether every matched entry point ran and exited zero.
    ///
    /// A platform with no matching rows has nothing to fail; that case is
    /// reported as unsupported, not as a generation failure.
    pub fn all_succeeded(&self) -> bool {
        self.attempts
            .iter()
            .all(|a| a.status == AttemptStatus::Succeeded)
    }

    /// Whether no row in the table matched the platform.
    pub fn unsupported(&self) -> bool {
        self.attempts.is_empty()
    }
}

/// Walks the dispatch table and launches matching entry points.
///
/// Each row is checked independently against the current platform rather
/// than matched exclusively, so adding a platform is a new row, not a
/// restructured switch.
pub struct PlatformDispatcher<'a> {
    runner: ScriptRunner<'a>,
}

impl<'a> PlatformDispatcher<'a> {
    /// Create a dispatcher with an injected script runner.
    pub fn new(runner: ScriptRunner<'a>) -> Self {
        Self { runner }
    }

    /// Create a dispatcher that launches real processes.
    pub fn system() -> PlatformDispatcher<'static> {
        PlatformDispatcher {
            runner: &|script, args, cwd| shell::run_script(script, args, cwd),
        }
    }

    /// Invoke every entry point matching `platform`, from `root`.
    ///
    /// Launch failures and non-zero exits are reported as warnings, never
    /// errors: the caller decides what a failed generation means for the
    /// run's exit code.
    pub fn dispatch(
        &self,
        plan: &GenerationPlan,
        platform: PlatformKind,
        root: &Path,
        ui: &mut dyn UserInterface,
    ) -> DispatchReport {
        let mut attempts = Vec::new();

        for entry in &plan.entry_points {
            if entry.platform != platform {
                continue;
            }

            let script = if entry.script.is_absolute() {
                entry.script.clone()
            } else {
                root.join(&entry.script)
            };

            debug!(script = %script.display(), args = ?plan.args, "launching entry point");
            ui.message(&format!("Generating project files via {}", script.display()));

            let status = match (self.runner)(&script, &plan.args, root) {
                Ok(result) => {
                    ui.command_output(&result.stdout);
                    if result.success {
                        AttemptStatus::Succeeded
                    } else {
                        warn!(
                            script = %script.display(),
                            exit_code = ?result.exit_code,
                            "generation failed"
                        );
                        ui.warning(&format!(
                            "Generation failed: {} exited with {:?}",
                            script.display(),
                            result.exit_code
                        ));
                        AttemptStatus::Failed {
                            exit_code: result.exit_code,
                        }
                    }
                }
                Err(e) => {
                    warn!(script = %script.display(), error = %e, "entry point unavailable");
                    ui.warning(&format!(
                        "Generation entry point could not be launched ({}): {}",
                        script.display(),
                        e
                    ));
                    AttemptStatus::Unavailable {
                        message: e.to_string(),
                    }
                }
            };

            attempts.push(DispatchAttempt {
                platform: entry.platform,
                script,
                status,
            });
        }

        if attempts.is_empty() {
            ui.message(&format!(
                "No generation entry point is configured for this platform ({platform})"
            ));
        }

        DispatchReport { platform, attempts }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generate::EntryPoint;
    use crate::ui::MockUI;
    use std::cell::RefCell;
    use std::time::Duration;

    fn plan() -> GenerationPlan {
        GenerationPlan {
            entry_points: vec![
                EntryPoint {
                    platform: PlatformKind::Windows,
                    script: PathBuf::from("Scripts/Generate-Win.bat"),
                },
                EntryPoint {
                    platform: PlatformKind::Linux,
                    script: PathBuf::from("Scripts/Generate-Linux.sh"),
                },
            ],
            args: vec!["nopause".to_string()],
        }
    }

    #[test]
    fn dispatch_invokes_only_the_matching_row() {
        let invoked = RefCell::new(Vec::new());
        let runner = |script: &Path, args: &[String], _cwd: &Path| {
            invoked.borrow_mut().push((script.to_path_buf(), args.to_vec()));
            Ok(CommandResult::success(String::new(), String::new(), Duration::ZERO))
        };
        let dispatcher = PlatformDispatcher::new(&runner);
        let mut ui = MockUI::new();

        let report = dispatcher.dispatch(&plan(), PlatformKind::Linux, Path::new("/proj"), &mut ui);

        let invoked = invoked.borrow();
        assert_eq!(invoked.len(), 1);
        assert_eq!(invoked[0].0, PathBuf::from("/proj/Scripts/Generate-Linux.sh"));
        assert_eq!(invoked[0].1, vec!["nopause".to_string()]);
        assert!(report.invoked());
        assert!(report.all_succeeded());
        assert!(!report.unsupported());
    }

    #[test]
    fn other_platform_invokes_nothing() {
        let calls = RefCell::new(0usize);
        let runner = |_: &Path, _: &[String], _: &Path| {
            *calls.borrow_mut() += 1;
            Ok(CommandResult::success(String::new(), String::new(), Duration::ZERO))
        };
        let dispatcher = PlatformDispatcher::new(&runner);
        let mut ui = MockUI::new();

        let report = dispatcher.dispatch(&plan(), PlatformKind::Other, Path::new("/proj"), &mut ui);

        assert_eq!(*calls.borrow(), 0);
        assert!(!report.invoked());
        assert!(report.unsupported());
        assert!(ui.has_message("No generation entry point"));
    }

    #[test]
    fn nonzero_exit_is_a_failed_attempt() {
        let runner = |_: &Path, _: &[String], _: &Path| {
            Ok(CommandResult::failure(
                Some(1),
                String::new(),
                String::new(),
                Duration::ZERO,
            ))
        };
        let dispatcher = PlatformDispatcher::new(&runner);
        let mut ui = MockUI::new();

        let report = dispatcher.dispatch(&plan(), PlatformKind::Linux, Path::new("/proj"), &mut ui);

        // The process launched, so generation counts as invoked even
        // though it failed.
        assert!(report.invoked());
        assert!(!report.all_succeeded());
        assert!(matches!(
            report.attempts[0].status,
            AttemptStatus::Failed { exit_code: Some(1) }
        ));
        assert!(ui.has_warning("Generation failed"));
    }

    #[test]
    fn launch_error_is_unavailable() {
        let runner = |_: &Path, _: &[String], _: &Path| {
            Err(io::Error::new(io::ErrorKind::NotFound, "No such file"))
        };
        let dispatcher = PlatformDispatcher::new(&runner);
        let mut ui = MockUI::new();

        let report = dispatcher.dispatch(&plan(), PlatformKind::Windows, Path::new("/proj"), &mut ui);

        assert!(!report.invoked());
        assert!(!report.all_succeeded());
        assert!(matches!(
            report.attempts[0].status,
            AttemptStatus::Unavailable { .. }
        ));
        assert!(ui.has_warning("could not be launched"));
    }

    #[test]
    fn absolute_scripts_are_not_rerooted() {
        let invoked = RefCell::new(Vec::new());
        let runner = |script: &Path, _: &[String], _: &Path| {
            invoked.borrow_mut().push(script.to_path_buf());
            Ok(CommandResult::success(String::new(), String::new(), Duration::ZERO))
        };
        let dispatcher = PlatformDispatcher::new(&runner);
        let mut ui = MockUI::new();

        let plan = GenerationPlan {
            entry_points: vec![EntryPoint {
                platform: PlatformKind::Linux,
                script: PathBuf::from("/opt/gen.sh"),
            }],
            args: vec![],
        };
        dispatcher.dispatch(&plan, PlatformKind::Linux, Path::new("/proj"), &mut ui);

        assert_eq!(invoked.borrow().as_slice(), &[PathBuf::from("/opt/gen.sh")]);
    }

    #[test]
    fn empty_report_counts_as_succeeded_but_unsupported() {
        let report = DispatchReport {
            platform: PlatformKind::Other,
            attempts: vec![],
        };
        assert!(report.all_succeeded());
        assert!(report.unsupported());
        assert!(!report.invoked());
    }
}
