//! Recording [`Toolchain`] used by the unit tests.

use crate::error::{Error, Result};
use crate::toolchain::{TargetOutcome, Toolchain};
use std::cell::RefCell;
use std::collections::{HashMap, HashSet};

#[derive(Debug, Default)]
pub struct FakeToolchain {
    importable: HashSet<String>,
    failing_installs: HashSet<String>,
    outcomes: HashMap<String, TargetOutcome>,
    calls: RefCell<Vec<String>>,
}

impl FakeToolchain {
    pub fn with_importable(mut self, names: &[&str]) -> Self {
        self.importable
            .extend(names.iter().map(ToString::to_string));
        self
    }

    pub fn with_failing_install(mut self, name: &str) -> Self {
        self.failing_installs.insert(name.to_string());
        self
    }

    pub fn with_raising(mut self, path: &str, trace: &str) -> Self {
        self.outcomes.insert(
            path.to_string(),
            TargetOutcome::Raised {
                trace: trace.to_string(),
            },
        );
        self
    }

    /// Every call made so far, e.g. `"install requests"`.
    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }

    pub fn installed(&self) -> Vec<String> {
        self.calls_of("install")
    }

    pub fn ran(&self) -> Vec<String> {
        self.calls_of("run_main")
    }

    pub fn bundled(&self) -> Vec<String> {
        self.calls_of("bundle")
    }

    fn calls_of(&self, kind: &str) -> Vec<String> {
        let prefix = format!("{kind} ");
        self.calls
            .borrow()
            .iter()
            .filter_map(|call| call.strip_prefix(&prefix).map(ToString::to_string))
            .collect()
    }

    fn record(&self, kind: &str, arg: &str) {
        self.calls.borrow_mut().push(format!("{kind} {arg}"));
    }
}

impl Toolchain for FakeToolchain {
    fn can_import(&self, name: &str) -> Result<bool> {
        self.record("can_import", name);
        Ok(self.importable.contains(name))
    }

    fn install(&self, name: &str) -> Result<()> {
        self.record("install", name);
        if self.failing_installs.contains(name) {
            return Err(Error::InstallFailed {
                name: name.to_string(),
                code: Some(1),
            });
        }
        Ok(())
    }

    fn run_main(&self, path: &str) -> Result<TargetOutcome> {
        self.record("run_main", path);
        Ok(self
            .outcomes
            .get(path)
            .cloned()
            .unwrap_or(TargetOutcome::Completed { exit_code: Some(0) }))
    }

    fn bundle(&self, path: &str) -> Result<()> {
        self.record("bundle", path);
        Ok(())
    }
}
