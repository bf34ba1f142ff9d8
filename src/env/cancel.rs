//! Cancellable lookups.
//!
//! Every query on [`CancellableEnvironment`] consults the monitor before
//! doing any work. A raised flag fails the query with
//! [`LookupError::Aborted`] instead of returning "not found".

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use tokio_util::sync::CancellationToken;

use crate::base::QualifiedName;
use crate::classpath::{Answer, ModuleFilter};
use crate::error::{LookupError, LookupResult};

use super::environment::NameEnvironment;

/// Something that can be asked whether the caller gave up.
pub trait CancellationSource {
    fn is_cancelled(&self) -> bool;
}

impl CancellationSource for CancellationToken {
    fn is_cancelled(&self) -> bool {
        CancellationToken::is_cancelled(self)
    }
}

impl CancellationSource for AtomicBool {
    fn is_cancelled(&self) -> bool {
        self.load(Ordering::Relaxed)
    }
}

impl<T: CancellationSource + ?Sized> CancellationSource for Arc<T> {
    fn is_cancelled(&self) -> bool {
        (**self).is_cancelled()
    }
}

impl<T: CancellationSource + ?Sized> CancellationSource for &T {
    fn is_cancelled(&self) -> bool {
        (**self).is_cancelled()
    }
}

/// A [`NameEnvironment`] guarded by an optional cancellation monitor.
#[derive(Debug)]
pub struct CancellableEnvironment<C = CancellationToken> {
    environment: NameEnvironment,
    monitor: Option<C>,
}

impl<C: CancellationSource> CancellableEnvironment<C> {
    pub fn new(environment: NameEnvironment, monitor: Option<C>) -> Self {
        Self {
            environment,
            monitor,
        }
    }

    pub fn set_monitor(&mut self, monitor: Option<C>) {
        self.monitor = monitor;
    }

    pub fn monitor(&self) -> Option<&C> {
        self.monitor.as_ref()
    }

    pub fn environment(&self) -> &NameEnvironment {
        &self.environment
    }

    pub fn environment_mut(&mut self) -> &mut NameEnvironment {
        &mut self.environment
    }

    pub fn into_inner(self) -> NameEnvironment {
        self.environment
    }

    fn check_cancelled(&self) -> LookupResult<()> {
        if self.monitor.as_ref().is_some_and(|m| m.is_cancelled()) {
            tracing::debug!("cancelling lookup");
            return Err(LookupError::Aborted);
        }
        Ok(())
    }

    pub fn find_type(
        &self,
        name: &QualifiedName,
        filter: &ModuleFilter,
    ) -> LookupResult<Option<Answer>> {
        self.check_cancelled()?;
        Ok(self.environment.find_type(name, filter))
    }

    pub fn find_type_in_package<S: AsRef<str>>(
        &self,
        type_name: &str,
        package: &[S],
        filter: &ModuleFilter,
    ) -> LookupResult<Option<Answer>> {
        self.check_cancelled()?;
        Ok(self.environment.find_type_in_package(type_name, package, filter))
    }

    pub fn find_type_compound<S: AsRef<str>>(
        &self,
        compound: &[S],
        filter: &ModuleFilter,
    ) -> LookupResult<Option<Answer>> {
        self.check_cancelled()?;
        Ok(self.environment.find_type_compound(compound, filter))
    }

    pub fn is_package(&self, qualified_package: &str, filter: &ModuleFilter) -> LookupResult<bool> {
        self.check_cancelled()?;
        Ok(self.environment.is_package(qualified_package, filter))
    }

    pub fn is_package_in<S: AsRef<str>>(
        &self,
        compound: &[S],
        package_name: &str,
        filter: &ModuleFilter,
    ) -> LookupResult<bool> {
        self.check_cancelled()?;
        Ok(self.environment.is_package_in(compound, package_name, filter))
    }

    pub fn cleanup(&mut self) {
        self.environment.cleanup();
    }
}
