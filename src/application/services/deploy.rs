//! Application service — certificate deployment use-case.
//!
//! Runs the linear state machine
//! `Idle → Writing → Validating → Reloading → Done`, exiting to `Failed` at
//! the first failing stage. Imports only from `crate::domain` and
//! `crate::application::ports`.

use std::collections::BTreeSet;
use std::path::PathBuf;
use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::Mutex;

use crate::application::ports::{ConfigValidator, MaterialStore, ProgressReporter, ServiceReloader};
use crate::domain::{
    DeployStage, DeploymentOutcome, DeploymentRequest, ProxyHandle, StageFailure, StoreError,
    TargetLayout,
};

/// Deploys certificates to one proxy.
///
/// Holds no per-deployment state; the lock tables are the only members
/// shared between calls. Deployments of different domains proceed in
/// parallel up to the validation gate; validate + reload is serialized
/// process-wide because the proxy service is shared.
///
/// A domain's lock entry lives only while a deployment of that domain is
/// running or waiting, so the table never outgrows the in-flight set.
pub struct Deployer<S, V, R> {
    store: S,
    validator: V,
    reloader: R,
    layout: TargetLayout,
    proxy: ProxyHandle,
    domain_locks: DashMap<String, Arc<Mutex<()>>>,
    reload_lock: Mutex<()>,
}

impl<S, V, R> Deployer<S, V, R>
where
    S: MaterialStore,
    V: ConfigValidator,
    R: ServiceReloader,
{
    #[must_use]
    pub fn new(store: S, validator: V, reloader: R, layout: TargetLayout, proxy: ProxyHandle) -> Self {
        Self {
            store,
            validator,
            reloader,
            layout,
            proxy,
            domain_locks: DashMap::new(),
            reload_lock: Mutex::new(()),
        }
    }

    #[must_use]
    pub fn layout(&self) -> &TargetLayout {
        &self.layout
    }

    #[must_use]
    pub fn proxy(&self) -> &ProxyHandle {
        &self.proxy
    }

    /// Deploy one certificate and return exactly one outcome.
    ///
    /// Failures never propagate as `Err`; they end the run with a failed
    /// outcome naming the stage. Material already written is left in place.
    pub async fn deploy(
        &self,
        request: &DeploymentRequest,
        reporter: &impl ProgressReporter,
    ) -> DeploymentOutcome {
        let domain = request.domain();
        let domain_lock = Arc::clone(&self.domain_locks.entry(domain.to_string()).or_default());
        let outcome = {
            let _domain_guard = domain_lock.lock().await;
            self.run_stages(request, reporter).await
        };
        drop(domain_lock);
        // Entries are cloned out under the shard lock, so a count of one
        // means no other deployment holds or awaits this domain.
        self.domain_locks
            .remove_if(domain, |_, lock| Arc::strong_count(lock) == 1);
        outcome
    }

    /// Number of domains with a deployment running or waiting.
    #[must_use]
    pub fn active_domains(&self) -> usize {
        self.domain_locks.len()
    }

    /// `Idle → … → Done | Failed`. Caller must hold the domain lock.
    async fn run_stages(
        &self,
        request: &DeploymentRequest,
        reporter: &impl ProgressReporter,
    ) -> DeploymentOutcome {
        let domain = request.domain();
        tracing::info!(domain, "deployment started");
        transition(reporter, domain, DeployStage::Idle, DeployStage::Writing);
        reporter.step(&format!("writing certificate material for {domain}..."));
        let written = match self.store.write(request, &self.layout, reporter).await {
            Ok(written) => written,
            Err(err) => {
                let committed: BTreeSet<PathBuf> = match &err {
                    StoreError::Write { committed, .. } => {
                        committed.iter().cloned().collect()
                    }
                    _ => BTreeSet::new(),
                };
                return fail(reporter, domain, committed, StageFailure::Write(err));
            }
        };
        reporter.success(&format!("wrote {} file(s) for {domain}", written.len()));

        let _reload_guard = self.reload_lock.lock().await;
        match self.gate_and_reload(domain, DeployStage::Writing, reporter).await {
            Ok(()) => {
                transition(reporter, domain, DeployStage::Reloading, DeployStage::Done);
                tracing::info!(domain, files = written.len(), "deployment succeeded");
                DeploymentOutcome::success(domain, written)
            }
            Err(failure) => fail(reporter, domain, written, failure),
        }
    }

    /// Validate and reload without writing material.
    ///
    /// # Errors
    ///
    /// Returns the failing stage. The reloader is never invoked when
    /// validation fails.
    pub async fn validate_and_reload(
        &self,
        reporter: &impl ProgressReporter,
    ) -> Result<(), StageFailure> {
        let _reload_guard = self.reload_lock.lock().await;
        let service = self.proxy.service_name().to_string();
        self.gate_and_reload(&service, DeployStage::Idle, reporter).await
    }

    /// Run only the configuration check.
    ///
    /// # Errors
    ///
    /// Returns the validator's failure.
    pub async fn validate(&self, reporter: &impl ProgressReporter) -> Result<(), StageFailure> {
        let _reload_guard = self.reload_lock.lock().await;
        self.validator
            .validate(&self.proxy, reporter)
            .await
            .map_err(StageFailure::Validate)
    }

    /// `Validating → Reloading`. Caller must hold `reload_lock`.
    async fn gate_and_reload(
        &self,
        subject: &str,
        from: DeployStage,
        reporter: &impl ProgressReporter,
    ) -> Result<(), StageFailure> {
        transition(reporter, subject, from, DeployStage::Validating);
        reporter.step(&format!(
            "checking proxy configuration {}...",
            self.proxy.config_path().display()
        ));
        self.validator
            .validate(&self.proxy, reporter)
            .await
            .map_err(StageFailure::Validate)?;
        reporter.success("proxy configuration is valid");

        transition(reporter, subject, DeployStage::Validating, DeployStage::Reloading);
        reporter.step(&format!("reloading service {}...", self.proxy.service_name()));
        self.reloader
            .reload(&self.proxy, reporter)
            .await
            .map_err(StageFailure::Reload)?;
        reporter.success(&format!("service {} reloaded", self.proxy.service_name()));
        Ok(())
    }
}

fn transition(reporter: &impl ProgressReporter, domain: &str, from: DeployStage, to: DeployStage) {
    tracing::debug!(domain, from = %from, to = %to, "stage transition");
    reporter.stage(domain, to);
}

fn fail(
    reporter: &impl ProgressReporter,
    domain: &str,
    written: BTreeSet<PathBuf>,
    failure: StageFailure,
) -> DeploymentOutcome {
    let from = failure.stage();
    transition(reporter, domain, from, DeployStage::Failed);
    tracing::warn!(
        domain,
        stage = %from,
        reason = failure.reason_code(),
        written = written.len(),
        "deployment failed"
    );
    if !written.is_empty() {
        reporter.warn(&format!(
            "{} file(s) written for {domain} were left in place",
            written.len()
        ));
    }
    DeploymentOutcome::failed(domain, written, failure)
}
