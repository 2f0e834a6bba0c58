use std::sync::Arc;

use crate::adapters::{FsReportAdapter, JsonPerceptionAdapter, TracingLogAdapter};
use crate::app::{
    compare_interactor::CompareInteractor, inspect_interactor::InspectInteractor,
    validate_interactor::ValidateInteractor,
};
use crate::ports::{AppSettings, LogPort, PerceptionPort, ReportPort};

pub trait AppContainer: Send + Sync {
    fn validate_interactor(&self) -> Arc<ValidateInteractor>;
    fn compare_interactor(&self) -> Arc<CompareInteractor>;
    fn inspect_interactor(&self) -> Arc<InspectInteractor>;
}

pub struct DefaultAppContainer {
    validate_interactor: Arc<ValidateInteractor>,
    compare_interactor: Arc<CompareInteractor>,
    inspect_interactor: Arc<InspectInteractor>,
}

impl DefaultAppContainer {
    pub fn new(settings: &AppSettings) -> Self {
        let perception_port = Arc::new(JsonPerceptionAdapter::new(&settings.perception));
        let report_port = Arc::new(FsReportAdapter::new());
        let log_port = Arc::new(TracingLogAdapter::new());
        Self::with_ports(perception_port, report_port, log_port, settings)
    }

    /// Wire interactors over caller-supplied ports
    pub fn with_ports(
        perception_port: Arc<dyn PerceptionPort>,
        report_port: Arc<dyn ReportPort>,
        log_port: Arc<dyn LogPort>,
        settings: &AppSettings,
    ) -> Self {
        let validate_interactor = Arc::new(ValidateInteractor::new(
            Arc::clone(&perception_port),
            Arc::clone(&report_port),
            Arc::clone(&log_port),
            &settings.perception,
        ));

        let compare_interactor = Arc::new(CompareInteractor::new(
            Arc::clone(&perception_port),
            Arc::clone(&log_port),
            &settings.perception,
        ));

        let inspect_interactor = Arc::new(InspectInteractor::new(
            perception_port,
            log_port,
            &settings.perception,
        ));

        Self {
            validate_interactor,
            compare_interactor,
            inspect_interactor,
        }
    }
}

impl AppContainer for DefaultAppContainer {
    fn validate_interactor(&self) -> Arc<ValidateInteractor> {
        Arc::clone(&self.validate_interactor)
    }

    fn compare_interactor(&self) -> Arc<CompareInteractor> {
        Arc::clone(&self.compare_interactor)
    }

    fn inspect_interactor(&self) -> Arc<InspectInteractor> {
        Arc::clone(&self.inspect_interactor)
    }
}
