use crate::common::DomainResult;

/// Port trait the escape planning domain depends on for loading scenario documents.
/// Implementations (adapters) decide where the documents live.
pub trait ScenarioDataSource: Send + Sync {
    fn load_scenario(&self, name: &str) -> DomainResult<String>;
}
