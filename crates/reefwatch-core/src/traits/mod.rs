//! Collaborator interfaces. Storage technology stays outside this workspace.

pub mod alert_repository;
pub mod history;

pub use alert_repository::IAlertRepository;
pub use history::IMeasurementHistory;
