//! Certification dashboard engine: record ingestion, country/year/month
//! filtering and the aggregate tables a dashboard renders.

pub mod aggregate;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod filter;
pub mod models;
pub mod report;
pub mod schema;
pub mod source;
pub mod store;

pub use dashboard::DashboardView;
pub use error::SourceError;
pub use filter::{CountryChoice, CountrySelection, FilterSelection};
pub use models::{CertificationRecord, CountEntry, DeliveryModel, DeliverySummary, MonthBucket};
pub use schema::FieldMap;
pub use store::RecordStore;
