//! 类型定义模块

mod domain;
mod lifecycle;
mod record;

pub use domain::{DomainName, HostedZoneRef, ZoneId};
pub use lifecycle::{
    LifecycleEvent, LifecycleResponse, RequestType, ResourceProperties, ResponseData,
};
pub use record::ZoneRecord;

// Re-export provider 库的公共类型
pub use verify_hook_provider::{
    CertificateDetail, CertificateSummary, ChangeAction, DomainValidation, Page, RecordType,
    ValidationRecord,
};
