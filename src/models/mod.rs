pub mod event;
pub mod horse;
pub mod report;
pub mod schedule;
pub mod user;
pub mod velocity;

pub use event::{EventType, HistoryMeta, HistoryResponse, SpeedDataPoint, TrendsEvent};
pub use horse::{HorseSharing, HorsesMeta, HorsesResponse, NewHorse, TrainerHorse};
pub use report::{Report, ReportRequest, ReportRequestReceipt, ReportsMeta, ReportsResponse};
pub use schedule::{TrackSchedule, TrackSchedulesResponse};
pub use user::{AuthResponse, Credentials, Registration, User};
pub use velocity::{VelocityData, VelocityDataPoint, VelocityMetrics};
