pub mod error;
pub mod tasks;
pub mod server;
pub mod lifecycle;
pub mod console;
pub mod files;
pub mod domains;
pub mod settings;
pub mod profile;
pub mod metrics;

pub use error::{PanelError, PanelResult};
pub use tasks::TaskScope;
pub use server::{Players, Server, ServerStatus};
pub use lifecycle::{Lifecycle, LifecycleStep};
pub use console::{Console, LogKind};
pub use files::FileStore;
pub use domains::DomainRegistry;
pub use settings::Settings;
pub use profile::Profile;
pub use metrics::MetricJitter;
