// Service exports
pub mod clock;
pub mod notify;
pub mod records;

pub use clock::{Clock, FixedClock, SystemClock};
pub use notify::{NotificationDispatcher, NotifyError, NullDispatcher, WebhookDispatcher};
pub use records::{PayloadClient, PayloadCollections, RecordStore, RecordStoreError};
