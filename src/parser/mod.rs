pub mod columns;
pub mod dataset;
pub mod deserializers;
pub mod pipeline;
pub mod types;

pub use dataset::Dataset;
pub use pipeline::{parse_tickets, ParseOutput};
pub use types::{ParseWarning, RecordType, TicketRecord};
