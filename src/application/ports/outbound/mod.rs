//! Outbound ports - Interfaces the pipeline requires from the host platform

mod channel_port;
mod message_port;
mod roll_stream_port;
mod sheet_port;
mod table_port;

pub use channel_port::{elect_authority, ChannelError, ChannelPort};
pub use message_port::MessagePort;
pub use roll_stream_port::{RollEvent, RollStreamPort};
pub use sheet_port::{InvocationError, SheetPort};
pub use table_port::TablePort;
