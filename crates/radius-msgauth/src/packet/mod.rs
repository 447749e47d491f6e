mod code;
mod header;

pub use code::Code;
pub use header::{PacketError, PacketHeader};
