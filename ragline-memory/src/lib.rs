pub mod buffer;

pub use buffer::ChatMemoryBuffer;

pub const DEFAULT_TOKEN_BUDGET: usize = 3900;
