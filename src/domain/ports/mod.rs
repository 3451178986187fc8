mod cache;
mod transport;

pub use cache::Cache;
pub use transport::Transport;
