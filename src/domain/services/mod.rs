mod fingerprint;

pub use fingerprint::fingerprint;
