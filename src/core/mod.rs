pub mod backup;
pub mod clock;
pub mod codec;
pub mod executor;
pub mod log;
pub mod positioning;
pub mod record;
pub mod remote;
pub mod segmenter;
pub mod session;
pub mod tracks;

#[cfg(test)]
pub(crate) mod test_support;
