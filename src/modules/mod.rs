// Bounded contexts: the job store, the stats reader, and the access facade over both

pub mod access;
pub mod jobs;
pub mod stats;
