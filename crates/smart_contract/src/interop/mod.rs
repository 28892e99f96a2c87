//! Host functions grouped by the part of the system module they serve.

pub mod storage;
