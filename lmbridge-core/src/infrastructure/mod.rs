pub mod probe;
pub mod rpc;
