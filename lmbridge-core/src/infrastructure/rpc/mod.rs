//! JSON-RPC 2.0 message types

pub mod types;

pub use types::{
    INVALID_PARAMS, INVALID_REQUEST, METHOD_NOT_FOUND, PARSE_ERROR, RpcError, RpcRequest,
    RpcResponse,
};
