pub mod endpoint;
pub mod model;

pub use endpoint::ServerEndpoint;
pub use model::ModelDescriptor;
