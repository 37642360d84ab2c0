use crate::config::ConfigError;
use crate::scores::StoreError;
use netdrill_core::SubnetError;
use std::io;
use std::net::Ipv4Addr;
use thiserror::Error;

pub type DrillResult<T> = Result<T, DrillError>;

#[derive(Error, Debug)]
pub enum DrillError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Score store error: {0}")]
    Store(#[from] StoreError),

    #[error("Subnet error: {0}")]
    Subnet(#[from] SubnetError),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Unknown drill '{0}'. Run `netdrill list` to see the available drills")]
    UnknownDrill(String),

    #[error("No route to {destination} and no default route in the generated table")]
    NoRoute { destination: Ipv4Addr },

    #[error("{0}")]
    Usage(String),
}
