use thiserror::Error;

pub type SubnetResult<T> = Result<T, SubnetError>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SubnetError {
    #[error("Prefix length /{prefix_len} is out of range: expected 0-32")]
    PrefixOutOfRange { prefix_len: u8 },

    #[error("Subnet mask {mask} is not contiguous")]
    NonContiguousMask { mask: String },

    #[error("Invalid IPv4 address '{input}'")]
    InvalidAddress { input: String },

    #[error("Invalid CIDR block '{input}': {reason}")]
    InvalidCidr { input: String, reason: String },
}
