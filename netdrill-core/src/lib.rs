//! # netdrill-core
//!
//! IPv4 subnet arithmetic and longest-prefix-match route resolution shared
//! by every netdrill quiz.
//!
//! ## Example
//! ```
//! use netdrill_core::subnet::{magic_number, network_and_broadcast};
//! use std::net::Ipv4Addr;
//!
//! let (network, broadcast) = network_and_broadcast(Ipv4Addr::new(192, 168, 35, 67), 20).unwrap();
//! assert_eq!(network, Ipv4Addr::new(192, 168, 32, 0));
//! assert_eq!(broadcast, Ipv4Addr::new(192, 168, 47, 255));
//! assert_eq!(magic_number(20).unwrap(), 16);
//! ```

pub mod answer;
pub mod error;
pub mod routing;
pub mod subnet;

pub use answer::{Answer, AnswerCheck};
pub use error::{SubnetError, SubnetResult};
pub use routing::{best_route, Choice, Route, RouteLookup, RoutingTable, Verdict};
pub use subnet::{
    changing_octet, host_range, magic_number, mask_for, network_and_broadcast, OctetBlock, Prefix,
};
