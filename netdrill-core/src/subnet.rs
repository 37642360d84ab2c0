use crate::error::{SubnetError, SubnetResult};
use std::fmt;
use std::net::Ipv4Addr;
use std::str::FromStr;

pub const MAX_PREFIX_LEN: u8 = 32;

/// The mask as a u32 (e.g., /20 → 0xFFFF_F000).
pub fn mask_bits(prefix_len: u8) -> SubnetResult<u32> {
    match prefix_len {
        0 => Ok(0),
        1..=MAX_PREFIX_LEN => Ok(u32::MAX << (MAX_PREFIX_LEN - prefix_len)),
        _ => Err(SubnetError::PrefixOutOfRange { prefix_len }),
    }
}

/// The mask as four big-endian octets.
pub fn mask_for(prefix_len: u8) -> SubnetResult<[u8; 4]> {
    Ok(mask_bits(prefix_len)?.to_be_bytes())
}

/// 1-based index of the first mask octet that isn't 255.
///
/// A /32 has no such octet; it reports the 4th, where the block size is 1.
pub fn changing_octet(prefix_len: u8) -> SubnetResult<usize> {
    let mask = mask_for(prefix_len)?;
    Ok(mask.iter().position(|&octet| octet != 255).map_or(4, |i| i + 1))
}

/// Block size in the changing octet: `256 - mask octet`.
///
/// Octet-aligned prefixes below /32 give 256 (the whole octet is one block).
pub fn magic_number(prefix_len: u8) -> SubnetResult<u16> {
    let mask = mask_for(prefix_len)?;
    let octet = changing_octet(prefix_len)?;
    Ok(256 - u16::from(mask[octet - 1]))
}

/// Network and broadcast addresses of the block that holds `address`.
pub fn network_and_broadcast(address: Ipv4Addr, prefix_len: u8) -> SubnetResult<(Ipv4Addr, Ipv4Addr)> {
    let mask = mask_bits(prefix_len)?;
    let network = u32::from(address) & mask;
    Ok((Ipv4Addr::from(network), Ipv4Addr::from(network | !mask)))
}

/// First and last usable host. /31 and /32 have none.
pub fn host_range(address: Ipv4Addr, prefix_len: u8) -> SubnetResult<Option<(Ipv4Addr, Ipv4Addr)>> {
    let (network, broadcast) = network_and_broadcast(address, prefix_len)?;
    if prefix_len >= 31 {
        return Ok(None);
    }
    Ok(Some((
        Ipv4Addr::from(u32::from(network) + 1),
        Ipv4Addr::from(u32::from(broadcast) - 1),
    )))
}

/// Number of usable host addresses (excludes network + broadcast).
pub fn host_count(prefix_len: u8) -> SubnetResult<u32> {
    mask_bits(prefix_len)?;
    if prefix_len >= 31 {
        return Ok(0);
    }
    // /0 holds 2^32 addresses, one more than u32 can count.
    Ok(((1u64 << (MAX_PREFIX_LEN - prefix_len)) - 2) as u32)
}

/// Inverse of [`mask_for`]: turns `255.255.240.0` back into 20.
pub fn prefix_len_from_mask(mask: Ipv4Addr) -> SubnetResult<u8> {
    let bits = u32::from(mask);
    let len = bits.leading_ones() as u8;
    if mask_bits(len)? != bits {
        return Err(SubnetError::NonContiguousMask {
            mask: mask.to_string(),
        });
    }
    Ok(len)
}

/// Dotted binary form of the mask, e.g. `11111111.11111111.11110000.00000000`.
pub fn mask_binary(prefix_len: u8) -> SubnetResult<String> {
    let octets = mask_for(prefix_len)?;
    Ok(octets
        .iter()
        .map(|octet| format!("{:08b}", octet))
        .collect::<Vec<_>>()
        .join("."))
}

/// A run of values in the changing octet that share one subnet.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct OctetBlock {
    pub start: u8,
    pub end: u8,
}

impl fmt::Display for OctetBlock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}

/// Every block of the changing octet, in order: 0-15, 16-31, ... for a /20.
pub fn octet_blocks(prefix_len: u8) -> SubnetResult<Vec<OctetBlock>> {
    let step = usize::from(magic_number(prefix_len)?);
    Ok((0..256usize)
        .step_by(step)
        .map(|start| OctetBlock {
            start: start as u8,
            end: (start + step - 1) as u8,
        })
        .collect())
}

/// The block of the changing octet that `address` falls into.
pub fn block_containing(address: Ipv4Addr, prefix_len: u8) -> SubnetResult<OctetBlock> {
    let index = changing_octet(prefix_len)? - 1;
    let (network, broadcast) = network_and_broadcast(address, prefix_len)?;
    Ok(OctetBlock {
        start: network.octets()[index],
        end: broadcast.octets()[index],
    })
}

/// An address paired with a prefix length, e.g. `192.168.35.67/20`.
///
/// The address is kept as given; [`Prefix::network`] floors it to the block
/// boundary.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Prefix {
    address: Ipv4Addr,
    len: u8,
}

impl Prefix {
    pub fn new(address: Ipv4Addr, len: u8) -> SubnetResult<Self> {
        mask_bits(len)?;
        Ok(Self { address, len })
    }

    /// The block that holds `address`, with the host bits cleared.
    pub fn network_of(address: Ipv4Addr, len: u8) -> SubnetResult<Self> {
        let (network, _) = network_and_broadcast(address, len)?;
        Ok(Self { address: network, len })
    }

    /// 0.0.0.0/0
    pub const fn default_route() -> Self {
        Self {
            address: Ipv4Addr::UNSPECIFIED,
            len: 0,
        }
    }

    pub fn address(&self) -> Ipv4Addr {
        self.address
    }

    pub fn prefix_len(&self) -> u8 {
        self.len
    }

    pub fn is_default(&self) -> bool {
        self.len == 0
    }

    fn bits(&self) -> u32 {
        // `len` was validated on construction.
        match self.len {
            0 => 0,
            len => u32::MAX << (MAX_PREFIX_LEN - len),
        }
    }

    pub fn mask(&self) -> Ipv4Addr {
        Ipv4Addr::from(self.bits())
    }

    pub fn network(&self) -> Ipv4Addr {
        Ipv4Addr::from(u32::from(self.address) & self.bits())
    }

    pub fn broadcast(&self) -> Ipv4Addr {
        Ipv4Addr::from(u32::from(self.network()) | !self.bits())
    }

    pub fn host_range(&self) -> Option<(Ipv4Addr, Ipv4Addr)> {
        if self.len >= 31 {
            return None;
        }
        Some((
            Ipv4Addr::from(u32::from(self.network()) + 1),
            Ipv4Addr::from(u32::from(self.broadcast()) - 1),
        ))
    }

    /// Total addresses in the block, 2^(32 - len).
    pub fn size(&self) -> u64 {
        1u64 << (MAX_PREFIX_LEN - self.len)
    }

    pub fn contains(&self, address: Ipv4Addr) -> bool {
        u32::from(address) & self.bits() == u32::from(self.network())
    }
}

impl fmt::Display for Prefix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.address, self.len)
    }
}

impl FromStr for Prefix {
    type Err = SubnetError;

    /// Accepts `a.b.c.d/L` and `a.b.c.d/m.m.m.m`.
    fn from_str(s: &str) -> SubnetResult<Self> {
        let (addr, len_or_mask) = s.trim().split_once('/').ok_or_else(|| SubnetError::InvalidCidr {
            input: s.to_string(),
            reason: "no '/' found".to_string(),
        })?;

        let address = Ipv4Addr::from_str(addr.trim()).map_err(|_| SubnetError::InvalidAddress {
            input: addr.to_string(),
        })?;

        let len_or_mask = len_or_mask.trim();
        let len = match len_or_mask.parse::<u8>() {
            Ok(len) => len,
            Err(_) => {
                let mask = Ipv4Addr::from_str(len_or_mask).map_err(|_| SubnetError::InvalidCidr {
                    input: s.to_string(),
                    reason: format!("'{}' is neither a prefix length nor a mask", len_or_mask),
                })?;
                prefix_len_from_mask(mask)?
            }
        };

        Prefix::new(address, len)
    }
}

// ─── Tests ───────────────────────────────────────────────────────────
