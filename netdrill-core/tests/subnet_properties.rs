use netdrill_core::subnet::{
    changing_octet, host_count, host_range, magic_number, mask_bits, mask_for, network_and_broadcast,
    prefix_len_from_mask, Prefix,
};
use netdrill_core::{best_route, Route};
use proptest::prelude::*;
use std::net::Ipv4Addr;

#[test]
fn test_every_prefix_len_round_trips() {
    for len in 0..=32u8 {
        let mask = mask_for(len).unwrap();
        let bits = u32::from_be_bytes(mask);

        assert_eq!(bits.leading_ones(), u32::from(len), "/{} leading ones", len);
        assert_eq!(bits.count_ones(), u32::from(len), "/{} has stray bits", len);
        assert_eq!(prefix_len_from_mask(Ipv4Addr::from(mask)).unwrap(), len);

        let magic = magic_number(len).unwrap();
        assert_eq!(256 % magic, 0, "/{} magic {}", len, magic);
        if len % 8 == 0 && len < 32 {
            assert_eq!(magic, 256, "/{} is octet aligned", len);
        }

        let octet = changing_octet(len).unwrap();
        assert!((1..=4).contains(&octet));
        assert_eq!(256 - u16::from(mask[octet - 1]), magic);
    }
}

#[test]
fn test_slash_zero_and_thirty_two() {
    let a = Ipv4Addr::new(203, 0, 113, 77);

    assert_eq!(
        network_and_broadcast(a, 0).unwrap(),
        (Ipv4Addr::UNSPECIFIED, Ipv4Addr::BROADCAST)
    );
    assert_eq!(network_and_broadcast(a, 32).unwrap(), (a, a));
    assert_eq!(host_range(a, 31).unwrap(), None);
    assert_eq!(host_range(a, 32).unwrap(), None);
}

#[test]
fn test_host_count_every_prefix_len() {
    for len in 0..=32u8 {
        let expected = if len >= 31 { 0 } else { (1u64 << (32 - len)) - 2 };
        assert_eq!(u64::from(host_count(len).unwrap()), expected, "/{}", len);
    }
    assert_eq!(host_count(0).unwrap(), 4_294_967_294);
}

#[test]
fn test_longest_prefix_scenario() {
    let routes = vec![
        Route::new("0.0.0.0/0".parse().unwrap(), Ipv4Addr::new(203, 0, 113, 1), "wan0", 10),
        Route::new("10.0.0.0/8".parse().unwrap(), Ipv4Addr::new(10, 0, 0, 1), "eth0", 5),
        Route::new("10.1.0.0/16".parse().unwrap(), Ipv4Addr::new(10, 0, 1, 1), "eth1", 20),
    ];

    let best = best_route(Ipv4Addr::new(10, 1, 2, 3), &routes).unwrap();
    assert_eq!(best.destination.prefix_len(), 16);

    let without_default = &routes[1..];
    assert!(best_route(Ipv4Addr::new(192, 0, 2, 1), without_default).is_none());
}

proptest! {
    #[test]
    fn network_and_broadcast_bracket_the_address(raw in any::<u32>(), len in 0..=32u8) {
        let address = Ipv4Addr::from(raw);
        let (network, broadcast) = network_and_broadcast(address, len).unwrap();
        let (network, broadcast) = (u32::from(network), u32::from(broadcast));

        prop_assert!(network <= raw && raw <= broadcast);
        prop_assert_eq!(u64::from(broadcast - network) + 1, 1u64 << (32 - len));
    }

    #[test]
    fn network_is_idempotent(raw in any::<u32>(), len in 0..=32u8) {
        let (network, _) = network_and_broadcast(Ipv4Addr::from(raw), len).unwrap();
        let (again, _) = network_and_broadcast(network, len).unwrap();
        prop_assert_eq!(network, again);
    }

    #[test]
    fn host_range_sits_inside_the_block(raw in any::<u32>(), len in 0..=30u8) {
        let address = Ipv4Addr::from(raw);
        let (network, broadcast) = network_and_broadcast(address, len).unwrap();
        let (first, last) = host_range(address, len).unwrap().unwrap();

        prop_assert_eq!(u32::from(first), u32::from(network) + 1);
        prop_assert_eq!(u32::from(last), u32::from(broadcast) - 1);
    }

    #[test]
    fn prefix_agrees_with_free_functions(raw in any::<u32>(), len in 0..=32u8) {
        let address = Ipv4Addr::from(raw);
        let prefix = Prefix::new(address, len).unwrap();
        let (network, broadcast) = network_and_broadcast(address, len).unwrap();

        prop_assert_eq!(prefix.network(), network);
        prop_assert_eq!(prefix.broadcast(), broadcast);
        prop_assert_eq!(u32::from(prefix.mask()), mask_bits(len).unwrap());
        prop_assert!(prefix.contains(address));
    }
}
