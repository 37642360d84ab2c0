//! Question generators, one per drill.

mod changing_octet;
mod cidr_flash;
mod ieee802;
mod magic_number;
mod network_sprint;
mod next_hop;
mod subnet_breakdown;

pub use changing_octet::ChangingOctet;
pub use cidr_flash::CidrFlash;
pub use ieee802::{Ieee802, Standard};
pub use magic_number::MagicNumber;
pub use network_sprint::NetworkSprint;
pub use next_hop::{build_routing_table, render_table, NextHop};
pub use subnet_breakdown::SubnetBreakdown;

use crate::error::{DrillError, DrillResult};
use crate::quiz::{Difficulty, Question};
use netdrill_core::subnet::mask_for;
use netdrill_core::{Answer, Prefix, SubnetResult};
use rand::seq::SliceRandom;
use rand::{Rng, RngCore};
use std::net::Ipv4Addr;

pub trait Drill {
    /// Name used on the command line and in score keys.
    fn id(&self) -> &'static str;
    fn title(&self) -> &'static str;
    fn next_question(&mut self, rng: &mut dyn RngCore) -> DrillResult<Question>;
}

/// `(id, description)` for every drill, in menu order.
pub const DRILLS: &[(&str, &str)] = &[
    ("cidr-flash", "CIDR to subnet mask and back"),
    ("changing-octet", "Which octet does the prefix cut through?"),
    ("magic-number", "Block size in the changing octet"),
    ("network-sprint", "Network address of an IP/CIDR"),
    ("block-range", "Network address, with the block size shown"),
    ("subnet-breakdown", "Network, broadcast, first and last host"),
    ("next-hop", "Longest-prefix match against a routing table"),
    ("ieee802", "IEEE 802 standard codes and names"),
];

pub fn build(id: &str, difficulty: Difficulty) -> DrillResult<Box<dyn Drill>> {
    let drill: Box<dyn Drill> = match id {
        "cidr-flash" => Box::new(CidrFlash::new(difficulty)),
        "changing-octet" => Box::new(ChangingOctet::new()),
        "magic-number" => Box::new(MagicNumber::new()),
        "network-sprint" => Box::new(NetworkSprint::new(difficulty)),
        "block-range" => Box::new(NetworkSprint::block_range(difficulty)),
        "subnet-breakdown" => Box::new(SubnetBreakdown::new(difficulty)),
        "next-hop" => Box::new(NextHop::new(difficulty)),
        "ieee802" => Box::new(Ieee802::new(difficulty)),
        other => return Err(DrillError::UnknownDrill(other.to_string())),
    };
    Ok(drill)
}

/// Options shown in a multiple-choice question.
const OPTIONS: usize = 4;

/// Lists `target` and up to three of `wrongs` as numbered options, asks for
/// the number, and prepares a miss for every wrong option.
pub(crate) fn choose_one<T: Copy + PartialEq>(
    question: Question,
    target: T,
    wrongs: &[T],
    rng: &mut dyn RngCore,
    label: impl Fn(T) -> String,
    why_not: impl Fn(T) -> String,
) -> Question {
    let mut picks: Vec<T> = wrongs.choose_multiple(rng, OPTIONS - 1).copied().collect();
    picks.push(target);
    picks.shuffle(rng);

    let mut question = question;
    let mut answer = 1;
    for (i, &pick) in picks.iter().enumerate() {
        question = question.line(format!("  {}) {}", i + 1, label(pick)));
        if pick == target {
            answer = i as u32 + 1;
        }
    }

    question = question.step(format!("Your choice (1-{})", picks.len()), Answer::Number(answer));
    for (i, &pick) in picks.iter().enumerate() {
        if pick != target {
            question = question.miss(Answer::Number(i as u32 + 1), why_not(pick));
        }
    }
    question
}

const PRIVATE_BLOCKS: [(Ipv4Addr, u8); 3] = [
    (Ipv4Addr::new(10, 0, 0, 0), 8),
    (Ipv4Addr::new(172, 16, 0, 0), 12),
    (Ipv4Addr::new(192, 168, 0, 0), 16),
];

/// Any address inside `prefix`, network and broadcast included.
pub(crate) fn random_address_in(prefix: Prefix, rng: &mut dyn RngCore) -> Ipv4Addr {
    let offset = rng.gen_range(0..prefix.size()) as u32;
    Ipv4Addr::from(u32::from(prefix.network()) + offset)
}

/// A random RFC 1918 address.
pub(crate) fn random_private_host(rng: &mut dyn RngCore) -> SubnetResult<Ipv4Addr> {
    let &(network, len) = PRIVATE_BLOCKS.choose(rng).unwrap_or(&PRIVATE_BLOCKS[0]);
    Ok(random_address_in(Prefix::new(network, len)?, rng))
}

/// Show a prefix length either as `/20` or as its dotted mask.
pub(crate) fn cidr_or_mask(len: u8, as_mask: bool) -> SubnetResult<String> {
    if as_mask {
        Ok(Ipv4Addr::from(mask_for(len)?).to_string())
    } else {
        Ok(format!("/{}", len))
    }
}

pub(crate) fn ordinal(n: usize) -> &'static str {
    match n {
        1 => "1st",
        2 => "2nd",
        3 => "3rd",
        _ => "4th",
    }
}

// ─── Tests ───────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_every_listed_drill_builds() {
        for (id, _) in DRILLS {
            let drill = build(id, Difficulty::Standard).unwrap();
            assert_eq!(drill.id(), *id);
        }
    }

    #[test]
    fn test_choose_one_lists_target_once() {
        let mut rng = StdRng::seed_from_u64(9);
        let wrongs = [1u8, 2, 3, 5, 6, 7];
        for _ in 0..20 {
            let q = choose_one(
                Question::new("pick 4"),
                4u8,
                &wrongs,
                &mut rng,
                |n: u8| n.to_string(),
                |n: u8| format!("{} is not 4", n),
            );
            assert_eq!(q.intro.len(), 1 + OPTIONS);
            assert_eq!(q.intro.iter().filter(|l| l.ends_with(") 4")).count(), 1);

            let step = &q.steps[0];
            let right = step.answer.to_string();
            assert_eq!(q.intro[right.parse::<usize>().unwrap()], format!("  {}) 4", right));
            assert_eq!(step.misses.len(), OPTIONS - 1);
            let wrong = (1..=OPTIONS).find(|n| n.to_string() != right).unwrap();
            assert!(step.diagnose(&wrong.to_string()).unwrap().ends_with("is not 4"));
        }
    }

    #[test]
    fn test_unknown_drill() {
        assert!(matches!(
            build("subnet-roulette", Difficulty::Casual),
            Err(DrillError::UnknownDrill(ref id)) if id == "subnet-roulette"
        ));
    }

    #[test]
    fn test_every_drill_asks_answerable_questions() {
        let mut rng = StdRng::seed_from_u64(2024);
        for (id, _) in DRILLS {
            for difficulty in Difficulty::ALL {
                let mut drill = build(id, difficulty).unwrap();
                for _ in 0..25 {
                    let question = drill.next_question(&mut rng).unwrap();
                    assert!(!question.steps.is_empty(), "{} asked nothing", id);
                    for step in &question.steps {
                        let typed = step.answer.to_string();
                        assert!(step.answer.accepts(&typed), "{}: '{}' rejected", id, typed);
                        assert!(step.diagnose(&typed).is_none(), "{}: right answer diagnosed", id);
                    }
                }
            }
        }
    }

    #[test]
    fn test_random_private_host_is_private() {
        let mut rng = StdRng::seed_from_u64(1);
        for _ in 0..200 {
            assert!(random_private_host(&mut rng).unwrap().is_private());
        }
    }

    #[test]
    fn test_cidr_or_mask() {
        assert_eq!(cidr_or_mask(20, false).unwrap(), "/20");
        assert_eq!(cidr_or_mask(20, true).unwrap(), "255.255.240.0");
    }
}
