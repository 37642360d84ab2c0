use super::{ordinal, random_private_host, Drill};
use crate::error::DrillResult;
use crate::quiz::{Difficulty, Question};
use netdrill_core::subnet::{block_containing, changing_octet, magic_number, network_and_broadcast};
use netdrill_core::Answer;
use rand::{Rng, RngCore};

/// IP + CIDR → network address. The block-range variant also shows the
/// magic number for the changing octet.
pub struct NetworkSprint {
    difficulty: Difficulty,
    show_magic: bool,
}

impl NetworkSprint {
    pub fn new(difficulty: Difficulty) -> Self {
        Self {
            difficulty,
            show_magic: false,
        }
    }

    pub fn block_range(difficulty: Difficulty) -> Self {
        Self {
            difficulty,
            show_magic: true,
        }
    }
}

impl Drill for NetworkSprint {
    fn id(&self) -> &'static str {
        if self.show_magic {
            "block-range"
        } else {
            "network-sprint"
        }
    }

    fn title(&self) -> &'static str {
        if self.show_magic {
            "Block Range Challenge"
        } else {
            "Network Address Sprint"
        }
    }

    fn next_question(&mut self, rng: &mut dyn RngCore) -> DrillResult<Question> {
        let host = random_private_host(rng)?;
        let len = rng.gen_range(self.difficulty.prefix_range());
        let (network, broadcast) = network_and_broadcast(host, len)?;
        let octet = changing_octet(len)?;
        let magic = magic_number(len)?;
        let block = block_containing(host, len)?;

        let mut question = Question::new(format!("IP:   {}", host)).line(format!("CIDR: /{}", len));
        if self.show_magic {
            question = question.line(format!("Magic number {} in the {} octet", magic, ordinal(octet)));
        }

        let host_octet = host.octets()[octet - 1];
        let mut question = question
            .step("Network address", Answer::Address(network))
            .hint(format!(
                "Floor the {} octet ({}) to a multiple of {}; zero everything after it.",
                ordinal(octet),
                host_octet,
                magic
            ))
            .explanation(format!(
                "{} falls in block {} of the {} octet, so the network is {} (broadcast {}).",
                host_octet,
                block,
                ordinal(octet),
                network,
                broadcast
            ))
            .miss(Answer::Address(broadcast), "That's the broadcast: round down, not up");

        if host != network {
            question = question.miss(Answer::Address(host), "That's the host itself; floor it to the block boundary");
        }

        Ok(question)
    }
}

// ─── Tests ───────────────────────────────────────────────────────────
