use super::{ordinal, random_private_host, Drill};
use crate::error::{DrillError, DrillResult};
use crate::quiz::{Difficulty, Question};
use netdrill_core::subnet::{changing_octet, host_count, magic_number, mask_for};
use netdrill_core::{Answer, Prefix, SubnetError};
use rand::{Rng, RngCore};
use std::net::Ipv4Addr;

/// Full breakdown of one IP/CIDR in four prompts.
pub struct SubnetBreakdown {
    difficulty: Difficulty,
}

impl SubnetBreakdown {
    pub fn new(difficulty: Difficulty) -> Self {
        Self { difficulty }
    }
}

impl Drill for SubnetBreakdown {
    fn id(&self) -> &'static str {
        "subnet-breakdown"
    }

    fn title(&self) -> &'static str {
        "Subnet Breakdown"
    }

    fn next_question(&mut self, rng: &mut dyn RngCore) -> DrillResult<Question> {
        let host = random_private_host(rng)?;
        let len = rng.gen_range(self.difficulty.prefix_range());
        let prefix = Prefix::new(host, len)?;
        let (first, last) = prefix.host_range().ok_or_else(|| {
            DrillError::Subnet(SubnetError::InvalidCidr {
                input: prefix.to_string(),
                reason: "no usable hosts".to_string(),
            })
        })?;

        let octet = changing_octet(len)?;
        let magic = magic_number(len)?;
        let mask = Ipv4Addr::from(mask_for(len)?);
        let (network, broadcast) = (prefix.network(), prefix.broadcast());

        let explanation = [
            format!("1) /{} → mask {}", len, mask),
            format!("2) Changing octet: {} (magic number {})", ordinal(octet), magic),
            format!("3) Network: floor {} to a multiple of {} → {}", host.octets()[octet - 1], magic, network),
            format!("4) Broadcast: next block minus one → {}", broadcast),
            format!("5) Hosts: {} to {} ({} usable)", first, last, host_count(len)?),
        ]
        .join("\n");

        Ok(Question::new(format!("Break down {}", prefix))
            .step("Network address", Answer::Address(network))
            .step("Broadcast address", Answer::Address(broadcast))
            .miss(Answer::Address(last), "That's the last host; the broadcast is one above it")
            .step("First usable host", Answer::Address(first))
            .miss(Answer::Address(network), "That's the network address; hosts start one above it")
            .step("Last usable host", Answer::Address(last))
            .miss(Answer::Address(broadcast), "That's the broadcast address; hosts stop one below it")
            .hint(format!(
                "Block size {} in the {} octet. First host = network + 1, last = broadcast - 1.",
                magic,
                ordinal(octet)
            ))
            .explanation(explanation))
    }
}

// ─── Tests ───────────────────────────────────────────────────────────
