use super::{choose_one, ordinal, Drill};
use crate::error::DrillResult;
use crate::quiz::{Difficulty, Question};
use netdrill_core::subnet::{changing_octet, magic_number, mask_binary, mask_for, octet_blocks};
use netdrill_core::{Answer, SubnetResult};
use rand::{Rng, RngCore};
use std::net::Ipv4Addr;

/// Blocks listed in the hint before it trails off.
const HINT_BLOCKS: usize = 8;

/// CIDR to mask, or mask to CIDR. Casual plays it as multiple choice,
/// expert as typed answers, standard mixes both.
pub struct CidrFlash {
    difficulty: Difficulty,
}

impl CidrFlash {
    pub fn new(difficulty: Difficulty) -> Self {
        Self { difficulty }
    }

    fn multiple_choice(&self, rng: &mut dyn RngCore) -> bool {
        match self.difficulty {
            Difficulty::Casual => true,
            Difficulty::Standard => rng.gen_bool(0.5),
            Difficulty::Expert => false,
        }
    }
}

/// Bits left in the changing octet, its block size, and the first blocks.
fn block_hint(len: u8) -> SubnetResult<String> {
    let blocks = octet_blocks(len)?;
    let mut shown = blocks
        .iter()
        .take(HINT_BLOCKS)
        .map(|b| b.to_string())
        .collect::<Vec<_>>()
        .join(", ");
    if blocks.len() > HINT_BLOCKS {
        shown.push_str(", ...");
    }

    Ok(format!(
        "Every 8 bits fill one octet with 255. /{} leaves {} bit(s) in the {} octet.\n\
         Block size {}: {}",
        len,
        len % 8,
        ordinal(changing_octet(len)?),
        magic_number(len)?,
        shown
    ))
}

fn typed(len: u8, mask: Ipv4Addr, to_mask: bool) -> SubnetResult<Question> {
    // One bit either way is the usual slip.
    let nearby = [len.saturating_sub(1), (len + 1).min(32)];

    if to_mask {
        let mut q = Question::new(format!("CIDR: /{}", len)).step("Subnet mask", Answer::Address(mask));
        for near in nearby {
            if near != len {
                q = q.miss(
                    Answer::Address(Ipv4Addr::from(mask_for(near)?)),
                    format!("That's the mask for /{}", near),
                );
            }
        }
        Ok(q)
    } else {
        let mut q = Question::new(format!("Subnet mask: {}", mask)).step("CIDR prefix", Answer::PrefixLen(len));
        for near in nearby {
            if near != len {
                q = q.miss(Answer::PrefixLen(near), format!("Count the 1 bits again: {} has {}", mask, len));
            }
        }
        Ok(q)
    }
}

impl Drill for CidrFlash {
    fn id(&self) -> &'static str {
        "cidr-flash"
    }

    fn title(&self) -> &'static str {
        "CIDR Flash"
    }

    fn next_question(&mut self, rng: &mut dyn RngCore) -> DrillResult<Question> {
        let len = rng.gen_range(self.difficulty.prefix_range());
        let mask = Ipv4Addr::from(mask_for(len)?);
        let to_mask = rng.gen_bool(0.5);

        let question = if self.multiple_choice(rng) {
            let mut wrongs = Vec::new();
            for other in self.difficulty.prefix_range().filter(|&l| l != len) {
                wrongs.push((other, Ipv4Addr::from(mask_for(other)?)));
            }

            if to_mask {
                choose_one(
                    Question::new(format!("CIDR: /{}", len)).line("Pick the matching subnet mask:"),
                    (len, mask),
                    &wrongs,
                    rng,
                    |(_, m): (u8, Ipv4Addr)| m.to_string(),
                    |(l, _): (u8, Ipv4Addr)| format!("That's the mask for /{}", l),
                )
            } else {
                choose_one(
                    Question::new(format!("Subnet mask: {}", mask)).line("Pick the matching CIDR:"),
                    (len, mask),
                    &wrongs,
                    rng,
                    |(l, _): (u8, Ipv4Addr)| format!("/{}", l),
                    |(l, m): (u8, Ipv4Addr)| format!("/{} is {}", l, m),
                )
            }
        } else {
            typed(len, mask, to_mask)?
        };

        let explanation = format!("/{} = {} = {}", len, mask_binary(len)?, mask);
        Ok(question.hint(block_hint(len)?).explanation(explanation))
    }
}

// ─── Tests ───────────────────────────────────────────────────────────
