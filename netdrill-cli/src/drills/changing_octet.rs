use super::{cidr_or_mask, ordinal, random_private_host, Drill};
use crate::error::DrillResult;
use crate::quiz::Question;
use netdrill_core::subnet::{changing_octet, mask_for};
use netdrill_core::Answer;
use rand::{Rng, RngCore};
use std::net::Ipv4Addr;

const MAX_LEN: u8 = 30;

/// Which octet (1-4) a prefix cuts through.
#[derive(Default)]
pub struct ChangingOctet;

impl ChangingOctet {
    pub fn new() -> Self {
        Self
    }
}

impl Drill for ChangingOctet {
    fn id(&self) -> &'static str {
        "changing-octet"
    }

    fn title(&self) -> &'static str {
        "Changing Octet"
    }

    fn next_question(&mut self, rng: &mut dyn RngCore) -> DrillResult<Question> {
        let len = rng.gen_range(0..=MAX_LEN);
        let octet = changing_octet(len)?;
        let mask = Ipv4Addr::from(mask_for(len)?);

        let (intro, prompt) = match rng.gen_range(0..3) {
            0 => (format!("CIDR: {}", cidr_or_mask(len, false)?), "Which octet changes (1-4)"),
            1 => (format!("Subnet mask: {}", cidr_or_mask(len, true)?), "Which octet changes (1-4)"),
            _ => (
                format!("IP: {} /{}", random_private_host(rng)?, len),
                "Which octet determines the subnet (1-4)",
            ),
        };

        let mut question = Question::new(intro)
            .step(prompt, Answer::Number(octet as u32))
            .hint("/0-/7 → 1st, /8-/15 → 2nd, /16-/23 → 3rd, /24-/32 → 4th")
            .explanation(format!(
                "/{} = {}. The first octet that isn't 255 is the {}.",
                len,
                mask,
                ordinal(octet)
            ));

        if octet > 1 {
            let reason = if len % 8 == 0 {
                format!("/{} fills the {} octet completely; the next one changes", len, ordinal(octet - 1))
            } else {
                "Octets are counted from 1, left to right".to_string()
            };
            question = question.miss(Answer::Number(octet as u32 - 1), reason);
        }

        Ok(question)
    }
}

// ─── Tests ───────────────────────────────────────────────────────────
