use super::{cidr_or_mask, ordinal, Drill};
use crate::error::DrillResult;
use crate::quiz::Question;
use netdrill_core::subnet::{changing_octet, magic_number, mask_for, octet_blocks};
use netdrill_core::Answer;
use rand::{Rng, RngCore};
use std::net::Ipv4Addr;

const MAX_LEN: u8 = 30;
const HINT_BLOCKS: usize = 8;

/// Block size ("magic number") in the changing octet.
#[derive(Default)]
pub struct MagicNumber;

impl MagicNumber {
    pub fn new() -> Self {
        Self
    }
}

impl Drill for MagicNumber {
    fn id(&self) -> &'static str {
        "magic-number"
    }

    fn title(&self) -> &'static str {
        "Magic Number Sprint"
    }

    fn next_question(&mut self, rng: &mut dyn RngCore) -> DrillResult<Question> {
        let len = rng.gen_range(0..=MAX_LEN);
        let as_mask = rng.gen_bool(0.5);
        let octet = changing_octet(len)?;
        let magic = magic_number(len)?;
        let mask_octet = mask_for(len)?[octet - 1];

        let ranges: Vec<String> = octet_blocks(len)?
            .iter()
            .take(HINT_BLOCKS)
            .map(|b| b.to_string())
            .collect();

        let mut question = Question::new(format!(
            "{}: {}",
            if as_mask { "Subnet mask" } else { "CIDR" },
            cidr_or_mask(len, as_mask)?
        ))
        .step("Magic number", Answer::Number(u32::from(magic)))
        .hint(format!(
            "Changing octet is the {}; the block size is 256 minus its mask value.",
            ordinal(octet)
        ))
        .explanation(format!(
            "/{} → {}. Changing octet {}, 256 - {} = {}. Blocks: {} ...",
            len,
            Ipv4Addr::from(mask_for(len)?),
            octet,
            mask_octet,
            magic,
            ranges.join(", ")
        ));

        if u16::from(mask_octet) != magic {
            question = question.miss(
                Answer::Number(u32::from(mask_octet)),
                format!("{} is the mask octet itself; subtract it from 256", mask_octet),
            );
        }

        Ok(question)
    }
}

// ─── Tests ───────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_magic_divides_256() {
        let mut drill = MagicNumber::new();
        let mut rng = StdRng::seed_from_u64(9);

        for _ in 0..100 {
            let q = drill.next_question(&mut rng).unwrap();
            match q.steps[0].answer {
                Answer::Number(n) => assert_eq!(256 % n, 0, "block size {}", n),
                ref other => panic!("unexpected answer {:?}", other),
            }
        }
    }

    #[test]
    fn test_mask_octet_is_diagnosed() {
        let mut drill = MagicNumber::new();
        let mut rng = StdRng::seed_from_u64(4);
        let q = std::iter::repeat_with(|| drill.next_question(&mut rng).unwrap())
            .find(|q| q.intro[0].ends_with("/20") || q.intro[0].ends_with("255.255.240.0"))
            .unwrap();

        assert!(q.steps[0].answer.accepts("16"));
        assert!(q.steps[0].diagnose("240").is_some());
        assert!(q.explanation.contains("0-15, 16-31"));
    }
}
