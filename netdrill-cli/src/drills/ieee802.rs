use super::{choose_one, Drill};
use crate::error::DrillResult;
use crate::quiz::{Difficulty, Question};
use rand::{Rng, RngCore};

const HIDDEN_CODE: &str = "802.x";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Standard {
    pub code: &'static str,
    pub name: &'static str,
    pub summary: &'static str,
}

const fn std802(code: &'static str, name: &'static str, summary: &'static str) -> Standard {
    Standard { code, name, summary }
}

/// The set most certification exams ask about.
pub const CORE: &[Standard] = &[
    std802("802.1Q", "VLAN Tagging", "Adds a VLAN ID to Ethernet frames for segmentation."),
    std802("802.1X", "Port-Based Access Control", "Authenticates devices at the switch or AP using RADIUS."),
    std802("802.3", "Ethernet", "Wired LAN physical and MAC layers over copper and fiber."),
    std802("802.11a", "Wi-Fi 1", "5 GHz, 54 Mb/s, OFDM (legacy)."),
    std802("802.11b", "Wi-Fi 2", "2.4 GHz, 11 Mb/s, DSSS (legacy)."),
    std802("802.11g", "Wi-Fi 3", "2.4 GHz, 54 Mb/s, OFDM (legacy)."),
    std802("802.11n", "Wi-Fi 4", "2.4/5 GHz, MIMO, up to 600 Mb/s."),
    std802("802.11ac", "Wi-Fi 5", "5 GHz, MU-MIMO, 80/160 MHz channels."),
    std802("802.11ax", "Wi-Fi 6/6E", "2.4/5/6 GHz, OFDMA, improved efficiency."),
    std802("802.15.1", "Bluetooth (classic)", "Short-range WPAN personal networking."),
    std802("802.15.4", "Low-Rate WPAN", "Low-power IoT mesh foundation (Zigbee, Thread)."),
];

/// Most of the 802 family.
pub const EXPANDED: &[Standard] = &[
    std802("802", "IEEE 802 Overview", "LAN/MAN standards umbrella."),
    std802("802.1D", "Bridging & Spanning Tree (STP)", "Loop prevention in Layer 2 topologies."),
    std802("802.1w", "Rapid Spanning Tree (RSTP)", "Faster convergence than STP."),
    std802("802.1s", "Multiple Spanning Tree (MSTP)", "Maps VLANs to STP instances."),
    std802("802.1Q", "VLAN Tagging", "802.1Q tag in Ethernet frames carries the VLAN ID."),
    std802("802.1p", "Layer 2 QoS/PCP", "Priority bits inside the 802.1Q header."),
    std802("802.1X", "Port-Based Network Access Control", "Supplicant, authenticator and RADIUS framework."),
    std802("802.1AB", "LLDP", "Vendor-neutral neighbor discovery."),
    std802("802.1AX", "Link Aggregation (LACP)", "Bundles links for redundancy and capacity."),
    std802("802.1ad", "Q-in-Q VLAN Stacking", "Provider tunneling of customer VLANs."),
    std802("802.1AE", "MACsec", "Layer 2 link encryption and integrity."),
    std802("802.2", "Logical Link Control (LLC)", "Upper sublayer of the data link layer."),
    std802("802.3", "Ethernet", "Wired LAN physical and MAC for Ethernet."),
    std802("802.3u", "Fast Ethernet", "100 Mb/s Ethernet (100BASE-TX)."),
    std802("802.3ab", "Gigabit Ethernet over Copper", "1 Gb/s over twisted pair (1000BASE-T)."),
    std802("802.3z", "Gigabit Ethernet over Fiber", "1 Gb/s over fiber (1000BASE-SX/LX)."),
    std802("802.3ae", "10 Gigabit Ethernet", "10 Gb/s Ethernet over fiber."),
    std802("802.3an", "10GBASE-T", "10 Gb/s over copper (Cat6a)."),
    std802("802.3ba", "40/100 Gigabit Ethernet", "Higher-speed Ethernet."),
    std802("802.3by", "25 Gigabit Ethernet", "25 Gb/s Ethernet."),
    std802("802.3af", "Power over Ethernet (PoE)", "About 15.4 W at the PSE."),
    std802("802.3at", "PoE+ (Type 2)", "About 30 W at the PSE."),
    std802("802.3bt", "PoE++ (Types 3/4)", "About 60-90 W depending on class."),
    std802("802.11", "Wireless LAN (Wi-Fi)", "Base Wi-Fi standard."),
    std802("802.11a", "Wi-Fi 1", "5 GHz; 54 Mb/s."),
    std802("802.11b", "Wi-Fi 2", "2.4 GHz; 11 Mb/s."),
    std802("802.11g", "Wi-Fi 3", "2.4 GHz; 54 Mb/s."),
    std802("802.11n", "Wi-Fi 4 (MIMO)", "2.4/5 GHz; MIMO."),
    std802("802.11ac", "Wi-Fi 5 (VHT)", "5 GHz; MU-MIMO; 80/160 MHz."),
    std802("802.11ax", "Wi-Fi 6/6E (OFDMA)", "2.4/5/6 GHz; efficiency."),
    std802("802.11be", "Wi-Fi 7 (EHT)", "Wider channels; multi-link operation."),
    std802("802.11i", "Robust Security Networks (WPA2)", "Introduced WPA2 with AES-CCMP."),
    std802("802.11e", "QoS Enhancements (WMM)", "Traffic prioritization."),
    std802("802.11k", "Radio Resource Management", "Neighbor reports for roaming."),
    std802("802.11r", "Fast BSS Transition", "Accelerates roaming handoffs."),
    std802("802.11v", "Wireless Network Management", "Network-assisted roaming and management."),
    std802("802.11w", "Protected Management Frames", "Secures select management frames."),
    std802("802.15.1", "Bluetooth (classic)", "Short-range WPAN."),
    std802("802.15.4", "Low-Rate WPAN", "IoT low-power mesh (Zigbee, Thread)."),
    std802("802.16", "WiMAX", "Broadband wireless MAN."),
    std802("802.17", "Resilient Packet Ring", "Dual counter-rotating ring MANs."),
    std802("802.20", "Mobile Broadband Wireless Access", "Mobile MAN (historical)."),
    std802("802.21", "Media-Independent Handover", "Handover across heterogeneous networks."),
    std802("802.22", "Wireless Regional Area Networks", "Cognitive radio in TV whitespace."),
];

/// Summary text with every 802 code masked, so a hint never names an option.
fn hide_codes(text: &str) -> String {
    text.split(' ')
        .map(|word| {
            if word.starts_with("802") {
                let code = word.trim_end_matches(|c: char| c.is_ascii_punctuation());
                format!("{}{}", HIDDEN_CODE, &word[code.len()..])
            } else {
                word.to_string()
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Multiple choice over IEEE 802 codes. Expert plays the expanded set.
pub struct Ieee802 {
    pool: &'static [Standard],
}

impl Ieee802 {
    pub fn new(difficulty: Difficulty) -> Self {
        let pool = match difficulty {
            Difficulty::Expert => EXPANDED,
            Difficulty::Casual | Difficulty::Standard => CORE,
        };
        Self { pool }
    }
}

impl Drill for Ieee802 {
    fn id(&self) -> &'static str {
        "ieee802"
    }

    fn title(&self) -> &'static str {
        "IEEE 802 Trainer"
    }

    fn next_question(&mut self, rng: &mut dyn RngCore) -> DrillResult<Question> {
        let target = self.pool[rng.gen_range(0..self.pool.len())];
        let wrongs: Vec<Standard> = self.pool.iter().copied().filter(|s| s.code != target.code).collect();

        let by_code = rng.gen_bool(0.5);
        let question = Question::new(if by_code {
            format!("What does {} define?", target.code)
        } else {
            format!("Which code matches: {}?", target.name)
        });

        let question = choose_one(
            question,
            target,
            &wrongs,
            rng,
            |s: Standard| (if by_code { s.name } else { s.code }).to_string(),
            |s: Standard| format!("That's {} ({})", s.code, s.name),
        );

        Ok(question
            .hint(hide_codes(target.summary))
            .explanation(format!("{} is {}: {}", target.code, target.name, target.summary)))
    }
}

// ─── Tests ───────────────────────────────────────────────────────────
