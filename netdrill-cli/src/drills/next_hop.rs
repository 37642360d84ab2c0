use super::{random_address_in, Drill};
use crate::error::{DrillError, DrillResult};
use crate::quiz::{Difficulty, Question};
use netdrill_core::{Answer, AnswerCheck, Choice, Prefix, Route, RouteLookup, RoutingTable, SubnetResult, Verdict};
use rand::seq::SliceRandom;
use rand::{Rng, RngCore};
use std::collections::BTreeSet;
use std::net::Ipv4Addr;
use std::ops::RangeInclusive;
use tracing::debug;

const INTERFACES: [&str; 7] = ["eth0", "eth1", "eth2", "wan0", "lan0", "uplink", "dmz0"];

const NEXT_HOPS: [Ipv4Addr; 6] = [
    Ipv4Addr::new(10, 0, 0, 1),
    Ipv4Addr::new(10, 0, 1, 1),
    Ipv4Addr::new(192, 168, 0, 1),
    Ipv4Addr::new(172, 16, 0, 1),
    Ipv4Addr::new(203, 0, 113, 1),
    Ipv4Addr::new(198, 51, 100, 1),
];

/// Private and documentation space routes are carved from.
const ROUTE_BLOCKS: [(Ipv4Addr, u8); 5] = [
    (Ipv4Addr::new(10, 0, 0, 0), 8),
    (Ipv4Addr::new(172, 16, 0, 0), 12),
    (Ipv4Addr::new(192, 168, 0, 0), 16),
    (Ipv4Addr::new(198, 51, 100, 0), 24),
    (Ipv4Addr::new(203, 0, 113, 0), 24),
];

/// Destinations may also land somewhere only the default route covers.
const OFF_TABLE_BLOCK: (Ipv4Addr, u8) = (Ipv4Addr::new(8, 8, 8, 0), 24);

const INSIDE_ROUTE_CHANCE: f64 = 0.6;
const TIE_PREFIX_RANGE: RangeInclusive<u8> = 20..=26;
const TIE_A_METRIC: u32 = 10;
const TIE_B_METRIC: u32 = 5;

const RULE: &str = "+---------------------------------------------------------------------+";

fn route_prefix_range(difficulty: Difficulty) -> RangeInclusive<u8> {
    match difficulty {
        Difficulty::Casual => 12..=24,
        Difficulty::Standard => 10..=28,
        Difficulty::Expert => 8..=28,
    }
}

fn pick<T: Copy>(items: &[T], rng: &mut dyn RngCore) -> T {
    items[rng.gen_range(0..items.len())]
}

fn random_metric(rng: &mut dyn RngCore) -> u32 {
    rng.gen_range(1..=20)
}

fn block(&(network, len): &(Ipv4Addr, u8)) -> SubnetResult<Prefix> {
    Prefix::new(network, len)
}

/// A block of `lens` length around a random address in one of the route blocks.
fn random_network(lens: RangeInclusive<u8>, rng: &mut dyn RngCore) -> SubnetResult<Prefix> {
    let base = block(&pick(&ROUTE_BLOCKS, rng))?;
    let len = rng.gen_range(lens);
    Prefix::network_of(random_address_in(base, rng), len)
}

/// A shuffled table with a default route and no duplicate destinations,
/// except that expert tables carry one equal-prefix pair split by metric.
pub fn build_routing_table(difficulty: Difficulty, rng: &mut dyn RngCore) -> SubnetResult<RoutingTable> {
    let size = rng.gen_range(difficulty.route_count());
    let mut table = RoutingTable::new();

    table.add_route(
        Route::new(
            Prefix::default_route(),
            pick(&NEXT_HOPS, rng),
            pick(&INTERFACES, rng),
            random_metric(rng),
        )
        .with_note("Default"),
    );

    for _ in 1..size {
        let destination = random_network(route_prefix_range(difficulty), rng)?;
        table.add_route(Route::new(
            destination,
            pick(&NEXT_HOPS, rng),
            pick(&INTERFACES, rng),
            random_metric(rng),
        ));
    }

    table.dedupe_destinations();

    if difficulty == Difficulty::Expert {
        let destination = random_network(TIE_PREFIX_RANGE, rng)?;
        let taken = table.routes().iter().any(|r| r.destination == destination);
        if !taken {
            let hop_a = pick(&NEXT_HOPS, rng);
            let others: Vec<Ipv4Addr> = NEXT_HOPS.iter().copied().filter(|&h| h != hop_a).collect();
            let hop_b = pick(&others, rng);

            table.add_route(
                Route::new(destination, hop_a, pick(&INTERFACES, rng), TIE_A_METRIC).with_note("Tie A"),
            );
            table.add_route(
                Route::new(destination, hop_b, pick(&INTERFACES, rng), TIE_B_METRIC).with_note("Tie B"),
            );
        }
    }

    table.routes_mut().shuffle(rng);
    debug!(routes = table.len(), %difficulty, "built routing table");
    Ok(table)
}

/// 60% of the time a usable host inside a non-default route, otherwise any
/// address from the route blocks or off-table space.
pub fn choose_destination(table: &RoutingTable, rng: &mut dyn RngCore) -> SubnetResult<Ipv4Addr> {
    let specific: Vec<&Route> = table.routes().iter().filter(|r| !r.is_default()).collect();

    if rng.gen_bool(INSIDE_ROUTE_CHANCE) {
        if let Some(route) = specific.choose(rng) {
            let prefix = route.destination;
            return Ok(match prefix.host_range() {
                Some((first, last)) => {
                    Ipv4Addr::from(rng.gen_range(u32::from(first)..=u32::from(last)))
                }
                None => prefix.network(),
            });
        }
    }

    let mut pool = ROUTE_BLOCKS.to_vec();
    pool.push(OFF_TABLE_BLOCK);
    Ok(random_address_in(block(&pick(&pool, rng))?, rng))
}

pub fn render_table(routes: &[Route]) -> String {
    let mut lines = vec![
        "+---- Routing Table --------------------------------------------------+".to_string(),
        "| Destination        | Next Hop        | Iface    | Metric | Note     |".to_string(),
        RULE.to_string(),
    ];
    for r in routes {
        lines.push(format!(
            "| {:<18} | {:<15} | {:<8} | {:>6} | {:<8} |",
            r.destination.to_string(),
            r.next_hop.to_string(),
            r.interface,
            r.metric,
            r.note.as_deref().unwrap_or("")
        ));
    }
    lines.push(RULE.to_string());
    lines.join("\n")
}

fn describe_matches(lookup: &RouteLookup<'_>) -> Vec<String> {
    lookup
        .matches
        .iter()
        .enumerate()
        .map(|(i, r)| {
            format!(
                "  {}. {}  metric={}  → next-hop {}  iface {}",
                i + 1,
                r.destination,
                r.metric,
                r.next_hop,
                r.interface
            )
        })
        .collect()
}

fn verdict_reason(verdict: Verdict<'_>, picked: &str, best: &Route, destination: Ipv4Addr) -> Option<String> {
    match verdict {
        Verdict::Correct => None,
        Verdict::Unmatched => Some(format!("No route covering {} uses {}", destination, picked)),
        Verdict::LessSpecific(route) => Some(format!(
            "{} comes from {}, but {} is a longer prefix",
            picked, route.destination, best.destination
        )),
        Verdict::HigherMetric(route) => Some(format!(
            "Tie on /{}: {} has metric {}, the winner has {}",
            route.destination.prefix_len(),
            route.destination,
            route.metric,
            best.metric
        )),
        Verdict::Tied(route) => Some(format!(
            "{} ties the winner on prefix and metric; the earlier entry wins",
            route.destination
        )),
    }
}

/// Longest-prefix match against a freshly generated table.
pub struct NextHop {
    difficulty: Difficulty,
}

impl NextHop {
    pub fn new(difficulty: Difficulty) -> Self {
        Self { difficulty }
    }
}

impl Drill for NextHop {
    fn id(&self) -> &'static str {
        "next-hop"
    }

    fn title(&self) -> &'static str {
        "Next Hop Trainer"
    }

    fn next_question(&mut self, rng: &mut dyn RngCore) -> DrillResult<Question> {
        let table = build_routing_table(self.difficulty, rng)?;
        let destination = choose_destination(&table, rng)?;
        let lookup = table.resolve(destination);
        let best = lookup.best().ok_or(DrillError::NoRoute { destination })?;
        let by_interface = rng.gen_bool(0.5);

        let mut question = Question::new(render_table(table.routes())).line(format!("Destination: {}", destination));

        if by_interface {
            let interfaces: BTreeSet<&str> = table.routes().iter().map(|r| r.interface.as_str()).collect();
            question = question
                .line(format!("Interfaces: {}", interfaces.iter().copied().collect::<Vec<_>>().join(", ")))
                .step("Exit interface", Answer::Text(AnswerCheck::Exact(best.interface.clone())));
            for iface in interfaces {
                if let Some(reason) = verdict_reason(lookup.judge(Choice::Interface(iface)), iface, best, destination) {
                    question = question.miss(Answer::Text(AnswerCheck::Exact(iface.to_string())), reason);
                }
            }
        } else {
            let hops: BTreeSet<Ipv4Addr> = table.routes().iter().map(|r| r.next_hop).collect();
            question = question
                .line(format!(
                    "Next hops: {}",
                    hops.iter().map(|h| h.to_string()).collect::<Vec<_>>().join(", ")
                ))
                .step("Next hop", Answer::Address(best.next_hop));
            for hop in hops {
                if let Some(reason) = verdict_reason(lookup.judge(Choice::NextHop(hop)), &hop.to_string(), best, destination) {
                    question = question.miss(Answer::Address(hop), reason);
                }
            }
        }

        let mut explanation = vec!["Matching routes (longest prefix, then lowest metric):".to_string()];
        explanation.extend(describe_matches(&lookup));
        explanation.push(format!(
            "Selected {} metric={} → next-hop {} via {}",
            best.destination, best.metric, best.next_hop, best.interface
        ));

        Ok(question
            .hint(format!(
                "List every route containing {}. Longest prefix wins; on a tie, lowest metric.",
                destination
            ))
            .explanation(explanation.join("\n")))
    }
}

// ─── Tests ───────────────────────────────────────────────────────────
