use crate::subnet::Prefix;
use std::cmp::Reverse;
use std::collections::HashMap;
use std::net::Ipv4Addr;

/// A single routing table entry.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Route {
    pub destination: Prefix,
    pub next_hop: Ipv4Addr,
    pub interface: String,
    pub metric: u32,
    /// Free-form label shown next to the entry ("Default", "Tie A").
    pub note: Option<String>,
}

impl Route {
    pub fn new(destination: Prefix, next_hop: Ipv4Addr, interface: impl Into<String>, metric: u32) -> Self {
        Self {
            destination,
            next_hop,
            interface: interface.into(),
            metric,
            note: None,
        }
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }

    pub fn is_default(&self) -> bool {
        self.destination.is_default()
    }

    /// Whether `address` falls inside this route's CIDR block.
    pub fn matches(&self, address: Ipv4Addr) -> bool {
        self.destination.contains(address)
    }
}

/// All routes covering `destination`, most specific first, then lowest metric.
///
/// The sort is stable, so routes tied on both keys keep their input order.
pub fn matching_routes(destination: Ipv4Addr, routes: &[Route]) -> Vec<&Route> {
    let mut matches: Vec<&Route> = routes.iter().filter(|r| r.matches(destination)).collect();
    matches.sort_by_key(|r| (Reverse(r.destination.prefix_len()), r.metric));
    matches
}

/// Longest-prefix match with a metric tie-break. `None` when nothing covers
/// `destination`, which can only happen without a default route.
pub fn best_route(destination: Ipv4Addr, routes: &[Route]) -> Option<&Route> {
    matching_routes(destination, routes).into_iter().next()
}

/// What the player picked as the way out of the router.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Choice<'a> {
    NextHop(Ipv4Addr),
    Interface(&'a str),
}

impl Choice<'_> {
    fn picks(&self, route: &Route) -> bool {
        match self {
            Choice::NextHop(ip) => route.next_hop == *ip,
            Choice::Interface(name) => route.interface.eq_ignore_ascii_case(name),
        }
    }
}

/// How a picked next hop or interface relates to the selected route.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Verdict<'a> {
    Correct,
    /// No matching route uses it.
    Unmatched,
    /// It belongs to a matching route with a shorter prefix.
    LessSpecific(&'a Route),
    /// Same prefix length as the winner, worse metric.
    HigherMetric(&'a Route),
    /// Same prefix length and metric; lost on table order.
    Tied(&'a Route),
}

/// The result of resolving one destination against a table.
#[derive(Clone, Debug)]
pub struct RouteLookup<'a> {
    pub destination: Ipv4Addr,
    pub matches: Vec<&'a Route>,
}

impl<'a> RouteLookup<'a> {
    pub fn new(destination: Ipv4Addr, routes: &'a [Route]) -> Self {
        Self {
            destination,
            matches: matching_routes(destination, routes),
        }
    }

    pub fn best(&self) -> Option<&'a Route> {
        self.matches.first().copied()
    }

    /// Classify the player's pick against the selected route.
    pub fn judge(&self, choice: Choice<'_>) -> Verdict<'a> {
        let best = match self.best() {
            Some(best) => best,
            None => return Verdict::Unmatched,
        };

        if choice.picks(best) {
            return Verdict::Correct;
        }

        match self.matches.iter().copied().find(|r| choice.picks(r)) {
            None => Verdict::Unmatched,
            Some(route) if route.destination.prefix_len() < best.destination.prefix_len() => {
                Verdict::LessSpecific(route)
            }
            Some(route) if route.metric > best.metric => Verdict::HigherMetric(route),
            Some(route) => Verdict::Tied(route),
        }
    }
}

/// A router's table of routes.
#[derive(Clone, Debug, Default)]
pub struct RoutingTable {
    routes: Vec<Route>,
}

impl RoutingTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_routes(routes: Vec<Route>) -> Self {
        Self { routes }
    }

    pub fn add_route(&mut self, route: Route) {
        self.routes.push(route);
    }

    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    pub fn routes_mut(&mut self) -> &mut Vec<Route> {
        &mut self.routes
    }

    pub fn default_route(&self) -> Option<&Route> {
        self.routes.iter().find(|r| r.is_default())
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// Keep one route per destination block, the one with the lowest metric.
    ///
    /// Survivors stay in the position of the first route seen for their block.
    pub fn dedupe_destinations(&mut self) {
        let mut slot_for: HashMap<(Ipv4Addr, u8), usize> = HashMap::new();
        let mut kept: Vec<Route> = Vec::with_capacity(self.routes.len());

        for route in self.routes.drain(..) {
            let key = (route.destination.network(), route.destination.prefix_len());
            match slot_for.get(&key) {
                Some(&slot) => {
                    if route.metric < kept[slot].metric {
                        kept[slot] = route;
                    }
                }
                None => {
                    slot_for.insert(key, kept.len());
                    kept.push(route);
                }
            }
        }

        self.routes = kept;
    }

    pub fn lookup(&self, destination: Ipv4Addr) -> Option<&Route> {
        best_route(destination, &self.routes)
    }

    pub fn resolve(&self, destination: Ipv4Addr) -> RouteLookup<'_> {
        RouteLookup::new(destination, &self.routes)
    }
}

// ─── Tests ───────────────────────────────────────────────────────────
