use std::collections::BTreeMap;
use std::fmt::{Debug, Formatter};
use std::time::Instant;

use log::{debug, info, warn};
use petgraph::prelude::DiGraphMap;
use petgraph::visit::EdgeRef;
use rayon::iter::{IntoParallelIterator, ParallelIterator};
use rstar::RTree;
use scc::HashMap;

use crate::crs::Lv95;
use crate::dataset::{NamedLocation, RouteSegment};
use crate::route::error::RouteError;
use crate::route::itinerary::{Anchor, Itinerary, Stop, TraversedSegment};

pub type Weight = u32;
pub type NodeIx = JunctionId;

pub type GraphStructure = DiGraphMap<NodeIx, Weight>;

/// Identity of a junction: its LV95 position quantised to millimetres.
/// Segment endpoints that coincide at millimetre precision merge into
/// the same graph node, which is what welds the network together.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct JunctionId(i64, i64);

impl JunctionId {
    pub fn from_lv95(position: &Lv95) -> Self {
        JunctionId(
            (position.e * 1000.0).round() as i64,
            (position.n * 1000.0).round() as i64,
        )
    }
}

/// A graph node at a segment endpoint, stored in the R-tree
/// for nearest-neighbour lookups.
#[derive(Debug, Copy, Clone, PartialOrd, PartialEq)]
pub struct Junction {
    pub id: JunctionId,
    pub position: Lv95,
}

impl Junction {
    pub fn new(position: Lv95) -> Self {
        Junction {
            id: JunctionId::from_lv95(&position),
            position,
        }
    }
}

impl rstar::Point for Junction {
    type Scalar = f64;
    const DIMENSIONS: usize = 2;

    fn generate(mut generator: impl FnMut(usize) -> Self::Scalar) -> Self {
        Junction::new(Lv95::new(generator(0), generator(1)))
    }

    fn nth(&self, index: usize) -> Self::Scalar {
        match index {
            0 => self.position.e,
            1 => self.position.n,
            _ => unreachable!(),
        }
    }

    fn nth_mut(&mut self, index: usize) -> &mut Self::Scalar {
        match index {
            0 => &mut self.position.e,
            1 => &mut self.position.n,
            _ => unreachable!(),
        }
    }
}

/// Routing graph over the cycling network. Nodes are junctions, edges
/// are path segments weighted by planar length in metres; both edge
/// directions are inserted since the network is undirected.
pub struct Graph {
    pub(crate) graph: GraphStructure,
    pub(crate) index: RTree<Junction>,
    pub(crate) hash: HashMap<NodeIx, Junction>,
    /// Kept segment per junction pair, keyed with the smaller id first.
    pub(crate) segments: std::collections::HashMap<(NodeIx, NodeIx), usize>,
    pub(crate) store: Vec<RouteSegment>,
    pub(crate) locations: BTreeMap<String, NodeIx>,
}

impl Debug for Graph {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Graph with {} junctions and {} locations",
            self.hash.len(),
            self.locations.len()
        )
    }
}

fn edge_key(a: NodeIx, b: NodeIx) -> (NodeIx, NodeIx) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

impl Graph {
    /// Builds the routing graph from the validated segment collection and
    /// attaches the named-location resolution table. Deterministic: the
    /// same input always yields the same topology, weights and table.
    pub fn new(
        store: Vec<RouteSegment>,
        gazetteer: Vec<NamedLocation>,
    ) -> Result<Graph, RouteError> {
        let mut start_time = Instant::now();
        let fixed_start_time = Instant::now();

        info!("Ingesting {} segments...", store.len());

        let mut graph = GraphStructure::new();
        let mut segments = std::collections::HashMap::new();
        let mut junctions: Vec<Junction> = Vec::new();
        let mut seen = std::collections::HashSet::new();

        for (segment_ix, segment) in store.iter().enumerate() {
            let start = Junction::new(segment.first());
            let end = Junction::new(segment.last());

            if start.id == end.id {
                // Closed loops contribute nothing to shortest paths
                debug!("Skipping closed-loop segment {segment_ix}");
                continue;
            }

            // Zero-length edges would make disjoint junctions free to cross
            let weight = (segment.length_m().round() as Weight).max(1);
            let key = edge_key(start.id, end.id);

            // Parallel segments between the same junctions collapse
            // to the shorter one
            let better = graph
                .edge_weight(start.id, end.id)
                .map_or(true, |existing| weight < *existing);

            if better {
                graph.add_edge(start.id, end.id, weight);
                graph.add_edge(end.id, start.id, weight);
                segments.insert(key, segment_ix);
            }

            for junction in [start, end] {
                if seen.insert(junction.id) {
                    junctions.push(junction);
                }
            }
        }

        if graph.edge_count() == 0 {
            return Err(RouteError::EmptyNetwork);
        }

        debug!("Graphical ingestion took: {:?}", start_time.elapsed());
        start_time = Instant::now();

        let hash = HashMap::new();
        let filtered: Vec<Junction> = junctions
            .into_par_iter()
            .filter(|junction| graph.contains_node(junction.id))
            .inspect(|junction| {
                let _ = hash.insert(junction.id, *junction);
            })
            .collect();

        let index = RTree::bulk_load(filtered);
        debug!("RTree bulk load took: {:?}", start_time.elapsed());
        start_time = Instant::now();

        let locations = Self::resolve_gazetteer(&index, gazetteer);
        debug!("Location resolution took: {:?}", start_time.elapsed());

        info!(
            "Finished. {} junctions, {} edges, {} named locations in {}ms",
            index.size(),
            graph.edge_count() / 2,
            locations.len(),
            fixed_start_time.elapsed().as_millis()
        );

        Ok(Graph {
            graph,
            index,
            hash,
            segments,
            store,
            locations,
        })
    }

    /// Snaps every named location to its nearest junction. Duplicate
    /// names keep the nearest pairing, mirroring how the source
    /// gazetteer is joined onto the network.
    fn resolve_gazetteer(
        index: &RTree<Junction>,
        gazetteer: Vec<NamedLocation>,
    ) -> BTreeMap<String, NodeIx> {
        let mut nearest: BTreeMap<String, (NodeIx, f64)> = BTreeMap::new();

        for location in gazetteer {
            let Some(junction) = index.nearest_neighbor(&Junction::new(location.position)) else {
                continue;
            };

            let distance = location.position.distance(&junction.position);
            match nearest.get(&location.name) {
                Some((_, best)) if *best <= distance => {}
                _ => {
                    nearest.insert(location.name, (junction.id, distance));
                }
            }
        }

        nearest
            .into_iter()
            .map(|(name, (node, _))| (name, node))
            .collect()
    }

    pub fn size(&self) -> usize {
        self.hash.len()
    }

    /// Sorted place names available for routing, as shown
    /// in the UI datalist.
    pub fn location_names(&self) -> Vec<String> {
        self.locations.keys().cloned().collect()
    }

    #[inline]
    pub fn get_position(&self, node_index: &NodeIx) -> Option<Lv95> {
        self.hash.get(node_index).map(|entry| entry.position)
    }

    /// Finds the nearest junction to an LV95 position.
    pub fn nearest_junction(&self, position: &Lv95) -> Option<&Junction> {
        self.index.nearest_neighbor(&Junction::new(*position))
    }

    /// Resolves a query anchor to a junction: names through the
    /// gazetteer table, coordinates by snapping to the nearest junction
    /// within `max_snap_m`.
    pub fn resolve(&self, anchor: &Anchor, max_snap_m: f64) -> Result<NodeIx, RouteError> {
        match anchor {
            Anchor::Named(name) => self
                .locations
                .get(name)
                .copied()
                .ok_or_else(|| RouteError::UnknownLocation(name.clone())),
            Anchor::Coordinate(point) => {
                let position = anchor.to_lv95()?;
                let junction = self
                    .nearest_junction(&position)
                    .ok_or(RouteError::EmptyNetwork)?;

                let distance_m = position.distance(&junction.position);
                if distance_m > max_snap_m {
                    warn!(
                        "Rejecting anchor ({}, {}): {distance_m:.0}m off-network",
                        point.y(),
                        point.x()
                    );
                    return Err(RouteError::OutsideNetwork {
                        label: anchor.label(),
                        distance_m,
                    });
                }

                Ok(junction.id)
            }
        }
    }

    pub(crate) fn route_nodes(
        &self,
        start_node: NodeIx,
        finish_node: NodeIx,
    ) -> Option<(Weight, Vec<NodeIx>)> {
        debug!("Routing {:?} -> {:?}", start_node, finish_node);

        petgraph::algo::astar(
            &self.graph,
            start_node,
            |finish| finish == finish_node,
            |e| *e.weight(),
            |_| 0 as Weight,
        )
    }

    /// Finds the shortest route through the given stops (origin, any
    /// number of via points, destination) and assembles the traversed
    /// segments with their geometry oriented along the direction of
    /// travel.
    pub fn route(&self, anchors: &[Anchor], max_snap_m: f64) -> Result<Itinerary, RouteError> {
        if anchors.len() < 2 {
            return Err(RouteError::NotEnoughStops);
        }

        let stops = anchors
            .iter()
            .map(|anchor| Ok((anchor.label(), self.resolve(anchor, max_snap_m)?)))
            .collect::<Result<Vec<_>, RouteError>>()?;

        for pair in stops.windows(2) {
            if pair[0].1 == pair[1].1 {
                return Err(RouteError::IdenticalStops(pair[1].0.clone()));
            }
        }

        let mut segments = Vec::new();
        let mut count = 0;

        for (leg, pair) in stops.windows(2).enumerate() {
            let (ref from_label, from) = pair[0];
            let (ref to_label, to) = pair[1];

            let (weight, path) = self
                .route_nodes(from, to)
                .ok_or_else(|| RouteError::NoPath {
                    from: from_label.clone(),
                    to: to_label.clone(),
                })?;

            debug!("Leg {leg}: {} nodes, weight {weight}", path.len());

            for edge in path.windows(2) {
                let [a, b] = edge else {
                    continue;
                };

                let segment_ix = self
                    .segments
                    .get(&edge_key(*a, *b))
                    .ok_or(RouteError::MissingSegment)?;
                let stored = &self.store[*segment_ix];

                // Walk the polyline in travel direction
                let oriented = if JunctionId::from_lv95(&stored.first()) == *a {
                    stored.clone()
                } else {
                    stored.reversed()
                };

                segments.push(TraversedSegment {
                    leg,
                    seq: count,
                    segment: oriented,
                });
                count += 1;
            }
        }

        let stops = stops
            .into_iter()
            .map(|(label, node)| {
                let position = self
                    .get_position(&node)
                    .ok_or(RouteError::MissingSegment)?;
                Ok(Stop { label, position })
            })
            .collect::<Result<Vec<_>, RouteError>>()?;

        Ok(Itinerary { stops, segments })
    }
}
