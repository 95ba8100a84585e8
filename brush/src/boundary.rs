use log::warn;
use math::Pnt2f;
use std::collections::VecDeque;

/// A directed boundary segment contributed to a sector by one of its sides.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Edge {
    pub start: Pnt2f,
    pub end: Pnt2f,
}

impl Edge {
    pub fn new(start: Pnt2f, end: Pnt2f) -> Self {
        Self { start, end }
    }
}

/// Per-sector bags of boundary edges, filled while walking linedefs and then handed out, by
/// value, to boundary reconstruction.
#[derive(Debug)]
pub struct SectorBoundaries {
    edges: Vec<Vec<Edge>>,
}

impl SectorBoundaries {
    pub fn new(num_sectors: usize) -> Self {
        Self {
            edges: vec![Vec::new(); num_sectors],
        }
    }

    pub fn add(&mut self, sector: usize, edge: Edge) {
        match self.edges.get_mut(sector) {
            Some(edges) => edges.push(edge),
            None => warn!("Boundary edge for missing sector {}, ignoring.", sector),
        }
    }

    pub fn into_sectors(self) -> impl Iterator<Item = (usize, Vec<Edge>)> {
        self.edges.into_iter().enumerate()
    }
}

/// Reports how many edges could not be stitched into the loop.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct TopologyFailure {
    pub unmatched: usize,
}

/// Stitches an unordered set of edges into one closed loop of points (the closing point is not
/// repeated).
///
/// Edges may arrive in any order and direction. Endpoints must match exactly: there is no
/// tolerance, so geometry that only almost meets is reported as a failure. A sector with holes or
/// several disjoint parts also fails, as does a chain that does not close on itself.
pub fn reconstruct_loop(edges: &[Edge]) -> Result<Vec<Pnt2f>, TopologyFailure> {
    let (first, rest) = match edges.split_first() {
        Some(split) => split,
        None => return Err(TopologyFailure { unmatched: 0 }),
    };
    let mut chain = VecDeque::with_capacity(edges.len() + 1);
    chain.push_back(first.start);
    chain.push_back(first.end);

    let mut used = vec![false; rest.len()];
    let mut remaining = rest.len();
    while remaining > 0 {
        let mut attached = false;
        for (edge, used) in rest.iter().zip(used.iter_mut()) {
            if *used {
                continue;
            }
            let (front, back) = (chain[0], chain[chain.len() - 1]);
            if edge.start == back {
                chain.push_back(edge.end);
            } else if edge.end == back {
                chain.push_back(edge.start);
            } else if edge.end == front {
                chain.push_front(edge.start);
            } else if edge.start == front {
                chain.push_front(edge.end);
            } else {
                continue;
            }
            *used = true;
            remaining -= 1;
            attached = true;
        }
        if !attached {
            return Err(TopologyFailure {
                unmatched: remaining,
            });
        }
    }

    if chain.front() != chain.back() || chain.len() < 4 {
        return Err(TopologyFailure { unmatched: 0 });
    }
    chain.pop_back();
    Ok(chain.into_iter().collect())
}
