//! Fruchterman-Reingold force simulation in the unit square.
//!
//! Every step accumulates a displacement per node from all-pairs repulsion (`k² / d`) and
//! per-edge attraction (`d² / k`), caps each node's step at the current temperature, moves the
//! node and clamps it into `[0, 1]²`, then cools the temperature geometrically. There is no
//! randomness: identical inputs produce bit-identical outputs.

use crate::algo::FruchtermanReingoldOptions;
use crate::error::{Error, Result};
use crate::geom::{Point, Vector, clamp_unit, distance};
use crate::graph::{Graph, NodeIndex};

/// Per-step summary returned by [`Simulation::step`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepReport {
    /// Step cap in effect during this step (before cooling).
    pub temperature: f64,
    /// Largest capped displacement length applied to a node, before clamping.
    pub max_displacement: f64,
    /// Sum of capped displacement lengths over all nodes.
    pub total_displacement: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimulationStats {
    pub iterations_run: usize,
    pub final_temperature: f64,
    /// True only when an opt-in convergence threshold ended the run early.
    pub converged: bool,
}

#[derive(Debug, Clone)]
pub struct Simulation {
    positions: Vec<Point>,
    edges: Vec<(usize, usize)>,
    displacement: Vec<Vector>,
    k: f64,
    temperature: f64,
    iteration: usize,
    opts: FruchtermanReingoldOptions,
}

impl Simulation {
    pub fn from_graph(
        graph: &Graph,
        index: &NodeIndex,
        opts: &FruchtermanReingoldOptions,
    ) -> Result<Self> {
        opts.validate()?;
        if graph.nodes.is_empty() {
            return Err(Error::EmptyGraph);
        }
        let n = graph.nodes.len();
        Ok(Self {
            positions: graph.positions(),
            edges: index.edges().to_vec(),
            displacement: vec![Vector::zero(); n],
            k: (1.0 / n as f64).sqrt(),
            temperature: opts.initial_temperature,
            iteration: 0,
            opts: opts.clone(),
        })
    }

    /// Ideal edge length `sqrt(1 / node_count)`.
    pub fn ideal_edge_length(&self) -> f64 {
        self.k
    }

    pub fn temperature(&self) -> f64 {
        self.temperature
    }

    /// Number of completed steps.
    pub fn iteration(&self) -> usize {
        self.iteration
    }

    pub fn positions(&self) -> &[Point] {
        &self.positions
    }

    /// Displacements accumulated during the last step, aligned with `positions`.
    pub fn displacement(&self) -> &[Vector] {
        &self.displacement
    }

    pub fn step(&mut self) -> StepReport {
        let eps = self.opts.epsilon;
        self.displacement.fill(Vector::zero());
        repulsion_pass(&self.positions, &mut self.displacement, self.k, eps);
        attraction_pass(
            &self.positions,
            &self.edges,
            &mut self.displacement,
            self.k,
            eps,
        );

        let temperature = self.temperature;
        let (max_displacement, total_displacement) =
            integrate(&mut self.positions, &self.displacement, temperature);

        self.temperature *= self.opts.cooling;
        self.iteration += 1;

        tracing::trace!(
            iteration = self.iteration,
            temperature,
            max_displacement,
            total_displacement,
            "fruchterman-reingold step"
        );

        StepReport {
            temperature,
            max_displacement,
            total_displacement,
        }
    }

    /// Runs the remaining configured steps.
    pub fn run(&mut self) -> SimulationStats {
        let mut converged = false;
        while self.iteration < self.opts.iterations {
            let report = self.step();
            if let Some(threshold) = self.opts.convergence_threshold {
                if report.total_displacement < threshold {
                    converged = true;
                    break;
                }
            }
        }
        SimulationStats {
            iterations_run: self.iteration,
            final_temperature: self.temperature,
            converged,
        }
    }

    /// Copies the current positions into `graph`, slot by slot.
    pub fn write_back(&self, graph: &mut Graph) {
        for (node, p) in graph.nodes.iter_mut().zip(&self.positions) {
            node.set_position(*p);
        }
    }
}

/// Repulsive contribution to `a`'s accumulator from `b`; `b` receives the negation.
pub fn repulsion_force(a: Point, b: Point, k: f64, epsilon: f64) -> Vector {
    let d = distance(a, b, epsilon);
    let force = k * k / d;
    (a - b) * (force / d)
}

/// Attractive contribution along an edge, oriented from `target` to `source`.
///
/// It is subtracted from the source accumulator and added to the target's.
pub fn attraction_force(source: Point, target: Point, k: f64, epsilon: f64) -> Vector {
    let d = distance(source, target, epsilon);
    let force = d * d / k;
    (source - target) * (force / d)
}

fn repulsion_pass(positions: &[Point], displacement: &mut [Vector], k: f64, epsilon: f64) {
    for i in 0..positions.len() {
        for j in (i + 1)..positions.len() {
            let f = repulsion_force(positions[i], positions[j], k, epsilon);
            displacement[i] += f;
            displacement[j] -= f;
        }
    }
}

fn attraction_pass(
    positions: &[Point],
    edges: &[(usize, usize)],
    displacement: &mut [Vector],
    k: f64,
    epsilon: f64,
) {
    for &(s, t) in edges {
        let f = attraction_force(positions[s], positions[t], k, epsilon);
        displacement[s] -= f;
        displacement[t] += f;
    }
}

/// Applies the temperature-capped displacements and clamps into the unit square.
///
/// Returns the largest and the summed capped step lengths.
fn integrate(positions: &mut [Point], displacement: &[Vector], temperature: f64) -> (f64, f64) {
    let mut max_step = 0.0f64;
    let mut total = 0.0f64;
    for (p, d) in positions.iter_mut().zip(displacement) {
        let len = d.length();
        let mut step = Vector::zero();
        if len > 0.0 {
            let capped = len.min(temperature);
            step = *d * (capped / len);
            max_step = max_step.max(capped);
            total += capped;
        }
        *p = clamp_unit(*p + step);
    }
    (max_step, total)
}

/// Lays out `graph` in place.
///
/// The graph is fully validated before any position changes; on error the input is untouched.
pub fn layout(graph: &mut Graph, opts: &FruchtermanReingoldOptions) -> Result<SimulationStats> {
    let index = NodeIndex::build(graph)?;
    let mut sim = Simulation::from_graph(graph, &index, opts)?;
    tracing::debug!(
        nodes = graph.nodes.len(),
        edges = graph.edges.len(),
        k = sim.ideal_edge_length(),
        iterations = opts.iterations,
        "starting fruchterman-reingold layout"
    );

    let stats = sim.run();
    sim.write_back(graph);

    tracing::info!(
        iterations_run = stats.iterations_run,
        final_temperature = stats.final_temperature,
        converged = stats.converged,
        "layout finished"
    );
    Ok(stats)
}
