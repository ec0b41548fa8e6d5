use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;
use tracing::{debug, trace};

use crate::distance::{DistanceTable, Location};
use crate::error::{AcoError, Result};
use crate::matrix::SquareMatrix;
use crate::tour::{is_permutation, nearest_neighbor_tour, tour_length};

/// Ant System hyperparameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AsParams {
    pub num_ants: usize,
    pub alpha: f64,     // Pheromone influence
    pub beta: f64,      // Visibility influence
    pub evap_rate: f64, // Rho, in [0, 1)
}

impl Default for AsParams {
    fn default() -> Self {
        AsParams {
            num_ants: 60,
            alpha: 1.0,
            beta: 2.0,
            evap_rate: 0.5,
        }
    }
}

impl AsParams {
    pub fn validate(&self) -> Result<()> {
        if !self.alpha.is_finite() || self.alpha < 0.0 {
            return Err(AcoError::InvalidInput(format!(
                "alpha must be finite and >= 0, got {}",
                self.alpha
            )));
        }
        if !self.beta.is_finite() || self.beta < 0.0 {
            return Err(AcoError::InvalidInput(format!(
                "beta must be finite and >= 0, got {}",
                self.beta
            )));
        }
        if !(0.0..1.0).contains(&self.evap_rate) {
            return Err(AcoError::InvalidInput(format!(
                "evaporation rate must be in [0, 1), got {}",
                self.evap_rate
            )));
        }
        Ok(())
    }
}

/// Per-ant scratch state, reused across the tours a worker builds.
struct Ant {
    tour: Vec<usize>,
    visited: Vec<bool>,
    desirability: Vec<f64>,
    current_city_idx: usize,
    tour_length: f64,
}

impl Ant {
    fn new(num_cities: usize) -> Self {
        Ant {
            tour: Vec::with_capacity(num_cities),
            visited: vec![false; num_cities],
            desirability: vec![0.0; num_cities],
            current_city_idx: 0,
            tour_length: 0.0,
        }
    }

    fn reset(&mut self, start_node: usize) {
        self.tour.clear();
        self.visited.fill(false);
        self.tour.push(start_node);
        self.visited[start_node] = true;
        self.current_city_idx = start_node;
        self.tour_length = 0.0;
    }

    fn visit_city(&mut self, city_idx: usize, distance: f64) {
        self.tour.push(city_idx);
        self.visited[city_idx] = true;
        self.current_city_idx = city_idx;
        self.tour_length += distance;
    }

    fn tour_completed(&self) -> bool {
        self.tour.len() == self.visited.len()
    }
}

/// A finished closed tour and its length.
#[derive(Debug, Clone)]
struct AntTour {
    tour: Vec<usize>,
    length: f64,
}

/// Roulette wheel over the unvisited cities in ascending index order.
///
/// Returns the first unvisited city whose cumulative weight reaches `target`
/// (`>=`). If rounding leaves the target above the final cumulative sum, the
/// last unvisited city is returned. `None` only when every city is visited.
fn spin_wheel(weights: &[f64], visited: &[bool], target: f64) -> Option<usize> {
    let mut cumulative = 0.0;
    let mut last_candidate = None;
    for (city, &weight) in weights.iter().enumerate() {
        if visited[city] {
            continue;
        }
        cumulative += weight;
        last_candidate = Some(city);
        if cumulative >= target {
            return Some(city);
        }
    }
    last_candidate
}

fn select_next_city<R: Rng>(
    ant: &mut Ant,
    pheromone: &SquareMatrix,
    table: &DistanceTable,
    params: &AsParams,
    rng: &mut R,
) -> Option<usize> {
    let current = ant.current_city_idx;
    let trail = pheromone.row(current);
    let mut margin_sum = 0.0;
    for city in 0..ant.visited.len() {
        if ant.visited[city] {
            ant.desirability[city] = 0.0;
            continue;
        }
        let pe = trail[city].powf(params.alpha) * table.visibility(current, city).powf(params.beta);
        ant.desirability[city] = pe;
        margin_sum += pe;
    }

    if margin_sum > 0.0 && margin_sum.is_finite() {
        let p = rng.random::<f64>() * margin_sum;
        spin_wheel(&ant.desirability, &ant.visited, p)
    } else {
        // Every candidate underflowed (or overflowed); take the first unvisited.
        trace!(from = current, margin_sum, "degenerate selection, using first unvisited city");
        ant.visited.iter().position(|v| !v)
    }
}

/// Builds one ant's closed tour against a fixed pheromone matrix.
fn construct_tour<R: Rng>(
    ant: &mut Ant,
    pheromone: &SquareMatrix,
    table: &DistanceTable,
    params: &AsParams,
    rng: &mut R,
) -> AntTour {
    let n_cities = table.size();
    ant.reset(rng.random_range(0..n_cities));

    for _step in 1..n_cities {
        let Some(next) = select_next_city(ant, pheromone, table, params, rng) else {
            break;
        };
        let current = ant.current_city_idx;
        ant.visit_city(next, table.distance(current, next));
    }
    debug_assert!(ant.tour_completed());

    let start = ant.tour[0];
    ant.tour_length += table.distance(ant.current_city_idx, start);
    AntTour {
        tour: ant.tour.clone(),
        length: ant.tour_length,
    }
}

/// Ant System optimizer for the symmetric Euclidean TSP.
///
/// Construction bootstraps the colony with a nearest-neighbor tour and a
/// uniform trail `tau0 = n / L_nn`. Each call to [`AntSystem::iterate`]
/// runs one generation of ants and applies one evaporation + deposit update.
///
/// Ants within a generation build their tours in parallel. Each ant draws
/// from its own generator seeded from the optimizer's generator in ant
/// order, and results are merged in ant order, so a seeded run is
/// reproducible regardless of thread scheduling.
pub struct AntSystem {
    locations: Vec<Location>,
    table: DistanceTable,
    params: AsParams,
    pheromone: SquareMatrix,
    delta: SquareMatrix,
    best_tour: Vec<usize>,
    best_length: f64,
    rng: ChaCha8Rng,
    iterations: usize,
}

impl AntSystem {
    /// Creates an optimizer seeded from OS entropy.
    pub fn new(locations: Vec<Location>, params: AsParams) -> Result<Self> {
        Self::with_rng(locations, params, ChaCha8Rng::from_rng(&mut rand::rng()))
    }

    /// Creates an optimizer whose whole run is determined by `seed`.
    pub fn with_seed(locations: Vec<Location>, params: AsParams, seed: u64) -> Result<Self> {
        Self::with_rng(locations, params, ChaCha8Rng::seed_from_u64(seed))
    }

    fn with_rng(locations: Vec<Location>, params: AsParams, mut rng: ChaCha8Rng) -> Result<Self> {
        params.validate()?;
        let table = DistanceTable::from_locations(&locations)?;
        let n = locations.len();

        let start = rng.random_range(0..n);
        let (best_tour, best_length) = nearest_neighbor_tour(&table, start);
        let tau0 = n as f64 / best_length;
        debug!(
            locations = n,
            start,
            nn_length = best_length,
            tau0,
            "bootstrapped ant system"
        );

        Ok(AntSystem {
            locations,
            table,
            params,
            pheromone: SquareMatrix::filled(n, tau0),
            delta: SquareMatrix::new(n),
            best_tour,
            best_length,
            rng,
            iterations: 0,
        })
    }

    /// Runs one generation of ants, then evaporates and deposits pheromone.
    ///
    /// With zero ants this is a no-op.
    pub fn iterate(&mut self) {
        let num_ants = self.params.num_ants;
        if num_ants == 0 {
            return;
        }
        let n_cities = self.num_locations();

        let seeds: Vec<u64> = (0..num_ants).map(|_| self.rng.random()).collect();
        let pheromone = &self.pheromone;
        let table = &self.table;
        let params = &self.params;
        let tours: Vec<AntTour> = seeds
            .into_par_iter()
            .map_init(
                || Ant::new(n_cities),
                |ant, seed| {
                    let mut rng = ChaCha8Rng::seed_from_u64(seed);
                    construct_tour(ant, pheromone, table, params, &mut rng)
                },
            )
            .collect();

        self.delta.clear();
        for AntTour { tour, length } in tours {
            if length > 0.0 {
                let deposit = 1.0 / length;
                for k in 0..n_cities {
                    let city1_idx = tour[k];
                    let city2_idx = tour[(k + 1) % n_cities];
                    self.delta.add(city1_idx, city2_idx, deposit);
                    self.delta.add(city2_idx, city1_idx, deposit);
                }
            }
            if length < self.best_length {
                debug!(
                    iteration = self.iterations,
                    old = self.best_length,
                    new = length,
                    "improved best tour"
                );
                self.best_length = length;
                self.best_tour = tour;
            }
        }

        // The diagonal is never read; leaving it alone keeps it at tau0.
        // Evaporated entries are floored at the smallest normal f64 so an
        // edge that is never reinforced cannot underflow to zero.
        let retain = 1.0 - self.params.evap_rate;
        for i in 0..n_cities {
            for j in 0..n_cities {
                if i == j {
                    continue;
                }
                let tau = retain * self.pheromone.get(i, j) + self.delta.get(i, j);
                self.pheromone.set(i, j, tau.max(f64::MIN_POSITIVE));
            }
        }
        self.iterations += 1;
    }

    /// Checks that the best tour is a permutation of all locations and that
    /// its recorded length matches a recomputation. Costs O(n); call on demand.
    pub fn validate(&self) -> Result<()> {
        let n = self.num_locations();
        if !is_permutation(&self.best_tour, n) {
            return Err(AcoError::InvariantViolation(format!(
                "best tour is not a permutation of 0..{}: {:?}",
                n, self.best_tour
            )));
        }
        let recomputed = tour_length(&self.best_tour, &self.table);
        if (recomputed - self.best_length).abs() > 1e-9 * recomputed.max(1.0) {
            return Err(AcoError::InvariantViolation(format!(
                "best length {} does not match recomputed length {}",
                self.best_length, recomputed
            )));
        }
        Ok(())
    }

    pub fn locations(&self) -> &[Location] {
        &self.locations
    }

    /// Returns a copy of the best tour found so far.
    pub fn best_tour(&self) -> Vec<usize> {
        self.best_tour.clone()
    }

    pub fn best_length(&self) -> f64 {
        self.best_length
    }

    pub fn pheromone(&self) -> &SquareMatrix {
        &self.pheromone
    }

    pub fn distances(&self) -> &DistanceTable {
        &self.table
    }

    pub fn params(&self) -> &AsParams {
        &self.params
    }

    pub fn num_locations(&self) -> usize {
        self.locations.len()
    }

    /// Number of completed `iterate` calls.
    pub fn iterations(&self) -> usize {
        self.iterations
    }
}
