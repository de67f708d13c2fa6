use super::{Front, Results, Selection};
use crate::base::{LegacyRandom, StopReason};
use crate::model::{PressureAdjustment, PressureModel};
use crate::network::{PoreId, PoreNetwork};
use crate::StrError;

/// Runs the invasion percolation on a pore network
///
/// The invading fluid enters through the inlet (start) pores and, at each iteration,
/// occupies one pore of the front chosen by a [Selection] rule. The run stops when an
/// outlet (end) pore is occupied, when the maximum number of iterations is exceeded,
/// when the front becomes empty, or when no front pore has a defined total pressure.
///
/// # Example
///
/// ```
/// use ipsim::prelude::*;
/// use ipsim::StrError;
///
/// fn main() -> Result<(), StrError> {
///     let mut network = PoreNetwork::new_grid(2, 2, 3, 0.0005, Radius::Constant(2e-4), Grain::Constant(0))?;
///     let model = PressureModel::new(&[65.0], 1000.0, 800.0, 0.05)?;
///     model.initialize_pores(&mut network)?;
///     let mut sim = Simulation::new(&mut network, &model)?;
///     let results = sim.run(-1, 0.0, 0)?;
///     assert_eq!(results.stop_reason, Some(StopReason::ReachedOutlet));
///     Ok(())
/// }
/// ```
pub struct Simulation<'a> {
    /// Holds the pore network (pressures and occupancy)
    network: &'a mut PoreNetwork,

    /// Holds the pressure model
    model: &'a PressureModel,

    /// Holds an optional strategy to adjust the pressures after each front update
    adjustment: Option<Box<dyn PressureAdjustment>>,

    /// Holds the invasion front
    front: Front,

    /// Prints the invasion steps
    verbose: bool,
}

impl<'a> Simulation<'a> {
    /// Allocates a new instance
    ///
    /// The pressures must have been computed by [PressureModel::initialize_pores].
    pub fn new(network: &'a mut PoreNetwork, model: &'a PressureModel) -> Result<Self, StrError> {
        if !network.is_initialized() {
            return Err("the network must be initialized by the pressure model first");
        }
        Ok(Simulation {
            network,
            model,
            adjustment: None,
            front: Front::new(),
            verbose: false,
        })
    }

    /// Sets a strategy to adjust the pressures after each front update
    pub fn set_adjustment(&mut self, adjustment: Box<dyn PressureAdjustment>) -> &mut Self {
        self.adjustment = Some(adjustment);
        self
    }

    /// Enables or disables the printing of the invasion steps
    pub fn set_verbose(&mut self, verbose: bool) -> &mut Self {
        self.verbose = verbose;
        self
    }

    /// Returns the pore network
    pub fn network(&self) -> &PoreNetwork {
        &*self.network
    }

    /// Returns the invasion front
    pub fn front(&self) -> &Front {
        &self.front
    }

    /// Runs the invasion
    ///
    /// The occupancy is not reset; thus, a second call continues from the pores occupied
    /// by the first call (with a new random stream).
    ///
    /// # Input
    ///
    /// * `max_iterations` -- stops after `max_iterations + 1` invasions if positive; zero or
    ///   negative means no limit
    /// * `p` -- stochastic parameter in [0, 1]; zero chooses the minimum total pressure
    /// * `seed` -- seed of the random stream used by the rank-biased selection
    ///
    /// # Output
    ///
    /// Returns the invasion sequence and the reason why the run stopped. Only an invalid
    /// `p` gives an error.
    pub fn run(&mut self, max_iterations: i64, p: f64, seed: u32) -> Result<Results, StrError> {
        let selection = Selection::new(p)?;
        let mut rng = LegacyRandom::new(seed);
        let mut results = Results::new();
        self.front.rebuild(self.network);
        self.adjust();
        debug_assert_eq!(self.front.verify(self.network), Ok(()));
        self.print_header();
        let mut reached_outlet = self.network.reached_outlet();
        let mut iteration: i64 = 0;
        loop {
            if let Some(reason) = self.stop_reason(reached_outlet, iteration, max_iterations) {
                results.stop_reason = Some(reason);
                break;
            }
            let (index, threshold) = match selection.select(self.network, &self.front, &mut rng) {
                Some(chosen) => chosen,
                None => {
                    results.stop_reason = Some(StopReason::FrontUnrankable);
                    break;
                }
            };
            reached_outlet = self.network.pore(index).end;
            self.front.update(self.network, index);
            self.adjust();
            debug_assert_eq!(self.front.verify(self.network), Ok(()));
            let node = self.network.pore(index).id;
            results.push(node, threshold);
            self.print_iteration(iteration, node, threshold);
            iteration += 1;
        }
        self.print_footer(&results);
        Ok(results)
    }

    /// Returns the reason to stop, if any
    fn stop_reason(&self, reached_outlet: bool, iteration: i64, max_iterations: i64) -> Option<StopReason> {
        if reached_outlet {
            Some(StopReason::ReachedOutlet)
        } else if max_iterations > 0 && iteration > max_iterations {
            Some(StopReason::MaxIterations)
        } else if self.front.is_empty() {
            Some(StopReason::FrontExhausted)
        } else {
            None
        }
    }

    /// Calls the pressure adjustment strategy, if any, and sorts the front again
    fn adjust(&mut self) {
        if let Some(adjustment) = &self.adjustment {
            adjustment.adjust(self.network, self.model, self.front.indices());
            self.front.rerank(self.network);
        }
    }

    /// Prints the header of the invasion table
    fn print_header(&self) {
        if self.verbose {
            println!("\nIPSIM === INVASION ============================================================");
            println!("{}", "─".repeat(79));
            println!("{:>9} {:>9} {:>14} {:>10}", "iteration", "node", "threshold", "front");
            println!("{}", "─".repeat(79));
        }
    }

    /// Prints one invasion step
    fn print_iteration(&self, iteration: i64, node: PoreId, threshold: f64) {
        if self.verbose {
            println!(
                "{:>9} {:>9} {:>14.6e} {:>10}",
                iteration,
                node,
                threshold,
                self.front.len()
            );
        }
    }

    /// Prints the horizontal line and the stop reason
    fn print_footer(&self, results: &Results) {
        if self.verbose {
            println!("{}", "─".repeat(79));
            if let Some(reason) = results.stop_reason {
                println!("{} after {} invasions", reason, results.len());
            }
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::Simulation;
    use crate::base::{PoreStatus, StopReason};
    use crate::model::{Facilitation, PressureModel};
    use crate::network::{Grain, Pore, PoreNetwork, Radius, Throat};
    use crate::StrError;
    use std::collections::HashSet;

    fn model() -> PressureModel {
        PressureModel::new(&[65.0], 1000.0, 800.0, 0.05).unwrap()
    }

    fn random_grid(nx: usize, ny: usize, nz: usize) -> PoreNetwork {
        let radius = Radius::TruncatedNormal {
            mean: 2e-4,
            std_dev: 5e-5,
            min: 1e-5,
            seed: 123,
        };
        PoreNetwork::new_grid(nx, ny, nz, 0.0005, radius, Grain::Constant(0)).unwrap()
    }

    #[test]
    fn new_captures_errors() {
        let mut network = random_grid(2, 2, 2);
        let model = model();
        assert_eq!(
            Simulation::new(&mut network, &model).err(),
            Some("the network must be initialized by the pressure model first")
        );
    }

    #[test]
    fn run_captures_errors() -> Result<(), StrError> {
        let mut network = random_grid(2, 3, 4);
        let model = model();
        model.initialize_pores(&mut network)?;
        let before: Vec<_> = network.pores().iter().map(|p| p.status()).collect();
        let mut sim = Simulation::new(&mut network, &model)?;
        assert_eq!(sim.run(-1, -0.01, 0).err(), Some("p must be in [0, 1]"));
        assert_eq!(sim.run(-1, 1.01, 0).err(), Some("p must be in [0, 1]"));
        let after: Vec<_> = sim.network().pores().iter().map(|p| p.status()).collect();
        assert_eq!(after, before);
        assert!(sim.front().is_empty());
        Ok(())
    }

    #[test]
    fn run_minimum_chooses_the_smallest_threshold() -> Result<(), StrError> {
        let mut network = random_grid(4, 4, 6);
        let model = model();
        model.initialize_pores(&mut network)?;
        let reference = network.clone();
        let mut sim = Simulation::new(&mut network, &model)?;
        let results = sim.run(-1, 0.0, 0)?;
        assert_eq!(results.stop_reason, Some(StopReason::ReachedOutlet));

        // replay the invasion and check each threshold against the front of its step
        let mut occupied: HashSet<usize> = reference
            .pores()
            .iter()
            .filter(|p| p.start)
            .map(|p| p.id)
            .collect();
        for invasion in &results.invasions {
            let mut min = f64::INFINITY;
            for pore in reference.pores() {
                if occupied.contains(&pore.id) {
                    continue;
                }
                let on_front = reference.neighbor_ids(pore.id)?.iter().any(|j| occupied.contains(j));
                if on_front {
                    min = f64::min(min, pore.pt);
                }
            }
            assert_eq!(invasion.threshold, min);
            assert_eq!(reference.pore_by_id(invasion.node)?.pt, invasion.threshold);
            occupied.insert(invasion.node);
        }

        // the last invaded pore is an outlet and no pore is invaded twice
        let last = results.invasions.last().ok_or("no invasions")?;
        assert!(reference.pore_by_id(last.node)?.end);
        let unique: HashSet<_> = results.nodes().into_iter().collect();
        assert_eq!(unique.len(), results.len());
        Ok(())
    }

    #[test]
    fn run_is_deterministic() -> Result<(), StrError> {
        let model = model();
        let mut network = random_grid(3, 3, 5);
        model.initialize_pores(&mut network)?;
        for p in [0.0, 0.3, 1.0] {
            let mut net_a = network.clone();
            let mut net_b = network.clone();
            let a = Simulation::new(&mut net_a, &model)?.run(-1, p, 7)?;
            let b = Simulation::new(&mut net_b, &model)?.run(-1, p, 7)?;
            assert_eq!(a, b);
            assert_eq!(net_a.occupied_ids(), net_b.occupied_ids());
        }
        Ok(())
    }

    #[test]
    fn run_with_p_equal_one_works() -> Result<(), StrError> {
        let mut network = random_grid(2, 3, 4);
        let model = model();
        model.initialize_pores(&mut network)?;
        let mut sim = Simulation::new(&mut network, &model)?;
        let results = sim.run(-1, 1.0, 0)?;
        assert_eq!(results.stop_reason, Some(StopReason::ReachedOutlet));
        assert!(results.len() >= 3);
        for node in results.nodes() {
            let pore = sim.network().pore_by_id(node)?;
            assert!(!pore.start);
            assert_eq!(pore.status(), PoreStatus::Occupied);
        }
        sim.front().verify(sim.network())?;
        Ok(())
    }

    #[test]
    fn run_stops_after_max_iterations() -> Result<(), StrError> {
        // constant radius → the buoyancy pressure fills the lower layers first
        let mut network = PoreNetwork::new_grid(3, 3, 10, 0.0005, Radius::Constant(2e-4), Grain::Constant(0))?;
        let model = model();
        model.initialize_pores(&mut network)?;
        let mut sim = Simulation::new(&mut network, &model)?;
        let results = sim.run(3, 0.0, 0)?;
        assert_eq!(results.stop_reason, Some(StopReason::MaxIterations));
        assert_eq!(results.nodes(), &[9, 10, 11, 12]);

        // a second run continues from the current occupancy
        let results = sim.run(1, 0.0, 0)?;
        assert_eq!(results.nodes(), &[13, 14]);
        assert_eq!(sim.network().occupied_ids(), &[0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14]);
        Ok(())
    }

    #[test]
    fn run_stops_when_the_front_is_exhausted() -> Result<(), StrError> {
        // 0 - 1 - 2    3 (the outlet is isolated)
        let pores = vec![
            Pore::new(0, 0.0, 0.0, 0.0, 2e-4, 0),
            Pore::new(1, 0.0, 0.0, 0.001, 2e-4, 0),
            Pore::new(2, 0.0, 0.0, 0.002, 2e-4, 0),
            Pore::new(3, 0.0, 0.0, 0.005, 2e-4, 0),
        ];
        let throats = vec![Throat { id: 0, start: 0, end: 1 }, Throat { id: 1, start: 1, end: 2 }];
        let mut network = PoreNetwork::new(pores, throats)?;
        let model = model();
        model.initialize_pores(&mut network)?;
        let mut sim = Simulation::new(&mut network, &model)?;
        let results = sim.run(-1, 0.0, 0)?;
        assert_eq!(results.stop_reason, Some(StopReason::FrontExhausted));
        assert_eq!(results.nodes(), &[1, 2]);
        assert!(!sim.network().pore(3).is_occupied());
        Ok(())
    }

    #[test]
    fn run_stops_when_the_front_has_no_defined_pressure() -> Result<(), StrError> {
        // 0 - 1 - 2 - 3 along z; pore 2 has a grain type without contact angle
        let pores = vec![
            Pore::new(0, 0.0, 0.0, 0.0, 2e-4, 0),
            Pore::new(1, 0.0, 0.0, 0.001, 2e-4, 0),
            Pore::new(2, 0.0, 0.0, 0.002, 2e-4, 1),
            Pore::new(3, 0.0, 0.0, 0.003, 2e-4, 0),
        ];
        let throats = vec![
            Throat { id: 0, start: 0, end: 1 },
            Throat { id: 1, start: 1, end: 2 },
            Throat { id: 2, start: 2, end: 3 },
        ];
        let network = PoreNetwork::new(pores, throats)?;
        let model = model();
        for p in [0.0, 0.5] {
            let mut network = network.clone();
            model.initialize_pores(&mut network)?;
            assert!(network.pore(2).pt.is_nan());
            let mut sim = Simulation::new(&mut network, &model)?;
            let results = sim.run(-1, p, 0)?;
            assert_eq!(results.stop_reason, Some(StopReason::FrontUnrankable));
            assert_eq!(results.nodes(), &[1]);
            assert_eq!(sim.network().occupied_ids(), &[0, 1]);
            assert_eq!(sim.front().ids(sim.network()), &[2]);
            sim.front().verify(sim.network())?;
        }
        Ok(())
    }

    #[test]
    fn run_stops_when_the_invaded_pore_is_an_outlet() -> Result<(), StrError> {
        // 0 - 1 - 2 along z with 1 and 2 as outlets
        let mut network = PoreNetwork::new_grid(1, 1, 3, 0.0005, Radius::Constant(2e-4), Grain::Constant(0))?;
        let model = model();
        model.initialize_pores(&mut network)?;
        network.set_boundaries(|p| p.id == 0, |p| p.id > 0);
        let mut sim = Simulation::new(&mut network, &model)?;
        let results = sim.run(-1, 0.0, 0)?;
        assert_eq!(results.stop_reason, Some(StopReason::ReachedOutlet));
        assert_eq!(results.nodes(), &[1]);
        Ok(())
    }

    #[test]
    fn run_stops_immediately_if_an_outlet_is_occupied() -> Result<(), StrError> {
        let mut network = random_grid(2, 2, 3);
        let model = model();
        model.initialize_pores(&mut network)?;
        network.set_boundaries(|p| p.z == 0.0, |p| p.z == 0.0);
        let mut sim = Simulation::new(&mut network, &model)?;
        let results = sim.run(-1, 0.0, 0)?;
        assert!(results.is_empty());
        assert_eq!(results.stop_reason, Some(StopReason::ReachedOutlet));
        Ok(())
    }

    #[test]
    fn run_with_facilitation_works() -> Result<(), StrError> {
        let mut network = random_grid(3, 3, 4);
        let model = model();
        model.initialize_pores(&mut network)?;
        let mut sim = Simulation::new(&mut network, &model)?;
        sim.set_adjustment(Box::new(Facilitation)).set_verbose(true);
        let results = sim.run(-1, 0.0, 0)?;
        assert_eq!(results.stop_reason, Some(StopReason::ReachedOutlet));
        sim.front().verify(sim.network())?;
        Ok(())
    }
}
