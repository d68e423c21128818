use std::fmt;
use std::ops::Add;

use tracing::{debug, trace};

use crate::error::{PhaserError, Result};
use crate::fitness::SharedMetric;
use crate::gene_sequence::GeneSequence;
use crate::individual::{sorted_individuals, Individual};
use crate::population::evaluation::{
    evaluate_all, evaluate_generated, DEFAULT_PARALLEL_THRESHOLD,
};
use crate::population::options::PopulationOptions;
use crate::rng::RandomNumberGenerator;
use crate::selection::{PairSelection, Selection};

/// One generation of candidates, all scored by the same metric instance.
///
/// A population is never modified in place. Every operator builds a new
/// population that shares the metric of the one it was derived from, so
/// generations can be kept around and compared freely.
///
/// Two populations are equal when they hold equal individuals in the same
/// order *and* share the same metric instance.
#[derive(Debug, Clone)]
pub struct Population<C: GeneSequence> {
    metric: SharedMetric<C>,
    individuals: Vec<Individual<C>>,
    parallel_threshold: usize,
}

impl<C: GeneSequence> Population<C> {
    /// Builds a population by scoring every chromosome with `metric`.
    ///
    /// Individuals keep the order of `chromosomes`.
    ///
    /// # Errors
    ///
    /// Returns the first evaluation error, unmodified.
    pub fn new(metric: SharedMetric<C>, chromosomes: Vec<C>) -> Result<Self> {
        Self::evaluated(metric, chromosomes, DEFAULT_PARALLEL_THRESHOLD)
    }

    fn evaluated(
        metric: SharedMetric<C>,
        chromosomes: Vec<C>,
        parallel_threshold: usize,
    ) -> Result<Self> {
        let individuals = evaluate_all(&metric, chromosomes, parallel_threshold)?;
        Ok(Self {
            metric,
            individuals,
            parallel_threshold,
        })
    }

    /// Wraps individuals that were already scored by `self.metric`.
    fn derived(&self, individuals: Vec<Individual<C>>) -> Self {
        Self {
            metric: self.metric.clone(),
            individuals,
            parallel_threshold: self.parallel_threshold,
        }
    }

    /// Sets the batch size from which side-effect free metrics are evaluated
    /// in parallel by this population and everything derived from it.
    pub fn with_parallel_threshold(mut self, parallel_threshold: usize) -> Self {
        self.parallel_threshold = parallel_threshold;
        self
    }

    /// Builds `size` random individuals.
    ///
    /// `length_generator` is called once per individual, in order, to pick
    /// the length of its chromosome.
    ///
    /// # Errors
    ///
    /// Returns the first evaluation error, unmodified.
    pub fn make_random<L>(
        metric: SharedMetric<C>,
        size: usize,
        mut length_generator: L,
        rng: &mut RandomNumberGenerator,
    ) -> Result<Self>
    where
        L: FnMut(&mut RandomNumberGenerator) -> usize,
    {
        let chromosomes: Vec<C> = (0..size)
            .map(|_| {
                let length = length_generator(rng);
                C::random(length, rng)
            })
            .collect();
        trace!(size, "generated random chromosomes");

        Self::new(metric, chromosomes)
    }

    /// Builds `size` random individuals with chromosome lengths drawn
    /// uniformly from `[min_length, max_length]`.
    ///
    /// # Errors
    ///
    /// Returns `PhaserError::Configuration` if `min_length > max_length`, or
    /// the first evaluation error.
    pub fn make_random_with_lengths(
        metric: SharedMetric<C>,
        size: usize,
        min_length: usize,
        max_length: usize,
        rng: &mut RandomNumberGenerator,
    ) -> Result<Self> {
        if min_length > max_length {
            return Err(PhaserError::Configuration(format!(
                "Minimum chromosome length ({}) exceeds maximum ({})",
                min_length, max_length
            )));
        }

        Self::make_random(
            metric,
            size,
            |rng| rng.uniform_int(min_length, max_length),
            rng,
        )
    }

    /// Builds the random first generation described by `options`.
    pub fn from_options(
        metric: SharedMetric<C>,
        options: &PopulationOptions,
        rng: &mut RandomNumberGenerator,
    ) -> Result<Self> {
        options.validate()?;
        debug!(
            size = options.get_population_size(),
            min_length = options.get_min_chromosome_length(),
            max_length = options.get_max_chromosome_length(),
            "building initial population"
        );

        let population = Self::make_random_with_lengths(
            metric,
            options.get_population_size(),
            options.get_min_chromosome_length(),
            options.get_max_chromosome_length(),
            rng,
        )?;
        Ok(population.with_parallel_threshold(options.get_parallel_threshold()))
    }

    /// Copies the individuals picked by `selection`, in the order returned.
    ///
    /// Indices may repeat and the result may be smaller or larger than this
    /// population. Fitness is carried over, not recomputed.
    ///
    /// # Panics
    ///
    /// Panics if the selection returns an index out of range.
    pub fn select<S>(&self, selection: &S) -> Self
    where
        S: Selection + ?Sized,
    {
        let selected: Vec<Individual<C>> = selection
            .materialise(self.individuals.len())
            .into_iter()
            .map(|i| self.individuals[i].clone())
            .collect();
        debug!(from = self.individuals.len(), to = selected.len(), "select");

        self.derived(selected)
    }

    /// Applies `mutation` to every chromosome picked by `selection` and scores
    /// the results.
    ///
    /// # Errors
    ///
    /// Returns the first evaluation error, unmodified. On the sequential path
    /// no further children are generated after it.
    ///
    /// # Panics
    ///
    /// Panics if the selection returns an index out of range.
    pub fn mutate<S, M>(&self, selection: &S, mut mutation: M) -> Result<Self>
    where
        S: Selection + ?Sized,
        M: FnMut(&C) -> C,
    {
        let indices = selection.materialise(self.individuals.len());
        debug!(from = self.individuals.len(), to = indices.len(), "mutate");

        let batch = indices.len();
        self.scored(
            indices
                .into_iter()
                .map(|i| mutation(self.individuals[i].chromosome())),
            batch,
        )
    }

    /// Produces one scored child per pair picked by `selection`.
    ///
    /// # Errors
    ///
    /// Returns the first evaluation error, unmodified. On the sequential path
    /// no further children are generated after it.
    ///
    /// # Panics
    ///
    /// Panics if a pair is out of range or pairs an index with itself.
    pub fn crossover<P, X>(&self, selection: &P, mut crossover: X) -> Result<Self>
    where
        P: PairSelection + ?Sized,
        X: FnMut(&C, &C) -> C,
    {
        let pairs = selection.materialise(self.individuals.len());
        debug!(from = self.individuals.len(), to = pairs.len(), "crossover");

        let batch = pairs.len();
        self.scored(
            pairs.into_iter().map(|(i, j)| {
                let (first, second) = self.parents(i, j);
                crossover(first, second)
            }),
            batch,
        )
    }

    /// Produces two scored children per pair picked by `selection` and
    /// returns them together with the individuals no pair touched.
    ///
    /// The first population holds the children, two per pair in pair order.
    /// The second holds, in their original order, the individuals whose index
    /// appeared in no pair. Every original individual is therefore either a
    /// parent or part of the remainder, and combining the two populations
    /// gives a full next generation.
    ///
    /// # Errors
    ///
    /// Returns the first evaluation error, unmodified. On the sequential path
    /// no further children are generated after it.
    ///
    /// # Panics
    ///
    /// Panics if a pair is out of range or pairs an index with itself.
    pub fn symmetric_crossover_with_remainder<P, X>(
        &self,
        selection: &P,
        mut crossover: X,
    ) -> Result<(Self, Self)>
    where
        P: PairSelection + ?Sized,
        X: FnMut(&C, &C) -> (C, C),
    {
        let pairs = selection.materialise(self.individuals.len());
        let mut used = vec![false; self.individuals.len()];
        for &(i, j) in &pairs {
            used[i] = true;
            used[j] = true;
        }

        let remainder: Vec<Individual<C>> = self
            .individuals
            .iter()
            .zip(&used)
            .filter(|(_, is_used)| !**is_used)
            .map(|(individual, _)| individual.clone())
            .collect();
        debug!(
            from = self.individuals.len(),
            children = 2 * pairs.len(),
            remainder = remainder.len(),
            "symmetric crossover"
        );

        let batch = 2 * pairs.len();
        let crossed = self.scored(
            pairs.into_iter().flat_map(|(i, j)| {
                let (first, second) = self.parents(i, j);
                let (child1, child2) = crossover(first, second);
                [child1, child2]
            }),
            batch,
        )?;
        Ok((crossed, self.derived(remainder)))
    }

    /// Concatenates a pair of populations, first then second.
    ///
    /// # Panics
    ///
    /// Panics if the two populations do not share the same metric instance.
    pub fn combine(pair: (Self, Self)) -> Self {
        pair.0 + pair.1
    }

    /// Returns a population with the same individuals, fittest first.
    pub fn sorted(&self) -> Self {
        self.derived(sorted_individuals(self.individuals.clone()))
    }

    /// Returns the fittest individual, or `None` for an empty population.
    pub fn fittest(&self) -> Option<&Individual<C>> {
        self.individuals
            .iter()
            .min_by(|a, b| a.fitness_ordering(b))
    }

    pub fn individuals(&self) -> &[Individual<C>] {
        &self.individuals
    }

    pub fn metric(&self) -> &SharedMetric<C> {
        &self.metric
    }

    pub fn len(&self) -> usize {
        self.individuals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.individuals.is_empty()
    }

    pub fn parallel_threshold(&self) -> usize {
        self.parallel_threshold
    }

    fn parents(&self, i: usize, j: usize) -> (&C, &C) {
        assert_ne!(i, j, "pair selection paired individual {} with itself", i);
        (
            self.individuals[i].chromosome(),
            self.individuals[j].chromosome(),
        )
    }

    /// Scores `batch` children as they are generated, keeping this
    /// population's metric and threshold.
    fn scored<I>(&self, children: I, batch: usize) -> Result<Self>
    where
        I: Iterator<Item = C>,
    {
        let individuals =
            evaluate_generated(&self.metric, children, batch, self.parallel_threshold)?;
        Ok(self.derived(individuals))
    }
}

impl<C: GeneSequence> Add for Population<C> {
    type Output = Population<C>;

    fn add(self, other: Self) -> Self::Output {
        assert!(
            self.metric.same_instance(&other.metric),
            "cannot concatenate populations scored by different metric instances"
        );

        let mut individuals = self.individuals;
        individuals.extend(other.individuals);
        Self {
            metric: self.metric,
            individuals,
            parallel_threshold: self.parallel_threshold,
        }
    }
}

impl<C: GeneSequence> PartialEq for Population<C> {
    fn eq(&self, other: &Self) -> bool {
        self.metric.same_instance(&other.metric) && self.individuals == other.individuals
    }
}

impl<C: GeneSequence> fmt::Display for Population<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for individual in &self.individuals {
            writeln!(f, "{}", individual)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chromosome::Chromosome;
    use crate::selection::{MosaicSelection, PairMosaicSelection, RangeSelection};

    fn length_metric() -> SharedMetric<Chromosome> {
        SharedMetric::from_fn(|c: &Chromosome| Ok(c.length() as f64))
    }

    fn population(metric: &SharedMetric<Chromosome>, genes: &[&str]) -> Population<Chromosome> {
        let chromosomes = genes.iter().map(|g| g.parse().unwrap()).collect();
        Population::new(metric.clone(), chromosomes).unwrap()
    }

    fn genes(population: &Population<Chromosome>) -> Vec<String> {
        population
            .individuals()
            .iter()
            .map(|i| i.chromosome().to_string())
            .collect()
    }

    #[test]
    fn test_new_keeps_order_and_scores() {
        let metric = length_metric();
        let population = population(&metric, &["fff", "a", "xs"]);

        assert_eq!(genes(&population), vec!["fff", "a", "xs"]);
        let fitness: Vec<f64> = population.individuals().iter().map(|i| i.fitness()).collect();
        assert_eq!(fitness, vec![3.0, 1.0, 2.0]);
    }

    #[test]
    fn test_make_random_calls_length_generator_per_individual() {
        let metric = length_metric();
        let mut rng = RandomNumberGenerator::from_seed(3);
        let mut next = 0;

        let population = Population::<Chromosome>::make_random(
            metric,
            4,
            |_| {
                next += 1;
                next
            },
            &mut rng,
        )
        .unwrap();

        let lengths: Vec<usize> = population
            .individuals()
            .iter()
            .map(|i| i.chromosome().length())
            .collect();
        assert_eq!(lengths, vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_make_random_with_inverted_lengths() {
        let mut rng = RandomNumberGenerator::from_seed(3);
        let result =
            Population::<Chromosome>::make_random_with_lengths(length_metric(), 3, 5, 2, &mut rng);
        assert!(matches!(result, Err(PhaserError::Configuration(_))));
    }

    #[test]
    fn test_from_options() {
        let options = PopulationOptions::builder()
            .population_size(6)
            .min_chromosome_length(2)
            .max_chromosome_length(4)
            .parallel_threshold(2)
            .build()
            .unwrap();
        let mut rng = RandomNumberGenerator::from_seed(8);

        let population =
            Population::<Chromosome>::from_options(length_metric(), &options, &mut rng).unwrap();

        assert_eq!(population.len(), 6);
        assert_eq!(population.parallel_threshold(), 2);
        assert!(population
            .individuals()
            .iter()
            .all(|i| (2..=4).contains(&i.chromosome().length())));
    }

    #[test]
    fn test_select_keeps_fitness_without_reevaluation() {
        use std::sync::atomic::{AtomicUsize, Ordering};
        use std::sync::Arc;

        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let metric = SharedMetric::from_fn(move |c: &Chromosome| {
            counter.fetch_add(1, Ordering::SeqCst);
            Ok(c.length() as f64)
        });
        let population = population(&metric, &["f", "DD", "xxx"]);
        assert_eq!(calls.load(Ordering::SeqCst), 3);

        let selected = population.select(&MosaicSelection::new(vec![2, 0], 2.0).unwrap());

        assert_eq!(genes(&selected), vec!["xxx", "f", "xxx", "f", "xxx", "f"]);
        assert_eq!(calls.load(Ordering::SeqCst), 3);
        assert!(selected.metric().same_instance(&metric));
    }

    #[test]
    fn test_select_range_can_shrink() {
        let metric = length_metric();
        let population = population(&metric, &["f", "D", "x", "s"]);

        let selected = population.select(&RangeSelection::new(0.5, 1.0).unwrap());

        assert_eq!(genes(&selected), vec!["x", "s"]);
    }

    #[test]
    #[should_panic]
    fn test_select_out_of_range_panics() {
        let metric = length_metric();
        let population = population(&metric, &["f", "D"]);
        population.select(&|_: usize| -> Vec<usize> { vec![5] });
    }

    #[test]
    fn test_mutate_scores_new_chromosomes() {
        let metric = length_metric();
        let population = population(&metric, &["f", "DD"]);

        let mutated = population
            .mutate(&|_: usize| -> Vec<usize> { vec![1, 1, 0] }, |c: &Chromosome| {
                Chromosome::new(&format!("{}x", c)).unwrap()
            })
            .unwrap();

        assert_eq!(genes(&mutated), vec!["DDx", "DDx", "fx"]);
        let fitness: Vec<f64> = mutated.individuals().iter().map(|i| i.fitness()).collect();
        assert_eq!(fitness, vec![3.0, 3.0, 2.0]);
        assert_eq!(genes(&population), vec!["f", "DD"]);
    }

    #[test]
    fn test_mutate_stops_at_first_failing_child() {
        let metric = SharedMetric::from_fn(|c: &Chromosome| {
            if c.genes().ends_with('x') {
                Err(PhaserError::FitnessCalculation("does not compile".to_string()))
            } else {
                Ok(0.0)
            }
        });
        let population = population(&metric, &["f", "DD", "s"]);
        let mut mutations = 0;

        let result = population.mutate(&RangeSelection::default(), |c: &Chromosome| {
            mutations += 1;
            Chromosome::new(&format!("{}x", c)).unwrap()
        });

        assert!(matches!(result, Err(PhaserError::FitnessCalculation(_))));
        assert_eq!(mutations, 1);
    }

    #[test]
    fn test_symmetric_crossover_stops_at_first_failing_pair() {
        let metric = SharedMetric::from_fn(|c: &Chromosome| {
            if c.length() > 1 {
                Err(PhaserError::FitnessCalculation("too long".to_string()))
            } else {
                Ok(0.0)
            }
        });
        let population = population(&metric, &["f", "D", "s", "x"]);
        let mut crossings = 0;

        let result = population.symmetric_crossover_with_remainder(
            &|_: usize| -> Vec<(usize, usize)> { vec![(0, 1), (2, 3)] },
            |a: &Chromosome, b: &Chromosome| {
                crossings += 1;
                (Chromosome::new(&format!("{}{}", a, b)).unwrap(), b.clone())
            },
        );

        assert!(result.is_err());
        assert_eq!(crossings, 1);
    }

    #[test]
    fn test_crossover_one_child_per_pair() {
        let metric = length_metric();
        let population = population(&metric, &["ff", "DD", "xx"]);

        let crossed = population
            .crossover(
                &PairMosaicSelection::new(vec![(0, 2), (2, 1)], 1.0).unwrap(),
                |a: &Chromosome, b: &Chromosome| {
                    Chromosome::new(&format!("{}{}", &a.genes()[..1], &b.genes()[1..])).unwrap()
                },
            )
            .unwrap();

        assert_eq!(genes(&crossed), vec!["fx", "xD", "fx"]);
    }

    #[test]
    #[should_panic(expected = "with itself")]
    fn test_crossover_rejects_self_pair() {
        let metric = length_metric();
        let population = population(&metric, &["f", "D"]);
        let _ = population.crossover(
            &|_: usize| -> Vec<(usize, usize)> { vec![(1, 1)] },
            |a: &Chromosome, _: &Chromosome| a.clone(),
        );
    }

    #[test]
    fn test_symmetric_crossover_remainder() {
        let metric = length_metric();
        let population = population(&metric, &["a", "D", "c", "d", "e"]);

        let (crossed, remainder) = population
            .symmetric_crossover_with_remainder(
                &|_: usize| -> Vec<(usize, usize)> { vec![(0, 3), (3, 4)] },
                |a: &Chromosome, b: &Chromosome| (b.clone(), a.clone()),
            )
            .unwrap();

        assert_eq!(genes(&crossed), vec!["d", "a", "e", "d"]);
        assert_eq!(genes(&remainder), vec!["D", "c"]);
        assert_eq!(crossed.len() + remainder.len(), 6);
    }

    #[test]
    fn test_combine_concatenates_in_order() {
        let metric = length_metric();
        let first = population(&metric, &["f", "DD"]);
        let second = population(&metric, &["xxx"]);

        let combined = Population::combine((first.clone(), second.clone()));

        assert_eq!(genes(&combined), vec!["f", "DD", "xxx"]);
        assert!(combined.metric().same_instance(&metric));
        assert_eq!(first + second, combined);
    }

    #[test]
    #[should_panic(expected = "different metric instances")]
    fn test_combine_rejects_lookalike_metric() {
        let first = population(&length_metric(), &["f"]);
        let second = population(&length_metric(), &["f"]);
        let _ = first + second;
    }

    #[test]
    fn test_equality_requires_same_metric() {
        let metric = length_metric();
        let a = population(&metric, &["f", "DD"]);
        let b = population(&metric, &["f", "DD"]);
        let c = population(&length_metric(), &["f", "DD"]);
        let d = population(&metric, &["DD", "f"]);

        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_ne!(a, d);
    }

    #[test]
    fn test_sorted_and_fittest() {
        let metric = length_metric();
        let population = population(&metric, &["xxx", "Ds", "f", "Da"]);

        assert_eq!(genes(&population.sorted()), vec!["f", "Da", "Ds", "xxx"]);
        assert_eq!(population.fittest().unwrap().chromosome().to_string(), "f");
        assert_eq!(genes(&population), vec!["xxx", "Ds", "f", "Da"]);
    }

    #[test]
    fn test_empty_population() {
        let metric = length_metric();
        let empty = Population::new(metric.clone(), Vec::new()).unwrap();

        assert!(empty.is_empty());
        assert!(empty.fittest().is_none());
        assert!(empty.select(&RangeSelection::default()).is_empty());
        assert_eq!(empty.to_string(), "");
    }

    #[test]
    fn test_display_one_line_per_individual() {
        let metric = length_metric();
        let population = population(&metric, &["fDx", "s"]);
        assert_eq!(population.to_string(), "3 fDx\n1 s\n");
    }

    #[test]
    fn test_metric_error_aborts_operator() {
        let metric = SharedMetric::from_fn(|c: &Chromosome| {
            if c.genes().contains('x') {
                Err(PhaserError::FitnessCalculation(format!("cannot compile {}", c)))
            } else {
                Ok(1.0)
            }
        });
        let population = population(&metric, &["f", "D"]);

        let result = population.mutate(&RangeSelection::default(), |c: &Chromosome| {
            Chromosome::new(&format!("{}x", c)).unwrap()
        });

        match result {
            Err(PhaserError::FitnessCalculation(msg)) => assert_eq!(msg, "cannot compile fx"),
            _ => panic!("Expected FitnessCalculation error"),
        }
    }
}
