//! A generation of specimens and the selection, mutation and reproduction
//! operators applied to it.

use crate::environment::{Backdrop, EliminationProfile};
use crate::specimen::{Phenotype, Specimen};
use rand::distributions::{Distribution, WeightedIndex};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// One fixed-size cohort of specimens.
///
/// The member count is fixed at construction; members are only exposed as
/// slices. `parent_of[i]` is the index in the previous generation that
/// produced `members[i]`, and is absent for generation 0.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Population {
    generation: usize,
    members: Vec<Specimen>,
    parent_of: Option<Vec<usize>>,
    /// Backdrop this row was last drawn against
    pub backdrop: Backdrop,
}

/// Children drawn from a population, paired with their parent indices
#[derive(Clone, Debug, PartialEq)]
pub struct Offspring {
    pub parents: Vec<usize>,
    pub specimens: Vec<Specimen>,
}

impl Offspring {
    pub fn len(&self) -> usize {
        self.parents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parents.is_empty()
    }

    /// Iterate over (parent index, child) pairs
    pub fn pairs(&self) -> impl Iterator<Item = (usize, &Specimen)> {
        self.parents.iter().copied().zip(self.specimens.iter())
    }
}

impl Population {
    /// Create the initial generation with uniformly random phenotypes
    pub fn seed<R: Rng + ?Sized>(size: usize, backdrop: Backdrop, rng: &mut R) -> Self {
        let members = (0..size)
            .map(|_| Specimen::new(Phenotype::from_index(rng.gen_range(0..Phenotype::COUNT))))
            .collect();

        Self {
            generation: 0,
            members,
            parent_of: None,
            backdrop,
        }
    }

    /// Create an initial generation with the given phenotypes, all alive
    pub fn from_phenotypes(phenotypes: &[Phenotype], backdrop: Backdrop) -> Self {
        Self {
            generation: 0,
            members: phenotypes.iter().map(|&p| Specimen::new(p)).collect(),
            parent_of: None,
            backdrop,
        }
    }

    /// Create the next generation by cloning the listed parents in order
    pub fn from_parent_indices(parent: &Population, indices: Vec<usize>) -> Result<Self, PopulationError> {
        parent.check_parent_indices(&indices)?;

        let specimens = indices.iter().map(|&i| parent.members[i].offspring()).collect();

        Self::from_offspring(
            parent,
            Offspring {
                parents: indices,
                specimens,
            },
        )
    }

    /// Create the next generation from offspring drawn with `generate_offspring`.
    ///
    /// Fails unless there is exactly one valid parent index per child and one
    /// child per parent member.
    pub fn from_offspring(parent: &Population, offspring: Offspring) -> Result<Self, PopulationError> {
        parent.check_parent_indices(&offspring.parents)?;
        if offspring.specimens.len() != parent.len() {
            return Err(PopulationError::SizeMismatch {
                expected: parent.len(),
                found: offspring.specimens.len(),
            });
        }

        Ok(Self {
            generation: parent.generation + 1,
            members: offspring.specimens,
            parent_of: Some(offspring.parents),
            backdrop: parent.backdrop,
        })
    }

    fn check_parent_indices(&self, indices: &[usize]) -> Result<(), PopulationError> {
        if indices.len() != self.len() {
            return Err(PopulationError::SizeMismatch {
                expected: self.len(),
                found: indices.len(),
            });
        }
        if let Some(&index) = indices.iter().find(|&&i| i >= self.len()) {
            return Err(PopulationError::ParentOutOfRange {
                index,
                len: self.len(),
            });
        }
        Ok(())
    }

    /// Position in the history
    pub fn generation(&self) -> usize {
        self.generation
    }

    pub fn members(&self) -> &[Specimen] {
        &self.members
    }

    /// Mutable access to members (length stays fixed)
    pub fn members_mut(&mut self) -> &mut [Specimen] {
        &mut self.members
    }

    /// Parent indices into the previous generation
    pub fn parent_of(&self) -> Option<&[usize]> {
        self.parent_of.as_deref()
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Indices of members that are still alive
    pub fn alive_indices(&self) -> Vec<usize> {
        self.members
            .iter()
            .enumerate()
            .filter(|(_, s)| s.alive)
            .map(|(i, _)| i)
            .collect()
    }

    pub fn alive_count(&self) -> usize {
        self.members.iter().filter(|s| s.alive).count()
    }

    /// Number of members (alive or dead) with a phenotype
    pub fn count(&self, phenotype: Phenotype) -> usize {
        self.members.iter().filter(|s| s.phenotype == phenotype).count()
    }

    /// Number of alive members with a phenotype
    pub fn count_alive(&self, phenotype: Phenotype) -> usize {
        self.members
            .iter()
            .filter(|s| s.alive && s.phenotype == phenotype)
            .count()
    }

    pub fn is_extinct(&self) -> bool {
        self.alive_count() == 0
    }

    /// Draw `count` alive members with replacement, weighted by the profile,
    /// and mark them dead.
    ///
    /// A member drawn more than once dies once. `count` may exceed the number
    /// of alive members. Returns the number of newly dead members.
    pub fn eliminate<R: Rng + ?Sized>(
        &mut self,
        count: usize,
        profile: &EliminationProfile,
        rng: &mut R,
    ) -> usize {
        if count == 0 {
            return 0;
        }

        let alive = self.alive_indices();
        let weights: Vec<f64> = alive
            .iter()
            .map(|&i| profile.weight(self.members[i].phenotype))
            .collect();

        // WeightedIndex panics on an overflowing total
        if !weights.iter().sum::<f64>().is_finite() {
            log::debug!(
                "Generation {}: elimination skipped (total weight overflows)",
                self.generation
            );
            return 0;
        }

        // Empty or all-zero weights: nobody can be drawn
        let distribution = match WeightedIndex::new(&weights) {
            Ok(d) => d,
            Err(e) => {
                log::debug!(
                    "Generation {}: elimination skipped ({})",
                    self.generation,
                    e
                );
                return 0;
            }
        };

        let mut newly_dead = 0;
        for _ in 0..count {
            let member = &mut self.members[alive[distribution.sample(rng)]];
            if member.alive {
                member.alive = false;
                newly_dead += 1;
            }
        }

        log::debug!(
            "Generation {}: {} draws, {} eliminated, {} alive",
            self.generation,
            count,
            newly_dead,
            self.alive_count()
        );

        newly_dead
    }

    /// Advance each member's phenotype one step with probability `rate`.
    ///
    /// Dead members mutate too. Returns the number of mutated members.
    pub fn mutate<R: Rng + ?Sized>(&mut self, rate: f64, rng: &mut R) -> usize {
        let mut mutated = 0;
        for member in &mut self.members {
            if rng.gen::<f64>() < rate {
                member.phenotype = member.phenotype.next();
                mutated += 1;
            }
        }

        log::debug!(
            "Generation {}: {} of {} mutated",
            self.generation,
            mutated,
            self.members.len()
        );

        mutated
    }

    /// Draw a full generation of children from the alive members.
    ///
    /// Parents are drawn uniformly with replacement. With `sort_by_parent`
    /// the pairs are ordered by parent index, otherwise by draw order.
    pub fn generate_offspring<R: Rng + ?Sized>(
        &self,
        sort_by_parent: bool,
        rng: &mut R,
    ) -> Result<Offspring, PopulationError> {
        let alive = self.alive_indices();
        if alive.is_empty() {
            return Err(PopulationError::Extinct {
                generation: self.generation,
            });
        }

        let mut parents: Vec<usize> = (0..self.members.len())
            .map(|_| alive[rng.gen_range(0..alive.len())])
            .collect();

        if sort_by_parent {
            parents.sort_unstable();
        }

        let specimens = parents.iter().map(|&i| self.members[i].offspring()).collect();

        Ok(Offspring { parents, specimens })
    }
}

/// Errors raised by population operators
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PopulationError {
    /// No alive member left to reproduce
    Extinct { generation: usize },
    SizeMismatch { expected: usize, found: usize },
    ParentOutOfRange { index: usize, len: usize },
}

impl std::fmt::Display for PopulationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Extinct { generation } => {
                write!(f, "Generation {} has no alive members", generation)
            }
            Self::SizeMismatch { expected, found } => {
                write!(f, "Expected {} parent indices, found {}", expected, found)
            }
            Self::ParentOutOfRange { index, len } => {
                write!(f, "Parent index {} out of range for {} members", index, len)
            }
        }
    }
}

impl std::error::Error for PopulationError {}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    use Phenotype::{Dark, Light};

    fn rng() -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(42)
    }

    fn mixed() -> Population {
        Population::from_phenotypes(&[Light, Light, Dark, Dark], Backdrop::Light)
    }

    #[test]
    fn test_seed_population() {
        let mut rng = rng();
        let pop = Population::seed(20, Backdrop::Light, &mut rng);

        assert_eq!(pop.len(), 20);
        assert_eq!(pop.generation(), 0);
        assert!(pop.parent_of().is_none());
        assert_eq!(pop.alive_count(), 20);
        assert_eq!(pop.count(Light) + pop.count(Dark), 20);
    }

    #[test]
    fn test_seed_uses_both_phenotypes() {
        let mut rng = rng();
        let pop = Population::seed(200, Backdrop::Light, &mut rng);

        assert!(pop.count(Light) > 0);
        assert!(pop.count(Dark) > 0);
    }

    #[test]
    fn test_eliminate_follows_weights() {
        let mut rng = rng();
        let mut pop = mixed();
        let profile = EliminationProfile::new(1.0, 0.0);

        let dead = pop.eliminate(2, &profile, &mut rng);

        assert!(dead >= 1 && dead <= 2);
        assert_eq!(pop.len(), 4);
        assert!(pop.members()[2].alive);
        assert!(pop.members()[3].alive);
        assert_eq!(pop.count_alive(Light), 2 - dead);
    }

    #[test]
    fn test_eliminate_removes_all_targets_eventually() {
        let mut rng = rng();
        let mut pop = mixed();
        let profile = EliminationProfile::new(1.0, 0.0);

        for _ in 0..64 {
            pop.eliminate(2, &profile, &mut rng);
            if pop.count_alive(Light) == 0 {
                break;
            }
        }

        assert_eq!(pop.count_alive(Light), 0);
        assert_eq!(pop.count_alive(Dark), 2);

        // Only zero-weight members remain: further draws are no-ops
        assert_eq!(pop.eliminate(5, &profile, &mut rng), 0);
        assert_eq!(pop.alive_count(), 2);
    }

    #[test]
    fn test_eliminate_never_revives() {
        let mut rng = rng();
        let mut pop = Population::seed(20, Backdrop::Light, &mut rng);
        let profile = EliminationProfile::new(0.3, 0.7);

        let mut previous: Vec<bool> = pop.members().iter().map(|s| s.alive).collect();
        for _ in 0..10 {
            let alive_before = pop.alive_count();
            let dead = pop.eliminate(5, &profile, &mut rng);

            assert!(dead <= alive_before.min(5));
            assert_eq!(pop.alive_count(), alive_before - dead);
            assert_eq!(pop.len(), 20);
            for (before, after) in previous.iter().zip(pop.members()) {
                assert!(*before || !after.alive);
            }
            previous = pop.members().iter().map(|s| s.alive).collect();
        }
    }

    #[test]
    fn test_eliminate_more_than_alive() {
        let mut rng = rng();
        let mut pop = mixed();
        let profile = EliminationProfile::new(1.0, 1.0);

        let dead = pop.eliminate(100, &profile, &mut rng);
        assert!(dead <= 4);
        assert_eq!(pop.len(), 4);
    }

    #[test]
    fn test_eliminate_zero_is_noop() {
        let mut rng = rng();
        let mut pop = Population::seed(20, Backdrop::Light, &mut rng);
        let before = pop.clone();

        assert_eq!(pop.eliminate(0, &EliminationProfile::new(0.3, 0.7), &mut rng), 0);
        assert_eq!(pop, before);
    }

    #[test]
    fn test_eliminate_extinct_is_noop() {
        let mut rng = rng();
        let mut pop = mixed();
        for s in pop.members_mut() {
            s.alive = false;
        }

        assert_eq!(pop.eliminate(5, &EliminationProfile::new(1.0, 1.0), &mut rng), 0);
        assert!(pop.is_extinct());
    }

    #[test]
    fn test_eliminate_overflowing_weights_is_noop() {
        let mut rng = rng();
        let mut pop = Population::seed(20, Backdrop::Light, &mut rng);
        let before = pop.clone();

        let huge = EliminationProfile::new(1e308, 1e308);
        assert_eq!(pop.eliminate(5, &huge, &mut rng), 0);
        assert_eq!(pop, before);
    }

    #[test]
    fn test_mutate_rate_zero_is_noop() {
        let mut rng = rng();
        let mut pop = Population::seed(20, Backdrop::Light, &mut rng);
        let before = pop.clone();

        assert_eq!(pop.mutate(0.0, &mut rng), 0);
        assert_eq!(pop, before);
    }

    #[test]
    fn test_mutate_rate_one_flips_everyone() {
        let mut rng = rng();
        let mut pop = mixed();
        pop.members_mut()[0].alive = false;

        assert_eq!(pop.mutate(1.0, &mut rng), 4);

        let phenotypes: Vec<Phenotype> = pop.members().iter().map(|s| s.phenotype).collect();
        assert_eq!(phenotypes, vec![Dark, Dark, Light, Light]);
        // Mutation does not touch survival
        assert!(!pop.members()[0].alive);
        assert_eq!(pop.alive_count(), 3);
    }

    #[test]
    fn test_offspring_from_alive_only() {
        let mut rng = rng();
        let mut pop = mixed();
        pop.members_mut()[0].alive = false;
        pop.members_mut()[1].alive = false;

        let offspring = pop.generate_offspring(true, &mut rng).unwrap();
        assert_eq!(offspring.len(), 4);
        assert!(offspring.parents.iter().all(|&i| i == 2 || i == 3));
        assert!(offspring.specimens.iter().all(|s| s.alive && s.phenotype == Dark));

        let next = Population::from_offspring(&pop, offspring).unwrap();
        assert_eq!(next.generation(), 1);
        assert_eq!(next.len(), 4);
        assert_eq!(next.alive_count(), 4);
        assert_eq!(next.count(Dark), 4);
    }

    #[test]
    fn test_offspring_sorted_by_parent() {
        let mut rng = rng();
        let pop = Population::seed(20, Backdrop::Light, &mut rng);

        let offspring = pop.generate_offspring(true, &mut rng).unwrap();
        assert!(offspring.parents.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn test_offspring_pairing_preserved() {
        let mut rng = rng();
        let pop = Population::seed(20, Backdrop::Light, &mut rng);

        for sort in [true, false] {
            let offspring = pop.generate_offspring(sort, &mut rng).unwrap();
            for (parent, child) in offspring.pairs() {
                assert_eq!(child.phenotype, pop.members()[parent].phenotype);
            }
        }
    }

    #[test]
    fn test_offspring_of_extinct_population() {
        let mut rng = rng();
        let mut pop = mixed();
        for s in pop.members_mut() {
            s.alive = false;
        }

        assert_eq!(
            pop.generate_offspring(true, &mut rng),
            Err(PopulationError::Extinct { generation: 0 })
        );
    }

    #[test]
    fn test_from_parent_indices() {
        let pop = mixed();

        let next = Population::from_parent_indices(&pop, vec![3, 3, 0, 1]).unwrap();
        assert_eq!(next.parent_of(), Some(&[3, 3, 0, 1][..]));
        let phenotypes: Vec<Phenotype> = next.members().iter().map(|s| s.phenotype).collect();
        assert_eq!(phenotypes, vec![Dark, Dark, Light, Light]);

        assert_eq!(
            Population::from_parent_indices(&pop, vec![0, 1]),
            Err(PopulationError::SizeMismatch { expected: 4, found: 2 })
        );
        assert_eq!(
            Population::from_parent_indices(&pop, vec![0, 1, 2, 4]),
            Err(PopulationError::ParentOutOfRange { index: 4, len: 4 })
        );
    }

    #[test]
    fn test_from_offspring_rejects_malformed_pairs() {
        let pop = Population::from_phenotypes(&[Light, Dark], Backdrop::Light);

        // Three children for a two-member parent
        let oversized = Offspring {
            parents: vec![0, 1, 1],
            specimens: vec![Specimen::new(Light); 3],
        };
        assert_eq!(
            Population::from_offspring(&pop, oversized),
            Err(PopulationError::SizeMismatch { expected: 2, found: 3 })
        );

        // Parent list shorter than the children
        let short_parents = Offspring {
            parents: vec![7],
            specimens: vec![Specimen::new(Light); 2],
        };
        assert_eq!(
            Population::from_offspring(&pop, short_parents),
            Err(PopulationError::SizeMismatch { expected: 2, found: 1 })
        );

        let dangling = Offspring {
            parents: vec![0, 7],
            specimens: vec![Specimen::new(Light); 2],
        };
        assert_eq!(
            Population::from_offspring(&pop, dangling),
            Err(PopulationError::ParentOutOfRange { index: 7, len: 2 })
        );

        let missing_children = Offspring {
            parents: vec![0, 1],
            specimens: vec![Specimen::new(Dark)],
        };
        assert_eq!(
            Population::from_offspring(&pop, missing_children),
            Err(PopulationError::SizeMismatch { expected: 2, found: 1 })
        );
    }
}
